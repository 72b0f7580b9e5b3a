use super::*;
use pretty_assertions::assert_eq;

mod blocks;
mod inlines;

/// Parses `input` with the default options and checks the two laws every
/// parse must satisfy: stringification reproduces the input byte for byte,
/// and reparsing the output is stable.
#[track_caller]
fn parse_text(input: &str) -> Wikitext {
    let _ = env_logger::try_init();
    let tree = parse(input);
    assert_eq!(tree.to_string(), input, "round trip failed");
    let again = parse(&tree.to_string());
    assert_eq!(again.to_string(), tree.to_string(), "restringification unstable");
    tree
}

#[track_caller]
fn paragraph(line: &LineNode) -> &Paragraph {
    match line {
        LineNode::Paragraph(node) => node,
        other => panic!("expected a paragraph, got {other:?}"),
    }
}

#[track_caller]
fn heading(line: &LineNode) -> &Heading {
    match line {
        LineNode::Heading(node) => node,
        other => panic!("expected a heading, got {other:?}"),
    }
}

#[track_caller]
fn list_item(line: &LineNode) -> &ListItem {
    match line {
        LineNode::ListItem(node) => node,
        other => panic!("expected a list item, got {other:?}"),
    }
}

#[track_caller]
fn plain_text(inline: &InlineNode) -> &str {
    match inline {
        InlineNode::PlainText(node) => &node.content,
        other => panic!("expected plain text, got {other:?}"),
    }
}

#[track_caller]
fn format_switch(inline: &InlineNode) -> &FormatSwitch {
    match inline {
        InlineNode::FormatSwitch(node) => node,
        other => panic!("expected a format switch, got {other:?}"),
    }
}

#[track_caller]
fn wiki_link(inline: &InlineNode) -> &WikiLink {
    match inline {
        InlineNode::WikiLink(node) => node,
        other => panic!("expected a wikilink, got {other:?}"),
    }
}

#[track_caller]
fn external_link(inline: &InlineNode) -> &ExternalLink {
    match inline {
        InlineNode::ExternalLink(node) => node,
        other => panic!("expected an external link, got {other:?}"),
    }
}

#[track_caller]
fn template(inline: &InlineNode) -> &Template {
    match inline {
        InlineNode::Template(node) => node,
        other => panic!("expected a template, got {other:?}"),
    }
}

#[track_caller]
fn argument_reference(inline: &InlineNode) -> &ArgumentReference {
    match inline {
        InlineNode::ArgumentReference(node) => node,
        other => panic!("expected an argument reference, got {other:?}"),
    }
}

#[track_caller]
fn comment(inline: &InlineNode) -> &Comment {
    match inline {
        InlineNode::Comment(node) => node,
        other => panic!("expected a comment, got {other:?}"),
    }
}

#[track_caller]
fn parser_tag(inline: &InlineNode) -> &ParserTag {
    match inline {
        InlineNode::ParserTag(node) => node,
        other => panic!("expected a parser tag, got {other:?}"),
    }
}

#[track_caller]
fn html_tag(inline: &InlineNode) -> &HtmlTag {
    match inline {
        InlineNode::HtmlTag(node) => node,
        other => panic!("expected an HTML tag, got {other:?}"),
    }
}
