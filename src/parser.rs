//! A recursive-descent grammar for Wikitext documents.
//!
//! Every production opens a context frame, consumes anchored tokens, and
//! either accepts the frame or falls back to its snapshot. Alternatives are
//! tried in priority order; input that matches no construct is always
//! swallowed by the plain-text production, so parsing cannot fail.

use crate::{
    ArgumentReference, Comment, ExternalLink, FormatSwitch, Heading, HeadingLevel, HtmlTag,
    InlineNode, LineNode, ListItem, Paragraph, ParserTag, PlainText, Run, TagAttribute, TagData,
    Template, TemplateArgument, ValueQuote, WikiLink, Wikitext,
    config::Configuration,
    context::Context,
    terminator,
};
use std::sync::LazyLock;

/// Whitespace that may follow a line break without ending a paragraph.
const LINE_WHITESPACE: &str = r"[\f\r\t\x0B\x85\p{Z}]+";

/// List bullets, horizontal rules, and the indented-pre space.
const LIST_PREFIX: &str = r"[*#:;]+|-{4,}| ";

/// Constructs which interrupt a run of plain text. Text is emitted up to the
/// earliest of these so the matching production gets a chance to parse it.
/// Apostrophes use a plain `''+` probe: text must stop at the *start* of any
/// apostrophe run, and the 2/3/5 disambiguation happens in [`FORMAT_SWITCH`]
/// once the cursor actually reaches the run.
static SUSPECT_END: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(concat!(
        r"\[",
        r"|\{\{\{?",
        r"|<(?:\s*\w|!--)",
        r"|''+",
        r"|(?:\b(?:https?:|ftp:|irc:|gopher:)//|//|\bnews:|\bmailto:)",
    ))
    .unwrap()
});

/// Bold and italic toggles. Four apostrophes in a row match nothing here;
/// the extra apostrophe falls through as plain text before the final three.
static FORMAT_SWITCH: LazyLock<fancy_regex::Regex> =
    LazyLock::new(|| fancy_regex::Regex::new(r"\A(?:'{5}|'''|'')(?!')").unwrap());

/// A URL, starting at the cursor: a scheme followed by URL characters or
/// `<...>` groups, ending before trailing punctuation that is itself followed
/// by whitespace or the end of input, or before a URL-terminating character.
static URL_MATCHER: LazyLock<fancy_regex::Regex> = LazyLock::new(|| {
    fancy_regex::Regex::new(concat!(
        r#"\A(?i)(?:(?:https?:|ftp:|irc:|gopher:)//|//|news:|mailto:)"#,
        r#"(?:<[^>]*>|[^\x00-\x20\s"\[\]\x7f|{}<>])+?"#,
        r#"(?=[!"().,:;‘-•]*(?:\s|\z)|[\x00-\x20\s"\[\]\x7f|{}<>])"#,
    ))
    .unwrap()
});

/// Parses `source` into a document tree.
pub(crate) fn parse_document(config: &Configuration, source: &str) -> Wikitext {
    log::trace!("parsing {} bytes of wikitext", source.len());
    let mut parser = Parser {
        config,
        ctx: Context::new(source),
    };
    let root = parser.parse_wikitext();
    debug_assert!(
        parser.ctx.finished(),
        "parser stopped at byte {}",
        parser.ctx.position(),
    );
    root
}

/// What the inline producer may emit inside a run.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum RunMode {
    /// The full inline set.
    Run,
    /// Plain text only, where structural inlines are forbidden.
    ExpandableText,
    /// URL tokens only, for bracketed external link targets.
    ExpandableUrl,
}

/// The outcome of ending a line.
#[derive(Debug)]
enum LineEnd {
    /// No line break could be consumed: the enclosing terminator was reached.
    Terminated,
    /// The break was folded into existing lines; parsing continues.
    Merged,
    /// The break closed a paragraph right at a terminator, leaving this
    /// trailing line.
    Extra(Paragraph),
}

/// Parser state for a single document.
#[derive(Debug)]
struct Parser<'a> {
    config: &'a Configuration,
    ctx: Context<'a>,
}

impl<'a> Parser<'a> {
    ////////////////
    // Block flow //
    ////////////////

    /// Parses a sequence of lines up to the active terminator.
    fn parse_wikitext(&mut self) -> Wikitext {
        self.ctx.start(None, true);
        let mut node = Wikitext::default();
        if self.ctx.needs_terminate(None) {
            self.ctx.accept();
            return node;
        }
        loop {
            if let Some(line) = self.parse_line(node.lines.last_mut()) {
                node.lines.push(line);
            }
            match self.parse_line_end(node.lines.last_mut()) {
                LineEnd::Terminated => break,
                LineEnd::Extra(extra) => node.lines.push(LineNode::Paragraph(extra)),
                LineEnd::Merged => {}
            }
            if self.ctx.needs_terminate(None) {
                break;
            }
        }
        self.ctx.accept();
        node
    }

    /// Parses a single line. List items and headings win over paragraphs;
    /// the paragraph production always succeeds, returning `None` when the
    /// line was folded into a previous unclosed paragraph.
    fn parse_line(&mut self, last: Option<&mut LineNode>) -> Option<LineNode> {
        // a line break ends the line; enclosing terminators stay in effect
        self.ctx.start(Some(r"\n"), true);
        let node = if let Some(node) = self.parse_list_item() {
            Some(node)
        } else if let Some(node) = self.parse_heading() {
            Some(node)
        } else {
            self.parse_compact_paragraph(last)
        };
        self.ctx.accept();
        node
    }

    /// Ends the current line and decides the fate of an unclosed paragraph:
    /// two line breaks, or one line break straight into a terminator, close
    /// it. A line break between any two lines is reproduced by the join in
    /// [`Wikitext`]'s stringification; a break interior to a paragraph lives
    /// in its content.
    fn parse_line_end(&mut self, last: Option<&mut LineNode>) -> LineEnd {
        let last = last.expect("parse_line_end requires a previous line");
        let paragraph = match last {
            LineNode::Paragraph(paragraph) if paragraph.compact => Some(paragraph),
            _ => None,
        };
        self.ctx.start(None, true);
        if self.ctx.consume_token(r"\n").is_none() {
            self.ctx.fallback();
            return LineEnd::Terminated;
        }
        let Some(paragraph) = paragraph else {
            // a heading or list item ended cleanly
            self.ctx.start(None, true);
            let ws = self.ctx.consume_token(LINE_WHITESPACE).unwrap_or("");
            if self.ctx.needs_terminate(None) {
                let mut extra = Paragraph {
                    inlines: Vec::new(),
                    compact: true,
                };
                if !ws.is_empty() {
                    push_text(&mut extra.inlines, ws);
                }
                self.ctx.accept();
                self.ctx.accept();
                return LineEnd::Extra(extra);
            }
            // the whitespace may open an indented line
            self.ctx.fallback();
            self.ctx.accept();
            return LineEnd::Merged;
        };
        self.ctx.start(None, true);
        let ws = self.ctx.consume_token(LINE_WHITESPACE).unwrap_or("");
        if self.ctx.consume_token(r"\n").is_some() {
            // a blank line: the paragraph closes and keeps the first break
            // and the whitespace; the second break is reproduced by the join
            close_paragraph(paragraph, ws);
            self.ctx.accept();
            self.ctx.accept();
            if self.ctx.needs_terminate(None) {
                // the trailing line is empty
                return LineEnd::Extra(Paragraph {
                    inlines: Vec::new(),
                    compact: true,
                });
            }
            return LineEnd::Merged;
        }
        if self.ctx.needs_terminate(None) {
            // a line break straight into the terminator also closes
            close_paragraph(paragraph, ws);
            self.ctx.accept();
            self.ctx.accept();
            return LineEnd::Merged;
        }
        // the line continues into the same paragraph
        self.ctx.fallback();
        self.ctx.accept();
        LineEnd::Merged
    }

    ///////////////////////
    // Block-level items //
    ///////////////////////

    /// Parses an unordered, ordered, or definition list item, a horizontal
    /// rule, or an indented-pre line.
    ///
    /// ```wikitext
    /// * Unordered
    /// # Ordered
    /// ; Term
    /// : Detail
    /// ----
    /// ```
    fn parse_list_item(&mut self) -> Option<LineNode> {
        self.ctx.start(None, true);
        let Some(prefix) = self.ctx.consume_token(LIST_PREFIX) else {
            return self.ctx.failed();
        };
        let mut item = ListItem {
            prefix: prefix.to_string(),
            inlines: Vec::new(),
        };
        // content is optional: `*` alone is a valid item
        self.parse_run(RunMode::Run, &mut item.inlines);
        self.ctx.accept();
        Some(LineNode::ListItem(item))
    }

    /// Parses a heading.
    ///
    /// ```wikitext
    /// =h1=
    /// ==h2==
    /// ===h3===
    /// ```
    ///
    /// Level matching is greedy, but both sides must balance and the closing
    /// run must end the line, so every candidate level from the longest
    /// opening run down is attempted.
    fn parse_heading(&mut self) -> Option<LineNode> {
        let equals = self.ctx.look_ahead(r"={1,6}")?;
        for level in (1..=equals.len()).rev() {
            let closing = format!(r"(?m)={{{level}}}$");
            self.ctx.start(Some(&closing), true);
            if self.ctx.consume_token(&format!("={{{level}}}")).is_none() {
                self.ctx.fallback();
                continue;
            }
            let mut heading = Heading {
                level: HeadingLevel::try_from(u8::try_from(level).unwrap())
                    .expect("heading level in range"),
                inlines: Vec::new(),
            };
            if !self.parse_run(RunMode::Run, &mut heading.inlines) {
                self.ctx.fallback();
                continue;
            }
            if self.ctx.consume_token(&closing).is_none() {
                self.ctx.fallback();
                continue;
            }
            self.ctx.accept();
            return Some(LineNode::Heading(heading));
        }
        None
    }

    /// Parses a paragraph line, either folding it into `last` when that is
    /// still an unclosed paragraph or opening a new compact paragraph.
    fn parse_compact_paragraph(&mut self, last: Option<&mut LineNode>) -> Option<LineNode> {
        if let Some(LineNode::Paragraph(paragraph)) = last {
            if paragraph.compact {
                // the line break consumed by parse_line_end belongs to the
                // continued paragraph's content
                push_text(&mut paragraph.inlines, "\n");
                self.parse_run(RunMode::Run, &mut paragraph.inlines);
                return None;
            }
        }
        let mut paragraph = Paragraph {
            inlines: Vec::new(),
            compact: true,
        };
        self.parse_run(RunMode::Run, &mut paragraph.inlines);
        Some(LineNode::Paragraph(paragraph))
    }

    //////////////////
    // Inline items //
    //////////////////

    /// Produces inline children into `inlines` until the active terminator
    /// matches or nothing more can be produced. Returns true if at least one
    /// child was added.
    fn parse_run(&mut self, mode: RunMode, inlines: &mut Vec<InlineNode>) -> bool {
        let mut parsed = false;
        loop {
            if self.ctx.needs_terminate(None) {
                break;
            }
            // expandables may appear in any mode
            let node = self.parse_expandable().or_else(|| match mode {
                RunMode::Run => self.parse_inline(),
                RunMode::ExpandableText => self.parse_partial_plain_text(),
                RunMode::ExpandableUrl => self.parse_url_text(),
            });
            let Some(node) = node else { break };
            push_inline(inlines, node);
            parsed = true;
        }
        parsed
    }

    /// Parses one inline item, trying the alternatives in priority order.
    fn parse_inline(&mut self) -> Option<InlineNode> {
        self.parse_tag()
            .or_else(|| self.parse_wiki_link())
            .or_else(|| self.parse_external_link())
            .or_else(|| self.parse_format_switch())
            .or_else(|| self.parse_partial_plain_text())
    }

    /// Parses an internal link.
    ///
    /// ```wikitext
    /// [[Target]]
    /// [[Target|text]]
    /// ```
    fn parse_wiki_link(&mut self) -> Option<InlineNode> {
        // wikilinks do not nest within themselves
        self.ctx.start(Some(r"\||\n|\[\[|\]\]"), true);
        if self.ctx.consume_token(r"\[\[").is_none() {
            return self.ctx.failed();
        }
        let mut target = Run::default();
        if !self.parse_run(RunMode::ExpandableText, &mut target.inlines) {
            return self.ctx.failed();
        }
        let mut text = None;
        if self.ctx.consume_token(r"\|").is_some() {
            // the pipe is literal from here on; [[Target|]] keeps an empty run
            self.ctx.set_terminator(r"\n|\[\[|\]\]");
            let mut run = Run::default();
            self.parse_run(RunMode::Run, &mut run.inlines);
            text = Some(run);
        }
        if self.ctx.consume_token(r"\]\]").is_none() {
            return self.ctx.failed();
        }
        self.ctx.accept();
        Some(InlineNode::WikiLink(WikiLink { target, text }))
    }

    /// Parses an external link, bracketed or bare.
    ///
    /// ```wikitext
    /// [https://example.org text]
    /// https://example.org
    /// ```
    fn parse_external_link(&mut self) -> Option<InlineNode> {
        self.ctx.start(Some(r"[\s\]\|]"), true);
        let brackets = self.ctx.consume_token(r"\[").is_some();
        let mut target = Run::default();
        if brackets {
            if !self.parse_run(RunMode::ExpandableUrl, &mut target.inlines) {
                return self.ctx.failed();
            }
        } else {
            let Some(url) = self.parse_url_text() else {
                return self.ctx.failed();
            };
            target.inlines.push(url);
        }
        let mut node = ExternalLink {
            target,
            text: None,
            separator: String::new(),
            brackets,
        };
        if brackets {
            if let Some(separator) = self.ctx.consume_token(r"[ \t]") {
                node.separator = separator.to_string();
                self.ctx.set_terminator(r"[\]\n]");
                let mut run = Run::default();
                self.parse_run(RunMode::Run, &mut run.inlines);
                node.text = Some(run);
            }
            if self.ctx.consume_token(r"\]").is_none() {
                return self.ctx.failed();
            }
        }
        self.ctx.accept();
        Some(InlineNode::ExternalLink(node))
    }

    /// Parses a bold or italic toggle.
    ///
    /// A run of exactly four apostrophes is ambiguous. In the middle of
    /// content the matcher takes nothing, so one apostrophe falls through as
    /// plain text before a bold toggle on the remaining three. At the end of
    /// the enclosing content the split is mirrored: the first three toggle
    /// bold and the last apostrophe is left as text after it.
    fn parse_format_switch(&mut self) -> Option<InlineNode> {
        if let Some(matched) = FORMAT_SWITCH.find(self.ctx.rest()).ok().flatten() {
            let token = self.ctx.consume_len(matched.end());
            return Some(InlineNode::FormatSwitch(match token.len() {
                5 => FormatSwitch {
                    switch_bold: true,
                    switch_italics: true,
                },
                3 => FormatSwitch {
                    switch_bold: true,
                    switch_italics: false,
                },
                _ => FormatSwitch {
                    switch_bold: false,
                    switch_italics: true,
                },
            }));
        }
        let run = self.ctx.look_ahead("'+")?;
        if run.len() != 4 {
            return None;
        }
        self.ctx.start(None, true);
        self.ctx.consume_len(run.len());
        let ends_content = self.ctx.needs_terminate(None);
        self.ctx.fallback();
        if !ends_content {
            return None;
        }
        self.ctx.consume_len(3);
        Some(InlineNode::FormatSwitch(FormatSwitch {
            switch_bold: true,
            switch_italics: false,
        }))
    }

    /// Emits at least one character of plain text, stopping before the
    /// earliest terminator or suspect construct after the first character.
    fn parse_partial_plain_text(&mut self) -> Option<InlineNode> {
        if self.ctx.at_end() {
            return None;
        }
        let position = self.ctx.position();
        let from = self.ctx.char_boundary_after(1);
        let until = self.ctx.find_terminator(1);
        let end = match SUSPECT_END.find(&self.ctx.source()[from..until]) {
            Some(matched) => from + matched.start(),
            None => until,
        };
        let content = self.ctx.consume_len(end - position);
        Some(InlineNode::PlainText(PlainText {
            content: content.to_string(),
        }))
    }

    /// Consumes a single URL token starting at the cursor.
    fn parse_url_text(&mut self) -> Option<InlineNode> {
        let matched = URL_MATCHER.find(self.ctx.rest()).ok().flatten()?;
        let content = self.ctx.consume_len(matched.end());
        Some(InlineNode::PlainText(PlainText {
            content: content.to_string(),
        }))
    }

    /////////////////
    // Expandables //
    /////////////////

    /// Parses a construct that MediaWiki substitutes at transclusion time.
    /// These may appear in any run mode.
    fn parse_expandable(&mut self) -> Option<InlineNode> {
        self.parse_argument_reference()
            .or_else(|| self.parse_template())
            .or_else(|| self.parse_comment())
    }

    /// Parses a template parameter reference.
    ///
    /// ```wikitext
    /// {{{1}}}
    /// {{{name|default}}}
    /// ```
    fn parse_argument_reference(&mut self) -> Option<InlineNode> {
        self.ctx.start(Some(r"\||\}\}\}"), true);
        if self.ctx.consume_token(r"\{\{\{").is_none() {
            return self.ctx.failed();
        }
        let name = self.parse_wikitext();
        let mut default_value = None;
        if self.ctx.consume_token(r"\|").is_some() {
            // later pipes are part of the default value
            self.ctx.set_terminator(r"\}\}\}");
            default_value = Some(self.parse_wikitext());
        }
        if self.ctx.consume_token(r"\}\}\}").is_none() {
            return self.ctx.failed();
        }
        self.ctx.accept();
        Some(InlineNode::ArgumentReference(ArgumentReference {
            name,
            default_value,
        }))
    }

    /// Parses a template transclusion.
    ///
    /// ```wikitext
    /// {{name|anonymous|key=value}}
    /// ```
    fn parse_template(&mut self) -> Option<InlineNode> {
        self.ctx.start(Some(r"\||\}\}"), true);
        if self.ctx.consume_token(r"\{\{").is_none() {
            return self.ctx.failed();
        }
        let mut name = Run::default();
        if !self.parse_run(RunMode::ExpandableText, &mut name.inlines) {
            return self.ctx.failed();
        }
        let mut arguments = Vec::new();
        while self.ctx.consume_token(r"\|").is_some() {
            arguments.push(self.parse_template_argument());
        }
        if self.ctx.consume_token(r"\}\}").is_none() {
            return self.ctx.failed();
        }
        self.ctx.accept();
        Some(InlineNode::Template(Template { name, arguments }))
    }

    /// Parses one template argument. The first `=` splits a name from the
    /// value; without one the argument is anonymous.
    fn parse_template_argument(&mut self) -> TemplateArgument {
        self.ctx.start(Some("="), true);
        let first = self.parse_wikitext();
        if self.ctx.consume_token("=").is_some() {
            self.ctx.accept();
            let value = self.parse_wikitext();
            TemplateArgument {
                name: Some(first),
                value,
            }
        } else {
            self.ctx.accept();
            TemplateArgument {
                name: None,
                value: first,
            }
        }
    }

    /// Parses an HTML comment. An unterminated comment runs to the end of
    /// the input.
    fn parse_comment(&mut self) -> Option<InlineNode> {
        let rest = self.ctx.rest();
        let body = rest.strip_prefix("<!--")?;
        let node = match body.find("-->") {
            Some(end) => {
                let node = Comment {
                    content: body[..end].to_string(),
                    unclosed: false,
                };
                self.ctx.consume_len("<!--".len() + end + "-->".len());
                node
            }
            None => {
                let node = Comment {
                    content: body.to_string(),
                    unclosed: true,
                };
                self.ctx.consume_len(rest.len());
                node
            }
        };
        Some(InlineNode::Comment(node))
    }

    //////////
    // Tags //
    //////////

    /// Parses an extension or HTML tag.
    ///
    /// ```wikitext
    /// <nowiki>[[raw]]</nowiki>
    /// <span style="color: red">text</span>
    /// <ref/>
    /// ```
    fn parse_tag(&mut self) -> Option<InlineNode> {
        self.ctx.start(None, true);
        if self.ctx.consume_token("<").is_none() {
            return self.ctx.failed();
        }
        let Some(name) = self.ctx.consume_token(r"[a-zA-Z][\w-]*") else {
            return self.ctx.failed();
        };
        let parser_tag = self.config.is_parser_tag(name);
        if !parser_tag && !self.config.is_html_tag(name) {
            return self.ctx.failed();
        }
        let mut attributes = Vec::new();
        while let Some(attribute) = self.parse_tag_attribute() {
            attributes.push(attribute);
        }
        let trailing_whitespace = self.ctx.consume_token(r"\s+").unwrap_or("").to_string();
        let mut tag = TagData {
            name: name.to_string(),
            closing_tag_name: None,
            attributes,
            trailing_whitespace,
            closing_tag_trailing_whitespace: String::new(),
            self_closing: false,
        };
        if self.ctx.consume_token("/>").is_some() {
            tag.self_closing = true;
            self.ctx.accept();
            return Some(if parser_tag {
                InlineNode::ParserTag(ParserTag { tag, content: None })
            } else {
                InlineNode::HtmlTag(HtmlTag { tag, content: None })
            });
        }
        if self.ctx.consume_token(">").is_none() {
            return self.ctx.failed();
        }
        if parser_tag {
            return self.parse_parser_tag_content(tag);
        }
        if self.config.is_void_tag(name) {
            // void tags have no content and no closing tag
            self.ctx.accept();
            return Some(InlineNode::HtmlTag(HtmlTag { tag, content: None }));
        }
        self.parse_html_tag_content(tag)
    }

    /// Locates the closing tag of a parser tag and stores everything before
    /// it as opaque text.
    fn parse_parser_tag_content(&mut self, mut tag: TagData) -> Option<InlineNode> {
        let pattern = if self.config.case_fold_parser_tags {
            format!(r"(?i)</({})(\s*)>", tag.name)
        } else {
            format!(r"</({})(\s*)>", tag.name)
        };
        let rest = self.ctx.rest();
        let Some(captures) = terminator::get(&pattern).find_in(rest) else {
            // no closing tag: the construct fails and the `<` becomes text
            return self.ctx.failed();
        };
        let whole = captures.get(0).unwrap();
        let closing_name = captures.get(1).unwrap().as_str();
        if closing_name != tag.name {
            tag.closing_tag_name = Some(closing_name.to_string());
        }
        tag.closing_tag_trailing_whitespace = captures.get(2).unwrap().as_str().to_string();
        let content = rest[..whole.start()].to_string();
        self.ctx.consume_len(whole.end());
        self.ctx.accept();
        Some(InlineNode::ParserTag(ParserTag {
            tag,
            content: Some(content),
        }))
    }

    /// Parses the Wikitext content of an HTML tag up to its closing tag.
    fn parse_html_tag_content(&mut self, mut tag: TagData) -> Option<InlineNode> {
        let closing = format!(r"(?i)</{}(\s*)>", tag.name);
        self.ctx.start(Some(&closing), true);
        let content = self.parse_wikitext();
        self.ctx.accept();
        let Some(open) = self.ctx.consume_token(&format!(r"(?i)</{}", tag.name)) else {
            return self.ctx.failed();
        };
        let closing_name = &open["</".len()..];
        if closing_name != tag.name {
            tag.closing_tag_name = Some(closing_name.to_string());
        }
        tag.closing_tag_trailing_whitespace =
            self.ctx.consume_token(r"\s+").unwrap_or("").to_string();
        if self.ctx.consume_token(">").is_none() {
            return self.ctx.failed();
        }
        self.ctx.accept();
        Some(InlineNode::HtmlTag(HtmlTag {
            tag,
            content: Some(content),
        }))
    }

    /// Parses one tag attribute, including its leading whitespace.
    ///
    /// ```wikitext
    /// <tag name="value" checked>
    ///     ^^^^^^^^^^^^^^^^^^^^
    /// ```
    fn parse_tag_attribute(&mut self) -> Option<TagAttribute> {
        // attributes stop at the end of the tag
        self.ctx.start(Some(r"/?>"), true);
        let Some(leading) = self.ctx.consume_token(r"\s+") else {
            return self.ctx.failed();
        };
        let mut name = Run::default();
        self.ctx.start(Some(r"[\s=]"), true);
        let has_name = self.parse_run(RunMode::ExpandableText, &mut name.inlines);
        self.ctx.accept();
        if !has_name {
            return self.ctx.failed();
        }
        let mut attribute = TagAttribute {
            leading_whitespace: leading.to_string(),
            name,
            whitespace_before_eq: String::new(),
            whitespace_after_eq: String::new(),
            quote: ValueQuote::None,
            value: None,
        };
        // only take the whitespace when an `=` actually follows
        self.ctx.start(None, true);
        let before_eq = self.ctx.consume_token(r"\s+").unwrap_or("");
        if self.ctx.consume_token("=").is_none() {
            self.ctx.fallback();
            self.ctx.accept();
            return Some(attribute);
        }
        attribute.whitespace_before_eq = before_eq.to_string();
        attribute.whitespace_after_eq = self.ctx.consume_token(r"\s+").unwrap_or("").to_string();
        if self.ctx.consume_token("\"").is_some() {
            attribute.quote = ValueQuote::Double;
            self.ctx.start(Some("\""), false);
            attribute.value = Some(self.parse_wikitext());
            self.ctx.accept();
            if self.ctx.consume_token("\"").is_none() {
                self.ctx.fallback();
                return self.ctx.failed();
            }
        } else if self.ctx.consume_token("'").is_some() {
            attribute.quote = ValueQuote::Single;
            self.ctx.start(Some("'"), false);
            attribute.value = Some(self.parse_wikitext());
            self.ctx.accept();
            if self.ctx.consume_token("'").is_none() {
                self.ctx.fallback();
                return self.ctx.failed();
            }
        } else {
            self.ctx.start(Some(r"[\s>]|/>"), true);
            attribute.value = Some(self.parse_wikitext());
            self.ctx.accept();
        }
        self.ctx.accept();
        self.ctx.accept();
        Some(attribute)
    }
}

/// Closes `paragraph`, folding the line break and trailing whitespace into
/// its content.
fn close_paragraph(paragraph: &mut Paragraph, ws: &str) {
    let mut text = String::with_capacity(ws.len() + 1);
    text.push('\n');
    text.push_str(ws);
    push_text(&mut paragraph.inlines, &text);
    paragraph.compact = false;
}

/// Appends plain text, coalescing with a trailing plain-text node.
fn push_text(inlines: &mut Vec<InlineNode>, text: &str) {
    if let Some(InlineNode::PlainText(last)) = inlines.last_mut() {
        last.content.push_str(text);
        return;
    }
    inlines.push(InlineNode::PlainText(PlainText {
        content: text.to_string(),
    }));
}

/// Appends an inline node, coalescing adjacent plain-text nodes.
fn push_inline(inlines: &mut Vec<InlineNode>, node: InlineNode) {
    if let InlineNode::PlainText(text) = &node {
        if let Some(InlineNode::PlainText(last)) = inlines.last_mut() {
            last.content.push_str(&text.content);
            return;
        }
    }
    inlines.push(node);
}
