//! Helper trait for implementing syntax tree visitors.

use crate::{
    ArgumentReference, Comment, ExternalLink, FormatSwitch, Heading, HtmlTag, InlineNode,
    LineNode, ListItem, Paragraph, ParserTag, PlainText, Run, TagAttribute, Template,
    TemplateArgument, WikiLink, Wikitext,
};

/// A trait for visiting the nodes of a syntax tree.
///
/// Every method defaults to recursing into the node's children through the
/// matching `walk_*` function, so an implementation only overrides the nodes
/// it cares about.
pub trait Visitor<E = core::convert::Infallible> {
    /// Visits a [`Wikitext`] document.
    #[inline]
    fn visit_wikitext(&mut self, node: &Wikitext) -> Result<(), E> {
        walk_wikitext(self, node)
    }

    /// Visits a [`LineNode`].
    #[inline]
    fn visit_line(&mut self, node: &LineNode) -> Result<(), E> {
        walk_line(self, node)
    }

    /// Visits a [`Paragraph`].
    #[inline]
    fn visit_paragraph(&mut self, node: &Paragraph) -> Result<(), E> {
        walk_inlines(self, &node.inlines)
    }

    /// Visits a [`Heading`].
    #[inline]
    fn visit_heading(&mut self, node: &Heading) -> Result<(), E> {
        walk_inlines(self, &node.inlines)
    }

    /// Visits a [`ListItem`].
    #[inline]
    fn visit_list_item(&mut self, node: &ListItem) -> Result<(), E> {
        walk_inlines(self, &node.inlines)
    }

    /// Visits a [`Run`].
    #[inline]
    fn visit_run(&mut self, node: &Run) -> Result<(), E> {
        walk_inlines(self, &node.inlines)
    }

    /// Visits an [`InlineNode`].
    #[inline]
    fn visit_inline(&mut self, node: &InlineNode) -> Result<(), E> {
        walk_inline(self, node)
    }

    /// Visits a [`PlainText`].
    #[inline]
    fn visit_plain_text(&mut self, _node: &PlainText) -> Result<(), E> {
        Ok(())
    }

    /// Visits a [`FormatSwitch`].
    #[inline]
    fn visit_format_switch(&mut self, _node: &FormatSwitch) -> Result<(), E> {
        Ok(())
    }

    /// Visits a [`WikiLink`].
    #[inline]
    fn visit_wiki_link(&mut self, node: &WikiLink) -> Result<(), E> {
        walk_wiki_link(self, node)
    }

    /// Visits an [`ExternalLink`].
    #[inline]
    fn visit_external_link(&mut self, node: &ExternalLink) -> Result<(), E> {
        walk_external_link(self, node)
    }

    /// Visits a [`Template`].
    #[inline]
    fn visit_template(&mut self, node: &Template) -> Result<(), E> {
        walk_template(self, node)
    }

    /// Visits a [`TemplateArgument`].
    #[inline]
    fn visit_template_argument(&mut self, node: &TemplateArgument) -> Result<(), E> {
        walk_template_argument(self, node)
    }

    /// Visits an [`ArgumentReference`].
    #[inline]
    fn visit_argument_reference(&mut self, node: &ArgumentReference) -> Result<(), E> {
        walk_argument_reference(self, node)
    }

    /// Visits a [`Comment`].
    #[inline]
    fn visit_comment(&mut self, _node: &Comment) -> Result<(), E> {
        Ok(())
    }

    /// Visits a [`ParserTag`].
    #[inline]
    fn visit_parser_tag(&mut self, node: &ParserTag) -> Result<(), E> {
        walk_parser_tag(self, node)
    }

    /// Visits an [`HtmlTag`].
    #[inline]
    fn visit_html_tag(&mut self, node: &HtmlTag) -> Result<(), E> {
        walk_html_tag(self, node)
    }

    /// Visits a [`TagAttribute`].
    #[inline]
    fn visit_tag_attribute(&mut self, node: &TagAttribute) -> Result<(), E> {
        walk_tag_attribute(self, node)
    }
}

/// Walks the lines of a [`Wikitext`] document.
pub fn walk_wikitext<E, V>(visitor: &mut V, node: &Wikitext) -> Result<(), E>
where
    V: Visitor<E> + ?Sized,
{
    for line in &node.lines {
        visitor.visit_line(line)?;
    }
    Ok(())
}

/// Dispatches a [`LineNode`] to its variant's visit method.
pub fn walk_line<E, V>(visitor: &mut V, node: &LineNode) -> Result<(), E>
where
    V: Visitor<E> + ?Sized,
{
    match node {
        LineNode::Paragraph(node) => visitor.visit_paragraph(node),
        LineNode::Heading(node) => visitor.visit_heading(node),
        LineNode::ListItem(node) => visitor.visit_list_item(node),
    }
}

/// Visits each node in a sequence of inlines.
pub fn walk_inlines<E, V>(visitor: &mut V, inlines: &[InlineNode]) -> Result<(), E>
where
    V: Visitor<E> + ?Sized,
{
    for inline in inlines {
        visitor.visit_inline(inline)?;
    }
    Ok(())
}

/// Dispatches an [`InlineNode`] to its variant's visit method.
pub fn walk_inline<E, V>(visitor: &mut V, node: &InlineNode) -> Result<(), E>
where
    V: Visitor<E> + ?Sized,
{
    match node {
        InlineNode::PlainText(node) => visitor.visit_plain_text(node),
        InlineNode::FormatSwitch(node) => visitor.visit_format_switch(node),
        InlineNode::WikiLink(node) => visitor.visit_wiki_link(node),
        InlineNode::ExternalLink(node) => visitor.visit_external_link(node),
        InlineNode::Template(node) => visitor.visit_template(node),
        InlineNode::ArgumentReference(node) => visitor.visit_argument_reference(node),
        InlineNode::Comment(node) => visitor.visit_comment(node),
        InlineNode::ParserTag(node) => visitor.visit_parser_tag(node),
        InlineNode::HtmlTag(node) => visitor.visit_html_tag(node),
    }
}

/// Walks the target and text of a [`WikiLink`].
pub fn walk_wiki_link<E, V>(visitor: &mut V, node: &WikiLink) -> Result<(), E>
where
    V: Visitor<E> + ?Sized,
{
    visitor.visit_run(&node.target)?;
    if let Some(text) = &node.text {
        visitor.visit_run(text)?;
    }
    Ok(())
}

/// Walks the target and text of an [`ExternalLink`].
pub fn walk_external_link<E, V>(visitor: &mut V, node: &ExternalLink) -> Result<(), E>
where
    V: Visitor<E> + ?Sized,
{
    visitor.visit_run(&node.target)?;
    if let Some(text) = &node.text {
        visitor.visit_run(text)?;
    }
    Ok(())
}

/// Walks the name and arguments of a [`Template`].
pub fn walk_template<E, V>(visitor: &mut V, node: &Template) -> Result<(), E>
where
    V: Visitor<E> + ?Sized,
{
    visitor.visit_run(&node.name)?;
    for argument in &node.arguments {
        visitor.visit_template_argument(argument)?;
    }
    Ok(())
}

/// Walks the name and value of a [`TemplateArgument`].
pub fn walk_template_argument<E, V>(visitor: &mut V, node: &TemplateArgument) -> Result<(), E>
where
    V: Visitor<E> + ?Sized,
{
    if let Some(name) = &node.name {
        visitor.visit_wikitext(name)?;
    }
    visitor.visit_wikitext(&node.value)
}

/// Walks the name and default of an [`ArgumentReference`].
pub fn walk_argument_reference<E, V>(visitor: &mut V, node: &ArgumentReference) -> Result<(), E>
where
    V: Visitor<E> + ?Sized,
{
    visitor.visit_wikitext(&node.name)?;
    if let Some(default_value) = &node.default_value {
        visitor.visit_wikitext(default_value)?;
    }
    Ok(())
}

/// Walks the attributes of a [`ParserTag`]. The opaque content is not
/// visited.
pub fn walk_parser_tag<E, V>(visitor: &mut V, node: &ParserTag) -> Result<(), E>
where
    V: Visitor<E> + ?Sized,
{
    for attribute in &node.tag.attributes {
        visitor.visit_tag_attribute(attribute)?;
    }
    Ok(())
}

/// Walks the attributes and content of an [`HtmlTag`].
pub fn walk_html_tag<E, V>(visitor: &mut V, node: &HtmlTag) -> Result<(), E>
where
    V: Visitor<E> + ?Sized,
{
    for attribute in &node.tag.attributes {
        visitor.visit_tag_attribute(attribute)?;
    }
    if let Some(content) = &node.content {
        visitor.visit_wikitext(content)?;
    }
    Ok(())
}

/// Walks the name and value of a [`TagAttribute`].
pub fn walk_tag_attribute<E, V>(visitor: &mut V, node: &TagAttribute) -> Result<(), E>
where
    V: Visitor<E> + ?Sized,
{
    visitor.visit_run(&node.name)?;
    if let Some(value) = &node.value {
        visitor.visit_wikitext(value)?;
    }
    Ok(())
}
