//! Wikitext parser helpers.

use crate::{Comment, ParserTag, PlainText, TagAttribute, Wikitext, visit::Visitor};
use core::fmt;

/// Extracts the plain text from a syntax tree, skipping markup, comments,
/// and tag attributes.
pub struct TextContent<W>
where
    W: fmt::Write,
{
    /// The accumulated text.
    content: W,
}

impl<W> TextContent<W>
where
    W: fmt::Write,
{
    /// Creates a new text content extractor writing into `content`.
    pub fn new(content: W) -> Self {
        Self { content }
    }

    /// Returns the text content, consuming the extractor.
    pub fn finish(self) -> W {
        self.content
    }
}

impl<W> Visitor<fmt::Error> for TextContent<W>
where
    W: fmt::Write,
{
    fn visit_plain_text(&mut self, node: &PlainText) -> fmt::Result {
        self.content.write_str(&node.content)
    }

    fn visit_comment(&mut self, _node: &Comment) -> fmt::Result {
        Ok(())
    }

    fn visit_parser_tag(&mut self, node: &ParserTag) -> fmt::Result {
        if let Some(content) = &node.content {
            self.content.write_str(content)?;
        }
        Ok(())
    }

    fn visit_tag_attribute(&mut self, _node: &TagAttribute) -> fmt::Result {
        Ok(())
    }
}

/// Extracts the plain text of `node` into a fresh string.
pub fn text_content(node: &Wikitext) -> String {
    let mut extractor = TextContent::new(String::new());
    extractor
        .visit_wikitext(node)
        .expect("writing to a string cannot fail");
    extractor.finish()
}
