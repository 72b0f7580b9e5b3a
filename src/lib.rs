//! A round-tripping Wikitext parser.
//!
//! Parses MediaWiki markup into a syntax tree faithful enough that
//! stringifying the tree reproduces the input byte for byte:
//!
//! ```
//! let tree = mwtext::parse("== Title ==\nhello");
//! assert_eq!(tree.to_string(), "== Title ==\nhello");
//! ```
//!
//! Parsing never fails. Markup that turns out not to form a construct (an
//! unclosed `[[`, a template missing its `}}`) is rolled back and preserved
//! as plain text.

pub use config::{DEFAULT_PARSER_TAGS, ParserOptions};
use core::fmt::{self, Write as _};

mod config;
mod context;
pub mod helpers;
mod parser;
mod terminator;
#[cfg(test)]
mod tests;
pub mod visit;

/// A Wikitext parser.
#[derive(Debug)]
pub struct WikitextParser {
    /// The configuration for the parser.
    config: config::Configuration,
}

impl WikitextParser {
    /// Creates a new parser with the given options.
    pub fn new(options: ParserOptions) -> Self {
        Self {
            config: config::Configuration::new(options),
        }
    }

    /// Parses Wikitext from `source` into a syntax tree.
    pub fn parse(&self, source: &str) -> Wikitext {
        parser::parse_document(&self.config, source)
    }
}

impl Default for WikitextParser {
    fn default() -> Self {
        Self::new(ParserOptions::default())
    }
}

/// Parses Wikitext from `source` with the default options.
pub fn parse(source: &str) -> Wikitext {
    WikitextParser::default().parse(source)
}

/// A Wikitext document: an ordered sequence of lines.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Wikitext {
    /// The lines of the document.
    pub lines: Vec<LineNode>,
}

impl Wikitext {
    /// Returns true if the document has no lines at all.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl fmt::Display for Wikitext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, line) in self.lines.iter().enumerate() {
            if index > 0 {
                f.write_char('\n')?;
            }
            write!(f, "{line}")?;
        }
        Ok(())
    }
}

/// A line-level item.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LineNode {
    /// A paragraph.
    Paragraph(Paragraph),
    /// A heading.
    Heading(Heading),
    /// A list item, horizontal rule, or indented-pre line.
    ListItem(ListItem),
}

impl fmt::Display for LineNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Paragraph(node) => node.fmt(f),
            Self::Heading(node) => node.fmt(f),
            Self::ListItem(node) => node.fmt(f),
        }
    }
}

/// A paragraph.
///
/// A paragraph is *compact* while the parser may still append further input
/// lines to it; a blank line or a terminator closes it. Line breaks interior
/// to the paragraph (including the one belonging to the closing blank line)
/// are stored in its plain-text content, so stringification is a plain
/// concatenation either way.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Paragraph {
    /// The paragraph content.
    pub inlines: Vec<InlineNode>,
    /// Whether the paragraph is still open for appending.
    pub compact: bool,
}

impl fmt::Display for Paragraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_inlines(f, &self.inlines)
    }
}

/// A heading.
///
/// ```wikitext
/// == Title ==
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Heading {
    /// The heading outline level.
    pub level: HeadingLevel,
    /// The heading content.
    pub inlines: Vec<InlineNode>,
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.level.get() {
            f.write_char('=')?;
        }
        write_inlines(f, &self.inlines)?;
        for _ in 0..self.level.get() {
            f.write_char('=')?;
        }
        Ok(())
    }
}

/// A conversion error for out-of-range heading levels.
#[derive(Debug, thiserror::Error)]
#[error("{0} is not a valid heading level")]
pub struct HeadingLevelError(u8);

/// A heading level, 1 through 6.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub struct HeadingLevel(u8);

impl HeadingLevel {
    /// Returns the level as a plain integer.
    #[inline]
    pub fn get(self) -> u8 {
        self.0
    }
}

impl From<HeadingLevel> for u8 {
    fn from(value: HeadingLevel) -> Self {
        value.0
    }
}

impl TryFrom<u8> for HeadingLevel {
    type Error = HeadingLevelError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (1..=6).contains(&value) {
            Ok(Self(value))
        } else {
            Err(HeadingLevelError(value))
        }
    }
}

/// A list item.
///
/// ```wikitext
/// * Unordered
/// # Ordered
/// ; Term
/// : Detail
/// ```
///
/// Horizontal rules (`----`) and indented-pre lines (a single leading space)
/// use the same shape, distinguished by the prefix.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ListItem {
    /// The raw prefix: `[*#:;]+`, `-{4,}`, or a single space.
    pub prefix: String,
    /// The content of the item.
    pub inlines: Vec<InlineNode>,
}

impl fmt::Display for ListItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.prefix)?;
        write_inlines(f, &self.inlines)
    }
}

/// A sequence of inline nodes confined to a single logical line.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Run {
    /// The inline content.
    pub inlines: Vec<InlineNode>,
}

impl fmt::Display for Run {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_inlines(f, &self.inlines)
    }
}

/// An inline item.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum InlineNode {
    /// A run of plain text.
    PlainText(PlainText),
    /// A bold or italic toggle.
    FormatSwitch(FormatSwitch),
    /// An internal link.
    WikiLink(WikiLink),
    /// An external link, bracketed or bare.
    ExternalLink(ExternalLink),
    /// A template transclusion.
    Template(Template),
    /// A template parameter reference.
    ArgumentReference(ArgumentReference),
    /// An HTML comment.
    Comment(Comment),
    /// An extension tag whose content is opaque text.
    ParserTag(ParserTag),
    /// An HTML tag whose content is Wikitext.
    HtmlTag(HtmlTag),
}

impl fmt::Display for InlineNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PlainText(node) => node.fmt(f),
            Self::FormatSwitch(node) => node.fmt(f),
            Self::WikiLink(node) => node.fmt(f),
            Self::ExternalLink(node) => node.fmt(f),
            Self::Template(node) => node.fmt(f),
            Self::ArgumentReference(node) => node.fmt(f),
            Self::Comment(node) => node.fmt(f),
            Self::ParserTag(node) => node.fmt(f),
            Self::HtmlTag(node) => node.fmt(f),
        }
    }
}

/// A run of plain text.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PlainText {
    /// The text.
    pub content: String,
}

impl fmt::Display for PlainText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.content)
    }
}

/// A bold or italic style toggle.
///
/// ```wikitext
/// ''italics'' '''bold''' '''''both'''''
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FormatSwitch {
    /// Whether the switch toggles bold.
    pub switch_bold: bool,
    /// Whether the switch toggles italics.
    pub switch_italics: bool,
}

impl fmt::Display for FormatSwitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match (self.switch_bold, self.switch_italics) {
            (true, true) => "'''''",
            (true, false) => "'''",
            _ => "''",
        })
    }
}

/// An internal link.
///
/// ```wikitext
/// [[Target]]
/// [[Target|text]]
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WikiLink {
    /// The link target.
    pub target: Run,
    /// The link text. `Some` with an empty run for `[[Target|]]`.
    pub text: Option<Run>,
}

impl fmt::Display for WikiLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[[{}", self.target)?;
        if let Some(text) = &self.text {
            write!(f, "|{text}")?;
        }
        f.write_str("]]")
    }
}

/// An external link.
///
/// ```wikitext
/// [https://example.org text]
/// https://example.org
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExternalLink {
    /// The link target.
    pub target: Run,
    /// The link text. `Some` with an empty run for `[https://example.org ]`.
    pub text: Option<Run>,
    /// The single space or tab between target and text; empty when there is
    /// no text.
    pub separator: String,
    /// Whether the link is bracketed. Bare links never have text.
    pub brackets: bool,
}

impl fmt::Display for ExternalLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.brackets {
            return write!(f, "{}", self.target);
        }
        write!(f, "[{}", self.target)?;
        if let Some(text) = &self.text {
            write!(f, "{}{text}", self.separator)?;
        }
        f.write_char(']')
    }
}

/// A template transclusion.
///
/// ```wikitext
/// {{name|anonymous|key=value}}
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Template {
    /// The template name.
    pub name: Run,
    /// The template arguments.
    pub arguments: Vec<TemplateArgument>,
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{{{}", self.name)?;
        for argument in &self.arguments {
            write!(f, "|{argument}")?;
        }
        f.write_str("}}")
    }
}

/// A template argument, anonymous when `name` is `None`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TemplateArgument {
    /// The argument name.
    pub name: Option<Wikitext>,
    /// The argument value.
    pub value: Wikitext,
}

impl fmt::Display for TemplateArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            write!(f, "{name}=")?;
        }
        write!(f, "{}", self.value)
    }
}

/// A template parameter reference.
///
/// ```wikitext
/// {{{1}}}
/// {{{name|default}}}
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ArgumentReference {
    /// The parameter name.
    pub name: Wikitext,
    /// The default value.
    pub default_value: Option<Wikitext>,
}

impl fmt::Display for ArgumentReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{{{{{}", self.name)?;
        if let Some(default_value) = &self.default_value {
            write!(f, "|{default_value}")?;
        }
        f.write_str("}}}")
    }
}

/// An HTML comment.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Comment {
    /// The raw contents of the comment.
    pub content: String,
    /// Whether the comment tag was unterminated and ran to the end of the
    /// input.
    pub unclosed: bool,
}

impl fmt::Display for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<!--{}", self.content)?;
        if !self.unclosed {
            f.write_str("-->")?;
        }
        Ok(())
    }
}

/// An error raised when a whitespace-only field is given other content.
#[derive(Debug, thiserror::Error)]
pub enum WhitespaceError {
    /// The string contains a non-whitespace character.
    #[error("string contains non-whitespace characters")]
    NotWhitespace,
    /// The string is empty where whitespace is required.
    #[error("leading whitespace must not be empty")]
    Empty,
}

/// An error raised when a tag holding content is marked self-closing.
#[derive(Debug, thiserror::Error)]
#[error("a tag with content cannot be self-closing")]
pub struct SelfClosingError;

/// The data common to [`ParserTag`] and [`HtmlTag`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TagData {
    /// The tag name as written in the opening tag.
    pub name: String,
    /// The closing tag's spelling, when it differs from `name`.
    pub closing_tag_name: Option<String>,
    /// The tag attributes.
    pub attributes: Vec<TagAttribute>,
    /// Whitespace between the last attribute and `>` or `/>`.
    pub(crate) trailing_whitespace: String,
    /// Whitespace between the closing tag name and its `>`.
    pub(crate) closing_tag_trailing_whitespace: String,
    /// Whether the tag was written `<name/>`.
    pub(crate) self_closing: bool,
}

impl TagData {
    /// Whitespace between the last attribute and `>` or `/>`.
    pub fn trailing_whitespace(&self) -> &str {
        &self.trailing_whitespace
    }

    /// Sets the whitespace before `>`. The string must be whitespace-only.
    pub fn set_trailing_whitespace(
        &mut self,
        value: impl Into<String>,
    ) -> Result<(), WhitespaceError> {
        self.trailing_whitespace = ensure_whitespace(value.into(), true)?;
        Ok(())
    }

    /// Whitespace between the closing tag name and its `>`.
    pub fn closing_tag_trailing_whitespace(&self) -> &str {
        &self.closing_tag_trailing_whitespace
    }

    /// Sets the whitespace inside the closing tag. The string must be
    /// whitespace-only.
    pub fn set_closing_tag_trailing_whitespace(
        &mut self,
        value: impl Into<String>,
    ) -> Result<(), WhitespaceError> {
        self.closing_tag_trailing_whitespace = ensure_whitespace(value.into(), true)?;
        Ok(())
    }

    /// Whether the tag was written `<name/>`.
    pub fn is_self_closing(&self) -> bool {
        self.self_closing
    }

    /// Writes the opening tag, up to but excluding `>` or `/>`.
    fn write_open(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.name)?;
        for attribute in &self.attributes {
            write!(f, "{attribute}")?;
        }
        f.write_str(&self.trailing_whitespace)
    }

    /// Writes the closing tag.
    fn write_close(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "</{}{}>",
            self.closing_tag_name.as_deref().unwrap_or(&self.name),
            self.closing_tag_trailing_whitespace,
        )
    }
}

/// An extension tag whose content is stored as opaque text.
///
/// ```wikitext
/// <nowiki>[[not a link]]</nowiki>
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParserTag {
    /// The common tag data.
    pub tag: TagData,
    /// The raw tag content, `None` when the tag is self-closing.
    pub content: Option<String>,
}

impl ParserTag {
    /// Marks the tag self-closing. Fails when the tag holds content.
    pub fn set_self_closing(&mut self, value: bool) -> Result<(), SelfClosingError> {
        if value && self.content.as_ref().is_some_and(|content| !content.is_empty()) {
            return Err(SelfClosingError);
        }
        self.tag.self_closing = value;
        Ok(())
    }
}

impl fmt::Display for ParserTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.tag.write_open(f)?;
        if self.tag.self_closing {
            return f.write_str("/>");
        }
        f.write_char('>')?;
        if let Some(content) = &self.content {
            f.write_str(content)?;
        }
        self.tag.write_close(f)
    }
}

/// An HTML tag whose content is parsed as Wikitext.
///
/// ```wikitext
/// <span style="color: red">text</span>
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HtmlTag {
    /// The common tag data.
    pub tag: TagData,
    /// The tag content. `None` for self-closing and void tags.
    pub content: Option<Wikitext>,
}

impl HtmlTag {
    /// Marks the tag self-closing. Fails when the tag holds content.
    pub fn set_self_closing(&mut self, value: bool) -> Result<(), SelfClosingError> {
        if value && self.content.as_ref().is_some_and(|content| !content.is_empty()) {
            return Err(SelfClosingError);
        }
        self.tag.self_closing = value;
        Ok(())
    }
}

impl fmt::Display for HtmlTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.tag.write_open(f)?;
        if self.tag.self_closing {
            return f.write_str("/>");
        }
        f.write_char('>')?;
        // void tags (`<br>`, `<hr>`) carry no content and no closing tag
        let Some(content) = &self.content else {
            return Ok(());
        };
        write!(f, "{content}")?;
        self.tag.write_close(f)
    }
}

/// The quote style of a tag attribute value.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ValueQuote {
    /// An unquoted value.
    #[default]
    None,
    /// A value in single quotes.
    Single,
    /// A value in double quotes.
    Double,
}

impl ValueQuote {
    /// The delimiter text for this quote style.
    pub fn delimiter(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Single => "'",
            Self::Double => "\"",
        }
    }
}

/// An XML-like tag attribute.
///
/// ```wikitext
/// <tag name="value">
///      ^^^^^^^^^^^^
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TagAttribute {
    /// Whitespace before the attribute name. Never empty.
    pub(crate) leading_whitespace: String,
    /// The attribute name.
    pub name: Run,
    /// Whitespace between the name and `=`.
    pub(crate) whitespace_before_eq: String,
    /// Whitespace between `=` and the value.
    pub(crate) whitespace_after_eq: String,
    /// The quote style around the value.
    pub quote: ValueQuote,
    /// The attribute value. `None` when the attribute has no `=`.
    pub value: Option<Wikitext>,
}

impl TagAttribute {
    /// Creates an attribute with the given leading whitespace and name.
    pub fn new(
        leading_whitespace: impl Into<String>,
        name: Run,
    ) -> Result<Self, WhitespaceError> {
        Ok(Self {
            leading_whitespace: ensure_whitespace(leading_whitespace.into(), false)?,
            name,
            whitespace_before_eq: String::new(),
            whitespace_after_eq: String::new(),
            quote: ValueQuote::None,
            value: None,
        })
    }

    /// Whitespace before the attribute name.
    pub fn leading_whitespace(&self) -> &str {
        &self.leading_whitespace
    }

    /// Sets the whitespace before the name. The string must be non-empty
    /// whitespace.
    pub fn set_leading_whitespace(
        &mut self,
        value: impl Into<String>,
    ) -> Result<(), WhitespaceError> {
        self.leading_whitespace = ensure_whitespace(value.into(), false)?;
        Ok(())
    }

    /// Whitespace between the name and `=`.
    pub fn whitespace_before_eq(&self) -> &str {
        &self.whitespace_before_eq
    }

    /// Sets the whitespace between the name and `=`. The string must be
    /// whitespace-only.
    pub fn set_whitespace_before_eq(
        &mut self,
        value: impl Into<String>,
    ) -> Result<(), WhitespaceError> {
        self.whitespace_before_eq = ensure_whitespace(value.into(), true)?;
        Ok(())
    }

    /// Whitespace between `=` and the value.
    pub fn whitespace_after_eq(&self) -> &str {
        &self.whitespace_after_eq
    }

    /// Sets the whitespace between `=` and the value. The string must be
    /// whitespace-only.
    pub fn set_whitespace_after_eq(
        &mut self,
        value: impl Into<String>,
    ) -> Result<(), WhitespaceError> {
        self.whitespace_after_eq = ensure_whitespace(value.into(), true)?;
        Ok(())
    }
}

impl fmt::Display for TagAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.leading_whitespace, self.name)?;
        if let Some(value) = &self.value {
            let quote = self.quote.delimiter();
            write!(
                f,
                "{}={}{quote}{value}{quote}",
                self.whitespace_before_eq, self.whitespace_after_eq,
            )?;
        }
        Ok(())
    }
}

/// Validates that `value` contains only whitespace, returning it unchanged.
fn ensure_whitespace(value: String, allow_empty: bool) -> Result<String, WhitespaceError> {
    if !allow_empty && value.is_empty() {
        return Err(WhitespaceError::Empty);
    }
    if value.chars().all(char::is_whitespace) {
        Ok(value)
    } else {
        Err(WhitespaceError::NotWhitespace)
    }
}

/// Writes a sequence of inline nodes.
fn write_inlines(f: &mut fmt::Formatter<'_>, inlines: &[InlineNode]) -> fmt::Result {
    for node in inlines {
        write!(f, "{node}")?;
    }
    Ok(())
}
