//! Parser configuration data.

use phf::Set;
use std::collections::HashSet;

/// Default tag names whose content is kept as opaque text instead of being
/// reparsed as Wikitext.
pub static DEFAULT_PARSER_TAGS: Set<&str> = phf::phf_set! {
    "math", "nowiki", "pre", "ref", "source", "syntaxhighlight",
};

/// HTML5 tags allowed in Wikitext.
pub(crate) static HTML5_TAGS: Set<&str> = phf::phf_set! {
    // Explicit `<a>` tags are forbidden in Wikitext.
    "abbr",
    "b", "bdi", "bdo", "big", "blockquote", "br",
    "caption", "center", "cite", "code",
    "data", "dd", "del", "dfn", "div", "dl", "dt",
    "em",
    "font",
    "h1", "h2", "h3", "h4", "h5", "h6", "hr",
    "i", "ins",
    "kbd",
    "li",
    "mark",
    "ol",
    "p", "pre",
    "q",
    "rb", "rp", "rt", "rtc", "ruby",
    "s", "samp", "small", "span", "strike", "strong", "sub", "sup",
    "table", "td", "th", "time", "tr", "tt",
    "u", "ul",
    "var",
    "wbr",
};

/// Void HTML5 tags, which never take a closing tag.
pub(crate) static VOID_TAGS: Set<&str> = phf::phf_set! {
    "area", "base", "br", "col", "embed", "hr", "img",
    "input", "link", "meta", "param", "source",
    "track", "wbr",
};

/// User-facing parser options.
#[derive(Clone, Debug)]
pub struct ParserOptions {
    /// Tag names whose content is stored without reparsing.
    pub parser_tag_names: HashSet<String>,
    /// Whether parser-tag name comparison ignores ASCII case.
    pub case_fold_parser_tags: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            parser_tag_names: DEFAULT_PARSER_TAGS
                .iter()
                .map(|name| (*name).to_string())
                .collect(),
            case_fold_parser_tags: true,
        }
    }
}

/// Processed configuration data for the parser.
#[derive(Debug)]
pub(crate) struct Configuration {
    /// Parser tag names, lowercased up front when case folding is enabled.
    parser_tags: HashSet<String>,
    /// Configuration source.
    source: ParserOptions,
}

impl core::ops::Deref for Configuration {
    type Target = ParserOptions;

    fn deref(&self) -> &Self::Target {
        &self.source
    }
}

impl Configuration {
    /// Allocates and returns a new configuration based on the given options.
    #[must_use]
    pub fn new(source: ParserOptions) -> Self {
        let parser_tags = source
            .parser_tag_names
            .iter()
            .map(|name| {
                if source.case_fold_parser_tags {
                    name.to_ascii_lowercase()
                } else {
                    name.clone()
                }
            })
            .collect();

        Self {
            parser_tags,
            source,
        }
    }

    /// Returns true if `name` names a parser tag under the configured case
    /// folding.
    pub fn is_parser_tag(&self, name: &str) -> bool {
        if self.case_fold_parser_tags {
            self.parser_tags.contains(&name.to_ascii_lowercase())
        } else {
            self.parser_tags.contains(name)
        }
    }

    /// Returns true if `name` names a recognized HTML tag. HTML tag names are
    /// always matched case-insensitively.
    pub fn is_html_tag(&self, name: &str) -> bool {
        HTML5_TAGS.contains(name.to_ascii_lowercase().as_str())
    }

    /// Returns true if `name` names a void HTML tag.
    pub fn is_void_tag(&self, name: &str) -> bool {
        VOID_TAGS.contains(name.to_ascii_lowercase().as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tags() {
        let config = Configuration::new(ParserOptions::default());
        assert!(config.is_parser_tag("nowiki"));
        assert!(config.is_parser_tag("NoWiki"));
        assert!(config.is_html_tag("div"));
        assert!(config.is_html_tag("DIV"));
        assert!(!config.is_html_tag("nonsense"));
        assert!(config.is_void_tag("br"));
        assert!(!config.is_void_tag("div"));
    }

    #[test]
    fn case_sensitive_parser_tags() {
        let options = ParserOptions {
            case_fold_parser_tags: false,
            ..Default::default()
        };
        let config = Configuration::new(options);
        assert!(config.is_parser_tag("nowiki"));
        assert!(!config.is_parser_tag("NoWiki"));
    }
}
