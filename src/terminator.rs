//! Memoized compiled patterns for terminators and token matching.

use parking_lot::Mutex;
use regex::Regex;
use std::{
    collections::HashMap,
    sync::{Arc, LazyLock},
};

/// A compiled pattern, in both the form used to match at the cursor and the
/// form used to search ahead of it.
#[derive(Clone, Debug)]
pub(crate) struct Terminator {
    /// The pattern anchored to the start of the remaining input.
    anchored: Arc<Regex>,
    /// The pattern as written, for forward searches.
    searcher: Arc<Regex>,
}

impl Terminator {
    /// Returns true if the pattern matches exactly at the start of `rest`.
    #[inline]
    pub fn is_match_at_start(&self, rest: &str) -> bool {
        self.anchored.is_match(rest)
    }

    /// Matches the pattern at the start of `rest` and returns the end of the
    /// matched text.
    #[inline]
    pub fn match_len(&self, rest: &str) -> Option<usize> {
        self.anchored.find(rest).map(|m| m.end())
    }

    /// Returns the offset of the earliest match within `rest`.
    #[inline]
    pub fn find(&self, rest: &str) -> Option<usize> {
        self.searcher.find(rest).map(|m| m.start())
    }

    /// Matches the pattern at the start of `rest` and returns the capture
    /// groups of the match.
    #[inline]
    pub fn find_in<'h>(&self, rest: &'h str) -> Option<regex::Captures<'h>> {
        self.searcher.captures(rest)
    }
}

/// The process-wide pattern cache. Entries are only ever added, never
/// replaced or removed.
static REGISTRY: LazyLock<Mutex<HashMap<String, Terminator>>> =
    LazyLock::new(Default::default);

/// Returns the compiled form of `pattern`, compiling and caching it on first
/// use.
///
/// # Panics
///
/// * If `pattern` is not a valid regular expression. All patterns are crate
///   literals, so this only fires on a programming error.
pub(crate) fn get(pattern: &str) -> Terminator {
    let mut registry = REGISTRY.lock();
    if let Some(terminator) = registry.get(pattern) {
        return terminator.clone();
    }

    // `\A` pins the match to the cursor even when the pattern carries inline
    // flags such as `(?m)`.
    let anchored = Regex::new(&format!(r"\A(?:{pattern})")).unwrap();
    let searcher = Regex::new(pattern).unwrap();
    let terminator = Terminator {
        anchored: Arc::new(anchored),
        searcher: Arc::new(searcher),
    };
    registry.insert(pattern.to_string(), terminator.clone());
    terminator
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchoring() {
        let terminator = get(r"\|");
        assert!(terminator.is_match_at_start("|x"));
        assert!(!terminator.is_match_at_start("x|"));
        assert_eq!(terminator.find("x|"), Some(1));
    }

    #[test]
    fn multi_line_patterns_stay_anchored() {
        let terminator = get(r"(?m)={2}$");
        assert!(terminator.is_match_at_start("==\nrest"));
        assert!(terminator.is_match_at_start("=="));
        assert!(!terminator.is_match_at_start("==rest"));
        assert_eq!(terminator.find(" Title ==\nrest"), Some(7));
    }

    #[test]
    fn memoized() {
        let first = get(r"\]\]");
        let second = get(r"\]\]");
        assert!(Arc::ptr_eq(&first.anchored, &second.anchored));
    }
}
