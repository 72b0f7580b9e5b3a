//! Inline items: text, format switches, and links.

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn four_apostrophes_leave_a_literal_apostrophe() {
    let tree = parse_text("''''bold''''");
    let node = paragraph(&tree.lines[0]);
    assert_eq!(node.inlines.len(), 5);
    assert_eq!(plain_text(&node.inlines[0]), "'");
    let switch = format_switch(&node.inlines[1]);
    assert!(switch.switch_bold);
    assert!(!switch.switch_italics);
    assert_eq!(plain_text(&node.inlines[2]), "bold");
    let switch = format_switch(&node.inlines[3]);
    assert!(switch.switch_bold);
    assert!(!switch.switch_italics);
    assert_eq!(plain_text(&node.inlines[4]), "'");
}

#[test]
fn five_apostrophes_toggle_both() {
    let tree = parse_text("'''''x'''''");
    let node = paragraph(&tree.lines[0]);
    let switch = format_switch(&node.inlines[0]);
    assert!(switch.switch_bold);
    assert!(switch.switch_italics);
    assert_eq!(plain_text(&node.inlines[1]), "x");
}

#[test]
fn two_apostrophes_toggle_italics() {
    let tree = parse_text("''x''");
    let node = paragraph(&tree.lines[0]);
    let switch = format_switch(&node.inlines[0]);
    assert!(!switch.switch_bold);
    assert!(switch.switch_italics);
}

#[test]
fn adjacent_plain_text_coalesces() {
    // `[b` fails to open any link and must fold back into the text
    let tree = parse_text("a[b");
    let node = paragraph(&tree.lines[0]);
    assert_eq!(node.inlines.len(), 1);
    assert_eq!(plain_text(&node.inlines[0]), "a[b");
}

#[test]
fn failed_constructs_coalesce_across_chunks() {
    let tree = parse_text("x''''y");
    let node = paragraph(&tree.lines[0]);
    assert_eq!(node.inlines.len(), 3);
    assert_eq!(plain_text(&node.inlines[0]), "x'");
    assert!(format_switch(&node.inlines[1]).switch_bold);
    assert_eq!(plain_text(&node.inlines[2]), "y");
}

#[test]
fn wiki_link_with_text() {
    let tree = parse_text("[[A|B]]");
    let node = paragraph(&tree.lines[0]);
    let link = wiki_link(&node.inlines[0]);
    assert_eq!(plain_text(&link.target.inlines[0]), "A");
    assert_eq!(plain_text(&link.text.as_ref().unwrap().inlines[0]), "B");
}

#[test]
fn wiki_link_empty_text_is_distinct_from_absent_text() {
    let tree = parse_text("[[A|]]");
    let link = wiki_link(&paragraph(&tree.lines[0]).inlines[0]);
    assert!(link.text.as_ref().unwrap().inlines.is_empty());

    let tree = parse_text("[[A]]");
    let link = wiki_link(&paragraph(&tree.lines[0]).inlines[0]);
    assert!(link.text.is_none());
}

#[test]
fn wiki_link_text_accepts_pipes_in_later_positions() {
    // only the first pipe separates target from text
    let tree = parse_text("[[a|b|c]]");
    let link = wiki_link(&paragraph(&tree.lines[0]).inlines[0]);
    assert_eq!(plain_text(&link.target.inlines[0]), "a");
    assert_eq!(plain_text(&link.text.as_ref().unwrap().inlines[0]), "b|c");
}

#[test]
fn wiki_link_rejects_line_breaks() {
    let tree = parse_text("[[a\nb]]");
    let node = paragraph(&tree.lines[0]);
    assert_eq!(node.inlines.len(), 1);
    assert_eq!(plain_text(&node.inlines[0]), "[[a\nb]]");
}

#[test]
fn bracketed_external_link() {
    let tree = parse_text("[https://example.org Example]");
    let link = external_link(&paragraph(&tree.lines[0]).inlines[0]);
    assert!(link.brackets);
    assert_eq!(plain_text(&link.target.inlines[0]), "https://example.org");
    assert_eq!(link.separator, " ");
    assert_eq!(plain_text(&link.text.as_ref().unwrap().inlines[0]), "Example");
}

#[test]
fn bracketed_external_link_without_text() {
    let tree = parse_text("[https://example.org]");
    let link = external_link(&paragraph(&tree.lines[0]).inlines[0]);
    assert!(link.brackets);
    assert!(link.text.is_none());
}

#[test]
fn bare_url_becomes_a_link() {
    let tree = parse_text("visit https://example.org now");
    let node = paragraph(&tree.lines[0]);
    assert_eq!(node.inlines.len(), 3);
    assert_eq!(plain_text(&node.inlines[0]), "visit ");
    let link = external_link(&node.inlines[1]);
    assert!(!link.brackets);
    assert!(link.text.is_none());
    assert_eq!(plain_text(&link.target.inlines[0]), "https://example.org");
    assert_eq!(plain_text(&node.inlines[2]), " now");
}

#[test]
fn bare_url_stops_before_trailing_punctuation() {
    let tree = parse_text("see https://example.org/a.");
    let node = paragraph(&tree.lines[0]);
    let link = external_link(&node.inlines[1]);
    assert_eq!(plain_text(&link.target.inlines[0]), "https://example.org/a");
    assert_eq!(plain_text(&node.inlines[2]), ".");
}

#[test]
fn bracket_without_scheme_is_not_a_link() {
    let tree = parse_text("[[A|B]] and [C http://x ok]");
    let node = paragraph(&tree.lines[0]);
    assert_eq!(node.inlines.len(), 4);
    wiki_link(&node.inlines[0]);
    assert_eq!(plain_text(&node.inlines[1]), " and [C ");
    let link = external_link(&node.inlines[2]);
    assert!(!link.brackets);
    assert_eq!(plain_text(&link.target.inlines[0]), "http://x");
    assert_eq!(plain_text(&node.inlines[3]), " ok]");
}

#[test]
fn template_allowed_in_link_target() {
    let tree = parse_text("[[a{{t}}b]]");
    let link = wiki_link(&paragraph(&tree.lines[0]).inlines[0]);
    assert_eq!(link.target.inlines.len(), 3);
    assert_eq!(plain_text(&link.target.inlines[0]), "a");
    template(&link.target.inlines[1]);
    assert_eq!(plain_text(&link.target.inlines[2]), "b");
}
