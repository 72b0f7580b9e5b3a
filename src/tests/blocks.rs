//! Block flow: the paragraph closure rules, headings, and list items.

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn paragraph_stays_compact_at_input_end() {
    let tree = parse_text("abc");
    assert_eq!(tree.lines.len(), 1);
    let node = paragraph(&tree.lines[0]);
    assert!(node.compact);
    assert_eq!(plain_text(&node.inlines[0]), "abc");
}

#[test]
fn line_break_at_input_end_closes_the_paragraph() {
    let tree = parse_text("abc\n");
    assert_eq!(tree.lines.len(), 1);
    let node = paragraph(&tree.lines[0]);
    assert!(!node.compact);
    assert_eq!(plain_text(&node.inlines[0]), "abc\n");
}

#[test]
fn trailing_whitespace_stays_with_the_closed_paragraph() {
    let tree = parse_text("abc\n  ");
    assert_eq!(tree.lines.len(), 1);
    let node = paragraph(&tree.lines[0]);
    assert!(!node.compact);
    assert_eq!(plain_text(&node.inlines[0]), "abc\n  ");
}

#[test]
fn whitespace_blank_line_leaves_a_trailing_empty_paragraph() {
    let tree = parse_text("abc\n \n");
    assert_eq!(tree.lines.len(), 2);
    let first = paragraph(&tree.lines[0]);
    assert!(!first.compact);
    assert_eq!(plain_text(&first.inlines[0]), "abc\n ");
    let trailing = paragraph(&tree.lines[1]);
    assert!(trailing.compact);
    assert!(trailing.inlines.is_empty());
}

#[test]
fn blank_line_splits_paragraphs() {
    let tree = parse_text("abc\n\ndef");
    assert_eq!(tree.lines.len(), 2);
    let first = paragraph(&tree.lines[0]);
    assert!(!first.compact);
    assert_eq!(plain_text(&first.inlines[0]), "abc\n");
    let second = paragraph(&tree.lines[1]);
    assert!(second.compact);
    assert_eq!(plain_text(&second.inlines[0]), "def");
}

#[test]
fn interior_line_break_continues_the_paragraph() {
    let tree = parse_text("abc\ndef");
    assert_eq!(tree.lines.len(), 1);
    let node = paragraph(&tree.lines[0]);
    assert!(node.compact);
    assert_eq!(node.inlines.len(), 1);
    assert_eq!(plain_text(&node.inlines[0]), "abc\ndef");
}

#[test]
fn space_after_blank_line_opens_an_indented_line() {
    let tree = parse_text("abc\n\n def");
    assert_eq!(tree.lines.len(), 2);
    assert!(!paragraph(&tree.lines[0]).compact);
    let item = list_item(&tree.lines[1]);
    assert_eq!(item.prefix, " ");
    assert_eq!(plain_text(&item.inlines[0]), "def");
}

#[test]
fn heading_then_paragraph() {
    let tree = parse_text("== Title ==\nhello");
    assert_eq!(tree.lines.len(), 2);
    let title = heading(&tree.lines[0]);
    assert_eq!(title.level.get(), 2);
    assert_eq!(plain_text(&title.inlines[0]), " Title ");
    let body = paragraph(&tree.lines[1]);
    assert!(body.compact);
    assert_eq!(plain_text(&body.inlines[0]), "hello");
}

#[test]
fn list_item_before_input_end_leaves_a_trailing_empty_paragraph() {
    let tree = parse_text("* a\n");
    assert_eq!(tree.lines.len(), 2);
    assert_eq!(list_item(&tree.lines[0]).prefix, "*");
    let trailing = paragraph(&tree.lines[1]);
    assert!(trailing.compact);
    assert!(trailing.inlines.is_empty());
}

#[test]
fn heading_levels_are_greedy() {
    let tree = parse_text("===== H =====");
    let node = heading(&tree.lines[0]);
    assert_eq!(node.level.get(), 5);
    assert_eq!(plain_text(&node.inlines[0]), " H ");

    let tree = parse_text("====== H ======");
    let node = heading(&tree.lines[0]);
    assert_eq!(node.level.get(), 6);
    assert_eq!(plain_text(&node.inlines[0]), " H ");

    let tree = parse_text("======= H =======");
    let node = heading(&tree.lines[0]);
    assert_eq!(node.level.get(), 6);
    assert_eq!(plain_text(&node.inlines[0]), "= H =");
}

#[test]
fn unbalanced_heading_keeps_extra_equals_in_content() {
    let tree = parse_text("== a ===");
    let node = heading(&tree.lines[0]);
    assert_eq!(node.level.get(), 2);
    assert_eq!(plain_text(&node.inlines[0]), " a =");
}

#[test]
fn heading_without_closing_run_is_a_paragraph() {
    let tree = parse_text("== not a heading");
    let node = paragraph(&tree.lines[0]);
    assert_eq!(plain_text(&node.inlines[0]), "== not a heading");
}

#[test]
fn heading_with_trailing_space_is_a_paragraph() {
    // the closing run must end the line exactly
    let tree = parse_text("== a == ");
    let node = paragraph(&tree.lines[0]);
    assert_eq!(plain_text(&node.inlines[0]), "== a == ");
}

#[test]
fn list_items_do_not_merge() {
    let tree = parse_text("* item 1\n* item 2");
    assert_eq!(tree.lines.len(), 2);
    let first = list_item(&tree.lines[0]);
    assert_eq!(first.prefix, "*");
    assert_eq!(plain_text(&first.inlines[0]), " item 1");
    let second = list_item(&tree.lines[1]);
    assert_eq!(second.prefix, "*");
    assert_eq!(plain_text(&second.inlines[0]), " item 2");
}

#[test]
fn nested_list_prefixes_are_one_token() {
    let tree = parse_text("*#: x");
    let item = list_item(&tree.lines[0]);
    assert_eq!(item.prefix, "*#:");
    assert_eq!(plain_text(&item.inlines[0]), " x");
}

#[test]
fn horizontal_rule_is_a_prefix_without_content() {
    let tree = parse_text("-----");
    let item = list_item(&tree.lines[0]);
    assert_eq!(item.prefix, "-----");
    assert!(item.inlines.is_empty());
}

#[test]
fn rule_with_trailing_text() {
    let tree = parse_text("----text");
    let item = list_item(&tree.lines[0]);
    assert_eq!(item.prefix, "----");
    assert_eq!(plain_text(&item.inlines[0]), "text");
}

#[test]
fn list_interrupts_a_paragraph_without_closing_it() {
    let tree = parse_text("text\n* item");
    assert_eq!(tree.lines.len(), 2);
    assert!(paragraph(&tree.lines[0]).compact);
    assert_eq!(list_item(&tree.lines[1]).prefix, "*");
}

#[test]
fn empty_input_has_no_lines() {
    let tree = parse_text("");
    assert!(tree.is_empty());
}

#[test]
fn lone_line_break_is_a_closed_empty_paragraph() {
    let tree = parse_text("\n");
    assert_eq!(tree.lines.len(), 1);
    let node = paragraph(&tree.lines[0]);
    assert!(!node.compact);
    assert_eq!(plain_text(&node.inlines[0]), "\n");
}
