use super::{parse, template, text};
use crate::{Node, ast::ListItem};
use pretty_assertions::assert_eq;

fn item(level: usize, content: Vec<Node>) -> ListItem {
    ListItem { level, content }
}

#[test]
fn unordered_list_levels() {
    assert_eq!(
        parse("* a\n* b\n** c\nrest"),
        vec![
            Node::UnorderedList {
                items: vec![
                    item(1, vec![text(" a")]),
                    item(1, vec![text(" b")]),
                    item(2, vec![text(" c")]),
                ],
            },
            text("rest"),
        ]
    );
}

#[test]
fn ordered_list_ends_at_plain_line() {
    assert_eq!(
        parse("# one\n# two\nno more list"),
        vec![
            Node::OrderedList {
                items: vec![item(1, vec![text(" one")]), item(1, vec![text(" two")])],
            },
            text("no more list"),
        ]
    );
}

#[test]
fn indent_levels() {
    assert_eq!(
        parse(": a\n:: b"),
        vec![Node::Indent {
            items: vec![item(1, vec![text(" a")]), item(2, vec![text(" b")])],
        }]
    );
}

#[test]
fn embedded_indent_in_list_item() {
    assert_eq!(
        parse("*: a\n"),
        vec![Node::UnorderedList {
            items: vec![item(
                1,
                vec![Node::Indent {
                    items: vec![item(1, vec![text(" a")])],
                }],
            )],
        }]
    );
}

#[test]
fn description_with_detail() {
    assert_eq!(
        parse("; term : detail\nrest"),
        vec![
            Node::Description {
                title: vec![text("term")],
                content: vec![text("detail")],
            },
            text("rest"),
        ]
    );
}

#[test]
fn description_without_detail() {
    assert_eq!(
        parse(";term\nrest"),
        vec![
            Node::Description {
                title: vec![text("term")],
                content: Vec::new(),
            },
            text("rest"),
        ]
    );
}

#[test]
fn heading_levels() {
    assert_eq!(
        parse("== Section ==\ntext"),
        vec![
            Node::Heading {
                level: 2,
                content: vec![text("Section")],
            },
            text("text"),
        ]
    );
}

#[test]
fn heading_requires_matching_close() {
    assert_eq!(parse("==a=\n"), vec![text("==a=\n")]);
}

#[test]
fn heading_without_close_is_plaintext() {
    assert_eq!(parse("=Not a heading"), vec![text("=Not a heading")]);
}

#[test]
fn heading_must_start_the_line() {
    assert_eq!(parse("a == b ==\n"), vec![text("a == b ==\n")]);
}

#[test]
fn heading_with_markup() {
    assert_eq!(
        parse("== a {{tpl}} ==\n"),
        vec![Node::Heading {
            level: 2,
            content: vec![text("a "), template("tpl")],
        }]
    );
}

#[test]
fn preformatted_accumulates_lines() {
    assert_eq!(
        parse(" a\n b\nc\n some{{a}}\n"),
        vec![
            Node::Preformatted {
                content: vec![text("a\nb\n")],
            },
            text("c\n"),
            Node::Preformatted {
                content: vec![text("some"), template("a"), text("\n")],
            },
        ]
    );
}

#[test]
fn horizontal_rule_between_lines() {
    assert_eq!(
        parse("a\n----\nb"),
        vec![text("a\n"), Node::HorizontalRule, text("\nb")]
    );
}

#[test]
fn dashes_in_the_middle_of_a_line_are_plaintext() {
    assert_eq!(
        parse("a<------------b"),
        vec![text("a<------------b")]
    );
}

#[test]
fn extra_dashes_join_the_rule() {
    assert_eq!(
        parse("--------\nx"),
        vec![Node::HorizontalRule, text("\nx")]
    );
}
