use super::{bold, bold_italics, italics, parse, text};
use crate::Node;
use pretty_assertions::assert_eq;

#[test]
fn italics_with_unclosed_tail() {
    assert_eq!(
        parse("Some ''italic text'' ''test"),
        vec![
            text("Some "),
            italics(vec![text("italic text")]),
            text(" ''test"),
        ]
    );
}

#[test]
fn bold_italics_run() {
    assert_eq!(
        parse("Some '''''bold italic text''''' test"),
        vec![
            text("Some "),
            bold_italics(vec![text("bold italic text")]),
            text(" test"),
        ]
    );
}

#[test]
fn bold_run() {
    assert_eq!(
        parse("'''bold''' plain"),
        vec![bold(vec![text("bold")]), text(" plain")]
    );
}

#[test]
fn bold_nested_in_italics() {
    assert_eq!(
        parse("''a'''b'''c''"),
        vec![italics(vec![text("a"), bold(vec![text("b")]), text("c")])]
    );
}

#[test]
fn italics_nested_in_bold() {
    assert_eq!(
        parse("'''a''b''c'''"),
        vec![bold(vec![text("a"), italics(vec![text("b")]), text("c")])]
    );
}

#[test]
fn bold_backtracks_at_end_of_line() {
    assert_eq!(parse("'''a\nb"), vec![text("'''a\nb")]);
}

#[test]
fn bold_italics_backtracking_falls_back_to_italics() {
    // Five quotes before a line break cannot be bold italics or bold (both
    // stop at end of line); the two-quote production then claims what it
    // can, leaving one quote as content.
    assert_eq!(
        parse("'''''a\nb"),
        vec![italics(vec![text("'")]), text("a\nb")]
    );
}

#[test]
fn italics_may_span_lines() {
    assert_eq!(
        parse("''a\nb''"),
        vec![italics(vec![text("a\nb")])]
    );
}

#[test]
fn unclosed_italics_stay_plaintext() {
    assert_eq!(parse("''never closed"), vec![text("''never closed")]);
}

#[test]
fn bold_stops_before_link_close() {
    let nodes = parse("[[a|'''b]]");
    let Some(Node::Link { content, .. }) = nodes.first() else {
        panic!("expected a link, got {nodes:?}");
    };
    assert_eq!(content, &vec![bold(vec![text("b")])]);
}

#[test]
fn four_quotes_are_bold_plus_literal() {
    // ''''x'''' opens bold at the first three quotes; the fourth quote is
    // content, and the last one is left over.
    assert_eq!(
        parse("''''x''''"),
        vec![bold(vec![text("'x")]), text("'")]
    );
}
