use super::{parse, text};
use pretty_assertions::assert_eq;

#[test]
fn numeric_references() {
    assert_eq!(parse("&#1059; &#x5000;"), vec![text("У 倀")]);
}

#[test]
fn nbsp_preserves_coalescence() {
    assert_eq!(parse("a&nbsp;b"), vec![text("a\u{a0}b")]);
}

#[test]
fn named_aliases() {
    assert_eq!(parse("&lt;tag&gt;"), vec![text("<tag>")]);
    assert_eq!(parse("x&mdash;y"), vec![text("x\u{2014}y")]);
    assert_eq!(parse("3&thinsp;&minus;&ndash;"), vec![text("3\u{2009}\u{2212}\u{2013}")]);
}

#[test]
fn unknown_entities_stay_literal() {
    assert_eq!(parse("&unknown; &nbsp"), vec![text("&unknown; &nbsp")]);
}

#[test]
fn malformed_numeric_references_stay_literal() {
    assert_eq!(parse("&#x; &#zz; &#999999999999;"), vec![text("&#x; &#zz; &#999999999999;")]);
}

#[test]
fn magic_words_vanish() {
    assert_eq!(parse("a__TOC__b __NOTOC__"), vec![text("ab ")]);
}
