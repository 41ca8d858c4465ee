use super::{parse, parameters, template, text};
use crate::{Node, ast::Parameters};
use pretty_assertions::assert_eq;

#[test]
fn numeric_keys_fill_positional_slots() {
    assert_eq!(
        parse("{{t|2=b|a=1|1=a}}"),
        vec![Node::Template {
            name: "t".to_string(),
            parameters: parameters(&[("a", vec![text("1")])]),
            positional_parameters: vec![vec![text("a")], vec![text("b")]],
        }]
    );
}

#[test]
fn positional_parameters_keep_order() {
    assert_eq!(
        parse("{{t|first|second}}"),
        vec![Node::Template {
            name: "t".to_string(),
            parameters: Parameters::new(),
            positional_parameters: vec![vec![text("first")], vec![text("second")]],
        }]
    );
}

#[test]
fn name_is_trimmed_and_lowercased() {
    assert_eq!(
        parse("{{ Infobox Person }}"),
        vec![template("infobox person")]
    );
}

#[test]
fn keys_are_trimmed_and_lowercased_but_values_are_not_folded() {
    assert_eq!(
        parse("{{t| KEY = Value }}"),
        vec![Node::Template {
            name: "t".to_string(),
            parameters: parameters(&[("key", vec![text("Value")])]),
            positional_parameters: Vec::new(),
        }]
    );
}

#[test]
fn comments_in_the_name_are_dropped() {
    assert_eq!(parse("{{t<!-- legacy -->}}"), vec![template("t")]);
}

#[test]
fn nested_templates() {
    assert_eq!(
        parse("{{outer|{{inner}}}}"),
        vec![Node::Template {
            name: "outer".to_string(),
            parameters: Parameters::new(),
            positional_parameters: vec![vec![template("inner")]],
        }]
    );
}

#[test]
fn unclosed_template_is_plaintext() {
    assert_eq!(parse("{{a|b"), vec![text("{{a|b")]);
}

#[test]
fn empty_name_is_plaintext() {
    assert_eq!(parse("{{}}"), vec![text("{{}}")]);
}

#[test]
fn code_template_takes_raw_values() {
    assert_eq!(
        parse("{{code|''x''}}"),
        vec![Node::Template {
            name: "code".to_string(),
            parameters: Parameters::new(),
            positional_parameters: vec![vec![text("''x''")]],
        }]
    );
}

#[test]
fn value_with_line_break_is_positional() {
    assert_eq!(
        parse("{{t|a\nb=c}}"),
        vec![Node::Template {
            name: "t".to_string(),
            parameters: Parameters::new(),
            positional_parameters: vec![vec![text("a\nb=c")]],
        }]
    );
}

#[test]
fn name_may_span_lines() {
    assert_eq!(parse("{{long\nname}}"), vec![template("long\nname")]);
}
