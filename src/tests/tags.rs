use super::{parse, template, text};
use crate::{
    Node,
    ast::{AttributeValue, Attributes, ExtensionKind},
};
use pretty_assertions::assert_eq;

fn tag(name: &str, content: Vec<Node>) -> Node {
    Node::Tag {
        name: name.to_string(),
        attributes: Attributes::new(),
        content: Some(content),
        self_closing: false,
    }
}

fn attributes(entries: &[(&str, AttributeValue)]) -> Attributes {
    entries
        .iter()
        .map(|(name, value)| ((*name).to_string(), value.clone()))
        .collect()
}

#[test]
fn unclosed_tags_nest_into_the_previous() {
    assert_eq!(
        parse("<ul><li>a<li><li>b</li>"),
        vec![tag(
            "ul",
            vec![tag(
                "li",
                vec![text("a"), tag("li", vec![tag("li", vec![text("b")])])],
            )],
        )]
    );
}

#[test]
fn comment_content_is_trimmed_of_whitespace_and_dashes() {
    assert_eq!(
        parse("a<!-- hi -->b"),
        vec![
            text("a"),
            Node::Comment {
                content: vec![text("hi")],
            },
            text("b"),
        ]
    );
}

#[test]
fn empty_comment() {
    assert_eq!(parse("<!---->"), vec![Node::Comment { content: Vec::new() }]);
}

#[test]
fn unclosed_comment_runs_to_end_of_stream() {
    assert_eq!(
        parse("a<!-- x"),
        vec![
            text("a"),
            Node::Comment {
                content: vec![text("x")],
            },
        ]
    );
}

#[test]
fn line_breaks() {
    assert_eq!(
        parse("a<br>b<br />c"),
        vec![
            text("a"),
            Node::LineBreak,
            text("b"),
            Node::LineBreak,
            text("c"),
        ]
    );
}

#[test]
fn hr_tag_is_a_horizontal_rule() {
    assert_eq!(
        parse("a<hr>b"),
        vec![text("a"), Node::HorizontalRule, text("b")]
    );
}

#[test]
fn nowiki_escapes_markup() {
    assert_eq!(
        parse("<nowiki>''not italic'' [[x]]</nowiki>"),
        vec![Node::Extension {
            kind: ExtensionKind::Nowiki,
            attributes: Attributes::new(),
            content: vec![text("''not italic'' [[x]]")],
        }]
    );
}

#[test]
fn self_closed_nowiki_collapses_away() {
    assert_eq!(parse("a<nowiki/>b"), vec![text("ab")]);
}

#[test]
fn ref_content_is_raw() {
    assert_eq!(
        parse("<ref name=a>{{cite web}}</ref>"),
        vec![Node::Extension {
            kind: ExtensionKind::Ref,
            attributes: attributes(&[("name", AttributeValue::Text("a".to_string()))]),
            content: vec![text("{{cite web}}")],
        }]
    );
}

#[test]
fn self_closing_ref() {
    assert_eq!(
        parse("<ref/>"),
        vec![Node::Extension {
            kind: ExtensionKind::Ref,
            attributes: Attributes::new(),
            content: Vec::new(),
        }]
    );
}

#[test]
fn close_tag_is_lenient_about_case_and_spaces() {
    assert_eq!(
        parse("<REF>x</REF   >"),
        vec![Node::Extension {
            kind: ExtensionKind::Ref,
            attributes: Attributes::new(),
            content: vec![text("x")],
        }]
    );
}

#[test]
fn math_with_a_template_falls_back_to_a_generic_tag() {
    assert_eq!(
        parse("<math>{{x}}</math>"),
        vec![tag("math", vec![template("x")])]
    );
}

#[test]
fn math_without_templates_is_raw() {
    assert_eq!(
        parse("<math>x^2</math>"),
        vec![Node::Extension {
            kind: ExtensionKind::Math,
            attributes: Attributes::new(),
            content: vec![text("x^2")],
        }]
    );
}

#[test]
fn generic_tag_attributes() {
    assert_eq!(
        parse(r#"<div class="a b" hidden>x</div>"#),
        vec![Node::Tag {
            name: "div".to_string(),
            attributes: attributes(&[
                ("class", AttributeValue::Text("a b".to_string())),
                ("hidden", AttributeValue::Flag),
            ]),
            content: Some(vec![text("x")]),
            self_closing: false,
        }]
    );
}

#[test]
fn self_closing_tag() {
    assert_eq!(
        parse("<references/>"),
        vec![Node::Tag {
            name: "references".to_string(),
            attributes: Attributes::new(),
            content: None,
            self_closing: true,
        }]
    );
}

#[test]
fn angle_bracket_without_a_name_is_plaintext() {
    assert_eq!(parse("a < b <1>"), vec![text("a < b <1>")]);
}

#[test]
fn unclosed_tag_ends_at_end_of_stream() {
    assert_eq!(parse("<span>abc"), vec![tag("span", vec![text("abc")])]);
}

#[test]
fn tag_content_stops_before_link_close() {
    let nodes = parse("[[a|<span>b]]");
    let Some(Node::Link { content, .. }) = nodes.first() else {
        panic!("expected a link, got {nodes:?}");
    };
    assert_eq!(content, &vec![tag("span", vec![text("b")])]);
}

#[test]
fn gallery_lines_become_links() {
    assert_eq!(
        parse("<gallery>\nFile:a.png|Caption A\nFile:b.png\n|\n</gallery>"),
        vec![Node::Gallery {
            attributes: Attributes::new(),
            items: vec![
                Node::Link {
                    to: "File:a.png".to_string(),
                    anchor: None,
                    content: vec![text("Caption A")],
                    parameters: crate::ast::Parameters::new(),
                    positional_parameters: Vec::new(),
                    plain: false,
                },
                Node::Link {
                    to: "File:b.png".to_string(),
                    anchor: None,
                    content: vec![text("File:b.png")],
                    parameters: crate::ast::Parameters::new(),
                    positional_parameters: Vec::new(),
                    plain: false,
                },
            ],
        }]
    );
}
