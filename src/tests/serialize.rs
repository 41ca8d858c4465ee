use super::parse;
use pretty_assertions::assert_eq;
use serde_json::json;

#[track_caller]
fn to_json(input: &str) -> serde_json::Value {
    serde_json::to_value(parse(input)).expect("the tree serializes")
}

#[test]
fn plaintext_is_a_bare_string() {
    assert_eq!(to_json("a ''b''"), json!(["a ", {"type": "italics", "content": ["b"]}]));
}

#[test]
fn link_optional_fields_are_omitted() {
    assert_eq!(
        to_json("[[a]]"),
        json!([{"type": "link", "to": "a", "content": ["a"]}])
    );
    assert_eq!(
        to_json("[[:a#b|c]]"),
        json!([{
            "type": "link",
            "to": "a",
            "anchor": "b",
            "content": ["c"],
            "positionalParameters": [["c"]],
            "plain": true,
        }])
    );
}

#[test]
fn template_fields_are_always_present() {
    assert_eq!(
        to_json("{{t}}"),
        json!([{
            "type": "template",
            "name": "t",
            "parameters": {},
            "positionalParameters": [],
        }])
    );
}

#[test]
fn horizontal_rule_serializes_with_empty_content() {
    assert_eq!(
        to_json("----\n"),
        json!([{"type": "horizontalRule", "content": []}, "\n"])
    );
}

#[test]
fn line_break_has_no_fields() {
    assert_eq!(
        to_json("a<br>"),
        json!(["a", {"type": "lineBreak"}])
    );
}

#[test]
fn table_nodes_use_dashed_type_tags() {
    assert_eq!(
        to_json("{|\n! h\n|}"),
        json!([{
            "type": "table",
            "attributes": {},
            "caption": [],
            "content": [{
                "type": "table-row",
                "attributes": {},
                "content": [{
                    "type": "table-cell",
                    "header": true,
                    "attributes": {},
                    "content": ["h"],
                }],
            }],
        }])
    );
}

#[test]
fn attributes_serialize_as_strings_or_true() {
    assert_eq!(
        to_json("<div id=\"x\" hidden></div>"),
        json!([{
            "type": "tag",
            "name": "div",
            "attributes": {"id": "x", "hidden": true},
            "content": [],
        }])
    );
}

#[test]
fn self_closing_tag_flag() {
    assert_eq!(
        to_json("<references/>"),
        json!([{
            "type": "tag",
            "name": "references",
            "attributes": {},
            "selfClosing": true,
        }])
    );
}
