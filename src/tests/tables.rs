use super::{parse, text};
use crate::{
    Node,
    ast::{AttributeValue, Attributes},
};
use pretty_assertions::assert_eq;

fn cell(header: bool, content: Vec<Node>) -> Node {
    Node::TableCell {
        header,
        attributes: Attributes::new(),
        content,
    }
}

fn row(content: Vec<Node>) -> Node {
    Node::TableRow {
        attributes: Attributes::new(),
        content,
        comments: Vec::new(),
    }
}

#[test]
fn header_and_data_rows() {
    assert_eq!(
        parse("{| class=\"wikitable\"\n|-\n!a!!b\n|-\n|1||2\n|}"),
        vec![Node::Table {
            attributes: [(
                "class".to_string(),
                AttributeValue::Text("wikitable".to_string()),
            )]
            .into_iter()
            .collect(),
            caption: Vec::new(),
            content: vec![
                row(vec![
                    cell(true, vec![text("a")]),
                    cell(true, vec![text("b")]),
                ]),
                row(vec![
                    cell(false, vec![text("1")]),
                    cell(false, vec![text("2")]),
                ]),
            ],
        }]
    );
}

#[test]
fn caption_is_trimmed() {
    assert_eq!(
        parse("{|\n|+ Caption text\n|a\n|}"),
        vec![Node::Table {
            attributes: Attributes::new(),
            caption: vec![text("Caption text")],
            content: vec![row(vec![cell(false, vec![text("a")])])],
        }]
    );
}

#[test]
fn cell_attributes_before_a_single_pipe() {
    assert_eq!(
        parse("{|\n| style=\"text-align:right;\" | 12,333.00\n|}"),
        vec![Node::Table {
            attributes: Attributes::new(),
            caption: Vec::new(),
            content: vec![row(vec![Node::TableCell {
                header: false,
                attributes: [(
                    "style".to_string(),
                    AttributeValue::Text("text-align:right;".to_string()),
                )]
                .into_iter()
                .collect(),
                content: vec![text("12,333.00")],
            }])],
        }]
    );
}

#[test]
fn continuation_cells_abort_the_attribute_parse() {
    assert_eq!(
        parse("{| hello\n|good || bye || friend\n |}\n"),
        vec![
            Node::Table {
                attributes: [("hello".to_string(), AttributeValue::Flag)]
                    .into_iter()
                    .collect(),
                caption: Vec::new(),
                content: vec![row(vec![
                    cell(false, vec![text("good")]),
                    cell(false, vec![text("bye")]),
                    cell(false, vec![text("friend")]),
                ])],
            },
            text("\n"),
        ]
    );
}

#[test]
fn comments_attach_to_the_following_row() {
    assert_eq!(
        parse("{|\n<!-- note -->\n|-\n|a\n|}"),
        vec![Node::Table {
            attributes: Attributes::new(),
            caption: Vec::new(),
            content: vec![Node::TableRow {
                attributes: Attributes::new(),
                content: vec![cell(false, vec![text("a")])],
                comments: vec![Node::Comment {
                    content: vec![text("note")],
                }],
            }],
        }]
    );
}

#[test]
fn multi_line_cell_content() {
    assert_eq!(
        parse("{|\n|a\nb\n|}"),
        vec![Node::Table {
            attributes: Attributes::new(),
            caption: Vec::new(),
            content: vec![row(vec![cell(false, vec![text("a\nb")])])],
        }]
    );
}

#[test]
fn unterminated_table_is_plaintext() {
    assert_eq!(parse("{|\n|a"), vec![text("{|\n|a")]);
}

#[test]
fn nested_table_in_a_cell() {
    assert_eq!(
        parse("{|\n|outer\n{|\n|inner\n|}\n|}"),
        vec![Node::Table {
            attributes: Attributes::new(),
            caption: Vec::new(),
            content: vec![row(vec![cell(
                false,
                vec![
                    text("outer\n"),
                    Node::Table {
                        attributes: Attributes::new(),
                        caption: Vec::new(),
                        content: vec![row(vec![cell(false, vec![text("inner")])])],
                    },
                ],
            )])],
        }]
    );
}
