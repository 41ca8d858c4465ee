use crate::{Node, Options, Parser, ast::Parameters};

mod blocks;
mod entities;
mod formatting;
mod serialize;
mod tables;
mod tags;
mod templates;

#[track_caller]
fn parse(input: &str) -> Vec<Node> {
    let nodes = Parser::new(Options::default())
        .parse(input)
        .expect("parse should succeed");
    assert_well_formed(&nodes);
    nodes
}

fn text(text: &str) -> Node {
    Node::Text(text.to_string())
}

fn italics(content: Vec<Node>) -> Node {
    Node::Italics { content }
}

fn bold(content: Vec<Node>) -> Node {
    Node::Bold { content }
}

fn bold_italics(content: Vec<Node>) -> Node {
    Node::BoldItalics { content }
}

/// A bare link whose content is its own target.
fn link(to: &str) -> Node {
    Node::Link {
        to: to.to_string(),
        anchor: None,
        content: vec![text(to)],
        parameters: Parameters::new(),
        positional_parameters: Vec::new(),
        plain: false,
    }
}

fn template(name: &str) -> Node {
    Node::Template {
        name: name.to_string(),
        parameters: Parameters::new(),
        positional_parameters: Vec::new(),
    }
}

fn parameters(entries: &[(&str, Vec<Node>)]) -> Parameters {
    entries
        .iter()
        .map(|(key, value)| ((*key).to_string(), value.clone()))
        .collect()
}

/// Checks the coalescing contract at every list level: no adjacent strings
/// and no empty strings, recursively.
#[track_caller]
fn assert_well_formed(nodes: &[Node]) {
    for window in nodes.windows(2) {
        assert!(
            !matches!(window, [Node::Text(_), Node::Text(_)]),
            "adjacent plaintext nodes: {window:?}"
        );
    }
    for node in nodes {
        match node {
            Node::Text(text) => assert!(!text.is_empty(), "empty plaintext node"),
            Node::Link {
                content,
                parameters,
                positional_parameters,
                ..
            } => {
                assert_well_formed(content);
                for value in parameters.values() {
                    assert_well_formed(value);
                }
                for value in positional_parameters {
                    assert_well_formed(value);
                }
            }
            Node::Template {
                parameters,
                positional_parameters,
                ..
            } => {
                for value in parameters.values() {
                    assert_well_formed(value);
                }
                for value in positional_parameters {
                    assert_well_formed(value);
                }
            }
            Node::UnorderedList { items } | Node::OrderedList { items } | Node::Indent { items } => {
                for item in items {
                    assert_well_formed(&item.content);
                }
            }
            Node::Description { title, content } => {
                assert_well_formed(title);
                assert_well_formed(content);
            }
            Node::Table {
                caption, content, ..
            } => {
                assert_well_formed(caption);
                assert_well_formed(content);
            }
            Node::TableRow {
                content, comments, ..
            } => {
                assert_well_formed(content);
                assert_well_formed(comments);
            }
            other => {
                if let Some(children) = other.children() {
                    assert_well_formed(children);
                }
            }
        }
    }
}
