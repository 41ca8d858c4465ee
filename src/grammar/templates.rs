//! Template productions.
//!
//! The preformatted variant reuses the same parse; only its table entry
//! differs, so that the preformatted allow list can admit templates without
//! admitting the rest of the grammar.

use super::{Kinds, params};
use crate::{
    ast::{Node, Parameters},
    engine::{Engine, NextOptions, terms},
    error::Error,
};
use either::Either;
use std::sync::LazyLock;

/// Options for the template name. Comments and nested templates are allowed
/// to appear and are dealt with afterwards; a name may span lines.
static NAME: LazyLock<NextOptions> = LazyLock::new(|| NextOptions {
    end_before: terms(&["|", "}}"]),
    allow: Some(Kinds::COMMENT.union(Kinds::TEMPLATE)),
    ..NextOptions::default()
});

/// Options for the key of a `key=value` parameter segment.
static KEY: LazyLock<NextOptions> = LazyLock::new(|| NextOptions {
    end: terms(&["="]),
    backtrack: terms(&["|", "{{", "}}", "<"]),
    backtrack_on: Some(|e: &Engine<'_>| Engine::is_end_of_line(e)),
    allow: Some(Kinds::empty()),
    ..NextOptions::default()
});

/// Options for a parameter value.
static VALUE: LazyLock<NextOptions> = LazyLock::new(|| NextOptions {
    end_before: terms(&["|", "}}"]),
    ..NextOptions::default()
});

/// Options for a parameter value of the `code` template, which takes its
/// arguments as raw text.
static VALUE_RAW: LazyLock<NextOptions> = LazyLock::new(|| NextOptions {
    end_before: terms(&["|", "}}"]),
    allow: Some(Kinds::empty()),
    ..NextOptions::default()
});

/// A template transclusion.
///
/// ```wikitext
/// {{name|positional|key=value}}
/// ```
pub(super) fn template(engine: &mut Engine<'_>) -> Result<Option<Node>, Error> {
    let Some(name_nodes) = engine.next(&NAME)? else {
        return Ok(None);
    };

    // Comments inside the name are dropped; anything else non-textual means
    // this is not a template we can name.
    let mut name = String::new();
    for node in name_nodes {
        match node {
            Node::Text(text) => name.push_str(&text),
            Node::Comment { .. } => {}
            _ => return Ok(None),
        }
    }
    let name = name.trim().to_ascii_lowercase();
    if name.is_empty() {
        return Ok(None);
    }

    let value_opts: &NextOptions = if name == "code" { &VALUE_RAW } else { &VALUE };

    let mut parameters = Parameters::new();
    let mut positional: Vec<Vec<Node>> = Vec::new();
    while engine.eat("|") {
        match params::segment(engine, &KEY, value_opts)? {
            None => return Ok(None),
            Some(Either::Left((key, value))) => match key.parse::<usize>() {
                Ok(index) if index >= 1 => params::set_positional(&mut positional, index, value),
                _ => {
                    parameters.insert(key, value);
                }
            },
            Some(Either::Right(value)) => positional.push(value),
        }
    }
    if !engine.eat("}}") {
        return Ok(None);
    }

    Ok(Some(Node::Template {
        name,
        parameters,
        positional_parameters: positional,
    }))
}
