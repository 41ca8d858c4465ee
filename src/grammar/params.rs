//! `|`-separated parameter segments, shared by links and templates.
//!
//! A segment is either `key=value` or positional. Keys are a plain text run:
//! if anything other than text shows up before the `=`, or the stoppers or
//! end of line do, the segment is re-read as positional.

use crate::{
    ast::{Node, trim},
    engine::{Engine, NextOptions},
    error::Error,
};
use either::Either;

/// A parsed segment: `Left((key, value))` for `key=value`, `Right(value)`
/// for positional. Keys are trimmed and lowercased; values trimmed.
pub(crate) type Segment = Either<(String, Vec<Node>), Vec<Node>>;

/// Parses one segment. The leading `|` has already been consumed. `None`
/// means the enclosing production must fail (the value ran off the input).
pub(crate) fn segment(
    engine: &mut Engine<'_>,
    key_opts: &NextOptions,
    value_opts: &NextOptions,
) -> Result<Option<Segment>, Error> {
    let mark = engine.mark();
    if let Some(key_nodes) = engine.next(key_opts)? {
        let key = text_of(&key_nodes).map(|key| key.trim().to_ascii_lowercase());
        match key {
            Some(key) if !key.is_empty() => {
                let Some(mut value) = engine.next(value_opts)? else {
                    return Ok(None);
                };
                trim(&mut value);
                return Ok(Some(Either::Left((key, value))));
            }
            // An empty key (`|=...`) is not a key at all.
            _ => engine.rewind(mark),
        }
    }
    let Some(mut value) = engine.next(value_opts)? else {
        return Ok(None);
    };
    trim(&mut value);
    Ok(Some(Either::Right(value)))
}

/// Stores a numeric-keyed value at `positional[index - 1]`, growing the list
/// with empty slots as needed. Holes are undefined by contract.
pub(crate) fn set_positional(positional: &mut Vec<Vec<Node>>, index: usize, value: Vec<Node>) {
    if positional.len() < index {
        positional.resize_with(index, Vec::new);
    }
    positional[index - 1] = value;
}

/// The text of a node list that contains nothing but text.
pub(crate) fn text_of(nodes: &[Node]) -> Option<String> {
    let mut text = String::new();
    for node in nodes {
        match node {
            Node::Text(part) => text.push_str(part),
            _ => return None,
        }
    }
    Some(text)
}
