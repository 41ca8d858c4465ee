//! HTML entity productions.
//!
//! Only the entities that show up in article prose are recognized; anything
//! else stays literal. Aliases produce plain strings so that an entity in
//! the middle of a text run never breaks string coalescence.

use super::{Body, Kinds, Production};
use crate::{ast::Node, engine::Engine, error::Error};

/// Entity aliases, keyed by the source token after the `&`.
static ALIASES: phf::Map<&str, &str> = phf::phf_map! {
    "nbsp;" => "\u{a0}",
    "lt;" => "<",
    "gt;" => ">",
    "mdash;" => "\u{2014}",
    "ndash;" => "\u{2013}",
    "minus;" => "\u{2212}",
    "thinsp;" => "\u{2009}",
};

/// The entity sub-table. The group's `&` start has already been consumed
/// when these run.
pub(super) fn group() -> Vec<Production> {
    let mut productions: Vec<Production> = ALIASES
        .entries()
        .map(|(&start, &replacement)| {
            Production::new(Kinds::ENTITY, start, Body::Replace(replacement))
        })
        .collect();
    productions.push(Production::func(Kinds::ENTITY, "#", numeric));
    productions
}

/// A numeric character reference.
///
/// ```wikitext
/// &#1059; &#x5000;
/// ```
fn numeric(engine: &mut Engine<'_>) -> Result<Option<Node>, Error> {
    let hex = engine.eat("x");
    let mut digits = String::new();
    while let Some(ch) = engine.current_char() {
        if ch.is_ascii_digit() || (hex && ch.is_ascii_hexdigit()) {
            digits.push(ch);
            engine.advance(1);
        } else {
            break;
        }
    }
    if digits.is_empty() || !engine.eat(";") {
        return Ok(None);
    }
    let radix = if hex { 16 } else { 10 };
    let Some(value) = u32::from_str_radix(&digits, radix)
        .ok()
        .and_then(char::from_u32)
    else {
        return Ok(None);
    };
    Ok(Some(Node::Text(value.to_string())))
}
