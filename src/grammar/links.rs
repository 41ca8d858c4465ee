//! Internal and external link productions.

use super::{Kinds, params};
use crate::{
    ast::{Node, Parameters, append, trim},
    engine::{Engine, NextOptions, terms},
    error::Error,
};
use either::Either;
use std::sync::LazyLock;

/// Protocols that can begin an external link target, lowercased.
static PROTOCOLS: phf::Set<&str> = phf::phf_set! {
    "http://", "https://", "ftp://", "ftps://", "sftp://", "git://",
    "svn://", "irc://", "ircs://", "//", "mailto:", "magnet:", "tel:",
    "urn:", "xmpp:", "geo:",
};

/// Post-condition for the external link production: the cursor (just past
/// the `[`) is on a URI-like scheme.
pub(super) fn uri_scheme_follows(engine: &Engine<'_>) -> bool {
    PROTOCOLS.iter().any(|protocol| engine.starts_with(protocol))
}

/// Options for the page token of a wikilink. Entities are permitted so that
/// `&nbsp;` in a title folds into the page text.
static PAGE: LazyLock<NextOptions> = LazyLock::new(|| NextOptions {
    end_before: terms(&["|", "]]"]),
    backtrack_on: Some(|e: &Engine<'_>| Engine::is_end_of_line(e)),
    allow: Some(Kinds::ENTITY),
    ..NextOptions::default()
});

/// Options for the key of a `key=value` parameter segment.
static KEY: LazyLock<NextOptions> = LazyLock::new(|| NextOptions {
    end: terms(&["="]),
    backtrack: terms(&["|", "{{", "]]", "<"]),
    backtrack_on: Some(|e: &Engine<'_>| Engine::is_end_of_line(e)),
    allow: Some(Kinds::empty()),
    ..NextOptions::default()
});

/// Options for a parameter value.
static VALUE: LazyLock<NextOptions> = LazyLock::new(|| NextOptions {
    end_before: terms(&["|", "]]"]),
    ..NextOptions::default()
});

/// An internal link.
///
/// ```wikitext
/// [[Page name#Anchor|key=value|content]]trail
/// ```
pub(super) fn link(engine: &mut Engine<'_>) -> Result<Option<Node>, Error> {
    let Some(mut page) = engine.next(&PAGE)? else {
        return Ok(None);
    };
    trim(&mut page);
    let mut page = match params::text_of(&page) {
        Some(page) if !page.is_empty() => page,
        _ => return Ok(None),
    };

    // A leading colon means "render as link, not as category membership".
    let mut plain = false;
    if let Some(stripped) = page.strip_prefix(':') {
        plain = true;
        page = stripped.trim_start().to_string();
    }

    let mut parameters = Parameters::new();
    let mut positional: Vec<Vec<Node>> = Vec::new();
    while engine.eat("|") {
        match params::segment(engine, &KEY, &VALUE)? {
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
    if !engine.eat("]]") {
        return Ok(None);
    }

    let (to, anchor) = match page.split_once('#') {
        Some((to, anchor)) => (to.to_string(), Some(anchor.to_string())),
        None => (page.clone(), None),
    };

    let mut content = match positional.last() {
        Some(last) if !last.is_empty() => last.clone(),
        Some(_) => {
            // Pipe trick: derive the display text from the page name, minus
            // any namespace prefix.
            let stripped = page.split_once(':').map_or(page.as_str(), |(_, rest)| rest);
            vec![Node::Text(stripped.to_string())]
        }
        None => vec![Node::Text(to.clone())],
    };

    // The link trail: word characters immediately after `]]` belong to the
    // link text, so `[[mammal]]s` reads "mammals".
    let mut trail = String::new();
    while let Some(ch) = engine.current_char() {
        if ch.is_ascii_alphanumeric() || ch == '_' {
            trail.push(ch);
            engine.advance(1);
        } else {
            break;
        }
    }
    if !trail.is_empty() {
        append(&mut content, Node::Text(trail));
    }

    Ok(Some(Node::Link {
        to,
        anchor,
        content,
        parameters,
        positional_parameters: positional,
        plain,
    }))
}

/// Options for the labeled part of an external link.
static LABEL: LazyLock<NextOptions> = LazyLock::new(|| NextOptions {
    end: terms(&["]"]),
    backtrack_on: Some(|e: &Engine<'_>| Engine::is_end_of_line(e)),
    ..NextOptions::default()
});

/// An external link.
///
/// ```wikitext
/// [https://example.org label]
/// ```
pub(super) fn external_link(engine: &mut Engine<'_>) -> Result<Option<Node>, Error> {
    let mut uri = String::new();
    while let Some(ch) = engine.current_char() {
        if ch.is_whitespace() || ch == ']' {
            break;
        }
        uri.push(ch);
        engine.advance(ch.len_utf8());
    }
    if uri.is_empty() {
        return Ok(None);
    }
    engine.eat_whitespace(false);
    let Some(mut content) = engine.next(&LABEL)? else {
        return Ok(None);
    };
    trim(&mut content);
    Ok(Some(Node::ExternalLink { uri, content }))
}
