//! Line-anchored block productions: lists, indents, description lines,
//! headings, preformatted blocks, and horizontal rules.

use super::Kinds;
use crate::{
    ast::{ListItem, Node, append, trim},
    engine::{Engine, NextOptions, terms},
    error::Error,
};
use std::sync::LazyLock;

/// Options for the remainder of a line; the line break is consumed.
static LINE: LazyLock<NextOptions> = LazyLock::new(|| NextOptions {
    end: terms(&["\n"]),
    end_at_eos: true,
    ..NextOptions::default()
});

/// Options for the remainder of a line, leaving the line break unconsumed.
static LINE_KEEP_BREAK: LazyLock<NextOptions> = LazyLock::new(|| NextOptions {
    end_before: terms(&["\n"]),
    end_at_eos: true,
    ..NextOptions::default()
});

/// An unordered list.
///
/// ```wikitext
/// * item
/// ** nested item
/// ```
pub(super) fn unordered_list(engine: &mut Engine<'_>) -> Result<Option<Node>, Error> {
    Ok(Some(Node::UnorderedList {
        items: list_items(engine, '*')?,
    }))
}

/// An ordered list.
///
/// ```wikitext
/// # first
/// # second
/// ```
pub(super) fn ordered_list(engine: &mut Engine<'_>) -> Result<Option<Node>, Error> {
    Ok(Some(Node::OrderedList {
        items: list_items(engine, '#')?,
    }))
}

/// An indent block.
///
/// ```wikitext
/// : indented
/// :: more indented
/// ```
pub(super) fn indent(engine: &mut Engine<'_>) -> Result<Option<Node>, Error> {
    Ok(Some(Node::Indent {
        items: list_items(engine, ':')?,
    }))
}

/// Accumulates marker lines into items until a line does not start with the
/// marker. The cursor is on the first marker (the start token was kept).
fn list_items(engine: &mut Engine<'_>, marker: char) -> Result<Vec<ListItem>, Error> {
    let mut items = Vec::new();
    loop {
        let level = engine.eat_count(marker);
        let mut content = Vec::new();
        if marker != ':' && engine.rest().starts_with(':') {
            // An embedded indent becomes the first element of the item.
            let indent_level = engine.eat_count(':');
            let line = engine.next(&LINE_KEEP_BREAK)?.unwrap_or_default();
            content.push(Node::Indent {
                items: vec![ListItem {
                    level: indent_level,
                    content: line,
                }],
            });
        }
        for node in engine.next(&LINE)?.unwrap_or_default() {
            append(&mut content, node);
        }
        items.push(ListItem { level, content });
        if !(engine.is_start_of_line() && engine.rest().starts_with(marker)) {
            break;
        }
    }
    Ok(items)
}

/// Options for a description title: up to the line break or the colon.
static TITLE: LazyLock<NextOptions> = LazyLock::new(|| NextOptions {
    end_before: terms(&[":", "\n"]),
    end_at_eos: true,
    ..NextOptions::default()
});

/// A description line. The `;` has already been consumed.
///
/// ```wikitext
/// ; term : detail
/// ```
pub(super) fn description(engine: &mut Engine<'_>) -> Result<Option<Node>, Error> {
    let Some(mut title) = engine.next(&TITLE)? else {
        return Ok(None);
    };
    trim(&mut title);
    let mut content = Vec::new();
    if engine.eat(":") {
        content = engine.next(&LINE)?.unwrap_or_default();
        trim(&mut content);
    } else {
        let _ = engine.eat("\n");
    }
    Ok(Some(Node::Description { title, content }))
}

/// Options for heading content: up to the closing run of equals signs, never
/// across a line break.
static HEADING_CONTENT: LazyLock<NextOptions> = LazyLock::new(|| NextOptions {
    end_before: terms(&["="]),
    backtrack_on: Some(|e: &Engine<'_>| Engine::is_end_of_line(e)),
    ..NextOptions::default()
});

/// A heading. The cursor is on the first `=` (the start token was kept).
///
/// ```wikitext
/// == Section ==
/// ```
pub(super) fn heading(engine: &mut Engine<'_>) -> Result<Option<Node>, Error> {
    let level = engine.eat_count('=');
    let Ok(level) = u8::try_from(level) else {
        return Ok(None);
    };
    if level > 6 {
        return Ok(None);
    }
    let Some(mut content) = engine.next(&HEADING_CONTENT)? else {
        return Ok(None);
    };
    if engine.eat_count('=') != usize::from(level) {
        return Ok(None);
    }
    engine.eat_whitespace(false);
    if !engine.is_end_of_line() {
        return Ok(None);
    }
    let _ = engine.eat("\n");
    trim(&mut content);
    Ok(Some(Node::Heading { level, content }))
}

/// Options for one rich preformatted line. Only the constructs that survive
/// inside an indented block are admitted.
static PRE_RICH: LazyLock<NextOptions> = LazyLock::new(|| NextOptions {
    end: terms(&["\n"]),
    end_at_eos: true,
    allow: Some(
        Kinds::LINE_BREAK
            .union(Kinds::TEMPLATE_PREFORMATTED)
            .union(Kinds::COMMENT)
            .union(Kinds::LINK)
            .union(Kinds::BOLD)
            .union(Kinds::ITALICS),
    ),
    ..NextOptions::default()
});

/// Fallback options for a preformatted line: raw text. This cannot fail.
static PRE_RAW: LazyLock<NextOptions> = LazyLock::new(|| NextOptions {
    end: terms(&["\n"]),
    end_at_eos: true,
    allow: Some(Kinds::empty()),
    ..NextOptions::default()
});

/// A preformatted block: consecutive space-prefixed lines. The cursor is on
/// the leading space of the first line (the start token was kept).
pub(super) fn preformatted(engine: &mut Engine<'_>) -> Result<Option<Node>, Error> {
    let mut content = Vec::new();
    while engine.is_start_of_line() && engine.rest().starts_with(' ') {
        engine.advance(1);
        let line = match engine.next(&PRE_RICH)? {
            Some(line) => line,
            None => engine.next(&PRE_RAW)?.unwrap_or_default(),
        };
        for node in line {
            append(&mut content, node);
        }
        append(&mut content, Node::Text("\n".to_string()));
    }
    Ok(Some(Node::Preformatted { content }))
}

/// A horizontal rule. The `----` has already been consumed; any extra dashes
/// belong to the rule.
pub(super) fn horizontal_rule(engine: &mut Engine<'_>) -> Result<Option<Node>, Error> {
    let _ = engine.eat_count('-');
    Ok(Some(Node::HorizontalRule))
}
