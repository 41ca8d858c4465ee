//! The table production.
//!
//! ```wikitext
//! {| class="wikitable"
//! |+ caption
//! |-
//! ! a !! b
//! |-
//! | 1 || 2
//! |}
//! ```
//!
//! The first row is implicit when cells appear before any `|-`. Comments on
//! their own lines between rows attach to the row that follows them. The
//! closing `|}` is required; a table that runs off the input is no table.

use super::tags::{self, AttrContext};
use crate::{
    ast::{Attributes, Node, trim},
    engine::{Engine, NextOptions, terms},
    error::Error,
};
use std::sync::LazyLock;

/// Options for a caption or separator line.
static LINE: LazyLock<NextOptions> = LazyLock::new(|| NextOptions {
    end: terms(&["\n"]),
    end_at_eos: true,
    ..NextOptions::default()
});

/// Options for cell content: up to a same-line continuation cell or a line
/// that introduces the next cell, row, or table end. Horizontal whitespace
/// is tolerated after the line break, so `\n |}` still terminates.
static CELL: LazyLock<NextOptions> = LazyLock::new(|| {
    NextOptions {
        end_before: terms(&["||", "!!"]),
        end_before_regex: Some(regex::Regex::new("^\n[ \t]*[|!]").unwrap()),
        ..NextOptions::default()
    }
});

/// A row under construction.
struct Row {
    /// Attributes from the `|-` line.
    attributes: Attributes,
    /// The cells collected so far.
    cells: Vec<Node>,
    /// Comments that preceded the row.
    comments: Vec<Node>,
}

impl Row {
    /// A row with no attributes, for cells that appear before any `|-`.
    fn implicit(comments: Vec<Node>) -> Self {
        Self {
            attributes: Attributes::new(),
            cells: Vec::new(),
            comments,
        }
    }

    /// Finishes the row into a node.
    fn into_node(self) -> Node {
        Node::TableRow {
            attributes: self.attributes,
            content: self.cells,
            comments: self.comments,
        }
    }
}

/// A table. The `{|` has been consumed.
pub(super) fn table(engine: &mut Engine<'_>) -> Result<Option<Node>, Error> {
    let attributes = tags::attributes(engine, AttrContext::TableLine).unwrap_or_default();
    let _ = engine.eat("\n");

    let mut caption = Vec::new();
    let mut rows = Vec::new();
    let mut current: Option<Row> = None;
    let mut pending_comments = Vec::new();

    loop {
        engine.eat_whitespace(true);
        if engine.at_eos() {
            // No `|}`; the whole construct is plaintext.
            return Ok(None);
        }
        if engine.eat("|}") {
            break;
        }
        if engine.eat("|+") {
            let mut line = engine.next(&LINE)?.unwrap_or_default();
            trim(&mut line);
            if caption.is_empty() {
                caption = line;
            }
            continue;
        }
        if engine.eat("|-") {
            let _ = engine.eat_count('-');
            if let Some(row) = current.take() {
                rows.push(row.into_node());
            }
            let attributes =
                tags::attributes(engine, AttrContext::TableLine).unwrap_or_default();
            let _ = engine.eat("\n");
            current = Some(Row {
                attributes,
                cells: Vec::new(),
                comments: std::mem::take(&mut pending_comments),
            });
            continue;
        }
        if engine.eat("<!--") {
            if let Some(comment) = tags::comment(engine)? {
                pending_comments.push(comment);
            }
            let _ = engine.eat("\n");
            continue;
        }
        if engine.starts_with("!") || engine.starts_with("|") {
            let mut header = engine.starts_with("!");
            engine.advance(1);
            loop {
                let Some(cell) = cell(engine, header)? else {
                    return Ok(None);
                };
                current
                    .get_or_insert_with(|| {
                        Row::implicit(std::mem::take(&mut pending_comments))
                    })
                    .cells
                    .push(cell);
                if engine.eat("||") {
                    header = false;
                } else if engine.eat("!!") {
                    header = true;
                } else {
                    break;
                }
            }
            continue;
        }
        // Stray content between rows; MediaWiki hoists it out of the table,
        // which is a rendering concern, so it is dropped here.
        log::debug!("discarding stray table line at line {}", engine.line());
        while let Some(ch) = engine.current_char() {
            if ch == '\n' {
                break;
            }
            engine.advance(ch.len_utf8());
        }
    }

    if let Some(row) = current.take() {
        rows.push(row.into_node());
    }
    Ok(Some(Node::Table {
        attributes,
        caption,
        content: rows,
    }))
}

/// One cell. The introducing `|`, `!`, `||`, or `!!` has been consumed. A
/// cell may begin `attributes|content`; when the single `|` is missing (or a
/// `||` shows up instead), the attribute parse is aborted and restored to
/// empty.
fn cell(engine: &mut Engine<'_>, header: bool) -> Result<Option<Node>, Error> {
    let mark = engine.mark();
    let mut attributes = Attributes::new();
    if let Some(parsed) = tags::attributes(engine, AttrContext::TableCell) {
        if !engine.starts_with("||") && engine.eat("|") {
            attributes = parsed;
        } else {
            engine.rewind(mark);
        }
    } else {
        engine.rewind(mark);
    }
    let Some(mut content) = engine.next(&CELL)? else {
        return Ok(None);
    };
    trim(&mut content);
    Ok(Some(Node::TableCell {
        header,
        attributes,
        content,
    }))
}
