//! HTML-like tag productions: comments, `<br>`/`<hr>`, extension tags with
//! raw content, galleries, and the catch-all generic tag.
//!
//! Tag recognition is deliberately lenient the way MediaWiki is: a missing
//! closing tag terminates at end of stream or at an outer terminator, never
//! as a syntax error, and a second opening tag of the same name before the
//! close becomes a child of the first.

use super::{Kinds, Production, params};
use crate::{
    ast::{AttributeValue, Attributes, ExtensionKind, Node, trim},
    engine::{Engine, NextOptions, terms},
    error::Error,
};
use std::sync::LazyLock;

/// The tag sub-table. The group keeps its `<` start, so entries carry it in
/// their own start tokens.
pub(super) fn group() -> Vec<Production> {
    vec![
        Production::func(Kinds::COMMENT, "<!--", comment),
        Production::func(Kinds::LINE_BREAK, "<br", line_break),
        Production::func(Kinds::HORIZONTAL_RULE, "<hr", hr),
        Production::func(Kinds::SOURCE, "<source", source),
        Production::func(Kinds::MATH, "<math", math),
        Production::func(Kinds::REF, "<ref", ref_tag),
        Production::func(Kinds::NOWIKI, "<nowiki", nowiki),
        Production::func(Kinds::PRE, "<pre", pre),
        Production::func(Kinds::SYNTAX_HIGHLIGHT, "<syntaxhighlight", syntaxhighlight),
        Production::func(Kinds::CODE, "<code", code),
        Production::func(Kinds::GALLERY, "<gallery", gallery),
        Production::func(Kinds::TAG, "<", any).keep_start(),
    ]
}

/// An HTML comment. The `<!--` has been consumed. An unterminated comment
/// runs to end of stream.
///
/// ```wikitext
/// <!-- note to editors -->
/// ```
pub(crate) fn comment(engine: &mut Engine<'_>) -> Result<Option<Node>, Error> {
    let (raw, consumed) = {
        let rest = engine.rest();
        match memchr::memmem::find(rest.as_bytes(), b"-->") {
            Some(position) => (rest[..position].to_string(), position + "-->".len()),
            None => (rest.to_string(), rest.len()),
        }
    };
    engine.advance(consumed);
    let text = raw.trim_matches(|ch: char| ch.is_whitespace() || ch == '-');
    let content = if text.is_empty() {
        Vec::new()
    } else {
        vec![Node::Text(text.to_string())]
    };
    Ok(Some(Node::Comment { content }))
}

/// A `<br>` tag. Attributes and self-closing slashes are accepted and
/// dropped; the node carries nothing.
fn line_break(engine: &mut Engine<'_>) -> Result<Option<Node>, Error> {
    if !at_name_terminator(engine) || tag_head(engine).is_none() {
        return Ok(None);
    }
    Ok(Some(Node::LineBreak))
}

/// An `<hr>` tag, equivalent to `----`.
fn hr(engine: &mut Engine<'_>) -> Result<Option<Node>, Error> {
    if !at_name_terminator(engine) || tag_head(engine).is_none() {
        return Ok(None);
    }
    Ok(Some(Node::HorizontalRule))
}

/// `<source>`
fn source(engine: &mut Engine<'_>) -> Result<Option<Node>, Error> {
    extension(engine, ExtensionKind::Source)
}

/// `<math>`
fn math(engine: &mut Engine<'_>) -> Result<Option<Node>, Error> {
    extension(engine, ExtensionKind::Math)
}

/// `<ref>`
fn ref_tag(engine: &mut Engine<'_>) -> Result<Option<Node>, Error> {
    extension(engine, ExtensionKind::Ref)
}

/// `<nowiki>`
fn nowiki(engine: &mut Engine<'_>) -> Result<Option<Node>, Error> {
    extension(engine, ExtensionKind::Nowiki)
}

/// `<pre>`
fn pre(engine: &mut Engine<'_>) -> Result<Option<Node>, Error> {
    extension(engine, ExtensionKind::Pre)
}

/// `<syntaxhighlight>`
fn syntaxhighlight(engine: &mut Engine<'_>) -> Result<Option<Node>, Error> {
    extension(engine, ExtensionKind::SyntaxHighlight)
}

/// `<code>`
fn code(engine: &mut Engine<'_>) -> Result<Option<Node>, Error> {
    extension(engine, ExtensionKind::Code)
}

/// Content options per extension tag: raw content up to the closing tag or
/// end of stream. `math` additionally aborts on a template opener.
static EXTENSION_OPTS: LazyLock<Vec<(ExtensionKind, NextOptions)>> = LazyLock::new(|| {
    use ExtensionKind as Kind;
    [
        Kind::Ref,
        Kind::Nowiki,
        Kind::Pre,
        Kind::Code,
        Kind::Source,
        Kind::SyntaxHighlight,
        Kind::Math,
    ]
    .into_iter()
    .map(|kind| {
        let mut opts = NextOptions {
            end_before_regex: Some(close_pattern(kind.name())),
            end_at_eos: true,
            allow: Some(Kinds::empty()),
            ..NextOptions::default()
        };
        if matches!(kind, Kind::Math) {
            opts.backtrack = terms(&["{{"]);
        }
        (kind, opts)
    })
    .collect()
});

/// The content options for `kind`.
fn extension_opts(kind: ExtensionKind) -> &'static NextOptions {
    for (candidate, opts) in EXTENSION_OPTS.iter() {
        if *candidate == kind {
            return opts;
        }
    }
    unreachable!("extension options for {kind:?}")
}

/// A lenient closing tag pattern: `</name   >` is accepted.
fn close_pattern(name: &str) -> regex::Regex {
    regex::Regex::new(&format!("^</{name}[ \t]*>")).unwrap()
}

/// Shared body of the extension tag productions. The dispatcher consumed
/// `<name`; the name must be followed by a tag-name terminator or this is
/// not the tag it looks like.
fn extension(engine: &mut Engine<'_>, kind: ExtensionKind) -> Result<Option<Node>, Error> {
    if !at_name_terminator(engine) {
        return Ok(None);
    }
    let Some((attributes, self_closing)) = tag_head(engine) else {
        return Ok(None);
    };
    if self_closing {
        if matches!(kind, ExtensionKind::Nowiki) {
            // An empty self-closed nowiki collapses away entirely.
            return Ok(Some(Node::Text(String::new())));
        }
        return Ok(Some(Node::Extension {
            kind,
            attributes,
            content: Vec::new(),
        }));
    }
    let opts = extension_opts(kind);
    let Some(mut content) = engine.next(opts)? else {
        return Ok(None);
    };
    eat_close(engine, opts);
    if matches!(
        kind,
        ExtensionKind::Ref | ExtensionKind::Code | ExtensionKind::Math
    ) {
        trim(&mut content);
    }
    Ok(Some(Node::Extension {
        kind,
        attributes,
        content,
    }))
}

/// Consumes the closing tag if the content parse stopped on one (it may have
/// stopped at end of stream instead).
fn eat_close(engine: &mut Engine<'_>, opts: &NextOptions) {
    if let Some(regex) = &opts.end_before_regex
        && let Some(len) = engine.starts_with_regex(regex)
    {
        engine.advance(len);
    }
}

/// Content options for `<gallery>`: raw lines up to the closing tag.
static GALLERY_OPTS: LazyLock<NextOptions> = LazyLock::new(|| NextOptions {
    end_before_regex: Some(close_pattern("gallery")),
    end_at_eos: true,
    allow: Some(Kinds::empty()),
    ..NextOptions::default()
});

/// A `<gallery>` tag: each non-empty content line is `target[|caption]` and
/// becomes a link item. Bare `|` lines are skipped.
fn gallery(engine: &mut Engine<'_>) -> Result<Option<Node>, Error> {
    if !at_name_terminator(engine) {
        return Ok(None);
    }
    let Some((attributes, self_closing)) = tag_head(engine) else {
        return Ok(None);
    };
    if self_closing {
        return Ok(Some(Node::Gallery {
            attributes,
            items: Vec::new(),
        }));
    }
    let Some(content) = engine.next(&GALLERY_OPTS)? else {
        return Ok(None);
    };
    eat_close(engine, &GALLERY_OPTS);

    let text = params::text_of(&content).unwrap_or_default();
    let mut items = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line == "|" {
            continue;
        }
        let (target, caption) = match line.split_once('|') {
            Some((target, caption)) => (target.trim(), Some(caption.trim())),
            None => (line, None),
        };
        if target.is_empty() {
            continue;
        }
        let label = caption.filter(|caption| !caption.is_empty()).unwrap_or(target);
        items.push(Node::Link {
            to: target.to_string(),
            anchor: None,
            content: vec![Node::Text(label.to_string())],
            parameters: crate::ast::Parameters::new(),
            positional_parameters: Vec::new(),
            plain: false,
        });
    }
    Ok(Some(Node::Gallery { attributes, items }))
}

/// The catch-all tag production. The `<` was kept by the dispatcher.
fn any(engine: &mut Engine<'_>) -> Result<Option<Node>, Error> {
    engine.advance(1);
    let Some(name) = read_name(engine) else {
        return Ok(None);
    };
    if !at_name_terminator(engine) {
        return Ok(None);
    }
    let Some((attributes, self_closing)) = tag_head(engine) else {
        return Ok(None);
    };
    if self_closing {
        return Ok(Some(Node::Tag {
            name,
            attributes,
            content: None,
            self_closing: true,
        }));
    }
    let Some((opts, close)) = generic_opts(&name) else {
        return Ok(None);
    };
    let Some(mut content) = engine.next(&opts)? else {
        return Ok(None);
    };
    if let Some(len) = engine.starts_with_regex(&close) {
        engine.advance(len);
    }
    trim(&mut content);
    Ok(Some(Node::Tag {
        name,
        attributes,
        content: Some(content),
        self_closing: false,
    }))
}

/// Content options for a generic tag: markup is live, and besides the
/// closing tag the content stops before `]]`, `}}`, and the table cell
/// terminators of any enclosing construct.
fn generic_opts(name: &str) -> Option<(NextOptions, regex::Regex)> {
    let close = regex::Regex::new(&format!("^</{name}[ \t]*>")).ok()?;
    let stop = regex::Regex::new(&format!("^(?:</{name}[ \t]*>|\n[ \t]*[|!])")).ok()?;
    let opts = NextOptions {
        end_before: terms(&["]]", "}}"]),
        end_before_regex: Some(stop),
        end_at_eos: true,
        ..NextOptions::default()
    };
    Some((opts, close))
}

/// Reads a tag name (letters, then letters and dashes) at the cursor,
/// lowercased.
fn read_name(engine: &mut Engine<'_>) -> Option<String> {
    let mut name = String::new();
    while let Some(ch) = engine.current_char() {
        let folded = ch.to_ascii_lowercase();
        if folded.is_ascii_alphabetic() || (!name.is_empty() && folded == '-') {
            name.push(folded);
            engine.advance(1);
        } else {
            break;
        }
    }
    (!name.is_empty()).then_some(name)
}

/// True when the cursor is on something that may legally follow a tag name:
/// space, tab, `>`, or the start of a self-closing slash.
fn at_name_terminator(engine: &Engine<'_>) -> bool {
    matches!(engine.current_char(), Some(' ' | '\t' | '>' | '/'))
}

/// Parses `attributes (/)?>` after a tag name. Returns the attributes and
/// whether the tag self-closed; `None` when the input is not a tag head
/// after all.
pub(crate) fn tag_head(engine: &mut Engine<'_>) -> Option<(Attributes, bool)> {
    let attributes = attributes(engine, AttrContext::Tag)?;
    if engine.eat(">") {
        return Some((attributes, false));
    }
    if engine.eat("/") {
        engine.eat_whitespace(false);
        if engine.eat(">") {
            return Some((attributes, true));
        }
    }
    None
}

/// Where an attribute list lives, which decides what ends it and whether
/// newlines are allowed inside it.
#[derive(Clone, Copy, Debug)]
pub(crate) enum AttrContext {
    /// Inside `<...>`: ends at `>` or `/`, newlines allowed, an unbalanced
    /// quote fails the parse.
    Tag,
    /// A `{|` or `|-` line: ends at the line break, which also breaks quotes.
    TableLine,
    /// Before a cell's `|`: as [`AttrContext::TableLine`], plus `|` ends it.
    TableCell,
}

/// Parses whitespace-separated `name` and `name=value` attributes. Values
/// may be quoted or bare; bare names map to `true`.
pub(crate) fn attributes(engine: &mut Engine<'_>, context: AttrContext) -> Option<Attributes> {
    let mut attributes = Attributes::new();
    loop {
        engine.eat_whitespace(matches!(context, AttrContext::Tag));
        let Some(ch) = engine.current_char() else {
            return match context {
                AttrContext::Tag => None,
                _ => Some(attributes),
            };
        };
        let stop = match context {
            AttrContext::Tag => matches!(ch, '>' | '/'),
            AttrContext::TableLine => ch == '\n',
            AttrContext::TableCell => matches!(ch, '\n' | '|'),
        };
        if stop {
            return Some(attributes);
        }

        let mut name = String::new();
        while let Some(ch) = engine.current_char() {
            if ch.is_whitespace() || matches!(ch, '=' | '>' | '/' | '|') {
                break;
            }
            name.push(ch);
            engine.advance(ch.len_utf8());
        }
        if name.is_empty() {
            // A stray delimiter; skip it rather than looping forever.
            engine.advance(ch.len_utf8());
            continue;
        }

        engine.eat_whitespace(false);
        if engine.eat("=") {
            engine.eat_whitespace(false);
            let value = attribute_value(engine, context)?;
            attributes.insert(name, AttributeValue::Text(value));
        } else {
            attributes.insert(name, AttributeValue::Flag);
        }
    }
}

/// Parses one attribute value. Quotes must balance inside a tag; in table
/// context the line break ends the quote instead.
fn attribute_value(engine: &mut Engine<'_>, context: AttrContext) -> Option<String> {
    if let Some(quote) = engine
        .current_char()
        .filter(|&ch| matches!(ch, '"' | '\''))
    {
        engine.advance(1);
        let mut value = String::new();
        loop {
            let Some(ch) = engine.current_char() else {
                return match context {
                    AttrContext::Tag => None,
                    _ => Some(value),
                };
            };
            if ch == quote {
                engine.advance(1);
                break;
            }
            if ch == '\n' && !matches!(context, AttrContext::Tag) {
                break;
            }
            value.push(ch);
            engine.advance(ch.len_utf8());
        }
        Some(value)
    } else {
        let mut value = String::new();
        while let Some(ch) = engine.current_char() {
            if ch.is_whitespace() || matches!(ch, '>' | '|') {
                break;
            }
            if ch == '/' && engine.starts_with("/>") {
                break;
            }
            value.push(ch);
            engine.advance(ch.len_utf8());
        }
        Some(value)
    }
}
