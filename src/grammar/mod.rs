//! The wikitext grammar.
//!
//! An ordered table of production descriptors, walked by the engine
//! dispatcher, plus ad-hoc production functions for the structures that
//! cannot be expressed declaratively (links, templates, tables, lists,
//! headings, preformatted blocks, tags). Declaration order is dispatch
//! order and it matters: five quotes are tried before three, three before
//! two, and `[[` before `[`.

use crate::{
    ast::Node,
    engine::{Engine, NextOptions, terms},
    error::Error,
};
use either::Either;
use std::sync::LazyLock;

mod blocks;
mod entities;
mod links;
pub(crate) mod params;
mod tables;
pub(crate) mod tags;
mod templates;

bitflags::bitflags! {
    /// Production kinds, used for the allow/disallow filters.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    pub(crate) struct Kinds: u32 {
        /// `[[...]]`
        const LINK = 1 << 0;
        /// `[scheme://...]`
        const EXTERNAL_LINK = 1 << 1;
        /// `'''''...'''''`
        const BOLD_ITALICS = 1 << 2;
        /// `'''...'''`
        const BOLD = 1 << 3;
        /// `''...''`
        const ITALICS = 1 << 4;
        /// `{{...}}`
        const TEMPLATE = 1 << 5;
        /// `{{...}}` inside a preformatted block.
        const TEMPLATE_PREFORMATTED = 1 << 6;
        /// `*` lines.
        const UNORDERED_LIST = 1 << 7;
        /// `#` lines.
        const ORDERED_LIST = 1 << 8;
        /// `:` lines.
        const INDENT = 1 << 9;
        /// `;` lines.
        const DESCRIPTION = 1 << 10;
        /// `=...=` lines.
        const HEADING = 1 << 11;
        /// `&name;` and `&#...;`
        const ENTITY = 1 << 12;
        /// `__TOC__` and friends.
        const MAGIC_WORD = 1 << 13;
        /// Space-indented lines.
        const PREFORMATTED = 1 << 14;
        /// `<!-- ... -->`
        const COMMENT = 1 << 15;
        /// `<br>`
        const LINE_BREAK = 1 << 16;
        /// `<source>`
        const SOURCE = 1 << 17;
        /// `<math>`
        const MATH = 1 << 18;
        /// `<ref>`
        const REF = 1 << 19;
        /// `<nowiki>`
        const NOWIKI = 1 << 20;
        /// `<pre>`
        const PRE = 1 << 21;
        /// `<syntaxhighlight>`
        const SYNTAX_HIGHLIGHT = 1 << 22;
        /// `<code>`
        const CODE = 1 << 23;
        /// `<gallery>`
        const GALLERY = 1 << 24;
        /// Any other HTML-like tag.
        const TAG = 1 << 25;
        /// `{|...|}`
        const TABLE = 1 << 26;
        /// `----`
        const HORIZONTAL_RULE = 1 << 27;
    }
}

/// An ad-hoc production function. Returns `None` to decline; the dispatcher
/// rewinds and tries the next candidate.
pub(crate) type ProductionFn = fn(&mut Engine<'_>) -> Result<Option<Node>, Error>;

/// A post-processing hook; returning `None` is a programming error.
pub(crate) type PostProcess = fn(Node) -> Option<Node>;

/// A condition evaluated against the engine without consuming input.
pub(crate) type Condition = fn(&Engine<'_>) -> bool;

/// The body of a production descriptor.
pub(crate) enum Body {
    /// Return a literal in place of the consumed start token (HTML entity
    /// aliases, magic words).
    Replace(&'static str),
    /// Recurse into a sub-table; on miss, rewind and keep walking.
    Group(Vec<Production>),
    /// Parse: a built-in `next`-style option set, or a function pointer.
    Parse(Either<NextOptions, ProductionFn>),
}

/// One entry of the grammar table.
pub(crate) struct Production {
    /// The kind produced, for allow/disallow filtering. Empty on groups,
    /// which are filtered entry by entry instead.
    pub kind: Kinds,
    /// The start token, pre-lowercased.
    pub start: &'static str,
    /// Leave the start token for the production to re-read.
    pub keep_start: bool,
    /// Checked before the start token is consumed.
    pub pre_condition: Option<Condition>,
    /// Checked after the start token is consumed; rewinds on failure.
    pub post_condition: Option<Condition>,
    /// What to run once the start token matched.
    pub body: Body,
    /// Applied to the produced node.
    pub post_process: Option<PostProcess>,
}

impl Production {
    /// A descriptor with no conditions and a consumed start token.
    fn new(kind: Kinds, start: &'static str, body: Body) -> Self {
        Self {
            kind,
            start,
            keep_start: false,
            pre_condition: None,
            post_condition: None,
            body,
            post_process: None,
        }
    }

    /// An ad-hoc production.
    fn func(kind: Kinds, start: &'static str, func: ProductionFn) -> Self {
        Self::new(kind, start, Body::Parse(Either::Right(func)))
    }

    /// A declarative production wrapped into `{kind, content}`.
    fn options(kind: Kinds, start: &'static str, opts: NextOptions) -> Self {
        Self::new(kind, start, Body::Parse(Either::Left(opts)))
    }

    /// Leaves the start token unconsumed.
    fn keep_start(mut self) -> Self {
        self.keep_start = true;
        self
    }

    /// Adds a pre-condition.
    fn pre(mut self, condition: Condition) -> Self {
        self.pre_condition = Some(condition);
        self
    }

    /// Adds a post-condition.
    fn post(mut self, condition: Condition) -> Self {
        self.post_condition = Some(condition);
        self
    }
}

/// Wraps a declarative production's content list into its node.
pub(crate) fn wrap(kind: Kinds, content: Vec<Node>) -> Node {
    match kind {
        Kinds::BOLD_ITALICS => Node::BoldItalics { content },
        Kinds::BOLD => Node::Bold { content },
        Kinds::ITALICS => Node::Italics { content },
        _ => unreachable!("declarative production for {kind:?}"),
    }
}

/// The ordered grammar table.
static TABLE: LazyLock<Vec<Production>> = LazyLock::new(|| {
    vec![
        Production::func(Kinds::LINK, "[[", links::link),
        Production::func(Kinds::EXTERNAL_LINK, "[", links::external_link)
            .post(links::uri_scheme_follows),
        Production::options(
            Kinds::BOLD_ITALICS,
            "'''''",
            NextOptions {
                end: terms(&["'''''"]),
                end_before: terms(&["]]"]),
                backtrack_on: Some(|e: &Engine<'_>| Engine::is_end_of_line(e)),
                ..NextOptions::default()
            },
        ),
        Production::options(
            Kinds::BOLD,
            "'''",
            NextOptions {
                end: terms(&["'''"]),
                end_before: terms(&["]]"]),
                backtrack_on: Some(|e: &Engine<'_>| Engine::is_end_of_line(e)),
                ..NextOptions::default()
            },
        ),
        Production::options(
            Kinds::ITALICS,
            "''",
            NextOptions {
                end: terms(&["''"]),
                not_end: terms(&["'''"]),
                disallow: Kinds::PREFORMATTED,
                ..NextOptions::default()
            },
        ),
        Production::func(Kinds::TEMPLATE, "{{", templates::template),
        Production::func(Kinds::TEMPLATE_PREFORMATTED, "{{", templates::template),
        Production::func(Kinds::UNORDERED_LIST, "*", blocks::unordered_list)
            .keep_start()
            .pre(|e: &Engine<'_>| Engine::is_start_of_line(e)),
        Production::func(Kinds::ORDERED_LIST, "#", blocks::ordered_list)
            .keep_start()
            .pre(|e: &Engine<'_>| Engine::is_start_of_line(e)),
        Production::func(Kinds::INDENT, ":", blocks::indent)
            .keep_start()
            .pre(|e: &Engine<'_>| Engine::is_start_of_line(e)),
        Production::func(Kinds::DESCRIPTION, ";", blocks::description)
            .pre(|e: &Engine<'_>| Engine::is_start_of_line(e)),
        Production::func(Kinds::HEADING, "=", blocks::heading)
            .keep_start()
            .pre(|e: &Engine<'_>| Engine::is_start_of_line(e)),
        Production::new(Kinds::ENTITY, "&", Body::Group(entities::group())),
        Production::new(Kinds::MAGIC_WORD, "__toc__", Body::Replace("")),
        Production::new(Kinds::MAGIC_WORD, "__notoc__", Body::Replace("")),
        Production::func(Kinds::PREFORMATTED, " ", blocks::preformatted)
            .keep_start()
            .pre(|e: &Engine<'_>| Engine::is_start_of_line(e)),
        Production::new(Kinds::empty(), "<", Body::Group(tags::group())).keep_start(),
        Production::func(Kinds::TABLE, "{|", tables::table),
        Production::func(Kinds::HORIZONTAL_RULE, "----", blocks::horizontal_rule)
            .pre(|e: &Engine<'_>| Engine::is_start_of_line(e)),
    ]
});

/// The grammar table, built on first use.
pub(crate) fn table() -> &'static [Production] {
    &TABLE
}
