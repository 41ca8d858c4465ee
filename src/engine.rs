//! The backtracking parse engine.
//!
//! The engine owns a cursor over one input, a global backtracking budget, a
//! stack of in-progress production positions, and a case-insensitive prefix
//! oracle (a parallel ASCII-lowercased view of the input; ASCII folding
//! never changes byte length, so the two views stay positionally aligned).
//!
//! Its primary operation is [`Engine::next`], which consumes a contiguous
//! region of input into a list of nodes until an end condition fires, and
//! the dispatcher [`Engine::node`], which picks the first matching
//! production from the ordered grammar table.

use crate::{
    Options,
    ast::{Node, append},
    error::{ContextFrame, ContextTrace, Error},
    grammar::{self, Body, Kinds, Production},
};
use std::borrow::Cow;

/// A position in the input. Plain value; save and restore are assignment.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Cursor {
    /// Byte offset. Always on a char boundary.
    pub offset: usize,
    /// 1-based line number, incremented per `\n` consumed.
    pub line: usize,
}

/// A predicate evaluated against the engine at the current position.
///
/// Predicates must only change value at plaintext stop bytes (in practice,
/// at newlines): the plaintext fast path does not re-test them between
/// stops.
pub(crate) type Predicate = fn(&Engine<'_>) -> bool;

/// The option set for one [`Engine::next`] invocation.
///
/// If none of `end_at_eos`, `end`, `end_before`, `end_before_regex`,
/// `end_on`, or `backtrack` is set, `next` returns the empty list
/// immediately.
#[derive(Clone, Default)]
pub(crate) struct NextOptions {
    /// Succeed when the cursor reaches end of stream.
    pub end_at_eos: bool,
    /// Terminators which are consumed on match.
    pub end: Vec<Cow<'static, str>>,
    /// Inhibits `end` when one of these also matches at the cursor (used to
    /// stop `''` from ending when `'''` follows).
    pub not_end: Vec<Cow<'static, str>>,
    /// Terminators which are left unconsumed on match.
    pub end_before: Vec<Cow<'static, str>>,
    /// Regex terminator, anchored at the cursor and left unconsumed.
    pub end_before_regex: Option<regex::Regex>,
    /// Predicate terminator, left unconsumed.
    pub end_on: Option<Predicate>,
    /// Tokens whose appearance fails the whole invocation.
    pub backtrack: Vec<Cow<'static, str>>,
    /// Predicate pushed onto the shared stack for the duration of the
    /// invocation; any active predicate returning true causes failure.
    pub backtrack_on: Option<Predicate>,
    /// Whitelist of production kinds accepted from the grammar.
    pub allow: Option<Kinds>,
    /// Blacklist of production kinds.
    pub disallow: Kinds,
}

/// Borrows a list of static terminator tokens for a [`NextOptions`] field.
pub(crate) fn terms(tokens: &[&'static str]) -> Vec<Cow<'static, str>> {
    tokens.iter().map(|token| Cow::Borrowed(*token)).collect()
}

/// Bytes at which a plaintext run must stop: every byte that can begin a
/// production, an end token, or a line break. Multi-byte UTF-8 units are
/// never stops, so runs always end on a char boundary.
static PLAIN_STOPS: [bool; 256] = {
    let mut table = [false; 256];
    let stops = b"\n '[]{}<&*#:;=|!-_";
    let mut index = 0;
    while index < stops.len() {
        table[stops[index] as usize] = true;
        index += 1;
    }
    table
};

/// Length of the plaintext run at the start of `rest`.
fn plain_run(rest: &str) -> usize {
    rest.bytes()
        .position(|byte| PLAIN_STOPS[usize::from(byte)])
        .unwrap_or(rest.len())
}

/// Per-parse engine state. Not shared across parses.
pub(crate) struct Engine<'a> {
    /// The input.
    source: &'a str,
    /// ASCII-lowercased view of the input, positionally aligned with it.
    lower: String,
    /// The cursor.
    cursor: Cursor,
    /// Backtrack events so far, across the whole parse.
    backtracks: u32,
    /// The configured ceiling for `backtracks`.
    limit: u32,
    /// Emit a human-readable backtracking trace through `log`.
    debug: bool,
    /// Positions pushed during descent, for fault annotation.
    context: Vec<Cursor>,
    /// Active `backtrack_on` predicates, shared across nested `next` calls.
    predicates: Vec<Predicate>,
}

impl<'a> Engine<'a> {
    /// Creates an engine bound to one input.
    pub fn new(source: &'a str, options: &Options) -> Self {
        Self {
            source,
            lower: source.to_ascii_lowercase(),
            cursor: Cursor { offset: 0, line: 1 },
            backtracks: 0,
            limit: options.backtracking_limit,
            debug: options.debug,
            context: Vec::new(),
            predicates: Vec::new(),
        }
    }

    /// Runs the parse to end of stream.
    pub fn run(mut self) -> Result<Vec<Node>, Error> {
        let opts = NextOptions {
            end_at_eos: true,
            ..NextOptions::default()
        };
        match self.next(&opts)? {
            Some(nodes) => Ok(nodes),
            // The only end condition is end-of-stream, which cannot fail.
            None => Err(self.internal("top-level parse produced no match")),
        }
    }

    /// The unconsumed input.
    pub fn rest(&self) -> &'a str {
        &self.source[self.cursor.offset..]
    }

    /// The unconsumed input, lowercased.
    fn rest_lower(&self) -> &str {
        &self.lower[self.cursor.offset..]
    }

    /// The current line number.
    pub fn line(&self) -> usize {
        self.cursor.line
    }

    /// True at end of stream.
    pub fn at_eos(&self) -> bool {
        self.cursor.offset >= self.source.len()
    }

    /// The character at the cursor.
    pub fn current_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Case-insensitive prefix match. `prefix` must already be lowercased.
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.rest_lower().starts_with(prefix)
    }

    /// Disjunction of [`Engine::starts_with`] over `prefixes`.
    pub fn starts_with_any(&self, prefixes: &[Cow<'static, str>]) -> bool {
        prefixes.iter().any(|prefix| self.starts_with(prefix))
    }

    /// Anchored regex match at the cursor, against the lowercase view.
    /// Returns the match length.
    pub fn starts_with_regex(&self, regex: &regex::Regex) -> Option<usize> {
        regex
            .find(self.rest_lower())
            .filter(|found| found.start() == 0)
            .map(|found| found.end())
    }

    /// Consumes `prefix` if it matches; returns whether it did.
    pub fn eat(&mut self, prefix: &str) -> bool {
        if self.starts_with(prefix) {
            self.advance(prefix.len());
            true
        } else {
            false
        }
    }

    /// Consumes `prefix`, faulting if it is absent. Only used where the
    /// grammar has already verified the token is present.
    pub fn expect(&mut self, prefix: &str) -> Result<(), Error> {
        if self.eat(prefix) {
            Ok(())
        } else {
            Err(Error::ParseFailure {
                expected: prefix.to_string(),
                line: self.cursor.line,
                trace: self.trace(),
            })
        }
    }

    /// Advances the cursor by `len` bytes, counting line breaks.
    pub fn advance(&mut self, len: usize) {
        let end = self.cursor.offset + len;
        debug_assert!(self.source.is_char_boundary(end));
        self.cursor.line += memchr::memchr_iter(
            b'\n',
            &self.source.as_bytes()[self.cursor.offset..end],
        )
        .count();
        self.cursor.offset = end;
    }

    /// Greedily consumes `ch`; returns the count.
    pub fn eat_count(&mut self, ch: char) -> usize {
        let mut count = 0;
        while self.rest().starts_with(ch) {
            self.advance(ch.len_utf8());
            count += 1;
        }
        count
    }

    /// Consumes spaces, tabs, and optionally newlines.
    pub fn eat_whitespace(&mut self, newlines: bool) {
        loop {
            match self.rest().as_bytes().first() {
                Some(b' ' | b'\t') => self.advance(1),
                Some(b'\n') if newlines => self.advance(1),
                _ => break,
            }
        }
    }

    /// True at offset 0 or immediately after a newline.
    pub fn is_start_of_line(&self) -> bool {
        self.cursor.offset == 0 || self.source.as_bytes()[self.cursor.offset - 1] == b'\n'
    }

    /// True at end of stream or on a newline.
    pub fn is_end_of_line(&self) -> bool {
        self.at_eos() || self.source.as_bytes()[self.cursor.offset] == b'\n'
    }

    /// The current position, for later [`Engine::rewind`].
    pub fn mark(&self) -> Cursor {
        self.cursor
    }

    /// Restores a saved position without recording a backtrack event.
    pub fn rewind(&mut self, to: Cursor) {
        self.cursor = to;
    }

    /// Records one backtrack event and rewinds, faulting once the budget is
    /// exhausted.
    fn backtrack(&mut self, to: Cursor, what: &str) -> Result<(), Error> {
        self.backtracks += 1;
        if self.debug {
            log::debug!(
                "backtrack #{}: {what} at {}:{} rewinds to {}:{}",
                self.backtracks,
                self.cursor.line,
                self.cursor.offset,
                to.line,
                to.offset,
            );
        }
        if self.backtracks > self.limit {
            return Err(Error::BacktrackingLimitExceeded {
                limit: self.limit,
                trace: self.trace(),
            });
        }
        self.cursor = to;
        Ok(())
    }

    /// Snapshots the descent stack for fault annotation.
    fn trace(&self) -> ContextTrace {
        ContextTrace {
            frames: self
                .context
                .iter()
                .map(|cursor| ContextFrame {
                    offset: cursor.offset,
                    line: cursor.line,
                    excerpt: self.source[cursor.offset..].chars().take(100).collect(),
                })
                .collect(),
        }
    }

    /// An [`Error::Internal`] at the current position.
    fn internal(&self, message: &str) -> Error {
        Error::Internal {
            message: message.to_string(),
            trace: self.trace(),
        }
    }

    /// Assembles a list of nodes from the cursor outward until an end
    /// condition fires. Returns `None` when the invocation backtracks.
    pub fn next(&mut self, opts: &NextOptions) -> Result<Option<Vec<Node>>, Error> {
        if !(opts.end_at_eos
            || opts.end_on.is_some()
            || opts.end_before_regex.is_some()
            || !opts.end.is_empty()
            || !opts.end_before.is_empty()
            || !opts.backtrack.is_empty())
        {
            return Ok(Some(Vec::new()));
        }

        let start = self.cursor;
        let pushed = opts.backtrack_on.inspect(|predicate| {
            self.predicates.push(*predicate);
        });

        // The plaintext fast path is only sound when every end condition is
        // anchored to a stop byte; a regex or predicate terminator may not be.
        let fast = opts.end_on.is_none() && opts.end_before_regex.is_none();

        let mut content = Vec::new();
        let mut chunk = String::new();

        let finished = loop {
            if self.at_eos() && opts.end_at_eos {
                break true;
            }
            if (self.at_eos() && !opts.end_at_eos)
                || self.predicates.iter().any(|predicate| predicate(self))
                || (!opts.backtrack.is_empty() && self.starts_with_any(&opts.backtrack))
            {
                break false;
            }
            if let Some(token) = opts.end.iter().find(|token| self.starts_with(token.as_ref()))
                && !self.starts_with_any(&opts.not_end)
            {
                let len = token.len();
                self.advance(len);
                break true;
            }
            if (!opts.end_before.is_empty() && self.starts_with_any(&opts.end_before))
                || opts
                    .end_before_regex
                    .as_ref()
                    .is_some_and(|regex| self.starts_with_regex(regex).is_some())
                || opts.end_on.is_some_and(|predicate| predicate(self))
            {
                break true;
            }

            self.context.push(self.cursor);
            let node = self.node(opts.allow, opts.disallow);
            self.context.pop();

            match node? {
                Some(Node::Text(text)) => chunk.push_str(&text),
                Some(node) => {
                    if !chunk.is_empty() {
                        append(&mut content, Node::Text(std::mem::take(&mut chunk)));
                    }
                    content.push(node);
                }
                None => {
                    // No production matched: the unit at the cursor is
                    // plaintext, as is everything up to the next stop byte.
                    if let Some(ch) = self.current_char() {
                        chunk.push(ch);
                        self.advance(ch.len_utf8());
                    }
                    if fast {
                        let run = plain_run(self.rest());
                        if run > 0 {
                            chunk.push_str(&self.source[self.cursor.offset..][..run]);
                            self.advance(run);
                        }
                    }
                }
            }
        };

        if pushed.is_some() {
            self.predicates.pop();
        }
        if !finished {
            self.backtrack(start, "next")?;
            return Ok(None);
        }
        if !chunk.is_empty() {
            append(&mut content, Node::Text(chunk));
        }
        Ok(Some(content))
    }

    /// Picks the first matching production from the grammar table.
    fn node(&mut self, allow: Option<Kinds>, disallow: Kinds) -> Result<Option<Node>, Error> {
        self.dispatch(grammar::table(), allow, disallow)
    }

    /// Walks a production table in declaration order.
    fn dispatch(
        &mut self,
        table: &[Production],
        allow: Option<Kinds>,
        disallow: Kinds,
    ) -> Result<Option<Node>, Error> {
        for production in table {
            if !production.kind.is_empty() {
                if allow.is_some_and(|allowed| !allowed.contains(production.kind)) {
                    continue;
                }
                if disallow.intersects(production.kind) {
                    continue;
                }
            }
            if !self.starts_with(production.start) {
                continue;
            }
            if production.pre_condition.is_some_and(|pre| !pre(self)) {
                continue;
            }

            let entry = self.cursor;
            if !production.keep_start {
                self.advance(production.start.len());
            }
            if production.post_condition.is_some_and(|post| !post(self)) {
                self.rewind(entry);
                continue;
            }

            let node = match &production.body {
                Body::Replace(text) => Some(Node::Text((*text).to_string())),
                Body::Group(group) => match self.dispatch(group, allow, disallow)? {
                    Some(node) => Some(node),
                    None => {
                        self.rewind(entry);
                        continue;
                    }
                },
                Body::Parse(either::Either::Left(opts)) => self
                    .next(opts)?
                    .map(|content| grammar::wrap(production.kind, content)),
                Body::Parse(either::Either::Right(func)) => func(self)?,
            };

            let Some(node) = node else {
                self.backtrack(entry, production.start)?;
                continue;
            };

            let node = match production.post_process {
                Some(post) => post(node)
                    .ok_or_else(|| self.internal("post-processor returned no match"))?,
                None => node,
            };
            return Ok(Some(node));
        }
        Ok(None)
    }
}
