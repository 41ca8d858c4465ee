#![doc = include_str!("../README.md")]
#![warn(
    clippy::pedantic,
    clippy::missing_docs_in_private_items,
    missing_docs,
    rust_2018_idioms
)]

mod ast;
mod engine;
mod error;
mod grammar;
#[cfg(test)]
mod tests;
mod text;
mod visit;

pub use ast::{AttributeValue, Attributes, ExtensionKind, ListItem, Node, Parameters};
pub use error::{ContextFrame, ContextTrace, Error};
pub use text::{TextOptions, ast_to_text};
pub use visit::{Visitor, walk};

/// Parse configuration.
#[derive(Clone, Copy, Debug)]
pub struct Options {
    /// Ceiling on the total number of backtrack events across one parse.
    /// This is the sole guard against catastrophic input; exceeding it is a
    /// fatal [`Error::BacktrackingLimitExceeded`].
    pub backtracking_limit: u32,
    /// Emit a human-readable backtracking trace through [`log`], which ends
    /// up on standard error under the usual `env_logger` setup.
    pub debug: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            backtracking_limit: 50_000,
            debug: false,
        }
    }
}

/// A reusable wikitext parser.
///
/// Each [`Parser::parse`] call binds a fresh engine to one input; nothing is
/// shared across parses, so one parser per thread is all the coordination
/// parallel parsing needs.
#[derive(Clone, Copy, Debug, Default)]
pub struct Parser {
    /// The configuration applied to every parse.
    options: Options,
}

impl Parser {
    /// Creates a parser with the given options.
    #[must_use]
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    /// Parses `input` into a syntax tree.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::BacktrackingLimitExceeded`] when the input is
    /// pathological; the other [`Error`] kinds indicate grammar bugs.
    pub fn parse(&self, input: &str) -> Result<Vec<Node>, Error> {
        engine::Engine::new(input, &self.options).run()
    }
}

/// Convenience entry point: parses `input`, logging any fault and returning
/// `None` in its place. Use [`Parser::parse`] to observe the fault itself.
#[must_use]
pub fn parse(input: &str, options: &Options) -> Option<Vec<Node>> {
    match Parser::new(*options).parse(input) {
        Ok(nodes) => Some(nodes),
        Err(error) => {
            log::error!("parse failed: {error}");
            None
        }
    }
}
