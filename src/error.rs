//! Parse fault types.
//!
//! Within the engine, "no match" is a normal value that flows through
//! [`Option`] returns to trigger ordered alternatives. Only the faults in
//! this module escape a parse.

use core::fmt;

/// A parse fault.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An expected token was absent.
    ///
    /// This only arises from [`expect`](crate::engine::Engine::expect), which
    /// is used where the grammar has already verified the token is present,
    /// so seeing it outside development means a production is out of sync
    /// with the dispatcher.
    #[error("expected {expected:?} at line {line}\n{trace}")]
    ParseFailure {
        /// The token that was expected at the cursor.
        expected: String,
        /// The line the cursor was on.
        line: usize,
        /// The annotated descent stack at the time of the fault.
        trace: ContextTrace,
    },

    /// The global backtracking budget was exhausted.
    ///
    /// The input is pathological or the grammar is diverging. Callers must
    /// treat this as fatal, not retryable.
    #[error("backtracking limit of {limit} exceeded\n{trace}")]
    BacktrackingLimitExceeded {
        /// The configured budget.
        limit: u32,
        /// The annotated descent stack at the time of the fault.
        trace: ContextTrace,
    },

    /// A post-processor returned "no match", which is a programming bug: by
    /// the time a post-processor runs, its production has already committed.
    #[error("internal: {message}\n{trace}")]
    Internal {
        /// What went wrong.
        message: String,
        /// The annotated descent stack at the time of the fault.
        trace: ContextTrace,
    },
}

impl Error {
    /// The annotated descent stack carried by the fault.
    pub fn trace(&self) -> &ContextTrace {
        match self {
            Self::ParseFailure { trace, .. }
            | Self::BacktrackingLimitExceeded { trace, .. }
            | Self::Internal { trace, .. } => trace,
        }
    }
}

/// A snapshot of every position pushed during descent, to aid grammar
/// debugging.
#[derive(Clone, Debug, Default)]
pub struct ContextTrace {
    /// The in-progress production positions, outermost first.
    pub frames: Vec<ContextFrame>,
}

impl fmt::Display for ContextTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for frame in &self.frames {
            writeln!(f, "  {frame}")?;
        }
        Ok(())
    }
}

/// One in-progress production position, annotated with the source that
/// follows it.
#[derive(Clone, Debug)]
pub struct ContextFrame {
    /// Byte offset of the position.
    pub offset: usize,
    /// 1-based line number of the position.
    pub line: usize,
    /// Up to 100 characters of following source.
    pub excerpt: String,
}

impl fmt::Display for ContextFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}, offset {}: {:?}",
            self.line, self.offset, self.excerpt
        )
    }
}
