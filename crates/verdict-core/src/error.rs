//! # Error Taxonomy
//!
//! Defines the shared [`ErrorClass`] taxonomy and the parameter-validation
//! error type. All errors in the workspace use `thiserror` for
//! derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! Protocol rejections fall into five classes. Hosting systems route on
//! the class — a `Validation` rejection is the caller's bug, a
//! `Resolution` outcome is a legitimate terminal state — without matching
//! on individual variants. Concrete error enums live next to the code
//! that raises them, and each exposes a `class()` accessor.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The five failure classes of the protocol.
///
/// | Class | Meaning | Mutation |
/// |---|---|---|
/// | `Validation` | malformed input (wrong panel size, undersized salt) | none |
/// | `Permission` | caller lacks the right role (not a juror) | none |
/// | `State` | operation illegal in the current phase | none |
/// | `Integrity` | cryptographic check failed (commitment mismatch) | none, retryable in-window |
/// | `Resolution` | quorum not met — a valid terminal outcome, never retried | terminal transition |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorClass {
    /// Malformed input, rejected with no mutation.
    Validation,
    /// Caller is not permitted to perform the operation.
    Permission,
    /// Operation is not legal in the current lifecycle state.
    State,
    /// A cryptographic integrity check failed.
    Integrity,
    /// Ruling resolution could not produce an outcome (no quorum).
    Resolution,
}

impl ErrorClass {
    /// Returns the snake_case identifier for this class.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Permission => "permission",
            Self::State => "state",
            Self::Integrity => "integrity",
            Self::Resolution => "resolution",
        }
    }
}

impl std::fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while validating [`crate::ProtocolParams`].
#[derive(Error, Debug)]
pub enum ParamsError {
    /// Panel size must be at least one juror.
    #[error("panel size must be >= 1, got {0}")]
    EmptyPanel(usize),

    /// Quorum must be at least one reveal.
    #[error("quorum must be >= 1, got {0}")]
    ZeroQuorum(usize),

    /// Quorum cannot exceed the panel size.
    #[error("quorum {quorum} exceeds panel size {panel_size}")]
    QuorumExceedsPanel {
        /// Configured quorum.
        quorum: usize,
        /// Configured panel size.
        panel_size: usize,
    },

    /// A phase window must span at least one block.
    #[error("{window} window must be >= 1 block, got {blocks}")]
    EmptyWindow {
        /// Which window ("commit" or "reveal").
        window: &'static str,
        /// Configured length.
        blocks: u64,
    },

    /// The partial-refund split cannot exceed 100%.
    #[error("partial refund split must be <= 10000 bps, got {0}")]
    SplitOutOfRange(u16),
}
