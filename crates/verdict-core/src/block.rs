//! # Block Height — The Only Clock
//!
//! Defines `BlockHeight`, the sole time representation in the Verdict
//! Protocol. Deadlines, phase windows, and reveal timestamps are all
//! block heights supplied by the hosting ledger.
//!
//! ## Security Invariant
//!
//! There is no wall-clock type anywhere in the workspace. Wall-clock
//! deadlines would diverge between replicas replaying the same operation
//! log; block heights are part of consensus and replay identically.
//!
//! ## Boundary Semantics
//!
//! A phase with deadline `d` is **closed** at any height `h >= d`. The
//! deadline block itself is outside the phase, which removes the
//! last-block race between a submission and block production. Helpers on
//! `BlockHeight` encode this rule once so call sites cannot disagree on
//! `>` vs `>=`.

use serde::{Deserialize, Serialize};

/// A block height on the hosting ledger.
///
/// Ordered, copyable, and serialized as a bare integer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BlockHeight(pub u64);

impl BlockHeight {
    /// The genesis height.
    pub const ZERO: BlockHeight = BlockHeight(0);

    /// Construct from a raw height.
    pub fn new(height: u64) -> Self {
        Self(height)
    }

    /// The raw height value.
    pub fn value(&self) -> u64 {
        self.0
    }

    /// The height `blocks` after this one, saturating at `u64::MAX`.
    pub fn offset(&self, blocks: u64) -> Self {
        Self(self.0.saturating_add(blocks))
    }

    /// The next block height.
    pub fn next(&self) -> Self {
        self.offset(1)
    }

    /// Whether a phase with this deadline has closed at height `current`.
    ///
    /// `current >= deadline` means closed: the deadline block itself is
    /// outside the phase.
    pub fn closed_at(&self, current: BlockHeight) -> bool {
        current >= *self
    }

    /// Blocks remaining until this deadline, `0` if already closed.
    pub fn remaining_at(&self, current: BlockHeight) -> u64 {
        self.0.saturating_sub(current.0)
    }
}

impl std::fmt::Display for BlockHeight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for BlockHeight {
    fn from(height: u64) -> Self {
        Self(height)
    }
}
