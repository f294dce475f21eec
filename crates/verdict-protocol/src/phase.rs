//! # Dispute Phases and the Phase Clock
//!
//! Models the lifecycle of a dispute as a closed `Phase` enum and derives
//! the current phase from block heights.
//!
//! ## States
//!
//! ```text
//! Open ──(assign)──▶ JurorsSelected ──(clock)──▶ Commit ──(deadline)──▶ Reveal
//!                          │                       │                      │
//!                          │              (commits < quorum               │
//!                          │                 at deadline)        (deadline, or all
//!                          │                       │              jurors revealed)
//!                          │                       ▼                      ▼
//!                          └──────────────────▶ Expired ◀──(no quorum)─ Executable
//!                                              (terminal)                 │
//!                                                                 (finalize, quorum)
//!                                                                         ▼
//!                                                                      Resolved
//!                                                                     (terminal)
//! ```
//!
//! ## Design
//!
//! The phase is **derived**, not polled into storage: the clock maps the
//! record's deadlines and participation counts plus a fresh block height
//! to a [`PhaseView`]. The stored phase marker only tracks transitions the
//! controller has persisted; gating decisions always use the derived view,
//! so a dispute nobody has touched for a thousand blocks still reads as
//! closed.
//!
//! ## Boundary Semantics
//!
//! `current_block >= deadline` means the phase has closed. The deadline
//! block itself is outside its phase, which removes the last-block race
//! between a submission and block production.

use serde::{Deserialize, Serialize};

use verdict_core::{BlockHeight, ProtocolParams};

use crate::record::DisputeRecord;

/// The lifecycle phase of a dispute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Dispute opened; no juror panel yet.
    Open,
    /// Panel assigned at this block; voting opens at the next one.
    JurorsSelected,
    /// Jurors submit commitment digests.
    Commit,
    /// Jurors reveal their ballots against their commitments.
    Reveal,
    /// Voting closed; anyone may finalize the ruling.
    Executable,
    /// Ruling persisted (terminal).
    Resolved,
    /// Closed without a ruling — participation below quorum (terminal).
    Expired,
}

impl Phase {
    /// Whether this phase is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Resolved | Self::Expired)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Open => "OPEN",
            Self::JurorsSelected => "JURORS_SELECTED",
            Self::Commit => "COMMIT_PHASE",
            Self::Reveal => "REVEAL_PHASE",
            Self::Executable => "EXECUTABLE",
            Self::Resolved => "RESOLVED",
            Self::Expired => "EXPIRED",
        };
        f.write_str(s)
    }
}

/// The derived phase of a dispute at a specific block height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseView {
    /// The phase at the observed height.
    pub phase: Phase,
    /// Blocks left before the phase closes; `None` for phases without a
    /// deadline (Open, Executable, terminals).
    pub blocks_remaining: Option<u64>,
}

/// Derives dispute phases from block heights.
///
/// Stateless: the current height is always supplied by the caller, read
/// fresh from the ledger. There is no wall clock anywhere in the
/// derivation.
pub struct PhaseClock;

impl PhaseClock {
    /// Derive the phase of `record` at `current` height.
    pub fn view(record: &DisputeRecord, params: &ProtocolParams, current: BlockHeight) -> PhaseView {
        // Persisted terminal states short-circuit: the record is read-only.
        if record.phase.is_terminal() {
            return PhaseView {
                phase: record.phase,
                blocks_remaining: None,
            };
        }

        let (assigned_at, commit_deadline, reveal_deadline) = match (
            record.jurors_assigned_at,
            record.commit_deadline,
            record.reveal_deadline,
        ) {
            (Some(a), Some(c), Some(r)) => (a, c, r),
            // No panel yet: the dispute sits in Open with no deadline.
            _ => {
                return PhaseView {
                    phase: Phase::Open,
                    blocks_remaining: None,
                }
            }
        };

        // The assignment block itself reads as JurorsSelected; commits are
        // accepted from the next block, so an assignment and a commit can
        // never race inside one block.
        let commit_opens = assigned_at.next();
        if current < commit_opens {
            return PhaseView {
                phase: Phase::JurorsSelected,
                blocks_remaining: Some(commit_opens.remaining_at(current)),
            };
        }

        if !commit_deadline.closed_at(current) {
            return PhaseView {
                phase: Phase::Commit,
                blocks_remaining: Some(commit_deadline.remaining_at(current)),
            };
        }

        // Commit window closed. With fewer commitments than the quorum a
        // ruling is unreachable no matter what gets revealed, so the
        // dispute is already expired; finalize persists that.
        if record.committed_count() < params.quorum {
            return PhaseView {
                phase: Phase::Expired,
                blocks_remaining: None,
            };
        }

        // Every juror revealed: nothing left to wait for.
        if record.all_jurors_revealed() {
            return PhaseView {
                phase: Phase::Executable,
                blocks_remaining: None,
            };
        }

        if !reveal_deadline.closed_at(current) {
            return PhaseView {
                phase: Phase::Reveal,
                blocks_remaining: Some(reveal_deadline.remaining_at(current)),
            };
        }

        PhaseView {
            phase: Phase::Executable,
            blocks_remaining: None,
        }
    }
}
