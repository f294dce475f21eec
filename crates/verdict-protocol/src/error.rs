//! # Dispute Operation Errors
//!
//! Structured rejections for every lifecycle operation. Each variant maps
//! to one [`ErrorClass`] so hosting systems can route failures without
//! matching on variants.
//!
//! ## Design
//!
//! Validation, permission, and state rejections are synchronous and
//! mutate nothing. `CommitmentMismatch` also mutates nothing and is
//! recoverable: the same juror may retry with correct data while the
//! reveal window is open. Quorum failure is NOT here — it is a valid
//! terminal outcome ([`crate::tally::NoQuorum`]), not an operation error.

use thiserror::Error;

use verdict_core::{AccountId, DisputeId, ErrorClass, OrderId};

use crate::phase::Phase;

/// Rejection of a dispute lifecycle operation.
#[derive(Error, Debug)]
pub enum DisputeError {
    /// No dispute with this identifier exists in the store.
    #[error("dispute not found: {0}")]
    NotFound(DisputeId),

    /// The order already has a dispute; reopening is host policy.
    #[error("a dispute is already open for {0}")]
    DisputeAlreadyOpen(OrderId),

    /// Plaintiff and defendant must be distinct accounts.
    #[error("plaintiff and defendant must be distinct accounts")]
    PartiesNotDistinct,

    /// The juror panel does not have the configured size.
    #[error("juror panel must have exactly {expected} members, got {actual}")]
    WrongPanelSize {
        /// Configured panel size.
        expected: usize,
        /// Size of the supplied panel.
        actual: usize,
    },

    /// The same juror appears twice on the panel.
    #[error("duplicate juror on panel: {0}")]
    DuplicateJuror(AccountId),

    /// A juror is also the plaintiff or defendant.
    #[error("juror {0} is a party to the dispute")]
    JurorIsParty(AccountId),

    /// The caller is not on the dispute's juror panel.
    #[error("{juror} is not on the juror panel of {dispute_id}")]
    NotAJuror {
        /// The dispute.
        dispute_id: DisputeId,
        /// The rejected caller.
        juror: AccountId,
    },

    /// The operation is not legal in the dispute's current phase.
    #[error("{dispute_id} is in phase {actual}, operation requires {expected}")]
    WrongPhase {
        /// The dispute.
        dispute_id: DisputeId,
        /// The phase the operation requires.
        expected: Phase,
        /// The phase derived from the current block height.
        actual: Phase,
    },

    /// Jurors are assigned exactly once.
    #[error("jurors already assigned for {0}")]
    JurorsAlreadyAssigned(DisputeId),

    /// Each juror commits at most once.
    #[error("juror {juror} already committed on {dispute_id}")]
    AlreadyCommitted {
        /// The dispute.
        dispute_id: DisputeId,
        /// The juror.
        juror: AccountId,
    },

    /// Each juror reveals at most once.
    #[error("juror {juror} already revealed on {dispute_id}")]
    AlreadyRevealed {
        /// The dispute.
        dispute_id: DisputeId,
        /// The juror.
        juror: AccountId,
    },

    /// Reveal without a prior commitment.
    #[error("no commitment from {juror} on {dispute_id}")]
    NoCommitment {
        /// The dispute.
        dispute_id: DisputeId,
        /// The juror.
        juror: AccountId,
    },

    /// The revealed ballot does not reproduce the committed digest.
    ///
    /// Recoverable: the record is untouched and the juror may retry with
    /// the correct ballot and salt while the reveal window is open.
    #[error("reveal by {juror} does not match the committed digest on {dispute_id}")]
    CommitmentMismatch {
        /// The dispute.
        dispute_id: DisputeId,
        /// The juror.
        juror: AccountId,
    },
}

impl DisputeError {
    /// The taxonomy class of this rejection.
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::PartiesNotDistinct
            | Self::WrongPanelSize { .. }
            | Self::DuplicateJuror(_)
            | Self::JurorIsParty(_) => ErrorClass::Validation,
            Self::NotAJuror { .. } => ErrorClass::Permission,
            Self::NotFound(_)
            | Self::DisputeAlreadyOpen(_)
            | Self::WrongPhase { .. }
            | Self::JurorsAlreadyAssigned(_)
            | Self::AlreadyCommitted { .. }
            | Self::AlreadyRevealed { .. }
            | Self::NoCommitment { .. } => ErrorClass::State,
            Self::CommitmentMismatch { .. } => ErrorClass::Integrity,
        }
    }
}
