//! # Unsigned Payload Preparation
//!
//! The pure command layer between protocol decisions and transaction
//! submission. Callers prepare an [`UnsignedPayload`] here, hand it to
//! their [`crate::external::Signer`], and submit the signed result
//! through whatever transport the host uses.
//!
//! ## Design
//!
//! Preparation is fully decoupled from signing and submission: these
//! functions touch no wallet, no network, and no store, so every
//! protocol decision they encode is testable in isolation. Binary values
//! (digests, salts) are hex-encoded here — this is the wire boundary.

use serde::{Deserialize, Serialize};

use verdict_core::{AccountId, DisputeId, EvidenceRef, OrderId, VoteChoice};
use verdict_crypto::{commit, CommitmentDigest, VoteSalt};

/// A prepared, not-yet-signed protocol call.
///
/// Tagged by method name so a signer can display what it is about to
/// sign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum UnsignedPayload {
    /// Open a dispute over an order.
    OpenDispute {
        /// The disputed order.
        order_id: OrderId,
        /// Evidence supporting the claim.
        evidence_ref: EvidenceRef,
        /// The party opening the dispute.
        signer: AccountId,
    },
    /// Submit a vote commitment digest.
    CommitVote {
        /// The dispute being voted on.
        dispute_id: DisputeId,
        /// The committing juror.
        juror: AccountId,
        /// The commitment digest (hex on the wire).
        commitment: CommitmentDigest,
    },
    /// Reveal a committed ballot.
    RevealVote {
        /// The dispute being voted on.
        dispute_id: DisputeId,
        /// The revealing juror.
        juror: AccountId,
        /// The ballot.
        choice: VoteChoice,
        /// The salt from the commit step, hex-encoded.
        salt_hex: String,
    },
    /// Finalize the ruling after voting closes. Anyone may submit this.
    FinalizeRuling {
        /// The dispute to finalize.
        dispute_id: DisputeId,
        /// The submitting account.
        signer: AccountId,
    },
}

/// Prepare an open-dispute call.
pub fn prepare_open_payload(
    order_id: OrderId,
    evidence_ref: EvidenceRef,
    signer: AccountId,
) -> UnsignedPayload {
    UnsignedPayload::OpenDispute {
        order_id,
        evidence_ref,
        signer,
    }
}

/// Prepare a commit-vote call.
///
/// Computes the commitment digest for the ballot. The salt is NOT part
/// of the payload — the juror keeps it secret until reveal.
pub fn prepare_commit_payload(
    dispute_id: DisputeId,
    juror: AccountId,
    choice: VoteChoice,
    salt: &VoteSalt,
) -> UnsignedPayload {
    let commitment = commit(choice, salt, &juror, &dispute_id);
    UnsignedPayload::CommitVote {
        dispute_id,
        juror,
        commitment,
    }
}

/// Prepare a reveal-vote call disclosing the ballot and salt.
pub fn prepare_reveal_payload(
    dispute_id: DisputeId,
    juror: AccountId,
    choice: VoteChoice,
    salt: &VoteSalt,
) -> UnsignedPayload {
    UnsignedPayload::RevealVote {
        dispute_id,
        juror,
        choice,
        salt_hex: salt.to_hex(),
    }
}

/// Prepare a finalize-ruling call.
pub fn prepare_finalize_payload(dispute_id: DisputeId, signer: AccountId) -> UnsignedPayload {
    UnsignedPayload::FinalizeRuling { dispute_id, signer }
}
