//! # External Collaborator Seams
//!
//! Traits for everything the protocol core consumes but does not
//! implement: block height (Ledger), juror selection, evidence
//! resolution, payload signing, and the host's participation-penalty
//! policy.
//!
//! ## Design
//!
//! Each seam is a narrow trait so protocol logic stays testable with no
//! chain, wallet, or network dependency. The only implementations that
//! ship here are the ones tests and tooling need: a settable
//! [`SimulatedLedger`] and the [`NoopParticipationHook`].

use std::sync::atomic::{AtomicU64, Ordering};

use thiserror::Error;

use verdict_core::{AccountId, BlockHeight, DisputeId, EvidenceRef};

use crate::lifecycle::RulingOutcome;
use crate::payload::UnsignedPayload;

/// Supplies the current block height.
///
/// The core reads the height fresh for every operation; it never caches
/// and never consults a wall clock.
pub trait Ledger: Send + Sync {
    /// The current block height on the hosting chain.
    fn current_block_height(&self) -> BlockHeight;
}

/// Juror selection failed in the external selection mechanism.
#[derive(Error, Debug)]
#[error("juror selection failed: {0}")]
pub struct SelectionError(pub String);

/// Supplies juror panels from a verifiable-randomness source.
///
/// The core validates and stores the returned panel as immutable; how
/// the randomness is produced is entirely the selector's business.
pub trait JurorSelector: Send + Sync {
    /// Select exactly `panel_size` distinct juror identities for a dispute.
    fn select_panel(
        &self,
        dispute_id: &DisputeId,
        panel_size: usize,
    ) -> Result<Vec<AccountId>, SelectionError>;
}

/// Evidence resolution failed in the external store.
#[derive(Error, Debug)]
#[error("evidence resolution failed for {reference}: {reason}")]
pub struct EvidenceError {
    /// The reference that failed to resolve.
    pub reference: EvidenceRef,
    /// Store-specific failure description.
    pub reason: String,
}

/// Resolves content-addressed evidence references to bytes.
///
/// The core stores and forwards references only; it never interprets the
/// resolved content.
pub trait EvidenceStore: Send + Sync {
    /// Fetch the bytes behind an evidence reference.
    fn resolve(&self, reference: &EvidenceRef) -> Result<Vec<u8>, EvidenceError>;
}

/// Signing failed in the external key custodian.
#[derive(Error, Debug)]
#[error("signing failed: {0}")]
pub struct SignError(pub String);

/// Signs prepared unsigned payloads.
///
/// Key custody lives entirely behind this seam; the core only constructs
/// [`UnsignedPayload`] values.
pub trait Signer: Send + Sync {
    /// Produce a signature over the payload's canonical serialization.
    fn sign(&self, payload: &UnsignedPayload) -> Result<Vec<u8>, SignError>;
}

/// Host hook for participation outcomes.
///
/// Whether a juror who commits but never reveals loses reputation or
/// stake is host policy; the core reports the facts and applies no
/// penalty itself. Default methods are no-ops so hosts implement only
/// what they care about.
pub trait ParticipationHook: Send + Sync {
    /// A committed ballot was forfeited: the juror never revealed before
    /// the dispute closed.
    fn on_vote_forfeited(&self, _dispute_id: &DisputeId, _juror: &AccountId) {}

    /// A dispute reached a terminal phase.
    fn on_dispute_closed(&self, _dispute_id: &DisputeId, _outcome: &RulingOutcome) {}
}

/// The default hook: no penalties, no notifications.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopParticipationHook;

impl ParticipationHook for NoopParticipationHook {}

/// An in-memory ledger with a settable height, for tests and tooling.
///
/// Height only moves forward, mirroring chain behavior.
#[derive(Debug, Default)]
pub struct SimulatedLedger {
    height: AtomicU64,
}

impl SimulatedLedger {
    /// Create a ledger at the given height.
    pub fn starting_at(height: BlockHeight) -> Self {
        Self {
            height: AtomicU64::new(height.value()),
        }
    }

    /// Advance the chain by `blocks`.
    pub fn advance(&self, blocks: u64) {
        self.height.fetch_add(blocks, Ordering::SeqCst);
    }

    /// Jump to an absolute height, if it is ahead of the current one.
    pub fn advance_to(&self, height: BlockHeight) {
        self.height.fetch_max(height.value(), Ordering::SeqCst);
    }
}

impl Ledger for SimulatedLedger {
    fn current_block_height(&self) -> BlockHeight {
        BlockHeight::new(self.height.load(Ordering::SeqCst))
    }
}
