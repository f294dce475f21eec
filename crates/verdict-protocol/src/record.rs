//! # Dispute Records
//!
//! The persisted entity of the protocol: one `DisputeRecord` per disputed
//! order, holding the parties, the juror panel, per-juror commitment
//! entries, deadlines, and the eventual ruling, plus an append-only,
//! block-stamped transition log.
//!
//! ## Invariants
//!
//! - The juror panel is assigned exactly once and never mutated after.
//! - Each juror has at most one commitment entry and at most one reveal.
//! - `ruling` is written exactly once, by the lifecycle controller, while
//!   leaving the Executable phase.
//! - Once the stored phase is terminal the record is read-only.
//!
//! Mutators are `pub(crate)`: the lifecycle controller is the only
//! component that changes a record, and it performs all phase and
//! permission checks before calling them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use verdict_core::{
    AccountId, BlockHeight, DisputeId, EvidenceRef, OrderId, ProtocolParams, Ruling, VoteChoice,
};
use verdict_crypto::CommitmentDigest;

use crate::phase::Phase;
use crate::tally::RevealedVote;

/// One juror's commitment state on one dispute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitmentEntry {
    /// The committing juror.
    pub juror: AccountId,
    /// The submitted commitment digest.
    pub digest: CommitmentDigest,
    /// Whether a commitment was recorded (always true once the entry exists).
    pub committed: bool,
    /// Whether the juror has revealed.
    pub revealed: bool,
    /// The revealed ballot, once verified against the digest.
    pub revealed_choice: Option<VoteChoice>,
    /// Height at which the reveal was accepted.
    pub revealed_at_block: Option<BlockHeight>,
}

impl CommitmentEntry {
    fn new(juror: AccountId, digest: CommitmentDigest) -> Self {
        Self {
            juror,
            digest,
            committed: true,
            revealed: false,
            revealed_choice: None,
            revealed_at_block: None,
        }
    }
}

/// Record of a single persisted phase transition.
///
/// Stamped with block height, never wall-clock, so the log replays
/// identically on every replica.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// Phase before the transition.
    pub from_phase: Phase,
    /// Phase after the transition.
    pub to_phase: Phase,
    /// Height at which the controller persisted the transition.
    pub at_block: BlockHeight,
    /// Human-readable reason for the transition.
    pub reason: String,
}

/// A dispute over a marketplace order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisputeRecord {
    /// Unique dispute identifier.
    pub id: DisputeId,
    /// The disputed order.
    pub order_id: OrderId,
    /// The party that opened the dispute.
    pub plaintiff: AccountId,
    /// The opposing party.
    pub defendant: AccountId,
    /// Opaque content-addressed evidence reference.
    pub evidence_ref: EvidenceRef,
    /// The juror panel; empty until assigned, immutable after.
    pub jurors: Vec<AccountId>,
    /// Persisted lifecycle marker. Gating uses the derived
    /// [`crate::phase::PhaseView`], not this field.
    pub phase: Phase,
    /// Height at which the dispute was opened.
    pub opened_at_block: BlockHeight,
    /// Height at which the panel was assigned.
    pub jurors_assigned_at: Option<BlockHeight>,
    /// First height at which the commit window is closed.
    pub commit_deadline: Option<BlockHeight>,
    /// First height at which the reveal window is closed.
    pub reveal_deadline: Option<BlockHeight>,
    /// Per-juror commitment entries, keyed by juror identity.
    pub commitments: BTreeMap<AccountId, CommitmentEntry>,
    /// The final ruling; set exactly once on resolution.
    pub ruling: Option<Ruling>,
    /// Whether the reveal count met the quorum at finalization.
    pub quorum_reached: bool,
    /// Number of verified reveals.
    pub votes_revealed_count: u32,
    /// Append-only log of persisted phase transitions.
    pub transitions: Vec<TransitionRecord>,
}

impl DisputeRecord {
    /// Create a new dispute in the Open phase.
    pub fn new(
        id: DisputeId,
        order_id: OrderId,
        plaintiff: AccountId,
        defendant: AccountId,
        evidence_ref: EvidenceRef,
        opened_at_block: BlockHeight,
    ) -> Self {
        Self {
            id,
            order_id,
            plaintiff,
            defendant,
            evidence_ref,
            jurors: Vec::new(),
            phase: Phase::Open,
            opened_at_block,
            jurors_assigned_at: None,
            commit_deadline: None,
            reveal_deadline: None,
            commitments: BTreeMap::new(),
            ruling: None,
            quorum_reached: false,
            votes_revealed_count: 0,
            transitions: Vec::new(),
        }
    }

    // ── Read helpers ─────────────────────────────────────────────────

    /// Whether `account` sits on the juror panel.
    pub fn is_juror(&self, account: &AccountId) -> bool {
        self.jurors.contains(account)
    }

    /// The commitment entry for `juror`, if one exists.
    pub fn commitment(&self, juror: &AccountId) -> Option<&CommitmentEntry> {
        self.commitments.get(juror)
    }

    /// Number of jurors that have committed.
    pub fn committed_count(&self) -> usize {
        self.commitments.len()
    }

    /// Whether every assigned juror has revealed.
    ///
    /// False while the panel is unassigned.
    pub fn all_jurors_revealed(&self) -> bool {
        !self.jurors.is_empty() && self.votes_revealed_count as usize == self.jurors.len()
    }

    /// The verified reveals, in juror-key order.
    pub fn revealed_votes(&self) -> Vec<RevealedVote> {
        self.commitments
            .values()
            .filter_map(|entry| {
                entry.revealed_choice.map(|choice| RevealedVote {
                    juror: entry.juror.clone(),
                    choice,
                })
            })
            .collect()
    }

    /// Jurors that committed but never revealed (forfeited ballots).
    pub fn forfeited_jurors(&self) -> Vec<AccountId> {
        self.commitments
            .values()
            .filter(|entry| !entry.revealed)
            .map(|entry| entry.juror.clone())
            .collect()
    }

    // ── Controller-only mutators ─────────────────────────────────────

    /// Install the juror panel and derive the phase deadlines.
    ///
    /// The caller has already validated panel size, distinctness, and
    /// party overlap. Commits open at `assigned_at + 1`.
    pub(crate) fn assign_panel(
        &mut self,
        jurors: Vec<AccountId>,
        assigned_at: BlockHeight,
        params: &ProtocolParams,
    ) {
        let commit_opens = assigned_at.next();
        let commit_deadline = commit_opens.offset(params.commit_window);
        self.jurors = jurors;
        self.jurors_assigned_at = Some(assigned_at);
        self.commit_deadline = Some(commit_deadline);
        self.reveal_deadline = Some(commit_deadline.offset(params.reveal_window));
        self.transition_to(Phase::JurorsSelected, assigned_at, "juror panel assigned");
    }

    /// Record a commitment entry for `juror`.
    pub(crate) fn insert_commitment(&mut self, juror: AccountId, digest: CommitmentDigest) {
        self.commitments
            .insert(juror.clone(), CommitmentEntry::new(juror, digest));
    }

    /// Mark a verified reveal for `juror`.
    pub(crate) fn apply_reveal(&mut self, juror: &AccountId, choice: VoteChoice, at: BlockHeight) {
        if let Some(entry) = self.commitments.get_mut(juror) {
            entry.revealed = true;
            entry.revealed_choice = Some(choice);
            entry.revealed_at_block = Some(at);
            self.votes_revealed_count += 1;
        }
    }

    /// Persist a phase transition with a block stamp.
    pub(crate) fn transition_to(&mut self, to: Phase, at: BlockHeight, reason: &str) {
        self.transitions.push(TransitionRecord {
            from_phase: self.phase,
            to_phase: to,
            at_block: at,
            reason: reason.to_string(),
        });
        self.phase = to;
    }
}
