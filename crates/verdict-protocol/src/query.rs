//! # Dispute Queries
//!
//! Read-only views over the dispute store for hosts rendering juror
//! work-lists and party dashboards. Everything here is a snapshot: the
//! derived phase and pending-action flags are computed against a fresh
//! ledger height at call time.

use serde::{Deserialize, Serialize};

use verdict_core::{AccountId, DisputeId, OrderId};

use crate::lifecycle::DisputeLifecycle;
use crate::phase::{Phase, PhaseClock};

/// The role an account plays in a dispute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisputeRole {
    /// The account opened the dispute.
    Plaintiff,
    /// The account is the opposing party.
    Defendant,
    /// The account sits on the juror panel.
    Juror,
}

/// A dispute an account participates in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisputeSummary {
    /// The dispute.
    pub dispute_id: DisputeId,
    /// The disputed order.
    pub order_id: OrderId,
    /// The account's role.
    pub role: DisputeRole,
    /// Phase derived at query time.
    pub phase: Phase,
}

/// A juror's outstanding duty on one dispute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JuryDuty {
    /// The dispute.
    pub dispute_id: DisputeId,
    /// The disputed order.
    pub order_id: OrderId,
    /// Phase derived at query time.
    pub phase: Phase,
    /// Whether this juror has committed.
    pub has_committed: bool,
    /// Whether this juror has revealed.
    pub has_revealed: bool,
    /// The commit window is open and this juror has not committed.
    pub needs_commit: bool,
    /// The reveal window is open and this juror has committed but not
    /// revealed.
    pub needs_reveal: bool,
    /// Blocks left in the current phase, where one has a deadline.
    pub blocks_remaining: Option<u64>,
}

impl DisputeLifecycle {
    /// Every dispute `account` participates in, with its role.
    ///
    /// A party that also (incorrectly) appears as a juror cannot occur:
    /// panel assignment rejects party overlap.
    pub fn disputes_for_account(&self, account: &AccountId) -> Vec<DisputeSummary> {
        let current = self.ledger().current_block_height();
        let mut summaries: Vec<DisputeSummary> = self
            .store()
            .ids()
            .into_iter()
            .filter_map(|id| self.store().snapshot(&id).ok())
            .filter_map(|record| {
                let role = if record.plaintiff == *account {
                    DisputeRole::Plaintiff
                } else if record.defendant == *account {
                    DisputeRole::Defendant
                } else if record.is_juror(account) {
                    DisputeRole::Juror
                } else {
                    return None;
                };
                let view = PhaseClock::view(&record, self.params(), current);
                Some(DisputeSummary {
                    dispute_id: record.id,
                    order_id: record.order_id,
                    role,
                    phase: view.phase,
                })
            })
            .collect();
        summaries.sort_by_key(|s| s.dispute_id);
        summaries
    }

    /// The work-list for one juror: every dispute they sit on, with
    /// pending-action flags.
    pub fn jury_duties(&self, juror: &AccountId) -> Vec<JuryDuty> {
        let current = self.ledger().current_block_height();
        let mut duties: Vec<JuryDuty> = self
            .store()
            .ids()
            .into_iter()
            .filter_map(|id| self.store().snapshot(&id).ok())
            .filter(|record| record.is_juror(juror))
            .map(|record| {
                let view = PhaseClock::view(&record, self.params(), current);
                let entry = record.commitment(juror);
                let has_committed = entry.is_some();
                let has_revealed = entry.is_some_and(|e| e.revealed);
                JuryDuty {
                    dispute_id: record.id,
                    order_id: record.order_id,
                    phase: view.phase,
                    has_committed,
                    has_revealed,
                    needs_commit: view.phase == Phase::Commit && !has_committed,
                    needs_reveal: view.phase == Phase::Reveal && has_committed && !has_revealed,
                    blocks_remaining: view.blocks_remaining,
                }
            })
            .collect();
        duties.sort_by_key(|d| d.dispute_id);
        duties
    }

    /// Number of duties currently requiring action from `juror`.
    pub fn pending_actions(&self, juror: &AccountId) -> usize {
        self.jury_duties(juror)
            .iter()
            .filter(|d| d.needs_commit || d.needs_reveal)
            .count()
    }
}
