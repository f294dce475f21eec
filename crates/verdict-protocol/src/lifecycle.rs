//! # Dispute Lifecycle Controller
//!
//! The sole mutator of dispute records. Orchestrates
//! `open_dispute → assign_jurors → submit_commit → submit_reveal →
//! finalize_ruling`, gating every operation on the phase derived from a
//! fresh ledger height.
//!
//! ## Atomicity
//!
//! Every operation locks its dispute's critical section before the first
//! check and holds it through the write, so no other call can observe a
//! check-then-act gap. Rejections mutate nothing; the only writes that
//! happen are the ones the operation reports.
//!
//! ## Terminal Transitions
//!
//! `finalize_ruling` is the only path into Resolved and Expired. A
//! quorum of reveals produces a ruling (strict majority, tie →
//! PartialRefund). Below-quorum participation — whether too few commits
//! by the commit deadline or too few reveals by the reveal deadline —
//! expires the dispute without a ruling. Both outcomes notify the
//! participation hook; penalties for forfeited ballots are host policy.

use std::sync::{Arc, PoisonError};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use verdict_core::{
    AccountId, DisputeId, EvidenceRef, OrderId, ParamsError, ProtocolParams, Ruling, VoteChoice,
};
use verdict_crypto::{verify, CommitmentDigest, VoteSalt};

use crate::error::DisputeError;
use crate::external::{JurorSelector, Ledger, NoopParticipationHook, ParticipationHook, SelectionError};
use crate::phase::{Phase, PhaseClock, PhaseView};
use crate::record::DisputeRecord;
use crate::store::DisputeStore;
use crate::tally::{self, TallyBreakdown};

/// The terminal outcome of `finalize_ruling`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RulingOutcome {
    /// A quorum of reveals produced a ruling.
    Resolved {
        /// The persisted ruling.
        ruling: Ruling,
        /// Per-option reveal counts behind the ruling.
        breakdown: TallyBreakdown,
        /// The split policy in force, echoed for the settlement layer
        /// when the ruling is a partial refund.
        partial_refund_plaintiff_bps: Option<u16>,
    },
    /// Participation fell below quorum; the dispute expired unruled.
    Expired {
        /// Reveals received.
        revealed: u32,
        /// Reveals required.
        required: u32,
    },
}

/// Failure of the combined select-and-assign convenience path.
#[derive(Error, Debug)]
pub enum SelectAssignError {
    /// The external selection mechanism failed.
    #[error(transparent)]
    Selection(#[from] SelectionError),
    /// The selected panel was rejected or the dispute was not assignable.
    #[error(transparent)]
    Dispute(#[from] DisputeError),
}

/// The dispute lifecycle controller.
///
/// Owns the dispute store and the protocol parameters; reads block
/// height fresh from the ledger for every gate.
pub struct DisputeLifecycle {
    params: ProtocolParams,
    ledger: Arc<dyn Ledger>,
    hook: Arc<dyn ParticipationHook>,
    store: DisputeStore,
}

impl DisputeLifecycle {
    /// Create a controller over validated parameters.
    ///
    /// # Errors
    ///
    /// Rejects inconsistent parameters (see [`ProtocolParams::validate`]).
    pub fn new(params: ProtocolParams, ledger: Arc<dyn Ledger>) -> Result<Self, ParamsError> {
        params.validate()?;
        Ok(Self {
            params,
            ledger,
            hook: Arc::new(NoopParticipationHook),
            store: DisputeStore::new(),
        })
    }

    /// Replace the participation hook.
    pub fn with_hook(mut self, hook: Arc<dyn ParticipationHook>) -> Self {
        self.hook = hook;
        self
    }

    /// The parameters this controller enforces.
    pub fn params(&self) -> &ProtocolParams {
        &self.params
    }

    /// The controller stays the sole mutator: internal readers get the
    /// store, nobody outside the crate does.
    pub(crate) fn store(&self) -> &DisputeStore {
        &self.store
    }

    pub(crate) fn ledger(&self) -> &dyn Ledger {
        self.ledger.as_ref()
    }

    // ── Operations ───────────────────────────────────────────────────

    /// Open a dispute over an order.
    ///
    /// # Errors
    ///
    /// `PartiesNotDistinct` if plaintiff and defendant coincide;
    /// `DisputeAlreadyOpen` if the order already has a dispute.
    pub fn open_dispute(
        &self,
        order_id: OrderId,
        plaintiff: AccountId,
        defendant: AccountId,
        evidence_ref: EvidenceRef,
    ) -> Result<DisputeId, DisputeError> {
        if plaintiff == defendant {
            return Err(DisputeError::PartiesNotDistinct);
        }
        let opened_at = self.ledger.current_block_height();
        let record = DisputeRecord::new(
            DisputeId::new(),
            order_id,
            plaintiff,
            defendant,
            evidence_ref,
            opened_at,
        );
        let id = record.id;
        self.store.insert(record)?;
        tracing::info!(dispute = %id, order = %order_id, block = %opened_at, "dispute opened");
        Ok(id)
    }

    /// Install the juror panel supplied by the selection mechanism.
    ///
    /// Assignment happens exactly once; the panel is immutable after.
    /// Commits are accepted from the block after the assignment block.
    ///
    /// # Errors
    ///
    /// `JurorsAlreadyAssigned` on a second assignment; `WrongPanelSize`,
    /// `DuplicateJuror`, or `JurorIsParty` if the panel is malformed.
    pub fn assign_jurors(
        &self,
        dispute_id: DisputeId,
        jurors: Vec<AccountId>,
    ) -> Result<(), DisputeError> {
        let handle = self.store.handle(&dispute_id)?;
        let mut record = handle.lock().unwrap_or_else(PoisonError::into_inner);

        if !record.jurors.is_empty() {
            return Err(DisputeError::JurorsAlreadyAssigned(dispute_id));
        }
        if jurors.len() != self.params.panel_size {
            return Err(DisputeError::WrongPanelSize {
                expected: self.params.panel_size,
                actual: jurors.len(),
            });
        }
        let mut seen = std::collections::BTreeSet::new();
        for juror in &jurors {
            if !seen.insert(juror.clone()) {
                return Err(DisputeError::DuplicateJuror(juror.clone()));
            }
            if *juror == record.plaintiff || *juror == record.defendant {
                return Err(DisputeError::JurorIsParty(juror.clone()));
            }
        }

        let assigned_at = self.ledger.current_block_height();
        record.assign_panel(jurors, assigned_at, &self.params);
        tracing::info!(dispute = %dispute_id, block = %assigned_at, "juror panel assigned");
        Ok(())
    }

    /// Pull a panel from the selector and assign it in one step.
    pub fn select_and_assign(
        &self,
        selector: &dyn JurorSelector,
        dispute_id: DisputeId,
    ) -> Result<(), SelectAssignError> {
        let panel = selector.select_panel(&dispute_id, self.params.panel_size)?;
        self.assign_jurors(dispute_id, panel)?;
        Ok(())
    }

    /// Record a juror's commitment digest.
    ///
    /// # Errors
    ///
    /// `NotAJuror` if the caller is not on the panel; `WrongPhase`
    /// outside the commit window; `AlreadyCommitted` on a second commit.
    pub fn submit_commit(
        &self,
        dispute_id: DisputeId,
        juror: AccountId,
        digest: CommitmentDigest,
    ) -> Result<(), DisputeError> {
        let handle = self.store.handle(&dispute_id)?;
        let mut record = handle.lock().unwrap_or_else(PoisonError::into_inner);

        if !record.is_juror(&juror) {
            return Err(DisputeError::NotAJuror { dispute_id, juror });
        }
        let current = self.ledger.current_block_height();
        let view = PhaseClock::view(&record, &self.params, current);
        if view.phase != Phase::Commit {
            return Err(DisputeError::WrongPhase {
                dispute_id,
                expected: Phase::Commit,
                actual: view.phase,
            });
        }
        if record.commitment(&juror).is_some() {
            return Err(DisputeError::AlreadyCommitted { dispute_id, juror });
        }

        if record.phase == Phase::JurorsSelected {
            record.transition_to(Phase::Commit, current, "commit window open");
        }
        record.insert_commitment(juror.clone(), digest);
        tracing::debug!(
            dispute = %dispute_id,
            juror = %juror,
            block = %current,
            committed = record.committed_count(),
            "vote commitment recorded"
        );
        Ok(())
    }

    /// Verify and record a juror's reveal.
    ///
    /// # Errors
    ///
    /// `WrongPhase` outside the reveal window; `NotAJuror`;
    /// `NoCommitment` without a prior commit; `AlreadyRevealed` on a
    /// second reveal; `CommitmentMismatch` if the ballot and salt do not
    /// reproduce the committed digest — the record is untouched and the
    /// juror may retry while the window is open.
    pub fn submit_reveal(
        &self,
        dispute_id: DisputeId,
        juror: AccountId,
        choice: VoteChoice,
        salt: &VoteSalt,
    ) -> Result<(), DisputeError> {
        let handle = self.store.handle(&dispute_id)?;
        let mut record = handle.lock().unwrap_or_else(PoisonError::into_inner);

        let current = self.ledger.current_block_height();
        let view = PhaseClock::view(&record, &self.params, current);
        if view.phase != Phase::Reveal {
            return Err(DisputeError::WrongPhase {
                dispute_id,
                expected: Phase::Reveal,
                actual: view.phase,
            });
        }
        if !record.is_juror(&juror) {
            return Err(DisputeError::NotAJuror { dispute_id, juror });
        }
        let entry = match record.commitment(&juror) {
            Some(entry) => entry,
            None => return Err(DisputeError::NoCommitment { dispute_id, juror }),
        };
        if entry.revealed {
            return Err(DisputeError::AlreadyRevealed { dispute_id, juror });
        }
        if !verify(&entry.digest, choice, salt, &juror, &dispute_id) {
            return Err(DisputeError::CommitmentMismatch { dispute_id, juror });
        }

        if record.phase != Phase::Reveal {
            record.transition_to(Phase::Reveal, current, "reveal window open");
        }
        record.apply_reveal(&juror, choice, current);
        tracing::debug!(
            dispute = %dispute_id,
            juror = %juror,
            block = %current,
            revealed = record.votes_revealed_count,
            "vote revealed"
        );
        Ok(())
    }

    /// Close voting and persist the terminal outcome.
    ///
    /// Callable by anyone once the dispute is executable: after the
    /// reveal deadline, or as soon as every juror has revealed. Also
    /// persists the expiry of a dispute whose commit participation never
    /// reached quorum.
    ///
    /// # Errors
    ///
    /// `WrongPhase` while voting is still open or once the dispute is
    /// already terminal.
    pub fn finalize_ruling(&self, dispute_id: DisputeId) -> Result<RulingOutcome, DisputeError> {
        let handle = self.store.handle(&dispute_id)?;
        let mut record = handle.lock().unwrap_or_else(PoisonError::into_inner);

        let current = self.ledger.current_block_height();
        let view = PhaseClock::view(&record, &self.params, current);
        let outcome = match view.phase {
            Phase::Executable => {
                let votes = record.revealed_votes();
                match tally::resolve(&votes, &self.params) {
                    Ok(verdict) => {
                        record.ruling = Some(verdict.ruling);
                        record.quorum_reached = true;
                        record.transition_to(Phase::Resolved, current, "ruling finalized");
                        RulingOutcome::Resolved {
                            ruling: verdict.ruling,
                            breakdown: verdict.breakdown,
                            partial_refund_plaintiff_bps: (verdict.ruling
                                == Ruling::PartialRefund)
                                .then_some(self.params.partial_refund_plaintiff_bps),
                        }
                    }
                    Err(no_quorum) => {
                        record.quorum_reached = false;
                        record.transition_to(Phase::Expired, current, "reveal quorum not reached");
                        RulingOutcome::Expired {
                            revealed: no_quorum.revealed,
                            required: no_quorum.required,
                        }
                    }
                }
            }
            // Commit participation below quorum: a ruling was never
            // reachable. Persist the expiry the clock already derived.
            Phase::Expired if !record.phase.is_terminal() => {
                record.quorum_reached = false;
                record.transition_to(Phase::Expired, current, "commit quorum not reached");
                RulingOutcome::Expired {
                    revealed: record.votes_revealed_count,
                    required: self.params.quorum as u32,
                }
            }
            other => {
                return Err(DisputeError::WrongPhase {
                    dispute_id,
                    expected: Phase::Executable,
                    actual: other,
                })
            }
        };

        let forfeited = record.forfeited_jurors();
        // Release the critical section before calling out: a hook is host
        // code and may read this controller back.
        drop(record);
        for juror in &forfeited {
            self.hook.on_vote_forfeited(&dispute_id, juror);
        }
        self.hook.on_dispute_closed(&dispute_id, &outcome);
        match &outcome {
            RulingOutcome::Resolved { ruling, .. } => {
                tracing::info!(dispute = %dispute_id, block = %current, %ruling, "dispute resolved");
            }
            RulingOutcome::Expired { revealed, required } => {
                tracing::info!(
                    dispute = %dispute_id,
                    block = %current,
                    revealed,
                    required,
                    "dispute expired without quorum"
                );
            }
        }
        Ok(outcome)
    }

    // ── Read API ─────────────────────────────────────────────────────

    /// A point-in-time copy of a dispute record.
    pub fn dispute(&self, dispute_id: &DisputeId) -> Result<DisputeRecord, DisputeError> {
        self.store.snapshot(dispute_id)
    }

    /// The dispute covering an order, if any.
    pub fn dispute_for_order(&self, order_id: &OrderId) -> Option<DisputeId> {
        self.store.dispute_for_order(order_id)
    }

    /// The derived phase of a dispute at the current ledger height.
    pub fn phase_view(&self, dispute_id: &DisputeId) -> Result<PhaseView, DisputeError> {
        let record = self.store.snapshot(dispute_id)?;
        let current = self.ledger.current_block_height();
        Ok(PhaseClock::view(&record, &self.params, current))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use verdict_core::BlockHeight;
    use verdict_crypto::commit;

    use crate::external::SimulatedLedger;

    /// Hook that records every notification for assertions.
    #[derive(Default)]
    struct RecordingHook {
        forfeited: Mutex<Vec<AccountId>>,
        closed: Mutex<Vec<RulingOutcome>>,
    }

    impl ParticipationHook for RecordingHook {
        fn on_vote_forfeited(&self, _dispute_id: &DisputeId, juror: &AccountId) {
            self.forfeited.lock().unwrap().push(juror.clone());
        }

        fn on_dispute_closed(&self, _dispute_id: &DisputeId, outcome: &RulingOutcome) {
            self.closed.lock().unwrap().push(outcome.clone());
        }
    }

    struct Fixture {
        controller: DisputeLifecycle,
        ledger: Arc<SimulatedLedger>,
        hook: Arc<RecordingHook>,
        dispute_id: DisputeId,
        jurors: Vec<AccountId>,
    }

    fn account(name: &str) -> AccountId {
        AccountId::new(name).unwrap()
    }

    fn salt_for(index: usize) -> VoteSalt {
        VoteSalt::new(vec![index as u8 + 1; 16]).unwrap()
    }

    /// Controller with a dispute opened at block 10 and a 5-juror panel
    /// assigned at block 20. Commits span blocks 21..121, reveals
    /// 121..221 under default windows.
    fn fixture() -> Fixture {
        let ledger = Arc::new(SimulatedLedger::starting_at(BlockHeight::new(10)));
        let hook = Arc::new(RecordingHook::default());
        let controller = DisputeLifecycle::new(ProtocolParams::default(), ledger.clone())
            .unwrap()
            .with_hook(hook.clone());

        let dispute_id = controller
            .open_dispute(
                OrderId::new(),
                account("plaintiff"),
                account("defendant"),
                EvidenceRef::new("bafy-evidence").unwrap(),
            )
            .unwrap();

        let jurors: Vec<AccountId> = (0..5).map(|i| account(&format!("juror-{i}"))).collect();
        ledger.advance_to(BlockHeight::new(20));
        controller.assign_jurors(dispute_id, jurors.clone()).unwrap();

        Fixture {
            controller,
            ledger,
            hook,
            dispute_id,
            jurors,
        }
    }

    fn commit_vote(fx: &Fixture, index: usize, choice: VoteChoice) {
        let juror = fx.jurors[index].clone();
        let digest = commit(choice, &salt_for(index), &juror, &fx.dispute_id);
        fx.controller
            .submit_commit(fx.dispute_id, juror, digest)
            .unwrap();
    }

    fn reveal_vote(fx: &Fixture, index: usize, choice: VoteChoice) -> Result<(), DisputeError> {
        fx.controller.submit_reveal(
            fx.dispute_id,
            fx.jurors[index].clone(),
            choice,
            &salt_for(index),
        )
    }

    fn enter_commit_phase(fx: &Fixture) {
        fx.ledger.advance_to(BlockHeight::new(21));
    }

    fn enter_reveal_phase(fx: &Fixture) {
        fx.ledger.advance_to(BlockHeight::new(121));
    }

    fn pass_reveal_deadline(fx: &Fixture) {
        fx.ledger.advance_to(BlockHeight::new(221));
    }

    // ── Opening and assignment ───────────────────────────────────────

    #[test]
    fn test_open_dispute_starts_open() {
        let ledger = Arc::new(SimulatedLedger::starting_at(BlockHeight::new(7)));
        let controller = DisputeLifecycle::new(ProtocolParams::default(), ledger).unwrap();
        let id = controller
            .open_dispute(
                OrderId::new(),
                account("plaintiff"),
                account("defendant"),
                EvidenceRef::new("bafy-evidence").unwrap(),
            )
            .unwrap();
        let record = controller.dispute(&id).unwrap();
        assert_eq!(record.phase, Phase::Open);
        assert_eq!(record.opened_at_block, BlockHeight::new(7));
        assert_eq!(controller.phase_view(&id).unwrap().phase, Phase::Open);
    }

    #[test]
    fn test_open_rejects_same_party_twice() {
        let ledger = Arc::new(SimulatedLedger::default());
        let controller = DisputeLifecycle::new(ProtocolParams::default(), ledger).unwrap();
        let err = controller
            .open_dispute(
                OrderId::new(),
                account("alice"),
                account("alice"),
                EvidenceRef::new("bafy-evidence").unwrap(),
            )
            .unwrap_err();
        assert!(matches!(err, DisputeError::PartiesNotDistinct));
    }

    #[test]
    fn test_open_rejects_second_dispute_for_order() {
        let ledger = Arc::new(SimulatedLedger::default());
        let controller = DisputeLifecycle::new(ProtocolParams::default(), ledger).unwrap();
        let order = OrderId::new();
        controller
            .open_dispute(
                order,
                account("plaintiff"),
                account("defendant"),
                EvidenceRef::new("bafy-evidence").unwrap(),
            )
            .unwrap();
        let err = controller
            .open_dispute(
                order,
                account("plaintiff"),
                account("defendant"),
                EvidenceRef::new("bafy-other").unwrap(),
            )
            .unwrap_err();
        assert!(matches!(err, DisputeError::DisputeAlreadyOpen(_)));
    }

    #[test]
    fn test_assignment_is_once_only() {
        let fx = fixture();
        let err = fx
            .controller
            .assign_jurors(fx.dispute_id, fx.jurors.clone())
            .unwrap_err();
        assert!(matches!(err, DisputeError::JurorsAlreadyAssigned(_)));
    }

    #[test]
    fn test_assignment_validates_panel() {
        let ledger = Arc::new(SimulatedLedger::default());
        let controller = DisputeLifecycle::new(ProtocolParams::default(), ledger).unwrap();
        let id = controller
            .open_dispute(
                OrderId::new(),
                account("plaintiff"),
                account("defendant"),
                EvidenceRef::new("bafy-evidence").unwrap(),
            )
            .unwrap();

        // Wrong size.
        let short: Vec<AccountId> = (0..4).map(|i| account(&format!("juror-{i}"))).collect();
        assert!(matches!(
            controller.assign_jurors(id, short),
            Err(DisputeError::WrongPanelSize {
                expected: 5,
                actual: 4
            })
        ));

        // Duplicate juror.
        let dup = vec![
            account("juror-0"),
            account("juror-1"),
            account("juror-1"),
            account("juror-2"),
            account("juror-3"),
        ];
        assert!(matches!(
            controller.assign_jurors(id, dup),
            Err(DisputeError::DuplicateJuror(_))
        ));

        // Juror is a party.
        let with_party = vec![
            account("juror-0"),
            account("juror-1"),
            account("juror-2"),
            account("juror-3"),
            account("plaintiff"),
        ];
        assert!(matches!(
            controller.assign_jurors(id, with_party),
            Err(DisputeError::JurorIsParty(_))
        ));

        // Nothing was persisted by the rejected attempts.
        assert!(controller.dispute(&id).unwrap().jurors.is_empty());
    }

    #[test]
    fn test_select_and_assign_uses_selector() {
        struct FixedSelector(Vec<AccountId>);
        impl JurorSelector for FixedSelector {
            fn select_panel(
                &self,
                _dispute_id: &DisputeId,
                _panel_size: usize,
            ) -> Result<Vec<AccountId>, SelectionError> {
                Ok(self.0.clone())
            }
        }

        let ledger = Arc::new(SimulatedLedger::default());
        let controller = DisputeLifecycle::new(ProtocolParams::default(), ledger).unwrap();
        let id = controller
            .open_dispute(
                OrderId::new(),
                account("plaintiff"),
                account("defendant"),
                EvidenceRef::new("bafy-evidence").unwrap(),
            )
            .unwrap();
        let panel: Vec<AccountId> = (0..5).map(|i| account(&format!("juror-{i}"))).collect();
        controller
            .select_and_assign(&FixedSelector(panel.clone()), id)
            .unwrap();
        assert_eq!(controller.dispute(&id).unwrap().jurors, panel);
    }

    // ── Commit phase ─────────────────────────────────────────────────

    #[test]
    fn test_commit_accepted_in_window() {
        let fx = fixture();
        enter_commit_phase(&fx);
        commit_vote(&fx, 0, VoteChoice::RefundPlaintiff);
        let record = fx.controller.dispute(&fx.dispute_id).unwrap();
        assert_eq!(record.committed_count(), 1);
        assert!(record.commitment(&fx.jurors[0]).unwrap().committed);
    }

    #[test]
    fn test_commit_rejected_before_window() {
        let fx = fixture();
        // Still at the assignment block.
        let juror = fx.jurors[0].clone();
        let digest = commit(
            VoteChoice::RefundPlaintiff,
            &salt_for(0),
            &juror,
            &fx.dispute_id,
        );
        let err = fx
            .controller
            .submit_commit(fx.dispute_id, juror, digest)
            .unwrap_err();
        assert!(matches!(
            err,
            DisputeError::WrongPhase {
                actual: Phase::JurorsSelected,
                ..
            }
        ));
    }

    #[test]
    fn test_commit_rejected_at_deadline_block() {
        let fx = fixture();
        enter_commit_phase(&fx);
        for i in 0..3 {
            commit_vote(&fx, i, VoteChoice::RefundPlaintiff);
        }
        fx.ledger.advance_to(BlockHeight::new(121));
        let juror = fx.jurors[4].clone();
        let digest = commit(
            VoteChoice::RefundPlaintiff,
            &salt_for(4),
            &juror,
            &fx.dispute_id,
        );
        let err = fx
            .controller
            .submit_commit(fx.dispute_id, juror, digest)
            .unwrap_err();
        assert!(matches!(err, DisputeError::WrongPhase { .. }));
    }

    #[test]
    fn test_commit_from_non_juror_rejected() {
        let fx = fixture();
        enter_commit_phase(&fx);
        let outsider = account("outsider");
        let digest = commit(
            VoteChoice::RefundPlaintiff,
            &salt_for(9),
            &outsider,
            &fx.dispute_id,
        );
        let err = fx
            .controller
            .submit_commit(fx.dispute_id, outsider, digest)
            .unwrap_err();
        assert!(matches!(err, DisputeError::NotAJuror { .. }));
    }

    #[test]
    fn test_double_commit_rejected() {
        let fx = fixture();
        enter_commit_phase(&fx);
        commit_vote(&fx, 0, VoteChoice::RefundPlaintiff);
        let juror = fx.jurors[0].clone();
        let digest = commit(
            VoteChoice::ReleaseToDefendant,
            &salt_for(0),
            &juror,
            &fx.dispute_id,
        );
        let err = fx
            .controller
            .submit_commit(fx.dispute_id, juror, digest)
            .unwrap_err();
        assert!(matches!(err, DisputeError::AlreadyCommitted { .. }));
        // The original commitment is intact.
        let record = fx.controller.dispute(&fx.dispute_id).unwrap();
        assert_eq!(record.committed_count(), 1);
    }

    // ── Reveal phase ─────────────────────────────────────────────────

    #[test]
    fn test_reveal_rejected_during_commit_phase() {
        let fx = fixture();
        enter_commit_phase(&fx);
        commit_vote(&fx, 0, VoteChoice::RefundPlaintiff);
        let err = reveal_vote(&fx, 0, VoteChoice::RefundPlaintiff).unwrap_err();
        assert!(matches!(
            err,
            DisputeError::WrongPhase {
                expected: Phase::Reveal,
                actual: Phase::Commit,
                ..
            }
        ));
    }

    #[test]
    fn test_reveal_verified_against_commitment() {
        let fx = fixture();
        enter_commit_phase(&fx);
        for i in 0..3 {
            commit_vote(&fx, i, VoteChoice::RefundPlaintiff);
        }
        enter_reveal_phase(&fx);
        reveal_vote(&fx, 0, VoteChoice::RefundPlaintiff).unwrap();

        let record = fx.controller.dispute(&fx.dispute_id).unwrap();
        assert_eq!(record.votes_revealed_count, 1);
        let entry = record.commitment(&fx.jurors[0]).unwrap();
        assert_eq!(entry.revealed_choice, Some(VoteChoice::RefundPlaintiff));
        assert_eq!(entry.revealed_at_block, Some(BlockHeight::new(121)));
    }

    #[test]
    fn test_reveal_with_wrong_ballot_is_mismatch() {
        // Scenario D: wrong reveal leaves the record untouched, a correct
        // retry within the window succeeds.
        let fx = fixture();
        enter_commit_phase(&fx);
        for i in 0..3 {
            commit_vote(&fx, i, VoteChoice::RefundPlaintiff);
        }
        enter_reveal_phase(&fx);

        let err = reveal_vote(&fx, 0, VoteChoice::ReleaseToDefendant).unwrap_err();
        assert!(matches!(err, DisputeError::CommitmentMismatch { .. }));
        let record = fx.controller.dispute(&fx.dispute_id).unwrap();
        assert_eq!(record.votes_revealed_count, 0);
        assert!(!record.commitment(&fx.jurors[0]).unwrap().revealed);

        // Wrong salt is also a mismatch.
        let err = fx
            .controller
            .submit_reveal(
                fx.dispute_id,
                fx.jurors[0].clone(),
                VoteChoice::RefundPlaintiff,
                &salt_for(7),
            )
            .unwrap_err();
        assert!(matches!(err, DisputeError::CommitmentMismatch { .. }));

        // Correct retry succeeds.
        reveal_vote(&fx, 0, VoteChoice::RefundPlaintiff).unwrap();
        let record = fx.controller.dispute(&fx.dispute_id).unwrap();
        assert_eq!(record.votes_revealed_count, 1);
    }

    #[test]
    fn test_reveal_without_commitment_rejected() {
        let fx = fixture();
        enter_commit_phase(&fx);
        for i in 0..3 {
            commit_vote(&fx, i, VoteChoice::RefundPlaintiff);
        }
        enter_reveal_phase(&fx);
        let err = reveal_vote(&fx, 4, VoteChoice::RefundPlaintiff).unwrap_err();
        assert!(matches!(err, DisputeError::NoCommitment { .. }));
    }

    #[test]
    fn test_double_reveal_rejected() {
        let fx = fixture();
        enter_commit_phase(&fx);
        for i in 0..3 {
            commit_vote(&fx, i, VoteChoice::RefundPlaintiff);
        }
        enter_reveal_phase(&fx);
        reveal_vote(&fx, 0, VoteChoice::RefundPlaintiff).unwrap();
        let err = reveal_vote(&fx, 0, VoteChoice::RefundPlaintiff).unwrap_err();
        assert!(matches!(err, DisputeError::AlreadyRevealed { .. }));
        let record = fx.controller.dispute(&fx.dispute_id).unwrap();
        assert_eq!(record.votes_revealed_count, 1);
    }

    #[test]
    fn test_reveal_rejected_at_deadline_block() {
        let fx = fixture();
        enter_commit_phase(&fx);
        for i in 0..4 {
            commit_vote(&fx, i, VoteChoice::RefundPlaintiff);
        }
        enter_reveal_phase(&fx);
        for i in 0..3 {
            reveal_vote(&fx, i, VoteChoice::RefundPlaintiff).unwrap();
        }
        pass_reveal_deadline(&fx);
        let err = reveal_vote(&fx, 3, VoteChoice::RefundPlaintiff).unwrap_err();
        assert!(matches!(
            err,
            DisputeError::WrongPhase {
                actual: Phase::Executable,
                ..
            }
        ));
    }

    // ── Finalization ─────────────────────────────────────────────────

    #[test]
    fn test_scenario_a_majority_ruling() {
        // 3 × RefundPlaintiff, 1 × ReleaseToDefendant, 1 never reveals.
        let fx = fixture();
        enter_commit_phase(&fx);
        for i in 0..4 {
            commit_vote(
                &fx,
                i,
                if i < 3 {
                    VoteChoice::RefundPlaintiff
                } else {
                    VoteChoice::ReleaseToDefendant
                },
            );
        }
        commit_vote(&fx, 4, VoteChoice::RefundPlaintiff); // commits, never reveals
        enter_reveal_phase(&fx);
        for i in 0..3 {
            reveal_vote(&fx, i, VoteChoice::RefundPlaintiff).unwrap();
        }
        reveal_vote(&fx, 3, VoteChoice::ReleaseToDefendant).unwrap();
        pass_reveal_deadline(&fx);

        let outcome = fx.controller.finalize_ruling(fx.dispute_id).unwrap();
        match outcome {
            RulingOutcome::Resolved {
                ruling,
                breakdown,
                partial_refund_plaintiff_bps,
            } => {
                assert_eq!(ruling, Ruling::RefundPlaintiff);
                assert_eq!(breakdown.refund_plaintiff, 3);
                assert_eq!(breakdown.release_to_defendant, 1);
                assert_eq!(partial_refund_plaintiff_bps, None);
            }
            other => panic!("expected Resolved, got {other:?}"),
        }

        let record = fx.controller.dispute(&fx.dispute_id).unwrap();
        assert_eq!(record.phase, Phase::Resolved);
        assert_eq!(record.ruling, Some(Ruling::RefundPlaintiff));
        assert!(record.quorum_reached);

        // The silent juror's ballot was forfeited and reported.
        let forfeited = fx.hook.forfeited.lock().unwrap();
        assert_eq!(forfeited.as_slice(), &[fx.jurors[4].clone()]);
    }

    #[test]
    fn test_scenario_b_no_quorum_expires() {
        // Only 2 of 5 reveal.
        let fx = fixture();
        enter_commit_phase(&fx);
        for i in 0..3 {
            commit_vote(&fx, i, VoteChoice::RefundPlaintiff);
        }
        enter_reveal_phase(&fx);
        for i in 0..2 {
            reveal_vote(&fx, i, VoteChoice::RefundPlaintiff).unwrap();
        }
        pass_reveal_deadline(&fx);

        let outcome = fx.controller.finalize_ruling(fx.dispute_id).unwrap();
        assert_eq!(
            outcome,
            RulingOutcome::Expired {
                revealed: 2,
                required: 3
            }
        );
        let record = fx.controller.dispute(&fx.dispute_id).unwrap();
        assert_eq!(record.phase, Phase::Expired);
        assert_eq!(record.ruling, None);
        assert!(!record.quorum_reached);
    }

    #[test]
    fn test_scenario_c_tie_is_partial_refund() {
        let fx = fixture();
        enter_commit_phase(&fx);
        for i in 0..2 {
            commit_vote(&fx, i, VoteChoice::RefundPlaintiff);
        }
        for i in 2..4 {
            commit_vote(&fx, i, VoteChoice::ReleaseToDefendant);
        }
        enter_reveal_phase(&fx);
        for i in 0..2 {
            reveal_vote(&fx, i, VoteChoice::RefundPlaintiff).unwrap();
        }
        for i in 2..4 {
            reveal_vote(&fx, i, VoteChoice::ReleaseToDefendant).unwrap();
        }
        pass_reveal_deadline(&fx);

        let outcome = fx.controller.finalize_ruling(fx.dispute_id).unwrap();
        match outcome {
            RulingOutcome::Resolved {
                ruling,
                partial_refund_plaintiff_bps,
                ..
            } => {
                assert_eq!(ruling, Ruling::PartialRefund);
                assert_eq!(partial_refund_plaintiff_bps, Some(5_000));
            }
            other => panic!("expected Resolved, got {other:?}"),
        }
    }

    #[test]
    fn test_early_finalize_when_all_reveal() {
        let fx = fixture();
        enter_commit_phase(&fx);
        for i in 0..5 {
            commit_vote(&fx, i, VoteChoice::ReleaseToDefendant);
        }
        enter_reveal_phase(&fx);
        for i in 0..5 {
            reveal_vote(&fx, i, VoteChoice::ReleaseToDefendant).unwrap();
        }
        // Still far inside the reveal window.
        assert_eq!(
            fx.controller.phase_view(&fx.dispute_id).unwrap().phase,
            Phase::Executable
        );
        let outcome = fx.controller.finalize_ruling(fx.dispute_id).unwrap();
        assert!(matches!(
            outcome,
            RulingOutcome::Resolved {
                ruling: Ruling::ReleaseToDefendant,
                ..
            }
        ));
    }

    #[test]
    fn test_finalize_rejected_while_voting_open() {
        let fx = fixture();
        enter_commit_phase(&fx);
        for i in 0..3 {
            commit_vote(&fx, i, VoteChoice::RefundPlaintiff);
        }
        let err = fx.controller.finalize_ruling(fx.dispute_id).unwrap_err();
        assert!(matches!(
            err,
            DisputeError::WrongPhase {
                expected: Phase::Executable,
                ..
            }
        ));
        enter_reveal_phase(&fx);
        let err = fx.controller.finalize_ruling(fx.dispute_id).unwrap_err();
        assert!(matches!(err, DisputeError::WrongPhase { .. }));
    }

    #[test]
    fn test_finalize_is_not_idempotent() {
        let fx = fixture();
        enter_commit_phase(&fx);
        for i in 0..3 {
            commit_vote(&fx, i, VoteChoice::RefundPlaintiff);
        }
        enter_reveal_phase(&fx);
        for i in 0..3 {
            reveal_vote(&fx, i, VoteChoice::RefundPlaintiff).unwrap();
        }
        pass_reveal_deadline(&fx);
        fx.controller.finalize_ruling(fx.dispute_id).unwrap();

        let err = fx.controller.finalize_ruling(fx.dispute_id).unwrap_err();
        assert!(matches!(
            err,
            DisputeError::WrongPhase {
                actual: Phase::Resolved,
                ..
            }
        ));
    }

    #[test]
    fn test_commit_under_participation_expires() {
        // Fewer commits than quorum: the dispute expires at the commit
        // deadline and finalize persists it.
        let fx = fixture();
        enter_commit_phase(&fx);
        commit_vote(&fx, 0, VoteChoice::RefundPlaintiff);
        commit_vote(&fx, 1, VoteChoice::RefundPlaintiff);
        fx.ledger.advance_to(BlockHeight::new(121));

        assert_eq!(
            fx.controller.phase_view(&fx.dispute_id).unwrap().phase,
            Phase::Expired
        );
        let outcome = fx.controller.finalize_ruling(fx.dispute_id).unwrap();
        assert_eq!(
            outcome,
            RulingOutcome::Expired {
                revealed: 0,
                required: 3
            }
        );
        let record = fx.controller.dispute(&fx.dispute_id).unwrap();
        assert_eq!(record.phase, Phase::Expired);
        assert_eq!(record.ruling, None);

        // Both committed-but-unrevealed ballots were forfeited.
        assert_eq!(fx.hook.forfeited.lock().unwrap().len(), 2);
        // A second finalize is a terminal-phase rejection.
        assert!(matches!(
            fx.controller.finalize_ruling(fx.dispute_id),
            Err(DisputeError::WrongPhase {
                actual: Phase::Expired,
                ..
            })
        ));
    }

    #[test]
    fn test_hook_sees_outcome() {
        let fx = fixture();
        enter_commit_phase(&fx);
        for i in 0..3 {
            commit_vote(&fx, i, VoteChoice::RefundPlaintiff);
        }
        enter_reveal_phase(&fx);
        for i in 0..3 {
            reveal_vote(&fx, i, VoteChoice::RefundPlaintiff).unwrap();
        }
        pass_reveal_deadline(&fx);
        fx.controller.finalize_ruling(fx.dispute_id).unwrap();

        let closed = fx.hook.closed.lock().unwrap();
        assert_eq!(closed.len(), 1);
        assert!(matches!(
            closed[0],
            RulingOutcome::Resolved {
                ruling: Ruling::RefundPlaintiff,
                ..
            }
        ));
    }

    #[test]
    fn test_terminal_record_is_read_only() {
        let fx = fixture();
        enter_commit_phase(&fx);
        for i in 0..3 {
            commit_vote(&fx, i, VoteChoice::RefundPlaintiff);
        }
        enter_reveal_phase(&fx);
        for i in 0..3 {
            reveal_vote(&fx, i, VoteChoice::RefundPlaintiff).unwrap();
        }
        pass_reveal_deadline(&fx);
        fx.controller.finalize_ruling(fx.dispute_id).unwrap();

        // No mutation path accepts a terminal dispute.
        let juror = fx.jurors[3].clone();
        let digest = commit(
            VoteChoice::RefundPlaintiff,
            &salt_for(3),
            &juror,
            &fx.dispute_id,
        );
        assert!(matches!(
            fx.controller.submit_commit(fx.dispute_id, juror, digest),
            Err(DisputeError::WrongPhase { .. })
        ));
        assert!(matches!(
            reveal_vote(&fx, 3, VoteChoice::RefundPlaintiff),
            Err(DisputeError::WrongPhase { .. })
        ));
    }

    #[test]
    fn test_transition_log_records_lifecycle() {
        let fx = fixture();
        enter_commit_phase(&fx);
        for i in 0..3 {
            commit_vote(&fx, i, VoteChoice::RefundPlaintiff);
        }
        enter_reveal_phase(&fx);
        for i in 0..3 {
            reveal_vote(&fx, i, VoteChoice::RefundPlaintiff).unwrap();
        }
        pass_reveal_deadline(&fx);
        fx.controller.finalize_ruling(fx.dispute_id).unwrap();

        let record = fx.controller.dispute(&fx.dispute_id).unwrap();
        let phases: Vec<(Phase, Phase)> = record
            .transitions
            .iter()
            .map(|t| (t.from_phase, t.to_phase))
            .collect();
        assert_eq!(
            phases,
            vec![
                (Phase::Open, Phase::JurorsSelected),
                (Phase::JurorsSelected, Phase::Commit),
                (Phase::Commit, Phase::Reveal),
                (Phase::Reveal, Phase::Resolved),
            ]
        );
    }

    #[test]
    fn test_independent_disputes_do_not_interfere() {
        let ledger = Arc::new(SimulatedLedger::starting_at(BlockHeight::new(10)));
        let controller =
            DisputeLifecycle::new(ProtocolParams::default(), ledger.clone()).unwrap();

        let open = |_: usize| {
            controller
                .open_dispute(
                    OrderId::new(),
                    account("plaintiff"),
                    account("defendant"),
                    EvidenceRef::new("bafy-evidence").unwrap(),
                )
                .unwrap()
        };
        let a = open(0);
        let b = open(1);
        let jurors: Vec<AccountId> = (0..5).map(|i| account(&format!("juror-{i}"))).collect();
        ledger.advance_to(BlockHeight::new(20));
        controller.assign_jurors(a, jurors.clone()).unwrap();
        // `b` keeps its Open phase while `a` moves through its lifecycle.
        ledger.advance_to(BlockHeight::new(21));
        assert_eq!(controller.phase_view(&a).unwrap().phase, Phase::Commit);
        assert_eq!(controller.phase_view(&b).unwrap().phase, Phase::Open);
    }
}
