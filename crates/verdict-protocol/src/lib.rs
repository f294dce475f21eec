//! # verdict-protocol — Dispute Lifecycle for the Verdict Protocol
//!
//! A panel of jurors casts secret votes on the outcome of a disputed
//! marketplace order via a commit-reveal scheme, reveals them for public
//! tallying, and a deterministic ruling is produced under quorum rules.
//! All deadlines are block heights supplied by the hosting ledger.
//!
//! ## Components
//!
//! - [`record`] — the persisted `DisputeRecord` and per-juror
//!   `CommitmentEntry` state.
//! - [`phase`] — the closed `Phase` enum and the `PhaseClock` deriving
//!   the current phase from block heights.
//! - [`tally`] — quorum and strict-majority resolution of revealed
//!   ballots; ties break to a partial refund.
//! - [`lifecycle`] — the `DisputeLifecycle` controller, the sole mutator:
//!   `open_dispute → assign_jurors → submit_commit → submit_reveal →
//!   finalize_ruling`.
//! - [`store`] — in-memory persistence with per-dispute exclusive
//!   critical sections.
//! - [`external`] — trait seams for the Ledger, JurorSelector,
//!   EvidenceStore, Signer, and the host's participation-penalty hook.
//! - [`payload`] — the pure unsigned-payload preparation layer feeding
//!   the external signer.
//! - [`query`] — read-only party and juror views with pending-action
//!   flags.
//!
//! ## Crate Policy
//!
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Every operation reads block height fresh from the ledger; nothing
//!   here consults a wall clock.

pub mod error;
pub mod external;
pub mod lifecycle;
pub mod payload;
pub mod phase;
pub mod query;
pub mod record;
pub mod store;
pub mod tally;

// Re-export primary types for ergonomic imports.
pub use error::DisputeError;
pub use external::{
    EvidenceStore, JurorSelector, Ledger, NoopParticipationHook, ParticipationHook, Signer,
    SimulatedLedger,
};
pub use lifecycle::{DisputeLifecycle, RulingOutcome};
pub use payload::{
    prepare_commit_payload, prepare_finalize_payload, prepare_open_payload,
    prepare_reveal_payload, UnsignedPayload,
};
pub use phase::{Phase, PhaseClock, PhaseView};
pub use query::{DisputeRole, DisputeSummary, JuryDuty};
pub use record::{CommitmentEntry, DisputeRecord, TransitionRecord};
pub use store::DisputeStore;
pub use tally::{resolve, NoQuorum, RevealedVote, RulingVerdict, TallyBreakdown};
