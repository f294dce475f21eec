//! # verdict-crypto — Vote Commitment Engine
//!
//! Pure hashing and verification of juror vote commitments. A commitment
//! binds a juror's secret ballot to a salt, the juror's own identity, and
//! the dispute, so that the digest reveals nothing before the reveal phase
//! and cannot be replayed by another juror or against another dispute.
//!
//! ## Security Invariants
//!
//! - Commitment digests can only be computed from a [`CommitmentPreimage`],
//!   whose sole constructor produces an unambiguous, length-prefixed byte
//!   layout. No code path can hash a hand-assembled byte soup.
//! - Salts below [`commitment::MIN_SALT_LEN`] bytes are rejected at
//!   construction, blocking pre-reveal brute-force recovery of the ballot.
//! - Verification recomputes and compares in constant time
//!   (`subtle::ConstantTimeEq`).
//! - The engine never stores a salt. The salt is the juror's secret and
//!   lives with them until reveal.
//!
//! ## Crate Policy
//!
//! - Pure and side-effect-free: no storage, no clock, no I/O.
//! - No `unsafe` code, no `panic!()`/`.unwrap()` outside tests.

pub mod commitment;

pub use commitment::{
    commit, verify, CommitmentDigest, CommitmentError, CommitmentPreimage, VoteSalt,
};
