//! # verdict-core — Foundational Types for the Verdict Protocol
//!
//! This crate is the bedrock of the Verdict Protocol workspace. It defines
//! the type-system primitives that enforce correctness guarantees at compile
//! time. Every other crate in the workspace depends on `verdict-core`; it
//! depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** `DisputeId`, `OrderId`,
//!    `AccountId`, `EvidenceRef`, `BlockHeight` — all newtypes with validated
//!    constructors. No bare strings or bare integers for identifiers.
//!
//! 2. **Block height is the only clock.** There is no wall-clock type in the
//!    workspace. Every deadline is a `BlockHeight`, read fresh from the
//!    hosting ledger, so phase arithmetic stays reproducible under replay.
//!
//! 3. **Closed sum types for ballots and rulings.** `VoteChoice` and
//!    `Ruling` are the single definitions used across the workspace, with
//!    exhaustive `match` everywhere. The one-byte wire tag on `VoteChoice`
//!    is the same value bound into commitment preimages.
//!
//! 4. **Validated protocol parameters.** Panel size, quorum, and phase
//!    windows are carried in `ProtocolParams`, rejected at construction if
//!    inconsistent. No magic numbers scattered across call sites.
//!
//! 5. **One error taxonomy.** Every protocol failure maps to an
//!    [`ErrorClass`], so hosting systems can route rejections without
//!    matching on individual variants.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `verdict-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement
//!   `Serialize`/`Deserialize` where they cross a wire boundary.

pub mod block;
pub mod choice;
pub mod error;
pub mod hex;
pub mod identity;
pub mod params;

// Re-export primary types for ergonomic imports.
pub use block::BlockHeight;
pub use choice::{Ruling, VoteChoice};
pub use error::{ErrorClass, ParamsError};
pub use identity::{AccountId, DisputeId, EvidenceRef, IdentityError, OrderId};
pub use params::ProtocolParams;
