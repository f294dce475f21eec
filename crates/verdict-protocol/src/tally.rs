//! # Vote Tally and Ruling Resolution
//!
//! Aggregates revealed ballots into a ruling under quorum and strict-
//! majority rules.
//!
//! ## Rules
//!
//! - Fewer reveals than the quorum → [`NoQuorum`]. Not an exceptional
//!   failure: the lifecycle controller turns it into the terminal
//!   Expired phase and it is never retried.
//! - Strictly more reveals for one ballot option → that option's ruling.
//! - An exact tie → [`Ruling::PartialRefund`], the designated tie-break
//!   outcome; the split ratio is carried in the protocol parameters.
//! - Committed-but-unrevealed ballots are forfeited entirely. They are
//!   not abstentions and never count for either side.
//!
//! The resolver only counts — the same multiset of reveals produces the
//! same ruling in any arrival order.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use verdict_core::{AccountId, ErrorClass, ProtocolParams, Ruling, VoteChoice};

/// One verified reveal: a juror and their ballot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealedVote {
    /// The revealing juror.
    pub juror: AccountId,
    /// The revealed ballot.
    pub choice: VoteChoice,
}

/// Per-option reveal counts backing a ruling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TallyBreakdown {
    /// Reveals for refunding the plaintiff.
    pub refund_plaintiff: u32,
    /// Reveals for releasing to the defendant.
    pub release_to_defendant: u32,
}

impl TallyBreakdown {
    /// Count the reveals per ballot option.
    pub fn count(votes: &[RevealedVote]) -> Self {
        let mut refund_plaintiff = 0;
        let mut release_to_defendant = 0;
        for vote in votes {
            match vote.choice {
                VoteChoice::RefundPlaintiff => refund_plaintiff += 1,
                VoteChoice::ReleaseToDefendant => release_to_defendant += 1,
            }
        }
        Self {
            refund_plaintiff,
            release_to_defendant,
        }
    }

    /// Total number of reveals counted.
    pub fn revealed(&self) -> u32 {
        self.refund_plaintiff + self.release_to_defendant
    }
}

/// A ruling together with the counts that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulingVerdict {
    /// The resolved outcome.
    pub ruling: Ruling,
    /// The per-option counts behind it.
    pub breakdown: TallyBreakdown,
}

/// Reveal participation fell below the quorum.
///
/// A valid terminal outcome (the dispute expires), classed as
/// `Resolution` in the error taxonomy.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("quorum not reached: {revealed} of {required} required reveals")]
pub struct NoQuorum {
    /// Reveals actually received.
    pub revealed: u32,
    /// Minimum reveals required.
    pub required: u32,
}

impl NoQuorum {
    /// The taxonomy class of this outcome.
    pub fn class(&self) -> ErrorClass {
        ErrorClass::Resolution
    }
}

/// Resolve a ruling from revealed ballots.
///
/// Order-independent: only the multiset of choices matters.
pub fn resolve(votes: &[RevealedVote], params: &ProtocolParams) -> Result<RulingVerdict, NoQuorum> {
    let breakdown = TallyBreakdown::count(votes);
    let revealed = breakdown.revealed();
    if (revealed as usize) < params.quorum {
        return Err(NoQuorum {
            revealed,
            required: params.quorum as u32,
        });
    }

    let ruling = match breakdown
        .refund_plaintiff
        .cmp(&breakdown.release_to_defendant)
    {
        std::cmp::Ordering::Greater => Ruling::RefundPlaintiff,
        std::cmp::Ordering::Less => Ruling::ReleaseToDefendant,
        std::cmp::Ordering::Equal => Ruling::PartialRefund,
    };

    Ok(RulingVerdict { ruling, breakdown })
}
