//! # Vote Choices and Rulings — Single Source of Truth
//!
//! Defines the `VoteChoice` and `Ruling` enums. These are the ONE
//! definition used across the entire workspace. Every `match` on them
//! must be exhaustive — adding an outcome forces every consumer to
//! handle it at compile time.
//!
//! ## Security Invariant
//!
//! A juror's ballot and the final ruling were historically loose string
//! tags compared ad hoc in multiple places. Closed enums make a silent
//! tag mismatch impossible, and the one-byte wire tag on `VoteChoice` is
//! the exact value bound into commitment preimages — there is no second
//! encoding to drift out of sync.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Error parsing a choice or ruling from its string identifier.
#[derive(Error, Debug)]
#[error("unknown {kind}: {value:?}")]
pub struct UnknownTagError {
    /// What was being parsed ("vote choice" or "ruling").
    pub kind: &'static str,
    /// The unrecognized input.
    pub value: String,
}

/// A juror's ballot: which party should receive the escrowed funds.
///
/// The wire tag is stable protocol data — it is the first byte of every
/// commitment preimage and must never be renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteChoice {
    /// Refund the escrowed amount to the plaintiff.
    RefundPlaintiff,
    /// Release the escrowed amount to the defendant.
    ReleaseToDefendant,
}

impl VoteChoice {
    /// Both ballot options, in wire-tag order.
    pub fn all() -> &'static [VoteChoice] {
        &[Self::RefundPlaintiff, Self::ReleaseToDefendant]
    }

    /// The one-byte wire tag bound into commitment preimages.
    pub fn wire_tag(&self) -> u8 {
        match self {
            Self::RefundPlaintiff => 0,
            Self::ReleaseToDefendant => 1,
        }
    }

    /// Parse a wire tag back into a choice.
    pub fn from_wire_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Self::RefundPlaintiff),
            1 => Some(Self::ReleaseToDefendant),
            _ => None,
        }
    }

    /// The snake_case string identifier, matching the serde format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RefundPlaintiff => "refund_plaintiff",
            Self::ReleaseToDefendant => "release_to_defendant",
        }
    }
}

impl std::fmt::Display for VoteChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VoteChoice {
    type Err = UnknownTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "refund_plaintiff" => Ok(Self::RefundPlaintiff),
            "release_to_defendant" => Ok(Self::ReleaseToDefendant),
            other => Err(UnknownTagError {
                kind: "vote choice",
                value: other.to_string(),
            }),
        }
    }
}

/// The final outcome applied to the disputed order's escrowed funds.
///
/// `PartialRefund` is the designated tie-break outcome; the split ratio
/// is policy data carried in the protocol parameters, not encoded here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ruling {
    /// Refund the escrowed amount to the plaintiff.
    RefundPlaintiff,
    /// Release the escrowed amount to the defendant.
    ReleaseToDefendant,
    /// Split the escrowed amount between the parties.
    PartialRefund,
}

impl Ruling {
    /// The snake_case string identifier, matching the serde format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RefundPlaintiff => "refund_plaintiff",
            Self::ReleaseToDefendant => "release_to_defendant",
            Self::PartialRefund => "partial_refund",
        }
    }
}

impl std::fmt::Display for Ruling {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Ruling {
    type Err = UnknownTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "refund_plaintiff" => Ok(Self::RefundPlaintiff),
            "release_to_defendant" => Ok(Self::ReleaseToDefendant),
            "partial_refund" => Ok(Self::PartialRefund),
            other => Err(UnknownTagError {
                kind: "ruling",
                value: other.to_string(),
            }),
        }
    }
}

impl From<VoteChoice> for Ruling {
    /// A unanimous-or-majority choice maps directly onto a ruling.
    fn from(choice: VoteChoice) -> Self {
        match choice {
            VoteChoice::RefundPlaintiff => Self::RefundPlaintiff,
            VoteChoice::ReleaseToDefendant => Self::ReleaseToDefendant,
        }
    }
}
