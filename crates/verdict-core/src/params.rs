//! # Protocol Parameters
//!
//! Defines `ProtocolParams`, the validated configuration for a dispute
//! tribunal: panel size, quorum, phase windows, and the tie-break refund
//! split policy.
//!
//! ## Design
//!
//! Parameters are deserialized from a config file (the CLI accepts YAML)
//! or built in code, then passed through [`ProtocolParams::validate()`]
//! before any dispute is opened against them. An inconsistent parameter
//! set (quorum larger than the panel, zero-length windows) is a
//! construction-time rejection, not a runtime surprise.

use serde::{Deserialize, Serialize};

use crate::error::ParamsError;

/// Default number of jurors on a dispute panel.
pub const DEFAULT_PANEL_SIZE: usize = 5;

/// Default minimum number of reveals required for a ruling.
pub const DEFAULT_QUORUM: usize = 3;

/// Default commit-phase window, in blocks.
pub const DEFAULT_COMMIT_WINDOW: u64 = 100;

/// Default reveal-phase window, in blocks.
pub const DEFAULT_REVEAL_WINDOW: u64 = 100;

/// Default tie-break split: basis points refunded to the plaintiff.
pub const DEFAULT_PARTIAL_REFUND_PLAINTIFF_BPS: u16 = 5_000;

/// Validated tribunal configuration.
///
/// The split policy is advisory data: the core never moves funds, it
/// records the policy under which a `PartialRefund` ruling was produced
/// so the settlement layer can apply it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProtocolParams {
    /// Number of jurors assigned to each dispute (N).
    pub panel_size: usize,
    /// Minimum reveals required before a ruling may be computed (M).
    pub quorum: usize,
    /// Length of the commit phase, in blocks.
    pub commit_window: u64,
    /// Length of the reveal phase, in blocks.
    pub reveal_window: u64,
    /// Basis points of the escrowed amount refunded to the plaintiff
    /// under a tie-break `PartialRefund` ruling.
    pub partial_refund_plaintiff_bps: u16,
}

impl Default for ProtocolParams {
    fn default() -> Self {
        Self {
            panel_size: DEFAULT_PANEL_SIZE,
            quorum: DEFAULT_QUORUM,
            commit_window: DEFAULT_COMMIT_WINDOW,
            reveal_window: DEFAULT_REVEAL_WINDOW,
            partial_refund_plaintiff_bps: DEFAULT_PARTIAL_REFUND_PLAINTIFF_BPS,
        }
    }
}

impl ProtocolParams {
    /// Validate internal consistency.
    ///
    /// # Errors
    ///
    /// Rejects an empty panel, a zero quorum, a quorum larger than the
    /// panel, zero-length phase windows, and a refund split above
    /// 10 000 bps.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.panel_size == 0 {
            return Err(ParamsError::EmptyPanel(self.panel_size));
        }
        if self.quorum == 0 {
            return Err(ParamsError::ZeroQuorum(self.quorum));
        }
        if self.quorum > self.panel_size {
            return Err(ParamsError::QuorumExceedsPanel {
                quorum: self.quorum,
                panel_size: self.panel_size,
            });
        }
        if self.commit_window == 0 {
            return Err(ParamsError::EmptyWindow {
                window: "commit",
                blocks: self.commit_window,
            });
        }
        if self.reveal_window == 0 {
            return Err(ParamsError::EmptyWindow {
                window: "reveal",
                blocks: self.reveal_window,
            });
        }
        if self.partial_refund_plaintiff_bps > 10_000 {
            return Err(ParamsError::SplitOutOfRange(
                self.partial_refund_plaintiff_bps,
            ));
        }
        Ok(())
    }
}
