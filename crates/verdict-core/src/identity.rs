//! # Domain Identity Newtypes
//!
//! Newtype wrappers for all domain identifiers in the Verdict Protocol.
//! These prevent accidental identifier confusion — you cannot pass an
//! `OrderId` where a `DisputeId` is expected, and a juror address cannot
//! silently stand in for an evidence reference.
//!
//! ## Security Invariant
//!
//! Type-level distinction between identifier namespaces prevents
//! cross-namespace confusion attacks where an attacker substitutes one
//! kind of identifier for another. `DisputeId` additionally feeds the
//! vote-commitment preimage, so its byte representation is fixed (the
//! 16 raw UUID bytes) and never derived from a display string.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Maximum accepted length for an account identifier, in bytes.
pub const MAX_ACCOUNT_ID_LEN: usize = 128;

/// Maximum accepted length for an evidence reference, in bytes.
pub const MAX_EVIDENCE_REF_LEN: usize = 64;

/// Errors produced by identifier constructors.
#[derive(Error, Debug)]
pub enum IdentityError {
    /// Account identifier is empty or whitespace-only.
    #[error("account id must not be empty")]
    EmptyAccountId,

    /// Account identifier exceeds the maximum length.
    #[error("account id too long: {0} bytes (max {MAX_ACCOUNT_ID_LEN})")]
    AccountIdTooLong(usize),

    /// Account identifier contains whitespace or control characters.
    #[error("account id contains whitespace or control characters: {0:?}")]
    InvalidAccountId(String),

    /// Evidence reference is empty.
    #[error("evidence reference must not be empty")]
    EmptyEvidenceRef,

    /// Evidence reference exceeds the maximum length.
    #[error("evidence reference too long: {0} bytes (max {MAX_EVIDENCE_REF_LEN})")]
    EvidenceRefTooLong(usize),
}

/// Unique identifier for a dispute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DisputeId(pub Uuid);

/// Unique identifier for a marketplace order under dispute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrderId(pub Uuid);

impl DisputeId {
    /// Generate a new random dispute identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// The 16 raw UUID bytes, as bound into vote-commitment preimages.
    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }
}

impl Default for DisputeId {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderId {
    /// Generate a new random order identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for OrderId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DisputeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "dispute:{}", self.0)
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order:{}", self.0)
    }
}

/// An on-ledger account identity: a party to a dispute or a juror.
///
/// The protocol treats addresses as opaque strings supplied by the hosting
/// ledger. The constructor rejects empty, oversized, and
/// whitespace-containing values; beyond that, address format is the
/// ledger's concern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    /// Construct an account identifier, validating shape.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, longer than
    /// [`MAX_ACCOUNT_ID_LEN`] bytes, or contains whitespace or control
    /// characters.
    pub fn new(raw: impl Into<String>) -> Result<Self, IdentityError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(IdentityError::EmptyAccountId);
        }
        if raw.len() > MAX_ACCOUNT_ID_LEN {
            return Err(IdentityError::AccountIdTooLong(raw.len()));
        }
        if raw.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(IdentityError::InvalidAccountId(raw));
        }
        Ok(Self(raw))
    }

    /// The address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The address bytes, as bound into vote-commitment preimages.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// An opaque content-addressed evidence reference.
///
/// The protocol stores and passes the reference only; resolving it to
/// bytes is the evidence store's job, and interpreting those bytes is
/// nobody's job here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EvidenceRef(String);

impl EvidenceRef {
    /// Construct an evidence reference, validating shape.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty or longer than
    /// [`MAX_EVIDENCE_REF_LEN`] bytes.
    pub fn new(raw: impl Into<String>) -> Result<Self, IdentityError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(IdentityError::EmptyEvidenceRef);
        }
        if raw.len() > MAX_EVIDENCE_REF_LEN {
            return Err(IdentityError::EvidenceRefTooLong(raw.len()));
        }
        Ok(Self(raw))
    }

    /// The reference string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EvidenceRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
