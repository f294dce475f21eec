//! # Vote Commitments
//!
//! Implements the commit half of the commit-reveal ballot: a SHA-256
//! digest over `(choice, salt, juror, dispute)` that is binding (the
//! juror cannot change the ballot after committing) and hiding (the
//! digest reveals nothing about the ballot while the salt is secret).
//!
//! ## Preimage Layout
//!
//! ```text
//! "verdict/vote-commitment/v1" ‖ choice_tag:u8
//!     ‖ salt_len:u16le ‖ salt ‖ juror_len:u16le ‖ juror ‖ dispute_id:16B
//! ```
//!
//! Variable-length fields carry length prefixes, so distinct tuples can
//! never serialize to the same bytes. Binding the juror and dispute id
//! into the hash prevents a commitment from being replayed by another
//! juror or against another dispute.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use thiserror::Error;

use verdict_core::hex::{from_hex_array, to_hex};
use verdict_core::{AccountId, DisputeId, ErrorClass, VoteChoice};

/// Domain-separation tag prefixed to every commitment preimage.
///
/// Versioned so a future preimage layout cannot collide with this one.
const DOMAIN_TAG: &[u8] = b"verdict/vote-commitment/v1";

/// Minimum salt length in bytes.
///
/// Protocol constant, not configuration: anything shorter makes the
/// two-valued ballot brute-forceable before reveal.
pub const MIN_SALT_LEN: usize = 16;

/// Length of salts produced by [`VoteSalt::generate()`].
pub const GENERATED_SALT_LEN: usize = 32;

/// Errors produced by the commitment engine.
#[derive(Error, Debug)]
pub enum CommitmentError {
    /// Salt is below the minimum entropy length.
    #[error("salt too short: {0} bytes (min {MIN_SALT_LEN})")]
    SaltTooShort(usize),

    /// A digest string could not be parsed as 32 hex-encoded bytes.
    #[error("invalid commitment digest hex: {0}")]
    InvalidDigestHex(String),

    /// A salt string could not be parsed as hex bytes.
    #[error("invalid salt hex: {0}")]
    InvalidSaltHex(String),
}

impl CommitmentError {
    /// The taxonomy class of this error.
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::SaltTooShort(_) | Self::InvalidDigestHex(_) | Self::InvalidSaltHex(_) => {
                ErrorClass::Validation
            }
        }
    }
}

// ─── Salt ────────────────────────────────────────────────────────────

/// A juror's secret salt.
///
/// The sole unlinking secret between a commitment digest and the ballot
/// it hides. Constructed only through [`VoteSalt::new()`], which enforces
/// the minimum length, or [`VoteSalt::generate()`].
///
/// Does not implement `Serialize` wholesale — salts cross the boundary
/// only inside a reveal payload, explicitly hex-encoded there. `Debug`
/// prints the length, never the bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct VoteSalt(Vec<u8>);

impl VoteSalt {
    /// Construct a salt from raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CommitmentError::SaltTooShort`] for inputs under
    /// [`MIN_SALT_LEN`] bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, CommitmentError> {
        let bytes = bytes.into();
        if bytes.len() < MIN_SALT_LEN {
            return Err(CommitmentError::SaltTooShort(bytes.len()));
        }
        Ok(Self(bytes))
    }

    /// Generate a fresh random salt of [`GENERATED_SALT_LEN`] bytes.
    pub fn generate() -> Self {
        use rand::RngCore;
        let mut bytes = vec![0u8; GENERATED_SALT_LEN];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// The salt bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Render the salt as lowercase hex, for reveal payloads.
    pub fn to_hex(&self) -> String {
        to_hex(&self.0)
    }

    /// Parse a salt from the hex form used in reveal payloads.
    pub fn from_hex(hex: &str) -> Result<Self, CommitmentError> {
        let bytes = verdict_core::hex::from_hex(hex)
            .map_err(|e| CommitmentError::InvalidSaltHex(e.to_string()))?;
        Self::new(bytes)
    }
}

impl std::fmt::Debug for VoteSalt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "VoteSalt({} bytes)", self.0.len())
    }
}

// ─── Preimage ────────────────────────────────────────────────────────

/// The exact byte sequence a commitment digest is computed over.
///
/// The private inner buffer and sole constructor guarantee every digest
/// in the system is computed over the documented layout — there is no way
/// to hash anything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitmentPreimage(Vec<u8>);

impl CommitmentPreimage {
    /// Assemble the preimage for one `(choice, salt, juror, dispute)` tuple.
    pub fn new(
        choice: VoteChoice,
        salt: &VoteSalt,
        juror: &AccountId,
        dispute_id: &DisputeId,
    ) -> Self {
        let salt_bytes = salt.as_bytes();
        let juror_bytes = juror.as_bytes();
        let mut buf = Vec::with_capacity(
            DOMAIN_TAG.len() + 1 + 2 + salt_bytes.len() + 2 + juror_bytes.len() + 16,
        );
        buf.extend_from_slice(DOMAIN_TAG);
        buf.push(choice.wire_tag());
        // AccountId and VoteSalt constructors cap both lengths well below
        // u16::MAX, so the casts are lossless.
        buf.extend_from_slice(&(salt_bytes.len() as u16).to_le_bytes());
        buf.extend_from_slice(salt_bytes);
        buf.extend_from_slice(&(juror_bytes.len() as u16).to_le_bytes());
        buf.extend_from_slice(juror_bytes);
        buf.extend_from_slice(dispute_id.as_bytes());
        Self(buf)
    }

    /// The preimage bytes, for digest computation.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

// ─── Digest ──────────────────────────────────────────────────────────

/// A 32-byte vote commitment digest.
///
/// Serializes as a lowercase hex string at the wire boundary. Equality
/// through `==` is NOT constant-time; commitment checks must go through
/// [`verify()`] or [`CommitmentDigest::ct_eq()`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommitmentDigest(pub [u8; 32]);

impl CommitmentDigest {
    /// The raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Render the digest as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        to_hex(&self.0)
    }

    /// Parse a digest from a 64-character hex string.
    pub fn from_hex(hex: &str) -> Result<Self, CommitmentError> {
        from_hex_array::<32>(hex.trim())
            .map(Self)
            .map_err(|e| CommitmentError::InvalidDigestHex(e.to_string()))
    }

    /// Constant-time equality against another digest.
    pub fn ct_eq(&self, other: &CommitmentDigest) -> bool {
        bool::from(self.0.as_slice().ct_eq(other.0.as_slice()))
    }
}

impl std::fmt::Display for CommitmentDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for CommitmentDigest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for CommitmentDigest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Self::from_hex(&hex).map_err(serde::de::Error::custom)
    }
}

// ─── Engine ──────────────────────────────────────────────────────────

/// Compute the commitment digest for a ballot.
///
/// Deterministic SHA-256 over the [`CommitmentPreimage`] layout. The salt
/// is consumed by reference and never retained.
pub fn commit(
    choice: VoteChoice,
    salt: &VoteSalt,
    juror: &AccountId,
    dispute_id: &DisputeId,
) -> CommitmentDigest {
    let preimage = CommitmentPreimage::new(choice, salt, juror, dispute_id);
    let hash = Sha256::digest(preimage.as_bytes());
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&hash);
    CommitmentDigest(bytes)
}

/// Verify a revealed ballot against a previously submitted digest.
///
/// Recomputes the commitment for the revealed tuple and compares in
/// constant time. `false` means the reveal does not match — either the
/// ballot, the salt, the juror, or the dispute differs.
pub fn verify(
    digest: &CommitmentDigest,
    choice: VoteChoice,
    salt: &VoteSalt,
    juror: &AccountId,
    dispute_id: &DisputeId,
) -> bool {
    commit(choice, salt, juror, dispute_id).ct_eq(digest)
}
