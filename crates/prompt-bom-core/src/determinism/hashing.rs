//! Deterministic content fingerprints for component bodies.
//!
//! A fingerprint is always rendered as `sha256:<64 lowercase hex>`. The same
//! bytes yield the same string on every platform; the integrity check in the
//! validation pipeline depends on that.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};

use crate::errors::{BomError, BomResult};

/// Prefix carried by every fingerprint string.
pub const FINGERPRINT_PREFIX: &str = "sha256:";

const DIGEST_HEX_LEN: usize = 64;

fn sha256_bytes(bytes: &[u8]) -> [u8; 32] {
    let mut h = Sha256::new();
    h.update(bytes);
    h.finalize().into()
}

/// Fingerprint raw bytes as `sha256:<hex>`.
pub fn compute_fingerprint(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(FINGERPRINT_PREFIX.len() + DIGEST_HEX_LEN);
    out.push_str(FINGERPRINT_PREFIX);
    out.push_str(&hex::encode(sha256_bytes(bytes)));
    out
}

/// A validated `sha256:<hex>` fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Compute the fingerprint of `bytes`.
    pub fn of(bytes: &[u8]) -> Self {
        Self(compute_fingerprint(bytes))
    }

    /// Parse a declared fingerprint, rejecting anything but the canonical form.
    pub fn parse(s: &str) -> BomResult<Self> {
        let digest = s
            .strip_prefix(FINGERPRINT_PREFIX)
            .ok_or_else(|| BomError::InvalidFingerprint {
                input: s.to_string(),
            })?;
        let canonical = digest.len() == DIGEST_HEX_LEN
            && digest
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
        if !canonical {
            return Err(BomError::InvalidFingerprint {
                input: s.to_string(),
            });
        }
        Ok(Self(s.to_string()))
    }

    /// True if `bytes` hash to this fingerprint.
    pub fn matches(&self, bytes: &[u8]) -> bool {
        compute_fingerprint(bytes) == self.0
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Fingerprint {
    type Err = BomError;

    fn from_str(s: &str) -> BomResult<Self> {
        Self::parse(s)
    }
}

impl Serialize for Fingerprint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Fingerprint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
