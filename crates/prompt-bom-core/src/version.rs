//! Version helpers.
//!
//! Component and BOM versions are strict semantic versions
//! (`MAJOR.MINOR.PATCH[-PRERELEASE][+BUILD]`). Parsing never coerces: `v1.2.3`,
//! `1.2` and `01.2.3` are all rejected.
//!
//! Ordering follows semver precedence. Build metadata is ignored for both
//! ordering and equality, so `1.0.0+a == 1.0.0+b`.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use semver::Version;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::{BomError, BomResult};

/// Known manifest schema versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaVersion {
    V1,
}

impl SchemaVersion {
    /// Parse a `schema_version` value (e.g. "1.0.0").
    pub fn parse(s: &str) -> BomResult<Self> {
        let v = BomVersion::parse(s)?;
        match v.major() {
            1 => Ok(Self::V1),
            _ => Err(BomError::InvalidVersion {
                input: s.to_string(),
                reason: "unsupported schema_version".to_string(),
            }),
        }
    }

    /// Return the canonical string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::V1 => "1.0.0",
        }
    }
}

/// A strictly parsed semantic version.
#[derive(Debug, Clone)]
pub struct BomVersion(Version);

impl BomVersion {
    pub fn parse(s: &str) -> BomResult<Self> {
        Version::parse(s)
            .map(Self)
            .map_err(|e| BomError::InvalidVersion {
                input: s.to_string(),
                reason: e.to_string(),
            })
    }

    pub fn major(&self) -> u64 {
        self.0.major
    }

    pub fn minor(&self) -> u64 {
        self.0.minor
    }

    pub fn patch(&self) -> u64 {
        self.0.patch
    }

    pub fn is_prerelease(&self) -> bool {
        !self.0.pre.is_empty()
    }

    pub fn build(&self) -> &str {
        self.0.build.as_str()
    }
}

impl PartialEq for BomVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for BomVersion {}

impl PartialOrd for BomVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BomVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a, b) = (&self.0, &other.0);
        (a.major, a.minor, a.patch)
            .cmp(&(b.major, b.minor, b.patch))
            .then_with(|| match (a.pre.is_empty(), b.pre.is_empty()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) => a.pre.cmp(&b.pre),
            })
    }
}

impl fmt::Display for BomVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for BomVersion {
    type Err = BomError;

    fn from_str(s: &str) -> BomResult<Self> {
        Self::parse(s)
    }
}

impl Serialize for BomVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for BomVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
