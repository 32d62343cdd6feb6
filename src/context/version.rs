//! Protocol version table.
//!
//! Versions before 1.0 use the four-part `0.x.y.z` form; later releases use `x.y.z`.
//! Only released versions are accepted so a typo cannot select an unknown dialect.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Released broker versions, oldest first.
const KNOWN_VERSIONS: &[[u16; 4]] = &[
    [0, 8, 2, 0],
    [0, 8, 2, 1],
    [0, 8, 2, 2],
    [0, 9, 0, 0],
    [0, 9, 0, 1],
    [0, 10, 0, 0],
    [0, 10, 0, 1],
    [0, 10, 1, 0],
    [0, 10, 1, 1],
    [0, 10, 2, 0],
    [0, 10, 2, 1],
    [0, 10, 2, 2],
    [0, 11, 0, 0],
    [0, 11, 0, 1],
    [0, 11, 0, 2],
    [1, 0, 0, 0],
    [1, 0, 1, 0],
    [1, 0, 2, 0],
    [1, 1, 0, 0],
    [1, 1, 1, 0],
    [2, 0, 0, 0],
    [2, 0, 1, 0],
    [2, 1, 0, 0],
    [2, 1, 1, 0],
    [2, 2, 0, 0],
    [2, 2, 1, 0],
    [2, 2, 2, 0],
    [2, 3, 0, 0],
    [2, 3, 1, 0],
    [2, 4, 0, 0],
    [2, 4, 1, 0],
    [2, 5, 0, 0],
    [2, 5, 1, 0],
    [2, 6, 0, 0],
    [2, 6, 1, 0],
    [2, 6, 2, 0],
    [2, 6, 3, 0],
    [2, 7, 0, 0],
    [2, 7, 1, 0],
    [2, 7, 2, 0],
    [2, 8, 0, 0],
    [2, 8, 1, 0],
    [2, 8, 2, 0],
    [3, 0, 0, 0],
    [3, 0, 1, 0],
    [3, 0, 2, 0],
    [3, 1, 0, 0],
    [3, 1, 1, 0],
    [3, 1, 2, 0],
    [3, 2, 0, 0],
    [3, 2, 1, 0],
    [3, 2, 2, 0],
    [3, 2, 3, 0],
    [3, 3, 0, 0],
    [3, 3, 1, 0],
    [3, 3, 2, 0],
    [3, 4, 0, 0],
    [3, 4, 1, 0],
    [3, 5, 0, 0],
    [3, 5, 1, 0],
    [3, 5, 2, 0],
    [3, 6, 0, 0],
    [3, 6, 1, 0],
    [3, 6, 2, 0],
    [3, 7, 0, 0],
    [3, 7, 1, 0],
    [3, 7, 2, 0],
    [3, 8, 0, 0],
    [3, 8, 1, 0],
    [3, 9, 0, 0],
    [3, 9, 1, 0],
    [4, 0, 0, 0],
    [4, 1, 0, 0],
];

/// A broker protocol version taken from the known table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KafkaVersion([u16; 4]);

impl KafkaVersion {
    /// Oldest version in the table.
    pub fn oldest() -> Self {
        KafkaVersion(KNOWN_VERSIONS[0])
    }

    /// Newest version in the table.
    pub fn newest() -> Self {
        KafkaVersion(KNOWN_VERSIONS[KNOWN_VERSIONS.len() - 1])
    }

    pub fn known() -> impl Iterator<Item = KafkaVersion> {
        KNOWN_VERSIONS.iter().copied().map(KafkaVersion)
    }

    pub fn parts(&self) -> [u16; 4] {
        self.0
    }

    /// Brokers older than 0.10.0.0 do not answer ApiVersions.
    pub fn supports_api_versions(&self) -> bool {
        self.0 >= [0, 10, 0, 0]
    }
}

/// Version string that is not in the table or not in either accepted shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionParseError(String);

impl fmt::Display for VersionParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid version '{}': expected a released version such as 0.10.2.1 or 2.8.0 (supported {} to {})",
            self.0,
            KafkaVersion::oldest(),
            KafkaVersion::newest()
        )
    }
}

impl std::error::Error for VersionParseError {}

impl FromStr for KafkaVersion {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let err = || VersionParseError(raw.to_string());

        let numbers = raw
            .split('.')
            .map(|p| {
                if p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit()) {
                    None
                } else {
                    p.parse::<u16>().ok()
                }
            })
            .collect::<Option<Vec<u16>>>()
            .ok_or_else(err)?;

        let parts = match numbers.as_slice() {
            [0, b, c, d] => [0, *b, *c, *d],
            [a, b, c] if *a >= 1 => [*a, *b, *c, 0],
            _ => return Err(err()),
        };

        if KNOWN_VERSIONS.contains(&parts) {
            Ok(KafkaVersion(parts))
        } else {
            Err(err())
        }
    }
}

impl fmt::Display for KafkaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.0;
        if a == 0 {
            write!(f, "0.{}.{}.{}", b, c, d)
        } else {
            write!(f, "{}.{}.{}", a, b, c)
        }
    }
}

impl Serialize for KafkaVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for KafkaVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
