//! Schema epochs.
//!
//! Fields can only be loaded from the active ACF major version, so the
//! database version is stored once per major: ACF 4 sites and ACF 5 sites
//! keep independent watermarks.

use anyhow::{Context, Result};
use semver::Version;
use serde::{Deserialize, Serialize};

/// Prefix of the option key holding the database version.
pub const VERSION_KEY_PREFIX: &str = "acf_vf_db_version_v";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SchemaEpoch {
    V4,
    V5,
}

impl SchemaEpoch {
    /// Epoch for an ACF version string such as `4.4.12` or `5.3.2.2`.
    ///
    /// Anything below `5.0` belongs to ACF 4.
    pub fn from_acf_version(version: &str) -> Result<Self> {
        let parsed = parse_lenient(version)
            .with_context(|| format!("Invalid ACF version: {:?}", version))?;
        if parsed < Version::new(5, 0, 0) {
            Ok(SchemaEpoch::V4)
        } else {
            Ok(SchemaEpoch::V5)
        }
    }

    pub fn major(self) -> u8 {
        match self {
            SchemaEpoch::V4 => 4,
            SchemaEpoch::V5 => 5,
        }
    }

    /// Option key storing this epoch's watermark.
    pub fn version_key(self) -> String {
        format!("{}{}", VERSION_KEY_PREFIX, self.major())
    }
}

impl std::fmt::Display for SchemaEpoch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ACF {}", self.major())
    }
}

/// WordPress-style versions have one to four numeric parts, may carry
/// leading zeros (`4.04`) and have no pre-release syntax. Each part is read
/// as a number and only the first three are kept.
fn parse_lenient(version: &str) -> Result<Version> {
    let mut parts = version
        .trim()
        .split('.')
        .take(3)
        .map(|p| {
            let digits: String = p.chars().take_while(|c| c.is_ascii_digit()).collect();
            if digits.is_empty() {
                anyhow::bail!("non-numeric component {:?}", p);
            }
            Ok(digits.parse::<u64>()?)
        })
        .collect::<Result<Vec<_>>>()?;
    parts.resize(3, 0);
    Ok(Version::new(parts[0], parts[1], parts[2]))
}
