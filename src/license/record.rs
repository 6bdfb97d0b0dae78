//! License records as reported by the GitHub CLI
//!
//! The same JSON shape is used for `gh repo view --json` output and for
//! each line of the persistent cache file:
//!
//! ```json
//! {"nameWithOwner":"org/a","url":"https://github.com/org/a","licenseInfo":{"key":"mit","name":"MIT License"}}
//! ```
//!
//! Missing or `null` fields decode as empty strings.

use crate::error::OutboundResult;
use serde::{Deserialize, Deserializer, Serialize};

/// Placeholder key and name carried by a failed lookup
pub const UNKNOWN: &str = "UNKNOWN";

/// License identifier and display name reported for a repository
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseInfo {
    /// GitHub license key (e.g. `mit`), empty when the repository has none
    #[serde(default, deserialize_with = "null_as_default")]
    pub key: String,

    /// Human-readable license name
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

/// License lookup result for one repository
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseResult {
    /// Repository identifier in `owner/name` form
    #[serde(rename = "nameWithOwner", default, deserialize_with = "null_as_default")]
    pub repo: String,

    /// Repository URL
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,

    /// License reported for the repository
    #[serde(rename = "licenseInfo", default, deserialize_with = "null_as_default")]
    pub info: LicenseInfo,
}

impl LicenseResult {
    /// Build the placeholder returned when a lookup fails.
    ///
    /// Never written to the cache.
    pub fn unknown(repo: impl Into<String>) -> Self {
        Self {
            repo: repo.into(),
            url: String::new(),
            info: LicenseInfo {
                key: UNKNOWN.to_string(),
                name: UNKNOWN.to_string(),
            },
        }
    }

    /// Decode one self-contained JSON record
    pub fn from_json(bytes: &[u8]) -> OutboundResult<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Encode as one compact JSON line (without the trailing newline)
    pub fn to_json_line(&self) -> OutboundResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
