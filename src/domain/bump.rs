//! Bump engine: proposes the next version from the current one.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::version::SemanticVersion;
use crate::error::SemtagError;

/// Which field of the current version gets incremented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BumpStrategy {
    Major,
    Minor,
    #[default]
    Patch,
}

impl FromStr for BumpStrategy {
    type Err = SemtagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "major" => Ok(BumpStrategy::Major),
            "minor" => Ok(BumpStrategy::Minor),
            "patch" => Ok(BumpStrategy::Patch),
            other => Err(SemtagError::config(format!(
                "Unknown bump strategy '{}' - expected major, minor or patch",
                other
            ))),
        }
    }
}

impl fmt::Display for BumpStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BumpStrategy::Major => write!(f, "major"),
            BumpStrategy::Minor => write!(f, "minor"),
            BumpStrategy::Patch => write!(f, "patch"),
        }
    }
}

/// Compute the proposed version.
///
/// With no current version the result is always `1.0.0`. Otherwise the field
/// selected by `strategy` is incremented, lower fields are zeroed and any
/// prerelease or build metadata is dropped:
/// - **Major**: `1.2.3` -> `2.0.0`
/// - **Minor**: `1.2.3` -> `1.3.0`
/// - **Patch**: `1.2.3` -> `1.2.4`
///
/// The result is always strictly greater than `current`. Parsed components
/// are bounded by `u32::MAX` and stored as `u64`, so the increment cannot
/// overflow for any version obtained from a tag.
pub fn next(current: Option<&SemanticVersion>, strategy: BumpStrategy) -> SemanticVersion {
    let Some(current) = current else {
        return SemanticVersion::initial();
    };

    let mut version = current.as_semver().clone();
    version.pre = semver::Prerelease::EMPTY;
    version.build = semver::BuildMetadata::EMPTY;

    match strategy {
        BumpStrategy::Major => {
            version.major = version.major.saturating_add(1);
            version.minor = 0;
            version.patch = 0;
        }
        BumpStrategy::Minor => {
            version.minor = version.minor.saturating_add(1);
            version.patch = 0;
        }
        BumpStrategy::Patch => {
            version.patch = version.patch.saturating_add(1);
        }
    }

    SemanticVersion::from_semver(version)
}
