use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use wheelgrid_tags::Platform;

use crate::{FreeThreadRequirement, PlatformPattern, RequirementError, VersionRequirements};

/// A `require-matrix` entry, as written in JSON or TOML.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MatrixEntry {
    /// A platform display name or glob pattern, e.g., `Linux*`.
    pub platform: String,
    /// Comma-separated version requirements, e.g., `3.10-3.14, PyPy3.10`.
    #[serde(default)]
    pub versions: String,
    /// A free-threaded requirement, e.g., `3.14+`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub freethreaded: Option<String>,
}

/// The versions required on every platform matching a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformRequirement {
    pub pattern: PlatformPattern,
    pub versions: VersionRequirements,
    pub freethreaded: FreeThreadRequirement,
}

impl TryFrom<&MatrixEntry> for PlatformRequirement {
    type Error = RequirementError;

    fn try_from(entry: &MatrixEntry) -> Result<Self, Self::Error> {
        Ok(Self {
            pattern: PlatformPattern::from_str(&entry.platform)?,
            versions: VersionRequirements::from_str(&entry.versions)?,
            freethreaded: entry
                .freethreaded
                .as_deref()
                .map(FreeThreadRequirement::from_str)
                .transpose()?
                .unwrap_or_default(),
        })
    }
}

/// Per-platform requirements, evaluated in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequirementMatrix(Vec<PlatformRequirement>);

impl RequirementMatrix {
    /// Parse a JSON array of `{"platform": …, "versions": …, "freethreaded": …}` records.
    pub fn from_json(json: &str) -> Result<Self, RequirementError> {
        let entries: Vec<MatrixEntry> =
            serde_json::from_str(json).map_err(RequirementError::InvalidMatrix)?;
        Self::from_entries(&entries)
    }

    pub fn from_entries(entries: &[MatrixEntry]) -> Result<Self, RequirementError> {
        entries
            .iter()
            .map(PlatformRequirement::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlatformRequirement> {
        self.0.iter()
    }

    /// Return the first requirement (and its index) whose pattern matches the platform.
    ///
    /// When several patterns match, the first declared one wins.
    pub fn claim(&self, platform: &Platform) -> Option<(usize, &PlatformRequirement)> {
        let mut matches = self
            .0
            .iter()
            .enumerate()
            .filter(|(_, requirement)| requirement.pattern.matches(platform));
        let (index, winner) = matches.next()?;
        let shadowed = matches
            .map(|(_, requirement)| format!("`{}`", requirement.pattern))
            .collect::<Vec<_>>();
        if !shadowed.is_empty() {
            debug!(
                "Platform `{platform}` matches multiple patterns; using `{}` over {}",
                winner.pattern,
                shadowed.join(", ")
            );
        }
        Some((index, winner))
    }
}

/// The complete set of requirements for one validation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirements {
    /// Global requirements: every required platform must exist, and every required version must
    /// exist on at least one platform.
    Simple {
        platforms: Vec<Platform>,
        versions: VersionRequirements,
        freethreaded: FreeThreadRequirement,
    },
    /// Per-platform requirements.
    Matrix(RequirementMatrix),
}

impl Default for Requirements {
    fn default() -> Self {
        Self::Simple {
            platforms: Vec::new(),
            versions: VersionRequirements::default(),
            freethreaded: FreeThreadRequirement::None,
        }
    }
}

impl Requirements {
    /// Build global requirements from platform display names, version tokens and a
    /// free-threaded requirement.
    ///
    /// Platform names and version tokens may each be comma-separated lists.
    pub fn simple<P, V>(
        platforms: P,
        versions: V,
        freethreaded: &str,
    ) -> Result<Self, RequirementError>
    where
        P: IntoIterator,
        P::Item: AsRef<str>,
        V: IntoIterator,
        V::Item: AsRef<str>,
    {
        let mut required = Vec::new();
        for names in platforms {
            for name in names.as_ref().split(',') {
                let name = name.trim();
                if name.is_empty() {
                    continue;
                }
                let platform = Platform::from_str(name).unwrap_or_else(|err| match err {});
                if !required.contains(&platform) {
                    required.push(platform);
                }
            }
        }
        Ok(Self::Simple {
            platforms: required,
            versions: VersionRequirements::from_tokens(versions)?,
            freethreaded: FreeThreadRequirement::from_str(freethreaded)?,
        })
    }
}
