use std::fmt;
use std::str::FromStr;

use glob::Pattern;

use wheelgrid_tags::Platform;

use crate::RequirementError;

/// A pattern selecting platforms by display name.
///
/// Patterns containing glob metacharacters (`*`, `?`, `[`) are matched as globs against the
/// display name, so `Linux*` matches `Linux x86_64` and `Linux aarch64`. Anything else must name
/// a single platform exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformPattern {
    /// Ex) `Windows x64`
    Exact { name: String, platform: Platform },
    /// Ex) `Linux*`, `macOS *`
    Glob(Pattern),
}

impl PlatformPattern {
    /// Returns `true` if the pattern selects the given platform.
    pub fn matches(&self, platform: &Platform) -> bool {
        match self {
            Self::Exact {
                platform: expected, ..
            } => expected == platform,
            Self::Glob(pattern) => pattern.matches(&platform.to_string()),
        }
    }

    pub fn is_glob(&self) -> bool {
        matches!(self, Self::Glob(_))
    }

    /// For an exact pattern, the platform it names.
    pub fn platform(&self) -> Option<&Platform> {
        match self {
            Self::Exact { platform, .. } => Some(platform),
            Self::Glob(_) => None,
        }
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Exact { name, .. } => name,
            Self::Glob(pattern) => pattern.as_str(),
        }
    }
}

impl FromStr for PlatformPattern {
    type Err = RequirementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(RequirementError::EmptyPattern);
        }
        if s.contains(['*', '?', '[']) {
            let pattern = Pattern::new(s).map_err(|err| RequirementError::InvalidPattern {
                pattern: s.to_string(),
                err,
            })?;
            Ok(Self::Glob(pattern))
        } else {
            let platform = Platform::from_str(s).unwrap_or_else(|err| match err {});
            Ok(Self::Exact {
                name: s.to_string(),
                platform,
            })
        }
    }
}

impl fmt::Display for PlatformPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
