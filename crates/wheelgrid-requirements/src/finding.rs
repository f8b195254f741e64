use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

use wheelgrid_tags::{Interpreter, Platform};

/// A required build that is missing from the matrix.
///
/// Findings sort platform-scoped entries first, by platform and then version (a wholly missing
/// platform before its individual versions), then missing global versions, then patterns that
/// matched nothing in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Finding {
    /// No wheel was built for the platform at all.
    MissingPlatform { platform: Platform },
    /// The platform exists, but is missing a required version.
    MissingPlatformVersion {
        platform: Platform,
        version: Interpreter,
    },
    /// No platform has a wheel for a required version.
    MissingVersion { version: Interpreter },
    /// A platform pattern matched no platform in the matrix.
    UnmatchedPattern { pattern: String, index: usize },
}

impl Finding {
    fn sort_key(&self) -> (u8, Option<&Platform>, Option<&Interpreter>, usize, &str) {
        match self {
            Self::MissingPlatform { platform } => (0, Some(platform), None, 0, ""),
            Self::MissingPlatformVersion { platform, version } => {
                (0, Some(platform), Some(version), 0, "")
            }
            Self::MissingVersion { version } => (1, None, Some(version), 0, ""),
            Self::UnmatchedPattern { pattern, index } => (2, None, None, *index, pattern),
        }
    }
}

impl PartialOrd for Finding {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Finding {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingPlatform { platform } => write!(f, "Missing required platform: {platform}"),
            Self::MissingPlatformVersion { platform, version } => {
                write!(f, "Platform '{platform}' missing required version: {version}")
            }
            Self::MissingVersion { version } if version.is_free_threaded() => {
                write!(f, "Missing required free-threaded Python {version}")
            }
            Self::MissingVersion { version } => {
                write!(f, "Missing required Python version: {version}")
            }
            Self::UnmatchedPattern { pattern, .. } => {
                write!(f, "No platforms found matching pattern: {pattern}")
            }
        }
    }
}
