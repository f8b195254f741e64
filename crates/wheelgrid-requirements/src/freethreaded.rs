use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use wheelgrid_matrix::BuildMatrix;
use wheelgrid_tags::{Implementation, Interpreter, parse_dotted_version};

use crate::RequirementError;

/// A requirement on free-threaded CPython builds.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum FreeThreadRequirement {
    /// Ex) `none`
    #[default]
    None,
    /// Ex) `3.14`
    Exact((u8, u8)),
    /// Ex) `3.14+`
    OpenEnded((u8, u8)),
    /// Ex) `all`
    AllVersions,
}

impl FreeThreadRequirement {
    /// Expand the requirement into the concrete free-threaded interpreters it requires.
    ///
    /// `scope` is the set of interpreters the requirement applies to (a single platform's row,
    /// or every version in the matrix): [`FreeThreadRequirement::AllVersions`] requires a
    /// free-threaded sibling for each GIL-enabled CPython version in it. PyPy is exempt.
    ///
    /// An open-ended requirement is resolved against the CPython versions observed anywhere in
    /// the matrix.
    pub fn expand<'a>(
        &self,
        scope: impl IntoIterator<Item = &'a Interpreter>,
        matrix: &BuildMatrix,
    ) -> BTreeSet<Interpreter> {
        match self {
            Self::None => BTreeSet::new(),
            Self::Exact(version) => BTreeSet::from([Interpreter::cpython_free_threaded(*version)]),
            Self::OpenEnded(low) => {
                let mut versions = BTreeSet::from([Interpreter::cpython_free_threaded(*low)]);
                versions.extend(
                    matrix
                        .versions_of(Implementation::CPython, None)
                        .into_iter()
                        .filter_map(Interpreter::python_version)
                        .filter(|version| version >= low)
                        .map(Interpreter::cpython_free_threaded),
                );
                versions
            }
            Self::AllVersions => scope
                .into_iter()
                .filter_map(Interpreter::free_threaded_sibling)
                .collect(),
        }
    }
}

impl FromStr for FreeThreadRequirement {
    type Err = RequirementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s {
            "" | "none" => return Ok(Self::None),
            "all" => return Ok(Self::AllVersions),
            _ => {}
        }

        let (version, open_ended) = match s.strip_suffix('+') {
            Some(version) => (version, true),
            None => (s, false),
        };
        let version = version.strip_suffix('t').unwrap_or(version);
        let version = parse_dotted_version(version)
            .ok_or_else(|| RequirementError::InvalidFreeThreaded(s.to_string()))?;

        if open_ended {
            Ok(Self::OpenEnded(version))
        } else {
            Ok(Self::Exact(version))
        }
    }
}

impl fmt::Display for FreeThreadRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Exact((major, minor)) => write!(f, "{major}.{minor}"),
            Self::OpenEnded((major, minor)) => write!(f, "{major}.{minor}+"),
            Self::AllVersions => write!(f, "all"),
        }
    }
}
