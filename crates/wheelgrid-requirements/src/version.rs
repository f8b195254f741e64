use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use wheelgrid_matrix::BuildMatrix;
use wheelgrid_tags::Interpreter;

use crate::RequirementError;

/// A single Python version requirement token.
///
/// Every bound is a versioned CPython or PyPy [`Interpreter`]; the bound determines the
/// implementation and, for CPython, whether free-threaded builds are required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionRequirement {
    /// Ex) `3.12`, `3.14t`, `PyPy3.9`
    Exact(Interpreter),
    /// Ex) `3.10-3.14`, `PyPy3.9-3.11`
    Range { low: Interpreter, high: Interpreter },
    /// Ex) `3.12+`, `PyPy3.10+`
    OpenEnded(Interpreter),
}

impl VersionRequirement {
    /// Expand the requirement into the concrete interpreters it requires.
    ///
    /// An open-ended requirement is resolved against the versions observed in the matrix: it
    /// requires its lower bound, plus every version of the same implementation and flavor that
    /// was built anywhere and is at least the lower bound. The same requirement can therefore
    /// expand differently against two different matrices.
    pub fn expand(&self, matrix: &BuildMatrix) -> BTreeSet<Interpreter> {
        match self {
            Self::Exact(version) => BTreeSet::from([version.clone()]),
            Self::Range { low, high } => {
                let (Some((_, start)), Some((_, end))) = (low.python_version(), high.python_version())
                else {
                    return BTreeSet::new();
                };
                (start..=end).filter_map(|minor| with_minor(low, minor)).collect()
            }
            Self::OpenEnded(low) => {
                let mut versions = BTreeSet::from([low.clone()]);
                if let Some(implementation) = low.implementation() {
                    versions.extend(
                        matrix
                            .versions_of(implementation, Some(low.is_free_threaded()))
                            .into_iter()
                            .filter(|version| version.python_version() >= low.python_version())
                            .cloned(),
                    );
                }
                versions
            }
        }
    }
}

/// Return the interpreter of the same implementation and flavor, with a different minor version.
fn with_minor(interpreter: &Interpreter, minor: u8) -> Option<Interpreter> {
    match interpreter {
        Interpreter::CPython {
            python_version: (major, _),
            free_threaded,
        } => Some(Interpreter::CPython {
            python_version: (*major, minor),
            free_threaded: *free_threaded,
        }),
        Interpreter::PyPy {
            python_version: (major, _),
        } => Some(Interpreter::pypy((*major, minor))),
        Interpreter::Python { .. } | Interpreter::Unknown(_) => None,
    }
}

/// Parse a single version bound, e.g., `3.12`, `3.14t` or `PyPy3.9`.
fn parse_bound(bound: &str, token: &str) -> Result<Interpreter, RequirementError> {
    let interpreter = Interpreter::from_str(bound.trim()).unwrap_or_else(|err| match err {});
    if interpreter.implementation().is_none() {
        return Err(RequirementError::InvalidVersion(token.to_string()));
    }
    Ok(interpreter)
}

impl FromStr for VersionRequirement {
    type Err = RequirementError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let token = token.trim();

        // Ex) `3.12+`
        if let Some(low) = token.strip_suffix('+') {
            return Ok(Self::OpenEnded(parse_bound(low, token)?));
        }

        // Ex) `3.10-3.14`
        if let Some((low, high)) = token.split_once('-') {
            let low = parse_bound(low, token)?;

            // The upper bound of a PyPy range may omit the `PyPy` prefix.
            let high = high.trim();
            let high = if matches!(low, Interpreter::PyPy { .. }) && !high.starts_with("PyPy") {
                parse_bound(&format!("PyPy{high}"), token)?
            } else {
                parse_bound(high, token)?
            };

            let same_kind = low.implementation() == high.implementation()
                && low.is_free_threaded() == high.is_free_threaded();
            let same_major = low.python_version().map(|(major, _)| major)
                == high.python_version().map(|(major, _)| major);
            if !same_kind || !same_major {
                return Err(RequirementError::MismatchedRange(token.to_string()));
            }
            if low > high {
                return Err(RequirementError::ReversedRange(token.to_string()));
            }
            return Ok(Self::Range { low, high });
        }

        Ok(Self::Exact(parse_bound(token, token)?))
    }
}

impl fmt::Display for VersionRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(version) => write!(f, "{version}"),
            Self::Range { low, high } => write!(f, "{low}-{high}"),
            Self::OpenEnded(low) => write!(f, "{low}+"),
        }
    }
}

/// A list of Python version requirements, e.g., `3.10-3.13, 3.14t, PyPy3.10+`.
///
/// CPython and PyPy tokens can be mixed; the requirement is the union of every token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionRequirements(Vec<VersionRequirement>);

impl VersionRequirements {
    /// Parse a sequence of tokens, each of which may itself be a comma-separated list.
    pub fn from_tokens<I, S>(tokens: I) -> Result<Self, RequirementError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut requirements = Vec::new();
        for token in tokens {
            for token in token.as_ref().split(',') {
                let token = token.trim();
                if token.is_empty() {
                    continue;
                }
                requirements.push(VersionRequirement::from_str(token)?);
            }
        }
        Ok(Self(requirements))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &VersionRequirement> {
        self.0.iter()
    }

    /// Expand every token against the matrix, see [`VersionRequirement::expand`].
    pub fn expand(&self, matrix: &BuildMatrix) -> BTreeSet<Interpreter> {
        self.0
            .iter()
            .flat_map(|requirement| requirement.expand(matrix))
            .collect()
    }
}

impl FromStr for VersionRequirements {
    type Err = RequirementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tokens([s])
    }
}

impl fmt::Display for VersionRequirements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, requirement) in self.0.iter().enumerate() {
            if index > 0 {
                write!(f, ",")?;
            }
            write!(f, "{requirement}")?;
        }
        Ok(())
    }
}
