use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use tracing::trace;

use crate::abi_tag::AbiTag;
use crate::language_tag::LanguageTag;
use crate::version::parse_dotted_version;

/// A Python implementation that a version requirement can target.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Implementation {
    CPython,
    PyPy,
}

impl fmt::Display for Implementation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CPython => write!(f, "CPython"),
            Self::PyPy => write!(f, "PyPy"),
        }
    }
}

/// The interpreter a wheel was built for, as shown in a build matrix column.
///
/// The derived ordering is the canonical column order: CPython versions ascending, each
/// free-threaded build immediately after its GIL-enabled sibling, then PyPy versions, then
/// version-agnostic `pyX` tags, then anything unrecognized.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Interpreter {
    /// Ex) `3.12`, `3.14t`
    CPython {
        python_version: (u8, u8),
        free_threaded: bool,
    },
    /// Ex) `PyPy3.10`
    PyPy { python_version: (u8, u8) },
    /// Ex) `py3`
    Python { major: u8 },
    /// A language tag we don't recognize, kept verbatim.
    Unknown(String),
}

impl Interpreter {
    /// A GIL-enabled CPython interpreter.
    pub const fn cpython(python_version: (u8, u8)) -> Self {
        Self::CPython {
            python_version,
            free_threaded: false,
        }
    }

    /// A free-threaded CPython interpreter.
    pub const fn cpython_free_threaded(python_version: (u8, u8)) -> Self {
        Self::CPython {
            python_version,
            free_threaded: true,
        }
    }

    pub const fn pypy(python_version: (u8, u8)) -> Self {
        Self::PyPy { python_version }
    }

    /// Classify a language tag (e.g., `cp312`), given the ABI tags it was published with.
    ///
    /// The interpreter is free-threaded if the language tag carries a `t` suffix, or if the ABI
    /// tags contain a free-threaded CPython ABI for the same version and no GIL-enabled one (as
    /// in `cp314-cp314t`). A generic `pyXY` tag is treated as the CPython version `X.Y`.
    /// Unrecognized tags classify as [`Interpreter::Unknown`] instead of failing.
    pub fn classify<S: AsRef<str>>(language: &str, abi_tags: &[S]) -> Self {
        match LanguageTag::from_str(language) {
            Ok(LanguageTag::CPython {
                gil_disabled,
                python_version,
            }) => Self::CPython {
                python_version,
                free_threaded: gil_disabled || free_threaded_abi(python_version, abi_tags),
            },
            Ok(LanguageTag::Python {
                major,
                minor: Some(minor),
            }) => Self::CPython {
                python_version: (major, minor),
                free_threaded: free_threaded_abi((major, minor), abi_tags),
            },
            Ok(LanguageTag::Python { major, minor: None }) => Self::Python { major },
            Ok(LanguageTag::PyPy { python_version }) => Self::PyPy { python_version },
            Err(err) => {
                trace!("Classifying `{language}` as an unknown interpreter: {err}");
                Self::Unknown(language.to_string())
            }
        }
    }

    /// The implementation family, if this is a versioned CPython or PyPy interpreter.
    pub fn implementation(&self) -> Option<Implementation> {
        match self {
            Self::CPython { .. } => Some(Implementation::CPython),
            Self::PyPy { .. } => Some(Implementation::PyPy),
            Self::Python { .. } | Self::Unknown(_) => None,
        }
    }

    /// The `(major, minor)` Python version, if known.
    pub fn python_version(&self) -> Option<(u8, u8)> {
        match self {
            Self::CPython { python_version, .. } | Self::PyPy { python_version } => {
                Some(*python_version)
            }
            Self::Python { .. } | Self::Unknown(_) => None,
        }
    }

    pub fn is_free_threaded(&self) -> bool {
        matches!(
            self,
            Self::CPython {
                free_threaded: true,
                ..
            }
        )
    }

    /// For a GIL-enabled CPython interpreter, the free-threaded build of the same version.
    pub fn free_threaded_sibling(&self) -> Option<Self> {
        match self {
            Self::CPython {
                python_version,
                free_threaded: false,
            } => Some(Self::cpython_free_threaded(*python_version)),
            _ => None,
        }
    }
}

/// Returns `true` if the CPython ABIs for `python_version` are all free-threaded.
///
/// In a compressed tag set (e.g., `cp313.cp313t`), a GIL-enabled ABI for the same version means
/// the GIL-enabled language tag keeps its GIL.
fn free_threaded_abi<S: AsRef<str>>(python_version: (u8, u8), abi_tags: &[S]) -> bool {
    let mut free_threaded = false;
    for abi in abi_tags {
        match AbiTag::from_str(abi.as_ref()) {
            Ok(tag @ AbiTag::CPython {
                python_version: abi_version,
                ..
            }) if abi_version == python_version => {
                if !tag.is_free_threaded() {
                    return false;
                }
                free_threaded = true;
            }
            _ => {}
        }
    }
    free_threaded
}

impl fmt::Display for Interpreter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CPython {
                python_version: (major, minor),
                free_threaded,
            } => {
                if *free_threaded {
                    write!(f, "{major}.{minor}t")
                } else {
                    write!(f, "{major}.{minor}")
                }
            }
            Self::PyPy {
                python_version: (major, minor),
            } => write!(f, "PyPy{major}.{minor}"),
            Self::Python { major } => write!(f, "py{major}"),
            Self::Unknown(tag) => write!(f, "{tag}"),
        }
    }
}

/// Parse an interpreter display name, e.g., `3.12`, `3.14t` or `PyPy3.9`.
impl FromStr for Interpreter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(version) = s.strip_prefix("PyPy") {
            if let Some(python_version) = parse_dotted_version(version) {
                return Ok(Self::pypy(python_version));
            }
        } else if let Some(version) = s.strip_suffix('t') {
            if let Some(python_version) = parse_dotted_version(version) {
                return Ok(Self::cpython_free_threaded(python_version));
            }
        } else if let Some(python_version) = parse_dotted_version(s) {
            return Ok(Self::cpython(python_version));
        } else if let Some(major) = s.strip_prefix("py")
            && major.len() == 1
            && let Ok(major) = major.parse::<u8>()
        {
            return Ok(Self::Python { major });
        }
        Ok(Self::Unknown(s.to_string()))
    }
}

impl serde::Serialize for Interpreter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
