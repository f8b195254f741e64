use std::fmt::Formatter;
use std::str::FromStr;

use crate::version::{DigitsError, parse_compressed_version};

/// A tag to represent the ABI compatibility of a Python distribution.
///
/// This is the second tag segment in the wheel filename, following the language tag. For
/// example, in `cp314-cp314t-manylinux_2_24_x86_64.whl`, the ABI tag is `cp314t`, which marks
/// the wheel as built for the free-threaded interpreter.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum AbiTag {
    /// Ex) `none`
    None,
    /// Ex) `abi3`
    Abi3,
    /// Ex) `cp39m`, `cp310t`
    CPython {
        gil_disabled: bool,
        python_version: (u8, u8),
    },
    /// Ex) `pypy39_pp73`, `pypy_73`
    PyPy {
        python_version: Option<(u8, u8)>,
        implementation_version: (u8, u8),
    },
}

impl AbiTag {
    /// Returns `true` if the ABI tag targets a free-threaded (`--disable-gil`) CPython build.
    pub fn is_free_threaded(self) -> bool {
        matches!(
            self,
            Self::CPython {
                gil_disabled: true,
                ..
            }
        )
    }
}

impl std::fmt::Display for AbiTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Abi3 => write!(f, "abi3"),
            Self::CPython {
                gil_disabled,
                python_version: (major, minor),
            } => {
                if *minor <= 7 {
                    write!(f, "cp{major}{minor}m")
                } else if *gil_disabled {
                    write!(f, "cp{major}{minor}t")
                } else {
                    write!(f, "cp{major}{minor}")
                }
            }
            Self::PyPy {
                python_version: Some((py_major, py_minor)),
                implementation_version: (impl_major, impl_minor),
            } => write!(f, "pypy{py_major}{py_minor}_pp{impl_major}{impl_minor}"),
            Self::PyPy {
                python_version: None,
                implementation_version: (impl_major, impl_minor),
            } => write!(f, "pypy_{impl_major}{impl_minor}"),
        }
    }
}

impl FromStr for AbiTag {
    type Err = ParseAbiTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |implementation: &'static str| ParseAbiTagError::InvalidFormat {
            implementation,
            tag: s.to_string(),
        };

        if s == "none" {
            Ok(Self::None)
        } else if s == "abi3" {
            Ok(Self::Abi3)
        } else if let Some(cp) = s.strip_prefix("cp") {
            // Ex) `cp39m`, `cp310t`, `cp37dm`
            let version_end = cp.find(|c: char| !c.is_ascii_digit()).unwrap_or(cp.len());
            let python_version = parse_compressed_version(&cp[..version_end])
                .map_err(|err| ParseAbiTagError::from_digits(err, "CPython", s))?;
            Ok(Self::CPython {
                gil_disabled: cp[version_end..].ends_with('t'),
                python_version,
            })
        } else if let Some(rest) = s.strip_prefix("pypy") {
            let implementation_version = |digits: &str| {
                parse_compressed_version(digits).map_err(|_| invalid("PyPy"))
            };
            if let Some(rest) = rest.strip_prefix('_') {
                // Ex) `pypy_73`
                Ok(Self::PyPy {
                    python_version: None,
                    implementation_version: implementation_version(rest)?,
                })
            } else {
                // Ex) `pypy39_pp73`
                let (version, rest) = rest.split_once('_').ok_or_else(|| invalid("PyPy"))?;
                let python_version = parse_compressed_version(version)
                    .map_err(|err| ParseAbiTagError::from_digits(err, "PyPy", s))?;
                let rest = rest.strip_prefix("pp").ok_or_else(|| invalid("PyPy"))?;
                Ok(Self::PyPy {
                    python_version: Some(python_version),
                    implementation_version: implementation_version(rest)?,
                })
            }
        } else {
            Err(ParseAbiTagError::UnknownFormat(s.to_string()))
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseAbiTagError {
    #[error("Unknown ABI tag format: {0}")]
    UnknownFormat(String),
    #[error("Missing major version in {implementation} ABI tag: {tag}")]
    MissingMajorVersion {
        implementation: &'static str,
        tag: String,
    },
    #[error("Invalid major version in {implementation} ABI tag: {tag}")]
    InvalidMajorVersion {
        implementation: &'static str,
        tag: String,
    },
    #[error("Missing minor version in {implementation} ABI tag: {tag}")]
    MissingMinorVersion {
        implementation: &'static str,
        tag: String,
    },
    #[error("Invalid minor version in {implementation} ABI tag: {tag}")]
    InvalidMinorVersion {
        implementation: &'static str,
        tag: String,
    },
    #[error("Invalid {implementation} ABI tag format: {tag}")]
    InvalidFormat {
        implementation: &'static str,
        tag: String,
    },
}

impl ParseAbiTagError {
    fn from_digits(err: DigitsError, implementation: &'static str, tag: &str) -> Self {
        let tag = tag.to_string();
        match err {
            DigitsError::MissingMajor => Self::MissingMajorVersion {
                implementation,
                tag,
            },
            DigitsError::InvalidMajor => Self::InvalidMajorVersion {
                implementation,
                tag,
            },
            DigitsError::MissingMinor => Self::MissingMinorVersion {
                implementation,
                tag,
            },
            DigitsError::InvalidMinor => Self::InvalidMinorVersion {
                implementation,
                tag,
            },
        }
    }
}
