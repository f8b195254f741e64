use std::fmt::Formatter;
use std::str::FromStr;

use crate::version::{DigitsError, parse_compressed_version, parse_major};

/// A tag to represent the language and implementation of the Python interpreter.
///
/// This is the first tag segment in the wheel filename. For example, in
/// `cp39-none-manylinux_2_24_x86_64.whl`, the language tag is `cp39`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum LanguageTag {
    /// Ex) `py3`, `py39`
    Python { major: u8, minor: Option<u8> },
    /// Ex) `cp39`, `cp313t`
    CPython {
        gil_disabled: bool,
        python_version: (u8, u8),
    },
    /// Ex) `pp39`
    PyPy { python_version: (u8, u8) },
}

impl std::fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Python { major, minor: None } => write!(f, "py{major}"),
            Self::Python {
                major,
                minor: Some(minor),
            } => write!(f, "py{major}{minor}"),
            Self::CPython {
                gil_disabled,
                python_version: (major, minor),
            } => {
                if *gil_disabled {
                    write!(f, "cp{major}{minor}t")
                } else {
                    write!(f, "cp{major}{minor}")
                }
            }
            Self::PyPy {
                python_version: (major, minor),
            } => write!(f, "pp{major}{minor}"),
        }
    }
}

impl FromStr for LanguageTag {
    type Err = ParseLanguageTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lift = |implementation: &'static str| {
            move |err: DigitsError| ParseLanguageTagError::from_digits(err, implementation, s)
        };

        if let Some(cp) = s.strip_prefix("cp") {
            // Ex) `cp39`, `cp313t`
            let (digits, gil_disabled) = match cp.strip_suffix('t') {
                Some(digits) => (digits, true),
                None => (cp, false),
            };
            let python_version = parse_compressed_version(digits).map_err(lift("CPython"))?;
            Ok(Self::CPython {
                gil_disabled,
                python_version,
            })
        } else if let Some(pp) = s.strip_prefix("pp") {
            // Ex) `pp39`
            let python_version = parse_compressed_version(pp).map_err(lift("PyPy"))?;
            Ok(Self::PyPy { python_version })
        } else if let Some(py) = s.strip_prefix("py") {
            // Ex) `py3`, `py39`
            let major = parse_major(py).map_err(lift("Python"))?;
            let minor = if py.len() > 1 {
                Some(parse_compressed_version(py).map_err(lift("Python"))?.1)
            } else {
                None
            };
            Ok(Self::Python { major, minor })
        } else {
            Err(ParseLanguageTagError::UnknownFormat(s.to_string()))
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseLanguageTagError {
    #[error("Unknown language tag format: {0}")]
    UnknownFormat(String),
    #[error("Missing major version in {implementation} language tag: {tag}")]
    MissingMajorVersion {
        implementation: &'static str,
        tag: String,
    },
    #[error("Invalid major version in {implementation} language tag: {tag}")]
    InvalidMajorVersion {
        implementation: &'static str,
        tag: String,
    },
    #[error("Missing minor version in {implementation} language tag: {tag}")]
    MissingMinorVersion {
        implementation: &'static str,
        tag: String,
    },
    #[error("Invalid minor version in {implementation} language tag: {tag}")]
    InvalidMinorVersion {
        implementation: &'static str,
        tag: String,
    },
}

impl ParseLanguageTagError {
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
