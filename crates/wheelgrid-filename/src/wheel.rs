use std::fmt::{Display, Formatter};
use std::str::FromStr;

use smallvec::SmallVec;
use thiserror::Error;

use wheelgrid_tags::{Interpreter, Platform};

use crate::split::MemchrSplitter;

/// The `.`-separated tags of a single wheel filename segment. Almost always a single tag.
type TagSet = SmallVec<[String; 1]>;

/// A wheel filename, decomposed into its raw components.
///
/// See: <https://packaging.python.org/en/latest/specifications/binary-distribution-format/#file-name-convention>
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct WheelFilename {
    pub name: String,
    pub version: String,
    build_tag: Option<String>,
    python_tags: TagSet,
    abi_tags: TagSet,
    platform_tags: TagSet,
}

impl FromStr for WheelFilename {
    type Err = WheelFilenameError;

    fn from_str(filename: &str) -> Result<Self, Self::Err> {
        let stem = filename.strip_suffix(".whl").ok_or_else(|| {
            WheelFilenameError::InvalidWheelFileName(
                filename.to_string(),
                "Must end with .whl".to_string(),
            )
        })?;
        Self::parse(stem, filename)
    }
}

impl Display for WheelFilename {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.name, self.version)?;
        if let Some(build_tag) = &self.build_tag {
            write!(f, "-{build_tag}")?;
        }
        write!(
            f,
            "-{}-{}-{}.whl",
            self.python_tags.join("."),
            self.abi_tags.join("."),
            self.platform_tags.join("."),
        )
    }
}

impl WheelFilename {
    /// Return the wheel's Python (language) tags, e.g., `["cp311"]`.
    pub fn python_tags(&self) -> &[String] {
        &self.python_tags
    }

    /// Return the wheel's ABI tags, e.g., `["cp311"]` or `["abi3"]`.
    pub fn abi_tags(&self) -> &[String] {
        &self.abi_tags
    }

    /// Return the wheel's platform tags, e.g., `["manylinux_2_17_x86_64", "manylinux2014_x86_64"]`.
    pub fn platform_tags(&self) -> &[String] {
        &self.platform_tags
    }

    /// Return the wheel's build tag, if present.
    pub fn build_tag(&self) -> Option<&str> {
        self.build_tag.as_deref()
    }

    /// The interpreters the wheel was built for, one per Python tag.
    ///
    /// The ABI tags are consulted to detect free-threaded builds published under a GIL-enabled
    /// language tag (e.g., `cp314-cp314t`).
    pub fn interpreters(&self) -> impl Iterator<Item = Interpreter> + '_ {
        self.python_tags
            .iter()
            .map(|tag| Interpreter::classify(tag, self.abi_tags.as_slice()))
    }

    /// The platforms the wheel was built for, one per platform tag.
    pub fn platforms(&self) -> impl Iterator<Item = Platform> + '_ {
        self.platform_tags.iter().map(|tag| Platform::classify(tag))
    }

    /// Every `(platform, interpreter)` pair the wheel provides.
    ///
    /// A wheel with compressed tag sets (e.g., `cp311.cp312-…-manylinux_2_17_x86_64.musllinux_1_2_x86_64`)
    /// fans out into the cartesian product of its interpreters and platforms.
    pub fn classify(&self) -> Vec<(Platform, Interpreter)> {
        let interpreters = self.interpreters().collect::<Vec<_>>();
        self.platforms()
            .flat_map(|platform| {
                interpreters
                    .iter()
                    .map(move |interpreter| (platform.clone(), interpreter.clone()))
            })
            .collect()
    }

    /// Parse a wheel filename from the stem (e.g., `foo-1.2.3-py3-none-any`).
    ///
    /// The originating `filename` is used for high-fidelity error messages.
    fn parse(stem: &str, filename: &str) -> Result<Self, WheelFilenameError> {
        // The wheel filename should contain either five or six entries. If six, then the third
        // entry is the build tag. If five, then the third entry is the Python tag.
        let mut splitter = memchr::Memchr::new(b'-', stem.as_bytes());

        let Some(version) = splitter.next() else {
            return Err(WheelFilenameError::InvalidWheelFileName(
                filename.to_string(),
                "Must have a version".to_string(),
            ));
        };

        let Some(build_tag_or_python_tag) = splitter.next() else {
            return Err(WheelFilenameError::InvalidWheelFileName(
                filename.to_string(),
                "Must have a Python tag".to_string(),
            ));
        };

        let Some(python_tag_or_abi_tag) = splitter.next() else {
            return Err(WheelFilenameError::InvalidWheelFileName(
                filename.to_string(),
                "Must have an ABI tag".to_string(),
            ));
        };

        let Some(abi_tag_or_platform_tag) = splitter.next() else {
            return Err(WheelFilenameError::InvalidWheelFileName(
                filename.to_string(),
                "Must have a platform tag".to_string(),
            ));
        };

        let (name, version, build_tag, python_tag, abi_tag, platform_tag) =
            if let Some(platform_tag) = splitter.next() {
                if splitter.next().is_some() {
                    return Err(WheelFilenameError::InvalidWheelFileName(
                        filename.to_string(),
                        "Must have 5 or 6 components, but has more".to_string(),
                    ));
                }
                (
                    &stem[..version],
                    &stem[version + 1..build_tag_or_python_tag],
                    Some(&stem[build_tag_or_python_tag + 1..python_tag_or_abi_tag]),
                    &stem[python_tag_or_abi_tag + 1..abi_tag_or_platform_tag],
                    &stem[abi_tag_or_platform_tag + 1..platform_tag],
                    &stem[platform_tag + 1..],
                )
            } else {
                (
                    &stem[..version],
                    &stem[version + 1..build_tag_or_python_tag],
                    None,
                    &stem[build_tag_or_python_tag + 1..python_tag_or_abi_tag],
                    &stem[python_tag_or_abi_tag + 1..abi_tag_or_platform_tag],
                    &stem[abi_tag_or_platform_tag + 1..],
                )
            };

        if name.is_empty() {
            return Err(WheelFilenameError::EmptyComponent(
                filename.to_string(),
                "distribution name",
            ));
        }
        if version.is_empty() {
            return Err(WheelFilenameError::EmptyComponent(
                filename.to_string(),
                "version",
            ));
        }
        let build_tag = build_tag
            .map(|build_tag| {
                if build_tag.starts_with(|c: char| c.is_ascii_digit()) {
                    Ok(build_tag.to_string())
                } else {
                    Err(WheelFilenameError::InvalidBuildTag(filename.to_string()))
                }
            })
            .transpose()?;

        Ok(Self {
            name: name.to_string(),
            version: version.to_string(),
            build_tag,
            python_tags: split_tags(python_tag, filename, "Python tag")?,
            abi_tags: split_tags(abi_tag, filename, "ABI tag")?,
            platform_tags: split_tags(platform_tag, filename, "platform tag")?,
        })
    }
}

/// Split a compressed tag segment (e.g., `cp311.cp312`) into its individual tags.
fn split_tags(
    segment: &str,
    filename: &str,
    kind: &'static str,
) -> Result<TagSet, WheelFilenameError> {
    MemchrSplitter::split(segment, b'.')
        .map(|tag| {
            if tag.is_empty() {
                Err(WheelFilenameError::EmptyComponent(filename.to_string(), kind))
            } else {
                Ok(tag.to_string())
            }
        })
        .collect()
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WheelFilenameError {
    #[error("The wheel filename \"{0}\" is invalid: {1}")]
    InvalidWheelFileName(String, String),
    #[error("The wheel filename \"{0}\" has an invalid build tag: must start with a digit")]
    InvalidBuildTag(String),
    #[error("The wheel filename \"{0}\" has an empty {1}")]
    EmptyComponent(String, &'static str),
}

impl WheelFilenameError {
    /// The filename that failed to parse.
    pub fn filename(&self) -> &str {
        match self {
            Self::InvalidWheelFileName(filename, _)
            | Self::InvalidBuildTag(filename)
            | Self::EmptyComponent(filename, _) => filename,
        }
    }
}
