use std::fmt::Formatter;
use std::str::FromStr;

use crate::platform::Arch;

/// A tag to represent the platform compatibility of a Python distribution.
///
/// This is the third segment in the wheel filename, following the language and ABI tags. For
/// example, in `cp39-none-manylinux_2_24_x86_64.whl`, the platform tag is `manylinux_2_24_x86_64`.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum PlatformTag {
    /// Ex) `any`
    Any,
    /// Ex) `manylinux_2_24_x86_64`
    Manylinux { major: u16, minor: u16, arch: Arch },
    /// Ex) `manylinux1_x86_64`
    Manylinux1 { arch: Arch },
    /// Ex) `manylinux2010_x86_64`
    Manylinux2010 { arch: Arch },
    /// Ex) `manylinux2014_aarch64`
    Manylinux2014 { arch: Arch },
    /// Ex) `linux_x86_64`
    Linux { arch: Arch },
    /// Ex) `musllinux_1_2_aarch64`
    Musllinux { major: u16, minor: u16, arch: Arch },
    /// Ex) `macosx_11_0_arm64`
    Macos {
        major: u16,
        minor: u16,
        binary_format: Arch,
    },
    /// Ex) `win32`
    Win32,
    /// Ex) `win_amd64`
    WinAmd64,
    /// Ex) `win_arm64`
    WinArm64,
}

impl std::fmt::Display for PlatformTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Any => write!(f, "any"),
            Self::Manylinux { major, minor, arch } => {
                write!(f, "manylinux_{major}_{minor}_{}", arch.tag_name())
            }
            Self::Manylinux1 { arch } => write!(f, "manylinux1_{}", arch.tag_name()),
            Self::Manylinux2010 { arch } => write!(f, "manylinux2010_{}", arch.tag_name()),
            Self::Manylinux2014 { arch } => write!(f, "manylinux2014_{}", arch.tag_name()),
            Self::Linux { arch } => write!(f, "linux_{}", arch.tag_name()),
            Self::Musllinux { major, minor, arch } => {
                write!(f, "musllinux_{major}_{minor}_{}", arch.tag_name())
            }
            Self::Macos {
                major,
                minor,
                binary_format,
            } => write!(f, "macosx_{major}_{minor}_{}", binary_format.macos_tag_name()),
            Self::Win32 => write!(f, "win32"),
            Self::WinAmd64 => write!(f, "win_amd64"),
            Self::WinArm64 => write!(f, "win_arm64"),
        }
    }
}

impl FromStr for PlatformTag {
    type Err = ParsePlatformTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "any" => return Ok(Self::Any),
            "win32" => return Ok(Self::Win32),
            "win_amd64" => return Ok(Self::WinAmd64),
            "win_arm64" => return Ok(Self::WinArm64),
            _ => {}
        }

        if let Some(rest) = s.strip_prefix("manylinux_") {
            // Ex) `manylinux_2_17_x86_64`
            let (major, minor, arch) = parse_versioned(rest, "manylinux", s)?;
            return Ok(Self::Manylinux { major, minor, arch });
        }

        if let Some(rest) = s.strip_prefix("manylinux1_") {
            let arch = parse_arch(rest, "manylinux1", s)?;
            return Ok(Self::Manylinux1 { arch });
        }

        if let Some(rest) = s.strip_prefix("manylinux2010_") {
            let arch = parse_arch(rest, "manylinux2010", s)?;
            return Ok(Self::Manylinux2010 { arch });
        }

        if let Some(rest) = s.strip_prefix("manylinux2014_") {
            let arch = parse_arch(rest, "manylinux2014", s)?;
            return Ok(Self::Manylinux2014 { arch });
        }

        if let Some(rest) = s.strip_prefix("musllinux_") {
            // Ex) `musllinux_1_2_aarch64`
            let (major, minor, arch) = parse_versioned(rest, "musllinux", s)?;
            return Ok(Self::Musllinux { major, minor, arch });
        }

        if let Some(rest) = s.strip_prefix("macosx_") {
            // Ex) `macosx_10_9_x86_64`, `macosx_11_0_universal2`
            let (major, minor, binary_format) = parse_versioned(rest, "macosx", s)?;
            return Ok(Self::Macos {
                major,
                minor,
                binary_format,
            });
        }

        if let Some(rest) = s.strip_prefix("linux_") {
            let arch = parse_arch(rest, "linux", s)?;
            return Ok(Self::Linux { arch });
        }

        Err(ParsePlatformTagError::UnknownFormat(s.to_string()))
    }
}

/// Parse the `<major>_<minor>_<arch>` tail shared by `manylinux_`, `musllinux_` and `macosx_`.
fn parse_versioned(
    rest: &str,
    platform: &'static str,
    tag: &str,
) -> Result<(u16, u16, Arch), ParsePlatformTagError> {
    let mut parts = rest.splitn(3, '_');
    let major = parts
        .next()
        .and_then(|major| major.parse::<u16>().ok())
        .ok_or_else(|| ParsePlatformTagError::InvalidMajorVersion {
            platform,
            tag: tag.to_string(),
        })?;
    let minor = parts
        .next()
        .and_then(|minor| minor.parse::<u16>().ok())
        .ok_or_else(|| ParsePlatformTagError::InvalidMinorVersion {
            platform,
            tag: tag.to_string(),
        })?;
    let arch = parse_arch(parts.next().unwrap_or_default(), platform, tag)?;
    Ok((major, minor, arch))
}

fn parse_arch(arch: &str, platform: &'static str, tag: &str) -> Result<Arch, ParsePlatformTagError> {
    if arch.is_empty() {
        return Err(ParsePlatformTagError::InvalidArch {
            platform,
            tag: tag.to_string(),
        });
    }
    Ok(Arch::from_tag(arch))
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParsePlatformTagError {
    #[error("Unknown platform tag format: {0}")]
    UnknownFormat(String),
    #[error("Invalid major version in {platform} platform tag: {tag}")]
    InvalidMajorVersion { platform: &'static str, tag: String },
    #[error("Invalid minor version in {platform} platform tag: {tag}")]
    InvalidMinorVersion { platform: &'static str, tag: String },
    #[error("Invalid architecture in {platform} platform tag: {tag}")]
    InvalidArch { platform: &'static str, tag: String },
}
