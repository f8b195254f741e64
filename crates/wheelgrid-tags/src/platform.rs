//! Canonical platforms (operating system family and architecture) derived from platform tags.

use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use tracing::trace;

use crate::platform_tag::PlatformTag;

/// The operating system families a wheel can target.
///
/// The variant order is the canonical display order.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Os {
    /// glibc-based Linux: `manylinux*` and bare `linux_*` tags.
    Linux,
    /// musl-based Linux.
    Musllinux,
    Windows,
    Macos,
    /// Any platform tag we don't recognize, including `any`.
    Unknown,
}

/// All architectures with a canonical spelling.
///
/// The variant order is the canonical display order within an operating system family; any
/// architecture we don't recognize sorts last, lexically.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Arch {
    X86_64,
    X86,
    Aarch64,
    Armv7,
    S390x,
    Ppc64le,
    Universal2,
    Other(String),
}

impl Arch {
    /// Parse the architecture portion of a platform tag, resolving aliases.
    pub fn from_tag(arch: &str) -> Self {
        match arch {
            "x86_64" | "amd64" | "intel" => Self::X86_64,
            "i686" | "i386" | "x86" => Self::X86,
            "aarch64" | "arm64" => Self::Aarch64,
            "armv7l" | "armv7" => Self::Armv7,
            "s390x" => Self::S390x,
            "ppc64le" => Self::Ppc64le,
            "universal2" => Self::Universal2,
            other => Self::Other(other.to_string()),
        }
    }

    /// Parse the architecture portion of a platform display name (e.g., `x64` in `Windows x64`).
    ///
    /// Accepts the spelling of any operating system family; the caller checks it against the
    /// family's own spelling.
    fn from_display(arch: &str) -> Self {
        match arch {
            "x86_64" | "x64" => Self::X86_64,
            "x86" => Self::X86,
            "aarch64" | "ARM64" => Self::Aarch64,
            "armv7" => Self::Armv7,
            "s390x" => Self::S390x,
            "ppc64le" => Self::Ppc64le,
            "Universal2" => Self::Universal2,
            other => Self::Other(other.to_string()),
        }
    }

    /// The spelling used in Linux platform tags.
    pub fn tag_name(&self) -> &str {
        match self {
            Self::X86_64 => "x86_64",
            Self::X86 => "i686",
            Self::Aarch64 => "aarch64",
            Self::Armv7 => "armv7l",
            Self::S390x => "s390x",
            Self::Ppc64le => "ppc64le",
            Self::Universal2 => "universal2",
            Self::Other(arch) => arch,
        }
    }

    /// The spelling used in macOS platform tags.
    pub fn macos_tag_name(&self) -> &str {
        match self {
            Self::Aarch64 => "arm64",
            _ => self.tag_name(),
        }
    }

    /// The spelling used in Linux display names.
    fn linux_name(&self) -> &str {
        match self {
            Self::X86_64 => "x86_64",
            Self::X86 => "x86",
            Self::Aarch64 => "aarch64",
            Self::Armv7 => "armv7",
            Self::S390x => "s390x",
            Self::Ppc64le => "ppc64le",
            Self::Universal2 => "universal2",
            Self::Other(arch) => arch,
        }
    }

    fn windows_name(&self) -> &str {
        match self {
            Self::X86_64 => "x64",
            Self::X86 => "x86",
            Self::Aarch64 => "ARM64",
            _ => self.linux_name(),
        }
    }

    fn macos_name(&self) -> &str {
        match self {
            Self::Aarch64 => "ARM64",
            Self::Universal2 => "Universal2",
            _ => self.linux_name(),
        }
    }
}

/// A canonical platform: an operating system family and an architecture.
///
/// For macOS, the minimum OS version from the platform tag is retained, but it takes no part in
/// display, equality, hashing or ordering.
#[derive(Debug, Clone)]
pub struct Platform {
    os: Os,
    arch: Arch,
    macos_version: Option<(u16, u16)>,
}

impl Platform {
    /// Create a new platform from the given operating system and architecture.
    pub const fn new(os: Os, arch: Arch) -> Self {
        Self {
            os,
            arch,
            macos_version: None,
        }
    }

    /// Classify a raw platform tag (e.g., `manylinux_2_17_x86_64`).
    ///
    /// Tags that don't match any known grammar classify as [`Os::Unknown`], carrying the
    /// (lowercased) raw tag as their architecture, rather than failing.
    pub fn classify(tag: &str) -> Self {
        let tag = tag.to_ascii_lowercase();
        match PlatformTag::from_str(&tag) {
            Ok(parsed) => Self::from(&parsed),
            Err(err) => {
                trace!("Classifying `{tag}` as an unknown platform: {err}");
                Self::new(Os::Unknown, Arch::Other(tag))
            }
        }
    }

    /// Return the platform's operating system family.
    pub fn os(&self) -> Os {
        self.os
    }

    /// Return the platform's architecture.
    pub fn arch(&self) -> &Arch {
        &self.arch
    }

    /// Return the minimum macOS version, for macOS platforms.
    pub fn macos_version(&self) -> Option<(u16, u16)> {
        self.macos_version
    }

    fn key(&self) -> (Os, &Arch) {
        (self.os, &self.arch)
    }
}

impl From<&PlatformTag> for Platform {
    fn from(tag: &PlatformTag) -> Self {
        match tag {
            PlatformTag::Any => Self::new(Os::Unknown, Arch::Other("any".to_string())),
            PlatformTag::Manylinux { arch, .. }
            | PlatformTag::Manylinux1 { arch }
            | PlatformTag::Manylinux2010 { arch }
            | PlatformTag::Manylinux2014 { arch }
            | PlatformTag::Linux { arch } => Self::new(Os::Linux, arch.clone()),
            PlatformTag::Musllinux { arch, .. } => Self::new(Os::Musllinux, arch.clone()),
            PlatformTag::Macos {
                major,
                minor,
                binary_format,
            } => Self {
                os: Os::Macos,
                arch: binary_format.clone(),
                macos_version: Some((*major, *minor)),
            },
            PlatformTag::Win32 => Self::new(Os::Windows, Arch::X86),
            PlatformTag::WinAmd64 => Self::new(Os::Windows, Arch::X86_64),
            PlatformTag::WinArm64 => Self::new(Os::Windows, Arch::Aarch64),
        }
    }
}

impl PartialEq for Platform {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Platform {}

impl Hash for Platform {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for Platform {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Platform {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.os {
            Os::Linux => write!(f, "Linux {}", self.arch.linux_name()),
            Os::Musllinux => write!(f, "musllinux {}", self.arch.linux_name()),
            Os::Windows => write!(f, "Windows {}", self.arch.windows_name()),
            Os::Macos => write!(f, "macOS {}", self.arch.macos_name()),
            Os::Unknown => write!(f, "{}", self.arch.linux_name()),
        }
    }
}

/// Parse a platform display name, e.g., `Linux x86_64` or `macOS ARM64`.
///
/// Only the exact display spelling is recognized: `Windows x86_64` is not `Windows x64`.
/// Anything else is an [`Os::Unknown`] platform that displays as written.
impl FromStr for Platform {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((os, arch)) = s.split_once(' ') else {
            return Ok(Self::new(Os::Unknown, Arch::Other(s.to_string())));
        };
        let os = match os {
            "Linux" => Os::Linux,
            "musllinux" => Os::Musllinux,
            "Windows" => Os::Windows,
            "macOS" => Os::Macos,
            _ => return Ok(Self::new(Os::Unknown, Arch::Other(s.to_string()))),
        };
        let platform = Self::new(os, Arch::from_display(arch));
        if platform.to_string() != s {
            trace!("`{s}` is not a canonical platform name");
            return Ok(Self::new(Os::Unknown, Arch::Other(s.to_string())));
        }
        Ok(platform)
    }
}

impl serde::Serialize for Platform {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
