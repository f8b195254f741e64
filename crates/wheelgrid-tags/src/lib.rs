pub use abi_tag::{AbiTag, ParseAbiTagError};
pub use interpreter::{Implementation, Interpreter};
pub use language_tag::{LanguageTag, ParseLanguageTagError};
pub use platform::{Arch, Os, Platform};
pub use platform_tag::{ParsePlatformTagError, PlatformTag};
pub use version::parse_dotted_version;

mod abi_tag;
mod interpreter;
mod language_tag;
mod platform;
mod platform_tag;
mod version;
