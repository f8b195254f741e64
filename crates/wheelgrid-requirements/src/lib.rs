//! Declarative build requirements and their validation against a [`BuildMatrix`].
//!
//! [`BuildMatrix`]: wheelgrid_matrix::BuildMatrix

pub use finding::Finding;
pub use freethreaded::FreeThreadRequirement;
pub use pattern::PlatformPattern;
pub use requirement::{MatrixEntry, PlatformRequirement, RequirementMatrix, Requirements};
pub use validate::{Validation, validate};
pub use version::{VersionRequirement, VersionRequirements};

mod finding;
mod freethreaded;
mod pattern;
mod requirement;
mod validate;
mod version;

/// An invalid requirement. These are configuration errors, and are always fatal.
#[derive(Debug, thiserror::Error)]
pub enum RequirementError {
    #[error(
        "Invalid Python version requirement `{0}`: expected a version (`3.12`, `3.14t`, `PyPy3.9`), a range (`3.10-3.14`) or an open-ended bound (`3.12+`)"
    )]
    InvalidVersion(String),
    #[error(
        "Invalid Python version range `{0}`: the lower bound is greater than the upper bound"
    )]
    ReversedRange(String),
    #[error(
        "Invalid Python version range `{0}`: both bounds must share an implementation, a major version and free-threading"
    )]
    MismatchedRange(String),
    #[error(
        "Invalid free-threaded requirement `{0}`: expected `none`, `all`, a version (`3.14`) or an open-ended bound (`3.14+`)"
    )]
    InvalidFreeThreaded(String),
    #[error("Platform patterns must not be empty")]
    EmptyPattern,
    #[error("Invalid platform pattern `{pattern}`")]
    InvalidPattern {
        pattern: String,
        #[source]
        err: glob::PatternError,
    },
    #[error("Invalid JSON in `require-matrix`")]
    InvalidMatrix(#[source] serde_json::Error),
}
