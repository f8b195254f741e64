use wheelgrid_requirements::MatrixEntry;

use crate::{OutputFormat, Options};

pub trait Combine {
    /// Combine two values, preferring the values in `self`.
    ///
    /// Requirement lists are replaced wholesale rather than merged, so a list given on the
    /// command line overrides the one in a configuration file.
    #[must_use]
    fn combine(self, other: Self) -> Self;
}

macro_rules! impl_combine_or {
    ($name:ty) => {
        impl Combine for Option<$name> {
            fn combine(self, other: Option<$name>) -> Option<$name> {
                self.or(other)
            }
        }
    };
}

impl_combine_or!(bool);
impl_combine_or!(String);
impl_combine_or!(Vec<String>);
impl_combine_or!(Vec<MatrixEntry>);
impl_combine_or!(OutputFormat);

impl Combine for Options {
    fn combine(self, other: Options) -> Options {
        Options {
            require_platforms: self.require_platforms.combine(other.require_platforms),
            require_python_versions: self
                .require_python_versions
                .combine(other.require_python_versions),
            require_freethreaded: self.require_freethreaded.combine(other.require_freethreaded),
            require_matrix: self.require_matrix.combine(other.require_matrix),
            fail_on_missing: self.fail_on_missing.combine(other.fail_on_missing),
            output_format: self.output_format.combine(other.output_format),
        }
    }
}
