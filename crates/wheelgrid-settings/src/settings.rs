use serde::{Deserialize, Serialize};

use wheelgrid_requirements::MatrixEntry;

/// A `pyproject.toml` with an (optional) `[tool.wheelgrid]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct PyProjectToml {
    pub(crate) tool: Option<Tools>,
}

/// A `[tool]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct Tools {
    pub(crate) wheelgrid: Option<Options>,
}

/// A `wheelgrid.toml` file, or a `[tool.wheelgrid]` section.
///
/// ```toml
/// require-platforms = ["Linux x86_64", "Windows x64"]
/// require-python-versions = ["3.10-3.14"]
/// require-freethreaded = "3.14+"
/// fail-on-missing = true
///
/// [[require-matrix]]
/// platform = "macOS *"
/// versions = "3.12+"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct Options {
    /// Platforms that must each have at least one wheel, by display name.
    pub require_platforms: Option<Vec<String>>,
    /// Version requirements checked across all platforms.
    pub require_python_versions: Option<Vec<String>>,
    /// Free-threaded builds that must exist: `none`, `all`, `3.14` or `3.14+`.
    pub require_freethreaded: Option<String>,
    /// Per-platform requirements. When present, the simple-mode keys above are ignored.
    pub require_matrix: Option<Vec<MatrixEntry>>,
    /// Whether missing wheels fail the run.
    pub fail_on_missing: Option<bool>,
    pub output_format: Option<OutputFormat>,
}

impl Options {
    /// Returns `true` if any of the simple-mode requirement keys requires something.
    ///
    /// Empty lists and `require-freethreaded = "none"` require nothing.
    pub fn has_simple_requirements(&self) -> bool {
        let requires_any = |values: &Option<Vec<String>>| {
            values
                .iter()
                .flatten()
                .any(|value| value.split(',').any(|token| !token.trim().is_empty()))
        };
        requires_any(&self.require_platforms)
            || requires_any(&self.require_python_versions)
            || self
                .require_freethreaded
                .as_deref()
                .is_some_and(|value| !matches!(value.trim(), "" | "none"))
    }
}

/// The format of the generated report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum OutputFormat {
    /// A Markdown table, suitable for a CI job summary.
    #[default]
    Markdown,
    /// A JSON document.
    Json,
}
