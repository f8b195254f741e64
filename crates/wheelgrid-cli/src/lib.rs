use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};

use wheelgrid_requirements::{MatrixEntry, RequirementError};
use wheelgrid_settings::OutputFormat;
use wheelgrid_static::EnvVars;

pub mod options;

// Configures Clap v3-style help menu colors
const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "wheelgrid", author, version)]
#[command(
    about = "Summarize built wheels by platform and Python version, and check that required builds exist."
)]
#[command(styles = STYLES)]
pub struct Cli {
    /// The directory to search (recursively) for `.whl` files.
    #[arg(value_name = "WHEELS_PATH")]
    pub wheels_path: PathBuf,

    #[command(flatten)]
    pub requirements: RequirementArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    #[command(flatten)]
    pub global_args: GlobalArgs,

    /// The path to a `wheelgrid.toml` file to use for configuration.
    #[arg(long, env = EnvVars::WHEELGRID_CONFIG_FILE, help_heading = "Global options")]
    pub config_file: Option<PathBuf>,

    /// Avoid discovering configuration files (`wheelgrid.toml`, `pyproject.toml`).
    #[arg(
        long,
        env = EnvVars::WHEELGRID_NO_CONFIG,
        value_parser = clap::builder::BoolishValueParser::new(),
        help_heading = "Global options"
    )]
    pub no_config: bool,
}

#[derive(clap::Args, Debug, Clone, Default)]
#[command(next_help_heading = "Requirement options")]
pub struct RequirementArgs {
    /// Platforms that must each have at least one wheel, as a comma-separated list of display
    /// names.
    ///
    /// For example: `Linux x86_64,Windows x64,macOS ARM64`.
    #[arg(long, env = EnvVars::WHEELGRID_REQUIRE_PLATFORMS, value_name = "PLATFORMS")]
    pub require_platforms: Option<String>,

    /// Python versions that must be built for at least one platform, as a comma-separated list.
    ///
    /// Accepts exact versions (`3.12`, `3.14t`, `PyPy3.10`), inclusive ranges (`3.10-3.14`) and
    /// open-ended bounds (`3.12+`), which extend to the newest matching version found.
    #[arg(long, env = EnvVars::WHEELGRID_REQUIRE_PYTHON_VERSIONS, value_name = "VERSIONS")]
    pub require_python_versions: Option<String>,

    /// Free-threaded builds that must exist: `none`, `all`, a version (`3.14`) or an
    /// open-ended bound (`3.14+`).
    ///
    /// [default: none]
    #[arg(long, env = EnvVars::WHEELGRID_REQUIRE_FREETHREADED, value_name = "REQUIREMENT")]
    pub require_freethreaded: Option<String>,

    /// Per-platform requirements, as a JSON array of
    /// `{"platform": ..., "versions": ..., "freethreaded": ...}` records.
    ///
    /// Platforms may be glob patterns (e.g., `Linux*`); each platform is checked against the
    /// first pattern that matches it. Overrides the other requirement options.
    #[arg(long, env = EnvVars::WHEELGRID_REQUIRE_MATRIX, value_name = "JSON")]
    pub require_matrix: Option<RequireMatrix>,

    /// Exit with an error when required wheels are missing.
    ///
    /// [default: true]
    #[arg(
        long,
        env = EnvVars::WHEELGRID_FAIL_ON_MISSING,
        value_name = "BOOL",
        num_args = 0..=1,
        default_missing_value = "true",
        value_parser = clap::builder::BoolishValueParser::new(),
    )]
    pub fail_on_missing: Option<bool>,
}

#[derive(clap::Args, Debug, Clone, Default)]
#[command(next_help_heading = "Output options")]
pub struct OutputArgs {
    /// Also write the report to the given file.
    ///
    /// The report is always printed to stdout, or appended to `$GITHUB_STEP_SUMMARY` when set.
    #[arg(long, short, env = EnvVars::WHEELGRID_OUTPUT_FILE)]
    pub output_file: Option<PathBuf>,

    /// The format of the report.
    ///
    /// [default: markdown]
    #[arg(long, value_enum, env = EnvVars::WHEELGRID_OUTPUT_FORMAT)]
    pub output_format: Option<OutputFormat>,
}

#[derive(clap::Args, Debug, Clone)]
#[command(next_help_heading = "Global options", next_display_order = 1000)]
pub struct GlobalArgs {
    /// Do not print any output.
    ///
    /// The report is still written to `--output-file` and `$GITHUB_STEP_SUMMARY`.
    #[arg(long, short, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Use verbose output.
    ///
    /// You can configure fine-grained logging using the `RUST_LOG` environment variable.
    /// (<https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html#directives>)
    #[arg(action = clap::ArgAction::Count, long, short, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Control colors in output.
    ///
    /// By default, colors are used when writing to a terminal, unless `NO_COLOR` is set.
    #[arg(long, value_enum, value_name = "COLOR_CHOICE")]
    pub color: Option<ColorChoice>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, clap::ValueEnum)]
pub enum ColorChoice {
    /// Enables colored output only when the output is going to a terminal or TTY with support.
    Auto,

    /// Enables colored output regardless of the detected environment.
    Always,

    /// Disables colored output.
    Never,
}

impl From<ColorChoice> for anstream::ColorChoice {
    fn from(value: ColorChoice) -> Self {
        match value {
            ColorChoice::Auto => Self::Auto,
            ColorChoice::Always => Self::Always,
            ColorChoice::Never => Self::Never,
        }
    }
}

/// The JSON value of `--require-matrix`.
///
/// Only the JSON structure is checked here; patterns and version tokens are parsed alongside the
/// rest of the configuration. An empty (or whitespace-only) value is an empty matrix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequireMatrix(Vec<MatrixEntry>);

impl RequireMatrix {
    pub fn into_entries(self) -> Vec<MatrixEntry> {
        self.0
    }
}

impl FromStr for RequireMatrix {
    type Err = RequirementError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        if input.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(input)
            .map(Self)
            .map_err(RequirementError::InvalidMatrix)
    }
}
