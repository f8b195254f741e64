/// Declares all environment variables used throughout `wheelgrid` and its crates.
pub struct EnvVars;

impl EnvVars {
    /// Equivalent to the `--require-platforms` command-line argument. A comma-separated list of
    /// platform display names (e.g., `Linux x86_64,Windows x64`) that must each have at least
    /// one wheel.
    pub const WHEELGRID_REQUIRE_PLATFORMS: &'static str = "WHEELGRID_REQUIRE_PLATFORMS";

    /// Equivalent to the `--require-python-versions` command-line argument. A comma-separated
    /// list of versions (`3.12`), ranges (`3.10-3.14`) and open-ended bounds (`3.12+`).
    pub const WHEELGRID_REQUIRE_PYTHON_VERSIONS: &'static str =
        "WHEELGRID_REQUIRE_PYTHON_VERSIONS";

    /// Equivalent to the `--require-freethreaded` command-line argument.
    pub const WHEELGRID_REQUIRE_FREETHREADED: &'static str = "WHEELGRID_REQUIRE_FREETHREADED";

    /// Equivalent to the `--require-matrix` command-line argument. A JSON array of
    /// `{"platform": ..., "versions": ...}` records.
    pub const WHEELGRID_REQUIRE_MATRIX: &'static str = "WHEELGRID_REQUIRE_MATRIX";

    /// Equivalent to the `--fail-on-missing` command-line argument.
    pub const WHEELGRID_FAIL_ON_MISSING: &'static str = "WHEELGRID_FAIL_ON_MISSING";

    /// Equivalent to the `--output-file` command-line argument.
    pub const WHEELGRID_OUTPUT_FILE: &'static str = "WHEELGRID_OUTPUT_FILE";

    /// Equivalent to the `--output-format` command-line argument.
    pub const WHEELGRID_OUTPUT_FORMAT: &'static str = "WHEELGRID_OUTPUT_FORMAT";

    /// Equivalent to the `--config-file` command-line argument. The path to a `wheelgrid.toml`
    /// file to use for configuration.
    pub const WHEELGRID_CONFIG_FILE: &'static str = "WHEELGRID_CONFIG_FILE";

    /// Equivalent to the `--no-config` command-line argument. If set, configuration files are
    /// not discovered.
    pub const WHEELGRID_NO_CONFIG: &'static str = "WHEELGRID_NO_CONFIG";

    /// Disables line wrapping for diagnostics.
    pub const WHEELGRID_NO_WRAP: &'static str = "WHEELGRID_NO_WRAP";

    /// The path to the GitHub Actions job summary file. When set, the report is appended to it
    /// instead of being written to stdout.
    pub const GITHUB_STEP_SUMMARY: &'static str = "GITHUB_STEP_SUMMARY";

    /// Disables colored output (takes precedence over `FORCE_COLOR`).
    ///
    /// See [no-color.org](https://no-color.org).
    pub const NO_COLOR: &'static str = "NO_COLOR";

    /// Forces colored output regardless of terminal support.
    ///
    /// See [force-color.org](https://force-color.org).
    pub const FORCE_COLOR: &'static str = "FORCE_COLOR";

    /// Overrides terminal width used for wrapping.
    pub const COLUMNS: &'static str = "COLUMNS";

    /// Used to set the log level, e.g., `RUST_LOG=wheelgrid=debug`.
    pub const RUST_LOG: &'static str = "RUST_LOG";
}
