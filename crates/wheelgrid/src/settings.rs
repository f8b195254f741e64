use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;

use wheelgrid_cli::{Cli, ColorChoice, GlobalArgs};
use wheelgrid_requirements::{MatrixEntry, RequirementMatrix, Requirements};
use wheelgrid_settings::{Combine, FilesystemOptions, Options, OutputFormat};
use wheelgrid_static::EnvVars;
use wheelgrid_warnings::warn_user;

/// The resolved global settings to use for any invocation of the CLI.
#[derive(Debug, Clone)]
pub(crate) struct GlobalSettings {
    pub(crate) quiet: bool,
    pub(crate) verbose: u8,
    pub(crate) color: ColorChoice,
}

impl GlobalSettings {
    /// Resolve the [`GlobalSettings`] from the CLI.
    pub(crate) fn resolve(args: &GlobalArgs) -> Self {
        Self {
            quiet: args.quiet,
            verbose: args.verbose,
            color: if let Some(color_choice) = args.color {
                // If `--color` is passed explicitly, use its value.
                color_choice
            } else if std::env::var_os(EnvVars::NO_COLOR)
                .filter(|v| !v.is_empty())
                .is_some()
            {
                // If the `NO_COLOR` is set, disable color output.
                ColorChoice::Never
            } else if std::env::var_os(EnvVars::FORCE_COLOR)
                .filter(|v| !v.is_empty())
                .is_some()
            {
                // If `FORCE_COLOR` is set, always enable color output.
                ColorChoice::Always
            } else {
                ColorChoice::Auto
            },
        }
    }
}

/// The resolved settings for a summary run.
///
/// Each value is taken from the command line (or its environment variable), then the
/// configuration file, then the default.
#[derive(Debug, Clone)]
pub(crate) struct SummarySettings {
    pub(crate) wheels_path: PathBuf,
    pub(crate) require_platforms: Vec<String>,
    pub(crate) require_python_versions: Vec<String>,
    pub(crate) require_freethreaded: String,
    pub(crate) require_matrix: Option<Vec<MatrixEntry>>,
    pub(crate) fail_on_missing: bool,
    pub(crate) output_file: Option<PathBuf>,
    pub(crate) output_format: OutputFormat,
    /// The GitHub Actions job summary file, if running in GitHub Actions.
    pub(crate) step_summary: Option<PathBuf>,
}

impl SummarySettings {
    /// Resolve the [`SummarySettings`] from the CLI and filesystem configuration.
    pub(crate) fn resolve(cli: &Cli, filesystem: Option<FilesystemOptions>) -> Self {
        let options = cli
            .options()
            .combine(filesystem.map(FilesystemOptions::into_options).unwrap_or_default());

        let require_matrix = options
            .require_matrix
            .as_ref()
            .filter(|entries| !entries.is_empty())
            .cloned();
        if require_matrix.is_some() && options.has_simple_requirements() {
            warn_user!(
                "`require-matrix` is set, so `require-platforms`, `require-python-versions` and `require-freethreaded` are ignored"
            );
        }

        let Options {
            require_platforms,
            require_python_versions,
            require_freethreaded,
            require_matrix: _,
            fail_on_missing,
            output_format,
        } = options;

        Self {
            wheels_path: cli.wheels_path.clone(),
            require_platforms: require_platforms.unwrap_or_default(),
            require_python_versions: require_python_versions.unwrap_or_default(),
            require_freethreaded: require_freethreaded.unwrap_or_else(|| "none".to_string()),
            require_matrix,
            fail_on_missing: fail_on_missing.unwrap_or(true),
            output_file: cli.output.output_file.clone(),
            output_format: output_format.unwrap_or_default(),
            step_summary: std::env::var_os(EnvVars::GITHUB_STEP_SUMMARY)
                .filter(|value| !value.is_empty())
                .map(PathBuf::from),
        }
    }

    /// Parse the configured requirements.
    ///
    /// A non-empty `require-matrix` takes precedence over the simple-mode requirements.
    pub(crate) fn requirements(&self) -> Result<Requirements> {
        if let Some(entries) = &self.require_matrix {
            debug!("Using {} `require-matrix` pattern(s)", entries.len());
            let matrix = RequirementMatrix::from_entries(entries)
                .context("Failed to parse `require-matrix`")?;
            return Ok(Requirements::Matrix(matrix));
        }
        Requirements::simple(
            &self.require_platforms,
            &self.require_python_versions,
            &self.require_freethreaded,
        )
        .context("Failed to parse requirements")
    }
}

/// Load the configuration file, unless disabled.
pub(crate) fn load_filesystem_options(cli: &Cli) -> Result<Option<FilesystemOptions>> {
    if cli.no_config {
        debug!("Skipping configuration discovery (`--no-config`)");
        return Ok(None);
    }
    if let Some(config_file) = &cli.config_file {
        return Ok(Some(FilesystemOptions::from_file(config_file)?));
    }
    let cwd = std::env::current_dir().context("Failed to determine the current directory")?;
    Ok(FilesystemOptions::find(&cwd)?)
}
