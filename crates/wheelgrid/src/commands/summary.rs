use std::fmt::Write;
use std::io::Write as _;
use std::path::Path;

use anyhow::{Context, Result, bail};
use owo_colors::OwoColorize;
use tracing::debug;
use walkdir::WalkDir;

use wheelgrid_matrix::BuildMatrix;
use wheelgrid_requirements::validate;
use wheelgrid_warnings::warn_user;

use crate::commands::ExitStatus;
use crate::printer::Printer;
use crate::report;
use crate::settings::SummarySettings;

/// Summarize the wheels in a directory and check them against the requirements.
pub(crate) fn summary(settings: &SummarySettings, printer: Printer) -> Result<ExitStatus> {
    // Parse the requirements before scanning, so that configuration errors surface immediately.
    let requirements = settings.requirements()?;

    let filenames = find_wheels(&settings.wheels_path)?;
    debug!(
        "Found {} wheel file(s) in `{}`",
        filenames.len(),
        settings.wheels_path.display()
    );

    let (matrix, errors) = BuildMatrix::from_filenames(&filenames);
    for err in errors {
        warn_user!("Ignoring invalid wheel: {err}");
    }

    if matrix.is_empty() {
        writeln!(
            printer.fatal(),
            "{}{} No wheel files found in `{}`",
            "error".red().bold(),
            ":".bold(),
            settings.wheels_path.display()
        )?;
        return Ok(ExitStatus::Failure);
    }

    let validation = validate(&matrix, &requirements);
    let report = report::render(&matrix, &validation, settings.output_format)?;

    if let Some(step_summary) = &settings.step_summary {
        debug!("Appending report to `{}`", step_summary.display());
        append(step_summary, &report)?;
    } else {
        write!(printer.stdout(), "{report}")?;
    }

    if let Some(output_file) = &settings.output_file {
        debug!("Writing report to `{}`", output_file.display());
        fs_err::write(output_file, &report)
            .with_context(|| format!("Failed to write report to `{}`", output_file.display()))?;
    }

    if validation.passed() {
        debug!("All required wheels are present");
        return Ok(ExitStatus::Success);
    }

    let mut stderr = printer.stderr();
    if settings.fail_on_missing {
        writeln!(
            stderr,
            "{}{} Required wheels are missing!",
            "error".red().bold(),
            ":".bold()
        )?;
    } else {
        writeln!(
            stderr,
            "{}{} Required wheels are missing, but continuing...",
            "warning".yellow().bold(),
            ":".bold()
        )?;
    }
    for finding in validation.findings() {
        writeln!(stderr, "  - {finding}")?;
    }

    if settings.fail_on_missing {
        Ok(ExitStatus::Failure)
    } else {
        Ok(ExitStatus::Success)
    }
}

/// Recursively collect the names of all `.whl` files under `root`, in a stable order.
fn find_wheels(root: &Path) -> Result<Vec<String>> {
    if !root.is_dir() {
        bail!("Wheel directory not found: `{}`", root.display());
    }

    let mut filenames = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to read `{}`", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(filename) = entry.file_name().to_str() else {
            warn_user!(
                "Ignoring non-UTF-8 file name: `{}`",
                entry.path().display()
            );
            continue;
        };
        if !filename.ends_with(".whl") {
            continue;
        }
        filenames.push(filename.to_string());
    }
    Ok(filenames)
}

/// Append the report to a file, creating it if necessary.
fn append(path: &Path, report: &str) -> Result<()> {
    let mut file = fs_err::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open `{}`", path.display()))?;
    file.write_all(report.as_bytes())
        .with_context(|| format!("Failed to write report to `{}`", path.display()))?;
    Ok(())
}
