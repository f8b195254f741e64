//! Rendering of the build matrix and validation findings.

use std::fmt::Write;

use serde::Serialize;

use wheelgrid_matrix::BuildMatrix;
use wheelgrid_requirements::{Finding, Validation};
use wheelgrid_settings::OutputFormat;
use wheelgrid_tags::{Interpreter, Platform};

/// Render the report in the given format.
pub(crate) fn render(
    matrix: &BuildMatrix,
    validation: &Validation,
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Markdown => Ok(markdown(matrix, validation)),
        OutputFormat::Json => json(matrix, validation),
    }
}

/// A Markdown table with one row per platform and one column per version, followed by the
/// missing wheels, if any.
pub(crate) fn markdown(matrix: &BuildMatrix, validation: &Validation) -> String {
    let versions = matrix.versions();

    let mut output = String::new();
    output.push_str("# Build Summary - All Platforms and Architectures\n\n");

    output.push_str("| Platform |");
    for version in &versions {
        let _ = write!(output, " {version} |");
    }
    output.push('\n');

    output.push_str("|----------|");
    for _ in &versions {
        output.push_str("-----|");
    }
    output.push('\n');

    for platform in matrix.platforms() {
        let _ = write!(output, "| **{platform}** |");
        for version in &versions {
            let cell = if matrix.contains(platform, version) {
                "✅"
            } else {
                "-"
            };
            let _ = write!(output, " {cell} |");
        }
        output.push('\n');
    }

    if !validation.passed() {
        output.push_str("\n## ⚠️ Missing Required Wheels\n\n");
        for line in missing(validation) {
            let _ = writeln!(output, "- ❌ {line}");
        }
    }

    output
}

/// Group the findings into one line per kind (and per platform).
fn missing(validation: &Validation) -> Vec<String> {
    let mut platforms = Vec::new();
    let mut platform_versions: Vec<(&Platform, Vec<&Interpreter>)> = Vec::new();
    let mut versions = Vec::new();
    let mut freethreaded = Vec::new();
    let mut patterns = Vec::new();

    for finding in validation.findings() {
        match finding {
            Finding::MissingPlatform { platform } => platforms.push(platform.to_string()),
            Finding::MissingPlatformVersion { platform, version } => {
                // Findings are sorted by platform, so a platform's versions are contiguous.
                match platform_versions.last_mut() {
                    Some((last, row)) if *last == platform => row.push(version),
                    _ => platform_versions.push((platform, vec![version])),
                }
            }
            Finding::MissingVersion { version } if version.is_free_threaded() => {
                freethreaded.push(version.to_string());
            }
            Finding::MissingVersion { version } => versions.push(version.to_string()),
            Finding::UnmatchedPattern { .. } => patterns.push(finding.to_string()),
        }
    }

    let mut lines = Vec::new();
    if !platforms.is_empty() {
        lines.push(format!(
            "Missing required platforms: {}",
            platforms.join(", ")
        ));
    }
    for (platform, versions) in platform_versions {
        let versions = versions
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>();
        lines.push(format!(
            "Platform '{platform}' missing required versions: {}",
            versions.join(", ")
        ));
    }
    if !versions.is_empty() {
        lines.push(format!(
            "Missing required Python versions: {}",
            versions.join(", ")
        ));
    }
    if !freethreaded.is_empty() {
        lines.push(format!(
            "Missing required free-threaded Python versions: {}",
            freethreaded.join(", ")
        ));
    }
    lines.extend(patterns);
    lines
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    platforms: Vec<&'a Platform>,
    versions: Vec<&'a Interpreter>,
    matrix: Vec<JsonRow<'a>>,
    findings: &'a [Finding],
    passed: bool,
}

#[derive(Debug, Serialize)]
struct JsonRow<'a> {
    platform: &'a Platform,
    versions: Vec<&'a Interpreter>,
}

/// A JSON document with both axes, the present cells per platform, and the findings.
pub(crate) fn json(matrix: &BuildMatrix, validation: &Validation) -> anyhow::Result<String> {
    let report = JsonReport {
        platforms: matrix.platforms().collect(),
        versions: matrix.versions().into_iter().collect(),
        matrix: matrix
            .rows()
            .map(|(platform, row)| JsonRow {
                platform,
                versions: row.iter().collect(),
            })
            .collect(),
        findings: validation.findings(),
        passed: validation.passed(),
    };
    let mut output = serde_json::to_string_pretty(&report)?;
    output.push('\n');
    Ok(output)
}
