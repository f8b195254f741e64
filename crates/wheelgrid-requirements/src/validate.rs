use std::collections::BTreeSet;

use serde::Serialize;
use tracing::{debug, trace};

use wheelgrid_matrix::BuildMatrix;

use crate::{Finding, RequirementMatrix, Requirements};

/// The outcome of validating a build matrix against a set of requirements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Validation {
    findings: Vec<Finding>,
}

impl Validation {
    /// Returns `true` if every requirement is satisfied.
    pub fn passed(&self) -> bool {
        self.findings.is_empty()
    }

    /// The missing builds, deduplicated and in canonical order.
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }
}

impl FromIterator<Finding> for Validation {
    fn from_iter<T: IntoIterator<Item = Finding>>(iter: T) -> Self {
        let findings = iter.into_iter().collect::<BTreeSet<_>>();
        Self {
            findings: findings.into_iter().collect(),
        }
    }
}

/// Validate the matrix against the requirements.
pub fn validate(matrix: &BuildMatrix, requirements: &Requirements) -> Validation {
    match requirements {
        Requirements::Simple {
            platforms,
            versions,
            freethreaded,
        } => {
            let present = matrix.versions();

            let missing_platforms = platforms
                .iter()
                .filter(|platform| !matrix.contains_platform(platform))
                .map(|platform| Finding::MissingPlatform {
                    platform: platform.clone(),
                });

            let mut required = versions.expand(matrix);
            required.extend(freethreaded.expand(present.iter().copied(), matrix));
            debug!(
                "Checking {} required version(s) across {} platform(s)",
                required.len(),
                matrix.platforms().count()
            );
            let missing_versions = required
                .into_iter()
                .filter(|version| !present.contains(version))
                .map(|version| Finding::MissingVersion { version });

            missing_platforms.chain(missing_versions).collect()
        }
        Requirements::Matrix(requirements) => validate_matrix(matrix, requirements),
    }
}

fn validate_matrix(matrix: &BuildMatrix, requirements: &RequirementMatrix) -> Validation {
    let mut findings = Vec::new();

    for (platform, row) in matrix.rows() {
        let Some((index, requirement)) = requirements.claim(platform) else {
            trace!("No requirement pattern matches `{platform}`");
            continue;
        };
        trace!(
            "Checking `{platform}` against pattern #{index} (`{}`)",
            requirement.pattern
        );

        let mut required = requirement.versions.expand(matrix);
        required.extend(requirement.freethreaded.expand(row, matrix));
        findings.extend(
            required
                .into_iter()
                .filter(|version| !row.contains(version))
                .map(|version| Finding::MissingPlatformVersion {
                    platform: platform.clone(),
                    version,
                }),
        );
    }

    // A pattern that matches nothing is reported on its own; a pattern that matches only
    // platforms claimed by an earlier pattern is not.
    for (index, requirement) in requirements.iter().enumerate() {
        if matrix
            .platforms()
            .any(|platform| requirement.pattern.matches(platform))
        {
            continue;
        }
        findings.push(match requirement.pattern.platform() {
            Some(platform) => Finding::MissingPlatform {
                platform: platform.clone(),
            },
            None => Finding::UnmatchedPattern {
                pattern: requirement.pattern.to_string(),
                index,
            },
        });
    }

    findings.into_iter().collect()
}
