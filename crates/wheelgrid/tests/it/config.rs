use assert_cmd::assert::OutputAssertExt;
use assert_fs::fixture::{FileWriteStr, PathChild, PathCreateDir};
use indoc::indoc;
use predicates::prelude::*;

use wheelgrid_static::EnvVars;

use crate::common::{TWO_WHEELS, TestContext, wheelgrid_snapshot};

#[test]
fn config_wheelgrid_toml() {
    let context = TestContext::new().with_wheels(TWO_WHEELS);
    context
        .temp_dir
        .child("wheelgrid.toml")
        .write_str(indoc! {r#"
            require-platforms = ["Linux x86_64", "macOS ARM64"]
            require-python-versions = ["3.12"]
        "#})
        .unwrap();

    wheelgrid_snapshot!(context.filters(), context.summary(), @r"
    success: false
    exit_code: 1
    ----- stdout -----
    # Build Summary - All Platforms and Architectures

    | Platform | 3.12 | 3.14t |
    |----------|-----|-----|
    | **Linux x86_64** | ✅ | - |
    | **Windows x64** | - | ✅ |

    ## ⚠️ Missing Required Wheels

    - ❌ Missing required platforms: macOS ARM64

    ----- stderr -----
    error: Required wheels are missing!
      - Missing required platform: macOS ARM64
    ");

    // The command line takes precedence over the configuration file.
    context
        .summary()
        .arg("--require-platforms")
        .arg("Linux x86_64")
        .assert()
        .success();

    // As does the environment.
    context
        .summary()
        .env(EnvVars::WHEELGRID_FAIL_ON_MISSING, "false")
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "warning: Required wheels are missing, but continuing...",
        ));

    // Unless configuration is disabled entirely.
    context
        .summary()
        .arg("--no-config")
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn config_discovered_from_parent() {
    let context = TestContext::new().with_wheels(TWO_WHEELS);
    context
        .temp_dir
        .child("wheelgrid.toml")
        .write_str(r#"require-platforms = ["macOS ARM64"]"#)
        .unwrap();
    let child = context.temp_dir.child("ci");
    child.create_dir_all().unwrap();

    context
        .command()
        .current_dir(child.path())
        .arg("../dist")
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "Missing required platform: macOS ARM64",
        ));
}

#[test]
fn config_pyproject_toml() {
    let context = TestContext::new().with_wheels(TWO_WHEELS);
    context
        .temp_dir
        .child("pyproject.toml")
        .write_str(indoc! {r#"
            [project]
            name = "pkg"
            version = "1.0"

            [tool.wheelgrid]
            require-freethreaded = "3.13+"
            fail-on-missing = false
            output-format = "json"
        "#})
        .unwrap();

    context
        .summary()
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""passed": false"#))
        .stderr(predicate::str::contains(
            "Missing required free-threaded Python 3.13t",
        ));
}

/// A `pyproject.toml` without a `[tool.wheelgrid]` table is skipped.
#[test]
fn config_pyproject_toml_without_table() {
    let context = TestContext::new().with_wheels(TWO_WHEELS);
    context
        .temp_dir
        .child("pyproject.toml")
        .write_str(indoc! {r#"
            [project]
            name = "pkg"
            version = "1.0"
        "#})
        .unwrap();

    context
        .summary()
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn config_both_files() {
    let context = TestContext::new().with_wheels(TWO_WHEELS);
    context
        .temp_dir
        .child("wheelgrid.toml")
        .write_str(r#"require-platforms = ["Linux x86_64"]"#)
        .unwrap();
    context
        .temp_dir
        .child("pyproject.toml")
        .write_str(indoc! {r#"
            [tool.wheelgrid]
            require-platforms = ["macOS ARM64"]
        "#})
        .unwrap();

    wheelgrid_snapshot!(context.filters(), context.summary(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    # Build Summary - All Platforms and Architectures

    | Platform | 3.12 | 3.14t |
    |----------|-----|-----|
    | **Linux x86_64** | ✅ | - |
    | **Windows x64** | - | ✅ |

    ----- stderr -----
    warning: Found both a `wheelgrid.toml` file and a `[tool.wheelgrid]` section in an adjacent `pyproject.toml`. The `[tool.wheelgrid]` section will be ignored in favor of the `wheelgrid.toml` file.
    ");
}

#[test]
fn config_file_explicit() {
    let context = TestContext::new().with_wheels(TWO_WHEELS);
    let config = context.temp_dir.child("ci").child("wheelgrid.toml");
    config
        .write_str(indoc! {r#"
            [[require-matrix]]
            platform = "Windows*"
            versions = "3.14"
            freethreaded = "3.14"
        "#})
        .unwrap();

    wheelgrid_snapshot!(context.filters(), context.summary()
        .arg("--config-file")
        .arg(config.path()), @r"
    success: false
    exit_code: 1
    ----- stdout -----
    # Build Summary - All Platforms and Architectures

    | Platform | 3.12 | 3.14t |
    |----------|-----|-----|
    | **Linux x86_64** | ✅ | - |
    | **Windows x64** | - | ✅ |

    ## ⚠️ Missing Required Wheels

    - ❌ Platform 'Windows x64' missing required versions: 3.14

    ----- stderr -----
    error: Required wheels are missing!
      - Platform 'Windows x64' missing required version: 3.14
    ");
}

#[test]
fn config_matrix_overrides_simple() {
    let context = TestContext::new().with_wheels(TWO_WHEELS);
    context
        .temp_dir
        .child("wheelgrid.toml")
        .write_str(indoc! {r#"
            require-platforms = ["macOS ARM64"]

            [[require-matrix]]
            platform = "Linux*"
            versions = "3.12"
        "#})
        .unwrap();

    wheelgrid_snapshot!(context.filters(), context.summary(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    # Build Summary - All Platforms and Architectures

    | Platform | 3.12 | 3.14t |
    |----------|-----|-----|
    | **Linux x86_64** | ✅ | - |
    | **Windows x64** | - | ✅ |

    ----- stderr -----
    warning: `require-matrix` is set, so `require-platforms`, `require-python-versions` and `require-freethreaded` are ignored
    ");
}

#[test]
fn config_matrix_with_default_simple_requirements() {
    let context = TestContext::new().with_wheels(TWO_WHEELS);
    context
        .temp_dir
        .child("wheelgrid.toml")
        .write_str(indoc! {r#"
            [[require-matrix]]
            platform = "Linux*"
            versions = "3.12"
        "#})
        .unwrap();

    // The defaults a CI workflow passes through require nothing, so there is nothing to ignore.
    wheelgrid_snapshot!(context.filters(), context.summary()
        .arg("--require-platforms")
        .arg("")
        .arg("--require-python-versions")
        .arg("")
        .arg("--require-freethreaded")
        .arg("none"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    # Build Summary - All Platforms and Architectures

    | Platform | 3.12 | 3.14t |
    |----------|-----|-----|
    | **Linux x86_64** | ✅ | - |
    | **Windows x64** | - | ✅ |

    ----- stderr -----
    ");
}

#[test]
fn config_invalid() {
    let context = TestContext::new().with_wheels(TWO_WHEELS);
    context
        .temp_dir
        .child("wheelgrid.toml")
        .write_str(r#"require-platform = ["Linux x86_64"]"#)
        .unwrap();

    context
        .summary()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("error: Failed to parse:"))
        .stderr(predicate::str::contains("wheelgrid.toml"))
        .stderr(predicate::str::contains("unknown field `require-platform`"));
}

/// An unrelated, invalid `pyproject.toml` is skipped with a warning.
#[test]
fn config_invalid_pyproject_toml() {
    let context = TestContext::new().with_wheels(TWO_WHEELS);
    context
        .temp_dir
        .child("pyproject.toml")
        .write_str("[project\n")
        .unwrap();

    context
        .summary()
        .assert()
        .success()
        .stderr(predicate::str::contains("during settings discovery"));
}
