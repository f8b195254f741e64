use assert_cmd::assert::OutputAssertExt;
use assert_fs::fixture::{FileTouch, FileWriteStr, PathChild, PathCreateDir};
use predicates::prelude::*;

use wheelgrid_static::EnvVars;

use crate::common::{RELEASE, TWO_WHEELS, TestContext, wheelgrid_snapshot};

#[test]
fn summary_passes() {
    let context = TestContext::new().with_wheels(TWO_WHEELS);

    wheelgrid_snapshot!(context.filters(), context.summary()
        .arg("--require-platforms")
        .arg("Linux x86_64, Windows x64")
        .arg("--require-python-versions")
        .arg("3.12, 3.14t"), @r"
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
fn summary_without_requirements() {
    let context = TestContext::new().with_wheels(TWO_WHEELS);

    context
        .summary()
        .assert()
        .success()
        .stdout(predicate::str::contains("| **Windows x64** | - | ✅ |"))
        .stdout(predicate::str::contains("Missing Required Wheels").not())
        .stderr(predicate::str::is_empty());
}

#[test]
fn summary_missing_platform() {
    let context = TestContext::new().with_wheels(TWO_WHEELS);

    wheelgrid_snapshot!(context.filters(), context.summary()
        .arg("--require-platforms")
        .arg("Linux x86_64, Windows x64, macOS ARM64")
        .arg("--require-python-versions")
        .arg("3.12, 3.14t"), @r"
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
}

#[test]
fn summary_missing_but_continuing() {
    let context = TestContext::new().with_wheels(TWO_WHEELS);

    wheelgrid_snapshot!(context.filters(), context.summary()
        .arg("--require-python-versions")
        .arg("3.11-3.12, PyPy3.10")
        .arg("--require-freethreaded")
        .arg("3.13+")
        .arg("--fail-on-missing")
        .arg("false"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    # Build Summary - All Platforms and Architectures

    | Platform | 3.12 | 3.14t |
    |----------|-----|-----|
    | **Linux x86_64** | ✅ | - |
    | **Windows x64** | - | ✅ |

    ## ⚠️ Missing Required Wheels

    - ❌ Missing required Python versions: 3.11, PyPy3.10
    - ❌ Missing required free-threaded Python versions: 3.13t

    ----- stderr -----
    warning: Required wheels are missing, but continuing...
      - Missing required Python version: 3.11
      - Missing required free-threaded Python 3.13t
      - Missing required Python version: PyPy3.10
    ");
}

#[test]
fn summary_invalid_wheels_are_ignored() {
    let context = TestContext::new().with_wheels(TWO_WHEELS);
    context.dist.child("broken.whl").touch().unwrap();
    context.dist.child("notes.txt").touch().unwrap();
    context.dist.child("pkg-1.0.tar.gz").touch().unwrap();

    wheelgrid_snapshot!(context.filters(), context.summary()
        .arg("--require-platforms")
        .arg("Linux x86_64"), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    # Build Summary - All Platforms and Architectures

    | Platform | 3.12 | 3.14t |
    |----------|-----|-----|
    | **Linux x86_64** | ✅ | - |
    | **Windows x64** | - | ✅ |

    ----- stderr -----
    warning: Ignoring invalid wheel: The wheel filename "broken.whl" is invalid: Must have a version
    "#);
}

#[test]
fn summary_nested_directories() {
    let context = TestContext::new();
    let linux = context.dist.child("wheels-linux");
    linux.create_dir_all().unwrap();
    linux
        .child("pkg-1.0-cp312-cp312-manylinux_2_17_x86_64.whl")
        .touch()
        .unwrap();
    let windows = context.dist.child("wheels-windows").child("x64");
    windows.create_dir_all().unwrap();
    windows
        .child("pkg-1.0-cp312-cp312-win_amd64.whl")
        .touch()
        .unwrap();

    wheelgrid_snapshot!(context.filters(), context.summary()
        .arg("--require-platforms")
        .arg("Linux x86_64, Windows x64"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    # Build Summary - All Platforms and Architectures

    | Platform | 3.12 |
    |----------|-----|
    | **Linux x86_64** | ✅ |
    | **Windows x64** | ✅ |

    ----- stderr -----
    ");
}

#[test]
fn summary_no_wheels() {
    let context = TestContext::new();
    context.dist.child("README.md").touch().unwrap();

    wheelgrid_snapshot!(context.filters(), context.summary(), @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    error: No wheel files found in `dist`
    ");
}

#[test]
fn summary_missing_directory() {
    let context = TestContext::new();

    wheelgrid_snapshot!(context.filters(), context.command().arg("missing"), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    error: Wheel directory not found: `missing`
    ");
}

/// Requirements are parsed before the wheel directory is scanned.
#[test]
fn summary_invalid_requirement() {
    let context = TestContext::new();

    wheelgrid_snapshot!(context.filters(), context.command()
        .arg("missing")
        .arg("--require-python-versions")
        .arg("3.14-3.10"), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    error: Failed to parse requirements
      Caused by: Invalid Python version range `3.14-3.10`: the lower bound is greater than the upper bound
    ");

    wheelgrid_snapshot!(context.filters(), context.command()
        .arg("missing")
        .arg("--require-freethreaded")
        .arg("maybe"), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    error: Failed to parse requirements
      Caused by: Invalid free-threaded requirement `maybe`: expected `none`, `all`, a version (`3.14`) or an open-ended bound (`3.14+`)
    ");
}

#[test]
fn summary_require_matrix() {
    let context = TestContext::new().with_wheels(RELEASE);

    wheelgrid_snapshot!(context.filters(), context.summary()
        .env(
            EnvVars::WHEELGRID_REQUIRE_MATRIX,
            r#"[
                {"platform": "Linux*", "versions": "3.12-3.13"},
                {"platform": "Windows x64", "versions": "3.12+", "freethreaded": "all"},
                {"platform": "macOS *", "versions": "3.13"}
            ]"#,
        ), @r"
    success: false
    exit_code: 1
    ----- stdout -----
    # Build Summary - All Platforms and Architectures

    | Platform | 3.12 | 3.13 | 3.13t |
    |----------|-----|-----|-----|
    | **Linux x86_64** | ✅ | ✅ | - |
    | **Linux aarch64** | ✅ | - | - |
    | **Windows x64** | ✅ | ✅ | ✅ |
    | **macOS ARM64** | - | ✅ | - |

    ## ⚠️ Missing Required Wheels

    - ❌ Platform 'Linux aarch64' missing required versions: 3.13
    - ❌ Platform 'Windows x64' missing required versions: 3.12t

    ----- stderr -----
    error: Required wheels are missing!
      - Platform 'Linux aarch64' missing required version: 3.13
      - Platform 'Windows x64' missing required version: 3.12t
    ");
}

#[test]
fn summary_require_matrix_unmatched() {
    let context = TestContext::new().with_wheels(RELEASE);

    wheelgrid_snapshot!(context.filters(), context.summary()
        .arg("--require-matrix")
        .arg(r#"[{"platform": "musllinux*", "versions": "3.12"}, {"platform": "Windows ARM64", "versions": "3.12"}]"#), @r"
    success: false
    exit_code: 1
    ----- stdout -----
    # Build Summary - All Platforms and Architectures

    | Platform | 3.12 | 3.13 | 3.13t |
    |----------|-----|-----|-----|
    | **Linux x86_64** | ✅ | ✅ | - |
    | **Linux aarch64** | ✅ | - | - |
    | **Windows x64** | ✅ | ✅ | ✅ |
    | **macOS ARM64** | - | ✅ | - |

    ## ⚠️ Missing Required Wheels

    - ❌ Missing required platforms: Windows ARM64
    - ❌ No platforms found matching pattern: musllinux*

    ----- stderr -----
    error: Required wheels are missing!
      - Missing required platform: Windows ARM64
      - No platforms found matching pattern: musllinux*
    ");
}

/// An empty `require-matrix` falls back to the simple requirements.
#[test]
fn summary_empty_require_matrix() {
    let context = TestContext::new().with_wheels(TWO_WHEELS);

    context
        .summary()
        .env(EnvVars::WHEELGRID_REQUIRE_MATRIX, "")
        .env(EnvVars::WHEELGRID_REQUIRE_PLATFORMS, "macOS ARM64")
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "Missing required platform: macOS ARM64",
        ));
}

#[test]
fn summary_require_matrix_invalid() {
    let context = TestContext::new().with_wheels(TWO_WHEELS);

    context
        .summary()
        .arg("--require-matrix")
        .arg("{")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid JSON in `require-matrix`"));
}

#[test]
fn summary_json() {
    let context = TestContext::new().with_wheels(TWO_WHEELS);

    wheelgrid_snapshot!(context.filters(), context.summary()
        .arg("--output-format")
        .arg("json")
        .arg("--require-platforms")
        .arg("macOS ARM64"), @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    {
      "platforms": [
        "Linux x86_64",
        "Windows x64"
      ],
      "versions": [
        "3.12",
        "3.14t"
      ],
      "matrix": [
        {
          "platform": "Linux x86_64",
          "versions": [
            "3.12"
          ]
        },
        {
          "platform": "Windows x64",
          "versions": [
            "3.14t"
          ]
        }
      ],
      "findings": [
        {
          "kind": "missing-platform",
          "platform": "macOS ARM64"
        }
      ],
      "passed": false
    }

    ----- stderr -----
    error: Required wheels are missing!
      - Missing required platform: macOS ARM64
    "#);
}

#[test]
fn summary_output_file() {
    let context = TestContext::new().with_wheels(TWO_WHEELS);
    let output = context.temp_dir.child("summary.md");

    let result = context
        .summary()
        .arg("--output-file")
        .arg(output.path())
        .output()
        .unwrap();
    assert!(result.status.success());

    // The report is both printed and written to the file.
    let written = fs_err::read_to_string(output.path()).unwrap();
    assert_eq!(String::from_utf8_lossy(&result.stdout), written);
    insta::assert_snapshot!(written, @r"
    # Build Summary - All Platforms and Architectures

    | Platform | 3.12 | 3.14t |
    |----------|-----|-----|
    | **Linux x86_64** | ✅ | - |
    | **Windows x64** | - | ✅ |
    ");
}

#[test]
fn summary_output_file_invalid() {
    let context = TestContext::new().with_wheels(TWO_WHEELS);

    context
        .summary()
        .arg("--output-file")
        .arg("missing/summary.md")
        .assert()
        .code(2)
        .stderr(predicate::str::contains(
            "error: Failed to write report to `missing/summary.md`",
        ));
}

#[test]
fn summary_github_step_summary() {
    let context = TestContext::new().with_wheels(TWO_WHEELS);
    let step_summary = context.temp_dir.child("step_summary.md");
    step_summary.write_str("# Tests\n\nAll passed.\n\n").unwrap();

    // In GitHub Actions, the report is appended to the job summary instead of printed.
    wheelgrid_snapshot!(context.filters(), context.summary()
        .env(EnvVars::GITHUB_STEP_SUMMARY, step_summary.path())
        .arg("--require-platforms")
        .arg("macOS ARM64"), @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    error: Required wheels are missing!
      - Missing required platform: macOS ARM64
    ");

    insta::assert_snapshot!(fs_err::read_to_string(step_summary.path()).unwrap(), @r"
    # Tests

    All passed.

    # Build Summary - All Platforms and Architectures

    | Platform | 3.12 | 3.14t |
    |----------|-----|-----|
    | **Linux x86_64** | ✅ | - |
    | **Windows x64** | - | ✅ |

    ## ⚠️ Missing Required Wheels

    - ❌ Missing required platforms: macOS ARM64
    ");
}

#[test]
fn summary_quiet() {
    let context = TestContext::new().with_wheels(TWO_WHEELS);
    let output = context.temp_dir.child("summary.md");

    wheelgrid_snapshot!(context.filters(), context.summary()
        .arg("--quiet")
        .arg("--output-file")
        .arg(output.path())
        .arg("--require-platforms")
        .arg("macOS ARM64"), @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    ");

    // The report is still written.
    assert!(
        fs_err::read_to_string(output.path())
            .unwrap()
            .contains("Missing required platforms: macOS ARM64")
    );
}

#[test]
fn summary_quiet_no_wheels() {
    let context = TestContext::new();
    context.dist.child("README.md").touch().unwrap();

    // Fatal errors are printed even when quiet.
    wheelgrid_snapshot!(context.filters(), context.summary().arg("--quiet"), @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    error: No wheel files found in `dist`
    ");
}

#[test]
fn summary_verbose() {
    let context = TestContext::new().with_wheels(TWO_WHEELS);

    context
        .summary()
        .arg("--verbose")
        .assert()
        .success()
        .stderr(predicate::str::contains("Found 2 wheel file(s) in `dist`"));
}
