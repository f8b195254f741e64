// The `unreachable_pub` is to silence false positives in RustRover.
#![allow(dead_code, unreachable_pub)]

use std::borrow::BorrowMut;
use std::path::PathBuf;
use std::process::{Command, Output};

use assert_fs::fixture::{ChildPath, FileTouch, PathChild, PathCreateDir};
use regex::Regex;

use wheelgrid_static::EnvVars;

pub const INSTA_FILTERS: &[(&str, &str)] = &[
    // Rewrite Windows output to Unix output
    (r"\\([\w\d])", "/$1"),
    (r"wheelgrid.exe", "wheelgrid"),
    // The exact message is host language dependent
    (
        r"Caused by: .* \(os error 2\)",
        "Caused by: No such file or directory (os error 2)",
    ),
];

/// Wheels for two platforms, one of them free-threaded.
pub const TWO_WHEELS: &[&str] = &[
    "pkg-1.0-cp312-cp312-manylinux_2_17_x86_64.whl",
    "pkg-1.0-cp314t-cp314t-win_amd64.whl",
];

/// A release-like set of wheels across Linux, Windows and macOS.
pub const RELEASE: &[&str] = &[
    "pkg-1.0-cp312-cp312-manylinux_2_17_x86_64.manylinux2014_x86_64.whl",
    "pkg-1.0-cp313-cp313-manylinux_2_17_x86_64.manylinux2014_x86_64.whl",
    "pkg-1.0-cp312-cp312-manylinux_2_17_aarch64.manylinux2014_aarch64.whl",
    "pkg-1.0-cp312-cp312-win_amd64.whl",
    "pkg-1.0-cp313-cp313-win_amd64.whl",
    "pkg-1.0-cp313-cp313t-win_amd64.whl",
    "pkg-1.0-cp313-cp313-macosx_11_0_arm64.whl",
];

/// Create a context for tests which simplifies shared behavior across tests.
///
/// Each context has its own temporary working directory with an empty `dist` directory.
pub struct TestContext {
    pub temp_dir: ChildPath,
    pub dist: ChildPath,

    /// Standard filters for this test context.
    filters: Vec<(String, String)>,

    #[allow(dead_code)]
    _root: assert_fs::TempDir,
}

impl TestContext {
    pub fn new() -> Self {
        let root = assert_fs::TempDir::new().expect("Failed to create test root directory");

        // Canonicalize the temp dir for consistent snapshot behavior
        let temp_dir = ChildPath::new(root.path().canonicalize().unwrap());
        let dist = temp_dir.child("dist");
        dist.create_dir_all().expect("Failed to create test wheel directory");

        let filters = vec![(
            format!(
                r"{}[\\/]?",
                regex::escape(&temp_dir.path().display().to_string())
            ),
            "[TEMP_DIR]/".to_string(),
        )];

        Self {
            temp_dir,
            dist,
            filters,
            _root: root,
        }
    }

    /// Create empty files with the given names in `dist`.
    #[must_use]
    pub fn with_wheels(self, names: &[&str]) -> Self {
        for name in names {
            self.dist
                .child(name)
                .touch()
                .expect("Failed to create wheel file");
        }
        self
    }

    /// Shared filters for this test context.
    pub fn filters(&self) -> Vec<(&str, &str)> {
        self.filters
            .iter()
            .map(|(p, r)| (p.as_str(), r.as_str()))
            .chain(INSTA_FILTERS.iter().copied())
            .collect()
    }

    /// A `wheelgrid` command, isolated from the developer's (or CI's) environment.
    pub fn command(&self) -> Command {
        let mut command = Command::new(get_bin());
        command
            .env_remove(EnvVars::WHEELGRID_REQUIRE_PLATFORMS)
            .env_remove(EnvVars::WHEELGRID_REQUIRE_PYTHON_VERSIONS)
            .env_remove(EnvVars::WHEELGRID_REQUIRE_FREETHREADED)
            .env_remove(EnvVars::WHEELGRID_REQUIRE_MATRIX)
            .env_remove(EnvVars::WHEELGRID_FAIL_ON_MISSING)
            .env_remove(EnvVars::WHEELGRID_OUTPUT_FILE)
            .env_remove(EnvVars::WHEELGRID_OUTPUT_FORMAT)
            .env_remove(EnvVars::WHEELGRID_CONFIG_FILE)
            .env_remove(EnvVars::WHEELGRID_NO_CONFIG)
            .env_remove(EnvVars::GITHUB_STEP_SUMMARY)
            .env_remove(EnvVars::FORCE_COLOR)
            .env_remove(EnvVars::RUST_LOG)
            .env_remove("CLICOLOR_FORCE")
            .env(EnvVars::NO_COLOR, "1")
            .env(EnvVars::WHEELGRID_NO_WRAP, "1")
            .current_dir(self.temp_dir.path());
        command
    }

    /// A `wheelgrid dist` command.
    pub fn summary(&self) -> Command {
        let mut command = self.command();
        command.arg("dist");
        command
    }
}

/// Returns the wheelgrid binary that cargo built before launching the tests.
///
/// <https://doc.rust-lang.org/cargo/reference/environment-variables.html#environment-variables-cargo-sets-for-crates>
pub fn get_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_wheelgrid"))
}

pub fn apply_filters<T: AsRef<str>>(mut snapshot: String, filters: impl AsRef<[(T, T)]>) -> String {
    for (matcher, replacement) in filters.as_ref() {
        let re = Regex::new(matcher.as_ref()).expect("Do you need to regex::escape your filter?");
        if re.is_match(&snapshot) {
            snapshot = re.replace_all(&snapshot, replacement.as_ref()).to_string();
        }
    }
    snapshot
}

/// Execute the command and format its output status, stdout and stderr into a snapshot string.
///
/// This function is derived from `insta_cmd`s `spawn_with_info`.
pub fn run_and_format<T: AsRef<str>>(
    mut command: impl BorrowMut<Command>,
    filters: impl AsRef<[(T, T)]>,
) -> (String, Output) {
    let program = command
        .borrow_mut()
        .get_program()
        .to_string_lossy()
        .to_string();

    let output = command
        .borrow_mut()
        .output()
        .unwrap_or_else(|err| panic!("Failed to spawn {program}: {err}"));

    let snapshot = apply_filters(
        format!(
            "success: {:?}\nexit_code: {}\n----- stdout -----\n{}\n----- stderr -----\n{}",
            output.status.success(),
            output.status.code().unwrap_or(!0),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        ),
        filters,
    );

    (snapshot, output)
}

/// Run the command and snapshot its exit status, stdout and stderr, with default filters or with
/// custom filters.
#[allow(unused_macros)]
macro_rules! wheelgrid_snapshot {
    ($spawnable:expr, @$snapshot:literal) => {{
        wheelgrid_snapshot!($crate::common::INSTA_FILTERS.to_vec(), $spawnable, @$snapshot)
    }};
    ($filters:expr, $spawnable:expr, @$snapshot:literal) => {{
        let (snapshot, output) = $crate::common::run_and_format($spawnable, &$filters);
        ::insta::assert_snapshot!(snapshot, @$snapshot);
        output
    }};
}

/// <https://stackoverflow.com/a/31749071/3549270>
#[allow(unused_imports)]
pub(crate) use wheelgrid_snapshot;
