//! A presence matrix of the platforms and interpreters covered by a set of wheels.

use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

use tracing::debug;

use wheelgrid_filename::{WheelFilename, WheelFilenameError};
use wheelgrid_tags::{Implementation, Interpreter, Platform};

/// The set of `(platform, interpreter)` pairs for which at least one wheel exists.
///
/// Both axes are derived: a platform or interpreter only appears once a wheel provides it.
/// Iteration is always in canonical order, regardless of insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildMatrix {
    rows: BTreeMap<Platform, BTreeSet<Interpreter>>,
}

impl BuildMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a matrix from wheel filenames (without directory components).
    ///
    /// Malformed filenames are excluded from the matrix and returned alongside it; the caller
    /// decides whether they are fatal.
    pub fn from_filenames<I, S>(filenames: I) -> (Self, Vec<WheelFilenameError>)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut matrix = Self::new();
        let mut errors = Vec::new();
        for filename in filenames {
            match WheelFilename::from_str(filename.as_ref()) {
                Ok(wheel) => matrix.insert_wheel(&wheel),
                Err(err) => {
                    debug!("Skipping malformed wheel filename: {}", filename.as_ref());
                    errors.push(err);
                }
            }
        }
        (matrix, errors)
    }

    /// Mark every `(platform, interpreter)` pair provided by the wheel as present.
    pub fn insert_wheel(&mut self, wheel: &WheelFilename) {
        for (platform, interpreter) in wheel.classify() {
            if self.insert(platform.clone(), interpreter.clone()) {
                debug!("Found {interpreter} on {platform} ({wheel})");
            }
        }
    }

    /// Mark a `(platform, interpreter)` pair as present.
    ///
    /// Returns `false` if the pair was already present.
    pub fn insert(&mut self, platform: Platform, interpreter: Interpreter) -> bool {
        self.rows.entry(platform).or_default().insert(interpreter)
    }

    /// Returns `true` if no wheel has been added.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The platforms in the matrix, in canonical order.
    pub fn platforms(&self) -> impl Iterator<Item = &Platform> {
        self.rows.keys()
    }

    /// Every interpreter present on at least one platform, in canonical order.
    pub fn versions(&self) -> BTreeSet<&Interpreter> {
        self.rows.values().flatten().collect()
    }

    /// The versioned interpreters of one implementation present on at least one platform.
    ///
    /// When `free_threaded` is `Some`, only interpreters of that flavor are included.
    pub fn versions_of(
        &self,
        implementation: Implementation,
        free_threaded: Option<bool>,
    ) -> BTreeSet<&Interpreter> {
        self.rows
            .values()
            .flatten()
            .filter(|interpreter| interpreter.implementation() == Some(implementation))
            .filter(|interpreter| {
                free_threaded.is_none_or(|flavor| interpreter.is_free_threaded() == flavor)
            })
            .collect()
    }

    /// Every platform with its interpreters, in canonical order.
    pub fn rows(&self) -> impl Iterator<Item = (&Platform, &BTreeSet<Interpreter>)> {
        self.rows.iter()
    }

    pub fn contains_platform(&self, platform: &Platform) -> bool {
        self.rows.contains_key(platform)
    }

    /// Returns `true` if a wheel exists for the given platform and interpreter.
    pub fn contains(&self, platform: &Platform, interpreter: &Interpreter) -> bool {
        self.rows
            .get(platform)
            .is_some_and(|row| row.contains(interpreter))
    }
}
