use std::ops::Deref;
use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use tracing::debug;

use wheelgrid_warnings::warn_user;

pub use crate::combine::*;
pub use crate::settings::*;

mod combine;
mod settings;

/// The [`Options`] as loaded from a configuration file on disk.
#[derive(Debug, Clone)]
pub struct FilesystemOptions(Options);

impl FilesystemOptions {
    /// Convert the [`FilesystemOptions`] into [`Options`].
    pub fn into_options(self) -> Options {
        self.0
    }
}

impl Deref for FilesystemOptions {
    type Target = Options;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FilesystemOptions {
    /// Find the [`FilesystemOptions`] for the given path.
    ///
    /// The search starts at the given path and goes up the directory tree until a
    /// `wheelgrid.toml` file or a `pyproject.toml` file with a `[tool.wheelgrid]` table is found.
    pub fn find(path: &Path) -> Result<Option<Self>, Error> {
        for ancestor in path.ancestors() {
            match Self::from_directory(ancestor) {
                Ok(Some(options)) => {
                    return Ok(Some(options));
                }
                Ok(None) => {
                    // Continue traversing the directory tree.
                }
                Err(Error::PyprojectToml(path, err)) => {
                    // An unrelated `pyproject.toml` may be invalid; warn and keep looking.
                    warn_user!(
                        "Failed to parse `{}` during settings discovery:\n{}",
                        path.display().cyan(),
                        textwrap::indent(&err.to_string(), "  ")
                    );
                }
                Err(err) => {
                    return Err(err);
                }
            }
        }
        Ok(None)
    }

    /// Load a [`FilesystemOptions`] from a directory, preferring a `wheelgrid.toml` file over a
    /// `pyproject.toml` file.
    pub fn from_directory(dir: &Path) -> Result<Option<Self>, Error> {
        let path = dir.join("wheelgrid.toml");
        match fs_err::read_to_string(&path) {
            Ok(content) => {
                let options = toml::from_str::<Options>(&content)
                    .map_err(|err| Error::WheelgridToml(path.clone(), Box::new(err)))?;

                // If the directory also contains a `[tool.wheelgrid]` table, it is ignored.
                let pyproject = dir.join("pyproject.toml");
                if let Some(pyproject) = fs_err::read_to_string(pyproject)
                    .ok()
                    .and_then(|content| toml::from_str::<PyProjectToml>(&content).ok())
                    && pyproject
                        .tool
                        .as_ref()
                        .is_some_and(|tool| tool.wheelgrid.is_some())
                {
                    warn_user!(
                        "Found both a `wheelgrid.toml` file and a `[tool.wheelgrid]` section in an adjacent `pyproject.toml`. The `[tool.wheelgrid]` section will be ignored in favor of the `wheelgrid.toml` file."
                    );
                }

                debug!("Found configuration at `{}`", path.display());
                return Ok(Some(Self(options)));
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => return Err(err.into()),
        }

        let path = dir.join("pyproject.toml");
        match fs_err::read_to_string(&path) {
            Ok(content) => {
                // Parse, but skip any `pyproject.toml` that doesn't have a `[tool.wheelgrid]` section.
                let pyproject: PyProjectToml = toml::from_str(&content)
                    .map_err(|err| Error::PyprojectToml(path.clone(), Box::new(err)))?;
                let Some(tool) = pyproject.tool else {
                    debug!(
                        "Skipping `pyproject.toml` in `{}` (no `[tool]` section)",
                        dir.display()
                    );
                    return Ok(None);
                };
                let Some(options) = tool.wheelgrid else {
                    debug!(
                        "Skipping `pyproject.toml` in `{}` (no `[tool.wheelgrid]` section)",
                        dir.display()
                    );
                    return Ok(None);
                };

                debug!("Found configuration at `{}`", path.display());
                return Ok(Some(Self(options)));
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => return Err(err.into()),
        }

        Ok(None)
    }

    /// Load a [`FilesystemOptions`] from a `wheelgrid.toml` file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        debug!("Reading configuration from: `{}`", path.display());

        let content = fs_err::read_to_string(path)?;
        let options = toml::from_str::<Options>(&content)
            .map_err(|err| Error::WheelgridToml(path.to_path_buf(), Box::new(err)))?;
        Ok(Self(options))
    }
}

impl From<Options> for FilesystemOptions {
    fn from(options: Options) -> Self {
        Self(options)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to parse: `{}`", _0.display())]
    PyprojectToml(PathBuf, #[source] Box<toml::de::Error>),

    #[error("Failed to parse: `{}`", _0.display())]
    WheelgridToml(PathBuf, #[source] Box<toml::de::Error>),
}
