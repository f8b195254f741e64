use wheelgrid_settings::Options;

use crate::Cli;

impl Cli {
    /// The [`Options`] given on the command line (or through the environment).
    ///
    /// An empty `--require-matrix` is treated as absent, so that an unset CI input does not
    /// disable the simple-mode requirements.
    pub fn options(&self) -> Options {
        let requirements = &self.requirements;
        Options {
            require_platforms: requirements
                .require_platforms
                .clone()
                .map(|platforms| vec![platforms]),
            require_python_versions: requirements
                .require_python_versions
                .clone()
                .map(|versions| vec![versions]),
            require_freethreaded: requirements.require_freethreaded.clone(),
            require_matrix: requirements
                .require_matrix
                .clone()
                .map(crate::RequireMatrix::into_entries)
                .filter(|entries| !entries.is_empty()),
            fail_on_missing: requirements.fail_on_missing,
            output_format: self.output.output_format,
        }
    }
}
