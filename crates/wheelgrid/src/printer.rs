use anstream::{eprint, print};

/// Where user-facing output goes.
///
/// `--verbose` only affects `tracing` output, so it has no printer of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Printer {
    /// Print the report to stdout and diagnostics to stderr.
    Default,
    /// Print nothing but fatal errors.
    Quiet,
}

impl Printer {
    pub(crate) fn new(quiet: bool) -> Self {
        if quiet { Self::Quiet } else { Self::Default }
    }

    /// The stream for the report.
    pub(crate) fn stdout(self) -> Stdout {
        match self {
            Self::Default => Stdout::Enabled,
            Self::Quiet => Stdout::Disabled,
        }
    }

    /// The stream for diagnostics, such as the list of missing wheels.
    pub(crate) fn stderr(self) -> Stderr {
        match self {
            Self::Default => Stderr::Enabled,
            Self::Quiet => Stderr::Disabled,
        }
    }

    /// The stream for errors that end the run, which `--quiet` does not silence.
    pub(crate) fn fatal(self) -> Stderr {
        match self {
            Self::Default | Self::Quiet => Stderr::Enabled,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Stdout {
    Enabled,
    Disabled,
}

impl std::fmt::Write for Stdout {
    fn write_str(&mut self, s: &str) -> std::fmt::Result {
        if *self == Self::Enabled {
            #[allow(clippy::print_stdout)]
            {
                print!("{s}");
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Stderr {
    Enabled,
    Disabled,
}

impl std::fmt::Write for Stderr {
    fn write_str(&mut self, s: &str) -> std::fmt::Result {
        if *self == Self::Enabled {
            #[allow(clippy::print_stderr)]
            {
                eprint!("{s}");
            }
        }
        Ok(())
    }
}
