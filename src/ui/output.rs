//! How much of the install narration is printed.

/// Verbosity chosen with `-v` / `-q`.
///
/// Ordered from least to most output. Status lines, spinners, errors and
/// failed-command output are printed in every mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum OutputMode {
    /// Status lines only, no plain narration.
    Quiet,
    /// Step progress, skips and the final banner.
    #[default]
    Normal,
    /// Also echo the output of commands that succeeded.
    Verbose,
}

impl OutputMode {
    /// Resolve the command-line flags. `quiet` wins if both are set.
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        if quiet {
            Self::Quiet
        } else if verbose {
            Self::Verbose
        } else {
            Self::Normal
        }
    }

    /// Plain narration lines such as the plan are printed.
    pub fn shows_messages(&self) -> bool {
        *self >= Self::Normal
    }

    /// Output of successful commands is echoed after the step.
    pub fn echoes_command_output(&self) -> bool {
        *self == Self::Verbose
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_map_to_modes() {
        assert_eq!(OutputMode::from_flags(false, false), OutputMode::Normal);
        assert_eq!(OutputMode::from_flags(true, false), OutputMode::Verbose);
        assert_eq!(OutputMode::from_flags(false, true), OutputMode::Quiet);
        assert_eq!(OutputMode::from_flags(true, true), OutputMode::Quiet);
    }

    #[test]
    fn quiet_hides_messages() {
        assert!(!OutputMode::Quiet.shows_messages());
        assert!(OutputMode::Normal.shows_messages());
        assert!(OutputMode::Verbose.shows_messages());
    }

    #[test]
    fn only_verbose_echoes_output() {
        assert!(OutputMode::Verbose.echoes_command_output());
        assert!(!OutputMode::Normal.echoes_command_output());
        assert!(!OutputMode::Quiet.echoes_command_output());
    }
}
