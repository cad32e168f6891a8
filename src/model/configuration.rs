use std::path::PathBuf;

use bitflags::bitflags;
use simargs_combinator::Accumulator;

bitflags! {
    /// How results should be written.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct OutputOptions: u8 {
        /// `--debug-logging`
        const DEBUG_LOGGING = 1 << 0;
        /// `--json`
        const JSON = 1 << 1;
        /// `--pretty`
        const PRETTY = 1 << 2;
    }
}

bitflags! {
    /// How the simulator set should be prepared before any action runs.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ManagementOptions: u8 {
        /// `--delete-all`
        const DELETE_ALL_ON_FIRST_START = 1 << 0;
        /// `--kill-all`
        const KILL_ALL_ON_FIRST_START = 1 << 1;
        /// `--kill-spurious`
        const KILL_SPURIOUS_SIMULATORS_ON_FIRST_START = 1 << 2;
        /// `--ignore-spurious-kill-fail`
        const IGNORE_SPURIOUS_KILL_FAIL = 1 << 3;
        /// `--kill-spurious-services`
        const KILL_SPURIOUS_CORE_SIMULATOR_SERVICES = 1 << 4;
        /// `--timeout-resiliance`
        const USE_SIM_DEVICE_TIMEOUT_RESILIANCE = 1 << 5;
    }
}

flag_accumulator!(OutputOptions, ManagementOptions);

/// The configuration shared by every action of a command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Configuration {
    /// Output flags.
    pub output: OutputOptions,
    /// Simulator set management flags.
    pub management: ManagementOptions,
    /// `--set <dir>`: an alternative simulator set location.
    pub device_set_path: Option<PathBuf>,
}

impl Configuration {
    /// A configuration holding only output flags.
    pub fn of_output_options(output: OutputOptions) -> Self {
        Self {
            output,
            ..Self::identity()
        }
    }

    /// A configuration holding only management flags.
    pub fn of_management_options(management: ManagementOptions) -> Self {
        Self {
            management,
            ..Self::identity()
        }
    }

    /// A configuration holding only a device set path.
    pub fn of_device_set_path(path: impl Into<PathBuf>) -> Self {
        Self {
            device_set_path: Some(path.into()),
            ..Self::identity()
        }
    }
}

impl Accumulator for Configuration {
    fn identity() -> Self {
        Self::default()
    }

    fn append(self, other: Self) -> Self {
        Self {
            output: self.output.append(other.output),
            management: self.management.append(other.management),
            device_set_path: self.device_set_path.append(other.device_set_path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_merges_fields() {
        let merged = Configuration::of_output_options(OutputOptions::JSON)
            .append(Configuration::of_device_set_path("/a"))
            .append(Configuration::of_management_options(
                ManagementOptions::KILL_ALL_ON_FIRST_START,
            ))
            .append(Configuration::of_output_options(OutputOptions::PRETTY))
            .append(Configuration::of_device_set_path("/b"));

        assert_eq!(
            merged,
            Configuration {
                output: OutputOptions::JSON | OutputOptions::PRETTY,
                management: ManagementOptions::KILL_ALL_ON_FIRST_START,
                device_set_path: Some(PathBuf::from("/b")),
            }
        );
    }

    #[test]
    fn identity() {
        let configuration = Configuration::of_output_options(OutputOptions::DEBUG_LOGGING);
        assert_eq!(
            configuration.clone().append(Configuration::identity()),
            configuration
        );
        assert_eq!(
            Configuration::identity().append(configuration.clone()),
            configuration
        );
    }

    #[test]
    fn flags_stay_enabled() {
        let merged = OutputOptions::JSON.append(OutputOptions::empty());
        assert!(merged.contains(OutputOptions::JSON));
    }
}
