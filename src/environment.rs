//! Forwarding of environment variables to launched processes.
use std::collections::{BTreeMap, HashMap};

use crate::model::{Action, Cli, Command};

/// Variables with this prefix are passed on to launched processes, without the prefix.
pub const ENVIRONMENT_PREFIX: &str = "FBSIMCTL_CHILD_";

/// The subset of `environment` intended for a launched process, with the prefix stripped.
///
/// A variable named exactly the prefix is not forwarded.
pub fn subprocess_environment(environment: &HashMap<String, String>) -> BTreeMap<String, String> {
    environment
        .iter()
        .filter_map(|(key, value)| {
            key.strip_prefix(ENVIRONMENT_PREFIX)
                .filter(|stripped| !stripped.is_empty())
                .map(|stripped| (stripped.to_string(), value.clone()))
        })
        .collect()
}

impl Cli {
    /// Forward the prefixed variables of `environment` into every launch this command line asks for.
    pub fn append_environment(self, environment: &HashMap<String, String>) -> Self {
        match self {
            Cli::Run(command) => Cli::Run(command.append_environment(environment)),
            Cli::Show(_) => self,
        }
    }
}

impl Command {
    pub fn append_environment(self, environment: &HashMap<String, String>) -> Self {
        let additions = subprocess_environment(environment);

        Self {
            actions: self
                .actions
                .into_iter()
                .map(|action| action.with_environment_additions(&additions))
                .collect(),
            ..self
        }
    }
}

impl Action {
    pub fn append_environment(self, environment: &HashMap<String, String>) -> Self {
        self.with_environment_additions(&subprocess_environment(environment))
    }

    fn with_environment_additions(self, additions: &BTreeMap<String, String>) -> Self {
        match self {
            Action::LaunchApp(launch) => {
                Action::LaunchApp(launch.with_environment_additions(additions))
            }
            Action::LaunchAgent(launch) => {
                Action::LaunchAgent(launch.with_environment_additions(additions))
            }
            Action::LaunchXCTest(launch) => {
                Action::LaunchXCTest(launch.with_environment_additions(additions))
            }
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ApplicationLaunchConfiguration, Configuration, ProcessLaunchOptions};

    fn environment() -> HashMap<String, String> {
        HashMap::from([
            ("FBSIMCTL_CHILD_FOO".to_string(), "1".to_string()),
            ("FBSIMCTL_CHILD_".to_string(), "2".to_string()),
            ("PATH".to_string(), "/usr/bin".to_string()),
            ("OTHER_FBSIMCTL_CHILD_BAR".to_string(), "3".to_string()),
            ("SIMCTL_CHILD_BAZ".to_string(), "4".to_string()),
        ])
    }

    #[test]
    fn subprocess_environment_strips_prefix() {
        assert_eq!(
            subprocess_environment(&environment()),
            BTreeMap::from([("FOO".to_string(), "1".to_string())])
        );
        assert!(subprocess_environment(&HashMap::default()).is_empty());
    }

    #[test]
    fn only_launches_receive_environment() {
        // Setup
        let launch = ApplicationLaunchConfiguration {
            bundle_id: "com.example.app".to_string(),
            arguments: vec![],
            environment: BTreeMap::default(),
            options: ProcessLaunchOptions::empty(),
        };
        let cli = Cli::Run(Command {
            configuration: Configuration::default(),
            query: None,
            format: None,
            actions: vec![Action::List, Action::LaunchApp(launch.clone())],
        });

        // Execute
        let cli = cli.append_environment(&environment());

        // Verify
        let expected = ApplicationLaunchConfiguration {
            environment: BTreeMap::from([("FOO".to_string(), "1".to_string())]),
            ..launch
        };
        let command = assert_matches!(cli, Cli::Run(command) => command);
        assert_eq!(command.actions, vec![Action::List, Action::LaunchApp(expected)]);
    }
}
