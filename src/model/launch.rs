use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use bitflags::bitflags;

bitflags! {
    /// Where a launched process writes its output.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ProcessLaunchOptions: u8 {
        /// `--stdout`
        const WRITE_STDOUT = 1 << 0;
        /// `--stderr`
        const WRITE_STDERR = 1 << 1;
    }
}

bitflags! {
    /// How a simulator is booted.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct BootOptions: u8 {
        /// `--connect-bridge`
        const CONNECT_BRIDGE = 1 << 0;
        /// `--direct-launch`
        const ENABLE_DIRECT_LAUNCH = 1 << 1;
        /// `--use-nsworkspace`
        const USE_NSWORKSPACE = 1 << 2;
        /// `--debug-window`
        const SHOW_DEBUG_WINDOW = 1 << 3;
    }
}

flag_accumulator!(ProcessLaunchOptions, BootOptions);

/// A locale identifier, such as `en_US`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale(String);

impl Locale {
    pub(crate) fn new(identifier: impl Into<String>) -> Self {
        Self(identifier.into())
    }

    pub fn identifier(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The window scale of a booted simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scale {
    /// `--scale=25`
    Quarter,
    /// `--scale=50`
    Half,
    /// `--scale=75`
    ThreeQuarters,
    /// `--scale=100`
    Full,
}

impl Scale {
    pub const ALL: [Scale; 4] = [Scale::Quarter, Scale::Half, Scale::ThreeQuarters, Scale::Full];

    pub fn percent(&self) -> u8 {
        match self {
            Scale::Quarter => 25,
            Scale::Half => 50,
            Scale::ThreeQuarters => 75,
            Scale::Full => 100,
        }
    }
}

/// How to boot a simulator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootConfiguration {
    pub locale: Option<Locale>,
    pub scale: Option<Scale>,
    pub options: BootOptions,
}

/// An application bundle on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationDescriptor {
    pub path: PathBuf,
    pub bundle_id: String,
}

/// How to launch an installed application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationLaunchConfiguration {
    pub bundle_id: String,
    pub arguments: Vec<String>,
    pub environment: BTreeMap<String, String>,
    pub options: ProcessLaunchOptions,
}

/// How to launch an agent binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentLaunchConfiguration {
    pub binary: PathBuf,
    pub arguments: Vec<String>,
    pub environment: BTreeMap<String, String>,
    pub options: ProcessLaunchOptions,
}

/// How to run an XCTest bundle against an application.
#[derive(Debug, Clone, PartialEq)]
pub struct TestLaunchConfiguration {
    pub test_bundle: PathBuf,
    pub application: ApplicationLaunchConfiguration,
    /// `--test-timeout <seconds>`
    pub timeout: Option<f64>,
}

impl ApplicationLaunchConfiguration {
    /// Add to the environment, overriding any existing keys.
    pub fn with_environment_additions(mut self, additions: &BTreeMap<String, String>) -> Self {
        self.environment.extend(additions.clone());
        self
    }
}

impl AgentLaunchConfiguration {
    /// Add to the environment, overriding any existing keys.
    pub fn with_environment_additions(mut self, additions: &BTreeMap<String, String>) -> Self {
        self.environment.extend(additions.clone());
        self
    }
}

impl TestLaunchConfiguration {
    /// Add to the environment of the application under test.
    pub fn with_environment_additions(self, additions: &BTreeMap<String, String>) -> Self {
        Self {
            application: self.application.with_environment_additions(additions),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_additions_override() {
        let launch = ApplicationLaunchConfiguration {
            bundle_id: "com.example.app".to_string(),
            arguments: vec![],
            environment: BTreeMap::from([
                ("A".to_string(), "1".to_string()),
                ("B".to_string(), "2".to_string()),
            ]),
            options: ProcessLaunchOptions::empty(),
        };
        let additions = BTreeMap::from([("B".to_string(), "3".to_string())]);
        let launch = launch.with_environment_additions(&additions);
        assert_eq!(
            launch.environment,
            BTreeMap::from([
                ("A".to_string(), "1".to_string()),
                ("B".to_string(), "3".to_string()),
            ])
        );
    }
}
