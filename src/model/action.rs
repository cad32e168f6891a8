use std::fmt;
use std::path::PathBuf;

use bitflags::bitflags;
use simargs_combinator::Accumulator;
use time::OffsetDateTime;

use crate::model::launch::*;
use crate::model::query::{DeviceModel, OsVersion};

/// A piecemeal description of one simulator to create.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndividualCreationConfiguration {
    pub os: Option<OsVersion>,
    pub model: Option<DeviceModel>,
    /// `--aux <dir>`
    pub aux_directory: Option<PathBuf>,
}

impl Accumulator for IndividualCreationConfiguration {
    fn identity() -> Self {
        Self::default()
    }

    fn append(self, other: Self) -> Self {
        Self {
            os: self.os.append(other.os),
            model: self.model.append(other.model),
            aux_directory: self.aux_directory.append(other.aux_directory),
        }
    }
}

/// What `create` should create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreationSpecification {
    /// `--all-missing-defaults`: every default simulator not yet present.
    AllMissingDefaults,
    Individual(IndividualCreationConfiguration),
}

/// The interfaces `listen` accepts actions on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListenInterface {
    /// `--stdin`
    pub stdin: bool,
    /// `--socket <port>`
    pub socket: Option<u16>,
    /// `--http <port>`
    pub http: Option<u16>,
}

impl ListenInterface {
    /// Whether no interface at all was given.
    pub fn is_empty(&self) -> bool {
        !self.stdin && self.socket.is_none() && self.http.is_none()
    }

    /// Listen on standard input when nothing else was asked for.
    pub fn or_stdin(self) -> Self {
        if self.is_empty() {
            Self {
                stdin: true,
                ..self
            }
        } else {
            self
        }
    }
}

impl Accumulator for ListenInterface {
    fn identity() -> Self {
        Self::default()
    }

    fn append(self, other: Self) -> Self {
        Self {
            stdin: self.stdin.append(other.stdin),
            socket: self.socket.append(other.socket),
            http: self.http.append(other.http),
        }
    }
}

/// Start or stop video recording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Record {
    Start,
    Stop,
}

/// How diagnostics should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticFormat {
    /// `--current-format`
    CurrentFormat,
    /// `--path`
    Path,
    /// `--content`
    Content,
}

impl DiagnosticFormat {
    pub const ALL: [DiagnosticFormat; 3] = [
        DiagnosticFormat::CurrentFormat,
        DiagnosticFormat::Path,
        DiagnosticFormat::Content,
    ];

    pub fn flag(&self) -> &'static str {
        match self {
            DiagnosticFormat::CurrentFormat => "--current-format",
            DiagnosticFormat::Path => "--path",
            DiagnosticFormat::Content => "--content",
        }
    }
}

bitflags! {
    /// The kinds of process whose crash logs are wanted.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CrashLogProcessTypes: u8 {
        /// `--application`
        const APPLICATION = 1 << 0;
        /// `--system`
        const SYSTEM = 1 << 1;
        /// `--custom-agent`
        const CUSTOM_AGENT = 1 << 2;
    }
}

flag_accumulator!(CrashLogProcessTypes);

/// Which diagnostics to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticQuery {
    All,
    /// `--name <name>`, one or more times.
    Named(Vec<String>),
    /// `<bundleID> <file>+`: files from an application's container.
    ApplicationFiles {
        bundle_id: String,
        filenames: Vec<String>,
    },
    /// `--crashes-since <date> <process type flags>`
    Crashes {
        since: OffsetDateTime,
        process_types: CrashLogProcessTypes,
    },
}

/// A URL with a valid scheme, such as `https://example.com`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Url(String);

impl Url {
    pub(crate) fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn scheme(&self) -> &str {
        self.0
            .split_once(':')
            .map(|(scheme, _)| scheme)
            .unwrap_or_default()
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single interaction with the selected targets.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// `approve <bundleID>+`
    Approve(Vec<String>),
    /// `boot [--locale <locale>] [--scale=<n>] [<boot flags>]`
    Boot(Option<BootConfiguration>),
    /// `clear_keychain <bundleID>`
    ClearKeychain(String),
    /// `create [--all-missing-defaults | <model> <os> --aux <dir>]`
    Create(CreationSpecification),
    /// `delete`
    Delete,
    /// `diagnose [<format>] [<query>]`
    Diagnose(DiagnosticQuery, DiagnosticFormat),
    /// `erase`
    Erase,
    /// `install <application> [--codesign]`
    Install { path: PathBuf, codesign: bool },
    /// `launch [--stdout] [--stderr] <binary> <argument>*`
    LaunchAgent(AgentLaunchConfiguration),
    /// `launch [--stdout] [--stderr] <bundleID> <argument>*`
    LaunchApp(ApplicationLaunchConfiguration),
    /// `launch_xctest [--test-timeout <seconds>] <test bundle> <application launch>`
    LaunchXCTest(TestLaunchConfiguration),
    /// `list`
    List,
    /// `list_apps`
    ListApps,
    /// `listen [--stdin] [--socket <port>] [--http <port>]`
    Listen(ListenInterface),
    /// `open <url>`
    Open(Url),
    /// `record start|stop`
    Record(Record),
    /// `relaunch <application launch>`
    Relaunch(ApplicationLaunchConfiguration),
    /// `shutdown`
    Shutdown,
    /// `tap <x> <y>`
    Tap(f64, f64),
    /// `terminate <bundleID>`
    Terminate(String),
    /// `uninstall <bundleID>`
    Uninstall(String),
    /// `upload <file>+`
    Upload(Vec<PathBuf>),
    /// `watchdog_override <seconds> <bundleID>+`
    WatchdogOverride { bundle_ids: Vec<String>, timeout: f64 },
}
