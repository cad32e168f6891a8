//! Naming of actions for an event reporter.
use std::fmt;

use crate::model::{Action, Record};

/// The name of an action, which doubles as its keyword on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventName {
    Approve,
    Boot,
    ClearKeychain,
    Create,
    Delete,
    Diagnose,
    Erase,
    Install,
    Launch,
    LaunchXCTest,
    List,
    ListApps,
    Listen,
    Open,
    Record,
    Relaunch,
    Shutdown,
    Tap,
    Terminate,
    Uninstall,
    Upload,
    WatchdogOverride,
}

impl EventName {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventName::Approve => "approve",
            EventName::Boot => "boot",
            EventName::ClearKeychain => "clear_keychain",
            EventName::Create => "create",
            EventName::Delete => "delete",
            EventName::Diagnose => "diagnose",
            EventName::Erase => "erase",
            EventName::Install => "install",
            EventName::Launch => "launch",
            EventName::LaunchXCTest => "launch_xctest",
            EventName::List => "list",
            EventName::ListApps => "list_apps",
            EventName::Listen => "listen",
            EventName::Open => "open",
            EventName::Record => "record",
            EventName::Relaunch => "relaunch",
            EventName::Shutdown => "shutdown",
            EventName::Tap => "tap",
            EventName::Terminate => "terminate",
            EventName::Uninstall => "uninstall",
            EventName::Upload => "upload",
            EventName::WatchdogOverride => "watchdog_override",
        }
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What an action was performed with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventSubject {
    Single(String),
    Many(Vec<String>),
}

impl fmt::Display for EventSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventSubject::Single(subject) => write!(f, "{subject}"),
            EventSubject::Many(subjects) => write!(f, "[{}]", subjects.join(", ")),
        }
    }
}

impl Action {
    /// The name and subject to report when this action runs.
    pub fn reportable(&self) -> (EventName, Option<EventSubject>) {
        let single = |s: &str| Some(EventSubject::Single(s.to_string()));

        match self {
            Action::Approve(bundle_ids) => {
                (EventName::Approve, Some(EventSubject::Many(bundle_ids.clone())))
            }
            Action::Boot(_) => (EventName::Boot, None),
            Action::ClearKeychain(bundle_id) => (EventName::ClearKeychain, single(bundle_id)),
            Action::Create(_) => (EventName::Create, None),
            Action::Delete => (EventName::Delete, None),
            Action::Diagnose(_, _) => (EventName::Diagnose, None),
            Action::Erase => (EventName::Erase, None),
            Action::Install { path, .. } => {
                (EventName::Install, single(&path.display().to_string()))
            }
            Action::LaunchAgent(launch) => {
                (EventName::Launch, single(&launch.binary.display().to_string()))
            }
            Action::LaunchApp(launch) => (EventName::Launch, single(&launch.bundle_id)),
            Action::LaunchXCTest(launch) => {
                (EventName::LaunchXCTest, single(&launch.application.bundle_id))
            }
            Action::List => (EventName::List, None),
            Action::ListApps => (EventName::ListApps, None),
            Action::Listen(_) => (EventName::Listen, None),
            Action::Open(url) => (EventName::Open, single(url.as_str())),
            Action::Record(Record::Start) => (EventName::Record, single("start")),
            Action::Record(Record::Stop) => (EventName::Record, single("stop")),
            Action::Relaunch(launch) => (EventName::Relaunch, single(&launch.bundle_id)),
            Action::Shutdown => (EventName::Shutdown, None),
            Action::Tap(_, _) => (EventName::Tap, None),
            Action::Terminate(bundle_id) => (EventName::Terminate, single(bundle_id)),
            Action::Uninstall(bundle_id) => (EventName::Uninstall, single(bundle_id)),
            Action::Upload(paths) => (
                EventName::Upload,
                Some(EventSubject::Many(
                    paths.iter().map(|p| p.display().to_string()).collect(),
                )),
            ),
            Action::WatchdogOverride { bundle_ids, .. } => (
                EventName::WatchdogOverride,
                Some(EventSubject::Many(bundle_ids.clone())),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Action::List, EventName::List, None)]
    #[case(
        Action::Terminate("com.example.app".to_string()),
        EventName::Terminate,
        Some(EventSubject::Single("com.example.app".to_string()))
    )]
    #[case(
        Action::Record(Record::Stop),
        EventName::Record,
        Some(EventSubject::Single("stop".to_string()))
    )]
    #[case(
        Action::WatchdogOverride { bundle_ids: vec!["a.b".to_string(), "c.d".to_string()], timeout: 2.0 },
        EventName::WatchdogOverride,
        Some(EventSubject::Many(vec!["a.b".to_string(), "c.d".to_string()]))
    )]
    fn reportable(
        #[case] action: Action,
        #[case] name: EventName,
        #[case] subject: Option<EventSubject>,
    ) {
        assert_eq!(action.reportable(), (name, subject));
    }

    #[test]
    fn subject_display() {
        assert_eq!(
            EventSubject::Many(vec!["a.b".to_string(), "c.d".to_string()]).to_string(),
            "[a.b, c.d]"
        );
        assert_eq!(EventName::LaunchXCTest.to_string(), "launch_xctest");
    }
}
