use terminal_size::{terminal_size, Width};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::model::{FormatField, Help, SimulatorState};
use crate::parser::interface::UserInterface;
use crate::report::EventName;

// Let's assume the average word length is 5.
// Then 17 is a good minimum, because it allows precisely 3 words with a space between them.
const MINIMUM_MIDDLE_WIDTH: usize = 17;
const DEFAULT_TOTAL_WIDTH: usize = 100;
const PADDING_WIDTH: usize = 3;
const MAIN_INDENT: usize = 1;

type Row = (String, String);

pub(crate) struct Printer {
    terminal_width: Option<usize>,
}

impl Printer {
    pub(crate) fn terminal() -> Self {
        let terminal_width = if let Some((Width(terminal_width), _)) = terminal_size() {
            Some(terminal_width as usize)
        } else {
            None
        };

        Self::new(terminal_width)
    }

    pub(crate) fn new(terminal_width: Option<usize>) -> Self {
        Self { terminal_width }
    }

    pub(crate) fn print_help(
        &self,
        program: &str,
        help: &Help,
        user_interface: &(impl UserInterface + ?Sized),
    ) {
        user_interface.print(format!(
            "usage: {program} [CONFIGURATION ...] [QUERY ...] [FORMAT ...] ACTION [-- ACTION ...]"
        ));
        user_interface.print(format!("       {program} [OUTPUT ...] help"));

        if !help.user_initiated {
            return;
        }

        let sections = sections();
        let left_width = sections
            .iter()
            .flat_map(|(_, rows)| rows.iter().map(|(left, _)| left.len()))
            .max()
            .unwrap_or_default();
        let non_middle = MAIN_INDENT + left_width + PADDING_WIDTH;
        let total_width = self.terminal_width.unwrap_or(DEFAULT_TOTAL_WIDTH);
        let middle_width = std::cmp::max(
            total_width.saturating_sub(non_middle),
            MINIMUM_MIDDLE_WIDTH,
        );

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Rendering help within {total_width}, selecting middle: {middle_width}.");
        }

        for (title, rows) in sections {
            user_interface.print("".to_string());
            user_interface.print(format!("{title}:"));

            for (left, middle) in rows {
                for line in render(left_width, middle_width, &left, &middle) {
                    user_interface.print(line);
                }
            }
        }
    }
}

fn render(left_width: usize, middle_width: usize, left: &str, middle: &str) -> Vec<String> {
    let indent = MAIN_INDENT;
    let padding = format!("{:width$}", "", width = PADDING_WIDTH);
    let mut out = Vec::default();

    for (i, part) in chunk(middle, middle_width).iter().enumerate() {
        let left = if i == 0 { left } else { "" };
        out.push(format!("{:indent$}{left:left_width$}{padding}{part}", ""));
    }

    if out.is_empty() {
        out.push(format!("{:indent$}{left}", ""));
    }

    out
}

fn chunk(paragraph: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::default();
    let mut current = String::default();

    for word in paragraph.split(' ').filter(|word| !word.is_empty()) {
        if current.is_empty() {
            hyphenate(width, &mut lines, &mut current, word);
        } else if current.len() + word.len() + 1 <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            hyphenate(width, &mut lines, &mut current, word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

fn hyphenate(width: usize, lines: &mut Vec<String>, current: &mut String, word: &str) {
    let increment = width - 1;
    let mut left = 0;
    let mut right = increment;

    while right + 1 < word.len() {
        lines.push(format!("{}-", &word[left..right]));
        left += increment;
        right += increment;
    }

    current.push_str(&word[left..]);
}

fn sections() -> Vec<(&'static str, Vec<Row>)> {
    let row = |left: &str, middle: &str| (left.to_string(), middle.to_string());
    let states = SimulatorState::ALL
        .iter()
        .map(|state| state.name())
        .collect::<Vec<&str>>()
        .join("|");
    let fields = FormatField::ALL
        .iter()
        .map(|field| format!("--{}", field.name()))
        .collect::<Vec<String>>()
        .join(" ");

    vec![
        (
            "configuration",
            vec![
                row("--debug-logging", "Log debug output."),
                row("--json", "Write results as JSON."),
                row("--pretty", "Pretty print JSON results."),
                row("--set DIRECTORY", "Use the simulator set at DIRECTORY."),
                row("--delete-all", "Delete every simulator on first start."),
                row("--kill-all", "Kill every simulator on first start."),
                row("--kill-spurious", "Kill simulators outside the set on first start."),
                row("--ignore-spurious-kill-fail", "Carry on when a spurious simulator cannot be killed."),
                row("--kill-spurious-services", "Kill spurious simulator services on first start."),
                row("--timeout-resiliance", "Retry simulator operations which time out."),
            ],
        ),
        (
            "query",
            vec![
                row("all", "Every target."),
                row("UDID", "The target with this UDID."),
                row(&format!("--state={states}"), "Simulators in this state."),
                row("--simulators | --devices", "Targets of this kind."),
                row("OS_VERSION", "Targets running this version, such as 'iOS 9.3'."),
                row("DEVICE", "Targets of this model, such as 'iPhone 6'."),
                row("--first N", "At most N targets."),
            ],
        ),
        ("format", vec![row(&fields, "Describe each target with these fields, in order.")]),
        (
            "actions",
            vec![
                row(&format!("{} BUNDLE_ID [...]", EventName::Approve), "Approve location services for the applications."),
                row(&format!("{} [--locale LOCALE] [--scale=25|50|75|100] [FLAGS ...]", EventName::Boot), "Boot the simulators."),
                row(&format!("{} BUNDLE_ID", EventName::ClearKeychain), "Clear the keychain of an application."),
                row(&format!("{} [--all-missing-defaults | DEVICE OS_VERSION --aux DIRECTORY]", EventName::Create), "Create simulators."),
                row(EventName::Delete.as_str(), "Delete the simulators."),
                row(&format!("{} [--current-format|--path|--content] [QUERY]", EventName::Diagnose), "Fetch diagnostics."),
                row(EventName::Erase.as_str(), "Erase the simulators."),
                row(&format!("{} APPLICATION [--codesign]", EventName::Install), "Install an application."),
                row(&format!("{} [--stdout] [--stderr] BUNDLE_ID|BINARY [ARGUMENT ...]", EventName::Launch), "Launch an application or agent."),
                row(&format!("{} [--test-timeout SECONDS] TEST_BUNDLE BUNDLE_ID [ARGUMENT ...]", EventName::LaunchXCTest), "Run an XCTest bundle against an application."),
                row(EventName::List.as_str(), "List the targets."),
                row(EventName::ListApps.as_str(), "List the installed applications."),
                row(&format!("{} [--stdin] [--socket PORT] [--http PORT]", EventName::Listen), "Accept further actions."),
                row(&format!("{} URL", EventName::Open), "Open a URL."),
                row(&format!("{} start|stop", EventName::Record), "Start or stop recording video."),
                row(&format!("{} BUNDLE_ID [ARGUMENT ...]", EventName::Relaunch), "Relaunch an application."),
                row(EventName::Shutdown.as_str(), "Shut the simulators down."),
                row(&format!("{} X Y", EventName::Tap), "Tap the screen at a point."),
                row(&format!("{} BUNDLE_ID", EventName::Terminate), "Terminate an application."),
                row(&format!("{} BUNDLE_ID", EventName::Uninstall), "Uninstall an application."),
                row(&format!("{} FILE [...]", EventName::Upload), "Upload media."),
                row(&format!("{} SECONDS BUNDLE_ID [...]", EventName::WatchdogOverride), "Override the launch watchdog for the applications."),
            ],
        ),
    ]
}
