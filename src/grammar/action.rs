use simargs_combinator::prelude::*;

use crate::grammar::launch::{
    of_agent_launch, of_application_launch, of_boot_configuration, of_test_launch,
};
use crate::grammar::primitive::{
    of_application, of_bundle_id, of_dash_separator, of_date, of_directory, of_double, of_file,
    of_int, of_url, of_word,
};
use crate::grammar::query::{of_device_model, of_os_version};
use crate::model::{
    Action, CrashLogProcessTypes, CreationSpecification, DiagnosticFormat, DiagnosticQuery,
    IndividualCreationConfiguration, ListenInterface, Record,
};
use crate::report::EventName;

fn keyword<T: 'static>(name: EventName, parser: Parser<T>) -> Parser<T> {
    succeeded(name.as_str(), parser)
}

fn of_keyword(name: EventName, action: Action) -> Parser<Action> {
    Parser::of_string(name.as_str(), action)
}

pub fn of_creation_specification() -> Parser<CreationSpecification> {
    alternative(vec![
        Parser::of_string(
            "--all-missing-defaults",
            CreationSpecification::AllMissingDefaults,
        ),
        accumulate(
            0,
            vec![
                fragment(of_device_model(), |model| IndividualCreationConfiguration {
                    model: Some(model),
                    ..IndividualCreationConfiguration::default()
                }),
                fragment(of_os_version(), |os| IndividualCreationConfiguration {
                    os: Some(os),
                    ..IndividualCreationConfiguration::default()
                }),
                fragment(succeeded("--aux", of_directory()), |aux_directory| {
                    IndividualCreationConfiguration {
                        aux_directory: Some(aux_directory),
                        ..IndividualCreationConfiguration::default()
                    }
                }),
            ],
        )
        .map(CreationSpecification::Individual),
    ])
}

pub fn of_diagnostic_format() -> Parser<DiagnosticFormat> {
    alternative(
        DiagnosticFormat::ALL
            .iter()
            .map(|format| Parser::of_string(format.flag(), *format))
            .collect(),
    )
}

pub fn of_crash_log_process_types() -> Parser<CrashLogProcessTypes> {
    union_count(
        1,
        vec![
            Parser::of_string("--application", CrashLogProcessTypes::APPLICATION),
            Parser::of_string("--system", CrashLogProcessTypes::SYSTEM),
            Parser::of_string("--custom-agent", CrashLogProcessTypes::CUSTOM_AGENT),
        ],
    )
}

pub fn of_diagnostic_query() -> Parser<DiagnosticQuery> {
    alternative(vec![
        sequence2(of_bundle_id(), many_count(1, of_word())).map(|(bundle_id, filenames)| {
            DiagnosticQuery::ApplicationFiles {
                bundle_id,
                filenames,
            }
        }),
        many_count(1, succeeded("--name", of_word())).map(DiagnosticQuery::Named),
        sequence2(
            succeeded("--crashes-since", of_date()),
            of_crash_log_process_types(),
        )
        .map(|(since, process_types)| DiagnosticQuery::Crashes {
            since,
            process_types,
        }),
    ])
    .described("Diagnostic Query")
}

fn of_port() -> Parser<u16> {
    of_int().fmap(|port| {
        u16::try_from(port)
            .map_err(|_| ParseError::custom(format!("{port} is not a valid port number")))
    })
}

pub fn of_listen_interface() -> Parser<ListenInterface> {
    accumulate(
        0,
        vec![
            Fragment::from(Parser::of_string(
                "--stdin",
                ListenInterface {
                    stdin: true,
                    ..ListenInterface::default()
                },
            )),
            fragment(succeeded("--socket", of_port()), |port| ListenInterface {
                socket: Some(port),
                ..ListenInterface::default()
            }),
            fragment(succeeded("--http", of_port()), |port| ListenInterface {
                http: Some(port),
                ..ListenInterface::default()
            }),
        ],
    )
    .map(ListenInterface::or_stdin)
}

pub fn of_record() -> Parser<Record> {
    alternative(vec![
        Parser::of_string("start", Record::Start),
        Parser::of_string("stop", Record::Stop),
    ])
}

/// One keyword introduced action.
///
/// The arms are tried in order, so `launch` tries an agent binary before an application.
pub fn of_action() -> Parser<Action> {
    alternative(vec![
        keyword(EventName::Approve, many_count(1, of_bundle_id())).map(Action::Approve),
        keyword(EventName::Boot, of_boot_configuration().optional()).map(Action::Boot),
        keyword(EventName::ClearKeychain, of_bundle_id()).map(Action::ClearKeychain),
        keyword(EventName::Create, of_creation_specification()).map(Action::Create),
        of_keyword(EventName::Delete, Action::Delete),
        keyword(
            EventName::Diagnose,
            sequence2(
                of_diagnostic_format().fallback(DiagnosticFormat::CurrentFormat),
                of_diagnostic_query().fallback(DiagnosticQuery::All),
            ),
        )
        .map(|(format, query)| Action::Diagnose(query, format)),
        of_keyword(EventName::Erase, Action::Erase),
        keyword(
            EventName::Install,
            sequence2(
                alternative(vec![
                    of_application().map(|application| application.path),
                    of_file(),
                ]),
                Parser::of_string("--codesign", true).fallback(false),
            ),
        )
        .map(|(path, codesign)| Action::Install { path, codesign }),
        keyword(EventName::Launch, of_agent_launch()).map(Action::LaunchAgent),
        keyword(EventName::Launch, of_application_launch()).map(Action::LaunchApp),
        keyword(EventName::LaunchXCTest, of_test_launch()).map(Action::LaunchXCTest),
        keyword(EventName::Listen, of_listen_interface()).map(Action::Listen),
        of_keyword(EventName::List, Action::List),
        of_keyword(EventName::ListApps, Action::ListApps),
        keyword(EventName::Open, of_url()).map(Action::Open),
        keyword(EventName::Record, of_record()).map(Action::Record),
        keyword(EventName::Relaunch, of_application_launch()).map(Action::Relaunch),
        of_keyword(EventName::Shutdown, Action::Shutdown),
        keyword(EventName::Tap, sequence2(of_double(), of_double()))
            .map(|(x, y)| Action::Tap(x, y)),
        keyword(EventName::Terminate, of_bundle_id()).map(Action::Terminate),
        keyword(EventName::Uninstall, of_bundle_id()).map(Action::Uninstall),
        keyword(EventName::Upload, many_count(1, of_file())).map(Action::Upload),
        keyword(
            EventName::WatchdogOverride,
            sequence2(of_double(), many_count(1, of_bundle_id())),
        )
        .map(|(timeout, bundle_ids)| Action::WatchdogOverride {
            bundle_ids,
            timeout,
        }),
    ])
    .described("Action")
}

/// One or more actions, separated by `--`.
pub fn of_actions() -> Parser<Vec<Action>> {
    many_sep_count(1, of_action(), of_dash_separator())
}
