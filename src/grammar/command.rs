use simargs_combinator::prelude::*;

use crate::grammar::action::of_actions;
use crate::grammar::configuration::{of_configuration, of_output_options};
use crate::grammar::query::{of_target_format, of_target_query};
use crate::model::{Cli, Command, Help};

/// `<configuration> [<query>] [<format>] <action> [-- <action> ...]`, consuming every token.
pub fn of_command() -> Parser<Command> {
    sequence4(
        of_configuration(),
        of_target_query().optional(),
        of_target_format().optional(),
        exhaustive(of_actions()),
    )
    .map(|(configuration, query, format, actions)| Command {
        configuration,
        query,
        format,
        actions,
    })
    .described("Command")
}

/// `[<output flags>] help`
pub fn of_help() -> Parser<Help> {
    exhaustive(sequence2(of_output_options(), Parser::of_string("help", ())))
        .map(|(output, _)| Help {
            output,
            user_initiated: true,
        })
        .described("Help")
}

/// The whole command line.
pub fn of_cli() -> Parser<Cli> {
    alternative(vec![of_command().map(Cli::Run), of_help().map(Cli::Show)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        Action, Configuration, FormatField, OutputOptions, SimulatorState, TargetFormat,
        TargetQuery,
    };
    use rstest::rstest;

    #[test]
    fn command_parts() {
        // Setup
        let tokens = ["--json", "--state=booted", "--udid", "--name", "list", "--", "shutdown"];

        // Execute
        let command = of_command().parse_tokens(&tokens).unwrap();

        // Verify
        assert_eq!(
            command,
            Command {
                configuration: Configuration::of_output_options(OutputOptions::JSON),
                query: Some(TargetQuery::states([SimulatorState::Booted])),
                format: Some(TargetFormat {
                    fields: vec![FormatField::Udid, FormatField::Name],
                }),
                actions: vec![Action::List, Action::Shutdown],
            }
        );
    }

    #[test]
    fn command_without_query() {
        let command = of_command().parse_tokens(&["erase"]).unwrap();
        assert_eq!(command.configuration, Configuration::default());
        assert_eq!(command.query, None);
        assert_eq!(command.format, None);
        assert_eq!(command.actions, vec![Action::Erase]);
    }

    #[test]
    fn trailing_separator_needs_an_action() {
        let failure = of_command().parse_tokens(&["list", "--"]).unwrap_err();
        assert_eq!(failure.offset(), 2);
        assert_eq!(
            failure.into_error(),
            ParseError::could_not_interpret("'approve'", None)
        );
    }

    #[rstest]
    #[case(
        vec!["--set", "/no/such/dir", "list"],
        1,
        "'/no/such/dir' should exist, but doesn't"
    )]
    #[case(
        vec!["--first", "-1", "list"],
        1,
        "--first must be non-negative, but got -1"
    )]
    #[case(
        vec!["list", "--", "approve", "nodot"],
        3,
        "Bundle ID must contain a '.', but 'nodot' doesn't"
    )]
    #[case(
        vec!["listen", "--http", "70000"],
        2,
        "70000 is not a valid port number"
    )]
    fn reports_where_parsing_gave_up(
        #[case] tokens: Vec<&str>,
        #[case] offset: usize,
        #[case] message: &str,
    ) {
        let failure = of_cli().parse_tokens(&tokens).unwrap_err();
        assert_eq!(failure.offset(), offset);
        assert_eq!(failure.into_error(), ParseError::custom(message));
    }

    #[test]
    fn leftover_after_complete_action() {
        let failure = of_cli()
            .parse_tokens(&["list", "--", "shutdown", "extra", "more"])
            .unwrap_err();
        assert_eq!(failure.offset(), 3);
        assert_eq!(
            failure.into_error(),
            ParseError::Exhausted(vec!["extra".to_string(), "more".to_string()])
        );
    }

    #[test]
    fn help() {
        assert_eq!(
            of_cli().parse_tokens(&["--pretty", "help"]).unwrap(),
            Cli::Show(Help {
                output: OutputOptions::PRETTY,
                user_initiated: true,
            })
        );
    }

    #[test]
    fn help_is_exhaustive() {
        assert!(of_cli().parse_tokens(&["help", "list"]).is_err());
    }

    #[test]
    fn nothing() {
        let failure = of_cli().parse_tokens(&[]).unwrap_err();
        assert_eq!(failure.offset(), 0);
        assert_matches!(
            failure.into_error(),
            ParseError::CouldNotInterpret { actual: None, .. }
        );
    }
}
