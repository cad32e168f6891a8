use std::env;

use simargs_combinator::Parser;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::grammar::of_cli;
use crate::model::{Cli, Help, OutputOptions};
use crate::parser::interface::{ConsoleInterface, UserInterface};
use crate::parser::printer::Printer;
use crate::parser::{ErrorContext, ParseError};

/// The top level command line parser.
///
/// Failures are reported to the user, rather than returned.
/// ```
/// use simargs::CommandLineParser;
/// use simargs::model::{Action, Cli};
///
/// let parser = CommandLineParser::new("simctl");
/// let cli = parser.parse_tokens(&["--json", "list"]).unwrap();
/// assert!(matches!(cli, Cli::Run(command) if command.actions == vec![Action::List]));
/// ```
pub struct CommandLineParser {
    program: String,
    grammar: Parser<Cli>,
    printer: Printer,
    user_interface: Box<dyn UserInterface>,
}

impl std::fmt::Debug for CommandLineParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandLineParser")
            .field("program", &self.program)
            .finish()
    }
}

impl CommandLineParser {
    /// Create a parser for `program`, reporting to the console.
    pub fn new(program: impl Into<String>) -> Self {
        Self::with_interface(program, Printer::terminal(), Box::new(ConsoleInterface))
    }

    pub(crate) fn with_interface(
        program: impl Into<String>,
        printer: Printer,
        user_interface: Box<dyn UserInterface>,
    ) -> Self {
        Self {
            program: program.into(),
            grammar: of_cli(),
            printer,
            user_interface,
        }
    }

    /// Parse the tokens of a command line, excluding the program name.
    ///
    /// A request for help is printed before it is returned.
    /// On failure, the error and usage are printed and the exit code is returned.
    pub fn parse_tokens(&self, tokens: &[&str]) -> Result<Cli, i32> {
        match self.grammar.parse_tokens(tokens) {
            Ok(cli) => {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Parsed command line: {cli:?}");
                }

                if let Cli::Show(help) = &cli {
                    self.printer
                        .print_help(&self.program, help, self.user_interface.as_ref());
                }

                Ok(cli)
            }
            Err(failure) => {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Failed to parse at token {}: {failure:?}", failure.offset());
                }

                let offset = failure.offset();
                self.user_interface.print_error(ParseError::from(failure));
                self.user_interface
                    .print_error_context(ErrorContext::new(offset, tokens));
                self.printer.print_help(
                    &self.program,
                    &Help {
                        output: OutputOptions::empty(),
                        user_initiated: false,
                    },
                    self.user_interface.as_ref(),
                );
                Err(1)
            }
        }
    }

    /// Parse the command line of this process.
    ///
    /// Exits the process after printing help, or when the command line cannot be parsed.
    pub fn parse(&self) -> Cli {
        let command_input: Vec<String> = env::args().skip(1).collect();

        match self.parse_tokens(
            command_input
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<&str>>()
                .as_slice(),
        ) {
            Ok(Cli::Show(_)) => std::process::exit(0),
            Ok(cli) => cli,
            Err(exit_code) => std::process::exit(exit_code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Action;
    use crate::parser::interface::util::InMemoryInterface;
    use crate::test::assert_contains;

    fn parser(interface: &InMemoryInterface) -> CommandLineParser {
        CommandLineParser::with_interface(
            "simctl",
            Printer::new(Some(80)),
            Box::new(interface.clone()),
        )
    }

    #[test]
    fn parse_tokens() {
        // Setup
        let interface = InMemoryInterface::default();
        let parser = parser(&interface);

        // Execute
        let cli = parser.parse_tokens(&["list", "--", "shutdown"]).unwrap();

        // Verify
        let command = assert_matches!(cli, Cli::Run(command) => command);
        assert_eq!(command.actions, vec![Action::List, Action::Shutdown]);
        drop(parser);
        assert_eq!(interface.consume(), (None, None, None));
    }

    #[test]
    fn parse_tokens_help() {
        // Setup
        let interface = InMemoryInterface::default();
        let parser = parser(&interface);

        // Execute
        let cli = parser.parse_tokens(&["--json", "help"]).unwrap();

        // Verify
        assert_eq!(
            cli,
            Cli::Show(Help {
                output: OutputOptions::JSON,
                user_initiated: true,
            })
        );
        drop(parser);
        let message = interface.consume_message();
        assert_contains!(message, "usage: simctl");
        assert_contains!(message, "actions:");
    }

    #[test]
    fn parse_tokens_leftover() {
        // Setup
        let interface = InMemoryInterface::default();
        let parser = parser(&interface);

        // Execute
        let exit_code = parser.parse_tokens(&["list", "extra"]).unwrap_err();

        // Verify
        assert_eq!(exit_code, 1);
        drop(parser);
        let (_, error, error_context) = interface.consume();
        assert_eq!(error.unwrap(), "Parse error: Unconsumed input: extra.");
        assert_eq!(
            error_context.unwrap().to_string(),
            r#"list extra
     ^"#
        );
    }

    #[test]
    fn parse_tokens_error() {
        // Setup
        let interface = InMemoryInterface::default();
        let parser = parser(&interface);

        // Execute
        let exit_code = parser.parse_tokens(&["list", "--", "tap", "1"]).unwrap_err();

        // Verify
        assert_eq!(exit_code, 1);
        drop(parser);
        let (message, error, error_context) = interface.consume();
        assert_eq!(
            error.unwrap(),
            "Parse error: Could not interpret the end of input as Double."
        );
        assert_eq!(
            error_context.unwrap().to_string(),
            r#"list -- tap 1
              ^"#
        );
        let message = message.unwrap();
        assert_contains!(message, "usage: simctl");
        assert!(!message.contains("actions:"));
    }
}
