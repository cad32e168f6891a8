use simargs_combinator::prelude::*;

use crate::grammar::primitive::of_directory;
use crate::model::{Configuration, ManagementOptions, OutputOptions};

pub fn of_output_options() -> Parser<OutputOptions> {
    union(output_flags())
}

pub fn of_management_options() -> Parser<ManagementOptions> {
    union(management_flags())
}

/// Output flags, management flags and `--set <dir>`, in any order.
pub fn of_configuration() -> Parser<Configuration> {
    let output = output_flags()
        .into_iter()
        .map(|flag| fragment(flag, Configuration::of_output_options));
    let management = management_flags()
        .into_iter()
        .map(|flag| fragment(flag, Configuration::of_management_options));
    let set = fragment(
        succeeded("--set", of_directory()),
        Configuration::of_device_set_path,
    );

    accumulate(0, output.chain(management).chain([set]).collect())
}

fn output_flags() -> Vec<Parser<OutputOptions>> {
    vec![
        Parser::of_string("--debug-logging", OutputOptions::DEBUG_LOGGING),
        Parser::of_string("--json", OutputOptions::JSON),
        Parser::of_string("--pretty", OutputOptions::PRETTY),
    ]
}

fn management_flags() -> Vec<Parser<ManagementOptions>> {
    vec![
        Parser::of_string("--delete-all", ManagementOptions::DELETE_ALL_ON_FIRST_START),
        Parser::of_string("--kill-all", ManagementOptions::KILL_ALL_ON_FIRST_START),
        Parser::of_string(
            "--kill-spurious",
            ManagementOptions::KILL_SPURIOUS_SIMULATORS_ON_FIRST_START,
        ),
        Parser::of_string(
            "--ignore-spurious-kill-fail",
            ManagementOptions::IGNORE_SPURIOUS_KILL_FAIL,
        ),
        Parser::of_string(
            "--kill-spurious-services",
            ManagementOptions::KILL_SPURIOUS_CORE_SIMULATOR_SERVICES,
        ),
        Parser::of_string(
            "--timeout-resiliance",
            ManagementOptions::USE_SIM_DEVICE_TIMEOUT_RESILIANCE,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::seq::SliceRandom;
    use rand::thread_rng;
    use rstest::rstest;
    use std::path::PathBuf;

    #[rstest]
    #[case(vec![], OutputOptions::empty())]
    #[case(vec!["--json"], OutputOptions::JSON)]
    #[case(vec!["--pretty", "--debug-logging", "--pretty"], OutputOptions::PRETTY | OutputOptions::DEBUG_LOGGING)]
    fn output_options(#[case] tokens: Vec<&str>, #[case] expected: OutputOptions) {
        assert_eq!(of_output_options().parse_tokens(&tokens).unwrap(), expected);
    }

    #[test]
    fn empty_configuration() {
        assert_eq!(
            of_configuration().parse_tokens(&[]).unwrap(),
            Configuration::default()
        );
    }

    #[test]
    fn configuration_is_order_insensitive() {
        // Setup
        let directory = tempfile::tempdir().unwrap();
        let set = directory.path().to_str().unwrap().to_string();
        let mut groups: Vec<Vec<&str>> = vec![
            vec!["--json"],
            vec!["--kill-all"],
            vec!["--set", set.as_str()],
            vec!["--debug-logging"],
            vec!["--timeout-resiliance"],
            vec!["--kill-spurious-services"],
        ];
        let expected = Configuration {
            output: OutputOptions::JSON | OutputOptions::DEBUG_LOGGING,
            management: ManagementOptions::KILL_ALL_ON_FIRST_START
                | ManagementOptions::USE_SIM_DEVICE_TIMEOUT_RESILIANCE
                | ManagementOptions::KILL_SPURIOUS_CORE_SIMULATOR_SERVICES,
            device_set_path: Some(PathBuf::from(&set)),
        };

        for _ in 0..10 {
            groups.shuffle(&mut thread_rng());
            let tokens: Vec<&str> = groups.iter().flatten().copied().collect();

            // Execute
            let configuration = of_configuration().parse_tokens(&tokens).unwrap();

            // Verify
            assert_eq!(configuration, expected, "{tokens:?}");
        }
    }

    #[test]
    fn stops_before_invalid_set() {
        // Setup
        let tokens = ["--json", "--set", "/no/such/directory"];

        // Execute
        let parsed = of_configuration()
            .parse(TokenCursor::new(&tokens))
            .unwrap();

        // Verify
        assert_eq!(
            parsed.value,
            Configuration::of_output_options(OutputOptions::JSON)
        );
        assert_eq!(parsed.cursor.position(), 1);
        let recovered = parsed.recovered.unwrap();
        assert_eq!(recovered.offset(), 2);
        assert_eq!(
            recovered.into_error(),
            ParseError::custom("'/no/such/directory' should exist, but doesn't")
        );
    }
}
