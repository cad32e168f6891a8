use std::collections::BTreeMap;

use simargs_combinator::prelude::*;

use crate::grammar::primitive::{
    of_any, of_binary, of_bundle_id, of_dash_separator, of_directory, of_double, of_locale,
};
use crate::model::{
    AgentLaunchConfiguration, ApplicationLaunchConfiguration, BootConfiguration, BootOptions,
    ProcessLaunchOptions, Scale, TestLaunchConfiguration,
};

pub fn of_process_launch_options() -> Parser<ProcessLaunchOptions> {
    union(vec![
        Parser::of_string("--stdout", ProcessLaunchOptions::WRITE_STDOUT),
        Parser::of_string("--stderr", ProcessLaunchOptions::WRITE_STDERR),
    ])
}

/// Arguments for the launched process, up to the next `--`.
pub fn of_arguments() -> Parser<Vec<String>> {
    many_till(of_dash_separator(), of_any())
}

pub fn of_application_launch() -> Parser<ApplicationLaunchConfiguration> {
    sequence3(of_process_launch_options(), of_bundle_id(), of_arguments())
        .map(|(options, bundle_id, arguments)| ApplicationLaunchConfiguration {
            bundle_id,
            arguments,
            environment: BTreeMap::default(),
            options,
        })
        .described("Application Launch")
}

pub fn of_agent_launch() -> Parser<AgentLaunchConfiguration> {
    sequence3(of_process_launch_options(), of_binary(), of_arguments())
        .map(|(options, binary, arguments)| AgentLaunchConfiguration {
            binary,
            arguments,
            environment: BTreeMap::default(),
            options,
        })
        .described("Agent Launch")
}

/// `[--test-timeout <seconds>] <test bundle> <application launch>`
pub fn of_test_launch() -> Parser<TestLaunchConfiguration> {
    sequence3(
        succeeded("--test-timeout", of_double()).optional(),
        of_directory(),
        of_application_launch(),
    )
    .map(|(timeout, test_bundle, application)| TestLaunchConfiguration {
        test_bundle,
        application,
        timeout,
    })
    .described("Test Launch")
}

pub fn of_scale() -> Parser<Scale> {
    alternative(
        Scale::ALL
            .iter()
            .map(|scale| Parser::of_string(format!("--scale={}", scale.percent()), *scale))
            .collect(),
    )
}

pub fn of_boot_options() -> Parser<BootOptions> {
    union_count(
        1,
        vec![
            Parser::of_string("--connect-bridge", BootOptions::CONNECT_BRIDGE),
            Parser::of_string("--direct-launch", BootOptions::ENABLE_DIRECT_LAUNCH),
            Parser::of_string("--use-nsworkspace", BootOptions::USE_NSWORKSPACE),
            Parser::of_string("--debug-window", BootOptions::SHOW_DEBUG_WINDOW),
        ],
    )
}

/// `[--locale <locale>] [--scale=<percent>] [<boot flags>]`, with at least one of them.
pub fn of_boot_configuration() -> Parser<BootConfiguration> {
    sequence3(
        succeeded("--locale", of_locale()).optional(),
        of_scale().optional(),
        of_boot_options().optional(),
    )
    .fmap(|(locale, scale, options)| {
        if locale.is_none() && scale.is_none() && options.is_none() {
            return Err(ParseError::custom(
                "Simulator Launch Configuration must contain at least a locale or scale",
            ));
        }

        Ok(BootConfiguration {
            locale,
            scale,
            options: options.unwrap_or_default(),
        })
    })
    .described("Boot Configuration")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::primitive::tests::application_bundle;
    use crate::model::Locale;
    use rstest::rstest;
    use std::fs::File;

    #[test]
    fn application_launch() {
        // Setup
        let tokens = ["--stderr", "com.example.app", "--verbose", "1", "--", "list"];

        // Execute
        let parsed = of_application_launch()
            .parse(TokenCursor::new(&tokens))
            .unwrap();

        // Verify
        assert_eq!(
            parsed.value,
            ApplicationLaunchConfiguration {
                bundle_id: "com.example.app".to_string(),
                arguments: vec!["--verbose".to_string(), "1".to_string()],
                environment: BTreeMap::default(),
                options: ProcessLaunchOptions::WRITE_STDERR,
            }
        );
        assert_eq!(parsed.cursor.position(), 4);
    }

    #[test]
    fn agent_launch() {
        // Setup
        let directory = tempfile::tempdir().unwrap();
        let binary = directory.path().join("agent");
        File::create(&binary).unwrap();
        let tokens = ["--stdout", "--stderr", binary.to_str().unwrap()];

        // Execute
        let launch = of_agent_launch().parse_tokens(&tokens).unwrap();

        // Verify
        assert_eq!(launch.binary, binary);
        assert!(launch.arguments.is_empty());
        assert_eq!(launch.options, ProcessLaunchOptions::all());
    }

    #[test]
    fn test_launch() {
        // Setup
        let directory = tempfile::tempdir().unwrap();
        let test_bundle = directory.path().join("Tests.xctest");
        std::fs::create_dir(&test_bundle).unwrap();
        let application = application_bundle(&directory, "Host", "com.example.host");
        let tokens = [
            "--test-timeout",
            "30",
            test_bundle.to_str().unwrap(),
            application.to_str().unwrap(),
        ];

        // Execute
        let launch = of_test_launch().parse_tokens(&tokens).unwrap();

        // Verify
        assert_eq!(launch.timeout, Some(30.0));
        assert_eq!(launch.test_bundle, test_bundle);
        assert_eq!(launch.application.bundle_id, "com.example.host");
    }

    #[rstest]
    #[case(vec!["--locale", "en_US"], Some("en_US"), None, BootOptions::empty())]
    #[case(vec!["--scale=50"], None, Some(Scale::Half), BootOptions::empty())]
    #[case(
        vec!["--locale", "fr", "--scale=100", "--debug-window", "--connect-bridge"],
        Some("fr"),
        Some(Scale::Full),
        BootOptions::SHOW_DEBUG_WINDOW | BootOptions::CONNECT_BRIDGE
    )]
    #[case(vec!["--direct-launch"], None, None, BootOptions::ENABLE_DIRECT_LAUNCH)]
    fn boot_configuration(
        #[case] tokens: Vec<&str>,
        #[case] locale: Option<&str>,
        #[case] scale: Option<Scale>,
        #[case] options: BootOptions,
    ) {
        assert_eq!(
            of_boot_configuration().parse_tokens(&tokens).unwrap(),
            BootConfiguration {
                locale: locale.map(Locale::new),
                scale,
                options,
            }
        );
    }

    #[test]
    fn boot_configuration_must_not_be_empty() {
        let failure = of_boot_configuration().parse_tokens(&["list"]).unwrap_err();
        assert_eq!(failure.offset(), 0);
        assert_eq!(
            failure.into_error(),
            ParseError::custom("Simulator Launch Configuration must contain at least a locale or scale")
        );
    }

    #[test]
    fn unknown_scale() {
        let tokens = ["--scale=60"];
        assert!(of_scale().parse_tokens(&tokens).is_err());
    }
}
