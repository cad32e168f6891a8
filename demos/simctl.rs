use std::collections::HashMap;
use std::env;

use simargs::model::Cli;
use simargs::CommandLineParser;

fn main() {
    let clp = CommandLineParser::new("simctl");
    let environment: HashMap<String, String> = env::vars().collect();
    let cli = clp.parse().append_environment(&environment);

    if let Cli::Run(command) = cli {
        println!("Configuration: {:?}", command.configuration);
        println!("Query: {:?}", command.query);
        println!("Format: {:?}", command.format);

        for action in &command.actions {
            match action.reportable() {
                (name, Some(subject)) => println!("{name}: {subject}"),
                (name, None) => println!("{name}"),
            }
        }
    }
}
