use crate::model::action::Action;
use crate::model::configuration::{Configuration, OutputOptions};
use crate::model::query::{TargetFormat, TargetQuery};

/// Some actions, to be performed in order on the selected targets.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    pub configuration: Configuration,
    pub query: Option<TargetQuery>,
    pub format: Option<TargetFormat>,
    /// Never empty.
    pub actions: Vec<Action>,
}

/// A request for usage information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Help {
    pub output: OutputOptions,
    /// Whether `help` was asked for, rather than shown in response to a bad command line.
    pub user_initiated: bool,
}

/// Everything a command line may ask for.
#[derive(Debug, Clone, PartialEq)]
pub enum Cli {
    Run(Command),
    Show(Help),
}
