mod coin_history;
mod moments;
mod normality;
mod quotes;
mod stationarity;
mod summary;

use serde_json::Value;

use crate::cli::{Cli, Command};
use crate::error::CliError;

/// What a subcommand hands to the renderer: the human-readable report plus
/// the same result as JSON.
pub struct CommandOutput {
    pub text: String,
    pub json: Value,
    pub warnings: Vec<String>,
}

impl CommandOutput {
    pub fn new(text: impl Into<String>, json: Value) -> Self {
        Self {
            text: text.into(),
            json,
            warnings: Vec::new(),
        }
    }

    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings.extend(warnings);
        self
    }
}

pub fn run(cli: &Cli) -> Result<CommandOutput, CliError> {
    match &cli.command {
        Command::CoinHistory(args) => coin_history::run(args),
        Command::Quotes(args) => quotes::run(args),
        Command::Summary(args) => summary::run(args),
        Command::Stationarity(args) => stationarity::run(args),
        Command::Moments(args) => moments::run(args),
        Command::Normality(args) => normality::run(args),
    }
}
