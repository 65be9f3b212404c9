use tickhist_stats::{adf_test, AdfConfig, DecisionRule};

use crate::cli::StationarityArgs;
use crate::commands::CommandOutput;
use crate::error::CliError;
use crate::input;

pub fn run(args: &StationarityArgs) -> Result<CommandOutput, CliError> {
    let values = input::load_series(&args.series.file, args.series.column.as_deref())?;

    let mut config = AdfConfig {
        lags: args.lags,
        ..AdfConfig::default()
    };
    if let Some(threshold) = args.p_threshold {
        config.rule = DecisionRule::PValue(threshold);
    }

    let report = adf_test(&values, &config)?;
    let payload = serde_json::to_value(&report)?;
    Ok(CommandOutput::new(report.to_string(), payload))
}
