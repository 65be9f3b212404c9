use tickhist_stats::jarque_bera;

use crate::cli::NormalityArgs;
use crate::commands::CommandOutput;
use crate::error::CliError;
use crate::input;

pub fn run(args: &NormalityArgs) -> Result<CommandOutput, CliError> {
    let values = input::load_series(&args.series.file, args.series.column.as_deref())?;
    let report = jarque_bera(&values, args.critical_level)?;

    let payload = serde_json::to_value(&report)?;
    Ok(CommandOutput::new(report.to_string(), payload))
}
