use serde_json::json;

use tickhist_stats::{kurtosis, skewness, Ddof};

use crate::cli::MomentsArgs;
use crate::commands::CommandOutput;
use crate::error::CliError;
use crate::input;

pub fn run(args: &MomentsArgs) -> Result<CommandOutput, CliError> {
    let values = input::load_series(&args.series.file, args.series.column.as_deref())?;
    let ddof = Ddof::try_from(args.ddof)?;

    let skew = skewness(&values, ddof)?;
    let kurt = kurtosis(&values, ddof)?;

    let text = format!("{skew}\n{kurt}");
    let payload = json!({
        "skewness": skew,
        "kurtosis": kurt,
    });

    Ok(CommandOutput::new(text, payload))
}
