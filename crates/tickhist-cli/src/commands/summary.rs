use prettytable::{Cell, Row, Table};
use serde_json::json;

use tickhist_stats::partitioned_summary_stats;

use crate::cli::SummaryArgs;
use crate::commands::CommandOutput;
use crate::error::CliError;
use crate::input;

pub fn run(args: &SummaryArgs) -> Result<CommandOutput, CliError> {
    let values = input::load_series(&args.series.file, args.series.column.as_deref())?;
    let stats = partitioned_summary_stats(&values, args.partitions)?;

    let mut table = Table::new();
    table.add_row(Row::new(vec![
        Cell::new("Partition"),
        Cell::new("Mean"),
        Cell::new("Std Dev"),
    ]));
    for (index, partition) in stats.partitions().iter().enumerate() {
        table.add_row(Row::new(vec![
            Cell::new(&index.to_string()),
            Cell::new(&format!("{:.6}", partition.mean)),
            Cell::new(&format!("{:.6}", partition.std_dev)),
        ]));
    }

    let payload = json!({
        "partitions": stats.partitions(),
        "observations": values.len(),
    });

    Ok(CommandOutput::new(table.to_string(), payload))
}
