use std::sync::Arc;

use prettytable::{Cell, Row, Table};
use serde_json::json;

use tickhist_core::domain::date::parse_dmy;
use tickhist_core::{CoinHistoryFetcher, ReqwestHttpClient, TableSelector};

use crate::cli::CoinHistoryArgs;
use crate::commands::CommandOutput;
use crate::error::CliError;

pub fn run(args: &CoinHistoryArgs) -> Result<CommandOutput, CliError> {
    let start = parse_dmy(&args.start)?;
    let end = parse_dmy(&args.end)?;

    let mut fetcher = CoinHistoryFetcher::new(Arc::new(ReqwestHttpClient::new()));
    if let Some(index) = args.table_index {
        fetcher = fetcher.with_table_selector(TableSelector::nth(index));
    }
    let history = fetcher.fetch(&args.coin, start, end)?;

    let mut table = Table::new();
    table.add_row(Row::new(vec![
        Cell::new("Date"),
        Cell::new("Open"),
        Cell::new("High"),
        Cell::new("Low"),
        Cell::new("Close"),
        Cell::new("Volume"),
        Cell::new("Market Cap"),
        Cell::new("Volume (bn)"),
        Cell::new("Market Cap (bn)"),
    ]));
    for bar in history.bars() {
        table.add_row(Row::new(vec![
            Cell::new(&bar.date.to_string()),
            Cell::new(&format!("{:.2}", bar.open)),
            Cell::new(&format!("{:.2}", bar.high)),
            Cell::new(&format!("{:.2}", bar.low)),
            Cell::new(&format!("{:.2}", bar.close)),
            Cell::new(&format!("{:.0}", bar.volume)),
            Cell::new(&format!("{:.0}", bar.market_cap)),
            Cell::new(&format!("{:.3}", bar.volume_bn)),
            Cell::new(&format!("{:.3}", bar.market_cap_bn)),
        ]));
    }

    let rows: Vec<_> = history
        .bars()
        .iter()
        .map(|bar| {
            json!({
                "date": bar.date.to_string(),
                "open": bar.open,
                "high": bar.high,
                "low": bar.low,
                "close": bar.close,
                "volume": bar.volume,
                "market_cap": bar.market_cap,
                "volume_bn": bar.volume_bn,
                "market_cap_bn": bar.market_cap_bn,
            })
        })
        .collect();
    let payload = json!({
        "coin": history.slug().as_str(),
        "rows": rows,
    });

    Ok(CommandOutput::new(table.to_string(), payload))
}
