use std::sync::Arc;

use prettytable::{Cell, Row, Table};
use serde_json::json;

use tickhist_core::domain::date::parse_dmy;
use tickhist_core::{Frequency, QuoteWindow, QuotesFetcher, ReqwestHttpClient, Symbol};

use crate::cli::QuotesArgs;
use crate::commands::CommandOutput;
use crate::error::CliError;

pub fn run(args: &QuotesArgs) -> Result<CommandOutput, CliError> {
    let symbols = args
        .tickers
        .iter()
        .map(|raw| Symbol::parse(raw))
        .collect::<Result<Vec<_>, _>>()?;

    let frequency: Frequency = args.frequency.parse()?;
    let mut window = QuoteWindow::new().with_frequency(frequency);
    if let Some(raw) = &args.start {
        window = window.with_start(parse_dmy(raw)?);
    }
    if let Some(raw) = &args.end {
        window = window.with_end(parse_dmy(raw)?);
    }

    let fetcher = QuotesFetcher::new(Arc::new(ReqwestHttpClient::new()));
    let quotes = fetcher.fetch_many(&symbols, &window)?;

    let mut table = Table::new();
    table.add_row(Row::new(vec![
        Cell::new("Ticker"),
        Cell::new("Date"),
        Cell::new("Open"),
        Cell::new("High"),
        Cell::new("Low"),
        Cell::new("Close"),
        Cell::new("Adj Close"),
        Cell::new("Volume"),
    ]));
    for (symbol, bar) in quotes.rows() {
        table.add_row(Row::new(vec![
            Cell::new(symbol.as_str()),
            Cell::new(&bar.date.to_string()),
            Cell::new(&format!("{:.4}", bar.open)),
            Cell::new(&format!("{:.4}", bar.high)),
            Cell::new(&format!("{:.4}", bar.low)),
            Cell::new(&format!("{:.4}", bar.close)),
            Cell::new(&format!("{:.4}", bar.adj_close)),
            Cell::new(&bar.volume.to_string()),
        ]));
    }

    let rows: Vec<_> = quotes
        .rows()
        .map(|(symbol, bar)| {
            json!({
                "ticker": symbol.as_str(),
                "date": bar.date.to_string(),
                "open": bar.open,
                "high": bar.high,
                "low": bar.low,
                "close": bar.close,
                "adj_close": bar.adj_close,
                "volume": bar.volume,
            })
        })
        .collect();
    let payload = json!({
        "tickers": symbols.iter().map(Symbol::as_str).collect::<Vec<_>>(),
        "frequency": frequency.as_str(),
        "rows": rows,
    });

    let warnings: Vec<String> = quotes.warnings().map(str::to_owned).collect();
    Ok(CommandOutput::new(table.to_string(), payload).with_warnings(warnings))
}
