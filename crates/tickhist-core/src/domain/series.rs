//! Time-indexed price series for the two fetchers.
//!
//! Invariant shared by both series kinds: bars are sorted ascending by date
//! after load, and every bar is stamped with its identifier (slug or ticker)
//! by the owning series.

use time::Date;

use crate::domain::{CoinSlug, Symbol};

const BILLION: f64 = 1e9;

/// One day of coin history from the listing page.
#[derive(Debug, Clone, PartialEq)]
pub struct CoinBar {
    pub date: Date,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub market_cap: f64,
    /// Volume expressed in billions (volume / 1e9).
    pub volume_bn: f64,
    /// Market cap expressed in billions (market cap / 1e9).
    pub market_cap_bn: f64,
}

impl CoinBar {
    /// Build a bar from raw page values, deriving the billion-scaled columns.
    #[allow(clippy::too_many_arguments)]
    pub fn from_page(
        date: Date,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        market_cap: f64,
    ) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
            market_cap,
            volume_bn: volume / BILLION,
            market_cap_bn: market_cap / BILLION,
        }
    }
}

/// Coin price history keyed by (slug, date), ascending by date.
#[derive(Debug, Clone, PartialEq)]
pub struct CoinHistory {
    slug: CoinSlug,
    bars: Vec<CoinBar>,
}

impl CoinHistory {
    pub fn new(slug: CoinSlug, mut bars: Vec<CoinBar>) -> Self {
        bars.sort_by_key(|bar| bar.date);
        Self { slug, bars }
    }

    pub fn slug(&self) -> &CoinSlug {
        &self.slug
    }

    pub fn bars(&self) -> &[CoinBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

/// One row of a quotes CSV download.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteBar {
    pub date: Date,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub adj_close: f64,
    pub volume: u64,
}

/// Quote history for a single ticker, ascending by date.
///
/// Coverage notices recorded during the fetch (e.g. the series starting
/// later than requested) ride along as non-fatal warnings.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteHistory {
    symbol: Symbol,
    bars: Vec<QuoteBar>,
    warnings: Vec<String>,
}

impl QuoteHistory {
    pub fn new(symbol: Symbol, mut bars: Vec<QuoteBar>) -> Self {
        bars.sort_by_key(|bar| bar.date);
        Self {
            symbol,
            bars,
            warnings: Vec::new(),
        }
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn bars(&self) -> &[QuoteBar] {
        &self.bars
    }

    pub fn first_date(&self) -> Option<Date> {
        self.bars.first().map(|bar| bar.date)
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn push_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}

/// Combined quote table over one or more tickers, conceptually indexed by
/// (ticker, date). Per-ticker order follows the request order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QuoteTable {
    series: Vec<QuoteHistory>,
}

impl QuoteTable {
    pub fn new(series: Vec<QuoteHistory>) -> Self {
        Self { series }
    }

    pub fn series(&self) -> &[QuoteHistory] {
        &self.series
    }

    pub fn symbols(&self) -> Vec<&Symbol> {
        self.series.iter().map(QuoteHistory::symbol).collect()
    }

    /// Total row count across all tickers.
    pub fn row_count(&self) -> usize {
        self.series.iter().map(QuoteHistory::len).sum()
    }

    /// Iterate rows as (ticker, bar) pairs in (ticker, date) order.
    pub fn rows(&self) -> impl Iterator<Item = (&Symbol, &QuoteBar)> {
        self.series
            .iter()
            .flat_map(|history| history.bars().iter().map(move |bar| (history.symbol(), bar)))
    }

    /// All coverage warnings recorded across tickers.
    pub fn warnings(&self) -> impl Iterator<Item = &str> {
        self.series
            .iter()
            .flat_map(|history| history.warnings().iter().map(String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn coin_bar(date: Date, close: f64) -> CoinBar {
        CoinBar::from_page(date, close, close, close, close, 2_000_000_000.0, 4e9)
    }

    #[test]
    fn coin_history_sorts_ascending() {
        let slug = CoinSlug::parse("bitcoin").expect("valid name");
        let history = CoinHistory::new(
            slug,
            vec![
                coin_bar(date!(2013 - 05 - 01), 2.0),
                coin_bar(date!(2013 - 04 - 28), 1.0),
            ],
        );
        assert_eq!(history.bars()[0].date, date!(2013 - 04 - 28));
        assert_eq!(history.bars()[1].date, date!(2013 - 05 - 01));
    }

    #[test]
    fn derives_billion_columns() {
        let bar = coin_bar(date!(2013 - 04 - 28), 1.0);
        assert!((bar.volume_bn - 2.0).abs() < 1e-12);
        assert!((bar.market_cap_bn - 4.0).abs() < 1e-12);
    }

    #[test]
    fn quote_table_counts_rows_across_tickers() {
        let aaa = QuoteHistory::new(
            Symbol::parse("AAA").expect("valid"),
            vec![QuoteBar {
                date: date!(2020 - 01 - 02),
                open: 1.0,
                high: 1.0,
                low: 1.0,
                close: 1.0,
                adj_close: 1.0,
                volume: 10,
            }],
        );
        let bbb = QuoteHistory::new(Symbol::parse("BBB").expect("valid"), Vec::new());
        let table = QuoteTable::new(vec![aaa, bbb]);
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.symbols().len(), 2);
    }
}
