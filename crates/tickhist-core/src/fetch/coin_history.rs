//! Coin historical price scraper.
//!
//! Pulls the historical-data listing page for a coin slug and parses the
//! price table into a [`CoinHistory`].

use std::sync::Arc;

use scraper::{ElementRef, Html, Selector};
use time::Date;

use crate::domain::date::{format_compact, parse_page_date};
use crate::domain::{CoinBar, CoinHistory, CoinSlug};
use crate::error::FetchError;
use crate::http::{HttpClient, HttpRequest};

pub const COIN_BASE_URL: &str = "https://coinmarketcap.com";

/// Which `<table>` on the listing page holds the price history.
///
/// The upstream page puts the data in the third table; selection is purely
/// positional, so a layout change upstream breaks the scrape with a
/// [`FetchError::MissingTable`] rather than silently reading the wrong
/// table. Override the index if the page moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSelector {
    index: usize,
}

impl TableSelector {
    pub const fn nth(index: usize) -> Self {
        Self { index }
    }

    pub const fn index(self) -> usize {
        self.index
    }
}

impl Default for TableSelector {
    fn default() -> Self {
        Self::nth(2)
    }
}

/// Fetcher for the coin historical-data listing page.
pub struct CoinHistoryFetcher {
    http: Arc<dyn HttpClient>,
    base_url: String,
    table_selector: TableSelector,
}

impl CoinHistoryFetcher {
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self {
            http,
            base_url: String::from(COIN_BASE_URL),
            table_selector: TableSelector::default(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_table_selector(mut self, table_selector: TableSelector) -> Self {
        self.table_selector = table_selector;
        self
    }

    /// Listing-page URL for a slug and date range.
    pub fn page_url(&self, slug: &CoinSlug, start: Date, end: Date) -> String {
        format!(
            "{}/currencies/{}/historical-data/?start={}&end={}",
            self.base_url,
            slug,
            format_compact(start),
            format_compact(end),
        )
    }

    /// Fetch and parse the history for a coin name over a date range.
    ///
    /// The HTTP status of the listing page is not asserted (asymmetry with
    /// the quotes fetcher, kept from the source behavior): a bad response
    /// surfaces as a missing-table parse error instead.
    pub fn fetch(&self, coin: &str, start: Date, end: Date) -> Result<CoinHistory, FetchError> {
        let slug = CoinSlug::parse(coin)?;
        let url = self.page_url(&slug, start, end);
        let response = self.http.execute(HttpRequest::get(url))?;
        let bars = self.parse_page(&response.body)?;
        Ok(CoinHistory::new(slug, bars))
    }

    /// Parse a listing-page HTML document into bars.
    pub fn parse_page(&self, html: &str) -> Result<Vec<CoinBar>, FetchError> {
        let document = Html::parse_document(html);
        let table_sel = Selector::parse("table").expect("static selector must parse");
        let th_sel = Selector::parse("th").expect("static selector must parse");
        let tr_sel = Selector::parse("tr").expect("static selector must parse");
        let td_sel = Selector::parse("td").expect("static selector must parse");

        let tables: Vec<ElementRef> = document.select(&table_sel).collect();
        let wanted = self.table_selector.index();
        let table = tables.get(wanted).copied().ok_or(FetchError::MissingTable {
            wanted,
            found: tables.len(),
        })?;

        let mut rows: Vec<Vec<String>> = table
            .select(&tr_sel)
            .map(|row| row.select(&td_sel).map(cell_text).collect())
            .filter(|cells: &Vec<String>| !cells.is_empty())
            .collect();

        let headers: Vec<String> = {
            let th: Vec<String> = table
                .select(&th_sel)
                .map(|cell| canonical_header(&cell_text(cell)))
                .collect();
            if th.is_empty() {
                if rows.is_empty() {
                    Vec::new()
                } else {
                    rows.remove(0)
                        .iter()
                        .map(|cell| canonical_header(cell))
                        .collect()
                }
            } else {
                th
            }
        };

        let date_idx = column_index(&headers, "Date")?;
        let open_idx = column_index(&headers, "Open")?;
        let high_idx = column_index(&headers, "High")?;
        let low_idx = column_index(&headers, "Low")?;
        let close_idx = column_index(&headers, "Close")?;
        let volume_idx = column_index(&headers, "Volume")?;
        let market_cap_idx = column_index(&headers, "Market Cap")?;

        let mut bars = Vec::with_capacity(rows.len());
        for cells in &rows {
            if cells.len() < headers.len() {
                continue;
            }

            let raw_date = &cells[date_idx];
            let date = parse_page_date(raw_date).map_err(|_| FetchError::MalformedCell {
                column: String::from("Date"),
                value: raw_date.clone(),
            })?;

            bars.push(CoinBar::from_page(
                date,
                parse_number("Open", &cells[open_idx])?,
                parse_number("High", &cells[high_idx])?,
                parse_number("Low", &cells[low_idx])?,
                parse_number("Close", &cells[close_idx])?,
                parse_number("Volume", &cells[volume_idx])?,
                parse_number("Market Cap", &cells[market_cap_idx])?,
            ));
        }

        Ok(bars)
    }
}

fn cell_text(cell: ElementRef) -> String {
    cell.text().collect::<String>().trim().to_owned()
}

/// Strip footnote asterisks from header variants ("Open*" -> "Open",
/// "Close**" -> "Close").
fn canonical_header(raw: &str) -> String {
    raw.trim().trim_end_matches('*').trim_end().to_owned()
}

fn column_index(headers: &[String], name: &str) -> Result<usize, FetchError> {
    headers
        .iter()
        .position(|header| header == name)
        .ok_or_else(|| FetchError::MissingColumn {
            name: name.to_owned(),
        })
}

/// Parse a numeric page cell. Thousands separators are stripped; the page
/// renders absent values as "-", which map to NaN.
fn parse_number(column: &str, raw: &str) -> Result<f64, FetchError> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|ch| *ch != ',' && *ch != '$')
        .collect();
    if cleaned.is_empty() || cleaned == "-" {
        return Ok(f64::NAN);
    }
    cleaned.parse().map_err(|_| FetchError::MalformedCell {
        column: column.to_owned(),
        value: raw.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn builds_page_url_with_compact_dates() {
        let fetcher = CoinHistoryFetcher::new(Arc::new(crate::http::NoopHttpClient));
        let slug = CoinSlug::parse("Bitcoin Cash").expect("valid name");
        let url = fetcher.page_url(&slug, date!(2013 - 04 - 28), date!(2018 - 01 - 01));
        assert_eq!(
            url,
            "https://coinmarketcap.com/currencies/bitcoin-cash/historical-data/?start=20130428&end=20180101"
        );
    }

    #[test]
    fn canonicalizes_header_variants() {
        assert_eq!(canonical_header("Open*"), "Open");
        assert_eq!(canonical_header("Close**"), "Close");
        assert_eq!(canonical_header(" Market Cap "), "Market Cap");
    }

    #[test]
    fn dash_cells_become_nan() {
        let value = parse_number("Volume", "-").expect("dash is not an error");
        assert!(value.is_nan());
        assert_eq!(parse_number("Volume", "1,234,567").expect("parses"), 1_234_567.0);
    }

    #[test]
    fn malformed_cell_is_an_error() {
        let err = parse_number("Open", "abc").expect_err("must fail");
        assert!(matches!(err, FetchError::MalformedCell { .. }));
    }
}
