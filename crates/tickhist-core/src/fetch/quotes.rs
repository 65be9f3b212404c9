//! Quotes CSV download fetcher.
//!
//! Builds a per-ticker download URL with date/frequency validation, fetches
//! the CSV body, and assembles a combined [`QuoteTable`].

use std::sync::Arc;

use time::macros::format_description;
use time::{Date, OffsetDateTime};

use crate::domain::date::{format_dmy, midnight_utc, validate_window};
use crate::domain::{Frequency, QuoteBar, QuoteHistory, QuoteTable, Symbol};
use crate::error::FetchError;
use crate::http::{HttpClient, HttpRequest};
use crate::ValidationError;

pub const QUOTES_BASE_URL: &str = "https://query1.finance.yahoo.com/v7/finance";

/// Requested date window and sampling frequency.
///
/// Both endpoints are optional: the start defaults to the UNIX epoch (the
/// explicit stand-in for "from the beginning of the series") and the end
/// defaults to the current UTC instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuoteWindow {
    start: Option<Date>,
    end: Option<Date>,
    frequency: Frequency,
}

impl QuoteWindow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_start(mut self, start: Date) -> Self {
        self.start = Some(start);
        self
    }

    pub fn with_end(mut self, end: Date) -> Self {
        self.end = Some(end);
        self
    }

    pub fn with_frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Resolve to concrete UTC endpoints, applying the documented defaults.
    pub fn resolve(&self, now: OffsetDateTime) -> (OffsetDateTime, OffsetDateTime) {
        let start = self
            .start
            .map(midnight_utc)
            .unwrap_or(OffsetDateTime::UNIX_EPOCH);
        let end = self.end.map(midnight_utc).unwrap_or(now);
        (start, end)
    }
}

/// Fetcher for the quotes CSV download endpoint.
pub struct QuotesFetcher {
    http: Arc<dyn HttpClient>,
    base_url: String,
}

impl QuotesFetcher {
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self {
            http,
            base_url: String::from(QUOTES_BASE_URL),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Build the CSV download URL for one ticker.
    ///
    /// Validation happens here, once per ticker: the window must not be
    /// inverted and neither endpoint may lie in the future.
    pub fn download_url(
        &self,
        symbol: &Symbol,
        start: OffsetDateTime,
        end: OffsetDateTime,
        frequency: Frequency,
    ) -> Result<String, ValidationError> {
        validate_window(start, end, OffsetDateTime::now_utc())?;
        Ok(format!(
            "{}/download/{}?period1={}&period2={}&interval={}&events=history",
            self.base_url,
            urlencoding::encode(symbol.as_str()),
            start.unix_timestamp(),
            end.unix_timestamp(),
            frequency.interval_code(),
        ))
    }

    /// Fetch the history for a single ticker.
    ///
    /// A non-2xx status is raised eagerly, before any parsing. If the series
    /// starts later than the requested start, a coverage warning is recorded
    /// on the history; this never alters control flow.
    pub fn fetch_one(
        &self,
        symbol: &Symbol,
        window: &QuoteWindow,
    ) -> Result<QuoteHistory, FetchError> {
        let now = OffsetDateTime::now_utc();
        let (start, end) = window.resolve(now);
        let url = self.download_url(symbol, start, end, window.frequency())?;

        let response = self.http.execute(HttpRequest::get(url.clone()))?;
        if !response.is_success() {
            return Err(FetchError::Status {
                status: response.status,
                url,
            });
        }

        let bars = parse_quote_csv(&response.body)?;
        let mut history = QuoteHistory::new(symbol.clone(), bars);
        if let Some(first) = history.first_date() {
            if midnight_utc(first) > start {
                history.push_warning(format!("time series starts on {}", format_dmy(first)));
            }
        }
        Ok(history)
    }

    /// Fetch and concatenate histories for several tickers, in the given
    /// order. Any single ticker's failure aborts the whole call; there is no
    /// partial success.
    pub fn fetch_many(
        &self,
        symbols: &[Symbol],
        window: &QuoteWindow,
    ) -> Result<QuoteTable, FetchError> {
        let mut series = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            series.push(self.fetch_one(symbol, window)?);
        }
        Ok(QuoteTable::new(series))
    }
}

fn parse_quote_csv(body: &str) -> Result<Vec<QuoteBar>, FetchError> {
    let mut reader = csv::Reader::from_reader(body.as_bytes());
    let headers = reader.headers()?.clone();

    let date_idx = header_index(&headers, "Date")?;
    let open_idx = header_index(&headers, "Open")?;
    let high_idx = header_index(&headers, "High")?;
    let low_idx = header_index(&headers, "Low")?;
    let close_idx = header_index(&headers, "Close")?;
    let adj_close_idx = header_index(&headers, "Adj Close")?;
    let volume_idx = header_index(&headers, "Volume")?;

    let mut bars = Vec::new();
    for record in reader.records() {
        let record = record?;

        let raw_date = record.get(date_idx).unwrap_or_default();
        let date = Date::parse(raw_date, format_description!("[year]-[month]-[day]")).map_err(
            |_| FetchError::MalformedCell {
                column: String::from("Date"),
                value: raw_date.to_owned(),
            },
        )?;

        bars.push(QuoteBar {
            date,
            open: parse_float(&record, open_idx, "Open")?,
            high: parse_float(&record, high_idx, "High")?,
            low: parse_float(&record, low_idx, "Low")?,
            close: parse_float(&record, close_idx, "Close")?,
            adj_close: parse_float(&record, adj_close_idx, "Adj Close")?,
            volume: parse_volume(&record, volume_idx)?,
        });
    }
    Ok(bars)
}

fn header_index(headers: &csv::StringRecord, name: &str) -> Result<usize, FetchError> {
    headers
        .iter()
        .position(|header| header == name)
        .ok_or_else(|| FetchError::MissingColumn {
            name: name.to_owned(),
        })
}

fn parse_float(record: &csv::StringRecord, idx: usize, column: &str) -> Result<f64, FetchError> {
    let raw = record.get(idx).unwrap_or_default().trim();
    raw.parse().map_err(|_| FetchError::MalformedCell {
        column: column.to_owned(),
        value: raw.to_owned(),
    })
}

fn parse_volume(record: &csv::StringRecord, idx: usize) -> Result<u64, FetchError> {
    let raw = record.get(idx).unwrap_or_default().trim();
    raw.parse().map_err(|_| FetchError::MalformedCell {
        column: String::from("Volume"),
        value: raw.to_owned(),
    })
}
