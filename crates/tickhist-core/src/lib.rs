//! Core contracts for tickhist.
//!
//! This crate contains:
//! - Canonical domain models and validation
//! - The blocking HTTP transport seam
//! - The coin history page scraper and the quotes CSV fetcher

pub mod domain;
pub mod error;
pub mod fetch;
pub mod http;

pub use domain::{
    CoinBar, CoinHistory, CoinSlug, Frequency, QuoteBar, QuoteHistory, QuoteTable, Symbol,
};
pub use error::{FetchError, ValidationError};
pub use fetch::{CoinHistoryFetcher, QuoteWindow, QuotesFetcher, TableSelector};
pub use http::{
    HttpClient, HttpError, HttpRequest, HttpResponse, NoopHttpClient, ReqwestHttpClient,
};
