pub mod coin_history;
pub mod quotes;

pub use coin_history::{CoinHistoryFetcher, TableSelector};
pub use quotes::{QuoteWindow, QuotesFetcher, QUOTES_BASE_URL};
