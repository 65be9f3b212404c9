pub mod coin;
pub mod date;
pub mod frequency;
pub mod series;
pub mod symbol;

pub use coin::CoinSlug;
pub use frequency::Frequency;
pub use series::{CoinBar, CoinHistory, QuoteBar, QuoteHistory, QuoteTable};
pub use symbol::Symbol;
