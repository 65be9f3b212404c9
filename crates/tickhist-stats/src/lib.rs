//! Statistics on return series for tickhist.
//!
//! Every function takes an already-loaded numeric sequence and returns a
//! structured report value; `Display` impls derive the human-readable text.
//! Nothing here performs I/O and nothing is cached between calls.

pub mod error;
pub mod moments;
pub mod normality;
pub mod stationarity;
pub mod summary;
pub mod table;

pub use error::StatsError;
pub use moments::{
    kurtosis, kurtosis_by_column, skewness, skewness_by_column, Ddof, KurtosisReport,
    KurtosisShape, SkewDirection, SkewnessReport,
};
pub use normality::{
    jarque_bera, jarque_bera_by_column, Normality, NormalityReport, DEFAULT_CRITICAL_LEVEL,
};
pub use stationarity::{
    adf_test, AdfConfig, AdfReport, ConfidenceLevel, CriticalValue, DecisionRule, Stationarity,
};
pub use summary::{partitioned_summary_stats, PartitionStats, SummaryStatsTable};
pub use table::ReturnsTable;
