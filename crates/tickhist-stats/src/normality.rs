//! Jarque-Bera normality test.

use std::fmt::{Display, Formatter};

use indexmap::IndexMap;
use serde::Serialize;
use statrs::distribution::{ChiSquared, ContinuousCDF};
use statrs::statistics::Statistics;

use crate::error::StatsError;
use crate::moments::central_moment;
use crate::table::ReturnsTable;

/// Critical level the verdict defaults to when the caller gives none.
pub const DEFAULT_CRITICAL_LEVEL: f64 = 0.01;

/// Normality verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Normality {
    Normal,
    NotNormal,
}

/// Structured Jarque-Bera result; `Display` renders the report text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NormalityReport {
    pub statistic: f64,
    pub p_value: f64,
    pub critical_level: f64,
    pub decision: Normality,
}

impl Display for NormalityReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "J_B Statistic: {:.6}", self.statistic)?;
        writeln!(f, "p-value: {:.6}", self.p_value)?;
        match self.decision {
            Normality::Normal => write!(f, "The distribution is normal."),
            Normality::NotNormal => write!(f, "The series is not normal."),
        }
    }
}

/// Jarque-Bera test: `JB = n/6 * (S^2 + (K - 3)^2 / 4)` with population
/// skewness `S` and kurtosis `K`, compared against a chi-squared
/// distribution with two degrees of freedom.
///
/// The series is declared normal when the p-value exceeds
/// `critical_level`.
pub fn jarque_bera(values: &[f64], critical_level: f64) -> Result<NormalityReport, StatsError> {
    if values.is_empty() {
        return Err(StatsError::EmptySeries);
    }

    let sigma = values.population_std_dev();
    let skew = central_moment(values, 3) / sigma.powi(3);
    let kurt = central_moment(values, 4) / sigma.powi(4);

    let n = values.len() as f64;
    let statistic = n / 6.0 * (skew * skew + (kurt - 3.0) * (kurt - 3.0) / 4.0);

    // Two degrees of freedom is a valid shape, so the constructor cannot fail.
    let chi2 = ChiSquared::new(2.0).expect("chi-squared with 2 degrees of freedom is valid");
    let p_value = 1.0 - chi2.cdf(statistic);

    let decision = if p_value > critical_level {
        Normality::Normal
    } else {
        Normality::NotNormal
    };

    Ok(NormalityReport {
        statistic,
        p_value,
        critical_level,
        decision,
    })
}

/// Column-wise [`jarque_bera`] over a table, in column order.
pub fn jarque_bera_by_column(
    table: &ReturnsTable,
    critical_level: f64,
) -> Result<IndexMap<String, NormalityReport>, StatsError> {
    table
        .columns()
        .map(|(name, values)| Ok((name.to_owned(), jarque_bera(values, critical_level)?)))
        .collect()
}
