//! Skewness and kurtosis (third and fourth standardized moments).

use std::fmt::{Display, Formatter};

use indexmap::IndexMap;
use serde::Serialize;
use statrs::statistics::Statistics;

use crate::error::StatsError;
use crate::table::ReturnsTable;

/// Degrees-of-freedom flag for the standard deviation. Only 0 (population)
/// and 1 (Bessel-corrected sample) are valid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Ddof {
    #[default]
    Population,
    Sample,
}

impl Ddof {
    pub const fn value(self) -> u8 {
        match self {
            Self::Population => 0,
            Self::Sample => 1,
        }
    }

    const fn is_bessel(self) -> bool {
        matches!(self, Self::Sample)
    }
}

impl TryFrom<u8> for Ddof {
    type Error = StatsError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Population),
            1 => Ok(Self::Sample),
            other => Err(StatsError::InvalidDdof {
                value: i64::from(other),
            }),
        }
    }
}

impl TryFrom<i64> for Ddof {
    type Error = StatsError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Population),
            1 => Ok(Self::Sample),
            other => Err(StatsError::InvalidDdof { value: other }),
        }
    }
}

/// Qualitative skew label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkewDirection {
    LeftSkewed,
    RightSkewed,
    Symmetric,
}

/// Qualitative kurtosis label relative to the normal distribution's 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KurtosisShape {
    Platykurtic,
    Leptokurtic,
    Mesokurtic,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SkewnessReport {
    pub value: f64,
    pub direction: SkewDirection,
    pub bessel_corrected: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KurtosisReport {
    pub value: f64,
    pub shape: KurtosisShape,
    /// Whether the Bessel notice applies. The kurtosis denominator itself
    /// always uses the population standard deviation; see [`kurtosis`].
    pub bessel_requested: bool,
}

impl Display for SkewnessReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.bessel_corrected {
            writeln!(f, "Calculating std with Bessel's correction")?;
        }
        write!(f, "Skewness: {:.6}", self.value)?;
        match self.direction {
            SkewDirection::LeftSkewed => write!(f, "\nDistribution is left skewed"),
            SkewDirection::RightSkewed => write!(f, "\nDistribution is right skewed"),
            SkewDirection::Symmetric => Ok(()),
        }
    }
}

impl Display for KurtosisReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.bessel_requested {
            writeln!(f, "Calculating std with Bessel's correction")?;
        }
        write!(f, "Kurtosis: {:.6}", self.value)?;
        match self.shape {
            KurtosisShape::Platykurtic => write!(f, "\nDistribution is platykurtic"),
            KurtosisShape::Leptokurtic => write!(f, "\nDistribution is leptokurtic"),
            KurtosisShape::Mesokurtic => {
                write!(f, "\nDistribution is neither platykurtic nor leptokurtic")
            }
        }
    }
}

/// Third standardized moment: mean of cubed demeaned values divided by the
/// cube of the standard deviation at the requested `ddof`.
pub fn skewness(values: &[f64], ddof: Ddof) -> Result<SkewnessReport, StatsError> {
    if values.is_empty() {
        return Err(StatsError::EmptySeries);
    }

    let sigma = match ddof {
        Ddof::Population => values.population_std_dev(),
        Ddof::Sample => values.std_dev(),
    };
    let value = central_moment(values, 3) / sigma.powi(3);

    let direction = if value < 0.0 {
        SkewDirection::LeftSkewed
    } else if value > 0.0 {
        SkewDirection::RightSkewed
    } else {
        SkewDirection::Symmetric
    };

    Ok(SkewnessReport {
        value,
        direction,
        bessel_corrected: ddof.is_bessel(),
    })
}

/// Fourth standardized moment: mean of fourth-power demeaned values divided
/// by the fourth power of the *population* standard deviation.
///
/// The `ddof` flag only drives the Bessel notice on the report; it never
/// changes the denominator. This asymmetry with [`skewness`] comes from the
/// source behavior and is kept as-is.
pub fn kurtosis(values: &[f64], ddof: Ddof) -> Result<KurtosisReport, StatsError> {
    if values.is_empty() {
        return Err(StatsError::EmptySeries);
    }

    let sigma = values.population_std_dev();
    let value = central_moment(values, 4) / sigma.powi(4);

    let shape = if value < 3.0 {
        KurtosisShape::Platykurtic
    } else if value > 3.0 {
        KurtosisShape::Leptokurtic
    } else {
        KurtosisShape::Mesokurtic
    };

    Ok(KurtosisReport {
        value,
        shape,
        bessel_requested: ddof.is_bessel(),
    })
}

/// Column-wise [`skewness`] over a table, in column order.
pub fn skewness_by_column(
    table: &ReturnsTable,
    ddof: Ddof,
) -> Result<IndexMap<String, SkewnessReport>, StatsError> {
    table
        .columns()
        .map(|(name, values)| Ok((name.to_owned(), skewness(values, ddof)?)))
        .collect()
}

/// Column-wise [`kurtosis`] over a table, in column order.
pub fn kurtosis_by_column(
    table: &ReturnsTable,
    ddof: Ddof,
) -> Result<IndexMap<String, KurtosisReport>, StatsError> {
    table
        .columns()
        .map(|(name, values)| Ok((name.to_owned(), kurtosis(values, ddof)?)))
        .collect()
}

pub(crate) fn central_moment(values: &[f64], power: i32) -> f64 {
    let mean = values.mean();
    values
        .iter()
        .map(|value| (value - mean).powi(power))
        .sum::<f64>()
        / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symmetric_input_has_zero_skewness() {
        let values = [-2.0, -1.0, 0.0, 1.0, 2.0];
        let report = skewness(&values, Ddof::Population).expect("non-empty");
        assert!(report.value.abs() < 1e-12);
        assert_eq!(report.direction, SkewDirection::Symmetric);
    }

    #[test]
    fn right_tail_yields_positive_skewness() {
        let values = [1.0, 1.0, 1.0, 1.0, 10.0];
        let report = skewness(&values, Ddof::Population).expect("non-empty");
        assert!(report.value > 0.0);
        assert_eq!(report.direction, SkewDirection::RightSkewed);
    }

    #[test]
    fn bessel_correction_shrinks_skewness_magnitude() {
        let values = [1.0, 2.0, 3.0, 4.0, 100.0];
        let population = skewness(&values, Ddof::Population).expect("non-empty");
        let sample = skewness(&values, Ddof::Sample).expect("non-empty");
        assert!(sample.bessel_corrected);
        assert!(sample.value.abs() < population.value.abs());
    }

    #[test]
    fn kurtosis_denominator_ignores_ddof() {
        let values = [1.0, 2.0, 3.0, 4.0, 100.0];
        let population = kurtosis(&values, Ddof::Population).expect("non-empty");
        let sample = kurtosis(&values, Ddof::Sample).expect("non-empty");
        assert_eq!(population.value, sample.value);
        assert!(sample.bessel_requested);
        assert!(!population.bessel_requested);
    }

    #[test]
    fn flat_tails_are_platykurtic() {
        // The two-point distribution has kurtosis 1, the platykurtic extreme.
        let values = [-1.0, 1.0, -1.0, 1.0];
        let report = kurtosis(&values, Ddof::Population).expect("non-empty");
        assert!((report.value - 1.0).abs() < 1e-12);
        assert_eq!(report.shape, KurtosisShape::Platykurtic);
    }

    #[test]
    fn near_normal_sample_has_kurtosis_near_three() {
        use statrs::distribution::{ContinuousCDF, Normal};
        let dist = Normal::new(0.0, 1.0).expect("valid parameters");
        let values: Vec<f64> = (1..=2000)
            .map(|i| dist.inverse_cdf(i as f64 / 2001.0))
            .collect();
        let report = kurtosis(&values, Ddof::Population).expect("non-empty");
        assert!((report.value - 3.0).abs() < 0.5);
    }

    #[test]
    fn invalid_ddof_is_rejected() {
        let err = Ddof::try_from(2u8).expect_err("must fail");
        assert!(matches!(err, StatsError::InvalidDdof { value: 2 }));
    }

    #[test]
    fn empty_series_is_rejected() {
        let err = skewness(&[], Ddof::Population).expect_err("must fail");
        assert!(matches!(err, StatsError::EmptySeries));
    }

    #[test]
    fn column_wise_reports_preserve_order() {
        let table: ReturnsTable = vec![
            (String::from("b"), vec![1.0, 2.0, 3.0]),
            (String::from("a"), vec![1.0, 1.0, 10.0]),
        ]
        .into_iter()
        .collect();
        let reports = skewness_by_column(&table, Ddof::Population).expect("non-empty");
        let names: Vec<&str> = reports.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["b", "a"]);
    }
}
