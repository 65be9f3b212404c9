//! Partitioned summary statistics.

use serde::Serialize;
use statrs::statistics::Statistics;

use crate::error::StatsError;

/// Mean and population standard deviation of one partition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PartitionStats {
    pub mean: f64,
    pub std_dev: f64,
}

/// One row per partition, in partition index order 0..n-1.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStatsTable {
    partitions: Vec<PartitionStats>,
}

impl SummaryStatsTable {
    pub fn partitions(&self) -> &[PartitionStats] {
        &self.partitions
    }

    pub fn len(&self) -> usize {
        self.partitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.partitions.is_empty()
    }
}

/// Split `values` into `n` round-robin partitions (element `i` goes to
/// partition `i mod n`) and compute each partition's arithmetic mean and
/// population standard deviation (no degrees-of-freedom correction).
///
/// When `n` exceeds the sequence length, the surplus partitions are empty
/// and their mean and standard deviation are NaN; NaN propagates to the
/// caller rather than being masked.
pub fn partitioned_summary_stats(
    values: &[f64],
    n: usize,
) -> Result<SummaryStatsTable, StatsError> {
    if n == 0 {
        return Err(StatsError::InvalidPartitionCount);
    }

    let mut partitions = Vec::with_capacity(n);
    for index in 0..n {
        let part: Vec<f64> = values.iter().copied().skip(index).step_by(n).collect();
        if part.is_empty() {
            partitions.push(PartitionStats {
                mean: f64::NAN,
                std_dev: f64::NAN,
            });
        } else {
            partitions.push(PartitionStats {
                mean: (&part).mean(),
                std_dev: (&part).population_std_dev(),
            });
        }
    }

    Ok(SummaryStatsTable { partitions })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_robin_means_match_hand_computed_case() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let table = partitioned_summary_stats(&values, 3).expect("valid count");
        let means: Vec<f64> = table.partitions().iter().map(|p| p.mean).collect();
        assert_eq!(means, vec![2.5, 3.5, 4.5]);
    }

    #[test]
    fn uses_population_standard_deviation() {
        // Partition [1, 4]: mean 2.5, population std 1.5 (sample std would be ~2.12).
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let table = partitioned_summary_stats(&values, 3).expect("valid count");
        assert!((table.partitions()[0].std_dev - 1.5).abs() < 1e-12);
    }

    #[test]
    fn single_partition_covers_whole_sequence() {
        let values = [2.0, 4.0, 6.0];
        let table = partitioned_summary_stats(&values, 1).expect("valid count");
        assert_eq!(table.len(), 1);
        assert!((table.partitions()[0].mean - 4.0).abs() < 1e-12);
    }

    #[test]
    fn surplus_partitions_are_nan() {
        let values = [1.0, 2.0];
        let table = partitioned_summary_stats(&values, 4).expect("valid count");
        assert_eq!(table.len(), 4);
        assert!(table.partitions()[2].mean.is_nan());
        assert!(table.partitions()[3].std_dev.is_nan());
    }

    #[test]
    fn zero_partitions_is_an_error() {
        let err = partitioned_summary_stats(&[1.0], 0).expect_err("must fail");
        assert!(matches!(err, StatsError::InvalidPartitionCount));
    }
}
