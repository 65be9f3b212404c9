//! Behavior-driven tests for the statistics functions.
//!
//! These tests verify the statistical contracts end to end: partitioning,
//! moment conventions, the normality verdict and the stationarity verdict,
//! plus the cross-checks that tie them together.

use tickhist_stats::{
    adf_test, jarque_bera, jarque_bera_by_column, kurtosis, partitioned_summary_stats, skewness,
    skewness_by_column, AdfConfig, Ddof, Normality, ReturnsTable, Stationarity, StatsError,
    DEFAULT_CRITICAL_LEVEL,
};

/// Deterministic pseudo-noise in [-0.5, 0.5).
fn noise(n: usize) -> Vec<f64> {
    let mut state: u64 = 0x9E37_79B9_7F4A_7C15;
    (0..n)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            (state >> 11) as f64 / (1u64 << 53) as f64 - 0.5
        })
        .collect()
}

// =============================================================================
// Partitioned summary statistics
// =============================================================================

#[test]
fn partitions_are_round_robin_and_stats_use_population_std() {
    // Given: six values split across three partitions
    let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];

    // When: partitioned stats are computed
    let table = partitioned_summary_stats(&values, 3).expect("valid count");

    // Then: partition i holds elements i, i+3, ... and std has no
    // degrees-of-freedom correction
    let means: Vec<f64> = table.partitions().iter().map(|p| p.mean).collect();
    assert_eq!(means, vec![2.5, 3.5, 4.5]);
    for partition in table.partitions() {
        assert!((partition.std_dev - 1.5).abs() < 1e-12);
    }
}

#[test]
fn surplus_partitions_surface_as_nan_rows() {
    let table = partitioned_summary_stats(&[1.0, 2.0], 4).expect("valid count");

    assert_eq!(table.len(), 4);
    assert!(table.partitions()[0].mean.is_finite());
    assert!(table.partitions()[3].mean.is_nan());
}

// =============================================================================
// Moments
// =============================================================================

#[test]
fn skewness_sign_matches_the_tail_direction() {
    let right_tailed = [1.0, 1.0, 1.0, 1.0, 10.0];
    let left_tailed = [-10.0, 1.0, 1.0, 1.0, 1.0];

    let right = skewness(&right_tailed, Ddof::Population).expect("non-empty");
    let left = skewness(&left_tailed, Ddof::Population).expect("non-empty");

    assert!(right.value > 0.0);
    assert!(left.value < 0.0);
}

#[test]
fn kurtosis_value_is_independent_of_the_ddof_flag() {
    // The kurtosis denominator always uses the population std; the flag only
    // toggles the Bessel notice.
    let values = noise(100);

    let population = kurtosis(&values, Ddof::Population).expect("non-empty");
    let sample = kurtosis(&values, Ddof::Sample).expect("non-empty");

    assert_eq!(population.value, sample.value);
    assert!(sample.bessel_requested && !population.bessel_requested);
}

#[test]
fn out_of_range_ddof_is_rejected_before_any_computation() {
    let err = Ddof::try_from(3i64).expect_err("must fail");
    assert!(matches!(err, StatsError::InvalidDdof { value: 3 }));
}

// =============================================================================
// Normality
// =============================================================================

#[test]
fn jarque_bera_recombines_the_moment_reports() {
    // JB must equal n/6 * (S^2 + (K-3)^2 / 4) computed from the population
    // skewness and kurtosis of the same series.
    let values = noise(150);

    let skew = skewness(&values, Ddof::Population).expect("non-empty");
    let kurt = kurtosis(&values, Ddof::Population).expect("non-empty");
    let report = jarque_bera(&values, DEFAULT_CRITICAL_LEVEL).expect("non-empty");

    let n = values.len() as f64;
    let expected =
        n / 6.0 * (skew.value * skew.value + (kurt.value - 3.0) * (kurt.value - 3.0) / 4.0);
    assert!((report.statistic - expected).abs() < 1e-9);
}

#[test]
fn heavy_tails_fail_the_normality_test() {
    let mut values = vec![0.0; 200];
    values.extend([80.0, 90.0, 100.0]);

    let report = jarque_bera(&values, DEFAULT_CRITICAL_LEVEL).expect("non-empty");

    assert_eq!(report.decision, Normality::NotNormal);
    assert!(report.p_value < DEFAULT_CRITICAL_LEVEL);
}

// =============================================================================
// Stationarity
// =============================================================================

#[test]
fn noise_is_stationary_and_its_cumulation_is_not() {
    let increments = noise(250);
    let mut walk = Vec::with_capacity(increments.len());
    let mut level = 0.0;
    for increment in &increments {
        // Drifted walk: the level trends away from its mean.
        level += 0.3 + increment;
        walk.push(level);
    }

    let flat = adf_test(&increments, &AdfConfig::default()).expect("long enough");
    let drifting = adf_test(&walk, &AdfConfig::default()).expect("long enough");

    assert_eq!(flat.decision, Stationarity::Stationary);
    assert_eq!(drifting.decision, Stationarity::NotStationary);
    assert!(flat.statistic < drifting.statistic);
}

#[test]
fn stationarity_report_carries_the_regression_metadata() {
    let series = noise(120);
    let config = AdfConfig {
        lags: Some(1),
        ..AdfConfig::default()
    };

    let report = adf_test(&series, &config).expect("long enough");

    assert_eq!(report.lags, 1);
    assert_eq!(report.observations, 119 - 1);
    assert_eq!(report.critical_values.len(), 3);
}

// =============================================================================
// Column-wise application
// =============================================================================

#[test]
fn column_wise_tests_keep_insertion_order_across_functions() {
    let table: ReturnsTable = vec![
        (String::from("btc"), noise(80)),
        (String::from("spx"), noise(80).iter().map(|v| v * 2.0).collect()),
    ]
    .into_iter()
    .collect();

    let skews = skewness_by_column(&table, Ddof::Population).expect("non-empty columns");
    let normals = jarque_bera_by_column(&table, DEFAULT_CRITICAL_LEVEL).expect("non-empty columns");

    let skew_names: Vec<&str> = skews.keys().map(String::as_str).collect();
    let normal_names: Vec<&str> = normals.keys().map(String::as_str).collect();
    assert_eq!(skew_names, vec!["btc", "spx"]);
    assert_eq!(normal_names, skew_names);
}
