// National-average comparison and percentile bucketing.
use crate::calculator::budget::{NationalAverages, PercentileData};
use crate::types::NationalComparison;

/// Compare a user's total tax against the year's national averages.
/// Returns None when the budget table ships no averages.
pub fn compare(
    user_total: i64,
    year: u16,
    averages: Option<&NationalAverages>,
) -> Option<NationalComparison> {
    let averages = averages?;
    let national_average = averages.average_income_tax + averages.average_fica;
    let difference = user_total - national_average;

    let percent_difference = if national_average > 0 {
        ((difference as f64 / national_average as f64) * 100.0).round() as i64
    } else {
        0
    };

    Some(NationalComparison {
        user_total,
        national_average,
        difference,
        percent_difference,
        percentile: averages
            .percentile_data
            .as_ref()
            .map(|p| estimate_percentile(user_total, p)),
        number_of_filers: averages.number_of_filers,
        year,
    })
}

/// Smallest bucket whose threshold is >= the total; above p99 is 99.
pub fn estimate_percentile(total: i64, p: &PercentileData) -> u8 {
    if total <= p.p25 {
        25
    } else if total <= p.p50 {
        50
    } else if total <= p.p75 {
        75
    } else if total <= p.p90 {
        90
    } else if total <= p.p95 {
        95
    } else {
        99
    }
}
