//! Weighted overall score calculation

use crate::Category;
use std::collections::BTreeMap;

/// Round to one decimal place, matching the report format
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Combine category scores into one weighted overall score.
///
/// The denominator sums the weights of the categories actually present, so
/// the function stays well-defined if a category is ever omitted. With all
/// six categories the denominator is exactly 1.0.
pub fn overall_score(scores: &BTreeMap<Category, u8>) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }

    let mut weighted = 0.0;
    let mut total_weight = 0.0;
    for (category, score) in scores {
        weighted += f64::from(*score) * category.weight();
        total_weight += category.weight();
    }

    if total_weight > 0.0 {
        round1(weighted / total_weight)
    } else {
        0.0
    }
}
