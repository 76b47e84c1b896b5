//! Admission severity classification from blood pH.

use crate::models::DkaSeverity;

/// pH below this is severe acidosis.
pub const SEVERE_PH_CEILING: f64 = 7.0;

/// pH below this (and at or above [`SEVERE_PH_CEILING`]) is mild-to-moderate.
pub const MILD_MODERATE_PH_CEILING: f64 = 7.24;

/// Classify DKA severity from pH.
///
/// Closed-open intervals, so every finite pH lands in exactly one class:
/// `(-inf, 7.0)` severe, `[7.0, 7.24)` mild-to-moderate, `[7.24, inf)` mild.
pub fn classify_severity(ph: f64) -> DkaSeverity {
    if ph < SEVERE_PH_CEILING {
        DkaSeverity::Severe
    } else if ph < MILD_MODERATE_PH_CEILING {
        DkaSeverity::MildModerate
    } else {
        DkaSeverity::Mild
    }
}
