//! Actual/365 Fixed day count.
//!
//! All rate math in effrate counts true calendar days (leap days included)
//! and divides by a fixed 365-day year, leap years included.

use crate::types::Date;

/// Days in the year basis used for annualization.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Actual/365 Fixed day count convention.
///
/// # Formula
///
/// $$\text{Year Fraction} = \frac{\text{Actual Days}}{365}$$
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Act365Fixed;

impl Act365Fixed {
    /// Returns the name of the convention.
    pub fn name(&self) -> &'static str {
        "ACT/365F"
    }

    /// Actual calendar days from `start` to `end` (negative if `end` is earlier).
    pub fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }

    /// Year fraction from `start` to `end`.
    pub fn year_fraction(&self, start: Date, end: Date) -> f64 {
        self.day_count(start, end) as f64 / DAYS_PER_YEAR
    }
}
