//! Build date for manual page footers.

use chrono::{DateTime, Local, NaiveDate};

/// Environment variable pinning the build time for reproducible output.
pub const SOURCE_DATE_EPOCH: &str = "SOURCE_DATE_EPOCH";

/// Date stamped into generated manual pages.
///
/// Honors `SOURCE_DATE_EPOCH` (seconds since the Unix epoch, UTC) when it is
/// set to a valid value, otherwise uses today's local date.
pub fn build_date() -> NaiveDate {
    std::env::var(SOURCE_DATE_EPOCH)
        .ok()
        .and_then(|epoch| date_from_epoch(&epoch))
        .unwrap_or_else(|| Local::now().date_naive())
}

/// Parse a `SOURCE_DATE_EPOCH` value.
fn date_from_epoch(epoch: &str) -> Option<NaiveDate> {
    let seconds: i64 = epoch.trim().parse().ok()?;
    DateTime::from_timestamp(seconds, 0).map(|dt| dt.date_naive())
}

/// Format as `YYYY-MM-DD`.
#[inline]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
