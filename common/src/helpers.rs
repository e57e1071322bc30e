use chrono::{Days, NaiveDate};

use crate::STORAGE_DAYS;

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Formats a byte count with binary units, e.g. `2.00 GB`.
/// Anything at or above 1024 TB stays in TB.
pub fn format_file_size(bytes: u64) -> String {
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{:.2} {}", size, UNITS[unit])
}

pub fn expiry_date(today: NaiveDate) -> NaiveDate {
    today
        .checked_add_days(Days::new(STORAGE_DAYS))
        .unwrap_or(NaiveDate::MAX)
}

/// The "available until" label shown next to a share link, e.g.
/// `Friday, January 30, 2026`. Purely cosmetic: the remote service decides
/// when the file actually goes away.
pub fn expiry_label(today: NaiveDate) -> String {
    expiry_date(today).format("%A, %B %-d, %Y").to_string()
}
