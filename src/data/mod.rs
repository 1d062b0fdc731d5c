//! Page data providers and the bundled sample datasets.
//!
//! DESIGN
//! ======
//! Every page reads its records through a trait (`ReportRepository`,
//! `NetworkRepository`, `GalleryRepository`, `ContactDirectory`) so a real
//! API client can replace the sample data without touching the pages.
//! `SampleData` serves the fixed datasets after a simulated load delay.

pub mod contacts;
pub mod gallery;
pub mod networks;
pub mod reports;

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

use std::time::Duration;

use time::macros::format_description;
use time::{Date, PrimitiveDateTime};

pub use contacts::{ContactBook, ContactDirectory, StaticContacts};
pub use gallery::{GalleryRepository, GalleryStats, Photo};
pub use networks::{Network, NetworkRepository, NetworkStats};
pub use reports::{AttendanceReport, ReportRepository};

#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("data source unavailable: {0}")]
    Unavailable(String),
}

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");
time::serde::format_description!(iso_datetime, PrimitiveDateTime, "[year]-[month]-[day]T[hour]:[minute]:[second]");

/// `dd/mm/yyyy`.
#[must_use]
pub fn format_date(date: Date) -> String {
    date.format(format_description!("[day]/[month]/[year]"))
        .unwrap_or_else(|_| date.to_string())
}

/// `dd/mm/yyyy HH:MM`.
#[must_use]
pub fn format_datetime(at: PrimitiveDateTime) -> String {
    at.format(format_description!("[day]/[month]/[year] [hour]:[minute]"))
        .unwrap_or_else(|_| at.to_string())
}

/// Case-insensitive substring match; an empty term matches everything.
pub(crate) fn contains_folded(haystack: &str, term: &str) -> bool {
    term.is_empty() || haystack.to_lowercase().contains(&term.to_lowercase())
}

/// Fixed datasets served after a simulated network delay.
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleData {
    delay: Duration,
}

impl SampleData {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    async fn simulate_load(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}
