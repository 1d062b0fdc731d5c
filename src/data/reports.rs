//! Cell attendance reports.

#[cfg(test)]
#[path = "reports_test.rs"]
mod tests;

use async_trait::async_trait;
use serde::Serialize;
use time::macros::{date, datetime};
use time::{Date, PrimitiveDateTime};

use super::{DataError, SampleData, contains_folded};

/// Attendance record for one cell meeting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttendanceReport {
    pub id: u32,
    pub cell_name: String,
    pub network_name: String,
    pub leader_name: String,
    #[serde(with = "super::iso_date")]
    pub meeting_date: Date,
    pub members_present: u32,
    /// Regular attendees who are not yet members.
    pub fas_present: u32,
    pub visitors_present: u32,
    pub total_present: u32,
    pub observations: String,
    pub testimony: String,
    #[serde(with = "super::iso_datetime")]
    pub created_at: PrimitiveDateTime,
}

impl AttendanceReport {
    /// Matches cell, network or leader name, case-insensitively.
    #[must_use]
    pub fn matches(&self, term: &str) -> bool {
        contains_folded(&self.cell_name, term)
            || contains_folded(&self.network_name, term)
            || contains_folded(&self.leader_name, term)
    }
}

#[async_trait]
pub trait ReportRepository: Send + Sync {
    async fn list_reports(&self) -> Result<Vec<AttendanceReport>, DataError>;
}

#[async_trait]
impl ReportRepository for SampleData {
    async fn list_reports(&self) -> Result<Vec<AttendanceReport>, DataError> {
        self.simulate_load().await;
        Ok(sample_reports())
    }
}

fn sample_reports() -> Vec<AttendanceReport> {
    vec![
        AttendanceReport {
            id: 1,
            cell_name: "Célula Esperança".into(),
            network_name: "Reset".into(),
            leader_name: "Pedro Líder".into(),
            meeting_date: date!(2024-08-15),
            members_present: 8,
            fas_present: 3,
            visitors_present: 2,
            total_present: 13,
            observations: "Reunião muito abençoada com palavra sobre fé.".into(),
            testimony: "João testificou sobre cura de sua mãe.".into(),
            created_at: datetime!(2024-08-15 20:30:00),
        },
        AttendanceReport {
            id: 2,
            cell_name: "Célula Vitória".into(),
            network_name: "Revayah".into(),
            leader_name: "Ana Líder".into(),
            meeting_date: date!(2024-08-14),
            members_present: 6,
            fas_present: 2,
            visitors_present: 1,
            total_present: 9,
            observations: "Estudo sobre o amor de Deus.".into(),
            testimony: "Maria compartilhou sobre nova oportunidade de emprego.".into(),
            created_at: datetime!(2024-08-14 21:00:00),
        },
        AttendanceReport {
            id: 3,
            cell_name: "Célula Fé".into(),
            network_name: "Tetelestai".into(),
            leader_name: "Carlos Líder".into(),
            meeting_date: date!(2024-08-13),
            members_present: 5,
            fas_present: 1,
            visitors_present: 0,
            total_present: 6,
            observations: "Oração pelos enfermos da célula.".into(),
            testimony: "Paulo testemunhou sobre restauração familiar.".into(),
            created_at: datetime!(2024-08-13 19:45:00),
        },
    ]
}
