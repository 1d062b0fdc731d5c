use serde::Serialize;
use tracing::warn;

use crate::authz::{Capability, can};
use crate::data::{AttendanceReport, ReportRepository, format_date, format_datetime};
use crate::identity::Identity;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReportActions {
    pub view: bool,
    pub edit: bool,
    pub delete: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportCard {
    #[serde(flatten)]
    pub report: AttendanceReport,
    pub meeting_date_display: String,
    pub created_at_display: String,
    pub actions: ReportActions,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ReportsView {
    pub can_create: bool,
    pub search: String,
    pub reports: Vec<ReportCard>,
}

/// Reports whose cell, network or leader name contains `search`.
pub async fn load(identity: &Identity, repo: &dyn ReportRepository, search: &str) -> ReportsView {
    let reports = repo.list_reports().await.unwrap_or_else(|e| {
        warn!(error = %e, "report list unavailable");
        Vec::new()
    });

    let who = Some(identity);
    let actions = ReportActions {
        view: can(who, Capability::ViewReport),
        edit: can(who, Capability::EditReport),
        delete: can(who, Capability::DeleteReport),
    };

    ReportsView {
        can_create: can(who, Capability::CreateReport),
        search: search.to_owned(),
        reports: reports
            .into_iter()
            .filter(|r| r.matches(search))
            .map(|report| ReportCard {
                meeting_date_display: format_date(report.meeting_date),
                created_at_display: format_datetime(report.created_at),
                report,
                actions,
            })
            .collect(),
    }
}
