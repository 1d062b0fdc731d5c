//! Home page: greeting, church vision, dashboard summary and quick actions.

use serde::Serialize;
use serde_json::Value;

use crate::api::DashboardApi;
use crate::identity::{Identity, Role};
use crate::navigation::Page;

pub const CHURCH_VISION: &str =
    "Ser uma igreja que transforma vidas através do amor de Cristo, formando discípulos que fazem discípulos.";

/// Recent reports shown on the home page.
pub const RECENT_REPORTS_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub total_cells: u64,
    pub total_members: u64,
    pub total_networks: u64,
    pub recent_reports: u64,
}

impl DashboardSummary {
    /// Missing or non-numeric fields count as zero.
    #[must_use]
    pub fn from_payload(payload: Option<&Value>) -> Self {
        let count = |key: &str| payload.and_then(|p| p.get(key)).and_then(Value::as_u64).unwrap_or(0);
        Self {
            total_cells: count("total_cells"),
            total_members: count("total_members"),
            total_networks: count("total_networks"),
            recent_reports: recent_reports(payload).len() as u64,
        }
    }
}

fn recent_reports(payload: Option<&Value>) -> &[Value] {
    payload
        .and_then(|p| p.get("recent_reports"))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// A shortcut that switches the selected page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuickAction {
    pub label: &'static str,
    pub target: Page,
}

pub const QUICK_ACTIONS: [QuickAction; 3] = [
    QuickAction { label: "Novo Relatório", target: Page::Reports },
    QuickAction { label: "Ver Redes", target: Page::Networks },
    QuickAction { label: "Galeria", target: Page::Gallery },
];

#[derive(Debug, Clone, Serialize)]
pub struct HomeView {
    pub greeting: String,
    pub role: Role,
    pub role_description: &'static str,
    pub vision: &'static str,
    pub summary: DashboardSummary,
    /// Opaque report objects from the API, newest first as served.
    pub recent_reports: Vec<Value>,
    pub quick_actions: Vec<QuickAction>,
}

pub async fn load(identity: &Identity, api: &dyn DashboardApi) -> HomeView {
    let payload = api.dashboard().await;
    let summary = DashboardSummary::from_payload(payload.as_ref());
    let recent = recent_reports(payload.as_ref())
        .iter()
        .take(RECENT_REPORTS_LIMIT)
        .cloned()
        .collect();

    HomeView {
        greeting: format!("Bem-vindo, {}!", identity.full_name),
        role: identity.role,
        role_description: identity.role.description(),
        vision: CHURCH_VISION,
        summary,
        recent_reports: recent,
        quick_actions: QUICK_ACTIONS.to_vec(),
    }
}
