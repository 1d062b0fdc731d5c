use serde::Serialize;
use tracing::warn;

use crate::authz::{Capability, can};
use crate::data::{Network, NetworkRepository, NetworkStats, format_date};
use crate::identity::Identity;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NetworkActions {
    pub view: bool,
    pub edit: bool,
    pub delete: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct NetworkCard {
    #[serde(flatten)]
    pub network: Network,
    pub created_on: String,
    pub actions: NetworkActions,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NetworksView {
    pub can_create: bool,
    pub stats: NetworkStats,
    pub networks: Vec<NetworkCard>,
}

pub async fn load(identity: &Identity, repo: &dyn NetworkRepository) -> NetworksView {
    let networks = repo.list_networks().await.unwrap_or_else(|e| {
        warn!(error = %e, "network list unavailable");
        Vec::new()
    });

    let who = Some(identity);
    let actions = NetworkActions {
        view: can(who, Capability::ViewNetwork),
        edit: can(who, Capability::EditNetwork),
        delete: can(who, Capability::DeleteNetwork),
    };

    NetworksView {
        can_create: can(who, Capability::CreateNetwork),
        stats: NetworkStats::compute(&networks),
        networks: networks
            .into_iter()
            .map(|network| NetworkCard { created_on: format_date(network.created_at.date()), network, actions })
            .collect(),
    }
}
