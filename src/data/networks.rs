//! Discipleship networks.

#[cfg(test)]
#[path = "networks_test.rs"]
mod tests;

use std::collections::HashSet;

use async_trait::async_trait;
use serde::Serialize;
use time::PrimitiveDateTime;
use time::macros::datetime;

use super::{DataError, SampleData};

/// A named grouping of cells under a discipler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Network {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub supervisor_name: String,
    pub cells_count: u32,
    pub is_active: bool,
    #[serde(with = "super::iso_datetime")]
    pub created_at: PrimitiveDateTime,
}

/// Summary cards shown above the network grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NetworkStats {
    pub total_networks: usize,
    pub total_cells: u32,
    /// Distinct supervisor names.
    pub supervisors: usize,
}

impl NetworkStats {
    #[must_use]
    pub fn compute(networks: &[Network]) -> Self {
        let supervisors: HashSet<&str> = networks.iter().map(|n| n.supervisor_name.as_str()).collect();
        Self {
            total_networks: networks.len(),
            total_cells: networks.iter().map(|n| n.cells_count).sum(),
            supervisors: supervisors.len(),
        }
    }
}

#[async_trait]
pub trait NetworkRepository: Send + Sync {
    async fn list_networks(&self) -> Result<Vec<Network>, DataError>;
}

#[async_trait]
impl NetworkRepository for SampleData {
    async fn list_networks(&self) -> Result<Vec<Network>, DataError> {
        self.simulate_load().await;
        Ok(sample_networks())
    }
}

fn network(id: u32, name: &str, motto: &str, supervisor: &str, cells: u32, created_at: PrimitiveDateTime) -> Network {
    Network {
        id,
        name: name.into(),
        description: format!("Rede {name} - {motto}"),
        supervisor_name: supervisor.into(),
        cells_count: cells,
        is_active: true,
        created_at,
    }
}

fn sample_networks() -> Vec<Network> {
    const JOAO: &str = "João Discipulador";
    const MARIA: &str = "Maria Discipuladora";
    vec![
        network(1, "Reset", "Renovação e recomeço", JOAO, 3, datetime!(2024-01-15 10:00:00)),
        network(2, "Revayah", "Satisfação em Deus", JOAO, 2, datetime!(2024-01-20 10:00:00)),
        network(3, "Tetelestai", "Está consumado", MARIA, 1, datetime!(2024-02-01 10:00:00)),
        network(4, "Kadosh", "Santo", MARIA, 0, datetime!(2024-02-10 10:00:00)),
        network(5, "Ekbalo", "Enviar", JOAO, 0, datetime!(2024-02-15 10:00:00)),
        network(6, "Nazireus", "Separado para Deus", MARIA, 0, datetime!(2024-02-20 10:00:00)),
        network(7, "Nexteens", "Próxima geração", JOAO, 0, datetime!(2024-03-01 10:00:00)),
    ]
}
