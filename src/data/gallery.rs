//! Photo gallery records. Upload and storage of new photos is not implemented.

#[cfg(test)]
#[path = "gallery_test.rs"]
mod tests;

use std::collections::BTreeSet;

use async_trait::async_trait;
use serde::Serialize;
use time::macros::{date, datetime};
use time::{Date, PrimitiveDateTime};

use super::{DataError, SampleData, contains_folded};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Photo {
    pub id: u32,
    /// Stored name.
    pub filename: String,
    /// Name as uploaded.
    pub original_filename: String,
    pub description: String,
    pub uploader_name: String,
    #[serde(with = "super::iso_date")]
    pub event_date: Date,
    /// Set when the photo belongs to a cell meeting.
    pub cell_name: Option<String>,
    #[serde(with = "super::iso_datetime")]
    pub created_at: PrimitiveDateTime,
    pub url: String,
}

impl Photo {
    /// Matches description, original filename, cell or uploader, case-insensitively.
    #[must_use]
    pub fn matches(&self, term: &str) -> bool {
        contains_folded(&self.description, term)
            || contains_folded(&self.original_filename, term)
            || self.cell_name.as_deref().is_some_and(|c| contains_folded(c, term))
            || contains_folded(&self.uploader_name, term)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GalleryStats {
    pub total_photos: usize,
    /// Photos whose event falls in the month (and year) of `today`.
    pub this_month: usize,
    /// Distinct cell names among photos tagged with a cell.
    pub cells_with_photos: usize,
}

impl GalleryStats {
    #[must_use]
    pub fn compute(photos: &[Photo], today: Date) -> Self {
        Self {
            total_photos: photos.len(),
            this_month: photos
                .iter()
                .filter(|p| p.event_date.year() == today.year() && p.event_date.month() == today.month())
                .count(),
            cells_with_photos: photos
                .iter()
                .filter_map(|p| p.cell_name.as_deref())
                .collect::<BTreeSet<_>>()
                .len(),
        }
    }
}

#[async_trait]
pub trait GalleryRepository: Send + Sync {
    async fn list_photos(&self) -> Result<Vec<Photo>, DataError>;
}

#[async_trait]
impl GalleryRepository for SampleData {
    async fn list_photos(&self) -> Result<Vec<Photo>, DataError> {
        self.simulate_load().await;
        Ok(sample_photos())
    }
}

fn unsplash(id: &str) -> String {
    format!("https://images.unsplash.com/photo-{id}?w=400&h=300&fit=crop")
}

fn sample_photos() -> Vec<Photo> {
    vec![
        Photo {
            id: 1,
            filename: "celula_esperanca_agosto.jpg".into(),
            original_filename: "Reunião Célula Esperança - Agosto 2024.jpg".into(),
            description: "Reunião especial da Célula Esperança com estudo sobre fé".into(),
            uploader_name: "Pedro Líder".into(),
            event_date: date!(2024-08-15),
            cell_name: Some("Célula Esperança".into()),
            created_at: datetime!(2024-08-15 21:00:00),
            url: unsplash("1511632765486-a01980e01a18"),
        },
        Photo {
            id: 2,
            filename: "retiro_jovens_2024.jpg".into(),
            original_filename: "Retiro de Jovens Radicais Livres 2024.jpg".into(),
            description: "Momento de louvor no retiro de jovens dos Radicais Livres".into(),
            uploader_name: "Ana Líder".into(),
            event_date: date!(2024-07-20),
            cell_name: None,
            created_at: datetime!(2024-07-21 10:00:00),
            url: unsplash("1540039155733-5bb30b53aa14"),
        },
        Photo {
            id: 3,
            filename: "batismo_agosto.jpg".into(),
            original_filename: "Batismo Igreja Videira - Agosto 2024.jpg".into(),
            description: "Batismo de novos convertidos da igreja".into(),
            uploader_name: "Carlos Líder".into(),
            event_date: date!(2024-08-10),
            cell_name: None,
            created_at: datetime!(2024-08-10 16:30:00),
            url: unsplash("1438032005730-c779502df39b"),
        },
        Photo {
            id: 4,
            filename: "celula_vitoria_julho.jpg".into(),
            original_filename: "Célula Vitória - Estudo Bíblico Julho.jpg".into(),
            description: "Estudo bíblico na casa da Ana sobre o amor de Deus".into(),
            uploader_name: "Ana Líder".into(),
            event_date: date!(2024-07-25),
            cell_name: Some("Célula Vitória".into()),
            created_at: datetime!(2024-07-25 20:15:00),
            url: unsplash("1507003211169-0a1dd7228f2d"),
        },
        Photo {
            id: 5,
            filename: "evento_evangelistico.jpg".into(),
            original_filename: "Evento Evangelístico na Praça.jpg".into(),
            description: "Evangelismo na praça central de Francisco Morato".into(),
            uploader_name: "Pastor Administrador".into(),
            event_date: date!(2024-08-05),
            cell_name: None,
            created_at: datetime!(2024-08-05 18:00:00),
            url: unsplash("1529156069898-49953e39b3ac"),
        },
        Photo {
            id: 6,
            filename: "celula_fe_oracao.jpg".into(),
            original_filename: "Célula Fé - Momento de Oração.jpg".into(),
            description: "Momento especial de oração pelos enfermos".into(),
            uploader_name: "Carlos Líder".into(),
            event_date: date!(2024-08-13),
            cell_name: Some("Célula Fé".into()),
            created_at: datetime!(2024-08-13 21:30:00),
            url: unsplash("1507692049790-de58290a4334"),
        },
    ]
}
