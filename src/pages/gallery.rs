use serde::Serialize;
use tracing::warn;

use super::PageRequest;
use crate::authz::{Capability, can};
use crate::data::{GalleryRepository, GalleryStats, Photo, format_date};

#[derive(Debug, Clone, Serialize)]
pub struct PhotoCard {
    #[serde(flatten)]
    pub photo: Photo,
    pub event_date_display: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GalleryView {
    /// Upload is offered to every signed-in role; the action itself is not wired.
    pub can_upload: bool,
    pub search: String,
    /// Computed over the whole gallery, not the filtered list.
    pub stats: GalleryStats,
    pub photos: Vec<PhotoCard>,
}

pub async fn load(request: PageRequest<'_>, repo: &dyn GalleryRepository) -> GalleryView {
    let photos = repo.list_photos().await.unwrap_or_else(|e| {
        warn!(error = %e, "photo list unavailable");
        Vec::new()
    });

    GalleryView {
        can_upload: can(Some(request.identity), Capability::UploadPhoto),
        search: request.search.to_owned(),
        stats: GalleryStats::compute(&photos, request.today),
        photos: photos
            .into_iter()
            .filter(|p| p.matches(request.search))
            .map(|photo| PhotoCard { event_date_display: format_date(photo.event_date), photo })
            .collect(),
    }
}
