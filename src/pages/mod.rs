//! Page loaders.
//!
//! DESIGN
//! ======
//! Each page turns its providers plus the current identity into a
//! serializable view. Pages own their failure handling: a provider error or
//! missing API data produces the page's empty view, never an error to the
//! caller. Role-gated affordances are computed here from `authz`.

pub mod contacts;
pub mod gallery;
pub mod home;
pub mod networks;
pub mod pastors;
pub mod reports;

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use time::Date;

use crate::api::DashboardApi;
use crate::data::{ContactDirectory, GalleryRepository, NetworkRepository, ReportRepository, SampleData, StaticContacts};
use crate::identity::Identity;
use crate::navigation::Page;

pub use contacts::ContactsView;
pub use gallery::GalleryView;
pub use home::{HomeView, QuickAction};
pub use networks::NetworksView;
pub use pastors::PastorsView;
pub use reports::ReportsView;

/// Data sources backing the pages.
#[derive(Clone)]
pub struct Providers {
    pub api: Arc<dyn DashboardApi>,
    pub reports: Arc<dyn ReportRepository>,
    pub networks: Arc<dyn NetworkRepository>,
    pub gallery: Arc<dyn GalleryRepository>,
    pub contacts: Arc<dyn ContactDirectory>,
}

impl Providers {
    /// Remote API for home/pastors, bundled sample data for everything else.
    #[must_use]
    pub fn with_sample_data(api: Arc<dyn DashboardApi>, sample_delay: Duration) -> Self {
        let sample = Arc::new(SampleData::new(sample_delay));
        Self {
            api,
            reports: sample.clone(),
            networks: sample.clone(),
            gallery: sample,
            contacts: Arc::new(StaticContacts),
        }
    }
}

/// Inputs every page load receives.
#[derive(Debug, Clone, Copy)]
pub struct PageRequest<'a> {
    pub identity: &'a Identity,
    /// Free-text filter; used by the reports and gallery pages.
    pub search: &'a str,
    pub today: Date,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum PageView {
    Home(HomeView),
    Pastors(PastorsView),
    Networks(NetworksView),
    Reports(ReportsView),
    Gallery(GalleryView),
    Contacts(ContactsView),
}

/// Load the view for `page`.
pub async fn load_page(page: Page, request: PageRequest<'_>, providers: &Providers) -> PageView {
    match page {
        Page::Home => PageView::Home(home::load(request.identity, providers.api.as_ref()).await),
        Page::Pastors => PageView::Pastors(pastors::load(providers.api.as_ref()).await),
        Page::Networks => PageView::Networks(networks::load(request.identity, providers.networks.as_ref()).await),
        Page::Reports => {
            PageView::Reports(reports::load(request.identity, providers.reports.as_ref(), request.search).await)
        }
        Page::Gallery => PageView::Gallery(gallery::load(request, providers.gallery.as_ref()).await),
        Page::Contacts => PageView::Contacts(contacts::load(providers.contacts.as_ref()).await),
    }
}
