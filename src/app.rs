//! Application shell state: one session, one navigator, one set of providers.
//!
//! Front ends drive an `App` and render whatever `screen()` says. Signing out
//! always returns the shell to the home page.

#[cfg(test)]
#[path = "app_test.rs"]
mod tests;

use serde::Serialize;
use time::{Date, OffsetDateTime};

use crate::identity::{Identity, Role};
use crate::navigation::{MenuItem, Navigator, Page, Screen, resolve_screen};
use crate::pages::{PageRequest, PageView, Providers, QuickAction, load_page};
use crate::session::{LoginError, SessionManager};

/// Header bar contents for a signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Header {
    pub display_name: String,
    pub role: Role,
    pub menu: Vec<MenuItem>,
}

pub struct App {
    session: SessionManager,
    navigator: Navigator,
    providers: Providers,
}

impl App {
    #[must_use]
    pub fn new(session: SessionManager, providers: Providers) -> Self {
        Self { session, navigator: Navigator::new(), providers }
    }

    #[must_use]
    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    #[must_use]
    pub fn current_page(&self) -> Page {
        self.navigator.current()
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        resolve_screen(&self.session.snapshot(), self.navigator.current())
    }

    /// `None` unless someone is signed in.
    #[must_use]
    pub fn header(&self) -> Option<Header> {
        self.session.current_identity().map(|identity| Header {
            display_name: identity.full_name,
            role: identity.role,
            menu: self.navigator.menu(),
        })
    }

    pub fn navigate(&mut self, id: &str) -> Page {
        self.navigator.navigate(id)
    }

    pub fn follow(&mut self, action: QuickAction) -> Page {
        self.navigator.navigate_to(action.target)
    }

    /// # Errors
    ///
    /// Propagates the session's `LoginError`.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<Identity, LoginError> {
        self.session.login(username, password).await
    }

    pub fn logout(&mut self) {
        self.session.logout();
        self.navigator.reset();
    }

    /// Load the selected page for the signed-in user, or `None` when signed out.
    pub async fn render(&self, search: &str) -> Option<PageView> {
        self.render_on(search, OffsetDateTime::now_utc().date()).await
    }

    pub async fn render_on(&self, search: &str, today: Date) -> Option<PageView> {
        let identity = self.session.current_identity()?;
        let request = PageRequest { identity: &identity, search, today };
        Some(load_page(self.navigator.current(), request, &self.providers).await)
    }
}
