//! Navigation controller: selected page, header menu and screen resolution.

#[cfg(test)]
#[path = "navigation_test.rs"]
mod tests;

use std::fmt;

use serde::Serialize;

use crate::session::{SessionSnapshot, SessionStatus};

/// The fixed set of application pages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    #[default]
    Home,
    Pastors,
    Networks,
    Reports,
    Gallery,
    Contacts,
}

impl Page {
    /// Menu order.
    pub const ALL: [Page; 6] = [Page::Home, Page::Pastors, Page::Networks, Page::Reports, Page::Gallery, Page::Contacts];

    /// Map a page identifier to a page. Anything unrecognized is `Home`.
    #[must_use]
    pub fn from_id(id: &str) -> Self {
        match id {
            "pastors" => Self::Pastors,
            "networks" => Self::Networks,
            "reports" => Self::Reports,
            "gallery" => Self::Gallery,
            "contacts" => Self::Contacts,
            _ => Self::Home,
        }
    }

    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Pastors => "pastors",
            Self::Networks => "networks",
            Self::Reports => "reports",
            Self::Gallery => "gallery",
            Self::Contacts => "contacts",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Home => "Início",
            Self::Pastors => "Pastores",
            Self::Networks => "Redes",
            Self::Reports => "Relatórios",
            Self::Gallery => "Galeria",
            Self::Contacts => "Contatos",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Header menu entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub id: &'static str,
    pub label: &'static str,
    pub active: bool,
}

/// Holds the selected page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Navigator {
    current: Page,
}

impl Navigator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn current(&self) -> Page {
        self.current
    }

    /// Select a page by identifier; returns the page actually selected.
    pub fn navigate(&mut self, id: &str) -> Page {
        self.navigate_to(Page::from_id(id))
    }

    pub fn navigate_to(&mut self, page: Page) -> Page {
        self.current = page;
        page
    }

    pub fn reset(&mut self) {
        self.current = Page::Home;
    }

    #[must_use]
    pub fn menu(&self) -> Vec<MenuItem> {
        Page::ALL
            .into_iter()
            .map(|page| MenuItem { id: page.id(), label: page.label(), active: page == self.current })
            .collect()
    }
}

/// What the front end should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "screen", content = "page", rename_all = "snake_case")]
pub enum Screen {
    /// Session restore still running.
    Loading,
    Login,
    Shell(Page),
}

/// Decide between loading, login and the application shell. The selected page
/// only matters once authenticated.
#[must_use]
pub fn resolve_screen(session: &SessionSnapshot, page: Page) -> Screen {
    match session.status {
        SessionStatus::Restoring => Screen::Loading,
        SessionStatus::Unauthenticated => Screen::Login,
        SessionStatus::Authenticated => Screen::Shell(page),
    }
}
