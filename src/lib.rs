//! Radicais Livres youth ministry dashboard.
//!
//! The crate is the client side of the dashboard: a mocked credential store
//! and session manager with persisted restore, role-derived affordance
//! gates, page navigation, and per-page data loaders over a small REST API
//! plus bundled sample datasets.
//!
//! `app::App` ties these together for a front end; the `radicais-livres`
//! binary is a terminal one.

pub mod api;
pub mod app;
pub mod authz;
pub mod config;
pub mod credentials;
pub mod data;
pub mod identity;
pub mod navigation;
pub mod pages;
pub mod session;
pub mod storage;
