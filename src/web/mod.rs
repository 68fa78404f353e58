//! Web module - dashboard page, JSON API, and server setup

pub mod app;
mod chart_viewer;
pub mod config;
mod control_panel;
pub mod handlers;
mod page;
pub mod router;
pub mod state;

pub use app::DashboardView;
pub use config::ServeConfig;
pub use router::{build_router, serve};
pub use state::{AppState, SharedState};
