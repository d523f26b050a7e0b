//! Country shortlist application crate.
//!
//! Selection manager, outbound adapters (REST directory, geolocation,
//! storage, connectivity) and the terminal front-end.

pub mod application;
pub mod config;
pub mod infrastructure;
pub mod ports;
pub mod runner;
pub mod state;
pub mod ui;

pub use application::{SelectionHandle, SelectionManager, SelectionSettings, SelectionSnapshot};
pub use config::AppConfig;
pub use state::Platform;
