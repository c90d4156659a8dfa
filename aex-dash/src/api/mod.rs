//! HTTP API handlers for aex-dash

pub mod buildinfo;
pub mod health;
pub mod screenings;

pub use buildinfo::get_build_info;
pub use health::health_routes;
pub use screenings::{get_latest_screenings, get_screenings};
