//! Slice API Service Library
//!
//! HTTP surface over a single NetCDF dataset: metadata, 2-D slices as
//! coordinate-tagged JSON, and slices rendered as grayscale PNG.

pub mod config;
pub mod handlers;
pub mod metrics;
pub mod router;
pub mod state;

pub use config::ServerConfig;
pub use router::build_router;
pub use state::AppState;
