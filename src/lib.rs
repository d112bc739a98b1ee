//! Coastal Atlas
//!
//! Choropleth engine for a coastal vulnerability story map:
//! - Ranked indicator views (physical and socio-economic)
//! - Composite index views (CVI, PVI, SoVI) with equal-interval classes
//! - Legends and popups kept in step with the selected view
//! - Console and HTTP front ends over one serialized controller

pub mod classify;
pub mod config;
pub mod data;
pub mod error;
pub mod render;
pub mod server;
pub mod style;
pub mod utils;

// Re-exports for convenience
pub use classify::{compute_equal_breaks, classify, BreakpointCache, BreakpointSet, ClassIndex};
pub use config::AtlasConfig;
pub use error::{AtlasError, AtlasResult};
pub use render::{DisplaySurface, MapController, MemorySurface, ViewState};
