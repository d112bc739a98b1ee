//! Render Module
//!
//! View selection, the display surface contract, and the controller
//! that keeps layer, legend and popups consistent with the active view.

mod controller;
mod surface;
mod view;

pub use controller::MapController;
pub use surface::{DisplaySurface, MemorySurface, RenderedLayer, StyledFeature};
pub use view::ViewState;
