//! Style Module
//!
//! Color ramp, per-feature style/popup resolution, and legends.

mod legend;
mod palette;
mod resolver;

pub use legend::{rank_label, Legend, LegendEntry, HIGHEST_NOTE, PENDING_NOTE, RANK_LABELS};
pub use palette::{Palette, Rgb};
pub use resolver::{
    FeatureStyler, Popup, PopupFields, PopupLine, Style, FILL_OPACITY, INDEX_STROKE, INDICATOR_STROKE,
    STROKE_WEIGHT,
};
