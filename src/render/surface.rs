//! Display Surface
//!
//! The host the controller draws onto: thematic layers keyed by dataset,
//! a viewport, and a legend. Basemap tiles are the host's business.

use serde::Serialize;
use std::collections::BTreeMap;

use super::ViewState;
use crate::classify::ClassIndex;
use crate::data::{Bounds, DatasetGroup};
use crate::style::{Legend, Popup, Style};

/// One feature as drawn: its position in the dataset plus style and popup
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyledFeature {
    pub index: usize,
    pub class: ClassIndex,
    pub style: Style,
    pub popup: Popup,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedLayer {
    pub group: DatasetGroup,
    pub view: ViewState,
    pub features: Vec<StyledFeature>,
    /// Invalid when no feature has usable geometry
    pub bounds: Bounds,
}

impl RenderedLayer {
    /// Features per class, lowest first
    pub fn class_counts(&self) -> [usize; ClassIndex::COUNT] {
        let mut counts = [0; ClassIndex::COUNT];
        for f in &self.features {
            counts[f.class.slot()] += 1;
        }
        counts
    }
}

pub trait DisplaySurface {
    fn add_layer(&mut self, layer: RenderedLayer);

    fn remove_layer(&mut self, group: DatasetGroup);

    fn has_layer(&self, group: DatasetGroup) -> bool;

    fn fit_bounds(&mut self, bounds: Bounds);

    /// Replace whatever legend is shown
    fn set_legend(&mut self, legend: Legend);
}

/// Keeps the displayed state in memory. Backs the console, the HTTP
/// surface and the tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    layers: BTreeMap<DatasetGroup, RenderedLayer>,
    viewport: Option<Bounds>,
    legend: Option<Legend>,
    fits: usize,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layers(&self) -> impl Iterator<Item = &RenderedLayer> {
        self.layers.values()
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn layer(&self, group: DatasetGroup) -> Option<&RenderedLayer> {
        self.layers.get(&group)
    }

    pub fn viewport(&self) -> Option<Bounds> {
        self.viewport
    }

    pub fn legend(&self) -> Option<&Legend> {
        self.legend.as_ref()
    }

    /// How many times the viewport was moved
    pub fn fit_count(&self) -> usize {
        self.fits
    }
}

impl DisplaySurface for MemorySurface {
    fn add_layer(&mut self, layer: RenderedLayer) {
        self.layers.insert(layer.group, layer);
    }

    fn remove_layer(&mut self, group: DatasetGroup) {
        self.layers.remove(&group);
    }

    fn has_layer(&self, group: DatasetGroup) -> bool {
        self.layers.contains_key(&group)
    }

    fn fit_bounds(&mut self, bounds: Bounds) {
        self.viewport = Some(bounds);
        self.fits += 1;
    }

    fn set_legend(&mut self, legend: Legend) {
        self.legend = Some(legend);
    }
}
