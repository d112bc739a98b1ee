//! Map Controller
//!
//! Owns the view state, the breakpoint cache and the rendered layer set,
//! and is the only thing that writes to them. Each entry point runs a
//! full synchronous render; hosts with real parallelism must serialize
//! calls (the HTTP server holds the controller behind one mutex).

use std::collections::BTreeSet;
use tracing::{debug, info, warn};

use super::{DisplaySurface, RenderedLayer, StyledFeature, ViewState};
use crate::classify::BreakpointCache;
use crate::config::{AtlasConfig, FieldDescriptor, FieldIssue, FieldTable, MapOptions};
use crate::data::{extract_values, Bounds, DatasetGroup, Datasets, IndicatorGroup};
use crate::error::AtlasResult;
use crate::style::{FeatureStyler, Legend, Palette, PopupFields};

pub struct MapController<S: DisplaySurface> {
    fields: FieldTable,
    datasets: Datasets,
    palette: Palette,
    popup_fields: PopupFields,
    options: MapOptions,
    cache: BreakpointCache,
    view: ViewState,
    rendered: BTreeSet<DatasetGroup>,
    surface: S,
    renders: usize,
}

impl<S: DisplaySurface> MapController<S> {
    pub fn new(fields: FieldTable, datasets: Datasets, surface: S) -> Self {
        Self {
            fields,
            datasets,
            palette: Palette::default(),
            popup_fields: PopupFields::default(),
            options: MapOptions::default(),
            cache: BreakpointCache::new(),
            view: ViewState::default(),
            rendered: BTreeSet::new(),
            surface,
            renders: 0,
        }
    }

    pub fn from_config(config: &AtlasConfig, datasets: Datasets, surface: S) -> Self {
        Self::new(config.fields.clone(), datasets, surface)
            .with_palette(config.palette)
            .with_popup_fields(config.popup.clone())
            .with_map_options(config.map.clone())
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_popup_fields(mut self, popup_fields: PopupFields) -> Self {
        self.popup_fields = popup_fields;
        self
    }

    pub fn with_map_options(mut self, options: MapOptions) -> Self {
        self.options = options;
        self
    }

    /// Check the field table against the loaded attribute sets
    pub fn validate_fields(&self) -> Vec<FieldIssue> {
        self.fields.validate(&self.datasets)
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn fields(&self) -> &FieldTable {
        &self.fields
    }

    pub fn cache(&self) -> &BreakpointCache {
        &self.cache
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Groups with a layer currently on the surface
    pub fn rendered_groups(&self) -> impl Iterator<Item = DatasetGroup> + '_ {
        self.rendered.iter().copied()
    }

    /// Completed renders since construction
    pub fn render_count(&self) -> usize {
        self.renders
    }

    pub fn show_indicator(&mut self, group: IndicatorGroup, key: &str) -> AtlasResult<()> {
        self.select(ViewState::indicator(group, key))
    }

    pub fn show_index(&mut self, key: &str) -> AtlasResult<()> {
        self.select(ViewState::index(key))
    }

    /// Replace the view and render it. An unknown selection is rejected
    /// before anything changes.
    pub fn select(&mut self, view: ViewState) -> AtlasResult<()> {
        let descriptor = match view.resolve(&self.fields) {
            Ok(d) => d,
            Err(e) => {
                warn!("Ignoring view selection: {}", e);
                return Err(e);
            }
        };
        self.view = view;
        self.draw(descriptor);
        Ok(())
    }

    /// Re-render the current view
    pub fn refresh(&mut self) -> AtlasResult<()> {
        let descriptor = self.view.resolve(&self.fields)?;
        self.draw(descriptor);
        Ok(())
    }

    /// Legend for the current view, if it resolves
    pub fn legend(&self) -> Option<Legend> {
        let descriptor = self.view.resolve(&self.fields).ok()?;
        Some(self.build_legend(&descriptor))
    }

    /// Fit the viewport to the features of the current dataset whose
    /// county matches `name`. Returns false (and leaves the viewport
    /// alone) when nothing matches.
    pub fn zoom_to_county(&mut self, name: &str) -> bool {
        let dataset = self.view.dataset();
        let county = &self.popup_fields.county;
        let mut bounds = Bounds::empty();
        for feature in self.datasets.get(dataset) {
            if feature.text(county).as_deref() == Some(name) {
                bounds.merge(&feature.bounds());
            }
        }

        if !bounds.is_valid() {
            debug!("No {} features for county {}", dataset, name);
            return false;
        }
        self.surface.fit_bounds(bounds.pad(self.options.county_padding));
        true
    }

    #[tracing::instrument(skip(self, descriptor), fields(view = %self.view))]
    fn draw(&mut self, descriptor: FieldDescriptor) {
        for group in std::mem::take(&mut self.rendered) {
            if self.surface.has_layer(group) {
                self.surface.remove_layer(group);
            }
        }

        let group = self.view.dataset();
        let styler = self.styler(&descriptor);
        let layer = self.build_layer(group, &styler);
        let bounds = layer.bounds;
        debug!("Built {} layer with {} features", group, layer.features.len());

        self.surface.add_layer(layer);
        self.rendered.insert(group);

        if bounds.is_valid() {
            self.surface.fit_bounds(bounds.pad(self.options.fit_padding));
        } else {
            debug!("Layer bounds invalid; keeping viewport");
        }

        let legend = self.build_legend(&descriptor);
        self.surface.set_legend(legend);
        self.renders += 1;
        info!("Rendered {}", self.view);
    }

    /// Index views compute and cache their breaks here on first use
    fn styler(&mut self, descriptor: &FieldDescriptor) -> FeatureStyler {
        match descriptor {
            FieldDescriptor::Indicator(field) => {
                FeatureStyler::indicator(field, self.palette, self.popup_fields.clone())
            }
            FieldDescriptor::Index(field) => {
                let indices = &self.datasets.indices;
                let breaks = self.cache.get_or_compute(&field.value, || extract_values(indices, &field.value));
                FeatureStyler::index(field, breaks, self.palette, self.popup_fields.clone())
            }
        }
    }

    fn build_layer(&self, group: DatasetGroup, styler: &FeatureStyler) -> RenderedLayer {
        let collection = self.datasets.get(group);
        let features = collection
            .iter()
            .enumerate()
            .map(|(index, feature)| StyledFeature {
                index,
                class: styler.class_of(feature),
                style: styler.style(feature),
                popup: styler.popup(feature),
            })
            .collect();

        RenderedLayer {
            group,
            view: self.view.clone(),
            features,
            bounds: collection.bounds(),
        }
    }

    fn build_legend(&self, descriptor: &FieldDescriptor) -> Legend {
        match descriptor {
            FieldDescriptor::Indicator(field) => Legend::for_indicator(field, &self.palette),
            FieldDescriptor::Index(field) => Legend::for_index(field, self.cache.get(&field.value), &self.palette),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Feature, FeatureCollection, Geometry};
    use crate::render::MemorySurface;
    use serde_json::json;

    fn segment(lon: f64, props: serde_json::Value) -> Feature {
        Feature::with_properties(props).with_geometry(Geometry {
            kind: "LineString".to_string(),
            coordinates: json!([[lon, -4.0], [lon + 0.1, -3.9]]),
            geometries: Vec::new(),
        })
    }

    fn controller() -> MapController<MemorySurface> {
        let physical = FeatureCollection::new(vec![
            segment(39.0, json!({"County": "Kwale", "grid_cod_1": 3.2, "RANK_SLR": 4})),
            segment(39.5, json!({"County": "Kilifi", "grid_cod_1": 1.0, "RANK_SLR": 1})),
        ]);
        let indices = FeatureCollection::new(
            (1..=10)
                .map(|i| segment(39.0 + i as f64 * 0.1, json!({"County": "Lamu", "CVI": i, "PVI_nrm": null})))
                .collect(),
        );
        let datasets = Datasets::new(physical, FeatureCollection::default(), indices);
        MapController::new(FieldTable::default(), datasets, MemorySurface::new())
    }

    #[test]
    fn test_unknown_selection_changes_nothing() {
        let mut c = controller();
        c.show_index("CVI").unwrap();
        let before = c.surface().layer(DatasetGroup::Indices).cloned();

        assert!(c.show_indicator(IndicatorGroup::Physical, "NOPE").is_err());
        assert!(c.show_index("NOPE").is_err());
        assert_eq!(c.view(), &ViewState::index("CVI"));
        assert_eq!(c.render_count(), 1);
        assert_eq!(c.surface().layer(DatasetGroup::Indices).cloned(), before);
        assert_eq!(c.cache().computations(), 1);
    }

    #[test]
    fn test_index_without_values_defers_legend() {
        let mut c = controller();
        c.show_index("PVI").unwrap();
        let legend = c.surface().legend().unwrap();
        assert!(legend.is_pending());
        let layer = c.surface().layer(DatasetGroup::Indices).unwrap();
        assert_eq!(layer.class_counts(), [0, 0, 10, 0, 0]);
        assert!(!c.cache().contains("PVI_nrm"));
    }

    #[test]
    fn test_empty_dataset_skips_fit() {
        let mut c = controller();
        c.show_indicator(IndicatorGroup::Socio, "POP").unwrap();
        assert_eq!(c.surface().fit_count(), 0);
        assert!(c.surface().viewport().is_none());
        assert!(c.surface().has_layer(DatasetGroup::Socio));
    }

    #[test]
    fn test_zoom_to_county() {
        let mut c = controller();
        c.show_indicator(IndicatorGroup::Physical, "SLR").unwrap();
        assert!(c.zoom_to_county("Kilifi"));
        let vp = c.surface().viewport().unwrap();
        assert!((vp.west - (39.5 - 0.02)).abs() < 1e-9);
        assert!(!c.zoom_to_county("Mombasa"));
        assert_eq!(c.view(), &ViewState::indicator(IndicatorGroup::Physical, "SLR"));
    }

    #[test]
    fn test_legend_follows_current_view() {
        let mut c = controller();
        c.show_index("CVI").unwrap();
        assert_eq!(c.legend().as_ref(), c.surface().legend());
        assert_eq!(c.legend().unwrap().entries[0].label, "1.00 – 2.80");

        c.show_indicator(IndicatorGroup::Physical, "SLR").unwrap();
        let legend = c.legend().unwrap();
        assert_eq!(Some(&legend), c.surface().legend());
        assert!(legend.entries[0].label.starts_with("Rank 1"));
    }

    #[test]
    fn test_refresh_redraws_current_view() {
        let mut c = controller();
        c.show_index("CVI").unwrap();
        c.refresh().unwrap();
        assert_eq!(c.render_count(), 2);
        assert_eq!(c.cache().computations(), 1);
        assert_eq!(c.rendered_groups().collect::<Vec<_>>(), vec![DatasetGroup::Indices]);
    }
}
