//! View switching against the controller's public API.

use serde_json::json;

use coastal_atlas::config::FieldTable;
use coastal_atlas::data::{DatasetGroup, Datasets, Feature, FeatureCollection, Geometry, IndicatorGroup};
use coastal_atlas::render::{MapController, MemorySurface, ViewState};
use coastal_atlas::style::Palette;
use coastal_atlas::ClassIndex;

fn line(lon: f64, lat: f64) -> Geometry {
    Geometry {
        kind: "LineString".to_string(),
        coordinates: json!([[lon, lat], [lon + 0.05, lat + 0.05]]),
        geometries: Vec::new(),
    }
}

fn datasets() -> Datasets {
    let physical = FeatureCollection::new(vec![
        Feature::with_properties(json!({
            "SegmentID": 1, "County": "Kwale", "grid_cod_1": 0.001, "RANK_SLR": 4
        }))
        .with_geometry(line(39.2, -4.6)),
        Feature::with_properties(json!({
            "SegmentID": 2, "County": "Mombasa", "grid_cod_1": 9.5, "RANK_SLR": 2
        }))
        .with_geometry(line(39.6, -4.0)),
    ]);
    let socio = FeatureCollection::new(vec![Feature::with_properties(json!({
        "SegmentID": 1, "County": "Kwale", "gridcode": 120, "RANK_POP": 5
    }))
    .with_geometry(line(39.2, -4.6))]);
    let indices = FeatureCollection::new(
        (1..=10)
            .map(|i| {
                let county = if i <= 5 { "Kilifi" } else { "Lamu" };
                Feature::with_properties(json!({
                    "SegmentID": i, "County": county,
                    "CVI": i, "PVI_nrm": i as f64 / 10.0, "SVI_nrm": "n/a"
                }))
                .with_geometry(line(39.5 + i as f64 * 0.1, -3.5 + i as f64 * 0.1))
            })
            .collect(),
    );
    Datasets::new(physical, socio, indices)
}

fn controller() -> MapController<MemorySurface> {
    MapController::new(FieldTable::default(), datasets(), MemorySurface::new())
}

#[test]
fn test_show_index_twice_is_idempotent() {
    let mut c = controller();
    c.show_index("CVI").unwrap();
    let breaks = *c.cache().get("CVI").unwrap();
    let layer = c.surface().layer(DatasetGroup::Indices).cloned().unwrap();
    let legend = c.surface().legend().cloned().unwrap();
    let viewport = c.surface().viewport();

    c.show_index("CVI").unwrap();
    assert_eq!(c.cache().computations(), 1);
    assert_eq!(c.cache().get("CVI"), Some(&breaks));
    assert_eq!(c.surface().layer(DatasetGroup::Indices), Some(&layer));
    assert_eq!(c.surface().legend(), Some(&legend));
    assert_eq!(c.surface().viewport(), viewport);
    assert_eq!(c.surface().layer_count(), 1);
}

#[test]
fn test_switch_clears_previous_layer() {
    let mut c = controller();
    c.show_indicator(IndicatorGroup::Physical, "SLR").unwrap();
    assert!(c.surface().layer(DatasetGroup::Physical).is_some());

    c.show_index("CVI").unwrap();
    assert_eq!(c.surface().layer_count(), 1);
    assert!(c.surface().layer(DatasetGroup::Physical).is_none());
    assert!(c.surface().layer(DatasetGroup::Indices).is_some());
    assert_eq!(c.rendered_groups().collect::<Vec<_>>(), vec![DatasetGroup::Indices]);
}

#[test]
fn test_every_switch_leaves_one_layer() {
    let mut c = controller();
    let views = [
        ViewState::indicator(IndicatorGroup::Socio, "POP"),
        ViewState::index("PVI"),
        ViewState::indicator(IndicatorGroup::Physical, "SLR"),
        ViewState::indicator(IndicatorGroup::Socio, "LULC"),
        ViewState::index("SoVI"),
    ];
    for view in views {
        let group = view.dataset();
        c.select(view).unwrap();
        assert_eq!(c.surface().layer_count(), 1);
        assert!(c.surface().layer(group).is_some());
    }
}

#[test]
fn test_rank_four_uses_fourth_color() {
    let mut c = controller();
    c.show_indicator(IndicatorGroup::Physical, "SLR").unwrap();
    let layer = c.surface().layer(DatasetGroup::Physical).unwrap();
    let fourth = Palette::BLUES.color(ClassIndex::new(4).unwrap());
    assert_eq!(layer.features[0].style.fill_color, fourth);
    assert_eq!(layer.features[0].class.get(), 4);
    assert_eq!(layer.features[1].class.get(), 2);
}

#[test]
fn test_index_legend_and_classes() {
    let mut c = controller();
    c.show_index("CVI").unwrap();
    let legend = c.surface().legend().unwrap();
    assert_eq!(legend.title, "Coastal Vulnerability Index");
    assert_eq!(legend.entries[4].label, "8.20 – 10.00 (highest vulnerability)");

    let layer = c.surface().layer(DatasetGroup::Indices).unwrap();
    assert_eq!(layer.class_counts(), [2, 2, 2, 2, 2]);
}

#[test]
fn test_text_only_index_defers() {
    let mut c = controller();
    c.show_index("SoVI").unwrap();
    assert!(c.surface().legend().unwrap().is_pending());
    let layer = c.surface().layer(DatasetGroup::Indices).unwrap();
    assert!(layer.features.iter().all(|f| f.class == ClassIndex::MIDDLE));
    assert_eq!(layer.features[0].popup.lines[1].value, "—");
}

#[test]
fn test_unknown_selection_keeps_state() {
    let mut c = controller();
    c.show_indicator(IndicatorGroup::Socio, "POP").unwrap();
    assert!(c.show_indicator(IndicatorGroup::Physical, "POP").is_err());
    assert!(c.show_index("cvi").is_err());
    assert_eq!(c.view(), &ViewState::indicator(IndicatorGroup::Socio, "POP"));
    assert!(c.surface().layer(DatasetGroup::Socio).is_some());
    assert!(c.cache().is_empty());
}

#[test]
fn test_viewport_fits_padded_layer() {
    let mut c = controller();
    c.show_indicator(IndicatorGroup::Socio, "POP").unwrap();
    let vp = c.surface().viewport().unwrap();
    // 0.05 extent per axis, 5% padding
    assert!((vp.west - (39.2 - 0.0025)).abs() < 1e-9);
    assert!((vp.north - (-4.55 + 0.0025)).abs() < 1e-9);
}

#[test]
fn test_county_zoom_uses_current_dataset() {
    let mut c = controller();
    c.show_index("CVI").unwrap();
    assert!(c.zoom_to_county("Lamu"));
    assert!(!c.zoom_to_county("Kwale"));

    c.show_indicator(IndicatorGroup::Physical, "SLR").unwrap();
    assert!(c.zoom_to_county("Kwale"));
}
