//! Style and Popup Resolvers
//!
//! Pure per-feature functions for the active view: a fill/stroke style
//! and the popup text. Nothing here touches the surface or the cache.

use html_escape::encode_text;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Palette, Rgb};
use crate::classify::{classify, BreakpointSet, ClassIndex};
use crate::config::{FieldDescriptor, IndexField, IndicatorField};
use crate::data::Feature;
use crate::utils::{format_value, PLACEHOLDER};

pub const INDICATOR_STROKE: Rgb = Rgb::new(0x44, 0x44, 0x44);
pub const INDEX_STROKE: Rgb = Rgb::new(0x22, 0x22, 0x22);
pub const STROKE_WEIGHT: f64 = 0.6;
pub const FILL_OPACITY: f64 = 0.75;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    pub color: Rgb,
    pub weight: f64,
    pub fill_opacity: f64,
    pub fill_color: Rgb,
}

/// Attributes that identify a coastal segment in popups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopupFields {
    pub segment: String,
    pub county: String,
}

impl Default for PopupFields {
    fn default() -> Self {
        Self {
            segment: "SegmentID".to_string(),
            county: "County".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopupLine {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Popup {
    pub heading: String,
    pub lines: Vec<PopupLine>,
}

impl Popup {
    fn line(&mut self, label: impl Into<String>, value: impl Into<String>) {
        self.lines.push(PopupLine { label: label.into(), value: value.into() });
    }

    pub fn to_html(&self) -> String {
        let mut html = format!("<strong>{}</strong>", encode_text(&self.heading));
        for line in &self.lines {
            html.push_str(&format!("<br>{}: {}", encode_text(&line.label), encode_text(&line.value)));
        }
        html
    }
}

impl fmt::Display for Popup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.heading)?;
        for line in &self.lines {
            write!(f, "\n  {}: {}", line.label, line.value)?;
        }
        Ok(())
    }
}

/// How the active view assigns classes
#[derive(Debug, Clone, PartialEq)]
enum Scheme {
    Rank { rank: String },
    /// `None` until the attribute has usable values; every feature then
    /// takes the middle class.
    EqualInterval { breaks: Option<BreakpointSet> },
}

/// Style and popup functions bound to one view
#[derive(Debug, Clone)]
pub struct FeatureStyler {
    descriptor: FieldDescriptor,
    scheme: Scheme,
    stroke: Rgb,
    palette: Palette,
    popup_fields: PopupFields,
}

impl FeatureStyler {
    pub fn indicator(field: &IndicatorField, palette: Palette, popup_fields: PopupFields) -> Self {
        Self {
            descriptor: FieldDescriptor::Indicator(field.clone()),
            scheme: Scheme::Rank { rank: field.rank.clone() },
            stroke: INDICATOR_STROKE,
            palette,
            popup_fields,
        }
    }

    pub fn index(field: &IndexField, breaks: Option<BreakpointSet>, palette: Palette, popup_fields: PopupFields) -> Self {
        Self {
            descriptor: FieldDescriptor::Index(field.clone()),
            scheme: Scheme::EqualInterval { breaks },
            stroke: INDEX_STROKE,
            palette,
            popup_fields,
        }
    }

    pub fn class_of(&self, feature: &Feature) -> ClassIndex {
        match &self.scheme {
            Scheme::Rank { rank } => ClassIndex::from_rank(feature.number(rank)),
            Scheme::EqualInterval { breaks: Some(breaks) } => {
                classify(feature.number(self.descriptor.value_field()), breaks)
            }
            Scheme::EqualInterval { breaks: None } => ClassIndex::MIDDLE,
        }
    }

    pub fn style(&self, feature: &Feature) -> Style {
        Style {
            color: self.stroke,
            weight: STROKE_WEIGHT,
            fill_opacity: FILL_OPACITY,
            fill_color: self.palette.color(self.class_of(feature)),
        }
    }

    pub fn popup(&self, feature: &Feature) -> Popup {
        let text = |name: &str| feature.text(name).unwrap_or_else(|| PLACEHOLDER.to_string());

        let mut popup = Popup {
            heading: format!("Segment {}", text(&self.popup_fields.segment)),
            lines: Vec::new(),
        };
        popup.line("County", text(&self.popup_fields.county));
        popup.line(
            self.descriptor.title(),
            format_value(feature.property(self.descriptor.value_field())),
        );
        if let Some(rank) = self.descriptor.rank_field() {
            popup.line("Rank", format_value(feature.property(rank)));
        }
        popup
    }
}
