//! Legend Builder
//!
//! Ranked views list the five fixed rank labels. Index views list the
//! five breakpoint ranges, or a placeholder while breaks are unavailable.

use html_escape::encode_text;
use serde::Serialize;
use std::fmt;

use super::{Palette, Rgb};
use crate::classify::{BreakpointSet, ClassIndex};
use crate::config::{IndexField, IndicatorField};
use crate::utils::format_number;

pub const RANK_LABELS: [&str; ClassIndex::COUNT] = ["Very Low", "Low", "Moderate", "High", "Very High"];
pub const HIGHEST_NOTE: &str = "(highest vulnerability)";
pub const PENDING_NOTE: &str = "Equal-interval classes will appear once data loads.";

pub fn rank_label(class: ClassIndex) -> &'static str {
    RANK_LABELS[class.slot()]
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub color: Rgb,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub title: String,
    pub entries: Vec<LegendEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

impl Legend {
    pub fn for_indicator(field: &IndicatorField, palette: &Palette) -> Self {
        let entries = ClassIndex::all()
            .map(|class| LegendEntry {
                color: palette.color(class),
                label: format!("Rank {} – {}", class, rank_label(class)),
            })
            .collect();
        Self { title: field.title.clone(), entries, placeholder: None }
    }

    pub fn for_index(field: &IndexField, breaks: Option<&BreakpointSet>, palette: &Palette) -> Self {
        let Some(breaks) = breaks else {
            return Self {
                title: field.title.clone(),
                entries: Vec::new(),
                placeholder: Some(PENDING_NOTE.to_string()),
            };
        };

        let entries = ClassIndex::all()
            .map(|class| {
                let (lo, hi) = breaks.range(class);
                let mut label = format!("{} – {}", format_number(lo), format_number(hi));
                if class == ClassIndex::HIGHEST {
                    label.push(' ');
                    label.push_str(HIGHEST_NOTE);
                }
                LegendEntry { color: palette.color(class), label }
            })
            .collect();
        Self { title: field.title.clone(), entries, placeholder: None }
    }

    pub fn is_pending(&self) -> bool {
        self.placeholder.is_some()
    }

    /// Markup for the map's legend control
    pub fn to_html(&self) -> String {
        let mut html = format!("<div><b>{}</b></div>", encode_text(&self.title));
        for entry in &self.entries {
            html.push_str(&format!(
                "<div><i style=\"background:{}\"></i>{}</div>",
                entry.color,
                encode_text(&entry.label)
            ));
        }
        if let Some(note) = &self.placeholder {
            html.push_str(&format!("<div>{}</div>", encode_text(note)));
        }
        html
    }
}

impl fmt::Display for Legend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)?;
        for entry in &self.entries {
            write!(f, "\n  {}  {}", entry.color, entry.label)?;
        }
        if let Some(note) = &self.placeholder {
            write!(f, "\n  {}", note)?;
        }
        Ok(())
    }
}
