use ratatui::style::Style;
use serde::{Deserialize, Serialize};

use crate::extent::Extent;
use crate::holder::Align;

/// Construction-time holder configuration. Immutable once the wrapper is
/// built; everything here is presentation, not behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoldConfig {
    /// Holder fill color, CSS hex notation.
    pub color: String,
    /// Explicit holder width. Unset means "measure the target".
    pub width: Option<Extent>,
    /// Explicit holder height. Unset means "measure the target".
    pub height: Option<Extent>,
    /// Horizontal placement of the holder within the wrapper's box.
    pub align: Align,
    /// Text shown inside the holder.
    pub children: Option<String>,
    /// Extra styling for the holder's filler box.
    pub filler_style: Option<Style>,
}

impl Default for HoldConfig {
    fn default() -> Self {
        Self {
            color: "#eee".to_owned(),
            width: None,
            height: None,
            align: Align::default(),
            children: None,
            filler_style: None,
        }
    }
}

impl HoldConfig {
    pub fn with_color(self, color: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            ..self
        }
    }

    pub fn with_width(self, width: impl Into<Extent>) -> Self {
        Self {
            width: Some(width.into()),
            ..self
        }
    }

    pub fn with_height(self, height: impl Into<Extent>) -> Self {
        Self {
            height: Some(height.into()),
            ..self
        }
    }

    pub fn with_align(self, align: Align) -> Self {
        Self { align, ..self }
    }

    pub fn with_children(self, children: impl Into<String>) -> Self {
        Self {
            children: Some(children.into()),
            ..self
        }
    }

    pub fn with_filler_style(self, filler_style: Style) -> Self {
        Self {
            filler_style: Some(filler_style),
            ..self
        }
    }
}
