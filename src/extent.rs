use std::fmt;

use serde::{Deserialize, Serialize};
use taffy::Dimension;

/// A configured dimension for the holder: either a bare number of cells
/// (one terminal cell is this engine's pixel) or a verbatim CSS-like
/// string such as `"50%"` or `"2em"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Extent {
    Px(f32),
    Raw(String),
}

impl Extent {
    /// The line-height used to center holder content vertically.
    ///
    /// Numbers get a pixel unit, non-blank strings pass through verbatim,
    /// blank strings yield no constraint.
    pub fn line_height(&self) -> Option<String> {
        match self {
            Self::Px(value) => Some(format!("{value}px")),
            Self::Raw(value) if !value.trim().is_empty() => Some(value.clone()),
            Self::Raw(_) => None,
        }
    }

    /// The declared value for layout purposes.
    ///
    /// Units the layout engine cannot express resolve to `auto`.
    pub fn to_dimension(&self) -> Dimension {
        match self {
            Self::Px(value) => Dimension::length(*value),
            Self::Raw(value) => match parse_percent(value) {
                Some(fraction) => Dimension::percent(fraction),
                None => Dimension::auto(),
            },
        }
    }

    /// Resolves to a whole number of cells against the given basis,
    /// if the extent is expressible in cells at all.
    pub fn resolve_cells(&self, basis: u16) -> Option<u16> {
        match self {
            Self::Px(value) => Some(value.round().max(0.0) as u16),
            Self::Raw(value) => {
                parse_percent(value).map(|fraction| (basis as f32 * fraction).round() as u16)
            }
        }
    }
}

fn parse_percent(value: &str) -> Option<f32> {
    let number = value.trim().strip_suffix('%')?;
    number.trim().parse::<f32>().ok().map(|p| p / 100.0)
}

impl fmt::Display for Extent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px(value) => write!(f, "{value}px"),
            Self::Raw(value) => f.write_str(value),
        }
    }
}

impl From<f32> for Extent {
    fn from(value: f32) -> Self {
        Self::Px(value)
    }
}

impl From<u16> for Extent {
    fn from(value: u16) -> Self {
        Self::Px(value.into())
    }
}

impl From<&str> for Extent {
    fn from(value: &str) -> Self {
        Self::Raw(value.to_owned())
    }
}

impl From<String> for Extent {
    fn from(value: String) -> Self {
        Self::Raw(value)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn numeric_line_height_gets_pixel_unit() {
        assert_eq!(Extent::Px(40.0).line_height().as_deref(), Some("40px"));
    }

    #[test]
    fn string_line_height_passes_through() {
        assert_eq!(Extent::from("2em").line_height().as_deref(), Some("2em"));
    }

    #[test]
    fn blank_string_yields_no_line_height() {
        assert_eq!(Extent::from("   ").line_height(), None);
    }

    #[test]
    fn displays_like_resolved_css() {
        assert_eq!(Extent::Px(40.0).to_string(), "40px");
        assert_eq!(Extent::from("50%").to_string(), "50%");
    }

    #[test]
    fn percent_resolves_against_basis() {
        assert_eq!(Extent::from("50%").resolve_cells(80), Some(40));
        assert_eq!(Extent::Px(12.0).resolve_cells(80), Some(12));
        assert_eq!(Extent::from("2em").resolve_cells(80), None);
    }

    #[test]
    fn deserializes_number_or_string() {
        assert_eq!(
            serde_json::from_str::<Extent>("40").unwrap(),
            Extent::Px(40.0)
        );
        assert_eq!(
            serde_json::from_str::<Extent>("\"2em\"").unwrap(),
            Extent::from("2em")
        );
    }
}
