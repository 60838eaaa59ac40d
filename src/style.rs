use std::collections::BTreeMap;

use derive_deref::{Deref, DerefMut};
use strum::{Display as StrumDisplay, EnumString};
use taffy::prelude::{LengthPercentage, LengthPercentageAuto};

use crate::extent::Extent;

/// The display mode a node declares.
///
/// `Inline` and `InlineBlock` exist for captured-style fidelity; the layout
/// engine lays both out as blocks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, StrumDisplay, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum Display {
    #[default]
    Block,
    Inline,
    InlineBlock,
    Flex,
    None,
}

impl Display {
    pub fn to_taffy(self) -> taffy::Display {
        match self {
            Self::Block | Self::Inline | Self::InlineBlock => taffy::Display::Block,
            Self::Flex => taffy::Display::Flex,
            Self::None => taffy::Display::None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, StrumDisplay, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum Position {
    #[default]
    Relative,
    Absolute,
}

impl Position {
    pub fn to_taffy(self) -> taffy::Position {
        match self {
            Self::Relative => taffy::Position::Relative,
            Self::Absolute => taffy::Position::Absolute,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, StrumDisplay, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum Overflow {
    #[default]
    Visible,
    Hidden,
}

impl Overflow {
    pub fn to_taffy(self) -> taffy::Overflow {
        match self {
            Self::Visible => taffy::Overflow::Visible,
            Self::Hidden => taffy::Overflow::Hidden,
        }
    }
}

/// Per-side box lengths, in cells.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Edges {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Edges {
    pub fn uniform(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }
}

/// The style a node declares, before layout resolves it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeStyle {
    pub display: Display,
    pub position: Position,
    pub overflow: Overflow,
    /// `None` means `auto`.
    pub width: Option<Extent>,
    /// `None` means `auto`.
    pub height: Option<Extent>,
    pub margin: Edges,
    pub padding: Edges,
}

impl NodeStyle {
    /// The holder's environment node: fills its parent completely and adds
    /// no box of its own, so measuring it yields the parent's footprint.
    pub fn env() -> Self {
        Self {
            display: Display::Block,
            position: Position::Relative,
            overflow: Overflow::Visible,
            width: Some(Extent::from("100%")),
            height: Some(Extent::from("100%")),
            margin: Edges::default(),
            padding: Edges::default(),
        }
    }

    pub fn to_taffy(&self) -> taffy::Style {
        taffy::Style {
            display: self.display.to_taffy(),
            position: self.position.to_taffy(),
            overflow: taffy::Point {
                x: self.overflow.to_taffy(),
                y: self.overflow.to_taffy(),
            },
            size: taffy::Size {
                width: dimension(self.width.as_ref()),
                height: dimension(self.height.as_ref()),
            },
            margin: taffy::Rect {
                left: LengthPercentageAuto::length(self.margin.left),
                right: LengthPercentageAuto::length(self.margin.right),
                top: LengthPercentageAuto::length(self.margin.top),
                bottom: LengthPercentageAuto::length(self.margin.bottom),
            },
            padding: taffy::Rect {
                left: LengthPercentage::length(self.padding.left),
                right: LengthPercentage::length(self.padding.right),
                top: LengthPercentage::length(self.padding.top),
                bottom: LengthPercentage::length(self.padding.bottom),
            },
            ..Default::default()
        }
    }
}

fn dimension(extent: Option<&Extent>) -> taffy::Dimension {
    extent
        .map(Extent::to_dimension)
        .unwrap_or_else(taffy::Dimension::auto)
}

/// A snapshot of a node's resolved style: CSS-like property names mapped to
/// resolved string values. Captured once per hold activation and consumed
/// exactly once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref, DerefMut)]
pub struct CapturedStyle(BTreeMap<String, String>);

impl CapturedStyle {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    /// Writes the snapshot back onto a declared style.
    ///
    /// `display` is handled last and not copied verbatim: a captured
    /// `inline` is promoted to `inline-block` so the styled node can carry
    /// explicit dimensions.
    pub fn apply_to(&self, style: &mut NodeStyle) {
        for (name, value) in self.iter() {
            if name != "display" {
                apply_property(style, name, value);
            }
        }

        if let Some(display) = self.get("display") {
            style.display = match display {
                "inline" => Display::InlineBlock,
                other => other.parse().unwrap_or(style.display),
            };
        }
    }
}

fn apply_property(style: &mut NodeStyle, name: &str, value: &str) {
    match name {
        "position" => {
            if let Ok(position) = value.parse() {
                style.position = position;
            }
        }
        "overflow" => {
            if let Ok(overflow) = value.parse() {
                style.overflow = overflow;
            }
        }
        "width" => style.width = parse_extent(value),
        "height" => style.height = parse_extent(value),
        "margin-top" => style.margin.top = parse_length(value),
        "margin-right" => style.margin.right = parse_length(value),
        "margin-bottom" => style.margin.bottom = parse_length(value),
        "margin-left" => style.margin.left = parse_length(value),
        "padding-top" => style.padding.top = parse_length(value),
        "padding-right" => style.padding.right = parse_length(value),
        "padding-bottom" => style.padding.bottom = parse_length(value),
        "padding-left" => style.padding.left = parse_length(value),
        _ => {}
    }
}

fn parse_extent(value: &str) -> Option<Extent> {
    let value = value.trim();
    if value.is_empty() || value == "auto" {
        return None;
    }
    match value.strip_suffix("px").and_then(|n| n.parse::<f32>().ok()) {
        Some(cells) => Some(Extent::Px(cells)),
        None => Some(Extent::from(value)),
    }
}

fn parse_length(value: &str) -> f32 {
    let value = value.trim();
    value
        .strip_suffix("px")
        .unwrap_or(value)
        .parse::<f32>()
        .unwrap_or(0.0)
}

/// Resolves a declared style to property/value pairs, the way a hidden
/// node reports them: cascade values, uninfluenced by any rendered box.
pub fn declared_map(style: &NodeStyle, effective_display: Display) -> CapturedStyle {
    let mut map = CapturedStyle::default();
    map.insert("display", effective_display.to_string());
    map.insert("position", style.position.to_string());
    map.insert("overflow", style.overflow.to_string());
    map.insert("width", extent_value(style.width.as_ref()));
    map.insert("height", extent_value(style.height.as_ref()));
    insert_edges(&mut map, "margin", &style.margin);
    insert_edges(&mut map, "padding", &style.padding);
    map
}

pub(crate) fn extent_value(extent: Option<&Extent>) -> String {
    extent.map_or_else(|| "auto".to_owned(), ToString::to_string)
}

pub(crate) fn insert_edges(map: &mut CapturedStyle, property: &str, edges: &Edges) {
    map.insert(format!("{property}-top"), format!("{}px", edges.top));
    map.insert(format!("{property}-right"), format!("{}px", edges.right));
    map.insert(format!("{property}-bottom"), format!("{}px", edges.bottom));
    map.insert(format!("{property}-left"), format!("{}px", edges.left));
}
