use std::fmt::Debug;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use serde::{Deserialize, Serialize};
use static_assertions::assert_obj_safe;
use strum::Display as StrumDisplay;

use crate::config::HoldConfig;
use crate::extent::Extent;
use crate::holders::Fill;

/// The non-breaking space used to keep holder text from collapsing.
pub const NBSP: char = '\u{00A0}';

/// How many non-breaking spaces stand in for absent holder content.
pub(crate) const BLANK_LENGTH: usize = 8;

/// Horizontal placement of the holder within the wrapper's box.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, StrumDisplay, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Align {
    Left,
    #[default]
    Center,
    Right,
}

/// Everything a holder visual needs to paint itself.
#[derive(Debug, Clone)]
pub struct HolderProps {
    pub color: Color,
    pub width: Option<Extent>,
    pub height: Option<Extent>,
    /// Holder text, already normalized (see [`normalize_content`]).
    pub children: String,
    pub align: Align,
    pub filler_style: Option<Style>,
}

/// A holder visual: a pure function from props to presentation.
///
/// The default implementation is [`Fill`]; anything that can paint a
/// {color, width, height, children} box may be substituted.
pub trait Holder: Debug {
    fn draw(&self, props: &HolderProps, frame: &mut Frame, area: Rect) -> color_eyre::Result<()>;
}

assert_obj_safe!(Holder);

/// The holder argument of [`crate::hold::Hold::new`]: either the default
/// visual with some configuration, or a custom visual.
///
/// A plain configuration converts into this, so passing configuration
/// where a holder is expected selects the default visual with it.
#[derive(Debug)]
pub enum HolderSpec {
    Default(HoldConfig),
    Custom(Box<dyn Holder>, HoldConfig),
}

impl Default for HolderSpec {
    fn default() -> Self {
        Self::Default(HoldConfig::default())
    }
}

impl From<HoldConfig> for HolderSpec {
    fn from(config: HoldConfig) -> Self {
        Self::Default(config)
    }
}

impl From<Box<dyn Holder>> for HolderSpec {
    fn from(holder: Box<dyn Holder>) -> Self {
        Self::Custom(holder, HoldConfig::default())
    }
}

impl HolderSpec {
    pub fn with_config(self, config: HoldConfig) -> Self {
        match self {
            Self::Default(_) => Self::Default(config),
            Self::Custom(holder, _) => Self::Custom(holder, config),
        }
    }

    pub(crate) fn into_parts(self) -> (Box<dyn Holder>, HoldConfig) {
        match self {
            Self::Default(config) => (Box::new(Fill), config),
            Self::Custom(holder, config) => (holder, config),
        }
    }
}

/// Prepares holder text for rendering.
///
/// Embedded spaces become non-breaking so the text cannot collapse under
/// the holder's alignment; absent or empty content becomes a fixed run of
/// non-breaking spaces so the box never collapses to zero content height.
pub fn normalize_content(children: Option<&str>) -> String {
    match children {
        Some(text) if !text.is_empty() => text.replace(' ', &NBSP.to_string()),
        _ => NBSP.to_string().repeat(BLANK_LENGTH),
    }
}
