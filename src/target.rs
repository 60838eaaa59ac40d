use std::fmt::Debug;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Span;
use strum::{Display as StrumDisplay, EnumString};
use taffy::AvailableSpace;

use crate::error::HoldError;
use crate::node::NodeKind;
use crate::refit::Refittable;
use crate::style::NodeStyle;

/// The contract a wrapped target fulfills: measurable, drawable with a
/// typed props value, and optionally refittable.
pub trait HoldTarget<P>: Debug {
    /// Label used in the wrapper's own debug label.
    fn debug_label(&self) -> &'static str {
        // Strip the leading module path.
        let type_name = std::any::type_name::<Self>();
        let len = type_name.find(['<', '>']).unwrap_or(type_name.len());
        let start_index = type_name[0..len]
            .rfind("::")
            .map(|index| index + 2)
            .unwrap_or(0);

        &type_name[start_index..]
    }

    /// The style the target declares for its node.
    fn declared_style(&self, _props: &P) -> NodeStyle {
        NodeStyle::default()
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Element
    }

    fn measure(
        &self,
        props: &P,
        known_dimensions: taffy::Size<Option<f32>>,
        available_space: taffy::Size<AvailableSpace>,
    ) -> taffy::Size<f32>;

    fn draw(&self, props: &P, frame: &mut Frame, area: Rect) -> color_eyre::Result<()>;

    /// Surfaces the optional refit capability. The default is the normal
    /// case: no such hook.
    fn as_refittable(&mut self) -> Option<&mut dyn Refittable> {
        None
    }
}

/// The primitive element tags the dynamic construction path accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum Tag {
    Block,
    Text,
    Image,
}

/// A target built from a primitive tag name rather than a component.
/// Its props are the text content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagTarget {
    tag: Tag,
}

impl TagTarget {
    pub fn tag(&self) -> Tag {
        self.tag
    }
}

/// Resolves a primitive tag name into a target.
///
/// An unknown tag is the wrap-time error the dynamic path can actually
/// produce: the caller handed us something that is neither a component
/// nor a known element name.
pub fn primitive(tag: &str) -> Result<TagTarget, HoldError> {
    tag.parse::<Tag>()
        .map(|tag| TagTarget { tag })
        .map_err(|_| HoldError::UnknownTag(tag.to_owned()))
}

impl HoldTarget<String> for TagTarget {
    fn debug_label(&self) -> &'static str {
        match self.tag {
            Tag::Block => "block",
            Tag::Text => "text",
            Tag::Image => "image",
        }
    }

    fn kind(&self) -> NodeKind {
        match self.tag {
            Tag::Image => NodeKind::Image,
            _ => NodeKind::Element,
        }
    }

    fn measure(
        &self,
        props: &String,
        _known_dimensions: taffy::Size<Option<f32>>,
        available_space: taffy::Size<AvailableSpace>,
    ) -> taffy::Size<f32> {
        match self.tag {
            // Images have an intrinsic size of their own.
            Tag::Image => taffy::Size {
                width: 16.0,
                height: 8.0,
            },
            Tag::Text => taffy::Size {
                width: Span::raw(props.as_str()).width() as f32,
                height: if props.is_empty() { 0.0 } else { 1.0 },
            },
            Tag::Block => taffy::Size {
                width: match available_space.width {
                    AvailableSpace::Definite(width) => width,
                    _ => Span::raw(props.as_str()).width() as f32,
                },
                height: if props.is_empty() { 0.0 } else { 1.0 },
            },
        }
    }

    fn draw(&self, props: &String, frame: &mut Frame, area: Rect) -> color_eyre::Result<()> {
        if area.area() == 0 {
            return Ok(());
        }

        match self.tag {
            Tag::Image => {
                frame
                    .buffer_mut()
                    .set_style(area, Style::new().bg(Color::DarkGray));
            }
            Tag::Text | Tag::Block => {
                frame.render_widget(Span::raw(props.as_str()), area);
            }
        }

        Ok(())
    }
}
