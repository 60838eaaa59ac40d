use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Span;

use crate::extent::Extent;
use crate::holder::{Align, Holder, HolderProps};

/// The default holder visual: a colored box with its content centered.
///
/// An unset width shrinks the box to its content, an unset height gives
/// it one line. A height (the computed line-height) centers the content
/// vertically, the way a single text line sits in a CSS line box.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fill;

impl Holder for Fill {
    fn draw(&self, props: &HolderProps, frame: &mut Frame, area: Rect) -> color_eyre::Result<()> {
        if area.area() == 0 {
            return Ok(());
        }

        let span = Span::raw(props.children.as_str());
        let auto_width = span.width() as u16;

        let width = props
            .width
            .as_ref()
            .and_then(|extent| extent.resolve_cells(area.width))
            .unwrap_or(auto_width)
            .min(area.width);
        let height = props
            .height
            .as_ref()
            .and_then(|extent| extent.resolve_cells(area.height))
            .unwrap_or(1)
            .min(area.height);

        let x = match props.align {
            Align::Left => area.x,
            Align::Center => area.x + (area.width - width) / 2,
            Align::Right => area.x + area.width - width,
        };
        let filler = Rect {
            x,
            y: area.y,
            width,
            height,
        };

        let mut style = Style::new().bg(props.color);
        if let Some(extra) = props.filler_style {
            style = style.patch(extra);
        }
        frame.buffer_mut().set_style(filler, style);

        let line_height = props.height.as_ref().and_then(Extent::line_height);
        let content_y = if line_height.is_some() {
            filler.y + filler.height.saturating_sub(1) / 2
        } else {
            filler.y
        };

        let span_width = auto_width.min(filler.width);
        let content = Rect {
            x: filler.x + (filler.width - span_width) / 2,
            y: content_y,
            width: span_width,
            height: filler.height.min(1),
        };
        frame.render_widget(span, content);

        Ok(())
    }
}
