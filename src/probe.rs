use ratatui::layout::Size;

use crate::node::{NodeKind, VisualNode};
use crate::style::{CapturedStyle, Display, Overflow};

/// Captures a node's natural visual footprint, independent of its current
/// visibility.
///
/// The node's resolved `display` is recorded first, then the node is
/// hidden before the style is re-resolved: hidden resolution reports
/// cascade values instead of values influenced by the node's rendered
/// box. Don't reorder these steps. The recorded `display` is substituted
/// back into the result.
///
/// Image-like nodes get `overflow: hidden` forced into the snapshot,
/// since their intrinsic size would otherwise leak through.
///
/// Returns `None` when the node is not attached yet; the caller is
/// expected to retry on a later cycle.
pub fn capture_style(node: &mut dyn VisualNode) -> Option<CapturedStyle> {
    let visible = node.resolved_style()?;
    let origin_display = visible
        .get("display")
        .map(str::to_owned)
        .unwrap_or_else(|| Display::Block.to_string());

    node.set_display(Display::None);
    let mut captured = node.resolved_style()?;
    captured.insert("display", origin_display);

    if node.kind() == NodeKind::Image {
        captured.insert("overflow", Overflow::Hidden.to_string());
    }

    Some(captured)
}

/// The node's rendered pixel box, if it has one.
pub fn measure_size(node: &dyn VisualNode) -> Option<Size> {
    node.rendered_size()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use ratatui::layout::Size;

    use super::*;
    use crate::extent::Extent;
    use crate::node::{self, NodeData, NodeKind};
    use crate::style::NodeStyle;

    fn laid_out_node(style: NodeStyle) -> NodeData {
        let mut node = NodeData::new(style);
        node::compute_leaf_layout(&mut node, Size::new(80, 24), |_, _| taffy::Size {
            width: 12.0,
            height: 2.0,
        })
        .unwrap();
        node
    }

    #[test]
    fn absent_node_yields_nothing() {
        let mut node = NodeData::default();
        assert_eq!(capture_style(&mut node), None);
        assert_eq!(measure_size(&node), None);
    }

    #[test]
    fn capture_substitutes_the_recorded_display() {
        let mut node = laid_out_node(NodeStyle::default());
        let captured = capture_style(&mut node).unwrap();

        // The node itself is hidden now, but the snapshot remembers what
        // it looked like.
        assert_eq!(captured.get("display"), Some("block"));
        assert_eq!(node.effective_display(), Display::None);
    }

    #[test]
    fn capture_reports_cascade_values() {
        let mut node = laid_out_node(NodeStyle {
            width: Some(Extent::from("40%")),
            ..Default::default()
        });
        let captured = capture_style(&mut node).unwrap();

        // The used width would be 32px; the cascade value survives the
        // hide-then-resolve sequence.
        assert_eq!(captured.get("width"), Some("40%"));
    }

    #[test]
    fn image_nodes_get_overflow_hidden() {
        let mut node = NodeData::new(NodeStyle::default()).with_kind(NodeKind::Image);
        node::compute_leaf_layout(&mut node, Size::new(80, 24), |_, _| taffy::Size {
            width: 12.0,
            height: 2.0,
        })
        .unwrap();

        let captured = capture_style(&mut node).unwrap();
        assert_eq!(captured.get("overflow"), Some("hidden"));
    }

    #[test]
    fn measure_reports_the_rendered_box() {
        let node = laid_out_node(NodeStyle {
            width: Some(Extent::Px(30.0)),
            height: Some(Extent::Px(4.0)),
            ..Default::default()
        });
        assert_eq!(measure_size(&node), Some(Size::new(30, 4)));
    }
}
