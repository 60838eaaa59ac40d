use ratatui::layout::{Rect, Size};
use static_assertions::assert_obj_safe;
use strum::Display as StrumDisplay;
use taffy::{AvailableSpace, TaffyTree};

use crate::style::{self, CapturedStyle, Display, NodeStyle};

/// What kind of box a node renders. Image-like nodes have intrinsic-size
/// semantics the probe has to compensate for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, StrumDisplay)]
#[strum(serialize_all = "kebab-case")]
pub enum NodeKind {
    #[default]
    Element,
    Image,
}

/// The capability the probe needs from a live rendered node.
///
/// Resolution is visibility-dependent: a visible node reports used values
/// (influenced by its rendered box), a hidden node reports cascade values.
/// A node that is not attached to the render tree resolves to nothing.
pub trait VisualNode {
    fn resolved_style(&self) -> Option<CapturedStyle>;

    /// Forces a display mode, as an inline override over the declared style.
    fn set_display(&mut self, display: Display);

    /// The rendered border box, if the node has been laid out.
    fn rendered_size(&self) -> Option<Size>;

    fn kind(&self) -> NodeKind {
        NodeKind::Element
    }
}

assert_obj_safe!(VisualNode);

/// A node in the terminal render tree: a declared style plus the layout
/// the engine last computed for it.
#[derive(Debug, Clone, Default)]
pub struct NodeData {
    style: NodeStyle,
    display_override: Option<Display>,
    layout: Option<taffy::Layout>,
    kind: NodeKind,
}

impl NodeData {
    pub fn new(style: NodeStyle) -> Self {
        Self {
            style,
            ..Default::default()
        }
    }

    pub fn with_kind(self, kind: NodeKind) -> Self {
        Self { kind, ..self }
    }

    pub fn style(&self) -> &NodeStyle {
        &self.style
    }

    pub fn style_mut(&mut self) -> &mut NodeStyle {
        &mut self.style
    }

    pub fn set_style(&mut self, style: NodeStyle) {
        self.style = style;
    }

    /// The display mode layout actually uses: the inline override if one
    /// is set, the declared value otherwise.
    pub fn effective_display(&self) -> Display {
        self.display_override.unwrap_or(self.style.display)
    }

    pub fn clear_display_override(&mut self) {
        self.display_override = None;
    }

    pub fn layout(&self) -> Option<&taffy::Layout> {
        self.layout.as_ref()
    }

    fn effective_taffy_style(&self) -> taffy::Style {
        let mut taffy_style = self.style.to_taffy();
        if let Some(display) = self.display_override {
            taffy_style.display = display.to_taffy();
        }
        taffy_style
    }

    fn used_map(&self, layout: &taffy::Layout) -> CapturedStyle {
        let mut map = CapturedStyle::default();
        map.insert("display", self.effective_display().to_string());
        map.insert("position", self.style.position.to_string());
        map.insert("overflow", self.style.overflow.to_string());
        map.insert("width", format!("{}px", layout.size.width));
        map.insert("height", format!("{}px", layout.size.height));
        map.insert("margin-top", format!("{}px", layout.margin.top));
        map.insert("margin-right", format!("{}px", layout.margin.right));
        map.insert("margin-bottom", format!("{}px", layout.margin.bottom));
        map.insert("margin-left", format!("{}px", layout.margin.left));
        map.insert("padding-top", format!("{}px", layout.padding.top));
        map.insert("padding-right", format!("{}px", layout.padding.right));
        map.insert("padding-bottom", format!("{}px", layout.padding.bottom));
        map.insert("padding-left", format!("{}px", layout.padding.left));
        map
    }
}

impl VisualNode for NodeData {
    fn resolved_style(&self) -> Option<CapturedStyle> {
        if self.effective_display() == Display::None {
            Some(style::declared_map(&self.style, Display::None))
        } else {
            self.layout.as_ref().map(|layout| self.used_map(layout))
        }
    }

    fn set_display(&mut self, display: Display) {
        self.display_override = Some(display);
    }

    fn rendered_size(&self) -> Option<Size> {
        self.layout.as_ref().map(|layout| {
            Size::new(
                layout.size.width.round() as u16,
                layout.size.height.round() as u16,
            )
        })
    }

    fn kind(&self) -> NodeKind {
        self.kind
    }
}

/// Rect views over a computed layout, in the parent's coordinate space.
pub trait LayoutExt {
    fn border_rect(&self) -> Rect;
    fn content_rect(&self) -> Rect;
}

impl LayoutExt for taffy::Layout {
    fn border_rect(&self) -> Rect {
        Rect {
            x: self.location.x as u16,
            y: self.location.y as u16,
            width: self.size.width as u16,
            height: self.size.height as u16,
        }
    }

    fn content_rect(&self) -> Rect {
        Rect {
            x: self.content_box_x() as u16,
            y: self.content_box_y() as u16,
            width: self.content_box_width() as u16,
            height: self.content_box_height() as u16,
        }
    }
}

fn definitely(area: Size) -> taffy::Size<AvailableSpace> {
    taffy::Size {
        width: AvailableSpace::Definite(area.width as f32),
        height: AvailableSpace::Definite(area.height as f32),
    }
}

/// Lays a leaf node out within the given area, sizing it through the
/// supplied measure function, and records the result on the node.
pub fn compute_leaf_layout<M>(
    node: &mut NodeData,
    available: Size,
    measure: M,
) -> color_eyre::Result<()>
where
    M: Fn(taffy::Size<Option<f32>>, taffy::Size<AvailableSpace>) -> taffy::Size<f32>,
{
    let mut tree: TaffyTree<()> = TaffyTree::new();
    let leaf = tree.new_leaf_with_context(node.effective_taffy_style(), ())?;
    tree.compute_layout_with_measure(
        leaf,
        definitely(available),
        |known_dimensions, available_space, _, _, _| measure(known_dimensions, available_space),
    )?;
    node.layout = Some(*tree.layout(leaf)?);
    Ok(())
}

/// Lays out the holder's shadow node with its environment child against
/// the viewport and returns the environment's content box, which is the
/// live footprint the holder should fall back to.
///
/// The environment wraps the holder's markup, so wherever the shadow's
/// captured style leaves a dimension unconstrained, the environment
/// falls back to the holder's intrinsic `content` size — an auto-height
/// shadow is as tall as the holder content it carries, nothing more.
pub fn measure_env(
    fake: &mut NodeData,
    env: &mut NodeData,
    viewport: Size,
    content: taffy::Size<f32>,
) -> Option<Size> {
    let mut tree: TaffyTree<()> = TaffyTree::new();
    let env_id = tree.new_leaf_with_context(env.effective_taffy_style(), ()).ok()?;
    let fake_id = tree
        .new_with_children(fake.effective_taffy_style(), &[env_id])
        .ok()?;
    tree.compute_layout_with_measure(
        fake_id,
        definitely(viewport),
        |known_dimensions, _available_space, _, _, _| taffy::Size {
            width: known_dimensions.width.unwrap_or(content.width),
            height: known_dimensions.height.unwrap_or(content.height),
        },
    )
    .ok()?;

    fake.layout = Some(*tree.layout(fake_id).ok()?);
    let env_layout = *tree.layout(env_id).ok()?;
    env.layout = Some(env_layout);

    Some(Size::new(
        env_layout.content_box_width().round() as u16,
        env_layout.content_box_height().round() as u16,
    ))
}
