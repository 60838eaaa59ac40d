use std::fmt;

use ratatui::Frame;
use ratatui::layout::{Offset, Rect};
use ratatui::text::Span;
use tracing::instrument;

use crate::color;
use crate::config::HoldConfig;
use crate::error::HoldError;
use crate::extent::Extent;
use crate::holder::{self, Holder, HolderProps, HolderSpec};
use crate::node::{self, LayoutExt, NodeData};
use crate::probe;
use crate::refit::RefitController;
use crate::state::{Effect, Effects, HoldMachine, Input, Phase};
use crate::style::{CapturedStyle, NodeStyle};
use crate::target::HoldTarget;
use crate::viewport::{ResizeEvents, ResizeSubscription};

/// The placeholder wrapper.
///
/// Wraps a target component and a hold condition over its props. While
/// the condition judges the props to warrant it, the wrapper renders a
/// holder visual in the target's place, sized from the target's last
/// known geometry so the eventual swap does not shift layout.
///
/// The host engine drives the wrapper through its lifecycle:
/// construction, [`mount`](Self::mount) once attached, a
/// [`draw`](Self::draw)/[`commit`](Self::commit) pair per render cycle,
/// [`update`](Self::update) on new props, [`poll_resize`](Self::poll_resize)
/// when idle, and [`deactivate`](Self::deactivate) on detach.
pub struct Hold<P, C> {
    target: Box<dyn HoldTarget<P>>,
    condition: C,
    holder: Box<dyn Holder>,
    config: HoldConfig,
    machine: HoldMachine,
    refiter: RefitController,
    props: P,
    /// The style snapshot of the original node, pending application.
    origin_style: Option<CapturedStyle>,
    target_node: NodeData,
    /// The holder's shadow node; carries the applied snapshot.
    fake_node: NodeData,
    /// The measurement node inside the shadow node.
    env_node: NodeData,
    resize: Option<ResizeSubscription>,
    last_area: Option<Rect>,
}

impl<P, C> Hold<P, C>
where
    C: Fn(&P, &P) -> bool,
{
    /// Wraps `target`, holding it whenever `condition` judges the new and
    /// previous props to warrant it. The condition is evaluated right
    /// away, against empty previous props.
    pub fn new(
        target: Box<dyn HoldTarget<P>>,
        condition: C,
        holder: impl Into<HolderSpec>,
        props: P,
    ) -> Result<Self, HoldError>
    where
        P: Default,
    {
        let (holder, config) = holder.into().into_parts();
        let color = color::parse_hex(&config.color)?;

        let target_node = NodeData::new(target.declared_style(&props)).with_kind(target.kind());
        let machine = HoldMachine::new(&config, color);

        let mut hold = Self {
            target,
            condition,
            holder,
            config,
            machine,
            refiter: RefitController::new(),
            props,
            origin_style: None,
            target_node,
            fake_node: NodeData::default(),
            env_node: NodeData::new(NodeStyle::env()),
            resize: None,
            last_area: None,
        };

        let holds = (hold.condition)(&hold.props, &P::default());
        let effects = hold.machine.apply(Input::Activate { holds });
        hold.run_effects(effects);
        Ok(hold)
    }

    /// Attaches the wrapper to the render tree: subscribes to resize
    /// notifications and, if holding, schedules the geometry capture.
    #[instrument(skip(self, events), fields(label = %self.debug_label()))]
    pub fn mount(&mut self, events: &dyn ResizeEvents) {
        self.resize = Some(events.subscribe());
        let effects = self.machine.apply(Input::Mount);
        self.run_effects(effects);
    }

    /// Feeds a props update through the hold condition.
    pub fn update(&mut self, props: P) {
        let holds = (self.condition)(&props, &self.props);
        self.props = props;
        let effects = self.machine.apply(Input::Update { holds });
        self.run_effects(effects);
    }

    /// Runs the post-render step for the last lifecycle input: captures
    /// or consumes the style snapshot as the current phase demands.
    pub fn commit(&mut self) {
        let effects = self.machine.apply(Input::Commit {
            capture_pending: self.origin_style.is_some(),
        });
        self.run_effects(effects);
    }

    /// Observes a pending resize notification, if any. Returns whether
    /// the holder size changed and a re-render is warranted.
    pub fn poll_resize(&mut self) -> bool {
        let Some(size) = self.resize.as_mut().and_then(ResizeSubscription::poll) else {
            return false;
        };
        tracing::trace!(?size, "viewport resized");

        let before = (
            self.machine.width().cloned(),
            self.machine.height().cloned(),
        );
        let effects = self.machine.apply(Input::Resize);
        self.run_effects(effects);

        before
            != (
                self.machine.width().cloned(),
                self.machine.height().cloned(),
            )
    }

    /// Detaches the wrapper. The resize subscription is released through
    /// this one path; no further state updates occur afterwards.
    #[instrument(skip(self), fields(label = %self.debug_label()))]
    pub fn deactivate(&mut self) {
        let effects = self.machine.apply(Input::Deactivate);
        self.run_effects(effects);
    }

    /// Renders either the target or the holder, per the current phase.
    ///
    /// During the copying window the target is still rendered, so the
    /// probe has a live box to capture.
    pub fn draw(&mut self, frame: &mut Frame, area: Rect) -> color_eyre::Result<()> {
        self.last_area = Some(area);

        if self.machine.renders_target() {
            // The target re-enters the tree fresh; no inline override
            // from an earlier capture survives.
            self.target_node.clear_display_override();
            self.target_node
                .set_style(self.target.declared_style(&self.props));

            let Self {
                target,
                props,
                target_node,
                ..
            } = self;
            node::compute_leaf_layout(target_node, area.as_size(), |known, available| {
                target.measure(props, known, available)
            })?;

            let rect = self
                .target_node
                .layout()
                .map(|layout| {
                    layout.border_rect().offset(Offset {
                        x: area.x as i32,
                        y: area.y as i32,
                    })
                })
                .unwrap_or(area)
                .intersection(area);
            self.target.draw(&self.props, frame, rect)
        } else {
            let props = HolderProps {
                color: self.machine.color(),
                width: self.machine.width().cloned(),
                height: self.machine.height().cloned(),
                children: holder::normalize_content(self.config.children.as_deref()),
                align: self.config.align,
                filler_style: self.config.filler_style,
            };
            self.holder.draw(&props, frame, area)
        }
    }

    pub fn is_held(&self) -> bool {
        self.machine.is_held()
    }

    pub fn phase(&self) -> Phase {
        self.machine.phase()
    }

    pub fn holder_width(&self) -> Option<&Extent> {
        self.machine.width()
    }

    pub fn holder_height(&self) -> Option<&Extent> {
        self.machine.height()
    }

    /// Read access to the wrapped target, so the wrapper stays
    /// structurally transparent to introspecting callers.
    pub fn target(&self) -> &dyn HoldTarget<P> {
        self.target.as_ref()
    }

    /// Mutable access to the wrapped target, honored only when the
    /// target is the rendered instance. While held, the instance on
    /// screen is not the real target, so nothing is handed out.
    pub fn forwarded(&mut self) -> Option<&mut dyn HoldTarget<P>> {
        if self.machine.is_held() {
            None
        } else {
            Some(self.target.as_mut())
        }
    }

    /// `Hold(<target>)`, the label introspection sees.
    pub fn debug_label(&self) -> String {
        format!("Hold({})", self.target.debug_label())
    }

    fn run_effects(&mut self, effects: Effects) {
        for effect in effects {
            match effect {
                Effect::Refit => self.refiter.refit(self.target.as_refittable()),
                Effect::Undo => self.refiter.undo(self.target.as_refittable()),
                Effect::Capture => {
                    // An absent node resolves to nothing; a later copying
                    // cycle retries.
                    self.origin_style = probe::capture_style(&mut self.target_node);
                }
                Effect::ApplyCapture => {
                    if let Some(captured) = self.origin_style.take() {
                        captured.apply_to(self.fake_node.style_mut());
                    }
                }
                Effect::Remeasure => self.update_holder_size(),
                Effect::Release => self.resize = None,
            }
        }
    }

    fn update_holder_size(&mut self) {
        if !self.machine.is_settled() {
            // No holder markup on screen, nothing to measure against.
            return;
        }

        let viewport = self
            .last_area
            .map(|area| area.as_size())
            .or_else(|| self.resize.as_ref().map(ResizeSubscription::latest));
        let Some(viewport) = viewport else {
            return;
        };

        // The holder's intrinsic content, for the dimensions the captured
        // style leaves unconstrained.
        let children = holder::normalize_content(self.config.children.as_deref());
        let content = taffy::Size {
            width: Span::raw(children.as_str()).width() as f32,
            height: 1.0,
        };

        let Some(measured) =
            node::measure_env(&mut self.fake_node, &mut self.env_node, viewport, content)
        else {
            return;
        };

        if self.machine.apply_measured(measured) {
            tracing::debug!(?measured, "holder size refreshed from live measurement");
        }
    }
}

impl<P, C> fmt::Debug for Hold<P, C>
where
    C: Fn(&P, &P) -> bool,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(&self.debug_label())
            .field("phase", &self.machine.phase())
            .finish_non_exhaustive()
    }
}
