//! End-to-end lifecycle coverage, driven the way a host engine drives
//! the wrapper: draw, mount, draw/commit cycles, resize polls,
//! deactivate.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use pretty_assertions::assert_eq;
use ratatui::Frame;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::{Rect, Size};
use ratatui::style::Color;
use ratatui::text::Span;
use taffy::AvailableSpace;
use tui_hold::{
    Extent, Hold, HoldConfig, HoldTarget, Holder, HolderProps, HolderSpec, NodeStyle, Phase,
    Refittable, Viewport,
};

const GRAY: Color = Color::Rgb(0xee, 0xee, 0xee);

#[derive(Debug, Clone, Default, PartialEq)]
struct FeedProps {
    lines: Option<String>,
}

impl FeedProps {
    fn loaded(text: &str) -> Self {
        Self {
            lines: Some(text.to_owned()),
        }
    }
}

/// A target that declares its own 24x3 box and counts refit signals.
#[derive(Debug, Default)]
struct Feed {
    refits: Rc<Cell<usize>>,
    undos: Rc<Cell<usize>>,
}

impl HoldTarget<FeedProps> for Feed {
    fn declared_style(&self, _props: &FeedProps) -> NodeStyle {
        NodeStyle {
            width: Some(Extent::Px(24.0)),
            height: Some(Extent::Px(3.0)),
            ..Default::default()
        }
    }

    fn measure(
        &self,
        _props: &FeedProps,
        _known_dimensions: taffy::Size<Option<f32>>,
        _available_space: taffy::Size<AvailableSpace>,
    ) -> taffy::Size<f32> {
        taffy::Size {
            width: 24.0,
            height: 3.0,
        }
    }

    fn draw(&self, props: &FeedProps, frame: &mut Frame, area: Rect) -> color_eyre::Result<()> {
        if let Some(lines) = &props.lines {
            frame.render_widget(Span::raw(lines.as_str()), area);
        }
        Ok(())
    }

    fn as_refittable(&mut self) -> Option<&mut dyn Refittable> {
        Some(self)
    }
}

impl Refittable for Feed {
    fn refit(&mut self) {
        self.refits.set(self.refits.get() + 1);
    }

    fn undo(&mut self) {
        self.undos.set(self.undos.get() + 1);
    }
}

/// A target with a fully auto declared style: its captured footprint is
/// driven by the surrounding viewport.
#[derive(Debug, Default)]
struct Stream;

impl HoldTarget<FeedProps> for Stream {
    fn measure(
        &self,
        _props: &FeedProps,
        _known_dimensions: taffy::Size<Option<f32>>,
        _available_space: taffy::Size<AvailableSpace>,
    ) -> taffy::Size<f32> {
        taffy::Size {
            width: 10.0,
            height: 1.0,
        }
    }

    fn draw(&self, _props: &FeedProps, _frame: &mut Frame, _area: Rect) -> color_eyre::Result<()> {
        Ok(())
    }
}

fn loading(props: &FeedProps, _old: &FeedProps) -> bool {
    props.lines.is_none()
}

type Condition = fn(&FeedProps, &FeedProps) -> bool;

fn new_feed_hold(
    holder: impl Into<HolderSpec>,
) -> (Hold<FeedProps, Condition>, Rc<Cell<usize>>, Rc<Cell<usize>>) {
    let refits = Rc::new(Cell::new(0));
    let undos = Rc::new(Cell::new(0));
    let feed = Feed {
        refits: refits.clone(),
        undos: undos.clone(),
    };
    let hold = Hold::new(
        Box::new(feed),
        loading as Condition,
        holder,
        FeedProps::default(),
    )
    .unwrap();
    (hold, refits, undos)
}

fn new_stream_hold(holder: impl Into<HolderSpec>) -> Hold<FeedProps, Condition> {
    Hold::new(
        Box::new(Stream),
        loading as Condition,
        holder,
        FeedProps::default(),
    )
    .unwrap()
}

fn draw<T>(terminal: &mut Terminal<TestBackend>, hold: &mut Hold<FeedProps, T>) -> Buffer
where
    T: Fn(&FeedProps, &FeedProps) -> bool,
{
    terminal
        .draw(|frame| hold.draw(frame, frame.area()).unwrap())
        .unwrap();
    terminal.backend().buffer().clone()
}

fn row(buffer: &Buffer, y: u16, range: std::ops::Range<u16>) -> String {
    range
        .map(|x| buffer.cell((x, y)).unwrap().symbol().to_string())
        .collect()
}

fn settle<T>(
    terminal: &mut Terminal<TestBackend>,
    viewport: &Viewport,
    hold: &mut Hold<FeedProps, T>,
) where
    T: Fn(&FeedProps, &FeedProps) -> bool,
{
    draw(terminal, hold);
    hold.mount(viewport);
    draw(terminal, hold);
    hold.commit();
}

#[test]
fn holds_then_swaps_then_reholds() {
    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    let viewport = Viewport::new(Size::new(80, 24));
    let (mut hold, refits, undos) = new_feed_hold(HolderSpec::default());

    assert_eq!(hold.phase(), Phase::HeldCopying);
    assert_eq!(refits.get(), 1);

    // The first render shows the target so its geometry can be captured.
    draw(&mut terminal, &mut hold);
    hold.mount(&viewport);
    assert_eq!(hold.phase(), Phase::HeldSettled);

    // The post-mount commit consumes the capture and sizes the holder
    // from the target's declared 24x3 box.
    draw(&mut terminal, &mut hold);
    hold.commit();
    assert_eq!(hold.holder_width(), Some(&Extent::Px(24.0)));
    assert_eq!(hold.holder_height(), Some(&Extent::Px(3.0)));

    let buffer = draw(&mut terminal, &mut hold);
    assert_eq!(buffer.cell((28, 0)).unwrap().bg, GRAY);
    assert_eq!(buffer.cell((51, 2)).unwrap().bg, GRAY);
    assert_eq!(buffer.cell((27, 0)).unwrap().bg, Color::Reset);
    assert_eq!(buffer.cell((28, 3)).unwrap().bg, Color::Reset);

    // Data arrives: the target renders directly, with forwarded props.
    hold.update(FeedProps::loaded("all the news"));
    assert_eq!(hold.phase(), Phase::Released);
    assert_eq!(undos.get(), 1);

    let buffer = draw(&mut terminal, &mut hold);
    hold.commit();
    assert_eq!(row(&buffer, 0, 0..12), "all the news");
    assert_eq!(buffer.cell((28, 1)).unwrap().bg, Color::Reset);

    // Data goes away again: a fresh capture cycle runs.
    hold.update(FeedProps::default());
    assert_eq!(hold.phase(), Phase::HeldCopying);

    draw(&mut terminal, &mut hold);
    hold.commit();
    assert_eq!(refits.get(), 2);
    assert_eq!(hold.phase(), Phase::HeldSettled);

    draw(&mut terminal, &mut hold);
    hold.commit();
    let buffer = draw(&mut terminal, &mut hold);
    assert_eq!(buffer.cell((28, 0)).unwrap().bg, GRAY);
    assert_eq!(hold.holder_height(), Some(&Extent::Px(3.0)));
}

#[test]
fn an_auto_styled_target_holds_at_viewport_width() {
    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    let viewport = Viewport::new(Size::new(80, 24));
    let mut hold = new_stream_hold(HoldConfig::default().with_height(Extent::Px(2.0)));

    settle(&mut terminal, &viewport, &mut hold);

    // Nothing constrains the captured width, so the shadow stretches to
    // the viewport; the explicit height wins over measurement.
    assert_eq!(hold.holder_width(), Some(&Extent::Px(80.0)));
    assert_eq!(hold.holder_height(), Some(&Extent::Px(2.0)));
}

#[test]
fn resize_remeasures_auto_dimensions() {
    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    let viewport = Viewport::new(Size::new(80, 24));
    let mut hold = new_stream_hold(HoldConfig::default().with_height(Extent::Px(2.0)));

    settle(&mut terminal, &viewport, &mut hold);
    assert_eq!(hold.holder_width(), Some(&Extent::Px(80.0)));

    terminal.backend_mut().resize(100, 30);
    viewport.publish(Size::new(100, 30));
    draw(&mut terminal, &mut hold);

    assert!(hold.poll_resize());
    assert_eq!(hold.holder_width(), Some(&Extent::Px(100.0)));
    assert_eq!(hold.holder_height(), Some(&Extent::Px(2.0)));

    // Nothing new to observe on the next poll.
    assert!(!hold.poll_resize());
}

#[test]
fn a_fully_configured_holder_ignores_resize() {
    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    let viewport = Viewport::new(Size::new(80, 24));
    let config = HoldConfig::default()
        .with_width(Extent::Px(30.0))
        .with_height(Extent::Px(2.0));
    let (mut hold, _, _) = new_feed_hold(config);

    settle(&mut terminal, &viewport, &mut hold);
    assert_eq!(hold.holder_width(), Some(&Extent::Px(30.0)));

    terminal.backend_mut().resize(120, 40);
    viewport.publish(Size::new(120, 40));
    draw(&mut terminal, &mut hold);

    assert!(!hold.poll_resize());
    assert_eq!(hold.holder_width(), Some(&Extent::Px(30.0)));
    assert_eq!(hold.holder_height(), Some(&Extent::Px(2.0)));
}

#[test]
fn holder_content_comes_from_the_configuration() {
    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    let viewport = Viewport::new(Size::new(80, 24));
    let (mut hold, _, _) = new_feed_hold(HoldConfig::default().with_children("loading data"));

    settle(&mut terminal, &viewport, &mut hold);
    let buffer = draw(&mut terminal, &mut hold);

    let line = row(&buffer, 1, 0..80);
    assert!(
        line.contains("loading\u{00A0}data"),
        "holder text should keep non-breaking spaces: {line:?}"
    );
}

#[test]
fn deactivation_releases_the_resize_subscription() {
    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    let viewport = Viewport::new(Size::new(80, 24));
    let (mut hold, _, _) = new_feed_hold(HolderSpec::default());

    settle(&mut terminal, &viewport, &mut hold);
    assert_eq!(viewport.subscribers(), 1);

    hold.deactivate();
    assert_eq!(viewport.subscribers(), 0);

    // Published sizes no longer reach the wrapper.
    viewport.publish(Size::new(120, 40));
    assert!(!hold.poll_resize());
    assert_eq!(hold.holder_width(), Some(&Extent::Px(24.0)));
}

/// A holder visual that records the props it is asked to paint.
#[derive(Debug)]
struct Beacon {
    seen: Rc<RefCell<Option<HolderProps>>>,
}

impl Holder for Beacon {
    fn draw(
        &self,
        props: &HolderProps,
        _frame: &mut Frame,
        _area: Rect,
    ) -> color_eyre::Result<()> {
        *self.seen.borrow_mut() = Some(props.clone());
        Ok(())
    }
}

#[test]
fn any_holder_visual_can_be_substituted() {
    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    let viewport = Viewport::new(Size::new(80, 24));
    let seen = Rc::new(RefCell::new(None));
    let spec = HolderSpec::from(Box::new(Beacon { seen: seen.clone() }) as Box<dyn Holder>)
        .with_config(
            HoldConfig::default()
                .with_color("#abc")
                .with_children("soon"),
        );
    let (mut hold, _, _) = new_feed_hold(spec);

    settle(&mut terminal, &viewport, &mut hold);
    draw(&mut terminal, &mut hold);

    let props = seen.borrow().clone().expect("the holder should have drawn");
    assert_eq!(props.color, Color::Rgb(0xaa, 0xbb, 0xcc));
    assert_eq!(props.children, "soon");
    assert_eq!(props.width, Some(Extent::Px(24.0)));
    assert_eq!(props.height, Some(Extent::Px(3.0)));
}

#[test]
fn a_released_wrapper_forwards_the_target_reference() {
    let (mut hold, _, _) = new_feed_hold(HolderSpec::default());
    assert!(hold.forwarded().is_none());

    hold.update(FeedProps::loaded("x"));
    assert!(hold.forwarded().is_some());
    assert_eq!(hold.debug_label(), "Hold(Feed)");
}
