//! A heading held behind a placeholder until its text "arrives".
//!
//! Run with `cargo run --example holdable`. Press `r` to reload the
//! heading (it re-enters the hold), `q` or Ctrl-C to quit.

use std::time::Duration;

use clap::Parser;
use color_eyre::Result;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::{DefaultTerminal, Frame};
use taffy::AvailableSpace;
use tui_hold::{Extent, Hold, HoldConfig, HoldTarget, NodeStyle, Viewport};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Seconds before the heading text arrives.
    #[arg(short, long, value_name = "FLOAT", default_value_t = 2.0)]
    delay: f64,

    /// Tick rate, i.e. number of ticks per second.
    #[arg(short, long, value_name = "FLOAT", default_value_t = 10.0)]
    tick_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
struct HeadingProps {
    children: Option<String>,
}

/// One emphasized line, the terminal cousin of an `<h1>`.
#[derive(Debug)]
struct Heading;

impl HoldTarget<HeadingProps> for Heading {
    fn declared_style(&self, _props: &HeadingProps) -> NodeStyle {
        NodeStyle {
            height: Some(Extent::Px(1.0)),
            ..Default::default()
        }
    }

    fn measure(
        &self,
        props: &HeadingProps,
        _known_dimensions: taffy::Size<Option<f32>>,
        _available_space: taffy::Size<AvailableSpace>,
    ) -> taffy::Size<f32> {
        let width = props
            .children
            .as_deref()
            .map(|text| Span::raw(text).width())
            .unwrap_or(0);
        taffy::Size {
            width: width as f32,
            height: 1.0,
        }
    }

    fn draw(&self, props: &HeadingProps, frame: &mut Frame, area: Rect) -> Result<()> {
        if let Some(text) = props.children.as_deref() {
            let span = Span::styled(text, Style::new().add_modifier(Modifier::BOLD));
            frame.render_widget(span, area);
        }
        Ok(())
    }
}

fn waiting_for_text(props: &HeadingProps, _old: &HeadingProps) -> bool {
    props.children.is_none()
}

type HeadingCondition = fn(&HeadingProps, &HeadingProps) -> bool;

#[tokio::main]
async fn main() -> Result<()> {
    tui_hold::error::init()?;
    tui_hold::logging::init()?;
    let args = Args::parse();

    let mut terminal = ratatui::init();
    let result = run(&mut terminal, &args).await;
    ratatui::restore();
    result
}

async fn run(terminal: &mut DefaultTerminal, args: &Args) -> Result<()> {
    let viewport = Viewport::new(terminal.size()?);
    let mut hold = Hold::new(
        Box::new(Heading),
        waiting_for_text as HeadingCondition,
        HoldConfig::default().with_children("fetching headline"),
        HeadingProps::default(),
    )?;

    // First render shows the target so the probe can capture it, then the
    // wrapper mounts and the holder settles into the captured footprint.
    render(terminal, &mut hold)?;
    hold.mount(&viewport);
    render(terminal, &mut hold)?;
    hold.commit();
    render(terminal, &mut hold)?;

    let mut events = EventStream::new();
    let mut ticker = tokio::time::interval(Duration::from_secs_f64(1.0 / args.tick_rate));
    let mut ticks = 0u64;
    let mut arrived = false;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                ticks += 1;
                if !arrived && ticks as f64 / args.tick_rate >= args.delay {
                    arrived = true;
                    hold.update(HeadingProps {
                        children: Some("Breaking: the data has arrived".to_owned()),
                    });
                    render(terminal, &mut hold)?;
                    hold.commit();
                }
                if hold.poll_resize() {
                    render(terminal, &mut hold)?;
                }
            }
            Some(event) = events.next() => match event? {
                Event::Key(KeyEvent { code, modifiers, kind: KeyEventKind::Press, .. }) => {
                    match code {
                        KeyCode::Char('q') | KeyCode::Esc => break,
                        KeyCode::Char('c' | 'd') if modifiers == KeyModifiers::CONTROL => break,
                        KeyCode::Char('r') => {
                            // Reload: the heading loses its text and the
                            // wrapper re-enters the hold.
                            arrived = false;
                            ticks = 0;
                            hold.update(HeadingProps::default());
                            render(terminal, &mut hold)?;
                            hold.commit();
                            render(terminal, &mut hold)?;
                            hold.commit();
                            render(terminal, &mut hold)?;
                        }
                        _ => {}
                    }
                }
                Event::Resize(width, height) => {
                    viewport.publish(ratatui::layout::Size::new(width, height));
                    render(terminal, &mut hold)?;
                    if hold.poll_resize() {
                        render(terminal, &mut hold)?;
                    }
                }
                _ => {}
            }
        }
    }

    hold.deactivate();
    Ok(())
}

fn render(
    terminal: &mut DefaultTerminal,
    hold: &mut Hold<HeadingProps, HeadingCondition>,
) -> Result<()> {
    let mut result = Ok(());
    terminal.draw(|frame| {
        let area = frame.area();
        // Leave a margin so the held heading visibly floats in the frame.
        let inner = Rect {
            x: area.x + 2,
            y: area.y + 1,
            width: area.width.saturating_sub(4),
            height: area.height.saturating_sub(2).min(3),
        };
        result = hold.draw(frame, inner);
    })?;
    result
}
