//! Hold a component behind a placeholder until it is ready.
//!
//! `tui-hold` wraps a target component with a hold condition over its
//! props. While the condition is true — typically "the data is not here
//! yet" — the wrapper renders a holder visual sized to the target's
//! last known geometry, then swaps the real component back in without
//! shifting layout.
//!
//! ```no_run
//! use ratatui::Frame;
//! use ratatui::layout::Rect;
//! use tui_hold::{Hold, HolderSpec, Viewport};
//!
//! # #[derive(Debug)]
//! # struct Banner;
//! # impl tui_hold::HoldTarget<Option<String>> for Banner {
//! #     fn measure(
//! #         &self,
//! #         _props: &Option<String>,
//! #         _known: taffy::Size<Option<f32>>,
//! #         _avail: taffy::Size<taffy::AvailableSpace>,
//! #     ) -> taffy::Size<f32> {
//! #         taffy::Size { width: 24.0, height: 3.0 }
//! #     }
//! #     fn draw(&self, _props: &Option<String>, _frame: &mut Frame, _area: Rect) -> color_eyre::Result<()> {
//! #         Ok(())
//! #     }
//! # }
//! # fn main() -> color_eyre::Result<()> {
//! let viewport = Viewport::new(ratatui::layout::Size::new(80, 24));
//! let mut hold = Hold::new(
//!     Box::new(Banner),
//!     |props: &Option<String>, _old: &Option<String>| props.is_none(),
//!     HolderSpec::default(),
//!     None,
//! )?;
//!
//! // The host engine drives the lifecycle:
//! // draw, then mount, then a commit per committed render.
//! hold.mount(&viewport);
//! // ... draw/commit cycles, hold.update(new_props) on changes ...
//! hold.deactivate();
//! # Ok(())
//! # }
//! ```
//!
//! The crate's core is engine-agnostic: the hold state machine
//! ([`state`]), the style/geometry probe ([`probe`]) and the refit
//! controller ([`refit`]) only speak in terms of capability traits.
//! The ratatui/taffy integration lives at the edges ([`node`],
//! [`holders`]).

pub mod color;
pub mod config;
pub mod error;
pub mod extent;
pub mod hold;
pub mod holder;
pub mod holders;
pub mod logging;
pub mod node;
pub mod probe;
pub mod refit;
pub mod state;
pub mod style;
pub mod target;
pub mod viewport;

pub use config::HoldConfig;
pub use error::HoldError;
pub use extent::Extent;
pub use hold::Hold;
pub use holder::{Align, Holder, HolderProps, HolderSpec, normalize_content};
pub use holders::Fill;
pub use node::{NodeData, NodeKind, VisualNode};
pub use refit::{RefitController, Refittable};
pub use state::Phase;
pub use style::{CapturedStyle, NodeStyle};
pub use target::{HoldTarget, TagTarget, primitive};
pub use viewport::{ResizeEvents, ResizeSubscription, Viewport};
