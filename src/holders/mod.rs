//! Holder visuals shipped with the crate.

mod fill;

pub use fill::Fill;
