use thiserror::Error;

/// Wrap-time configuration failures.
///
/// These are raised once, while the wrapper is being constructed, and are
/// not recoverable by the wrapper itself; the call site has to be fixed.
/// Everything that can go wrong later (an unmounted node at capture time,
/// a not-yet-measured holder) is represented as an absent value instead
/// and silently retried on a later cycle.
#[derive(Debug, Error)]
pub enum HoldError {
    /// The dynamic target path was given a tag that names no primitive.
    #[error("expected the target to be a component or a primitive tag, got unknown tag `{0}`")]
    UnknownTag(String),

    /// The configured holder color could not be parsed.
    #[error("invalid holder color `{0}`")]
    InvalidColor(String),
}

/// Installs the `color_eyre` panic and error report hooks.
///
/// Call once at startup, before entering the terminal's raw mode.
pub fn init() -> color_eyre::Result<()> {
    color_eyre::install()
}
