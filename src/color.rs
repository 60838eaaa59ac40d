use ratatui::style::Color;

use crate::error::HoldError;

/// Parses a CSS-style hex color (`#eee` or `#ededed`) into a terminal color.
///
/// The holder's default `#eee` comes through here, so the short form
/// matters as much as the long one.
pub fn parse_hex(value: &str) -> Result<Color, HoldError> {
    let digits = value
        .strip_prefix('#')
        .ok_or_else(|| HoldError::InvalidColor(value.to_owned()))?;

    let channels = match digits.len() {
        3 => digits
            .chars()
            .map(|c| u8::from_str_radix(&format!("{c}{c}"), 16).ok())
            .collect::<Option<Vec<_>>>(),
        6 => (0..3)
            .map(|i| u8::from_str_radix(&digits[2 * i..2 * i + 2], 16).ok())
            .collect::<Option<Vec<_>>>(),
        _ => None,
    };

    match channels.as_deref() {
        Some([r, g, b]) => Ok(Color::Rgb(*r, *g, *b)),
        _ => Err(HoldError::InvalidColor(value.to_owned())),
    }
}
