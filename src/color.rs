//! Hex color normalization for annotation colors.

#[cfg(test)]
#[path = "color_test.rs"]
mod color_test;

/// Color used when neither the input nor the fallback parses.
pub const DEFAULT_COLOR: &str = "#ff3b30";

/// Parse `#RGB` or `#RRGGBB` values into RGB channels.
#[must_use]
pub fn parse_hex_rgb(raw: &str) -> Option<(u8, u8, u8)> {
    let hex = raw.trim().strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        3 => {
            let r = hex_byte(&hex[0..1].repeat(2))?;
            let g = hex_byte(&hex[1..2].repeat(2))?;
            let b = hex_byte(&hex[2..3].repeat(2))?;
            Some((r, g, b))
        }
        6 => Some((hex_byte(&hex[0..2])?, hex_byte(&hex[2..4])?, hex_byte(&hex[4..6])?)),
        _ => None,
    }
}

fn hex_byte(digits: &str) -> Option<u8> {
    match u8::from_str_radix(digits, 16) {
        Ok(v) => Some(v),
        Err(_) => None,
    }
}

/// Normalize a color to canonical lowercase `#rrggbb`.
#[must_use]
pub fn normalize_hex_color(value: &str, fallback: &str) -> String {
    let default_rgb = parse_hex_rgb(DEFAULT_COLOR).unwrap_or((255, 59, 48));
    let fallback_rgb = parse_hex_rgb(fallback).unwrap_or(default_rgb);
    let (r, g, b) = parse_hex_rgb(value).unwrap_or(fallback_rgb);
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// Black or white, whichever reads better on top of `background`.
#[must_use]
pub fn contrasting_text(background: &str) -> &'static str {
    let (r, g, b) = parse_hex_rgb(background).unwrap_or((0, 0, 0));
    let luma = 0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b);
    if luma > 186.0 { "#000000" } else { "#ffffff" }
}
