use super::*;

#[test]
fn parse_hex_rgb_supports_short_and_long_forms() {
    assert_eq!(parse_hex_rgb("#ABC"), Some((170, 187, 204)));
    assert_eq!(parse_hex_rgb("  #a1B2c3 "), Some((161, 178, 195)));
}

#[test]
fn parse_hex_rgb_rejects_invalid_inputs() {
    assert_eq!(parse_hex_rgb("AABBCC"), None);
    assert_eq!(parse_hex_rgb("#12"), None);
    assert_eq!(parse_hex_rgb("#abcd"), None);
    assert_eq!(parse_hex_rgb("#12GG34"), None);
    assert_eq!(parse_hex_rgb("#ééé"), None);
}

#[test]
fn normalize_hex_color_uses_canonical_lowercase() {
    assert_eq!(normalize_hex_color("#ABC", "#000000"), "#aabbcc");
    assert_eq!(normalize_hex_color("#A1B2C3", "#000000"), "#a1b2c3");
}

#[test]
fn normalize_hex_color_falls_back_to_fallback_then_default() {
    assert_eq!(normalize_hex_color("blue", "#00ff00"), "#00ff00");
    assert_eq!(normalize_hex_color("blue", "invalid"), DEFAULT_COLOR);
}

#[test]
fn contrasting_text_picks_white_on_dark_and_black_on_light() {
    assert_eq!(contrasting_text("#ff3b30"), "#ffffff");
    assert_eq!(contrasting_text("#000000"), "#ffffff");
    assert_eq!(contrasting_text("#ffff00"), "#000000");
    assert_eq!(contrasting_text("#ffffff"), "#000000");
}
