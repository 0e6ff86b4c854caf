//! Color parsing and formatting for the screen fill.
//!
//! Colors are plain `0xRRGGBB` values.

/// Parse a color string into `0xRRGGBB`.
///
/// Accepts:
/// - Hex: `"#FFFFFF"`, `"444444"`, `"#ffcc00"`
/// - Named: `"white"`, `"darkgray"`/`"dkgray"`, `"gray"`, `"black"`, `"red"`, `"yellow"`, `"orange"`
pub fn parse_color(s: &str) -> crate::error::Result<u32> {
    let s = s.trim();

    match s.to_lowercase().as_str() {
        "white" => return Ok(0xFFFFFF),
        "darkgray" | "darkgrey" | "dkgray" => return Ok(0x444444),
        "gray" | "grey" => return Ok(0x888888),
        "black" => return Ok(0x000000),
        "red" => return Ok(0xFF0000),
        "yellow" => return Ok(0xFFFF00),
        "orange" => return Ok(0xFF8000),
        _ => {}
    }

    let hex = s.strip_prefix('#').unwrap_or(s);
    if hex.len() != 6 {
        return Err(crate::LatorciaError::Color(format!(
            "Invalid color: {s} (use #RRGGBB or a color name)"
        )));
    }
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(crate::LatorciaError::Color(format!("Invalid hex color: {s}")));
    }
    u32::from_str_radix(hex, 16)
        .map_err(|_| crate::LatorciaError::Color(format!("Invalid hex color: {s}")))
}

/// Format a color value as `#RRGGBB`.
pub fn format_color(val: u32) -> String {
    format!("#{:06X}", val & 0xFF_FFFF)
}

/// Split a color value into its `(r, g, b)` channels.
pub fn rgb(val: u32) -> (u8, u8, u8) {
    (
        ((val >> 16) & 0xFF) as u8,
        ((val >> 8) & 0xFF) as u8,
        (val & 0xFF) as u8,
    )
}
