// Named colours and the default per-cell colour cycle

use plotters::style::RGBColor;

/// Category10 names, in cycle order (D3-inspired)
const CATEGORY10: [&str; 10] = [
    "blue", "orange", "green", "red", "purple", "brown", "pink", "gray", "olive", "cyan",
];

/// Colour palette for grid cells
pub struct ColorPalette {
    colors: Vec<String>,
}

impl ColorPalette {
    /// Create a Category10 colour palette
    pub fn category10() -> Self {
        ColorPalette {
            colors: CATEGORY10.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// Colour name for a specific index (wraps around if index > palette size)
    pub fn get_color(&self, index: usize) -> String {
        self.colors[index % self.colors.len()].clone()
    }

    /// Resolved colour for a specific index
    pub fn rgb(&self, index: usize) -> RGBColor {
        parse_color(&self.get_color(index)).unwrap_or(RGBColor(0, 0, 0))
    }
}

/// Parse a colour name or `#rrggbb` hex string.
pub fn parse_color(name: &str) -> Option<RGBColor> {
    let name = name.trim();
    if let Some(hex) = name.strip_prefix('#') {
        return parse_hex(hex);
    }
    let rgb = match name.to_ascii_lowercase().as_str() {
        // category10
        "blue" => RGBColor(0x1f, 0x77, 0xb4),
        "orange" => RGBColor(0xff, 0x7f, 0x0e),
        "green" => RGBColor(0x2c, 0xa0, 0x2c),
        "red" => RGBColor(0xd6, 0x27, 0x28),
        "purple" => RGBColor(0x94, 0x67, 0xbd),
        "brown" => RGBColor(0x8c, 0x56, 0x4b),
        "pink" => RGBColor(0xe3, 0x77, 0xc2),
        "gray" | "grey" => RGBColor(0x7f, 0x7f, 0x7f),
        "olive" => RGBColor(0xbc, 0xbd, 0x22),
        "cyan" => RGBColor(0x17, 0xbe, 0xcf),
        // extras
        "black" => RGBColor(0, 0, 0),
        "white" => RGBColor(255, 255, 255),
        "yellow" => RGBColor(255, 215, 0),
        "magenta" => RGBColor(255, 0, 255),
        _ => return None,
    };
    Some(rgb)
}

fn parse_hex(hex: &str) -> Option<RGBColor> {
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(RGBColor(channel(0)?, channel(2)?, channel(4)?))
}
