//! Named colors for the LED matrix.
//!
//! Colors are plain 8-bit RGB triples. The Sense HAT framebuffer stores
//! RGB565, so each channel is truncated to its top 5 (red, blue) or
//! 6 (green) bits on the way out.

/// An RGB triple, 0-255 per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Pack into RGB565.
    pub fn to_rgb565(self) -> u16 {
        let r = (self.r >> 3) as u16 & 0x1F;
        let g = (self.g >> 2) as u16 & 0x3F;
        let b = (self.b >> 3) as u16 & 0x1F;
        (r << 11) | (g << 5) | b
    }
}

pub const RED: Rgb = Rgb::new(255, 0, 0);
pub const GREEN: Rgb = Rgb::new(0, 255, 0);
pub const BLUE: Rgb = Rgb::new(0, 0, 255);
pub const YELLOW: Rgb = Rgb::new(255, 255, 0);
pub const AQUA: Rgb = Rgb::new(0, 255, 255);
pub const PURPLE: Rgb = Rgb::new(255, 0, 255);
pub const WHITE: Rgb = Rgb::new(255, 255, 255);
pub const BLACK: Rgb = Rgb::new(0, 0, 0);
pub const GREY: Rgb = Rgb::new(128, 128, 128);

/// Lookup table from color name to RGB.
#[derive(Debug, Clone, Copy)]
pub struct ColorPalette {
    entries: &'static [(&'static str, Rgb)],
}

const DEFAULT_ENTRIES: &[(&str, Rgb)] = &[
    ("red", RED),
    ("green", GREEN),
    ("blue", BLUE),
    ("yellow", YELLOW),
    ("aqua", AQUA),
    ("purple", PURPLE),
    ("white", WHITE),
    ("black", BLACK),
    ("grey", GREY),
];

impl Default for ColorPalette {
    fn default() -> Self {
        Self {
            entries: DEFAULT_ENTRIES,
        }
    }
}

impl ColorPalette {
    /// Look up a color by name, ignoring case.
    pub fn get(&self, name: &str) -> Option<Rgb> {
        self.entries
            .iter()
            .find(|(entry, _)| entry.eq_ignore_ascii_case(name))
            .map(|(_, rgb)| *rgb)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }
}

/// Foreground and background colors used when scrolling text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextColors {
    pub foreground: Rgb,
    pub background: Rgb,
}

impl TextColors {
    pub const fn new(foreground: Rgb, background: Rgb) -> Self {
        Self {
            foreground,
            background,
        }
    }
}

impl Default for TextColors {
    /// White text on black, the driver's default.
    fn default() -> Self {
        Self::new(WHITE, BLACK)
    }
}
