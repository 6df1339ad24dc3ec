use ratatui::style::Color;

use super::Theme;

/// A named set of colors. Every built-in theme is a `Palette` constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub name: &'static str,
    pub background: Color,
    pub foreground: Color,
    pub foreground_dim: Color,
    pub surface: Color,
    pub border: Color,
    pub selection: Color,
    pub accent: Color,
    pub accent_foreground: Color,
}

pub const fn hex_to_color(hex: u32) -> Color {
    let r = ((hex >> 16) & 0xFF) as u8;
    let g = ((hex >> 8) & 0xFF) as u8;
    let b = (hex & 0xFF) as u8;
    Color::Rgb(r, g, b)
}

// Light slate surfaces with a blue accent.
pub const SLATE_LIGHT: Palette = Palette {
    name: "Slate Light",
    background: hex_to_color(0xf8fafc),
    foreground: hex_to_color(0x1e293b),
    foreground_dim: hex_to_color(0x64748b),
    surface: hex_to_color(0xffffff),
    border: hex_to_color(0xe2e8f0),
    selection: hex_to_color(0xbfdbfe),
    accent: hex_to_color(0x2563eb),
    accent_foreground: hex_to_color(0xffffff),
};

pub const SLATE_DARK: Palette = Palette {
    name: "Slate Dark",
    background: hex_to_color(0x0f172a),
    foreground: hex_to_color(0xe2e8f0),
    foreground_dim: hex_to_color(0x94a3b8),
    surface: hex_to_color(0x1e293b),
    border: hex_to_color(0x334155),
    selection: hex_to_color(0x1e3a8a),
    accent: hex_to_color(0x3b82f6),
    accent_foreground: hex_to_color(0xf8fafc),
};

pub const MIDNIGHT: Palette = Palette {
    name: "Midnight",
    background: hex_to_color(0x000000),
    foreground: hex_to_color(0xf5f5f5),
    foreground_dim: hex_to_color(0x9e9e9e),
    surface: hex_to_color(0x121212),
    border: hex_to_color(0x424242),
    selection: hex_to_color(0x311b92),
    accent: hex_to_color(0x7c4dff),
    accent_foreground: hex_to_color(0xffffff),
};

impl Theme for Palette {
    fn name(&self) -> &'static str {
        self.name
    }

    fn background(&self) -> Color {
        self.background
    }

    fn foreground(&self) -> Color {
        self.foreground
    }

    fn foreground_dim(&self) -> Color {
        self.foreground_dim
    }

    fn surface(&self) -> Color {
        self.surface
    }

    fn border(&self) -> Color {
        self.border
    }

    fn selection(&self) -> Color {
        self.selection
    }

    fn accent(&self) -> Color {
        self.accent
    }

    fn accent_foreground(&self) -> Color {
        self.accent_foreground
    }
}
