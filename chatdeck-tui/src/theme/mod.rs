mod loader;
mod palettes;
mod styles;

pub use loader::{ThemeConfig, ThemeLoader};
pub use palettes::{hex_to_color, Palette, MIDNIGHT, SLATE_DARK, SLATE_LIGHT};
pub use styles::ThemedStyles;

use ratatui::style::Color;

pub trait Theme: Send + Sync {
    fn name(&self) -> &'static str;

    fn background(&self) -> Color;
    fn foreground(&self) -> Color;
    fn foreground_dim(&self) -> Color;

    fn surface(&self) -> Color;
    fn border(&self) -> Color;
    fn selection(&self) -> Color;

    fn accent(&self) -> Color;
    fn accent_foreground(&self) -> Color;
}

pub struct ThemeManager {
    themes: Vec<&'static Palette>,
    current_index: usize,
}

impl ThemeManager {
    pub fn new() -> Self {
        Self {
            themes: vec![&SLATE_LIGHT, &SLATE_DARK, &MIDNIGHT],
            current_index: 0,
        }
    }

    pub fn current_theme(&self) -> &dyn Theme {
        self.themes[self.current_index]
    }

    pub fn cycle_theme(&mut self) {
        self.current_index = (self.current_index + 1) % self.themes.len();
    }

    pub fn set_theme_by_name(&mut self, name: &str) -> bool {
        if let Some(index) = self
            .themes
            .iter()
            .position(|t| t.name().eq_ignore_ascii_case(name))
        {
            self.current_index = index;
            true
        } else {
            false
        }
    }

    pub fn available_themes(&self) -> Vec<&'static str> {
        self.themes.iter().map(|t| t.name()).collect()
    }

    pub fn current_theme_name(&self) -> &'static str {
        self.current_theme().name()
    }
}

impl Default for ThemeManager {
    fn default() -> Self {
        Self::new()
    }
}
