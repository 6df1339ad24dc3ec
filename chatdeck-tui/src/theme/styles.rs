use ratatui::style::{Modifier, Style};

use super::Theme;

pub struct ThemedStyles<'a> {
    theme: &'a dyn Theme,
}

impl<'a> ThemedStyles<'a> {
    pub fn new(theme: &'a dyn Theme) -> Self {
        Self { theme }
    }

    pub fn base(&self) -> Style {
        Style::default()
            .bg(self.theme.background())
            .fg(self.theme.foreground())
    }

    pub fn surface(&self) -> Style {
        Style::default()
            .bg(self.theme.surface())
            .fg(self.theme.foreground())
    }

    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.theme.foreground())
            .add_modifier(Modifier::BOLD)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.theme.border())
    }

    pub fn border_focused(&self) -> Style {
        Style::default()
            .fg(self.theme.accent())
            .add_modifier(Modifier::BOLD)
    }

    pub fn border_for(&self, focused: bool) -> Style {
        if focused {
            self.border_focused()
        } else {
            self.border()
        }
    }

    pub fn dimmed(&self) -> Style {
        Style::default().fg(self.theme.foreground_dim())
    }

    pub fn accent(&self) -> Style {
        Style::default().fg(self.theme.accent())
    }

    pub fn keybind(&self) -> Style {
        Style::default()
            .fg(self.theme.accent())
            .add_modifier(Modifier::BOLD)
    }

    pub fn user_bubble(&self) -> Style {
        Style::default()
            .bg(self.theme.accent())
            .fg(self.theme.accent_foreground())
    }

    pub fn bot_bubble(&self) -> Style {
        Style::default()
            .bg(self.theme.surface())
            .fg(self.theme.foreground())
    }

    pub fn avatar(&self, selected: bool) -> Style {
        if selected {
            Style::default()
                .bg(self.theme.accent())
                .fg(self.theme.accent_foreground())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .bg(self.theme.selection())
                .fg(self.theme.foreground())
        }
    }

    pub fn button(&self) -> Style {
        Style::default()
            .bg(self.theme.accent())
            .fg(self.theme.accent_foreground())
            .add_modifier(Modifier::BOLD)
    }
}
