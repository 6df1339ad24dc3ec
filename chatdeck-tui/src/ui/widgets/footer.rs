use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::events::Focus;
use crate::theme::ThemedStyles;

pub struct Footer;

impl Footer {
    pub fn keybinds(focus: Focus) -> &'static [(&'static str, &'static str)] {
        match focus {
            Focus::Input => &[
                ("Enter", "Send"),
                ("Tab", "Focus"),
                ("PgUp/PgDn", "Scroll"),
                ("F1", "Help"),
                ("Esc", "Quit"),
            ],
            Focus::AgentRail => &[
                ("j/k", "Move"),
                ("Enter", "Select"),
                ("Tab", "Focus"),
                ("t", "Theme"),
                ("q", "Quit"),
            ],
            Focus::TopicRail => &[("Tab", "Focus"), ("t", "Theme"), ("?", "Help"), ("q", "Quit")],
        }
    }

    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let styles = ThemedStyles::new(app.current_theme());

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(area);

        let keybind_spans: Vec<Span> = Self::keybinds(app.focus())
            .iter()
            .flat_map(|(key, desc)| {
                vec![
                    Span::styled(format!(" {key}"), styles.keybind()),
                    Span::styled(format!(":{desc} "), styles.dimmed()),
                ]
            })
            .collect();

        frame.render_widget(
            Paragraph::new(Line::from(keybind_spans)).style(styles.surface()),
            chunks[0],
        );

        let status = app.status_message.as_deref().unwrap_or("Ready");
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(status, styles.dimmed())))
                .alignment(Alignment::Right)
                .style(styles.surface()),
            chunks[1],
        );
    }
}
