use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::theme::{Theme, ThemedStyles};
use crate::ui::utils::centered_rect;

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Anywhere",
        &[
            ("Tab / Shift+Tab", "Move focus between columns"),
            ("PgUp / PgDn", "Scroll the conversation"),
            ("Mouse", "Click an avatar or Send, wheel to scroll"),
            ("F1", "Toggle this help"),
            ("Esc / Ctrl+C", "Quit"),
        ],
    ),
    (
        "Message field",
        &[
            ("Enter", "Send the message"),
            ("←/→ Home/End", "Move the cursor"),
            ("Ctrl+U", "Clear the field"),
        ],
    ),
    (
        "Agent rail",
        &[
            ("j/k ↑/↓", "Move between agents"),
            ("Enter / Space", "Select the agent"),
            ("1-9", "Select by position"),
            ("i", "Back to the message field"),
            ("t", "Cycle theme"),
        ],
    ),
];

pub struct HelpOverlay;

impl HelpOverlay {
    pub fn lines(styles: &ThemedStyles) -> Vec<Line<'static>> {
        let mut lines = Vec::new();

        for (index, (title, entries)) in SECTIONS.iter().enumerate() {
            if index > 0 {
                lines.push(Line::raw(""));
            }
            lines.push(Line::from(Span::styled(*title, styles.title())));
            for (key, desc) in entries.iter() {
                lines.push(Line::from(vec![
                    Span::styled(format!("  {key:<18}"), styles.keybind()),
                    Span::styled(*desc, styles.dimmed()),
                ]));
            }
        }

        lines
    }

    pub fn render(frame: &mut Frame, screen: Rect, theme: &dyn Theme) {
        let styles = ThemedStyles::new(theme);
        let area = centered_rect(60, 70, screen);

        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(Self::lines(&styles)).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Help ")
                    .title_style(styles.title())
                    .border_style(styles.border_focused())
                    .style(styles.surface()),
            ),
            area,
        );
    }
}
