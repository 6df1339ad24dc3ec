use chatdeck_core::{agents, Agent, ChatSession};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::events::Focus;
use crate::theme::ThemedStyles;
use crate::ui::utils::truncate_to_width;

const BUTTON_HEIGHT: u16 = 3;
const BUTTON_GAP: u16 = 1;

pub struct AgentRailView;

impl AgentRailView {
    fn block() -> Block<'static> {
        Block::default().borders(Borders::ALL).title(" Agents ")
    }

    /// One button per catalog agent, top to bottom. Buttons that do not fit
    /// the rail are left out.
    pub fn button_areas(area: Rect) -> Vec<(&'static Agent, Rect)> {
        let inner = Self::block().inner(area);

        agents()
            .iter()
            .enumerate()
            .filter_map(|(index, agent)| {
                let y = inner.y + 1 + index as u16 * (BUTTON_HEIGHT + BUTTON_GAP);
                if y + BUTTON_HEIGHT > inner.bottom() || inner.width < 3 {
                    return None;
                }
                Some((
                    agent,
                    Rect::new(inner.x + 1, y, inner.width - 2, BUTTON_HEIGHT),
                ))
            })
            .collect()
    }

    /// Cells left for the name once the border and avatar glyph are drawn.
    pub fn name_width(button: Rect) -> usize {
        button.width.saturating_sub(6) as usize
    }

    pub fn render(frame: &mut Frame, area: Rect, app: &App, session: &ChatSession) {
        let theme = app.current_theme();
        let styles = ThemedStyles::new(theme);
        let focused = app.focus() == Focus::AgentRail;

        let block = Self::block()
            .border_style(styles.border_for(focused))
            .title_style(styles.title())
            .style(styles.surface());
        frame.render_widget(block, area);

        let selected_id = session.selected_agent().map(|a| a.id);

        for (index, (agent, button)) in Self::button_areas(area).into_iter().enumerate() {
            let selected = selected_id == Some(agent.id);
            let under_cursor = focused && app.agent_cursor == index;

            let (border_type, border_style) = if selected {
                (BorderType::Thick, styles.border_focused())
            } else if under_cursor {
                (BorderType::Double, styles.accent())
            } else {
                (BorderType::Rounded, styles.border())
            };

            let name_width = Self::name_width(button);
            let content = Line::from(vec![
                Span::styled(format!(" {} ", agent.initial()), styles.avatar(selected)),
                Span::raw(" "),
                Span::styled(truncate_to_width(agent.name, name_width), styles.title()),
            ]);

            let widget = Paragraph::new(content).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(border_type)
                    .border_style(border_style),
            );
            frame.render_widget(widget, button);
        }
    }
}
