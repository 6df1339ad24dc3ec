use chatdeck_core::ChatSession;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::Block,
    Frame,
};

use crate::app::App;
use crate::events::{Action, ClickableRegion, Focus};
use crate::ui::views::{AgentRailView, ConversationView, TopicRailView};
use crate::ui::widgets::{Footer, HelpOverlay};

pub const AGENT_RAIL_WIDTH: u16 = 16;
pub const TOPIC_RAIL_WIDTH: u16 = 5;
pub const SEND_BUTTON_WIDTH: u16 = 10;

/// Screen regions for one terminal size. Rendering and mouse hit-testing
/// both derive from this, so they always agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub agent_rail: Rect,
    pub header: Rect,
    pub messages: Rect,
    pub input: Rect,
    pub send_button: Rect,
    pub topic_rail: Rect,
    pub footer: Rect,
}

impl ScreenLayout {
    pub fn compute(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(5), Constraint::Length(1)])
            .split(area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(AGENT_RAIL_WIDTH),
                Constraint::Min(20),
                Constraint::Length(TOPIC_RAIL_WIDTH),
            ])
            .split(rows[0]);

        let conversation = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(3),
            ])
            .split(columns[1]);

        let input_row = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(10), Constraint::Length(SEND_BUTTON_WIDTH)])
            .split(conversation[2]);

        Self {
            agent_rail: columns[0],
            header: conversation[0],
            messages: conversation[1],
            input: input_row[0],
            send_button: input_row[1],
            topic_rail: columns[2],
            footer: rows[1],
        }
    }

    pub fn clickable_regions(&self) -> Vec<ClickableRegion> {
        let mut regions: Vec<ClickableRegion> = AgentRailView::button_areas(self.agent_rail)
            .into_iter()
            .enumerate()
            .map(|(index, (agent, area))| {
                ClickableRegion::new(area, Action::SelectAgent(index), agent.name)
            })
            .collect();

        regions.push(ClickableRegion::new(self.send_button, Action::Send, "Send"));
        regions.push(ClickableRegion::new(
            self.input,
            Action::SetFocus(Focus::Input),
            "Message",
        ));
        regions
    }
}

pub struct MainLayout;

impl MainLayout {
    pub fn render(frame: &mut Frame, app: &App, session: &ChatSession) {
        let theme = app.current_theme();
        let size = frame.area();

        frame.render_widget(
            Block::default().style(
                Style::default()
                    .bg(theme.background())
                    .fg(theme.foreground()),
            ),
            size,
        );

        let layout = ScreenLayout::compute(size);

        AgentRailView::render(frame, layout.agent_rail, app, session);
        ConversationView::render(frame, &layout, app, session);
        TopicRailView::render(frame, layout.topic_rail, app);
        Footer::render(frame, layout.footer, app);

        if app.show_help {
            HelpOverlay::render(frame, size, theme);
        }
    }
}
