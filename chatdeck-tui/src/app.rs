use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chatdeck_core::{agents, ChatSession, ChatdeckConfig, ReplySimulator, SelectionChange, SharedSession};
use crossterm::event::{self, Event};
use ratatui::{backend::Backend, layout::Rect, Terminal};

use crate::events::{Action, EventHandler, Focus, InputBuffer, ScrollDirection};
use crate::theme::{Theme, ThemeLoader, ThemeManager};
use crate::ui::layout::{MainLayout, ScreenLayout};
use crate::ui::views::ConversationView;

pub struct App {
    pub should_quit: bool,
    pub session: SharedSession,
    pub simulator: ReplySimulator,
    pub input: InputBuffer,
    pub agent_cursor: usize,
    /// Rows scrolled back from the newest message; 0 follows the tail.
    pub scroll_offset: usize,
    pub show_help: bool,
    pub status_message: Option<String>,
    pub theme_manager: ThemeManager,
    pub theme_loader: ThemeLoader,
    pub event_handler: EventHandler,
    pub tick_rate: Duration,
}

impl App {
    pub fn new(config: &ChatdeckConfig, theme_loader: ThemeLoader) -> Self {
        let theme_manager = theme_loader.initialize_theme_manager(config.tui.theme.as_deref());

        Self {
            should_quit: false,
            session: ChatSession::shared(),
            simulator: ReplySimulator::from_config(&config.simulator),
            input: InputBuffer::new(),
            agent_cursor: 0,
            scroll_offset: 0,
            show_help: false,
            status_message: Some(format!(
                "Theme: {}. Pick an agent with Tab, F1 for help.",
                theme_manager.current_theme_name()
            )),
            theme_manager,
            theme_loader,
            event_handler: EventHandler::new(),
            tick_rate: config.tick_rate(),
        }
    }

    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            self.collect_replies();

            let size = terminal.size()?;
            let area = Rect::new(0, 0, size.width, size.height);
            self.refresh_clickable_regions(area);

            let session = Arc::clone(&self.session);
            let guard = session.read().await;
            self.clamp_scroll(&guard, area);
            terminal.draw(|frame| MainLayout::render(frame, self, &guard))?;
            drop(guard);

            if event::poll(self.tick_rate)? {
                let evt = event::read()?;
                self.handle_event(evt).await;
            }

            if self.should_quit {
                break;
            }
        }

        self.simulator.shutdown();
        Ok(())
    }

    pub async fn handle_event(&mut self, event: Event) {
        if let Some(action) = self.event_handler.handle_event(event) {
            self.execute_action(action).await;
        }
    }

    pub async fn execute_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::Back => {
                if self.show_help {
                    self.show_help = false;
                } else {
                    self.should_quit = true;
                }
            }
            Action::FocusNext | Action::FocusPrev | Action::SetFocus(_) => {
                self.status_message = Some(focus_hint(self.focus()).to_string());
            }
            Action::CursorUp => {
                self.agent_cursor = self.agent_cursor.saturating_sub(1);
            }
            Action::CursorDown => {
                let max_index = agents().len().saturating_sub(1);
                if self.agent_cursor < max_index {
                    self.agent_cursor += 1;
                }
            }
            Action::SelectUnderCursor => self.select_agent(self.agent_cursor).await,
            Action::SelectAgent(index) => self.select_agent(index).await,
            Action::Send => self.send().await,
            Action::InsertChar(c) => self.input.insert_char(c),
            Action::Paste(text) => self.input.insert_str(&text),
            Action::Backspace => self.input.delete_char(),
            Action::Delete => self.input.delete_char_forward(),
            Action::MoveLeft => self.input.move_cursor_left(),
            Action::MoveRight => self.input.move_cursor_right(),
            Action::MoveHome => self.input.move_cursor_start(),
            Action::MoveEnd => self.input.move_cursor_end(),
            Action::ClearInput => self.input.clear(),
            Action::Scroll { direction, lines } => match direction {
                ScrollDirection::Up => {
                    self.scroll_offset = self.scroll_offset.saturating_add(lines);
                }
                ScrollDirection::Down => {
                    self.scroll_offset = self.scroll_offset.saturating_sub(lines);
                }
            },
            Action::ToggleTheme => self.toggle_theme(),
            Action::ToggleHelp => self.show_help = !self.show_help,
        }
    }

    async fn select_agent(&mut self, index: usize) {
        let Some(agent) = agents().get(index) else {
            return;
        };
        self.agent_cursor = index;

        match self.session.write().await.select_agent(agent.id) {
            Ok(SelectionChange::Changed { .. }) => {
                self.status_message = Some(format!("Chatting with {}", agent.name));
            }
            Ok(SelectionChange::Unchanged) => {}
            Err(e) => tracing::warn!(code = e.code(), "Agent selection failed: {}", e),
        }
    }

    async fn send(&mut self) {
        if self.input.is_blank() {
            return;
        }

        let text = self.input.text().to_string();
        if self.simulator.send(&self.session, &text).await.is_some() {
            self.input.clear();
            self.scroll_offset = 0;
        }
    }

    fn collect_replies(&mut self) {
        for reply in self.simulator.reap_finished() {
            tracing::debug!(message_id = %reply.id, "Reply rendered");
        }
    }

    fn refresh_clickable_regions(&mut self, area: Rect) {
        self.event_handler.clear_clickable_regions();
        for region in ScreenLayout::compute(area).clickable_regions() {
            self.event_handler.register_clickable_region(region);
        }
    }

    fn clamp_scroll(&mut self, session: &ChatSession, area: Rect) {
        let max = ConversationView::max_scroll(session, ScreenLayout::compute(area).messages);
        self.scroll_offset = self.scroll_offset.min(max);
    }

    fn toggle_theme(&mut self) {
        self.theme_manager.cycle_theme();
        let theme_name = self.theme_manager.current_theme_name();
        if let Err(e) = self.theme_loader.save_theme_name(theme_name) {
            tracing::warn!("Failed to save theme preference: {:#}", e);
        }
        self.status_message = Some(format!("Theme changed to: {}", theme_name));
    }

    pub fn current_theme(&self) -> &dyn Theme {
        self.theme_manager.current_theme()
    }

    pub fn focus(&self) -> Focus {
        self.event_handler.focus()
    }
}

fn focus_hint(focus: Focus) -> &'static str {
    match focus {
        Focus::AgentRail => "Agents: j/k to move, Enter to select",
        Focus::Input => "Type a message and press Enter",
        Focus::TopicRail => "Topics",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatdeck_core::{Sender, HEADER_PLACEHOLDER};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{backend::TestBackend, buffer::Buffer};
    use tempfile::TempDir;

    fn test_app(dir: &TempDir) -> App {
        let loader = ThemeLoader::with_path(dir.path().join("theme.toml"));
        App::new(&ChatdeckConfig::default(), loader)
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    async fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_event(key(KeyCode::Char(c))).await;
        }
    }

    fn render_buffer(app: &App, width: u16, height: u16) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        let session = app.session.try_read().unwrap();
        terminal
            .draw(|frame| MainLayout::render(frame, app, &session))
            .unwrap();
        terminal.backend().buffer().clone()
    }

    fn render(app: &App, width: u16, height: u16) -> String {
        let buffer = render_buffer(app, width, height);
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    /// The topic rail's middle column, read top to bottom.
    fn topic_column(app: &App, width: u16, height: u16) -> String {
        let buffer = render_buffer(app, width, height);
        let rail = ScreenLayout::compute(Rect::new(0, 0, width, height)).topic_rail;
        let x = rail.x + rail.width / 2;
        (rail.y + 1..rail.bottom() - 1)
            .map(|y| buffer[(x, y)].symbol().to_string())
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_enter_sends_and_clears_input() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);

        type_text(&mut app, "hello").await;
        app.handle_event(key(KeyCode::Enter)).await;

        assert!(app.input.is_empty());
        {
            let session = app.session.read().await;
            assert_eq!(session.message_count(), 1);
            assert_eq!(session.messages()[0].text, "hello");
        }

        app.simulator.drain().await;
        let session = app.session.read().await;
        let reply = session.last_message().unwrap();
        assert_eq!(reply.sender, Sender::Bot);
        assert_eq!(reply.text, "This is a response from the bot");
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_input_is_kept_and_not_sent() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);

        type_text(&mut app, "   ").await;
        app.execute_action(Action::Send).await;

        assert_eq!(app.input.text(), "   ");
        assert_eq!(app.session.read().await.message_count(), 0);
        assert_eq!(app.simulator.pending_replies(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_select_agent_from_rail() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);

        app.handle_event(key(KeyCode::BackTab)).await;
        assert_eq!(app.focus(), Focus::AgentRail);

        app.handle_event(key(KeyCode::Char('j'))).await;
        app.handle_event(key(KeyCode::Enter)).await;
        assert_eq!(
            app.session.read().await.selected_agent().map(|a| a.id),
            Some("athena")
        );

        app.handle_event(key(KeyCode::Enter)).await;
        assert_eq!(
            app.session.read().await.selected_agent().map(|a| a.id),
            Some("athena")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_click_on_avatar_and_send_button() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);
        let area = Rect::new(0, 0, 100, 30);
        app.refresh_clickable_regions(area);

        let layout = ScreenLayout::compute(area);
        let (_, mark_button) =
            crate::ui::views::AgentRailView::button_areas(layout.agent_rail)[0];

        app.execute_action(Action::SelectAgent(0)).await;
        type_text(&mut app, "hi").await;

        let region = app
            .event_handler
            .clickable_regions()
            .iter()
            .find(|r| r.area == mark_button)
            .map(|r| r.action.clone());
        assert_eq!(region, Some(Action::SelectAgent(0)));

        let click = Event::Mouse(crossterm::event::MouseEvent {
            kind: crossterm::event::MouseEventKind::Down(crossterm::event::MouseButton::Left),
            column: layout.send_button.x + 1,
            row: layout.send_button.y + 1,
            modifiers: KeyModifiers::NONE,
        });
        app.handle_event(click).await;
        app.simulator.drain().await;

        let session = app.session.read().await;
        assert_eq!(session.message_count(), 2);
        assert_eq!(
            session.last_message().unwrap().text,
            "This is a response from Mark"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_escape_closes_help_before_quitting() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);

        app.handle_event(key(KeyCode::F(1))).await;
        assert!(app.show_help);

        app.handle_event(key(KeyCode::Esc)).await;
        assert!(!app.show_help);
        assert!(!app.should_quit);

        app.handle_event(key(KeyCode::Esc)).await;
        assert!(app.should_quit);
    }

    #[tokio::test(start_paused = true)]
    async fn test_theme_toggle_is_persisted() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);

        app.execute_action(Action::ToggleTheme).await;
        assert_eq!(app.theme_manager.current_theme_name(), "Slate Dark");

        let reloaded = ThemeLoader::with_path(dir.path().join("theme.toml"))
            .initialize_theme_manager(None);
        assert_eq!(reloaded.current_theme_name(), "Slate Dark");
    }

    #[tokio::test(start_paused = true)]
    async fn test_render_placeholder_and_agents() {
        let dir = TempDir::new().unwrap();
        let app = test_app(&dir);

        let screen = render(&app, 100, 60);
        assert!(screen.contains(HEADER_PLACEHOLDER));
        assert!(screen.contains("Type your message..."));
        assert!(screen.contains("Mark"));
        assert!(screen.contains("Athena"));
        assert!(screen.contains("Send"));

        let small = render(&app, 80, 24);
        assert!(small.contains("Athena"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_render_topic_rail_in_full_when_tall() {
        let dir = TempDir::new().unwrap();
        let app = test_app(&dir);

        let column = topic_column(&app, 100, 60);
        for topic in chatdeck_core::topics() {
            let rotated: String = topic.label().chars().rev().collect();
            assert!(column.contains(&rotated), "{} missing from {column:?}", topic.label());
        }
        assert!(!column.contains('…'));

        // 47 rows: stacked back to back, still whole
        let column = topic_column(&app, 100, 50);
        assert!(column.starts_with("muroF erffO yrotsiH"));
        assert!(column.contains("sweN"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_render_topic_rail_marks_cut_labels_when_short() {
        let dir = TempDir::new().unwrap();
        let app = test_app(&dir);

        assert_eq!(
            topic_column(&app, 80, 24),
            "…oF …O …H …T …V …S …N"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_render_wide_characters_without_clipping() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);

        let text = format!("{}終", "日本語のメッセージです".repeat(5));
        type_text(&mut app, &text).await;
        app.execute_action(Action::Send).await;

        let screen = render(&app, 100, 30);
        let rows: Vec<String> = screen.lines().map(|line| line.replace(' ', "")).collect();

        let thread = ScreenLayout::compute(Rect::new(0, 0, 100, 30)).messages;
        let session = app.session.read().await;
        let bubble = ConversationView::bubble_rows(&session.messages()[0], thread.width - 2);
        assert!(bubble.len() > 1);
        for row in &bubble {
            let glyphs = row.trim();
            assert!(
                rows.iter().any(|line| line.contains(glyphs)),
                "{glyphs} not on screen"
            );
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_render_header_and_messages() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);

        app.execute_action(Action::SelectAgent(1)).await;
        type_text(&mut app, "hi there").await;
        app.execute_action(Action::Send).await;
        app.simulator.drain().await;

        let screen = render(&app, 100, 30);
        assert!(!screen.contains(HEADER_PLACEHOLDER));
        assert!(screen.contains("hi there"));
        assert!(screen.contains("This is a response from Athena"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_scroll_is_clamped_to_transcript() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);

        app.execute_action(Action::Scroll {
            direction: ScrollDirection::Up,
            lines: 50,
        })
        .await;

        let session = Arc::clone(&app.session);
        let guard = session.read().await;
        app.clamp_scroll(&guard, Rect::new(0, 0, 100, 30));
        assert_eq!(app.scroll_offset, 0);
    }
}
