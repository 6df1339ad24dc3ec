use chatdeck_core::{ChatSession, Message, HEADER_PLACEHOLDER};
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::App;
use crate::events::Focus;
use crate::theme::ThemedStyles;
use crate::ui::layout::ScreenLayout;
use crate::ui::utils::{pad_to_width, wrap_text};

pub const INPUT_PLACEHOLDER: &str = "Type your message...";

/// Bubbles take at most this share of the thread width.
const BUBBLE_WIDTH_PERCENT: usize = 70;

pub struct ConversationView;

impl ConversationView {
    pub fn render(frame: &mut Frame, layout: &ScreenLayout, app: &App, session: &ChatSession) {
        Self::render_header(frame, layout.header, app, session);
        Self::render_messages(frame, layout.messages, app, session);
        Self::render_input(frame, layout.input, app);
        Self::render_send_button(frame, layout.send_button, app);
    }

    fn render_header(frame: &mut Frame, area: Rect, app: &App, session: &ChatSession) {
        let styles = ThemedStyles::new(app.current_theme());

        let line = match session.selected_agent() {
            Some(agent) => Line::from(vec![
                Span::styled(format!(" {} ", agent.initial()), styles.avatar(true)),
                Span::raw(" "),
                Span::styled(agent.name, styles.title()),
                Span::styled(format!("  {}", agent.avatar), styles.dimmed()),
            ]),
            None => Line::from(Span::styled(HEADER_PLACEHOLDER, styles.dimmed())),
        };

        let header = Paragraph::new(line).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(styles.border())
                .style(styles.surface()),
        );
        frame.render_widget(header, area);
    }

    fn messages_block() -> Block<'static> {
        Block::default().borders(Borders::LEFT | Borders::RIGHT)
    }

    /// Rows of one bubble, each padded to the bubble's width plus one space
    /// on either side.
    pub fn bubble_rows(message: &Message, thread_width: u16) -> Vec<String> {
        let max_width = (thread_width as usize * BUBBLE_WIDTH_PERCENT / 100)
            .saturating_sub(2)
            .max(1);
        let rows = wrap_text(&message.text, max_width);
        let width = rows.iter().map(|r| r.width()).max().unwrap_or(0);

        rows.iter()
            .map(|row| format!(" {} ", pad_to_width(row, width)))
            .collect()
    }

    pub fn transcript_lines(
        session: &ChatSession,
        thread_width: u16,
        styles: &ThemedStyles,
    ) -> Vec<Line<'static>> {
        let mut lines = Vec::new();

        for (index, message) in session.messages().iter().enumerate() {
            if index > 0 {
                lines.push(Line::raw(""));
            }

            let (style, alignment) = if message.is_user() {
                (styles.user_bubble(), Alignment::Right)
            } else {
                (styles.bot_bubble(), Alignment::Left)
            };

            lines.extend(
                Self::bubble_rows(message, thread_width)
                    .into_iter()
                    .map(|row| Line::from(Span::styled(row, style)).alignment(alignment)),
            );
        }

        lines
    }

    pub fn line_count(session: &ChatSession, thread_width: u16) -> usize {
        let bubbles: usize = session
            .messages()
            .iter()
            .map(|m| Self::bubble_rows(m, thread_width).len())
            .sum();
        bubbles + session.message_count().saturating_sub(1)
    }

    /// Largest scroll-back offset for the thread area.
    pub fn max_scroll(session: &ChatSession, area: Rect) -> usize {
        let inner = Self::messages_block().inner(area);
        Self::line_count(session, inner.width).saturating_sub(inner.height as usize)
    }

    fn render_messages(frame: &mut Frame, area: Rect, app: &App, session: &ChatSession) {
        let styles = ThemedStyles::new(app.current_theme());
        let block = Self::messages_block()
            .border_style(styles.border())
            .style(styles.base());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines = Self::transcript_lines(session, inner.width, &styles);
        let height = inner.height as usize;
        let offset = app
            .scroll_offset
            .min(lines.len().saturating_sub(height));
        let end = lines.len() - offset;
        let start = end.saturating_sub(height);

        frame.render_widget(Paragraph::new(lines[start..end].to_vec()), inner);
    }

    fn render_input(frame: &mut Frame, area: Rect, app: &App) {
        let styles = ThemedStyles::new(app.current_theme());
        let focused = app.focus() == Focus::Input;

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(styles.border_for(focused))
            .style(styles.surface());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if inner.width == 0 {
            return;
        }

        let (visible, cursor_col) =
            Self::input_window(app.input.text(), app.input.cursor(), inner.width as usize);

        let line = if app.input.is_empty() {
            Line::from(Span::styled(INPUT_PLACEHOLDER, styles.dimmed()))
        } else {
            Line::raw(visible)
        };
        frame.render_widget(Paragraph::new(line), inner);

        if focused && !app.show_help {
            frame.set_cursor_position((inner.x + cursor_col as u16, inner.y));
        }
    }

    /// The part of the input shown in `width` cells and the cursor's column
    /// in it. Scrolls right just far enough to keep the cursor visible.
    pub fn input_window(text: &str, cursor: usize, width: usize) -> (String, usize) {
        let chars: Vec<char> = text.chars().collect();
        let cell = |c: &char| c.width().unwrap_or(0);

        let mut cursor_col: usize = chars.iter().take(cursor).map(cell).sum();
        let mut start = 0;
        while cursor_col > width.saturating_sub(1) && start < cursor {
            cursor_col -= cell(&chars[start]);
            start += 1;
        }

        let mut used = 0;
        let visible = chars[start..]
            .iter()
            .take_while(|c| {
                used += cell(*c);
                used <= width
            })
            .collect();

        (visible, cursor_col)
    }

    fn render_send_button(frame: &mut Frame, area: Rect, app: &App) {
        let styles = ThemedStyles::new(app.current_theme());

        let button = Paragraph::new(Line::from("Send ➤"))
            .alignment(Alignment::Center)
            .style(styles.button())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(styles.border()),
            );
        frame.render_widget(button, area);
    }
}
