use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

/// The three columns, in Tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    AgentRail,
    Input,
    TopicRail,
}

impl Focus {
    pub fn next(&self) -> Focus {
        match self {
            Focus::AgentRail => Focus::Input,
            Focus::Input => Focus::TopicRail,
            Focus::TopicRail => Focus::AgentRail,
        }
    }

    pub fn prev(&self) -> Focus {
        match self {
            Focus::AgentRail => Focus::TopicRail,
            Focus::Input => Focus::AgentRail,
            Focus::TopicRail => Focus::Input,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    Back,
    FocusNext,
    FocusPrev,
    SetFocus(Focus),
    CursorUp,
    CursorDown,
    SelectAgent(usize),
    SelectUnderCursor,
    Send,
    InsertChar(char),
    Paste(String),
    Backspace,
    Delete,
    MoveLeft,
    MoveRight,
    MoveHome,
    MoveEnd,
    ClearInput,
    Scroll { direction: ScrollDirection, lines: usize },
    ToggleTheme,
    ToggleHelp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

#[derive(Debug, Clone)]
pub struct ClickableRegion {
    pub area: Rect,
    pub action: Action,
    pub label: String,
}

impl ClickableRegion {
    pub fn new(area: Rect, action: Action, label: impl Into<String>) -> Self {
        Self {
            area,
            action,
            label: label.into(),
        }
    }

    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.area.x
            && x < self.area.x + self.area.width
            && y >= self.area.y
            && y < self.area.y + self.area.height
    }
}

/// Turns terminal events into [`Action`]s. Key meaning depends on which
/// column has focus.
pub struct EventHandler {
    focus: Focus,
    clickable_regions: Vec<ClickableRegion>,
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler {
    pub fn new() -> Self {
        Self {
            focus: Focus::Input,
            clickable_regions: Vec::new(),
        }
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
    }

    pub fn register_clickable_region(&mut self, region: ClickableRegion) {
        self.clickable_regions.push(region);
    }

    pub fn clear_clickable_regions(&mut self) {
        self.clickable_regions.clear();
    }

    pub fn clickable_regions(&self) -> &[ClickableRegion] {
        &self.clickable_regions
    }

    pub fn handle_event(&mut self, event: Event) -> Option<Action> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Key(_) => None,
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Paste(text) if self.focus == Focus::Input => Some(Action::Paste(text)),
            // the layout is recomputed from the terminal size every frame
            Event::Resize(..) | Event::FocusGained | Event::FocusLost | Event::Paste(_) => None,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        let ctrl_pressed = key.modifiers.contains(KeyModifiers::CONTROL);

        match (key.code, ctrl_pressed) {
            (KeyCode::Char('c'), true) => return Some(Action::Quit),
            (KeyCode::Esc, _) => return Some(Action::Back),
            (KeyCode::F(1), _) => return Some(Action::ToggleHelp),
            (KeyCode::Tab, _) => {
                self.focus = self.focus.next();
                return Some(Action::FocusNext);
            }
            (KeyCode::BackTab, _) => {
                self.focus = self.focus.prev();
                return Some(Action::FocusPrev);
            }
            (KeyCode::PageUp, _) => {
                return Some(Action::Scroll {
                    direction: ScrollDirection::Up,
                    lines: 10,
                })
            }
            (KeyCode::PageDown, _) => {
                return Some(Action::Scroll {
                    direction: ScrollDirection::Down,
                    lines: 10,
                })
            }
            _ => {}
        }

        match self.focus {
            Focus::Input => self.handle_input_key(key),
            Focus::AgentRail => self.handle_agent_rail_key(key),
            Focus::TopicRail => self.handle_rail_key(key),
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) -> Option<Action> {
        let ctrl_pressed = key.modifiers.contains(KeyModifiers::CONTROL);

        match (key.code, ctrl_pressed) {
            (KeyCode::Enter, _) => Some(Action::Send),
            (KeyCode::Char('u'), true) => Some(Action::ClearInput),
            (KeyCode::Char('a'), true) => Some(Action::MoveHome),
            (KeyCode::Char('e'), true) => Some(Action::MoveEnd),
            (KeyCode::Char(_), true) => None,
            (KeyCode::Char(c), false) => Some(Action::InsertChar(c)),
            (KeyCode::Backspace, _) => Some(Action::Backspace),
            (KeyCode::Delete, _) => Some(Action::Delete),
            (KeyCode::Left, _) => Some(Action::MoveLeft),
            (KeyCode::Right, _) => Some(Action::MoveRight),
            (KeyCode::Home, _) => Some(Action::MoveHome),
            (KeyCode::End, _) => Some(Action::MoveEnd),
            (KeyCode::Up, _) => Some(Action::Scroll {
                direction: ScrollDirection::Up,
                lines: 1,
            }),
            (KeyCode::Down, _) => Some(Action::Scroll {
                direction: ScrollDirection::Down,
                lines: 1,
            }),
            _ => None,
        }
    }

    fn handle_agent_rail_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::CursorDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::CursorUp),
            KeyCode::Enter | KeyCode::Char(' ') => Some(Action::SelectUnderCursor),
            KeyCode::Char(c @ '1'..='9') => {
                Some(Action::SelectAgent(c as usize - '1' as usize))
            }
            KeyCode::Char('i') => {
                self.focus = Focus::Input;
                Some(Action::SetFocus(Focus::Input))
            }
            _ => self.handle_rail_key(key),
        }
    }

    fn handle_rail_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('t') => Some(Action::ToggleTheme),
            KeyCode::Char('?') => Some(Action::ToggleHelp),
            _ => None,
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> Option<Action> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let region = self
                    .clickable_regions
                    .iter()
                    .find(|r| r.contains(mouse.column, mouse.row))?;
                if let Action::SetFocus(focus) = region.action {
                    self.focus = focus;
                }
                Some(region.action.clone())
            }
            MouseEventKind::ScrollUp => Some(Action::Scroll {
                direction: ScrollDirection::Up,
                lines: 3,
            }),
            MouseEventKind::ScrollDown => Some(Action::Scroll {
                direction: ScrollDirection::Down,
                lines: 3,
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_event(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn key_event_ctrl(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::CONTROL)
    }

    fn left_click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_input_focus_is_default() {
        let handler = EventHandler::new();
        assert_eq!(handler.focus(), Focus::Input);
    }

    #[test]
    fn test_typing_in_input() {
        let mut handler = EventHandler::new();

        assert_eq!(
            handler.handle_key(key_event(KeyCode::Char('q'))),
            Some(Action::InsertChar('q'))
        );
        assert_eq!(
            handler.handle_key(key_event(KeyCode::Enter)),
            Some(Action::Send)
        );
        assert_eq!(
            handler.handle_key(key_event(KeyCode::Backspace)),
            Some(Action::Backspace)
        );
        assert_eq!(
            handler.handle_key(key_event_ctrl(KeyCode::Char('u'))),
            Some(Action::ClearInput)
        );
    }

    #[test]
    fn test_quit() {
        let mut handler = EventHandler::new();
        assert_eq!(
            handler.handle_key(key_event_ctrl(KeyCode::Char('c'))),
            Some(Action::Quit)
        );

        handler.set_focus(Focus::AgentRail);
        assert_eq!(
            handler.handle_key(key_event(KeyCode::Char('q'))),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_focus_cycle() {
        let mut handler = EventHandler::new();

        handler.handle_key(key_event(KeyCode::Tab));
        assert_eq!(handler.focus(), Focus::TopicRail);
        handler.handle_key(key_event(KeyCode::Tab));
        assert_eq!(handler.focus(), Focus::AgentRail);
        handler.handle_key(key_event(KeyCode::BackTab));
        assert_eq!(handler.focus(), Focus::TopicRail);
    }

    #[test]
    fn test_agent_rail_keys() {
        let mut handler = EventHandler::new();
        handler.set_focus(Focus::AgentRail);

        assert_eq!(
            handler.handle_key(key_event(KeyCode::Char('j'))),
            Some(Action::CursorDown)
        );
        assert_eq!(
            handler.handle_key(key_event(KeyCode::Up)),
            Some(Action::CursorUp)
        );
        assert_eq!(
            handler.handle_key(key_event(KeyCode::Enter)),
            Some(Action::SelectUnderCursor)
        );
        assert_eq!(
            handler.handle_key(key_event(KeyCode::Char('2'))),
            Some(Action::SelectAgent(1))
        );
        assert_eq!(
            handler.handle_key(key_event(KeyCode::Char('t'))),
            Some(Action::ToggleTheme)
        );
    }

    #[test]
    fn test_topic_rail_ignores_selection_keys() {
        let mut handler = EventHandler::new();
        handler.set_focus(Focus::TopicRail);

        assert_eq!(handler.handle_key(key_event(KeyCode::Enter)), None);
        assert_eq!(handler.handle_key(key_event(KeyCode::Down)), None);
    }

    #[test]
    fn test_clickable_regions() {
        let mut handler = EventHandler::new();
        handler.register_clickable_region(ClickableRegion::new(
            Rect::new(2, 2, 8, 3),
            Action::SelectAgent(0),
            "Mark",
        ));
        handler.register_clickable_region(ClickableRegion::new(
            Rect::new(30, 20, 10, 3),
            Action::Send,
            "Send",
        ));

        assert_eq!(
            handler.handle_mouse(left_click(3, 3)),
            Some(Action::SelectAgent(0))
        );
        assert_eq!(handler.handle_mouse(left_click(35, 21)), Some(Action::Send));
        assert_eq!(handler.handle_mouse(left_click(0, 0)), None);

        handler.clear_clickable_regions();
        assert!(handler.clickable_regions().is_empty());
    }

    #[test]
    fn test_click_on_focus_region_moves_focus() {
        let mut handler = EventHandler::new();
        handler.set_focus(Focus::AgentRail);
        handler.register_clickable_region(ClickableRegion::new(
            Rect::new(10, 10, 20, 3),
            Action::SetFocus(Focus::Input),
            "Input",
        ));

        handler.handle_mouse(left_click(12, 11));
        assert_eq!(handler.focus(), Focus::Input);
    }

    #[test]
    fn test_mouse_scroll() {
        let mut handler = EventHandler::new();
        let scroll_up = MouseEvent {
            kind: MouseEventKind::ScrollUp,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        };

        assert_eq!(
            handler.handle_mouse(scroll_up),
            Some(Action::Scroll {
                direction: ScrollDirection::Up,
                lines: 3
            })
        );
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut handler = EventHandler::new();
        let mut key = key_event(KeyCode::Char('x'));
        key.kind = KeyEventKind::Release;

        assert_eq!(handler.handle_event(Event::Key(key)), None);
    }

    #[test]
    fn test_resize_produces_no_action() {
        let mut handler = EventHandler::new();
        assert_eq!(handler.handle_event(Event::Resize(120, 40)), None);
    }
}
