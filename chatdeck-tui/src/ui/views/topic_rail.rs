use chatdeck_core::topics;
use ratatui::{
    layout::{Alignment, Rect},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;
use crate::events::Focus;
use crate::theme::ThemedStyles;
use crate::ui::utils::truncate_to_width;

pub struct TopicRailView;

impl TopicRailView {
    /// Characters of a label turned a quarter counter-clockwise: read bottom
    /// to top, one per row. Labels longer than `height` end in `…`.
    pub fn rotated_label(label: &str, height: usize) -> Vec<char> {
        let mut chars: Vec<char> = truncate_to_width(label, height).chars().collect();
        chars.reverse();
        chars
    }

    /// Row spans `(y offset, height)` for each label inside `rows`.
    ///
    /// Equal centered slots when every label fits one. Otherwise labels are
    /// stacked with a one-row gap; when even that is too short every label
    /// gets an equal share and spare rows go to the cut ones, in order.
    pub fn label_slots(lengths: &[usize], rows: usize) -> Vec<(usize, usize)> {
        let count = lengths.len();
        if count == 0 {
            return Vec::new();
        }

        let slot = rows / count;
        let longest = lengths.iter().copied().max().unwrap_or(0);
        if slot >= longest {
            return lengths
                .iter()
                .enumerate()
                .map(|(index, &len)| (index * slot + (slot - len) / 2, len))
                .collect();
        }

        let budget = rows.saturating_sub(count - 1);
        let fitted = |cap: usize| lengths.iter().map(|&len| len.min(cap)).sum::<usize>();
        let mut cap = 0;
        while cap < longest && fitted(cap + 1) <= budget {
            cap += 1;
        }

        let mut heights: Vec<usize> = lengths.iter().map(|&len| len.min(cap)).collect();
        let mut spare = budget.saturating_sub(fitted(cap));
        for (height, &len) in heights.iter_mut().zip(lengths) {
            if spare == 0 {
                break;
            }
            if *height < len {
                *height += 1;
                spare -= 1;
            }
        }

        let mut y = 0;
        heights
            .into_iter()
            .map(|height| {
                let slot = (y, height);
                if height > 0 {
                    y += height + 1;
                }
                slot
            })
            .collect()
    }

    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = app.current_theme();
        let styles = ThemedStyles::new(theme);
        let focused = app.focus() == Focus::TopicRail;

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(styles.border_for(focused))
            .style(styles.surface());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let topics = topics();
        let lengths: Vec<usize> = topics.iter().map(|t| t.label().width()).collect();
        let slots = Self::label_slots(&lengths, inner.height as usize);

        for (topic, (offset, height)) in topics.iter().zip(slots) {
            if height == 0 {
                continue;
            }

            let lines: Vec<Line> = Self::rotated_label(topic.label(), height)
                .into_iter()
                .map(|c| Line::raw(c.to_string()))
                .collect();
            let slot = Rect::new(
                inner.x,
                inner.y + offset as u16,
                inner.width,
                height as u16,
            );

            frame.render_widget(
                Paragraph::new(lines)
                    .alignment(Alignment::Center)
                    .style(styles.dimmed()),
                slot,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LABEL_LENGTHS: [usize; 7] = [5, 5, 7, 6, 6, 7, 4];

    #[test]
    fn test_rotated_label_reads_bottom_to_top() {
        assert_eq!(
            TopicRailView::rotated_label("News", 10),
            vec!['s', 'w', 'e', 'N']
        );
    }

    #[test]
    fn test_rotated_label_marks_the_cut() {
        assert_eq!(
            TopicRailView::rotated_label("History", 3),
            vec!['…', 'i', 'H']
        );
    }

    #[test]
    fn test_tall_rail_uses_centered_slots() {
        let slots = TopicRailView::label_slots(&LABEL_LENGTHS, 56);

        // 8 rows per slot
        assert_eq!(slots[0], (1, 5));
        assert_eq!(slots[2], (16, 7));
        assert_eq!(slots[6], (50, 4));
    }

    #[test]
    fn test_medium_rail_stacks_full_labels() {
        let slots = TopicRailView::label_slots(&LABEL_LENGTHS, 47);

        let heights: Vec<usize> = slots.iter().map(|&(_, h)| h).collect();
        assert_eq!(heights, LABEL_LENGTHS);
        assert_eq!(slots[1], (6, 5));
        assert_eq!(slots[6], (42, 4));
    }

    #[test]
    fn test_short_rail_shares_rows_between_labels() {
        let slots = TopicRailView::label_slots(&LABEL_LENGTHS, 21);

        let heights: Vec<usize> = slots.iter().map(|&(_, h)| h).collect();
        assert_eq!(heights, vec![3, 2, 2, 2, 2, 2, 2]);
        let (last_y, last_h) = slots[6];
        assert_eq!(last_y + last_h, 21);
    }
}
