use ratatui::layout::Rect;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Word-wraps `text` into lines of at most `width` terminal cells. Words
/// wider than `width` are split between characters.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for mut word in text.split(' ') {
        loop {
            let word_width = word.width();
            let needed = if current_width == 0 {
                word_width
            } else {
                word_width + 1
            };

            if current_width + needed <= width {
                if current_width > 0 {
                    current.push(' ');
                    current_width += 1;
                }
                current.push_str(word);
                current_width += word_width;
                break;
            }

            if current_width > 0 {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
                continue;
            }

            let split = split_at_width(word, width);
            lines.push(word[..split].to_string());
            word = &word[split..];
            if word.is_empty() {
                break;
            }
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Byte index ending the longest prefix of `text` that fits in `width`
/// cells. Always at least one character.
fn split_at_width(text: &str, width: usize) -> usize {
    let mut used = 0;
    for (index, c) in text.char_indices() {
        let cell = c.width().unwrap_or(0);
        if index > 0 && used + cell > width {
            return index;
        }
        used += cell;
    }
    text.len()
}

pub fn pad_to_width(text: &str, width: usize) -> String {
    let used = text.width();
    if used >= width {
        text.to_string()
    } else {
        format!("{}{}", text, " ".repeat(width - used))
    }
}

/// Cuts `text` to `width` cells, marking the cut with `…`.
pub fn truncate_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut truncated = String::new();
    let mut used = 0;
    for c in text.chars() {
        let cell = c.width().unwrap_or(0);
        if used + cell > width - 1 {
            break;
        }
        truncated.push(c);
        used += cell;
    }
    truncated.push('…');
    truncated
}

pub fn centered_rect(width_percent: u16, height_percent: u16, area: Rect) -> Rect {
    let width = area.width * width_percent / 100;
    let height = area.height * height_percent / 100;
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
