//! Cursor position and vertical scroll for the TextArea.
//!
//! The text itself is owned by `TextArea`; every method here takes the buffer
//! explicitly.

use super::text_wrap::{
    LEFT_OFFSET, LineSpan, TOP_OFFSET, inner_width, line_spans, prev_char_boundary,
    wrap_line_count,
};
use ratatui::layout::Rect;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub(super) struct CursorState {
    /// Byte offset in the buffer (0..=buffer.len()), always on a char boundary
    pub pos: usize,
    /// First visible wrapped line
    pub scroll_offset: u16,
    /// Area width from the last render, used for Up/Down between renders
    pub last_content_width: u16,
}

/// Index of the wrapped line holding byte `pos`.
fn line_index(spans: &[LineSpan], pos: usize) -> usize {
    spans.iter().rposition(|span| span.start <= pos).unwrap_or(0)
}

/// Byte offset on `line` closest to display `column` without passing it.
fn pos_at_column(buffer: &str, line: LineSpan, column: usize) -> usize {
    let mut pos = line.start;
    let mut width = 0;
    for (i, c) in buffer[line.start..line.text_end].char_indices() {
        width += c.width().unwrap_or(0);
        if width > column {
            break;
        }
        pos = line.start + i + c.len_utf8();
    }
    // The end of a soft-wrapped word is drawn at the start of the next line
    if line.soft && pos == line.end && pos > line.start {
        pos = prev_char_boundary(buffer, pos);
    }
    pos
}

impl CursorState {
    const DEFAULT_WIDTH: u16 = 80;

    pub fn new() -> Self {
        Self {
            pos: 0,
            scroll_offset: 0,
            last_content_width: Self::DEFAULT_WIDTH,
        }
    }

    pub fn reset(&mut self) {
        self.pos = 0;
        self.scroll_offset = 0;
    }

    pub fn move_to_end(&mut self, buffer: &str) {
        self.pos = buffer.len();
    }

    /// Move to the wrapped line above/below, keeping the display column
    /// where possible.
    ///
    /// Returns `false` when already on the first/last line.
    pub fn move_vertically(&mut self, buffer: &str, direction: i16, content_width: u16) -> bool {
        let width = inner_width(content_width);
        if width == 0 {
            return false;
        }

        let spans = line_spans(buffer, width);
        let current = line_index(&spans, self.pos);
        let target = match direction {
            d if d < 0 && current == 0 => return false,
            d if d < 0 => current - 1,
            _ if current + 1 >= spans.len() => return false,
            _ => current + 1,
        };

        let column = buffer[spans[current].start..self.pos].width();
        self.pos = pos_at_column(buffer, spans[target], column);
        true
    }

    /// Wrapped line (0-based) holding the cursor.
    pub fn calculate_line(&self, buffer: &str, content_width: u16) -> u16 {
        let width = inner_width(content_width);
        if width == 0 {
            return 0;
        }
        line_index(&line_spans(buffer, width), self.pos) as u16
    }

    /// Scroll so the cursor line is inside a window of `visible` lines.
    pub fn update_scroll_offset(&mut self, buffer: &str, content_width: u16, visible: u16) {
        let total = wrap_line_count(buffer, inner_width(content_width));
        if total <= visible {
            self.scroll_offset = 0;
            return;
        }

        let line = self.calculate_line(buffer, content_width);
        if line < self.scroll_offset {
            self.scroll_offset = line;
        } else if line >= self.scroll_offset + visible {
            self.scroll_offset = line.saturating_sub(visible - 1);
        }
    }

    /// Terminal (column, row) of the cursor inside `area`.
    pub fn screen_pos(&self, buffer: &str, area: Rect) -> (u16, u16) {
        let width = inner_width(area.width);
        if width == 0 {
            return (area.x + LEFT_OFFSET, area.y + TOP_OFFSET);
        }

        let spans = line_spans(buffer, width);
        let line = line_index(&spans, self.pos);
        // Spaces kept past a soft break would push the cursor into the border
        let column = buffer[spans[line].start..self.pos].width().min(width as usize) as u16;

        let row = (line as u16).saturating_sub(self.scroll_offset);
        (area.x + LEFT_OFFSET + column, area.y + TOP_OFFSET + row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::text_wrap::HORIZONTAL_OVERHEAD;

    #[test]
    fn move_down_keeps_column() {
        let buffer = "abc\ndef";
        let mut cursor = CursorState::new();
        cursor.pos = 1;

        assert!(cursor.move_vertically(buffer, 1, 40));
        assert_eq!(cursor.pos, 5);
        assert!(!cursor.move_vertically(buffer, 1, 40));
    }

    #[test]
    fn move_up_clamps_to_shorter_line() {
        let buffer = "ab\nlonger";
        let mut cursor = CursorState::new();
        cursor.pos = buffer.len();

        assert!(cursor.move_vertically(buffer, -1, 40));
        assert_eq!(cursor.pos, 2);
    }

    #[test]
    fn cursor_after_trailing_newline_is_on_next_line() {
        let mut cursor = CursorState::new();
        cursor.pos = 4;
        assert_eq!(cursor.calculate_line("abc\n", 40), 1);
    }

    #[test]
    fn scroll_follows_cursor() {
        let buffer = "1\n2\n3\n4\n5\n6";
        let mut cursor = CursorState::new();
        cursor.move_to_end(buffer);

        cursor.update_scroll_offset(buffer, 40, 3);
        assert_eq!(cursor.scroll_offset, 3);

        cursor.pos = 0;
        cursor.update_scroll_offset(buffer, 40, 3);
        assert_eq!(cursor.scroll_offset, 0);
    }

    #[test]
    fn screen_pos_accounts_for_border_and_padding() {
        let mut cursor = CursorState::new();
        cursor.pos = 2;
        let area = Rect::new(10, 5, 40, 5);
        assert_eq!(cursor.screen_pos("hello", area), (14, 6));
    }

    #[test]
    fn screen_pos_counts_wide_chars_as_two_columns() {
        let mut cursor = CursorState::new();
        cursor.move_to_end("日本");
        let area = Rect::new(0, 0, 40, 5);
        assert_eq!(cursor.screen_pos("日本", area), (6, 1));
    }

    #[test]
    fn move_up_onto_multibyte_line_lands_on_char_boundary() {
        let buffer = "é\nab";
        let mut cursor = CursorState::new();
        cursor.pos = 4; // after 'a'

        assert!(cursor.move_vertically(buffer, -1, 40));
        assert_eq!(cursor.pos, 2);
        assert!(buffer.is_char_boundary(cursor.pos));
    }

    #[test]
    fn move_down_onto_multibyte_line_keeps_display_column() {
        let buffer = "ab\néé";
        let mut cursor = CursorState::new();
        cursor.pos = 1;

        assert!(cursor.move_vertically(buffer, 1, 40));
        assert_eq!(cursor.pos, 5);
    }

    #[test]
    fn move_up_never_splits_a_wide_char() {
        let buffer = "日本\nabcd";
        let mut cursor = CursorState::new();
        cursor.pos = 10; // column 3 on the second line

        assert!(cursor.move_vertically(buffer, -1, 40));
        assert_eq!(cursor.pos, 3);
    }

    #[test]
    fn vertical_moves_follow_soft_wrapped_lines() {
        // Inner width 5: "aaaa" / "bbbb" / "cccc"
        let buffer = "aaaa bbbb cccc";
        let width = HORIZONTAL_OVERHEAD + 5;
        let mut cursor = CursorState::new();
        cursor.pos = 12;

        assert!(cursor.move_vertically(buffer, -1, width));
        assert_eq!(cursor.pos, 7);
        assert!(cursor.move_vertically(buffer, -1, width));
        assert_eq!(cursor.pos, 2);
        assert!(!cursor.move_vertically(buffer, -1, width));
        assert!(cursor.move_vertically(buffer, 1, width));
        assert_eq!(cursor.pos, 7);
    }

    #[test]
    fn soft_wrapped_cursor_line_and_screen_position() {
        let buffer = "aaaa bbbb cccc";
        let area = Rect::new(0, 0, HORIZONTAL_OVERHEAD + 5, 6);
        let mut cursor = CursorState::new();

        cursor.pos = 4; // the space dropped at the first break
        assert_eq!(cursor.calculate_line(buffer, area.width), 0);

        cursor.pos = 12;
        assert_eq!(cursor.calculate_line(buffer, area.width), 2);
        assert_eq!(cursor.screen_pos(buffer, area), (4, 3));
    }
}
