//! Stateless wrapping and boundary helpers for the TextArea.

/// Border (2) + horizontal padding (2) around the text
pub(super) const HORIZONTAL_OVERHEAD: u16 = 4;
/// Top + bottom borders
pub(super) const VERTICAL_OVERHEAD: u16 = 2;
/// Column offset from area edge to the first text cell (border + padding)
pub(super) const LEFT_OFFSET: u16 = 2;
/// Row offset from area edge to the first text line (border)
pub(super) const TOP_OFFSET: u16 = 1;

/// textwrap options for a given inner width.
pub(super) fn wrap_options(inner_width: u16) -> textwrap::Options<'static> {
    textwrap::Options::new(inner_width as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
}

/// Width left for text once borders and padding are taken. 0 when too narrow.
pub(super) fn inner_width(content_width: u16) -> u16 {
    content_width.saturating_sub(HORIZONTAL_OVERHEAD)
}

/// Lines available for text inside an area of the given height (at least 1).
pub(super) fn visible_lines(area_height: u16) -> u16 {
    area_height.saturating_sub(VERTICAL_OVERHEAD).max(1)
}

/// Byte range of one wrapped line inside the original buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct LineSpan {
    /// First byte of the line
    pub start: usize,
    /// End of the displayed text; spaces dropped at a soft break lie past it
    pub text_end: usize,
    /// Start of the next wrapped line, or the `'\n'` / buffer end
    pub end: usize,
    /// The line ends at a soft wrap
    pub soft: bool,
}

/// Wrapped lines of `text` as byte ranges into `text` itself.
///
/// textwrap drops the spaces at soft breaks, so each segment is located in
/// its logical line instead of summing segment lengths.
pub(super) fn line_spans(text: &str, width: u16) -> Vec<LineSpan> {
    let mut spans = Vec::new();
    let mut offset = 0;

    for logical in text.split('\n') {
        let first = spans.len();
        let line_end = offset + logical.len();

        if width > 0 {
            let mut search = 0;
            for segment in textwrap::wrap(logical, wrap_options(width)) {
                let start = logical[search..]
                    .find(segment.as_ref())
                    .map_or(search, |i| search + i);
                let text_end = if start + segment.len() <= logical.len() {
                    start + segment.len()
                } else {
                    logical.len()
                };
                spans.push(LineSpan {
                    start: offset + start,
                    text_end: offset + text_end,
                    end: line_end,
                    soft: false,
                });
                search = text_end;
            }
        }
        if spans.len() == first {
            spans.push(LineSpan {
                start: offset,
                text_end: line_end,
                end: line_end,
                soft: false,
            });
        }

        for i in first..spans.len() - 1 {
            spans[i].end = spans[i + 1].start;
            spans[i].soft = true;
        }
        offset = line_end + 1;
    }
    spans
}

/// Wrap `text` into display lines. A trailing newline always yields a final
/// empty line.
pub(super) fn wrap_lines(text: &str, width: u16) -> Vec<String> {
    if width == 0 || text.is_empty() {
        return vec![String::new()];
    }

    line_spans(text, width)
        .into_iter()
        .map(|span| text[span.start..span.text_end].to_string())
        .collect()
}

/// Number of display lines `text` occupies at `width`.
pub(super) fn wrap_line_count(text: &str, width: u16) -> u16 {
    wrap_lines(text, width).len() as u16
}

/// Byte offset of the char boundary before `pos`.
pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Byte offset of the char boundary after `pos`.
pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Start of the word before `pos` (readline `backward-word`).
pub(super) fn prev_word_boundary(text: &str, pos: usize) -> usize {
    let mut chars = text[..pos].char_indices().rev().peekable();

    while chars.peek().is_some_and(|&(_, c)| !is_word_char(c)) {
        chars.next();
    }

    let mut boundary = 0;
    while let Some(&(i, c)) = chars.peek() {
        if !is_word_char(c) {
            boundary = i + c.len_utf8();
            break;
        }
        boundary = i;
        chars.next();
    }

    boundary
}

/// End of the word after `pos` (readline `forward-word`).
pub(super) fn next_word_boundary(text: &str, pos: usize) -> usize {
    let mut chars = text[pos..].char_indices().peekable();

    while chars.peek().is_some_and(|&(_, c)| !is_word_char(c)) {
        chars.next();
    }
    while chars.peek().is_some_and(|&(_, c)| is_word_char(c)) {
        chars.next();
    }

    match chars.peek() {
        Some(&(i, _)) => pos + i,
        None => text.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_line_count_empty_string() {
        assert_eq!(wrap_line_count("", 80), 1);
    }

    #[test]
    fn wrap_line_count_zero_width() {
        assert_eq!(wrap_line_count("hello", 0), 1);
    }

    #[test]
    fn wrap_line_count_wraps_long_text() {
        // 10 chars into a 5-wide column -> 2 lines
        assert_eq!(wrap_line_count("aaaaaaaaaa", 5), 2);
    }

    #[test]
    fn wrap_line_count_trailing_newline_adds_line() {
        assert_eq!(wrap_line_count("hello\n", 80), 2);
        assert_eq!(wrap_line_count("aaaaaaaaaa\n", 5), 3);
    }

    #[test]
    fn wrap_lines_keeps_explicit_newlines() {
        assert_eq!(wrap_lines("# A\nbody", 80), vec!["# A", "body"]);
    }

    #[test]
    fn line_spans_skip_spaces_dropped_at_soft_breaks() {
        let text = "aaaa bbbb\ncc";
        let starts: Vec<usize> = line_spans(text, 5).iter().map(|s| s.start).collect();
        assert_eq!(starts, vec![0, 5, 10]);

        let first = line_spans(text, 5)[0];
        assert_eq!(&text[first.start..first.text_end], "aaaa");
        assert_eq!(first.end, 5);
        assert!(first.soft);
        assert!(!line_spans(text, 5)[1].soft);
    }

    #[test]
    fn line_spans_split_long_words() {
        let spans = line_spans("abcdefgh", 5);
        assert_eq!(spans.len(), 2);
        assert_eq!((spans[0].start, spans[0].end), (0, 5));
        assert_eq!((spans[1].start, spans[1].text_end), (5, 8));
    }

    #[test]
    fn line_spans_keep_empty_lines() {
        let starts: Vec<usize> = line_spans("a\n\nb\n", 80).iter().map(|s| s.start).collect();
        assert_eq!(starts, vec![0, 2, 3, 5]);
    }

    #[test]
    fn visible_lines_never_zero() {
        assert_eq!(visible_lines(1), 1);
        assert_eq!(visible_lines(12), 10);
    }

    #[test]
    fn char_boundaries_multibyte() {
        let s = "café";
        assert_eq!(prev_char_boundary(s, 5), 3);
        assert_eq!(prev_char_boundary(s, 3), 2);
        assert_eq!(next_char_boundary(s, 2), 3);
        assert_eq!(next_char_boundary(s, 3), 5);
    }

    #[test]
    fn char_boundaries_emoji() {
        let s = "a🔥b";
        assert_eq!(prev_char_boundary(s, 5), 1);
        assert_eq!(next_char_boundary(s, 1), 5);
    }

    #[test]
    fn prev_word_skips_back_over_word() {
        assert_eq!(prev_word_boundary("hello world", 11), 6);
        assert_eq!(prev_word_boundary("hello world", 6), 0);
        assert_eq!(prev_word_boundary("foo.bar", 7), 4);
        assert_eq!(prev_word_boundary("hello", 0), 0);
    }

    #[test]
    fn next_word_skips_forward_over_word() {
        assert_eq!(next_word_boundary("hello world", 0), 5);
        assert_eq!(next_word_boundary("hello world", 5), 11);
        assert_eq!(next_word_boundary("hello_world test", 0), 11);
        assert_eq!(next_word_boundary("hello", 5), 5);
    }
}
