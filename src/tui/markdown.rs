//! Markdown → ratatui `Text` renderer.
//!
//! Converts `pulldown_cmark` events into styled `Line`/`Span` values:
//! headings, emphasis, inline code, fenced code blocks (syntect
//! highlighting), lists, task lists, blockquotes, rules and links.
//!
//! The highlighting theme is resolved once in [`MarkdownRenderer::new`]. An
//! unknown theme is a construction error; the app treats it as fatal.

use std::fmt;
use std::sync::LazyLock;

use pulldown_cmark::{CodeBlockKind, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

#[derive(Debug)]
pub enum RenderError {
    UnknownTheme(String),
    Highlight(syntect::Error),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::UnknownTheme(name) => write!(f, "unknown code theme: {name}"),
            RenderError::Highlight(e) => write!(f, "syntax highlighting failed: {e}"),
        }
    }
}

impl std::error::Error for RenderError {}

pub struct MarkdownRenderer {
    theme: &'static Theme,
    base_fg: Color,
}

impl MarkdownRenderer {
    pub fn new(code_theme: &str, base_fg: Color) -> Result<Self, RenderError> {
        let theme = THEME_SET
            .themes
            .get(code_theme)
            .ok_or_else(|| RenderError::UnknownTheme(code_theme.to_string()))?;
        Ok(Self { theme, base_fg })
    }

    /// Parse markdown into owned styled text.
    pub fn render(&self, content: &str) -> Result<Text<'static>, RenderError> {
        let mut opts = Options::empty();
        opts.insert(Options::ENABLE_STRIKETHROUGH);
        opts.insert(Options::ENABLE_TASKLISTS);

        let mut w = Writer::new(self.theme, self.base_fg);
        for event in Parser::new_ext(content, opts) {
            w.handle(event)?;
        }
        Ok(w.text)
    }
}

// ── Writer ──────────────────────────────────────────────────────────────────

struct Writer {
    text: Text<'static>,
    theme: &'static Theme,
    base_fg: Color,
    /// Inline style stack; entries are pre-patched onto their parent.
    styles: Vec<Style>,
    /// Per-line prefix spans (blockquote and code block borders).
    line_prefixes: Vec<Span<'static>>,
    /// List nesting: None = unordered, Some(n) = ordered at index n.
    list_indices: Vec<Option<u64>>,
    highlighter: Option<HighlightLines<'static>>,
    /// Inside a code block with no known syntax.
    in_plain_code: bool,
    /// Link target, appended once the link text closes.
    link_url: Option<String>,
    /// Next block element should be preceded by a blank line.
    needs_newline: bool,
}

impl Writer {
    fn new(theme: &'static Theme, base_fg: Color) -> Self {
        Self {
            text: Text::default(),
            theme,
            base_fg,
            styles: vec![],
            line_prefixes: vec![],
            list_indices: vec![],
            highlighter: None,
            in_plain_code: false,
            link_url: None,
            needs_newline: false,
        }
    }

    fn style(&self) -> Style {
        self.styles
            .last()
            .copied()
            .unwrap_or_else(|| Style::default().fg(self.base_fg))
    }

    fn push_style(&mut self, overlay: Style) {
        self.styles.push(self.style().patch(overlay));
    }

    fn pop_style(&mut self) {
        self.styles.pop();
    }

    fn push_line(&mut self, line: Line<'static>) {
        let mut out = line;
        for pfx in self.line_prefixes.iter().rev().cloned() {
            out.spans.insert(0, pfx);
        }
        self.text.lines.push(out);
    }

    fn push_span(&mut self, span: Span<'static>) {
        match self.text.lines.last_mut() {
            Some(line) => line.push_span(span),
            None => self.push_line(Line::from(vec![span])),
        }
    }

    fn blank_line_if_needed(&mut self) {
        if self.needs_newline {
            self.push_line(Line::default());
            self.needs_newline = false;
        }
    }

    fn handle(&mut self, event: Event<'_>) -> Result<(), RenderError> {
        match event {
            Event::Start(tag) => self.open(tag),
            Event::End(tag) => self.close(tag),
            Event::Text(t) => return self.text(t),
            Event::Code(c) => self.inline_code(c),
            Event::SoftBreak => self.push_span(Span::raw(" ")),
            Event::HardBreak => self.push_line(Line::default()),
            Event::Rule => {
                self.blank_line_if_needed();
                self.push_line(Line::from(Span::styled(
                    "─".repeat(40),
                    Style::default().fg(Color::DarkGray),
                )));
                self.needs_newline = true;
            }
            Event::TaskListMarker(checked) => {
                self.push_span(Span::raw(if checked { "[x] " } else { "[ ] " }));
            }
            _ => {} // HTML, footnotes, math
        }
        Ok(())
    }

    fn open(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                self.blank_line_if_needed();
                self.push_line(Line::default());
            }
            Tag::Heading { level, .. } => {
                self.blank_line_if_needed();
                let hs = heading_style(self.base_fg, level);
                self.push_line(Line::from(Span::styled(
                    format!("{} ", "#".repeat(level as usize)),
                    hs,
                )));
                self.push_style(hs);
            }
            Tag::BlockQuote(_) => {
                self.blank_line_if_needed();
                self.line_prefixes
                    .push(Span::styled("│ ", Style::default().fg(Color::DarkGray)));
                self.push_style(
                    Style::default()
                        .fg(self.base_fg)
                        .add_modifier(Modifier::DIM | Modifier::ITALIC),
                );
            }
            Tag::CodeBlock(kind) => self.open_code_block(&kind),
            Tag::List(start) => {
                if self.list_indices.is_empty() {
                    self.blank_line_if_needed();
                }
                self.list_indices.push(start);
            }
            Tag::Item => {
                self.push_line(Line::default());
                let indent = "  ".repeat(self.list_indices.len().saturating_sub(1));
                if let Some(idx) = self.list_indices.last_mut() {
                    let marker = match idx {
                        None => format!("{indent}- "),
                        Some(n) => {
                            let s = format!("{indent}{n}. ");
                            *n += 1;
                            s
                        }
                    };
                    self.push_span(Span::styled(marker, Style::default().fg(Color::DarkGray)));
                }
            }
            Tag::Emphasis => self.push_style(Style::default().add_modifier(Modifier::ITALIC)),
            Tag::Strong => self.push_style(Style::default().add_modifier(Modifier::BOLD)),
            Tag::Strikethrough => {
                self.push_style(Style::default().add_modifier(Modifier::CROSSED_OUT))
            }
            Tag::Link { dest_url, .. } => {
                self.link_url = Some(dest_url.to_string());
                self.push_style(link_style());
            }
            _ => {} // Tables, images, definitions
        }
    }

    fn open_code_block(&mut self, kind: &CodeBlockKind<'_>) {
        if !self.text.lines.is_empty() {
            self.push_line(Line::default());
        }
        let lang = match kind {
            CodeBlockKind::Fenced(l) => l.as_ref(),
            CodeBlockKind::Indented => "",
        };

        let bs = Style::default().fg(Color::DarkGray);
        let top = if lang.is_empty() {
            Line::from(Span::styled("╭──", bs))
        } else {
            Line::from(vec![
                Span::styled("╭── ", bs),
                Span::styled(lang.to_owned(), bs.add_modifier(Modifier::BOLD)),
                Span::styled(" ──", bs),
            ])
        };
        self.push_line(top);
        self.line_prefixes.push(Span::styled("│ ", bs));

        self.highlighter = SYNTAX_SET
            .find_syntax_by_token(lang)
            .filter(|_| !lang.is_empty())
            .map(|syntax| HighlightLines::new(syntax, self.theme));
        self.in_plain_code = self.highlighter.is_none();
    }

    fn close(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.needs_newline = true,
            TagEnd::Heading(_) => {
                self.pop_style();
                self.needs_newline = true;
            }
            TagEnd::BlockQuote(_) => {
                self.line_prefixes.pop();
                self.pop_style();
                self.needs_newline = true;
            }
            TagEnd::CodeBlock => {
                self.highlighter = None;
                self.in_plain_code = false;
                self.line_prefixes.pop();
                self.push_line(Line::from(Span::styled(
                    "╰──",
                    Style::default().fg(Color::DarkGray),
                )));
                self.needs_newline = true;
            }
            TagEnd::List(_) => {
                self.list_indices.pop();
                self.needs_newline = true;
            }
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => self.pop_style(),
            TagEnd::Link => {
                self.pop_style();
                if let Some(url) = self.link_url.take() {
                    self.push_span(Span::raw(" ("));
                    self.push_span(Span::styled(url, link_style()));
                    self.push_span(Span::raw(")"));
                }
            }
            _ => {}
        }
    }

    fn text(&mut self, cow: CowStr<'_>) -> Result<(), RenderError> {
        // ratatui renders \t as zero-width
        let text = cow.replace('\t', "    ");

        // Taken out so push_line can borrow self while highlighting
        if let Some(mut hl) = self.highlighter.take() {
            let result = self.highlight(&mut hl, &text);
            self.highlighter = Some(hl);
            return result;
        }

        if self.in_plain_code {
            let code_style = Style::default().fg(Color::White);
            for line in text.lines() {
                self.push_line(Line::from(Span::styled(line.to_owned(), code_style)));
            }
            return Ok(());
        }

        let style = self.style();
        self.push_span(Span::styled(text, style));
        Ok(())
    }

    fn highlight(
        &mut self,
        hl: &mut HighlightLines<'static>,
        text: &str,
    ) -> Result<(), RenderError> {
        for line in LinesWithEndings::from(text) {
            let ranges = hl
                .highlight_line(line, &SYNTAX_SET)
                .map_err(RenderError::Highlight)?;
            let spans: Vec<Span<'static>> = ranges
                .into_iter()
                .filter_map(|(hl_style, frag)| {
                    let content = frag.trim_end_matches('\n');
                    if content.is_empty() {
                        return None;
                    }
                    let fg = Color::Rgb(
                        hl_style.foreground.r,
                        hl_style.foreground.g,
                        hl_style.foreground.b,
                    );
                    Some(Span::styled(content.to_owned(), Style::default().fg(fg)))
                })
                .collect();
            self.push_line(Line::from(spans));
        }
        Ok(())
    }

    fn inline_code(&mut self, cow: CowStr<'_>) {
        let style = Style::default().fg(Color::White).bg(Color::DarkGray);
        self.push_span(Span::styled(cow.to_string(), style));
    }
}

// ── Helpers ─────────────────────────────────────────────────────────────────

fn heading_style(base_fg: Color, level: HeadingLevel) -> Style {
    let modifier = match level {
        HeadingLevel::H1 => Modifier::BOLD | Modifier::UNDERLINED,
        HeadingLevel::H2 => Modifier::BOLD,
        _ => Modifier::BOLD | Modifier::ITALIC,
    };
    Style::default().fg(base_fg).add_modifier(modifier)
}

fn link_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::UNDERLINED)
}

/// Flatten rendered text into plain strings, one per line.
pub fn plain_lines(text: &Text<'_>) -> Vec<String> {
    text.lines
        .iter()
        .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer() -> MarkdownRenderer {
        MarkdownRenderer::new("base16-ocean.dark", Color::Blue).unwrap()
    }

    #[test]
    fn unknown_theme_is_an_error() {
        let err = MarkdownRenderer::new("no-such-theme", Color::Blue).err().unwrap();
        assert!(matches!(err, RenderError::UnknownTheme(name) if name == "no-such-theme"));
    }

    #[test]
    fn heading_text_inherits_heading_style() {
        let text = renderer().render("## Hello").unwrap();
        let line = &text.lines[0];
        assert!(line.spans.len() >= 2, "expected >= 2 spans, got {:?}", line);
        assert_eq!(line.spans[0].content, "## ");
        let text_style = line.spans[1].style;
        assert!(text_style.add_modifier.contains(Modifier::BOLD));
        assert_eq!(text_style.fg, Some(Color::Blue));
    }

    #[test]
    fn note_body_keeps_heading_and_paragraph() {
        let text = renderer().render("# A\nbody").unwrap();
        let lines = plain_lines(&text);
        assert_eq!(lines[0], "# A");
        assert!(lines.iter().any(|l| l == "body"), "got {:?}", lines);
    }

    #[test]
    fn bold_text_is_bold() {
        let text = renderer().render("Some **bold** text").unwrap();
        let bold = text.lines[0].spans.iter().find(|s| s.content == "bold").unwrap();
        assert!(bold.style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn inline_code_styled() {
        let text = renderer().render("Use `foo()` here").unwrap();
        let code = text.lines[0].spans.iter().find(|s| s.content == "foo()").unwrap();
        assert_eq!(code.style.fg, Some(Color::White));
        assert_eq!(code.style.bg, Some(Color::DarkGray));
    }

    #[test]
    fn code_block_has_border_structure() {
        let lines = plain_lines(&renderer().render("```\nline1\nline2\n```").unwrap());
        assert!(lines[0].starts_with('╭'), "expected top border, got {:?}", lines[0]);
        assert!(lines[1].starts_with("│ ") && lines[1].contains("line1"));
        assert!(lines[2].starts_with("│ ") && lines[2].contains("line2"));
        assert!(lines.last().unwrap().starts_with('╰'));
    }

    #[test]
    fn fenced_rust_is_highlighted() {
        let text = renderer().render("```rust\nfn main() {}\n```").unwrap();
        let coloured = text.lines.iter().flat_map(|l| l.spans.iter()).any(|s| {
            matches!(s.style.fg, Some(Color::Rgb(..))) && s.content.contains("fn")
        });
        assert!(coloured, "expected syntect colours on the code line");
    }

    #[test]
    fn ordered_list_numbers_items() {
        let lines = plain_lines(&renderer().render("1. one\n2. two").unwrap());
        assert!(lines.iter().any(|l| l == "1. one"), "got {:?}", lines);
        assert!(lines.iter().any(|l| l == "2. two"), "got {:?}", lines);
    }

    #[test]
    fn link_url_follows_text() {
        let lines = plain_lines(&renderer().render("[site](https://example.com)").unwrap());
        assert!(lines.iter().any(|l| l == "site (https://example.com)"), "got {:?}", lines);
    }

    #[test]
    fn tabs_expanded_to_spaces() {
        let text = renderer().render("```\n\tindented\n```").unwrap();
        let all: String = plain_lines(&text).concat();
        assert!(all.contains("    indented"));
        assert!(!all.contains('\t'));
    }
}
