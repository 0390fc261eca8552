//! Markdown → ratatui `Text` for the viewer.
//!
//! Walks `pulldown_cmark` events and emits styled `Line`/`Span` values in
//! the active palette. Headings, emphasis, inline code, fenced code blocks
//! (highlighted with syntect), lists, task markers, blockquotes, links and
//! inline `#tags`. Raw HTML is dropped; its text content still renders.

use std::sync::LazyLock;

use pulldown_cmark::{CodeBlockKind, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use crate::core::tags::tag_ranges;
use crate::tui::palette::Palette;

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

const CODE_THEME: &str = "base16-ocean.dark";
const RULE_WIDTH: usize = 40;

/// Render `content` for display. The result owns its strings.
pub fn render(content: &str, palette: &Palette) -> Text<'static> {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_STRIKETHROUGH);
    opts.insert(Options::ENABLE_TASKLISTS);

    let mut writer = Writer::new(*palette);
    for event in Parser::new_ext(content, opts) {
        writer.handle(event);
    }
    writer.text
}

// ── Writer ──────────────────────────────────────────────────────────────────

struct Writer {
    text: Text<'static>,
    palette: Palette,
    /// Inline styles, composed with `patch` so bold inside italic keeps both.
    styles: Vec<Style>,
    /// Prepended to every new line (blockquote and code block gutters).
    line_prefixes: Vec<Span<'static>>,
    /// One entry per open list: `None` bullets, `Some(n)` numbers from n.
    list_indices: Vec<Option<u64>>,
    highlighter: Option<HighlightLines<'static>>,
    in_plain_code: bool,
    link_url: Option<String>,
    /// Next block starts after a blank line.
    needs_newline: bool,
}

impl Writer {
    fn new(palette: Palette) -> Self {
        Self {
            text: Text::default(),
            palette,
            styles: Vec::new(),
            line_prefixes: Vec::new(),
            list_indices: Vec::new(),
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
            .unwrap_or_else(|| Style::default().fg(self.palette.text))
    }

    fn push_style(&mut self, overlay: Style) {
        self.styles.push(self.style().patch(overlay));
    }

    fn pop_style(&mut self) {
        self.styles.pop();
    }

    fn frame_style(&self) -> Style {
        Style::default().fg(self.palette.muted)
    }

    fn push_line(&mut self, mut line: Line<'static>) {
        for prefix in self.line_prefixes.iter().rev().cloned() {
            line.spans.insert(0, prefix);
        }
        self.text.lines.push(line);
    }

    fn push_span(&mut self, span: Span<'static>) {
        match self.text.lines.last_mut() {
            Some(line) => line.push_span(span),
            None => self.push_line(Line::from(span)),
        }
    }

    fn blank_line_if_needed(&mut self) {
        if self.needs_newline {
            self.push_line(Line::default());
            self.needs_newline = false;
        }
    }

    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.open(tag),
            Event::End(tag) => self.close(tag),
            Event::Text(t) => self.text(t),
            Event::Code(c) => self.inline_code(c),
            Event::SoftBreak => self.push_span(Span::raw(" ")),
            Event::HardBreak => self.push_line(Line::default()),
            Event::Rule => {
                self.blank_line_if_needed();
                let rule = Span::styled("─".repeat(RULE_WIDTH), self.frame_style());
                self.push_line(Line::from(rule));
                self.needs_newline = true;
            }
            Event::TaskListMarker(done) => {
                self.push_span(Span::raw(if done { "[x] " } else { "[ ] " }));
            }
            _ => {}
        }
    }

    fn open(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                self.blank_line_if_needed();
                self.push_line(Line::default());
            }
            Tag::Heading { level, .. } => {
                self.blank_line_if_needed();
                let style = heading_style(self.palette.primary, level);
                let marker = format!("{} ", "#".repeat(heading_depth(level)));
                self.push_line(Line::from(Span::styled(marker, style)));
                self.push_style(style);
            }
            Tag::BlockQuote(_) => {
                self.blank_line_if_needed();
                let bar = Span::styled("│ ", self.frame_style());
                self.line_prefixes.push(bar);
                self.push_style(Style::default().add_modifier(Modifier::DIM | Modifier::ITALIC));
            }
            Tag::CodeBlock(kind) => self.open_code_block(kind),
            Tag::List(start) => {
                if self.list_indices.is_empty() {
                    self.blank_line_if_needed();
                }
                self.list_indices.push(start);
            }
            Tag::Item => {
                self.push_line(Line::default());
                let indent = "  ".repeat(self.list_indices.len().saturating_sub(1));
                let marker = match self.list_indices.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{indent}{n}. ");
                        *n += 1;
                        marker
                    }
                    _ => format!("{indent}• "),
                };
                let style = Style::default().fg(self.palette.secondary);
                self.push_span(Span::styled(marker, style));
            }
            Tag::Emphasis => self.push_style(Style::default().add_modifier(Modifier::ITALIC)),
            Tag::Strong => self.push_style(Style::default().add_modifier(Modifier::BOLD)),
            Tag::Strikethrough => {
                self.push_style(Style::default().add_modifier(Modifier::CROSSED_OUT))
            }
            Tag::Link { dest_url, .. } => {
                self.link_url = Some(dest_url.to_string());
                self.push_style(self.link_style());
            }
            _ => {}
        }
    }

    fn open_code_block(&mut self, kind: CodeBlockKind<'_>) {
        if !self.text.lines.is_empty() {
            self.push_line(Line::default());
        }
        let lang = match &kind {
            CodeBlockKind::Fenced(lang) => lang.as_ref(),
            CodeBlockKind::Indented => "",
        };

        let frame = self.frame_style();
        let top = if lang.is_empty() {
            Line::from(Span::styled("╭──", frame))
        } else {
            Line::from(vec![
                Span::styled("╭── ", frame),
                Span::styled(lang.to_owned(), frame.add_modifier(Modifier::BOLD)),
                Span::styled(" ──", frame),
            ])
        };
        self.push_line(top);
        self.line_prefixes.push(Span::styled("│ ", frame));

        if !lang.is_empty()
            && let Some(syntax) = SYNTAX_SET.find_syntax_by_token(lang)
            && let Some(theme) = THEME_SET.themes.get(CODE_THEME)
        {
            self.highlighter = Some(HighlightLines::new(syntax, theme));
        }
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
                let bottom = Span::styled("╰──", self.frame_style());
                self.push_line(Line::from(bottom));
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
                    let style = self.link_style();
                    self.push_span(Span::raw(" ("));
                    self.push_span(Span::styled(url, style));
                    self.push_span(Span::raw(")"));
                }
            }
            _ => {}
        }
    }

    fn link_style(&self) -> Style {
        Style::default()
            .fg(self.palette.accent)
            .add_modifier(Modifier::UNDERLINED)
    }

    // ── Content ─────────────────────────────────────────────────────────

    fn text(&mut self, cow: CowStr<'_>) {
        // ratatui draws \t as zero width
        let text = cow.replace('\t', "    ");

        if let Some(mut highlighter) = self.highlighter.take() {
            for line in LinesWithEndings::from(text.as_str()) {
                let Ok(ranges) = highlighter.highlight_line(line, &SYNTAX_SET) else {
                    continue;
                };
                let spans: Vec<Span<'static>> = ranges
                    .into_iter()
                    .filter_map(|(style, fragment)| {
                        let fragment = fragment.trim_end_matches('\n');
                        if fragment.is_empty() {
                            return None;
                        }
                        let fg = style.foreground;
                        Some(Span::styled(
                            fragment.to_owned(),
                            Style::default().fg(Color::Rgb(fg.r, fg.g, fg.b)),
                        ))
                    })
                    .collect();
                if !spans.is_empty() {
                    self.push_line(Line::from(spans));
                }
            }
            self.highlighter = Some(highlighter);
            return;
        }

        if self.in_plain_code {
            let style = Style::default().fg(self.palette.text);
            for line in text.lines() {
                self.push_line(Line::from(Span::styled(line.to_owned(), style)));
            }
            return;
        }

        self.tagged_text(&text);
    }

    /// Plain prose, with `#tags` picked out in the tag colour.
    fn tagged_text(&mut self, text: &str) {
        let style = self.style();
        let tag_style = style.patch(self.palette.tag());
        let mut last = 0;
        for range in tag_ranges(text) {
            if range.start > last {
                self.push_span(Span::styled(text[last..range.start].to_owned(), style));
            }
            self.push_span(Span::styled(text[range.clone()].to_owned(), tag_style));
            last = range.end;
        }
        if last < text.len() {
            self.push_span(Span::styled(text[last..].to_owned(), style));
        }
    }

    fn inline_code(&mut self, cow: CowStr<'_>) {
        let style = Style::default()
            .fg(self.palette.text)
            .bg(self.palette.background_alt);
        self.push_span(Span::styled(cow.to_string(), style));
    }
}

fn heading_style(color: Color, level: HeadingLevel) -> Style {
    let modifier = match level {
        HeadingLevel::H1 => Modifier::BOLD | Modifier::UNDERLINED,
        HeadingLevel::H2 => Modifier::BOLD,
        _ => Modifier::BOLD | Modifier::ITALIC,
    };
    Style::default().fg(color).add_modifier(modifier)
}

fn heading_depth(level: HeadingLevel) -> usize {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::theme::default_theme;

    fn palette() -> Palette {
        Palette::from(&default_theme())
    }

    fn plain_lines(text: &Text<'_>) -> Vec<String> {
        text.lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_heading_text_takes_the_primary_colour() {
        let p = palette();
        let text = render("# Meeting Notes", &p);
        let line = &text.lines[0];
        let title = line.spans.iter().find(|s| s.content == "Meeting Notes").unwrap();
        assert_eq!(title.style.fg, Some(p.primary));
        assert!(title.style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_tags_are_highlighted_inside_prose() {
        let p = palette();
        let text = render("Planning for #work today", &p);
        let spans = &text.lines[0].spans;
        let tag = spans.iter().find(|s| s.content == "#work").unwrap();
        assert_eq!(tag.style.fg, Some(p.accent));
        let before = spans.iter().find(|s| s.content == "Planning for ").unwrap();
        assert_eq!(before.style.fg, Some(p.text));
    }

    #[test]
    fn test_inline_html_is_dropped_but_its_text_stays() {
        let text = render(
            "# Title\n<span style=\"opacity:0.5\">March 7, 2025</span>\n",
            &palette(),
        );
        let lines = plain_lines(&text).join("\n");
        assert!(lines.contains("March 7, 2025"));
        assert!(!lines.contains("span"));
    }

    #[test]
    fn test_code_block_is_framed() {
        let lines = plain_lines(&render("```\nline1\nline2\n```", &palette()));
        assert!(lines[0].starts_with('╭'), "got {:?}", lines[0]);
        assert!(lines[1].starts_with("│ ") && lines[1].contains("line1"));
        assert!(lines[2].starts_with("│ ") && lines[2].contains("line2"));
        assert!(lines.last().unwrap().starts_with('╰'));
    }

    #[test]
    fn test_task_list_shows_checkbox_markers() {
        let lines = plain_lines(&render("- [ ] todo\n- [x] done", &palette()));
        assert!(lines.iter().any(|l| l.contains("[ ] todo")));
        assert!(lines.iter().any(|l| l.contains("[x] done")));
    }

    #[test]
    fn test_tabs_become_spaces() {
        let text = render("```\n\tindented\n```", &palette());
        assert!(
            text.lines
                .iter()
                .flat_map(|l| l.spans.iter())
                .all(|s| !s.content.contains('\t'))
        );
    }
}
