//! Markdown → ratatui `Text`.
//!
//! Used for chat bubbles and for the composer's preview mode. Covers the
//! subset the formatting toolbar can produce (bold, italic, inline code,
//! list items, links) plus headings, quotes and fenced code with syntect
//! highlighting.

use std::sync::LazyLock;

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use crate::tui::theme::Palette;

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);
const CODE_THEME: &str = "base16-ocean.dark";

/// Render `content` with `base_fg` for body text and `palette` for accents.
pub fn render(content: &str, base_fg: Color, palette: &Palette) -> Text<'static> {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_STRIKETHROUGH);

    let mut renderer = Renderer::new(base_fg, *palette);
    for event in Parser::new_ext(content, opts) {
        renderer.event(event);
    }
    renderer.out
}

enum CodeMode {
    Off,
    Plain,
    Highlighted(Box<HighlightLines<'static>>),
}

struct Renderer {
    out: Text<'static>,
    base: Style,
    palette: Palette,
    /// Inline styles; each entry is already patched onto its parent.
    styles: Vec<Style>,
    /// Spans prepended to every new line (quote and code gutters).
    gutters: Vec<Span<'static>>,
    /// `None` = bullet list, `Some(n)` = ordered list at item n.
    lists: Vec<Option<u64>>,
    code: CodeMode,
    link: Option<String>,
    pending_gap: bool,
}

impl Renderer {
    fn new(base_fg: Color, palette: Palette) -> Self {
        Self {
            out: Text::default(),
            base: Style::default().fg(base_fg),
            palette,
            styles: Vec::new(),
            gutters: Vec::new(),
            lists: Vec::new(),
            code: CodeMode::Off,
            link: None,
            pending_gap: false,
        }
    }

    fn style(&self) -> Style {
        self.styles.last().copied().unwrap_or(self.base)
    }

    fn push_style(&mut self, overlay: Style) {
        self.styles.push(self.style().patch(overlay));
    }

    fn muted(&self) -> Style {
        Style::default().fg(self.palette.muted)
    }

    fn new_line(&mut self, spans: Vec<Span<'static>>) {
        let mut line: Vec<Span<'static>> = self.gutters.clone();
        line.extend(spans);
        self.out.lines.push(Line::from(line));
    }

    fn span(&mut self, span: Span<'static>) {
        match self.out.lines.last_mut() {
            Some(line) => line.push_span(span),
            None => self.new_line(vec![span]),
        }
    }

    fn gap(&mut self) {
        if std::mem::take(&mut self.pending_gap) {
            self.new_line(Vec::new());
        }
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => {
                let style = Style::default()
                    .fg(self.palette.text)
                    .bg(self.palette.selection_bg);
                self.span(Span::styled(code.to_string(), style));
            }
            Event::SoftBreak => self.span(Span::raw(" ")),
            Event::HardBreak => self.new_line(Vec::new()),
            Event::Rule => {
                self.gap();
                let rule = Span::styled("─".repeat(32), self.muted());
                self.new_line(vec![rule]);
                self.pending_gap = true;
            }
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                self.gap();
                self.new_line(Vec::new());
            }
            Tag::Heading { level, .. } => {
                self.gap();
                let style = self.base.add_modifier(heading_modifier(level));
                self.new_line(Vec::new());
                self.styles.push(style);
            }
            Tag::BlockQuote(_) => {
                self.gap();
                let bar = Span::styled("│ ", Style::default().fg(self.palette.accent));
                self.gutters.push(bar);
                self.push_style(Style::default().add_modifier(Modifier::ITALIC));
            }
            Tag::CodeBlock(kind) => {
                self.gap();
                let lang = match &kind {
                    CodeBlockKind::Fenced(lang) => lang.to_string(),
                    CodeBlockKind::Indented => String::new(),
                };
                let header = if lang.is_empty() {
                    "╭──".to_string()
                } else {
                    format!("╭── {lang}")
                };
                let border = self.muted();
                self.new_line(vec![Span::styled(header, border)]);
                self.gutters.push(Span::styled("│ ", border));

                self.code = match SYNTAX_SET.find_syntax_by_token(&lang) {
                    Some(syntax) if !lang.is_empty() => match THEME_SET.themes.get(CODE_THEME) {
                        Some(theme) => {
                            CodeMode::Highlighted(Box::new(HighlightLines::new(syntax, theme)))
                        }
                        None => CodeMode::Plain,
                    },
                    _ => CodeMode::Plain,
                };
            }
            Tag::List(start) => {
                if self.lists.is_empty() {
                    self.gap();
                }
                self.lists.push(start);
            }
            Tag::Item => {
                let indent = "  ".repeat(self.lists.len().saturating_sub(1));
                let marker = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{indent}{n}. ");
                        *n += 1;
                        marker
                    }
                    _ => format!("{indent}• "),
                };
                let marker = Span::styled(marker, Style::default().fg(self.palette.accent));
                self.new_line(vec![marker]);
            }
            Tag::Emphasis => self.push_style(Style::default().add_modifier(Modifier::ITALIC)),
            Tag::Strong => self.push_style(Style::default().add_modifier(Modifier::BOLD)),
            Tag::Strikethrough => {
                self.push_style(Style::default().add_modifier(Modifier::CROSSED_OUT))
            }
            Tag::Link { dest_url, .. } => {
                self.link = Some(dest_url.to_string());
                self.push_style(
                    Style::default()
                        .fg(self.palette.accent)
                        .add_modifier(Modifier::UNDERLINED),
                );
            }
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.pending_gap = true,
            TagEnd::Heading(_) => {
                self.styles.pop();
                self.pending_gap = true;
            }
            TagEnd::BlockQuote(_) => {
                self.gutters.pop();
                self.styles.pop();
                self.pending_gap = true;
            }
            TagEnd::CodeBlock => {
                self.code = CodeMode::Off;
                self.gutters.pop();
                let border = self.muted();
                self.new_line(vec![Span::styled("╰──", border)]);
                self.pending_gap = true;
            }
            TagEnd::List(_) => {
                self.lists.pop();
                self.pending_gap = true;
            }
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => {
                self.styles.pop();
            }
            TagEnd::Link => {
                self.styles.pop();
                if let Some(url) = self.link.take() {
                    let muted = self.muted();
                    self.span(Span::styled(format!(" ({url})"), muted));
                }
            }
            _ => {}
        }
    }

    fn text(&mut self, raw: &str) {
        // ratatui renders '\t' as zero width
        let text = raw.replace('\t', "    ");

        match std::mem::replace(&mut self.code, CodeMode::Off) {
            CodeMode::Highlighted(mut highlighter) => {
                for line in LinesWithEndings::from(&text) {
                    let spans = match highlighter.highlight_line(line, &SYNTAX_SET) {
                        Ok(ranges) => ranges
                            .into_iter()
                            .filter_map(|(style, fragment)| {
                                let fragment = fragment.trim_end_matches('\n');
                                if fragment.is_empty() {
                                    return None;
                                }
                                let fg = style.foreground;
                                Some(Span::styled(
                                    fragment.to_string(),
                                    Style::default().fg(Color::Rgb(fg.r, fg.g, fg.b)),
                                ))
                            })
                            .collect(),
                        Err(e) => {
                            log::debug!("Highlighting failed, falling back to plain: {e}");
                            vec![Span::raw(line.trim_end_matches('\n').to_string())]
                        }
                    };
                    self.new_line(spans);
                }
                self.code = CodeMode::Highlighted(highlighter);
            }
            CodeMode::Plain => {
                let style = Style::default().fg(self.palette.text);
                for line in text.lines() {
                    self.new_line(vec![Span::styled(line.to_string(), style)]);
                }
                self.code = CodeMode::Plain;
            }
            CodeMode::Off => {
                let style = self.style();
                self.span(Span::styled(text, style));
            }
        }
    }
}

fn heading_modifier(level: HeadingLevel) -> Modifier {
    match level {
        HeadingLevel::H1 => Modifier::BOLD | Modifier::UNDERLINED,
        HeadingLevel::H2 => Modifier::BOLD,
        _ => Modifier::BOLD | Modifier::ITALIC,
    }
}
