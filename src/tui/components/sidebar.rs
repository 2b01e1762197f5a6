//! # Sidebar Component
//!
//! Left column: the agent list (single selection, highlighted), the two
//! modal shortcuts, and the document listing fetched from the backend.
//!
//! Selection lives in `core::agents::AgentStore`; the sidebar only turns
//! key presses into `SidebarEvent`s while it has focus.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, List, ListItem, ListState, Paragraph, Wrap};

use crate::core::agents::AgentStore;
use crate::core::state::DocumentsView;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::theme::Palette;

pub const SIDEBAR_WIDTH: u16 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarEvent {
    SelectNext,
    SelectPrev,
    NewAgent,
    Upload,
}

/// Key handling for the sidebar while it has focus.
pub struct SidebarInput;

impl EventHandler for SidebarInput {
    type Event = SidebarEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::CursorDown | TuiEvent::InputChar('j') => Some(SidebarEvent::SelectNext),
            TuiEvent::CursorUp | TuiEvent::InputChar('k') => Some(SidebarEvent::SelectPrev),
            TuiEvent::InputChar('n') => Some(SidebarEvent::NewAgent),
            TuiEvent::InputChar('u') => Some(SidebarEvent::Upload),
            _ => None,
        }
    }
}

pub struct Sidebar<'a> {
    pub agents: &'a AgentStore,
    pub documents: &'a DocumentsView,
    /// Shown when the listing could not be fetched.
    pub backend_url: &'a str,
    pub focused: bool,
    pub palette: &'a Palette,
}

impl<'a> Sidebar<'a> {
    pub fn new(
        agents: &'a AgentStore,
        documents: &'a DocumentsView,
        backend_url: &'a str,
        focused: bool,
        palette: &'a Palette,
    ) -> Self {
        Self {
            agents,
            documents,
            backend_url,
            focused,
            palette,
        }
    }

    fn section(&self, title: &'static str, focused: bool) -> Block<'static> {
        Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(self.palette.border_style(focused))
            .title(Span::styled(
                title,
                Style::default()
                    .fg(self.palette.accent)
                    .add_modifier(Modifier::BOLD),
            ))
    }

    fn render_agents(&self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = self
            .agents
            .agents()
            .iter()
            .map(|agent| {
                ListItem::new(vec![
                    Line::styled(
                        agent.name.clone(),
                        Style::default()
                            .fg(self.palette.text)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Line::styled(
                        format!("  {}", agent.description),
                        Style::default().fg(self.palette.muted),
                    ),
                ])
            })
            .collect();

        let list = List::new(items)
            .block(self.section(" Agents ", self.focused))
            .highlight_style(Style::default().bg(self.palette.selection_bg))
            .highlight_symbol("▌");
        let mut state = ListState::default().with_selected(self.agents.selected_index());
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn render_actions(&self, frame: &mut Frame, area: Rect) {
        let key = Style::default().fg(self.palette.accent);
        let label = Style::default().fg(self.palette.muted);
        let lines = vec![
            Line::from(vec![
                Span::styled(" Ctrl+N ", key),
                Span::styled("New Agent", label),
            ]),
            Line::from(vec![
                Span::styled(" Ctrl+U ", key),
                Span::styled("Upload Document", label),
            ]),
        ];
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn render_documents(&self, frame: &mut Frame, area: Rect) {
        let muted = Style::default().fg(self.palette.muted);
        let lines: Vec<Line> = match self.documents {
            DocumentsView::Loading => vec![Line::styled("Loading...", muted)],
            DocumentsView::Unavailable => vec![
                Line::styled("Unavailable (Ctrl+R)", muted),
                Line::styled(self.backend_url.to_string(), muted),
            ],
            DocumentsView::Loaded(docs) if docs.is_empty() => {
                vec![Line::styled("No documents", muted)]
            }
            DocumentsView::Loaded(docs) => docs
                .iter()
                .map(|doc| {
                    Line::from(vec![
                        Span::styled(doc.filename.clone(), Style::default().fg(self.palette.text)),
                        Span::styled(format!(" {}", short_date(&doc.upload_date)), muted),
                    ])
                })
                .collect(),
        };
        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .block(self.section(" Documents ", false)),
            area,
        );
    }
}

/// `2024-05-01T12:00:00` → `2024-05-01`; anything else is shown as-is.
fn short_date(raw: &str) -> &str {
    raw.split_once('T').map_or(raw, |(date, _)| date)
}

impl Component for Sidebar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let agent_rows = (self.agents.len() as u16).saturating_mul(2) + 2;
        let [agents_area, actions_area, docs_area] = Layout::vertical([
            Constraint::Max(agent_rows.max(3)),
            Constraint::Length(2),
            Constraint::Min(3),
        ])
        .areas(area);

        self.render_agents(frame, agents_area);
        self.render_actions(frame, actions_area);
        self.render_documents(frame, docs_area);
    }
}
