//! # Application State
//!
//! Core business state. No terminal types live here; presentation state
//! (focus, scroll, cursor) belongs to the `tui` module.
//!
//! ```text
//! App
//! ├── messages: MessageStore            // append-only conversation
//! ├── pending_replies: BTreeSet         // reply tickets whose timer is armed
//! ├── reply_text: String                // canned assistant body
//! ├── agents: AgentStore                // sidebar agents + selection
//! ├── documents: DocumentsView          // sidebar document listing
//! ├── dialog: Option<Dialog>            // open modal, if any
//! ├── create_in_flight: bool            // POST /agents outstanding
//! ├── upload_in_flight: bool            // POST /upload outstanding
//! ├── notification: Option<Notification>
//! ├── status_message: String            // title bar text
//! ├── backend_url: String
//! └── sync_created_agents: bool         // append created agents to the list
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::collections::BTreeSet;

use crate::backend::DocumentMeta;
use crate::core::agents::AgentStore;
use crate::core::config::ResolvedConfig;
use crate::core::dialog::Dialog;
use crate::core::message::MessageStore;
use crate::core::notify::Notification;
use crate::reply::DEFAULT_REPLY_TEXT;

/// Identifies one armed reply timer. Issued in increasing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReplyTicket(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub enum DocumentsView {
    Loading,
    Loaded(Vec<DocumentMeta>),
    Unavailable,
}

pub struct App {
    pub messages: MessageStore,
    pub pending_replies: BTreeSet<ReplyTicket>,
    next_ticket: u64,
    pub reply_text: String,
    pub agents: AgentStore,
    pub documents: DocumentsView,
    pub dialog: Option<Dialog>,
    /// Outlive the dialog: closing a pending modal does not cancel its request.
    pub create_in_flight: bool,
    pub upload_in_flight: bool,
    pub notification: Option<Notification>,
    pub status_message: String,
    pub backend_url: String,
    pub sync_created_agents: bool,
}

impl App {
    pub fn new(agents: AgentStore, backend_url: String) -> Self {
        Self {
            messages: MessageStore::new(),
            pending_replies: BTreeSet::new(),
            next_ticket: 0,
            reply_text: DEFAULT_REPLY_TEXT.to_string(),
            agents,
            documents: DocumentsView::Loading,
            dialog: None,
            create_in_flight: false,
            upload_in_flight: false,
            notification: None,
            status_message: String::from("Ready"),
            backend_url,
            sync_created_agents: false,
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        let mut app = Self::new(
            AgentStore::new(config.agents.clone()),
            config.base_url.clone(),
        );
        app.reply_text = config.reply_text.clone();
        app.sync_created_agents = config.sync_created_agents;
        app
    }

    /// True while at least one reply timer is armed.
    pub fn is_awaiting_reply(&self) -> bool {
        !self.pending_replies.is_empty()
    }

    pub(crate) fn issue_ticket(&mut self) -> ReplyTicket {
        let ticket = ReplyTicket(self.next_ticket);
        self.next_ticket += 1;
        self.pending_replies.insert(ticket);
        ticket
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.status_message, "Ready");
        assert!(!app.is_awaiting_reply());
        assert!(app.messages.is_empty());
        assert_eq!(app.agents.len(), 2);
        assert_eq!(app.documents, DocumentsView::Loading);
        assert!(app.dialog.is_none());
    }

    #[test]
    fn tickets_are_unique_and_tracked() {
        let mut app = test_app();
        let a = app.issue_ticket();
        let b = app.issue_ticket();
        assert!(a < b);
        assert_eq!(app.pending_replies.len(), 2);
        assert!(app.is_awaiting_reply());
    }
}
