//! # Message Store
//!
//! Append-only conversation history. Messages are never edited or removed,
//! and iteration order is insertion order.

use chrono::{DateTime, Local};
use serde::Serialize;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// Unique within a process; assigned from a monotonic counter.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MessageId(pub u64);

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Message {
    pub id: MessageId,
    pub role: Role,
    /// Markdown source, stored verbatim.
    pub content: String,
    pub timestamp: DateTime<Local>,
}

#[derive(Debug, Default)]
pub struct MessageStore {
    messages: Vec<Message>,
    next_id: u64,
}

impl MessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message and return its id.
    pub fn push(&mut self, role: Role, content: impl Into<String>) -> MessageId {
        let id = MessageId(self.next_id);
        self.next_id += 1;
        self.messages.push(Message {
            id,
            role,
            content: content.into(),
            timestamp: Local::now(),
        });
        id
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_preserves_order_and_assigns_increasing_ids() {
        let mut store = MessageStore::new();
        let a = store.push(Role::User, "a");
        let b = store.push(Role::Assistant, "b");
        let c = store.push(Role::User, "c");

        assert!(a < b && b < c);
        let contents: Vec<&str> = store.messages().iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["a", "b", "c"]);
        assert_eq!(store.last().map(|m| m.role), Some(Role::User));
    }

    #[test]
    fn content_is_stored_verbatim() {
        let mut store = MessageStore::new();
        store.push(Role::User, "  **padded**\n");
        assert_eq!(store.messages()[0].content, "  **padded**\n");
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Assistant).unwrap(), "\"assistant\"");
    }
}
