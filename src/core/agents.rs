//! # Agent List
//!
//! In-memory, single-select collection of agents. Built once at startup from
//! the configured seed and moved into `App`; selection only drives sidebar
//! highlighting.

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Agent {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl Agent {
    pub fn new(id: impl Into<String>, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
        }
    }
}

/// The agents every fresh install starts with.
pub fn default_agents() -> Vec<Agent> {
    vec![
        Agent::new("1", "General Assistant", "A general-purpose AI assistant"),
        Agent::new("2", "Code Helper", "Specialized in coding assistance"),
    ]
}

#[derive(Debug, Clone)]
pub struct AgentStore {
    agents: Vec<Agent>,
    selected: Option<usize>,
}

impl AgentStore {
    /// First agent starts selected.
    pub fn new(agents: Vec<Agent>) -> Self {
        let selected = if agents.is_empty() { None } else { Some(0) };
        Self { agents, selected }
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected(&self) -> Option<&Agent> {
        self.selected.and_then(|i| self.agents.get(i))
    }

    /// Select by id. Returns false (and keeps the current selection) for unknown ids.
    pub fn select(&mut self, id: &str) -> bool {
        match self.agents.iter().position(|a| a.id == id) {
            Some(idx) => {
                self.selected = Some(idx);
                true
            }
            None => false,
        }
    }

    pub fn select_next(&mut self) {
        if let Some(idx) = self.selected {
            self.selected = Some((idx + 1).min(self.agents.len() - 1));
        } else if !self.agents.is_empty() {
            self.selected = Some(0);
        }
    }

    pub fn select_prev(&mut self) {
        if let Some(idx) = self.selected {
            self.selected = Some(idx.saturating_sub(1));
        } else if !self.agents.is_empty() {
            self.selected = Some(self.agents.len() - 1);
        }
    }

    /// Append an agent. Selection is left untouched.
    pub fn push(&mut self, agent: Agent) {
        self.agents.push(agent);
        if self.selected.is_none() {
            self.selected = Some(0);
        }
    }
}

impl Default for AgentStore {
    fn default() -> Self {
        Self::new(default_agents())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_agent_selected_by_default() {
        let store = AgentStore::default();
        assert_eq!(store.len(), 2);
        assert_eq!(store.selected().map(|a| a.name.as_str()), Some("General Assistant"));
    }

    #[test]
    fn empty_store_has_no_selection() {
        let mut store = AgentStore::new(Vec::new());
        assert!(store.selected().is_none());
        store.select_next();
        store.select_prev();
        assert!(store.selected().is_none());
    }

    #[test]
    fn select_by_id() {
        let mut store = AgentStore::default();
        assert!(store.select("2"));
        assert_eq!(store.selected_index(), Some(1));
        assert!(!store.select("missing"));
        assert_eq!(store.selected_index(), Some(1));
    }

    #[test]
    fn next_and_prev_clamp_at_edges() {
        let mut store = AgentStore::default();
        store.select_prev();
        assert_eq!(store.selected_index(), Some(0));
        store.select_next();
        store.select_next();
        assert_eq!(store.selected_index(), Some(1));
    }

    #[test]
    fn push_keeps_selection() {
        let mut store = AgentStore::default();
        store.select("2");
        store.push(Agent::new("x", "Researcher", "Finds things"));
        assert_eq!(store.len(), 3);
        assert_eq!(store.selected().map(|a| a.id.as_str()), Some("2"));
    }

    #[test]
    fn push_into_empty_store_selects_it() {
        let mut store = AgentStore::new(Vec::new());
        store.push(Agent::new("x", "Researcher", "Finds things"));
        assert_eq!(store.selected_index(), Some(0));
    }
}
