//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::core::agents::AgentStore;
use crate::core::dialog::AddAgentForm;
use crate::core::state::App;

/// Creates a test App with the default agents and the default backend URL.
pub fn test_app() -> App {
    App::new(
        AgentStore::default(),
        crate::backend::client::DEFAULT_BASE_URL.to_string(),
    )
}

/// An Add Agent form with every field filled in.
pub fn filled_agent_form() -> AddAgentForm {
    AddAgentForm {
        name: "Researcher".to_string(),
        description: "Finds things".to_string(),
        capabilities: "research, analysis".to_string(),
        ..Default::default()
    }
}
