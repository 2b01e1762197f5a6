//! agentchat library exports for testing

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub mod backend;
pub mod core;
pub mod reply;
pub mod tui;

#[cfg(test)]
pub mod test_support;

/// Colour scheme for the whole UI.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Lavender,
    Slate,
}
