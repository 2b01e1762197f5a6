//! # Core Application Logic
//!
//! This module contains agentchat's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No network. No UI.     │
//!                    └───────────┬─────────────┘
//!                                │ Effect
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │   Reply    │      │  Backend   │
//!     │  Adapter   │      │ Simulator  │      │   Client   │
//!     │ (ratatui)  │      │  (tokio)   │      │ (reqwest)  │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`format`] / [`draft`]: markdown toolbar helpers and the unsent draft
//! - [`message`]: the append-only message store
//! - [`agents`]: sidebar agents and selection
//! - [`dialog`]: Add Agent / Upload Document form state
//! - [`notify`]: transient notifications
//! - [`config`]: layered configuration

pub mod action;
pub mod agents;
pub mod config;
pub mod dialog;
pub mod draft;
pub mod format;
pub mod message;
pub mod notify;
pub mod state;
