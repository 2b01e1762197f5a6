//! # Actions
//!
//! Everything that can happen in agentchat becomes an `Action`.
//! User presses Enter? That's `Action::Submit(text)`.
//! A reply timer fires? That's `Action::ReplyReady(ticket)`.
//!
//! `update()` applies an action to the state and returns the `Effect` the
//! adapter must carry out (arm a timer, send a request). No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use std::path::PathBuf;
use std::time::Instant;

use log::{debug, info, warn};

use crate::backend::{BackendError, DocumentMeta, NewAgent, UploadReceipt};
use crate::core::agents::Agent;
use crate::core::dialog::{AddAgentForm, Dialog, UploadForm};
use crate::core::message::Role;
use crate::core::notify::Notification;
use crate::core::state::{App, DocumentsView, ReplyTicket};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Send the draft text as a user message.
    Submit(String),
    /// A reply timer expired.
    ReplyReady(ReplyTicket),
    SelectAgent(String),
    SelectNextAgent,
    SelectPrevAgent,
    OpenAddAgent,
    OpenUpload,
    CloseDialog,
    /// Submit whichever modal is open.
    SubmitDialog,
    /// Outcome of `Effect::CreateAgent`; echoes the request on success.
    AgentCreated(Result<NewAgent, BackendError>),
    UploadFinished(Result<UploadReceipt, BackendError>),
    RefreshDocuments,
    DocumentsLoaded(Result<Vec<DocumentMeta>, BackendError>),
    /// Periodic clock; clears an expired notification.
    Tick(Instant),
    DismissNotification,
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    ArmReply(ReplyTicket),
    CreateAgent(NewAgent),
    UploadDocument(PathBuf),
    FetchDocuments,
}

pub const AGENT_CREATED: &str = "Agent created successfully";
pub const AGENT_FAILED: &str = "Failed to create agent";
pub const UPLOAD_DONE: &str = "Document uploaded successfully";
pub const UPLOAD_FAILED: &str = "Failed to upload document";
pub const DOCUMENTS_FAILED: &str = "Failed to load documents";

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Submit(text) => {
            if text.trim().is_empty() {
                debug!("Ignoring blank submission");
                return Effect::None;
            }
            app.messages.push(Role::User, text);
            let ticket = app.issue_ticket();
            app.status_message = String::from("Thinking...");
            debug!("User message appended, arming reply {:?}", ticket);
            Effect::ArmReply(ticket)
        }

        Action::ReplyReady(ticket) => {
            if !app.pending_replies.remove(&ticket) {
                debug!("Ignoring reply for unknown ticket {:?}", ticket);
                return Effect::None;
            }
            app.messages.push(Role::Assistant, app.reply_text.clone());
            if !app.is_awaiting_reply() {
                app.status_message = String::from("Ready");
            }
            Effect::None
        }

        Action::SelectAgent(id) => {
            if !app.agents.select(&id) {
                debug!("Ignoring selection of unknown agent {id}");
            }
            Effect::None
        }
        Action::SelectNextAgent => {
            app.agents.select_next();
            Effect::None
        }
        Action::SelectPrevAgent => {
            app.agents.select_prev();
            Effect::None
        }

        Action::OpenAddAgent => {
            let form = AddAgentForm {
                pending: app.create_in_flight,
                ..AddAgentForm::new()
            };
            open_dialog(app, Dialog::AddAgent(form));
            Effect::None
        }
        Action::OpenUpload => {
            let form = UploadForm {
                pending: app.upload_in_flight,
                ..UploadForm::new()
            };
            open_dialog(app, Dialog::Upload(form));
            Effect::None
        }
        Action::CloseDialog => {
            app.dialog = None;
            Effect::None
        }

        Action::SubmitDialog => match app.dialog.as_mut() {
            Some(Dialog::AddAgent(form)) if !form.pending && !app.create_in_flight => {
                match form.request() {
                    Some(request) => {
                        form.pending = true;
                        app.create_in_flight = true;
                        Effect::CreateAgent(request)
                    }
                    None => Effect::None,
                }
            }
            Some(Dialog::Upload(form)) if !form.pending && !app.upload_in_flight => {
                match form.request() {
                    Some(path) => {
                        form.pending = true;
                        app.upload_in_flight = true;
                        Effect::UploadDocument(path)
                    }
                    None => Effect::None,
                }
            }
            _ => Effect::None,
        },

        Action::AgentCreated(result) => {
            app.create_in_flight = false;
            let open_form = match app.dialog.as_mut() {
                Some(Dialog::AddAgent(form)) => Some(form),
                _ => None,
            };
            match result {
                Ok(request) => {
                    info!("Agent '{}' created", request.name);
                    app.notification = Some(Notification::success(AGENT_CREATED));
                    if open_form.is_some() {
                        app.dialog = None;
                    }
                    if app.sync_created_agents {
                        app.agents.push(Agent::new(
                            uuid::Uuid::new_v4().to_string(),
                            request.name,
                            request.description,
                        ));
                    }
                }
                Err(e) => {
                    warn!("Create agent failed: {e}");
                    app.notification = Some(Notification::error(AGENT_FAILED));
                    if let Some(form) = open_form {
                        form.pending = false;
                    }
                }
            }
            Effect::None
        }

        Action::UploadFinished(result) => {
            app.upload_in_flight = false;
            let open_form = match app.dialog.as_mut() {
                Some(Dialog::Upload(form)) => Some(form),
                _ => None,
            };
            match result {
                Ok(receipt) => {
                    info!("Upload complete: {:?}", receipt.document_id);
                    app.notification = Some(Notification::success(UPLOAD_DONE));
                    if open_form.is_some() {
                        app.dialog = None;
                    }
                }
                Err(e) => {
                    warn!("Upload failed: {e}");
                    app.notification = Some(Notification::error(UPLOAD_FAILED));
                    if let Some(form) = open_form {
                        form.pending = false;
                    }
                }
            }
            Effect::None
        }

        Action::RefreshDocuments => {
            app.documents = DocumentsView::Loading;
            Effect::FetchDocuments
        }
        Action::DocumentsLoaded(Ok(documents)) => {
            app.documents = DocumentsView::Loaded(documents);
            Effect::None
        }
        Action::DocumentsLoaded(Err(e)) => {
            warn!("Listing documents failed: {e}");
            app.documents = DocumentsView::Unavailable;
            app.notification = Some(Notification::error(DOCUMENTS_FAILED));
            Effect::None
        }

        Action::Tick(now) => {
            if app.notification.as_ref().is_some_and(|n| n.is_expired(now)) {
                app.notification = None;
            }
            Effect::None
        }
        Action::DismissNotification => {
            app.notification = None;
            Effect::None
        }

        Action::Quit => Effect::Quit,
    }
}

/// A modal with a request in flight stays up until its result arrives.
fn open_dialog(app: &mut App, dialog: Dialog) {
    if app.dialog.as_ref().is_some_and(Dialog::is_pending) {
        debug!("Not opening a dialog over a pending one");
        return;
    }
    app.dialog = Some(dialog);
}
