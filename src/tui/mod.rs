//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! translates keyboard events into `core::Action` values, and executes the
//! `Effect`s that `update()` hands back by spawning tokio tasks.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event flow
//!
//! ```text
//! crossterm ──► TuiEvent ──► route_event ──► Action ──► update() ──► Effect
//!                                                           ▲           │
//!                                                           │     spawn task
//!                                                           └─── mpsc ◄─┘
//! ```
//!
//! Background tasks (reply timers, HTTP calls) only ever send `Action`s back
//! over the channel; the loop drains it with `try_recv` between frames, so
//! every state change happens on this thread.
//!
//! ## Redraw Strategy
//!
//! - **Animating** (reply pending or toast visible): draws every ~80ms so the
//!   spinner moves and the toast expires on time.
//! - **Idle**: sleeps up to 500ms and only redraws on events.

mod component;
mod components;
mod event;
pub mod markdown;
pub mod theme;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::task::AbortHandle;

use crate::backend::{AgentBackend, HttpBackend, NewAgent};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::reply::{ReplyHandle, ReplySimulator};
use crate::tui::component::EventHandler;
use crate::tui::components::{
    DialogEvent, InputBox, InputEvent, MessageListState, SidebarEvent, SidebarInput, dialog,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::theme::Palette;

const ANIMATION_FRAME: Duration = Duration::from_millis(80);
const IDLE_POLL: Duration = Duration::from_millis(500);

/// Which pane receives keys when no dialog is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Chat,
    Sidebar,
}

impl Focus {
    fn toggle(self) -> Self {
        match self {
            Focus::Chat => Focus::Sidebar,
            Focus::Sidebar => Focus::Chat,
        }
    }
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub palette: Palette,
    pub focus: Focus,
    /// Set by `draw_ui`; narrow terminals drop the sidebar.
    pub sidebar_visible: bool,
    pub message_list: MessageListState,
    pub input_box: InputBox,
}

impl TuiState {
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            focus: Focus::Chat, // User expects to type immediately
            sidebar_visible: true,
            message_list: MessageListState::new(),
            input_box: InputBox::new(palette),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol lets Shift+Enter and Alt+letter arrive intact;
        // terminals without it ignore the request.
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock, // blinking cursors flicker under continuous redraws
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

/// Everything needed to carry out an `Effect`.
struct Executor {
    backend: Arc<dyn AgentBackend>,
    simulator: ReplySimulator,
    tx: UnboundedSender<Action>,
    /// Armed reply timers; cancelled on teardown.
    replies: Vec<ReplyHandle>,
    /// In-flight HTTP tasks; aborted on teardown.
    requests: Vec<AbortHandle>,
}

impl Executor {
    fn new(
        backend: Arc<dyn AgentBackend>,
        simulator: ReplySimulator,
        tx: UnboundedSender<Action>,
    ) -> Self {
        Self {
            backend,
            simulator,
            tx,
            replies: Vec::new(),
            requests: Vec::new(),
        }
    }

    /// Run one effect. Returns `true` when the app should quit.
    fn execute(&mut self, effect: Effect) -> bool {
        match effect {
            Effect::None => {}
            Effect::Quit => return true,
            Effect::ArmReply(ticket) => {
                let handle = self.simulator.arm(ticket, self.tx.clone());
                self.replies.push(handle);
            }
            Effect::CreateAgent(request) => {
                let handle = spawn_create_agent(self.backend.clone(), request, self.tx.clone());
                self.requests.push(handle);
            }
            Effect::UploadDocument(path) => {
                let handle = spawn_upload(self.backend.clone(), path, self.tx.clone());
                self.requests.push(handle);
            }
            Effect::FetchDocuments => {
                let handle = spawn_fetch_documents(self.backend.clone(), self.tx.clone());
                self.requests.push(handle);
            }
        }
        false
    }

    fn prune_finished(&mut self) {
        self.replies.retain(|handle| !handle.is_finished());
        self.requests.retain(|handle| !handle.is_finished());
    }

    fn shutdown(&mut self) {
        if !self.replies.is_empty() {
            info!("Cancelling {} pending replies", self.replies.len());
        }
        for handle in self.replies.drain(..) {
            handle.cancel();
        }
        for handle in self.requests.drain(..) {
            handle.abort();
        }
    }
}

/// Apply `action` and carry out its effect. Returns `true` to quit.
fn dispatch(app: &mut App, executor: &mut Executor, action: Action) -> bool {
    let effect = update(app, action);
    if effect != Effect::None {
        debug!("Executing effect: {:?}", effect);
    }
    executor.execute(effect)
}

/// Turn a terminal event into at most one `Action`. Events that only touch
/// presentation state (typing, scrolling, focus, form editing) are handled
/// here and yield `None`.
fn route_event(app: &mut App, tui: &mut TuiState, event: &TuiEvent) -> Option<Action> {
    match event {
        TuiEvent::Resize => return None,
        TuiEvent::ForceQuit => return Some(Action::Quit),
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown => {
            tui.message_list.handle_event(event);
            return None;
        }
        _ => {}
    }

    // An open modal captures the keyboard.
    if let Some(open) = app.dialog.as_mut() {
        return match dialog::handle_event(open, event)? {
            DialogEvent::Submit => Some(Action::SubmitDialog),
            DialogEvent::Cancel => Some(Action::CloseDialog),
        };
    }

    match event {
        TuiEvent::OpenAddAgent => return Some(Action::OpenAddAgent),
        TuiEvent::OpenUpload => return Some(Action::OpenUpload),
        TuiEvent::RefreshDocuments => return Some(Action::RefreshDocuments),
        TuiEvent::FocusNext | TuiEvent::FocusPrev => {
            if tui.sidebar_visible {
                tui.focus = tui.focus.toggle();
            }
            return None;
        }
        TuiEvent::Escape if app.notification.is_some() => {
            return Some(Action::DismissNotification);
        }
        TuiEvent::Escape => {
            tui.focus = Focus::Chat;
            return None;
        }
        _ => {}
    }

    match tui.focus {
        Focus::Sidebar => match SidebarInput.handle_event(event)? {
            SidebarEvent::SelectNext => Some(Action::SelectNextAgent),
            SidebarEvent::SelectPrev => Some(Action::SelectPrevAgent),
            SidebarEvent::NewAgent => Some(Action::OpenAddAgent),
            SidebarEvent::Upload => Some(Action::OpenUpload),
        },
        Focus::Chat => match tui.input_box.handle_event(event)? {
            InputEvent::Submit(text) => Some(Action::Submit(text)),
            InputEvent::ContentChanged | InputEvent::TogglePreview => None,
        },
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let backend: Arc<dyn AgentBackend> = Arc::new(HttpBackend::new(
        config.base_url.clone(),
        config.request_timeout,
    ));
    let simulator = ReplySimulator::new(config.reply_delay);
    let mut app = App::from_config(&config);
    let mut tui = TuiState::new(Palette::for_theme(config.theme));

    // Channel for actions from background tasks
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut executor = Executor::new(backend, simulator, tx);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new()
        .inspect_err(|e| warn!("Failed to enable terminal modes: {e}"))
        .ok();

    dispatch(&mut app, &mut executor, Action::RefreshDocuments);

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        let animating = app.is_awaiting_reply() || app.notification.is_some();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame =
                (start_time.elapsed().as_millis() / ANIMATION_FRAME.as_millis()) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating { ANIMATION_FRAME } else { IDLE_POLL };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if let Some(action) = route_event(&mut app, &mut tui, &event) {
                debug!("Dispatching {:?}", action);
                if dispatch(&mut app, &mut executor, action) {
                    should_quit = true;
                    break;
                }
            }
        }
        if should_quit {
            break;
        }

        // Results from background tasks
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            dispatch(&mut app, &mut executor, action);
        }

        dispatch(&mut app, &mut executor, Action::Tick(Instant::now()));
        executor.prune_finished();
    }

    executor.shutdown();
    ratatui::restore();
    info!("agentchat exiting with {} messages", app.messages.len());
    Ok(())
}

fn spawn_create_agent(
    backend: Arc<dyn AgentBackend>,
    request: NewAgent,
    tx: UnboundedSender<Action>,
) -> AbortHandle {
    info!("Spawning create-agent request for '{}'", request.name);
    tokio::spawn(async move {
        let result = backend.create_agent(&request).await.map(|()| request);
        if tx.send(Action::AgentCreated(result)).is_err() {
            warn!("Failed to deliver create-agent result: receiver dropped");
        }
    })
    .abort_handle()
}

fn spawn_upload(
    backend: Arc<dyn AgentBackend>,
    path: PathBuf,
    tx: UnboundedSender<Action>,
) -> AbortHandle {
    info!("Spawning upload of {}", path.display());
    tokio::spawn(async move {
        let result = backend.upload_document(&path).await;
        if tx.send(Action::UploadFinished(result)).is_err() {
            warn!("Failed to deliver upload result: receiver dropped");
        }
    })
    .abort_handle()
}

fn spawn_fetch_documents(
    backend: Arc<dyn AgentBackend>,
    tx: UnboundedSender<Action>,
) -> AbortHandle {
    debug!("Spawning document listing request");
    tokio::spawn(async move {
        let result = backend.list_documents().await;
        if tx.send(Action::DocumentsLoaded(result)).is_err() {
            warn!("Failed to deliver document listing: receiver dropped");
        }
    })
    .abort_handle()
}
