//! # Reply Simulator
//!
//! Stands in for a real assistant: each armed ticket sleeps a fixed delay on
//! the tokio runtime and then delivers `Action::ReplyReady` exactly once.
//! Every arming returns a [`ReplyHandle`] so the owner can cancel timers it no
//! longer wants to hear from.

use std::time::Duration;

use log::{debug, warn};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::AbortHandle;

use crate::core::action::Action;
use crate::core::state::ReplyTicket;

pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(1000);
pub const DEFAULT_REPLY_TEXT: &str =
    "This is a simulated AI response. The backend integration will be implemented later.";

#[derive(Debug, Clone, Copy)]
pub struct ReplySimulator {
    delay: Duration,
}

impl Default for ReplySimulator {
    fn default() -> Self {
        Self::new(DEFAULT_REPLY_DELAY)
    }
}

impl ReplySimulator {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Arm one timer for `ticket`. Must be called inside a tokio runtime.
    pub fn arm(&self, ticket: ReplyTicket, tx: UnboundedSender<Action>) -> ReplyHandle {
        let delay = self.delay;
        debug!("Arming reply {:?} for {:?}", ticket, delay);
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if tx.send(Action::ReplyReady(ticket)).is_err() {
                warn!("Reply {:?} fired after receiver was dropped", ticket);
            }
        });
        ReplyHandle {
            ticket,
            abort: task.abort_handle(),
        }
    }
}

/// Cancellation token for one armed reply.
#[derive(Debug)]
pub struct ReplyHandle {
    ticket: ReplyTicket,
    abort: AbortHandle,
}

impl ReplyHandle {
    pub fn ticket(&self) -> ReplyTicket {
        self.ticket
    }

    /// Stop the timer. A reply that already fired is unaffected.
    pub fn cancel(&self) {
        self.abort.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.abort.is_finished()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc::unbounded_channel;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn delivers_once_after_delay() {
        let (tx, mut rx) = unbounded_channel();
        let simulator = ReplySimulator::new(Duration::from_millis(1000));
        let start = Instant::now();

        let handle = simulator.arm(ReplyTicket(7), tx);
        assert_eq!(handle.ticket(), ReplyTicket(7));

        let action = rx.recv().await.expect("reply should arrive");
        assert!(matches!(action, Action::ReplyReady(ReplyTicket(7))));
        assert!(start.elapsed() >= Duration::from_millis(1000));
        // Sender dropped with the task: nothing else arrives.
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_reply_never_arrives() {
        let (tx, mut rx) = unbounded_channel();
        let handle = ReplySimulator::default().arm(ReplyTicket(1), tx);
        handle.cancel();
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn each_reply_is_delayed_from_its_own_arming() {
        let (tx, mut rx) = unbounded_channel();
        let simulator = ReplySimulator::new(Duration::from_millis(1000));
        let start = Instant::now();

        simulator.arm(ReplyTicket(0), tx.clone());
        tokio::time::sleep(Duration::from_millis(300)).await;
        simulator.arm(ReplyTicket(1), tx);

        let first = rx.recv().await.expect("first reply");
        assert!(matches!(first, Action::ReplyReady(ReplyTicket(0))));
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(1000) && elapsed < Duration::from_millis(1300));

        let second = rx.recv().await.expect("second reply");
        assert!(matches!(second, Action::ReplyReady(ReplyTicket(1))));
        assert!(start.elapsed() >= Duration::from_millis(1300));
    }
}
