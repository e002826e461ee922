use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// A transition that fired; `token` identifies the `schedule` call it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expired<T> {
    pub token: u64,
    pub transition: T,
}

/// Handle to one delayed transition. Cancelling or dropping it aborts the timer.
#[derive(Debug)]
pub struct ScheduledTask {
    token: u64,
    handle: JoinHandle<()>,
}

impl ScheduledTask {
    pub fn token(&self) -> u64 {
        self.token
    }

    pub fn cancel(self) {
        self.handle.abort();
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Holds at most one pending delayed transition. Expirations are delivered
/// through the channel given to `new`; the owner must pass each one through
/// `accept` before applying it, which filters out anything that was already
/// queued when the task was replaced or cancelled.
pub struct DelayedTransitions<T> {
    sender: mpsc::UnboundedSender<Expired<T>>,
    next_token: u64,
    pending: Option<ScheduledTask>,
}

impl<T: Send + 'static> DelayedTransitions<T> {
    pub fn new(sender: mpsc::UnboundedSender<Expired<T>>) -> Self {
        Self {
            sender,
            next_token: 0,
            pending: None,
        }
    }

    /// Replaces any pending transition. Returns the token of the new one.
    pub fn schedule(&mut self, delay: Duration, transition: T) -> u64 {
        self.cancel();

        self.next_token += 1;
        let token = self.next_token;
        let sender = self.sender.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = sender.send(Expired { token, transition });
        });

        self.pending = Some(ScheduledTask { token, handle });
        token
    }

    /// Returns true if something was pending.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(task) => {
                task.cancel();
                true
            }
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending_token(&self) -> Option<u64> {
        self.pending.as_ref().map(ScheduledTask::token)
    }

    /// Clears the pending slot and returns true if `expired` belongs to it.
    pub fn accept(&mut self, expired: &Expired<T>) -> bool {
        if self.pending_token() == Some(expired.token) {
            self.pending = None;
            true
        } else {
            false
        }
    }
}
