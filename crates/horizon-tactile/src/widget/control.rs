//! Deferred commands for controls.
//!
//! Callbacks run while the control that invoked them is mutably borrowed, so
//! they cannot call back into it directly. Instead they capture a
//! [`ControlHandle`] and send a command; the control applies queued commands
//! at the end of the current dispatch, after all notifications for it.
//!
//! ```ignore
//! let handle = button.handle();
//! button.clicked.connect(move |_| {
//!     handle.send(ButtonCommand::Close);
//! });
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crossbeam_channel::{Receiver, Sender, unbounded};

use super::targets;

/// Receiving end of a control's command queue, owned by the control.
pub struct ControlLink<Cmd> {
    sender: Sender<Cmd>,
    receiver: Receiver<Cmd>,
    alive: Arc<AtomicBool>,
}

impl<Cmd> ControlLink<Cmd> {
    /// Create an open link with an empty queue.
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self {
            sender,
            receiver,
            alive: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Create a handle that feeds this link.
    pub fn handle(&self) -> ControlHandle<Cmd> {
        ControlHandle {
            sender: self.sender.clone(),
            alive: self.alive.clone(),
        }
    }

    /// Take the next queued command, if any.
    pub fn next_command(&self) -> Option<Cmd> {
        self.receiver.try_recv().ok()
    }

    /// Number of queued commands.
    pub fn pending(&self) -> usize {
        self.receiver.len()
    }

    /// Whether the control still accepts commands.
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    /// Mark the control dead and discard queued commands.
    pub fn close(&self) {
        self.alive.store(false, Ordering::SeqCst);
        let discarded = self.receiver.try_iter().count();
        if discarded > 0 {
            tracing::debug!(target: targets::CONTROL, discarded, "discarded commands of closed control");
        }
    }
}

impl<Cmd> Default for ControlLink<Cmd> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Cmd> Drop for ControlLink<Cmd> {
    fn drop(&mut self) {
        self.alive.store(false, Ordering::SeqCst);
    }
}

/// A cloneable sender of commands to one control.
pub struct ControlHandle<Cmd> {
    sender: Sender<Cmd>,
    alive: Arc<AtomicBool>,
}

impl<Cmd> ControlHandle<Cmd> {
    /// Queue `command` for the control.
    ///
    /// Returns `false` if the control has been closed or dropped.
    pub fn send(&self, command: Cmd) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.sender.send(command).is_ok()
    }

    /// Whether the control still accepts commands.
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }
}

impl<Cmd> Clone for ControlHandle<Cmd> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            alive: self.alive.clone(),
        }
    }
}

impl<Cmd> std::fmt::Debug for ControlHandle<Cmd> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControlHandle")
            .field("alive", &self.is_alive())
            .finish()
    }
}

static_assertions::assert_impl_all!(ControlHandle<bool>: Send, Sync, Clone);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_arrive_in_order() {
        let link = ControlLink::new();
        let handle = link.handle();

        assert!(handle.send(1));
        assert!(handle.clone().send(2));
        assert_eq!(link.pending(), 2);

        assert_eq!(link.next_command(), Some(1));
        assert_eq!(link.next_command(), Some(2));
        assert_eq!(link.next_command(), None);
    }

    #[test]
    fn test_closed_link_rejects_commands() {
        let link = ControlLink::new();
        let handle = link.handle();
        handle.send("queued");

        link.close();

        assert!(!handle.is_alive());
        assert!(!handle.send("late"));
        assert_eq!(link.next_command(), None);
    }

    #[test]
    fn test_dropped_link_marks_handles_dead() {
        let link = ControlLink::<u8>::new();
        let handle = link.handle();
        drop(link);

        assert!(!handle.is_alive());
        assert!(!handle.send(1));
    }
}
