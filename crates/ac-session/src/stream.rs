//! Change stream between a host input and its controller.
//!
//! The input pushes [`TextChange`]s into a [`ChangeSink`]; the controller
//! drains them on its next poll. While the controller writes to the input
//! itself it holds an [`EchoScope`], and everything emitted meanwhile is
//! dropped at the sink so its own writes never read as new edits.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use tracing::trace;

use crate::input::TextChange;

#[derive(Default)]
struct SinkState {
    pending: RefCell<VecDeque<TextChange>>,
    echo_depth: Cell<u32>,
    closed: Cell<bool>,
}

/// Receiving end of an input's change stream. Cloning shares the queue.
#[derive(Clone, Default)]
pub struct ChangeSink {
    state: Rc<SinkState>,
}

impl ChangeSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver a change from the input.
    pub fn emit(&self, change: TextChange) {
        if self.state.closed.get() {
            return;
        }
        if self.is_suppressed() {
            trace!(?change, "echo suppressed");
            return;
        }
        self.state.pending.borrow_mut().push_back(change);
    }

    /// True once the controller has gone away; inputs may prune the sink.
    pub fn is_closed(&self) -> bool {
        self.state.closed.get()
    }

    pub fn is_suppressed(&self) -> bool {
        self.state.echo_depth.get() > 0
    }

    pub fn has_pending(&self) -> bool {
        !self.state.pending.borrow().is_empty()
    }

    pub(crate) fn take_pending(&self) -> Vec<TextChange> {
        self.state.pending.borrow_mut().drain(..).collect()
    }

    /// Drop changes until the returned scope is released.
    pub(crate) fn suppress(&self) -> EchoScope {
        self.state.echo_depth.set(self.state.echo_depth.get() + 1);
        EchoScope {
            state: Rc::clone(&self.state),
        }
    }

    pub(crate) fn close(&self) {
        self.state.closed.set(true);
        self.state.pending.borrow_mut().clear();
    }
}

impl std::fmt::Debug for ChangeSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeSink")
            .field("pending", &self.state.pending.borrow().len())
            .field("suppressed", &self.is_suppressed())
            .field("closed", &self.is_closed())
            .finish()
    }
}

/// Held across a controller-initiated write. Released on drop, including
/// when the write unwinds.
#[must_use = "echo suppression ends as soon as the scope is dropped"]
pub(crate) struct EchoScope {
    state: Rc<SinkState>,
}

impl Drop for EchoScope {
    fn drop(&mut self) {
        self.state
            .echo_depth
            .set(self.state.echo_depth.get().saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_and_take() {
        let sink = ChangeSink::new();
        sink.emit(TextChange::user("", "a"));
        sink.emit(TextChange::programmatic("a", "b"));
        assert!(sink.has_pending());
        let changes = sink.take_pending();
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[1], TextChange::programmatic("a", "b"));
        assert!(!sink.has_pending());
    }

    #[test]
    fn test_suppressed_changes_are_dropped() {
        let sink = ChangeSink::new();
        {
            let _echo = sink.suppress();
            assert!(sink.is_suppressed());
            sink.emit(TextChange::programmatic("", "x"));
        }
        assert!(!sink.is_suppressed());
        sink.emit(TextChange::user("x", "xy"));
        assert_eq!(sink.take_pending(), vec![TextChange::user("x", "xy")]);
    }

    #[test]
    fn test_nested_scopes() {
        let sink = ChangeSink::new();
        let outer = sink.suppress();
        let inner = sink.suppress();
        drop(inner);
        assert!(sink.is_suppressed());
        drop(outer);
        assert!(!sink.is_suppressed());
    }

    #[test]
    fn test_scope_released_on_unwind() {
        let sink = ChangeSink::new();
        let clone = sink.clone();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _echo = clone.suppress();
            panic!("write failed");
        }));
        assert!(result.is_err());
        assert!(!sink.is_suppressed());
    }

    #[test]
    fn test_closed_sink_ignores_changes() {
        let sink = ChangeSink::new();
        sink.emit(TextChange::user("", "a"));
        sink.close();
        assert!(sink.is_closed());
        assert!(!sink.has_pending());
        sink.emit(TextChange::user("a", "ab"));
        assert!(!sink.has_pending());
    }
}
