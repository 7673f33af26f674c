use std::cell::RefCell;
use std::rc::Rc;

/// Observer of controller state transitions. Every method defaults to a
/// no-op; override the ones you care about.
pub trait CompletionListener {
    /// The baseline (settled, uncompleted) text changed.
    fn did_change_text(&mut self, _text: Option<&str>) {}

    /// `suffix` is about to be shown as marked text after `typed`.
    fn will_complete(&mut self, _typed: &str, _suffix: &str) {}

    /// `suffix` is now shown as marked text after `typed`.
    fn did_complete(&mut self, _typed: &str, _suffix: &str) {}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionEvent {
    TextChanged(Option<String>),
    WillComplete { typed: String, suffix: String },
    DidComplete { typed: String, suffix: String },
}

/// Listener that records every notification. Clones share one log, so a
/// clone can be handed to the controller and the other one inspected.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<CompletionEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<CompletionEvent> {
        self.events.borrow().clone()
    }

    /// Return and clear the recorded events.
    pub fn take(&self) -> Vec<CompletionEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    fn push(&self, event: CompletionEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl CompletionListener for EventLog {
    fn did_change_text(&mut self, text: Option<&str>) {
        self.push(CompletionEvent::TextChanged(text.map(str::to_string)));
    }

    fn will_complete(&mut self, typed: &str, suffix: &str) {
        self.push(CompletionEvent::WillComplete {
            typed: typed.to_string(),
            suffix: suffix.to_string(),
        });
    }

    fn did_complete(&mut self, typed: &str, suffix: &str) {
        self.push(CompletionEvent::DidComplete {
            typed: typed.to_string(),
            suffix: suffix.to_string(),
        });
    }
}
