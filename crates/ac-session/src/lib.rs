//! Inline completion controller for a single-line text input.
//!
//! `AutoCompletion` watches a host input through the [`TextInput`] trait.
//! After each user edit (debounced) it re-reads the input, classifies the
//! edit against its baseline, and either proposes a completion as marked
//! text, leaves things alone, or repairs stale marked text.
//!
//! The host drives it from its event loop: deliver changes on the stream
//! handed to [`TextInput::subscribe`], then call [`AutoCompletion::poll`]
//! (and again at [`AutoCompletion::next_deadline`]).

mod complete;
pub mod input;
mod listener;
mod memory_input;
mod reconcile;
pub mod scheduler;
mod snapshot;
mod stream;
mod types;

#[cfg(test)]
mod tests;

use std::time::Instant;

use tracing::{debug, debug_span};

use ac_core::gating::InputGate;
use ac_core::settings::{settings, Settings};
use ac_core::source::SuggestionSource;

pub use input::{ChangeOrigin, SubscriptionId, TextChange, TextInput, TextRange, TextTraits};
pub use listener::{CompletionEvent, CompletionListener, EventLog};
pub use memory_input::MemoryInput;
pub use snapshot::read_snapshot;
pub use stream::ChangeSink;
pub use types::{CompletionResult, InputSnapshot};

use scheduler::{Scheduler, TaskId};

/// The host input is configured in a way that fights marked text.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AttachError {
    #[error("text input must have autocorrection disabled")]
    AutocorrectionEnabled,
    #[error("text input must have spell checking disabled")]
    SpellCheckingEnabled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Deferred {
    ProcessInput,
}

/// Completion controller bound to one text input.
pub struct AutoCompletion<I: TextInput> {
    input: I,
    source: Option<Box<dyn SuggestionSource>>,
    listener: Option<Box<dyn CompletionListener>>,

    settings: Settings,
    gate: InputGate,

    /// Last settled text, without any proposal of ours.
    baseline: Option<String>,
    last_result: Option<CompletionResult>,

    sink: ChangeSink,
    subscription: SubscriptionId,
    scheduler: Scheduler<Deferred>,
    pending_pass: Option<TaskId>,
}

impl<I: TextInput> AutoCompletion<I> {
    /// Attach to `input` using the global settings.
    pub fn attach(input: I) -> Result<Self, AttachError> {
        Self::attach_with_settings(input, settings().clone())
    }

    pub fn attach_with_settings(mut input: I, settings: Settings) -> Result<Self, AttachError> {
        let traits = input.text_traits();
        if traits.autocorrection {
            return Err(AttachError::AutocorrectionEnabled);
        }
        if traits.spell_checking {
            return Err(AttachError::SpellCheckingEnabled);
        }

        let sink = ChangeSink::new();
        let subscription = input.subscribe(sink.clone());
        debug!(?subscription, "attached to text input");

        Ok(Self {
            input,
            source: None,
            listener: None,
            gate: InputGate::new(&settings.gating),
            settings,
            baseline: None,
            last_result: None,
            sink,
            subscription,
            scheduler: Scheduler::new(),
            pending_pass: None,
        })
    }

    pub fn set_source(&mut self, source: impl SuggestionSource + 'static) {
        self.source = Some(Box::new(source));
    }

    pub fn clear_source(&mut self) {
        self.source = None;
    }

    pub fn set_listener(&mut self, listener: impl CompletionListener + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn take_listener(&mut self) -> Option<Box<dyn CompletionListener>> {
        self.listener.take()
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    /// Mutable access for user edits; changes reach the controller through
    /// the change stream.
    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The text the controller last considered settled.
    pub fn baseline(&self) -> Option<&str> {
        self.baseline.as_deref()
    }

    pub fn last_result(&self) -> Option<&CompletionResult> {
        self.last_result.as_ref()
    }

    /// True while the input shows marked text and the keyboard language
    /// supports completion, i.e. the visible text may still be a proposal.
    pub fn is_completed(&self) -> bool {
        self.input.marked_text_range().is_some()
            && self.gate.allows_language(self.input.input_mode().as_ref())
    }

    /// Completion is enabled for the current keyboard language and mode.
    pub fn should_complete(&self) -> bool {
        self.gate.allows(self.input.input_mode().as_ref())
    }

    /// The user pressed on the input: commit whatever is marked and stop
    /// trusting the last proposal.
    pub fn pointer_down(&mut self) {
        let _span = debug_span!("pointer_down").entered();
        self.input.unmark_text();
        if self.last_result.take().is_some() {
            debug!("discarded last completion");
        }
    }

    // --- Event loop ---

    /// Drain the change stream and run every pass due at `now`.
    pub fn poll(&mut self, now: Instant) {
        self.drain_changes(now);
        while let Some((id, task)) = self.scheduler.pop_due(now) {
            self.run_task(id, task);
            self.drain_changes(now);
        }
    }

    /// Run all pending work immediately, ignoring deadlines.
    pub fn flush(&mut self) {
        let now = Instant::now();
        self.drain_changes(now);
        while let Some((id, task)) = self.scheduler.pop_next() {
            self.run_task(id, task);
            self.drain_changes(now);
        }
    }

    /// When the next deferred pass becomes due.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.next_deadline()
    }

    pub fn has_pending_work(&self) -> bool {
        self.sink.has_pending() || !self.scheduler.is_empty()
    }

    fn drain_changes(&mut self, now: Instant) {
        for change in self.sink.take_pending() {
            match change.origin {
                ChangeOrigin::User => self.schedule_pass(now),
                ChangeOrigin::Programmatic => self.observe_assignment(change),
            }
        }
    }

    fn schedule_pass(&mut self, now: Instant) {
        if self.settings.completion.coalesce_pending {
            if let Some(id) = self.pending_pass.take() {
                self.scheduler.cancel(id);
            }
        }
        let deadline = now + self.settings.completion.debounce();
        self.pending_pass = Some(self.scheduler.schedule_at(deadline, Deferred::ProcessInput));
    }

    fn run_task(&mut self, id: TaskId, task: Deferred) {
        if self.pending_pass == Some(id) {
            self.pending_pass = None;
        }
        match task {
            Deferred::ProcessInput => self.process_input(),
        }
    }

    /// Someone other than us assigned the text.
    fn observe_assignment(&mut self, change: TextChange) {
        let _span = debug_span!("text_changed", old = %change.old, new = %change.new).entered();
        if change.old != change.new {
            self.set_baseline(Some(change.new));
        }
    }

    // --- State helpers ---

    fn set_baseline(&mut self, text: Option<String>) {
        if self.baseline == text {
            return;
        }
        debug!(old = ?self.baseline, new = ?text, "baseline changed");
        self.baseline = text;
        if let Some(listener) = self.listener.as_mut() {
            listener.did_change_text(self.baseline.as_deref());
        }
    }

    fn notify(&mut self, f: impl FnOnce(&mut Box<dyn CompletionListener>)) {
        if let Some(listener) = self.listener.as_mut() {
            f(listener);
        }
    }
}

impl<I: TextInput> Drop for AutoCompletion<I> {
    fn drop(&mut self) {
        self.sink.close();
        self.input.unsubscribe(self.subscription);
        debug!(subscription = ?self.subscription, "detached from text input");
    }
}
