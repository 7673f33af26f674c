use tracing::{debug, debug_span};

use super::input::TextInput;
use super::snapshot::read_snapshot;
use super::types::EditClass;
use super::AutoCompletion;

impl<I: TextInput> AutoCompletion<I> {
    /// One deferred pass over the input: classify the edit since the last
    /// pass, complete / repair as needed, then settle the baseline.
    pub(crate) fn process_input(&mut self) {
        let snapshot = read_snapshot(&self.input);
        let _span = debug_span!(
            "process_input",
            committed = ?snapshot.committed,
            provisional = ?snapshot.provisional,
            at_end = snapshot.cursor_at_end,
        )
        .entered();

        if snapshot.cursor_at_end && self.should_complete() {
            let baseline = self.baseline.clone().unwrap_or_default();
            let current = snapshot.committed.clone().unwrap_or_default();
            let provisional = snapshot.provisional.as_deref();

            let edit = EditClass::classify(&baseline, &current);
            debug!(
                %baseline,
                %current,
                same_text = edit.same_text,
                backspace = edit.backspace,
                "classified edit"
            );

            if edit.is_forward() {
                self.install_completion(&current);
            }

            self.repair_stale_provisional(&current, provisional);

            if edit.backspace
                && current.chars().count() == 1
                && provisional.unwrap_or_default().is_empty()
                && self.settings.completion.capitalization_workaround
            {
                self.rewrite_single_char(&current);
            }
        }

        self.set_baseline(snapshot.committed);
    }

    /// The input still shows marked text that is not our last proposal for
    /// `current`; drop it by writing `current` back.
    fn repair_stale_provisional(&mut self, current: &str, provisional: Option<&str>) {
        let (Some(last), Some(provisional)) = (self.last_result.as_ref(), provisional) else {
            return;
        };
        let is_correct = last.typed == current && last.suffix == provisional;
        if provisional.is_empty() || is_correct {
            return;
        }
        debug!(
            current,
            provisional,
            expected = %last.suffix,
            "repairing stale marked text"
        );
        let _echo = self.sink.suppress();
        self.input.replace_text(current);
    }

    /// Some keyboards repeat a capital letter on the next keystroke after a
    /// proposal was backspaced away from a one-letter word. Clearing and
    /// rewriting the text resets their state.
    fn rewrite_single_char(&mut self, current: &str) {
        debug!(current, "rewriting single-character text");
        let _echo = self.sink.suppress();
        self.input.replace_text("");
        self.input.replace_text(current);
    }
}
