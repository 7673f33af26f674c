use tracing::{debug, debug_span, error, trace};

use ac_core::fold;

use super::input::{TextInput, TextRange};
use super::types::CompletionResult;
use super::AutoCompletion;

impl<I: TextInput> AutoCompletion<I> {
    /// Ask the source for a candidate and split it into `(text, suffix)`.
    ///
    /// `None` for empty text, no source, or no (or an empty) candidate. A
    /// candidate that does not contain `text` under folding breaks the
    /// source contract: debug builds panic, release builds log and give up.
    pub fn compute_completion(&self, text: &str) -> Option<CompletionResult> {
        if text.is_empty() {
            return None;
        }
        let candidate = self.source.as_ref()?.suggest(text)?;
        if candidate.is_empty() {
            return None;
        }

        let Some(found) = fold::find_folded(&candidate, text) else {
            if cfg!(debug_assertions) {
                panic!("suggestion {candidate:?} does not contain {text:?}");
            }
            error!(text, %candidate, "suggestion does not contain typed text");
            return None;
        };

        let suffix = candidate[found.end..].to_string();
        trace!(text, %candidate, %suffix, "computed completion");
        Some(CompletionResult {
            typed: text.to_string(),
            suffix,
        })
    }

    /// Compute a completion for `text` and show its suffix as marked text,
    /// caret after it.
    pub fn install_completion(&mut self, text: &str) {
        let _span = debug_span!("install_completion", text).entered();

        // A miss keeps the previous result.
        let Some(result) = self.compute_completion(text) else {
            return;
        };

        if !result.suffix.is_empty() {
            self.notify(|l| l.will_complete(&result.typed, &result.suffix));
            {
                let _echo = self.sink.suppress();
                let caret = result.suffix.chars().count();
                self.input
                    .set_marked_text(&result.suffix, TextRange::caret(caret));
            }
            debug!(suffix = %result.suffix, "installed completion");
            self.notify(|l| l.did_complete(&result.typed, &result.suffix));
        }

        self.last_result = Some(result);
    }
}
