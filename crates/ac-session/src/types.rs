/// The controller's current proposal: what the user typed and the suffix
/// offered after it. `suffix` is empty when the candidate added nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionResult {
    pub typed: String,
    pub suffix: String,
}

impl CompletionResult {
    /// The externally visible text while the proposal is shown.
    pub fn full_text(&self) -> String {
        format!("{}{}", self.typed, self.suffix)
    }
}

/// Input state read fresh at the start of each classification pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InputSnapshot {
    /// Text before the marked region (the whole text when nothing is marked).
    pub committed: Option<String>,
    /// Text of the marked region, if one is active.
    pub provisional: Option<String>,
    /// Caret (empty selection) at the very end of the document.
    pub cursor_at_end: bool,
}

/// How the committed text moved relative to the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct EditClass {
    pub(crate) same_text: bool,
    /// `current` is a non-empty leading occurrence inside a non-empty
    /// baseline: the user trimmed text (or a proposal) off the end. Equal
    /// text counts too.
    pub(crate) backspace: bool,
}

impl EditClass {
    pub(crate) fn classify(baseline: &str, current: &str) -> Self {
        let same_text = baseline == current;
        let backspace = !baseline.is_empty()
            && !current.is_empty()
            && baseline.starts_with(current);
        Self {
            same_text,
            backspace,
        }
    }

    /// New forward-moving input that deserves a fresh completion.
    pub(crate) fn is_forward(&self) -> bool {
        !self.same_text && !self.backspace
    }
}
