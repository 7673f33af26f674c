//! Capability interface for the host text input.
//!
//! Offsets are char offsets into the input's full text (committed text
//! followed by any marked region).

use ac_core::gating::InputMode;

use crate::stream::ChangeSink;

/// Half-open range of char offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextRange {
    pub start: usize,
    pub end: usize,
}

impl TextRange {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "inverted range {start}..{end}");
        Self { start, end }
    }

    /// Zero-length range at `at`.
    pub fn caret(at: usize) -> Self {
        Self { start: at, end: at }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }
}

/// Editing behaviours of the host input that interfere with marked text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextTraits {
    pub autocorrection: bool,
    pub spell_checking: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOrigin {
    /// The user edited the text (typing, deleting, pasting).
    User,
    /// Code assigned the text or marked text.
    Programmatic,
}

/// One entry on the input's change stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChange {
    pub origin: ChangeOrigin,
    pub old: String,
    pub new: String,
}

impl TextChange {
    pub fn user(old: impl Into<String>, new: impl Into<String>) -> Self {
        Self {
            origin: ChangeOrigin::User,
            old: old.into(),
            new: new.into(),
        }
    }

    pub fn programmatic(old: impl Into<String>, new: impl Into<String>) -> Self {
        Self {
            origin: ChangeOrigin::Programmatic,
            old: old.into(),
            new: new.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// What the controller needs from a single-line text input.
pub trait TextInput {
    /// Full text, marked region included.
    fn text(&self) -> String;

    fn end_of_document(&self) -> usize {
        self.text().chars().count()
    }

    fn text_in_range(&self, range: TextRange) -> Option<String> {
        let text = self.text();
        if range.start > range.end || range.end > text.chars().count() {
            return None;
        }
        Some(text.chars().skip(range.start).take(range.len()).collect())
    }

    /// Active marked (provisional) region, if any.
    fn marked_text_range(&self) -> Option<TextRange>;

    fn selected_text_range(&self) -> Option<TextRange>;

    /// Replace the marked region (or insert at the selection when there is
    /// none) with `text`, marking it. `selected` is relative to `text`.
    fn set_marked_text(&mut self, text: &str, selected: TextRange);

    /// End the marked region, keeping its text.
    fn unmark_text(&mut self);

    /// Assign the whole text, dropping any marked region.
    fn replace_text(&mut self, text: &str);

    fn input_mode(&self) -> Option<InputMode>;

    fn text_traits(&self) -> TextTraits;

    /// Start delivering changes to `sink`.
    fn subscribe(&mut self, sink: ChangeSink) -> SubscriptionId;

    fn unsubscribe(&mut self, id: SubscriptionId);
}

impl<T: TextInput + ?Sized> TextInput for &mut T {
    fn text(&self) -> String {
        (**self).text()
    }

    fn end_of_document(&self) -> usize {
        (**self).end_of_document()
    }

    fn text_in_range(&self, range: TextRange) -> Option<String> {
        (**self).text_in_range(range)
    }

    fn marked_text_range(&self) -> Option<TextRange> {
        (**self).marked_text_range()
    }

    fn selected_text_range(&self) -> Option<TextRange> {
        (**self).selected_text_range()
    }

    fn set_marked_text(&mut self, text: &str, selected: TextRange) {
        (**self).set_marked_text(text, selected)
    }

    fn unmark_text(&mut self) {
        (**self).unmark_text()
    }

    fn replace_text(&mut self, text: &str) {
        (**self).replace_text(text)
    }

    fn input_mode(&self) -> Option<InputMode> {
        (**self).input_mode()
    }

    fn text_traits(&self) -> TextTraits {
        (**self).text_traits()
    }

    fn subscribe(&mut self, sink: ChangeSink) -> SubscriptionId {
        (**self).subscribe(sink)
    }

    fn unsubscribe(&mut self, id: SubscriptionId) {
        (**self).unsubscribe(id)
    }
}
