//! In-memory single-line text input.
//!
//! Models the parts of a platform text field the controller talks to: a
//! char-indexed buffer, a selection, an optional marked region, the active
//! input mode and a change stream. User operations emit `User` changes,
//! trait writes emit `Programmatic` ones.

use ac_core::gating::InputMode;

use crate::input::{SubscriptionId, TextChange, TextInput, TextRange, TextTraits};
use crate::stream::ChangeSink;

#[derive(Debug)]
pub struct MemoryInput {
    chars: Vec<char>,
    selection: TextRange,
    marked: Option<TextRange>,
    mode: Option<InputMode>,
    traits: TextTraits,
    subscribers: Vec<(SubscriptionId, ChangeSink)>,
    next_subscription: u64,
    programmatic_writes: usize,
}

impl MemoryInput {
    /// Empty input with an `en-US` keyboard.
    pub fn new() -> Self {
        Self {
            chars: Vec::new(),
            selection: TextRange::caret(0),
            marked: None,
            mode: Some(InputMode::new("en-US")),
            traits: TextTraits::default(),
            subscribers: Vec::new(),
            next_subscription: 0,
            programmatic_writes: 0,
        }
    }

    /// Input pre-filled with `text`, caret at the end. Emits nothing.
    pub fn with_text(text: &str) -> Self {
        let mut input = Self::new();
        input.chars = text.chars().collect();
        input.selection = TextRange::caret(input.chars.len());
        input
    }

    pub fn set_input_mode(&mut self, mode: Option<InputMode>) {
        self.mode = mode;
    }

    pub fn set_language(&mut self, language: &str) {
        self.mode = Some(InputMode::new(language));
    }

    pub fn set_text_traits(&mut self, traits: TextTraits) {
        self.traits = traits;
    }

    // --- User edits ---

    /// Type `text` at the selection. An active marked region is replaced
    /// (committed over) by the typed text.
    pub fn type_text(&mut self, text: &str) {
        let old = self.text();
        let target = self.marked.take().unwrap_or(self.selection);
        let inserted: Vec<char> = text.chars().collect();
        let caret = target.start + inserted.len();
        self.chars.splice(target.start..target.end, inserted);
        self.selection = TextRange::caret(caret);
        self.emit(TextChange::user(old, self.text()));
    }

    /// Delete backwards. An active marked region goes as a whole; otherwise
    /// the selection, or the char before the caret. Returns `false` when
    /// there was nothing to delete.
    pub fn backspace(&mut self) -> bool {
        let target = match self.marked.take() {
            Some(marked) => marked,
            None if !self.selection.is_empty() => self.selection,
            None if self.selection.start > 0 => {
                TextRange::new(self.selection.start - 1, self.selection.start)
            }
            None => return false,
        };
        let old = self.text();
        self.chars.drain(target.start..target.end);
        self.selection = TextRange::caret(target.start);
        self.emit(TextChange::user(old, self.text()));
        true
    }

    /// Keyboard-driven composition: the keyboard itself shows `text` as
    /// marked text in place of the current marked region or selection.
    pub fn compose(&mut self, text: &str) {
        let old = self.text();
        self.write_marked(text, TextRange::caret(text.chars().count()));
        self.emit(TextChange::user(old, self.text()));
    }

    /// Place the caret, committing any marked region first.
    pub fn move_caret(&mut self, at: usize) {
        self.marked = None;
        self.selection = TextRange::caret(at.min(self.chars.len()));
    }

    pub fn move_to_end(&mut self) {
        self.move_caret(self.chars.len());
    }

    /// Select a range, committing any marked region first.
    pub fn select(&mut self, range: TextRange) {
        self.marked = None;
        let end = range.end.min(self.chars.len());
        self.selection = TextRange::new(range.start.min(end), end);
    }

    // --- Inspection ---

    pub fn marked_text(&self) -> Option<String> {
        self.marked.map(|r| self.chars[r.start..r.end].iter().collect())
    }

    /// Text outside the marked region.
    pub fn committed_text(&self) -> String {
        match self.marked {
            Some(r) => self.chars[..r.start]
                .iter()
                .chain(&self.chars[r.end..])
                .collect(),
            None => self.text(),
        }
    }

    pub fn selection(&self) -> TextRange {
        self.selection
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Number of `replace_text` / `set_marked_text` calls received.
    pub fn programmatic_writes(&self) -> usize {
        self.programmatic_writes
    }

    fn write_marked(&mut self, text: &str, selected: TextRange) {
        let target = self.marked.unwrap_or(self.selection);
        let inserted: Vec<char> = text.chars().collect();
        let len = inserted.len();
        self.chars.splice(target.start..target.end, inserted);
        self.marked = Some(TextRange::new(target.start, target.start + len));
        let start = target.start + selected.start.min(len);
        let end = target.start + selected.end.min(len);
        self.selection = TextRange::new(start, end.max(start));
    }

    fn emit(&mut self, change: TextChange) {
        self.subscribers.retain(|(_, sink)| !sink.is_closed());
        for (_, sink) in &self.subscribers {
            sink.emit(change.clone());
        }
    }
}

impl Default for MemoryInput {
    fn default() -> Self {
        Self::new()
    }
}

impl TextInput for MemoryInput {
    fn text(&self) -> String {
        self.chars.iter().collect()
    }

    fn end_of_document(&self) -> usize {
        self.chars.len()
    }

    fn text_in_range(&self, range: TextRange) -> Option<String> {
        self.chars
            .get(range.start..range.end)
            .map(|s| s.iter().collect())
    }

    fn marked_text_range(&self) -> Option<TextRange> {
        self.marked
    }

    fn selected_text_range(&self) -> Option<TextRange> {
        Some(self.selection)
    }

    fn set_marked_text(&mut self, text: &str, selected: TextRange) {
        self.programmatic_writes += 1;
        let old = self.text();
        self.write_marked(text, selected);
        self.emit(TextChange::programmatic(old, self.text()));
    }

    fn unmark_text(&mut self) {
        self.marked = None;
    }

    fn replace_text(&mut self, text: &str) {
        self.programmatic_writes += 1;
        let old = self.text();
        self.chars = text.chars().collect();
        self.marked = None;
        self.selection = TextRange::caret(self.chars.len());
        self.emit(TextChange::programmatic(old, self.text()));
    }

    fn input_mode(&self) -> Option<InputMode> {
        self.mode.clone()
    }

    fn text_traits(&self) -> TextTraits {
        self.traits
    }

    fn subscribe(&mut self, sink: ChangeSink) -> SubscriptionId {
        self.next_subscription += 1;
        let id = SubscriptionId(self.next_subscription);
        self.subscribers.push((id, sink));
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) {
        self.subscribers.retain(|(sid, _)| *sid != id);
    }
}
