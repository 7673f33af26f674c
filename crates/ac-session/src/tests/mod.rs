
use ac_core::settings::{parse_settings_toml, Settings, DEFAULT_SETTINGS_TOML};
use ac_core::source::WordList;

use crate::{AutoCompletion, CompletionEvent, EventLog, MemoryInput, TextInput};

/// Word list from the demo screen, in priority order.
pub(super) fn fruits() -> WordList {
    WordList::new([
        "Apples",
        "Candies",
        "Anananas",
        "Grapefruit",
        "Bananas",
        "Lemons",
    ])
}

pub(super) fn default_settings() -> Settings {
    parse_settings_toml(DEFAULT_SETTINGS_TOML).unwrap()
}

pub(super) fn settings_with(f: impl FnOnce(&mut Settings)) -> Settings {
    let mut s = default_settings();
    f(&mut s);
    s
}

pub(super) fn make_controller_with(settings: Settings) -> (AutoCompletion<MemoryInput>, EventLog) {
    let mut ac = AutoCompletion::attach_with_settings(MemoryInput::new(), settings).unwrap();
    let log = EventLog::new();
    ac.set_source(fruits());
    ac.set_listener(log.clone());
    (ac, log)
}

pub(super) fn make_controller() -> (AutoCompletion<MemoryInput>, EventLog) {
    make_controller_with(default_settings())
}

// Helper: type a string one character at a time, letting each keystroke settle
pub(super) fn type_string(ac: &mut AutoCompletion<MemoryInput>, s: &str) {
    for ch in s.chars() {
        ac.input_mut().type_text(&ch.to_string());
        ac.flush();
    }
}

/// Input text with the marked region in brackets, e.g. `App[les]`.
pub(super) fn visible(ac: &AutoCompletion<MemoryInput>) -> String {
    let input = ac.input();
    match input.marked_text_range() {
        Some(r) => format!(
            "{}[{}]{}",
            input.text_in_range(crate::TextRange::new(0, r.start)).unwrap(),
            input.text_in_range(r).unwrap(),
            input
                .text_in_range(crate::TextRange::new(r.end, input.end_of_document()))
                .unwrap(),
        ),
        None => input.text(),
    }
}

pub(super) fn will(typed: &str, suffix: &str) -> CompletionEvent {
    CompletionEvent::WillComplete {
        typed: typed.to_string(),
        suffix: suffix.to_string(),
    }
}

pub(super) fn did(typed: &str, suffix: &str) -> CompletionEvent {
    CompletionEvent::DidComplete {
        typed: typed.to_string(),
        suffix: suffix.to_string(),
    }
}

pub(super) fn changed(text: &str) -> CompletionEvent {
    CompletionEvent::TextChanged(Some(text.to_string()))
}
