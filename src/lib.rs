//! Inline text completion for single-line inputs.
//!
//! Facade over the workspace crates: `ac_core` (folding, gating, settings,
//! suggestion sources) and `ac_session` (the completion controller). Hosts
//! usually only need this crate plus [`init_tracing`].

pub mod trace_init;

pub use ac_core::fold;
pub use ac_core::gating::{InputGate, InputMode};
pub use ac_core::settings::{self, Settings, SettingsError};
pub use ac_core::source::{SuggestionSource, WordList, WordListError};
pub use ac_session::{
    read_snapshot, AttachError, AutoCompletion, ChangeOrigin, ChangeSink, CompletionEvent,
    CompletionListener, CompletionResult, EventLog, InputSnapshot, MemoryInput, SubscriptionId,
    TextChange, TextInput, TextRange, TextTraits,
};
pub use trace_init::{init_tracing, TraceGuard, TraceInitError};

use std::path::Path;

/// Errors surfaced to hosts that configure the engine from files.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("I/O error: {msg}")]
    Io { msg: String },
    #[error("invalid data: {msg}")]
    InvalidData { msg: String },
}

impl From<AttachError> for EngineError {
    fn from(e: AttachError) -> Self {
        EngineError::InvalidData { msg: e.to_string() }
    }
}

impl From<WordListError> for EngineError {
    fn from(e: WordListError) -> Self {
        match e {
            WordListError::Io { .. } => EngineError::Io { msg: e.to_string() },
            WordListError::Empty { .. } => EngineError::InvalidData { msg: e.to_string() },
        }
    }
}

pub fn engine_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Load a settings TOML file as the global settings. Must run before the
/// first controller is attached.
pub fn settings_load_config(path: &Path) -> Result<(), EngineError> {
    let content = std::fs::read_to_string(path).map_err(|e| EngineError::Io {
        msg: format!("{}: {e}", path.display()),
    })?;
    settings::init_custom(content).map_err(|e| EngineError::InvalidData { msg: e.to_string() })?;
    tracing::debug!(path = %path.display(), "loaded custom settings");
    Ok(())
}

pub fn settings_default_config() -> String {
    settings::default_toml().to_string()
}

pub fn word_list_load(path: &Path) -> Result<WordList, EngineError> {
    Ok(WordList::load(path)?)
}
