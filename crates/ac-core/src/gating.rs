//! Input-language and input-mode gating.
//!
//! Inline completion only works for keyboards that commit Latin-style text
//! key by key. Scripts composed through their own marked-text pipeline and
//! voice dictation are turned away.

use crate::settings::GatingSettings;

/// The host's active text input mode, as far as gating is concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputMode {
    /// BCP-47-ish tag such as `en-US`, or a mode name such as `dictation`.
    pub primary_language: Option<String>,
}

impl InputMode {
    pub fn new(primary_language: impl Into<String>) -> Self {
        Self {
            primary_language: Some(primary_language.into()),
        }
    }

    /// Mode that reports no primary language.
    pub fn unknown() -> Self {
        Self {
            primary_language: None,
        }
    }
}

/// Decides whether completion may run for a given input mode.
#[derive(Debug, Clone)]
pub struct InputGate {
    unsupported_languages: Vec<String>,
    dictation_mode: String,
}

impl InputGate {
    pub fn new(settings: &GatingSettings) -> Self {
        Self {
            unsupported_languages: settings
                .unsupported_languages
                .iter()
                .map(|l| l.to_ascii_lowercase())
                .collect(),
            dictation_mode: settings.dictation_mode.clone(),
        }
    }

    /// False without a primary language, or when its two-letter prefix is
    /// on the deny list.
    pub fn allows_language(&self, mode: Option<&InputMode>) -> bool {
        let Some(language) = mode.and_then(|m| m.primary_language.as_deref()) else {
            return false;
        };
        let prefix: String = language
            .chars()
            .take(2)
            .map(|c| c.to_ascii_lowercase())
            .collect();
        !self.unsupported_languages.contains(&prefix)
    }

    /// False only while dictating.
    pub fn allows_mode(&self, mode: Option<&InputMode>) -> bool {
        mode.and_then(|m| m.primary_language.as_deref()) != Some(self.dictation_mode.as_str())
    }

    pub fn allows(&self, mode: Option<&InputMode>) -> bool {
        self.allows_language(mode) && self.allows_mode(mode)
    }
}

impl Default for InputGate {
    fn default() -> Self {
        Self::new(&crate::settings::settings().gating)
    }
}
