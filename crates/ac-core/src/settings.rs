//! Global settings loaded from TOML.
//!
//! - `init_custom(toml_content)` sets a custom TOML before first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`

use std::sync::OnceLock;
use std::time::Duration;

use serde::Deserialize;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

/// Upper bound for `completion.debounce_ms`; anything longer reads as lag.
const MAX_DEBOUNCE_MS: u64 = 1000;

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();
static INSTANCE: OnceLock<Settings> = OnceLock::new();

/// Set custom TOML before first `settings()` call. Fails with
/// `AlreadyInitialized` once the settings are in use.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    if INSTANCE.get().is_some() {
        return Err(SettingsError::AlreadyInitialized);
    }
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        parse_settings_toml(toml_str).expect("settings TOML must be valid")
    })
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub completion: CompletionSettings,
    pub gating: GatingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompletionSettings {
    pub debounce_ms: u64,
    pub coalesce_pending: bool,
    pub capitalization_workaround: bool,
}

impl CompletionSettings {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GatingSettings {
    pub unsupported_languages: Vec<String>,
    pub dictation_mode: String,
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    if s.completion.debounce_ms > MAX_DEBOUNCE_MS {
        return Err(SettingsError::InvalidValue {
            field: "completion.debounce_ms".to_string(),
            reason: format!("must be at most {MAX_DEBOUNCE_MS}"),
        });
    }

    for (i, lang) in s.gating.unsupported_languages.iter().enumerate() {
        if lang.len() != 2 || !lang.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(SettingsError::InvalidValue {
                field: format!("gating.unsupported_languages[{i}]"),
                reason: format!("{lang:?} is not a two-letter language prefix"),
            });
        }
    }

    if s.gating.dictation_mode.is_empty() {
        return Err(SettingsError::InvalidValue {
            field: "gating.dictation_mode".to_string(),
            reason: "must not be empty".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_default_toml() {
        let s = parse_settings_toml(DEFAULT_SETTINGS_TOML).unwrap();
        assert_eq!(s.completion.debounce_ms, 50);
        assert_eq!(s.completion.debounce(), Duration::from_millis(50));
        assert!(s.completion.coalesce_pending);
        assert!(s.completion.capitalization_workaround);
        assert_eq!(
            s.gating.unsupported_languages,
            vec!["ko", "ja", "cs", "zh", "sk"]
        );
        assert_eq!(s.gating.dictation_mode, "dictation");
    }

    #[test]
    fn parse_valid_custom_toml() {
        let toml = r#"
[completion]
debounce_ms = 0
coalesce_pending = false
capitalization_workaround = false

[gating]
unsupported_languages = []
dictation_mode = "voice"
"#;
        let s = parse_settings_toml(toml).unwrap();
        assert_eq!(s.completion.debounce_ms, 0);
        assert!(!s.completion.coalesce_pending);
        assert!(!s.completion.capitalization_workaround);
        assert!(s.gating.unsupported_languages.is_empty());
        assert_eq!(s.gating.dictation_mode, "voice");
    }

    #[test]
    fn error_debounce_too_long() {
        let toml = r#"
[completion]
debounce_ms = 5000
coalesce_pending = true
capitalization_workaround = true

[gating]
unsupported_languages = ["ja"]
dictation_mode = "dictation"
"#;
        let err = parse_settings_toml(toml).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidValue { .. }));
        assert!(err.to_string().contains("completion.debounce_ms"));
    }

    #[test]
    fn error_bad_language_prefix() {
        let toml = r#"
[completion]
debounce_ms = 50
coalesce_pending = true
capitalization_workaround = true

[gating]
unsupported_languages = ["ja", "zh-Hans"]
dictation_mode = "dictation"
"#;
        let err = parse_settings_toml(toml).unwrap_err();
        assert!(err.to_string().contains("gating.unsupported_languages[1]"));
    }

    #[test]
    fn error_empty_dictation_mode() {
        let toml = r#"
[completion]
debounce_ms = 50
coalesce_pending = true
capitalization_workaround = true

[gating]
unsupported_languages = ["ja"]
dictation_mode = ""
"#;
        let err = parse_settings_toml(toml).unwrap_err();
        assert!(err.to_string().contains("gating.dictation_mode"));
    }

    #[test]
    fn init_custom_after_first_use_is_rejected() {
        let _ = settings();
        let err = init_custom(DEFAULT_SETTINGS_TOML.to_string()).unwrap_err();
        assert!(matches!(err, SettingsError::AlreadyInitialized));
    }

    #[test]
    fn init_custom_rejects_invalid_toml_first() {
        let err = init_custom("not toml [".to_string()).unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn error_missing_section() {
        let toml = r#"
[completion]
debounce_ms = 50
coalesce_pending = true
capitalization_workaround = true
"#;
        let err = parse_settings_toml(toml).unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }
}
