use std::fs;
use std::path::Path;
use std::process;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

pub fn settings_export() {
    print!("{}", autocomplete_engine::settings_default_config());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(
        autocomplete_engine::settings::parse_settings_toml(&content),
        "Error: {}"
    );
    println!(
        "OK: completion.debounce_ms={}, gating.unsupported_languages=[{}], gating.dictation_mode={}",
        s.completion.debounce_ms,
        s.gating.unsupported_languages.join(", "),
        s.gating.dictation_mode
    );
}

/// Install a custom settings file as the global settings.
pub fn load_settings(file: &str) {
    die!(
        autocomplete_engine::settings_load_config(Path::new(file)),
        "Error loading settings: {}"
    );
}

/// Start JSON-lines tracing under `dir`. Keep the guard until exit.
pub fn start_trace(dir: &str) -> autocomplete_engine::TraceGuard {
    die!(
        autocomplete_engine::init_tracing(Path::new(dir)),
        "Error starting trace: {}"
    )
}
