use std::path::Path;
use std::process;

use autocomplete_engine::{
    word_list_load, AutoCompletion, EngineError, MemoryInput, SuggestionSource,
};

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

pub fn lookup_cmd(words_file: &str, text: &str) {
    let line = die!(lookup(Path::new(words_file), text), "Error: {}");
    println!("{line}");
}

/// One output line: the candidate and how the controller would split it.
pub fn lookup(words_file: &Path, text: &str) -> Result<String, EngineError> {
    let words = word_list_load(words_file)?;
    let Some(candidate) = words.suggest(text) else {
        return Ok("(no suggestion)".to_string());
    };

    let mut ac = AutoCompletion::attach(MemoryInput::new())?;
    ac.set_source(words);
    Ok(match ac.compute_completion(text) {
        Some(result) => format!(
            "{candidate}\ttyped={:?}\tsuffix={:?}",
            result.typed, result.suffix
        ),
        None => format!("{candidate}\t(no completion)"),
    })
}
