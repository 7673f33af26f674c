//! Suggestion sources.
//!
//! A source maps the text typed so far to one full candidate string. The
//! candidate must begin with the typed text under [`crate::fold`] rules;
//! the controller relies on that to split off the suffix it proposes.

#[cfg(test)]
mod tests;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::fold;

/// Pluggable lookup from typed text to a full candidate.
pub trait SuggestionSource {
    /// Full candidate for `typed`, or `None` when there is nothing to offer.
    fn suggest(&self, typed: &str) -> Option<String>;
}

impl<F> SuggestionSource for F
where
    F: Fn(&str) -> Option<String>,
{
    fn suggest(&self, typed: &str) -> Option<String> {
        self(typed)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WordListError {
    #[error("failed to read word list {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("word list {path} contains no words")]
    Empty { path: PathBuf },
}

/// Ordered candidate list. The first word that starts with the typed text
/// (case- and accent-insensitively) wins, so list order is priority order.
#[derive(Debug, Clone, Default)]
pub struct WordList {
    words: Vec<String>,
}

impl WordList {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words
                .into_iter()
                .map(Into::into)
                .filter(|w: &String| !w.is_empty())
                .collect(),
        }
    }

    /// Load one word per line. Blank lines and lines starting with `#` are
    /// skipped; surrounding whitespace is trimmed.
    pub fn load(path: &Path) -> Result<Self, WordListError> {
        let content = fs::read_to_string(path).map_err(|source| WordListError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let list = Self::parse(&content);
        if list.is_empty() {
            return Err(WordListError::Empty {
                path: path.to_path_buf(),
            });
        }
        debug!(path = %path.display(), words = list.len(), "word list loaded");
        Ok(list)
    }

    pub fn parse(content: &str) -> Self {
        Self::new(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        )
    }

    pub fn push(&mut self, word: impl Into<String>) {
        let word = word.into();
        if !word.is_empty() {
            self.words.push(word);
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }
}

impl SuggestionSource for WordList {
    fn suggest(&self, typed: &str) -> Option<String> {
        if typed.is_empty() {
            return None;
        }
        self.words
            .iter()
            .find(|w| fold::strip_prefix_folded(w, typed).is_some())
            .cloned()
    }
}
