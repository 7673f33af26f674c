//! Keystroke scripts for `completetool simulate`.
//!
//! A script is plain text typed one character at a time, with `<...>`
//! tokens for everything else:
//!
//! | token        | action                                  |
//! |--------------|-----------------------------------------|
//! | `<bs>`       | backspace                               |
//! | `<tap>`      | pointer down on the input               |
//! | `<left>`     | caret one character left                |
//! | `<right>`    | caret one character right               |
//! | `<end>`      | caret to the end                        |
//! | `<set:TEXT>` | host assigns `TEXT` programmatically    |
//! | `<lt>`       | a literal `<`                           |

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Key(char),
    Backspace,
    Tap,
    Left,
    Right,
    End,
    Set(String),
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("unknown token <{token}> at offset {offset}")]
    UnknownToken { token: String, offset: usize },
    #[error("unterminated token at offset {offset}")]
    Unterminated { offset: usize },
}

pub fn parse_script(script: &str) -> Result<Vec<Step>, ScriptError> {
    let mut steps = Vec::new();
    let mut rest = script;
    while let Some(c) = rest.chars().next() {
        let offset = script.len() - rest.len();
        if c != '<' {
            steps.push(Step::Key(c));
            rest = &rest[c.len_utf8()..];
            continue;
        }
        let close = rest.find('>').ok_or(ScriptError::Unterminated { offset })?;
        let token = &rest[1..close];
        steps.push(parse_token(token).ok_or_else(|| ScriptError::UnknownToken {
            token: token.to_string(),
            offset,
        })?);
        rest = &rest[close + 1..];
    }
    Ok(steps)
}

fn parse_token(token: &str) -> Option<Step> {
    if let Some(text) = token.strip_prefix("set:") {
        return Some(Step::Set(text.to_string()));
    }
    match token {
        "bs" => Some(Step::Backspace),
        "tap" => Some(Step::Tap),
        "left" => Some(Step::Left),
        "right" => Some(Step::Right),
        "end" => Some(Step::End),
        "lt" => Some(Step::Key('<')),
        _ => None,
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Key('<') => write!(f, "<lt>"),
            Step::Key(c) => write!(f, "{c}"),
            Step::Backspace => write!(f, "<bs>"),
            Step::Tap => write!(f, "<tap>"),
            Step::Left => write!(f, "<left>"),
            Step::Right => write!(f, "<right>"),
            Step::End => write!(f, "<end>"),
            Step::Set(text) => write!(f, "<set:{text}>"),
        }
    }
}
