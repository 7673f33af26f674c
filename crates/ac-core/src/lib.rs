//! Host-independent building blocks for inline completion: folded text
//! matching, suggestion sources, input-mode gating and settings.

pub mod fold;
pub mod gating;
pub mod settings;
pub mod source;
