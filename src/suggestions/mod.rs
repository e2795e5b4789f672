//! AI-generated improvement suggestions

pub mod ai;

pub use ai::{AiEndpoint, AiError, AiSuggestionGenerator, PageSuggestions};
