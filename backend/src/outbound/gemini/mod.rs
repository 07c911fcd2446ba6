//! Gemini outbound adapter.
//!
//! Implements the `CompletionService` port against the Generative Language
//! `generateContent` endpoint.

mod dto;
mod http_completion;

pub use http_completion::{GeminiCompletionService, GeminiEndpoint, GeminiSetupError};
