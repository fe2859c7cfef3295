//! OpenAI provider implementation

pub mod client;
pub mod generation;
pub mod types;

pub use client::OpenAIClient;
pub use generation::OpenAIGenerationProvider;
