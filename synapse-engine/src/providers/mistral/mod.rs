//! Mistral provider implementation

pub mod generation;

pub use generation::MistralGenerationProvider;
