pub mod config;
pub mod console;
pub mod currency;
pub mod error;
pub mod game;
pub mod llm;
pub mod logging;

// Re-export error types for convenience
pub use error::{ConversionError, Error, LLMError, Result};
