use miette::Diagnostic;
use std::io;
use thiserror::Error;

/// Primary error type for both command-line programs
#[derive(Error, Debug, Diagnostic)]
pub enum AppError {
    #[error("Environment configuration error: {0}")]
    #[diagnostic(code(chatloops::config_error))]
    Config(String),

    #[error("I/O error: {0}")]
    #[diagnostic(code(chatloops::io_error))]
    Io(#[from] io::Error),

    #[error("LLM error: {0}")]
    #[diagnostic(code(chatloops::llm_error))]
    LLM(#[from] LLMError),
}

/// LLM-specific errors
#[derive(Error, Debug, Diagnostic)]
pub enum LLMError {
    #[error("API error: {0}")]
    #[diagnostic(code(chatloops::llm::api_error))]
    ApiError(String),

    #[error("Response parsing error: {0}")]
    #[diagnostic(code(chatloops::llm::parse_error))]
    ParseError(String),
}

/// Failures of a currency conversion.
///
/// The `Display` output of each variant is the exact text shown to the user,
/// so callers can render any error with `to_string()`.
#[derive(Error, Debug, Diagnostic)]
pub enum ConversionError {
    #[error("❌ Missing API key. Please set APILAYER_API_KEY in your .env file.")]
    #[diagnostic(code(chatloops::conversion::missing_key))]
    MissingApiKey,

    #[error("⚠️ API Error: {0}")]
    #[diagnostic(code(chatloops::conversion::api_error))]
    Api(String),

    #[error("🌐 Network error: {0}")]
    #[diagnostic(code(chatloops::conversion::network_error))]
    Network(#[from] reqwest::Error),

    #[error("⚠️ Error: {0}")]
    #[diagnostic(code(chatloops::conversion::unexpected))]
    Unexpected(String),
}

// Re-export error types for convenience
pub use AppError as Error;

/// Create a result type that uses our error type
pub type Result<T> = std::result::Result<T, Error>;
