pub mod agent;
pub mod convert;
pub mod format;
pub mod tool;

// Re-export common types
pub use agent::{build_agent, chat, ConversationAgent};
pub use convert::{ConversionRequest, CurrencyConverter};
pub use tool::ConvertCurrencyTool;
