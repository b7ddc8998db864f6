pub mod reaction;
pub mod session;
pub mod words;

// Re-export common types
pub use reaction::{GuessOutcome, ReactionGenerator};
pub use session::GameSession;
pub use words::{WordEntry, WordSource};
