use std::sync::Arc;
use tracing::debug;

use crate::error::LLMError;
use crate::llm::TextGenerator;

const SYSTEM_PROMPT: &str = "Be ultra brief.";
const TEMPERATURE: f64 = 0.7;

/// Result of a single guess; handed to the reaction generator and then dropped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessOutcome {
    pub is_win: bool,
    pub secret: String,
    pub guess: String,
}

impl GuessOutcome {
    /// Exact, case-insensitive comparison of guess and secret
    pub fn judge(secret: &str, guess: &str) -> Self {
        Self {
            is_win: guess.to_lowercase() == secret.to_lowercase(),
            secret: secret.to_string(),
            guess: guess.to_string(),
        }
    }
}

/// Asks the text-generation service for a one-line reaction to a guess
pub struct ReactionGenerator<G> {
    generator: Arc<G>,
}

impl<G: TextGenerator> ReactionGenerator<G> {
    pub fn new(generator: Arc<G>) -> Self {
        Self { generator }
    }

    /// Returns the model's trimmed reply verbatim. Length limits live only in the prompt.
    pub async fn react(&self, outcome: &GuessOutcome) -> Result<String, LLMError> {
        debug!(
            "Requesting {} reaction for guess '{}'",
            role(outcome),
            outcome.guess
        );

        let reply = self
            .generator
            .complete(SYSTEM_PROMPT, &reaction_prompt(outcome), TEMPERATURE)
            .await?;

        Ok(reply.trim().to_string())
    }
}

fn role(outcome: &GuessOutcome) -> &'static str {
    if outcome.is_win {
        "win"
    } else {
        "lose"
    }
}

fn reaction_prompt(outcome: &GuessOutcome) -> String {
    format!(
        "Role: {}. If win: short congrats ≤10 words. If lose: playful 'uh no' ≤10 words. \
         Secret='{}', Guess='{}'. Output text only.",
        role(outcome),
        outcome.secret,
        outcome.guess
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::testing::ScriptedGenerator;

    #[test]
    fn test_judge_is_case_insensitive() {
        assert!(GuessOutcome::judge("apple", "Apple").is_win);
        assert!(GuessOutcome::judge("apple", "APPLE").is_win);
        assert!(!GuessOutcome::judge("apple", "apples").is_win);
        assert!(!GuessOutcome::judge("apple", " apple").is_win);
    }

    #[tokio::test]
    async fn test_win_prompt() {
        let generator = Arc::new(ScriptedGenerator::new(["  Nailed it, champ!  "]));
        let reactions = ReactionGenerator::new(generator.clone());

        let reply = reactions
            .react(&GuessOutcome::judge("apple", "apple"))
            .await
            .unwrap();

        assert_eq!(reply, "Nailed it, champ!");

        let calls = generator.calls();
        assert_eq!(calls[0].system, "Be ultra brief.");
        assert_eq!(calls[0].temperature, 0.7);
        assert!(calls[0].prompt.starts_with("Role: win."));
        assert!(calls[0].prompt.contains("Secret='apple', Guess='apple'"));
    }

    #[tokio::test]
    async fn test_lose_prompt() {
        let generator = Arc::new(ScriptedGenerator::new([
            "Uh no, not quite! This reply is deliberately longer than ten words.",
        ]));
        let reactions = ReactionGenerator::new(generator.clone());

        let reply = reactions
            .react(&GuessOutcome::judge("apple", "pear"))
            .await
            .unwrap();

        // No post-validation of the word limit
        assert_eq!(
            reply,
            "Uh no, not quite! This reply is deliberately longer than ten words."
        );
        assert!(generator.calls()[0].prompt.starts_with("Role: lose."));
    }

    #[tokio::test]
    async fn test_service_error_propagates() {
        let generator = Arc::new(ScriptedGenerator::default());
        generator.push_error("rate limited");
        let reactions = ReactionGenerator::new(generator);

        let result = reactions.react(&GuessOutcome::judge("apple", "pear")).await;

        assert!(matches!(result, Err(LLMError::ApiError(_))));
    }
}
