use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::error::LLMError;
use crate::llm::{strip_code_fences, TextGenerator};

const SYSTEM_PROMPT: &str = "Output strict JSON only.";
const TEMPERATURE: f64 = 0.4;

pub const FALLBACK_WORD: &str = "apple";
pub const FALLBACK_HINT: &str = "Edible fruit that grows on trees";
pub const DEFAULT_HINT: &str = "Everyday object.";

const MIN_WORD_LEN: usize = 3;
const MAX_WORD_LEN: usize = 10;

/// A secret word and the hint shown to the player
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordEntry {
    pub word: String,
    pub hint: String,
}

impl WordEntry {
    pub fn fallback() -> Self {
        Self {
            word: FALLBACK_WORD.to_string(),
            hint: FALLBACK_HINT.to_string(),
        }
    }
}

/// Fetches batches of word/hint pairs from a text-generation service
pub struct WordSource<G> {
    generator: Arc<G>,
}

impl<G: TextGenerator> WordSource<G> {
    pub fn new(generator: Arc<G>) -> Self {
        Self { generator }
    }

    /// Requests `batch_size` words. Never fails: anything the model gets wrong
    /// degrades to the fallback entry or is silently dropped.
    pub async fn get_batch(&self, batch_size: usize) -> Vec<WordEntry> {
        info!("Requesting batch of {} words", batch_size);

        let prompt = batch_prompt(batch_size);
        let parsed = self
            .generator
            .complete(SYSTEM_PROMPT, &prompt, TEMPERATURE)
            .await
            .and_then(|response| parse_candidates(&response));

        let candidates = match parsed {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!("Using fallback word: {}", e);
                vec![fallback_candidate()]
            }
        };

        let batch = clean_batch(&candidates);
        info!("Received {} usable words", batch.len());
        batch
    }
}

fn batch_prompt(batch_size: usize) -> String {
    format!(
        "Return a JSON array of simple English nouns and short factual hints. \
         Example: [{{'word':'apple','hint':'Edible fruit that grows on trees'}}]. \
         Include {} items, each lowercase, 3–10 letters, no spaces, truthful hints ≤12 words.",
        batch_size
    )
}

fn fallback_candidate() -> Value {
    serde_json::json!({ "word": FALLBACK_WORD, "hint": FALLBACK_HINT })
}

/// Parses the raw model output into a list of candidate objects
fn parse_candidates(response: &str) -> Result<Vec<Value>, LLMError> {
    let json_text = strip_code_fences(response);
    debug!("Word batch JSON: {}", json_text);

    match serde_json::from_str::<Value>(&json_text) {
        Ok(Value::Array(items)) => Ok(items),
        Ok(other) => {
            // Valid JSON that is not a list carries no entries
            debug!("Expected a JSON array, got: {}", other);
            Ok(Vec::new())
        }
        Err(e) => Err(LLMError::ParseError(format!(
            "Failed to parse word batch: {}, response was: {}",
            e, response
        ))),
    }
}

/// Keeps candidates whose cleaned word has 3 to 10 letters
fn clean_batch(candidates: &[Value]) -> Vec<WordEntry> {
    candidates
        .iter()
        .filter_map(|candidate| {
            let fields = candidate.as_object()?;

            let word = match fields.get("word") {
                Some(Value::String(s)) => clean_word(s),
                Some(other) => clean_word(&other.to_string()),
                None => String::new(),
            };
            if !(MIN_WORD_LEN..=MAX_WORD_LEN).contains(&word.len()) {
                debug!("Dropping candidate {}", candidate);
                return None;
            }

            let hint = match fields.get("hint") {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Null) | None => DEFAULT_HINT.to_string(),
                Some(other) => other.to_string(),
            };

            Some(WordEntry { word, hint })
        })
        .collect()
}

/// Lowercases and strips everything outside `a-z`
pub fn clean_word(raw: &str) -> String {
    raw.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase())
        .collect()
}
