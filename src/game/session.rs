use std::io::Write;
use std::sync::Arc;
use tokio::io::AsyncBufRead;
use tracing::{info, warn};

use crate::console::ask;
use crate::game::reaction::{GuessOutcome, ReactionGenerator};
use crate::game::words::{WordEntry, WordSource};
use crate::llm::TextGenerator;
use crate::Result;

pub const BANNER: &str = "🐊 Crocodile — multi-word edition. Type 'quit' to exit.";
pub const FAREWELL: &str = "Bye! 👋";

const QUIT_WORDS: [&str; 2] = ["quit", "exit"];
const CONTINUE_WORDS: [&str; 2] = ["y", "yes"];

/// Interactive word-guessing session
pub struct GameSession<G> {
    words: WordSource<G>,
    reactions: ReactionGenerator<G>,
    batch_size: usize,
    batch: Vec<WordEntry>,
    cursor: usize,
}

impl<G: TextGenerator> GameSession<G> {
    pub fn new(generator: Arc<G>, batch_size: usize) -> Self {
        Self {
            words: WordSource::new(generator.clone()),
            reactions: ReactionGenerator::new(generator),
            batch_size,
            batch: Vec::new(),
            cursor: 0,
        }
    }

    /// Runs until the player quits, declines another round, or input ends.
    pub async fn run<R, W>(&mut self, input: &mut R, out: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        writeln!(out, "{}", BANNER)?;
        self.refill().await;

        loop {
            if self.cursor >= self.batch.len() {
                writeln!(out, "\n🆕 Fetching more words...\n")?;
                self.refill().await;
            }

            let entry = self.batch[self.cursor].clone();
            self.cursor += 1;

            writeln!(out, "\n{}", describe(&entry))?;

            let guess = match ask(input, out, "Your guess: ").await? {
                Some(line) => line.to_lowercase(),
                None => return farewell(out),
            };
            if QUIT_WORDS.contains(&guess.as_str()) {
                info!("Player quit");
                return farewell(out);
            }

            let outcome = GuessOutcome::judge(&entry.word, &guess);
            info!("Guess '{}' for '{}': win={}", guess, entry.word, outcome.is_win);

            let reaction = match self.reactions.react(&outcome).await {
                Ok(text) => text,
                Err(e) => {
                    warn!("Reaction request failed: {}", e);
                    format!("Error: {}", e)
                }
            };
            writeln!(out, "LLM: {}", reaction)?;

            let again = match ask(input, out, "Play again with next word? (y/n): ").await? {
                Some(line) => line.to_lowercase(),
                None => return farewell(out),
            };
            if !CONTINUE_WORDS.contains(&again.as_str()) {
                return farewell(out);
            }
        }
    }

    async fn refill(&mut self) {
        let batch = self.words.get_batch(self.batch_size).await;
        self.batch = if batch.is_empty() {
            warn!("Batch had no usable words, playing the fallback word");
            vec![WordEntry::fallback()]
        } else {
            batch
        };
        self.cursor = 0;
    }
}

/// The clue line: hint, first letter and length, never the word itself
pub fn describe(entry: &WordEntry) -> String {
    let first = entry.word.chars().next().unwrap_or('?');
    format!(
        "🤖 New word! (Hint: {} | starts with '{}', {} letters)",
        entry.hint,
        first,
        entry.word.chars().count()
    )
}

fn farewell<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "{}", FAREWELL)?;
    Ok(())
}
