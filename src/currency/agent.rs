use rig::{agent::Agent, providers::openai};
use std::io::Write;
use tokio::io::AsyncBufRead;
use tracing::{debug, error, info};

use crate::config::Config;
use crate::console::ask;
use crate::currency::convert::CurrencyConverter;
use crate::currency::tool::ConvertCurrencyTool;
use crate::llm::{openai_client, AgentRunner};
use crate::Result;

const TEMPERATURE: f64 = 0.1;

const SYSTEM_PROMPT: &str = "You are a helpful currency conversion assistant.

When the user asks a question like 'How much is 100$ in baht?' or 'How much is 100 USD in yen?', do the following:
1. Identify the amount, source currency, and target currency.
2. Use the convert_currency tool to get real-time rates.
3. Respond with a friendly, concise conversion summary.

If the question isn't about currency conversion, politely say you only handle that.";

pub const BANNER: &str = "💱 Currency Converter Assistant
Ask things like:
 • How much is 100$ in baht?
 • How much is 100 USD in yen?
 • Convert 50 EUR to GBP
Type 'exit' to quit.
";

pub const FAREWELL: &str = "👋 Goodbye!";

const QUIT_WORDS: [&str; 3] = ["exit", "quit", "q"];

/// Builds the OpenAI chat agent with the conversion tool attached.
pub fn build_agent(config: &Config) -> Result<Agent<openai::CompletionModel>> {
    let converter = CurrencyConverter::new(&config.exchange)
        .map_err(|e| crate::Error::Config(format!("Cannot build HTTP client: {}", e)))?;

    let agent = openai_client(&config.llm)
        .agent(&config.llm.model)
        .preamble(SYSTEM_PROMPT)
        .tool(ConvertCurrencyTool::new(converter))
        .temperature(TEMPERATURE)
        .build();

    Ok(agent)
}

/// Turns free text into a conversational reply via a tool-calling agent
pub struct ConversationAgent<A> {
    runner: A,
}

impl<A: AgentRunner> ConversationAgent<A> {
    pub fn new(runner: A) -> Self {
        Self { runner }
    }

    /// Never fails: agent errors come back as `Error: ...` text.
    pub async fn respond(&self, user_text: &str) -> String {
        match self.runner.run(user_text).await {
            Ok(raw) => extract_message(&raw),
            Err(e) => {
                error!("Agent invocation failed: {}", e);
                format!("Error: {}", e)
            }
        }
    }
}

/// Pulls the displayable text out of the agent's final reply.
///
/// A bare tool result comes back JSON-encoded and is decoded; an empty reply
/// is shown in its raw form.
fn extract_message(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return format!("{:?}", raw);
    }

    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(serde_json::Value::String(text)) => text,
        _ => trimmed.to_string(),
    }
}

/// Runs the chat loop until the user types a quit keyword or input ends.
pub async fn chat<A, R, W>(agent: &ConversationAgent<A>, input: &mut R, out: &mut W) -> Result<()>
where
    A: AgentRunner,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(out, "{}", BANNER)?;

    loop {
        let line = match ask(input, out, "You: ").await? {
            Some(line) => line,
            None => break,
        };
        if QUIT_WORDS.contains(&line.to_lowercase().as_str()) {
            info!("User quit");
            break;
        }
        if line.is_empty() {
            continue;
        }

        write!(out, "\n🤖 Assistant: ")?;
        out.flush()?;

        debug!("User input: {}", line);
        let reply = agent.respond(&line).await;
        writeln!(out, "{}", reply)?;
        writeln!(out)?;
    }

    writeln!(out, "{}", FAREWELL)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::testing::ScriptedGenerator;

    async fn run_chat(agent: &ConversationAgent<ScriptedGenerator>, input: &str) -> String {
        let mut input = input.as_bytes();
        let mut out = Vec::new();
        chat(agent, &mut input, &mut out).await.unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_extract_message() {
        assert_eq!(extract_message("  100 USD is about 3,500 THB.  "), "100 USD is about 3,500 THB.");
        assert_eq!(
            extract_message("\"According to APILayer Marketplace, 1 USD = 35.00 THB\""),
            "According to APILayer Marketplace, 1 USD = 35.00 THB"
        );
        assert_eq!(extract_message(""), "\"\"");
        assert_eq!(extract_message("[1, 2]"), "[1, 2]");
    }

    #[tokio::test]
    async fn test_respond_passes_text_through() {
        let runner = ScriptedGenerator::new(["100 USD is 3,500.00 THB today."]);
        let agent = ConversationAgent::new(runner);

        let reply = agent.respond("How much is 100$ in baht?").await;

        assert_eq!(reply, "100 USD is 3,500.00 THB today.");
        assert_eq!(agent.runner.calls()[0].prompt, "How much is 100$ in baht?");
    }

    #[tokio::test]
    async fn test_respond_renders_errors() {
        let runner = ScriptedGenerator::default();
        runner.push_error("connection refused");
        let agent = ConversationAgent::new(runner);

        let reply = agent.respond("Convert 50 EUR to GBP").await;

        assert_eq!(reply, "Error: API error: connection refused");
    }

    #[tokio::test]
    async fn test_chat_loop() {
        let runner = ScriptedGenerator::new([
            "Sorry, I only handle currency conversion.",
            "50 EUR is 42.50 GBP.",
        ]);
        runner.push_error("timeout");
        let agent = ConversationAgent::new(runner);

        let output = run_chat(
            &agent,
            "What's the weather?\n\nConvert 50 EUR to GBP\nagain please\nQ\nnever read\n",
        )
        .await;

        assert!(output.starts_with("💱 Currency Converter Assistant"));
        assert!(output.contains("🤖 Assistant: Sorry, I only handle currency conversion."));
        assert!(output.contains("🤖 Assistant: 50 EUR is 42.50 GBP."));
        assert!(output.contains("🤖 Assistant: Error: API error: timeout"));
        assert!(output.trim_end().ends_with(FAREWELL));

        // Blank line skipped, nothing read after the quit keyword
        let prompts: Vec<String> = agent.runner.calls().into_iter().map(|c| c.prompt).collect();
        assert_eq!(
            prompts,
            vec!["What's the weather?", "Convert 50 EUR to GBP", "again please"]
        );
    }

    #[tokio::test]
    async fn test_chat_ends_on_eof() {
        let agent = ConversationAgent::new(ScriptedGenerator::default());

        let output = run_chat(&agent, "").await;

        assert!(output.trim_end().ends_with(FAREWELL));
        assert!(agent.runner.calls().is_empty());
    }
}
