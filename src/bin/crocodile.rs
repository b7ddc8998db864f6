use std::process;
use std::sync::Arc;
use tokio::io::BufReader;
use tokio::signal;
use tracing::info;

use chatloops::{config, console, game::GameSession, llm::OpenAiGenerator, logging};

#[tokio::main(flavor = "current_thread")]
async fn main() -> miette::Result<()> {
    logging::init();

    info!("Starting Crocodile word game");

    // Load configuration
    let config = config::load_config()?;

    let generator = Arc::new(OpenAiGenerator::new(&config.llm));
    let mut session = GameSession::new(generator, config.word_batch_size);

    let mut stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();

    tokio::select! {
        result = session.run(&mut stdin, &mut stdout) => result?,
        _ = signal::ctrl_c() => {
            info!("Received interrupt, stopping game");
            console::interrupted(&mut std::io::stdout(), "Bye!")?;
            // The blocked stdin read would otherwise hold up runtime shutdown
            process::exit(0);
        }
    }

    Ok(())
}
