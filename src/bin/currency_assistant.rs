use std::process;
use tokio::io::BufReader;
use tokio::signal;
use tracing::info;

use chatloops::{
    config, console,
    currency::{agent::FAREWELL, build_agent, chat, ConversationAgent},
    logging,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> miette::Result<()> {
    logging::init();

    info!("Starting currency converter assistant");

    // Load configuration
    let config = config::load_config()?;

    let agent = ConversationAgent::new(build_agent(&config)?);

    let mut stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();

    tokio::select! {
        result = chat(&agent, &mut stdin, &mut stdout) => result?,
        _ = signal::ctrl_c() => {
            info!("Received interrupt, stopping assistant");
            console::interrupted(&mut std::io::stdout(), FAREWELL)?;
            // The blocked stdin read would otherwise hold up runtime shutdown
            process::exit(0);
        }
    }

    Ok(())
}
