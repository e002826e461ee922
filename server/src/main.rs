mod broadcaster;
mod identifiers;
mod messages;
mod server_config;
mod web_server;
mod ws_handler;

use std::path::PathBuf;

use clap::Parser;
use common::games::SessionRng;
use common::games::tictactoe::TicTacToeSession;
use common::{log, logger};
use tokio::sync::mpsc;

use broadcaster::ClientBroadcaster;
use server_config::get_config_manager;
use web_server::{WebServerState, run_web_server};

#[derive(Parser)]
#[command(name = "tictactoe_server")]
struct Args {
    #[arg(long)]
    use_log_prefix: bool,

    /// Path to the YAML config; defaults to a file next to the executable.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Fixed RNG seed for the computer's random moves, overrides the config.
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Server".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config = get_config_manager(args.config.as_deref()).get_config()?;
    let addr = config.socket_addr()?;

    let rng = match args.seed.or(config.seed) {
        Some(seed) => SessionRng::new(seed),
        None => SessionRng::from_random(),
    };

    let broadcaster = ClientBroadcaster::new();
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let session = TicTacToeSession::new("main".to_string(), config.session_settings(), rng);
    let session_handle = tokio::spawn(session.run(command_rx, broadcaster.clone()));

    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log!("Failed to listen for Ctrl+C: {}", e);
            return;
        }
        log!("Shutdown signal received");
    };

    let state = WebServerState {
        broadcaster,
        command_tx,
    };
    run_web_server(
        addr,
        state,
        config.static_files_path.map(PathBuf::from),
        shutdown_signal,
    )
    .await?;

    session_handle.abort();
    log!("Server shut down gracefully");

    Ok(())
}
