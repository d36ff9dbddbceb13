//! Terminal grid games runner (default binary).
//!
//! Configuration is resolved before the terminal is touched, so bad arguments
//! print a plain error. Once the game is on screen, the terminal is restored
//! on every exit path.

use anyhow::Result;
use log::error;

use grid_games::app;
use grid_games::config::{AppConfig, USAGE};
use grid_games::frontend::TermFrontend;
use grid_games::logging;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(config) = AppConfig::from_env()?.apply_args(&args)? else {
        println!("{}", USAGE);
        return Ok(());
    };
    logging::init(config.log_path.as_deref())?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;

    let mut frontend = TermFrontend::new();
    frontend.terminal().enter()?;

    let result = runtime.block_on(app::run(&config, &mut frontend));

    // Always try to restore terminal state.
    let _ = frontend.terminal().exit();
    if let Err(e) = &result {
        error!("exiting on error: {:#}", e);
    }
    result
}
