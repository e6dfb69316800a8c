//! Fragbot - a Matrix bot for remote-controlling a Half-Life dedicated
//! game server.
//!
//! # Overview
//!
//! Fragbot sits in Matrix rooms and turns chat messages into game server
//! operations: the configured master can start the server on a chosen map
//! and shut it down again, while anyone in a room with the bot can ask for
//! the server status or the list of installed maps.
//!
//! # Bot Commands
//!
//! - `start <map>` - launch the server on a map (master only)
//! - `stop` - shut the server down (master only)
//! - `status` - report whether the server is running
//! - `maplist` - list the installed maps, one message each
//!
//! Privileged commands from anyone but the master are answered with
//! `Invalid command.`; unknown commands are ignored entirely.
//!
//! # Configuration
//!
//! Create a `config.yaml` file with your settings:
//!
//! ```yaml
//! matrix:
//!   user_id: "@fragbot:matrix.org"
//!   password: "bot-account-password"
//!   master_id: "@admin:matrix.org"
//!
//! server:
//!   binary: "/opt/hl/game/hlds_run"
//!   home: "/opt/hl/game"
//!   maps_dir: "/opt/hl/game/cstrike/maps"
//! ```
//!
//! Any value can be overridden with a `FRAGBOT_`-prefixed environment
//! variable, using `__` between section and key:
//!
//! ```bash
//! export FRAGBOT_MATRIX__PASSWORD="secret-from-env"
//! ```
//!
//! # Usage
//!
//! ```bash
//! fragbot --config config.yaml --data ./fragbot-data
//! ```
//!
//! The data directory holds the Matrix session (authentication tokens and
//! the SDK's state store); restarts restore the session instead of
//! creating a new device. Treat it like a credential.
//!
//! # Architecture
//!
//! - [`commands`] - command parsing, the registry and the handlers
//! - [`auth`] - the master-only authorization gate
//! - [`matrix`] - Matrix client, session persistence and sync loop
//! - [`server`] - game server process supervision
//! - [`maps`] - map directory queries
//! - [`bot`] - wiring of the above
//! - [`config`] - YAML configuration with environment overrides
//!
//! # Environment Variables
//!
//! - `RUST_LOG` - controls the logging level (default: `info`)

use clap::Parser;
use env_logger::Env;
use log::{error, info};

use crate::{bot::Bot, config::Config};

mod auth;
mod bot;
mod commands;
mod config;
mod maps;
mod matrix;
mod messenger;
mod server;

/// Command-line arguments for the bot.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the YAML configuration file.
    ///
    /// See the [`config`] module for the expected format. Values can be
    /// overridden with `FRAGBOT_`-prefixed environment variables.
    #[arg(short, long)]
    config: String,

    /// Path to the directory for storing persistent data.
    ///
    /// Contains the Matrix session and state store. The session grants
    /// access to the bot account, so keep the directory private.
    #[arg(short, long)]
    data: String,
}

#[tokio::main]
async fn main() {
    // Put logger at info level by default
    let env = Env::default().filter_or("RUST_LOG", "info");
    env_logger::init_from_env(env);

    info!("Starting fragbot {}...", env!("CARGO_PKG_VERSION"));

    // Parse command line arguments
    let args = Args::parse();

    // Load configuration from YAML file with environment variable overrides
    let config = match Config::load(&args.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load config file: {}", e);
            return;
        }
    };

    // Launch bot
    let bot = match Bot::new(config, &args.data).await {
        Ok(b) => b,
        Err(e) => {
            error!("Failed to initialize bot: {}", e);
            return;
        }
    };

    if let Err(e) = bot.start().await {
        error!("bot stopped with error: {:?}", e);
    }
}
