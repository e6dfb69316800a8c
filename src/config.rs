//! Configuration file structures for the bot.
//!
//! The configuration is a YAML file with two sections: the Matrix account
//! the bot runs as, and the game server installation it supervises. Any
//! value can be overridden with an environment variable using the
//! `FRAGBOT_` prefix and `__` as the section separator, which keeps the
//! account password out of the file on deployments that prefer it.
//!
//! # Configuration File Format
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
//! # Environment Variable Overrides
//!
//! ```bash
//! export FRAGBOT_MATRIX__PASSWORD="secret-from-env"
//! export FRAGBOT_SERVER__MAPS_DIR="/srv/maps"
//! ```

use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::Deserialize;

/// Root configuration structure.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Matrix account configuration
    pub matrix: Matrix,
    /// Game server configuration
    pub server: Server,
}

/// Matrix account configuration.
#[derive(Debug, Deserialize)]
pub struct Matrix {
    /// Fully qualified Matrix user id of the bot account
    pub user_id: String,
    /// Password of the bot account.
    ///
    /// Used for the initial login; afterwards the persisted session is
    /// restored and the password is not needed again.
    pub password: String,
    /// Matrix user id allowed to run privileged commands
    pub master_id: String,
}

/// Game server configuration.
#[derive(Debug, Deserialize)]
pub struct Server {
    /// Path to the server binary (hlds_run)
    pub binary: String,
    /// Working directory the server is launched from
    pub home: String,
    /// Directory holding the `.bsp` map files
    pub maps_dir: String,
}

impl Config {
    /// Loads the configuration from a YAML file, applying `FRAGBOT_`
    /// environment overrides on top.
    pub fn load(path: &str) -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Yaml::file(path))
            .merge(Env::prefixed("FRAGBOT_").split("__"))
            .extract()
    }
}
