//! Reply strings for bot commands.
//!
//! Every user-visible reply lives here as a formatter function. Replies are
//! plain text: the bot talks to game server operators, not renderers.

/// Reply sent when a privileged command comes from anyone but the master.
///
/// Deliberately as uninformative as an unknown command.
pub fn format_invalid_command() -> String {
    "Invalid command.".to_owned()
}

/// Reply sent when `start` is missing its map argument.
pub fn format_missing_map() -> String {
    "Error: a starting map is required (try 'start de_dust2' or 'start cs_assault')".to_owned()
}

/// Reply sent when the requested map is not in the map directory.
pub fn format_map_not_found(map_name: &str) -> String {
    format!("Error: map '{}' doesn't exist", map_name)
}

/// Reply sent when `start` is issued while a server is already tracked.
pub fn format_already_running() -> String {
    "Server is already running".to_owned()
}

/// Reply sent when the game server process has been spawned.
pub fn format_started() -> String {
    "Started server".to_owned()
}

/// Reply sent when spawning the game server process failed.
pub fn format_start_failed() -> String {
    "Failed to execute system command".to_owned()
}

/// Notice broadcast to every connected room after a successful start.
pub fn format_play_notice() -> String {
    "Fragbot has started a server, it's time to play!".to_owned()
}

/// Reply sent when the game server has been told to terminate.
pub fn format_shutting_down() -> String {
    "Shutting down server".to_owned()
}

/// Reply sent when `stop` or `status` finds no running server.
pub fn format_not_running() -> String {
    "Server is not running".to_owned()
}

/// Reply sent when `status` finds a running server.
pub fn format_running() -> String {
    "Server is running".to_owned()
}

/// Reply sent when signaling the game server failed.
pub fn format_stop_failed() -> String {
    "Failed to shut down server".to_owned()
}
