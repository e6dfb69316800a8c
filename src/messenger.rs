//! Outbound messaging seam.
//!
//! Command handlers only ever talk to the chat transport through this
//! trait, which keeps the dispatch engine independent of Matrix and lets
//! tests substitute a mock.

use mockall::automock;

/// Sends plain-text messages over the chat transport.
#[automock]
pub trait Messenger {
    /// Delivers one plain-text message to a room.
    async fn send(&self, room_id: &str, text: &str) -> Result<(), anyhow::Error>;

    /// Returns the rooms the bot is currently joined to, used to broadcast
    /// notices to everyone the bot can reach.
    async fn connected_rooms(&self) -> Vec<String>;
}
