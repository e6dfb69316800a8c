//! Matrix protocol integration for the bot.
//!
//! Wraps the Matrix SDK behind the bot's [`Messenger`](crate::messenger)
//! seam: login or session restoration, the sync loop delivering inbound
//! text messages, and plain-text sends. The bot operates in unencrypted
//! rooms; it exchanges operational commands, not secrets, so the SDK's
//! end-to-end encryption bootstrap is not set up.

mod client;
mod session;
mod sync;

pub use crate::matrix::client::MatrixClient;

/// Credentials of the bot's Matrix account.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    /// Fully qualified user id of the bot account
    pub user_id: String,
    /// Password of the bot account, used when no session can be restored
    pub password: String,
}
