//! Matrix client wrapper for bot messaging and synchronization.
//!
//! Wraps the Matrix SDK client: builds it against the account's homeserver,
//! restores the persisted session or performs a password login, and exposes
//! the [`Messenger`] operations the command handlers rely on.

use std::path::Path;

use anyhow::Context;
use log::info;
use matrix_sdk::{
    Client,
    ruma::{OwnedUserId, RoomId, events::room::message::RoomMessageEventContent},
};

use crate::matrix::{
    UserCredentials,
    session::{PersistedSession, SessionStore},
    sync::MatrixSync,
};
use crate::messenger::Messenger;

/// Device name shown in the account's session list.
const DEVICE_NAME: &str = "fragbot";

/// High-level Matrix client for the bot.
pub struct MatrixClient {
    /// Synchronization service for incoming events
    matrix_sync: MatrixSync,
    /// Underlying Matrix SDK client
    client: Client,
}

impl MatrixClient {
    /// Creates the Matrix client, restoring the persisted session when one
    /// exists and logging in with the account password otherwise.
    ///
    /// The data directory receives the SDK's sqlite store and the session
    /// file. A fresh login persists its session immediately so the next
    /// start restores instead of creating yet another device.
    ///
    /// # Arguments
    ///
    /// * `credentials` - The bot account's user id and password
    /// * `data_dir` - Directory for the state store and the session file
    ///
    /// # Errors
    ///
    /// Fails if the user id is invalid, the session file is corrupt, the
    /// login is rejected, or the homeserver is unreachable.
    pub async fn new(
        credentials: &UserCredentials,
        data_dir: &Path,
    ) -> Result<Self, anyhow::Error> {
        let session_store = SessionStore::new(data_dir);

        let user_id: OwnedUserId = credentials
            .user_id
            .parse()
            .with_context(|| format!("invalid matrix user id {}", credentials.user_id))?;

        let client = Client::builder()
            .server_name(user_id.server_name())
            .sqlite_store(data_dir.join("store"), None)
            .build()
            .await?;

        match session_store.load().await? {
            Some(persisted) => {
                info!("restoring matrix session for {}", credentials.user_id);
                client.restore_session(persisted.session).await?;
            }
            None => {
                info!("logging in to matrix as {}", credentials.user_id);
                client
                    .matrix_auth()
                    .login_username(user_id, &credentials.password)
                    .initial_device_display_name(DEVICE_NAME)
                    .send()
                    .await?;

                let session = client
                    .matrix_auth()
                    .session()
                    .context("no session available after login")?;
                session_store
                    .save(&PersistedSession { session, sync_token: None })
                    .await?;
            }
        }

        client.account().set_display_name(Some("Fragbot")).await?;

        let matrix_sync = MatrixSync::new(&client, &session_store);

        Ok(MatrixClient { matrix_sync, client })
    }

    /// Runs the sync loop, invoking `on_message` for every inbound text
    /// message as `(body, room_id, sender_id)`.
    ///
    /// Does not return under normal operation.
    pub async fn sync<F>(&self, on_message: F) -> Result<(), anyhow::Error>
    where
        F: Fn(String, String, String) + Send + Sync + 'static,
    {
        self.matrix_sync.sync(on_message).await
    }
}

impl Messenger for MatrixClient {
    async fn send(&self, room_id: &str, text: &str) -> Result<(), anyhow::Error> {
        let room_id = RoomId::parse(room_id)?;
        let Some(room) = self.client.get_room(&room_id) else {
            anyhow::bail!("not a member of room {}", room_id);
        };

        room.send(RoomMessageEventContent::text_plain(text)).await?;
        Ok(())
    }

    async fn connected_rooms(&self) -> Vec<String> {
        self.client
            .joined_rooms()
            .iter()
            .map(|room| room.room_id().to_string())
            .collect()
    }
}
