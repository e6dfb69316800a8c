//! Matrix synchronization and event handling.
//!
//! Runs the client's sync loop: auto-joins rooms the bot is invited to,
//! catches up once before listening so the message backlog is never
//! replayed into the command dispatcher, and persists the sync token after
//! every batch so a restart resumes where this run stopped.

use std::sync::Arc;

use log::{error, info, warn};
use matrix_sdk::{
    Client, LoopCtrl, Room, RoomState,
    config::SyncSettings,
    ruma::{
        OwnedUserId,
        api::client::filter::FilterDefinition,
        events::room::{
            member::StrippedRoomMemberEvent,
            message::{MessageType, OriginalSyncRoomMessageEvent},
        },
    },
};
use tokio::time::{Duration, sleep};

use crate::matrix::session::SessionStore;

/// Manages the Matrix sync loop and inbound message delivery.
pub struct MatrixSync {
    /// The matrix client
    client: Client,
    /// Persistence for the sync token
    store: SessionStore,
}

impl MatrixSync {
    /// Creates a new sync service; [`MatrixSync::sync`] starts it.
    pub fn new(client: &Client, store: &SessionStore) -> Self {
        MatrixSync { client: client.to_owned(), store: store.to_owned() }
    }

    /// Runs the sync loop until an unrecoverable sync error.
    ///
    /// `on_message` is invoked for each text message in a joined room as
    /// `(body, room_id, sender_id)`. The bot's own messages are skipped;
    /// everything that happened before this run started is consumed by an
    /// initial catch-up sync and never delivered.
    pub async fn sync<F>(&self, on_message: F) -> Result<(), anyhow::Error>
    where
        F: Fn(String, String, String) + Send + Sync + 'static,
    {
        info!("start syncing");

        // Auto join rooms when invited
        self.client.add_event_handler(auto_join_rooms);

        // Room members are not needed eagerly, lazy-load them
        let filter = FilterDefinition::with_lazy_loading();
        let mut sync_settings = SyncSettings::default().filter(filter.into());

        if let Some(sync_token) = self.store.sync_token().await? {
            sync_settings = sync_settings.token(sync_token);
        }

        // Catch up before the message handler exists: pending invites get
        // processed, the backlog does not reach the dispatcher
        let response = self.client.sync_once(sync_settings.clone()).await?;
        sync_settings = sync_settings.token(response.next_batch.clone());
        if let Err(e) = self.store.save_sync_token(&response.next_batch).await {
            error!("failed to persist sync token: {:?}", e);
        }

        let own_user_id = self.client.user_id().map(ToOwned::to_owned);
        let on_message = Arc::new(on_message);

        self.client.add_event_handler({
            let on_message = Arc::clone(&on_message);
            move |event: OriginalSyncRoomMessageEvent, room: Room| {
                let on_message = Arc::clone(&on_message);
                let own_user_id = own_user_id.clone();
                async move {
                    on_room_message(event, room, own_user_id, &on_message);
                }
            }
        });

        let store = self.store.clone();
        self.client
            .sync_with_result_callback(sync_settings, move |sync_result| {
                let store = store.clone();
                async move {
                    let response = sync_result?;

                    // Persist every batch so a restart resumes here
                    if let Err(e) = store.save_sync_token(&response.next_batch).await {
                        error!("failed to persist sync token: {:?}", e);
                    }

                    Ok(LoopCtrl::Continue)
                }
            })
            .await?;

        Ok(())
    }
}

/// Joins rooms the bot gets invited to.
///
/// Joining right after the invite can race the homeserver, so failures are
/// retried with backoff. See
/// <https://github.com/matrix-org/synapse/issues/4345>.
async fn auto_join_rooms(room_member: StrippedRoomMemberEvent, client: Client, room: Room) {
    let Some(user_id) = client.user_id() else {
        warn!("could not get user id from client");
        return;
    };

    // Ignore invites meant for somebody else
    if room_member.state_key != user_id {
        return;
    }

    tokio::spawn(async move {
        info!("auto joining room {}", room.room_id());
        let mut delay = 2;

        while let Err(err) = room.join().await {
            error!("failed to join room {} ({err:?}), retrying in {delay}s", room.room_id());

            sleep(Duration::from_secs(delay)).await;
            delay *= 2;

            if delay > 3600 {
                error!("giving up joining room {} ({err:?})", room.room_id());
                return;
            }
        }
        info!("joined room {}", room.room_id());
    });
}

/// Filters one room message event down to the command callback.
///
/// Only text messages in joined rooms are delivered, and never the bot's
/// own.
fn on_room_message<F>(
    event: OriginalSyncRoomMessageEvent,
    room: Room,
    own_user_id: Option<OwnedUserId>,
    on_message: &Arc<F>,
) where
    F: Fn(String, String, String) + Send + Sync + 'static,
{
    if room.state() != RoomState::Joined {
        return;
    }

    if Some(&event.sender) == own_user_id.as_ref() {
        return;
    }

    let MessageType::Text(text_content) = event.content.msgtype else {
        return;
    };

    on_message(text_content.body, room.room_id().to_string(), event.sender.to_string());
}
