//! Status command handler.
//!
//! Reports whether the game server is running. Unauthenticated and
//! read-only.

use log::debug;

use crate::commands::{
    CommandContext, Sender,
    actions::send,
    responses::{format_not_running, format_running},
};
use crate::maps::MapInventory;
use crate::messenger::Messenger;
use crate::server::Supervisor;

/// Replies with the current server state.
pub async fn handle_status<M, S, I>(context: &CommandContext<'_, M, S, I>, sender: &Sender)
where
    M: Messenger,
    S: Supervisor,
    I: MapInventory,
{
    debug!("handling status command from {}", sender.user_id);

    let response = if context.supervisor.is_running().await {
        format_running()
    } else {
        format_not_running()
    };

    send(context.messenger, &sender.room_id, &response).await;
}
