//! Stop command handler.
//!
//! Asks the supervisor to terminate the tracked game server. Privileged.

use log::{debug, error};

use crate::commands::{
    CommandContext, Sender,
    actions::send,
    responses::{
        format_invalid_command, format_not_running, format_shutting_down, format_stop_failed,
    },
};
use crate::maps::MapInventory;
use crate::messenger::Messenger;
use crate::server::{Supervisor, SupervisorError};

/// Shuts the game server down.
///
/// Exactly one reply in every case: the authorization rejection, "not
/// running", the shutdown confirmation, or the signaling failure. On a
/// signaling failure the supervisor keeps tracking the process.
pub async fn handle_stop<M, S, I>(context: &CommandContext<'_, M, S, I>, sender: &Sender)
where
    M: Messenger,
    S: Supervisor,
    I: MapInventory,
{
    debug!("handling stop command from {}", sender.user_id);

    if !context.authorizer.is_authorized(&sender.user_id) {
        send(context.messenger, &sender.room_id, &format_invalid_command()).await;
        return;
    }

    match context.supervisor.stop().await {
        Ok(()) => send(context.messenger, &sender.room_id, &format_shutting_down()).await,
        Err(SupervisorError::NotRunning) => {
            send(context.messenger, &sender.room_id, &format_not_running()).await;
        }
        Err(e) => {
            error!("failed to stop game server: {:?}", e);
            send(context.messenger, &sender.room_id, &format_stop_failed()).await;
        }
    }
}
