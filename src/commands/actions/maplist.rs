//! Maplist command handler.
//!
//! Relays every available map filename to the sender, one message per map.
//! Unauthenticated and read-only.

use log::debug;

use crate::commands::{CommandContext, Sender, actions::send};
use crate::maps::MapInventory;
use crate::messenger::Messenger;
use crate::server::Supervisor;

/// Sends the map list, one filename per message.
///
/// An empty map directory produces no messages at all.
pub async fn handle_maplist<M, S, I>(context: &CommandContext<'_, M, S, I>, sender: &Sender)
where
    M: Messenger,
    S: Supervisor,
    I: MapInventory,
{
    debug!("handling maplist command from {}", sender.user_id);

    for map_name in context.maps.list_maps() {
        send(context.messenger, &sender.room_id, &map_name).await;
    }
}
