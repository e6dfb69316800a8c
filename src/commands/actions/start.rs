//! Start command handler.
//!
//! Launches the game server on a requested map. Privileged: the
//! authorization gate runs before anything else, argument validation
//! included. The already-running check lives inside the supervisor's start
//! operation, atomically with the spawn, so two rapid starts cannot both
//! launch.

use log::{debug, error};

use crate::commands::{
    CommandContext, Sender,
    actions::send,
    responses::{
        format_already_running, format_invalid_command, format_map_not_found, format_missing_map,
        format_play_notice, format_start_failed, format_started,
    },
};
use crate::maps::MapInventory;
use crate::messenger::Messenger;
use crate::server::{Supervisor, SupervisorError};

/// Starts the game server on the map named by the first argument.
///
/// Rejection order mirrors the user-visible contract: authorization, map
/// argument present, map exists, server not already running. On success the
/// sender gets a confirmation and every connected room gets a started
/// notice.
pub async fn handle_start<M, S, I>(
    context: &CommandContext<'_, M, S, I>,
    sender: &Sender,
    args: &[String],
) where
    M: Messenger,
    S: Supervisor,
    I: MapInventory,
{
    debug!("handling start command from {}", sender.user_id);

    if !context.authorizer.is_authorized(&sender.user_id) {
        send(context.messenger, &sender.room_id, &format_invalid_command()).await;
        return;
    }

    let Some(map_name) = args.first() else {
        send(context.messenger, &sender.room_id, &format_missing_map()).await;
        return;
    };

    if !context.maps.map_exists(map_name) {
        send(context.messenger, &sender.room_id, &format_map_not_found(map_name)).await;
        return;
    }

    match context.supervisor.start(map_name).await {
        Ok(()) => {
            send(context.messenger, &sender.room_id, &format_started()).await;

            // Everyone the bot can reach gets told the server is up
            let notice = format_play_notice();
            for room_id in context.messenger.connected_rooms().await {
                send(context.messenger, &room_id, &notice).await;
            }
        }
        Err(SupervisorError::AlreadyRunning) => {
            send(context.messenger, &sender.room_id, &format_already_running()).await;
        }
        Err(e) => {
            error!("failed to start game server: {:?}", e);
            send(context.messenger, &sender.room_id, &format_start_failed()).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;

    use crate::auth::Authorizer;
    use crate::maps::MockMapInventory;
    use crate::messenger::MockMessenger;
    use crate::server::MockSupervisor;

    const MASTER: &str = "@admin:example.com";
    const ROOM: &str = "!room:example.com";

    fn master_sender() -> Sender {
        Sender { room_id: ROOM.to_owned(), user_id: MASTER.to_owned() }
    }

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[tokio::test]
    async fn test_handle_start_unauthorized() {
        let mut messenger = MockMessenger::new();
        let supervisor = MockSupervisor::new();
        let maps = MockMapInventory::new();
        let authorizer = Authorizer::new(MASTER);

        messenger
            .expect_send()
            .withf(|room, text| room == ROOM && text == format_invalid_command())
            .times(1)
            .returning(|_, _| Ok(()));

        let context = CommandContext {
            messenger: &messenger,
            supervisor: &supervisor,
            maps: &maps,
            authorizer: &authorizer,
        };
        let sender = Sender { room_id: ROOM.to_owned(), user_id: "@guest:example.com".to_owned() };

        // The gate runs before argument validation: even a well-formed
        // start from a guest only yields the rejection
        handle_start(&context, &sender, &args(&["de_dust2"])).await;
    }

    #[tokio::test]
    async fn test_handle_start_missing_map_argument() {
        let mut messenger = MockMessenger::new();
        let supervisor = MockSupervisor::new();
        let maps = MockMapInventory::new();
        let authorizer = Authorizer::new(MASTER);

        messenger
            .expect_send()
            .withf(|room, text| room == ROOM && text == format_missing_map())
            .times(1)
            .returning(|_, _| Ok(()));

        let context = CommandContext {
            messenger: &messenger,
            supervisor: &supervisor,
            maps: &maps,
            authorizer: &authorizer,
        };

        handle_start(&context, &master_sender(), &[]).await;
    }

    #[tokio::test]
    async fn test_handle_start_unknown_map() {
        let mut messenger = MockMessenger::new();
        let supervisor = MockSupervisor::new();
        let mut maps = MockMapInventory::new();
        let authorizer = Authorizer::new(MASTER);

        maps.expect_map_exists().with(eq("de_void")).times(1).return_const(false);
        messenger
            .expect_send()
            .withf(|room, text| room == ROOM && text == format_map_not_found("de_void"))
            .times(1)
            .returning(|_, _| Ok(()));

        let context = CommandContext {
            messenger: &messenger,
            supervisor: &supervisor,
            maps: &maps,
            authorizer: &authorizer,
        };

        handle_start(&context, &master_sender(), &args(&["de_void"])).await;
    }

    #[tokio::test]
    async fn test_handle_start_already_running() {
        let mut messenger = MockMessenger::new();
        let mut supervisor = MockSupervisor::new();
        let mut maps = MockMapInventory::new();
        let authorizer = Authorizer::new(MASTER);

        maps.expect_map_exists().return_const(true);
        supervisor
            .expect_start()
            .times(1)
            .returning(|_| Err(SupervisorError::AlreadyRunning));
        messenger
            .expect_send()
            .withf(|room, text| room == ROOM && text == format_already_running())
            .times(1)
            .returning(|_, _| Ok(()));

        let context = CommandContext {
            messenger: &messenger,
            supervisor: &supervisor,
            maps: &maps,
            authorizer: &authorizer,
        };

        handle_start(&context, &master_sender(), &args(&["de_dust2"])).await;
    }

    #[tokio::test]
    async fn test_handle_start_spawn_failure() {
        let mut messenger = MockMessenger::new();
        let mut supervisor = MockSupervisor::new();
        let mut maps = MockMapInventory::new();
        let authorizer = Authorizer::new(MASTER);

        maps.expect_map_exists().return_const(true);
        supervisor.expect_start().times(1).returning(|_| {
            Err(SupervisorError::Spawn(std::io::Error::from(std::io::ErrorKind::NotFound)))
        });
        messenger
            .expect_send()
            .withf(|room, text| room == ROOM && text == format_start_failed())
            .times(1)
            .returning(|_, _| Ok(()));

        let context = CommandContext {
            messenger: &messenger,
            supervisor: &supervisor,
            maps: &maps,
            authorizer: &authorizer,
        };

        // No broadcast on failure: connected_rooms has no expectation
        handle_start(&context, &master_sender(), &args(&["de_dust2"])).await;
    }

    #[tokio::test]
    async fn test_handle_start_success_broadcasts() {
        let mut messenger = MockMessenger::new();
        let mut supervisor = MockSupervisor::new();
        let mut maps = MockMapInventory::new();
        let authorizer = Authorizer::new(MASTER);

        maps.expect_map_exists().with(eq("cs_assault")).times(1).return_const(true);
        supervisor.expect_start().with(eq("cs_assault")).times(1).returning(|_| Ok(()));
        messenger
            .expect_send()
            .withf(|room, text| room == ROOM && text == format_started())
            .times(1)
            .returning(|_, _| Ok(()));
        messenger
            .expect_connected_rooms()
            .times(1)
            .returning(|| vec!["!lobby:example.com".to_owned()]);
        messenger
            .expect_send()
            .withf(|room, text| room == "!lobby:example.com" && text == format_play_notice())
            .times(1)
            .returning(|_, _| Ok(()));

        let context = CommandContext {
            messenger: &messenger,
            supervisor: &supervisor,
            maps: &maps,
            authorizer: &authorizer,
        };

        handle_start(&context, &master_sender(), &args(&["cs_assault"])).await;
    }

    #[tokio::test]
    async fn test_handle_start_empty_map_name_is_checked_against_inventory() {
        let mut messenger = MockMessenger::new();
        let supervisor = MockSupervisor::new();
        let mut maps = MockMapInventory::new();
        let authorizer = Authorizer::new(MASTER);

        // "start " tokenizes to an empty map name, which no inventory holds
        maps.expect_map_exists().with(eq("")).times(1).return_const(false);
        messenger
            .expect_send()
            .withf(|room, text| room == ROOM && text == format_map_not_found(""))
            .times(1)
            .returning(|_, _| Ok(()));

        let context = CommandContext {
            messenger: &messenger,
            supervisor: &supervisor,
            maps: &maps,
            authorizer: &authorizer,
        };

        handle_start(&context, &master_sender(), &args(&[""])).await;
    }
}
