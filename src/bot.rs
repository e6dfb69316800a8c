//! Bot wiring.
//!
//! Builds the collaborators from the configuration and connects the Matrix
//! sync loop to the command dispatcher.
//!
//! # Command Processing Model
//!
//! Inbound messages are pushed onto a queue by the Matrix event handler and
//! consumed by a single dispatcher task: one command line is fully
//! processed (parsed, authorized, executed, replied to) before the next
//! one is looked at. There is no overlap, no cancellation and no timeout;
//! the only thing running concurrently with the dispatcher is the game
//! server process itself, which the supervisor tracks behind its own lock.

use std::path::Path;
use std::sync::Arc;

use log::{debug, error};
use tokio::sync::mpsc;

use crate::auth::Authorizer;
use crate::commands::{CommandContext, Commander, Sender};
use crate::config::Config;
use crate::maps::MapDir;
use crate::matrix::{MatrixClient, UserCredentials};
use crate::server::ServerSupervisor;

/// The assembled bot.
///
/// Collaborators are shared behind [`Arc`]: the dispatcher task borrows
/// them for every command, and the supervisor outlives individual commands
/// because it tracks the game server process.
pub struct Bot {
    /// Matrix transport: inbound sync and outbound replies
    matrix_client: Arc<MatrixClient>,
    /// Game server process lifecycle
    supervisor: Arc<ServerSupervisor>,
    /// Map directory queries
    maps: Arc<MapDir>,
    /// Gate for privileged commands
    authorizer: Arc<Authorizer>,
    /// Command parser and dispatcher
    commander: Arc<Commander>,
}

impl Bot {
    /// Creates the bot from its configuration.
    ///
    /// Connects to Matrix (login or session restore); the supervisor and
    /// map inventory are plain local state and cannot fail to construct.
    ///
    /// # Errors
    ///
    /// Returns an error when the Matrix client cannot be set up, typically
    /// bad credentials, a corrupt session file or an unreachable
    /// homeserver.
    pub async fn new(config: Config, data_path: &str) -> Result<Self, anyhow::Error> {
        let matrix_client = Arc::new(
            MatrixClient::new(
                &UserCredentials {
                    user_id: config.matrix.user_id,
                    password: config.matrix.password,
                },
                Path::new(data_path),
            )
            .await?,
        );

        let supervisor = Arc::new(ServerSupervisor::new(
            Path::new(&config.server.binary),
            Path::new(&config.server.home),
        ));
        let maps = Arc::new(MapDir::new(Path::new(&config.server.maps_dir)));
        let authorizer = Arc::new(Authorizer::new(&config.matrix.master_id));
        let commander = Arc::new(Commander::new());

        Ok(Bot { matrix_client, supervisor, maps, authorizer, commander })
    }

    /// Runs the bot until the Matrix sync loop ends.
    pub async fn start(self) -> Result<(), anyhow::Error> {
        let (queue, mut inbox) = mpsc::unbounded_channel::<(Sender, String)>();

        let matrix_client = Arc::clone(&self.matrix_client);
        let supervisor = Arc::clone(&self.supervisor);
        let maps = Arc::clone(&self.maps);
        let authorizer = Arc::clone(&self.authorizer);
        let commander = Arc::clone(&self.commander);

        // Single consumer: one command is fully processed before the next
        // is accepted
        tokio::spawn(async move {
            while let Some((sender, body)) = inbox.recv().await {
                let context = CommandContext {
                    messenger: matrix_client.as_ref(),
                    supervisor: supervisor.as_ref(),
                    maps: maps.as_ref(),
                    authorizer: authorizer.as_ref(),
                };

                let outcome = commander.execute(&context, &sender, &body).await;
                debug!("dispatch outcome for {}: {:?}", sender.user_id, outcome);
            }
        });

        // The sync handler only enqueues; dispatch order is arrival order
        let on_message = move |body: String, room_id: String, user_id: String| {
            if queue.send((Sender { room_id, user_id }, body)).is_err() {
                error!("command dispatcher is gone, dropping message");
            }
        };

        self.matrix_client.sync(on_message).await
    }
}
