//! Game server process supervision.
//!
//! The bot tracks at most one external game server process at a time. All
//! lifecycle operations go through the [`Supervisor`] trait so the command
//! handlers never touch process or signal mechanics directly, and tests can
//! substitute a mock.

mod supervisor;

pub use crate::server::supervisor::ServerSupervisor;

use mockall::automock;

/// Errors reported by the process supervisor.
#[derive(Debug)]
pub enum SupervisorError {
    /// A server process is already tracked; a second one is never started
    AlreadyRunning,
    /// No server process is tracked
    NotRunning,
    /// Spawning the server binary failed
    Spawn(std::io::Error),
    /// Delivering the termination signal failed
    Signal(nix::errno::Errno),
}

/// Manages the lifecycle of the single game server process.
#[automock]
pub trait Supervisor {
    /// Launches the game server on the given map.
    ///
    /// Fails with [`SupervisorError::AlreadyRunning`] if a live server
    /// process is already tracked; the check and the spawn happen under one
    /// lock so two concurrent starts cannot both launch.
    async fn start(&self, map_name: &str) -> Result<(), SupervisorError>;

    /// Asks the tracked game server process to terminate gracefully.
    ///
    /// Fails with [`SupervisorError::NotRunning`] if no live process is
    /// tracked. On success the process is no longer tracked.
    async fn stop(&self) -> Result<(), SupervisorError>;

    /// Returns whether a game server process is currently running.
    ///
    /// This is a point-in-time query; a process that exited on its own is
    /// noticed and untracked here.
    async fn is_running(&self) -> bool;
}
