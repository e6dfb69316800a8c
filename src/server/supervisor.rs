//! Supervisor implementation spawning the real game server binary.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use log::{info, warn};
use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;
use tokio::process::{Child, Command};
use tokio::sync::Mutex;

use crate::server::{Supervisor, SupervisorError};

/// Game directory passed to the server binary.
const GAME_MOD: &str = "cstrike";
/// Player cap passed to the server binary.
const MAX_PLAYERS: &str = "10";
/// Server configuration file executed at startup.
const SERVER_CONFIG: &str = "server.cfg";

/// Supervises the Half-Life dedicated server process.
///
/// Holds the single tracked child process behind a mutex. Every operation
/// takes the lock for its whole duration, so check-then-start and
/// check-then-stop cannot interleave even if commands ever arrive
/// concurrently.
pub struct ServerSupervisor {
    /// Path to the server binary (hlds_run)
    binary: PathBuf,
    /// Working directory the server is launched from
    home: PathBuf,
    /// The tracked server process, if one was started
    child: Mutex<Option<Child>>,
}

impl ServerSupervisor {
    /// Creates a supervisor for the given binary and working directory.
    pub fn new(binary: &Path, home: &Path) -> Self {
        ServerSupervisor {
            binary: binary.to_owned(),
            home: home.to_owned(),
            child: Mutex::new(None),
        }
    }

    /// Returns whether the slot holds a live child, untracking a child that
    /// already exited on its own.
    fn slot_running(slot: &mut Option<Child>) -> bool {
        let Some(child) = slot.as_mut() else {
            return false;
        };

        match child.try_wait() {
            Ok(Some(status)) => {
                info!("game server exited on its own with {}", status);
                *slot = None;
                false
            }
            Ok(None) => true,
            Err(e) => {
                // Can't tell; keep tracking rather than double-start
                warn!("failed to poll game server process: {}", e);
                true
            }
        }
    }
}

impl Supervisor for ServerSupervisor {
    async fn start(&self, map_name: &str) -> Result<(), SupervisorError> {
        let mut slot = self.child.lock().await;

        if Self::slot_running(&mut slot) {
            return Err(SupervisorError::AlreadyRunning);
        }

        let child = Command::new(&self.binary)
            .current_dir(&self.home)
            .args(["-game", GAME_MOD, "+maxplayers", MAX_PLAYERS, "+map", map_name])
            .args(["+exec", SERVER_CONFIG])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(SupervisorError::Spawn)?;

        info!("started game server on map {} (pid {:?})", map_name, child.id());
        *slot = Some(child);
        Ok(())
    }

    async fn stop(&self) -> Result<(), SupervisorError> {
        let mut slot = self.child.lock().await;

        let Some(mut child) = slot.take() else {
            return Err(SupervisorError::NotRunning);
        };

        if let Ok(Some(status)) = child.try_wait() {
            info!("game server exited on its own with {}", status);
            return Err(SupervisorError::NotRunning);
        }

        let Some(pid) = child.id() else {
            return Err(SupervisorError::NotRunning);
        };

        if let Err(errno) = signal::kill(Pid::from_raw(pid as i32), Signal::SIGTERM) {
            // The process is still alive; keep tracking it
            *slot = Some(child);
            return Err(SupervisorError::Signal(errno));
        }

        info!("sent SIGTERM to game server (pid {})", pid);

        // Reap in the background so the child doesn't linger as a zombie
        tokio::spawn(async move {
            match child.wait().await {
                Ok(status) => info!("game server exited with {}", status),
                Err(e) => warn!("failed to reap game server process: {}", e),
            }
        });

        Ok(())
    }

    async fn is_running(&self) -> bool {
        let mut slot = self.child.lock().await;
        Self::slot_running(&mut slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    // A stand-in server binary that ignores its arguments and stays alive
    // until signaled.
    fn create_fake_server(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("fake_server.sh");
        fs::write(&path, "#!/bin/sh\nsleep 30\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[tokio::test]
    async fn test_start_and_stop() {
        let temp_dir = TempDir::new().unwrap();
        let binary = create_fake_server(&temp_dir);
        let supervisor = ServerSupervisor::new(&binary, temp_dir.path());

        assert!(!supervisor.is_running().await);
        supervisor.start("de_dust2").await.unwrap();
        assert!(supervisor.is_running().await);

        supervisor.stop().await.unwrap();
        assert!(!supervisor.is_running().await);
    }

    #[tokio::test]
    async fn test_start_twice_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let binary = create_fake_server(&temp_dir);
        let supervisor = ServerSupervisor::new(&binary, temp_dir.path());

        supervisor.start("de_dust2").await.unwrap();
        assert!(matches!(
            supervisor.start("cs_assault").await,
            Err(SupervisorError::AlreadyRunning)
        ));

        supervisor.stop().await.unwrap();
    }

    #[tokio::test]
    async fn test_stop_without_start() {
        let temp_dir = TempDir::new().unwrap();
        let binary = create_fake_server(&temp_dir);
        let supervisor = ServerSupervisor::new(&binary, temp_dir.path());

        assert!(matches!(supervisor.stop().await, Err(SupervisorError::NotRunning)));
    }

    #[tokio::test]
    async fn test_stop_twice() {
        let temp_dir = TempDir::new().unwrap();
        let binary = create_fake_server(&temp_dir);
        let supervisor = ServerSupervisor::new(&binary, temp_dir.path());

        supervisor.start("de_dust2").await.unwrap();
        supervisor.stop().await.unwrap();
        assert!(matches!(supervisor.stop().await, Err(SupervisorError::NotRunning)));
    }

    #[tokio::test]
    async fn test_start_with_missing_binary() {
        let temp_dir = TempDir::new().unwrap();
        let binary = temp_dir.path().join("nonexistent");
        let supervisor = ServerSupervisor::new(&binary, temp_dir.path());

        assert!(matches!(
            supervisor.start("de_dust2").await,
            Err(SupervisorError::Spawn(_))
        ));
        // Spawn failure must leave no tracked process behind
        assert!(!supervisor.is_running().await);
    }

    #[tokio::test]
    async fn test_is_running_notices_exited_child() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("short_lived.sh");
        fs::write(&path, "#!/bin/sh\nexit 0\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        let supervisor = ServerSupervisor::new(&path, temp_dir.path());

        supervisor.start("de_dust2").await.unwrap();

        // Give the child time to exit on its own
        tokio::time::sleep(std::time::Duration::from_millis(200)).await;
        assert!(!supervisor.is_running().await);

        // And a start afterwards is allowed again
        assert!(matches!(supervisor.stop().await, Err(SupervisorError::NotRunning)));
    }
}
