use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::{Child, Command};

use tracing::{info, warn};

/// Starts the candidate process, optionally inside a new terminal window.
pub(crate) struct CandidateLauncher {
    terminal: Option<String>,
    program: PathBuf,
}

pub(crate) enum LaunchOutcome {
    Spawned(Child),
    /// Nothing was started; the operator runs the command themselves.
    Manual(String),
}

impl CandidateLauncher {
    pub(crate) fn new(terminal: Option<String>) -> io::Result<Self> {
        Ok(Self {
            terminal,
            program: std::env::current_exe()?,
        })
    }

    /// Arguments of the candidate command, terminal prefix included.
    pub(crate) fn command_line(&self, addr: SocketAddr) -> Vec<String> {
        let mut argv: Vec<String> = self
            .terminal
            .as_deref()
            .map(|prefix| prefix.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default();
        argv.extend([
            self.program.display().to_string(),
            "candidate".to_string(),
            addr.ip().to_string(),
            addr.port().to_string(),
        ]);
        argv
    }

    /// Spawns when `spawn` is set and a terminal prefix is configured.
    pub(crate) fn launch(&self, addr: SocketAddr, spawn: bool) -> LaunchOutcome {
        let argv = self.command_line(addr);
        let printable = argv.join(" ");

        if !spawn || self.terminal.is_none() {
            return LaunchOutcome::Manual(printable);
        }

        let Some((program, args)) = argv.split_first() else {
            return LaunchOutcome::Manual(printable);
        };
        match Command::new(program).args(args).spawn() {
            Ok(child) => {
                info!(command = %printable, "candidate process started");
                LaunchOutcome::Spawned(child)
            }
            Err(err) => {
                warn!(command = %printable, error = %err, "could not start candidate process");
                LaunchOutcome::Manual(printable)
            }
        }
    }
}
