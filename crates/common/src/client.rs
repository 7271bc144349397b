// NordVPN CLI client
//
// Wraps the four CLI invocations the tray needs. Connect and disconnect
// are fire-and-forget; status and group queries capture stdout and hand
// it to the parsers. Invocation failures are logged and degrade to the
// same values as unparseable output.

use tokio::process::Command;
use tracing::warn;

use crate::error::Result;
use crate::groups::{self, ServerGroup};
use crate::status::{self, ConnectionStatus};

pub struct VpnClient {
    binary: String,
    /// Group name from the last user connect, cleared on disconnect.
    /// Feeds the group field of parsed statuses.
    active_group: String,
}

impl VpnClient {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            active_group: String::new(),
        }
    }

    pub fn active_group(&self) -> &str {
        &self.active_group
    }

    /// Ask the CLI to connect, optionally to a specific server group.
    ///
    /// The group name is passed through without validation; the CLI is
    /// the authority on what it accepts. Returns as soon as the process
    /// is spawned.
    pub fn connect(&mut self, group: Option<&str>) {
        self.active_group = group.unwrap_or("").to_string();

        let mut args = vec!["connect"];
        if let Some(group) = group {
            args.push(group);
        }
        self.spawn_detached(&args);
    }

    /// Ask the CLI to disconnect. Returns as soon as the process is
    /// spawned.
    pub fn disconnect(&mut self) {
        self.active_group.clear();
        self.spawn_detached(&["disconnect"]);
    }

    /// Query which of the known server groups the CLI currently offers.
    /// Empty on command failure or unrecognizable output.
    pub async fn available_groups(&self) -> Vec<ServerGroup> {
        match self.capture("groups").await {
            Ok(raw) => groups::filter_available(&raw),
            Err(e) => {
                warn!("Failed to list VPN groups: {}", e);
                Vec::new()
            }
        }
    }

    /// Query the current connection status. Never fails; a broken or
    /// missing CLI reads as an all-Unknown status.
    pub async fn status(&self) -> ConnectionStatus {
        match self.capture("status").await {
            Ok(raw) => status::parse_status(&raw, &self.active_group),
            Err(e) => {
                warn!("Failed to query VPN status: {}", e);
                ConnectionStatus::unknown()
            }
        }
    }

    /// Run a subcommand and capture stdout. The exit code is ignored on
    /// purpose: a failing CLI is indistinguishable from a disconnected
    /// VPN and both parse to the same result.
    async fn capture(&self, subcommand: &str) -> Result<String> {
        let output = Command::new(&self.binary).arg(subcommand).output().await?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Spawn a subcommand without waiting for its outcome; the result
    /// shows up through the next status poll. The child is reaped by a
    /// background task.
    fn spawn_detached(&self, args: &[&str]) {
        match Command::new(&self.binary).args(args).spawn() {
            Ok(mut child) => {
                tokio::spawn(async move {
                    let _ = child.wait().await;
                });
            }
            Err(e) => {
                warn!("Failed to run {} {}: {}", self.binary, args.join(" "), e);
            }
        }
    }
}
