// Shared state for the tray application

use chrono::{DateTime, Utc};
use nordvpn_tray_common::{ConnectionStatus, ServerGroup};

/// Commands sent from menu callbacks to the controller loop.
/// Menu callbacks never do work themselves; they only enqueue these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrayCommand {
    /// Connect, optionally to a named server group
    Connect(Option<String>),
    Disconnect,
    Quit,
}

/// Shared application state, written by the controller and read by the
/// tray service thread
pub struct TrayState {
    /// Latest parsed status; `None` until the first poll has run, which
    /// is the state the menu renders no actions for
    pub status: Option<ConnectionStatus>,

    /// Server groups offered as connect actions, fetched once at startup
    pub groups: Vec<ServerGroup>,

    /// When the status was last polled
    pub last_checked: Option<DateTime<Utc>>,
}

impl TrayState {
    pub fn new() -> Self {
        Self {
            status: None,
            groups: Vec::new(),
            last_checked: None,
        }
    }
}

impl Default for TrayState {
    fn default() -> Self {
        Self::new()
    }
}
