// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 NordVPN Tray Contributors

// NordVPN Tray - Common Library
// Shared types: CLI client, status parsing, poll backoff, configuration

pub mod backoff;
pub mod client;
pub mod config;
pub mod error;
pub mod groups;
pub mod status;

pub use backoff::PollBackoff;
pub use client::VpnClient;
pub use config::TrayConfig;
pub use error::{Error, Result};
pub use groups::{filter_available, find_group, ServerGroup, SERVER_GROUPS};
pub use status::{parse_status, ConnectionStatus, UNKNOWN};

// Re-export commonly used external types
pub use chrono::{DateTime, Utc};
