// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 NordVPN Tray Contributors

// NordVPN Tray - System tray status indicator
// Polls the NordVPN CLI and mirrors its status into an SNI tray menu

mod controller;
mod notifications;
mod state;
mod tray;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tokio::sync::RwLock;
use tracing::info;

use nordvpn_tray_common::TrayConfig;

use controller::Controller;
use state::TrayState;
use tray::TrayIcon;

#[derive(Parser)]
#[command(name = "nordvpn-tray")]
#[command(about = "System tray status indicator for the NordVPN CLI", long_about = None)]
#[command(version)]
struct Cli {
    /// Override the NordVPN CLI binary to invoke
    #[arg(short, long)]
    binary: Option<String>,

    /// Load configuration from an explicit path
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => TrayConfig::load_from(path)?,
        None => TrayConfig::load()?,
    };
    if let Some(binary) = cli.binary {
        config.binary = binary;
    }
    config.validate()?;

    info!("Starting NordVPN tray (binary: {})", config.binary);

    // Shared state between the tray service thread and the controller
    let state = Arc::new(RwLock::new(TrayState::new()));
    let (command_tx, command_rx) = tokio::sync::mpsc::unbounded_channel();

    let tray = TrayIcon::new(state.clone(), command_tx, config.notifications);
    let service = ksni::TrayService::new(tray);
    let handle = service.handle();

    // Spawn service in background thread (ksni needs its own thread)
    std::thread::spawn(move || {
        let _ = service.run();
    });

    // The controller owns the poll loop; it returns when the user quits
    Controller::new(&config, state, handle, command_rx).run().await;

    info!("NordVPN tray shutting down");
    Ok(())
}
