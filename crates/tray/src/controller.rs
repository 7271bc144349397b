// Controller - poll loop and user command handling
//
// One task owns the client, the backoff and the pending timer. The timer
// is a sleep raced against the command channel, so at most one timer is
// ever outstanding and handling a command always cancels it before a new
// one is armed.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::RwLock;
use tokio::time::sleep;
use tracing::{debug, info};

use nordvpn_tray_common::{PollBackoff, TrayConfig, VpnClient};

use crate::state::{TrayCommand, TrayState};
use crate::tray::TrayIcon;

pub struct Controller {
    client: VpnClient,
    backoff: PollBackoff,
    state: Arc<RwLock<TrayState>>,
    handle: ksni::Handle<TrayIcon>,
    commands: UnboundedReceiver<TrayCommand>,
}

impl Controller {
    pub fn new(
        config: &TrayConfig,
        state: Arc<RwLock<TrayState>>,
        handle: ksni::Handle<TrayIcon>,
        commands: UnboundedReceiver<TrayCommand>,
    ) -> Self {
        Self {
            client: VpnClient::new(config.binary.clone()),
            backoff: PollBackoff::new(config.poll_initial(), config.poll_max()),
            state,
            handle,
            commands,
        }
    }

    /// Run until the user quits.
    ///
    /// Startup fetches the group list once, then an immediate refresh,
    /// then the timer loop. User connect/disconnect resets the backoff
    /// but does not refresh; the new state shows up on the next tick.
    pub async fn run(mut self) {
        let groups = self.client.available_groups().await;
        info!("Server groups offered by the CLI: {}", groups.len());
        {
            let mut state = self.state.write().await;
            state.groups = groups;
        }

        self.backoff.reset();
        self.refresh().await;

        loop {
            let delay = self.backoff.next_delay();
            debug!("Next poll in {:?}", delay);

            tokio::select! {
                _ = sleep(delay) => self.refresh().await,
                command = self.commands.recv() => match command {
                    Some(TrayCommand::Connect(group)) => {
                        info!("Connect requested (group: {})", group.as_deref().unwrap_or("none"));
                        self.client.connect(group.as_deref());
                        self.backoff.reset();
                    }
                    Some(TrayCommand::Disconnect) => {
                        info!("Disconnect requested");
                        self.client.disconnect();
                        self.backoff.reset();
                    }
                    Some(TrayCommand::Quit) | None => {
                        info!("Shutting down");
                        // Breaking drops the pending sleep; nothing fires
                        // after teardown
                        break;
                    }
                },
            }
        }
    }

    async fn refresh(&mut self) {
        let status = self.client.status().await;
        debug!("Polled status: {}", status.status);

        {
            let mut state = self.state.write().await;
            state.status = Some(status);
            state.last_checked = Some(Utc::now());
        }

        // Nudge the tray service so it re-renders from state
        self.handle.update(|_tray: &mut TrayIcon| {});
    }
}
