// System tray icon implementation
//
// The menu is declarative: ksni rebuilds it from TrayState on every
// update, so rendering the same state twice cannot duplicate entries.
// The connected and disconnected branches each construct only their own
// action items.

use ksni;
use ksni::menu::StandardItem;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::RwLock;
use tracing::warn;

use nordvpn_tray_common::ConnectionStatus;

use crate::notifications;
use crate::state::{TrayCommand, TrayState};

/// Tray icon service
#[derive(Clone)]
pub struct TrayIcon {
    state: Arc<RwLock<TrayState>>,
    commands: UnboundedSender<TrayCommand>,
    notifications_enabled: bool,
}

impl TrayIcon {
    pub fn new(
        state: Arc<RwLock<TrayState>>,
        commands: UnboundedSender<TrayCommand>,
        notifications_enabled: bool,
    ) -> Self {
        Self {
            state,
            commands,
            notifications_enabled,
        }
    }

    fn send(&self, command: TrayCommand) {
        if self.commands.send(command).is_err() {
            warn!("Controller has shut down; dropping menu command");
        }
    }

    /// Icon reflecting the connection indicator. SNI icons cannot be
    /// hidden, so "indicator visible when connected" becomes an icon swap.
    fn icon_for(status: Option<&ConnectionStatus>) -> &'static str {
        match status {
            Some(status) if status.connected => "network-vpn-symbolic",
            _ => "network-offline",
        }
    }

    fn header_label(status: Option<&ConnectionStatus>) -> String {
        match status {
            Some(status) => format!("NordVPN {}", status.status),
            None => "NordVPN".to_string(),
        }
    }
}

impl ksni::Tray for TrayIcon {
    fn icon_name(&self) -> String {
        let state = self.state.blocking_read();
        Self::icon_for(state.status.as_ref()).to_string()
    }

    fn title(&self) -> String {
        let state = self.state.blocking_read();
        Self::header_label(state.status.as_ref())
    }

    fn id(&self) -> String {
        "nordvpn-tray".to_string()
    }

    fn category(&self) -> ksni::Category {
        ksni::Category::ApplicationStatus
    }

    fn menu(&self) -> Vec<ksni::MenuItem<Self>> {
        let state = self.state.blocking_read();
        let status = state.status.clone();
        let groups = state.groups.clone();
        drop(state); // Release the lock

        let mut menu = vec![];

        // Header mirroring the panel title
        menu.push(ksni::MenuItem::Standard(StandardItem {
            label: Self::header_label(status.as_ref()),
            enabled: false,
            ..Default::default()
        }));
        menu.push(ksni::MenuItem::Separator);

        match &status {
            Some(current) if current.connected => {
                menu.push(ksni::MenuItem::Standard(StandardItem {
                    label: "Disconnect".to_string(),
                    activate: Box::new(|this: &mut Self| {
                        this.send(TrayCommand::Disconnect);
                    }),
                    ..Default::default()
                }));
            }
            Some(_) => {
                menu.push(ksni::MenuItem::Standard(StandardItem {
                    label: "Connect".to_string(),
                    activate: Box::new(|this: &mut Self| {
                        this.send(TrayCommand::Connect(None));
                    }),
                    ..Default::default()
                }));

                for group in &groups {
                    let name = group.name;
                    menu.push(ksni::MenuItem::Standard(StandardItem {
                        label: format!("Connect to {}", group.label),
                        activate: Box::new(move |this: &mut Self| {
                            this.send(TrayCommand::Connect(Some(name.to_string())));
                        }),
                        ..Default::default()
                    }));
                }
            }
            // First poll hasn't run; no actions yet
            None => {}
        }

        // Read-only detail fields: active group and the raw status block
        if let Some(current) = &status {
            menu.push(ksni::MenuItem::Separator);
            menu.push(ksni::MenuItem::Standard(StandardItem {
                label: current.group.clone(),
                enabled: false,
                ..Default::default()
            }));
            menu.push(ksni::MenuItem::Standard(StandardItem {
                label: current.full_status.clone(),
                enabled: false,
                ..Default::default()
            }));
        }

        menu.push(ksni::MenuItem::Separator);
        menu.push(ksni::MenuItem::Standard(StandardItem {
            label: "Quit".to_string(),
            activate: Box::new(|this: &mut Self| {
                this.send(TrayCommand::Quit);
            }),
            ..Default::default()
        }));

        menu
    }

    fn activate(&mut self, _x: i32, _y: i32) {
        // Single click - show status notification
        if !self.notifications_enabled {
            return;
        }

        let state = self.state.blocking_read();
        let status = state.status.clone();
        let last_checked = state.last_checked;
        drop(state);

        notifications::show_status_notification(status.as_ref(), last_checked);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ksni::Tray;
    use nordvpn_tray_common::{parse_status, SERVER_GROUPS};

    fn tray_with(status: Option<ConnectionStatus>) -> TrayIcon {
        let mut state = TrayState::new();
        state.status = status;
        state.groups = SERVER_GROUPS.to_vec();
        let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
        TrayIcon::new(Arc::new(RwLock::new(state)), tx, true)
    }

    fn labels(menu: &[ksni::MenuItem<TrayIcon>]) -> Vec<String> {
        menu.iter()
            .filter_map(|item| match item {
                ksni::MenuItem::Standard(standard) => Some(standard.label.clone()),
                _ => None,
            })
            .collect()
    }

    fn count_connect_actions(labels: &[String]) -> (usize, usize) {
        let generic = labels.iter().filter(|l| *l == "Connect").count();
        let grouped = labels.iter().filter(|l| l.starts_with("Connect to ")).count();
        (generic, grouped)
    }

    #[test]
    fn test_disconnected_menu_has_one_connect_per_group() {
        let status = parse_status("Status: Disconnected", "");
        let tray = tray_with(Some(status));

        let labels = labels(&tray.menu());
        let (generic, grouped) = count_connect_actions(&labels);
        assert_eq!(generic, 1);
        assert_eq!(grouped, SERVER_GROUPS.len());
        assert!(!labels.contains(&"Disconnect".to_string()));
    }

    #[test]
    fn test_render_is_idempotent() {
        let status = parse_status("Status: Disconnected", "");
        let tray = tray_with(Some(status));

        let first = labels(&tray.menu());
        let second = labels(&tray.menu());
        assert_eq!(first, second);

        let (generic, grouped) = count_connect_actions(&second);
        assert_eq!(generic, 1);
        assert_eq!(grouped, SERVER_GROUPS.len());
    }

    #[test]
    fn test_connected_menu_has_single_disconnect() {
        let status = parse_status("Status: Connected\nCountry: Germany\nCity: Berlin", "");
        let tray = tray_with(Some(status));

        let labels = labels(&tray.menu());
        assert_eq!(labels.iter().filter(|l| *l == "Disconnect").count(), 1);
        let (generic, grouped) = count_connect_actions(&labels);
        assert_eq!(generic, 0);
        assert_eq!(grouped, 0);
    }

    #[test]
    fn test_initial_state_renders_no_actions() {
        let tray = tray_with(None);

        let labels = labels(&tray.menu());
        let (generic, grouped) = count_connect_actions(&labels);
        assert_eq!(generic, 0);
        assert_eq!(grouped, 0);
        assert!(!labels.contains(&"Disconnect".to_string()));
        // Quit is always present
        assert!(labels.contains(&"Quit".to_string()));
    }

    #[test]
    fn test_title_tracks_status_word() {
        let tray = tray_with(None);
        assert_eq!(tray.title(), "NordVPN");

        let status = parse_status("Status: Connected\nCountry: Germany\nCity: Berlin", "");
        let tray = tray_with(Some(status));
        assert_eq!(tray.title(), "NordVPN Connected");
        assert_eq!(tray.icon_name(), "network-vpn-symbolic");
    }

    #[test]
    fn test_detail_fields_follow_status() {
        let status = parse_status("Status: Connected\nCountry: Germany\nCity: Berlin", "P2P");
        let full = status.full_status.clone();
        let tray = tray_with(Some(status));

        let labels = labels(&tray.menu());
        assert!(labels.contains(&"P2P".to_string()));
        assert!(labels.contains(&full));
    }
}
