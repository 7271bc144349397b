// Desktop notifications for connection status

use chrono::{DateTime, Utc};
use notify_rust::{Notification, Timeout};

use nordvpn_tray_common::ConnectionStatus;

/// Show the current status as a notification (tray single-click)
pub fn show_status_notification(
    status: Option<&ConnectionStatus>,
    last_checked: Option<DateTime<Utc>>,
) {
    let mut body = match status {
        Some(status) if !status.full_status.is_empty() => status.full_status.clone(),
        _ => "Status unknown".to_string(),
    };
    if let Some(checked) = last_checked {
        body.push_str(&format!("\n\nLast checked {}", checked.format("%H:%M:%S")));
    }

    if let Err(e) = Notification::new()
        .summary("NordVPN")
        .body(&body)
        .icon("network-vpn-symbolic")
        .timeout(Timeout::Milliseconds(3000))
        .show()
    {
        eprintln!("Failed to show notification: {}", e);
    }
}
