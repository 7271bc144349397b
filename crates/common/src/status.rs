// Status output parsing for the NordVPN CLI
//
// The CLI has no machine-readable output mode; fields are recovered by
// substring search over the text block it prints. Parsing is best-effort
// and total: malformed or empty input degrades to "Unknown" fields,
// never to an error.

use crate::groups;

/// Placeholder for fields the status output did not contain
pub const UNKNOWN: &str = "Unknown";

/// Status word the CLI prints while a connection is up
const STATE_CONNECTED: &str = "CONNECTED";

/// Parsed snapshot of the VPN connection, rebuilt on every poll
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionStatus {
    /// Whether the status word matched "Connected"
    pub connected: bool,
    /// Display name of the active server group ("Standard" when none)
    pub group: String,
    /// Raw state word from the `Status:` line
    pub status: String,
    /// Server number, first digit run of the `server:` line
    pub server_number: Option<u32>,
    pub country: String,
    pub city: String,
    /// The full status block, verbatim, for display
    pub full_status: String,
}

impl ConnectionStatus {
    /// Status used when the CLI could not be invoked at all
    pub fn unknown() -> Self {
        Self {
            connected: false,
            group: "Standard".to_string(),
            status: UNKNOWN.to_string(),
            server_number: None,
            country: UNKNOWN.to_string(),
            city: UNKNOWN.to_string(),
            full_status: String::new(),
        }
    }

    /// Server number for display, "Unknown" when it did not parse
    pub fn server_number_text(&self) -> String {
        self.server_number
            .map(|n| n.to_string())
            .unwrap_or_else(|| UNKNOWN.to_string())
    }
}

/// Parse the raw `status` command output.
///
/// `active_group` is the group name the user last connected with; it only
/// shows up in the result if it names a known group and the connection is
/// actually up.
pub fn parse_status(raw: &str, active_group: &str) -> ConnectionStatus {
    let full_status = raw.trim().to_string();
    let lines: Vec<&str> = full_status.lines().collect();

    let status = field_after(&lines, "Status:").unwrap_or(UNKNOWN).to_string();
    let connected = status.eq_ignore_ascii_case(STATE_CONNECTED);

    if connected {
        let server_number = lines
            .iter()
            .find(|line| line.contains("server:"))
            .and_then(|line| first_digit_run(line));
        let country = field_after(&lines, "Country:").unwrap_or(UNKNOWN).to_string();
        let city = field_after(&lines, "City:").unwrap_or(UNKNOWN).to_string();
        let group = groups::find_group(active_group)
            .map(|g| g.name.to_string())
            .unwrap_or_else(|| "Standard".to_string());

        ConnectionStatus {
            connected,
            group,
            status,
            server_number,
            country,
            city,
            full_status,
        }
    } else {
        ConnectionStatus {
            connected,
            group: "Standard".to_string(),
            status,
            server_number: None,
            country: UNKNOWN.to_string(),
            city: UNKNOWN.to_string(),
            full_status,
        }
    }
}

/// Find the first line containing `marker` and return the trimmed text
/// after it
fn field_after<'a>(lines: &[&'a str], marker: &str) -> Option<&'a str> {
    lines.iter().find_map(|line| {
        line.find(marker)
            .map(|idx| line[idx + marker.len()..].trim())
    })
}

/// First contiguous run of ASCII digits, parsed as a number
fn first_digit_run(line: &str) -> Option<u32> {
    let start = line.find(|c: char| c.is_ascii_digit())?;
    let digits: String = line[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}
