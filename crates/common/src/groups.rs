// Server group catalog and availability filtering

use std::collections::HashSet;

/// A named category of VPN server the CLI can target on connect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerGroup {
    /// Token the CLI understands (`nordvpn connect <name>`)
    pub name: &'static str,
    /// Human-readable label for menu entries
    pub label: &'static str,
}

/// Fixed list of groups the tray offers, in menu order
pub const SERVER_GROUPS: &[ServerGroup] = &[
    ServerGroup {
        name: "P2P",
        label: "P2P",
    },
    ServerGroup {
        name: "Double_VPN",
        label: "Double VPN",
    },
    ServerGroup {
        name: "Dedicated_IP",
        label: "Dedicated IP",
    },
    ServerGroup {
        name: "Onion_Over_VPN",
        label: "Onion",
    },
];

/// Look up a group by its CLI token
pub fn find_group(name: &str) -> Option<ServerGroup> {
    SERVER_GROUPS.iter().copied().find(|g| g.name == name)
}

/// Intersect the raw `groups` command output against the static catalog.
///
/// The CLI prints a loosely delimited token list; tokens are split on
/// commas, hyphens, carriage returns and whitespace. Catalog order is
/// preserved in the result. Unrecognized tokens are dropped, so garbage
/// output simply yields an empty list.
pub fn filter_available(raw: &str) -> Vec<ServerGroup> {
    let tokens: HashSet<&str> = raw
        .split(|c: char| c == ',' || c == '-' || c == '\r' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .collect();

    SERVER_GROUPS
        .iter()
        .copied()
        .filter(|g| tokens.contains(g.name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_available_mixed_delimiters() {
        let groups = filter_available("P2P,Double_VPN-Onion_Over_VPN");
        let names: Vec<&str> = groups.iter().map(|g| g.name).collect();
        // Catalog order, not token order
        assert_eq!(names, vec!["P2P", "Double_VPN", "Onion_Over_VPN"]);
    }

    #[test]
    fn test_filter_available_preserves_catalog_order() {
        let groups = filter_available("Onion_Over_VPN P2P");
        let names: Vec<&str> = groups.iter().map(|g| g.name).collect();
        assert_eq!(names, vec!["P2P", "Onion_Over_VPN"]);
    }

    #[test]
    fn test_filter_available_unrecognized_tokens() {
        assert!(filter_available("Europe, The_Americas").is_empty());
        assert!(filter_available("").is_empty());
        assert!(filter_available(",,--  \r\n").is_empty());
    }

    #[test]
    fn test_filter_available_full_catalog() {
        let raw = "Dedicated_IP, Double_VPN, Onion_Over_VPN, P2P";
        assert_eq!(filter_available(raw), SERVER_GROUPS.to_vec());
    }

    #[test]
    fn test_find_group() {
        assert_eq!(find_group("P2P").map(|g| g.label), Some("P2P"));
        assert_eq!(find_group("Double_VPN").map(|g| g.label), Some("Double VPN"));
        assert!(find_group("Standard").is_none());
        assert!(find_group("").is_none());
    }
}
