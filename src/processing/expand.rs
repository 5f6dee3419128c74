//! Subnet expansion into host addresses.

use crate::models::{HostSets, Network, SubnetEntry};
use std::collections::HashSet;

/// Counters from one expansion pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExpandReport {
    /// Entries looked at.
    pub entries: usize,
    /// Entries whose hosts were added.
    pub expanded: usize,
    /// Entries naming a network already expanded in this pass.
    pub duplicates: usize,
    /// Entries that did not parse as a network.
    pub invalid: usize,
    /// Networks with more usable hosts than the cap.
    pub oversized: usize,
}

/// Expand every entry into the host sets of its family.
///
/// # Arguments
/// * `entries` - Raw subnet strings from the table
/// * `max_hosts_per_network` - Networks with more usable hosts are skipped
///
/// # Returns
/// A tuple of (host sets, counters). Invalid and oversized entries only show up
/// in the counters.
pub fn expand_subnets(
    entries: &[SubnetEntry],
    max_hosts_per_network: u128,
) -> (HostSets, ExpandReport) {
    let mut hosts = HostSets::new();
    let mut report = ExpandReport {
        entries: entries.len(),
        ..Default::default()
    };
    let mut seen: HashSet<Network> = HashSet::new();

    for entry in entries {
        let network: Network = match entry.value.parse() {
            Ok(network) => network,
            Err(e) => {
                log::debug!("row {} skipped {:?}: {e}", entry.row, entry.value);
                report.invalid += 1;
                continue;
            }
        };

        if !seen.insert(network) {
            log::trace!("row {} repeats {network}", entry.row);
            report.duplicates += 1;
            continue;
        }

        let count = network.host_count();
        if count > max_hosts_per_network {
            log::warn!(
                "row {} skipped {network} ({} {count} hosts > limit {max_hosts_per_network})",
                entry.row,
                network.family(),
            );
            report.oversized += 1;
            continue;
        }

        log::trace!("row {} {network} +{count} hosts", entry.row);
        hosts.extend_hosts(network.hosts());
        report.expanded += 1;
    }

    (hosts, report)
}
