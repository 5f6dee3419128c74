//! Host address sets, one per address family.

use super::network::Hosts;
use std::collections::BTreeSet;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Deduplicated host addresses, kept in ascending numeric order per family.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HostSets {
    pub v4: BTreeSet<Ipv4Addr>,
    pub v6: BTreeSet<Ipv6Addr>,
}

/// Difference between two host lists.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ListDelta {
    pub added: usize,
    pub removed: usize,
}

impl HostSets {
    pub fn new() -> HostSets {
        HostSets::default()
    }

    /// Insert one address into the set of its family. Returns false if already present.
    pub fn insert(&mut self, addr: IpAddr) -> bool {
        match addr {
            IpAddr::V4(addr) => self.v4.insert(addr),
            IpAddr::V6(addr) => self.v6.insert(addr),
        }
    }

    /// Insert every host of a network.
    pub fn extend_hosts(&mut self, hosts: Hosts) {
        match hosts {
            Hosts::V4(range) => self.v4.extend(range),
            Hosts::V6(range) => self.v6.extend(range),
        }
    }

    pub fn len(&self) -> usize {
        self.v4.len() + self.v6.len()
    }

    pub fn is_empty(&self) -> bool {
        self.v4.is_empty() && self.v6.is_empty()
    }

    /// All addresses, the whole IPv4 block before the IPv6 block.
    pub fn iter(&self) -> impl Iterator<Item = IpAddr> + '_ {
        self.v4
            .iter()
            .copied()
            .map(IpAddr::V4)
            .chain(self.v6.iter().copied().map(IpAddr::V6))
    }

    /// What changed going from `previous` to `self`.
    pub fn delta_from(&self, previous: &HostSets) -> ListDelta {
        ListDelta {
            added: self.v4.difference(&previous.v4).count()
                + self.v6.difference(&previous.v6).count(),
            removed: previous.v4.difference(&self.v4).count()
                + previous.v6.difference(&self.v6).count(),
        }
    }
}
