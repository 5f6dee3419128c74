//! Domain models for the IP list.
//!
//! - [`Network`] - relaxed-parsed IPv4/IPv6 network and its usable hosts
//! - [`SubnetEntry`] - raw subnet string from the portal table
//! - [`HostSets`] - deduplicated, ordered host addresses per family

mod host_set;
mod network;
mod subnet;

// Re-export public types
pub use host_set::{HostSets, ListDelta};
pub use network::{
    v4_host_bounds, v6_host_bounds, Family, Hosts, Network, NetworkParseError, MAX_LENGTH_V4,
    MAX_LENGTH_V6,
};
pub use subnet::SubnetEntry;
