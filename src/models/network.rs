//! IPv4/IPv6 networks and their usable host ranges.
//!
//! Provides [`Network`], parsed with a relaxed reading of CIDR notation, and
//! [`Hosts`], an iterator over the usable host addresses of a network.

use ipnet::{IpNet, Ipv4AddrRange, Ipv4Net, Ipv6AddrRange, Ipv6Net};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;
use thiserror::Error;

/// Maximum prefix length for an IPv4 network.
pub const MAX_LENGTH_V4: u8 = 32;
/// Maximum prefix length for an IPv6 network.
pub const MAX_LENGTH_V6: u8 = 128;

/// Address family of a network or host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    V4,
    V6,
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Family::V4 => write!(f, "IPv4"),
            Family::V6 => write!(f, "IPv6"),
        }
    }
}

/// Why a subnet string could not be read as a network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkParseError {
    #[error("empty subnet")]
    Empty,
    #[error("invalid address {0:?}")]
    InvalidAddress(String),
    #[error("invalid prefix {0:?}")]
    InvalidPrefix(String),
}

/// A network with its host bits cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Network(IpNet);

impl Network {
    /// Parse a subnet string, zeroing any host bits beyond the mask.
    ///
    /// Accepts `addr/prefix`, `addr/netmask` (IPv4 only) and a bare address, which is
    /// read as a single-host network.
    ///
    /// # Examples
    /// ```
    /// use ito_iplist::models::Network;
    /// let net = Network::parse_relaxed("192.168.1.5/30").unwrap();
    /// assert_eq!(net.to_string(), "192.168.1.4/30");
    /// ```
    pub fn parse_relaxed(input: &str) -> Result<Network, NetworkParseError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(NetworkParseError::Empty);
        }

        let (addr_part, prefix_part) = match input.split_once('/') {
            Some((addr, prefix)) => (addr, Some(prefix)),
            None => (input, None),
        };
        let addr: IpAddr = addr_part
            .parse()
            .map_err(|_| NetworkParseError::InvalidAddress(addr_part.to_string()))?;

        let net = match addr {
            IpAddr::V4(addr) => {
                let len = match prefix_part {
                    Some(prefix) => v4_prefix(prefix)?,
                    None => MAX_LENGTH_V4,
                };
                Ipv4Net::new(addr, len)
                    .map(IpNet::V4)
                    .map_err(|_| NetworkParseError::InvalidPrefix(len.to_string()))?
            }
            IpAddr::V6(addr) => {
                let len = match prefix_part {
                    Some(prefix) => prefix_len(prefix, MAX_LENGTH_V6)?,
                    None => MAX_LENGTH_V6,
                };
                Ipv6Net::new(addr, len)
                    .map(IpNet::V6)
                    .map_err(|_| NetworkParseError::InvalidPrefix(len.to_string()))?
            }
        };

        Ok(Network(net.trunc()))
    }

    pub fn family(&self) -> Family {
        match self.0 {
            IpNet::V4(_) => Family::V4,
            IpNet::V6(_) => Family::V6,
        }
    }

    /// Number of usable host addresses, see [`Network::hosts`].
    pub fn host_count(&self) -> u128 {
        match self.0 {
            IpNet::V4(net) => {
                let (lo, hi) = v4_host_bounds(net);
                u128::from(u32::from(hi) - u32::from(lo)) + 1
            }
            IpNet::V6(net) => {
                let (lo, hi) = v6_host_bounds(net);
                // /0 has 2^128 - 1 hosts, which still fits
                (u128::from(hi) - u128::from(lo)).saturating_add(1)
            }
        }
    }

    /// Iterate the usable host addresses in ascending order.
    ///
    /// IPv4 drops the network and broadcast addresses, except for /31 and /32.
    /// IPv6 drops only the network (Subnet-Router anycast) address, except for /127
    /// and /128.
    pub fn hosts(&self) -> Hosts {
        match self.0 {
            IpNet::V4(net) => {
                let (lo, hi) = v4_host_bounds(net);
                Hosts::V4(Ipv4AddrRange::new(lo, hi))
            }
            IpNet::V6(net) => {
                let (lo, hi) = v6_host_bounds(net);
                Hosts::V6(Ipv6AddrRange::new(lo, hi))
            }
        }
    }
}

impl FromStr for Network {
    type Err = NetworkParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Network::parse_relaxed(s)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Usable hosts of one network, tagged by family.
#[derive(Debug, Clone)]
pub enum Hosts {
    V4(Ipv4AddrRange),
    V6(Ipv6AddrRange),
}

impl Iterator for Hosts {
    type Item = IpAddr;

    fn next(&mut self) -> Option<IpAddr> {
        match self {
            Hosts::V4(range) => range.next().map(IpAddr::V4),
            Hosts::V6(range) => range.next().map(IpAddr::V6),
        }
    }
}

/// First and last usable host of an IPv4 network.
pub fn v4_host_bounds(net: Ipv4Net) -> (Ipv4Addr, Ipv4Addr) {
    let network = u32::from(net.network());
    let broadcast = u32::from(net.broadcast());
    if net.prefix_len() >= MAX_LENGTH_V4 - 1 {
        (Ipv4Addr::from(network), Ipv4Addr::from(broadcast))
    } else {
        (Ipv4Addr::from(network + 1), Ipv4Addr::from(broadcast - 1))
    }
}

/// First and last usable host of an IPv6 network.
pub fn v6_host_bounds(net: Ipv6Net) -> (Ipv6Addr, Ipv6Addr) {
    let network = u128::from(net.network());
    let last = u128::from(net.broadcast());
    if net.prefix_len() >= MAX_LENGTH_V6 - 1 {
        (Ipv6Addr::from(network), Ipv6Addr::from(last))
    } else {
        (Ipv6Addr::from(network + 1), Ipv6Addr::from(last))
    }
}

/// IPv4 prefix given as a length (`24`), a dotted netmask (`255.255.255.0`) or a
/// dotted hostmask (`0.0.0.255`).
fn v4_prefix(prefix: &str) -> Result<u8, NetworkParseError> {
    if prefix.contains('.') {
        let mask: Ipv4Addr = prefix
            .parse()
            .map_err(|_| NetworkParseError::InvalidPrefix(prefix.to_string()))?;
        let bits = u32::from(mask);
        netmask_len(bits)
            .or_else(|| netmask_len(!bits))
            .ok_or_else(|| NetworkParseError::InvalidPrefix(prefix.to_string()))
    } else {
        prefix_len(prefix, MAX_LENGTH_V4)
    }
}

/// Prefix length of a netmask, `None` unless the ones are contiguous from the top.
fn netmask_len(bits: u32) -> Option<u8> {
    let len = bits.leading_ones();
    match bits.checked_shl(len).unwrap_or(0) {
        0 => Some(len as u8),
        _ => None,
    }
}

/// Decimal prefix length, digits only, no larger than `max`.
fn prefix_len(prefix: &str, max: u8) -> Result<u8, NetworkParseError> {
    let invalid = || NetworkParseError::InvalidPrefix(prefix.to_string());
    if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let len: u8 = prefix.parse().map_err(|_| invalid())?;
    if len > max {
        return Err(invalid());
    }
    Ok(len)
}
