//! Reading back a host list file.

use crate::error::ListError;
use crate::models::HostSets;
use std::io;
use std::net::IpAddr;
use std::path::Path;

/// Parse host list text: one address per line, blank lines ignored.
pub fn parse_host_list(text: &str) -> Result<HostSets, String> {
    let mut hosts = HostSets::new();
    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let addr: IpAddr = line
            .parse()
            .map_err(|_| format!("line {}: invalid address {line:?}", i + 1))?;
        hosts.insert(addr);
    }
    Ok(hosts)
}

/// Read a previously written list. `Ok(None)` when the file does not exist.
pub fn read_host_file(path: &Path) -> Result<Option<HostSets>, ListError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ListError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    let hosts = parse_host_list(&text).map_err(|message| ListError::Io {
        path: path.to_path_buf(),
        source: io::Error::new(io::ErrorKind::InvalidData, message),
    })?;
    Ok(Some(hosts))
}
