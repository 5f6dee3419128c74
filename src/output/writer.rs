//! Host list file writer.

use crate::error::ListError;
use crate::models::HostSets;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Write one address per line, IPv4 block then IPv6 block.
pub fn write_host_list<W: Write>(mut writer: W, hosts: &HostSets) -> io::Result<()> {
    for addr in hosts.iter() {
        writeln!(writer, "{addr}")?;
    }
    writer.flush()
}

/// Truncate `path` and write the host list into it.
pub fn write_host_file(path: &Path, hosts: &HostSets) -> Result<(), ListError> {
    let io_err = |source| ListError::Io {
        path: path.to_path_buf(),
        source,
    };
    log::info!("Writing sorted IPs to {}...", path.display());
    let file = File::create(path).map_err(io_err)?;
    write_host_list(BufWriter::new(file), hosts).map_err(io_err)?;
    Ok(())
}
