//! Export data processing.
//!
//! - [`table`] - Extracting subnet entries from the export table
//! - [`expand`] - Expanding subnets into per-family host sets

mod expand;
mod table;

// Re-export public functions
pub use expand::{expand_subnets, ExpandReport};
pub use table::parse_subnet_table;
