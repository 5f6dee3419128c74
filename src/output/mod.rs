//! Host list output.
//!
//! - [`writer`] - Writing the sorted host list file
//! - [`reader`] - Reading back a previously written list
//! - [`terminal`] - Console summary with colors

mod reader;
mod terminal;
mod writer;

pub use reader::{parse_host_list, read_host_file};
pub use terminal::{format_count, print_failure, print_summary};
pub use writer::{write_host_file, write_host_list};
