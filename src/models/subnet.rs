//! Raw subnet entry read from the portal table.

/// One non-empty `IPNetwork` cell, not yet validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubnetEntry {
    /// Index of the data row in the source table (header excluded).
    pub row: usize,
    /// Trimmed cell text.
    pub value: String,
}

impl SubnetEntry {
    pub fn new(row: usize, value: impl Into<String>) -> SubnetEntry {
        SubnetEntry {
            row,
            value: value.into(),
        }
    }
}
