//! Export table parsing.
//!
//! Pulls the `IPNetwork` column out of the single table in the export response.

use crate::config::SUBNET_COLUMN;
use crate::error::ListError;
use crate::models::SubnetEntry;
use scraper::{ElementRef, Html, Selector};
use std::sync::OnceLock;

static TABLE_SELECTOR: OnceLock<Selector> = OnceLock::new();
static HEAD_ROW_SELECTOR: OnceLock<Selector> = OnceLock::new();
static ROW_SELECTOR: OnceLock<Selector> = OnceLock::new();
static CELL_SELECTOR: OnceLock<Selector> = OnceLock::new();
static DATA_CELL_SELECTOR: OnceLock<Selector> = OnceLock::new();

fn selector(cell: &'static OnceLock<Selector>, css: &str) -> &'static Selector {
    cell.get_or_init(|| Selector::parse(css).expect("Invalid selector"))
}

fn cell_text(cell: ElementRef) -> String {
    cell.text().collect::<String>().trim().to_string()
}

/// Parse the export body into subnet entries.
///
/// The body must hold exactly one `<table>` whose header row has an `IPNetwork`
/// cell. Data rows missing that cell, or with only whitespace in it, are dropped.
///
/// # Arguments
/// * `html` - Export response body
///
/// # Returns
/// * `Ok(Vec<SubnetEntry>)` - Trimmed, non-empty cells in table order
/// * `Err(ListError::TableShape)` - Zero or several tables, or no `IPNetwork` column
pub fn parse_subnet_table(html: &str) -> Result<Vec<SubnetEntry>, ListError> {
    let document = Html::parse_document(html);

    let tables: Vec<ElementRef> = document
        .select(selector(&TABLE_SELECTOR, "table"))
        .collect();
    if tables.len() != 1 {
        return Err(ListError::TableShape(format!(
            "found {} tables, expected 1",
            tables.len()
        )));
    }
    let table = tables[0];

    let rows = selector(&ROW_SELECTOR, "tr");
    let cells = selector(&CELL_SELECTOR, "th, td");
    let data_cells = selector(&DATA_CELL_SELECTOR, "td");

    let header_row = table
        .select(selector(&HEAD_ROW_SELECTOR, "thead tr"))
        .next()
        .or_else(|| table.select(rows).next())
        .ok_or_else(|| ListError::TableShape("table has no rows".to_string()))?;

    let headers: Vec<String> = header_row.select(cells).map(cell_text).collect();
    let column = headers
        .iter()
        .position(|h| h == SUBNET_COLUMN)
        .ok_or_else(|| {
            ListError::TableShape(format!("no {SUBNET_COLUMN} column in header {headers:?}"))
        })?;
    log::trace!("header {headers:?}, {SUBNET_COLUMN} at column {column}");

    let mut entries = Vec::new();
    let mut dropped = 0;
    let data_rows = table
        .select(rows)
        .filter(|row| row.id() != header_row.id())
        .filter(|row| row.select(data_cells).next().is_some());
    for (index, row) in data_rows.enumerate() {
        match row.select(cells).nth(column).map(cell_text) {
            Some(value) if !value.is_empty() => entries.push(SubnetEntry::new(index, value)),
            _ => {
                log::trace!("row {index} has no {SUBNET_COLUMN} value");
                dropped += 1;
            }
        }
    }

    log::debug!(
        "parsed {} subnet entries, dropped {dropped} empty cells",
        entries.len()
    );
    Ok(entries)
}
