//! CSV pin table parsing and the two-sided catalog.

use std::path::{Path, PathBuf};

use crate::error::CatalogError;

/// Which side of the patch a name belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// The peripheral board (source of the generated assignment).
    Peripheral,
    /// The FPGA board (target of the generated assignment).
    Board,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Peripheral => write!(f, "peripheral"),
            Side::Board => write!(f, "board"),
        }
    }
}

/// One row of a pin table: a human-facing name and its physical signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinRow {
    /// The human-facing pin name (e.g. `LED3`, `KEY0`).
    pub name: String,
    /// The physical pad locator used inside the Verilog (e.g. `PIN_AF14`).
    pub signal: String,
}

/// An ordered name-to-signal table for one side.
///
/// Rows keep file order. Names are not deduplicated and several names may map
/// to the same signal; lookup returns the first match.
#[derive(Debug, Clone, Default)]
pub struct PinTable {
    rows: Vec<PinRow>,
}

impl PinTable {
    /// Loads a table from a CSV file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content, path)
    }

    /// Parses a table from CSV text.
    ///
    /// Format: a header row naming the two columns, then one `name,signal`
    /// row per pin. Fields are comma-separated and trimmed; quoting is not
    /// supported (pin names never contain commas). Blank lines are ignored.
    pub fn parse(content: &str, path: &Path) -> Result<Self, CatalogError> {
        let malformed = |line: usize, reason: String| CatalogError::Malformed {
            path: path.to_path_buf(),
            line,
            reason,
        };

        let mut lines = content
            .lines()
            .enumerate()
            .filter(|(_, l)| !l.trim().is_empty());

        let (header_idx, header) = lines
            .next()
            .ok_or_else(|| malformed(1, "empty table".to_string()))?;
        let header_fields = split_row(header);
        if header_fields.len() != 2 {
            return Err(malformed(
                header_idx + 1,
                format!("expected 2 header columns, got {}", header_fields.len()),
            ));
        }

        let mut rows = Vec::new();
        for (idx, line) in lines {
            let fields = split_row(line);
            if fields.len() != 2 {
                return Err(malformed(
                    idx + 1,
                    format!("expected 2 fields, got {}", fields.len()),
                ));
            }
            if fields[0].is_empty() || fields[1].is_empty() {
                return Err(malformed(idx + 1, "empty field".to_string()));
            }
            rows.push(PinRow {
                name: fields[0].clone(),
                signal: fields[1].clone(),
            });
        }

        if rows.is_empty() {
            return Err(malformed(header_idx + 1, "table has no rows".to_string()));
        }

        Ok(Self { rows })
    }

    /// Looks up the signal for a pin name. First match wins.
    pub fn signal(&self, name: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|r| r.name == name)
            .map(|r| r.signal.as_str())
    }

    /// The rows in file order.
    pub fn rows(&self) -> &[PinRow] {
        &self.rows
    }
}

fn split_row(line: &str) -> Vec<String> {
    line.split(',').map(|f| f.trim().to_string()).collect()
}

/// The two-sided pin catalog.
#[derive(Debug, Clone)]
pub struct PinCatalog {
    peripheral: PinTable,
    board: PinTable,
}

impl PinCatalog {
    /// Loads both tables from their CSV sources.
    ///
    /// Called per request so the catalog reflects the files at last read.
    pub fn load(peripheral_csv: &Path, board_csv: &Path) -> Result<Self, CatalogError> {
        let peripheral = PinTable::load(peripheral_csv)?;
        let board = PinTable::load(board_csv)?;
        log::debug!(
            "loaded pin catalog: {} peripheral rows from {}, {} board rows from {}",
            peripheral.rows().len(),
            peripheral_csv.display(),
            board.rows().len(),
            board_csv.display()
        );
        Ok(Self { peripheral, board })
    }

    /// Builds a catalog from already-parsed tables (mostly for tests).
    pub fn from_tables(peripheral: PinTable, board: PinTable) -> Self {
        Self { peripheral, board }
    }

    /// Resolves a pin name on the given side to its physical signal.
    pub fn resolve(&self, side: Side, name: &str) -> Option<&str> {
        self.table(side).signal(name)
    }

    /// The table for one side, for row-order enumeration.
    pub fn table(&self, side: Side) -> &PinTable {
        match side {
            Side::Peripheral => &self.peripheral,
            Side::Board => &self.board,
        }
    }
}
