//! Helpers shared by the pipeline-driving commands.

use std::path::Path;

use patchbay_wiring::{ConnectionSet, SkippedConnection, WiringDocument};

/// Reads and validates a connections document.
///
/// The document is the JSON the outer layer persists:
/// `{"connections": [["P1","B1"], ...]}`. Shape validation is fail-closed;
/// a malformed pair rejects the whole document.
pub fn load_connections(path: &Path) -> Result<ConnectionSet, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    let document: WiringDocument = serde_json::from_str(&content)
        .map_err(|e| format!("invalid connections document {}: {e}", path.display()))?;
    let set = ConnectionSet::validate(&document.connections)?;
    Ok(set)
}

/// Prints each skipped pair as a warning on stderr.
pub fn report_skipped(skipped: &[SkippedConnection]) {
    for skip in skipped {
        eprintln!("warning: skipped {skip}");
    }
}
