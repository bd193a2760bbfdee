//! Regeneration of the wiring section from a connection set.

use std::collections::HashSet;
use std::io::Write;
use std::path::Path;

use patchbay_catalog::{PinCatalog, Side};
use patchbay_wiring::{ConnectionSet, SkipReason, SkippedConnection};

use crate::error::HdlError;
use crate::zones::{is_generated_assign, split_zones};

/// Indentation used for synthesized assign statements.
const STATEMENT_INDENT: &str = "    ";

/// The result of one regeneration pass.
#[derive(Debug, Clone)]
pub struct PatchResult {
    /// The full regenerated source text.
    pub text: String,
    /// Number of assign statements emitted.
    pub statements: usize,
    /// Connections that were left out, in submission order.
    pub skipped: Vec<SkippedConnection>,
}

/// Regenerates the wiring section of `source` from `connections`.
///
/// Strips every previously generated assign and every blank line from the
/// body, preserving all other body lines verbatim and in order, then inserts
/// one `assign <board-signal> = <peripheral-signal>;` per resolvable
/// connection immediately before the `endmodule` line.
///
/// Unresolvable connections and connections whose board signal was already
/// assigned by an earlier one are skipped, logged, and reported in the
/// result; they never abort the rest of the batch. The operation is pure:
/// nothing is written anywhere.
pub fn render_patched(
    source: &str,
    connections: &ConnectionSet,
    catalog: &PinCatalog,
) -> Result<PatchResult, HdlError> {
    let zones = split_zones(source)?;

    let preserved: Vec<&str> = zones
        .body
        .lines()
        .filter(|line| !line.trim().is_empty() && !is_generated_assign(line))
        .collect();

    let mut skipped = Vec::new();
    let mut assigned_targets = HashSet::new();
    let mut statements = Vec::new();
    for connection in connections.iter() {
        let Some(source_signal) = catalog.resolve(Side::Peripheral, &connection.peripheral) else {
            log::warn!("skipping {connection}: unknown peripheral pin");
            skipped.push(SkippedConnection {
                connection: connection.clone(),
                reason: SkipReason::UnresolvedPeripheral,
            });
            continue;
        };
        let Some(target_signal) = catalog.resolve(Side::Board, &connection.board) else {
            log::warn!("skipping {connection}: unknown board pin");
            skipped.push(SkippedConnection {
                connection: connection.clone(),
                reason: SkipReason::UnresolvedBoard,
            });
            continue;
        };
        // First submission wins; a second driver on the same net would not
        // survive synthesis anyway.
        if !assigned_targets.insert(target_signal.to_string()) {
            log::warn!("skipping {connection}: {target_signal} already assigned");
            skipped.push(SkippedConnection {
                connection: connection.clone(),
                reason: SkipReason::DuplicateTarget,
            });
            continue;
        }
        statements.push(format!(
            "{STATEMENT_INDENT}assign {target_signal} = {source_signal};"
        ));
    }

    let mut text = String::with_capacity(source.len());
    text.push_str(zones.head);
    text.push('\n');
    for line in &preserved {
        text.push_str(line);
        text.push('\n');
    }
    for statement in &statements {
        text.push_str(statement);
        text.push('\n');
    }
    text.push_str(zones.tail);

    Ok(PatchResult {
        text,
        statements: statements.len(),
        skipped,
    })
}

/// Regenerates the file at `path` in place.
///
/// The new text is staged in a temporary file next to the target and moved
/// over it in one rename, so a failure at any point leaves the original
/// contents intact. Returns the same [`PatchResult`] as [`render_patched`].
pub fn patch_file(
    path: &Path,
    connections: &ConnectionSet,
    catalog: &PinCatalog,
) -> Result<PatchResult, HdlError> {
    let io_err = |source| HdlError::Io {
        path: path.to_path_buf(),
        source,
    };

    let source = std::fs::read_to_string(path).map_err(io_err)?;
    let result = render_patched(&source, connections, catalog)?;

    let parent = path.parent().filter(|p| !p.as_os_str().is_empty());
    let mut staged = tempfile::NamedTempFile::new_in(parent.unwrap_or(Path::new(".")))
        .map_err(io_err)?;
    staged.write_all(result.text.as_bytes()).map_err(io_err)?;
    staged.persist(path).map_err(|e| io_err(e.error))?;

    log::info!(
        "patched {}: {} statement(s), {} skipped",
        path.display(),
        result.statements,
        result.skipped.len()
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use patchbay_catalog::PinTable;
    use patchbay_wiring::Connection;

    const BASELINE: &str = "\
module patch_top (
    input  wire KEY0,
    input  wire KEY1,
    output wire LED0,
    output wire LED1
);
    wire debug_net;
    not u_inv (debug_net, KEY0);
endmodule
";

    fn catalog() -> PinCatalog {
        let peripheral = PinTable::parse(
            "Perifery,CycloneIV\nP1,PIN_A\nP2,PIN_C\nP3,PIN_E\n",
            Path::new("perif.csv"),
        )
        .unwrap();
        let board = PinTable::parse(
            "DE10-Lite,CycloneIV\nB1,PIN_B\nB2,PIN_D\nB3,PIN_F\n",
            Path::new("de10lite.csv"),
        )
        .unwrap();
        PinCatalog::from_tables(peripheral, board)
    }

    fn set(pairs: &[(&str, &str)]) -> ConnectionSet {
        ConnectionSet::from_connections(
            pairs.iter().map(|(p, b)| Connection::new(*p, *b)).collect(),
        )
    }

    #[test]
    fn generates_target_equals_source() {
        let result = render_patched(BASELINE, &set(&[("P1", "B1")]), &catalog()).unwrap();
        assert_eq!(result.statements, 1);
        assert!(result.skipped.is_empty());
        assert!(result.text.contains("    assign PIN_B = PIN_A;\n"));
        // inserted once, immediately before the terminal marker
        assert_eq!(result.text.matches("assign PIN_B = PIN_A;").count(), 1);
        let idx = result.text.find("assign PIN_B = PIN_A;").unwrap();
        let after = &result.text[idx..];
        assert!(after.trim_start_matches("assign PIN_B = PIN_A;")
            .trim_start()
            .starts_with("endmodule"));
    }

    #[test]
    fn statements_follow_submission_order() {
        let result =
            render_patched(BASELINE, &set(&[("P2", "B2"), ("P1", "B1")]), &catalog()).unwrap();
        let d = result.text.find("assign PIN_D = PIN_C;").unwrap();
        let b = result.text.find("assign PIN_B = PIN_A;").unwrap();
        assert!(d < b);
    }

    #[test]
    fn patch_is_idempotent() {
        let connections = set(&[("P1", "B1"), ("P2", "B2")]);
        let cat = catalog();
        let once = render_patched(BASELINE, &connections, &cat).unwrap();
        let twice = render_patched(&once.text, &connections, &cat).unwrap();
        assert_eq!(once.text, twice.text);
    }

    #[test]
    fn empty_set_strips_all_generated_statements() {
        let cat = catalog();
        let patched = render_patched(BASELINE, &set(&[("P1", "B1"), ("P3", "B3")]), &cat)
            .unwrap();
        let stripped = render_patched(&patched.text, &ConnectionSet::default(), &cat).unwrap();
        assert_eq!(stripped.statements, 0);
        assert!(!stripped.text.contains("assign PIN_"));
        assert!(stripped.text.contains("wire debug_net;"));
        // stripping the already-stripped file changes nothing
        let again = render_patched(&stripped.text, &ConnectionSet::default(), &cat).unwrap();
        assert_eq!(stripped.text, again.text);
    }

    #[test]
    fn hand_written_body_survives_untouched() {
        let cat = catalog();
        let result = render_patched(BASELINE, &set(&[("P1", "B1")]), &cat).unwrap();
        assert!(result.text.contains("    wire debug_net;\n"));
        assert!(result.text.contains("    not u_inv (debug_net, KEY0);\n"));
        // and removing the wiring again restores the baseline body lines
        let stripped = render_patched(&result.text, &ConnectionSet::default(), &cat).unwrap();
        assert!(stripped.text.contains("    wire debug_net;\n"));
        assert!(stripped.text.contains("    not u_inv (debug_net, KEY0);\n"));
    }

    #[test]
    fn body_without_generated_statements_loses_nothing() {
        let cat = catalog();
        let result = render_patched(BASELINE, &ConnectionSet::default(), &cat).unwrap();
        for line in ["wire debug_net;", "not u_inv (debug_net, KEY0);"] {
            assert!(result.text.contains(line));
        }
        assert_eq!(result.statements, 0);
    }

    #[test]
    fn unresolved_pair_is_skipped_and_reported() {
        let result = render_patched(BASELINE, &set(&[("P1", "Bx")]), &catalog()).unwrap();
        assert_eq!(result.statements, 0);
        assert_eq!(result.skipped.len(), 1);
        assert_eq!(result.skipped[0].reason, SkipReason::UnresolvedBoard);
        assert!(!result.text.contains("assign PIN_"));
    }

    #[test]
    fn unresolved_pair_does_not_abort_the_batch() {
        let result = render_patched(
            BASELINE,
            &set(&[("P1", "B1"), ("Px", "B2"), ("P3", "B3")]),
            &catalog(),
        )
        .unwrap();
        assert_eq!(result.statements, 2);
        assert_eq!(result.skipped.len(), 1);
        assert_eq!(result.skipped[0].reason, SkipReason::UnresolvedPeripheral);
        assert_eq!(result.skipped[0].connection.peripheral, "Px");
    }

    #[test]
    fn duplicate_target_keeps_first_and_reports_rest() {
        let result = render_patched(
            BASELINE,
            &set(&[("P1", "B1"), ("P2", "B1")]),
            &catalog(),
        )
        .unwrap();
        assert_eq!(result.statements, 1);
        assert!(result.text.contains("assign PIN_B = PIN_A;"));
        assert!(!result.text.contains("assign PIN_B = PIN_C;"));
        assert_eq!(result.skipped.len(), 1);
        assert_eq!(result.skipped[0].reason, SkipReason::DuplicateTarget);
    }

    #[test]
    fn malformed_source_patches_nothing() {
        let err = render_patched("not verilog at all", &set(&[("P1", "B1")]), &catalog())
            .unwrap_err();
        assert!(matches!(err, HdlError::MalformedSource { .. }));
    }

    #[test]
    fn patch_file_rewrites_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("top.v");
        std::fs::write(&path, BASELINE).unwrap();

        let result = patch_file(&path, &set(&[("P1", "B1")]), &catalog()).unwrap();
        let on_disk = std::fs::read_to_string(&path).unwrap();
        assert_eq!(on_disk, result.text);
        assert!(on_disk.contains("assign PIN_B = PIN_A;"));
    }

    #[test]
    fn patch_file_leaves_malformed_source_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("top.v");
        std::fs::write(&path, "module m;\nno anchors here\n").unwrap();

        let err = patch_file(&path, &set(&[("P1", "B1")]), &catalog()).unwrap_err();
        assert!(matches!(err, HdlError::MalformedSource { .. }));
        let on_disk = std::fs::read_to_string(&path).unwrap();
        assert_eq!(on_disk, "module m;\nno anchors here\n");
    }

    #[test]
    fn patch_file_missing_target_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.v");
        let err = patch_file(&path, &ConnectionSet::default(), &catalog()).unwrap_err();
        assert!(matches!(err, HdlError::Io { .. }));
    }

    #[test]
    fn on_disk_patch_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("top.v");
        std::fs::write(&path, BASELINE).unwrap();
        let connections = set(&[("P1", "B1"), ("P2", "B2")]);
        let cat = catalog();

        patch_file(&path, &connections, &cat).unwrap();
        let first = std::fs::read_to_string(&path).unwrap();
        patch_file(&path, &connections, &cat).unwrap();
        let second = std::fs::read_to_string(&path).unwrap();
        assert_eq!(first, second);
    }
}
