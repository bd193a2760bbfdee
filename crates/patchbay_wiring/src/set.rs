//! The validated connection set and its raw submission format.

use serde::Deserialize;

use crate::error::WiringError;

/// A single desired wire: a peripheral pin connected to a board pin.
///
/// Both halves are human-facing pin names; resolution to physical signals
/// happens against the pin catalog at generation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    /// Pin name on the peripheral side.
    pub peripheral: String,
    /// Pin name on the board side.
    pub board: String,
}

impl Connection {
    /// Creates a connection from a pair of pin names.
    pub fn new(peripheral: impl Into<String>, board: impl Into<String>) -> Self {
        Self {
            peripheral: peripheral.into(),
            board: board.into(),
        }
    }
}

impl std::fmt::Display for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.peripheral, self.board)
    }
}

/// An ordered sequence of [`Connection`]s.
///
/// Insertion order is significant: it determines the order of the generated
/// assignment statements. Duplicate pairs are permitted here; conflicting
/// target assignments are resolved by the generator, which keeps the first
/// and reports the rest as skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionSet {
    connections: Vec<Connection>,
}

impl ConnectionSet {
    /// Validates a raw submission of pin-name pairs.
    ///
    /// Every entry must be a two-element list of non-empty strings. The check
    /// is fail-closed: the first malformed entry rejects the entire
    /// submission and nothing downstream runs.
    pub fn validate(raw: &[Vec<String>]) -> Result<Self, WiringError> {
        let mut connections = Vec::with_capacity(raw.len());
        for (index, entry) in raw.iter().enumerate() {
            if entry.len() != 2 {
                return Err(WiringError::NotAPair {
                    index,
                    len: entry.len(),
                });
            }
            if entry[0].trim().is_empty() {
                return Err(WiringError::EmptyName {
                    index,
                    side: "peripheral",
                });
            }
            if entry[1].trim().is_empty() {
                return Err(WiringError::EmptyName {
                    index,
                    side: "board",
                });
            }
            connections.push(Connection::new(entry[0].clone(), entry[1].clone()));
        }
        Ok(Self { connections })
    }

    /// Builds a set from already-validated connections (mostly for tests).
    pub fn from_connections(connections: Vec<Connection>) -> Self {
        Self { connections }
    }

    /// Iterates the connections in submission order.
    pub fn iter(&self) -> impl Iterator<Item = &Connection> {
        self.connections.iter()
    }

    /// Number of connections in the set.
    pub fn len(&self) -> usize {
        self.connections.len()
    }

    /// Whether the set holds no connections at all.
    ///
    /// Generating from an empty set is meaningful: it strips every generated
    /// statement from the target file.
    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}

/// The persisted wiring document shape handed over by the outer layer.
///
/// Matches the JSON the frontend saves: `{"connections": [["P1","B1"], ...]}`.
/// The pairs are raw and unvalidated; pass them through
/// [`ConnectionSet::validate`] before use.
#[derive(Debug, Deserialize)]
pub struct WiringDocument {
    /// Raw pin-name pairs in submission order.
    #[serde(default)]
    pub connections: Vec<Vec<String>>,
}

/// Why a connection was left out of the generated output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The peripheral pin name is not in the peripheral table.
    UnresolvedPeripheral,
    /// The board pin name is not in the board table.
    UnresolvedBoard,
    /// An earlier connection already assigned the same board signal.
    DuplicateTarget,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::UnresolvedPeripheral => write!(f, "unknown peripheral pin"),
            SkipReason::UnresolvedBoard => write!(f, "unknown board pin"),
            SkipReason::DuplicateTarget => write!(f, "duplicate target signal"),
        }
    }
}

/// A connection the generator could not honor, with the reason.
///
/// Skips are soft failures: the batch continues and the skip list travels
/// with the result so the caller can surface it. They are never silently
/// dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedConnection {
    /// The connection as submitted.
    pub connection: Connection,
    /// Why it was skipped.
    pub reason: SkipReason,
}

impl std::fmt::Display for SkippedConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.connection, self.reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[[&str; 2]]) -> Vec<Vec<String>> {
        raw.iter()
            .map(|p| p.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn validate_accepts_well_formed_pairs() {
        let set = ConnectionSet::validate(&pairs(&[["P1", "B1"], ["P2", "B2"]])).unwrap();
        assert_eq!(set.len(), 2);
        let first = set.iter().next().unwrap();
        assert_eq!(first.peripheral, "P1");
        assert_eq!(first.board, "B1");
    }

    #[test]
    fn validate_preserves_submission_order() {
        let set = ConnectionSet::validate(&pairs(&[["C", "Z"], ["A", "Y"], ["B", "X"]])).unwrap();
        let order: Vec<_> = set.iter().map(|c| c.peripheral.as_str()).collect();
        assert_eq!(order, ["C", "A", "B"]);
    }

    #[test]
    fn validate_allows_duplicate_pairs() {
        let set = ConnectionSet::validate(&pairs(&[["P1", "B1"], ["P1", "B1"]])).unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn validate_rejects_wrong_arity() {
        let raw = vec![
            vec!["P1".to_string(), "B1".to_string()],
            vec!["P2".to_string()],
        ];
        let err = ConnectionSet::validate(&raw).unwrap_err();
        assert!(matches!(err, WiringError::NotAPair { index: 1, len: 1 }));
    }

    #[test]
    fn validate_rejects_empty_names() {
        let err = ConnectionSet::validate(&pairs(&[["", "B1"]])).unwrap_err();
        assert!(matches!(
            err,
            WiringError::EmptyName {
                index: 0,
                side: "peripheral"
            }
        ));

        let err = ConnectionSet::validate(&pairs(&[["P1", "  "]])).unwrap_err();
        assert!(matches!(
            err,
            WiringError::EmptyName {
                index: 0,
                side: "board"
            }
        ));
    }

    #[test]
    fn validate_rejects_whole_submission_on_one_bad_entry() {
        let raw = vec![
            vec!["P1".to_string(), "B1".to_string()],
            vec![],
            vec!["P3".to_string(), "B3".to_string()],
        ];
        assert!(ConnectionSet::validate(&raw).is_err());
    }

    #[test]
    fn empty_submission_is_a_valid_empty_set() {
        let set = ConnectionSet::validate(&[]).unwrap();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn wiring_document_deserializes_frontend_shape() {
        let doc: WiringDocument =
            serde_json::from_str(r#"{"connections": [["KEY0", "LED3"], ["SW1", "GPIO_4"]]}"#)
                .unwrap();
        assert_eq!(doc.connections.len(), 2);
        assert_eq!(doc.connections[0], vec!["KEY0", "LED3"]);
    }

    #[test]
    fn wiring_document_defaults_to_no_connections() {
        let doc: WiringDocument = serde_json::from_str("{}").unwrap();
        assert!(doc.connections.is_empty());
    }

    #[test]
    fn skip_reason_display() {
        let skipped = SkippedConnection {
            connection: Connection::new("P1", "Bx"),
            reason: SkipReason::UnresolvedBoard,
        };
        assert_eq!(format!("{skipped}"), "P1 -> Bx: unknown board pin");
    }
}
