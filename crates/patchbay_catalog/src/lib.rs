//! Pin catalog: name-to-signal lookup tables for both sides of the patch.
//!
//! The catalog holds two parallel tables loaded from CSV files: one mapping
//! peripheral pin names to physical signals, one mapping board pin names to
//! physical signals. Rows are kept in file order because the outer layer
//! enumerates them for display; lookup itself is order-independent.
//!
//! The catalog is reloaded from disk per request. A missing or malformed
//! source file is fatal to the whole request ([`CatalogError`]): without the
//! tables no name can be resolved, so there is no useful partial result.

#![warn(missing_docs)]

mod error;
mod table;

pub use error::CatalogError;
pub use table::{PinCatalog, PinRow, PinTable, Side};
