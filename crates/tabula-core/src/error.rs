//! Error types for tabula-core

use thiserror::Error;

use crate::cell::Position;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while addressing or mutating a sheet
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Position lies outside the addressable sheet
    #[error("Invalid position: row {}, col {}", .0.row, .0.col)]
    InvalidPosition(Position),

    /// Text that does not name a cell in A1 notation
    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),

    /// Formula text after the `=` marker failed to parse
    #[error("Malformed formula: {0}")]
    MalformedFormula(String),

    /// Committing the formula would close a reference cycle
    #[error("Circular dependency detected involving cell {0}")]
    CircularDependency(Position),
}
