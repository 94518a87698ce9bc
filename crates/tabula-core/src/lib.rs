//! # tabula-core
//!
//! Core value types for the tabula spreadsheet engine.
//!
//! This crate provides the fundamental types shared by the formula
//! collaborator and the sheet:
//! - [`Position`] and [`Size`] - Cell addressing and the printable area
//! - [`Value`] - The observable result of reading a cell
//! - [`CellError`] - Value-level formula errors (`#REF!`, `#VALUE!`, `#DIV/0!`)
//! - [`Error`] - Structural failures of sheet operations
//!
//! ## Example
//!
//! ```rust
//! use tabula_core::Position;
//!
//! let pos: Position = "B3".parse().unwrap();
//! assert_eq!(pos, Position::new(2, 1));
//! assert_eq!(pos.to_string(), "B3");
//! ```

pub mod cell;
pub mod error;

// Re-exports for convenience
pub use cell::{CellError, Position, Size, Value};
pub use error::{Error, Result};

/// Maximum number of rows in a sheet
pub const MAX_ROWS: u32 = 16_384;

/// Maximum number of columns in a sheet
pub const MAX_COLS: u32 = 16_384;

/// Leading character that turns cell text into a formula
pub const FORMULA_SIGN: char = '=';

/// Leading character that forces cell text to be read literally
pub const ESCAPE_SIGN: char = '\'';
