//! # tabula
//!
//! An in-memory spreadsheet engine.
//!
//! A [`Sheet`] is a sparse grid of [`Cell`]s holding text, numbers or
//! formulas. Formula cells read other cells; every formula write is checked
//! for reference cycles before it commits, and rejected writes leave the
//! target cell as it was.
//!
//! ## Example
//!
//! ```rust
//! use tabula::prelude::*;
//!
//! let mut sheet = Sheet::new();
//! let a1: Position = "A1".parse().unwrap();
//! let b1: Position = "B1".parse().unwrap();
//!
//! sheet.set_cell(a1, "10").unwrap();
//! sheet.set_cell(b1, "=A1*2+1").unwrap();
//! assert_eq!(sheet.value(b1).unwrap(), Some(Value::Number(21.0)));
//!
//! // A1 may not refer back to B1
//! assert!(matches!(
//!     sheet.set_cell(a1, "=B1"),
//!     Err(Error::CircularDependency(_))
//! ));
//! ```

pub mod cell;
pub mod prelude;
mod print;
pub mod sheet;

pub use cell::{Cell, Content};
pub use sheet::{CellView, Sheet};

// Re-export core types
pub use tabula_core::{
    CellError, Error, Position, Result, Size, Value, ESCAPE_SIGN, FORMULA_SIGN, MAX_COLS,
    MAX_ROWS,
};

// Re-export formula types
pub use tabula_formula::{parse_formula, CellLookup, Formula, FormulaError};
