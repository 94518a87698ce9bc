//! Cell-related types
//!
//! This module contains:
//! - [`Position`] - A cell's location (e.g., "A1")
//! - [`Size`] - The extent of the printable area
//! - [`Value`] - The value read from a cell
//! - [`CellError`] - Errors produced by formula evaluation

mod position;
mod value;

pub use position::{Position, Size};
pub use value::{CellError, Value};
