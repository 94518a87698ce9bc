//! # tabula-formula
//!
//! Arithmetic formula support for tabula.
//!
//! This crate provides:
//! - Formula parsing (text → AST)
//! - Formula evaluation (AST → number or [`CellError`](tabula_core::CellError))
//! - Canonical re-rendering of the expression text
//! - The list of cells a formula references
//!
//! ## Example
//!
//! ```rust
//! use tabula_formula::parse_formula;
//!
//! let formula = parse_formula("(1 + 2) * 3").unwrap();
//! assert_eq!(formula.expression(), "(1+2)*3");
//! assert_eq!(formula.evaluate(&()), Ok(9.0));
//! ```

pub mod ast;
pub mod error;
pub mod evaluator;
pub mod formula;
pub mod parser;

pub use ast::{BinaryOperator, FormulaExpr, UnaryOperator};
pub use error::{FormulaError, FormulaResult};
pub use evaluator::{evaluate, CellLookup, FormulaOutcome};
pub use formula::{parse_formula, Formula};
