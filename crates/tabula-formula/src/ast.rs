//! Formula Abstract Syntax Tree types

use std::collections::BTreeSet;
use std::fmt;

use tabula_core::{CellError, Position};

/// Formula expression AST
#[derive(Debug, Clone, PartialEq)]
pub enum FormulaExpr {
    /// Numeric literal
    Number(f64),

    /// Reference to a cell inside the sheet
    CellRef(Position),
    /// Reference that cannot name a cell (out of range, or a `#REF!` literal)
    InvalidRef,

    /// Unary operation
    UnaryOp {
        op: UnaryOperator,
        operand: Box<FormulaExpr>,
    },
    /// Binary operation
    BinaryOp {
        op: BinaryOperator,
        left: Box<FormulaExpr>,
        right: Box<FormulaExpr>,
    },
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Plus,
    Negate,
}

// Binding strength, loosest first.
const PREC_ADDITIVE: u8 = 1;
const PREC_MULTIPLICATIVE: u8 = 2;
const PREC_UNARY: u8 = 3;
const PREC_ATOM: u8 = 4;

impl BinaryOperator {
    fn precedence(self) -> u8 {
        match self {
            BinaryOperator::Add | BinaryOperator::Subtract => PREC_ADDITIVE,
            BinaryOperator::Multiply | BinaryOperator::Divide => PREC_MULTIPLICATIVE,
        }
    }

    fn symbol(self) -> char {
        match self {
            BinaryOperator::Add => '+',
            BinaryOperator::Subtract => '-',
            BinaryOperator::Multiply => '*',
            BinaryOperator::Divide => '/',
        }
    }
}

impl UnaryOperator {
    fn symbol(self) -> char {
        match self {
            UnaryOperator::Plus => '+',
            UnaryOperator::Negate => '-',
        }
    }
}

impl FormulaExpr {
    fn precedence(&self) -> u8 {
        match self {
            FormulaExpr::Number(_) | FormulaExpr::CellRef(_) | FormulaExpr::InvalidRef => {
                PREC_ATOM
            }
            FormulaExpr::UnaryOp { .. } => PREC_UNARY,
            FormulaExpr::BinaryOp { op, .. } => op.precedence(),
        }
    }

    /// All valid positions this expression reads, sorted and deduplicated
    pub fn referenced_cells(&self) -> Vec<Position> {
        let mut cells = BTreeSet::new();
        self.collect_references(&mut cells);
        cells.into_iter().collect()
    }

    fn collect_references(&self, cells: &mut BTreeSet<Position>) {
        match self {
            FormulaExpr::CellRef(pos) => {
                cells.insert(*pos);
            }
            FormulaExpr::UnaryOp { operand, .. } => operand.collect_references(cells),
            FormulaExpr::BinaryOp { left, right, .. } => {
                left.collect_references(cells);
                right.collect_references(cells);
            }
            FormulaExpr::Number(_) | FormulaExpr::InvalidRef => {}
        }
    }

    fn fmt_child(&self, f: &mut fmt::Formatter<'_>, parenthesize: bool) -> fmt::Result {
        if parenthesize {
            write!(f, "({})", self)
        } else {
            write!(f, "{}", self)
        }
    }
}

/// Canonical rendering: no whitespace, parentheses only where the tree does
/// not follow left-to-right grouping.
///
/// Operators group to the left, so a right operand binding equally tight
/// keeps its parentheses. Reparsing the text rebuilds the same tree.
impl fmt::Display for FormulaExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormulaExpr::Number(n) => write!(f, "{}", n),
            FormulaExpr::CellRef(pos) => write!(f, "{}", pos),
            FormulaExpr::InvalidRef => write!(f, "{}", CellError::Ref),
            FormulaExpr::UnaryOp { op, operand } => {
                write!(f, "{}", op.symbol())?;
                operand.fmt_child(f, operand.precedence() < PREC_UNARY)
            }
            FormulaExpr::BinaryOp { op, left, right } => {
                let prec = op.precedence();
                left.fmt_child(f, left.precedence() < prec)?;
                write!(f, "{}", op.symbol())?;
                right.fmt_child(f, right.precedence() <= prec)
            }
        }
    }
}
