//! Formula evaluator
//!
//! Evaluates formula ASTs against a read-only view of the sheet.

use crate::ast::{BinaryOperator, FormulaExpr, UnaryOperator};
use tabula_core::{CellError, Position, Value};

/// Outcome of evaluating a formula: a number or a value-level error
pub type FormulaOutcome = Result<f64, CellError>;

/// Read access to the cells a formula refers to
///
/// This is the only way a formula sees the sheet, and it is handed in at
/// evaluation time, so compiled formulas hold no reference to their sheet.
pub trait CellLookup {
    /// Value of the cell at `pos`, or `None` when no cell exists there
    fn cell_value(&self, pos: Position) -> Option<Value>;
}

/// A lookup with no cells at all
impl CellLookup for () {
    fn cell_value(&self, _pos: Position) -> Option<Value> {
        None
    }
}

/// Evaluate an expression
///
/// Missing cells read as zero. Text operands must be numeric in full (empty
/// text reads as zero), otherwise the result is `#VALUE!`. Any non-finite
/// intermediate result becomes `#DIV/0!`.
pub fn evaluate(expr: &FormulaExpr, cells: &dyn CellLookup) -> FormulaOutcome {
    let result = match expr {
        FormulaExpr::Number(n) => *n,
        FormulaExpr::CellRef(pos) => cell_operand(*pos, cells)?,
        FormulaExpr::InvalidRef => return Err(CellError::Ref),
        FormulaExpr::UnaryOp { op, operand } => {
            let value = evaluate(operand, cells)?;
            match op {
                UnaryOperator::Plus => value,
                UnaryOperator::Negate => -value,
            }
        }
        FormulaExpr::BinaryOp { op, left, right } => {
            let lhs = evaluate(left, cells)?;
            let rhs = evaluate(right, cells)?;
            match op {
                BinaryOperator::Add => lhs + rhs,
                BinaryOperator::Subtract => lhs - rhs,
                BinaryOperator::Multiply => lhs * rhs,
                BinaryOperator::Divide => lhs / rhs,
            }
        }
    };

    if result.is_finite() {
        Ok(result)
    } else {
        Err(CellError::Div0)
    }
}

fn cell_operand(pos: Position, cells: &dyn CellLookup) -> FormulaOutcome {
    match cells.cell_value(pos) {
        None => Ok(0.0),
        Some(Value::Number(n)) => Ok(n),
        Some(Value::Text(text)) => text_operand(&text),
        Some(Value::Error(e)) => Err(e),
    }
}

fn text_operand(text: &str) -> FormulaOutcome {
    if text.is_empty() {
        return Ok(0.0);
    }
    match text.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(n),
        _ => Err(CellError::Value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_expression;
    use std::collections::HashMap;

    struct Cells(HashMap<Position, Value>);

    impl CellLookup for Cells {
        fn cell_value(&self, pos: Position) -> Option<Value> {
            self.0.get(&pos).cloned()
        }
    }

    fn eval(expression: &str, cells: &dyn CellLookup) -> FormulaOutcome {
        evaluate(&parse_expression(expression).unwrap(), cells)
    }

    #[test]
    fn test_evaluate_arithmetic() {
        assert_eq!(eval("1+2*3", &()), Ok(7.0));
        assert_eq!(eval("(1+2)*3", &()), Ok(9.0));
        assert_eq!(eval("8-4-2", &()), Ok(2.0));
        assert_eq!(eval("8/4/2", &()), Ok(1.0));
        assert_eq!(eval("-3*-2", &()), Ok(6.0));
        assert_eq!(eval("+5", &()), Ok(5.0));
    }

    #[test]
    fn test_evaluate_division_by_zero() {
        assert_eq!(eval("1/0", &()), Err(CellError::Div0));
        assert_eq!(eval("0/0", &()), Err(CellError::Div0));
        assert_eq!(eval("1e308*10", &()), Err(CellError::Div0));
    }

    #[test]
    fn test_evaluate_cell_operands() {
        let cells = Cells(HashMap::from([
            (Position::new(0, 0), Value::Number(10.0)),
            (Position::new(0, 1), Value::text("2.5")),
            (Position::new(0, 2), Value::text("")),
            (Position::new(0, 3), Value::text("abc")),
            (Position::new(0, 4), Value::Error(CellError::Div0)),
        ]));

        assert_eq!(eval("A1*2+1", &cells), Ok(21.0));
        assert_eq!(eval("B1*2", &cells), Ok(5.0));
        assert_eq!(eval("C1+1", &cells), Ok(1.0));
        assert_eq!(eval("D1+1", &cells), Err(CellError::Value));
        assert_eq!(eval("E1+1", &cells), Err(CellError::Div0));
        // Missing cell reads as zero
        assert_eq!(eval("Z9+4", &cells), Ok(4.0));
    }

    #[test]
    fn test_evaluate_invalid_reference() {
        assert_eq!(eval("A99999+1", &()), Err(CellError::Ref));
        assert_eq!(eval("#REF!", &()), Err(CellError::Ref));
    }

    #[test]
    fn test_first_error_wins() {
        let cells = Cells(HashMap::from([
            (Position::new(0, 0), Value::text("x")),
            (Position::new(0, 1), Value::Error(CellError::Div0)),
        ]));
        assert_eq!(eval("A1+B1", &cells), Err(CellError::Value));
        assert_eq!(eval("B1+A1", &cells), Err(CellError::Div0));
    }
}
