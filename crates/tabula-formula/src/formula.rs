//! Compiled formulas

use crate::ast::FormulaExpr;
use crate::error::FormulaResult;
use crate::evaluator::{evaluate, CellLookup, FormulaOutcome};
use crate::parser::parse_expression;
use tabula_core::Position;

/// Parse the text that follows the `=` marker into a [`Formula`]
pub fn parse_formula(expression: &str) -> FormulaResult<Formula> {
    Formula::parse(expression)
}

/// A parsed formula, ready to be evaluated
#[derive(Debug, Clone, PartialEq)]
pub struct Formula {
    expr: FormulaExpr,
}

impl Formula {
    /// Parse an expression (without the leading `=`)
    pub fn parse(expression: &str) -> FormulaResult<Self> {
        Ok(Self {
            expr: parse_expression(expression)?,
        })
    }

    /// Evaluate against the given cells
    pub fn evaluate(&self, cells: &dyn CellLookup) -> FormulaOutcome {
        evaluate(&self.expr, cells)
    }

    /// Canonical expression text, without the leading `=`
    pub fn expression(&self) -> String {
        self.expr.to_string()
    }

    /// Valid positions the formula reads, sorted and without duplicates
    pub fn referenced_cells(&self) -> Vec<Position> {
        self.expr.referenced_cells()
    }

    /// The underlying syntax tree
    pub fn ast(&self) -> &FormulaExpr {
        &self.expr
    }
}

impl From<FormulaExpr> for Formula {
    fn from(expr: FormulaExpr) -> Self {
        Self { expr }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_canonical_expression() {
        let cases = [
            ("1 + 2", "1+2"),
            ("(1+2)*3", "(1+2)*3"),
            ("1+(2*3)", "1+2*3"),
            ("(1+2)-(3*4)", "1+2-3*4"),
            ("((A1))", "A1"),
            ("1-(2-3)", "1-(2-3)"),
            ("1-(2+3)", "1-(2+3)"),
            ("1+(2-3)", "1+(2-3)"),
            ("1+(2+3)", "1+(2+3)"),
            ("1+2+3", "1+2+3"),
            ("(1-2)-3", "1-2-3"),
            ("2*(3/4)", "2*(3/4)"),
            ("2*(3*4)", "2*(3*4)"),
            ("2*3/4", "2*3/4"),
            ("2/(3*4)", "2/(3*4)"),
            ("2/(3/4)", "2/(3/4)"),
            ("-(1+2)", "-(1+2)"),
            ("-(-1)", "--1"),
            ("+(A1*b2)", "+(A1*B2)"),
            ("1.50", "1.5"),
            ("1e3", "1000"),
            ("A99999+1", "#REF!+1"),
        ];

        for (input, expected) in cases {
            let formula = parse_formula(input).unwrap();
            assert_eq!(formula.expression(), expected, "input: {}", input);
        }
    }

    #[test]
    fn test_referenced_cells_are_sorted_and_unique() {
        let formula = parse_formula("B2+A1*B2-A1+C1").unwrap();
        assert_eq!(
            formula.referenced_cells(),
            vec![Position::new(0, 0), Position::new(0, 2), Position::new(1, 1)]
        );
    }

    #[test]
    fn test_referenced_cells_skip_invalid() {
        let formula = parse_formula("A99999+#REF!+A2").unwrap();
        assert_eq!(formula.referenced_cells(), vec![Position::new(1, 0)]);
    }

    #[test]
    fn test_no_references() {
        assert!(parse_formula("1+2").unwrap().referenced_cells().is_empty());
    }
}
