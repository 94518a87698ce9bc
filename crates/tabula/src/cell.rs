//! Cell content and cells
//!
//! A [`Cell`] owns exactly one [`Content`] plus an optional memo of the
//! numeric result computed when a formula was committed to it.

use tabula_core::{Error, Position, Result, Value, ESCAPE_SIGN, FORMULA_SIGN};
use tabula_formula::{CellLookup, Formula};

/// What a cell holds
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Content {
    /// Nothing; reads as zero and renders as empty text
    #[default]
    Empty,
    /// Raw text as entered
    Text(String),
    /// Parsed formula (the text after `=`)
    Formula(Formula),
}

impl Content {
    /// Select and build the content for `text`
    ///
    /// Text longer than one character starting with `=` is a formula; the
    /// empty string is [`Content::Empty`]; everything else is text.
    pub fn parse(text: &str) -> Result<Self> {
        if text.is_empty() {
            return Ok(Content::Empty);
        }

        match text.strip_prefix(FORMULA_SIGN) {
            Some(expression) if !expression.is_empty() => Formula::parse(expression)
                .map(Content::Formula)
                .map_err(|e| Error::MalformedFormula(e.to_string())),
            _ => Ok(Content::Text(text.to_string())),
        }
    }

    /// Value of this content, evaluating formulas against `cells`
    pub fn value(&self, cells: &dyn CellLookup) -> Value {
        match self {
            Content::Empty => Value::Number(0.0),
            Content::Text(text) => text_value(text),
            Content::Formula(formula) => formula.evaluate(cells).into(),
        }
    }

    /// Editable text; setting a cell to it recreates equivalent content
    pub fn text(&self) -> String {
        match self {
            Content::Empty => String::new(),
            Content::Text(text) => text.clone(),
            Content::Formula(formula) => format!("{}{}", FORMULA_SIGN, formula.expression()),
        }
    }

    /// Positions a formula reads, sorted and without duplicates
    pub fn referenced_cells(&self) -> Vec<Position> {
        match self {
            Content::Empty | Content::Text(_) => Vec::new(),
            Content::Formula(formula) => formula.referenced_cells(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Content::Empty)
    }

    pub fn is_formula(&self) -> bool {
        matches!(self, Content::Formula(_))
    }
}

/// A fully numeric text is a number; a leading `'` is stripped; anything
/// else is the text itself.
fn text_value(text: &str) -> Value {
    match text.parse::<f64>() {
        Ok(n) if n.is_finite() => Value::Number(n),
        _ => match text.strip_prefix(ESCAPE_SIGN) {
            Some(literal) => Value::text(literal),
            None => Value::text(text),
        },
    }
}

/// A single cell of a sheet
#[derive(Debug, Clone, Default)]
pub struct Cell {
    content: Content,
    /// Set only when a formula is committed; never refreshed on read.
    cache: Option<f64>,
}

impl Cell {
    /// Create an empty cell
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    /// Cached formula result if present, otherwise the content's value
    pub fn value(&self, cells: &dyn CellLookup) -> Value {
        match self.cache {
            Some(n) => Value::Number(n),
            None => self.content.value(cells),
        }
    }

    pub fn text(&self) -> String {
        self.content.text()
    }

    pub fn referenced_cells(&self) -> Vec<Position> {
        self.content.referenced_cells()
    }

    /// Numeric result memoised when the current formula was committed
    pub fn cached_value(&self) -> Option<f64> {
        self.cache
    }

    /// Reset to empty content and drop the cache
    pub fn clear(&mut self) {
        self.content = Content::Empty;
        self.cache = None;
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Install text or empty content; these never take part in cycles.
    pub(crate) fn set_plain(&mut self, content: Content) {
        debug_assert!(!content.is_formula());
        self.content = content;
        self.cache = None;
    }

    /// Install new content and hand back the previous one for rollback.
    pub(crate) fn replace_content(&mut self, content: Content) -> Content {
        std::mem::replace(&mut self.content, content)
    }

    /// Put back content taken by [`Cell::replace_content`]; the cache still
    /// belongs to it.
    pub(crate) fn restore(&mut self, snapshot: Content) {
        self.content = snapshot;
    }

    /// Memoise the value computed right after a commit
    pub(crate) fn commit(&mut self, value: &Value) {
        self.cache = value.as_number();
    }
}
