//! Sheet type

use ahash::{AHashMap, AHashSet};

use crate::cell::{Cell, Content};
use tabula_core::{Error, Position, Result, Size, Value};
use tabula_formula::CellLookup;

/// A single sheet of cells
///
/// Cells live in a sparse grid of optional slots that only ever grows. The
/// printable size is the smallest box covering every present cell.
#[derive(Debug, Default)]
pub struct Sheet {
    /// Row-major slots; each row is only as long as its last touched column
    rows: Vec<Vec<Option<Cell>>>,
    /// Cached printable size
    size: Size,
}

impl Sheet {
    /// Create a new empty sheet
    pub fn new() -> Self {
        Self::default()
    }

    // === Cell Access ===

    /// Set the text of the cell at `pos`
    ///
    /// Text starting with `=` is parsed as a formula. Formula cells that
    /// reference missing cells create empty cells there first; those stay
    /// even if the formula is then rejected for closing a cycle.
    pub fn set_cell(&mut self, pos: Position, text: &str) -> Result<()> {
        check_position(pos)?;

        let content = Content::parse(text)?;
        log::debug!("set {} to {:?}", pos, text);

        if content.is_formula() {
            self.set_formula(pos, content)?;
        } else {
            self.slot_mut(pos).get_or_insert_with(Cell::new).set_plain(content);
        }

        self.grow_size(pos);
        Ok(())
    }

    fn set_formula(&mut self, pos: Position, content: Content) -> Result<()> {
        for dep in content.referenced_cells() {
            if dep != pos && self.cell_at(dep).is_none() {
                log::trace!("creating empty cell {} referenced from {}", dep, pos);
                *self.slot_mut(dep) = Some(Cell::new());
                self.grow_size(dep);
            }
        }

        let created = self.cell_at(pos).is_none();
        let snapshot = self
            .slot_mut(pos)
            .get_or_insert_with(Cell::new)
            .replace_content(content);

        if self.is_cyclic(pos) {
            let slot = self.slot_mut(pos);
            if created {
                *slot = None;
            } else if let Some(cell) = slot {
                cell.restore(snapshot);
            }
            log::debug!("rejected formula at {}: circular dependency", pos);
            return Err(Error::CircularDependency(pos));
        }

        let value = match self.cell_at(pos) {
            Some(cell) => cell.content().value(self),
            None => return Ok(()),
        };
        if let Some(cell) = self.slot_mut(pos) {
            cell.commit(&value);
        }
        Ok(())
    }

    /// Get the cell at `pos`
    ///
    /// Returns `Ok(None)` for a valid position that holds no cell.
    pub fn cell(&self, pos: Position) -> Result<Option<CellView<'_>>> {
        check_position(pos)?;
        Ok(self.cell_at(pos).map(|cell| CellView {
            sheet: self,
            cell,
            position: pos,
        }))
    }

    /// Get a mutable cell by position
    pub fn cell_mut(&mut self, pos: Position) -> Result<Option<&mut Cell>> {
        check_position(pos)?;
        Ok(self
            .rows
            .get_mut(pos.row as usize)
            .and_then(|row| row.get_mut(pos.col as usize))
            .and_then(Option::as_mut))
    }

    /// Value of the cell at `pos`, `None` when there is no cell
    pub fn value(&self, pos: Position) -> Result<Option<Value>> {
        Ok(self.cell(pos)?.map(|cell| cell.value()))
    }

    /// Remove the cell at `pos`
    pub fn clear_cell(&mut self, pos: Position) -> Result<()> {
        check_position(pos)?;

        let removed = self
            .rows
            .get_mut(pos.row as usize)
            .and_then(|row| row.get_mut(pos.col as usize))
            .and_then(Option::take);

        if removed.is_some() {
            log::debug!("cleared {}", pos);
            self.recompute_size();
        }
        Ok(())
    }

    /// Smallest box covering every present cell
    pub fn printable_size(&self) -> Size {
        self.size
    }

    // === Dependencies ===

    /// Check whether the cells reachable from `pos` through formula
    /// references contain a cycle
    ///
    /// Depth-first walk on an explicit stack, so reference chains of any
    /// length are fine.
    pub fn is_cyclic(&self, pos: Position) -> bool {
        let mut visited = AHashSet::new();
        let mut on_stack = AHashSet::new();
        let mut frames: Vec<(Position, Vec<Position>, usize)> = Vec::new();

        visited.insert(pos);
        on_stack.insert(pos);
        frames.push((pos, self.references_of(pos), 0));

        while let Some((current, neighbors, next)) = frames.last_mut() {
            let step = neighbors.get(*next).copied();
            match step {
                Some(neighbor) => {
                    *next += 1;
                    if on_stack.contains(&neighbor) {
                        log::trace!("cycle closes at {}", neighbor);
                        return true;
                    }
                    if visited.insert(neighbor) {
                        on_stack.insert(neighbor);
                        frames.push((neighbor, self.references_of(neighbor), 0));
                    }
                }
                None => {
                    on_stack.remove(&*current);
                    frames.pop();
                }
            }
        }

        false
    }

    fn references_of(&self, pos: Position) -> Vec<Position> {
        self.cell_at(pos)
            .map(Cell::referenced_cells)
            .unwrap_or_default()
    }

    // === Evaluation ===

    /// Value of the cell at `pos`
    ///
    /// Formulas without a cached result are evaluated dependencies first,
    /// each at most once, on an explicit stack.
    fn resolve(&self, pos: Position) -> Option<Value> {
        let cell = self.cell_at(pos)?;
        if !needs_evaluation(cell) {
            return Some(cell.value(self));
        }

        let mut resolved = AHashMap::new();
        let mut expanded = AHashSet::new();
        let mut stack = vec![(pos, false)];

        while let Some((current, ready)) = stack.pop() {
            if resolved.contains_key(&current) {
                continue;
            }
            let cell = match self.cell_at(current) {
                Some(cell) if needs_evaluation(cell) => cell,
                _ => continue,
            };

            if ready {
                let lookup = Resolved {
                    sheet: self,
                    resolved: &resolved,
                };
                let value = cell.content().value(&lookup);
                resolved.insert(current, value);
            } else if expanded.insert(current) {
                stack.push((current, true));
                for dep in cell.referenced_cells() {
                    if !resolved.contains_key(&dep) && !expanded.contains(&dep) {
                        stack.push((dep, false));
                    }
                }
            }
        }

        resolved.remove(&pos)
    }

    // === Grid ===

    pub(crate) fn cell_at(&self, pos: Position) -> Option<&Cell> {
        self.rows
            .get(pos.row as usize)?
            .get(pos.col as usize)?
            .as_ref()
    }

    /// Slot for `pos`, growing the grid to cover it
    fn slot_mut(&mut self, pos: Position) -> &mut Option<Cell> {
        let (row, col) = (pos.row as usize, pos.col as usize);
        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Vec::new);
        }
        let cells = &mut self.rows[row];
        if cells.len() <= col {
            cells.resize_with(col + 1, || None);
        }
        &mut cells[col]
    }

    fn grow_size(&mut self, pos: Position) {
        self.size.rows = self.size.rows.max(pos.row + 1);
        self.size.cols = self.size.cols.max(pos.col + 1);
    }

    fn recompute_size(&mut self) {
        let mut size = Size::default();
        for (row, cells) in self.rows.iter().enumerate() {
            if let Some(col) = cells.iter().rposition(Option::is_some) {
                size.rows = row as u32 + 1;
                size.cols = size.cols.max(col as u32 + 1);
            }
        }
        self.size = size;
    }
}

impl CellLookup for Sheet {
    fn cell_value(&self, pos: Position) -> Option<Value> {
        self.resolve(pos)
    }
}

/// Formula cells whose value is not settled by a cache
fn needs_evaluation(cell: &Cell) -> bool {
    cell.content().is_formula() && cell.cached_value().is_none()
}

/// Lookup over the results computed so far by [`Sheet::resolve`]
struct Resolved<'a> {
    sheet: &'a Sheet,
    resolved: &'a AHashMap<Position, Value>,
}

impl CellLookup for Resolved<'_> {
    fn cell_value(&self, pos: Position) -> Option<Value> {
        if let Some(value) = self.resolved.get(&pos) {
            return Some(value.clone());
        }
        // Settled cells never consult the lookup
        self.sheet.cell_at(pos).map(|cell| cell.value(&()))
    }
}

fn check_position(pos: Position) -> Result<()> {
    if pos.is_valid() {
        Ok(())
    } else {
        Err(Error::InvalidPosition(pos))
    }
}

/// Read-only handle to a present cell of a sheet
#[derive(Debug, Clone, Copy)]
pub struct CellView<'a> {
    sheet: &'a Sheet,
    cell: &'a Cell,
    position: Position,
}

impl<'a> CellView<'a> {
    pub fn position(&self) -> Position {
        self.position
    }

    /// Cached formula result if present, otherwise the evaluated content
    pub fn value(&self) -> Value {
        self.cell.value(self.sheet)
    }

    pub fn text(&self) -> String {
        self.cell.text()
    }

    pub fn referenced_cells(&self) -> Vec<Position> {
        self.cell.referenced_cells()
    }

    pub fn cell(&self) -> &'a Cell {
        self.cell
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pos(a1: &str) -> Position {
        a1.parse().unwrap()
    }

    #[test]
    fn test_slots_grow_per_row() {
        let mut sheet = Sheet::new();
        sheet.set_cell(pos("C2"), "x").unwrap();

        assert_eq!(sheet.rows.len(), 2);
        assert!(sheet.rows[0].is_empty());
        assert_eq!(sheet.rows[1].len(), 3);
    }

    #[test]
    fn test_is_cyclic_direct_and_transitive() {
        let mut sheet = Sheet::new();
        sheet.set_cell(pos("A1"), "=B1").unwrap();
        sheet.set_cell(pos("B1"), "=C1+D1").unwrap();
        assert!(!sheet.is_cyclic(pos("A1")));

        // Close the loop behind the sheet's back to exercise the check alone
        sheet
            .slot_mut(pos("C1"))
            .as_mut()
            .unwrap()
            .replace_content(Content::parse("=A1").unwrap());
        assert!(sheet.is_cyclic(pos("A1")));
        assert!(sheet.is_cyclic(pos("B1")));
        assert!(sheet.is_cyclic(pos("C1")));
        assert!(!sheet.is_cyclic(pos("D1")));
    }

    #[test]
    fn test_diamond_is_not_a_cycle() {
        let mut sheet = Sheet::new();
        sheet.set_cell(pos("D1"), "1").unwrap();
        sheet.set_cell(pos("B1"), "=D1").unwrap();
        sheet.set_cell(pos("C1"), "=D1").unwrap();
        sheet.set_cell(pos("A1"), "=B1+C1").unwrap();
        assert!(!sheet.is_cyclic(pos("A1")));
        assert_eq!(sheet.value(pos("A1")).unwrap(), Some(Value::Number(2.0)));
    }

    #[test]
    fn test_recompute_size_after_clear() {
        let mut sheet = Sheet::new();
        sheet.set_cell(pos("A5"), "x").unwrap();
        sheet.set_cell(pos("E1"), "y").unwrap();
        assert_eq!(sheet.printable_size(), Size::new(5, 5));

        sheet.clear_cell(pos("A5")).unwrap();
        assert_eq!(sheet.printable_size(), Size::new(1, 5));

        sheet.clear_cell(pos("E1")).unwrap();
        assert_eq!(sheet.printable_size(), Size::default());
    }
}
