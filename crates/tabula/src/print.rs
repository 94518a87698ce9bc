//! Tab-separated dumps of the printable area

use std::io::{self, Write};

use crate::cell::Cell;
use crate::sheet::Sheet;
use tabula_core::Position;

impl Sheet {
    /// Write every cell's value, one line per row, fields separated by tabs
    ///
    /// Missing and empty cells produce empty fields. An empty cell still
    /// reads as `0` through [`CellView::value`](crate::CellView::value); only
    /// the printout leaves it blank.
    pub fn print_values<W: Write>(&self, output: &mut W) -> io::Result<()> {
        self.print_with(output, |cell| {
            if cell.is_empty() {
                String::new()
            } else {
                cell.value(self).to_string()
            }
        })
    }

    /// Write every cell's editable text, laid out like [`Sheet::print_values`]
    pub fn print_texts<W: Write>(&self, output: &mut W) -> io::Result<()> {
        self.print_with(output, Cell::text)
    }

    fn print_with<W, F>(&self, output: &mut W, render: F) -> io::Result<()>
    where
        W: Write,
        F: Fn(&Cell) -> String,
    {
        let size = self.printable_size();
        for row in 0..size.rows {
            for col in 0..size.cols {
                if col > 0 {
                    output.write_all(b"\t")?;
                }
                if let Some(cell) = self.cell_at(Position::new(row, col)) {
                    output.write_all(render(cell).as_bytes())?;
                }
            }
            output.write_all(b"\n")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tabula_core::Value;

    fn render(print: impl Fn(&Sheet, &mut Vec<u8>) -> io::Result<()>, sheet: &Sheet) -> String {
        let mut out = Vec::new();
        print(sheet, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_print_empty_sheet() {
        let sheet = Sheet::new();
        assert_eq!(render(|s, o| s.print_values(o), &sheet), "");
        assert_eq!(render(|s, o| s.print_texts(o), &sheet), "");
    }

    #[test]
    fn test_print_values_and_texts() {
        let mut sheet = Sheet::new();
        sheet.set_cell("A1".parse().unwrap(), "2").unwrap();
        sheet.set_cell("C1".parse().unwrap(), "'=text").unwrap();
        sheet.set_cell("A2".parse().unwrap(), "=A1*3+B2").unwrap();
        sheet.set_cell("B3".parse().unwrap(), "=1/0").unwrap();

        // B2 was created empty by the formula in A2; it reads as zero but
        // prints blank
        assert_eq!(
            sheet.value("B2".parse().unwrap()).unwrap(),
            Some(Value::Number(0.0))
        );
        assert_eq!(
            render(|s, o| s.print_values(o), &sheet),
            "2\t\t=text\n6\t\t\n\t#DIV/0!\t\n"
        );
        assert_eq!(
            render(|s, o| s.print_texts(o), &sheet),
            "2\t\t'=text\n=A1*3+B2\t\t\n\t=1/0\t\n"
        );
    }
}
