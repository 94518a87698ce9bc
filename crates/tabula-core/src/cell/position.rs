//! Cell position and printable size types

use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_ROWS};
use std::fmt;
use std::str::FromStr;

/// A cell position (e.g., "A1")
///
/// Both coordinates are 0-based. A position can hold any coordinates, but
/// only those inside `[0, MAX_ROWS) x [0, MAX_COLS)` are [valid](Position::is_valid).
/// Ordering is row-major, which gives deterministic iteration over sets of
/// positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Row index (0-based internally, 1-based in display)
    pub row: u32,
    /// Column index (0-based, A=0, B=1, ...)
    pub col: u32,
}

impl Position {
    /// Create a new position
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Check whether the position lies inside the addressable sheet
    pub fn is_valid(&self) -> bool {
        self.row < MAX_ROWS && self.col < MAX_COLS
    }

    /// Parse a position from A1-style notation
    ///
    /// # Examples
    /// ```
    /// use tabula_core::Position;
    ///
    /// let pos = Position::parse("A1").unwrap();
    /// assert_eq!(pos.row, 0);
    /// assert_eq!(pos.col, 0);
    ///
    /// let pos = Position::parse("ab12").unwrap();
    /// assert_eq!(pos.row, 11);
    /// assert_eq!(pos.col, 27);
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let pos = Self::parse_unchecked(s)?;
        if !pos.is_valid() {
            return Err(Error::InvalidAddress(format!("'{}' is out of range", s)));
        }
        Ok(pos)
    }

    /// Parse A1 notation without checking the sheet bounds.
    ///
    /// Syntax errors still fail; coordinates too large for `u32` saturate so
    /// the result reports itself as invalid.
    pub fn parse_unchecked(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(Error::InvalidAddress("empty address".into()));
        }

        let letters_end = s
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(s.len());

        if letters_end == 0 {
            return Err(Error::InvalidAddress(format!(
                "no column letters in '{}'",
                s
            )));
        }

        let digits = &s[letters_end..];
        if digits.is_empty() {
            return Err(Error::InvalidAddress(format!("no row number in '{}'", s)));
        }
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidAddress(format!(
                "invalid row number in '{}'",
                s
            )));
        }

        let col = Self::letters_to_column(&s[..letters_end]);

        // Rows are 1-based in A1 notation
        let row = digits
            .parse::<u32>()
            .unwrap_or(u32::MAX)
            .checked_sub(1)
            .ok_or_else(|| {
                Error::InvalidAddress(format!("row number must be >= 1 in '{}'", s))
            })?;

        Ok(Self { row, col })
    }

    /// Convert column index to letters (0 = A, 25 = Z, 26 = AA, etc.)
    pub fn column_to_letters(col: u32) -> String {
        let mut result = String::new();
        let mut n = col as u64 + 1;

        while n > 0 {
            n -= 1;
            let c = ((n % 26) as u8 + b'A') as char;
            result.insert(0, c);
            n /= 26;
        }

        result
    }

    /// Convert column letters to index (A = 0, Z = 25, AA = 26, etc.)
    ///
    /// Saturates at `u32::MAX` for absurdly long inputs.
    fn letters_to_column(letters: &str) -> u32 {
        let mut col: u64 = 0;
        for c in letters.bytes() {
            col = col * 26 + (c.to_ascii_uppercase() - b'A') as u64 + 1;
            if col > u32::MAX as u64 {
                return u32::MAX;
            }
        }
        (col - 1) as u32
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::column_to_letters(self.col), self.row as u64 + 1)
    }
}

impl FromStr for Position {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Extent of the printable area of a sheet
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Size {
    pub rows: u32,
    pub cols: u32,
}

impl Size {
    pub const fn new(rows: u32, cols: u32) -> Self {
        Self { rows, cols }
    }
}
