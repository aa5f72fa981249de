//! A single battlefield position: coordinate, server identity and status bits.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use crate::flags::CellFlags;

/// Server-assigned cell identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(transparent))]
pub struct CellId(pub u64);

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Textual grid address: column letter followed by the 1-based row, e.g. `C4`.
///
/// Server coordinates are matched verbatim, so the value is kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(transparent))]
pub struct Coordinate(String);

impl Coordinate {
    /// Address of (`row`, `col`), both zero-based. Columns past `Z`
    /// continue as `AA`, `AB`, ...
    pub fn from_position(row: usize, col: usize) -> Self {
        let mut text = column_label(col);
        text.push_str(&(row + 1).to_string());
        Coordinate(text)
    }

    /// Zero-based (`row`, `col`) of this address, if it is well formed.
    pub fn position(&self) -> Option<(usize, usize)> {
        let split = self
            .0
            .find(|c: char| !c.is_ascii_uppercase())
            .unwrap_or(self.0.len());
        let (letters, digits) = self.0.split_at(split);
        let col = column_index(letters)?;
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let row: usize = digits.parse().ok()?;
        if row == 0 {
            return None;
        }
        Some((row - 1, col))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Column letters for the zero-based `col`: `A`..`Z`, then `AA`, `AB`, ...
pub fn column_label(col: usize) -> String {
    let mut letters = Vec::new();
    let mut n = col + 1;
    while n > 0 {
        n -= 1;
        letters.push(b'A' + (n % 26) as u8);
        n /= 26;
    }
    letters.iter().rev().map(|&b| b as char).collect()
}

/// Inverse of [`column_label`]; `None` for an empty or overflowing label.
fn column_index(letters: &str) -> Option<usize> {
    if letters.is_empty() {
        return None;
    }
    let mut n: usize = 0;
    for b in letters.bytes() {
        n = n.checked_mul(26)?.checked_add((b - b'A') as usize + 1)?;
    }
    Some(n - 1)
}

impl From<&str> for Coordinate {
    fn from(value: &str) -> Self {
        Coordinate(value.to_string())
    }
}

impl From<String> for Coordinate {
    fn from(value: String) -> Self {
        Coordinate(value)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One grid position. `id` stays `None` until the server confirms the cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    id: Option<CellId>,
    coordinate: Coordinate,
    flags: CellFlags,
}

impl Cell {
    pub fn new(coordinate: Coordinate) -> Self {
        Self {
            id: None,
            coordinate,
            flags: CellFlags::NONE,
        }
    }

    pub fn id(&self) -> Option<CellId> {
        self.id
    }

    /// `true` once the server has assigned an id.
    pub fn is_confirmed(&self) -> bool {
        self.id.is_some()
    }

    pub fn coordinate(&self) -> &Coordinate {
        &self.coordinate
    }

    pub fn flags(&self) -> CellFlags {
        self.flags
    }

    /// `true` when every bit of `mask` is set.
    pub fn has_flag(&self, mask: CellFlags) -> bool {
        self.flags.contains(mask)
    }

    /// Replace the whole bitmask.
    pub fn set_flags(&mut self, flags: CellFlags) -> &mut Self {
        self.flags = flags;
        self
    }

    pub fn set_id(&mut self, id: CellId) -> &mut Self {
        self.id = Some(id);
        self
    }
}
