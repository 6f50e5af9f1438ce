//! Core domain types for tic-tac-toe.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// Mark placed on the board by one of the two parties.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumIter,
)]
pub enum Mark {
    /// Mark X (always moves first).
    X,
    /// Mark O.
    O,
}

impl Mark {
    /// Returns the other mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

impl FromStr for Mark {
    type Err = CellParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "X" | "x" => Ok(Mark::X),
            "O" | "o" => Ok(Mark::O),
            other => Err(CellParseError::new(other)),
        }
    }
}

/// A cell on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// Empty cell.
    #[default]
    Empty,
    /// Cell occupied by a mark.
    Occupied(Mark),
}

impl Cell {
    /// Returns the mark in this cell, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(mark) => Some(mark),
        }
    }

    /// Checks if the cell is empty.
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

impl From<Mark> for Cell {
    fn from(mark: Mark) -> Self {
        Cell::Occupied(mark)
    }
}

impl FromStr for Cell {
    type Err = CellParseError;

    /// Accepts `X`, `O`, or one of `""`, `-`, `.`, `empty` for an empty cell.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed == "-" || trimmed == "." || trimmed.eq_ignore_ascii_case("empty") {
            return Ok(Cell::Empty);
        }
        trimmed.parse::<Mark>().map(Cell::Occupied)
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Empty => write!(f, " "),
            Cell::Occupied(mark) => write!(f, "{}", mark),
        }
    }
}

/// Text that could not be read as a cell or mark.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Unrecognized cell value '{}'", input)]
pub struct CellParseError {
    /// The rejected input.
    pub input: String,
}

impl CellParseError {
    fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }
}

/// Side length of the board.
pub const SIZE: u8 = 3;

/// A 1-based (row, column) address on the board.
///
/// Serialized as a `[row, col]` pair; deserialization rejects anything off
/// the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "(u8, u8)", into = "(u8, u8)")]
pub struct Coord {
    row: u8,
    col: u8,
}

impl Coord {
    /// Creates a coordinate, rejecting anything outside 1..=3.
    ///
    /// # Errors
    ///
    /// Returns [`CoordError`] if either component is out of range.
    pub fn new(row: u8, col: u8) -> Result<Self, CoordError> {
        if (1..=SIZE).contains(&row) && (1..=SIZE).contains(&col) {
            Ok(Self { row, col })
        } else {
            Err(CoordError { row, col })
        }
    }

    pub(crate) const fn at(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Row, 1-based.
    pub fn row(self) -> u8 {
        self.row
    }

    /// Column, 1-based.
    pub fn col(self) -> u8 {
        self.col
    }

    /// Row-major index (0-8).
    pub fn index(self) -> usize {
        usize::from((self.row - 1) * SIZE + (self.col - 1))
    }

    /// Checks whether this is one of the four corners.
    pub fn is_corner(self) -> bool {
        (self.row == 1 || self.row == SIZE) && (self.col == 1 || self.col == SIZE)
    }

    /// The center cell.
    pub const CENTER: Coord = Coord::at(2, 2);

    /// All 9 coordinates in row-major order.
    pub const ALL: [Coord; 9] = [
        Coord::at(1, 1),
        Coord::at(1, 2),
        Coord::at(1, 3),
        Coord::at(2, 1),
        Coord::at(2, 2),
        Coord::at(2, 3),
        Coord::at(3, 1),
        Coord::at(3, 2),
        Coord::at(3, 3),
    ];
}

impl TryFrom<(u8, u8)> for Coord {
    type Error = CoordError;

    fn try_from((row, col): (u8, u8)) -> Result<Self, Self::Error> {
        Coord::new(row, col)
    }
}

impl From<Coord> for (u8, u8) {
    fn from(coord: Coord) -> Self {
        (coord.row, coord.col)
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.row, self.col)
    }
}

/// Coordinate outside the 3x3 grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("Coordinate ({}, {}) is outside the 3x3 board", row, col)]
pub struct CoordError {
    /// Rejected row.
    pub row: u8,
    /// Rejected column.
    pub col: u8,
}

/// 3x3 grid of cells as rows, top to bottom.
pub type Rows = [[Cell; 3]; 3];

/// 3x3 tic-tac-toe board.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Cells in row-major order (0-8).
    cells: [Cell; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from three rows.
    #[instrument]
    pub fn from_rows(rows: Rows) -> Self {
        let mut board = Self::new();
        for coord in Coord::ALL {
            board.set(coord, rows[usize::from(coord.row - 1)][usize::from(coord.col - 1)]);
        }
        board
    }

    /// Gets the cell at the given coordinate.
    pub fn get(&self, coord: Coord) -> Cell {
        self.cells[coord.index()]
    }

    /// Sets the cell at the given coordinate.
    pub fn set(&mut self, coord: Coord, cell: Cell) {
        self.cells[coord.index()] = cell;
    }

    /// Checks if a cell is empty.
    pub fn is_empty(&self, coord: Coord) -> bool {
        self.get(coord).is_empty()
    }

    /// Number of non-empty cells.
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    /// Returns all cells as a slice.
    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// Copies the board out as three rows.
    pub fn rows(&self) -> Rows {
        let mut rows = [[Cell::Empty; 3]; 3];
        for coord in Coord::ALL {
            rows[usize::from(coord.row - 1)][usize::from(coord.col - 1)] = self.get(coord);
        }
        rows
    }

    /// Formats the board as a human-readable grid.
    ///
    /// Empty cells show their `row-col` key so a player can type it back.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for (i, coord) in Coord::ALL.iter().enumerate() {
            let symbol = match self.get(*coord) {
                Cell::Empty => coord.to_string(),
                Cell::Occupied(mark) => format!(" {} ", mark),
            };
            result.push_str(&symbol);
            if i % 3 < 2 {
                result.push('|');
            } else if i < 8 {
                result.push_str("\n---+---+---\n");
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coord_bounds() {
        assert!(Coord::new(1, 1).is_ok());
        assert!(Coord::new(3, 3).is_ok());
        assert_eq!(Coord::new(0, 1), Err(CoordError { row: 0, col: 1 }));
        assert!(Coord::new(2, 4).is_err());
    }

    #[test]
    fn test_coord_index_is_row_major() {
        for (i, coord) in Coord::ALL.iter().enumerate() {
            assert_eq!(coord.index(), i);
        }
    }

    #[test]
    fn test_coord_serializes_as_pair() {
        let json = serde_json::to_string(&Coord::at(2, 3)).unwrap();
        assert_eq!(json, "[2,3]");
        assert_eq!(serde_json::from_str::<Coord>("[2,3]").unwrap(), Coord::at(2, 3));
    }

    #[test]
    fn test_coord_deserialize_rejects_off_board() {
        assert!(serde_json::from_str::<Coord>("[0,1]").is_err());
        assert!(serde_json::from_str::<Coord>("[9,9]").is_err());
        assert!(serde_json::from_str::<Coord>(r#"{"row":0,"col":1}"#).is_err());
    }

    #[test]
    fn test_coord_display_uses_cell_key() {
        assert_eq!(Coord::at(2, 3).to_string(), "2-3");
    }

    #[test]
    fn test_corners() {
        let corners: Vec<_> = Coord::ALL.iter().filter(|c| c.is_corner()).collect();
        assert_eq!(corners.len(), 4);
        assert!(!Coord::CENTER.is_corner());
    }

    #[test]
    fn test_cell_parsing() {
        assert_eq!("X".parse::<Cell>(), Ok(Cell::Occupied(Mark::X)));
        assert_eq!(" o ".parse::<Cell>(), Ok(Cell::Occupied(Mark::O)));
        assert_eq!("".parse::<Cell>(), Ok(Cell::Empty));
        assert_eq!("-".parse::<Cell>(), Ok(Cell::Empty));
        assert_eq!("Empty".parse::<Cell>(), Ok(Cell::Empty));
        assert!("Z".parse::<Cell>().is_err());
    }

    #[test]
    fn test_rows_round_trip() {
        let x = Cell::Occupied(Mark::X);
        let o = Cell::Occupied(Mark::O);
        let e = Cell::Empty;
        let rows = [[x, o, e], [e, x, e], [o, e, e]];
        let board = Board::from_rows(rows);
        assert_eq!(board.rows(), rows);
        assert_eq!(board.occupied(), 4);
        assert_eq!(board.get(Coord::at(3, 1)), o);
    }

    #[test]
    fn test_display_shows_keys_for_empty_cells() {
        let mut board = Board::new();
        board.set(Coord::CENTER, Cell::Occupied(Mark::X));
        let text = board.display();
        assert!(text.starts_with("1-1|1-2|1-3\n"));
        assert!(text.contains("2-1| X |2-3"));
    }
}
