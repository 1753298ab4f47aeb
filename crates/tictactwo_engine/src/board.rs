//! Board storage and window geometry.

use crate::error::BoardError;
use crate::types::{Cell, Coord, Direction, Player};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Rectangular grid of cells, stored row-major.
///
/// The board is created once per game and never resized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Creates an empty board `width` columns wide and `height` rows tall.
    #[instrument]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
        }
    }

    /// Returns `(width, height)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Returns true if `(row, col)` lies on the board.
    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width
    }

    fn index(&self, row: usize, col: usize) -> Result<usize, BoardError> {
        if self.in_bounds(row, col) {
            Ok(row * self.width + col)
        } else {
            Err(BoardError { row, col })
        }
    }

    /// Gets the cell at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Result<Cell, BoardError> {
        Ok(self.cells[self.index(row, col)?])
    }

    /// Sets the cell at `(row, col)`.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) -> Result<(), BoardError> {
        let idx = self.index(row, col)?;
        self.cells[idx] = cell;
        Ok(())
    }

    /// Gets the cell at `coord`, or `None` off the board.
    pub fn at(&self, coord: Coord) -> Option<Cell> {
        self.get(coord.row, coord.col).ok()
    }

    /// Returns an independent copy for simulation.
    pub fn clone_snapshot(&self) -> Board {
        self.clone()
    }

    /// Counts `player`'s pieces on the whole board.
    pub fn count(&self, player: Player) -> usize {
        self.cells.iter().filter(|c| c.is(player)).count()
    }

    /// Iterates over every coordinate in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.height).flat_map(move |row| (0..self.width).map(move |col| Coord::new(row, col)))
    }
}

/// The movable sub-rectangle in which lines count.
///
/// The window remembers the board dimensions so it can refuse any shift
/// that would leave the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Window {
    top: usize,
    left: usize,
    width: usize,
    height: usize,
    board_width: usize,
    board_height: usize,
}

impl Window {
    /// Places a `width`×`height` window with its top-left corner at `origin`.
    ///
    /// Returns `None` if the window does not fit on the board.
    pub fn new(
        origin: Coord,
        width: usize,
        height: usize,
        board_width: usize,
        board_height: usize,
    ) -> Option<Self> {
        let fits = origin.col + width <= board_width && origin.row + height <= board_height;
        fits.then_some(Self {
            top: origin.row,
            left: origin.col,
            width,
            height,
            board_width,
            board_height,
        })
    }

    /// Centres a window on the board (rounding towards the top-left).
    pub fn centered(width: usize, height: usize, board_width: usize, board_height: usize) -> Option<Self> {
        let origin = Coord::new(
            board_height.checked_sub(height)? / 2,
            board_width.checked_sub(width)? / 2,
        );
        Self::new(origin, width, height, board_width, board_height)
    }

    /// Top-left corner.
    pub fn origin(&self) -> Coord {
        Coord::new(self.top, self.left)
    }

    /// Returns `(width, height)` of the window.
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// First row inside the window.
    pub fn top(&self) -> usize {
        self.top
    }

    /// First column inside the window.
    pub fn left(&self) -> usize {
        self.left
    }

    /// First row below the window.
    pub fn bottom(&self) -> usize {
        self.top + self.height
    }

    /// First column right of the window.
    pub fn right(&self) -> usize {
        self.left + self.width
    }

    /// Returns true iff `(row, col)` lies inside the window.
    pub fn contains(&self, row: usize, col: usize) -> bool {
        (self.top..self.bottom()).contains(&row) && (self.left..self.right()).contains(&col)
    }

    /// Returns true iff `coord` lies inside the window.
    pub fn contains_coord(&self, coord: Coord) -> bool {
        self.contains(coord.row, coord.col)
    }

    /// Returns true if the window lies entirely on its board.
    pub fn within_board(&self) -> bool {
        self.right() <= self.board_width && self.bottom() <= self.board_height
    }

    /// Returns the window translated by `(d_row, d_col)` if it stays on the board.
    pub fn translated(&self, d_row: isize, d_col: isize) -> Option<Window> {
        let origin = self.origin().offset(d_row, d_col)?;
        Window::new(origin, self.width, self.height, self.board_width, self.board_height)
    }

    /// Returns the window moved one step in `direction` if it stays on the board.
    pub fn shifted(&self, direction: Direction) -> Option<Window> {
        let (d_row, d_col) = direction.delta();
        self.translated(d_row, d_col)
    }

    /// Moves the window by `(d_row, d_col)`.
    ///
    /// Returns false and leaves the geometry untouched if the translated
    /// rectangle would leave the board.
    #[instrument(skip(self), fields(origin = %self.origin()))]
    pub fn shift(&mut self, d_row: isize, d_col: isize) -> bool {
        match self.translated(d_row, d_col) {
            Some(moved) => {
                *self = moved;
                true
            }
            None => {
                debug!("Shift would leave the board");
                false
            }
        }
    }

    /// Iterates over the coordinates inside the window in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        (self.top..self.bottom())
            .flat_map(move |row| (self.left..self.right()).map(move |col| Coord::new(row, col)))
    }

    /// Counts `player`'s pieces inside the window.
    pub fn count(&self, board: &Board, player: Player) -> usize {
        self.coords()
            .filter(|c| board.at(*c).is_some_and(|cell| cell.is(player)))
            .count()
    }

    /// Empty cells inside the window, in row-major order.
    pub fn empty_cells(&self, board: &Board) -> Vec<Coord> {
        self.coords()
            .filter(|c| board.at(*c).is_some_and(Cell::is_empty))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set_bounds() {
        let mut board = Board::new(5, 4);
        assert_eq!(board.dimensions(), (5, 4));
        board.set(3, 4, Cell::Occupied(Player::X)).unwrap();
        assert_eq!(board.get(3, 4), Ok(Cell::Occupied(Player::X)));
        assert_eq!(board.get(4, 0), Err(BoardError { row: 4, col: 0 }));
        assert_eq!(
            board.set(0, 5, Cell::Occupied(Player::O)),
            Err(BoardError { row: 0, col: 5 })
        );
    }

    #[test]
    fn test_clone_snapshot_is_independent() {
        let board = Board::new(3, 3);
        let mut copy = board.clone_snapshot();
        copy.set(1, 1, Cell::Occupied(Player::O)).unwrap();
        assert_eq!(board.get(1, 1), Ok(Cell::Empty));
    }

    #[test]
    fn test_centered_window() {
        let window = Window::centered(3, 3, 5, 5).unwrap();
        assert_eq!(window.origin(), Coord::new(1, 1));
        assert!(window.contains(1, 1));
        assert!(window.contains(3, 3));
        assert!(!window.contains(0, 2));
        assert!(!window.contains(2, 4));
    }

    #[test]
    fn test_window_larger_than_board_rejected() {
        assert!(Window::centered(4, 3, 3, 3).is_none());
        assert!(Window::new(Coord::new(3, 0), 3, 3, 5, 5).is_none());
    }

    #[test]
    fn test_shift_stays_on_board() {
        let mut window = Window::new(Coord::new(0, 0), 3, 3, 5, 5).unwrap();
        assert!(!window.shift(0, -1));
        assert_eq!(window.origin(), Coord::new(0, 0));
        assert!(window.shift(0, 1));
        assert_eq!(window.origin(), Coord::new(0, 1));
        assert!(window.shift(1, 1));
        assert!(!window.shift(0, 1));
        assert_eq!(window.origin(), Coord::new(1, 2));
        assert!(window.within_board());
    }

    #[test]
    fn test_window_counts_and_empty_cells() {
        let mut board = Board::new(5, 5);
        board.set(0, 0, Cell::Occupied(Player::X)).unwrap();
        board.set(1, 1, Cell::Occupied(Player::X)).unwrap();
        board.set(2, 2, Cell::Occupied(Player::O)).unwrap();
        let window = Window::centered(3, 3, 5, 5).unwrap();
        assert_eq!(window.count(&board, Player::X), 1);
        assert_eq!(window.count(&board, Player::O), 1);
        assert_eq!(window.empty_cells(&board).len(), 7);
        assert_eq!(window.empty_cells(&board)[0], Coord::new(1, 2));
    }
}
