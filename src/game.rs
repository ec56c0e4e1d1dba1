//! Tic-tac-toe board engine.
//!
//! Pure state machine for the 3x3 grid: move validation, turn
//! alternation, win/draw detection and reset. Knows nothing about
//! rooms or connections; the room layer wraps its view with
//! per-recipient fields.

use crate::protocol::GameView;

/// State of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Blank,
    Cross,
    Nought,
}

impl Cell {
    /// Wire encoding: -1 blank, 0 cross, 1 nought.
    pub fn code(self) -> i8 {
        match self {
            Cell::Blank => -1,
            Cell::Cross => 0,
            Cell::Nought => 1,
        }
    }
}

/// Result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    CrossWins,
    NoughtWins,
    Draw,
}

/// The 8 winning lines: 3 rows, 3 columns, 2 diagonals.
const LINES: [[(usize, usize); 3]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

/// One game of tic-tac-toe. Lives for the lifetime of its room and is
/// reset in place rather than recreated.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Board {
    cells: [[Cell; 3]; 3],
    elapsed_turns: u32,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cross moves on even turns, nought on odd turns.
    pub fn current_player(&self) -> Cell {
        if self.elapsed_turns % 2 == 0 {
            Cell::Cross
        } else {
            Cell::Nought
        }
    }

    pub fn elapsed_turns(&self) -> u32 {
        self.elapsed_turns
    }

    /// Place the current player's mark at (row, col).
    ///
    /// Returns false without touching the board if the game is over,
    /// the coordinates are out of range, or the cell is occupied.
    pub fn put(&mut self, row: i32, col: i32) -> bool {
        if self.is_ended() {
            return false;
        }
        if !(0..3).contains(&row) || !(0..3).contains(&col) {
            return false;
        }
        let (row, col) = (row as usize, col as usize);
        if self.cells[row][col] != Cell::Blank {
            return false;
        }

        self.cells[row][col] = self.current_player();
        self.elapsed_turns += 1;
        true
    }

    /// Clear the grid and the turn counter. Always succeeds.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn line(&self, line: &[(usize, usize); 3]) -> [Cell; 3] {
        line.map(|(row, col)| self.cells[row][col])
    }

    /// Recomputed from the cells on every call, never cached.
    pub fn is_ended(&self) -> bool {
        if self.result_of_lines().is_some() {
            return true;
        }
        self.cells
            .iter()
            .all(|row| row.iter().all(|&cell| cell != Cell::Blank))
    }

    fn result_of_lines(&self) -> Option<Outcome> {
        for target in &LINES {
            match self.line(target) {
                [Cell::Cross, Cell::Cross, Cell::Cross] => return Some(Outcome::CrossWins),
                [Cell::Nought, Cell::Nought, Cell::Nought] => return Some(Outcome::NoughtWins),
                _ => {}
            }
        }
        None
    }

    /// None while the game is still running.
    pub fn result(&self) -> Option<Outcome> {
        if !self.is_ended() {
            return None;
        }
        Some(self.result_of_lines().unwrap_or(Outcome::Draw))
    }

    /// Snapshot in the wire shape shared by both occupants.
    pub fn view(&self) -> GameView {
        GameView {
            kind: "game".to_string(),
            board: self.cells.map(|row| row.map(Cell::code)),
            elapsed_turn: self.elapsed_turns,
            current_turn: if self.current_player() == Cell::Cross {
                0
            } else {
                1
            },
            is_ended: self.is_ended(),
            is_my_turn: None,
            result: None,
        }
    }
}
