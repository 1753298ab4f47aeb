//! Plain-text rendering of the board and game status.

use tictactwo_engine::{Cell, Coord, HistoryEntry, Player, Snapshot};

fn symbol(cell: Cell) -> char {
    match cell {
        Cell::Empty => '.',
        Cell::Occupied(Player::X) => 'X',
        Cell::Occupied(Player::O) => 'O',
    }
}

/// Draws the board with the window cells bracketed.
pub fn render_board(snapshot: &Snapshot) -> String {
    let board = snapshot.board();
    let window = snapshot.window();
    let selected = snapshot.turn().selected();
    let (width, height) = board.dimensions();

    let mut out = String::from("   ");
    for col in 0..width {
        out.push_str(&format!(" {} ", col % 10));
    }
    out.push('\n');

    for row in 0..height {
        out.push_str(&format!("{:>2} ", row));
        for col in 0..width {
            let at = Coord::new(row, col);
            let cell = symbol(board.at(at).unwrap_or_default());
            let (open, close) = if selected == Some(at) {
                ('<', '>')
            } else if window.contains_coord(at) {
                ('[', ']')
            } else {
                (' ', ' ')
            };
            out.push(open);
            out.push(cell);
            out.push(close);
        }
        out.push('\n');
    }
    out
}

/// One-line status: mover, pieces, phase and clock.
pub fn render_status(snapshot: &Snapshot, clock_remaining: u32) -> String {
    if let Some(winner) = snapshot.turn().winner() {
        return format!("{} wins!", winner);
    }
    let phase = if snapshot.relocation_unlocked() {
        "move pieces or grid unlocked"
    } else {
        "placement only"
    };
    format!(
        "{} to move | pieces X:{} O:{} | {} | clock {}",
        snapshot.current_player(),
        snapshot.pieces_left(Player::X),
        snapshot.pieces_left(Player::O),
        phase,
        clock_remaining
    )
}

/// Describes the most recent move.
pub fn render_last_move(entry: &HistoryEntry) -> String {
    format!("Last: {} [{}]", entry.applied, entry.source)
}

/// Full frame: last move, board and status.
pub fn render(snapshot: &Snapshot, clock_remaining: u32, last: Option<&HistoryEntry>) -> String {
    let mut out = String::new();
    if let Some(entry) = last {
        out.push_str(&render_last_move(entry));
        out.push('\n');
    }
    out.push_str(&render_board(snapshot));
    out.push_str(&render_status(snapshot, clock_remaining));
    out
}

/// Command summary shown by `help`.
pub const HELP: &str = "\
Commands:
  p <row> <col>              place a piece
  m <row> <col> <row> <col>  move a piece
  s <row> <col>              select a piece to move
  t <row> <col>              move the selected piece here
  c                          clear the selection
  g <direction>              shift the grid (up, down, left, right, up-left, ...)
  r                          restart the game
  q                          quit";
