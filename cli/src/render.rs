// SPDX-License-Identifier: MIT OR Apache-2.0

//! ASCII board rendering for the CLI.

use crossway_core::{Color, Coord, Game, GameStatus};

/// Largest board the column lettering can label
pub const MAX_RENDER_SIZE: u8 = 25;

/// Render the game board as ASCII art.
///
/// Row 1 is the north edge; column A is the west edge.
pub fn render_board(game: &Game) -> String {
    let size = game.size();
    let mut output = String::new();

    output.push_str(&column_labels(size));

    for row in 0..size {
        // Row number (1-indexed)
        output.push_str(&format!("{:2} ", row + 1));

        for col in 0..size {
            let coord = Coord::new(i32::from(col), i32::from(row));
            let symbol = match game.board().stone_at(coord) {
                Some(color) => stone_symbol(color),
                None => '+',
            };
            output.push_str(&format!(" {}", symbol));
        }

        // Add row number again on the right
        output.push_str(&format!(" {}", row + 1));
        output.push('\n');
    }

    output.push_str(&column_labels(size));
    output
}

/// One-line summary of whose turn it is and whether someone has won
pub fn render_status(game: &Game) -> String {
    let mut line = match game.status() {
        GameStatus::Won(color) => format!("{} {} has connected both edges!", stone_symbol(color), color),
        GameStatus::AwaitingMove(color) => format!("{} {} to move", stone_symbol(color), color),
    };
    line.push_str(&format!(" (moves: {})", game.move_history().len()));
    if game.is_pie_available() {
        line.push_str(" - 'swap' takes over the first stone");
    }
    line
}

/// Which edges each color is trying to join
pub fn goal_legend() -> String {
    format!(
        "{} Black joins west (A) to east; {} White joins north (1) to south",
        stone_symbol(Color::Black),
        stone_symbol(Color::White)
    )
}

fn stone_symbol(color: Color) -> char {
    match color {
        Color::Black => '●',
        Color::White => '○',
    }
}

fn column_labels(size: u8) -> String {
    let mut line = String::from("   ");
    for col in 0..size {
        line.push_str(&format!(" {}", coord_to_column_char(col)));
    }
    line.push('\n');
    line
}

/// Convert a column index to a column character (A-Z, skipping I)
pub fn coord_to_column_char(col: u8) -> char {
    if col < 8 {
        (b'A' + col) as char
    } else {
        (b'A' + col + 1) as char // Skip 'I'
    }
}

/// Convert a column character back to its index
pub fn column_char_to_coord(c: char) -> Option<u8> {
    let c = c.to_ascii_uppercase();
    match c {
        'A'..='H' => Some(c as u8 - b'A'),
        'J'..='Z' => Some(c as u8 - b'A' - 1),
        _ => None,
    }
}
