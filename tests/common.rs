//! Common test utilities for the threes test suite.
//!
//! Random board generation and a literal, row-at-a-time model of the left
//! slide used as an oracle for the engine.

#![allow(dead_code)]

use rand::{Rng, rngs::StdRng};
use threes_td::threes::{Board, CELLS, Rank, Reward, SIDE, tile_score};

/// Random board with roughly `fill` of its cells occupied by ranks 1..=max_rank.
pub fn random_board(rng: &mut StdRng, max_rank: Rank, fill: f64) -> Board {
    let mut cells = [0; CELLS];
    for cell in cells.iter_mut() {
        if rng.random_bool(fill) {
            *cell = rng.random_range(1..=max_rank);
        }
    }
    Board::from_cells(cells)
}

/// Left slide of one row, written out rule by rule.
pub fn model_slide_row(row: [Rank; SIDE]) -> ([Rank; SIDE], Reward) {
    let mut out = row;
    let mut reward = 0;
    for i in 0..SIDE - 1 {
        let a = out[i];
        let b = out[i + 1];
        let merged = match (a, b) {
            (0, _) => {
                out[i] = b;
                out[i + 1] = 0;
                continue;
            }
            (1, 2) | (2, 1) => 3,
            (x, y) if x >= 3 && x == y => x + 1,
            _ => continue,
        };
        out[i] = merged;
        out[i + 1] = 0;
        reward += tile_score(merged);
    }
    (out, reward)
}

/// Left slide of a whole board using [`model_slide_row`]; `None` if nothing moves.
pub fn model_slide_left(board: &Board) -> Option<([Rank; CELLS], Reward)> {
    let mut cells = *board.cells();
    let mut reward = 0;
    for row in cells.chunks_exact_mut(SIDE) {
        let (slid, gained) = model_slide_row([row[0], row[1], row[2], row[3]]);
        row.copy_from_slice(&slid);
        reward += gained;
    }
    if &cells == board.cells() {
        None
    } else {
        Some((cells, reward))
    }
}

/// Sum of face values of every tile on the board
pub fn face_value(board: &Board) -> Reward {
    board.cells().iter().map(|&rank| tile_score(rank)).sum()
}
