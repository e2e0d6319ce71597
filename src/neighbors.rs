use std::fmt;
use std::str::FromStr;

use crate::board::Board;
use crate::error::Result;

/// Moore neighbourhood as `(dr, dc)`: orthogonal first, then diagonals.
pub const OFFSETS: [(isize, isize); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

/// Edge handling for neighbour lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Topology {
    /// Off-grid positions are excluded from the count.
    #[default]
    Bounded,
    /// Coordinates wrap modulo the board size.
    Toroidal,
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Topology::Bounded => "bounded",
            Topology::Toroidal => "toroidal",
        })
    }
}

impl FromStr for Topology {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bounded" | "bounds" => Ok(Topology::Bounded),
            "toroidal" | "torus" | "wrap" => Ok(Topology::Toroidal),
            other => Err(format!("unknown topology '{other}'")),
        }
    }
}

/// Live cells among the eight neighbours of `(r, c)`, in `0..=8`.
pub fn count_live_neighbors(board: &Board, r: usize, c: usize, topology: Topology) -> Result<u8> {
    board.get(r, c)?;
    Ok(count(board, r, c, topology))
}

/// Same as [`count_live_neighbors`] for coordinates already known to be valid.
pub(crate) fn count(board: &Board, r: usize, c: usize, topology: Topology) -> u8 {
    let rows = board.rows() as isize;
    let cols = board.cols() as isize;
    let mut alive = 0;
    for (dr, dc) in OFFSETS {
        let nr = r as isize + dr;
        let nc = c as isize + dc;
        let (nr, nc) = match topology {
            Topology::Bounded => {
                if !board.contains(nr, nc) {
                    continue;
                }
                (nr, nc)
            }
            Topology::Toroidal => (nr.rem_euclid(rows), nc.rem_euclid(cols)),
        };
        if board.at(nr as usize, nc as usize).is_alive() {
            alive += 1;
        }
    }
    alive
}
