use std::fmt;
use std::str::FromStr;

use crate::board::{Board, Cell};
use crate::neighbors::{self, Topology};

/// Transition function applied to every cell each generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RuleSet {
    /// B3/S23.
    #[default]
    Conway,
    /// B2/S: every live cell dies, dead cells with exactly two neighbours are born.
    Seeds,
}

impl RuleSet {
    /// Bitmask: bit `i` set means a dead cell with `i` neighbours becomes alive.
    pub fn birth(self) -> u16 {
        match self {
            RuleSet::Conway => 1 << 3,
            RuleSet::Seeds => 1 << 2,
        }
    }

    /// Bitmask: bit `i` set means a live cell with `i` neighbours survives.
    pub fn survival(self) -> u16 {
        match self {
            RuleSet::Conway => (1 << 2) | (1 << 3),
            RuleSet::Seeds => 0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            RuleSet::Conway => "conway",
            RuleSet::Seeds => "seeds",
        }
    }

    /// B/S notation, e.g. `B3/S23`.
    pub fn label(self) -> String {
        let digits = |mask: u16| -> String {
            (0..=8u32)
                .filter(|&i| (mask >> i) & 1 == 1)
                .map(|i| i.to_string())
                .collect()
        };
        format!("B{}/S{}", digits(self.birth()), digits(self.survival()))
    }

    /// Next state of a cell given its live neighbour count.
    pub fn next_state(self, current: Cell, live_neighbors: u8) -> Cell {
        let mask = match current {
            Cell::Alive => self.survival(),
            Cell::Dead => self.birth(),
        };
        Cell::from(live_neighbors <= 8 && (mask >> live_neighbors) & 1 == 1)
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.label())
    }
}

impl FromStr for RuleSet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "conway" | "life" => return Ok(RuleSet::Conway),
            "seeds" => return Ok(RuleSet::Seeds),
            _ => {}
        }
        [RuleSet::Conway, RuleSet::Seeds]
            .into_iter()
            .find(|r| r.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown rule set '{s}'"))
    }
}

/// Free-function form of [`RuleSet::next_state`].
pub fn next_state(current: Cell, live_neighbors: u8, rule_set: RuleSet) -> Cell {
    rule_set.next_state(current, live_neighbors)
}

/// The generation after `board`. Every cell is computed from `board` alone.
pub fn next_generation(board: &Board, topology: Topology, rule_set: RuleSet) -> Board {
    Board::from_fn(board.rows(), board.cols(), |r, c| {
        let n = neighbors::count(board, r, c, topology);
        rule_set.next_state(board.at(r, c), n)
    })
}
