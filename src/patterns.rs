//! Seed patterns as `(dx, dy)` offsets from a centre cell, column first.

/// 2×2 still life.
pub fn block() -> Vec<(i32, i32)> {
    vec![(0, 0), (1, 0), (0, 1), (1, 1)]
}

/// Period-2 oscillator, horizontal phase.
pub fn blinker() -> Vec<(i32, i32)> {
    vec![(-1, 0), (0, 0), (1, 0)]
}

/// Glider: small, moving pattern.
pub fn glider() -> Vec<(i32, i32)> {
    vec![(0, -1), (1, 0), (-1, 1), (0, 1), (1, 1)]
}

/// R-pentomino: a methuselah that runs for 1103 generations.
pub fn r_pentomino() -> Vec<(i32, i32)> {
    vec![(0, -1), (1, -1), (-1, 0), (0, 0), (0, 1)]
}

/// Lightweight spaceship (LWSS), travelling east two cells every four generations.
pub fn lwss() -> Vec<(i32, i32)> {
    vec![
        (-1, -2), (0, -2), (1, -2), (2, -2),
        (-2, -1), (2, -1),
        (2, 0),
        (-2, 1), (1, 1),
    ]
}

/// Look up a pattern by name (case-insensitive).
pub fn by_name(name: &str) -> Option<Vec<(i32, i32)>> {
    match name.to_ascii_lowercase().as_str() {
        "block" => Some(block()),
        "blinker" => Some(blinker()),
        "glider" => Some(glider()),
        "r-pentomino" | "r_pentomino" => Some(r_pentomino()),
        "lwss" => Some(lwss()),
        _ => None,
    }
}

pub const NAMES: [&str; 5] = ["block", "blinker", "glider", "r-pentomino", "lwss"];
