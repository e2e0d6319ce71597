//! Game of Life engine: a fixed-size board advanced one generation at a
//! time under Conway (B3/S23) or Seeds (B2/S) rules, with bounded or
//! toroidal edges.
//!
//! [`Session`] holds the simulation state and its operations.
//! [`SessionHandle`] runs a session on a background ticker and publishes
//! [`Snapshot`]s for renderers.

pub mod board;
pub mod config;
pub mod error;
pub mod neighbors;
pub mod patterns;
pub mod rules;
pub mod session;
pub mod stats;
pub mod ticker;

pub use board::{Board, Cell, Seeding};
pub use config::SessionConfig;
pub use error::{Action, Error, Result};
pub use neighbors::{count_live_neighbors, Topology};
pub use rules::{next_generation, next_state, RuleSet};
pub use session::{RunState, Session, Snapshot};
pub use ticker::SessionHandle;
