use std::time::Duration;

use crate::board::Seeding;
use crate::neighbors::Topology;
use crate::rules::RuleSet;

/// Settings for a new simulation session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub rows: usize,
    pub cols: usize,
    /// Initial fill; the board produced here is what `reset` restores.
    pub seeding: Seeding,
    pub topology: Topology,
    pub rule_set: RuleSet,
    /// Auto-advance period while running.
    pub tick_interval: Duration,
    /// RNG seed for reproducible sessions; `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            // 900px canvas with 20px cells.
            rows: 45,
            cols: 45,
            seeding: Seeding::Random,
            topology: Topology::Bounded,
            rule_set: RuleSet::Conway,
            tick_interval: Duration::from_millis(100),
            seed: None,
        }
    }
}
