use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::{Board, Cell};
use crate::config::SessionConfig;
use crate::error::{Action, Error, Result};
use crate::neighbors::Topology;
use crate::rules::{self, RuleSet};
use crate::stats::Stats;

/// Whether the session is auto-advancing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Idle,
    Running,
}

/// Owned, read-only view of a session for renderers.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub board: Board,
    pub generation: u64,
    pub live_cells: usize,
    pub state: RunState,
    pub topology: Topology,
    pub rule_set: RuleSet,
}

/// The simulation controller: current board, configuration, generation
/// counter and run state.
///
/// Edits are rejected while running. Stepping is always allowed.
pub struct Session {
    board: Board,
    /// Board captured at construction, restored by `reset`.
    initial: Board,
    topology: Topology,
    rule_set: RuleSet,
    generation: u64,
    state: RunState,
    rng: StdRng,
    stats: Stats,
}

impl Session {
    pub fn new(config: &SessionConfig) -> Result<Self> {
        let mut rng = make_rng(config.seed);
        let board = Board::create(config.rows, config.cols, config.seeding, &mut rng)?;
        Ok(Self::assemble(board, config, rng))
    }

    /// A session starting from an explicit board. Only the topology, rule
    /// set and seed of `config` are used.
    pub fn from_board(board: Board, config: &SessionConfig) -> Self {
        let rng = make_rng(config.seed);
        Self::assemble(board, config, rng)
    }

    fn assemble(board: Board, config: &SessionConfig, rng: StdRng) -> Self {
        log::info!(
            "New {}x{} session: {} live, {}, {}",
            board.rows(),
            board.cols(),
            board.count_alive(),
            config.topology,
            config.rule_set,
        );
        Self {
            stats: Stats::new(board.total_cells() as u64),
            initial: board.clone(),
            board,
            topology: config.topology,
            rule_set: config.rule_set,
            generation: 0,
            state: RunState::Idle,
            rng,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn live_cell_count(&self) -> usize {
        self.board.count_alive()
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn rule_set(&self) -> RuleSet {
        self.rule_set
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board.clone(),
            generation: self.generation,
            live_cells: self.live_cell_count(),
            state: self.state,
            topology: self.topology,
            rule_set: self.rule_set,
        }
    }

    /// Advance one generation. Returns the new generation number.
    pub fn step(&mut self) -> u64 {
        self.board = rules::next_generation(&self.board, self.topology, self.rule_set);
        self.generation += 1;
        let population = self.live_cell_count() as u64;
        self.stats.record(self.generation, population);
        log::debug!("Generation {}: {} live", self.generation, population);
        self.generation
    }

    /// Scheduler entry point: step only while running.
    pub fn tick(&mut self) -> bool {
        if self.is_running() {
            self.step();
            true
        } else {
            false
        }
    }

    /// Begin auto-advancing. Returns `false` if already running.
    pub fn start(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        self.state = RunState::Running;
        log::info!("Simulation started at generation {}", self.generation);
        true
    }

    /// Stop auto-advancing. Returns `false` if already idle.
    pub fn stop(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.state = RunState::Idle;
        log::info!("Simulation stopped at generation {}", self.generation);
        true
    }

    fn ensure_idle(&self, action: Action) -> Result<()> {
        if self.is_running() {
            log::warn!("Rejected {action} while running");
            return Err(Error::ForbiddenWhileRunning(action));
        }
        Ok(())
    }

    /// Flip one cell. Returns its new state.
    pub fn toggle_cell(&mut self, r: usize, c: usize) -> Result<Cell> {
        self.ensure_idle(Action::Toggle)?;
        let state = self.board.get(r, c)?.toggled();
        self.board = self.board.with_cell(r, c, state)?;
        Ok(state)
    }

    /// Replace the board with a sparse random one: between zero and half of
    /// the cells alive, everything else dead. Returns the live count.
    pub fn randomize_live_cells(&mut self) -> Result<usize> {
        self.ensure_idle(Action::Randomize)?;
        let (rows, cols) = (self.board.rows(), self.board.cols());
        let target = self.rng.gen_range(0..=self.board.total_cells() / 2);

        let mut next = self.board.cleared();
        let mut placed = 0;
        while placed < target {
            let slot = next.slot_mut(self.rng.gen_range(0..rows), self.rng.gen_range(0..cols));
            if !slot.is_alive() {
                *slot = Cell::Alive;
                placed += 1;
            }
        }

        self.board = next;
        self.generation = 0;
        self.stats.clear();
        log::info!("Randomized board with {placed} live cells");
        Ok(placed)
    }

    /// Restore the initial board and zero the generation counter.
    pub fn reset(&mut self) -> Result<()> {
        self.ensure_idle(Action::Reset)?;
        self.board = self.initial.clone();
        self.generation = 0;
        self.stats.clear();
        log::info!("Session reset");
        Ok(())
    }

    /// Clear the board and stamp `pattern` around `center` (board centre if `None`).
    pub fn load_pattern(&mut self, pattern: &[(i32, i32)], center: Option<(usize, usize)>) -> Result<()> {
        self.ensure_idle(Action::Load)?;
        self.board = self.board.cleared().place_pattern(pattern, center)?;
        self.generation = 0;
        self.stats.clear();
        log::info!("Loaded pattern with {} cells", pattern.len());
        Ok(())
    }

    pub fn set_topology(&mut self, topology: Topology) {
        if self.topology != topology {
            log::info!("Topology: {topology}");
        }
        self.topology = topology;
    }

    pub fn set_rule_set(&mut self, rule_set: RuleSet) {
        if self.rule_set != rule_set {
            log::info!("Rules: {rule_set}");
        }
        self.rule_set = rule_set;
    }
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Seeding;
    use crate::patterns;

    fn config() -> SessionConfig {
        SessionConfig {
            rows: 5,
            cols: 5,
            seeding: Seeding::AllDead,
            seed: Some(42),
            ..SessionConfig::default()
        }
    }

    fn session_from(rows: &[&str]) -> Session {
        Session::from_board(Board::from_rows(rows).unwrap(), &config())
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = Session::new(&config()).unwrap();
        assert_eq!(session.state(), RunState::Idle);
        assert_eq!(session.generation(), 0);
        assert_eq!(session.live_cell_count(), 0);
        assert_eq!(session.topology(), Topology::Bounded);
        assert_eq!(session.rule_set(), RuleSet::Conway);
    }

    #[test]
    fn test_new_session_invalid_dimensions() {
        let cfg = SessionConfig {
            rows: 0,
            ..config()
        };
        assert!(matches!(
            Session::new(&cfg),
            Err(Error::InvalidDimensions { rows: 0, cols: 5 })
        ));
    }

    #[test]
    fn test_seeded_sessions_are_reproducible() {
        let cfg = SessionConfig {
            seeding: Seeding::Random,
            ..config()
        };
        let a = Session::new(&cfg).unwrap();
        let b = Session::new(&cfg).unwrap();
        assert_eq!(a.board(), b.board());
    }

    #[test]
    fn test_step_all_dead() {
        for rules in [RuleSet::Conway, RuleSet::Seeds] {
            let mut session = Session::new(&config()).unwrap();
            session.set_rule_set(rules);
            assert_eq!(session.step(), 1);
            assert_eq!(session.live_cell_count(), 0);
            assert_eq!(session.generation(), 1);
        }
    }

    #[test]
    fn test_blinker_period_two() {
        let mut session = session_from(&[".....", ".....", ".###.", ".....", "....."]);
        let start = session.board().clone();
        session.step();
        assert_eq!(
            session.board().to_string(),
            ".....\n..#..\n..#..\n..#..\n.....\n"
        );
        session.step();
        assert_eq!(session.board(), &start);
        assert_eq!(session.generation(), 2);
    }

    #[test]
    fn test_block_is_stable() {
        let mut session = session_from(&["....", ".##.", ".##.", "...."]);
        let start = session.board().clone();
        session.step();
        assert_eq!(session.board(), &start);
    }

    #[test]
    fn test_step_allowed_while_running() {
        let mut session = Session::new(&config()).unwrap();
        session.start();
        session.step();
        assert_eq!(session.generation(), 1);
    }

    #[test]
    fn test_tick_only_when_running() {
        let mut session = Session::new(&config()).unwrap();
        assert!(!session.tick());
        assert_eq!(session.generation(), 0);
        session.start();
        assert!(session.tick());
        assert_eq!(session.generation(), 1);
    }

    #[test]
    fn test_start_stop_idempotent() {
        let mut session = Session::new(&config()).unwrap();
        assert!(!session.stop());
        assert!(session.start());
        assert!(!session.start());
        assert!(session.is_running());
        assert!(session.stop());
        assert!(!session.stop());
        assert_eq!(session.state(), RunState::Idle);
    }

    #[test]
    fn test_toggle_is_own_inverse() {
        let mut session = session_from(&["#..", "...", "..#"]);
        let before = session.board().clone();
        session.step();
        let stepped = session.board().clone();
        assert_eq!(session.toggle_cell(1, 1).unwrap(), Cell::Alive);
        assert_eq!(session.toggle_cell(1, 1).unwrap(), Cell::Dead);
        assert_eq!(session.board(), &stepped);
        assert_eq!(session.generation(), 1);
        assert_ne!(&before, &stepped);
    }

    #[test]
    fn test_toggle_out_of_bounds() {
        let mut session = Session::new(&config()).unwrap();
        assert!(matches!(
            session.toggle_cell(5, 0),
            Err(Error::OutOfBounds { row: 5, col: 0, .. })
        ));
    }

    #[test]
    fn test_edits_forbidden_while_running() {
        let mut session = session_from(&[".....", ".....", ".###.", ".....", "....."]);
        session.step();
        session.start();
        let board = session.board().clone();

        assert_eq!(
            session.toggle_cell(0, 0),
            Err(Error::ForbiddenWhileRunning(Action::Toggle))
        );
        assert_eq!(
            session.randomize_live_cells(),
            Err(Error::ForbiddenWhileRunning(Action::Randomize))
        );
        assert_eq!(
            session.reset(),
            Err(Error::ForbiddenWhileRunning(Action::Reset))
        );
        assert_eq!(
            session.load_pattern(&patterns::block(), None),
            Err(Error::ForbiddenWhileRunning(Action::Load))
        );
        assert_eq!(session.board(), &board);
        assert_eq!(session.generation(), 1);
    }

    #[test]
    fn test_randomize_bounds() {
        let cfg = SessionConfig {
            rows: 10,
            cols: 11,
            ..config()
        };
        let mut session = Session::new(&cfg).unwrap();
        for _ in 0..50 {
            session.step();
            let placed = session.randomize_live_cells().unwrap();
            assert_eq!(session.generation(), 0);
            assert_eq!(session.live_cell_count(), placed);
            assert!(placed <= 110 / 2);
        }
    }

    #[test]
    fn test_randomize_discards_previous_cells() {
        let mut session = session_from(&["#####", "#####", "#####", "#####", "#####"]);
        let placed = session.randomize_live_cells().unwrap();
        assert!(placed <= 12);
        assert_eq!(session.live_cell_count(), placed);
    }

    #[test]
    fn test_reset_restores_initial() {
        let mut session = session_from(&[".....", ".#...", "..##.", ".##..", "....."]);
        let initial = session.board().clone();
        for _ in 0..7 {
            session.step();
        }
        session.toggle_cell(0, 0).unwrap();
        session.set_topology(Topology::Toroidal);
        session.step();
        session.randomize_live_cells().unwrap();
        session.reset().unwrap();
        assert_eq!(session.board(), &initial);
        assert_eq!(session.generation(), 0);
        assert!(session.stats().is_empty());
    }

    #[test]
    fn test_config_changes_apply_on_next_step() {
        // A lone pair dies under Conway but spawns under Seeds.
        let mut session = session_from(&["....", ".##.", "....", "...."]);
        session.set_rule_set(RuleSet::Seeds);
        session.step();
        assert_eq!(session.live_cell_count(), 4);
        session.set_rule_set(RuleSet::Conway);
        session.step();
        assert_eq!(session.rule_set(), RuleSet::Conway);
    }

    #[test]
    fn test_load_pattern() {
        let mut session = session_from(&["#....", ".....", ".....", ".....", "....#"]);
        session.step();
        session.load_pattern(&patterns::blinker(), None).unwrap();
        assert_eq!(session.generation(), 0);
        assert_eq!(session.live_cell_count(), 3);
        assert_eq!(session.board().get(2, 1).unwrap(), Cell::Alive);
        assert!(session.load_pattern(&patterns::lwss(), Some((0, 0))).is_err());
    }

    #[test]
    fn test_stats_follow_steps() {
        let mut session = session_from(&[".....", ".....", ".###.", ".....", "....."]);
        session.step();
        session.step();
        let latest = session.stats().latest().unwrap();
        assert_eq!(latest.generation, 2);
        assert_eq!(latest.population, 3);
        assert_eq!(session.stats().len(), 2);
    }

    #[test]
    fn test_snapshot() {
        let mut session = session_from(&["##", "##"]);
        session.start();
        let snap = session.snapshot();
        assert_eq!(snap.live_cells, 4);
        assert_eq!(snap.state, RunState::Running);
        assert_eq!(&snap.board, session.board());
    }
}
