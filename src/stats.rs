use std::collections::VecDeque;

/// Maximum number of population samples retained.
pub const MAX_HISTORY: usize = 512;

/// Population at a given generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatsSample {
    pub generation: u64,
    pub population: u64,
    pub density: f64,
}

/// Bounded population history, one sample per generation.
#[derive(Debug, Clone)]
pub struct Stats {
    history: VecDeque<StatsSample>,
    total_cells: u64,
}

impl Stats {
    pub fn new(total_cells: u64) -> Self {
        Self {
            history: VecDeque::with_capacity(MAX_HISTORY),
            total_cells,
        }
    }

    /// Record a new population sample, evicting the oldest when full.
    pub fn record(&mut self, generation: u64, population: u64) {
        let density = if self.total_cells > 0 {
            population as f64 / self.total_cells as f64
        } else {
            0.0
        };
        if self.history.len() >= MAX_HISTORY {
            self.history.pop_front();
        }
        self.history.push_back(StatsSample {
            generation,
            population,
            density,
        });
    }

    /// Clear history (e.g. after a reset).
    pub fn clear(&mut self) {
        self.history.clear();
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn latest(&self) -> Option<StatsSample> {
        self.history.back().copied()
    }

    /// Highest population seen in the retained history.
    pub fn peak_population(&self) -> u64 {
        self.history.iter().map(|s| s.population).max().unwrap_or(0)
    }

    pub fn samples(&self) -> impl Iterator<Item = &StatsSample> {
        self.history.iter()
    }

    /// `(generation, population)` pairs for plotting.
    pub fn population_history(&self) -> Vec<[f64; 2]> {
        self.history
            .iter()
            .map(|s| [s.generation as f64, s.population as f64])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_record_and_read() {
        let mut stats = Stats::new(100);
        stats.record(1, 25);
        let latest = stats.latest().unwrap();
        assert_eq!(latest.population, 25);
        assert!((latest.density - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_stats_history() {
        let mut stats = Stats::new(1000);
        for i in 0..10 {
            stats.record(i, i * 100);
        }
        let hist = stats.population_history();
        assert_eq!(hist.len(), 10);
        assert!((hist[0][0] - 0.0).abs() < f64::EPSILON);
        assert!((hist[9][1] - 900.0).abs() < f64::EPSILON);
        assert_eq!(stats.peak_population(), 900);
    }

    #[test]
    fn test_stats_clear() {
        let mut stats = Stats::new(100);
        stats.record(1, 50);
        stats.clear();
        assert!(stats.is_empty());
        assert!(stats.latest().is_none());
    }

    #[test]
    fn test_stats_max_history() {
        let mut stats = Stats::new(100);
        for i in 0..600 {
            stats.record(i, 50);
        }
        assert_eq!(stats.len(), MAX_HISTORY);
        assert_eq!(stats.samples().next().unwrap().generation, 600 - MAX_HISTORY as u64);
    }
}
