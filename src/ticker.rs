use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::board::Cell;
use crate::error::Result;
use crate::neighbors::Topology;
use crate::rules::RuleSet;
use crate::session::{RunState, Session, Snapshot};

/// Longest single sleep, so shutdown is noticed promptly with long intervals.
const MAX_NAP: Duration = Duration::from_millis(20);

/// State shared between the handle and the ticker thread.
struct Shared {
    session: Mutex<Session>,
    subscribers: Mutex<Vec<Sender<Snapshot>>>,
    shutdown: AtomicBool,
}

impl Shared {
    fn session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Send a snapshot to every live subscriber, dropping closed channels.
    fn publish(&self, session: &Session) {
        let mut subscribers = self.subscribers.lock().unwrap_or_else(PoisonError::into_inner);
        if subscribers.is_empty() {
            return;
        }
        let snapshot = session.snapshot();
        subscribers.retain(|tx| tx.send(snapshot.clone()).is_ok());
    }
}

/// Thread-safe handle to a session that auto-advances on a fixed cadence
/// while running.
///
/// Every operation, including the timer tick, takes the same lock, so at
/// most one step runs at a time.
pub struct SessionHandle {
    shared: Arc<Shared>,
    interval: Duration,
    worker: Option<JoinHandle<()>>,
}

impl SessionHandle {
    /// Move `session` behind the handle and start the ticker thread.
    pub fn spawn(session: Session, interval: Duration) -> Self {
        let shared = Arc::new(Shared {
            session: Mutex::new(session),
            subscribers: Mutex::new(Vec::new()),
            shutdown: AtomicBool::new(false),
        });
        let worker = {
            let shared = Arc::clone(&shared);
            thread::spawn(move || run_ticker(&shared, interval))
        };
        log::debug!("Ticker spawned with {interval:?} interval");
        Self {
            shared,
            interval,
            worker: Some(worker),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Receive a snapshot after every change to the session.
    pub fn subscribe(&self) -> Receiver<Snapshot> {
        let (tx, rx) = mpsc::channel();
        self.shared
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(tx);
        rx
    }

    /// Run `f` against the locked session and publish the result.
    fn mutate<T>(&self, f: impl FnOnce(&mut Session) -> T) -> T {
        let mut session = self.shared.session();
        let out = f(&mut *session);
        self.shared.publish(&session);
        out
    }

    fn mutate_checked<T>(&self, f: impl FnOnce(&mut Session) -> Result<T>) -> Result<T> {
        let mut session = self.shared.session();
        let out = f(&mut *session)?;
        self.shared.publish(&session);
        Ok(out)
    }

    pub fn step(&self) -> u64 {
        self.mutate(Session::step)
    }

    pub fn start(&self) -> bool {
        self.mutate(Session::start)
    }

    pub fn stop(&self) -> bool {
        self.mutate(Session::stop)
    }

    pub fn toggle_cell(&self, r: usize, c: usize) -> Result<Cell> {
        self.mutate_checked(|s| s.toggle_cell(r, c))
    }

    pub fn randomize_live_cells(&self) -> Result<usize> {
        self.mutate_checked(Session::randomize_live_cells)
    }

    pub fn reset(&self) -> Result<()> {
        self.mutate_checked(Session::reset)
    }

    pub fn load_pattern(&self, pattern: &[(i32, i32)], center: Option<(usize, usize)>) -> Result<()> {
        self.mutate_checked(|s| s.load_pattern(pattern, center))
    }

    pub fn set_topology(&self, topology: Topology) {
        self.mutate(|s| s.set_topology(topology))
    }

    pub fn set_rule_set(&self, rule_set: RuleSet) {
        self.mutate(|s| s.set_rule_set(rule_set))
    }

    pub fn snapshot(&self) -> Snapshot {
        self.shared.session().snapshot()
    }

    pub fn generation(&self) -> u64 {
        self.shared.session().generation()
    }

    pub fn live_cell_count(&self) -> usize {
        self.shared.session().live_cell_count()
    }

    pub fn state(&self) -> RunState {
        self.shared.session().state()
    }

    /// Stop the ticker thread and return the session.
    pub fn shutdown(mut self) -> Session {
        self.join();
        let shared = Arc::clone(&self.shared);
        drop(self);
        match Arc::try_unwrap(shared) {
            Ok(shared) => shared
                .session
                .into_inner()
                .unwrap_or_else(PoisonError::into_inner),
            // The worker has been joined, so this handle held the last reference.
            Err(_) => unreachable!("ticker thread outlived its handle"),
        }
    }

    fn join(&mut self) {
        self.shared.shutdown.store(true, Ordering::Relaxed);
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                log::error!("Ticker thread panicked");
            }
        }
    }
}

impl Drop for SessionHandle {
    fn drop(&mut self) {
        self.join();
    }
}

/// Tick the session every `interval` until shutdown. Deadlines advance by
/// exactly one interval; ticks missed while behind are dropped.
fn run_ticker(shared: &Shared, interval: Duration) {
    let mut next = Instant::now() + interval;
    while !shared.shutdown.load(Ordering::Relaxed) {
        let now = Instant::now();
        if now < next {
            thread::sleep((next - now).min(MAX_NAP));
            continue;
        }

        {
            let mut session = shared.session();
            if session.tick() {
                shared.publish(&session);
            }
        }

        next += interval;
        let now = Instant::now();
        if next <= now {
            let missed = (now - next).as_nanos() / interval.as_nanos().max(1) + 1;
            log::debug!("Ticker behind, dropping {missed} tick(s)");
            next = now + interval;
        }
    }
    log::debug!("Ticker stopped");
}
