use std::io;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::blocking_queue::BlockingQueue;
use crate::config::Config;
use crate::cycle::PhaseCycle;
use crate::phase::{AtomicPhase, Phase};
use crate::shutdown::StopSignal;
use crate::worker::Worker;
use crate::Result;

static NEXT_ID: AtomicUsize = AtomicUsize::new(1);

// Clears the running flag when the cycle thread exits, unwinding included.
struct RunningGuard<'a>(&'a AtomicBool);

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

struct Inner {
    id: usize,
    config: Config,
    current_phase: AtomicPhase,
    messages: BlockingQueue<Phase>,
    running: AtomicBool,
}

/// A traffic light that toggles between red and green on a randomized
/// interval.
///
/// `current_phase` is a snapshot of the light right now. Every change is
/// also published on a message queue that `wait_for_green` consumes; the
/// queue, not the snapshot, is what observers of transitions rely on.
/// Clones share the same light.
#[derive(Clone)]
pub struct PhaseController {
    inner: Arc<Inner>,
}

impl Default for PhaseController {
    fn default() -> Self {
        PhaseController::new()
    }
}

impl PhaseController {
    pub fn new() -> PhaseController {
        PhaseController::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> PhaseController {
        PhaseController::with_queue(config, BlockingQueue::new())
    }

    /// Builds a light that publishes into `messages`, which the caller may
    /// keep a handle to.
    pub fn with_queue(config: Config, messages: BlockingQueue<Phase>) -> PhaseController {
        PhaseController {
            inner: Arc::new(Inner {
                id: NEXT_ID.fetch_add(1, Ordering::SeqCst),
                config,
                current_phase: AtomicPhase::new(Phase::Red),
                messages,
                running: AtomicBool::new(false),
            }),
        }
    }

    pub fn id(&self) -> usize {
        self.inner.id
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    pub fn current_phase(&self) -> Phase {
        self.inner.current_phase.load()
    }

    /// Blocks until a green message arrives, dropping red ones on the way.
    pub fn wait_for_green(&self) {
        loop {
            if self.inner.messages.receive() == Phase::Green {
                return;
            }
        }
    }

    /// Like `wait_for_green`, giving up after `timeout`. Returns true if
    /// green was received.
    pub fn wait_for_green_timeout(&self, timeout: Duration) -> bool {
        let deadline = match Instant::now().checked_add(timeout) {
            Some(deadline) => deadline,
            None => {
                self.wait_for_green();
                return true;
            }
        };
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.inner.messages.receive_timeout(remaining) {
                Some(Phase::Green) => return true,
                Some(Phase::Red) => continue,
                None => return false,
            }
        }
    }

    /// Starts cycling through phases on a background thread and returns its
    /// handle right away. A light runs at most one cycle thread at a time.
    pub fn simulate(&self) -> Result<Worker> {
        if self.inner.running.swap(true, Ordering::SeqCst) {
            return Err(format!("traffic light {} is already running", self.inner.id).into());
        }

        let name = format!("traffic-light-{}", self.inner.id);
        let stop = StopSignal::new();
        let light = self.clone();
        let signal = stop.clone();
        let spawned = thread::Builder::new()
            .name(name.clone())
            .spawn(move || {
                let _running = RunningGuard(&light.inner.running);
                light.cycle_through_phases(&signal);
            });

        match spawned {
            Ok(handle) => {
                info!("{} started in phase {}", name, self.current_phase());
                Ok(Worker::new(name, stop, handle))
            }
            Err(err) => {
                self.inner.running.store(false, Ordering::SeqCst);
                Err(io::Error::new(err.kind(), format!("failed to spawn {}: {}", name, err)).into())
            }
        }
    }

    fn cycle_through_phases(&self, stop: &StopSignal) {
        let poll_interval = self.inner.config.poll_interval();
        let mut cycle = PhaseCycle::new(&self.inner.config, Instant::now());
        debug!(
            light = self.inner.id,
            cycle_ms = cycle.cycle_duration().as_millis() as u64,
            "first cycle"
        );

        loop {
            let wait = cycle.remaining(Instant::now()).max(poll_interval);
            if stop.wait_timeout(wait) {
                break;
            }

            if let Some(elapsed) = cycle.poll(Instant::now()) {
                let phase = self.inner.current_phase.toggle();
                self.inner.messages.send(phase);
                debug!(
                    light = self.inner.id,
                    %phase,
                    elapsed_ms = elapsed.as_millis() as u64,
                    next_cycle_ms = cycle.cycle_duration().as_millis() as u64,
                    "phase changed"
                );
            }
        }

        info!("traffic-light-{} stopped in phase {}", self.inner.id, self.current_phase());
    }
}
