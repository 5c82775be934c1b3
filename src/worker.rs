use std::thread::JoinHandle;
use tracing::{info, warn};

use crate::shutdown::StopSignal;
use crate::Result;

/// Handle to a background thread started by a traffic object.
pub struct Worker {
    name: String,
    stop: StopSignal,
    handle: JoinHandle<()>,
}

impl Worker {
    pub fn new(name: String, stop: StopSignal, handle: JoinHandle<()>) -> Worker {
        Worker { name, stop, handle }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Asks the thread to leave its loop. Does not wait for it.
    pub fn stop(&self) {
        self.stop.stop();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    pub fn join(self) -> Result<()> {
        match self.handle.join() {
            Ok(()) => {
                info!("{} joined", self.name);
                Ok(())
            }
            Err(_) => {
                warn!("{} panicked", self.name);
                Err(format!("worker {} panicked", self.name).into())
            }
        }
    }
}

/// Owns the background threads of a group of traffic objects and is
/// responsible for tearing them down.
#[derive(Default)]
pub struct Workers {
    workers: Vec<Worker>,
}

impl Workers {
    pub fn new() -> Workers {
        Workers::default()
    }

    pub fn register(&mut self, worker: Worker) {
        info!("registered {}", worker.name());
        self.workers.push(worker);
    }

    pub fn len(&self) -> usize {
        self.workers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }

    pub fn stop_all(&self) {
        for worker in self.workers.iter() {
            worker.stop();
        }
    }

    /// Stops and joins every registered worker. All workers are joined even
    /// if one of them panicked; the first failure is returned.
    pub fn join_all(&mut self) -> Result<()> {
        self.stop_all();
        let mut result = Ok(());
        for worker in self.workers.drain(..) {
            if let Err(err) = worker.join() {
                if result.is_ok() {
                    result = Err(err);
                }
            }
        }
        result
    }
}

impl Drop for Workers {
    fn drop(&mut self) {
        if let Err(err) = self.join_all() {
            warn!(cause = ?err, "workers dropped with a failed join");
        }
    }
}
