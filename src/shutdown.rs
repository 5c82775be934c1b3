use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Cancellation flag a background loop sleeps on.
#[derive(Clone, Default)]
pub struct StopSignal {
    pair: Arc<(Mutex<bool>, Condvar)>,
}

impl StopSignal {
    pub fn new() -> StopSignal {
        StopSignal::default()
    }

    fn lock(&self) -> MutexGuard<'_, bool> {
        let (lock, _) = &*self.pair;
        lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn stop(&self) {
        let (_, cvar) = &*self.pair;
        *self.lock() = true;
        cvar.notify_all();
    }

    pub fn is_stopped(&self) -> bool {
        *self.lock()
    }

    /// Sleeps for `timeout` or until `stop` is called, whichever comes first.
    /// Returns true when stopped.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let (_, cvar) = &*self.pair;
        let stopped = self.lock();
        let (stopped, _) = cvar
            .wait_timeout_while(stopped, timeout, |stopped| !*stopped)
            .unwrap_or_else(PoisonError::into_inner);
        *stopped
    }
}
