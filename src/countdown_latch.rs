use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};

/// One-shot gate that opens after `count` calls to `countdown`.
#[derive(Clone)]
pub struct CountdownLatch {
    pair: Arc<(Mutex<usize>, Condvar)>,
}

impl CountdownLatch {
    pub fn new(count: usize) -> CountdownLatch {
        CountdownLatch {
            pair: Arc::new((Mutex::new(count), Condvar::new())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, usize> {
        let (lock, _) = &*self.pair;
        lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn wait(&self) {
        let (_, cvar) = &*self.pair;
        let count = self.lock();
        let _count = cvar
            .wait_while(count, |count| *count > 0)
            .unwrap_or_else(PoisonError::into_inner);
    }

    /// Extra calls after the latch has opened are ignored.
    pub fn countdown(&self) {
        let (_, cvar) = &*self.pair;
        let mut count = self.lock();
        if *count == 0 {
            return;
        }
        *count -= 1;
        if *count == 0 {
            cvar.notify_all();
        }
    }

    pub fn count(&self) -> usize {
        *self.lock()
    }
}
