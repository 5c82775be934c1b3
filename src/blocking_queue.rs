use std::collections::VecDeque;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Unbounded handoff buffer shared between one producer and any number of
/// consumers.
///
/// Elements are removed from the same end they are inserted at, so a
/// consumer always gets the most recent message first. Every element is
/// handed to exactly one `receive` call.
pub struct BlockingQueue<T> {
    pair: Arc<(Mutex<VecDeque<T>>, Condvar)>,
}

impl<T> Clone for BlockingQueue<T> {
    fn clone(&self) -> Self {
        BlockingQueue {
            pair: self.pair.clone(),
        }
    }
}

impl<T> Default for BlockingQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> BlockingQueue<T> {
    pub fn new() -> Self {
        BlockingQueue {
            pair: Arc::new((Mutex::new(VecDeque::new()), Condvar::new())),
        }
    }

    // Every critical section is a single push or pop, a poisoned lock still
    // guards a consistent sequence.
    fn lock(&self) -> MutexGuard<'_, VecDeque<T>> {
        let (lock, _) = &*self.pair;
        lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Appends `t` and wakes one blocked receiver. Never blocks.
    pub fn send(&self, t: T) {
        let (_, cvar) = &*self.pair;
        let mut queue = self.lock();
        queue.push_back(t);
        drop(queue);
        cvar.notify_one();
    }

    /// Blocks until an element is available and removes the newest one.
    pub fn receive(&self) -> T {
        let (_, cvar) = &*self.pair;
        let mut queue = self.lock();
        loop {
            if let Some(back) = queue.pop_back() {
                return back;
            }
            queue = cvar.wait(queue).unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Like `receive`, but gives up once `timeout` has passed.
    pub fn receive_timeout(&self, timeout: Duration) -> Option<T> {
        let (_, cvar) = &*self.pair;
        let queue = self.lock();
        let (mut queue, _) = cvar
            .wait_timeout_while(queue, timeout, |queue| queue.is_empty())
            .unwrap_or_else(PoisonError::into_inner);
        queue.pop_back()
    }

    pub fn try_receive(&self) -> Option<T> {
        self.lock().pop_back()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
