use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Phase {
    Red = 0,
    Green = 1,
}

impl Phase {
    pub fn toggle(self) -> Phase {
        match self {
            Phase::Red => Phase::Green,
            Phase::Green => Phase::Red,
        }
    }

    fn from_u8(value: u8) -> Phase {
        if value == Phase::Green as u8 {
            Phase::Green
        } else {
            Phase::Red
        }
    }
}

impl Default for Phase {
    fn default() -> Self {
        Phase::Red
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Red => f.write_str("red"),
            Phase::Green => f.write_str("green"),
        }
    }
}

/// Current-phase cell. Written by the cycle thread only, read from anywhere
/// without taking a lock.
#[derive(Debug)]
pub struct AtomicPhase {
    phase: AtomicU8,
}

impl AtomicPhase {
    pub fn new(phase: Phase) -> AtomicPhase {
        AtomicPhase {
            phase: AtomicU8::new(phase as u8),
        }
    }

    pub fn load(&self) -> Phase {
        Phase::from_u8(self.phase.load(Ordering::SeqCst))
    }

    /// Flips the cell and returns the new phase.
    pub fn toggle(&self) -> Phase {
        let previous = self.phase.fetch_xor(1, Ordering::SeqCst);
        Phase::from_u8(previous).toggle()
    }
}

impl Default for AtomicPhase {
    fn default() -> Self {
        AtomicPhase::new(Phase::default())
    }
}
