pub mod blocking_queue;
pub mod config;
pub mod countdown_latch;
pub mod cycle;
pub mod phase;
pub mod shutdown;
pub mod traffic_light;
pub mod worker;

pub use blocking_queue::BlockingQueue;
pub use config::{Config, ConfigError};
pub use countdown_latch::CountdownLatch;
pub use cycle::PhaseCycle;
pub use phase::{AtomicPhase, Phase};
pub use shutdown::StopSignal;
pub use traffic_light::PhaseController;
pub use worker::{Worker, Workers};

/// Error returned by the fallible operations of this crate.
///
/// Failures here are rare and environmental (a thread that could not be
/// spawned, a worker that panicked, a bad configuration), so a boxed
/// `std::error::Error` is enough for callers.
pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// A specialized `Result` type for traffic light operations.
pub type Result<T> = std::result::Result<T, Error>;
