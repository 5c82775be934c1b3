use std::error;
use std::fmt;
use std::time::Duration;

pub const MIN_CYCLE: Duration = Duration::from_millis(4000);
pub const MAX_CYCLE: Duration = Duration::from_millis(6000);
pub const POLL_INTERVAL: Duration = Duration::from_millis(1);

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    EmptyCycle,
    InvertedBounds { min: Duration, max: Duration },
    ZeroPollInterval,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyCycle => write!(f, "cycle duration must be greater than zero"),
            ConfigError::InvertedBounds { min, max } => write!(
                f,
                "min cycle {}ms is greater than max cycle {}ms",
                min.as_millis(),
                max.as_millis()
            ),
            ConfigError::ZeroPollInterval => write!(f, "poll interval must be greater than zero"),
        }
    }
}

impl error::Error for ConfigError {}

/// Timing parameters of a traffic light cycle.
///
/// Cycle durations are drawn uniformly from `min_cycle..=max_cycle`.
/// `poll_interval` is the smallest sleep the cycle thread takes between
/// deadline checks. With `seed` set the sequence of
/// drawn durations is reproducible.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    min_cycle: Duration,
    max_cycle: Duration,
    poll_interval: Duration,
    seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            min_cycle: MIN_CYCLE,
            max_cycle: MAX_CYCLE,
            poll_interval: POLL_INTERVAL,
            seed: None,
        }
    }
}

impl Config {
    pub fn new(
        min_cycle: Duration,
        max_cycle: Duration,
        poll_interval: Duration,
    ) -> Result<Config, ConfigError> {
        if min_cycle.is_zero() {
            return Err(ConfigError::EmptyCycle);
        }
        if min_cycle > max_cycle {
            return Err(ConfigError::InvertedBounds {
                min: min_cycle,
                max: max_cycle,
            });
        }
        if poll_interval.is_zero() {
            return Err(ConfigError::ZeroPollInterval);
        }
        Ok(Config {
            min_cycle,
            max_cycle,
            poll_interval,
            seed: None,
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Config {
        self.seed = Some(seed);
        self
    }

    pub fn min_cycle(&self) -> Duration {
        self.min_cycle
    }

    pub fn max_cycle(&self) -> Duration {
        self.max_cycle
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}
