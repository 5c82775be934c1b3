use traffic_light::{AtomicPhase, Config, ConfigError, Phase, PhaseCycle};

use std::time::{Duration, Instant};

const STEP: Duration = Duration::from_millis(1);

// Steps the cycle one millisecond at a time and returns every completed interval.
fn run_cycles(config: &Config, cycles: usize) -> Vec<Duration> {
    let mut now = Instant::now();
    let mut cycle = PhaseCycle::new(config, now);
    let mut intervals = Vec::with_capacity(cycles);
    while intervals.len() < cycles {
        now += STEP;
        if let Some(elapsed) = cycle.poll(now) {
            intervals.push(elapsed);
        }
    }
    intervals
}

#[test]
fn intervals_stay_within_bounds() {
    let config = Config::default().with_seed(42);
    let intervals = run_cycles(&config, 200);
    for interval in intervals.iter() {
        assert!(*interval >= Duration::from_millis(4000), "{:?}", interval);
        assert!(*interval <= Duration::from_millis(6000), "{:?}", interval);
    }
    let distinct: std::collections::HashSet<_> = intervals.iter().collect();
    assert!(distinct.len() > 1);
}

#[test]
fn same_seed_draws_same_durations() {
    let config = Config::default().with_seed(7);
    assert_eq!(run_cycles(&config, 20), run_cycles(&config, 20));
}

#[test]
fn poll_waits_for_deadline() {
    let config = Config::new(Duration::from_millis(10), Duration::from_millis(10), STEP).unwrap();
    let start = Instant::now();
    let mut cycle = PhaseCycle::new(&config, start);

    assert_eq!(cycle.cycle_duration(), Duration::from_millis(10));
    assert_eq!(cycle.deadline(), start + Duration::from_millis(10));
    assert_eq!(cycle.remaining(start + Duration::from_millis(4)), Duration::from_millis(6));
    assert_eq!(cycle.poll(start + Duration::from_millis(9)), None);

    let late = start + Duration::from_millis(12);
    assert_eq!(cycle.poll(late), Some(Duration::from_millis(12)));
    assert_eq!(cycle.deadline(), late + Duration::from_millis(10));
    assert_eq!(cycle.remaining(late + Duration::from_millis(30)), Duration::ZERO);
}

#[test]
fn config_rejects_bad_bounds() {
    let ms = Duration::from_millis;
    assert_eq!(Config::new(ms(0), ms(10), ms(1)), Err(ConfigError::EmptyCycle));
    assert_eq!(
        Config::new(ms(20), ms(10), ms(1)),
        Err(ConfigError::InvertedBounds { min: ms(20), max: ms(10) })
    );
    assert_eq!(Config::new(ms(10), ms(20), ms(0)), Err(ConfigError::ZeroPollInterval));

    let config = Config::default();
    assert_eq!(config.min_cycle(), ms(4000));
    assert_eq!(config.max_cycle(), ms(6000));
    assert_eq!(config.poll_interval(), ms(1));
    assert_eq!(config.seed(), None);
}

#[test]
fn phase_cell_toggles() {
    assert_eq!(Phase::Red.toggle(), Phase::Green);
    assert_eq!(Phase::Green.toggle(), Phase::Red);
    assert_eq!(Phase::Green.to_string(), "green");

    let cell = AtomicPhase::default();
    assert_eq!(cell.load(), Phase::Red);
    assert_eq!(cell.toggle(), Phase::Green);
    assert_eq!(cell.load(), Phase::Green);
    assert_eq!(cell.toggle(), Phase::Red);
    assert_eq!(cell.load(), Phase::Red);
}

#[test]
fn sub_millisecond_bounds_are_honoured() {
    let us = Duration::from_micros;
    let config = Config::new(us(1500), us(1700), us(1000)).unwrap().with_seed(11);
    let mut now = Instant::now();
    let mut cycle = PhaseCycle::new(&config, now);
    for _ in 0..50 {
        let drawn = cycle.cycle_duration();
        assert!(drawn >= us(1500) && drawn <= us(1700), "{:?}", drawn);
        now += drawn;
        assert_eq!(cycle.poll(now), Some(drawn));
    }

    let config = Config::new(us(500), us(2000), us(1000)).unwrap();
    assert_eq!(config.min_cycle(), us(500));
    let drawn = PhaseCycle::new(&config, Instant::now()).cycle_duration();
    assert!(drawn >= us(500) && drawn <= us(2000), "{:?}", drawn);
}
