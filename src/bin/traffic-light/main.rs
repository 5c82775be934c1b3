use traffic_light::{Config, CountdownLatch, PhaseController, Result, StopSignal, Worker, Workers};

use chrono::Local;
use clap::Parser;
use std::thread;
use std::time::Duration;
use tracing::{debug, info};
use tracing_subscriber;

fn spawn_vehicle(
    id: usize,
    light: PhaseController,
    ready: CountdownLatch,
    done: StopSignal,
) -> Result<Worker> {
    let name = format!("vehicle-{}", id);
    let signal = done.clone();
    let handle = thread::Builder::new().name(name.clone()).spawn(move || {
        ready.countdown();
        let mut crossings: u64 = 0;
        while !signal.is_stopped() {
            debug!("vehicle {} waiting at {} light", id, light.current_phase());
            if light.wait_for_green_timeout(Duration::from_millis(500)) {
                crossings += 1;
                info!("vehicle {} crossed on green at {}", id, Local::now().format("%H:%M:%S%.3f"));
            }
        }
        info!("vehicle {} done after {} crossings", id, crossings);
    })?;
    Ok(Worker::new(name, done, handle))
}

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Options {
    /// shortest cycle in milliseconds
    #[clap(long)]
    #[clap(default_value_t = 4000)]
    min_cycle_ms: u64,

    /// longest cycle in milliseconds
    #[clap(long)]
    #[clap(default_value_t = 6000)]
    max_cycle_ms: u64,

    /// poll quantum in milliseconds
    #[clap(long)]
    #[clap(default_value_t = 1)]
    poll_ms: u64,

    /// seed for the cycle duration generator
    #[clap(short, long)]
    seed: Option<u64>,

    /// number of vehicles waiting at the light
    #[clap(short = 'n', long)]
    #[clap(default_value_t = 3)]
    vehicles: usize,

    /// how long to run before shutting down, in seconds
    #[clap(short, long)]
    #[clap(default_value_t = 20)]
    run_secs: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let options = Options::parse();
    let mut config = Config::new(
        Duration::from_millis(options.min_cycle_ms),
        Duration::from_millis(options.max_cycle_ms),
        Duration::from_millis(options.poll_ms),
    )?;
    if let Some(seed) = options.seed {
        config = config.with_seed(seed);
    }
    info!("{:?}", options);

    let light = PhaseController::with_config(config);
    let mut workers = Workers::new();
    workers.register(light.simulate()?);

    let ready = CountdownLatch::new(options.vehicles);
    let done = StopSignal::new();
    for id in 0..options.vehicles {
        workers.register(spawn_vehicle(id, light.clone(), ready.clone(), done.clone())?);
    }
    ready.wait();
    info!("{} vehicles waiting at light {}", options.vehicles, light.id());

    thread::sleep(Duration::from_secs(options.run_secs));

    info!("shutting down {} workers", workers.len());
    workers.join_all()
}
