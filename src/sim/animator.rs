//! Periodic ticking
//!
//! While running, a dedicated thread advances the simulation once per
//! period and then notifies observers. Missed periods are dropped, never
//! replayed.

use std::sync::Arc;
use std::sync::mpsc::Receiver;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

use super::observer::{Frame, Observers, SubscriptionId};
use super::state::Simulation;
use crate::consts::TICK_PERIOD_MS;
use crate::error::{Error, Result};

/// Default tick period (25 ticks per second)
pub const DEFAULT_PERIOD: Duration = Duration::from_millis(TICK_PERIOD_MS);

/// Simulation handle shared with the ticker thread
pub type SharedSimulation = Arc<Mutex<Simulation>>;

/// Stop flag the ticker waits on between ticks
#[derive(Default)]
struct StopSignal {
    stopped: Mutex<bool>,
    wake: Condvar,
}

/// A running ticker thread
struct Ticker {
    signal: Arc<StopSignal>,
    handle: JoinHandle<()>,
}

/// Drives a [`Simulation`] at a fixed period
pub struct Animator {
    sim: SharedSimulation,
    observers: Arc<Mutex<Observers>>,
    /// Held for a whole tick so ticks run one at a time
    tick_gate: Arc<Mutex<()>>,
    period: Duration,
    ticker: Option<Ticker>,
}

impl Animator {
    pub fn new(sim: Simulation, period: Duration) -> Result<Self> {
        if period.is_zero() {
            return Err(Error::InvalidPeriod);
        }
        Ok(Self {
            sim: Arc::new(Mutex::new(sim)),
            observers: Arc::new(Mutex::new(Observers::new())),
            tick_gate: Arc::new(Mutex::new(())),
            period,
            ticker: None,
        })
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_running(&self) -> bool {
        self.ticker.is_some()
    }

    /// Shared handle for readers on other threads
    pub fn simulation(&self) -> SharedSimulation {
        self.sim.clone()
    }

    /// Run a command or query with the simulation locked.
    ///
    /// Ticks cannot interleave with `f`.
    pub fn with_simulation<R>(&self, f: impl FnOnce(&mut Simulation) -> R) -> R {
        f(&mut self.sim.lock())
    }

    /// Register a per-tick callback; it runs on the ticker thread
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: FnMut(&Frame) + Send + 'static,
    {
        self.observers.lock().subscribe(callback)
    }

    pub fn subscribe_channel(&self) -> (SubscriptionId, Receiver<Frame>) {
        self.observers.lock().subscribe_channel()
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.observers.lock().unsubscribe(id)
    }

    /// Run one full tick on the calling thread
    pub fn tick_now(&self) -> Frame {
        run_tick(&self.tick_gate, &self.sim, &self.observers)
    }

    /// Start ticking. The first tick fires immediately.
    ///
    /// Returns `Ok(false)` without spawning anything if already running.
    pub fn start(&mut self) -> Result<bool> {
        if self.ticker.is_some() {
            log::debug!("Animator already running, start ignored");
            return Ok(false);
        }

        let signal = Arc::new(StopSignal::default());
        let sim = self.sim.clone();
        let observers = self.observers.clone();
        let tick_gate = self.tick_gate.clone();
        let period = self.period;
        let thread_signal = signal.clone();

        let handle = thread::Builder::new()
            .name("kaleidoscope-ticker".to_string())
            .spawn(move || {
                ticker_loop(&tick_gate, &sim, &observers, &thread_signal, period)
            })?;

        log::info!("Animation started ({} ms period)", period.as_millis());
        self.ticker = Some(Ticker { signal, handle });
        Ok(true)
    }

    /// Stop ticking. No new tick starts after this returns; a tick already
    /// in progress finishes first.
    ///
    /// Returns false if the animator was not running.
    pub fn pause(&mut self) -> bool {
        let Some(ticker) = self.ticker.take() else {
            log::debug!("Animator not running, pause ignored");
            return false;
        };

        *ticker.signal.stopped.lock() = true;
        ticker.signal.wake.notify_all();
        if ticker.handle.join().is_err() {
            log::warn!("Ticker thread panicked");
        }

        log::info!("Animation paused");
        true
    }
}

impl Drop for Animator {
    fn drop(&mut self) {
        self.pause();
    }
}

impl std::fmt::Debug for Animator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Animator")
            .field("period", &self.period)
            .field("running", &self.is_running())
            .finish()
    }
}

/// Step every figure, then notify observers with the resulting frame.
///
/// The simulation lock is released before the observer lock is taken, so
/// holding the simulation while subscribing cannot deadlock a tick. The
/// tick gate keeps frames in tick order when `tick_now` races the ticker.
fn run_tick(
    tick_gate: &Mutex<()>,
    sim: &Mutex<Simulation>,
    observers: &Mutex<Observers>,
) -> Frame {
    let _gate = tick_gate.lock();
    let frame = {
        let mut sim = sim.lock();
        sim.step_all();
        sim.snapshot()
    };
    log::trace!("Tick {} ({} figures)", frame.tick, frame.figures.len());
    observers.lock().notify(&frame);
    frame
}

fn ticker_loop(
    tick_gate: &Mutex<()>,
    sim: &Mutex<Simulation>,
    observers: &Mutex<Observers>,
    signal: &StopSignal,
    period: Duration,
) {
    let mut next = Instant::now();
    loop {
        {
            let mut stopped = signal.stopped.lock();
            while !*stopped {
                if signal.wake.wait_until(&mut stopped, next).timed_out() {
                    break;
                }
            }
            if *stopped {
                return;
            }
        }

        run_tick(tick_gate, sim, observers);

        next += period;
        let now = Instant::now();
        let mut dropped = 0u32;
        while next <= now {
            next += period;
            dropped += 1;
        }
        if dropped > 0 {
            log::trace!("Fell behind, dropped {} ticks", dropped);
        }
    }
}
