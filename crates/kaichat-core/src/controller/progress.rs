//! Cosmetic progress simulation for the pending view.
//!
//! The percentage shown while a request is in flight is simulated: it has no
//! relation to real transfer progress and must not be relied upon for
//! correctness.

use std::sync::Arc;

use rand::Rng;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::{interval, sleep, Duration};

/// The highest percentage the simulation may show before completion.
pub const MAX_PENDING_PERCENTAGE: u8 = 90;

/// How often the simulated percentage advances.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// How long the indicator holds at 100% before hiding.
pub const HIDE_DELAY: Duration = Duration::from_millis(500);

/// The simulated percentage shown while a request is in flight.
///
/// While pending the value is monotonically non-decreasing and never exceeds
/// [`MAX_PENDING_PERCENTAGE`]; on completion it jumps to exactly 100 before
/// resetting to 0 when hidden.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressMeter {
    percentage: u8,
    visible: bool,
}

impl ProgressMeter {
    /// Makes the indicator visible and resets the percentage to 0.
    pub fn start(&mut self) {
        self.visible = true;
        self.percentage = 0;
    }

    /// Advances the percentage by a pseudo-random increment in `[3, 5]`,
    /// clamped to [`MAX_PENDING_PERCENTAGE`]. No-op while hidden.
    pub fn tick(&mut self) {
        if !self.visible {
            return;
        }
        let step: u8 = rand::thread_rng().gen_range(3..=5);
        self.percentage = self
            .percentage
            .saturating_add(step)
            .min(MAX_PENDING_PERCENTAGE);
    }

    /// Jumps the percentage to exactly 100.
    pub fn complete(&mut self) {
        self.percentage = 100;
    }

    /// Hides the indicator and resets the percentage to 0.
    pub fn hide(&mut self) {
        self.visible = false;
        self.percentage = 0;
    }

    /// Returns the current percentage.
    pub fn percentage(&self) -> u8 {
        self.percentage
    }

    /// Returns `true` while the indicator should be shown.
    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

/// Drives a shared [`ProgressMeter`] while a request is pending.
///
/// The ticker and the delayed hide are plain tokio tasks owned by this
/// handle; both are aborted on [`ProgressTask::cancel`] and on drop so no
/// timers outlive the controller.
#[derive(Debug, Default)]
pub struct ProgressTask {
    meter: Arc<RwLock<ProgressMeter>>,
    ticker: Option<JoinHandle<()>>,
    hider: Option<JoinHandle<()>>,
}

impl ProgressTask {
    /// Creates an idle progress task with a hidden meter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a handle to the shared meter for the display layer.
    pub fn meter(&self) -> Arc<RwLock<ProgressMeter>> {
        self.meter.clone()
    }

    /// Resets the meter and starts the periodic ticker.
    pub async fn start(&mut self) {
        self.cancel();
        self.meter.write().await.start();

        let meter = self.meter.clone();
        self.ticker = Some(tokio::spawn(async move {
            let mut ticker = interval(TICK_INTERVAL);
            // The first interval tick fires immediately; consume it so the
            // percentage only starts moving after one full tick.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                meter.write().await.tick();
            }
        }));
    }

    /// Stops the ticker, jumps to 100% and hides after [`HIDE_DELAY`].
    pub async fn finish(&mut self) {
        if let Some(handle) = self.ticker.take() {
            handle.abort();
        }
        self.meter.write().await.complete();

        let meter = self.meter.clone();
        self.hider = Some(tokio::spawn(async move {
            sleep(HIDE_DELAY).await;
            meter.write().await.hide();
        }));
    }

    /// Aborts any outstanding ticker or hide delay. Safe to call repeatedly.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.ticker.take() {
            handle.abort();
        }
        if let Some(handle) = self.hider.take() {
            handle.abort();
        }
    }
}

impl Drop for ProgressTask {
    fn drop(&mut self) {
        self.cancel();
    }
}
