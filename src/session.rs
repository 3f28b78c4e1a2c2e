//! Session scoring, speed and frame pacing
//!
//! The simulation advances at `base_rate * speed` ticks per second, decoupled
//! from the display rate. A frame fires at most one tick: a slow frame loses
//! ticks instead of catching up.

use crate::consts::{MAX_SPEED, MIN_SPEED};
use crate::tuning::ScoringMode;

/// Per-run bookkeeping that lives outside the deterministic simulation
#[derive(Debug, Clone)]
pub struct Session {
    pub mode: ScoringMode,
    /// Ticks per second at 1x
    pub base_rate: f64,
    /// Speed multiplier, clamped to [MIN_SPEED, MAX_SPEED]
    speed: f64,
    /// Time spent playing (ms), paused time excluded
    elapsed_ms: f64,
    /// Best metric ever reached at game over
    best: f64,
    /// Timestamp of the last tick (ms)
    last_tick_ms: Option<f64>,
    /// Timestamp of the last playing frame (ms)
    last_frame_ms: Option<f64>,
}

impl Session {
    pub fn new(mode: ScoringMode, base_rate: f64, best: f64) -> Self {
        Self {
            mode,
            base_rate,
            speed: 1.0,
            elapsed_ms: 0.0,
            best,
            last_tick_ms: None,
            last_frame_ms: None,
        }
    }

    /// Start a new run. The best record survives.
    pub fn reset(&mut self) {
        self.speed = 1.0;
        self.elapsed_ms = 0.0;
        self.suspend();
    }

    /// Stop the pacing clock (pause/idle). The next playing frame restarts it.
    pub fn suspend(&mut self) {
        self.last_tick_ms = None;
        self.last_frame_ms = None;
    }

    /// Restart the pacing clock at `now_ms`, the moment play resumed. Time
    /// until the next frame then counts, and the first tick is one interval
    /// after `now_ms`.
    pub fn resume_at(&mut self, now_ms: f64) {
        self.last_frame_ms = Some(now_ms);
        self.last_tick_ms = Some(now_ms);
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f64) -> f64 {
        self.speed = speed.clamp(MIN_SPEED, MAX_SPEED);
        self.speed
    }

    pub fn adjust_speed(&mut self, delta: f64) -> f64 {
        self.set_speed(self.speed + delta)
    }

    /// Milliseconds between ticks at the current speed
    pub fn tick_interval_ms(&self) -> f64 {
        1000.0 / (self.base_rate * self.speed)
    }

    /// Account for a playing frame at `now_ms`. Returns true if a tick is due.
    pub fn frame(&mut self, now_ms: f64) -> bool {
        let (Some(last_frame), Some(last_tick)) = (self.last_frame_ms, self.last_tick_ms) else {
            // Resumed without a timestamp: this frame anchors the clocks
            self.resume_at(now_ms);
            return false;
        };

        self.elapsed_ms += (now_ms - last_frame).max(0.0);
        self.last_frame_ms = Some(now_ms);

        if now_ms - last_tick >= self.tick_interval_ms() {
            self.last_tick_ms = Some(now_ms);
            true
        } else {
            false
        }
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_ms / 1000.0
    }

    /// Current metric for this mode
    pub fn metric(&self, score: u64) -> f64 {
        match self.mode {
            ScoringMode::Survival => self.elapsed_secs(),
            ScoringMode::Score => score as f64,
        }
    }

    pub fn best(&self) -> f64 {
        self.best
    }

    /// Offer a final metric. Returns true if it set a new record.
    pub fn record(&mut self, metric: f64) -> bool {
        if metric > self.best {
            self.best = metric;
            true
        } else {
            false
        }
    }

    /// HUD text for a metric value
    pub fn format_metric(&self, value: f64) -> String {
        match self.mode {
            ScoringMode::Survival => format!("{:.1}", value),
            ScoringMode::Score => format!("{}", value as u64),
        }
    }

    /// HUD text for the speed multiplier ("1", "1.5", "0.7")
    pub fn format_speed(&self) -> String {
        let text = format!("{:.1}", self.speed);
        text.strip_suffix(".0").map(str::to_string).unwrap_or(text)
    }
}
