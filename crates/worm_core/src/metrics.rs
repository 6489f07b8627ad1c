//! Timing and outcome statistics for fitting and registration.
//!
//! Feature-gated and runtime-toggled so disabled builds pay nothing.
//!
//! # Usage
//!
//! ```ignore
//! use worm_core::metrics::{RegistrationMetrics, COLLECT_METRICS};
//!
//! // Compile with --features metrics
//! // Runtime toggle:
//! COLLECT_METRICS.store(false, Ordering::Relaxed);
//!
//! let metrics = engine.metrics();
//! println!("avg register: {:.1} us", metrics.avg_register_timing_us());
//! ```

use std::collections::VecDeque;
#[cfg(feature = "metrics")]
use std::sync::atomic::Ordering;
use std::sync::atomic::AtomicBool;

/// Runtime toggle for metrics collection.
pub static COLLECT_METRICS: AtomicBool = AtomicBool::new(true);

/// Check if metrics collection is enabled (both compile-time and runtime).
#[inline]
pub fn is_enabled() -> bool {
    #[cfg(feature = "metrics")]
    {
        COLLECT_METRICS.load(Ordering::Relaxed)
    }
    #[cfg(not(feature = "metrics"))]
    {
        false
    }
}

/// Fixed-capacity history of recent values.
#[derive(Debug, Clone)]
pub struct RollingWindow<T> {
    buffer: VecDeque<T>,
    capacity: usize,
}

impl<T> RollingWindow<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    /// Push a new value, evicting the oldest if at capacity.
    pub fn push(&mut self, value: T) {
        if self.buffer.len() >= self.capacity {
            self.buffer.pop_front();
        }
        self.buffer.push_back(value);
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.buffer.iter()
    }

    pub fn last(&self) -> Option<&T> {
        self.buffer.back()
    }
}

impl RollingWindow<u64> {
    pub fn sum(&self) -> u64 {
        self.buffer.iter().sum()
    }

    pub fn average(&self) -> f64 {
        if self.buffer.is_empty() {
            0.0
        } else {
            self.sum() as f64 / self.buffer.len() as f64
        }
    }

    pub fn min_max(&self) -> Option<(u64, u64)> {
        let min = *self.buffer.iter().min()?;
        let max = *self.buffer.iter().max()?;
        Some((min, max))
    }
}

impl Default for RollingWindow<u64> {
    fn default() -> Self {
        Self::new(64)
    }
}

/// Statistics kept by the registration engine.
#[derive(Debug, Clone, Default)]
pub struct RegistrationMetrics {
    // Timing
    /// Curve fit durations in microseconds.
    pub fit_timings: RollingWindow<u64>,
    /// Registration durations in microseconds.
    pub register_timings: RollingWindow<u64>,

    // Outcomes
    /// Fits that produced a new curve.
    pub fits_accepted: u64,
    /// Fits rejected as degenerate.
    pub fits_rejected: u64,
    /// Singular RANSAC trials over all searches.
    pub ransac_trials_skipped: u64,
    /// Inlier count of the last RANSAC winner.
    pub last_ransac_inliers: usize,
    /// Points selected by the last selection gesture.
    pub last_selected: usize,
}

impl RegistrationMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Record a fit attempt and how long it took.
    pub fn record_fit(&mut self, timing_us: u64, accepted: bool) {
        if !is_enabled() {
            return;
        }
        self.fit_timings.push(timing_us);
        if accepted {
            self.fits_accepted += 1;
        } else {
            self.fits_rejected += 1;
        }
    }

    pub fn record_ransac(&mut self, inliers: usize, trials_skipped: usize) {
        if is_enabled() {
            self.last_ransac_inliers = inliers;
            self.ransac_trials_skipped += trials_skipped as u64;
        }
    }

    pub fn record_register_timing(&mut self, timing_us: u64) {
        if is_enabled() {
            self.register_timings.push(timing_us);
        }
    }

    pub fn record_selection(&mut self, selected: usize) {
        if is_enabled() {
            self.last_selected = selected;
        }
    }

    pub fn avg_fit_timing_us(&self) -> f64 {
        self.fit_timings.average()
    }

    pub fn avg_register_timing_us(&self) -> f64 {
        self.register_timings.average()
    }
}
