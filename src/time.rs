//! Frame timing for the display loop.
//!
//! Elapsed time is the sum of the (scaled) frame deltas rather than wall time
//! since start, so a clock with a fixed delta is fully deterministic.
//!
//! # Example
//!
//! ```ignore
//! use morphcloud::time::FrameClock;
//!
//! let mut clock = FrameClock::new();
//! // Once per display refresh:
//! clock.tick();
//! println!("Frame {} at {:.2}s", clock.frame(), clock.elapsed());
//! ```

use std::time::Instant;

/// Frame counter and clock for one display loop.
#[derive(Debug)]
pub struct FrameClock {
    /// When the previous tick happened.
    last_tick: Instant,
    /// Accumulated scaled time in seconds.
    elapsed_secs: f32,
    /// Scaled time covered by the last tick.
    delta_secs: f32,
    /// Ticks since creation or reset.
    frame_count: u64,
    paused: bool,
    /// Fixed delta for deterministic stepping (optional).
    fixed_delta: Option<f32>,
    /// Time scale multiplier (1.0 = normal speed).
    time_scale: f32,
}

impl FrameClock {
    /// Create a clock driven by real time.
    pub fn new() -> Self {
        Self {
            last_tick: Instant::now(),
            elapsed_secs: 0.0,
            delta_secs: 0.0,
            frame_count: 0,
            paused: false,
            fixed_delta: None,
            time_scale: 1.0,
        }
    }

    /// Create a clock that advances exactly `delta` seconds per tick.
    pub fn fixed(delta: f32) -> Self {
        let mut clock = Self::new();
        clock.set_fixed_delta(Some(delta));
        clock
    }

    /// Advance one frame. Returns `(elapsed, delta)`.
    pub fn tick(&mut self) -> (f32, f32) {
        let now = Instant::now();
        let raw_delta = now.duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;
        self.frame_count += 1;

        self.delta_secs = if self.paused {
            0.0
        } else {
            self.fixed_delta.unwrap_or(raw_delta) * self.time_scale
        };
        self.elapsed_secs += self.delta_secs;

        (self.elapsed_secs, self.delta_secs)
    }

    /// Scaled seconds since start, excluding paused time.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed_secs
    }

    /// Scaled seconds covered by the last tick.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Ticks since start. Paused ticks count.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[inline]
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Stop time. Ticks still count frames but add no elapsed time.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Use a fixed delta per tick, or `None` for real frame timing.
    pub fn set_fixed_delta(&mut self, delta: Option<f32>) {
        self.fixed_delta = delta.filter(|d| d.is_finite() && *d >= 0.0);
    }

    /// Set time scale multiplier. Negative values clamp to 0.
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }

    /// Back to frame 0 at t = 0. Fixed delta and scale are kept.
    pub fn reset(&mut self) {
        self.last_tick = Instant::now();
        self.elapsed_secs = 0.0;
        self.delta_secs = 0.0;
        self.frame_count = 0;
        self.paused = false;
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_clock_new() {
        let clock = FrameClock::new();
        assert_eq!(clock.frame(), 0);
        assert_eq!(clock.elapsed(), 0.0);
        assert!(!clock.is_paused());
    }

    #[test]
    fn test_real_time_tick() {
        let mut clock = FrameClock::new();
        thread::sleep(Duration::from_millis(10));
        let (elapsed, delta) = clock.tick();
        assert!(delta > 0.0);
        assert_eq!(elapsed, delta);
        assert_eq!(clock.frame(), 1);
    }

    #[test]
    fn test_fixed_delta_accumulates() {
        let mut clock = FrameClock::fixed(0.5);
        for _ in 0..4 {
            clock.tick();
        }
        assert_eq!(clock.elapsed(), 2.0);
        assert_eq!(clock.delta(), 0.5);
    }

    #[test]
    fn test_pause_stops_elapsed() {
        let mut clock = FrameClock::fixed(0.25);
        clock.tick();
        clock.pause();
        clock.tick();
        clock.tick();
        assert_eq!(clock.elapsed(), 0.25);
        assert_eq!(clock.delta(), 0.0);
        assert_eq!(clock.frame(), 3);

        clock.toggle_pause();
        clock.tick();
        assert_eq!(clock.elapsed(), 0.5);
    }

    #[test]
    fn test_time_scale() {
        let mut clock = FrameClock::fixed(1.0);
        clock.set_time_scale(2.0);
        clock.tick();
        assert_eq!(clock.elapsed(), 2.0);

        clock.set_time_scale(-1.0);
        assert_eq!(clock.time_scale(), 0.0);
    }

    #[test]
    fn test_reset_keeps_fixed_delta() {
        let mut clock = FrameClock::fixed(0.1);
        clock.tick();
        clock.reset();
        assert_eq!(clock.frame(), 0);
        clock.tick();
        assert!((clock.elapsed() - 0.1).abs() < 1e-6);
    }
}
