//! Frame timing.
//!
//! [`Clock`] is the source of the elapsed-time value fed to
//! [`ParticleSystem::update`](crate::ParticleSystem::update). [`Stopwatch`]
//! measures how long a piece of work took, e.g. the update pass itself.
//!
//! # Example
//!
//! ```ignore
//! use pfx2d::time::{Clock, Stopwatch};
//!
//! let mut clock = Clock::new();
//!
//! // In your frame loop:
//! let delta = clock.update();
//! let timer = Stopwatch::start();
//! system.update(delta);
//! println!("update took {:?}, {:.1} fps", timer.elapsed(), clock.fps());
//! ```

use std::time::{Duration, Instant};

/// Upper bound for [`Clock::set_time_scale`].
pub const MAX_TIME_SCALE: f32 = 64.0;

/// Frame clock.
///
/// Provides the delta since the previous frame, a frame counter and a
/// periodically refreshed FPS estimate.
#[derive(Debug)]
pub struct Clock {
    /// When the clock was created or last reset.
    start: Instant,
    /// When the last frame occurred.
    last_frame: Instant,
    /// Time since last frame, after scaling.
    delta: Duration,
    /// Total frames since start.
    frame_count: u64,
    /// Calculated FPS (updated periodically).
    fps: f32,
    /// Frame count at last FPS update.
    fps_frame_count: u64,
    /// Time of last FPS calculation.
    fps_update_time: Instant,
    /// How often to update FPS calculation.
    fps_update_interval: Duration,
    /// When the clock was paused, if it is.
    paused_at: Option<Instant>,
    /// Total time spent paused.
    pause_elapsed: Duration,
    /// Fixed delta for deterministic stepping.
    fixed_delta: Option<Duration>,
    /// Time scale multiplier (1.0 = normal speed).
    time_scale: f32,
}

impl Clock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_frame: now,
            delta: Duration::ZERO,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: Duration::from_millis(500),
            paused_at: None,
            pause_elapsed: Duration::ZERO,
            fixed_delta: None,
            time_scale: 1.0,
        }
    }

    /// Advance to the next frame. Call once per frame.
    ///
    /// Returns the time elapsed since the previous call. Returns zero while
    /// paused.
    pub fn update(&mut self) -> Duration {
        let now = Instant::now();

        if self.paused_at.is_some() {
            self.delta = Duration::ZERO;
            return self.delta;
        }

        let raw_delta = self.fixed_delta.unwrap_or_else(|| now.duration_since(self.last_frame));
        self.delta = if self.time_scale == 1.0 {
            raw_delta
        } else {
            Duration::try_from_secs_f64(raw_delta.as_secs_f64() * self.time_scale as f64)
                .unwrap_or(Duration::MAX)
        };
        self.last_frame = now;

        self.frame_count += 1;

        let fps_elapsed = now.duration_since(self.fps_update_time);
        if fps_elapsed >= self.fps_update_interval {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
        }

        self.delta
    }

    /// Time since last frame.
    #[inline]
    pub fn delta(&self) -> Duration {
        self.delta
    }

    /// Unpaused time since start.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        let end = self.paused_at.unwrap_or_else(Instant::now);
        end.duration_since(self.start).saturating_sub(self.pause_elapsed)
    }

    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    #[inline]
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Pause time progression.
    ///
    /// While paused, `update()` returns zero and particles freeze.
    pub fn pause(&mut self) {
        if self.paused_at.is_none() {
            self.paused_at = Some(Instant::now());
        }
    }

    /// Resume after pausing. The paused span is not reported as a delta.
    pub fn resume(&mut self) {
        if let Some(paused_at) = self.paused_at.take() {
            let now = Instant::now();
            self.pause_elapsed += now.duration_since(paused_at);
            self.last_frame = now;
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.is_paused() {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// Use a fixed delta instead of wall-clock time. `None` restores real timing.
    pub fn set_fixed_delta(&mut self, delta: Option<Duration>) {
        self.fixed_delta = delta;
    }

    /// Set time scale multiplier.
    ///
    /// - `1.0` = normal speed
    /// - `0.5` = half speed (slow motion)
    /// - `2.0` = double speed
    ///
    /// Clamped to `0.0..=MAX_TIME_SCALE`; NaN resets to `1.0`.
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = if scale.is_nan() { 1.0 } else { scale.clamp(0.0, MAX_TIME_SCALE) };
    }

    pub fn reset(&mut self) {
        let now = Instant::now();
        self.start = now;
        self.last_frame = now;
        self.delta = Duration::ZERO;
        self.frame_count = 0;
        self.fps = 0.0;
        self.fps_frame_count = 0;
        self.fps_update_time = now;
        self.paused_at = None;
        self.pause_elapsed = Duration::ZERO;
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

/// Measures a single span of work.
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    started: Instant,
}

impl Stopwatch {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Return the elapsed time and start over.
    pub fn restart(&mut self) -> Duration {
        let now = Instant::now();
        let elapsed = now.duration_since(self.started);
        self.started = now;
        elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_clock_new() {
        let clock = Clock::new();
        assert_eq!(clock.frame(), 0);
        assert!(!clock.is_paused());
        assert_eq!(clock.time_scale(), 1.0);
        assert_eq!(clock.delta(), Duration::ZERO);
    }

    #[test]
    fn test_clock_update() {
        let mut clock = Clock::new();
        thread::sleep(Duration::from_millis(10));
        let delta = clock.update();

        assert!(delta >= Duration::from_millis(10));
        assert!(clock.elapsed() >= delta);
        assert_eq!(clock.frame(), 1);
    }

    #[test]
    fn test_clock_pause() {
        let mut clock = Clock::new();
        clock.update();

        clock.pause();
        assert!(clock.is_paused());

        let elapsed_before = clock.elapsed();
        thread::sleep(Duration::from_millis(10));
        assert_eq!(clock.update(), Duration::ZERO);
        assert_eq!(clock.elapsed(), elapsed_before);
        assert_eq!(clock.frame(), 1);
    }

    #[test]
    fn test_resume_skips_paused_span() {
        let mut clock = Clock::new();
        clock.pause();
        thread::sleep(Duration::from_millis(30));
        clock.resume();

        let delta = clock.update();
        assert!(delta < Duration::from_millis(30));
    }

    #[test]
    fn test_time_scale() {
        let mut clock = Clock::new();
        clock.set_time_scale(2.0);
        assert_eq!(clock.time_scale(), 2.0);

        // Negative scale should clamp to 0
        clock.set_time_scale(-1.0);
        assert_eq!(clock.time_scale(), 0.0);

        clock.set_time_scale(f32::NAN);
        assert_eq!(clock.time_scale(), 1.0);

        clock.set_time_scale(f32::INFINITY);
        assert_eq!(clock.time_scale(), MAX_TIME_SCALE);
    }

    #[test]
    fn test_repeated_doubling_saturates() {
        let mut clock = Clock::new();
        for _ in 0..80 {
            clock.set_time_scale(clock.time_scale() * 2.0);
        }
        assert_eq!(clock.time_scale(), MAX_TIME_SCALE);

        thread::sleep(Duration::from_millis(1));
        assert!(clock.update() >= Duration::from_millis(60));

        // Huge fixed step times the max scale saturates instead of overflowing
        clock.set_fixed_delta(Some(Duration::MAX));
        assert_eq!(clock.update(), Duration::MAX);
    }

    #[test]
    fn test_elapsed_keeps_time_before_pause() {
        let mut clock = Clock::new();
        clock.update();
        thread::sleep(Duration::from_millis(20));
        clock.pause();
        thread::sleep(Duration::from_millis(20));
        clock.resume();

        assert!(clock.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn test_fixed_delta() {
        let mut clock = Clock::new();
        clock.set_fixed_delta(Some(Duration::from_millis(16)));
        clock.set_time_scale(0.5);

        thread::sleep(Duration::from_millis(50));
        let delta = clock.update();
        let expected = Duration::from_millis(8);
        let diff = delta.max(expected) - delta.min(expected);
        assert!(diff < Duration::from_micros(1));
    }

    #[test]
    fn test_stopwatch_restart() {
        let mut timer = Stopwatch::start();
        thread::sleep(Duration::from_millis(5));
        let first = timer.restart();
        assert!(first >= Duration::from_millis(5));
        assert!(timer.elapsed() < first + Duration::from_secs(1));
    }
}
