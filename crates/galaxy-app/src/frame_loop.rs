//! Fixed-rate animation stepping.
//!
//! The particle field advances by a fixed amount per step, so its speed is
//! tied to how often it is stepped. [`FrameLoop`] accumulates wall-clock time
//! and runs one step per elapsed 60 Hz frame, however often the display
//! redraws. [`FpsCounter`] reports the redraw rate once per second.

use std::time::{Duration, Instant};

use tracing::warn;

/// Length of one animation frame: 60 Hz.
pub const FRAME_DT: f64 = 1.0 / 60.0;

/// Longest frame time accounted for. Longer stalls are dropped rather than
/// replayed as a burst of steps.
pub const MAX_FRAME_TIME: f64 = 0.25;

/// Accumulator that converts elapsed time into whole animation steps.
pub struct FrameLoop {
    previous: Instant,
    accumulator: f64,
    steps: u64,
    frames: u64,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self {
            previous: Instant::now(),
            accumulator: 0.0,
            steps: 0,
            frames: 0,
        }
    }

    /// Measure the time since the previous call and run the due steps.
    /// Returns how many steps ran.
    pub fn tick(&mut self, step_fn: impl FnMut()) -> u32 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.previous).as_secs_f64();
        self.previous = now;
        self.advance(elapsed, step_fn)
    }

    /// Account for `frame_time` seconds and call `step_fn` once per whole
    /// frame now due.
    pub fn advance(&mut self, frame_time: f64, mut step_fn: impl FnMut()) -> u32 {
        let mut frame_time = frame_time.max(0.0);
        if frame_time > MAX_FRAME_TIME {
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                frame_time * 1000.0,
                MAX_FRAME_TIME * 1000.0
            );
            frame_time = MAX_FRAME_TIME;
        }

        self.accumulator += frame_time;
        let mut ran = 0;
        while self.accumulator >= FRAME_DT {
            step_fn();
            self.accumulator -= FRAME_DT;
            ran += 1;
        }
        self.steps += u64::from(ran);
        self.frames += 1;
        ran
    }

    /// Restart timing from now and drop any partial frame, e.g. after a pause.
    pub fn reset_clock(&mut self) {
        self.previous = Instant::now();
        self.accumulator = 0.0;
    }

    /// Fraction of the next frame already accumulated, in `[0, 1)`.
    pub fn alpha(&self) -> f64 {
        self.accumulator / FRAME_DT
    }

    /// Total steps run.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Total calls to [`tick`](Self::tick) or [`advance`](Self::advance).
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new()
    }
}

/// Counts redraws and reports the rate once per second.
pub struct FpsCounter {
    window_start: Option<Instant>,
    frames: u32,
}

impl FpsCounter {
    const WINDOW: Duration = Duration::from_secs(1);

    pub fn new() -> Self {
        Self {
            window_start: None,
            frames: 0,
        }
    }

    /// Record a redraw at `now`. Returns the rate when a full second has
    /// passed since the window began.
    pub fn record(&mut self, now: Instant) -> Option<f64> {
        let Some(start) = self.window_start else {
            self.window_start = Some(now);
            self.frames = 0;
            return None;
        };
        self.frames += 1;
        let elapsed = now.saturating_duration_since(start);
        if elapsed < Self::WINDOW {
            return None;
        }
        let fps = f64::from(self.frames) / elapsed.as_secs_f64();
        self.window_start = Some(now);
        self.frames = 0;
        Some(fps)
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_dt_is_sixty_hz() {
        assert!((FRAME_DT - 1.0 / 60.0).abs() < f64::EPSILON * 10.0);
    }

    #[test]
    fn test_one_frame_one_step() {
        let mut frame_loop = FrameLoop::new();
        let mut steps = 0;
        assert_eq!(frame_loop.advance(FRAME_DT, || steps += 1), 1);
        assert_eq!(steps, 1);
        assert!(frame_loop.alpha().abs() < 1e-9);
    }

    #[test]
    fn test_slow_display_catches_up() {
        // A 30 Hz display still animates at 60 steps per second.
        let mut frame_loop = FrameLoop::new();
        for _ in 0..30 {
            frame_loop.advance(2.0 * FRAME_DT, || {});
        }
        assert_eq!(frame_loop.steps(), 60);
        assert_eq!(frame_loop.frames(), 30);
    }

    #[test]
    fn test_fast_display_skips_steps() {
        // A 120 Hz display steps on every other redraw.
        let mut frame_loop = FrameLoop::new();
        let mut per_frame = Vec::new();
        for _ in 0..4 {
            per_frame.push(frame_loop.advance(0.5 * FRAME_DT + 1e-9, || {}));
        }
        assert_eq!(per_frame, vec![0, 1, 0, 1]);
    }

    #[test]
    fn test_partial_frame_accumulates() {
        let mut frame_loop = FrameLoop::new();
        assert_eq!(frame_loop.advance(0.25 * FRAME_DT, || {}), 0);
        assert!((frame_loop.alpha() - 0.25).abs() < 1e-9);
        assert!((0.0..1.0).contains(&frame_loop.alpha()));
    }

    #[test]
    fn test_long_stall_is_clamped() {
        let mut frame_loop = FrameLoop::new();
        let ran = frame_loop.advance(5.0, || {});
        let max_steps = (MAX_FRAME_TIME / FRAME_DT).ceil() as u32;
        assert!(ran > 0);
        assert!(ran <= max_steps, "ran {ran} steps, at most {max_steps} expected");
    }

    #[test]
    fn test_negative_and_zero_time_run_nothing() {
        let mut frame_loop = FrameLoop::new();
        assert_eq!(frame_loop.advance(0.0, || {}), 0);
        assert_eq!(frame_loop.advance(-1.0, || {}), 0);
        assert_eq!(frame_loop.alpha(), 0.0);
    }

    #[test]
    fn test_reset_clock_drops_partial_frame() {
        let mut frame_loop = FrameLoop::new();
        frame_loop.advance(0.9 * FRAME_DT, || {});
        frame_loop.reset_clock();
        assert_eq!(frame_loop.alpha(), 0.0);
        assert_eq!(frame_loop.advance(0.2 * FRAME_DT, || {}), 0);
    }

    #[test]
    fn test_identical_sequences_step_identically() {
        let frame_times = [0.017, 0.015, 0.020, 0.016, 0.033, 0.008, 0.018];
        let mut a = FrameLoop::new();
        let mut b = FrameLoop::new();
        for &ft in &frame_times {
            assert_eq!(a.advance(ft, || {}), b.advance(ft, || {}));
        }
        assert_eq!(a.steps(), b.steps());
    }

    #[test]
    fn test_fps_counter_reports_once_per_second() {
        let mut counter = FpsCounter::new();
        let start = Instant::now();
        assert_eq!(counter.record(start), None);

        let mut reported = None;
        for i in 1..=60 {
            let now = start + Duration::from_secs_f64(f64::from(i) / 60.0);
            if let Some(fps) = counter.record(now) {
                reported = Some((i, fps));
            }
        }
        let (at, fps) = reported.unwrap();
        assert_eq!(at, 60);
        assert!((fps - 60.0).abs() < 0.5, "fps {fps}");
    }
}
