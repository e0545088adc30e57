use std::time::{Duration, Instant};

/// Frame metadata - carries frame number and timing info
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    pub number: u64,
    pub time: f32,
    pub delta: f32,
}

impl FrameInfo {
    pub fn new(number: u64, time: f32, delta: f32) -> Self {
        Self { number, time, delta }
    }
}

/// Wall-clock frame timer for the render loop
#[derive(Debug)]
pub struct FrameClock {
    frame_number: u64,
    start_time: Instant,
    last_frame_time: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            frame_number: 0,
            start_time: now,
            last_frame_time: now,
        }
    }

    /// Advance one frame and return its timing
    pub fn tick(&mut self) -> FrameInfo {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame_time).as_secs_f32();
        let time = now.duration_since(self.start_time).as_secs_f32();

        let info = FrameInfo::new(self.frame_number, time, delta);

        self.frame_number += 1;
        self.last_frame_time = now;
        info
    }

    /// Forget time spent while not rendering (e.g. minimized)
    pub fn reset(&mut self) {
        self.last_frame_time = Instant::now();
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Deterministic frames at a fixed rate, for headless runs
#[derive(Debug, Clone)]
pub struct FixedFrames {
    delta: f32,
    number: u64,
    remaining: u64,
}

impl FixedFrames {
    pub fn new(hz: f32, count: u64) -> Self {
        Self {
            delta: 1.0 / hz,
            number: 0,
            remaining: count,
        }
    }
}

impl Iterator for FixedFrames {
    type Item = FrameInfo;

    fn next(&mut self) -> Option<FrameInfo> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let info = FrameInfo::new(self.number, self.number as f32 * self.delta, self.delta);
        self.number += 1;
        Some(info)
    }
}

/// Frames-per-second average over one-second windows
#[derive(Debug, Clone, Default)]
pub struct FpsCounter {
    frames: u32,
    /// Summed as a `Duration` so sixty 1/60 s frames close a window exactly
    elapsed: Duration,
    fps: f32,
}

impl FpsCounter {
    const WINDOW: Duration = Duration::from_secs(1);

    /// Count a frame; returns the new average when a window closes
    pub fn tick(&mut self, delta: f32) -> Option<f32> {
        self.frames += 1;
        if delta.is_finite() && delta > 0.0 {
            self.elapsed += Duration::from_secs_f32(delta);
        }

        if self.elapsed < Self::WINDOW {
            return None;
        }
        self.fps = self.frames as f32 / self.elapsed.as_secs_f32();
        self.frames = 0;
        self.elapsed = Duration::ZERO;
        Some(self.fps)
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn clock_measures_delta() {
        let mut clock = FrameClock::new();

        thread::sleep(Duration::from_millis(10));
        let frame = clock.tick();

        assert!(frame.delta >= 0.009);
        assert_eq!(frame.number, 0);
        assert_eq!(clock.tick().number, 1);
    }

    #[test]
    fn clock_reset_drops_pause() {
        let mut clock = FrameClock::new();

        thread::sleep(Duration::from_millis(10));
        clock.reset();

        assert!(clock.tick().delta < 0.009);
    }

    #[test]
    fn fixed_frames_yield_count() {
        let frames: Vec<_> = FixedFrames::new(60.0, 3).collect();
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[2].number, 2);
        assert!((frames[2].time - 2.0 / 60.0).abs() < 1e-6);
        assert!(frames.iter().all(|f| (f.delta - 1.0 / 60.0).abs() < 1e-9));
    }

    #[test]
    fn fixed_frames_start_at_time_zero() {
        let mut frames = FixedFrames::new(30.0, 2);
        let first = frames.next().unwrap();
        assert_eq!((first.number, first.time), (0, 0.0));

        // Same convention as the wall clock: frame n ends at n * delta
        let second = frames.next().unwrap();
        assert!((second.time - second.delta).abs() < 1e-9);
        assert!(frames.next().is_none());
    }

    #[test]
    fn fps_counter_reports_per_window() {
        let mut fps = FpsCounter::default();
        for _ in 0..59 {
            assert!(fps.tick(1.0 / 60.0).is_none());
        }
        let reported = fps.tick(1.0 / 60.0).unwrap();
        assert!((reported - 60.0).abs() < 0.5);
        assert_eq!(fps.fps(), reported);

        // The next window starts from scratch
        for _ in 0..29 {
            assert!(fps.tick(1.0 / 30.0).is_none());
        }
        assert!((fps.tick(1.0 / 30.0).unwrap() - 30.0).abs() < 0.5);
    }
}
