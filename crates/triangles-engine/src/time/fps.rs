use std::time::Duration;

use super::FrameTime;

/// Averages frame rate over fixed windows.
///
/// Feed it every [`FrameTime`]; it yields a reading each time a full window
/// has elapsed.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    window: f32,
    elapsed: f32,
    frames: u32,
    last: Option<f32>,
}

impl FpsCounter {
    pub fn new(window: Duration) -> Self {
        Self {
            window: window.as_secs_f32().max(f32::EPSILON),
            elapsed: 0.0,
            frames: 0,
            last: None,
        }
    }

    /// Returns the average over the window that just closed, if any.
    pub fn record(&mut self, frame: FrameTime) -> Option<f32> {
        self.elapsed += frame.dt;
        self.frames += 1;
        if self.elapsed < self.window {
            return None;
        }
        let fps = self.frames as f32 / self.elapsed;
        self.elapsed = 0.0;
        self.frames = 0;
        self.last = Some(fps);
        Some(fps)
    }

    /// Most recent reading.
    pub fn fps(&self) -> Option<f32> {
        self.last
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;

    fn frame(dt: f32) -> FrameTime {
        FrameTime { dt, now: Instant::now(), frame_index: 0 }
    }

    #[test]
    fn reports_after_full_window() {
        let mut fps = FpsCounter::new(Duration::from_millis(990));
        for _ in 0..59 {
            assert_eq!(fps.record(frame(1.0 / 60.0)), None);
        }
        let reading = fps.record(frame(1.0 / 60.0)).unwrap();
        assert!((reading - 60.0).abs() < 0.5);
        assert_eq!(fps.fps(), Some(reading));
    }

    #[test]
    fn window_restarts_after_reading() {
        let mut fps = FpsCounter::new(Duration::from_millis(100));
        assert!(fps.record(frame(0.1)).is_some());
        assert_eq!(fps.record(frame(0.05)), None);
        assert!(fps.record(frame(0.06)).is_some());
    }
}
