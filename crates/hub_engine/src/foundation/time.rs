//! Frame timing utilities

use std::time::{Duration, Instant};

/// Frame clock measuring the elapsed time between engine frames
pub struct Timer {
    last_frame: Instant,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a new timer
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Mark the start of a frame and return seconds since the previous mark
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        self.delta_time = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.record(self.delta_time);
        self.delta_time
    }

    /// Account for a frame whose duration was supplied by the caller
    pub fn record(&mut self, delta_time: f32) {
        self.delta_time = delta_time;
        self.total_time += delta_time;
        self.frame_count += 1;
    }

    /// Get the time since the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the total elapsed time since timer creation
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the average FPS since timer creation
    pub fn average_fps(&self) -> f32 {
        if self.total_time > 0.0 {
            self.frame_count as f32 / self.total_time
        } else {
            0.0
        }
    }

    /// Sleep out the remainder of the frame budget for `fps_limit`.
    ///
    /// A limit of zero disables pacing.
    pub fn pace(&self, fps_limit: u32) {
        if fps_limit == 0 {
            return;
        }
        let budget = Duration::from_secs_f64(1.0 / f64::from(fps_limit));
        let spent = self.last_frame.elapsed();
        if let Some(remaining) = budget.checked_sub(spent) {
            std::thread::sleep(remaining);
        }
    }
}
