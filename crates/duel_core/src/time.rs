//! Frame pacing and the simulation wall clock.
//!
//! The game integrates with the measured per-frame delta rather than a
//! fixed-timestep accumulator. `end_frame` pads short frames by busy-waiting
//! until the target duration has elapsed, then records the actual delta --
//! which therefore never reads below the target on a fast machine but tracks
//! reality when a frame runs long.

use std::time::Instant;

const FPS_SAMPLE_COUNT: usize = 60;

pub struct FrameClock {
    target_dt: f64,
    frame_start: Instant,
    epoch: Instant,
    /// Measured duration of the last completed frame, in seconds.
    pub dt: f64,
    pub frame_count: u64,

    fps_samples: [f64; FPS_SAMPLE_COUNT],
    fps_sample_index: usize,
    pub smoothed_fps: f64,
    pub smoothed_frame_time_ms: f64,
}

impl FrameClock {
    pub fn new(target_fps: u32) -> Self {
        assert!(target_fps > 0, "target fps must be non-zero");
        let target_dt = 1.0 / f64::from(target_fps);
        let now = Instant::now();
        Self {
            target_dt,
            frame_start: now,
            epoch: now,
            dt: target_dt,
            frame_count: 0,
            fps_samples: [target_dt; FPS_SAMPLE_COUNT],
            fps_sample_index: 0,
            smoothed_fps: f64::from(target_fps),
            smoothed_frame_time_ms: target_dt * 1000.0,
        }
    }

    /// Seconds since the clock was created. Monotonic; used as the combat
    /// and animation wall clock.
    pub fn now(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64()
    }

    pub fn begin_frame(&mut self) {
        self.frame_start = Instant::now();
    }

    /// Pad the frame to the target duration, then record the measured delta
    /// and fold it into the rolling FPS average.
    pub fn end_frame(&mut self) {
        while self.frame_start.elapsed().as_secs_f64() < self.target_dt {
            std::hint::spin_loop();
        }
        self.dt = self.frame_start.elapsed().as_secs_f64();
        self.frame_count += 1;

        self.fps_samples[self.fps_sample_index] = self.dt;
        self.fps_sample_index = (self.fps_sample_index + 1) % FPS_SAMPLE_COUNT;
        let avg_dt: f64 = self.fps_samples.iter().sum::<f64>() / FPS_SAMPLE_COUNT as f64;
        self.smoothed_frame_time_ms = avg_dt * 1000.0;
        self.smoothed_fps = if avg_dt > 0.0 { 1.0 / avg_dt } else { 0.0 };
    }
}
