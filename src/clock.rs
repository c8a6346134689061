//! Rate-capped frame pump
//!
//! One `tick` per frame: blocks (plain sleep, no busy-wait) until the target
//! frame duration has passed, then reports wall-clock dt. Physics consumes
//! the raw dt; there is no smoothing or fixed-step accumulation.

use std::time::{Duration, Instant};

use crate::consts::MAX_FRAME_DT;

/// Frame pump with a target rate and a dt ceiling
#[derive(Debug)]
pub struct Clock {
    target: Duration,
    last: Instant,
}

impl Clock {
    /// `target_hz` caps the frame rate (60 or 120 for these games)
    pub fn new(target_hz: u32) -> Self {
        Self {
            target: Duration::from_secs_f64(1.0 / target_hz.max(1) as f64),
            last: Instant::now(),
        }
    }

    /// Sleep out the remainder of the frame, then return elapsed seconds
    /// since the previous tick, capped at [`MAX_FRAME_DT`].
    pub fn tick(&mut self) -> f32 {
        let elapsed = self.last.elapsed();
        if elapsed < self.target {
            std::thread::sleep(self.target - elapsed);
        }
        let now = Instant::now();
        let dt = (now - self.last).as_secs_f32().min(MAX_FRAME_DT);
        self.last = now;
        dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_caps_dt_on_stall() {
        let mut clock = Clock::new(60);
        std::thread::sleep(Duration::from_millis(150));
        let dt = clock.tick();
        assert!(dt <= MAX_FRAME_DT);
    }

    #[test]
    fn test_tick_respects_target_rate() {
        let mut clock = Clock::new(120);
        clock.tick();
        let dt = clock.tick();
        // At least one frame period must have elapsed
        assert!(dt >= 1.0 / 121.0);
    }
}
