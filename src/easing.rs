use std::time::Duration;

use crate::duration_to_f32;

/// Interpolation curve used by timed transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl Easing {
    /// Interpolates from `start` over `range` as `elapsed` approaches
    /// `duration`. Progress is clamped, so overshooting frames are safe.
    pub fn apply(self, start: f32, range: f32, elapsed: Duration, duration: Duration) -> f32 {
        if duration == Duration::new(0, 0) {
            return start + range;
        }
        let t = duration_to_f32(elapsed) / duration_to_f32(duration);
        let t = t.min(1.0).max(0.0);
        start + range * self.curve(t)
    }

    fn curve(self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t * t,
            Easing::EaseOut => {
                let t = 1.0 - t;
                1.0 - t * t * t
            }
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let t = 1.0 - t;
                    1.0 - 4.0 * t * t * t
                }
            }
        }
    }
}
