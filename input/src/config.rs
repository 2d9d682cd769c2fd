use std::time::Duration;

use serde::Deserialize;

/// Thresholds of the gesture recognizer. Distances are in logical pixels.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// How long a single contact must be held still to be a long press.
    pub long_press_delay_ms: u64,
    /// Moving further than this from the start disarms the long press.
    pub long_press_slop: f64,
    /// Minimum scale change before a new pinch update is emitted.
    pub pinch_hysteresis: f64,
    /// Minimum angle change in degrees before a new rotate update is emitted.
    pub rotate_threshold: f64,
    /// Distance the three finger centroid must travel to count as a swipe.
    pub swipe_threshold: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            long_press_delay_ms: 550,
            long_press_slop: 7.0,
            pinch_hysteresis: 0.015,
            rotate_threshold: 1.5,
            swipe_threshold: 70.0,
        }
    }
}

impl GestureConfig {
    pub fn long_press_delay(&self) -> Duration {
        Duration::from_millis(self.long_press_delay_ms)
    }

    #[must_use]
    pub fn with_long_press_delay(mut self, delay: Duration) -> Self {
        self.long_press_delay_ms = delay.as_millis() as u64;
        self
    }

    #[must_use]
    pub fn with_long_press_slop(mut self, slop: f64) -> Self {
        self.long_press_slop = slop;
        self
    }

    #[must_use]
    pub fn with_pinch_hysteresis(mut self, hysteresis: f64) -> Self {
        self.pinch_hysteresis = hysteresis;
        self
    }

    #[must_use]
    pub fn with_rotate_threshold(mut self, degrees: f64) -> Self {
        self.rotate_threshold = degrees;
        self
    }

    #[must_use]
    pub fn with_swipe_threshold(mut self, distance: f64) -> Self {
        self.swipe_threshold = distance;
        self
    }
}
