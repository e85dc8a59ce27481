//! Rolling close-price volatility.
//!
//! Sample standard deviation of bar closes over a trailing window. The
//! value is undefined until the window is full.

use statrs::statistics::Statistics;
use std::collections::VecDeque;

/// Rolling standard deviation calculator.
#[derive(Debug, Clone)]
pub struct RollingStdDev {
    /// Window size in observations.
    window: usize,
    /// Recent closes.
    values: VecDeque<f64>,
}

impl RollingStdDev {
    /// Create a new rolling standard deviation calculator.
    pub fn new(window: usize) -> Self {
        assert!(window >= 2, "Window must hold at least two observations");
        Self {
            window,
            values: VecDeque::with_capacity(window),
        }
    }

    /// Add a close observation.
    ///
    /// Returns the current deviation once the window is full.
    pub fn update(&mut self, value: f64) -> Option<f64> {
        if self.values.len() >= self.window {
            self.values.pop_front();
        }
        self.values.push_back(value);
        self.std_dev()
    }

    /// Current sample standard deviation, defined once the window is full.
    pub fn std_dev(&self) -> Option<f64> {
        if self.values.len() < self.window {
            return None;
        }
        Some(self.values.iter().copied().std_dev())
    }

    /// Whether the window is full.
    pub fn is_ready(&self) -> bool {
        self.values.len() >= self.window
    }

    /// Get the number of observations held.
    pub fn count(&self) -> usize {
        self.values.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_not_ready() {
        let mut vol = RollingStdDev::new(20);
        for i in 0..19 {
            assert!(vol.update(100.0 + i as f64).is_none());
        }
        assert!(!vol.is_ready());
        assert!(vol.update(119.0).is_some());
        assert!(vol.is_ready());
    }

    #[test]
    fn test_constant_closes() {
        let mut vol = RollingStdDev::new(5);
        let mut last = None;
        for _ in 0..10 {
            last = vol.update(100.0);
        }
        assert_relative_eq!(last.unwrap(), 0.0);
    }

    #[test]
    fn test_known_deviation() {
        // Sample std of [1, 2, 3, 4]: variance = 5/3.
        let mut vol = RollingStdDev::new(4);
        let mut last = None;
        for value in [1.0, 2.0, 3.0, 4.0] {
            last = vol.update(value);
        }
        assert_relative_eq!(last.unwrap(), (5.0f64 / 3.0).sqrt(), epsilon = 1e-10);
    }

    #[test]
    fn test_window_slides() {
        let mut vol = RollingStdDev::new(3);
        for value in [1.0, 2.0, 3.0, 10.0] {
            vol.update(value);
        }
        assert_eq!(vol.count(), 3);
        // Window now holds [2, 3, 10]: sample variance = (9 + 4 + 25) / 2.
        assert_relative_eq!(vol.std_dev().unwrap(), 19.0f64.sqrt(), epsilon = 1e-10);
    }
}
