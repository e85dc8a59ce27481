//! Relative Strength Index.
//!
//! Wilder-smoothed RSI over bar closes. The first `period` price changes
//! seed the smoothed averages with a simple mean; every change after that
//! is folded in with Wilder's recursion. The value is undefined until the
//! seed window is full.

/// Incremental RSI calculator.
#[derive(Debug, Clone)]
pub struct Rsi {
    /// Smoothing period.
    period: usize,
    /// Previous close (for computing the next change).
    prev_close: Option<f64>,
    /// Price changes absorbed so far.
    count: usize,
    /// Seed sums for the first `period` changes.
    gain_sum: f64,
    loss_sum: f64,
    /// Smoothed averages, valid once `count >= period`.
    avg_gain: f64,
    avg_loss: f64,
}

impl Rsi {
    /// Create a new RSI calculator.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self {
            period,
            prev_close: None,
            count: 0,
            gain_sum: 0.0,
            loss_sum: 0.0,
            avg_gain: 0.0,
            avg_loss: 0.0,
        }
    }

    /// Absorb the next close.
    ///
    /// Returns the current RSI once `period` changes have been absorbed.
    pub fn update(&mut self, close: f64) -> Option<f64> {
        let prev = match self.prev_close.replace(close) {
            Some(prev) => prev,
            None => return None,
        };

        let change = close - prev;
        let (gain, loss) = if change > 0.0 {
            (change, 0.0)
        } else {
            (0.0, -change)
        };

        self.count += 1;
        let period = self.period as f64;

        if self.count <= self.period {
            self.gain_sum += gain;
            self.loss_sum += loss;
            if self.count < self.period {
                return None;
            }
            // Seed: simple average of the first `period` changes.
            self.avg_gain = self.gain_sum / period;
            self.avg_loss = self.loss_sum / period;
        } else {
            // Wilder smoothing: avg = (prev_avg * (period - 1) + value) / period
            self.avg_gain = (self.avg_gain * (period - 1.0) + gain) / period;
            self.avg_loss = (self.avg_loss * (period - 1.0) + loss) / period;
        }

        Some(self.value())
    }

    /// Whether enough changes have been absorbed to produce a value.
    pub fn is_ready(&self) -> bool {
        self.count >= self.period
    }

    fn value(&self) -> f64 {
        if self.avg_loss == 0.0 {
            100.0
        } else {
            100.0 - 100.0 / (1.0 + self.avg_gain / self.avg_loss)
        }
    }
}
