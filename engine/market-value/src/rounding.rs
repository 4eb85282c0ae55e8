//! Dollar rounding used by the estimate.
//!
//! Halves round towards positive infinity, so `-2.5` becomes `-2` and `2.5`
//! becomes `3`. Adjustments never round away to nothing: any nonzero amount
//! under a dollar is reported as exactly one dollar in its direction.

/// Round to the nearest whole dollar, halves up
pub fn round_dollars(amount: f64) -> i64 {
    (amount + 0.5).floor() as i64
}

/// Round an adjustment, keeping nonzero sub-dollar amounts at ±$1
pub fn round_adjustment(amount: f64) -> i64 {
    if amount != 0.0 && amount.abs() < 1.0 {
        amount.signum() as i64
    } else {
        round_dollars(amount)
    }
}
