//! Stateless indicator functions over price series (oldest first).
//!
//! Undefined values (insufficient history, flat range) are `None`, never NaN.

pub mod sma;
pub mod stochastic;

pub use sma::{moving_average, moving_average_opt};
pub use stochastic::{
    stochastic_oscillator, stochastic_oscillator_default, Stochastic, DEFAULT_D_PERIOD,
    DEFAULT_K_PERIOD,
};

#[cfg(test)]
pub(crate) fn assert_approx(actual: Option<f64>, expected: f64) {
    let value = actual.unwrap_or_else(|| panic!("expected {expected}, got undefined"));
    assert!(
        (value - expected).abs() < 1e-9,
        "expected {expected}, got {value}"
    );
}
