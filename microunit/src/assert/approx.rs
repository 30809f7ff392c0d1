//! Numeric proximity for `assert_almost_equal` / `assert_not_almost_equal`.

use crate::error::InvalidArgument;

/// Decimal places compared when neither `places` nor `delta` is given.
pub const DEFAULT_PLACES: i32 = 7;

/// Tolerance options. Setting both `places` and `delta` is rejected when the
/// assertion runs.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Approx {
    places: Option<i32>,
    delta: Option<f64>,
}

/// How close two numbers must be, once the options are validated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Tolerance {
    Places(i32),
    Delta(f64),
}

impl Approx {
    pub fn places(places: i32) -> Self {
        Self::default().with_places(places)
    }

    pub fn delta(delta: f64) -> Self {
        Self::default().with_delta(delta)
    }

    pub fn with_places(mut self, places: i32) -> Self {
        self.places = Some(places);
        self
    }

    pub fn with_delta(mut self, delta: f64) -> Self {
        self.delta = Some(delta);
        self
    }

    pub(crate) fn tolerance(&self) -> Result<Tolerance, InvalidArgument> {
        match (self.places, self.delta) {
            (Some(_), Some(_)) => Err(InvalidArgument(
                "specify delta or places not both".to_string(),
            )),
            (_, Some(delta)) => Ok(Tolerance::Delta(delta)),
            (places, None) => Ok(Tolerance::Places(places.unwrap_or(DEFAULT_PLACES))),
        }
    }
}

impl Tolerance {
    /// Whether `x` and `y` are within tolerance. NaN is never close.
    pub(crate) fn close(&self, x: f64, y: f64) -> bool {
        if x == y {
            return true;
        }
        let diff = (x - y).abs();
        match *self {
            Tolerance::Delta(delta) => diff <= delta,
            Tolerance::Places(places) => rounds_to_zero(diff, places),
        }
    }

    /// Whether `x` and `y` are strictly outside tolerance. Under a delta a
    /// NaN difference is never far; under places it never rounds to zero.
    pub(crate) fn far(&self, x: f64, y: f64) -> bool {
        if x == y {
            return false;
        }
        let diff = (x - y).abs();
        match *self {
            Tolerance::Delta(delta) => diff > delta,
            Tolerance::Places(places) => !rounds_to_zero(diff, places),
        }
    }

    pub(crate) fn describe(&self) -> String {
        match self {
            Tolerance::Delta(delta) => format!("{delta:?} delta"),
            Tolerance::Places(places) => format!("{places} places"),
        }
    }
}

/// `round(value, places) == 0` on the exact value of `value`, ties to even.
///
/// That holds iff `|value| * 10^places <= 0.5`. `10^places` is exact for
/// `0..=22` and `0.5 * 10^-places` for negative places, so the comparison
/// is exact there. NaN never rounds to zero.
fn rounds_to_zero(value: f64, places: i32) -> bool {
    let value = value.abs();
    match places {
        0..=22 => value.mul_add(10f64.powi(places), -0.5) <= 0.0,
        p if p < 0 => value <= 0.5 * 10f64.powi(-p),
        _ => (value * 10f64.powi(places)).round_ties_even() == 0.0,
    }
}
