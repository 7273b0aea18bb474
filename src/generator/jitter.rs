//! The random source both generators draw their jitter from.

use rand::RngCore;

/// Supplies uniform draws in `[0, 1)`.
///
/// Every [`rand::RngCore`] is a `UnitSource`, so `rand::rng()` or a seeded
/// `StdRng` can be passed straight to the generators. Tests use
/// [`ConstantSource`] to pin every draw to a known value.
pub trait UnitSource {
    fn next_unit(&mut self) -> f64;
}

impl<R: RngCore + ?Sized> UnitSource for R {
    fn next_unit(&mut self) -> f64 {
        rand::Rng::random::<f64>(self)
    }
}

/// A source that returns the same value for every draw.
///
/// `ConstantSource::new(0.5)` cancels the snapshot jitter, leaving the
/// coordinate-derived base values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantSource(f64);

impl ConstantSource {
    /// Creates a constant source, clamping `value` into `[0, 1)`.
    pub fn new(value: f64) -> Self {
        Self(value.clamp(0.0, 1.0 - f64::EPSILON))
    }

    pub fn zero() -> Self {
        Self(0.0)
    }
}

impl UnitSource for ConstantSource {
    fn next_unit(&mut self) -> f64 {
        self.0
    }
}
