//! Synthetic weather generation.
//!
//! Both generators are pure functions of their arguments plus an injected
//! [`UnitSource`]; they never touch global state or an ambient RNG.

pub mod jitter;
pub mod series;
pub mod snapshot;
pub(crate) mod transform;
