//! Per-variable remapping of the raw series value.
//!
//! Each [`VariableKind`] owns one row of a static table; adding a variable is a
//! data change here rather than another branch in the generator.

use crate::types::variable::VariableKind;
use crate::utils::round_to;

/// Which per-point quantity a variable is derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Basis {
    /// The shared raw value built from the seasonal, daily and random factors.
    Raw,
    /// The per-point random factor alone, independent of the raw value.
    RandomFactor,
}

/// `clamp(round(offset + scale * basis, decimals), min, max)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SeriesTransform {
    pub basis: Basis,
    pub scale: f64,
    pub offset: f64,
    pub decimals: u32,
    pub min: f64,
    pub max: f64,
}

// Indexed by the `VariableKind` discriminant.
static SERIES_TRANSFORMS: [SeriesTransform; 7] = [
    // temperature
    SeriesTransform {
        basis: Basis::Raw,
        scale: 1.0,
        offset: 0.0,
        decimals: 1,
        min: -90.0,
        max: 60.0,
    },
    // humidity
    SeriesTransform {
        basis: Basis::Raw,
        scale: 0.6,
        offset: 0.0,
        decimals: 0,
        min: 0.0,
        max: 100.0,
    },
    // wind-speed
    SeriesTransform {
        basis: Basis::Raw,
        scale: 0.3,
        offset: 0.0,
        decimals: 1,
        min: 0.0,
        max: 150.0,
    },
    // pressure
    SeriesTransform {
        basis: Basis::Raw,
        scale: 0.1,
        offset: 1000.0,
        decimals: 0,
        min: 870.0,
        max: 1085.0,
    },
    // uv-index
    SeriesTransform {
        basis: Basis::Raw,
        scale: 0.2,
        offset: 0.0,
        decimals: 1,
        min: 0.0,
        max: 11.0,
    },
    // air-quality
    SeriesTransform {
        basis: Basis::Raw,
        scale: 0.8,
        offset: 0.0,
        decimals: 0,
        min: 0.0,
        max: 500.0,
    },
    // precipitation
    SeriesTransform {
        basis: Basis::RandomFactor,
        scale: 60.0,
        offset: 0.0,
        decimals: 0,
        min: 0.0,
        max: 100.0,
    },
];

impl SeriesTransform {
    pub(crate) fn lookup(kind: VariableKind) -> &'static SeriesTransform {
        &SERIES_TRANSFORMS[kind as usize]
    }

    pub(crate) fn apply(&self, raw: f64, random_factor: f64) -> f64 {
        let basis = match self.basis {
            Basis::Raw => raw,
            Basis::RandomFactor => random_factor,
        };
        round_to(self.offset + self.scale * basis, self.decimals).clamp(self.min, self.max)
    }
}
