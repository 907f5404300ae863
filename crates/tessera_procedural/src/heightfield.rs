//! # HeightField
//!
//! A fixed superposition of three sines at incommensurate frequencies.
//! Not noise, but it never repeats visibly and needs no seed.
//!
//! ## Determinism Guarantee
//!
//! `height(x)` is a pure function of `x` and the constants: the same column
//! has the same surface row on every call and every run.

use std::f64::consts::{E, PI};

use crate::config::{HeightParams, WorldConfig};

/// Column → surface row mapping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeightField {
    params: HeightParams,
    base_height: i32,
}

impl HeightField {
    /// Creates a heightfield from explicit constants.
    #[must_use]
    pub const fn new(params: HeightParams, base_height: i32) -> Self {
        Self { params, base_height }
    }

    /// Creates the heightfield described by a world configuration.
    #[must_use]
    pub fn from_config(config: &WorldConfig) -> Self {
        Self::new(config.height, config.base_height)
    }

    /// The sine superposition before flooring and offset.
    #[must_use]
    pub fn raw(&self, x: i32) -> f64 {
        let p = &self.params;
        let x = f64::from(x);
        p.factor_total
            * (p.factor_1 * (p.scale_1 * x).sin()
                + p.factor_e * (p.scale_e * E * x).sin()
                + p.factor_pi * (p.scale_pi * PI * x).sin())
    }

    /// Surface row of column `x`: rows above are empty, this row is grass,
    /// rows below are dirt.
    #[inline]
    #[must_use]
    pub fn height(&self, x: i32) -> i32 {
        self.raw(x).floor() as i32 + self.base_height
    }

    /// Row offset added to every sample.
    #[must_use]
    pub const fn base_height(&self) -> i32 {
        self.base_height
    }
}

impl Default for HeightField {
    fn default() -> Self {
        Self::from_config(&WorldConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn closed_form(x: f64) -> f64 {
        0.3 * (-3.2 * (0.1 * x).sin() + -1.2 * (-1.1 * E * x).sin() + 1.9 * (0.4 * PI * x).sin())
    }

    #[test]
    fn test_origin_height_is_base() {
        let field = HeightField::default();
        assert_eq!(field.raw(0), 0.0);
        assert_eq!(field.height(0), 10);
    }

    #[test]
    fn test_matches_closed_form() {
        let field = HeightField::default();
        for x in -500..500 {
            let expected = closed_form(f64::from(x));
            assert!(
                (field.raw(x) - expected).abs() < 1e-12,
                "raw({x}) = {} vs {expected}",
                field.raw(x)
            );
            assert_eq!(field.height(x), expected.floor() as i32 + 10);
        }
    }

    #[test]
    fn test_deterministic() {
        let a = HeightField::default();
        let b = HeightField::default();
        for x in -1000..1000 {
            assert_eq!(a.height(x), a.height(x));
            assert_eq!(a.height(x), b.height(x));
        }
    }

    #[test]
    fn test_amplitude_is_bounded() {
        // |raw| <= 0.3 * (3.2 + 1.2 + 1.9)
        let field = HeightField::default();
        for x in -2000..2000 {
            let h = field.height(x);
            assert!((8..=12).contains(&h), "height({x}) = {h}");
        }
    }

    #[test]
    fn test_base_height_shifts_profile() {
        let low = HeightField::new(HeightParams::REFERENCE, 0);
        let high = HeightField::new(HeightParams::REFERENCE, 25);
        for x in -100..100 {
            assert_eq!(high.height(x) - low.height(x), 25);
        }
    }
}
