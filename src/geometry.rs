//! Angle conversion and decomposition of a 2×2 linear transform block.

use crate::core::{Affine, Vec2};

pub fn radians_to_degrees(radians: f64) -> f64 {
    radians * (180.0 / std::f64::consts::PI)
}

/// The linear part of an affine transform, stored as two basis vectors.
///
/// `(m00, m01)` is the image of the x axis and `(m10, m11)` the image of the
/// y axis. For a `kurbo::Affine` with coefficients `[a, b, c, d, e, f]` that is
/// `m00 = a, m01 = b, m10 = c, m11 = d`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearBlock {
    pub m00: f64,
    pub m01: f64,
    pub m10: f64,
    pub m11: f64,
}

impl LinearBlock {
    pub const IDENTITY: Self = Self {
        m00: 1.0,
        m01: 0.0,
        m10: 0.0,
        m11: 1.0,
    };

    pub fn from_basis(x_axis: Vec2, y_axis: Vec2) -> Self {
        Self {
            m00: x_axis.x,
            m01: x_axis.y,
            m10: y_axis.x,
            m11: y_axis.y,
        }
    }

    /// Drops the translation column.
    pub fn from_affine(affine: Affine) -> Self {
        let [a, b, c, d, _, _] = affine.as_coeffs();
        Self {
            m00: a,
            m01: b,
            m10: c,
            m11: d,
        }
    }
}

impl From<Affine> for LinearBlock {
    fn from(affine: Affine) -> Self {
        Self::from_affine(affine)
    }
}

/// Scale magnitudes, rotation (degrees) and skew (degrees) of a linear block.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DecomposedTransform {
    pub scale: Vec2,
    pub rotation: f64,
    pub skew: Vec2,
}

/// Splits `m` into scale, rotation and skew.
///
/// The first basis vector drives rotation; the second basis vector's deviation
/// drives skew, both skew terms measured against the raw `m11`. Exported
/// documents depend on this exact convention. Inputs are not validated: NaN
/// propagates to the outputs.
pub fn decompose(m: LinearBlock) -> DecomposedTransform {
    let scale = Vec2::new(m.m00.hypot(m.m01), m.m10.hypot(m.m11));
    let rotation = radians_to_degrees(m.m01.atan2(m.m00));
    let skew = Vec2::new(
        radians_to_degrees(m.m10.atan2(m.m11)),
        radians_to_degrees((-m.m01).atan2(m.m11)),
    );

    DecomposedTransform {
        scale,
        rotation,
        skew,
    }
}
