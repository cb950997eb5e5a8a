use std::ops::Index;

use crate::error::{MathError, MathResult};
use crate::Real;

/// A variable-length list of components. Lengths 2, 3 and 4 are the common
/// cases; length 4 vectors are homogeneous (w = 1 for points, w = 0 for
/// directions).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Vector {
    components: Vec<Real>,
}

impl Vector {
    pub fn new(components: Vec<Real>) -> Self {
        return Vector { components };
    }

    pub fn zeros(len: usize) -> Self {
        return Vector { components: vec![0.0; len] };
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn as_slice(&self) -> &[Real] {
        &self.components
    }

    pub fn into_inner(self) -> Vec<Real> {
        self.components
    }

    pub fn x(&self) -> Real {
        self.components.first().copied().unwrap_or(0.0)
    }

    pub fn y(&self) -> Real {
        self.components.get(1).copied().unwrap_or(0.0)
    }

    pub fn z(&self) -> Real {
        self.components.get(2).copied().unwrap_or(0.0)
    }

    pub fn w(&self) -> Real {
        self.components.get(3).copied().unwrap_or(0.0)
    }

    fn check_same_len(&self, other: &Vector) -> MathResult<()> {
        if self.len() != other.len() {
            return Err(MathError::DimensionMismatch { expected: self.len(), found: other.len() });
        }
        Ok(())
    }

    fn zip_with(&self, other: &Vector, f: impl Fn(Real, Real) -> Real) -> MathResult<Vector> {
        self.check_same_len(other)?;
        let components = self.components.iter()
            .zip(other.components.iter())
            .map(|(&a, &b)| f(a, b))
            .collect();
        return Ok(Vector { components });
    }

    pub fn add(&self, other: &Vector) -> MathResult<Vector> {
        self.zip_with(other, |a, b| a + b)
    }

    pub fn subtract(&self, other: &Vector) -> MathResult<Vector> {
        self.zip_with(other, |a, b| a - b)
    }

    /// Elementwise product.
    pub fn multiply(&self, other: &Vector) -> MathResult<Vector> {
        self.zip_with(other, |a, b| a * b)
    }

    pub fn dot(&self, other: &Vector) -> MathResult<Real> {
        self.check_same_len(other)?;
        return Ok(self.components.iter().zip(other.components.iter()).map(|(a, b)| a * b).sum());
    }

    /// Cross product of the first three components of both operands.
    /// The result always has length 3.
    pub fn cross(&self, other: &Vector) -> MathResult<Vector> {
        for operand in [self, other] {
            if operand.len() < 3 {
                return Err(MathError::VectorTooShort { required: 3, found: operand.len() });
            }
        }
        let u = &self.components;
        let v = &other.components;
        return Ok(Vector::new(vec![
            u[1] * v[2] - u[2] * v[1],
            u[2] * v[0] - u[0] * v[2],
            u[0] * v[1] - u[1] * v[0],
        ]));
    }

    pub fn negate(&self) -> Vector {
        Vector::new(self.components.iter().map(|c| -c).collect())
    }

    pub fn magnitude(&self) -> Real {
        self.components.iter().map(|c| c * c).sum::<Real>().sqrt()
    }

    /// Multiplies every component by [factor]. With [preserve_last] the final
    /// component (e.g. alpha or w) is left untouched.
    pub fn scale(&self, factor: Real, preserve_last: bool) -> Vector {
        let last = self.len().saturating_sub(1);
        let components = self.components.iter()
            .enumerate()
            .map(|(i, &c)| if preserve_last && i == last { c } else { c * factor })
            .collect();
        return Vector { components };
    }

    /// Scales the vector to unit length. With [preserve_last] only the leading
    /// components are normalized and the final one is carried over as is.
    pub fn normalize(&self, preserve_last: bool) -> MathResult<Vector> {
        let head = if preserve_last && !self.is_empty() {
            self.slice(0, self.len() - 1)
        } else {
            self.clone()
        };
        let magnitude = head.magnitude();
        if magnitude == 0.0 || !magnitude.is_finite() {
            return Err(MathError::ZeroMagnitude);
        }
        let mut result = head.scale(1.0 / magnitude, false);
        if preserve_last {
            if let Some(&last) = self.components.last() {
                result.components.push(last);
            }
        }
        return Ok(result);
    }

    pub fn slice(&self, start: usize, end: usize) -> Vector {
        let end = end.min(self.len());
        let start = start.min(end);
        Vector::new(self.components[start..end].to_vec())
    }

    /// Component-wise comparison within [epsilon]; vectors of different length
    /// are never equal.
    pub fn approx_eq(&self, other: &Vector, epsilon: Real) -> bool {
        self.len() == other.len()
            && self.components.iter().zip(other.components.iter()).all(|(a, b)| (a - b).abs() <= epsilon)
    }

    /// Reinterprets the vector with exactly [len] components, truncating or
    /// padding with zeros.
    fn resized(&self, len: usize) -> Vector {
        let mut components = self.components.clone();
        components.resize(len, 0.0);
        return Vector { components };
    }

    pub fn to_vec3(&self) -> Vector {
        self.resized(3)
    }

    /// Homogeneous form: x, y, z padded with zeros and w defaulting to 1.
    pub fn to_vec4(&self) -> Vector {
        if self.len() >= 4 {
            return self.resized(4);
        }
        let mut components = self.resized(3).components;
        components.push(1.0);
        return Vector { components };
    }
}

impl Index<usize> for Vector {
    type Output = Real;

    fn index(&self, index: usize) -> &Real {
        &self.components[index]
    }
}

impl From<Vec<Real>> for Vector {
    fn from(components: Vec<Real>) -> Self {
        Vector::new(components)
    }
}

impl<const N: usize> From<[Real; N]> for Vector {
    fn from(components: [Real; N]) -> Self {
        Vector::new(components.to_vec())
    }
}

pub fn vec2(x: Real, y: Real) -> Vector {
    Vector::new(vec![x, y])
}

pub fn vec3(x: Real, y: Real, z: Real) -> Vector {
    Vector::new(vec![x, y, z])
}

pub fn vec4(x: Real, y: Real, z: Real, w: Real) -> Vector {
    Vector::new(vec![x, y, z, w])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn pairwise_operations_require_equal_length() {
        let a = vec3(1.0, 2.0, 3.0);
        let b = vec2(1.0, 2.0);
        assert_eq!(a.add(&b), Err(MathError::DimensionMismatch { expected: 3, found: 2 }));
        assert!(a.subtract(&b).is_err());
        assert!(a.multiply(&b).is_err());
        assert!(a.dot(&b).is_err());
    }

    #[test]
    fn elementwise_arithmetic() {
        let a = vec3(1.0, 2.0, 3.0);
        let b = vec3(4.0, 5.0, 6.0);
        assert_eq!(a.add(&b).unwrap(), vec3(5.0, 7.0, 9.0));
        assert_eq!(b.subtract(&a).unwrap(), vec3(3.0, 3.0, 3.0));
        assert_eq!(a.multiply(&b).unwrap(), vec3(4.0, 10.0, 18.0));
        assert_eq!(a.dot(&b).unwrap(), 32.0);
    }

    #[test]
    fn cross_of_axes_follows_right_hand_rule() {
        let x = vec3(1.0, 0.0, 0.0);
        let y = vec3(0.0, 1.0, 0.0);
        assert_eq!(x.cross(&y).unwrap(), vec3(0.0, 0.0, 1.0));
        assert_eq!(y.cross(&x).unwrap(), vec3(0.0, 0.0, -1.0));
    }

    #[test]
    fn cross_uses_first_three_components_of_homogeneous_vectors() {
        let x = vec4(1.0, 0.0, 0.0, 1.0);
        let y = vec4(0.0, 1.0, 0.0, 1.0);
        assert_eq!(x.cross(&y).unwrap(), vec3(0.0, 0.0, 1.0));
    }

    #[test]
    fn cross_rejects_short_vectors() {
        let a = vec2(1.0, 0.0);
        let b = vec3(0.0, 1.0, 0.0);
        assert_eq!(a.cross(&b), Err(MathError::VectorTooShort { required: 3, found: 2 }));
        assert_eq!(b.cross(&a), Err(MathError::VectorTooShort { required: 3, found: 2 }));
    }

    #[test]
    fn normalize_yields_unit_length() {
        let v = vec3(3.0, 0.0, 4.0).normalize(false).unwrap();
        assert_abs_diff_eq!(v.magnitude(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(v.x(), 0.6, epsilon = 1e-12);
    }

    #[test]
    fn normalize_can_preserve_last_component() {
        let v = vec4(0.0, 2.0, 0.0, 1.0).normalize(true).unwrap();
        assert_eq!(v, vec4(0.0, 1.0, 0.0, 1.0));
    }

    #[test]
    fn normalize_rejects_zero_vector() {
        assert_eq!(Vector::zeros(3).normalize(false), Err(MathError::ZeroMagnitude));
    }

    #[test]
    fn scale_preserving_alpha() {
        let color = vec4(1.0, 0.5, 0.0, 1.0);
        assert_eq!(color.scale(0.5, true), vec4(0.5, 0.25, 0.0, 1.0));
        assert_eq!(color.scale(0.5, false), vec4(0.5, 0.25, 0.0, 0.5));
    }

    #[test]
    fn homogeneous_padding() {
        assert_eq!(vec2(1.0, 2.0).to_vec4(), vec4(1.0, 2.0, 0.0, 1.0));
        assert_eq!(vec4(1.0, 2.0, 3.0, 0.0).to_vec4(), vec4(1.0, 2.0, 3.0, 0.0));
        assert_eq!(vec4(1.0, 2.0, 3.0, 0.0).to_vec3(), vec3(1.0, 2.0, 3.0));
    }

    #[test]
    fn slice_clamps_to_bounds() {
        let v = vec4(1.0, 2.0, 3.0, 4.0);
        assert_eq!(v.slice(1, 3), vec2(2.0, 3.0));
        assert_eq!(v.slice(2, 10), vec2(3.0, 4.0));
        assert!(v.slice(5, 10).is_empty());
    }
}
