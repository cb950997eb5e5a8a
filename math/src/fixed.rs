/// Generates a fixed-size wrapper around [crate::Transformation]. The wrapper
/// keeps the size invariant, so composing two of them cannot fail.
macro_rules! fixed_size_transformation {
    ($(#[$meta:meta])* $name:ident, $size:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            inner: $crate::transformation::Transformation,
        }

        impl $name {
            pub const SIZE: usize = $size;

            pub fn identity() -> Self {
                $name { inner: $crate::transformation::Transformation::identity($size) }
            }

            pub fn generate(generator: impl FnMut(usize, usize) -> $crate::Real) -> Self {
                $name { inner: $crate::transformation::Transformation::generate($size, generator) }
            }

            pub fn get(&self, row: usize, col: usize) -> $crate::Real {
                self.inner.get(row, col)
            }

            pub fn row(&self, index: usize) -> $crate::vector::Vector {
                self.inner.row(index)
            }

            pub fn col(&self, index: usize) -> $crate::vector::Vector {
                self.inner.col(index)
            }

            pub fn as_transformation(&self) -> &$crate::transformation::Transformation {
                &self.inner
            }

            pub fn into_transformation(self) -> $crate::transformation::Transformation {
                self.inner
            }

            /// `self · right`.
            pub fn append(&self, right: &$name) -> $name {
                $name { inner: self.inner.product(&right.inner) }
            }

            /// `self · right` for a generic transformation, which must be
            /// of the same size.
            pub fn append_transformation(
                &self,
                right: &$crate::transformation::Transformation,
            ) -> $crate::error::MathResult<$name> {
                Ok($name { inner: self.inner.append(right)? })
            }

            pub(crate) fn append_raw(&self, right: &$crate::transformation::Transformation) -> $name {
                $name { inner: self.inner.product(right) }
            }

            pub fn transpose(&self) -> $name {
                $name { inner: self.inner.transpose() }
            }

            pub fn determinant(&self) -> $crate::Real {
                self.inner.determinant()
            }

            pub fn inverse(&self) -> $crate::error::MathResult<$name> {
                Ok($name { inner: self.inner.inverse()? })
            }

            pub fn inverse_within(&self, epsilon: $crate::Real) -> $crate::error::MathResult<$name> {
                Ok($name { inner: self.inner.inverse_within(epsilon)? })
            }

            pub fn transform_vector(
                &self,
                vector: &$crate::vector::Vector,
            ) -> $crate::error::MathResult<$crate::vector::Vector> {
                self.inner.transform_vector(vector)
            }

            pub fn to_cols_array(&self) -> Vec<$crate::Real> {
                self.inner.to_cols_array()
            }

            pub fn approx_eq(&self, other: &$name, epsilon: $crate::Real) -> bool {
                self.inner.approx_eq(&other.inner, epsilon)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::identity()
            }
        }

        impl TryFrom<$crate::transformation::Transformation> for $name {
            type Error = $crate::error::MathError;

            fn try_from(inner: $crate::transformation::Transformation) -> Result<Self, Self::Error> {
                if inner.size() != $size {
                    return Err($crate::error::MathError::DimensionMismatch { expected: $size, found: inner.size() });
                }
                Ok($name { inner })
            }
        }

        impl From<$name> for $crate::transformation::Transformation {
            fn from(matrix: $name) -> Self {
                matrix.inner
            }
        }
    };
}

pub(crate) use fixed_size_transformation;

/// Fails unless [vector] has exactly [expected] components.
pub(crate) fn expect_len(vector: &crate::vector::Vector, expected: usize) -> crate::error::MathResult<()> {
    if vector.len() != expected {
        return Err(crate::error::MathError::DimensionMismatch { expected, found: vector.len() });
    }
    Ok(())
}
