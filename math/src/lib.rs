//! Small dense linear algebra for homogeneous transforms.
//!
//! [Transformation] is a square matrix of any size; [Mat4] and [Mat3] fix the
//! size for 3D and 2D work. Inversion uses cofactor expansion, which is only
//! sensible for the small sizes used here.

mod error;
mod fixed;
mod interop;
mod mat3;
mod mat4;
mod transformation;
mod vector;

pub use error::{MathError, MathResult};
pub use mat3::Mat3;
pub use mat4::Mat4;
pub use transformation::Transformation;
pub use vector::{vec2, vec3, vec4, Vector};

pub type Real = f64;

pub fn radians(degrees: Real) -> Real {
    degrees * std::f64::consts::PI / 180.0
}

pub fn degrees(radians: Real) -> Real {
    radians * 180.0 / std::f64::consts::PI
}
