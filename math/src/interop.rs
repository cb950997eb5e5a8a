//! Conversions between the algebra types and glam, which is what the
//! rendering side consumes (single precision, column-major).

use glam::{DVec3, Vec3};

use crate::mat4::Mat4;
use crate::vector::Vector;

impl From<&Mat4> for glam::Mat4 {
    fn from(matrix: &Mat4) -> Self {
        let mut cols = [0.0f32; 16];
        for (dst, src) in cols.iter_mut().zip(matrix.to_cols_array()) {
            *dst = src as f32;
        }
        glam::Mat4::from_cols_array(&cols)
    }
}

impl From<glam::Mat4> for Mat4 {
    fn from(matrix: glam::Mat4) -> Self {
        let cols = matrix.to_cols_array();
        Mat4::generate(|r, c| cols[c * 4 + r] as f64)
    }
}

impl Mat4 {
    /// Column-major single-precision cells, ready for a uniform buffer.
    pub fn to_cols_array_2d(&self) -> [[f32; 4]; 4] {
        glam::Mat4::from(self).to_cols_array_2d()
    }
}

impl From<&Vector> for DVec3 {
    fn from(v: &Vector) -> Self {
        DVec3::new(v.x(), v.y(), v.z())
    }
}

impl From<&Vector> for Vec3 {
    fn from(v: &Vector) -> Self {
        Vec3::new(v.x() as f32, v.y() as f32, v.z() as f32)
    }
}

impl From<DVec3> for Vector {
    fn from(v: DVec3) -> Self {
        Vector::new(vec![v.x, v.y, v.z])
    }
}
