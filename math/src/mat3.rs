use crate::error::MathResult;
use crate::fixed::{expect_len, fixed_size_transformation};
use crate::transformation::Transformation;
use crate::vector::Vector;
use crate::{radians, Real};

fixed_size_transformation!(
    /// 3x3 homogeneous transform for the plane.
    Mat3,
    3
);

impl Mat3 {
    pub fn translate(&self, offset: impl Into<Vector>) -> MathResult<Mat3> {
        let offset = offset.into();
        expect_len(&offset, 2)?;
        Ok(self.append_raw(&Transformation::translate(&offset)))
    }

    pub fn scale(&self, factors: impl Into<Vector>) -> MathResult<Mat3> {
        let factors = factors.into();
        expect_len(&factors, 2)?;
        Ok(self.append_raw(&Transformation::scale(&factors)))
    }

    pub fn scale_uniform(&self, factor: Real) -> Mat3 {
        self.append_raw(&Transformation::uniform_scale(3, factor))
    }

    /// Counter-clockwise rotation about the implicit z axis.
    pub fn rotate(&self, angle_degrees: Real) -> Mat3 {
        let cos = radians(angle_degrees).cos();
        let sin = radians(angle_degrees).sin();
        let rotation = Transformation::from_rows(3, &[&[cos, -sin, 0.0], &[sin, cos, 0.0]]);
        self.append_raw(&rotation)
    }
}
