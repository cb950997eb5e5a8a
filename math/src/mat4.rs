use crate::error::{MathError, MathResult};
use crate::fixed::{expect_len, fixed_size_transformation};
use crate::transformation::Transformation;
use crate::vector::{vec3, Vector};
use crate::{degrees, radians, Real};

fixed_size_transformation!(
    /// 4x4 homogeneous transform for 3D space.
    ///
    /// The chaining helpers (`translate`, `rotate`, `scale`, ...) all append
    /// on the right, so in `identity().translate(t)?.rotate(a, axis)?` the
    /// rotation is applied to a vector first and the translation last.
    Mat4,
    4
);

impl Mat4 {
    pub fn translate(&self, offset: impl Into<Vector>) -> MathResult<Mat4> {
        let offset = offset.into();
        expect_len(&offset, 3)?;
        Ok(self.append_raw(&Transformation::translate(&offset)))
    }

    pub fn scale(&self, factors: impl Into<Vector>) -> MathResult<Mat4> {
        let factors = factors.into();
        expect_len(&factors, 3)?;
        Ok(self.append_raw(&Transformation::scale(&factors)))
    }

    pub fn scale_uniform(&self, factor: Real) -> Mat4 {
        self.append_raw(&Transformation::uniform_scale(4, factor))
    }

    /// Rotation by [angle_degrees] about [axis] (Rodrigues' formula). Only the
    /// first three components of [axis] are used and it must not be zero.
    pub fn rotate(&self, angle_degrees: Real, axis: impl Into<Vector>) -> MathResult<Mat4> {
        let axis = axis.into();
        if axis.len() < 3 {
            return Err(MathError::VectorTooShort { required: 3, found: axis.len() });
        }
        let v = axis.slice(0, 3).normalize(false)?;
        let cos = radians(angle_degrees).cos();
        let sin = radians(angle_degrees).sin();
        let omc = 1.0 - cos;

        //  x*x*omc + cos   , x*y*omc - z*sin , x*z*omc + y*sin
        //  x*y*omc + z*sin , y*y*omc + cos   , y*z*omc - x*sin
        //  x*z*omc - y*sin , y*z*omc + x*sin , z*z*omc + cos
        let rotation = Transformation::generate(4, |r, c| {
            if r == 3 || c == 3 {
                return if r == c { 1.0 } else { 0.0 };
            }
            if r == c {
                return v[r] * v[c] * omc + cos;
            }
            let sign = if c == (r + 1) % 3 { -1.0 } else { 1.0 };
            v[r] * v[c] * omc + sign * v[3 - r - c] * sin
        });
        Ok(self.append_raw(&rotation))
    }

    /// Symmetric perspective projection. A negative [far] (e.g. -1) pushes
    /// the far plane out to (approximately) infinity.
    pub fn perspective(&self, fov_y_degrees: Real, aspect: Real, near: Real, far: Real) -> Mat4 {
        let f = 1.0 / (radians(fov_y_degrees) / 2.0).tan();
        let d = far - near;
        let projection = Transformation::generate(4, |r, c| match (r, c) {
            (0, 0) => f / aspect,
            (1, 1) => f,
            (2, 2) => -(near + far) / d,
            (2, 3) => -2.0 * near * far / d,
            (3, 2) => -1.0,
            _ => 0.0,
        });
        self.append_raw(&projection)
    }

    /// A rotation taking the direction of [old_dir] onto [new_dir].
    ///
    /// Identical directions give the identity. Anti-parallel directions, and
    /// directions opposite to within rounding, have no usable rotation axis,
    /// so any axis perpendicular to [old_dir] is used for a half turn.
    pub fn rotate_vector_to_match(old_dir: impl Into<Vector>, new_dir: impl Into<Vector>) -> MathResult<Mat4> {
        let old_unit = direction3(old_dir.into())?;
        let new_unit = direction3(new_dir.into())?;

        if old_unit == new_unit {
            return Ok(Mat4::identity());
        }

        let dot = old_unit.dot(&new_unit)?.clamp(-1.0, 1.0);
        let axis = old_unit.cross(&new_unit)?;
        if dot <= -1.0 + 1e-12 || axis.magnitude() < 1e-12 {
            if dot > 0.0 {
                return Ok(Mat4::identity());
            }
            let mut perpendicular = old_unit.cross(&vec3(1.0, 0.0, 0.0))?;
            if perpendicular.magnitude() < 1e-6 {
                perpendicular = old_unit.cross(&vec3(0.0, 1.0, 0.0))?;
            }
            return Mat4::identity().rotate(180.0, perpendicular);
        }
        Mat4::identity().rotate(degrees(dot.acos()), axis)
    }

    /// Rotation taking the +Y axis onto [new_axis].
    pub fn rotate_y_axis_to(new_axis: impl Into<Vector>) -> MathResult<Mat4> {
        Mat4::rotate_vector_to_match(vec3(0.0, 1.0, 0.0), new_axis)
    }

    /// Transforms a 3D point (w = 1) and drops the homogeneous component.
    pub fn transform_point(&self, point: impl Into<Vector>) -> MathResult<Vector> {
        let point = point.into();
        expect_len(&point, 3)?;
        Ok(self.transform_vector(&point.to_vec4())?.to_vec3())
    }

    /// Transforms a 3D direction (w = 0), ignoring translation.
    pub fn transform_direction(&self, direction: impl Into<Vector>) -> MathResult<Vector> {
        let direction = direction.into();
        expect_len(&direction, 3)?;
        let homogeneous = Vector::new(vec![direction[0], direction[1], direction[2], 0.0]);
        Ok(self.transform_vector(&homogeneous)?.to_vec3())
    }

    /// The translation part: first three rows of the last column.
    pub fn translation(&self) -> Vector {
        vec3(self.get(0, 3), self.get(1, 3), self.get(2, 3))
    }
}

fn direction3(v: Vector) -> MathResult<Vector> {
    if v.len() < 3 {
        return Err(MathError::VectorTooShort { required: 3, found: v.len() });
    }
    v.slice(0, 3).normalize(false)
}
