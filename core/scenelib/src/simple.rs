use std::any::Any;

use cartesia_math::{vec3, Mat4, MathError, MathResult, Real, Vector};

use crate::error::SceneError;
use crate::node::Cartesia;

/// Position, roll/pitch/yaw (degrees) and a uniform scale.
///
/// The local transform is `translate(position) · rotation · scale`, where the
/// rotation applies roll about Z first, then yaw about Y, then pitch about X.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleCartesia {
    position: Vector,
    initial_position: Vector,
    roll: Real,
    pitch: Real,
    yaw: Real,
    scale: Real,
}

impl SimpleCartesia {
    pub fn new() -> Self {
        return SimpleCartesia {
            position: vec3(0.0, 0.0, 0.0),
            initial_position: vec3(0.0, 0.0, 0.0),
            roll: 0.0,
            pitch: 0.0,
            yaw: 0.0,
            scale: 1.0,
        };
    }

    /// A node placed at [position], which is also where [Self::reset_position]
    /// returns it to.
    pub fn at(position: impl Into<Vector>) -> MathResult<Self> {
        let position = check_position(position.into())?;
        return Ok(SimpleCartesia { initial_position: position.clone(), position, ..SimpleCartesia::new() });
    }

    pub fn position(&self) -> &Vector {
        &self.position
    }

    pub fn roll(&self) -> Real {
        self.roll
    }

    pub fn pitch(&self) -> Real {
        self.pitch
    }

    pub fn yaw(&self) -> Real {
        self.yaw
    }

    pub fn scale(&self) -> Real {
        self.scale
    }

    pub fn set_position(&mut self, position: impl Into<Vector>) -> MathResult<()> {
        self.position = check_position(position.into())?;
        Ok(())
    }

    pub fn move_by(&mut self, offset: impl Into<Vector>) -> MathResult<()> {
        let position = self.position.add(&offset.into())?;
        self.set_position(position)
    }

    /// Moves by [offset] expressed in the node's own rotated frame, i.e. along
    /// the direction it is facing.
    pub fn move_in_direction(&mut self, offset: impl Into<Vector>) -> MathResult<()> {
        let offset = self.rotation()?.transform_direction(offset)?;
        self.move_by(offset)
    }

    pub fn set_roll(&mut self, degrees: Real) {
        self.roll = degrees;
    }

    pub fn set_pitch(&mut self, degrees: Real) {
        self.pitch = degrees;
    }

    pub fn set_yaw(&mut self, degrees: Real) {
        self.yaw = degrees;
    }

    pub fn move_roll(&mut self, degrees: Real) {
        self.roll += degrees;
    }

    pub fn move_pitch(&mut self, degrees: Real) {
        self.pitch += degrees;
    }

    pub fn move_yaw(&mut self, degrees: Real) {
        self.yaw += degrees;
    }

    pub fn set_scale(&mut self, scale: Real) {
        self.scale = scale;
    }

    pub fn scale_by(&mut self, factor: Real) {
        self.set_scale(self.scale * factor);
    }

    pub fn reset_position(&mut self) {
        self.position = self.initial_position.clone();
    }

    pub fn reset_rotation(&mut self) {
        self.roll = 0.0;
        self.pitch = 0.0;
        self.yaw = 0.0;
    }

    pub fn reset_scale(&mut self) {
        self.scale = 1.0;
    }

    pub fn reset(&mut self) {
        self.reset_position();
        self.reset_rotation();
        self.reset_scale();
    }

    pub fn rotation(&self) -> MathResult<Mat4> {
        Mat4::identity()
            .rotate(self.pitch, [1.0, 0.0, 0.0])?
            .rotate(self.yaw, [0.0, 1.0, 0.0])?
            .rotate(self.roll, [0.0, 0.0, 1.0])
    }

    pub fn transform(&self) -> MathResult<Mat4> {
        Ok(Mat4::identity()
            .translate(self.position.clone())?
            .append(&self.rotation()?)
            .scale_uniform(self.scale))
    }
}

impl Default for SimpleCartesia {
    fn default() -> Self {
        SimpleCartesia::new()
    }
}

fn check_position(position: Vector) -> MathResult<Vector> {
    if position.len() != 3 {
        return Err(MathError::DimensionMismatch { expected: 3, found: position.len() });
    }
    Ok(position)
}

impl Cartesia for SimpleCartesia {
    fn local_transform(&self) -> Result<Mat4, SceneError> {
        Ok(self.transform()?)
    }

    fn as_any(&self) -> &dyn Any {
        return self;
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        return self;
    }
}
