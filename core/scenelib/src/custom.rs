use std::any::Any;

use cartesia_math::Mat4;

use crate::error::SceneError;
use crate::node::Cartesia;

/// A node whose local transform is set explicitly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomCartesia {
    transformation: Mat4,
}

impl CustomCartesia {
    pub fn new(transformation: Mat4) -> Self {
        return CustomCartesia { transformation };
    }

    pub fn transform(&self) -> &Mat4 {
        &self.transformation
    }

    pub fn set_transform(&mut self, transformation: Mat4) {
        self.transformation = transformation;
    }

    /// Appends [transformation] on the right of the current transform.
    pub fn apply_transform(&mut self, transformation: &Mat4) {
        self.transformation = self.transformation.append(transformation);
    }
}

impl Cartesia for CustomCartesia {
    fn local_transform(&self) -> Result<Mat4, SceneError> {
        Ok(self.transformation.clone())
    }

    fn as_any(&self) -> &dyn Any {
        return self;
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        return self;
    }
}
