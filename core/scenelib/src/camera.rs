use std::any::Any;

use cartesia_math::{Mat4, Real};

use crate::error::SceneError;
use crate::node::Cartesia;
use crate::simple::SimpleCartesia;

pub const DEFAULT_FOV: Real = 45.0;
pub const DEFAULT_NEAR: Real = 0.1;
/// A negative far plane gives a (practically) infinite view distance.
pub const DEFAULT_FAR: Real = -1.0;

/// A camera placed in the scene like any other node. The renderer inverts its
/// absolute transform to get the view matrix.
pub struct CameraCartesia {
    // The camera's placement in its parent's frame.
    placement: SimpleCartesia,
    // The camera's vertical field of view, in degrees.
    fov: Real,
    // The camera's near plane.
    near: Real,
    // The camera's far plane.
    far: Real,
    // The camera's aspect ratio.
    aspect: Real,
    // Whether the projection is stale since the last update
    dirty: bool,
    // The perspective projection for the current parameters
    projection: Mat4,
}

impl CameraCartesia {
    pub fn new(fov: Real, near: Real, far: Real) -> CameraCartesia {
        let mut camera = CameraCartesia {
            placement: SimpleCartesia::new(),
            fov,
            near,
            far,
            aspect: 1.0,
            dirty: true,
            projection: Mat4::identity(),
        };
        camera.update();
        return camera;
    }

    /// Recomputes the projection if any parameter changed.
    pub fn update(&mut self) {
        if !self.dirty {
            return;
        }
        self.projection = Mat4::identity().perspective(self.fov, self.aspect, self.near, self.far);
        self.dirty = false;
    }

    /// Sets the aspect ratio and returns the up-to-date projection.
    pub fn calc_perspective(&mut self, aspect: Real) -> &Mat4 {
        self.set_aspect(aspect);
        self.update();
        &self.projection
    }

    /// The projection as of the last [Self::update].
    pub fn projection(&self) -> &Mat4 {
        &self.projection
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn set_fov(&mut self, fov: Real) {
        if self.fov == fov {
            return;
        }
        self.fov = fov;
        self.dirty = true;
    }

    pub fn set_near(&mut self, near: Real) {
        if self.near == near {
            return;
        }
        self.near = near;
        self.dirty = true;
    }

    pub fn set_far(&mut self, far: Real) {
        if self.far == far {
            return;
        }
        self.far = far;
        self.dirty = true;
    }

    pub fn set_aspect(&mut self, aspect: Real) {
        if self.aspect == aspect {
            return;
        }
        self.aspect = aspect;
        self.dirty = true;
    }

    pub fn placement(&self) -> &SimpleCartesia {
        &self.placement
    }

    pub fn placement_mut(&mut self) -> &mut SimpleCartesia {
        &mut self.placement
    }

    pub fn fov(&self) -> Real {
        self.fov
    }
    pub fn near(&self) -> Real {
        self.near
    }
    pub fn far(&self) -> Real {
        self.far
    }
    pub fn aspect(&self) -> Real {
        self.aspect
    }
}

impl Default for CameraCartesia {
    fn default() -> Self {
        CameraCartesia::new(DEFAULT_FOV, DEFAULT_NEAR, DEFAULT_FAR)
    }
}

impl Cartesia for CameraCartesia {
    fn local_transform(&self) -> Result<Mat4, SceneError> {
        Ok(self.placement.transform()?)
    }

    fn as_any(&self) -> &dyn Any {
        return self;
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        return self;
    }
}
