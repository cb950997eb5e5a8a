use std::any::Any;
use std::rc::Rc;

use cartesia_math::{vec4, Mat4, Real, Vector};

use crate::error::SceneError;
use crate::mesh::TriangleMesh;
use crate::node::{Cartesia, RenderContext};
use crate::simple::SimpleCartesia;

/// A placed triangle mesh. The mesh is shared, so many nodes can draw the
/// same geometry.
pub struct MeshCartesia {
    placement: SimpleCartesia,
    mesh: Rc<TriangleMesh>,
}

impl MeshCartesia {
    pub fn new(mesh: Rc<TriangleMesh>) -> Self {
        return MeshCartesia { placement: SimpleCartesia::new(), mesh };
    }

    pub fn with_placement(mesh: Rc<TriangleMesh>, placement: SimpleCartesia) -> Self {
        return MeshCartesia { placement, mesh };
    }

    pub fn placement(&self) -> &SimpleCartesia {
        &self.placement
    }

    pub fn placement_mut(&mut self) -> &mut SimpleCartesia {
        &mut self.placement
    }

    pub fn mesh(&self) -> &Rc<TriangleMesh> {
        &self.mesh
    }

    pub fn set_mesh(&mut self, mesh: Rc<TriangleMesh>) {
        self.mesh = mesh;
    }
}

impl Cartesia for MeshCartesia {
    fn local_transform(&self) -> Result<Mat4, SceneError> {
        Ok(self.placement.transform()?)
    }

    fn draw(&self, context: &mut dyn RenderContext, transform: &Mat4) {
        log::trace!("submitting mesh {:?}", self.mesh.key());
        context.submit_mesh(&self.mesh, transform);
    }

    fn as_any(&self) -> &dyn Any {
        return self;
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        return self;
    }
}

/// A point light. Its position comes from the node it is attached to.
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    /// RGBA color.
    pub color: Vector,
    /// How fast the light fades over distance; 0 means no falloff.
    pub attenuation: Real,
}

impl Default for Light {
    fn default() -> Self {
        Light { color: vec4(1.0, 1.0, 1.0, 1.0), attenuation: 0.0 }
    }
}

pub struct LightCartesia {
    placement: SimpleCartesia,
    light: Light,
}

impl LightCartesia {
    pub fn new(light: Light) -> Self {
        return LightCartesia { placement: SimpleCartesia::new(), light };
    }

    pub fn placement(&self) -> &SimpleCartesia {
        &self.placement
    }

    pub fn placement_mut(&mut self) -> &mut SimpleCartesia {
        &mut self.placement
    }

    pub fn light(&self) -> &Light {
        &self.light
    }

    pub fn light_mut(&mut self) -> &mut Light {
        &mut self.light
    }
}

impl Cartesia for LightCartesia {
    fn local_transform(&self) -> Result<Mat4, SceneError> {
        Ok(self.placement.transform()?)
    }

    fn draw(&self, context: &mut dyn RenderContext, transform: &Mat4) {
        context.submit_light(&self.light, transform);
    }

    fn as_any(&self) -> &dyn Any {
        return self;
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        return self;
    }
}
