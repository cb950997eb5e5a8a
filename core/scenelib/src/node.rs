use std::any::Any;
use std::rc::Rc;

use cartesia_math::Mat4;

use crate::error::SceneError;
use crate::mesh::TriangleMesh;
use crate::payload::Light;

/// Receives the renderable payload of a scene during a draw traversal.
/// Implemented by the renderer; nodes never know what is behind it.
pub trait RenderContext {
    /// Submit [mesh] to be drawn with the resolved world [transform].
    fn submit_mesh(&mut self, mesh: &Rc<TriangleMesh>, transform: &Mat4);

    /// Submit [light], positioned by the resolved world [transform].
    fn submit_light(&mut self, light: &Light, transform: &Mat4);
}

/// A node in the scene graph: a coordinate frame defined relative to its
/// parent.
///
/// Graph structure (parent, children) is owned by the [crate::scene::Scene];
/// a node only describes its own local transform and payload.
pub trait Cartesia {
    /// The local transform relative to the parent frame. Must depend only on
    /// the node's own state.
    ///
    /// The default has no transform behaviour and fails with
    /// [SceneError::AbstractMethodCalled]; every concrete node overrides it.
    fn local_transform(&self) -> Result<Mat4, SceneError> {
        Err(SceneError::AbstractMethodCalled)
    }

    /// Called once per traversal with the node's resolved world [transform],
    /// before its children are visited. Nodes without payload do nothing.
    fn draw(&self, _context: &mut dyn RenderContext, _transform: &Mat4) {}

    /// Allows downcast of the node to a concrete implementation.
    fn as_any(&self) -> &dyn Any;

    /// Allows mutable downcast of the node to a concrete implementation.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// A node that only takes part in the graph. It has no transform of its own,
/// so resolving any transform through it fails.
#[derive(Debug, Default)]
pub struct BareCartesia;

impl Cartesia for BareCartesia {
    fn as_any(&self) -> &dyn Any {
        return self;
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        return self;
    }
}
