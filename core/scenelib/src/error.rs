use cartesia_math::MathError;
use thiserror::Error;

use crate::scene::NodeHandle;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    #[error(transparent)]
    Math(#[from] MathError),

    /// A node was created without any transform behaviour and then asked for
    /// its transform.
    #[error("local_transform() of a bare Cartesia is abstract; did you mean to use SimpleCartesia?")]
    AbstractMethodCalled,

    #[error("unknown scene node {0}")]
    UnknownNode(NodeHandle),

    #[error("attaching {child} under {parent} would create a cycle")]
    WouldCreateCycle { parent: NodeHandle, child: NodeHandle },

    #[error("invalid mesh: {0}")]
    InvalidMesh(String),
}
