use cartesia_math::MathError;
use cartesia_scene::{NodeHandle, SceneError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    #[error("call use_scene() and use_camera() before rendering a frame")]
    MissingSceneOrCamera,

    #[error("scene node {0} is not a camera")]
    NotACamera(NodeHandle),

    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error(transparent)]
    Math(#[from] MathError),
}
