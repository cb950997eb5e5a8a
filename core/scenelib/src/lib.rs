/**
 * This library implements the Cartesia scene graph: a tree of coordinate
 * frames, each placed relative to its parent, carrying the meshes, lights
 * and cameras that a renderer consumes.
 */
pub mod error;
pub mod node;
pub mod simple;
pub mod custom;
pub mod payload;
pub mod camera;
pub mod mesh;
pub mod shapes;
pub mod scene;

pub use camera::CameraCartesia;
pub use custom::CustomCartesia;
pub use error::SceneError;
pub use mesh::{Material, MaterialTerm, MeshDescriptor, Triangle, TriangleMesh};
pub use node::{BareCartesia, Cartesia, RenderContext};
pub use payload::{Light, LightCartesia, MeshCartesia};
pub use scene::{NodeHandle, Scene};
pub use shapes::{cube, sphere, SphereShading};
pub use simple::SimpleCartesia;
