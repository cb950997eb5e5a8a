/**
 * The CPU side of rendering a Cartesia scene: resolves the camera, walks the
 * scene graph and records everything a GPU backend needs for one frame.
 */
pub mod config;
pub mod error;
pub mod frame;
pub mod mesh_cache;
pub mod renderer;

pub use config::{LightingConfig, RendererConfig};
pub use error::RenderError;
pub use frame::{CameraUniform, Frame, LightDraw, LightingUniform, MeshDraw};
pub use mesh_cache::{MeshBuffers, MeshCache, Vertex};
pub use renderer::{Renderer, ViewportRegion};
