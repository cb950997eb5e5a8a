use std::rc::Rc;

use crate::mesh_cache::MeshBuffers;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    // The inverse of the camera's world transform
    pub view: [[f32; 4]; 4],
    // The camera's perspective projection
    pub projection: [[f32; 4]; 4],
}

/// Per-mesh shading inputs: light terms already multiplied with the mesh's
/// material terms.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightingUniform {
    pub light_position: [f32; 4],
    pub ambient_product: [f32; 4],
    pub diffuse_product: [f32; 4],
    pub specular_product: [f32; 4],
    pub attenuation: f32,
    pub shininess: f32,
    pub _padding: [f32; 2],
}

#[derive(Debug, Clone)]
pub struct MeshDraw {
    pub key: Option<String>,
    pub buffers: Rc<MeshBuffers>,
    // The mesh's model matrix, column-major
    pub model: [[f32; 4]; 4],
    pub lighting: LightingUniform,
}

impl MeshDraw {
    pub fn vertex_count(&self) -> usize {
        self.buffers.vertex_count()
    }
}

/// A light placed in the scene, resolved to world space.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightDraw {
    pub position: [f32; 4],
    pub color: [f32; 4],
    pub attenuation: f32,
    pub _padding: [f32; 3],
}

/// Everything recorded while drawing the scene once, in traversal order.
#[derive(Debug, Clone)]
pub struct Frame {
    pub index: u64,
    pub camera: CameraUniform,
    pub meshes: Vec<MeshDraw>,
    pub lights: Vec<LightDraw>,
}

impl Frame {
    pub fn vertex_count(&self) -> usize {
        self.meshes.iter().map(MeshDraw::vertex_count).sum()
    }
}
