use std::collections::HashMap;
use std::rc::Rc;

use cartesia_scene::TriangleMesh;
use glam::Vec3;

// We need this for Rust to store our data correctly for the shaders
#[repr(C)]
// This is so we can store this in a buffer
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Interleaved vertex data of one mesh, ready to upload.
#[derive(Debug, PartialEq)]
pub struct MeshBuffers {
    vertices: Vec<Vertex>,
}

impl MeshBuffers {
    pub fn build(mesh: &TriangleMesh) -> MeshBuffers {
        let vertices = mesh.triangles().iter()
            .zip(mesh.normals())
            .flat_map(|(corners, normals)| corners.iter().zip(normals.iter()))
            .map(|(corner, normal)| Vertex {
                position: Vec3::from(corner).to_array(),
                normal: Vec3::from(normal).to_array(),
            })
            .collect();
        return MeshBuffers { vertices };
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

/// Vertex data shared between meshes by key. Keyed meshes are built once and
/// reused by every later frame; meshes without a key are rebuilt every time
/// they are drawn.
#[derive(Default)]
pub struct MeshCache {
    buffers: HashMap<String, Rc<MeshBuffers>>,
    hits: u64,
    misses: u64,
}

impl MeshCache {
    pub fn new() -> Self {
        MeshCache::default()
    }

    pub fn get_or_build(&mut self, mesh: &TriangleMesh) -> Rc<MeshBuffers> {
        let key = match mesh.key() {
            Some(key) => key,
            None => return Rc::new(MeshBuffers::build(mesh)),
        };
        if let Some(buffers) = self.buffers.get(key) {
            self.hits += 1;
            return buffers.clone();
        }
        self.misses += 1;
        log::debug!("caching vertex data for mesh {:?}", key);
        let buffers = Rc::new(MeshBuffers::build(mesh));
        self.buffers.insert(key.to_string(), buffers.clone());
        return buffers;
    }

    pub fn contains(&self, key: &str) -> bool {
        self.buffers.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn clear(&mut self) {
        self.buffers.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cartesia_math::{vec3, vec4};
    use cartesia_scene::{cube, MeshDescriptor};

    #[test]
    fn keyed_meshes_are_built_once() {
        let mut cache = MeshCache::new();
        let mesh = cube(vec4(1.0, 0.0, 0.0, 1.0)).unwrap();
        let first = cache.get_or_build(&mesh);
        let second = cache.get_or_build(&mesh);
        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
        assert_eq!((cache.hits(), cache.misses()), (1, 1));
        assert!(cache.contains("cube"));
    }

    #[test]
    fn keyless_meshes_are_not_cached() {
        let mut cache = MeshCache::new();
        let mesh = TriangleMesh::new(MeshDescriptor {
            triangles: Some(vec![[vec3(0.0, 0.0, 0.0), vec3(1.0, 0.0, 0.0), vec3(0.0, 1.0, 0.0)]]),
            ..Default::default()
        }).unwrap();
        let buffers = cache.get_or_build(&mesh);
        assert!(cache.is_empty());
        assert_eq!(buffers.vertex_count(), 3);
        assert_eq!(buffers.vertices()[1].position, [1.0, 0.0, 0.0]);
        assert_eq!(buffers.vertices()[1].normal, [0.0, 0.0, 1.0]);
    }

    #[test]
    fn buffers_are_interleaved() {
        let mesh = cube(vec4(1.0, 1.0, 1.0, 1.0)).unwrap();
        let buffers = MeshBuffers::build(&mesh);
        assert_eq!(buffers.vertex_count(), mesh.vertex_count());
        assert_eq!(buffers.as_bytes().len(), 36 * 6 * 4);
    }
}
