use cartesia_math::{vec4, Real, Vector};

use crate::error::SceneError;

pub type Triangle = [Vector; 3];

pub const DEFAULT_AMBIENT: Real = 0.1;
pub const DEFAULT_DIFFUSE: Real = 0.7;
pub const DEFAULT_SPECULAR: Real = 1.0;
pub const DEFAULT_SHININESS: Real = 5.0;

/// One lighting term of a material: either a factor applied to the mesh
/// color (alpha kept), or an explicit RGBA color.
#[derive(Debug, Clone, PartialEq)]
pub enum MaterialTerm {
    Factor(Real),
    Color(Vector),
}

impl MaterialTerm {
    fn resolve(&self, color: &Vector) -> Vector {
        match self {
            MaterialTerm::Factor(factor) => color.scale(*factor, true),
            MaterialTerm::Color(explicit) => explicit.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub ambient: Vector,
    pub diffuse: Vector,
    pub specular: Vector,
    pub shininess: Real,
}

/// Everything needed to build a [TriangleMesh]. Either [Self::triangles] or
/// both [Self::vertices] and [Self::indices] must be given.
#[derive(Debug, Clone, Default)]
pub struct MeshDescriptor {
    /// Meshes with the same key share vertex data in the renderer's cache,
    /// so the key must change whenever the geometry does.
    pub key: Option<String>,
    pub triangles: Option<Vec<Triangle>>,
    pub vertices: Option<Vec<Vector>>,
    pub indices: Option<Vec<[usize; 3]>>,
    /// Per-vertex normals, one triple per triangle. Flat normals are computed
    /// when absent.
    pub normals: Option<Vec<Triangle>>,
    pub color: Option<Vector>,
    pub ambient: Option<MaterialTerm>,
    pub diffuse: Option<MaterialTerm>,
    pub specular: Option<MaterialTerm>,
    pub shininess: Option<Real>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TriangleMesh {
    key: Option<String>,
    triangles: Vec<Triangle>,
    normals: Vec<Triangle>,
    color: Vector,
    material: Material,
}

impl TriangleMesh {
    pub fn new(descriptor: MeshDescriptor) -> Result<TriangleMesh, SceneError> {
        let triangles = match (descriptor.triangles, descriptor.vertices, descriptor.indices) {
            (Some(triangles), _, _) => triangles,
            (None, Some(vertices), Some(indices)) => calc_triangles(&vertices, &indices)?,
            _ => {
                return Err(SceneError::InvalidMesh(
                    "give either triangle data or vertex and index data".to_string(),
                ))
            }
        };

        let normals = match descriptor.normals {
            Some(normals) => {
                if normals.len() != triangles.len() {
                    return Err(SceneError::InvalidMesh(format!(
                        "{} normal triples for {} triangles",
                        normals.len(),
                        triangles.len()
                    )));
                }
                normals
            }
            None => calc_normals(&triangles)?,
        };

        let color = descriptor.color.unwrap_or_else(|| vec4(1.0, 1.0, 1.0, 1.0));
        let material = Material {
            ambient: descriptor.ambient.unwrap_or(MaterialTerm::Factor(DEFAULT_AMBIENT)).resolve(&color),
            diffuse: descriptor.diffuse.unwrap_or(MaterialTerm::Factor(DEFAULT_DIFFUSE)).resolve(&color),
            specular: descriptor.specular.unwrap_or(MaterialTerm::Factor(DEFAULT_SPECULAR)).resolve(&color),
            shininess: descriptor.shininess.unwrap_or(DEFAULT_SHININESS),
        };

        return Ok(TriangleMesh { key: descriptor.key, triangles, normals, color, material });
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn normals(&self) -> &[Triangle] {
        &self.normals
    }

    pub fn color(&self) -> &Vector {
        &self.color
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn vertex_count(&self) -> usize {
        self.triangles.len() * 3
    }

    /// Fully transparent meshes are not drawn.
    pub fn is_visible(&self) -> bool {
        self.color.len() < 4 || self.color.w() > 0.0
    }
}

fn calc_triangles(vertices: &[Vector], indices: &[[usize; 3]]) -> Result<Vec<Triangle>, SceneError> {
    indices.iter()
        .map(|triplet| -> Result<Triangle, SceneError> {
            let corner = |i: usize| {
                vertices.get(i).cloned().ok_or_else(|| {
                    SceneError::InvalidMesh(format!("index {} out of range for {} vertices", i, vertices.len()))
                })
            };
            Ok([corner(triplet[0])?, corner(triplet[1])?, corner(triplet[2])?])
        })
        .collect()
}

/// One face normal per triangle, repeated for its three corners. Corners are
/// expected in counter-clockwise order when seen from the front.
fn calc_normals(triangles: &[Triangle]) -> Result<Vec<Triangle>, SceneError> {
    triangles.iter()
        .enumerate()
        .map(|(i, [a, b, c])| -> Result<Triangle, SceneError> {
            let normal = b.subtract(a)?.cross(&c.subtract(b)?)?;
            let normal = normal.normalize(false).map_err(|_| {
                SceneError::InvalidMesh(format!("triangle {} is degenerate", i))
            })?;
            Ok([normal.clone(), normal.clone(), normal])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cartesia_math::vec3;

    fn unit_triangle() -> Vec<Vector> {
        vec![vec3(0.0, 0.0, 0.0), vec3(1.0, 0.0, 0.0), vec3(0.0, 1.0, 0.0)]
    }

    #[test]
    fn builds_triangles_from_indices() {
        let mesh = TriangleMesh::new(MeshDescriptor {
            vertices: Some(unit_triangle()),
            indices: Some(vec![[0, 1, 2]]),
            ..Default::default()
        }).unwrap();
        assert_eq!(mesh.triangles().len(), 1);
        assert_eq!(mesh.triangles()[0][1], vec3(1.0, 0.0, 0.0));
        assert_eq!(mesh.vertex_count(), 3);
    }

    #[test]
    fn flat_normals_face_counter_clockwise_side() {
        let mesh = TriangleMesh::new(MeshDescriptor {
            vertices: Some(unit_triangle()),
            indices: Some(vec![[0, 1, 2]]),
            ..Default::default()
        }).unwrap();
        for normal in &mesh.normals()[0] {
            assert_eq!(normal, &vec3(0.0, 0.0, 1.0));
        }
    }

    #[test]
    fn missing_geometry_is_rejected() {
        let err = TriangleMesh::new(MeshDescriptor { vertices: Some(unit_triangle()), ..Default::default() });
        assert!(matches!(err, Err(SceneError::InvalidMesh(_))));
        let err = TriangleMesh::new(MeshDescriptor {
            vertices: Some(unit_triangle()),
            indices: Some(vec![[0, 1, 7]]),
            ..Default::default()
        });
        assert!(matches!(err, Err(SceneError::InvalidMesh(_))));
    }

    #[test]
    fn degenerate_triangle_has_no_normal() {
        let err = TriangleMesh::new(MeshDescriptor {
            triangles: Some(vec![[vec3(0.0, 0.0, 0.0), vec3(1.0, 0.0, 0.0), vec3(2.0, 0.0, 0.0)]]),
            ..Default::default()
        });
        assert!(matches!(err, Err(SceneError::InvalidMesh(_))));
    }

    #[test]
    fn material_defaults_scale_the_color() {
        let mesh = TriangleMesh::new(MeshDescriptor {
            vertices: Some(unit_triangle()),
            indices: Some(vec![[0, 1, 2]]),
            color: Some(vec4(1.0, 0.5, 0.0, 1.0)),
            specular: Some(MaterialTerm::Color(vec4(0.2, 0.2, 0.2, 1.0))),
            ..Default::default()
        }).unwrap();
        let material = mesh.material();
        assert!(material.ambient.approx_eq(&vec4(0.1, 0.05, 0.0, 1.0), 1e-12));
        assert!(material.diffuse.approx_eq(&vec4(0.7, 0.35, 0.0, 1.0), 1e-12));
        assert_eq!(material.specular, vec4(0.2, 0.2, 0.2, 1.0));
        assert_eq!(material.shininess, DEFAULT_SHININESS);
    }

    #[test]
    fn transparent_mesh_is_invisible() {
        let mesh = TriangleMesh::new(MeshDescriptor {
            vertices: Some(unit_triangle()),
            indices: Some(vec![[0, 1, 2]]),
            color: Some(vec4(1.0, 1.0, 1.0, 0.0)),
            ..Default::default()
        }).unwrap();
        assert!(!mesh.is_visible());
    }
}
