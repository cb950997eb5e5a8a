use std::f64::consts::PI;

use cartesia_math::{vec3, Vector};

use crate::error::SceneError;
use crate::mesh::{MeshDescriptor, Triangle, TriangleMesh};

//      7__ 6
//    3/__2/|
//    |   | |
//    |___|/5
//    0   1
const CUBE_CORNERS: [[f64; 3]; 8] = [
    // front
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, 1.0],
    // back
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, -1.0],
];

const CUBE_TRIANGLES: [[usize; 3]; 12] = [
    [0, 1, 2], [0, 2, 3], // front
    [1, 5, 6], [1, 6, 2], // right
    [3, 2, 6], [3, 6, 7], // top
    [5, 4, 7], [5, 7, 6], // back
    [4, 0, 3], [4, 3, 7], // left
    [1, 0, 4], [1, 4, 5], // bottom
];

/// A 2x2x2 cube centered on the origin with flat shading.
pub fn cube(color: Vector) -> Result<TriangleMesh, SceneError> {
    TriangleMesh::new(MeshDescriptor {
        key: Some("cube".to_string()),
        vertices: Some(CUBE_CORNERS.iter().map(|&corner| Vector::from(corner)).collect()),
        indices: Some(CUBE_TRIANGLES.to_vec()),
        color: Some(color),
        ..Default::default()
    })
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SphereShading {
    /// Normals follow the sphere surface.
    Smooth,
    /// One normal per face.
    Flat,
}

impl SphereShading {
    fn name(self) -> &'static str {
        match self {
            SphereShading::Smooth => "smooth",
            SphereShading::Flat => "flat",
        }
    }
}

/// A unit UV sphere with [complexity] latitude and longitude bands. Size it
/// by scaling the node it is attached to.
pub fn sphere(color: Vector, complexity: usize, shading: SphereShading) -> Result<TriangleMesh, SceneError> {
    if complexity < 2 {
        return Err(SceneError::InvalidMesh(format!("sphere complexity {} is below 2", complexity)));
    }
    let bands = complexity;

    let mut corners = Vec::with_capacity((bands + 1) * (bands + 1));
    for lat in 0..=bands {
        let theta = lat as f64 * PI / bands as f64;
        for long in 0..=bands {
            let phi = long as f64 * 2.0 * PI / bands as f64;
            corners.push(vec3(phi.cos() * theta.sin(), theta.cos(), phi.sin() * theta.sin()));
        }
    }

    let mut triangles: Vec<Triangle> = Vec::with_capacity(bands * bands * 2);
    for lat in 0..bands {
        for long in 0..bands {
            // d___c
            // |  /|
            // |/__|
            // a   b
            let a = lat * (bands + 1) + long;
            let b = a + 1;
            let d = a + bands + 1;
            let c = d + 1;
            triangles.push([corners[a].clone(), corners[b].clone(), corners[c].clone()]);
            triangles.push([corners[a].clone(), corners[c].clone(), corners[d].clone()]);
        }
    }

    // Pole triangles collapse to a point on one edge, so face normals come
    // from the triangle centroid rather than an edge cross product.
    let normals = triangles.iter()
        .map(|triangle| -> Result<Triangle, SceneError> {
            match shading {
                SphereShading::Smooth => Ok(triangle.clone()),
                SphereShading::Flat => {
                    let centroid = triangle[0].add(&triangle[1])?.add(&triangle[2])?;
                    let normal = centroid.normalize(false)?;
                    Ok([normal.clone(), normal.clone(), normal])
                }
            }
        })
        .collect::<Result<Vec<Triangle>, SceneError>>()?;

    TriangleMesh::new(MeshDescriptor {
        key: Some(format!("Sphere_{}_{}", shading.name(), complexity)),
        triangles: Some(triangles),
        normals: Some(normals),
        color: Some(color),
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cartesia_math::vec4;

    fn white() -> Vector {
        vec4(1.0, 1.0, 1.0, 1.0)
    }

    #[test]
    fn cube_normals_point_outwards() {
        let mesh = cube(white()).unwrap();
        assert_eq!(mesh.key(), Some("cube"));
        assert_eq!(mesh.triangles().len(), 12);
        for (triangle, normals) in mesh.triangles().iter().zip(mesh.normals()) {
            let centroid = triangle[0].add(&triangle[1]).unwrap().add(&triangle[2]).unwrap();
            assert!(centroid.dot(&normals[0]).unwrap() > 0.0);
            assert_eq!(normals[0].magnitude(), 1.0);
        }
    }

    #[test]
    fn sphere_vertices_lie_on_unit_sphere() {
        let mesh = sphere(white(), 8, SphereShading::Smooth).unwrap();
        assert_eq!(mesh.key(), Some("Sphere_smooth_8"));
        assert_eq!(mesh.triangles().len(), 8 * 8 * 2);
        for triangle in mesh.triangles() {
            for corner in triangle {
                assert!((corner.magnitude() - 1.0).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn flat_sphere_has_one_normal_per_face() {
        let mesh = sphere(white(), 6, SphereShading::Flat).unwrap();
        assert_eq!(mesh.key(), Some("Sphere_flat_6"));
        for normals in mesh.normals() {
            assert_eq!(normals[0], normals[1]);
            assert_eq!(normals[1], normals[2]);
            assert!((normals[0].magnitude() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn sphere_needs_some_complexity() {
        assert!(sphere(white(), 1, SphereShading::Smooth).is_err());
    }
}
