use std::rc::Rc;

use cartesia_math::{Mat4, Real, Vector};
use cartesia_scene::{CameraCartesia, Light, NodeHandle, RenderContext, Scene, TriangleMesh};

use crate::config::{LightingConfig, RendererConfig};
use crate::error::RenderError;
use crate::frame::{CameraUniform, Frame, LightDraw, LightingUniform, MeshDraw};
use crate::mesh_cache::MeshCache;

#[derive(Debug, PartialEq)]
pub struct ViewportRegion {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ViewportRegion {
    pub const ZERO: ViewportRegion = ViewportRegion {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Renders a scene graph from the point of view of one of its cameras.
///
/// The renderer does not own the scene; it remembers which node is the root
/// and which is the camera, and is handed the scene for every frame.
pub struct Renderer {
    config: RendererConfig,
    scene: Option<NodeHandle>,
    camera: Option<NodeHandle>,
    aspect: Real,
    mesh_cache: MeshCache,
    frame_index: u64,
}

impl Renderer {
    pub fn new(config: RendererConfig) -> Renderer {
        Renderer {
            config,
            scene: None,
            camera: None,
            aspect: 1.0,
            mesh_cache: MeshCache::new(),
            frame_index: 0,
        }
    }

    pub fn use_scene(&mut self, root: NodeHandle) {
        self.scene = Some(root);
    }

    /// [camera] must be a [CameraCartesia] in the scene being rendered.
    pub fn use_camera(&mut self, camera: NodeHandle) {
        self.camera = Some(camera);
    }

    pub fn set_aspect(&mut self, aspect: Real) {
        self.aspect = aspect;
    }

    /// Takes the aspect ratio from [viewport_region]. Empty regions (a
    /// minimised window) leave the aspect untouched.
    pub fn set_viewport(&mut self, viewport_region: &ViewportRegion) {
        if viewport_region.is_empty() {
            return;
        }
        self.aspect = (viewport_region.width / viewport_region.height) as Real;
    }

    pub fn aspect(&self) -> Real {
        self.aspect
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut RendererConfig {
        &mut self.config
    }

    pub fn mesh_cache(&self) -> &MeshCache {
        &self.mesh_cache
    }

    /// Number of frames rendered so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_index
    }

    /// Resolves the camera and draws the scene top-down from the identity
    /// transform.
    ///
    /// The view matrix is the inverse of the camera's absolute transform, so
    /// moving the camera node (or any of its ancestors) moves the view.
    #[profiling::function]
    pub fn render_frame(&mut self, scene: &mut Scene) -> Result<Frame, RenderError> {
        let (root, camera) = match (self.scene, self.camera) {
            (Some(root), Some(camera)) => (root, camera),
            _ => return Err(RenderError::MissingSceneOrCamera),
        };

        let projection = scene.node_mut::<CameraCartesia>(camera)
            .ok_or(RenderError::NotACamera(camera))?
            .calc_perspective(self.aspect)
            .to_cols_array_2d();
        let view = scene.absolute_transform(camera, None)?.inverse()?;

        let mut recorder = FrameRecorder::new(&self.config.lighting, &mut self.mesh_cache);
        scene.draw(root, &mut recorder, Some(&Mat4::identity()))?;
        let (meshes, lights) = recorder.finish();

        let frame = Frame {
            index: self.frame_index,
            camera: CameraUniform { view: view.to_cols_array_2d(), projection },
            meshes,
            lights,
        };
        self.frame_index += 1;

        log::info!(
            "frame {}: {} meshes ({} vertices), {} lights",
            frame.index,
            frame.meshes.len(),
            frame.vertex_count(),
            frame.lights.len()
        );
        return Ok(frame);
    }
}

/// Collects the draw calls of one traversal.
struct FrameRecorder<'a> {
    lighting: &'a LightingConfig,
    mesh_cache: &'a mut MeshCache,
    meshes: Vec<MeshDraw>,
    lights: Vec<LightDraw>,
}

impl<'a> FrameRecorder<'a> {
    fn new(lighting: &'a LightingConfig, mesh_cache: &'a mut MeshCache) -> Self {
        FrameRecorder { lighting, mesh_cache, meshes: Vec::new(), lights: Vec::new() }
    }

    fn finish(self) -> (Vec<MeshDraw>, Vec<LightDraw>) {
        (self.meshes, self.lights)
    }

    fn lighting_for(&self, mesh: &TriangleMesh) -> LightingUniform {
        let material = mesh.material();
        LightingUniform {
            light_position: to_f32x4(&self.lighting.position),
            ambient_product: product_f32x4(&self.lighting.ambient, &material.ambient),
            diffuse_product: product_f32x4(&self.lighting.diffuse, &material.diffuse),
            specular_product: product_f32x4(&self.lighting.specular, &material.specular),
            attenuation: self.lighting.attenuation as f32,
            shininess: material.shininess as f32,
            _padding: [0.0; 2],
        }
    }
}

impl<'a> RenderContext for FrameRecorder<'a> {
    fn submit_mesh(&mut self, mesh: &Rc<TriangleMesh>, transform: &Mat4) {
        if !mesh.is_visible() {
            log::trace!("skipping transparent mesh {:?}", mesh.key());
            return;
        }
        let lighting = self.lighting_for(mesh);
        let buffers = self.mesh_cache.get_or_build(mesh);
        self.meshes.push(MeshDraw {
            key: mesh.key().map(str::to_string),
            buffers,
            model: transform.to_cols_array_2d(),
            lighting,
        });
    }

    fn submit_light(&mut self, light: &Light, transform: &Mat4) {
        self.lights.push(LightDraw {
            position: to_f32x4(&transform.translation().to_vec4()),
            color: to_f32x4(&light.color.to_vec4()),
            attenuation: light.attenuation as f32,
            _padding: [0.0; 3],
        });
    }
}

fn to_f32x4(vector: &Vector) -> [f32; 4] {
    [vector.x() as f32, vector.y() as f32, vector.z() as f32, vector.w() as f32]
}

// Component-wise product of two colours, both padded to four components
fn product_f32x4(light: &Vector, material: &Vector) -> [f32; 4] {
    let (light, material) = (light.to_vec4(), material.to_vec4());
    std::array::from_fn(|i| (light[i] * material[i]) as f32)
}
