use cartesia_math::{vec4, Real, Vector};

/// The fixed light every mesh is shaded against.
#[derive(Debug, Clone, PartialEq)]
pub struct LightingConfig {
    /// Homogeneous position; w = 0 makes it a directional light.
    pub position: Vector,
    pub ambient: Vector,
    pub diffuse: Vector,
    pub specular: Vector,
    pub attenuation: Real,
}

impl Default for LightingConfig {
    fn default() -> Self {
        LightingConfig {
            position: vec4(5.0, 3.0, 5.0, 1.0),
            ambient: vec4(0.2, 0.2, 0.2, 1.0),
            diffuse: vec4(0.7, 0.7, 0.7, 1.0),
            specular: vec4(1.0, 1.0, 1.0, 1.0),
            attenuation: 0.05,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RendererConfig {
    pub lighting: LightingConfig,
}
