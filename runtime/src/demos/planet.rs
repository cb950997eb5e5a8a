use std::any::Any;
use std::rc::Rc;

use cartesia_core::LightingConfig;
use cartesia_math::{vec4, Mat4, Real};
use cartesia_scene::{
    sphere, CameraCartesia, Cartesia, Light, LightCartesia, MeshCartesia, NodeHandle, Scene, SceneError,
    SimpleCartesia, SphereShading,
};

use crate::demos::Demo;

const PLANET_RADIUS: Real = 8.0;
// Height above the unit sphere surface, in planet radii
const SURFACE_HEIGHT: Real = 1.01;

/// Places its children on the surface of the parent sphere by latitude and
/// longitude.
///
/// The local transform is `rotate(longitude, Y) · rotate(latitude, X) ·
/// offset`, where the offset lifts the walker above the surface and carries
/// its own heading.
pub struct SurfaceWalker {
    latitude: Real,
    longitude: Real,
    offset: SimpleCartesia,
}

impl SurfaceWalker {
    pub fn new(latitude: Real, longitude: Real) -> Result<SurfaceWalker, SceneError> {
        let offset = SimpleCartesia::at([0.0, SURFACE_HEIGHT, 0.0])?;
        return Ok(SurfaceWalker { latitude, longitude, offset });
    }

    pub fn set_latitude_longitude(&mut self, latitude: Real, longitude: Real) {
        self.latitude = latitude;
        self.longitude = longitude;
    }

    pub fn latitude(&self) -> Real {
        self.latitude
    }

    pub fn longitude(&self) -> Real {
        self.longitude
    }

    pub fn offset_mut(&mut self) -> &mut SimpleCartesia {
        &mut self.offset
    }
}

impl Cartesia for SurfaceWalker {
    fn local_transform(&self) -> Result<Mat4, SceneError> {
        let transform = Mat4::identity()
            .rotate(self.longitude, [0.0, 1.0, 0.0])?
            .rotate(self.latitude, [1.0, 0.0, 0.0])?
            .append(&self.offset.transform()?);
        return Ok(transform);
    }

    fn as_any(&self) -> &dyn Any {
        return self;
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        return self;
    }
}

/// A flat-shaded planet with a small walker crossing it pole to pole and a
/// smooth moon on a tilted orbit.
pub struct PlanetDemo {
    root: NodeHandle,
    camera: NodeHandle,
    walker: NodeHandle,
    orbit: NodeHandle,
}

impl PlanetDemo {
    pub fn build(scene: &mut Scene) -> Result<PlanetDemo, SceneError> {
        let root = scene.add(SimpleCartesia::new());

        let mut camera = CameraCartesia::default();
        camera.placement_mut().set_position([0.0, 0.0, 25.0])?;
        let camera = scene.add_under(root, camera)?;

        let mut light = LightCartesia::new(Light { color: vec4(1.0, 1.0, 1.0, 1.0), attenuation: 0.0 });
        light.placement_mut().set_position([0.0, 5.0, 5.0])?;
        scene.add_under(root, light)?;

        let mut planet = SimpleCartesia::new();
        planet.set_scale(PLANET_RADIUS);
        let planet = scene.add_under(root, planet)?;
        let surface = sphere(vec4(1.0, 1.0, 0.7, 1.0), 20, SphereShading::Flat)?;
        scene.add_under(planet, MeshCartesia::new(Rc::new(surface)))?;

        let walker = scene.add_under(planet, SurfaceWalker::new(90.0, 0.0)?)?;
        let mut body = SimpleCartesia::new();
        body.set_scale(0.1);
        let body_mesh = sphere(vec4(1.0, 1.0, 1.0, 1.0), 5, SphereShading::Flat)?;
        scene.add_under(walker, MeshCartesia::with_placement(Rc::new(body_mesh), body))?;

        let mut orbit = SimpleCartesia::new();
        orbit.set_roll(20.0);
        let orbit = scene.add_under(root, orbit)?;
        let mut moon = SimpleCartesia::at([14.0, 0.0, 0.0])?;
        moon.set_scale(1.5);
        let moon_mesh = sphere(vec4(0.6, 0.6, 0.7, 1.0), 12, SphereShading::Smooth)?;
        scene.add_under(orbit, MeshCartesia::with_placement(Rc::new(moon_mesh), moon))?;

        log::debug!("planet demo built with {} nodes", scene.len());
        return Ok(PlanetDemo { root, camera, walker, orbit });
    }
}

impl Demo for PlanetDemo {
    fn root(&self) -> NodeHandle {
        self.root
    }

    fn camera(&self) -> NodeHandle {
        self.camera
    }

    fn lighting(&self) -> LightingConfig {
        LightingConfig {
            position: vec4(0.0, 5.0, 5.0, 1.0),
            ambient: vec4(0.7, 0.7, 0.7, 1.0),
            attenuation: 0.0,
            ..LightingConfig::default()
        }
    }

    fn advance(&mut self, scene: &mut Scene) -> Result<(), SceneError> {
        let walker = scene.node_mut::<SurfaceWalker>(self.walker).ok_or(SceneError::UnknownNode(self.walker))?;
        let (latitude, longitude) = (walker.latitude() + 1.0, walker.longitude() + 0.5);
        walker.set_latitude_longitude(latitude % 360.0, longitude % 360.0);
        walker.offset_mut().move_yaw(1.0);

        scene.node_mut::<SimpleCartesia>(self.orbit)
            .ok_or(SceneError::UnknownNode(self.orbit))?
            .move_yaw(2.0);
        return Ok(());
    }
}
