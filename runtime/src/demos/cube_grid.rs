use std::rc::Rc;

use cartesia_math::{radians, vec3, vec4, Mat4, Real, Vector};
use cartesia_scene::{
    cube, CameraCartesia, CustomCartesia, MeshCartesia, NodeHandle, Scene, SceneError, SimpleCartesia,
};

use crate::demos::Demo;

//      7    6
//    3    2
//
//      4    5
//    0    1
const CORNERS: [[Real; 3]; 8] = [
    [-10.0, -10.0, 10.0],
    [10.0, -10.0, 10.0],
    [10.0, 10.0, 10.0],
    [-10.0, 10.0, 10.0],
    [-10.0, -10.0, -10.0],
    [10.0, -10.0, -10.0],
    [10.0, 10.0, -10.0],
    [-10.0, 10.0, -10.0],
];

const COLORS: [[Real; 3]; 8] = [
    [1.0, 0.0, 0.5],
    [0.5, 1.0, 0.5],
    [1.0, 0.5, 0.5],
    [0.0, 0.5, 1.0],
    [0.5, 1.0, 0.0],
    [0.5, 0.0, 1.0],
    [1.0, 1.0, 0.0],
    [1.0, 0.0, 1.0],
];

const SPIN_AXES: [[Real; 3]; 8] = [
    [0.0, 0.0, 1.0],
    [0.0, 1.0, 1.0],
    [1.0, 1.0, 1.0],
    [0.0, 1.0, 0.0],
    [1.0, 0.0, 1.0],
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [1.0, 0.0, 1.0],
];

const ORBIT_AXES: [[Real; 3]; 6] = [
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
    [0.0, 1.0, 1.0],
    [1.0, 0.0, 1.0],
    [1.0, 1.0, 0.0],
];

// Degrees per frame
const ORBIT_SPEEDS: [Real; 6] = [4.0, 3.0, 2.0, 1.0, 3.0, 2.0];
const SPIN_SPEED: Real = 2.0;
const FADE_SPEED: Real = 1.5;

struct SpinningCube {
    // Frame node holding corner placement, spin and pulse
    frame: NodeHandle,
    corner: Vector,
    axis: Vector,
    spin: Mat4,
    pulse_angle: Real,
    pulse_speed: Real,
}

struct Moon {
    node: NodeHandle,
    color: [Real; 3],
    // Orbit radius vector before any swing or rotation
    offset: Vector,
    axis: Vector,
    orbit_angle: Real,
    orbit_speed: Real,
    fade_angle: Real,
}

/// Eight cubes on the corners of a 20 unit cube, each spinning about its own
/// axis and pulsing in size, circled by six moons that swing in and out
/// while fading.
pub struct CubeGrid {
    root: NodeHandle,
    camera: NodeHandle,
    cubes: Vec<SpinningCube>,
    moons: Vec<Moon>,
}

impl CubeGrid {
    pub fn build(scene: &mut Scene) -> Result<CubeGrid, SceneError> {
        let root = scene.add(SimpleCartesia::new());

        let mut camera = CameraCartesia::default();
        camera.placement_mut().set_position([0.0, 0.0, 50.0])?;
        let camera = scene.add_under(root, camera)?;

        let mut cubes = Vec::with_capacity(CORNERS.len());
        for (i, corner) in CORNERS.iter().enumerate() {
            let frame = scene.add_under(root, CustomCartesia::new(Mat4::identity().translate(*corner)?))?;
            let [r, g, b] = COLORS[i];
            scene.add_under(frame, MeshCartesia::new(Rc::new(cube(vec4(r, g, b, 1.0))?)))?;
            cubes.push(SpinningCube {
                frame,
                corner: Vector::from(*corner),
                axis: Vector::from(SPIN_AXES[i]),
                spin: Mat4::identity(),
                pulse_angle: 0.0,
                pulse_speed: 1.0 + i as Real,
            });
        }

        let mut moons = Vec::with_capacity(ORBIT_AXES.len());
        for (i, axis) in ORBIT_AXES.iter().enumerate() {
            // rotating the axis components gives a vector off the axis
            let offset = vec3(axis[1], axis[2], axis[0]).scale(3.0 + i as Real, false);
            let mut placement = SimpleCartesia::at(offset.clone())?;
            placement.set_scale(0.5);
            let [r, g, b] = COLORS[i];
            let node = scene.add_under(
                root,
                MeshCartesia::with_placement(Rc::new(cube(vec4(r, g, b, 1.0))?), placement),
            )?;
            moons.push(Moon {
                node,
                color: COLORS[i],
                offset,
                axis: Vector::from(*axis),
                orbit_angle: 0.0,
                orbit_speed: ORBIT_SPEEDS[i],
                fade_angle: 0.0,
            });
        }

        log::debug!("cube grid built with {} cubes and {} moons", cubes.len(), moons.len());
        return Ok(CubeGrid { root, camera, cubes, moons });
    }
}

impl Demo for CubeGrid {
    fn root(&self) -> NodeHandle {
        self.root
    }

    fn camera(&self) -> NodeHandle {
        self.camera
    }

    fn advance(&mut self, scene: &mut Scene) -> Result<(), SceneError> {
        for spinning in &mut self.cubes {
            spinning.spin = spinning.spin.rotate(SPIN_SPEED, spinning.axis.clone())?;
            spinning.pulse_angle += spinning.pulse_speed;
            let scale = 1.0 + 0.2 * radians(spinning.pulse_angle).cos();
            let transform = Mat4::identity()
                .translate(spinning.corner.clone())?
                .append(&spinning.spin)
                .scale_uniform(scale);
            scene.node_mut::<CustomCartesia>(spinning.frame)
                .ok_or(SceneError::UnknownNode(spinning.frame))?
                .set_transform(transform);
        }

        for moon in &mut self.moons {
            moon.orbit_angle += moon.orbit_speed;
            moon.fade_angle += FADE_SPEED;
            let swing = radians(moon.fade_angle).cos();
            let position = Mat4::identity()
                .rotate(moon.orbit_angle, moon.axis.clone())?
                .transform_direction(moon.offset.scale(1.0 + 0.85 * swing, false))?;
            let [r, g, b] = moon.color;

            let node = scene.node_mut::<MeshCartesia>(moon.node).ok_or(SceneError::UnknownNode(moon.node))?;
            node.placement_mut().set_position(position)?;
            node.placement_mut().move_pitch(SPIN_SPEED);
            node.placement_mut().move_yaw(SPIN_SPEED);
            // recolouring keeps the "cube" key, so cached vertex data is reused
            node.set_mesh(Rc::new(cube(vec4(r, g, b, 0.5 + 0.5 * swing))?));
        }
        return Ok(());
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use cartesia_core::{Renderer, RendererConfig};

    use super::*;

    fn render(scene: &mut Scene, demo: &CubeGrid, renderer: &mut Renderer) -> cartesia_core::Frame {
        renderer.use_scene(demo.root());
        renderer.use_camera(demo.camera());
        renderer.render_frame(scene).unwrap()
    }

    #[test]
    fn every_cube_and_moon_is_drawn() {
        let mut scene = Scene::new();
        let mut demo = CubeGrid::build(&mut scene).unwrap();
        demo.advance(&mut scene).unwrap();
        let mut renderer = Renderer::new(RendererConfig::default());
        let frame = render(&mut scene, &demo, &mut renderer);
        assert_eq!(frame.meshes.len(), 14);
        assert_eq!(renderer.mesh_cache().len(), 1);
    }

    #[test]
    fn cubes_stay_on_their_corners() {
        let mut scene = Scene::new();
        let mut demo = CubeGrid::build(&mut scene).unwrap();
        for _ in 0..37 {
            demo.advance(&mut scene).unwrap();
        }
        for (spinning, corner) in demo.cubes.iter().zip(CORNERS) {
            let position = scene.absolute_position(spinning.frame).unwrap();
            assert!(position.approx_eq(&Vector::from(corner), 1e-9), "{:?}", position);
        }
    }

    #[test]
    fn moons_keep_their_orbit_radius() {
        let mut scene = Scene::new();
        let mut demo = CubeGrid::build(&mut scene).unwrap();
        for _ in 0..10 {
            demo.advance(&mut scene).unwrap();
        }
        let swing = 1.0 + 0.85 * radians(15.0).cos();
        for moon in &demo.moons {
            let distance = scene.absolute_position(moon.node).unwrap().magnitude();
            assert_abs_diff_eq!(distance, moon.offset.magnitude() * swing, epsilon = 1e-9);
        }
    }

    #[test]
    fn moons_vanish_when_fully_faded() {
        let mut scene = Scene::new();
        let mut demo = CubeGrid::build(&mut scene).unwrap();
        // 120 frames of 1.5 degrees puts the fade at 180 degrees: alpha 0
        for _ in 0..120 {
            demo.advance(&mut scene).unwrap();
        }
        let mut renderer = Renderer::new(RendererConfig::default());
        let frame = render(&mut scene, &demo, &mut renderer);
        assert_eq!(frame.meshes.len(), 8);
    }
}
