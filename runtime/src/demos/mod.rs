mod cube_grid;
mod planet;

use cartesia_core::LightingConfig;
use cartesia_scene::{NodeHandle, Scene, SceneError};

pub use cube_grid::CubeGrid;
pub use planet::PlanetDemo;

/// An animated scene. The demo owns no nodes itself; it keeps the handles
/// of the nodes it animates in the shared [Scene].
pub trait Demo {
    /// Root the renderer draws from.
    fn root(&self) -> NodeHandle;

    fn camera(&self) -> NodeHandle;

    fn lighting(&self) -> LightingConfig {
        LightingConfig::default()
    }

    /// Moves the scene forward by one frame.
    fn advance(&mut self, scene: &mut Scene) -> Result<(), SceneError>;
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, clap::ValueEnum)]
pub enum DemoKind {
    /// Eight spinning cubes with six orbiting, fading moons.
    CubeGrid,
    /// A walker crossing a planet while a moon orbits it.
    Planet,
}

impl DemoKind {
    pub fn build(self, scene: &mut Scene) -> Result<Box<dyn Demo>, SceneError> {
        let demo: Box<dyn Demo> = match self {
            DemoKind::CubeGrid => Box::new(CubeGrid::build(scene)?),
            DemoKind::Planet => Box::new(PlanetDemo::build(scene)?),
        };
        return Ok(demo);
    }
}
