mod demos;
mod logging;

use std::time::{Duration, Instant};

use clap::Parser;

use cartesia_core::{RenderError, Renderer, RendererConfig};
use cartesia_scene::Scene;

use crate::demos::DemoKind;
use crate::logging::{init_logging, LoggingConfig};

/// Renders the Cartesia demo scenes without a window, logging what every
/// frame would hand to the GPU.
#[derive(Parser, Debug)]
#[command(name = "cartesia", version, about)]
struct Args {
    /// Demo scene to render.
    #[arg(long, value_enum, default_value_t = DemoKind::CubeGrid)]
    demo: DemoKind,

    /// Number of frames to render.
    #[arg(long, default_value_t = 120)]
    frames: u64,

    /// Viewport aspect ratio (width / height).
    #[arg(long, default_value_t = 16.0 / 9.0)]
    aspect: f64,

    /// Log filter in env_logger syntax; overrides RUST_LOG.
    #[arg(long)]
    log_filter: Option<String>,
}

fn run(args: &Args) -> Result<(), RenderError> {
    let mut scene = Scene::new();
    let mut demo = args.demo.build(&mut scene)?;

    let mut renderer = Renderer::new(RendererConfig { lighting: demo.lighting() });
    renderer.use_scene(demo.root());
    renderer.use_camera(demo.camera());
    renderer.set_aspect(args.aspect);

    log::info!("rendering {} frames of {:?} ({} nodes)", args.frames, args.demo, scene.len());

    let mut last_frame_end = Instant::now();
    let mut total_frame_time = Duration::from_secs(0);

    for _ in 0..args.frames {
        profiling::scope!("Frame");

        demo.advance(&mut scene)?;
        let frame = renderer.render_frame(&mut scene)?;
        log::debug!("camera view {:?}", frame.camera.view);

        let now = Instant::now();
        total_frame_time += now.duration_since(last_frame_end);
        last_frame_end = now;

        profiling::finish_frame!();
    }

    if let Some(average) = average_frame_time(total_frame_time, args.frames) {
        log::info!("average frame time {:?}, {} meshes cached", average, renderer.mesh_cache().len());
    }
    return Ok(());
}

fn average_frame_time(total: Duration, frames: u64) -> Option<Duration> {
    if frames == 0 {
        return None;
    }
    Some(Duration::from_secs_f64(total.as_secs_f64() / frames as f64))
}

#[cfg(feature = "profile-with-optick")]
fn wait_for_profiler() {
    use std::thread::sleep;
    for _ in 0..100 {
        profiling::scope!("Wait for Optick...");
        sleep(Duration::from_millis(100));
        profiling::finish_frame!();
    }
}

fn main() {
    let args = Args::parse();
    init_logging(LoggingConfig { env_filter: args.log_filter.clone(), ..Default::default() });

    #[cfg(feature = "profile-with-optick")]
        wait_for_profiler();

    if let Err(error) = run(&args) {
        log::error!("{}", error);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn parses_demo_names() {
        let args = Args::try_parse_from(["cartesia", "--demo", "planet", "--frames", "3"]).unwrap();
        assert_eq!(args.demo, DemoKind::Planet);
        assert_eq!(args.frames, 3);
        assert!(Args::try_parse_from(["cartesia", "--demo", "teapot"]).is_err());
    }

    #[test]
    fn average_frame_time_handles_any_frame_count() {
        assert_eq!(average_frame_time(Duration::from_secs(3), 0), None);
        assert_eq!(average_frame_time(Duration::from_secs(3), 2), Some(Duration::from_millis(1500)));
        let huge = average_frame_time(Duration::from_secs(1 << 32), 1 << 32).unwrap();
        assert_abs_diff_eq!(huge.as_secs_f64(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn runs_every_demo() {
        for demo in [DemoKind::CubeGrid, DemoKind::Planet] {
            let args = Args { demo, frames: 5, aspect: 1.5, log_filter: None };
            assert_eq!(run(&args), Ok(()));
        }
    }
}
