//! # engine_app — Demo driver
//!
//! Builds a small scene and runs it through the frame loop:
//!
//! 1. Generate `Player`, `Enemy`, and `Drone` with sample components.
//! 2. Run five frames, deactivating `Enemy` after the second.
//! 3. Remove the `Player` renderer and run two more frames.
//! 4. Run any further frames requested by the config.
//! 5. Look objects up by name, then release everything.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use components::{InputSimulator, Renderer, Transform, Vec2};
use tracing::info;
use tracing_subscriber::EnvFilter;

use engine_app::{EngineConfig, FrameLoop};

#[derive(Parser)]
#[command(name = "engine_app", about = "Object runtime demo driver")]
struct Args {
    /// Path to a JSON engine config
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialise structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("engine_app=info".parse()?)
                .add_directive("components=info".parse()?),
        )
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => {
            info!(path = %path.display(), "loading config");
            EngineConfig::load(path)?
        }
        None => EngineConfig::default(),
    };

    let mut frame_loop = FrameLoop::new(config)?;
    let manager = frame_loop.manager_mut();

    let player = manager.generate_object("Player");
    player.add_component(Transform::default());
    player.add_component(Renderer::default());

    let enemy = manager.generate_object("Enemy");
    enemy.add_component(Transform::new(Vec2::new(50.0, 100.0)));
    enemy.add_component(Renderer::default());

    let drone = manager.generate_object("Drone");
    drone.add_component(Transform::with_motion(Vec2::new(-20.0, 0.0), 90.0, 2.0));
    drone.add_component(Renderer::default());
    drone.add_component(InputSimulator::new(3));

    info!("simulating 5 frames");
    for _ in 0..5 {
        frame_loop.tick();
        if frame_loop.frame() == 2 {
            info!(object = enemy.name(), "deactivating");
            enemy.set_active(false);
        }
    }

    info!(object = player.name(), "removing renderer");
    player.remove_component::<Renderer>();

    info!("simulating 2 frames after component removal");
    for _ in 0..2 {
        frame_loop.tick();
    }

    if let Some(position) = player.get_component::<Transform>().with(|t| t.position) {
        info!(object = player.name(), %position, "final position");
    }

    if frame_loop.config().max_frames > 0 {
        info!("running configured frames");
        frame_loop.run();
    }

    for name in ["Player", "Enemy", "Drone"] {
        match frame_loop.manager().get_object(name).upgrade() {
            Some(object) => info!(object = object.name(), "found object"),
            None => info!(object = name, "object not found (reclaimed)"),
        }
    }

    frame_loop.manager_mut().release_all_objects();
    info!(frames = frame_loop.frame(), "demo complete");
    Ok(())
}
