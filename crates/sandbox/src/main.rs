use std::path::PathBuf;

use anyhow::{Context, Result};
use blockworld_engine::config::SimConfig;
use blockworld_engine::render::RenderMirror;
use blockworld_engine::session::Session;
use blockworld_engine::world::events::ChangeLog;
use blockworld_sandbox::script::{self, Script};
use blockworld_sandbox::{DEFAULT_FPS, config};

fn arg_value(flag: &str) -> Option<String> {
    std::env::args().skip_while(|a| a != flag).nth(1)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run() {
        tracing::error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let config_path = arg_value("--config").map(PathBuf::from);
    let script_path = arg_value("--script").map(PathBuf::from);
    let fps: f64 = match arg_value("--fps") {
        Some(s) => s.parse().with_context(|| format!("invalid --fps {s:?}"))?,
        None => DEFAULT_FPS,
    };
    anyhow::ensure!(fps > 0.0, "--fps must be positive");
    let print_report = std::env::args().any(|a| a == "--report");

    let sim_config = match &config_path {
        Some(path) => config::load(path)?,
        None => SimConfig::default(),
    };
    let script = match &script_path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading script {}", path.display()))?;
            Script::from_json(&text)?
        }
        None => Script::default(),
    };

    tracing::info!("Block world sandbox");
    tracing::info!(
        "Generating region x {}..={}, z {}..={}",
        sim_config.region.min_x,
        sim_config.region.max_x,
        sim_config.region.min_z,
        sim_config.region.max_z
    );

    let terrain = sim_config.terrain;
    let mut session = Session::with_listener(sim_config, (RenderMirror::new(), ChangeLog::new()));
    let voxels = session.generate();
    tracing::info!("World ready: {} voxels, {} drawables", voxels, session.listener().0.len());
    session.listener_mut().1.take();

    session.spawn(&terrain);
    tracing::info!("Spawned: {}", session.player().summary());

    tracing::info!(
        "Running {} phases ({} frames at {} fps)",
        script.phases.len(),
        script.total_frames(),
        fps
    );
    let report = script::run(&mut session, &script, 1.0 / fps);

    let (mirror, changes) = session.listener();
    tracing::info!(
        "Done: {} frames, {} on ground, {} discarded, {} edits ({} missed)",
        report.frames,
        report.grounded_frames,
        report.discarded,
        changes.len(),
        report.missed_actions
    );
    tracing::info!("Render mirror holds {} drawables", mirror.len());
    if session.player_embedded() {
        tracing::warn!("Player ended inside a voxel -- something is off.");
    }

    if print_report {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(())
}
