//! Config parsing and scripted headless runs.

use blockworld_engine::config::SimConfig;
use blockworld_engine::session::Session;
use blockworld_engine::world::events::ChangeLog;
use blockworld_engine::world::position::BlockPos;
use blockworld_engine::world::terrain::Region;
use blockworld_sandbox::config;
use blockworld_sandbox::script::{self, Action, Script};
use glam::DVec3;

const DT: f64 = 1.0 / 60.0;

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[test]
fn empty_object_is_default_config() {
    let parsed = config::parse("{}").unwrap();
    assert_eq!(parsed, SimConfig::default());
}

#[test]
fn partial_config_keeps_other_defaults() {
    let parsed = config::parse(include_str!("../configs/moon.json")).unwrap();
    assert_eq!(parsed.movement.gravity, 4.0);
    assert_eq!(parsed.movement.jump_speed, 4.5);
    assert_eq!(parsed.movement.walk_speed, 6.0);
    assert_eq!(parsed.terrain.amplitude, 2.0);
    assert_eq!(parsed.terrain.freq_x, 0.15);
    assert_eq!(parsed.region, Region::around_origin(12));
    assert_eq!(parsed.reach, 8.0);
}

#[test]
fn tunneling_prone_config_is_rejected() {
    let err = config::parse(r#"{ "movement": { "terminal_velocity": 500.0 } }"#).unwrap_err();
    assert!(err.to_string().contains("skip a voxel"), "{err}");
}

#[test]
fn wall_skipping_speed_is_rejected() {
    let err = config::parse(r#"{ "movement": { "walk_speed": 50.0 } }"#).unwrap_err();
    assert!(err.to_string().contains("skip a wall"), "{err}");

    let err = config::parse(r#"{ "movement": { "sprint_multiplier": 6.0 } }"#).unwrap_err();
    assert!(err.to_string().contains("skip a wall"), "{err}");

    // 6 * 1.7 * 0.05 = 0.51 per tick, well under the 1.6 wall-skip stride.
    assert!(config::parse(r#"{ "movement": { "walk_speed": 6.0 } }"#).is_ok());
}

#[test]
fn malformed_config_is_an_error() {
    assert!(config::parse(r#"{ "reach": "far" }"#).is_err());
    assert!(config::parse(r#"{ "player": { "height": 0.0 } }"#).is_err());
}

#[test]
fn missing_config_file_names_path() {
    let err = config::load(std::path::Path::new("/nonexistent/blockworld.json")).unwrap_err();
    assert!(format!("{err:#}").contains("/nonexistent/blockworld.json"));
}

// ---------------------------------------------------------------------------
// Scripts
// ---------------------------------------------------------------------------

#[test]
fn script_file_parses() {
    let script = Script::from_json(include_str!("../configs/walkthrough.json")).unwrap();
    assert_eq!(script.phases.len(), 7);
    assert_eq!(script.total_frames(), 153);
    assert!(script.phases[1].keys.forward);
    assert!(!script.phases[2].keys.forward);
    assert_eq!(script.phases[3].turn, (0.0, 600.0));
    assert_eq!(script.phases[4].action, Some(Action::Break));
    assert_eq!(script.phases[5].action, Some(Action::Place));
}

#[test]
fn walkthrough_on_flat_ground_digs_and_rebuilds() {
    let mut session = Session::with_listener(SimConfig::default(), ChangeLog::new());
    session.generate_region(Region::around_origin(16), &|_x: i64, _z: i64| 4);
    session.spawn_at(DVec3::new(0.5, 6.0, 0.5));
    session.listener_mut().take();

    let script = Script::from_json(include_str!("../configs/walkthrough.json")).unwrap();
    let report = script::run(&mut session, &script, DT);

    assert_eq!(report.frames, 153);
    assert_eq!(report.discarded, 0);
    assert_eq!(report.broken.len(), 1);
    assert_eq!(report.placed, report.broken, "rebuild fills the dug cell");
    assert_eq!(report.broken[0].y, 3);
    assert_eq!(report.voxels, 33 * 33 * 4);
    assert_eq!(session.listener().len(), 2);

    let player = report.final_player;
    assert!(player.on_ground);
    assert_eq!(player.position.y, 4.0 + session.config().epsilon);
    assert!(!session.player_embedded());
}

#[test]
fn default_script_runs_cleanly_on_hills() {
    let config = SimConfig::default();
    let terrain = config.terrain;
    let mut session = Session::new(config);
    session.generate();
    session.spawn(&terrain);

    let script = Script::default();
    let report = script::run(&mut session, &script, DT);

    assert_eq!(report.frames, script.total_frames());
    assert_eq!(report.discarded, 0);
    assert_eq!(report.broken.len(), 1);
    assert_eq!(report.placed.len() as u32 + report.missed_actions, 1);
    assert!(report.grounded_frames > report.frames / 2);
    assert!(report.final_player.on_ground);
    assert!(!session.player_embedded());
    assert!(!session.has(BlockPos::new(0, 100, 0)));
}
