//! Raycasting from the view and the break/place edit rules.

use blockworld_engine::config::SimConfig;
use blockworld_engine::interact::raycast::{Ray, raycast_brute_force};
use blockworld_engine::physics::locomotion::Orientation;
use blockworld_engine::render::RenderMirror;
use blockworld_engine::session::Session;
use blockworld_engine::world::World;
use blockworld_engine::world::events::{ChangeLog, VoxelEvent};
use blockworld_engine::world::position::{BlockPos, Face};
use blockworld_engine::world::terrain::Region;
use glam::DVec3;
use std::f64::consts::FRAC_PI_2;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Flat ground with its top surface at `surface`, player standing on it at
/// the centre of column (0, 0), with a change log attached and drained.
fn standing_session(surface: i64) -> Session<ChangeLog> {
    let mut session = Session::with_listener(SimConfig::default(), ChangeLog::new());
    session.generate_region(Region::around_origin(8), &move |_x: i64, _z: i64| surface);
    let eps = session.config().epsilon;
    session.spawn_at(DVec3::new(0.5, surface as f64 + eps, 0.5));
    session.listener_mut().take();
    session
}

fn look(session: &mut Session<ChangeLog>, orientation: Orientation) {
    session.player_mut().orientation = orientation;
}

fn straight_down() -> Orientation {
    Orientation::new(0.0, -(FRAC_PI_2 - 0.01))
}

// ---------------------------------------------------------------------------
// Raycast
// ---------------------------------------------------------------------------

#[test]
fn single_voxel_hit_from_above() {
    let mut world = World::new();
    world.add(BlockPos::new(0, 0, 0));
    let ray = Ray::new(DVec3::new(0.5, 5.0, 0.5), DVec3::new(0.0, -1.0, 0.0), 8.0).unwrap();

    let hit = ray.cast(&world).expect("hit");
    assert_eq!(hit.pos, BlockPos::new(0, 0, 0));
    assert_eq!(hit.normal(), (0, 1, 0));
    assert!((hit.distance - 4.0).abs() < 1e-9);

    let brute = raycast_brute_force(&ray, world.iter()).expect("hit");
    assert_eq!(brute, hit);
}

#[test]
fn nearest_of_several_voxels_wins() {
    let mut world = World::new();
    for x in 2..6 {
        world.add(BlockPos::new(x, 0, 0));
    }
    let ray = Ray::new(DVec3::new(0.5, 0.5, 0.5), DVec3::X, 8.0).unwrap();
    let hit = ray.cast(&world).unwrap();
    assert_eq!(hit.pos, BlockPos::new(2, 0, 0));
    assert_eq!(hit.face, Face::NegX);
    assert_eq!(hit.adjacent(), BlockPos::new(1, 0, 0));
}

#[test]
fn view_ray_hits_ground_under_feet() {
    let mut session = standing_session(5);
    look(&mut session, straight_down());
    let hit = session.raycast_from_view().expect("ground below");
    assert_eq!(hit.pos, BlockPos::new(0, 4, 0));
    assert_eq!(hit.face, Face::PosY);
    let eye_height = session.config().player.eye_height();
    assert!(hit.distance > eye_height && hit.distance < eye_height + 0.01);
}

#[test]
fn view_ray_respects_reach() {
    let mut session = standing_session(1);
    session.add(BlockPos::new(0, 2, -9));
    look(&mut session, Orientation::default());
    assert!(session.raycast_from_view().is_none());

    session.add(BlockPos::new(0, 2, -7));
    let hit = session.raycast_from_view().unwrap();
    assert_eq!(hit.pos, BlockPos::new(0, 2, -7));
    assert_eq!(hit.face, Face::PosZ);
}

// ---------------------------------------------------------------------------
// Break / place
// ---------------------------------------------------------------------------

#[test]
fn break_then_place_restores_voxel() {
    let mut session = standing_session(5);
    look(&mut session, straight_down());
    let target = BlockPos::new(0, 4, 0);

    assert_eq!(session.break_block(), Some(target));
    assert!(!session.has(target));

    assert_eq!(session.place_block(), Some(target));
    assert!(session.has(target));

    assert_eq!(
        session.listener().events(),
        &[VoxelEvent::Removed(target), VoxelEvent::Added(target)]
    );
}

#[test]
fn placing_into_player_is_rejected() {
    let mut session = standing_session(5);
    look(&mut session, straight_down());
    let voxels_before = session.world().len();

    // The face under the feet opens onto the cell the player stands in.
    assert_eq!(session.place_block(), None);
    assert!(!session.has(BlockPos::new(0, 5, 0)));
    assert_eq!(session.world().len(), voxels_before);
    assert!(session.listener().is_empty());
}

#[test]
fn placing_against_distant_wall_succeeds() {
    let mut session = standing_session(1);
    for y in 1..4 {
        session.add(BlockPos::new(3, y, 0));
    }
    session.listener_mut().take();
    look(&mut session, Orientation::new(-FRAC_PI_2, 0.0));

    let hit = session.raycast_from_view().unwrap();
    assert_eq!(hit.pos, BlockPos::new(3, 2, 0));
    assert_eq!(hit.face, Face::NegX);

    assert_eq!(session.place_block(), Some(BlockPos::new(2, 2, 0)));
    assert_eq!(session.listener().events(), &[VoxelEvent::Added(BlockPos::new(2, 2, 0))]);
}

#[test]
fn adjacent_cell_touching_player_is_allowed() {
    // Cell (1, 1, 0) shares no volume with a box spanning x in [0.2, 0.8].
    let mut session = standing_session(1);
    session.add(BlockPos::new(2, 1, 0));
    look(&mut session, Orientation::new(-FRAC_PI_2, -0.5));
    let hit = session.raycast_from_view().unwrap();
    assert_eq!(hit.pos, BlockPos::new(2, 1, 0));
    assert_eq!(hit.face, Face::NegX);
    assert_eq!(session.place_block(), Some(BlockPos::new(1, 1, 0)));
}

#[test]
fn missing_everything_is_a_no_op() {
    let mut session = standing_session(1);
    look(&mut session, Orientation::new(0.0, FRAC_PI_2 - 0.01));
    let voxels_before = session.world().len();

    assert!(session.raycast_from_view().is_none());
    assert_eq!(session.break_block(), None);
    assert_eq!(session.place_block(), None);
    assert_eq!(session.world().len(), voxels_before);
    assert!(session.listener().is_empty());
}

#[test]
fn edits_reach_render_mirror() {
    let mut session = Session::with_listener(SimConfig::default(), RenderMirror::new());
    session.generate_region(Region::around_origin(2), &|_x: i64, _z: i64| 3);
    let eps = session.config().epsilon;
    session.spawn_at(DVec3::new(0.5, 3.0 + eps, 0.5));
    session.player_mut().orientation = straight_down();

    let broken = session.break_block().unwrap();
    assert!(session.listener().id_at(broken).is_none());
    assert_eq!(session.listener().len(), session.world().len());

    let placed = session.place_block().unwrap();
    let id = session.listener().id_at(placed).unwrap();
    assert_eq!(session.listener().get(id).unwrap().center, placed.center());
}
