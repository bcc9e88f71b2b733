//! Scripted input for headless runs.
//!
//! A script is a list of phases. Each phase holds a set of keys for a number
//! of frames, optionally turns the view once at its start, and optionally
//! fires a break or place on its first frame after the tick.

use anyhow::{Context, Result};
use blockworld_engine::physics::locomotion::{InputState, Player};
use blockworld_engine::session::{Session, TickOutcome};
use blockworld_engine::world::events::VoxelListener;
use blockworld_engine::world::position::BlockPos;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Break,
    Place,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phase {
    pub name: String,
    pub frames: u32,
    #[serde(default)]
    pub keys: InputState,
    /// Pointer movement applied once before the first frame.
    #[serde(default)]
    pub turn: (f64, f64),
    #[serde(default)]
    pub action: Option<Action>,
}

impl Phase {
    fn new(name: &str, frames: u32) -> Self {
        Self {
            name: name.into(),
            frames,
            keys: InputState::default(),
            turn: (0.0, 0.0),
            action: None,
        }
    }

    fn keys(mut self, keys: InputState) -> Self {
        self.keys = keys;
        self
    }

    fn turn(mut self, dx: f64, dy: f64) -> Self {
        self.turn = (dx, dy);
        self
    }

    fn action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    pub phases: Vec<Phase>,
}

impl Script {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("parsing script")
    }

    pub fn total_frames(&self) -> u64 {
        self.phases.iter().map(|p| p.frames as u64).sum()
    }
}

impl Default for Script {
    /// Land, walk, sprint-jump, then dig a block out in front and put it
    /// back.
    fn default() -> Self {
        let forward = InputState {
            forward: true,
            ..Default::default()
        };
        let sprint_jump = InputState {
            sprint: true,
            jump: true,
            ..forward
        };
        Self {
            phases: vec![
                Phase::new("settle", 90),
                Phase::new("walk", 120).keys(forward),
                Phase::new("turn", 1).turn(-400.0, 0.0),
                Phase::new("sprint-jump", 60).keys(sprint_jump),
                Phase::new("stop", 60),
                Phase::new("look-down", 1).turn(0.0, 300.0),
                Phase::new("dig", 1).action(Action::Break),
                Phase::new("rebuild", 1).action(Action::Place),
                Phase::new("strafe", 45).keys(InputState {
                    left: true,
                    ..Default::default()
                }),
                Phase::new("rest", 30),
            ],
        }
    }
}

/// What a run did.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub frames: u64,
    pub discarded: u64,
    pub grounded_frames: u64,
    pub broken: Vec<BlockPos>,
    pub placed: Vec<BlockPos>,
    pub missed_actions: u32,
    pub final_player: Player,
    pub voxels: usize,
}

/// Drive `session` through `script` at a fixed frame time.
pub fn run<L: VoxelListener>(session: &mut Session<L>, script: &Script, dt: f64) -> RunReport {
    let mut report = RunReport {
        frames: 0,
        discarded: 0,
        grounded_frames: 0,
        broken: Vec::new(),
        placed: Vec::new(),
        missed_actions: 0,
        final_player: *session.player(),
        voxels: session.world().len(),
    };

    let look = session.config().look;
    for phase in &script.phases {
        tracing::debug!("Phase '{}' ({} frames)", phase.name, phase.frames);
        let mut orientation = session.player().orientation;
        orientation.apply_pointer_delta(phase.turn.0, phase.turn.1, &look);

        for frame in 0..phase.frames {
            match session.tick(dt, &phase.keys, orientation) {
                TickOutcome::Advanced(_) => {}
                TickOutcome::Discarded => report.discarded += 1,
            }
            report.frames += 1;
            if session.player().on_ground {
                report.grounded_frames += 1;
            }

            if frame == 0 {
                if let Some(action) = phase.action {
                    perform(session, action, &mut report);
                }
            }
        }
        tracing::info!("{:>12}: {}", phase.name, session.player().summary());
    }

    report.final_player = *session.player();
    report.voxels = session.world().len();
    report
}

fn perform<L: VoxelListener>(session: &mut Session<L>, action: Action, report: &mut RunReport) {
    let result = match action {
        Action::Break => session.break_block(),
        Action::Place => session.place_block(),
    };
    match (action, result) {
        (Action::Break, Some(pos)) => {
            tracing::info!("Broke voxel at ({}, {}, {})", pos.x, pos.y, pos.z);
            report.broken.push(pos);
        }
        (Action::Place, Some(pos)) => {
            tracing::info!("Placed voxel at ({}, {}, {})", pos.x, pos.y, pos.z);
            report.placed.push(pos);
        }
        (action, None) => {
            tracing::info!("{:?} had no effect", action);
            report.missed_actions += 1;
        }
    }
}
