use crate::grid::TileGrid;
use crate::pathfinding::TraversalSequence;
use bevy::prelude::*;

/// Horizontal speed is divided by this while rising toward a higher tile
const JUMP_HORIZONTAL_DAMPING: f32 = 3.0;
/// Velocity is divided by this when stepping off an edge
const EDGE_VELOCITY_DAMPING: f32 = 5.0;
/// Small upward hop given when stepping off an edge
const EDGE_HOP_VELOCITY: f32 = 1.5;

/// Default distance under which a target counts as reached
pub const DEFAULT_ARRIVAL_EPSILON: f32 = 0.05;

/// Configuration for locomotion along a traversal sequence
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocomotionConfig {
    pub move_speed: f32,
    pub jump_velocity: f32,
    /// Half of the unit's vertical extent; the unit stands this far above a tile's top face
    pub half_height: f32,
    pub arrival_epsilon: f32,
    pub gravity: Vec3,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            move_speed: 2.0,
            jump_velocity: 4.5,
            half_height: 0.9,
            arrival_epsilon: DEFAULT_ARRIVAL_EPSILON,
            gravity: Vec3::new(0.0, -9.81, 0.0),
        }
    }
}

/// Vertical motion regime; exactly one is active at a time
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum MotionMode {
    #[default]
    None,
    JumpingUp,
    /// Walking to the edge point before dropping to a lower tile
    MovingToEdge { edge: Vec3 },
    FallingDown,
}

/// Continuous motion state of a moving unit
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct KinematicState {
    pub velocity: Vec3,
    /// Horizontal direction of travel, unit length or zero
    pub heading: Vec3,
    pub mode: MotionMode,
}

/// What the controller did during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocomotionPhase {
    /// No path to follow; nothing moved
    Idle,
    LevelWalk,
    PrepareJump,
    MoveToEdge,
    JumpUp,
    FallDown,
    WaypointReached,
    SequenceComplete,
}

/// Per-tick state machine moving a unit along a [`TraversalSequence`]
#[derive(Debug, Clone, Default)]
pub struct LocomotionController {
    path: TraversalSequence,
    kinematics: KinematicState,
    config: LocomotionConfig,
}

impl LocomotionController {
    pub fn new(config: LocomotionConfig) -> Self {
        Self {
            path: TraversalSequence::default(),
            kinematics: KinematicState::default(),
            config,
        }
    }

    pub fn config(&self) -> &LocomotionConfig {
        &self.config
    }

    pub fn kinematics(&self) -> &KinematicState {
        &self.kinematics
    }

    pub fn path(&self) -> &TraversalSequence {
        &self.path
    }

    /// Replace any current path and start from a clean kinematic state
    pub fn begin(&mut self, path: TraversalSequence) {
        self.path = path;
        self.kinematics = KinematicState::default();
    }

    /// Drop the remaining path immediately
    pub fn abort(&mut self) {
        self.path.clear();
        self.kinematics = KinematicState::default();
    }

    /// Advance the unit by one tick
    ///
    /// `SequenceComplete` is reported once, on the tick the last waypoint is
    /// consumed. Ticking without a path reports `Idle`.
    pub fn tick(&mut self, delta_secs: f32, transform: &mut Transform, grid: &TileGrid) -> LocomotionPhase {
        let Some(waypoint) = self.path.peek() else {
            self.kinematics = KinematicState::default();
            return LocomotionPhase::Idle;
        };

        let Some(tile) = grid.tile(waypoint) else {
            warn!("Waypoint tile {waypoint} no longer exists; skipping it");
            return self.finish_waypoint();
        };
        let target = tile.standing_point(self.config.half_height);
        let position = transform.translation;

        if position.distance(target) < self.config.arrival_epsilon {
            transform.translation = target;
            return self.finish_waypoint();
        }

        let phase = if position.y != target.y {
            self.vertical_step(delta_secs, transform, target)
        } else {
            self.kinematics.heading = (target - position).normalize_or_zero();
            self.kinematics.velocity = self.kinematics.heading * self.config.move_speed;
            LocomotionPhase::LevelWalk
        };

        if let Ok(direction) = Dir3::new(self.kinematics.heading) {
            transform.look_to(direction, Dir3::Y);
        }

        let step = self.kinematics.velocity * delta_secs;
        transform.translation = match (phase, self.kinematics.mode) {
            (LocomotionPhase::LevelWalk, _) => step_towards(transform.translation, target, step),
            (_, MotionMode::MovingToEdge { edge }) => step_towards(transform.translation, edge, step),
            _ => transform.translation + step,
        };

        phase
    }

    fn finish_waypoint(&mut self) -> LocomotionPhase {
        self.path.pop();
        self.kinematics.mode = MotionMode::None;

        if self.path.is_empty() {
            self.kinematics = KinematicState::default();
            LocomotionPhase::SequenceComplete
        } else {
            debug!("Waypoint reached; {} remaining", self.path.len());
            LocomotionPhase::WaypointReached
        }
    }

    fn vertical_step(&mut self, delta_secs: f32, transform: &mut Transform, target: Vec3) -> LocomotionPhase {
        let position = transform.translation;

        match self.kinematics.mode {
            MotionMode::FallingDown => {
                self.kinematics.velocity += self.config.gravity * delta_secs;

                // Land on this tick if the next step would pass through the surface
                if position.y + self.kinematics.velocity.y * delta_secs <= target.y {
                    transform.translation.y = target.y;
                    self.kinematics.velocity = Vec3::ZERO;
                    self.kinematics.mode = MotionMode::None;
                }
                LocomotionPhase::FallDown
            }
            MotionMode::JumpingUp => {
                self.kinematics.velocity += self.config.gravity * delta_secs;

                // Also switch at the apex so a short jump still lands on the ledge
                if position.y > target.y || self.kinematics.velocity.y <= 0.0 {
                    self.kinematics.mode = MotionMode::FallingDown;
                }
                LocomotionPhase::JumpUp
            }
            MotionMode::MovingToEdge { edge } => {
                if position.distance(edge) >= self.config.arrival_epsilon {
                    self.kinematics.velocity = self.kinematics.heading * self.config.move_speed;
                } else {
                    self.kinematics.mode = MotionMode::FallingDown;
                    self.kinematics.velocity /= EDGE_VELOCITY_DAMPING;
                    self.kinematics.velocity.y = EDGE_HOP_VELOCITY;
                }
                LocomotionPhase::MoveToEdge
            }
            MotionMode::None => {
                self.prepare_jump(position, target);
                LocomotionPhase::PrepareJump
            }
        }
    }

    fn prepare_jump(&mut self, position: Vec3, target: Vec3) {
        // Heading stays level so the unit does not tilt while rising or falling
        let level_target = Vec3::new(target.x, position.y, target.z);
        self.kinematics.heading = (level_target - position).normalize_or_zero();

        if position.y > target.y {
            let edge = position + (level_target - position) / 2.0;
            self.kinematics.mode = MotionMode::MovingToEdge { edge };
            self.kinematics.velocity = self.kinematics.heading * self.config.move_speed;
            debug!("Descending: moving to edge ({:.2}, {:.2}, {:.2})", edge.x, edge.y, edge.z);
        } else {
            let difference = target.y - position.y;
            self.kinematics.mode = MotionMode::JumpingUp;
            self.kinematics.velocity =
                self.kinematics.heading * self.config.move_speed / JUMP_HORIZONTAL_DAMPING;
            self.kinematics.velocity.y = self.config.jump_velocity * (0.5 + difference / 2.0);
            debug!("Jumping up {difference:.2} with launch velocity {:.2}", self.kinematics.velocity.y);
        }
    }
}

/// Move by `step` without passing `goal`
fn step_towards(from: Vec3, goal: Vec3, step: Vec3) -> Vec3 {
    if step.length() >= from.distance(goal) {
        goal
    } else {
        from + step
    }
}
