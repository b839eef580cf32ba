//! Locomotion domain: components and physics layers.

use avian2d::prelude::*;
use bevy::prelude::*;

/// Physics layers for collision filtering and spatial queries
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Ground surfaces (floors, platforms)
    Ground,
    /// Wall surfaces
    Wall,
    /// Player character
    Player,
    /// Movable obstacles that can be grabbed and pushed
    Pushable,
    /// Collectible pickups
    Pickup,
    /// Contact-damage hazards
    Hazard,
}

#[derive(Component, Debug)]
pub struct Player;

/// Marker for ground colliders
#[derive(Component, Debug)]
pub struct Ground;

/// Marker for wall colliders
#[derive(Component, Debug)]
pub struct Wall;

/// Inserted when the controller must stop acting entirely (death etc).
/// Sensors keep running; intent-driven systems skip the entity and any
/// active grab is released.
#[derive(Component, Debug)]
pub struct ControllerDisabled;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }

    /// Facing that points away from a wall on the given side.
    pub fn away_from(side: i8) -> Self {
        if side > 0 { Facing::Left } else { Facing::Right }
    }
}

/// Wall sub-state. Clinging and sliding are mutually exclusive by
/// construction and both carry the contacted side and collider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WallState {
    #[default]
    None,
    Clinging { side: i8, collider: Entity },
    Sliding { side: i8, collider: Entity },
}

impl WallState {
    pub fn is_none(self) -> bool {
        matches!(self, WallState::None)
    }

    pub fn side(self) -> Option<i8> {
        match self {
            WallState::None => None,
            WallState::Clinging { side, .. } | WallState::Sliding { side, .. } => Some(side),
        }
    }

    pub fn collider(self) -> Option<Entity> {
        match self {
            WallState::None => None,
            WallState::Clinging { collider, .. } | WallState::Sliding { collider, .. } => {
                Some(collider)
            }
        }
    }
}

#[derive(Component, Debug, Default)]
pub struct LocomotionState {
    pub grounded: bool,
    pub wall: WallState,
    pub facing: Facing,
    pub dashing: bool,
    pub dash_direction: f32,
    /// Smoothing state for the critically damped horizontal drive
    pub damp_velocity: f32,
}

impl LocomotionState {
    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn is_wall_clinging(&self) -> bool {
        matches!(self.wall, WallState::Clinging { .. })
    }

    pub fn is_wall_sliding(&self) -> bool {
        matches!(self.wall, WallState::Sliding { .. })
    }
}

/// A wall hit reported by the sensors: which side (-1 left, +1 right)
/// and which collider produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallHit {
    pub side: i8,
    pub collider: Entity,
}

/// Contact facts for the current tick, written by the sensors before
/// anything else runs.
#[derive(Component, Debug, Default)]
pub struct ContactState {
    pub on_ground: bool,
    pub wall: Option<WallHit>,
}

/// Countdown timers, ticked once per fixed step. A value above zero
/// means the timer is active.
#[derive(Component, Debug, Default)]
pub struct LocomotionTimers {
    /// Post-detach window during which a wall jump is still honored
    pub coyote: f32,
    /// Remaining hold time before a cling turns into a slide
    pub wall_cling: f32,
    /// No re-cling window after a wall jump
    pub post_wall_jump: f32,
    pub wall_tap_cooldown: f32,
    pub dash_active: f32,
    pub dash_cooldown: f32,
    /// Global input lock (wall-jump arc, stun)
    pub move_lock: f32,
}

impl LocomotionTimers {
    pub fn tick(&mut self, dt: f32) {
        self.coyote = (self.coyote - dt).max(0.0);
        self.wall_cling = (self.wall_cling - dt).max(0.0);
        self.post_wall_jump = (self.post_wall_jump - dt).max(0.0);
        self.wall_tap_cooldown = (self.wall_tap_cooldown - dt).max(0.0);
        self.dash_active = (self.dash_active - dt).max(0.0);
        self.dash_cooldown = (self.dash_cooldown - dt).max(0.0);
        self.move_lock = (self.move_lock - dt).max(0.0);
    }

    pub fn can_move(&self) -> bool {
        self.move_lock <= 0.0
    }

    pub fn dash_ready(&self) -> bool {
        self.dash_active <= 0.0 && self.dash_cooldown <= 0.0
    }
}

/// Air-jump and wall-jump accounting.
#[derive(Component, Debug, Default)]
pub struct JumpBudget {
    pub double_jumps_remaining: u8,
    pub wall_jumps_used: u8,
    /// Set after a wall jump when a ground touch is required before the
    /// next one; cleared on landing.
    pub wall_jump_locked: bool,
}

/// Where and when the character last detached from a wall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetachRecord {
    pub collider: Entity,
    pub at: f32,
    pub point: Vec2,
    pub side: i8,
}

/// Anti-repeat record: re-attachment to the collider we just detached
/// from is refused until enough time has passed or the character has
/// moved far enough away. Prevents oscillation at concave corners.
#[derive(Component, Debug, Default)]
pub struct WallDebounce {
    pub record: Option<DetachRecord>,
}

impl WallDebounce {
    pub fn record_detach(&mut self, collider: Entity, at: f32, point: Vec2, side: i8) {
        self.record = Some(DetachRecord {
            collider,
            at,
            point,
            side,
        });
    }

    /// Whether attaching to `collider` at `point` is currently allowed.
    /// Half of each configured threshold is the working window: crossing
    /// either one re-enables attachment.
    pub fn allows_reattach(
        &self,
        collider: Entity,
        now: f32,
        point: Vec2,
        regrab_cooldown: f32,
        min_separation: f32,
    ) -> bool {
        match self.record {
            Some(rec) if rec.collider == collider => {
                now - rec.at > regrab_cooldown * 0.5
                    || rec.point.distance(point) > min_separation * 0.5
            }
            _ => true,
        }
    }
}

/// Movable obstacle the player can grab and push.
#[derive(Component, Debug)]
pub struct Pushable {
    /// Slick surface applied while grabbed so the obstacle pushes easily
    pub grabbed_friction: f32,
}

/// Active grab: the joint entity plus everything needed to restore the
/// target on release. Presence of this component is the grabbing flag.
#[derive(Component, Debug, Clone)]
pub struct GrabLink {
    pub joint: Entity,
    pub target: Entity,
    /// Friction recorded at grab time, restored exactly on release
    pub prior_friction: Friction,
    /// Hand anchor in character-local space
    pub anchor_character: Vec2,
    /// Hand anchor in target-local space
    pub anchor_target: Vec2,
    /// Relative z rotation at grab time, for torque-stress measurement
    pub initial_twist: f32,
}
