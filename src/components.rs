//! Core components for the shooter simulation.

use bevy::prelude::*;

use crate::types::{BossPhase, ItemKind, ParticleTint};

/// Marker for the player ship.
///
/// The player entity also carries a `Transform`, a [`Hitbox`], a
/// [`PlayerGun`] and a [`MeteorLauncher`]; a [`Shield`] or [`HitFlash`] is
/// attached and removed as the run evolves.
#[derive(Component, Reflect, Default, Clone)]
#[reflect(Component)]
pub struct Player;

/// Axis-aligned rectangular extent of a collidable entity.
///
/// Positions are entity centers (`Transform.translation`); `size` is the full
/// width and height. All collision in the simulation is rectangle overlap
/// between pairs of `(Transform, Hitbox)`.
///
/// # Example
/// ```
/// use bevy::prelude::*;
/// use bevy_space_shooter::components::Hitbox;
///
/// let player_box = Hitbox::new(64.0, 64.0);
/// assert_eq!(player_box.half(), Vec2::splat(32.0));
/// ```
#[derive(Component, Reflect, Default, Clone)]
#[reflect(Component)]
pub struct Hitbox {
    /// Full extent (width, height)
    pub size: Vec2,
}

impl Hitbox {
    /// Creates a hitbox from a full width and height.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
        }
    }

    /// Half extents, handy for edge clamping.
    pub fn half(&self) -> Vec2 {
        self.size * 0.5
    }
}

/// Charge-shot gun state for the player.
///
/// Holding fire builds `charge`; below the charged threshold the gun emits
/// normal lasers on a cooldown, and releasing at or above the threshold fires
/// a 3-way charged volley. Charge decays while the trigger is released.
///
/// # Fields
/// * `charge` - Accumulated charge, 0 to the configured maximum
/// * `cooldown` - Seconds until the next normal laser may fire
/// * `charging` - Whether the trigger was held on the last fixed tick
#[derive(Component, Reflect, Default, Clone)]
#[reflect(Component)]
pub struct PlayerGun {
    /// Accumulated charge
    pub charge: f32,
    /// Remaining normal-shot cooldown (seconds)
    pub cooldown: f32,
    /// Trigger held on the last tick (release-edge detection)
    pub charging: bool,
}

/// Meteor barrage launcher state.
///
/// Charges are spent by [`crate::events::MeteorCommand`] and granted by
/// `MeteorCharge` item pickups and stage clears.
#[derive(Component, Reflect, Default, Clone)]
#[reflect(Component)]
pub struct MeteorLauncher {
    /// Barrages left to fire
    pub charges: u32,
}

/// Active shield on the player.
///
/// Absorbs exactly one strike (hostile laser, enemy contact or boss contact)
/// and is consumed by it; otherwise expires when `remaining` reaches zero.
/// Enemies breaching the floor bypass the shield.
#[derive(Component, Reflect, Default, Clone)]
#[reflect(Component)]
pub struct Shield {
    /// Seconds of shield time left
    pub remaining: f32,
}

/// Short post-hit flash window on the player.
///
/// Purely informational state for hosts (the original blinked the sprite);
/// it grants no invulnerability.
#[derive(Component, Reflect, Default, Clone)]
#[reflect(Component)]
pub struct HitFlash {
    /// Seconds of flash left
    pub remaining: f32,
}

/// A laser bolt in flight, fired by the player, an enemy or the boss.
///
/// Hostile bolts additionally carry the [`Hostile`] marker. Charged player
/// bolts pierce: they are not consumed when they destroy an enemy or damage
/// the boss.
///
/// # Example
/// ```
/// use bevy::prelude::*;
/// use bevy_space_shooter::components::Laser;
///
/// let bolt = Laser::normal(Vec2::new(0.0, 720.0));
/// assert_eq!(bolt.damage, 1);
/// assert!(!bolt.charged);
/// ```
#[derive(Component, Reflect, Default, Clone)]
#[reflect(Component)]
pub struct Laser {
    /// Velocity in arena units per second
    pub velocity: Vec2,
    /// Damage applied to the boss (enemies die to any hit)
    pub damage: i32,
    /// Charged bolts pierce through kills
    pub charged: bool,
}

impl Laser {
    /// A normal single-damage bolt.
    pub fn normal(velocity: Vec2) -> Self {
        Self {
            velocity,
            damage: 1,
            charged: false,
        }
    }

    /// A piercing charged bolt.
    pub fn charged(velocity: Vec2, damage: i32) -> Self {
        Self {
            velocity,
            damage,
            charged: true,
        }
    }
}

/// Marker for lasers that hurt the player.
#[derive(Component, Reflect, Default, Clone)]
#[reflect(Component)]
pub struct Hostile;

/// A formation enemy.
///
/// Enemies descend with their wave and fire on an individual randomized
/// countdown.
#[derive(Component, Reflect, Default, Clone)]
#[reflect(Component)]
pub struct Enemy {
    /// Seconds until this enemy fires its next shot
    pub volley_timer: f32,
}

/// The stage boss.
///
/// Movement is impulse-driven: every `retarget_timer` expiry picks a fresh
/// random velocity, and the boss bounces off the side walls, the ceiling and
/// the arena midline. The phase flips to `Enraged` below the configured
/// hit-point fraction.
///
/// # Fields
/// * `hp` / `max_hp` - Current and starting hit points
/// * `phase` - Current [`BossPhase`]
/// * `velocity` - Current velocity in units per second
/// * `retarget_timer` - Seconds until the next random velocity change
/// * `attack_timer` - Seconds until the next volley
#[derive(Component, Reflect, Default, Clone)]
#[reflect(Component)]
pub struct Boss {
    /// Current hit points
    pub hp: i32,
    /// Hit points at spawn
    pub max_hp: i32,
    /// Attack pattern phase
    pub phase: BossPhase,
    /// Current velocity
    pub velocity: Vec2,
    /// Seconds until the next movement impulse
    pub retarget_timer: f32,
    /// Seconds until the next attack
    pub attack_timer: f32,
}

impl Boss {
    /// Creates a boss with full hit points, firing and retargeting
    /// immediately on the first tick.
    pub fn new(max_hp: i32) -> Self {
        Self {
            hp: max_hp,
            max_hp,
            phase: BossPhase::Opening,
            velocity: Vec2::ZERO,
            retarget_timer: 0.0,
            attack_timer: 0.0,
        }
    }

    /// Fraction of hit points remaining, 0.0 to 1.0.
    pub fn hp_fraction(&self) -> f32 {
        if self.max_hp <= 0 {
            return 0.0;
        }
        self.hp as f32 / self.max_hp as f32
    }
}

/// A falling collectible.
#[derive(Component, Reflect, Default, Clone)]
#[reflect(Component)]
pub struct Item {
    /// What the pickup grants
    pub kind: ItemKind,
    /// Downward speed in units per second
    pub fall_speed: f32,
    /// Spin applied to the transform, radians per second
    pub spin_rate: f32,
}

/// A short-lived effect particle.
///
/// Integrated linearly each update; despawned once `alpha` reaches zero.
/// The simulation treats particles as data only, never draws them.
#[derive(Component, Reflect, Default, Clone)]
#[reflect(Component)]
pub struct Particle {
    /// Velocity in units per second
    pub velocity: Vec2,
    /// Remaining opacity, 1.0 down to 0.0
    pub alpha: f32,
    /// Opacity lost per second
    pub fade: f32,
    /// Palette hint for hosts
    pub tint: ParticleTint,
}

/// An expanding explosion ring.
#[derive(Component, Reflect, Default, Clone)]
#[reflect(Component)]
pub struct Explosion {
    /// Current radius
    pub radius: f32,
    /// Radius growth per second
    pub growth: f32,
    /// Remaining opacity
    pub alpha: f32,
    /// Opacity lost per second
    pub fade: f32,
}

/// An in-flight meteor barrage.
///
/// Spawned when a [`crate::events::MeteorCommand`] is accepted; delivers its
/// strikes on a fixed stagger and despawns when none remain. Multiple
/// barrages may overlap.
#[derive(Component, Reflect, Default, Clone)]
#[reflect(Component)]
pub struct MeteorBarrage {
    /// Strikes left to deliver
    pub strikes_left: u32,
    /// Seconds until the next strike
    pub next_in: f32,
}

/// Staggered explosion sequence played over a defeated boss.
#[derive(Component, Reflect, Default, Clone)]
#[reflect(Component)]
pub struct BossDeathThroes {
    /// Explosions left to spawn
    pub remaining: u32,
    /// Seconds until the next explosion
    pub next_in: f32,
    /// Center of the area the explosions scatter over
    pub center: Vec2,
    /// Full extent of the scatter area
    pub area: Vec2,
}

impl BossDeathThroes {
    /// Explosions in a full death sequence.
    pub const EXPLOSIONS: u32 = 50;
    /// Stagger between explosions, in seconds.
    pub const STAGGER: f32 = 0.03;

    /// Creates a death sequence over the given area, starting immediately.
    pub fn new(center: Vec2, area: Vec2) -> Self {
        Self {
            remaining: Self::EXPLOSIONS,
            next_in: 0.0,
            center,
            area,
        }
    }
}
