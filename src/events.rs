//! Messages flowing in and out of the simulation.
//!
//! Inbound commands ([`MeteorCommand`], [`RestartCommand`]) are written by
//! the host; outward facts are written by the simulation for hosts and for
//! the effects plugin. In Bevy 0.18, buffered events use the `Message` trait.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::types::ItemKind;

/// Host command: fire a meteor barrage.
///
/// Accepted only while the run is active and the player holds at least one
/// launcher charge; otherwise it is silently dropped, matching the original's
/// key handler.
#[derive(Message, Clone, Default)]
pub struct MeteorCommand;

/// Host command: restart the run.
///
/// Honored only in the game-over phase. Despawns every simulation entity and
/// rebuilds the stage-1 state.
#[derive(Message, Clone, Default)]
pub struct RestartCommand;

/// An enemy was destroyed by player fire or a meteor strike.
///
/// # Fields
/// * `position` - Arena position of the destroyed enemy
/// * `score_awarded` - Points granted for the kill
#[derive(Message, Clone)]
pub struct EnemyDestroyed {
    /// Where the enemy died
    pub position: Vec2,
    /// Points granted
    pub score_awarded: u64,
}

/// The player released a charged volley.
#[derive(Message, Clone)]
pub struct ChargedShotFired {
    /// Muzzle position of the volley
    pub position: Vec2,
}

/// A meteor strike landed.
#[derive(Message, Clone)]
pub struct MeteorImpact {
    /// Impact center
    pub position: Vec2,
}

/// The player collected an item.
#[derive(Message, Clone)]
pub struct ItemCollected {
    /// What was picked up
    pub kind: ItemKind,
    /// Where the pickup happened
    pub position: Vec2,
}

/// Internal: something struck the player this tick.
///
/// Written by the collision and formation systems, resolved once per strike
/// by the damage system so shield consumption stays ordered within a tick.
#[derive(Message, Clone)]
pub struct PlayerStruck {
    /// Floor breaches cost a life even through an active shield
    pub pierces_shield: bool,
}

/// The player took a strike (possibly absorbed by the shield).
///
/// # Fields
/// * `position` - Player position at the moment of the strike
/// * `lives_left` - Lives remaining after resolution
/// * `absorbed` - True if the shield soaked the strike
#[derive(Message, Clone)]
pub struct PlayerDamaged {
    /// Player position at the strike
    pub position: Vec2,
    /// Lives remaining
    pub lives_left: u32,
    /// Shield absorbed the strike
    pub absorbed: bool,
}

/// A boss entered the arena.
#[derive(Message, Clone)]
pub struct BossSpawned {
    /// Starting hit points
    pub hp: i32,
}

/// The boss went down.
///
/// # Fields
/// * `stage_cleared` - The stage this defeat finished
/// * `bonus` - Score bonus granted
/// * `position` / `area` - Where the boss died, for effect scatter
#[derive(Message, Clone)]
pub struct BossDefeated {
    /// Stage number that was cleared
    pub stage_cleared: u32,
    /// Score bonus granted
    pub bonus: u64,
    /// Boss center at defeat
    pub position: Vec2,
    /// Boss extent at defeat
    pub area: Vec2,
}

/// The run ended.
///
/// # Example
/// ```
/// use bevy_space_shooter::events::GameEnded;
///
/// let ended = GameEnded { victory: true, score: 48_200, max_combo: 37 };
/// assert!(ended.victory);
/// ```
#[derive(Message, Clone)]
pub struct GameEnded {
    /// True if the final stage was cleared
    pub victory: bool,
    /// Final score
    pub score: u64,
    /// Best combo of the run
    pub max_combo: u32,
}
