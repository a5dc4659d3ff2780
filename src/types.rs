//! Common types and enums for the shooter simulation.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Top-level state of a run.
///
/// The simulation moves through these phases in a fixed order:
/// `Wave` -> `Boss` -> `StageClear` -> `Wave` (next stage), until either the
/// final stage is cleared (`GameOver { victory: true }`) or the player runs
/// out of lives (`GameOver { victory: false }`).
///
/// # Variants
/// * `Wave` - A formation of enemies is descending and firing
/// * `Boss` - The wave was cleared and a boss is active
/// * `StageClear` - The boss was defeated; short pause before the next wave
/// * `GameOver` - The run ended, either by victory or by losing all lives
///
/// # Example
/// ```
/// use bevy_space_shooter::types::GamePhase;
///
/// let phase = GamePhase::StageClear { countdown: 2.0 };
/// assert!(!matches!(phase, GamePhase::GameOver { .. }));
/// ```
#[derive(Clone, Copy, PartialEq, Debug, Default, Reflect)]
pub enum GamePhase {
    /// Enemy formation active
    #[default]
    Wave,
    /// Boss fight active
    Boss,
    /// Pause between boss defeat and the next wave
    StageClear {
        /// Seconds until the next wave spawns (or victory is declared)
        countdown: f32,
    },
    /// Run finished
    GameOver {
        /// True if the final stage was cleared, false on defeat
        victory: bool,
    },
}

impl GamePhase {
    /// True unless the run has ended.
    pub fn is_active(&self) -> bool {
        !matches!(self, GamePhase::GameOver { .. })
    }
}

/// Boss behavior phase.
///
/// The boss opens with a narrow spread attack and switches to a radial
/// bullet ring once its hit points drop below the enrage fraction.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Reflect)]
pub enum BossPhase {
    /// Above the enrage threshold: 3-way spread shots
    #[default]
    Opening,
    /// Below the enrage threshold: 8-way radial rings
    Enraged,
}

/// Kind of collectible item dropped by destroyed enemies or boss defeats.
///
/// # Variants
/// * `Shield` - Grants a shield that absorbs one strike
/// * `MeteorCharge` - Adds one charge to the player's meteor launcher
/// * `ExtraLife` - Restores one life, capped at the configured maximum
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Reflect, Serialize, Deserialize)]
pub enum ItemKind {
    /// One-strike shield pickup
    #[default]
    Shield,
    /// Meteor launcher charge
    MeteorCharge,
    /// Life restore (only drops while below the life cap)
    ExtraLife,
}

/// Tint hint for a spawned particle.
///
/// The simulation never draws anything; the tint is carried so a rendering
/// host can reproduce the original effect palette.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Reflect)]
pub enum ParticleTint {
    /// Enemy kill burst
    #[default]
    Yellow,
    /// Charged shot flare
    Gold,
    /// Explosion debris
    Orange,
    /// Item pickup sparkle
    Cyan,
}
