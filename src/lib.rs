//! Headless fixed-timestep simulation of a stage-based space shooter.
//!
//! The crate models the full game loop of a vertical shooter as plain ECS
//! data: a player ship with a charge gun and meteor launcher, descending
//! enemy formations, stage bosses with phase-switching attack patterns,
//! item drops, combo scoring and stage progression. It never draws, loads
//! assets or polls input devices; hosts write a [`resources::PlayerIntent`]
//! each frame and read entities and messages back out.
//!
//! All gameplay runs in `FixedUpdate`, so results are independent of the
//! host's frame rate, and every random decision draws from the
//! [`resources::GameRng`] resource, so a seeded run replays exactly.
//!
//! # Example
//!
//! ```no_run
//! use bevy::prelude::*;
//! use bevy_space_shooter::prelude::*;
//!
//! App::new()
//!     .add_plugins(MinimalPlugins)
//!     .add_plugins(SpaceShooterPlugins)
//!     .run();
//! ```

use bevy::app::{PluginGroup, PluginGroupBuilder};
use bevy::prelude::*;

pub mod components;
pub mod events;
pub mod resources;
pub mod systems;
pub mod types;

#[cfg(test)]
mod sim_tests;

/// Commonly used items, re-exported for hosts.
pub mod prelude {
    pub use crate::components::{
        Boss, Enemy, Explosion, HitFlash, Hitbox, Hostile, Item, Laser, MeteorLauncher, Particle,
        Player, PlayerGun, Shield,
    };
    pub use crate::events::{
        BossDefeated, BossSpawned, ChargedShotFired, EnemyDestroyed, GameEnded, ItemCollected,
        MeteorCommand, MeteorImpact, PlayerDamaged, RestartCommand,
    };
    pub use crate::resources::{
        ArenaBounds, EffectsRng, GameRng, GameStatus, PlayerIntent, ShooterConfig,
    };
    pub use crate::types::{BossPhase, GamePhase, ItemKind, ParticleTint};
    pub use crate::{ShooterCorePlugin, ShooterEffectsPlugin, SimSet, SpaceShooterPlugins};
}

use crate::events::{
    BossDefeated, BossSpawned, ChargedShotFired, EnemyDestroyed, GameEnded, ItemCollected,
    MeteorCommand, MeteorImpact, PlayerDamaged, PlayerStruck, RestartCommand,
};
use crate::resources::{ArenaBounds, EffectsRng, GameRng, GameStatus, PlayerIntent, ShooterConfig};
use crate::systems::logic::{simulation_active, wave_active};
use crate::systems::{collision, firing, kinematics, logic, vfx, waves};

/// Ordering of the fixed-timestep simulation within one tick.
///
/// Sets run in declaration order: host commands and timers first, then
/// movement, then firing, then collision detection, then state resolution.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimSet {
    /// Host commands, status and entity timers
    Tick,
    /// Player, projectile, item, formation and boss movement
    Movement,
    /// Player, enemy and boss guns
    Firing,
    /// Overlap detection and immediate consequences
    Collision,
    /// Damage, boss lifecycle, meteors and stage flow
    Resolve,
}

/// Core simulation plugin.
///
/// Registers every component, resource and message of the simulation and
/// schedules the gameplay systems in `FixedUpdate` under [`SimSet`]. On
/// startup it spawns the player and the stage-1 formation.
pub struct ShooterCorePlugin;

impl Plugin for ShooterCorePlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<components::Player>()
            .register_type::<components::Hitbox>()
            .register_type::<components::PlayerGun>()
            .register_type::<components::MeteorLauncher>()
            .register_type::<components::Shield>()
            .register_type::<components::HitFlash>()
            .register_type::<components::Laser>()
            .register_type::<components::Hostile>()
            .register_type::<components::Enemy>()
            .register_type::<components::Boss>()
            .register_type::<components::Item>()
            .register_type::<components::MeteorBarrage>()
            .register_type::<components::BossDeathThroes>()
            .register_type::<ArenaBounds>()
            .register_type::<ShooterConfig>()
            .register_type::<GameStatus>()
            .register_type::<PlayerIntent>()
            .init_resource::<ArenaBounds>()
            .init_resource::<ShooterConfig>()
            .init_resource::<GameStatus>()
            .init_resource::<PlayerIntent>()
            .init_resource::<GameRng>()
            .add_message::<MeteorCommand>()
            .add_message::<RestartCommand>()
            .add_message::<EnemyDestroyed>()
            .add_message::<ChargedShotFired>()
            .add_message::<MeteorImpact>()
            .add_message::<ItemCollected>()
            .add_message::<PlayerStruck>()
            .add_message::<PlayerDamaged>()
            .add_message::<BossSpawned>()
            .add_message::<BossDefeated>()
            .add_message::<GameEnded>()
            .configure_sets(
                FixedUpdate,
                (
                    SimSet::Tick,
                    SimSet::Movement,
                    SimSet::Firing,
                    SimSet::Collision,
                    SimSet::Resolve,
                )
                    .chain(),
            )
            .add_systems(Startup, waves::setup_run)
            .add_systems(
                FixedUpdate,
                (
                    logic::handle_restart,
                    logic::tick_status_timers.run_if(simulation_active),
                    logic::process_meteor_commands.run_if(simulation_active),
                )
                    .in_set(SimSet::Tick),
            )
            .add_systems(
                FixedUpdate,
                (
                    kinematics::apply_player_intent,
                    kinematics::move_lasers,
                    kinematics::move_items,
                    kinematics::advance_formation.run_if(wave_active),
                    kinematics::move_boss,
                )
                    .in_set(SimSet::Movement)
                    .run_if(simulation_active),
            )
            .add_systems(
                FixedUpdate,
                (
                    firing::update_player_gun,
                    firing::update_enemy_guns.run_if(wave_active),
                    firing::update_boss_gun,
                )
                    .in_set(SimSet::Firing)
                    .run_if(simulation_active),
            )
            .add_systems(
                FixedUpdate,
                (
                    collision::resolve_player_shots,
                    collision::resolve_player_contacts,
                )
                    .chain()
                    .in_set(SimSet::Collision)
                    .run_if(simulation_active),
            )
            .add_systems(
                FixedUpdate,
                (
                    logic::resolve_player_damage,
                    logic::update_boss_lifecycle,
                    logic::process_meteor_barrages,
                    logic::progress_stages,
                )
                    .chain()
                    .in_set(SimSet::Resolve)
                    .run_if(simulation_active),
            );
    }
}

/// Effect plugin: particle bursts, explosion rings and boss death sequences.
///
/// Purely cosmetic data for hosts; the core simulation never reads it.
/// Optional, and runs in `Update` with its own [`EffectsRng`], so effect
/// scatter never advances the simulation's random stream.
pub struct ShooterEffectsPlugin;

impl Plugin for ShooterEffectsPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<components::Particle>()
            .register_type::<components::Explosion>()
            .init_resource::<EffectsRng>()
            .add_systems(
                Update,
                (
                    vfx::spawn_effect_bursts,
                    vfx::play_boss_death_throes,
                    vfx::update_particles,
                    vfx::update_explosions,
                )
                    .chain(),
            );
    }
}

/// The core simulation and the effect layer together.
pub struct SpaceShooterPlugins;

impl PluginGroup for SpaceShooterPlugins {
    fn build(self) -> PluginGroupBuilder {
        PluginGroupBuilder::start::<Self>()
            .add(ShooterCorePlugin)
            .add(ShooterEffectsPlugin)
    }
}
