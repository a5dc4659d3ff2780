//! Wave formation, boss and item spawning.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::Rng;

use crate::components::{Boss, Enemy, Hitbox, Item, MeteorLauncher, Player, PlayerGun};
use crate::resources::{ArenaBounds, GameRng, GameStatus, ItemTuning, ShooterConfig};
use crate::types::ItemKind;

/// Player ship extent.
pub const PLAYER_SIZE: Vec2 = Vec2::new(64.0, 64.0);
/// Formation enemy extent.
pub const ENEMY_SIZE: Vec2 = Vec2::new(48.0, 48.0);
/// Boss extent.
pub const BOSS_SIZE: Vec2 = Vec2::new(160.0, 160.0);
/// Item pickup extent.
pub const ITEM_SIZE: Vec2 = Vec2::new(32.0, 32.0);

/// Gap between enemies in a formation.
const FORMATION_MARGIN: f32 = 15.0;
/// Distance from the ceiling to the first formation row.
const FORMATION_TOP_OFFSET: f32 = 80.0;
/// Height of the player spawn point above the floor.
const PLAYER_SPAWN_Y: f32 = 88.0;
/// Distance from the ceiling to the boss spawn center.
const BOSS_SPAWN_DEPTH: f32 = 130.0;

/// Where the player ship spawns (and is reset to after boss contact).
pub fn player_spawn_point(arena: &ArenaBounds) -> Vec2 {
    Vec2::new(arena.center_x(), PLAYER_SPAWN_Y)
}

/// Number of rows and columns in the formation for a stage.
///
/// Rows grow by one per stage (capped at 6), columns by one every other
/// stage (capped at 8).
pub fn formation_shape(stage: u32) -> (u32, u32) {
    let rows = (3 + stage).min(6);
    let cols = (5 + stage / 2).min(8);
    (rows, cols)
}

/// Center positions of every enemy slot in a stage's formation.
///
/// The grid is horizontally centered; the top row sits a fixed offset below
/// the ceiling and rows stack downward from there.
///
/// # Example
/// ```
/// use bevy_space_shooter::resources::ArenaBounds;
/// use bevy_space_shooter::systems::waves::formation_slots;
///
/// let slots = formation_slots(1, &ArenaBounds::default());
/// assert_eq!(slots.len(), 20); // 4 rows x 5 columns at stage 1
/// ```
pub fn formation_slots(stage: u32, arena: &ArenaBounds) -> Vec<Vec2> {
    let (rows, cols) = formation_shape(stage);
    let pitch = ENEMY_SIZE.x + FORMATION_MARGIN;
    let grid_width = cols as f32 * ENEMY_SIZE.x + (cols - 1) as f32 * FORMATION_MARGIN;
    let first_x = (arena.width - grid_width) * 0.5 + ENEMY_SIZE.x * 0.5;
    let first_y = arena.height - FORMATION_TOP_OFFSET - ENEMY_SIZE.y * 0.5;

    let mut slots = Vec::with_capacity((rows * cols) as usize);
    for row in 0..rows {
        for col in 0..cols {
            slots.push(Vec2::new(
                first_x + col as f32 * pitch,
                first_y - row as f32 * (ENEMY_SIZE.y + FORMATION_MARGIN),
            ));
        }
    }
    slots
}

/// Decide what, if anything, a destroyed enemy drops.
///
/// A single roll gates the drop; a second roll picks shield or meteor charge
/// 50/50, upgraded to an extra life on a high roll while the player is below
/// the life cap.
pub fn roll_item_drop(
    rng: &mut StdRng,
    items: &ItemTuning,
    lives: u32,
    max_lives: u32,
) -> Option<ItemKind> {
    if rng.random::<f32>() >= items.drop_chance {
        return None;
    }
    let kind_roll = rng.random::<f32>();
    let mut kind = if kind_roll < 0.5 {
        ItemKind::Shield
    } else {
        ItemKind::MeteorCharge
    };
    if kind_roll > items.life_roll && lives < max_lives {
        kind = ItemKind::ExtraLife;
    }
    Some(kind)
}

/// Spawn a falling item at `position`.
pub fn spawn_item(commands: &mut Commands, config: &ShooterConfig, kind: ItemKind, position: Vec2) {
    commands.spawn((
        Item {
            kind,
            fall_speed: config.items.fall_speed,
            spin_rate: config.items.spin_rate,
        },
        Hitbox { size: ITEM_SIZE },
        Transform::from_translation(position.extend(0.0)),
    ));
}

/// Spawn a full enemy formation for `stage`, each enemy with a randomized
/// first-shot delay.
pub fn spawn_wave(
    commands: &mut Commands,
    rng: &mut StdRng,
    config: &ShooterConfig,
    stage: u32,
    arena: &ArenaBounds,
) {
    for slot in formation_slots(stage, arena) {
        commands.spawn((
            Enemy {
                volley_timer: rng.random_range(0.0..config.enemies.initial_delay_max),
            },
            Hitbox { size: ENEMY_SIZE },
            Transform::from_translation(slot.extend(0.0)),
        ));
    }
}

/// Spawn the stage boss at the top center. Returns its starting hit points.
pub fn spawn_boss(
    commands: &mut Commands,
    config: &ShooterConfig,
    stage: u32,
    arena: &ArenaBounds,
) -> i32 {
    let hp = config.boss.base_hp + config.boss.hp_per_stage * stage as i32;
    commands.spawn((
        Boss::new(hp),
        Hitbox { size: BOSS_SIZE },
        Transform::from_translation(
            Vec2::new(arena.center_x(), arena.height - BOSS_SPAWN_DEPTH).extend(0.0),
        ),
    ));
    hp
}

/// Spawn the player ship at its spawn point with a cold gun and the
/// configured meteor charges.
pub fn spawn_player(commands: &mut Commands, config: &ShooterConfig, arena: &ArenaBounds) {
    commands.spawn((
        Player,
        PlayerGun::default(),
        MeteorLauncher {
            charges: config.meteor.starting_charges,
        },
        Hitbox { size: PLAYER_SIZE },
        Transform::from_translation(player_spawn_point(arena).extend(0.0)),
    ));
}

/// Startup system: reset the scoreboard and spawn the player and the stage-1
/// formation.
pub fn setup_run(
    mut commands: Commands,
    config: Res<ShooterConfig>,
    arena: Res<ArenaBounds>,
    mut status: ResMut<GameStatus>,
    mut rng: ResMut<GameRng>,
) {
    *status = GameStatus::new_run(&config);
    spawn_player(&mut commands, &config, &arena);
    spawn_wave(&mut commands, &mut rng.0, &config, status.stage, &arena);
}
