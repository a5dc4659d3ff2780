//! Movement systems: player intent, projectiles, items, formation descent
//! and boss drift.
//!
//! All movement runs in `FixedUpdate` with per-second velocities, so the
//! simulation is independent of the host's frame rate.

use bevy::prelude::*;
use rand::Rng;

use crate::components::{Boss, Enemy, Hitbox, Item, Laser, Player};
use crate::events::PlayerStruck;
use crate::resources::{ArenaBounds, GameRng, GameStatus, PlayerIntent, ShooterConfig};
use crate::types::GamePhase;

/// Margin outside the arena at which projectiles are culled.
const CULL_MARGIN: f32 = 50.0;

/// Move the player ship from host intent flags and clamp it to the arena.
///
/// Vertical intent is honored only during boss fights; in wave phases the
/// ship slides along the floor lane, as in the original.
pub fn apply_player_intent(
    time: Res<Time<Fixed>>,
    intent: Res<PlayerIntent>,
    status: Res<GameStatus>,
    config: Res<ShooterConfig>,
    arena: Res<ArenaBounds>,
    mut players: Query<(&mut Transform, &Hitbox), With<Player>>,
) {
    let Ok((mut transform, hitbox)) = players.single_mut() else {
        return;
    };

    let mut axes = intent.axes();
    if status.phase != GamePhase::Boss {
        axes.y = 0.0;
    }

    let next = transform.translation.truncate() + axes * config.player.move_speed * time.delta_secs();
    let clamped = arena.clamp_box(next, hitbox.half());
    transform.translation = clamped.extend(transform.translation.z);
}

/// Advance every laser by its velocity and cull those that leave the arena.
pub fn move_lasers(
    time: Res<Time<Fixed>>,
    arena: Res<ArenaBounds>,
    mut commands: Commands,
    mut lasers: Query<(Entity, &mut Transform, &Laser)>,
) {
    let dt = time.delta_secs();
    for (entity, mut transform, laser) in &mut lasers {
        transform.translation += (laser.velocity * dt).extend(0.0);
        if !arena.contains(transform.translation.truncate(), CULL_MARGIN) {
            commands.entity(entity).despawn();
        }
    }
}

/// Drop items toward the floor, spinning them as they fall.
pub fn move_items(
    time: Res<Time<Fixed>>,
    mut commands: Commands,
    mut items: Query<(Entity, &mut Transform, &Hitbox, &Item)>,
) {
    let dt = time.delta_secs();
    for (entity, mut transform, hitbox, item) in &mut items {
        transform.translation.y -= item.fall_speed * dt;
        transform.rotate_z(item.spin_rate * dt);
        if transform.translation.y + hitbox.half().y < 0.0 {
            commands.entity(entity).despawn();
        }
    }
}

/// Sink the enemy formation toward the floor.
///
/// The descent speeds up with the stage. An enemy that fully crosses the
/// floor is removed and costs a life; the breach bypasses any shield.
pub fn advance_formation(
    time: Res<Time<Fixed>>,
    config: Res<ShooterConfig>,
    status: Res<GameStatus>,
    mut commands: Commands,
    mut struck: MessageWriter<PlayerStruck>,
    mut enemies: Query<(Entity, &mut Transform, &Hitbox), With<Enemy>>,
) {
    let descent = config.enemies.descent_base
        + config.enemies.descent_per_stage * status.stage as f32;
    let dy = descent * time.delta_secs();

    for (entity, mut transform, hitbox) in &mut enemies {
        transform.translation.y -= dy;
        if transform.translation.y + hitbox.half().y < 0.0 {
            commands.entity(entity).despawn();
            struck.write(PlayerStruck {
                pierces_shield: true,
            });
        }
    }
}

/// Drift the boss on random impulses, bouncing it off the side walls, the
/// ceiling and the arena midline.
pub fn move_boss(
    time: Res<Time<Fixed>>,
    config: Res<ShooterConfig>,
    arena: Res<ArenaBounds>,
    mut rng: ResMut<GameRng>,
    mut bosses: Query<(&mut Transform, &mut Boss, &Hitbox)>,
) {
    let dt = time.delta_secs();
    let Ok((mut transform, mut boss, hitbox)) = bosses.single_mut() else {
        return;
    };

    boss.retarget_timer -= dt;
    if boss.retarget_timer <= 0.0 {
        boss.velocity = Vec2::new(
            (rng.0.random::<f32>() - 0.5) * config.boss.lateral_impulse,
            (rng.0.random::<f32>() - 0.5) * config.boss.vertical_impulse,
        );
        boss.retarget_timer = config.boss.retarget_interval;
    }

    let half = hitbox.half();
    let mut pos = transform.translation.truncate() + boss.velocity * dt;

    if pos.x - half.x < 0.0 {
        pos.x = half.x;
        boss.velocity.x = -boss.velocity.x;
    }
    if pos.x + half.x > arena.width {
        pos.x = arena.width - half.x;
        boss.velocity.x = -boss.velocity.x;
    }
    if pos.y + half.y > arena.height {
        pos.y = arena.height - half.y;
        boss.velocity.y = -boss.velocity.y;
    }
    // The boss never leaves the upper half of the arena.
    let floor = arena.height * 0.5 + half.y;
    if pos.y < floor {
        pos.y = floor;
        boss.velocity.y = -boss.velocity.y;
    }

    transform.translation = pos.extend(transform.translation.z);
}
