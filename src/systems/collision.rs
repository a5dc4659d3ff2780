//! Collision resolution: the original's pairwise axis-aligned rectangle
//! sweep, split into player-fire and player-contact passes.

use std::collections::HashSet;

use bevy::prelude::*;

use crate::components::{
    Boss, Enemy, Hitbox, Hostile, Item, Laser, MeteorLauncher, Player, Shield,
};
use crate::events::{EnemyDestroyed, ItemCollected, PlayerStruck};
use crate::resources::{ArenaBounds, GameRng, GameStatus, ShooterConfig};
use crate::systems::waves;
use crate::types::ItemKind;

/// Axis-aligned rectangle overlap test for center positions and full
/// extents. Touching edges do not count as overlap.
///
/// # Example
/// ```
/// use bevy::prelude::*;
/// use bevy_space_shooter::systems::collision::aabb_overlap;
///
/// let a = Vec2::new(0.0, 0.0);
/// let b = Vec2::new(30.0, 0.0);
/// assert!(aabb_overlap(a, Vec2::splat(40.0), b, Vec2::splat(40.0)));
/// assert!(!aabb_overlap(a, Vec2::splat(40.0), b, Vec2::splat(20.0)));
/// ```
pub fn aabb_overlap(a_pos: Vec2, a_size: Vec2, b_pos: Vec2, b_size: Vec2) -> bool {
    (a_pos.x - b_pos.x).abs() * 2.0 < a_size.x + b_size.x
        && (a_pos.y - b_pos.y).abs() * 2.0 < a_size.y + b_size.y
}

/// Resolve player lasers against enemies and the boss.
///
/// A kill scores `kill_score * (combo + 1)`, extends the streak and may drop
/// an item. Boss hits extend the streak without scoring. Normal lasers are
/// consumed by the first thing they hit; charged lasers pierce.
pub fn resolve_player_shots(
    mut commands: Commands,
    config: Res<ShooterConfig>,
    mut status: ResMut<GameStatus>,
    mut rng: ResMut<GameRng>,
    mut destroyed: MessageWriter<EnemyDestroyed>,
    lasers: Query<(Entity, &Transform, &Hitbox, &Laser), Without<Hostile>>,
    enemies: Query<(Entity, &Transform, &Hitbox), With<Enemy>>,
    mut bosses: Query<(&Transform, &Hitbox, &mut Boss)>,
) {
    let mut dead_enemies: HashSet<Entity> = HashSet::new();
    let mut spent_lasers: HashSet<Entity> = HashSet::new();

    for (laser_entity, laser_tf, laser_box, laser) in &lasers {
        let laser_pos = laser_tf.translation.truncate();

        for (enemy_entity, enemy_tf, enemy_box) in &enemies {
            if dead_enemies.contains(&enemy_entity) {
                continue;
            }
            let enemy_pos = enemy_tf.translation.truncate();
            if !aabb_overlap(laser_pos, laser_box.size, enemy_pos, enemy_box.size) {
                continue;
            }

            dead_enemies.insert(enemy_entity);
            commands.entity(enemy_entity).despawn();

            let award = config.run.kill_score * (status.combo as u64 + 1);
            status.score += award;
            status.register_hit(config.run.combo_window);
            destroyed.write(EnemyDestroyed {
                position: enemy_pos,
                score_awarded: award,
            });

            if let Some(kind) = waves::roll_item_drop(
                &mut rng.0,
                &config.items,
                status.lives,
                config.player.max_lives,
            ) {
                waves::spawn_item(&mut commands, &config, kind, enemy_pos);
            }

            if !laser.charged {
                spent_lasers.insert(laser_entity);
                commands.entity(laser_entity).despawn();
                break;
            }
        }

        if spent_lasers.contains(&laser_entity) {
            continue;
        }

        if let Ok((boss_tf, boss_box, mut boss)) = bosses.single_mut() {
            let boss_pos = boss_tf.translation.truncate();
            if aabb_overlap(laser_pos, laser_box.size, boss_pos, boss_box.size) {
                boss.hp -= laser.damage;
                status.register_hit(config.run.combo_window);
                if !laser.charged {
                    spent_lasers.insert(laser_entity);
                    commands.entity(laser_entity).despawn();
                }
            }
        }
    }
}

/// Resolve everything that touches the player: item pickups, hostile lasers,
/// enemy ships and the boss.
///
/// Strikes are emitted as [`PlayerStruck`] and resolved once per strike by
/// the damage system, so shield consumption stays ordered within a tick.
/// Boss contact also snaps the player back to its spawn point.
pub fn resolve_player_contacts(
    mut commands: Commands,
    config: Res<ShooterConfig>,
    arena: Res<ArenaBounds>,
    mut status: ResMut<GameStatus>,
    mut struck: MessageWriter<PlayerStruck>,
    mut collected: MessageWriter<ItemCollected>,
    mut players: Query<
        (Entity, &mut Transform, &Hitbox, &mut MeteorLauncher),
        With<Player>,
    >,
    items: Query<(Entity, &Transform, &Hitbox, &Item), Without<Player>>,
    hostile_lasers: Query<(Entity, &Transform, &Hitbox), (With<Laser>, With<Hostile>, Without<Player>)>,
    enemies: Query<(Entity, &Transform, &Hitbox), (With<Enemy>, Without<Player>)>,
    bosses: Query<(&Transform, &Hitbox), (With<Boss>, Without<Player>)>,
) {
    let Ok((player_entity, mut player_tf, player_box, mut launcher)) = players.single_mut() else {
        return;
    };
    let player_pos = player_tf.translation.truncate();

    for (item_entity, item_tf, item_box, item) in &items {
        let item_pos = item_tf.translation.truncate();
        if !aabb_overlap(player_pos, player_box.size, item_pos, item_box.size) {
            continue;
        }
        commands.entity(item_entity).despawn();

        match item.kind {
            ItemKind::Shield => {
                commands.entity(player_entity).insert(Shield {
                    remaining: config.player.shield_duration,
                });
            }
            ItemKind::MeteorCharge => {
                launcher.charges += 1;
            }
            ItemKind::ExtraLife => {
                status.lives = (status.lives + 1).min(config.player.max_lives);
            }
        }
        collected.write(ItemCollected {
            kind: item.kind,
            position: item_pos,
        });
    }

    for (laser_entity, laser_tf, laser_box) in &hostile_lasers {
        if aabb_overlap(
            player_pos,
            player_box.size,
            laser_tf.translation.truncate(),
            laser_box.size,
        ) {
            commands.entity(laser_entity).despawn();
            struck.write(PlayerStruck {
                pierces_shield: false,
            });
        }
    }

    for (enemy_entity, enemy_tf, enemy_box) in &enemies {
        if aabb_overlap(
            player_pos,
            player_box.size,
            enemy_tf.translation.truncate(),
            enemy_box.size,
        ) {
            commands.entity(enemy_entity).despawn();
            struck.write(PlayerStruck {
                pierces_shield: false,
            });
        }
    }

    if let Ok((boss_tf, boss_box)) = bosses.single() {
        if aabb_overlap(
            player_pos,
            player_box.size,
            boss_tf.translation.truncate(),
            boss_box.size,
        ) {
            struck.write(PlayerStruck {
                pierces_shield: false,
            });
            player_tf.translation = waves::player_spawn_point(&arena)
                .extend(player_tf.translation.z);
        }
    }
}
