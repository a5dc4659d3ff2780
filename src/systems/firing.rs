//! Firing systems: the player's charge gun, enemy volleys and boss attack
//! patterns.

use bevy::prelude::*;
use rand::Rng;

use crate::components::{Boss, Enemy, Hitbox, Hostile, Laser, Player, PlayerGun};
use crate::events::ChargedShotFired;
use crate::resources::{GameRng, PlayerIntent, ShooterConfig};
use crate::types::BossPhase;

/// Normal player laser extent.
const PLAYER_LASER_SIZE: Vec2 = Vec2::new(8.0, 32.0);
/// Charged player laser extent.
const CHARGED_LASER_SIZE: Vec2 = Vec2::new(16.0, 48.0);
/// Enemy laser extent.
const ENEMY_LASER_SIZE: Vec2 = Vec2::new(8.0, 24.0);
/// Boss spread-shot extent.
const SPREAD_SHOT_SIZE: Vec2 = Vec2::new(12.0, 32.0);
/// Boss radial-shot extent.
const RADIAL_SHOT_SIZE: Vec2 = Vec2::new(12.0, 12.0);
/// Horizontal muzzle offset between bolts of a charged volley.
const CHARGED_VOLLEY_SPACING: f32 = 20.0;

/// Run the player's charge gun for one tick.
///
/// Holding fire builds charge and, while the charge is still below the
/// threshold, emits normal lasers on the cooldown. Releasing at or above the
/// threshold fires a 3-way piercing volley; releasing early just lets the
/// charge drain.
pub fn update_player_gun(
    time: Res<Time<Fixed>>,
    intent: Res<PlayerIntent>,
    config: Res<ShooterConfig>,
    mut commands: Commands,
    mut charged_shots: MessageWriter<ChargedShotFired>,
    mut players: Query<(&Transform, &Hitbox, &mut PlayerGun), With<Player>>,
) {
    let dt = time.delta_secs();
    let tuning = &config.player;
    let Ok((transform, hitbox, mut gun)) = players.single_mut() else {
        return;
    };

    gun.cooldown = (gun.cooldown - dt).max(0.0);
    let muzzle = transform.translation.truncate() + Vec2::new(0.0, hitbox.half().y);

    if intent.fire {
        gun.charge = (gun.charge + tuning.charge_rate * dt).min(tuning.charge_max);

        // Below the threshold the gun still works as a plain repeater.
        if gun.charge < tuning.charged_threshold && gun.cooldown <= 0.0 {
            commands.spawn((
                Laser::normal(Vec2::new(0.0, tuning.laser_speed)),
                Hitbox {
                    size: PLAYER_LASER_SIZE,
                },
                Transform::from_translation(muzzle.extend(0.0)),
            ));
            gun.cooldown = tuning.shot_cooldown;
        }
    } else {
        if gun.charging && gun.charge >= tuning.charged_threshold {
            for i in -1i32..=1 {
                commands.spawn((
                    Laser::charged(
                        Vec2::new(i as f32 * tuning.charged_side_speed, tuning.laser_speed),
                        tuning.charged_damage,
                    ),
                    Hitbox {
                        size: CHARGED_LASER_SIZE,
                    },
                    Transform::from_translation(
                        (muzzle + Vec2::new(i as f32 * CHARGED_VOLLEY_SPACING, 0.0)).extend(0.0),
                    ),
                ));
            }
            charged_shots.write(ChargedShotFired { position: muzzle });
            gun.charge = 0.0;
        } else {
            gun.charge = (gun.charge - tuning.charge_decay * dt).max(0.0);
        }
    }

    gun.charging = intent.fire;
}

/// Count down every enemy's volley timer and drop a hostile laser when it
/// expires, rearming with a randomized delay.
pub fn update_enemy_guns(
    time: Res<Time<Fixed>>,
    config: Res<ShooterConfig>,
    mut commands: Commands,
    mut rng: ResMut<GameRng>,
    mut enemies: Query<(&Transform, &Hitbox, &mut Enemy)>,
) {
    let dt = time.delta_secs();
    let tuning = &config.enemies;

    for (transform, hitbox, mut enemy) in &mut enemies {
        enemy.volley_timer -= dt;
        if enemy.volley_timer > 0.0 {
            continue;
        }

        let muzzle = transform.translation.truncate() - Vec2::new(0.0, hitbox.half().y);
        commands.spawn((
            Laser::normal(Vec2::new(0.0, -tuning.laser_speed)),
            Hostile,
            Hitbox {
                size: ENEMY_LASER_SIZE,
            },
            Transform::from_translation(muzzle.extend(0.0)),
        ));
        enemy.volley_timer = tuning.volley_delay + rng.0.random::<f32>() * tuning.volley_jitter;
    }
}

/// Fire the boss's current attack pattern when its attack timer expires.
///
/// `Opening`: a 3-way downward spread from the boss's underside.
/// `Enraged`: a full radial ring from its center.
pub fn update_boss_gun(
    time: Res<Time<Fixed>>,
    config: Res<ShooterConfig>,
    mut commands: Commands,
    mut bosses: Query<(&Transform, &Hitbox, &mut Boss)>,
) {
    let dt = time.delta_secs();
    let tuning = &config.boss;
    let Ok((transform, hitbox, mut boss)) = bosses.single_mut() else {
        return;
    };

    boss.attack_timer -= dt;
    if boss.attack_timer > 0.0 {
        return;
    }

    let center = transform.translation.truncate();
    match boss.phase {
        BossPhase::Opening => {
            let muzzle = center - Vec2::new(0.0, hitbox.half().y);
            for i in -1i32..=1 {
                commands.spawn((
                    Laser::normal(Vec2::new(
                        i as f32 * tuning.spread_side_speed,
                        -tuning.spread_shot_speed,
                    )),
                    Hostile,
                    Hitbox {
                        size: SPREAD_SHOT_SIZE,
                    },
                    Transform::from_translation(muzzle.extend(0.0)),
                ));
            }
            boss.attack_timer = tuning.spread_interval;
        }
        BossPhase::Enraged => {
            let count = tuning.radial_shot_count.max(1);
            for k in 0..count {
                let angle = k as f32 / count as f32 * std::f32::consts::TAU;
                commands.spawn((
                    Laser::normal(Vec2::from_angle(angle) * tuning.radial_shot_speed),
                    Hostile,
                    Hitbox {
                        size: RADIAL_SHOT_SIZE,
                    },
                    Transform::from_translation(center.extend(0.0)),
                ));
            }
            boss.attack_timer = tuning.radial_interval;
        }
    }
}
