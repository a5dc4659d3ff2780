//! Run-state logic: status timers, damage resolution, boss lifecycle, stage
//! progression, meteor barrages and restart handling.

use std::collections::HashSet;

use bevy::prelude::*;
use rand::Rng;

use crate::components::{
    Boss, BossDeathThroes, Enemy, Explosion, HitFlash, Hitbox, Item, Laser, MeteorBarrage,
    MeteorLauncher, Particle, Player, Shield,
};
use crate::events::{
    BossDefeated, BossSpawned, EnemyDestroyed, GameEnded, MeteorCommand, MeteorImpact,
    PlayerDamaged, PlayerStruck, RestartCommand,
};
use crate::resources::{ArenaBounds, BossTuning, GameRng, GameStatus, ShooterConfig};
use crate::systems::waves;
use crate::types::{BossPhase, GamePhase, ItemKind};

/// Horizontal offset of the boss reward items from the arena center.
const REWARD_ITEM_OFFSET: f32 = 50.0;

/// Run condition: the simulation is in a playable phase.
pub fn simulation_active(status: Res<GameStatus>) -> bool {
    status.phase.is_active()
}

/// Run condition: a wave of formation enemies is in play.
pub fn wave_active(status: Res<GameStatus>) -> bool {
    status.phase == GamePhase::Wave
}

/// Score bonus for defeating the boss of `stage`.
pub fn boss_defeat_bonus(tuning: &BossTuning, stage: u32) -> u64 {
    tuning.defeat_bonus_base + tuning.defeat_bonus_per_stage * stage as u64
}

/// Tick the combo window and the player's shield and hit-flash timers.
///
/// An expired combo banks into the run's best before resetting.
pub fn tick_status_timers(
    time: Res<Time<Fixed>>,
    mut commands: Commands,
    mut status: ResMut<GameStatus>,
    mut shields: Query<(Entity, &mut Shield)>,
    mut flashes: Query<(Entity, &mut HitFlash)>,
) {
    let dt = time.delta_secs();

    if status.combo > 0 {
        status.combo_window -= dt;
        if status.combo_window <= 0.0 {
            status.bank_combo();
        }
    }

    for (entity, mut shield) in &mut shields {
        shield.remaining -= dt;
        if shield.remaining <= 0.0 {
            commands.entity(entity).remove::<Shield>();
        }
    }

    for (entity, mut flash) in &mut flashes {
        flash.remaining -= dt;
        if flash.remaining <= 0.0 {
            commands.entity(entity).remove::<HitFlash>();
        }
    }
}

/// Resolve every strike against the player recorded this tick.
///
/// An active shield soaks one ordinary strike and is consumed; formation
/// breaches bypass it. Losing a life drops the combo without banking it.
/// At zero lives the run ends in defeat.
pub fn resolve_player_damage(
    config: Res<ShooterConfig>,
    mut commands: Commands,
    mut status: ResMut<GameStatus>,
    mut strikes: MessageReader<PlayerStruck>,
    mut damaged: MessageWriter<PlayerDamaged>,
    mut ended: MessageWriter<GameEnded>,
    players: Query<(Entity, &Transform, Has<Shield>), With<Player>>,
) {
    let Ok((player_entity, transform, has_shield)) = players.single() else {
        strikes.clear();
        return;
    };
    let position = transform.translation.truncate();

    // Commands are deferred, so shield consumption within this tick is
    // tracked locally.
    let mut shield_up = has_shield;

    for strike in strikes.read() {
        if !status.phase.is_active() {
            break;
        }

        if shield_up && !strike.pierces_shield {
            shield_up = false;
            commands.entity(player_entity).remove::<Shield>();
            damaged.write(PlayerDamaged {
                position,
                lives_left: status.lives,
                absorbed: true,
            });
            continue;
        }

        status.lives = status.lives.saturating_sub(1);
        status.combo = 0;
        commands.entity(player_entity).insert(HitFlash {
            remaining: config.player.hit_flash_duration,
        });
        damaged.write(PlayerDamaged {
            position,
            lives_left: status.lives,
            absorbed: false,
        });

        if status.lives == 0 {
            status.bank_combo();
            status.phase = GamePhase::GameOver { victory: false };
            info!(
                "run over: score {} (best combo {})",
                status.score, status.max_combo
            );
            ended.write(GameEnded {
                victory: false,
                score: status.score,
                max_combo: status.max_combo,
            });
            break;
        }
    }
}

/// Enrage the boss when its health drops past the threshold and resolve its
/// defeat.
///
/// Defeat grants the stage bonus plus a combo reward, drops a shield and a
/// meteor charge as fixed rewards, advances the stage and enters the
/// stage-clear countdown.
pub fn update_boss_lifecycle(
    config: Res<ShooterConfig>,
    arena: Res<ArenaBounds>,
    mut commands: Commands,
    mut status: ResMut<GameStatus>,
    mut defeated: MessageWriter<BossDefeated>,
    mut bosses: Query<(Entity, &Transform, &Hitbox, &mut Boss)>,
) {
    let Ok((entity, transform, hitbox, mut boss)) = bosses.single_mut() else {
        return;
    };

    if boss.phase == BossPhase::Opening && boss.hp_fraction() <= config.boss.enrage_fraction {
        boss.phase = BossPhase::Enraged;
    }

    if boss.hp > 0 {
        return;
    }

    let position = transform.translation.truncate();
    commands.entity(entity).despawn();
    commands.spawn((
        BossDeathThroes::new(position, hitbox.size),
        Transform::from_translation(position.extend(0.0)),
    ));

    let bonus = boss_defeat_bonus(&config.boss, status.stage);
    status.score += bonus;
    status.combo += config.boss.defeat_combo_bonus;
    status.bank_combo();

    let reward_y = arena.height * 2.0 / 3.0;
    waves::spawn_item(
        &mut commands,
        &config,
        ItemKind::Shield,
        Vec2::new(arena.center_x() - REWARD_ITEM_OFFSET, reward_y),
    );
    waves::spawn_item(
        &mut commands,
        &config,
        ItemKind::MeteorCharge,
        Vec2::new(arena.center_x() + REWARD_ITEM_OFFSET, reward_y),
    );

    let cleared = status.stage;
    status.stage += 1;
    status.phase = GamePhase::StageClear {
        countdown: config.run.clear_delay,
    };
    info!("stage {cleared} boss down, +{bonus}");
    defeated.write(BossDefeated {
        stage_cleared: cleared,
        bonus,
        position,
        area: hitbox.size,
    });
}

/// Drive the stage flow: wave exhaustion summons the boss, and the
/// stage-clear countdown either starts the next wave or ends the run in
/// victory past the final stage.
pub fn progress_stages(
    time: Res<Time<Fixed>>,
    config: Res<ShooterConfig>,
    arena: Res<ArenaBounds>,
    mut commands: Commands,
    mut status: ResMut<GameStatus>,
    mut rng: ResMut<GameRng>,
    mut boss_spawned: MessageWriter<BossSpawned>,
    mut ended: MessageWriter<GameEnded>,
    enemies: Query<(), With<Enemy>>,
    mut launchers: Query<&mut MeteorLauncher, With<Player>>,
) {
    match status.phase {
        GamePhase::Wave => {
            if enemies.is_empty() {
                let hp = waves::spawn_boss(&mut commands, &config, status.stage, &arena);
                status.phase = GamePhase::Boss;
                info!("stage {} wave cleared, boss up with {hp} hp", status.stage);
                boss_spawned.write(BossSpawned { hp });
            }
        }
        GamePhase::StageClear { countdown } => {
            let countdown = countdown - time.delta_secs();
            if countdown > 0.0 {
                status.phase = GamePhase::StageClear { countdown };
                return;
            }

            if status.stage > config.run.final_stage {
                status.bank_combo();
                status.phase = GamePhase::GameOver { victory: true };
                info!(
                    "final stage cleared: score {} (best combo {})",
                    status.score, status.max_combo
                );
                ended.write(GameEnded {
                    victory: true,
                    score: status.score,
                    max_combo: status.max_combo,
                });
                return;
            }

            status.phase = GamePhase::Wave;
            waves::spawn_wave(&mut commands, &mut rng.0, &config, status.stage, &arena);
            if let Ok(mut launcher) = launchers.single_mut() {
                launcher.charges += 1;
            }
        }
        GamePhase::Boss | GamePhase::GameOver { .. } => {}
    }
}

/// Consume meteor commands from the host, spending a launcher charge per
/// accepted barrage.
pub fn process_meteor_commands(
    mut commands: Commands,
    status: Res<GameStatus>,
    config: Res<ShooterConfig>,
    mut requests: MessageReader<MeteorCommand>,
    mut launchers: Query<&mut MeteorLauncher, With<Player>>,
) {
    let Ok(mut launcher) = launchers.single_mut() else {
        requests.clear();
        return;
    };

    for _ in requests.read() {
        if !status.phase.is_active() || launcher.charges == 0 || config.meteor.strikes == 0 {
            continue;
        }
        launcher.charges -= 1;
        debug!("meteor barrage accepted, {} charges left", launcher.charges);
        commands.spawn(MeteorBarrage {
            strikes_left: config.meteor.strikes,
            next_in: 0.0,
        });
    }
}

/// Advance running meteor barrages, landing one strike per expired interval.
///
/// Each strike lands at a random point in the upper band, destroys enemies
/// within its blast radius for a flat score per kill, and chips the boss if
/// it sits within the larger boss radius.
pub fn process_meteor_barrages(
    time: Res<Time<Fixed>>,
    config: Res<ShooterConfig>,
    arena: Res<ArenaBounds>,
    mut commands: Commands,
    mut status: ResMut<GameStatus>,
    mut rng: ResMut<GameRng>,
    mut impacts: MessageWriter<MeteorImpact>,
    mut destroyed: MessageWriter<EnemyDestroyed>,
    mut barrages: Query<(Entity, &mut MeteorBarrage)>,
    enemies: Query<(Entity, &Transform), With<Enemy>>,
    mut bosses: Query<(&Transform, &mut Boss)>,
) {
    let dt = time.delta_secs();
    let tuning = &config.meteor;
    let mut dead: HashSet<Entity> = HashSet::new();

    for (barrage_entity, mut barrage) in &mut barrages {
        if barrage.strikes_left == 0 {
            commands.entity(barrage_entity).despawn();
            continue;
        }
        barrage.next_in -= dt;
        if barrage.next_in > 0.0 {
            continue;
        }

        let impact = Vec2::new(
            rng.0.random::<f32>() * arena.width,
            arena.height - rng.0.random::<f32>() * tuning.strike_band,
        );

        for (enemy_entity, enemy_tf) in &enemies {
            if dead.contains(&enemy_entity) {
                continue;
            }
            let enemy_pos = enemy_tf.translation.truncate();
            if enemy_pos.distance(impact) > tuning.enemy_radius {
                continue;
            }
            dead.insert(enemy_entity);
            commands.entity(enemy_entity).despawn();
            status.score += tuning.kill_score;
            status.register_hit(config.run.combo_window);
            destroyed.write(EnemyDestroyed {
                position: enemy_pos,
                score_awarded: tuning.kill_score,
            });
        }

        if let Ok((boss_tf, mut boss)) = bosses.single_mut() {
            if boss_tf.translation.truncate().distance(impact) <= tuning.boss_radius {
                boss.hp -= tuning.boss_damage;
                status.register_hit(config.run.combo_window);
            }
        }

        impacts.write(MeteorImpact { position: impact });
        barrage.strikes_left -= 1;
        if barrage.strikes_left == 0 {
            commands.entity(barrage_entity).despawn();
        } else {
            barrage.next_in = tuning.strike_interval;
        }
    }
}

/// Rebuild the stage-1 state on a restart command. Honored only after the
/// run has ended.
pub fn handle_restart(
    mut commands: Commands,
    config: Res<ShooterConfig>,
    arena: Res<ArenaBounds>,
    mut status: ResMut<GameStatus>,
    mut rng: ResMut<GameRng>,
    mut requests: MessageReader<RestartCommand>,
    leftovers: Query<
        Entity,
        Or<(
            With<Player>,
            With<Enemy>,
            With<Boss>,
            With<Laser>,
            With<Item>,
            With<Particle>,
            With<Explosion>,
            With<MeteorBarrage>,
            With<BossDeathThroes>,
        )>,
    >,
) {
    if requests.is_empty() {
        return;
    }
    requests.clear();

    if !matches!(status.phase, GamePhase::GameOver { .. }) {
        return;
    }

    for entity in &leftovers {
        commands.entity(entity).despawn();
    }

    *status = GameStatus::new_run(&config);
    info!("restarting run");
    waves::spawn_player(&mut commands, &config, &arena);
    waves::spawn_wave(&mut commands, &mut rng.0, &config, status.stage, &arena);
}
