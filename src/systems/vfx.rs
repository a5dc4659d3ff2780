//! Effect systems: particle bursts and explosion rings driven by simulation
//! messages.
//!
//! Effects are pure data for hosts to draw. They run in `Update` rather than
//! `FixedUpdate` since nothing in the simulation reads them back.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::Rng;
use rand_distr::UnitCircle;

use crate::components::{BossDeathThroes, Explosion, Particle};
use crate::events::{
    BossDefeated, ChargedShotFired, EnemyDestroyed, ItemCollected, MeteorImpact, PlayerDamaged,
};
use crate::resources::EffectsRng;
use crate::types::ParticleTint;

/// Opacity lost per second by burst particles.
const PARTICLE_FADE: f32 = 1.2;
/// Opacity lost per second by explosion rings.
const EXPLOSION_FADE: f32 = 2.4;
/// Radius growth of a kill explosion, units per second.
const KILL_EXPLOSION_GROWTH: f32 = 180.0;
/// Radius growth of a meteor explosion, units per second.
const METEOR_EXPLOSION_GROWTH: f32 = 300.0;

fn spawn_burst(
    commands: &mut Commands,
    rng: &mut StdRng,
    position: Vec2,
    count: u32,
    speed: f32,
    tint: ParticleTint,
) {
    for _ in 0..count {
        let dir: [f32; 2] = rng.sample(UnitCircle);
        commands.spawn((
            Particle {
                velocity: Vec2::from(dir) * speed * rng.random::<f32>(),
                alpha: 1.0,
                fade: PARTICLE_FADE,
                tint,
            },
            Transform::from_translation(position.extend(0.0)),
        ));
    }
}

fn spawn_explosion(commands: &mut Commands, position: Vec2, growth: f32) {
    commands.spawn((
        Explosion {
            radius: 0.0,
            growth,
            alpha: 1.0,
            fade: EXPLOSION_FADE,
        },
        Transform::from_translation(position.extend(0.0)),
    ));
}

/// Spawn bursts and rings for this frame's simulation messages.
pub fn spawn_effect_bursts(
    mut commands: Commands,
    mut rng: ResMut<EffectsRng>,
    mut kills: MessageReader<EnemyDestroyed>,
    mut charged: MessageReader<ChargedShotFired>,
    mut meteors: MessageReader<MeteorImpact>,
    mut pickups: MessageReader<ItemCollected>,
    mut damage: MessageReader<PlayerDamaged>,
    mut boss_defeats: MessageReader<BossDefeated>,
) {
    for kill in kills.read() {
        spawn_burst(
            &mut commands,
            &mut rng.0,
            kill.position,
            10,
            240.0,
            ParticleTint::Yellow,
        );
        spawn_explosion(&mut commands, kill.position, KILL_EXPLOSION_GROWTH);
    }

    for shot in charged.read() {
        spawn_burst(
            &mut commands,
            &mut rng.0,
            shot.position,
            20,
            180.0,
            ParticleTint::Gold,
        );
    }

    for impact in meteors.read() {
        spawn_burst(
            &mut commands,
            &mut rng.0,
            impact.position,
            30,
            300.0,
            ParticleTint::Orange,
        );
        spawn_explosion(&mut commands, impact.position, METEOR_EXPLOSION_GROWTH);
    }

    for pickup in pickups.read() {
        spawn_burst(
            &mut commands,
            &mut rng.0,
            pickup.position,
            15,
            240.0,
            ParticleTint::Cyan,
        );
    }

    for hit in damage.read() {
        if !hit.absorbed {
            spawn_burst(
                &mut commands,
                &mut rng.0,
                hit.position,
                20,
                240.0,
                ParticleTint::Orange,
            );
        }
    }

    // The staggered death sequence entity is spawned by the boss lifecycle;
    // here we only add the immediate burst.
    for defeat in boss_defeats.read() {
        spawn_burst(
            &mut commands,
            &mut rng.0,
            defeat.position,
            30,
            300.0,
            ParticleTint::Gold,
        );
    }
}

/// Play out boss death sequences, one scattered explosion per stagger.
pub fn play_boss_death_throes(
    time: Res<Time>,
    mut commands: Commands,
    mut rng: ResMut<EffectsRng>,
    mut sequences: Query<(Entity, &mut BossDeathThroes)>,
) {
    let dt = time.delta_secs();
    for (entity, mut throes) in &mut sequences {
        throes.next_in -= dt;
        if throes.next_in > 0.0 {
            continue;
        }

        let offset = Vec2::new(
            (rng.0.random::<f32>() - 0.5) * throes.area.x,
            (rng.0.random::<f32>() - 0.5) * throes.area.y,
        );
        spawn_explosion(&mut commands, throes.center + offset, KILL_EXPLOSION_GROWTH);

        throes.remaining -= 1;
        if throes.remaining == 0 {
            commands.entity(entity).despawn();
        } else {
            throes.next_in = BossDeathThroes::STAGGER;
        }
    }
}

/// Integrate particles and cull the fully faded.
pub fn update_particles(
    time: Res<Time>,
    mut commands: Commands,
    mut particles: Query<(Entity, &mut Transform, &mut Particle)>,
) {
    let dt = time.delta_secs();
    for (entity, mut transform, mut particle) in &mut particles {
        transform.translation += (particle.velocity * dt).extend(0.0);
        particle.alpha -= particle.fade * dt;
        if particle.alpha <= 0.0 {
            commands.entity(entity).despawn();
        }
    }
}

/// Grow and fade explosion rings, culling the fully faded.
pub fn update_explosions(
    time: Res<Time>,
    mut commands: Commands,
    mut explosions: Query<(Entity, &mut Explosion)>,
) {
    let dt = time.delta_secs();
    for (entity, mut explosion) in &mut explosions {
        explosion.radius += explosion.growth * dt;
        explosion.alpha -= explosion.fade * dt;
        if explosion.alpha <= 0.0 {
            commands.entity(entity).despawn();
        }
    }
}
