//! Headless autopilot run of the full shooter simulation.
//!
//! Drives the simulation at 60 Hz with a trivial sweep-and-fire pilot and
//! prints run progress to stdout. No window, no rendering.

use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::prelude::*;
use bevy_space_shooter::prelude::*;

fn main() {
    println!("Starting headless shooter run...");

    App::new()
        .add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(
            Duration::from_secs_f64(1.0 / 60.0),
        )))
        .add_plugins(SpaceShooterPlugins)
        .add_systems(Update, (autopilot, report_progress, finish_on_game_end))
        .run();
}

/// Sweep side to side, hold the trigger, and answer every boss with a
/// meteor barrage.
fn autopilot(
    time: Res<Time>,
    mut intent: ResMut<PlayerIntent>,
    mut meteors: MessageWriter<MeteorCommand>,
    mut boss_spawns: MessageReader<BossSpawned>,
    mut heading_right: Local<bool>,
    mut flip_timer: Local<f32>,
) {
    *flip_timer += time.delta_secs();
    if *flip_timer > 1.5 {
        *flip_timer = 0.0;
        *heading_right = !*heading_right;
    }

    intent.fire = true;
    intent.right = *heading_right;
    intent.left = !*heading_right;

    for spawn in boss_spawns.read() {
        println!("[BOSS] Spawned with {} hp, launching meteors", spawn.hp);
        meteors.write(MeteorCommand);
    }
}

fn report_progress(
    time: Res<Time>,
    status: Res<GameStatus>,
    mut defeats: MessageReader<BossDefeated>,
    mut timer: Local<f32>,
) {
    for defeat in defeats.read() {
        println!(
            "[STAGE] Stage {} cleared (+{} bonus)",
            defeat.stage_cleared, defeat.bonus
        );
    }

    *timer += time.delta_secs();
    if *timer > 2.0 {
        *timer = 0.0;
        println!(
            "[INFO] t={:.1}s stage={} score={} lives={} combo={}",
            time.elapsed_secs(),
            status.stage,
            status.score,
            status.lives,
            status.combo
        );
    }
}

fn finish_on_game_end(mut ended: MessageReader<GameEnded>) {
    for end in ended.read() {
        if end.victory {
            println!(
                "[VICTORY] Final score {} (best combo {})",
                end.score, end.max_combo
            );
        } else {
            println!(
                "[GAME OVER] Final score {} (best combo {})",
                end.score, end.max_combo
            );
        }
        std::process::exit(0);
    }
}
