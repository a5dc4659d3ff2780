//! Global resources for the shooter simulation.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::types::GamePhase;

/// Playable arena rectangle.
///
/// Coordinates run from `(0, 0)` at the bottom-left corner to
/// `(width, height)` at the top-right, y-up. The player spawns near the
/// floor, enemy formations near the ceiling, and the boss is confined to the
/// upper half.
///
/// # Example
/// ```
/// use bevy::prelude::*;
/// use bevy_space_shooter::resources::ArenaBounds;
///
/// let arena = ArenaBounds::default();
/// assert!(arena.contains(Vec2::new(400.0, 300.0), 50.0));
/// ```
#[derive(Resource, Reflect, Clone, Serialize, Deserialize)]
#[reflect(Resource)]
pub struct ArenaBounds {
    /// Arena width
    pub width: f32,
    /// Arena height
    pub height: f32,
}

impl Default for ArenaBounds {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

impl ArenaBounds {
    /// Horizontal center of the arena.
    pub fn center_x(&self) -> f32 {
        self.width * 0.5
    }

    /// True if `point` lies inside the arena expanded by `margin` on every
    /// side. Used to cull projectiles that have left play.
    pub fn contains(&self, point: Vec2, margin: f32) -> bool {
        point.x > -margin
            && point.x < self.width + margin
            && point.y > -margin
            && point.y < self.height + margin
    }

    /// Clamps a center position so a box of `half` extents stays inside.
    pub fn clamp_box(&self, center: Vec2, half: Vec2) -> Vec2 {
        Vec2::new(
            center.x.clamp(half.x, self.width - half.x),
            center.y.clamp(half.y, self.height - half.y),
        )
    }
}

/// Player movement and gun tuning.
#[derive(Reflect, Clone, Serialize, Deserialize)]
pub struct PlayerTuning {
    /// Ship speed (units per second)
    pub move_speed: f32,
    /// Upward speed of player lasers
    pub laser_speed: f32,
    /// Seconds between normal shots
    pub shot_cooldown: f32,
    /// Charge gained per second while the trigger is held
    pub charge_rate: f32,
    /// Charge lost per second while released
    pub charge_decay: f32,
    /// Charge ceiling
    pub charge_max: f32,
    /// Minimum charge for a charged volley on release
    pub charged_threshold: f32,
    /// Damage of one charged bolt
    pub charged_damage: i32,
    /// Sideways speed of the outer charged bolts
    pub charged_side_speed: f32,
    /// Lives at the start of a run
    pub starting_lives: u32,
    /// Life cap (extra-life pickups never exceed it)
    pub max_lives: u32,
    /// Shield pickup duration (seconds)
    pub shield_duration: f32,
    /// Post-hit flash duration (seconds)
    pub hit_flash_duration: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            move_speed: 360.0,
            laser_speed: 720.0,
            shot_cooldown: 0.15,
            charge_rate: 150.0,
            charge_decay: 60.0,
            charge_max: 100.0,
            charged_threshold: 50.0,
            charged_damage: 3,
            charged_side_speed: 120.0,
            starting_lives: 3,
            max_lives: 3,
            shield_duration: 6.7,
            hit_flash_duration: 0.5,
        }
    }
}

/// Enemy formation tuning.
#[derive(Reflect, Clone, Serialize, Deserialize)]
pub struct EnemyTuning {
    /// Descent speed at stage 0 (units per second)
    pub descent_base: f32,
    /// Additional descent speed per stage
    pub descent_per_stage: f32,
    /// Downward speed of enemy lasers
    pub laser_speed: f32,
    /// Minimum delay between an enemy's shots (seconds)
    pub volley_delay: f32,
    /// Random extra delay between shots (seconds)
    pub volley_jitter: f32,
    /// Upper bound of the randomized first-shot delay (seconds)
    pub initial_delay_max: f32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            descent_base: 18.0,
            descent_per_stage: 4.8,
            laser_speed: 300.0,
            volley_delay: 2.5,
            volley_jitter: 1.67,
            initial_delay_max: 3.33,
        }
    }
}

/// Boss tuning.
#[derive(Reflect, Clone, Serialize, Deserialize)]
pub struct BossTuning {
    /// Hit points at stage 0
    pub base_hp: i32,
    /// Additional hit points per stage
    pub hp_per_stage: i32,
    /// Seconds between random movement impulses
    pub retarget_interval: f32,
    /// Horizontal impulse amplitude: vx is drawn from +-(amplitude / 2)
    pub lateral_impulse: f32,
    /// Vertical impulse amplitude
    pub vertical_impulse: f32,
    /// Seconds between spread volleys in the opening phase
    pub spread_interval: f32,
    /// Seconds between radial rings while enraged
    pub radial_interval: f32,
    /// Downward speed of spread shots
    pub spread_shot_speed: f32,
    /// Sideways speed of the outer spread shots
    pub spread_side_speed: f32,
    /// Speed of radial ring shots
    pub radial_shot_speed: f32,
    /// Number of shots in a radial ring
    pub radial_shot_count: u32,
    /// Hit-point fraction below which the boss enrages
    pub enrage_fraction: f32,
    /// Score bonus floor for a defeat
    pub defeat_bonus_base: u64,
    /// Additional defeat bonus per stage
    pub defeat_bonus_per_stage: u64,
    /// Combo granted by a defeat
    pub defeat_combo_bonus: u32,
}

impl Default for BossTuning {
    fn default() -> Self {
        Self {
            base_hp: 30,
            hp_per_stage: 15,
            retarget_interval: 0.83,
            lateral_impulse: 720.0,
            vertical_impulse: 480.0,
            spread_interval: 1.0,
            radial_interval: 0.67,
            spread_shot_speed: 360.0,
            spread_side_speed: 180.0,
            radial_shot_speed: 300.0,
            radial_shot_count: 8,
            enrage_fraction: 0.5,
            defeat_bonus_base: 3000,
            defeat_bonus_per_stage: 1000,
            defeat_combo_bonus: 10,
        }
    }
}

/// Item drop tuning.
#[derive(Reflect, Clone, Serialize, Deserialize)]
pub struct ItemTuning {
    /// Probability that a destroyed enemy drops an item
    pub drop_chance: f32,
    /// Kind roll above which (while below the life cap) the drop upgrades
    /// to an extra life
    pub life_roll: f32,
    /// Fall speed of items (units per second)
    pub fall_speed: f32,
    /// Item spin rate (radians per second)
    pub spin_rate: f32,
}

impl Default for ItemTuning {
    fn default() -> Self {
        Self {
            drop_chance: 0.15,
            life_roll: 0.9,
            fall_speed: 120.0,
            spin_rate: 3.0,
        }
    }
}

/// Meteor barrage tuning.
#[derive(Reflect, Clone, Serialize, Deserialize)]
pub struct MeteorTuning {
    /// Launcher charges at the start of a run
    pub starting_charges: u32,
    /// Strikes per barrage
    pub strikes: u32,
    /// Seconds between strikes
    pub strike_interval: f32,
    /// Height of the impact band below the ceiling
    pub strike_band: f32,
    /// Enemies within this distance of an impact are destroyed
    pub enemy_radius: f32,
    /// Flat score per meteor kill
    pub kill_score: u64,
    /// Boss damage radius of an impact
    pub boss_radius: f32,
    /// Damage dealt to a boss inside the radius
    pub boss_damage: i32,
}

impl Default for MeteorTuning {
    fn default() -> Self {
        Self {
            starting_charges: 2,
            strikes: 12,
            strike_interval: 0.08,
            strike_band: 200.0,
            enemy_radius: 100.0,
            kill_score: 150,
            boss_radius: 120.0,
            boss_damage: 8,
        }
    }
}

/// Run progression and scoring tuning.
#[derive(Reflect, Clone, Serialize, Deserialize)]
pub struct RunTuning {
    /// Clearing this stage's boss wins the run
    pub final_stage: u32,
    /// Pause between a boss defeat and the next wave (seconds)
    pub clear_delay: f32,
    /// Seconds a combo survives without a hit
    pub combo_window: f32,
    /// Base score for an enemy kill, multiplied by `combo + 1`
    pub kill_score: u64,
}

impl Default for RunTuning {
    fn default() -> Self {
        Self {
            final_stage: 5,
            clear_delay: 2.0,
            combo_window: 3.0,
            kill_score: 100,
        }
    }
}

/// Every gameplay constant of the simulation, grouped by concern.
///
/// All values default to the original game's tuning (converted to per-second
/// units); hosts can deserialize a modified table to rebalance without
/// touching code.
///
/// # Example
/// ```
/// use bevy_space_shooter::resources::ShooterConfig;
///
/// let mut config = ShooterConfig::default();
/// config.run.final_stage = 3; // shorter campaign
/// ```
#[derive(Resource, Reflect, Clone, Default, Serialize, Deserialize)]
#[reflect(Resource)]
pub struct ShooterConfig {
    pub player: PlayerTuning,
    pub enemies: EnemyTuning,
    pub boss: BossTuning,
    pub items: ItemTuning,
    pub meteor: MeteorTuning,
    pub run: RunTuning,
}

/// Scoreboard and phase state of the current run.
///
/// # Fields
/// * `phase` - Current [`GamePhase`]
/// * `stage` - 1-based stage number, incremented by boss defeats
/// * `score` - Accumulated score
/// * `lives` - Lives remaining
/// * `combo` - Current hit streak; multiplies kill score
/// * `max_combo` - Best streak seen this run
/// * `combo_window` - Seconds left before the streak expires
#[derive(Resource, Reflect, Clone)]
#[reflect(Resource)]
pub struct GameStatus {
    /// Current phase of the run
    pub phase: GamePhase,
    /// 1-based stage number
    pub stage: u32,
    /// Accumulated score
    pub score: u64,
    /// Lives remaining
    pub lives: u32,
    /// Current hit streak
    pub combo: u32,
    /// Best streak this run
    pub max_combo: u32,
    /// Seconds until the streak expires (0 when no streak is live)
    pub combo_window: f32,
}

impl Default for GameStatus {
    fn default() -> Self {
        Self {
            phase: GamePhase::Wave,
            stage: 1,
            score: 0,
            lives: PlayerTuning::default().starting_lives,
            combo: 0,
            max_combo: 0,
            combo_window: 0.0,
        }
    }
}

impl GameStatus {
    /// Fresh stage-1 state using the configured starting lives.
    pub fn new_run(config: &ShooterConfig) -> Self {
        Self {
            lives: config.player.starting_lives,
            ..Default::default()
        }
    }

    /// Registers a successful hit: extends the streak and refreshes the
    /// combo window.
    pub fn register_hit(&mut self, window: f32) {
        self.combo += 1;
        self.combo_window = window;
    }

    /// Folds the current streak into `max_combo` and clears it.
    pub fn bank_combo(&mut self) {
        self.max_combo = self.max_combo.max(self.combo);
        self.combo = 0;
        self.combo_window = 0.0;
    }
}

/// Host-written input intent, the simulation's only input seam.
///
/// The host (window event loop, AI driver, test script) sets these flags
/// every frame; the simulation reads them in `FixedUpdate` and never polls
/// devices itself. Vertical movement is honored only during boss fights.
///
/// # Example
/// ```
/// use bevy_space_shooter::resources::PlayerIntent;
///
/// let mut intent = PlayerIntent::default();
/// intent.right = true;
/// intent.fire = true;
/// ```
#[derive(Resource, Reflect, Default, Clone)]
#[reflect(Resource)]
pub struct PlayerIntent {
    /// Move toward the left wall
    pub left: bool,
    /// Move toward the right wall
    pub right: bool,
    /// Move up (boss fights only)
    pub up: bool,
    /// Move down (boss fights only)
    pub down: bool,
    /// Hold the trigger: builds charge and fires
    pub fire: bool,
}

impl PlayerIntent {
    /// Horizontal and vertical axis values in -1.0..=1.0.
    pub fn axes(&self) -> Vec2 {
        Vec2::new(
            (self.right as i32 - self.left as i32) as f32,
            (self.up as i32 - self.down as i32) as f32,
        )
    }
}

/// Simulation random source.
///
/// Every stochastic gameplay decision (volley jitter, drop rolls, boss
/// impulses, meteor placement) draws from this resource, so a seeded
/// instance makes whole runs reproducible. Cosmetic draws live in
/// [`EffectsRng`].
///
/// # Example
/// ```
/// use bevy_space_shooter::resources::GameRng;
///
/// let rng = GameRng::seeded(0xC0FFEE);
/// ```
#[derive(Resource)]
pub struct GameRng(pub StdRng);

impl Default for GameRng {
    fn default() -> Self {
        Self(StdRng::from_os_rng())
    }
}

impl GameRng {
    /// A deterministic source for replays and tests.
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

/// Random source for the cosmetic effects layer.
///
/// Kept separate from [`GameRng`]: effect systems run on the host's frame
/// rate, so letting them share the simulation's stream would make seeded
/// runs depend on the render cadence. Particle scatter and death-throes
/// placement draw from here instead.
#[derive(Resource)]
pub struct EffectsRng(pub StdRng);

impl Default for EffectsRng {
    fn default() -> Self {
        Self(StdRng::from_os_rng())
    }
}

impl EffectsRng {
    /// A deterministic source for tests.
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}
