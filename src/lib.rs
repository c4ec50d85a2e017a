//! Coin Hopper - a fixed-timestep 2D platformer simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, economy, game state)
//! - `tuning`: Data-driven game balance
//!
//! Drawing and raw input devices live outside this crate. A front end reads
//! [`sim::Snapshot`] after each step and feeds [`sim::InputEvent`]s back in.

pub mod sim;
pub mod tuning;

pub use sim::{GamePhase, InputEvent, Simulation, Snapshot, Stat};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Nominal tick rate
    pub const TICK_RATE_HZ: f32 = 60.0;
    /// Fixed simulation timestep (seconds)
    pub const SIM_DT: f32 = 1.0 / TICK_RATE_HZ;
    /// Maximum ticks per driver advance to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta the driver will accept (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Downward acceleration (units/tick²)
    pub const GRAVITY: f32 = 0.8;
    /// Horizontal velocity multiplier applied every tick
    pub const FRICTION: f32 = 0.9;

    /// Play area width
    pub const PLAY_AREA_WIDTH: f32 = 400.0;
    /// Player collision half extents
    pub const PLAYER_HALF_WIDTH: f32 = 20.0;
    pub const PLAYER_HALF_HEIGHT: f32 = 20.0;
    /// Horizontal clamp for the player centre
    pub const BOUND_MIN_X: f32 = PLAYER_HALF_WIDTH;
    pub const BOUND_MAX_X: f32 = PLAY_AREA_WIDTH - PLAYER_HALF_WIDTH;

    /// Player defaults
    pub const PLAYER_START_X: f32 = 50.0;
    pub const PLAYER_START_Y: f32 = 250.0;
    pub const MAX_HEALTH: f32 = 100.0;
    pub const START_ARMOR: f32 = 1.0;
    pub const START_SPEED: f32 = 5.0;
    pub const START_JUMP_POWER: f32 = 15.0;

    /// Population caps
    pub const MAX_COINS: usize = 5;
    pub const MAX_SPIKES: usize = 3;
    /// Per-tick spawn probabilities
    pub const COIN_SPAWN_P: f32 = 0.02;
    pub const SPIKE_SPAWN_P: f32 = 0.01;
    /// Spawn bands
    pub const SPAWN_X_MIN: f32 = 25.0;
    pub const SPAWN_X_MAX: f32 = 375.0;
    pub const COIN_Y_MIN: f32 = 50.0;
    pub const COIN_Y_MAX: f32 = 250.0;
    pub const SPIKE_Y: f32 = 260.0;
    pub const SPIKE_SIZE: f32 = 20.0;

    /// Proximity thresholds (per axis, not Euclidean)
    pub const COIN_PICKUP_RANGE: f32 = 30.0;
    pub const SPIKE_HIT_RANGE: f32 = 25.0;

    /// Economy
    pub const COIN_VALUE: u32 = 1;
    pub const SCORE_PER_COIN: u64 = 10;
    /// Spike damage before the armor divisor
    pub const SPIKE_DAMAGE: f32 = 10.0;

    /// Upgrade shop
    pub const UPGRADE_COST: u32 = 10;
    pub const ARMOR_STEP: f32 = 0.2;
    pub const SPEED_STEP: f32 = 1.0;
    pub const JUMP_POWER_STEP: f32 = 2.0;
}
