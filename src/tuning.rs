//! Game balance tuning
//!
//! Balance values from [`crate::consts`] live here as fields so tests and
//! tools can override them individually. Missing JSON fields fall back to the
//! defaults. Fixed layout (play area width, spawn point, health cap, frame
//! clamp) stays in `consts`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid tuning value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Tunable simulation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Timing ===
    pub tick_rate_hz: f32,
    pub max_substeps: u32,

    // === Physics ===
    pub gravity: f32,
    pub friction: f32,
    pub player_half_width: f32,
    pub player_half_height: f32,
    pub bound_min_x: f32,
    pub bound_max_x: f32,

    // === Player ===
    pub start_speed: f32,
    pub start_jump_power: f32,

    // === Spawning ===
    pub max_coins: usize,
    pub max_spikes: usize,
    pub coin_spawn_p: f32,
    pub spike_spawn_p: f32,
    pub spawn_x_min: f32,
    pub spawn_x_max: f32,
    pub coin_y_min: f32,
    pub coin_y_max: f32,
    pub spike_y: f32,
    pub spike_size: f32,

    // === Collision & economy ===
    pub coin_pickup_range: f32,
    pub spike_hit_range: f32,
    pub coin_value: u32,
    pub score_per_coin: u64,
    pub spike_damage: f32,

    // === Shop ===
    pub upgrade_cost: u32,
    pub armor_step: f32,
    pub speed_step: f32,
    pub jump_power_step: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            tick_rate_hz: TICK_RATE_HZ,
            max_substeps: MAX_SUBSTEPS,

            gravity: GRAVITY,
            friction: FRICTION,
            player_half_width: PLAYER_HALF_WIDTH,
            player_half_height: PLAYER_HALF_HEIGHT,
            bound_min_x: BOUND_MIN_X,
            bound_max_x: BOUND_MAX_X,

            start_speed: START_SPEED,
            start_jump_power: START_JUMP_POWER,

            max_coins: MAX_COINS,
            max_spikes: MAX_SPIKES,
            coin_spawn_p: COIN_SPAWN_P,
            spike_spawn_p: SPIKE_SPAWN_P,
            spawn_x_min: SPAWN_X_MIN,
            spawn_x_max: SPAWN_X_MAX,
            coin_y_min: COIN_Y_MIN,
            coin_y_max: COIN_Y_MAX,
            spike_y: SPIKE_Y,
            spike_size: SPIKE_SIZE,

            coin_pickup_range: COIN_PICKUP_RANGE,
            spike_hit_range: SPIKE_HIT_RANGE,
            coin_value: COIN_VALUE,
            score_per_coin: SCORE_PER_COIN,
            spike_damage: SPIKE_DAMAGE,

            upgrade_cost: UPGRADE_COST,
            armor_step: ARMOR_STEP,
            speed_step: SPEED_STEP,
            jump_power_step: JUMP_POWER_STEP,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON tuning document and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        log::info!("Loaded tuning overrides");
        Ok(tuning)
    }

    /// Serialize to pretty JSON (handy for dumping the defaults)
    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Fixed timestep in seconds
    pub fn sim_dt(&self) -> f32 {
        1.0 / self.tick_rate_hz
    }

    /// Reject values that would break simulation invariants
    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> TuningError {
            TuningError::Invalid {
                field,
                reason: reason.into(),
            }
        }

        for (field, value) in [
            ("tick_rate_hz", self.tick_rate_hz),
            ("gravity", self.gravity),
            ("friction", self.friction),
            ("player_half_width", self.player_half_width),
            ("player_half_height", self.player_half_height),
            ("bound_min_x", self.bound_min_x),
            ("bound_max_x", self.bound_max_x),
            ("start_speed", self.start_speed),
            ("start_jump_power", self.start_jump_power),
            ("coin_spawn_p", self.coin_spawn_p),
            ("spike_spawn_p", self.spike_spawn_p),
            ("spawn_x_min", self.spawn_x_min),
            ("spawn_x_max", self.spawn_x_max),
            ("coin_y_min", self.coin_y_min),
            ("coin_y_max", self.coin_y_max),
            ("spike_y", self.spike_y),
            ("spike_size", self.spike_size),
            ("coin_pickup_range", self.coin_pickup_range),
            ("spike_hit_range", self.spike_hit_range),
            ("spike_damage", self.spike_damage),
            ("armor_step", self.armor_step),
            ("speed_step", self.speed_step),
            ("jump_power_step", self.jump_power_step),
        ] {
            if !value.is_finite() {
                return Err(invalid(field, format!("{value} is not finite")));
            }
        }

        if self.tick_rate_hz <= 0.0 {
            return Err(invalid("tick_rate_hz", "must be positive"));
        }
        if self.max_substeps == 0 {
            return Err(invalid("max_substeps", "must be at least 1"));
        }
        if self.friction <= 0.0 || self.friction >= 1.0 {
            return Err(invalid("friction", "must be in (0, 1)"));
        }
        if self.bound_min_x > self.bound_max_x {
            return Err(invalid("bound_min_x", "must not exceed bound_max_x"));
        }
        for (field, p) in [
            ("coin_spawn_p", self.coin_spawn_p),
            ("spike_spawn_p", self.spike_spawn_p),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(invalid(field, format!("probability {p} outside [0, 1]")));
            }
        }
        if self.spawn_x_min > self.spawn_x_max {
            return Err(invalid("spawn_x_min", "must not exceed spawn_x_max"));
        }
        if self.coin_y_min > self.coin_y_max {
            return Err(invalid("coin_y_min", "must not exceed coin_y_max"));
        }
        if self.start_speed < 0.0 || self.start_jump_power < 0.0 {
            return Err(invalid("start_speed", "starting stats must not be negative"));
        }
        if self.spike_damage < 0.0 {
            return Err(invalid("spike_damage", "must not be negative"));
        }
        for (field, step) in [
            ("armor_step", self.armor_step),
            ("speed_step", self.speed_step),
            ("jump_power_step", self.jump_power_step),
        ] {
            // Upgrades only ever raise a stat
            if step < 0.0 {
                return Err(invalid(field, "must not be negative"));
            }
        }
        Ok(())
    }
}
