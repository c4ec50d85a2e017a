//! Idle/demo mode - a simple bot that plays from snapshots
//!
//! Used by the headless runner. It only ever sees a [`Snapshot`] and answers
//! with input events, exactly like a human front end would.

use super::state::{GamePhase, Snapshot, Stat};
use super::tick::InputEvent;
use crate::tuning::Tuning;

/// Horizontal slack before the bot bothers steering
const STEER_DEADZONE: f32 = 6.0;
/// How far above the player a coin must be before jumping for it
const JUMP_THRESHOLD: f32 = 30.0;
/// Spike centres closer than this (x) trigger evasion
const SPIKE_WARNING: f32 = 40.0;
/// Stop buying armor past this value
const ARMOR_TARGET: f32 = 2.0;
/// Stop buying jump power past this value
const JUMP_POWER_TARGET: f32 = 21.0;

/// Choose inputs for the next tick
pub fn decide(snapshot: &Snapshot, tuning: &Tuning) -> Vec<InputEvent> {
    let mut inputs = Vec::new();
    if snapshot.phase == GamePhase::GameOver {
        return inputs;
    }

    let player = &snapshot.player;

    if player.currency >= tuning.upgrade_cost {
        inputs.push(InputEvent::Purchase(pick_upgrade(snapshot)));
    }

    // Evade: step away from the nearest close spike and hop over it
    let threat = snapshot
        .spikes
        .iter()
        .map(|s| s.center().x - player.pos.x)
        .filter(|dx| dx.abs() < SPIKE_WARNING)
        .min_by(|a, b| a.abs().total_cmp(&b.abs()));
    if let Some(dx) = threat {
        inputs.push(if dx >= 0.0 {
            InputEvent::MoveLeft
        } else {
            InputEvent::MoveRight
        });
        if player.on_ground {
            inputs.push(InputEvent::Jump);
        }
        return inputs;
    }

    // Chase the nearest coin (Manhattan distance is plenty here)
    let target = snapshot.visible_coins().min_by(|a, b| {
        let da = (a.pos - player.pos).abs().element_sum();
        let db = (b.pos - player.pos).abs().element_sum();
        da.total_cmp(&db)
    });
    if let Some(coin) = target {
        let dx = coin.pos.x - player.pos.x;
        if dx < -STEER_DEADZONE {
            inputs.push(InputEvent::MoveLeft);
        } else if dx > STEER_DEADZONE {
            inputs.push(InputEvent::MoveRight);
        }
        if player.on_ground && coin.pos.y < player.pos.y - JUMP_THRESHOLD {
            inputs.push(InputEvent::Jump);
        }
    }

    inputs
}

/// Armor first (it halves spike damage fastest), then jump, then speed
fn pick_upgrade(snapshot: &Snapshot) -> Stat {
    let player = &snapshot.player;
    if player.armor < ARMOR_TARGET {
        Stat::Armor
    } else if player.jump_power < JUMP_POWER_TARGET {
        Stat::JumpPower
    } else {
        Stat::Speed
    }
}
