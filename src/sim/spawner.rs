//! Probabilistic coin and spike spawning
//!
//! Collected coins are dropped here, at the start of the spawn pass, rather
//! than the moment they are picked up. Between pickup and the next pass they
//! stay in the list flagged `collected` and are ignored by collision.

use glam::Vec2;

use super::geometry::Aabb;
use super::rng::RandomSource;
use super::state::{Coin, GameEvent, GameState, Spike};
use crate::tuning::Tuning;

/// Run one spawn pass. Touches only the coin and spike lists.
///
/// Each kind gets at most one independent draw per tick, and only while under
/// its population cap, so the cap check short-circuits the draw.
pub fn spawn_pass<R: RandomSource + ?Sized>(
    state: &mut GameState,
    rng: &mut R,
    tuning: &Tuning,
    events: &mut Vec<GameEvent>,
) {
    // Compact: collected coins leave the set now
    state.coins.retain(|c| !c.collected);

    if state.coins.len() < tuning.max_coins && rng.next_unit() < tuning.coin_spawn_p {
        let x = rng.range(tuning.spawn_x_min, tuning.spawn_x_max);
        let y = rng.range(tuning.coin_y_min, tuning.coin_y_max);
        let id = state.next_entity_id();
        state.coins.push(Coin {
            id,
            pos: Vec2::new(x, y),
            collected: false,
        });
        log::debug!("Coin {id} spawned at ({x:.1}, {y:.1})");
        events.push(GameEvent::CoinSpawned { id });
    }

    if state.spikes.len() < tuning.max_spikes && rng.next_unit() < tuning.spike_spawn_p {
        let x = rng.range(tuning.spawn_x_min, tuning.spawn_x_max);
        let id = state.next_entity_id();
        state.spikes.push(Spike {
            id,
            rect: Aabb::new(x, tuning.spike_y, tuning.spike_size, tuning.spike_size),
        });
        log::debug!("Spike {id} spawned at x={x:.1}");
        events.push(GameEvent::SpikeSpawned { id });
    }
}
