//! Coin pickups, spike damage and the game-over check
//!
//! Runs after physics each tick, against the player's new position.

use super::geometry::within_proximity;
use super::state::{Coin, GameEvent, Player, RunState, Spike};
use crate::consts::MAX_HEALTH;
use crate::tuning::Tuning;

/// Resolve pickups and hazards for one tick.
///
/// - Every uncollected coin within the pickup range is collected once, paying
///   currency and score.
/// - Every spike within the hit range deals `spike_damage / armor`. This is
///   continuous damage: it repeats on every tick the overlap lasts.
/// - Health is clamped at zero; reaching zero sets `run.game_over`.
pub fn resolve(
    player: &mut Player,
    run: &mut RunState,
    coins: &mut [Coin],
    spikes: &[Spike],
    tuning: &Tuning,
    events: &mut Vec<GameEvent>,
) {
    for coin in coins.iter_mut().filter(|c| !c.collected) {
        if within_proximity(
            player.pos,
            coin.pos,
            tuning.coin_pickup_range,
            tuning.coin_pickup_range,
        ) {
            coin.collected = true;
            player.currency = player.currency.saturating_add(tuning.coin_value);
            run.score = run.score.saturating_add(tuning.score_per_coin);
            log::debug!(
                "Coin {} collected (currency {}, score {})",
                coin.id,
                player.currency,
                run.score
            );
            events.push(GameEvent::CoinCollected { id: coin.id });
        }
    }

    for spike in spikes {
        if within_proximity(
            player.pos,
            spike.center(),
            tuning.spike_hit_range,
            tuning.spike_hit_range,
        ) {
            let damage = tuning.spike_damage / player.armor;
            player.health = (player.health - damage).clamp(0.0, MAX_HEALTH);
            log::trace!("Spike {} hit for {damage:.2}, health {:.2}", spike.id, player.health);
            events.push(GameEvent::SpikeHit {
                id: spike.id,
                damage,
            });
        }
    }

    if player.health <= 0.0 && !run.game_over {
        run.game_over = true;
        log::info!("Game over - final score {}", run.score);
        events.push(GameEvent::GameOver { score: run.score });
    }
}
