//! Player integration and platform landings
//!
//! One call advances the player by exactly one tick. There are no failure
//! cases: the result is always a valid player.

use super::geometry::is_landing;
use super::state::{Platform, PlatformId, Player};
use crate::tuning::Tuning;

/// Advance the player one tick against the fixed platform set.
///
/// Order matters and matches the game's feel:
/// 1. gravity into vy
/// 2. provisional vertical move
/// 3. landing test per platform, first match in list order wins
/// 4. horizontal move, clamped to the play area
/// 5. friction on vx (exponential decay, never exactly zero)
///
/// Returns the platform landed on this tick, if any.
pub fn integrate(
    player: &mut Player,
    platforms: &[Platform],
    tuning: &Tuning,
) -> Option<PlatformId> {
    let prev_y = player.pos.y;
    let mut vy = player.vel.y + tuning.gravity;
    let mut next_y = prev_y + vy;

    let landed = platforms
        .iter()
        .find(|p| {
            is_landing(
                prev_y,
                next_y,
                player.pos.x,
                &p.rect,
                tuning.player_half_width,
                tuning.player_half_height,
            )
        })
        .map(|platform| {
            next_y = platform.rect.min.y - tuning.player_half_height * 2.0;
            vy = 0.0;
            platform.id
        });

    player.on_ground = landed.is_some();
    player.pos.y = next_y;
    player.vel.y = vy;

    player.pos.x = (player.pos.x + player.vel.x).clamp(tuning.bound_min_x, tuning.bound_max_x);
    player.vel.x *= tuning.friction;

    landed
}
