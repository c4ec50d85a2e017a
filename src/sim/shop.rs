//! Upgrade shop: spend currency on permanent stat increases

use serde::{Deserialize, Serialize};

use super::state::{Player, Stat};
use crate::tuning::Tuning;

/// Result of a purchase attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PurchaseOutcome {
    /// Currency deducted and stat raised
    Applied,
    /// Not enough currency; nothing changed
    InsufficientFunds,
}

impl PurchaseOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, PurchaseOutcome::Applied)
    }
}

/// Buy one level of `stat`. No caps on stat values.
pub fn purchase(player: &mut Player, stat: Stat, tuning: &Tuning) -> PurchaseOutcome {
    let Some(remaining) = player.currency.checked_sub(tuning.upgrade_cost) else {
        log::debug!(
            "Cannot buy {}: have {}, need {}",
            stat.as_str(),
            player.currency,
            tuning.upgrade_cost
        );
        return PurchaseOutcome::InsufficientFunds;
    };

    player.currency = remaining;
    let step = stat.step(tuning);
    let value = match stat {
        Stat::Armor => &mut player.armor,
        Stat::Speed => &mut player.speed,
        Stat::JumpPower => &mut player.jump_power,
    };
    *value += step;
    log::debug!("Bought {} -> {:.1} ({} left)", stat.as_str(), *value, remaining);

    PurchaseOutcome::Applied
}
