//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (platform list order, entity spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod driver;
pub mod economy;
pub mod geometry;
pub mod physics;
pub mod rng;
pub mod shop;
pub mod spawner;
pub mod state;
pub mod tick;

pub use driver::{DriverStep, TickDriver};
pub use geometry::{Aabb, is_landing, within_proximity};
pub use rng::{RandomSource, SeededRng, SequenceRng};
pub use shop::PurchaseOutcome;
pub use state::{
    Coin, GameEvent, GamePhase, GameState, Platform, PlatformId, Player, RunState, Snapshot,
    Spike, Stat,
};
pub use tick::{InputEvent, InputOutcome, Simulation, TickOutcome};
