//! Game state and core simulation types
//!
//! Everything the controller mutates lives in [`GameState`]; front ends only
//! ever see the [`Snapshot`] copy.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Aabb;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Health hit zero; waiting for reset
    GameOver,
}

/// The player-controlled body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub on_ground: bool,
    /// Coins held (spent in the shop)
    pub currency: u32,
    /// Always within [0, MAX_HEALTH]
    pub health: f32,
    /// Damage divisor, starts at 1
    pub armor: f32,
    /// Horizontal speed set by move input
    pub speed: f32,
    /// Upward velocity applied on jump
    pub jump_power: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            vel: Vec2::ZERO,
            on_ground: true,
            currency: 0,
            health: MAX_HEALTH,
            armor: START_ARMOR,
            speed: START_SPEED,
            jump_power: START_JUMP_POWER,
        }
    }
}

impl Player {
    /// Fresh player at the spawn point with tuned starting stats
    pub fn spawn(tuning: &Tuning) -> Self {
        Self {
            speed: tuning.start_speed,
            jump_power: tuning.start_jump_power,
            ..Self::default()
        }
    }
}

/// Fixed platform identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformId {
    Ground,
    P1,
    P2,
}

/// A static platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub id: PlatformId,
    pub rect: Aabb,
}

impl Platform {
    pub fn new(id: PlatformId, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            id,
            rect: Aabb::new(x, y, width, height),
        }
    }

    /// The fixed level layout: ground plus two ledges, in collision order
    pub fn default_set() -> Vec<Platform> {
        vec![
            Platform::new(PlatformId::Ground, 0.0, 280.0, PLAY_AREA_WIDTH, 20.0),
            Platform::new(PlatformId::P1, 100.0, 200.0, 100.0, 20.0),
            Platform::new(PlatformId::P2, 250.0, 150.0, 100.0, 20.0),
        ]
    }
}

/// A collectable coin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub id: u32,
    pub pos: Vec2,
    /// Set once on pickup; the coin is dropped at the next spawn pass
    pub collected: bool,
}

/// A ground hazard. Never removed once spawned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spike {
    pub id: u32,
    pub rect: Aabb,
}

impl Spike {
    /// Point used for the hit test
    pub fn center(&self) -> Vec2 {
        self.rect.center()
    }
}

/// Score and UI flags for the current run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunState {
    pub score: u64,
    /// Display only
    pub level: u32,
    pub game_over: bool,
    pub shop_visible: bool,
}

impl Default for RunState {
    fn default() -> Self {
        Self {
            score: 0,
            level: 1,
            game_over: false,
            shop_visible: false,
        }
    }
}

/// Purchasable stats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Stat {
    Armor,
    Speed,
    JumpPower,
}

impl Stat {
    pub const ALL: [Stat; 3] = [Stat::Armor, Stat::Speed, Stat::JumpPower];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stat::Armor => "armor",
            Stat::Speed => "speed",
            Stat::JumpPower => "jumpPower",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "armor" => Some(Stat::Armor),
            "speed" => Some(Stat::Speed),
            "jumppower" | "jump_power" | "jump" => Some(Stat::JumpPower),
            _ => None,
        }
    }

    /// Increment applied per purchase
    pub fn step(&self, tuning: &Tuning) -> f32 {
        match self {
            Stat::Armor => tuning.armor_step,
            Stat::Speed => tuning.speed_step,
            Stat::JumpPower => tuning.jump_power_step,
        }
    }
}

/// Things that happened during a tick, for sound/effects in the front end
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Landed { platform: PlatformId },
    CoinSpawned { id: u32 },
    SpikeSpawned { id: u32 },
    CoinCollected { id: u32 },
    SpikeHit { id: u32, damage: f32 },
    GameOver { score: u64 },
}

/// Complete game state (deterministic for a given seed and input stream)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Ticks advanced since the last reset
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub player: Player,
    pub run: RunState,
    /// Fixed for the whole session
    pub platforms: Vec<Platform>,
    /// Sorted by id (spawn order)
    pub coins: Vec<Coin>,
    /// Sorted by id (spawn order)
    pub spikes: Vec<Spike>,
    /// Next entity ID; keeps counting across resets
    next_id: u32,
}

impl GameState {
    /// Create a fresh run
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            time_ticks: 0,
            phase: GamePhase::Running,
            player: Player::default(),
            run: RunState::default(),
            platforms: Platform::default_set(),
            coins: Vec::new(),
            spikes: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Restore player, run and spawned entities to defaults; platforms stay
    pub fn reset(&mut self) {
        self.time_ticks = 0;
        self.phase = GamePhase::Running;
        self.player = Player::default();
        self.run = RunState::default();
        self.coins.clear();
        self.spikes.clear();
    }

    /// Coins still in play
    pub fn active_coins(&self) -> impl Iterator<Item = &Coin> {
        self.coins.iter().filter(|c| !c.collected)
    }

    pub fn active_coin_count(&self) -> usize {
        self.active_coins().count()
    }
}

/// Read-only view handed to renderers and test harnesses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub seed: u64,
    pub tick: u64,
    pub phase: GamePhase,
    pub player: Player,
    pub run: RunState,
    pub platforms: Vec<Platform>,
    pub coins: Vec<Coin>,
    pub spikes: Vec<Spike>,
}

impl From<&GameState> for Snapshot {
    fn from(state: &GameState) -> Self {
        Self {
            seed: state.seed,
            tick: state.time_ticks,
            phase: state.phase,
            player: state.player.clone(),
            run: state.run.clone(),
            platforms: state.platforms.clone(),
            coins: state.coins.clone(),
            spikes: state.spikes.clone(),
        }
    }
}

impl Snapshot {
    /// Coins a renderer should draw
    pub fn visible_coins(&self) -> impl Iterator<Item = &Coin> {
        self.coins.iter().filter(|c| !c.collected)
    }
}
