//! Fixed timestep simulation controller
//!
//! [`Simulation`] owns the whole game state and is the only thing that
//! mutates it. Each entry point (`tick`, `apply_input`, `purchase`, `reset`)
//! is one atomic step; readers take a [`Snapshot`] in between.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::economy;
use super::physics;
use super::rng::{RandomSource, SeededRng};
use super::shop::{self, PurchaseOutcome};
use super::spawner;
use super::state::{GameEvent, GamePhase, GameState, Player, Snapshot, Stat};
use crate::tuning::Tuning;

/// Discrete input vocabulary. There is deliberately no key-up: horizontal
/// velocity only decays through friction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    /// ArrowLeft: vx = -speed
    MoveLeft,
    /// ArrowRight: vx = +speed
    MoveRight,
    /// ArrowUp: jump if grounded
    Jump,
    ToggleShop,
    Purchase(Stat),
    Reset,
}

/// What happened to an input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputOutcome {
    Applied,
    /// Not valid in the current phase/state (e.g. movement after game over)
    Ignored,
    Purchase(PurchaseOutcome),
}

/// Result of a tick request
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// The world moved one step; events are in the order they occurred
    Advanced(Vec<GameEvent>),
    /// Game over: nothing moved
    Halted,
}

impl TickOutcome {
    pub fn is_advanced(&self) -> bool {
        matches!(self, TickOutcome::Advanced(_))
    }

    /// Events produced by the tick (empty when halted)
    pub fn events(&self) -> &[GameEvent] {
        match self {
            TickOutcome::Advanced(events) => events,
            TickOutcome::Halted => &[],
        }
    }
}

/// The top-level state machine: `Running <-> GameOver`
#[derive(Debug, Clone)]
pub struct Simulation<R: RandomSource = SeededRng> {
    state: GameState,
    tuning: Tuning,
    rng: R,
    /// Inputs waiting for the start of the next tick
    pending: VecDeque<InputEvent>,
}

impl Simulation<SeededRng> {
    /// New run with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self::with_rng(SeededRng::new(seed), tuning)
    }
}

impl<R: RandomSource> Simulation<R> {
    /// New run drawing spawns from `rng`
    pub fn with_rng(rng: R, tuning: Tuning) -> Self {
        let mut state = GameState::new(rng.seed());
        state.player = Player::spawn(&tuning);
        log::info!("New run (seed {})", state.seed);
        Self {
            state,
            tuning,
            rng,
            pending: VecDeque::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.state.phase == GamePhase::GameOver
    }

    /// Immutable copy for renderers
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from(&self.state)
    }

    /// Queue an input for the start of the next tick
    pub fn queue_input(&mut self, event: InputEvent) {
        self.pending.push_back(event);
    }

    /// Inputs queued but not yet applied
    pub fn pending_inputs(&self) -> usize {
        self.pending.len()
    }

    /// Apply an input right now.
    ///
    /// In `GameOver` only `Reset`, `ToggleShop` and `Purchase` get through.
    /// Purchases carry no phase guard.
    pub fn apply_input(&mut self, event: InputEvent) -> InputOutcome {
        let running = self.state.phase == GamePhase::Running;

        match event {
            InputEvent::MoveLeft if running => {
                self.state.player.vel.x = -self.state.player.speed;
                InputOutcome::Applied
            }
            InputEvent::MoveRight if running => {
                self.state.player.vel.x = self.state.player.speed;
                InputOutcome::Applied
            }
            InputEvent::Jump if running && self.state.player.on_ground => {
                let player = &mut self.state.player;
                player.vel.y = -player.jump_power;
                player.on_ground = false;
                InputOutcome::Applied
            }
            InputEvent::MoveLeft | InputEvent::MoveRight | InputEvent::Jump => {
                InputOutcome::Ignored
            }
            InputEvent::ToggleShop => {
                self.state.run.shop_visible = !self.state.run.shop_visible;
                InputOutcome::Applied
            }
            InputEvent::Purchase(stat) => InputOutcome::Purchase(self.purchase(stat)),
            InputEvent::Reset => {
                self.reset();
                InputOutcome::Applied
            }
        }
    }

    /// Spend currency on a stat upgrade
    pub fn purchase(&mut self, stat: Stat) -> PurchaseOutcome {
        shop::purchase(&mut self.state.player, stat, &self.tuning)
    }

    /// Start a fresh run. Platforms, the RNG stream and entity ids carry on.
    pub fn reset(&mut self) {
        log::info!(
            "Reset after {} ticks (score {})",
            self.state.time_ticks,
            self.state.run.score
        );
        self.state.reset();
        self.state.player = Player::spawn(&self.tuning);
    }

    /// Advance one fixed step: queued inputs, physics, spawns, then economy.
    pub fn tick(&mut self) -> TickOutcome {
        while let Some(event) = self.pending.pop_front() {
            self.apply_input(event);
        }

        if self.state.phase == GamePhase::GameOver {
            return TickOutcome::Halted;
        }

        let mut events = Vec::new();
        let state = &mut self.state;
        state.time_ticks += 1;

        let landed = physics::integrate(&mut state.player, &state.platforms, &self.tuning);
        if let Some(platform) = landed {
            events.push(GameEvent::Landed { platform });
        }

        spawner::spawn_pass(state, &mut self.rng, &self.tuning, &mut events);

        economy::resolve(
            &mut state.player,
            &mut state.run,
            &mut state.coins,
            &state.spikes,
            &self.tuning,
            &mut events,
        );

        if state.run.game_over {
            state.phase = GamePhase::GameOver;
        }

        TickOutcome::Advanced(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geometry::Aabb;
    use crate::sim::rng::SequenceRng;
    use crate::sim::state::{Coin, PlatformId, Player, Spike};
    use glam::Vec2;
    use proptest::prelude::*;

    /// Simulation whose spawner never fires
    fn quiet_sim() -> Simulation<SequenceRng> {
        Simulation::with_rng(SequenceRng::constant(0.999), Tuning::default())
    }

    fn stand_on_ground(sim: &mut Simulation<SequenceRng>, x: f32) {
        sim.state.player.pos = Vec2::new(x, 240.0);
        sim.state.player.vel = Vec2::ZERO;
        sim.state.player.on_ground = true;
    }

    #[test]
    fn test_default_run_starts_running() {
        let sim = Simulation::new(1);
        assert_eq!(sim.phase(), GamePhase::Running);
        assert_eq!(sim.state().seed, 1);
        assert_eq!(sim.snapshot().tick, 0);
    }

    #[test]
    fn test_move_inputs_set_velocity_to_speed() {
        let mut sim = quiet_sim();
        assert_eq!(sim.apply_input(InputEvent::MoveRight), InputOutcome::Applied);
        assert_eq!(sim.state().player.vel.x, 5.0);
        assert_eq!(sim.apply_input(InputEvent::MoveLeft), InputOutcome::Applied);
        assert_eq!(sim.state().player.vel.x, -5.0);
    }

    #[test]
    fn test_speed_upgrade_feeds_movement() {
        let mut sim = quiet_sim();
        sim.state.player.currency = 10;
        assert_eq!(
            sim.apply_input(InputEvent::Purchase(Stat::Speed)),
            InputOutcome::Purchase(PurchaseOutcome::Applied)
        );
        sim.apply_input(InputEvent::MoveRight);
        assert_eq!(sim.state().player.vel.x, 6.0);
    }

    #[test]
    fn test_jump_only_when_grounded() {
        let mut sim = quiet_sim();
        stand_on_ground(&mut sim, 50.0);
        assert_eq!(sim.apply_input(InputEvent::Jump), InputOutcome::Applied);
        assert_eq!(sim.state().player.vel.y, -15.0);
        assert!(!sim.state().player.on_ground);
        // Mid-air
        assert_eq!(sim.apply_input(InputEvent::Jump), InputOutcome::Ignored);
    }

    #[test]
    fn test_queued_jump_affects_next_integration() {
        let mut sim = quiet_sim();
        stand_on_ground(&mut sim, 50.0);
        sim.queue_input(InputEvent::Jump);
        assert_eq!(sim.pending_inputs(), 1);

        sim.tick();
        let player = &sim.state().player;
        assert_eq!(sim.pending_inputs(), 0);
        assert!(!player.on_ground);
        assert!((player.vel.y - (-15.0 + 0.8)).abs() < 1e-5);
        assert!((player.pos.y - (240.0 - 14.2)).abs() < 1e-4);
    }

    #[test]
    fn test_no_key_up_velocity_only_decays() {
        let mut sim = quiet_sim();
        stand_on_ground(&mut sim, 100.0);
        sim.apply_input(InputEvent::MoveRight);
        sim.tick();
        assert_eq!(sim.state().player.pos.x, 105.0);
        assert!((sim.state().player.vel.x - 4.5).abs() < 1e-5);
        sim.tick();
        assert!((sim.state().player.pos.x - 109.5).abs() < 1e-4);
    }

    #[test]
    fn test_grounded_player_stays_on_ground_through_ticks() {
        let mut sim = quiet_sim();
        stand_on_ground(&mut sim, 50.0);
        for _ in 0..30 {
            let outcome = sim.tick();
            assert!(outcome.events().contains(&GameEvent::Landed {
                platform: PlatformId::Ground
            }));
        }
        assert!(sim.state().player.on_ground);
        assert_eq!(sim.state().player.pos.y, 240.0);
    }

    #[test]
    fn test_coin_pickup_through_tick() {
        let mut sim = quiet_sim();
        stand_on_ground(&mut sim, 100.0);
        let id = sim.state.next_entity_id();
        sim.state.coins.push(Coin {
            id,
            pos: Vec2::new(110.0, 230.0),
            collected: false,
        });

        let outcome = sim.tick();
        assert!(outcome.events().contains(&GameEvent::CoinCollected { id }));
        assert_eq!(sim.state().player.currency, 1);
        assert_eq!(sim.state().run.score, 10);
        // Lazy removal: still listed, flagged
        assert_eq!(sim.state().coins.len(), 1);
        assert!(sim.state().coins[0].collected);

        sim.tick();
        assert!(sim.state().coins.is_empty());
        assert_eq!(sim.state().player.currency, 1);
    }

    fn arm_lethal_spike(sim: &mut Simulation<SequenceRng>) {
        // Player hovering with the spike centre 10 below; gravity keeps it in range
        sim.state.player = Player {
            pos: Vec2::new(110.0, 255.0),
            vel: Vec2::ZERO,
            on_ground: false,
            health: 10.0,
            ..Default::default()
        };
        let id = sim.state.next_entity_id();
        sim.state.spikes.push(Spike {
            id,
            rect: Aabb::new(100.0, 260.0, 20.0, 20.0),
        });
    }

    #[test]
    fn test_lethal_spike_transitions_to_game_over() {
        let mut sim = quiet_sim();
        arm_lethal_spike(&mut sim);

        let outcome = sim.tick();
        assert!(outcome.is_advanced());
        assert_eq!(sim.state().player.health, 0.0);
        assert!(sim.state().run.game_over);
        assert_eq!(sim.phase(), GamePhase::GameOver);
        assert!(outcome.events().iter().any(|e| matches!(e, GameEvent::GameOver { .. })));
    }

    #[test]
    fn test_game_over_freezes_world_and_movement() {
        let mut sim = quiet_sim();
        arm_lethal_spike(&mut sim);
        sim.tick();
        let frozen = sim.snapshot();

        assert_eq!(sim.tick(), TickOutcome::Halted);
        assert_eq!(sim.apply_input(InputEvent::MoveLeft), InputOutcome::Ignored);
        assert_eq!(sim.apply_input(InputEvent::MoveRight), InputOutcome::Ignored);
        assert_eq!(sim.apply_input(InputEvent::Jump), InputOutcome::Ignored);
        assert_eq!(sim.tick(), TickOutcome::Halted);
        assert_eq!(sim.snapshot(), frozen);
    }

    #[test]
    fn test_shop_toggle_and_purchase_allowed_in_game_over() {
        let mut sim = quiet_sim();
        arm_lethal_spike(&mut sim);
        sim.state.player.currency = 10;
        sim.tick();
        assert!(sim.is_game_over());

        assert_eq!(sim.apply_input(InputEvent::ToggleShop), InputOutcome::Applied);
        assert!(sim.state().run.shop_visible);
        assert_eq!(sim.purchase(Stat::Armor), PurchaseOutcome::Applied);
        assert_eq!(sim.state().player.currency, 0);
        assert!(sim.is_game_over());
    }

    #[test]
    fn test_reset_restores_defaults_and_keeps_platforms() {
        let mut sim = quiet_sim();
        let platforms = sim.state().platforms.clone();
        sim.state.run.score = 120;
        sim.state.player.currency = 4;
        sim.state.player.armor = 1.4;
        sim.state.coins.push(Coin {
            id: 99,
            pos: Vec2::new(200.0, 100.0),
            collected: false,
        });
        arm_lethal_spike(&mut sim);
        sim.tick();
        assert!(sim.is_game_over());

        assert_eq!(sim.apply_input(InputEvent::Reset), InputOutcome::Applied);
        let snap = sim.snapshot();
        assert_eq!(snap.phase, GamePhase::Running);
        assert_eq!(snap.player, Player::default());
        assert_eq!(snap.player.pos, Vec2::new(50.0, 250.0));
        assert_eq!(snap.player.health, 100.0);
        assert_eq!(snap.player.currency, 0);
        assert_eq!(snap.player.armor, 1.0);
        assert_eq!(snap.player.speed, 5.0);
        assert_eq!(snap.player.jump_power, 15.0);
        assert_eq!(snap.run.score, 0);
        assert!(!snap.run.game_over);
        assert!(snap.coins.is_empty());
        assert!(snap.spikes.is_empty());
        assert_eq!(snap.platforms, platforms);
        assert_eq!(snap.tick, 0);

        assert!(sim.tick().is_advanced());
    }

    #[test]
    fn test_queued_reset_revives_on_next_tick() {
        let mut sim = quiet_sim();
        arm_lethal_spike(&mut sim);
        sim.tick();
        sim.queue_input(InputEvent::MoveLeft);
        sim.queue_input(InputEvent::Reset);
        assert!(sim.tick().is_advanced());
        assert_eq!(sim.phase(), GamePhase::Running);
        assert_eq!(sim.state().time_ticks, 1);
    }

    #[test]
    fn test_determinism() {
        // Two runs with the same seed and inputs end up identical
        let mut a = Simulation::new(99999);
        let mut b = Simulation::new(99999);
        let script = [
            InputEvent::MoveRight,
            InputEvent::Jump,
            InputEvent::MoveLeft,
            InputEvent::ToggleShop,
            InputEvent::Purchase(Stat::Armor),
        ];
        for i in 0..2_000 {
            if i % 37 == 0 {
                let event = script[(i / 37) % script.len()];
                a.queue_input(event);
                b.queue_input(event);
            }
            a.tick();
            b.tick();
        }
        assert_eq!(a.snapshot(), b.snapshot());
    }

    #[test]
    fn test_grounded_demo_tuning_rests_on_ground() {
        let tuning = Tuning::from_json(include_str!("../../demos/grounded.json")).unwrap();
        let mut sim = Simulation::with_rng(SequenceRng::constant(0.999), tuning);

        let outcome = sim.tick();
        assert!(outcome.events().contains(&GameEvent::Landed {
            platform: PlatformId::Ground
        }));
        assert!(sim.state().player.on_ground);
        assert_eq!(sim.state().player.pos.y, 250.0);
    }

    #[test]
    fn test_tuned_starting_stats_survive_reset() {
        let tuning = Tuning {
            start_speed: 8.0,
            start_jump_power: 20.0,
            ..Tuning::default()
        };
        let mut sim = Simulation::with_rng(SequenceRng::constant(0.999), tuning);
        assert_eq!(sim.state().player.speed, 8.0);
        assert_eq!(sim.state().player.jump_power, 20.0);

        sim.state.player.currency = 10;
        assert!(sim.purchase(Stat::Speed).is_applied());
        assert_eq!(sim.state().player.speed, 9.0);

        sim.reset();
        assert_eq!(sim.state().player.speed, 8.0);
        assert_eq!(sim.state().player.jump_power, 20.0);

        sim.apply_input(InputEvent::MoveRight);
        assert_eq!(sim.state().player.vel.x, 8.0);
    }

    fn input_strategy() -> impl Strategy<Value = Option<InputEvent>> {
        prop_oneof![
            4 => Just(None),
            1 => Just(Some(InputEvent::MoveLeft)),
            1 => Just(Some(InputEvent::MoveRight)),
            1 => Just(Some(InputEvent::Jump)),
            1 => Just(Some(InputEvent::ToggleShop)),
            1 => Just(Some(InputEvent::Purchase(Stat::Armor))),
            1 => Just(Some(InputEvent::Purchase(Stat::Speed))),
            1 => Just(Some(InputEvent::Purchase(Stat::JumpPower))),
            1 => Just(Some(InputEvent::Reset)),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn prop_invariants_hold_every_tick(
            seed in any::<u64>(),
            start_x in 20.0f32..380.0,
            spike_damage in 1.0f32..150.0,
            script in proptest::collection::vec(input_strategy(), 1..600),
        ) {
            // A 30-tall player stands at y=250, within hit range of spike
            // centres at y=270, and spawns are aggressive
            let tuning = Tuning {
                player_half_height: 15.0,
                coin_spawn_p: 0.3,
                spike_spawn_p: 0.2,
                spike_damage,
                ..Tuning::default()
            };
            let mut sim = Simulation::with_tuning(seed, tuning);
            sim.state.player.pos = Vec2::new(start_x, 250.0);
            let id = sim.state.next_entity_id();
            sim.state.spikes.push(Spike {
                id,
                rect: Aabb::new(start_x - 10.0, 260.0, 20.0, 20.0),
            });

            let mut last_armor = sim.state().player.armor;
            let mut last_speed = sim.state().player.speed;
            let mut last_jump = sim.state().player.jump_power;
            let mut last_phase = sim.phase();
            let mut spike_hits = 0usize;

            // First tick runs with no input so the planted spike is guaranteed to bite
            let inputs = std::iter::once(None).chain(script);
            for input in inputs {
                let resetting = input == Some(InputEvent::Reset);
                if let Some(event) = input {
                    sim.queue_input(event);
                }
                let outcome = sim.tick();
                spike_hits += outcome
                    .events()
                    .iter()
                    .filter(|e| matches!(e, GameEvent::SpikeHit { .. }))
                    .count();

                let snap = sim.snapshot();
                let player = &snap.player;
                prop_assert!((0.0..=100.0).contains(&player.health));
                prop_assert!(player.pos.x >= 20.0 && player.pos.x <= 380.0);
                prop_assert!(snap.visible_coins().count() <= 5);
                prop_assert!(snap.spikes.len() <= 3);
                prop_assert_eq!(snap.run.game_over, snap.phase == GamePhase::GameOver);
                prop_assert_eq!(snap.run.game_over, player.health <= 0.0);
                if last_phase == GamePhase::Running && snap.phase == GamePhase::GameOver {
                    let has_game_over =
                        outcome.events().iter().any(|e| matches!(e, GameEvent::GameOver { .. }));
                    prop_assert!(has_game_over);
                }

                // Stats only ever drop through a reset
                if !resetting {
                    prop_assert!(player.armor >= last_armor);
                    prop_assert!(player.speed >= last_speed);
                    prop_assert!(player.jump_power >= last_jump);
                }
                last_armor = player.armor;
                last_speed = player.speed;
                last_jump = player.jump_power;
                last_phase = snap.phase;
            }

            prop_assert!(spike_hits >= 1);
        }
    }
}
