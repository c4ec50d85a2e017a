//! Wall-clock tick driver
//!
//! Turns variable frame deltas into whole fixed ticks using an accumulator.
//! There is no variable-timestep correction: if frames arrive late, ticks are
//! capped per advance and the simulation simply runs slower.

use super::rng::RandomSource;
use super::state::GameEvent;
use super::tick::{Simulation, TickOutcome};
use crate::consts::MAX_FRAME_DT;
use crate::tuning::Tuning;

/// Result of one `advance` call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DriverStep {
    /// Ticks actually run
    pub ticks: u32,
    /// Events from all ticks, in order
    pub events: Vec<GameEvent>,
}

/// Fixed-step driver with a substep cap and explicit stop/resume
#[derive(Debug, Clone)]
pub struct TickDriver {
    dt: f32,
    max_substeps: u32,
    accumulator: f32,
    running: bool,
}

impl TickDriver {
    pub fn new(dt: f32, max_substeps: u32) -> Self {
        Self {
            dt,
            max_substeps: max_substeps.max(1),
            accumulator: 0.0,
            running: true,
        }
    }

    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self::new(tuning.sim_dt(), tuning.max_substeps)
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Cancel the driver. No further ticks run until `resume`.
    pub fn stop(&mut self) {
        if self.running {
            log::debug!("Tick driver stopped");
        }
        self.running = false;
        self.accumulator = 0.0;
    }

    /// Restart after a stop (e.g. once the simulation has been reset)
    pub fn resume(&mut self) {
        if !self.running {
            log::debug!("Tick driver resumed");
        }
        self.running = true;
        self.accumulator = 0.0;
    }

    /// Feed `frame_dt` seconds of wall-clock time and run the ticks it covers.
    ///
    /// Stops itself when the simulation reaches game over.
    pub fn advance<R: RandomSource>(
        &mut self,
        sim: &mut Simulation<R>,
        frame_dt: f32,
    ) -> DriverStep {
        let mut step = DriverStep::default();
        if !self.running {
            return step;
        }

        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

        while self.accumulator >= self.dt && step.ticks < self.max_substeps {
            self.accumulator -= self.dt;
            match sim.tick() {
                TickOutcome::Advanced(events) => {
                    step.ticks += 1;
                    step.events.extend(events);
                }
                TickOutcome::Halted => {}
            }
            if sim.is_game_over() {
                self.stop();
                break;
            }
        }

        step
    }
}
