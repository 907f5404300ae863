//! # Game Loop
//!
//! Fixed-timestep driver around a [`Simulation`].
//!
//! ```text
//! Frame N:
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │ 1. INPUT                                                            │
//! │    └─ poll the source, apply press edges (zoom, select, mine/place) │
//! │                                                                     │
//! │ 2. ACCUMULATE                                                       │
//! │    └─ clamp the frame delta, add it to the accumulator              │
//! │                                                                     │
//! │ 3. STEP (0..=max_steps_per_frame times)                             │
//! │    ├─ player forces, axis passes, gravity, drag                     │
//! │    ├─ camera follow + chunk streaming                               │
//! │    └─ items, floating texts                                         │
//! │                                                                     │
//! │ 4. RECORD                                                           │
//! │    └─ frame statistics                                              │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The render collaborator draws after `frame` returns, from
//! [`crate::render::build_draw_list`].

use std::time::{Duration, Instant};

use tessera_ui::InputSource;
use tracing::{info, warn};

use crate::config::SimulationConfig;
use crate::error::{GameError, GameResult};
use crate::simulation::Simulation;

/// Target frame time for 60 FPS.
pub const TARGET_FRAME_TIME: Duration = Duration::from_micros(16_666);

/// Frame time above which a warning is logged.
pub const MAX_FRAME_TIME: Duration = Duration::from_millis(33);

// ============================================================================
// FIXED TIMESTEP
// ============================================================================

/// Converts variable frame deltas into a whole number of fixed steps.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedTimestep {
    step: f32,
    max_steps: u32,
    max_delta: f32,
    accumulator: f32,
}

impl FixedTimestep {
    /// Creates an accumulator.
    #[must_use]
    pub fn new(step: f32, max_steps: u32, max_delta: f32) -> Self {
        Self {
            step,
            max_steps,
            max_delta,
            accumulator: 0.0,
        }
    }

    /// Accumulator for a `[simulation]` section.
    #[must_use]
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(
            config.step_seconds(),
            config.max_steps_per_frame,
            config.max_frame_delta(),
        )
    }

    /// Seconds per step.
    #[inline]
    #[must_use]
    pub const fn step(&self) -> f32 {
        self.step
    }

    /// Adds a frame delta and returns how many steps to run.
    ///
    /// The delta is clamped to `0..=max_delta`. When the step cap is hit,
    /// whole steps still owed are dropped and only the fraction is kept.
    pub fn advance(&mut self, frame_delta: f32) -> u32 {
        self.accumulator += frame_delta.clamp(0.0, self.max_delta);

        let mut steps = 0;
        while self.accumulator >= self.step && steps < self.max_steps {
            self.accumulator -= self.step;
            steps += 1;
        }
        if self.accumulator >= self.step {
            self.accumulator %= self.step;
        }
        steps
    }

    /// Fraction of a step left in the accumulator, `0..1`.
    #[inline]
    #[must_use]
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.step
    }

    /// Empties the accumulator.
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

// ============================================================================
// STATISTICS
// ============================================================================

/// Timing of one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Frame number.
    pub frame: u64,
    /// Wall time spent in `frame`, microseconds.
    pub total_us: u64,
    /// Wall time spent in fixed steps, microseconds.
    pub simulation_us: u64,
    /// Fixed steps run.
    pub steps: u32,
}

/// Accumulator for frame statistics.
#[derive(Clone, Debug)]
pub struct FrameStatsAccumulator {
    /// Total frames recorded.
    pub frames_recorded: u64,
    /// Sum of total frame times.
    pub total_us_sum: u64,
    /// Sum of step times.
    pub simulation_us_sum: u64,
    /// Sum of fixed steps.
    pub steps_sum: u64,
    /// Min frame time.
    pub min_frame_us: u64,
    /// Max frame time.
    pub max_frame_us: u64,
    /// Frames that exceeded budget.
    pub frames_over_budget: u64,
}

impl FrameStatsAccumulator {
    /// Creates a new accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self {
            frames_recorded: 0,
            total_us_sum: 0,
            simulation_us_sum: 0,
            steps_sum: 0,
            min_frame_us: u64::MAX,
            max_frame_us: 0,
            frames_over_budget: 0,
        }
    }

    /// Records a frame's statistics.
    pub fn record(&mut self, stats: FrameStats) {
        self.frames_recorded += 1;
        self.total_us_sum += stats.total_us;
        self.simulation_us_sum += stats.simulation_us;
        self.steps_sum += u64::from(stats.steps);
        self.min_frame_us = self.min_frame_us.min(stats.total_us);
        self.max_frame_us = self.max_frame_us.max(stats.total_us);

        if stats.total_us > TARGET_FRAME_TIME.as_micros() as u64 {
            self.frames_over_budget += 1;
        }
    }

    /// Returns average frame time in milliseconds.
    #[must_use]
    pub fn avg_frame_ms(&self) -> f64 {
        if self.frames_recorded == 0 {
            return 0.0;
        }
        (self.total_us_sum as f64 / self.frames_recorded as f64) / 1000.0
    }

    /// Returns average FPS.
    #[must_use]
    pub fn avg_fps(&self) -> f64 {
        let avg_ms = self.avg_frame_ms();
        if avg_ms <= 0.0 {
            return 0.0;
        }
        1000.0 / avg_ms
    }

    /// Returns the fraction of frames over budget.
    #[must_use]
    pub fn over_budget_ratio(&self) -> f64 {
        if self.frames_recorded == 0 {
            return 0.0;
        }
        self.frames_over_budget as f64 / self.frames_recorded as f64
    }

    /// Returns average fixed steps per frame.
    #[must_use]
    pub fn avg_steps(&self) -> f64 {
        if self.frames_recorded == 0 {
            return 0.0;
        }
        self.steps_sum as f64 / self.frames_recorded as f64
    }

    /// Logs a summary at `info` level.
    pub fn log_summary(&self) {
        if self.frames_recorded == 0 {
            info!("No frames recorded");
            return;
        }
        info!(
            frames = self.frames_recorded,
            avg_ms = format_args!("{:.3}", self.avg_frame_ms()),
            avg_fps = format_args!("{:.1}", self.avg_fps()),
            min_ms = format_args!("{:.3}", self.min_frame_us as f64 / 1000.0),
            max_ms = format_args!("{:.3}", self.max_frame_us as f64 / 1000.0),
            avg_steps = format_args!("{:.2}", self.avg_steps()),
            over_budget = self.frames_over_budget,
            "Frame statistics"
        );
    }
}

impl Default for FrameStatsAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// LOOP
// ============================================================================

/// Owns the simulation and drives it frame by frame.
pub struct GameLoop {
    simulation: Simulation,
    timestep: FixedTimestep,
    running: bool,
    frame_count: u64,
    stats: FrameStatsAccumulator,
}

impl GameLoop {
    /// Wraps a simulation. The loop starts stopped.
    #[must_use]
    pub fn new(simulation: Simulation) -> Self {
        let timestep = FixedTimestep::from_config(&simulation.config().simulation);
        Self {
            simulation,
            timestep,
            running: false,
            frame_count: 0,
            stats: FrameStatsAccumulator::new(),
        }
    }

    /// Starts the loop.
    ///
    /// # Errors
    ///
    /// Returns `GameError::AlreadyRunning` if the loop is running.
    pub fn start(&mut self) -> GameResult<()> {
        if self.running {
            return Err(GameError::AlreadyRunning);
        }
        self.running = true;
        self.timestep.reset();
        info!(
            tick_rate = self.simulation.config().simulation.tick_rate,
            "Game loop started"
        );
        Ok(())
    }

    /// Runs one frame: input, then as many fixed steps as `delta` pays for.
    ///
    /// # Errors
    ///
    /// Returns `GameError::NotRunning` if the loop is stopped.
    pub fn frame(&mut self, input: &mut dyn InputSource, delta: f32) -> GameResult<FrameStats> {
        if !self.running {
            return Err(GameError::NotRunning);
        }
        let frame_start = Instant::now();

        self.simulation.handle_input(input);

        let steps = self.timestep.advance(delta);
        let step_start = Instant::now();
        for _ in 0..steps {
            self.simulation.step(self.timestep.step());
        }
        let simulation_us = step_start.elapsed().as_micros() as u64;

        let stats = FrameStats {
            frame: self.frame_count,
            total_us: frame_start.elapsed().as_micros() as u64,
            simulation_us,
            steps,
        };
        self.frame_count += 1;
        self.stats.record(stats);

        if stats.total_us > MAX_FRAME_TIME.as_micros() as u64 {
            warn!(
                frame = stats.frame,
                ms = format_args!("{:.2}", stats.total_us as f64 / 1000.0),
                "Frame exceeded budget"
            );
        }

        Ok(stats)
    }

    /// Stops the loop and drops any partial step.
    ///
    /// # Errors
    ///
    /// Returns `GameError::NotRunning` if the loop is already stopped.
    pub fn stop(&mut self) -> GameResult<()> {
        if !self.running {
            return Err(GameError::NotRunning);
        }
        self.running = false;
        self.timestep.reset();
        info!(frames = self.frame_count, "Game loop stopped");
        self.stats.log_summary();
        Ok(())
    }

    /// True between `start` and `stop`.
    #[inline]
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Frames run so far.
    #[inline]
    #[must_use]
    pub const fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Accumulated statistics.
    #[must_use]
    pub const fn stats(&self) -> &FrameStatsAccumulator {
        &self.stats
    }

    /// The simulation.
    #[must_use]
    pub const fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    /// The simulation, mutable.
    pub fn simulation_mut(&mut self) -> &mut Simulation {
        &mut self.simulation
    }

    /// Releases the simulation.
    #[must_use]
    pub fn into_simulation(self) -> Simulation {
        self.simulation
    }
}
