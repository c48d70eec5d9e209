//! Host facade for a renderer or input layer.
//!
//! `Session` owns the shared controller and the runner handle. It forwards
//! commands, spawns the runner when a command puts the match into
//! `Running`, and stops it when a command cancels the run.

use std::sync::mpsc::Receiver;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;

use super::runner::{lock, spawn_runner, RunHandle};
use crate::core::{MatchConfig, Mode, Phase, Scores, Side, SimResult};
use crate::game::{MatchController, MatchEvent, MatchSnapshot, StepReport, SubscriberId};
use crate::grid::{Cell, NamedPattern};

/// A controller plus its automatic loop.
///
/// ## Usage
///
/// ```
/// use battle_life::core::{MatchConfig, Phase};
/// use battle_life::grid::NamedPattern;
/// use battle_life::runtime::Session;
///
/// let mut session = Session::new(MatchConfig::default()).unwrap();
/// session.stamp_pattern(NamedPattern::Glider, 0, 0).unwrap();
/// session.step().unwrap();
/// assert_eq!(session.phase(), Phase::Idle);
/// ```
pub struct Session {
    controller: Arc<Mutex<MatchController>>,
    runner: Option<RunHandle>,
}

impl Session {
    pub fn new(config: MatchConfig) -> SimResult<Self> {
        Ok(Self::from_controller(MatchController::new(config)?))
    }

    /// Host an already constructed controller.
    #[must_use]
    pub fn from_controller(controller: MatchController) -> Self {
        Self {
            controller: Arc::new(Mutex::new(controller)),
            runner: None,
        }
    }

    /// Shared controller, for hosts that want to lock it directly.
    #[must_use]
    pub fn controller(&self) -> Arc<Mutex<MatchController>> {
        Arc::clone(&self.controller)
    }

    fn ctrl(&self) -> MutexGuard<'_, MatchController> {
        lock(&self.controller)
    }

    /// Run `command` on the controller, then reconcile the runner with the
    /// resulting phase. The lock is released before any join.
    fn apply<T>(
        &mut self,
        restart_runner: bool,
        command: impl FnOnce(&mut MatchController) -> SimResult<T>,
    ) -> SimResult<T> {
        let (result, phase) = {
            let mut ctrl = self.ctrl();
            let result = command(&mut ctrl);
            (result, ctrl.phase())
        };
        let value = result?;
        if restart_runner && phase == Phase::Running {
            self.stop_runner();
            debug!("spawning runner");
            self.runner = Some(spawn_runner(self.controller()));
        }
        Ok(value)
    }

    /// Run a command that cancels any automatic loop, including a pending
    /// post-battle restart.
    fn apply_cancelling<T>(
        &mut self,
        command: impl FnOnce(&mut MatchController) -> SimResult<T>,
    ) -> SimResult<T> {
        let value = {
            let mut ctrl = self.ctrl();
            command(&mut ctrl)?
        };
        self.stop_runner();
        Ok(value)
    }

    fn stop_runner(&mut self) {
        if let Some(runner) = self.runner.take() {
            runner.stop();
        }
    }

    // === Commands ===

    pub fn resize(&mut self, width: i32, height: i32) -> SimResult<()> {
        self.apply_cancelling(|c| c.resize(width, height))
    }

    pub fn randomize(&mut self, alive_probability: f64) -> SimResult<()> {
        self.apply_cancelling(|c| c.randomize(alive_probability))
    }

    pub fn stamp_pattern(&mut self, pattern: NamedPattern, x: i32, y: i32) -> SimResult<usize> {
        self.apply_cancelling(|c| c.stamp_pattern(pattern, x, y))
    }

    pub fn stamp_named(&mut self, name: &str, x: i32, y: i32) -> SimResult<usize> {
        self.apply_cancelling(|c| c.stamp_named(name, x, y))
    }

    pub fn set_cell(&mut self, x: i32, y: i32, alive: bool) -> SimResult<()> {
        self.apply_cancelling(|c| c.set_cell(x, y, alive))
    }

    pub fn toggle_cell(&mut self, x: i32, y: i32) -> SimResult<bool> {
        self.apply_cancelling(|c| c.toggle_cell(x, y))
    }

    pub fn clear(&mut self) -> SimResult<()> {
        self.apply_cancelling(MatchController::clear)
    }

    pub fn step(&mut self) -> SimResult<StepReport> {
        self.apply(false, MatchController::step)
    }

    /// Begin automatic stepping (classic mode).
    pub fn start(&mut self) -> SimResult<()> {
        self.apply(true, MatchController::start)
    }

    /// Halt automatic stepping.
    ///
    /// A paused battle is over; the runner stays alive to restart it after
    /// the cooldown. A classic run stops immediately.
    pub fn pause(&mut self) -> SimResult<()> {
        let mode = self.ctrl().mode();
        match mode {
            Mode::Classic => self.apply_cancelling(MatchController::pause),
            Mode::Battle => self.apply(false, MatchController::pause),
        }
    }

    pub fn set_speed(&mut self, seconds: f64) -> SimResult<()> {
        self.apply(false, |c| c.set_speed(seconds))
    }

    pub fn set_mode(&mut self, mode: Mode) -> SimResult<()> {
        self.apply_cancelling(|c| c.set_mode(mode))
    }

    pub fn toggle_mode(&mut self) -> SimResult<()> {
        self.apply_cancelling(MatchController::toggle_mode)
    }

    /// Place a battle stone; the final stone starts the battle loop.
    pub fn place_stone(&mut self, side: Side, x: i32, y: i32) -> SimResult<Phase> {
        self.apply(true, |c| c.place_stone(side, x, y))
    }

    pub fn restart_battle(&mut self) -> SimResult<()> {
        self.apply_cancelling(MatchController::restart_battle)
    }

    // === Queries ===

    pub fn cell_at(&self, x: i32, y: i32) -> SimResult<Cell> {
        self.ctrl().cell_at(x, y)
    }

    pub fn neighbor_count_at(&self, x: i32, y: i32) -> SimResult<u8> {
        self.ctrl().neighbor_count_at(x, y)
    }

    #[must_use]
    pub fn scores(&self) -> Scores {
        self.ctrl().scores()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.ctrl().phase()
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.ctrl().mode()
    }

    #[must_use]
    pub fn snapshot(&self) -> MatchSnapshot {
        self.ctrl().snapshot()
    }

    pub fn subscribe(&self) -> (SubscriberId, Receiver<MatchEvent>) {
        self.ctrl().subscribe()
    }

    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        self.ctrl().unsubscribe(id)
    }

    /// True while the automatic loop (or a post-battle cooldown) is active.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.runner.as_ref().is_some_and(|r| !r.is_finished())
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.stop_runner();
    }
}
