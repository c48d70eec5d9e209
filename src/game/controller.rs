//! The match controller: the single state machine that owns the grid.
//!
//! The controller receives commands, runs the rule engine for the current
//! mode, and exposes read-only projections. Every command validates before
//! it mutates, so a rejected call leaves grid and state untouched.

use std::sync::mpsc::Receiver;
use std::time::Duration;

use tracing::{debug, info, trace};

use super::events::{EventBus, MatchEvent, SubscriberId};
use super::snapshot::MatchSnapshot;
use super::state::MatchState;
use crate::core::{
    Command, MatchConfig, Mode, Phase, PlacementError, Scores, Side, SideMap, SimError,
    SimResult, SimRng,
};
use crate::grid::{Cell, Grid, NamedPattern, Neighborhood};
use crate::rules::engine_for;

/// Summary of one computed generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepReport {
    /// Generation number after the step.
    pub generation: u64,
    /// Points earned by each side during this step.
    pub captured: Scores,
    /// Live cells after the step.
    pub population: usize,
}

/// What the automatic loop should do after a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Keep stepping.
    Continue(StepReport),
    /// The board emptied and the run stopped.
    Finished(StepReport),
}

/// Owns the grid, match state and random source.
#[derive(Debug)]
pub struct MatchController {
    config: MatchConfig,
    grid: Grid,
    state: MatchState,
    rng: SimRng,
    step_interval: Duration,
    events: EventBus,
}

impl MatchController {
    /// Create a classic-mode controller with an empty grid.
    pub fn new(config: MatchConfig) -> SimResult<Self> {
        config.validate()?;
        let grid = Grid::new(config.width, config.height)?;
        Ok(Self {
            rng: SimRng::new(config.seed),
            step_interval: config.step_interval,
            grid,
            state: MatchState::default(),
            events: EventBus::new(),
            config,
        })
    }

    fn reject(&self, command: Command) -> SimError {
        debug!(%command, mode = %self.state.mode, phase = %self.state.phase, "command rejected");
        SimError::IllegalTransition {
            command,
            mode: self.state.mode,
            phase: self.state.phase,
        }
    }

    fn set_phase(&mut self, to: Phase) {
        let from = self.state.phase;
        if from == to {
            return;
        }
        info!(mode = %self.state.mode, %from, %to, "phase changed");
        self.state.phase = to;
        self.events.publish(MatchEvent::PhaseChanged { from, to });
    }

    fn require_classic(&self, command: Command) -> SimResult<()> {
        if self.state.mode == Mode::Classic {
            Ok(())
        } else {
            Err(self.reject(command))
        }
    }

    /// Stop a classic run before a direct edit.
    fn pause_classic_run(&mut self) {
        if self.state.mode == Mode::Classic && self.state.phase == Phase::Running {
            self.set_phase(Phase::Idle);
        }
    }

    /// Reset battle bookkeeping and return to placement. The grid is kept.
    fn restart_match(&mut self) {
        self.state.scores = Scores::default();
        self.state.placed = SideMap::default();
        self.state.generation = 0;
        if self.state.turn != Side::White {
            self.state.turn = Side::White;
            self.events.publish(MatchEvent::TurnChanged { turn: Side::White });
        }
        self.set_phase(Phase::Placing);
    }

    fn grid_reset(&mut self) {
        self.events.publish(MatchEvent::GridReset {
            width: self.grid.width(),
            height: self.grid.height(),
        });
    }

    fn advance(&mut self) -> StepReport {
        let engine = engine_for(self.state.mode);
        let next = engine.advance(&self.grid, &mut self.rng);

        self.grid = next.grid;
        self.state.generation += 1;
        for (side, &points) in next.captured.iter() {
            self.state.scores[side] += points;
        }

        let report = StepReport {
            generation: self.state.generation,
            captured: next.captured,
            population: self.grid.population(),
        };
        debug!(
            generation = report.generation,
            population = report.population,
            white = self.state.scores[Side::White],
            black = self.state.scores[Side::Black],
            "generation computed"
        );
        self.events.publish(MatchEvent::GenerationAdvanced {
            generation: report.generation,
            population: report.population,
            scores: self.state.scores,
        });
        report
    }

    // === Commands ===

    /// Rebuild the grid with new dimensions.
    ///
    /// Stops any run. Battle mode restarts the match in the placement phase.
    pub fn resize(&mut self, width: i32, height: i32) -> SimResult<()> {
        let grid = Grid::new(width, height)?;
        info!(width, height, "grid resized");
        self.grid = grid;
        match self.state.mode {
            Mode::Classic => {
                self.state.generation = 0;
                self.set_phase(Phase::Idle);
            }
            Mode::Battle => self.restart_match(),
        }
        self.grid_reset();
        Ok(())
    }

    /// Fill the grid at random (classic mode only).
    pub fn randomize(&mut self, alive_probability: f64) -> SimResult<()> {
        self.require_classic(Command::Randomize)?;
        if !(0.0..=1.0).contains(&alive_probability) {
            return Err(SimError::InvalidProbability(alive_probability));
        }
        self.pause_classic_run();
        self.grid.randomize(alive_probability, &mut self.rng)?;
        trace!(alive_probability, population = self.grid.population(), "grid randomized");
        self.events.publish(MatchEvent::CellsEdited {
            command: Command::Randomize,
        });
        Ok(())
    }

    /// Fill the grid with the configured default probability.
    pub fn randomize_default(&mut self) -> SimResult<()> {
        self.randomize(self.config.fill_probability)
    }

    /// Stamp a catalog pattern with its top-left corner at `(x, y)`
    /// (classic mode only). Returns the number of cells written.
    pub fn stamp_pattern(&mut self, pattern: NamedPattern, x: i32, y: i32) -> SimResult<usize> {
        self.require_classic(Command::StampPattern)?;
        self.pause_classic_run();
        let written = self.grid.stamp(&pattern.pattern(), x, y);
        trace!(%pattern, x, y, written, "pattern stamped");
        self.events.publish(MatchEvent::CellsEdited {
            command: Command::StampPattern,
        });
        Ok(written)
    }

    /// Stamp a catalog pattern looked up by name.
    pub fn stamp_named(&mut self, name: &str, x: i32, y: i32) -> SimResult<usize> {
        let pattern = name.parse::<NamedPattern>()?;
        self.stamp_pattern(pattern, x, y)
    }

    /// Set one cell alive or dead (classic mode only).
    pub fn set_cell(&mut self, x: i32, y: i32, alive: bool) -> SimResult<()> {
        self.require_classic(Command::SetCell)?;
        self.grid.get(x, y)?;
        self.pause_classic_run();
        self.grid.set(x, y, Cell::from_alive(alive))?;
        trace!(x, y, alive, "cell set");
        self.events.publish(MatchEvent::CellsEdited {
            command: Command::SetCell,
        });
        Ok(())
    }

    /// Flip one cell (classic mode only). Returns the new alive flag.
    pub fn toggle_cell(&mut self, x: i32, y: i32) -> SimResult<bool> {
        self.require_classic(Command::SetCell)?;
        let alive = !self.grid.get(x, y)?.is_alive();
        self.set_cell(x, y, alive)?;
        Ok(alive)
    }

    /// Kill every cell.
    ///
    /// Rejected while a battle is running. In battle mode the match restarts.
    pub fn clear(&mut self) -> SimResult<()> {
        if self.state.mode == Mode::Battle && self.state.phase == Phase::Running {
            return Err(self.reject(Command::Clear));
        }
        self.grid.clear();
        match self.state.mode {
            Mode::Classic => {
                self.state.generation = 0;
                self.set_phase(Phase::Idle);
            }
            Mode::Battle => self.restart_match(),
        }
        self.grid_reset();
        Ok(())
    }

    /// Compute exactly one generation on request.
    ///
    /// Rejected during placement and while the automatic loop is running.
    pub fn step(&mut self) -> SimResult<StepReport> {
        if matches!(self.state.phase, Phase::Placing | Phase::Running) {
            return Err(self.reject(Command::Step));
        }
        Ok(self.advance())
    }

    /// One iteration of the automatic loop. Only valid while running.
    ///
    /// Stops the run when the board is empty: battle goes to `Ended`,
    /// classic back to `Idle`.
    pub fn tick(&mut self) -> SimResult<TickOutcome> {
        if self.state.phase != Phase::Running {
            return Err(self.reject(Command::Tick));
        }
        let report = self.advance();
        if !self.grid.is_empty() {
            return Ok(TickOutcome::Continue(report));
        }
        match self.state.mode {
            Mode::Classic => self.set_phase(Phase::Idle),
            Mode::Battle => {
                info!(
                    white = self.state.scores[Side::White],
                    black = self.state.scores[Side::Black],
                    generations = self.state.generation,
                    "battle over"
                );
                self.set_phase(Phase::Ended);
            }
        }
        Ok(TickOutcome::Finished(report))
    }

    /// Begin automatic stepping (classic mode, from `Idle`).
    pub fn start(&mut self) -> SimResult<()> {
        if self.state.mode != Mode::Classic || self.state.phase != Phase::Idle {
            return Err(self.reject(Command::Start));
        }
        self.set_phase(Phase::Running);
        Ok(())
    }

    /// Halt automatic stepping. A halted battle is over.
    pub fn pause(&mut self) -> SimResult<()> {
        if self.state.phase != Phase::Running {
            return Err(self.reject(Command::Pause));
        }
        let to = match self.state.mode {
            Mode::Classic => Phase::Idle,
            Mode::Battle => Phase::Ended,
        };
        self.set_phase(to);
        Ok(())
    }

    /// Switch rule set, clearing the grid and resetting the match.
    ///
    /// Rejected while running.
    pub fn set_mode(&mut self, mode: Mode) -> SimResult<()> {
        if self.state.phase == Phase::Running {
            return Err(self.reject(Command::SetMode));
        }
        info!(from = %self.state.mode, to = %mode, "mode changed");
        let from_phase = self.state.phase;
        self.grid.clear();
        self.state = MatchState::new(mode);
        self.events.publish(MatchEvent::ModeChanged { mode });
        if from_phase != self.state.phase {
            self.events.publish(MatchEvent::PhaseChanged {
                from: from_phase,
                to: self.state.phase,
            });
        }
        self.grid_reset();
        Ok(())
    }

    /// Switch to the other rule set.
    pub fn toggle_mode(&mut self) -> SimResult<()> {
        self.set_mode(self.state.mode.toggled())
    }

    /// Place a stone for `side` during battle placement.
    ///
    /// The final stone of the cap starts the battle; otherwise the turn
    /// passes to the other side. Returns the phase after the placement.
    pub fn place_stone(&mut self, side: Side, x: i32, y: i32) -> SimResult<Phase> {
        if self.state.mode != Mode::Battle || self.state.phase != Phase::Placing {
            return Err(self.reject(Command::PlaceStone));
        }
        if self.grid.get(x, y)?.is_alive() {
            return Err(PlacementError::Occupied.into());
        }
        if side != self.state.turn {
            return Err(PlacementError::WrongTurn {
                expected: self.state.turn,
                got: side,
            }
            .into());
        }

        self.grid.set(x, y, Cell::owned(side))?;
        self.state.placed[side] += 1;
        trace!(%side, x, y, placed = self.state.placed[side], "stone placed");
        self.events.publish(MatchEvent::StonePlaced { side, x, y });

        let cap = 2 * u64::from(self.config.max_placed_per_side);
        if u64::from(self.state.placed_total()) >= cap {
            self.set_phase(Phase::Running);
        } else {
            self.state.turn = side.opponent();
            self.events.publish(MatchEvent::TurnChanged {
                turn: self.state.turn,
            });
        }
        Ok(self.state.phase)
    }

    /// Start a new battle: scores and placements reset, White to move.
    ///
    /// Valid in battle mode from `Placing` or `Ended`.
    pub fn restart_battle(&mut self) -> SimResult<()> {
        if self.state.mode != Mode::Battle || self.state.phase == Phase::Running {
            return Err(self.reject(Command::RestartBattle));
        }
        info!("battle restarted");
        self.restart_match();
        Ok(())
    }

    /// Set the automatic step interval in seconds.
    pub fn set_speed(&mut self, seconds: f64) -> SimResult<()> {
        if !(seconds.is_finite() && seconds > 0.0) {
            return Err(SimError::InvalidSpeed(seconds));
        }
        self.step_interval =
            Duration::try_from_secs_f64(seconds).map_err(|_| SimError::InvalidSpeed(seconds))?;
        debug!(seconds, "step interval changed");
        Ok(())
    }

    // === Observers ===

    /// Register for change notifications.
    pub fn subscribe(&mut self) -> (SubscriberId, Receiver<MatchEvent>) {
        self.events.subscribe()
    }

    /// Stop receiving change notifications.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        self.events.unsubscribe(id)
    }

    // === Queries ===

    pub fn cell_at(&self, x: i32, y: i32) -> SimResult<Cell> {
        self.grid.get(x, y)
    }

    pub fn neighbor_count_at(&self, x: i32, y: i32) -> SimResult<u8> {
        self.grid.count_alive_neighbors(x, y)
    }

    pub fn neighborhood_at(&self, x: i32, y: i32) -> SimResult<Neighborhood> {
        self.grid.neighborhood(x, y)
    }

    #[must_use]
    pub fn scores(&self) -> Scores {
        self.state.scores
    }

    /// Side ahead on points, `None` when level.
    #[must_use]
    pub fn leader(&self) -> Option<Side> {
        self.state.scores.leader()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    #[must_use]
    pub fn turn(&self) -> Side {
        self.state.turn
    }

    #[must_use]
    pub fn placed(&self) -> SideMap<u32> {
        self.state.placed
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.state.generation
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.grid.height()
    }

    #[must_use]
    pub fn step_interval(&self) -> Duration {
        self.step_interval
    }

    #[must_use]
    pub fn battle_cooldown(&self) -> Duration {
        self.config.battle_cooldown
    }

    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// Frozen copy of grid and state; O(1).
    #[must_use]
    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            grid: self.grid.clone(),
            state: self.state.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> MatchController {
        MatchController::new(MatchConfig::default().with_size(6, 6).with_max_placed(2)).unwrap()
    }

    #[test]
    fn test_new_rejects_bad_config() {
        assert!(MatchController::new(MatchConfig::default().with_size(-3, 4)).is_err());
    }

    #[test]
    fn test_new_rejects_oversized_placement_cap() {
        let config = MatchConfig::default().with_max_placed(u32::MAX);
        assert!(matches!(MatchController::new(config), Err(SimError::InvalidConfig(_))));
    }

    #[test]
    fn test_largest_cap_places_without_overflow() {
        let config = MatchConfig::default()
            .with_size(4, 4)
            .with_max_placed(u32::MAX / 2);
        let mut ctrl = MatchController::new(config).unwrap();
        ctrl.set_mode(Mode::Battle).unwrap();

        assert_eq!(ctrl.place_stone(Side::White, 0, 0), Ok(Phase::Placing));
        assert_eq!(ctrl.place_stone(Side::Black, 1, 0), Ok(Phase::Placing));
    }

    #[test]
    fn test_classic_start_pause_step() {
        let mut ctrl = controller();
        ctrl.stamp_pattern(NamedPattern::Blinker, 1, 2).unwrap();

        ctrl.start().unwrap();
        assert_eq!(ctrl.phase(), Phase::Running);
        assert!(matches!(
            ctrl.step(),
            Err(SimError::IllegalTransition { command: Command::Step, .. })
        ));
        assert!(ctrl.start().is_err());

        ctrl.pause().unwrap();
        assert_eq!(ctrl.phase(), Phase::Idle);
        let report = ctrl.step().unwrap();
        assert_eq!(report.generation, 1);
        assert_eq!(report.population, 3);
        assert_eq!(report.captured.total(), 0);
        assert!(ctrl.pause().is_err());
    }

    #[test]
    fn test_tick_requires_running() {
        let mut ctrl = controller();
        assert!(ctrl.tick().is_err());
    }

    #[test]
    fn test_classic_tick_stops_on_empty_board() {
        let mut ctrl = controller();
        ctrl.set_cell(2, 2, true).unwrap();
        ctrl.start().unwrap();

        let outcome = ctrl.tick().unwrap();
        assert!(matches!(outcome, TickOutcome::Finished(r) if r.population == 0));
        assert_eq!(ctrl.phase(), Phase::Idle);
    }

    #[test]
    fn test_edit_pauses_classic_run() {
        let mut ctrl = controller();
        ctrl.start().unwrap();
        assert!(ctrl.toggle_cell(0, 0).unwrap());
        assert_eq!(ctrl.phase(), Phase::Idle);
        assert!(!ctrl.toggle_cell(0, 0).unwrap());
    }

    #[test]
    fn test_rejected_edit_keeps_running() {
        let mut ctrl = controller();
        ctrl.start().unwrap();
        assert!(ctrl.set_cell(9, 9, true).is_err());
        assert!(ctrl.randomize(2.0).is_err());
        assert_eq!(ctrl.phase(), Phase::Running);
    }

    #[test]
    fn test_set_speed() {
        let mut ctrl = controller();
        ctrl.set_speed(0.05).unwrap();
        assert_eq!(ctrl.step_interval(), Duration::from_millis(50));

        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(ctrl.set_speed(bad), Err(SimError::InvalidSpeed(_))));
        }
        assert_eq!(ctrl.step_interval(), Duration::from_millis(50));
    }

    #[test]
    fn test_battle_rejects_classic_edits() {
        let mut ctrl = controller();
        ctrl.toggle_mode().unwrap();

        assert!(ctrl.randomize(0.5).is_err());
        assert!(ctrl.stamp_pattern(NamedPattern::Glider, 0, 0).is_err());
        assert!(ctrl.set_cell(0, 0, true).is_err());
        assert!(ctrl.start().is_err());
        assert!(ctrl.grid().is_empty());
    }

    #[test]
    fn test_placement_turns_and_cap() {
        let mut ctrl = controller();
        ctrl.set_mode(Mode::Battle).unwrap();

        assert_eq!(ctrl.place_stone(Side::White, 0, 0), Ok(Phase::Placing));
        assert_eq!(ctrl.turn(), Side::Black);
        assert_eq!(
            ctrl.place_stone(Side::White, 1, 0),
            Err(SimError::InvalidPlacement(PlacementError::WrongTurn {
                expected: Side::Black,
                got: Side::White,
            }))
        );
        assert_eq!(
            ctrl.place_stone(Side::Black, 0, 0),
            Err(SimError::InvalidPlacement(PlacementError::Occupied))
        );
        assert!(matches!(ctrl.place_stone(Side::Black, 6, 0), Err(SimError::OutOfBounds { .. })));

        assert_eq!(ctrl.place_stone(Side::Black, 1, 0), Ok(Phase::Placing));
        assert_eq!(ctrl.place_stone(Side::White, 2, 0), Ok(Phase::Placing));
        assert_eq!(ctrl.place_stone(Side::Black, 3, 0), Ok(Phase::Running));
        assert_eq!(ctrl.placed()[Side::White], 2);
        assert_eq!(ctrl.placed()[Side::Black], 2);

        assert!(ctrl.place_stone(Side::White, 4, 4).is_err());
    }

    #[test]
    fn test_mode_switch_rejected_while_running() {
        let mut ctrl = controller();
        ctrl.start().unwrap();
        assert!(matches!(
            ctrl.toggle_mode(),
            Err(SimError::IllegalTransition { command: Command::SetMode, .. })
        ));
        assert_eq!(ctrl.mode(), Mode::Classic);
    }

    #[test]
    fn test_events_are_published() {
        let mut ctrl = controller();
        let (_, rx) = ctrl.subscribe();

        ctrl.set_mode(Mode::Battle).unwrap();
        ctrl.place_stone(Side::White, 1, 1).unwrap();

        let events: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            events,
            vec![
                MatchEvent::ModeChanged { mode: Mode::Battle },
                MatchEvent::PhaseChanged { from: Phase::Idle, to: Phase::Placing },
                MatchEvent::GridReset { width: 6, height: 6 },
                MatchEvent::StonePlaced { side: Side::White, x: 1, y: 1 },
                MatchEvent::TurnChanged { turn: Side::Black },
            ]
        );
    }
}
