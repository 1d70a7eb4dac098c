//! Game loop scheduling and the run state machine
//!
//! `Idle -> Running` on start, `Running <-> Paused` through the menu,
//! `Running | Paused -> Ended` on a terminal tick or an explicit stop. Ticks
//! run one at a time; a direction pushed mid-tick waits for the next one.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::consts::{MAX_FRAME_DT, MAX_TICKS_PER_ADVANCE};
use crate::platform::DirectionSlot;
use crate::score::{BestScoreStore, ScoreTracker};
use crate::settings::Settings;
use crate::sim::{
    Collectible, EndReason, GameEvent, GameState, Mode, Position, TickInput, tick,
};

/// Loop state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LoopState {
    /// No run started yet
    Idle,
    Running,
    /// Menu shown; the run is frozen at a tick boundary
    Paused,
    Ended,
}

/// Everything the render collaborator needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    /// Head first
    pub snake: Vec<Position>,
    pub collectibles: Vec<Collectible>,
    pub walls: Vec<Position>,
    pub score: u32,
    pub best_score: u32,
    pub mode: Mode,
    pub tick_rate: f32,
    pub loop_state: LoopState,
    pub end_reason: Option<EndReason>,
}

impl Frame {
    pub fn capture(state: &GameState, best_score: u32, loop_state: LoopState) -> Self {
        Self {
            snake: state.snake.segments().collect(),
            collectibles: state.collectibles.clone(),
            walls: state.walls.clone(),
            score: state.score,
            best_score,
            mode: state.mode,
            tick_rate: state.tick_rate,
            loop_state,
            end_reason: state.end_reason,
        }
    }
}

/// Render collaborator, called once per tick and once on reset
pub trait RenderSink {
    fn render(&mut self, frame: &Frame);
}

impl<F: FnMut(&Frame)> RenderSink for F {
    fn render(&mut self, frame: &Frame) {
        self(frame)
    }
}

/// Fixed-rate driver for runs
pub struct GameLoop<R: RenderSink> {
    settings: Settings,
    selected_mode: Mode,
    state: Option<GameState>,
    loop_state: LoopState,
    scores: ScoreTracker,
    input: DirectionSlot,
    autopilot: bool,
    accumulator: f32,
    seeds: Pcg32,
    renderer: R,
}

impl<R: RenderSink> GameLoop<R> {
    pub fn new(settings: Settings, store: Box<dyn BestScoreStore>, renderer: R) -> Self {
        let master_seed = settings.seed.unwrap_or_else(rand::random);
        Self {
            selected_mode: settings.mode,
            settings,
            state: None,
            loop_state: LoopState::Idle,
            scores: ScoreTracker::new(store),
            input: DirectionSlot::new(),
            autopilot: false,
            accumulator: 0.0,
            seeds: Pcg32::seed_from_u64(master_seed),
            renderer,
        }
    }

    /// Handle for the input collaborator; clones share one pending slot
    pub fn input(&self) -> DirectionSlot {
        self.input.clone()
    }

    /// Choose the mode for the next run; the current run keeps its mode
    pub fn select_mode(&mut self, mode: Mode) {
        self.selected_mode = mode;
    }

    /// Mode selection by name; unknown names select classic
    pub fn select_mode_by_name(&mut self, name: &str) {
        self.select_mode(Mode::from_name_or_default(name));
    }

    pub fn selected_mode(&self) -> Mode {
        self.selected_mode
    }

    pub fn set_autopilot(&mut self, enabled: bool) {
        self.autopilot = enabled;
    }

    pub fn loop_state(&self) -> LoopState {
        self.loop_state
    }

    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    pub fn best_score(&self) -> u32 {
        self.scores.best()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Current drawable state, if a run exists
    pub fn frame(&self) -> Option<Frame> {
        self.state
            .as_ref()
            .map(|s| Frame::capture(s, self.scores.best(), self.loop_state))
    }

    /// Start a fresh run with the selected mode, replacing any current run
    pub fn start(&mut self) {
        let seed = self.seeds.next_u64();
        let mut state = GameState::new(self.selected_mode, seed);
        state.tick_rate = self.settings.effective_tick_rate();

        log::info!(
            "Run started: mode={}, seed={seed}, tick_rate={:.1}/s",
            state.mode,
            state.tick_rate
        );

        self.loop_state = if state.running {
            LoopState::Running
        } else {
            LoopState::Ended
        };
        self.state = Some(state);
        self.input.clear();
        self.accumulator = 0.0;
        self.render();
    }

    /// End the current run from outside (exit button, end of session)
    pub fn stop(&mut self) {
        if !matches!(self.loop_state, LoopState::Running | LoopState::Paused) {
            return;
        }
        if let Some(state) = self.state.as_mut() {
            state.finish(EndReason::Stopped);
        }
        self.end_run();
        self.render();
    }

    /// Alias kept for UI wiring that speaks of ending a game
    pub fn end_game(&mut self) {
        self.stop();
    }

    /// Show (pause) or hide (resume) the menu.
    ///
    /// No-die runs can last forever, so showing the menu also saves the best
    /// score.
    pub fn toggle_menu(&mut self, show: bool) {
        match (self.loop_state, show) {
            (LoopState::Running, true) => {
                self.loop_state = LoopState::Paused;
                if let Some(state) = &self.state {
                    if state.mode == Mode::NoDie {
                        self.scores.commit(state.score);
                    }
                }
                log::info!("Paused");
            }
            (LoopState::Paused, false) => {
                self.loop_state = LoopState::Running;
                self.accumulator = 0.0;
                log::info!("Resumed");
            }
            _ => {}
        }
    }

    /// Feed elapsed wall time (seconds) and run every tick that is due.
    ///
    /// Returns the number of ticks run.
    pub fn advance(&mut self, dt: f32) -> u32 {
        if self.loop_state != LoopState::Running {
            return 0;
        }
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut ticks = 0;
        while ticks < MAX_TICKS_PER_ADVANCE {
            let Some(interval) = self.tick_interval() else {
                break;
            };
            if self.accumulator < interval {
                break;
            }
            self.accumulator -= interval;
            self.step();
            ticks += 1;
            if self.loop_state != LoopState::Running {
                break;
            }
        }
        // Time beyond the per-call cap is dropped, keeping at most one tick owed
        if let Some(interval) = self.tick_interval() {
            self.accumulator = self.accumulator.min(interval);
        }
        ticks
    }

    /// Seconds between ticks at the current run's rate
    pub fn tick_interval(&self) -> Option<f32> {
        self.state.as_ref().map(|s| 1.0 / s.tick_rate)
    }

    /// Run exactly one tick now, regardless of elapsed time
    pub fn step(&mut self) -> Vec<GameEvent> {
        if self.loop_state != LoopState::Running {
            return Vec::new();
        }
        let Some(state) = self.state.as_mut() else {
            return Vec::new();
        };

        let input = TickInput {
            direction: self.input.take(),
            autopilot: self.autopilot,
        };
        let events = tick(state, &input);

        if !state.running {
            self.end_run();
        }
        self.render();
        events
    }

    fn end_run(&mut self) {
        self.loop_state = LoopState::Ended;
        self.accumulator = 0.0;
        if let Some(state) = &self.state {
            log::info!(
                "Run ended: {:?}, score {} after {} ticks",
                state.end_reason,
                state.score,
                state.time_ticks
            );
            self.scores.commit(state.score);
        }
    }

    fn render(&mut self) {
        if let Some(frame) = self.frame() {
            self.renderer.render(&frame);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::INITIAL_TICK_RATE;
    use crate::score::MemoryStore;
    use crate::sim::{CollisionKind, Direction};

    /// Keeps every frame it is handed
    #[derive(Default)]
    struct Recorder(Vec<Frame>);

    impl RenderSink for Recorder {
        fn render(&mut self, frame: &Frame) {
            self.0.push(frame.clone());
        }
    }

    fn new_loop(mode: Mode) -> GameLoop<Recorder> {
        let settings = Settings {
            seed: Some(17),
            ..Settings::for_mode(mode)
        };
        GameLoop::new(settings, Box::new(MemoryStore::new(0)), Recorder::default())
    }

    #[test]
    fn test_idle_until_started() {
        let mut game = new_loop(Mode::Classic);
        assert_eq!(game.loop_state(), LoopState::Idle);
        assert_eq!(game.advance(1.0), 0);
        assert!(game.step().is_empty());
        assert!(game.renderer().0.is_empty());
    }

    #[test]
    fn test_start_renders_initial_frame() {
        let mut game = new_loop(Mode::Classic);
        game.start();
        assert_eq!(game.loop_state(), LoopState::Running);
        let frames = &game.renderer().0;
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].snake, vec![Position::new(1, 10), Position::new(0, 10)]);
        assert_eq!(frames[0].score, 0);
    }

    #[test]
    fn test_advance_runs_due_ticks_only() {
        let mut game = new_loop(Mode::Classic);
        game.start();
        // 10 ticks/s: 0.05s is not enough, another 0.06s is
        assert_eq!(game.advance(0.05), 0);
        assert_eq!(game.advance(0.06), 1);
        assert_eq!(game.state().map(|s| s.time_ticks), Some(1));
    }

    #[test]
    fn test_advance_caps_ticks_per_call() {
        let mut settings = Settings::for_mode(Mode::NoDie);
        settings.seed = Some(1);
        settings.initial_tick_rate = 1000.0;
        let mut game = GameLoop::new(settings, Box::new(MemoryStore::default()), |_: &Frame| {});
        game.start();
        assert_eq!(game.advance(0.25), MAX_TICKS_PER_ADVANCE);
        // The backlog past the cap does not carry into later calls
        assert!(game.advance(0.0) <= 1);
        assert_eq!(game.advance(0.0), 0);
    }

    #[test]
    fn test_direction_applies_at_next_tick() {
        let mut game = new_loop(Mode::Classic);
        game.start();
        let input = game.input();
        input.push(Direction::Up);
        game.step();
        let state = game.state().expect("run");
        assert_eq!(state.snake.head(), Position::new(1, 9));
        assert_eq!(input.take(), None);
    }

    #[test]
    fn test_collision_ends_run_and_saves_best() {
        let mut game = new_loop(Mode::Classic);
        game.start();
        game.input().push(Direction::Up);
        // Straight up from row 10 leaves the board on the 11th move
        let mut ticks = 0;
        while game.loop_state() == LoopState::Running && ticks < 50 {
            game.step();
            ticks += 1;
        }
        assert_eq!(game.loop_state(), LoopState::Ended);
        let state = game.state().expect("run");
        assert_eq!(
            state.end_reason,
            Some(EndReason::Collision(CollisionKind::OffBoard))
        );
        assert_eq!(game.best_score(), state.score);
        assert_eq!(game.advance(1.0), 0);
    }

    #[test]
    fn test_menu_pauses_and_resumes() {
        let mut game = new_loop(Mode::Classic);
        game.start();
        game.toggle_menu(true);
        assert_eq!(game.loop_state(), LoopState::Paused);
        assert_eq!(game.advance(0.2), 0);
        assert!(game.step().is_empty());

        game.toggle_menu(false);
        assert_eq!(game.loop_state(), LoopState::Running);
        assert_eq!(game.advance(0.11), 1);
    }

    #[test]
    fn test_no_die_menu_commits_best() {
        let mut game = new_loop(Mode::NoDie);
        game.start();
        if let Some(state) = game.state.as_mut() {
            state.score = 9;
        }
        game.toggle_menu(true);
        assert_eq!(game.best_score(), 9);
    }

    #[test]
    fn test_stop_ends_and_commits() {
        let mut game = new_loop(Mode::NoDie);
        game.start();
        if let Some(state) = game.state.as_mut() {
            state.score = 4;
        }
        game.stop();
        assert_eq!(game.loop_state(), LoopState::Ended);
        assert_eq!(game.best_score(), 4);
        assert_eq!(
            game.state().and_then(|s| s.end_reason),
            Some(EndReason::Stopped)
        );
    }

    #[test]
    fn test_mode_change_waits_for_next_start() {
        let mut game = new_loop(Mode::Classic);
        game.start();
        game.select_mode_by_name("portal");
        assert_eq!(game.state().map(|s| s.mode), Some(Mode::Classic));

        game.start();
        assert_eq!(game.state().map(|s| s.mode), Some(Mode::Portal));
        assert_eq!(game.state().map(|s| s.tick_rate), Some(INITIAL_TICK_RATE));

        game.select_mode_by_name("bogus");
        assert_eq!(game.selected_mode(), Mode::Classic);
    }

    #[test]
    fn test_fixed_seed_reproduces_runs() {
        let mut a = new_loop(Mode::Walls);
        let mut b = new_loop(Mode::Walls);
        a.set_autopilot(true);
        b.set_autopilot(true);
        a.start();
        b.start();
        for _ in 0..100 {
            a.step();
            b.step();
        }
        assert_eq!(a.frame(), b.frame());
    }
}
