use std::collections::HashSet;
use std::io::ErrorKind;
use std::time::Duration;

use crate::ai::AiStrategy;
use crate::food::FoodSpawner;
use crate::grid::{Direction, GridPosition};
use crate::log;
use crate::session_rng::SessionRng;
use crate::settings::{GameMode, GameSettings};
use crate::simulation::{MoveResult, SnakeSimulation};
use crate::snake::Snake;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Menu,
    Playing,
    Paused,
    GameOver,
}

impl SessionState {
    /// The complete legal-transition table. Anything not listed here is
    /// refused; requests for refused transitions are no-ops.
    pub fn can_transition(self, next: SessionState) -> bool {
        use SessionState::*;
        matches!(
            (self, next),
            (Menu, Playing)
                | (Playing, Paused)
                | (Playing, GameOver)
                | (Paused, Playing)
                | (Paused, Menu)
                | (GameOver, Playing)
                | (GameOver, Menu)
        )
    }
}

/// Notifications fired synchronously while the session mutates, for UI,
/// audio and effect layers. All methods default to doing nothing.
pub trait SessionEvents {
    fn on_score_changed(&mut self, player_score: u32, ai_score: u32) {
        let _ = (player_score, ai_score);
    }
    fn on_game_over(&mut self, final_score: u32, is_new_high_score: bool) {
        let _ = (final_score, is_new_high_score);
    }
}

/// For callers that do not care about notifications.
impl SessionEvents for () {}

/// High-score persistence collaborator. Store failures are logged by the
/// session and never fatal.
pub trait HighScoreStore {
    fn load(&self) -> Result<u32, String>;
    fn save(&mut self, score: u32) -> Result<(), String>;
}

/// Plain-integer file store. A missing file reads as zero.
pub struct FileHighScoreStore {
    file_path: String,
}

impl FileHighScoreStore {
    pub fn new(file_path: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }
}

impl HighScoreStore for FileHighScoreStore {
    fn load(&self) -> Result<u32, String> {
        match std::fs::read_to_string(&self.file_path) {
            Ok(content) => content
                .trim()
                .parse()
                .map_err(|e| format!("Failed to parse high score: {}", e)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(0),
            Err(err) => Err(format!("Failed to read high score file: {}", err)),
        }
    }

    fn save(&mut self, score: u32) -> Result<(), String> {
        std::fs::write(&self.file_path, score.to_string())
            .map_err(|e| format!("Failed to write high score file: {}", e))
    }
}

#[derive(Default)]
pub struct InMemoryHighScoreStore {
    score: u32,
}

impl InMemoryHighScoreStore {
    pub fn new(score: u32) -> Self {
        Self { score }
    }

    pub fn score(&self) -> u32 {
        self.score
    }
}

impl HighScoreStore for InMemoryHighScoreStore {
    fn load(&self) -> Result<u32, String> {
        Ok(self.score)
    }

    fn save(&mut self, score: u32) -> Result<(), String> {
        self.score = score;
        Ok(())
    }
}

/// Owns a whole game: both snakes, the food, scores, timing and the state
/// machine. Driven from outside, once per frame, with the elapsed time since
/// the previous frame; the session has no clock of its own.
pub struct GameSession<P: HighScoreStore> {
    settings: GameSettings,
    simulation: SnakeSimulation,
    ai_strategy: AiStrategy,
    state: SessionState,
    player: Option<Snake>,
    ai: Option<Snake>,
    food: GridPosition,
    player_score: u32,
    ai_score: u32,
    high_score: u32,
    player_accumulator: Duration,
    ai_accumulator: Duration,
    rng: SessionRng,
    store: P,
}

impl<P: HighScoreStore> GameSession<P> {
    pub fn new(settings: GameSettings, store: P) -> Result<Self, String> {
        Self::with_rng(settings, store, SessionRng::from_random())
    }

    /// Fixed-seed constructor; the whole session replays identically for the
    /// same seed and inputs.
    pub fn with_rng(settings: GameSettings, store: P, rng: SessionRng) -> Result<Self, String> {
        settings.validate()?;
        let high_score = match store.load() {
            Ok(score) => score,
            Err(e) => {
                log!("Failed to load high score: {}", e);
                0
            }
        };
        Ok(Self {
            simulation: SnakeSimulation::new(settings.grid()),
            ai_strategy: AiStrategy::from_difficulty(settings.ai_difficulty),
            state: SessionState::Menu,
            player: None,
            ai: None,
            food: GridPosition::new(0, 0),
            player_score: 0,
            ai_score: 0,
            high_score,
            player_accumulator: Duration::ZERO,
            ai_accumulator: Duration::ZERO,
            rng,
            store,
            settings,
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn player_snake(&self) -> Option<&Snake> {
        self.player.as_ref()
    }

    pub fn ai_snake(&self) -> Option<&Snake> {
        self.ai.as_ref()
    }

    pub fn food(&self) -> GridPosition {
        self.food
    }

    pub fn player_score(&self) -> u32 {
        self.player_score
    }

    pub fn ai_score(&self) -> u32 {
        self.ai_score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Menu → Playing. Starts a fresh round.
    pub fn start(&mut self, events: &mut impl SessionEvents) {
        if self.state == SessionState::Menu && self.transition(SessionState::Playing) {
            self.reset_round(events);
        }
    }

    /// Playing → Paused.
    pub fn pause(&mut self) {
        if self.state == SessionState::Playing {
            self.transition(SessionState::Paused);
        }
    }

    /// Paused → Playing, resuming the interrupted round.
    pub fn resume(&mut self) {
        if self.state == SessionState::Paused {
            self.transition(SessionState::Playing);
        }
    }

    /// GameOver → Playing. Re-initializes the round.
    pub fn restart(&mut self, events: &mut impl SessionEvents) {
        if self.state == SessionState::GameOver && self.transition(SessionState::Playing) {
            self.reset_round(events);
        }
    }

    /// Paused or GameOver → Menu.
    pub fn to_menu(&mut self) {
        self.transition(SessionState::Menu);
    }

    /// Directional intent from the input layer. Only listened to while
    /// playing; reversals are dropped inside the snake.
    pub fn steer(&mut self, direction: Direction) {
        if self.state != SessionState::Playing {
            return;
        }
        if let Some(player) = self.player.as_mut() {
            player.set_pending_direction(direction);
        }
    }

    /// Per-frame drive. The two actors run on independent accumulators with
    /// distinct intervals, so they visibly move at different speeds; when an
    /// accumulator crosses its interval the actor ticks once and the
    /// accumulator resets to zero (the remainder is dropped, not rolled
    /// over).
    pub fn advance(&mut self, delta: Duration, events: &mut impl SessionEvents) {
        if self.state != SessionState::Playing {
            return;
        }

        self.player_accumulator += delta;
        if self.player_accumulator >= self.settings.player_move_interval() {
            self.player_accumulator = Duration::ZERO;
            self.tick_player(events);
        }

        // The player's tick may have ended the round this frame.
        if self.state == SessionState::Playing && self.ai.is_some() {
            self.ai_accumulator += delta;
            if self.ai_accumulator >= self.settings.ai_move_interval() {
                self.ai_accumulator = Duration::ZERO;
                self.tick_ai(events);
            }
        }
    }

    fn transition(&mut self, next: SessionState) -> bool {
        if self.state.can_transition(next) {
            log!("Session state {:?} -> {:?}", self.state, next);
            self.state = next;
            true
        } else {
            false
        }
    }

    fn reset_round(&mut self, events: &mut impl SessionEvents) {
        let grid = *self.simulation.grid();
        let grid_size = self.settings.grid_size;
        let length = self.settings.initial_snake_length;

        self.player_score = 0;
        self.ai_score = 0;
        events.on_score_changed(0, 0);

        let player_start = GridPosition::new(grid_size / 4, grid_size / 2);
        self.player = Some(Snake::new(player_start, Direction::Right, length, &grid));

        self.ai = match self.settings.game_mode {
            GameMode::VersusAi => {
                // Mirrored on the opposite side, heading toward the center.
                let ai_start = GridPosition::new(grid_size - 1 - grid_size / 4, grid_size / 2);
                Some(Snake::new(ai_start, Direction::Left, length, &grid))
            }
            GameMode::Classic => None,
        };

        self.player_accumulator = Duration::ZERO;
        self.ai_accumulator = Duration::ZERO;
        self.respawn_food();
    }

    fn respawn_food(&mut self) {
        let occupied: HashSet<GridPosition> = self
            .player
            .iter()
            .chain(self.ai.iter())
            .flat_map(|snake| snake.segments())
            .collect();
        self.food = FoodSpawner::place(&mut self.rng, self.settings.grid_size, &occupied);
        log!("Food spawned at ({}, {})", self.food.x, self.food.y);
    }

    fn tick_player(&mut self, events: &mut impl SessionEvents) {
        if self.player.is_none() {
            return;
        }
        let other_body: Vec<GridPosition> =
            self.ai.iter().flat_map(|snake| snake.segments()).collect();
        let snake = self.player.as_mut().expect("player snake exists while playing");
        let result = self.simulation.step(snake, self.food, &other_body);
        self.handle_move_result(result, true, events);
    }

    fn tick_ai(&mut self, events: &mut impl SessionEvents) {
        if self.ai.is_none() {
            return;
        }
        let player_body: Vec<GridPosition> = self
            .player
            .iter()
            .flat_map(|snake| snake.segments())
            .collect();

        let direction = self.ai_strategy.decide(
            self.ai.as_ref().expect("ai snake exists while playing"),
            self.food,
            self.simulation.grid(),
            &player_body,
            &mut self.rng,
        );
        let snake = self.ai.as_mut().expect("ai snake exists while playing");
        snake.set_pending_direction(direction);
        let result = self.simulation.step(snake, self.food, &player_body);
        self.handle_move_result(result, false, events);
    }

    fn handle_move_result(
        &mut self,
        result: MoveResult,
        is_player: bool,
        events: &mut impl SessionEvents,
    ) {
        match result {
            MoveResult::Moved => {}
            MoveResult::AteFood => {
                if is_player {
                    self.player_score += 1;
                } else {
                    self.ai_score += 1;
                }
                log!(
                    "{} ate food at ({}, {}). Score: {}/{}",
                    if is_player { "Player" } else { "AI" },
                    self.food.x,
                    self.food.y,
                    self.player_score,
                    self.ai_score
                );
                events.on_score_changed(self.player_score, self.ai_score);
                self.respawn_food();
            }
            MoveResult::Collided => {
                let snake = if is_player {
                    self.player.as_mut()
                } else {
                    self.ai.as_mut()
                };
                if let Some(snake) = snake {
                    snake.kill();
                }
                log!("{} collided", if is_player { "Player" } else { "AI" });
                self.finish_round(events);
            }
        }
    }

    fn finish_round(&mut self, events: &mut impl SessionEvents) {
        let final_score = self.player_score;
        if final_score > self.high_score {
            self.high_score = final_score;
            if let Err(e) = self.store.save(self.high_score) {
                log!("Failed to save high score: {}", e);
            }
        }
        self.transition(SessionState::GameOver);
        // Matching the record counts as beating it, hence >=.
        events.on_game_over(final_score, final_score >= self.high_score);
    }

    #[cfg(test)]
    pub(crate) fn set_food_for_test(&mut self, pos: GridPosition) {
        self.food = pos;
    }
}
