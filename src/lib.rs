//! Simulation core of a grid snake game: toroidal movement and collisions,
//! food placement, a heuristic computer opponent, and the session state
//! machine that paces both actors. No rendering, no input handling, no
//! clock — the embedding application drives the session frame by frame and
//! reads back snapshots.

pub mod ai;
pub mod food;
pub mod grid;
pub mod logger;
pub mod session;
pub mod session_rng;
pub mod settings;
pub mod simulation;
pub mod snake;

pub use ai::{AiStrategy, Difficulty};
pub use food::FoodSpawner;
pub use grid::{Direction, GridConfig, GridPosition, WrapPolicy};
pub use session::{
    FileHighScoreStore, GameSession, HighScoreStore, InMemoryHighScoreStore, SessionEvents,
    SessionState,
};
pub use session_rng::SessionRng;
pub use settings::{GameMode, GameSettings};
pub use simulation::{MoveResult, SnakeSimulation};
pub use snake::Snake;
