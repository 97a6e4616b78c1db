mod collision;
mod events;
mod food;
mod game_state;
mod reporter;
mod session;
mod settings;
mod snake;
mod types;

pub mod grid;

pub use collision::{next_head, opponent_collisions};
pub use events::GameEvent;
pub use food::{FOOD_TARGET_COUNT, Food, ensure_count, occupied_cells, place};
pub use game_state::GameState;
pub use reporter::{GameReport, NoopResultReporter, PlayerResult, ResultReporter};
pub use session::{GameEngine, RECENT_EVENTS_CAPACITY};
pub use settings::{
    COUNTDOWN_INTERVAL, DEFAULT_GAME_DURATION_SECONDS, DEFAULT_GRID_SIZE, DEFAULT_TICK_INTERVAL_MS,
    GameSettings,
};
pub use snake::Snake;
pub use types::{
    DRAW_MARKER, DeathReason, Direction, GAME_OVER_MARKER, GameMode, GameStatus, PlayerMode, Point,
    Winner,
};
