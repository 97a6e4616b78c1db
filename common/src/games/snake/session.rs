use std::sync::{Arc, Weak};
use std::time::Duration;

use ringbuffer::{AllocRingBuffer, RingBuffer};
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, interval_at};
use tokio_stream::wrappers::WatchStream;

use crate::config::Validate;
use crate::{SnakeId, log};
use crate::games::SessionRng;
use super::events::GameEvent;
use super::game_state::GameState;
use super::reporter::{GameReport, ResultReporter};
use super::settings::{COUNTDOWN_INTERVAL, GameSettings};
use super::types::{Direction, GameStatus};

pub const RECENT_EVENTS_CAPACITY: usize = 64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Clock {
    Movement,
    Countdown,
}

struct Clocks {
    movement: JoinHandle<()>,
    countdown: JoinHandle<()>,
}

impl Clocks {
    fn stop(self) {
        self.movement.abort();
        self.countdown.abort();
    }
}

struct EngineCore {
    state: GameState,
    rng: SessionRng,
    recent_events: AllocRingBuffer<GameEvent>,
    clocks: Option<Clocks>,
    /// Bumped whenever the clocks are torn down; a clock task holding an older value exits.
    clock_generation: u64,
}

struct EngineShared<R: ResultReporter> {
    settings: GameSettings,
    core: Mutex<EngineCore>,
    snapshot_tx: watch::Sender<GameState>,
    reporter: Arc<R>,
}

/// Owns the live [`GameState`] and drives it with a movement clock and a countdown clock.
///
/// Every mutation (ticks, countdown, commands) goes through one async mutex. Observers read
/// snapshots through [`GameEngine::subscribe`] or [`GameEngine::snapshots`].
pub struct GameEngine<R: ResultReporter> {
    shared: Arc<EngineShared<R>>,
}

impl<R: ResultReporter> Clone for GameEngine<R> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<R: ResultReporter> GameEngine<R> {
    /// Rejects settings that fail validation; nothing is spawned until [`GameEngine::start`].
    pub fn new(settings: GameSettings, reporter: R) -> Result<Self, String> {
        settings.validate()?;

        let mut rng = SessionRng::from_seed(settings.seed);
        let mut state = GameState::new(&settings);
        let mut recent_events = AllocRingBuffer::new(RECENT_EVENTS_CAPACITY);
        for event in state.init_food(&mut rng) {
            recent_events.enqueue(event);
        }

        let (snapshot_tx, _) = watch::channel(state.clone());

        log!(
            "Created {} game ({}, grid {}x{}, seed {})",
            settings.player_mode,
            settings.mode,
            settings.grid_size,
            settings.grid_size,
            rng.seed()
        );

        Ok(Self {
            shared: Arc::new(EngineShared {
                settings,
                core: Mutex::new(EngineCore {
                    state,
                    rng,
                    recent_events,
                    clocks: None,
                    clock_generation: 0,
                }),
                snapshot_tx,
                reporter: Arc::new(reporter),
            }),
        })
    }

    pub fn settings(&self) -> &GameSettings {
        &self.shared.settings
    }

    pub fn snapshot(&self) -> GameState {
        self.shared.snapshot_tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<GameState> {
        self.shared.snapshot_tx.subscribe()
    }

    pub fn snapshots(&self) -> WatchStream<GameState> {
        WatchStream::new(self.subscribe())
    }

    /// Most recent events, oldest first.
    pub async fn recent_events(&self) -> Vec<GameEvent> {
        let core = self.shared.core.lock().await;
        core.recent_events.iter().cloned().collect()
    }

    pub async fn start(&self) {
        let mut core = self.shared.core.lock().await;
        if core.state.start() {
            log!("Game started");
            self.shared.start_clocks(&mut core);
            self.shared.publish(&core.state);
        }
    }

    pub async fn pause(&self) {
        let mut core = self.shared.core.lock().await;
        if core.state.pause() {
            log!("Game paused with {}s remaining", core.state.time_remaining);
            stop_clocks(&mut core);
            self.shared.publish(&core.state);
        }
    }

    pub async fn resume(&self) {
        let mut core = self.shared.core.lock().await;
        if core.state.resume() {
            log!("Game resumed");
            self.shared.start_clocks(&mut core);
            self.shared.publish(&core.state);
        }
    }

    /// Back to a fresh waiting game with the same settings.
    pub async fn reset(&self) {
        let mut core = self.shared.core.lock().await;
        stop_clocks(&mut core);

        let EngineCore { state, rng, .. } = &mut *core;
        *state = GameState::new(&self.shared.settings);
        let events = state.init_food(rng);
        record_events(&mut core, events);

        log!("Game reset");
        self.shared.publish(&core.state);
    }

    /// Returns whether the request was accepted; reversals and unknown ids are dropped.
    pub async fn set_direction(&self, snake_id: &SnakeId, direction: Direction) -> bool {
        let mut core = self.shared.core.lock().await;
        let accepted = core.state.set_snake_direction(snake_id, direction);
        if accepted {
            self.shared.publish(&core.state);
        }
        accepted
    }
}

impl<R: ResultReporter> EngineShared<R> {
    fn publish(&self, state: &GameState) {
        self.snapshot_tx.send_replace(state.clone());
    }

    fn start_clocks(self: &Arc<Self>, core: &mut EngineCore) {
        stop_clocks(core);
        let generation = core.clock_generation;
        core.clocks = Some(Clocks {
            movement: self.spawn_clock(Clock::Movement, self.settings.tick_interval(), generation),
            countdown: self.spawn_clock(Clock::Countdown, COUNTDOWN_INTERVAL, generation),
        });
    }

    fn spawn_clock(self: &Arc<Self>, clock: Clock, period: Duration, generation: u64) -> JoinHandle<()> {
        let weak: Weak<Self> = Arc::downgrade(self);
        let first = Instant::now() + period;
        tokio::spawn(async move {
            let mut timer = interval_at(first, period);
            loop {
                timer.tick().await;
                let Some(shared) = weak.upgrade() else {
                    break;
                };
                if !shared.on_clock(clock, generation).await {
                    break;
                }
            }
        })
    }

    /// Applies one clock firing. Returns `false` once this clock should stop.
    async fn on_clock(&self, clock: Clock, generation: u64) -> bool {
        let mut core = self.core.lock().await;
        if core.clock_generation != generation || core.state.status != GameStatus::Playing {
            return false;
        }

        let EngineCore { state, rng, .. } = &mut *core;
        let events = match clock {
            Clock::Movement => state.update(rng),
            Clock::Countdown => state.countdown(),
        };
        record_events(&mut core, events);
        self.publish(&core.state);

        if core.state.is_finished() {
            stop_clocks(&mut core);
            self.report(&core.state);
            return false;
        }
        true
    }

    fn report(&self, state: &GameState) {
        let Some(report) = GameReport::from_state(state) else {
            return;
        };

        log!(
            "Game finished after {}s. Winner: {}",
            report.duration_seconds,
            report.winner
        );

        let reporter = self.reporter.clone();
        tokio::spawn(async move {
            if let Err(e) = reporter.report(report).await {
                log!("Failed to report game result: {}", e);
            }
        });
    }
}

impl<R: ResultReporter> Drop for EngineShared<R> {
    fn drop(&mut self) {
        if let Some(clocks) = self.core.get_mut().clocks.take() {
            clocks.stop();
        }
    }
}

fn stop_clocks(core: &mut EngineCore) {
    core.clock_generation += 1;
    if let Some(clocks) = core.clocks.take() {
        clocks.stop();
    }
}

fn record_events(core: &mut EngineCore, events: Vec<GameEvent>) {
    for event in events {
        match &event {
            GameEvent::FoodEaten { snake_id, at, score } => {
                log!("[{}] ate food at {}. Score: {}", snake_id, at, score);
            }
            GameEvent::FoodSpawned { at } => {
                log!("Food spawned at {}", at);
            }
            GameEvent::SnakeDied { snake_id, reason, at } => {
                log!("[{}] died at {}: {}", snake_id, at, reason);
            }
            GameEvent::GameFinished { .. } => {}
        }
        core.recent_events.enqueue(event);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex as StdMutex;

    use super::*;
    use crate::games::snake::{GameMode, NoopResultReporter, Point, PlayerMode, Winner};

    #[derive(Clone, Default)]
    struct RecordingReporter {
        reports: Arc<StdMutex<Vec<GameReport>>>,
    }

    impl RecordingReporter {
        fn reports(&self) -> Vec<GameReport> {
            self.reports.lock().unwrap().clone()
        }
    }

    impl ResultReporter for RecordingReporter {
        async fn report(&self, report: GameReport) -> Result<(), String> {
            self.reports.lock().unwrap().push(report);
            Ok(())
        }
    }

    struct FailingReporter;

    impl ResultReporter for FailingReporter {
        async fn report(&self, _report: GameReport) -> Result<(), String> {
            Err("store unavailable".to_string())
        }
    }

    fn settings(mode: GameMode, player_mode: PlayerMode, duration: u32) -> GameSettings {
        GameSettings {
            game_duration_seconds: duration,
            seed: Some(42),
            ..GameSettings::new(mode, player_mode)
        }
    }

    async fn advance(duration: Duration) {
        tokio::time::advance(duration).await;
        tokio::task::yield_now().await;
    }

    /// Lets spawned tasks run to completion after a clock fires.
    async fn settle() {
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_engine_is_waiting_with_food() {
        let engine = GameEngine::new(settings(GameMode::Walls, PlayerMode::Multiplayer, 60), NoopResultReporter).unwrap();
        let state = engine.snapshot();
        assert_eq!(state.status, GameStatus::Waiting);
        assert_eq!(state.snakes.len(), 2);
        assert_eq!(state.food.len(), 2);
        assert_eq!(state.time_remaining, 60);
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_settings_rejected() {
        let mut zero_tick = settings(GameMode::Walls, PlayerMode::Single, 60);
        zero_tick.tick_interval_ms = 0;
        assert!(GameEngine::new(zero_tick, NoopResultReporter).is_err());

        let mut zero_grid = settings(GameMode::Walls, PlayerMode::Single, 60);
        zero_grid.grid_size = 0;
        assert!(GameEngine::new(zero_grid, NoopResultReporter).is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_tick_counts_from_start_not_first_poll() {
        let engine = GameEngine::new(settings(GameMode::PassThrough, PlayerMode::Single, 60), NoopResultReporter).unwrap();
        engine.start().await;

        // The clock tasks have not been polled yet when time moves on.
        tokio::time::advance(Duration::from_millis(150)).await;
        settle().await;

        assert_eq!(engine.snapshot().tick, 1);
        assert_eq!(engine.settings().tick_interval(), Duration::from_millis(150));
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_ticks_while_waiting() {
        let engine = GameEngine::new(settings(GameMode::PassThrough, PlayerMode::Single, 60), NoopResultReporter).unwrap();
        advance(Duration::from_secs(2)).await;
        settle().await;
        let state = engine.snapshot();
        assert_eq!(state.tick, 0);
        assert_eq!(state.snakes[0].head(), Point::new(5, 10));
    }

    #[tokio::test(start_paused = true)]
    async fn test_movement_clock_ticks_after_start() {
        let engine = GameEngine::new(settings(GameMode::PassThrough, PlayerMode::Single, 60), NoopResultReporter).unwrap();
        engine.start().await;
        assert_eq!(engine.snapshot().status, GameStatus::Playing);

        advance(Duration::from_millis(150)).await;
        settle().await;
        let state = engine.snapshot();
        assert_eq!(state.tick, 1);
        assert_eq!(state.snakes[0].head(), Point::new(6, 10));

        advance(Duration::from_millis(150)).await;
        settle().await;
        assert_eq!(engine.snapshot().tick, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_countdown_clock_decrements() {
        let engine = GameEngine::new(settings(GameMode::PassThrough, PlayerMode::Single, 60), NoopResultReporter).unwrap();
        engine.start().await;

        for _ in 0..3 {
            advance(Duration::from_secs(1)).await;
            settle().await;
        }
        assert_eq!(engine.snapshot().time_remaining, 57);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_freezes_clocks_and_is_idempotent() {
        let engine = GameEngine::new(settings(GameMode::PassThrough, PlayerMode::Single, 60), NoopResultReporter).unwrap();
        engine.start().await;
        advance(Duration::from_millis(150)).await;
        settle().await;

        engine.pause().await;
        let paused_once = engine.snapshot();
        engine.pause().await;
        assert_eq!(engine.snapshot(), paused_once);
        assert_eq!(paused_once.status, GameStatus::Paused);

        advance(Duration::from_secs(3)).await;
        settle().await;
        assert_eq!(engine.snapshot(), paused_once);

        engine.resume().await;
        advance(Duration::from_millis(150)).await;
        settle().await;
        let resumed = engine.snapshot();
        assert_eq!(resumed.status, GameStatus::Playing);
        assert_eq!(resumed.tick, paused_once.tick + 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_commands_in_wrong_state_are_ignored() {
        let engine = GameEngine::new(settings(GameMode::Walls, PlayerMode::Single, 60), NoopResultReporter).unwrap();
        engine.pause().await;
        engine.resume().await;
        assert_eq!(engine.snapshot().status, GameStatus::Waiting);
        advance(Duration::from_secs(1)).await;
        settle().await;
        assert_eq!(engine.snapshot().tick, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_direction_takes_effect_next_tick() {
        let engine = GameEngine::new(settings(GameMode::PassThrough, PlayerMode::Single, 60), NoopResultReporter).unwrap();
        let id = SnakeId::for_index(0);

        assert!(!engine.set_direction(&id, Direction::Left).await);
        assert!(engine.set_direction(&id, Direction::Up).await);
        assert!(!engine.set_direction(&SnakeId::new("ghost"), Direction::Up).await);
        assert_eq!(engine.snapshot().snakes[0].next_direction, Direction::Up);

        engine.start().await;
        advance(Duration::from_millis(150)).await;
        settle().await;
        assert_eq!(engine.snapshot().snakes[0].head(), Point::new(5, 9));
    }

    #[tokio::test(start_paused = true)]
    async fn test_wall_death_finishes_and_reports_once() {
        let reporter = RecordingReporter::default();
        let engine = GameEngine::new(settings(GameMode::Walls, PlayerMode::Single, 60), reporter.clone()).unwrap();
        engine.set_direction(&SnakeId::for_index(0), Direction::Up).await;
        engine.start().await;

        // From (5,10) heading up the wall is 11 moves away.
        for _ in 0..12 {
            advance(Duration::from_millis(150)).await;
            settle().await;
        }
        advance(Duration::from_secs(2)).await;
        settle().await;

        let state = engine.snapshot();
        assert_eq!(state.status, GameStatus::Finished);
        assert_eq!(state.winner, Some(Winner::GameOver));
        assert_eq!(state.tick, 11);

        let reports = reporter.reports();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].winner, Winner::GameOver);
        assert_eq!(reports[0].duration_seconds, 1);
        assert!(engine
            .recent_events()
            .await
            .iter()
            .any(|e| matches!(e, GameEvent::GameFinished { .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn test_time_out_finishes_multiplayer() {
        let reporter = RecordingReporter::default();
        let mut game_settings = settings(GameMode::PassThrough, PlayerMode::Multiplayer, 1);
        game_settings.player_names = vec!["Alice".to_string(), "Bob".to_string()];
        game_settings.tick_interval_ms = 5000;
        let engine = GameEngine::new(game_settings, reporter.clone()).unwrap();
        engine.start().await;

        advance(Duration::from_secs(1)).await;
        settle().await;

        let state = engine.snapshot();
        assert_eq!(state.status, GameStatus::Finished);
        assert_eq!(state.time_remaining, 0);
        assert_eq!(state.tick, 0);
        assert_eq!(state.winner, Some(Winner::Draw));

        let reports = reporter.reports();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].players.len(), 2);
        assert_eq!(reports[0].players[1].name, "Bob");
        assert_eq!(reports[0].duration_seconds, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reporter_failure_is_swallowed() {
        let engine = GameEngine::new(settings(GameMode::PassThrough, PlayerMode::Single, 1), FailingReporter).unwrap();
        engine.start().await;
        advance(Duration::from_secs(1)).await;
        settle().await;
        assert_eq!(engine.snapshot().status, GameStatus::Finished);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_restores_initial_state() {
        let engine = GameEngine::new(settings(GameMode::PassThrough, PlayerMode::Multiplayer, 60), NoopResultReporter).unwrap();
        engine.start().await;
        for _ in 0..10 {
            advance(Duration::from_millis(150)).await;
            settle().await;
        }

        engine.reset().await;
        let state = engine.snapshot();
        assert_eq!(state.status, GameStatus::Waiting);
        assert_eq!(state.winner, None);
        assert_eq!(state.time_remaining, 60);
        assert_eq!(state.tick, 0);
        assert_eq!(state.snakes.len(), 2);
        assert_eq!(state.snakes[0].body, vec![Point::new(5, 10)]);
        assert_eq!(state.snakes[1].body, vec![Point::new(15, 10)]);
        assert_eq!(state.food.len(), 2);

        advance(Duration::from_secs(2)).await;
        settle().await;
        assert_eq!(engine.snapshot().tick, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscribers_see_updates() {
        let engine = GameEngine::new(settings(GameMode::PassThrough, PlayerMode::Single, 60), NoopResultReporter).unwrap();
        let mut rx = engine.subscribe();
        assert!(!rx.has_changed().unwrap());

        engine.start().await;
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().status, GameStatus::Playing);
    }
}
