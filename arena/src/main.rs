mod arena_config;
mod bot_controller;

use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use tokio_stream::StreamExt;

use arena_common::config::{ConfigManager, FileConfigSource, Validate};
use arena_common::games::SessionRng;
use arena_common::games::snake::{GameEngine, GameMode, GameState, GameStatus, PlayerMode, ResultReporter};
use arena_common::id_generator::{generate_player_name, generate_record_id};
use arena_common::repository::{
    GameResult, InMemoryRepository, LiveGame, Repository, RepositoryResultReporter, track_live_game,
};
use arena_common::{GameId, log, logger};
use arena_config::{ArenaConfig, BotSettings};
use bot_controller::BotController;

const RESULT_WAIT_TIMEOUT: Duration = Duration::from_secs(1);
const RESULT_POLL_INTERVAL: Duration = Duration::from_millis(10);

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Walls,
    PassThrough,
}

impl From<ModeArg> for GameMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Walls => GameMode::Walls,
            ModeArg::PassThrough => GameMode::PassThrough,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum PlayersArg {
    Single,
    Multiplayer,
}

impl From<PlayersArg> for PlayerMode {
    fn from(players: PlayersArg) -> Self {
        match players {
            PlayersArg::Single => PlayerMode::Single,
            PlayersArg::Multiplayer => PlayerMode::Multiplayer,
        }
    }
}

#[derive(Parser)]
#[command(name = "snake_arena")]
struct Args {
    #[arg(long, default_value = "arena.yaml")]
    config: String,

    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    #[arg(long, value_enum)]
    players: Option<PlayersArg>,

    #[arg(long)]
    seed: Option<u64>,

    /// Replace configured player names with generated ones.
    #[arg(long)]
    random_names: bool,

    #[arg(long)]
    use_log_prefix: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config_manager: ConfigManager<FileConfigSource, ArenaConfig> = ConfigManager::from_yaml_file(&args.config);
    let mut config = config_manager.get_config()?;
    if let Some(mode) = args.mode {
        config.game.mode = mode.into();
    }
    if let Some(players) = args.players {
        config.game.player_mode = players.into();
    }
    if args.seed.is_some() {
        config.game.seed = args.seed;
    }
    if args.random_names {
        config.game.player_names = (0..config.game.player_mode.snake_count())
            .map(|_| generate_player_name())
            .collect();
    }
    config.validate()?;

    let prefix = if args.use_log_prefix {
        Some(config.log_prefix.clone().unwrap_or_else(|| "Arena".to_string()))
    } else {
        None
    };
    logger::init_logger(prefix);

    let results = Arc::new(InMemoryRepository::<String, GameResult>::new());
    let live_games = Arc::new(InMemoryRepository::<GameId, LiveGame>::new());

    let engine = GameEngine::new(config.game.clone(), RepositoryResultReporter::new(results.clone()))?;
    let game_id = GameId::new(generate_record_id());

    let tracker = tokio::spawn(track_live_game(game_id.clone(), engine.snapshots(), live_games.clone()));
    let bots = tokio::spawn(drive_bots(
        engine.clone(),
        config.bots.clone(),
        SessionRng::from_seed(config.game.seed),
    ));

    log!(
        "Arena game {} ready: {} {}, config {}",
        game_id,
        engine.settings().player_mode,
        engine.settings().mode,
        args.config
    );
    engine.start().await;

    let mut snapshots = engine.subscribe();
    tokio::select! {
        finished = snapshots.wait_for(GameState::is_finished) => {
            finished?;
        }
        signal = tokio::signal::ctrl_c() => {
            signal?;
            log!("Shutdown signal received, pausing game");
            engine.pause().await;
        }
    }

    bots.abort();
    if let Some(live) = live_games.get(&game_id)? {
        log!("Live entry at exit: {}s remaining", live.time_remaining);
    }
    tracker.abort();

    let state = engine.snapshot();
    log_scoreboard(&state);

    if state.is_finished() {
        wait_for_results(results.as_ref()).await?;
    }
    for result in results.list()? {
        log!(
            "Stored result {}: {} {} - {} {}, winner {}, {}s",
            result.id,
            result.player1,
            result.player1_score,
            result.player2.as_deref().unwrap_or("-"),
            result.player2_score.map_or_else(|| "-".to_string(), |score| score.to_string()),
            result.winner,
            result.duration
        );
    }

    log!("Arena shut down");
    Ok(())
}

/// Steers every snake once per tick from the latest snapshot.
async fn drive_bots<R: ResultReporter>(engine: GameEngine<R>, bots: BotSettings, mut rng: SessionRng) {
    let mut snapshots = engine.snapshots();
    let mut last_tick = None;

    while let Some(state) = snapshots.next().await {
        match state.status {
            GameStatus::Finished => break,
            GameStatus::Playing if last_tick != Some(state.tick) => {}
            _ => continue,
        }
        last_tick = Some(state.tick);

        for (index, snake) in state.snakes.iter().enumerate() {
            if let Some(direction) = BotController::calculate_move(bots.bot_for(index), &snake.id, &state, &mut rng) {
                engine.set_direction(&snake.id, direction).await;
            }
        }
    }
}

fn log_scoreboard(state: &GameState) {
    log!("Final status: {:?} after {} ticks, {}s remaining", state.status, state.tick, state.time_remaining);
    for (index, snake) in state.snakes.iter().enumerate() {
        let fate = match snake.death_reason {
            Some(reason) => format!("died ({})", reason),
            None => "alive".to_string(),
        };
        log!("  {}: score {}, length {}, {}", state.player_name(index), snake.score, snake.len(), fate);
    }
    if let Some(winner) = &state.winner {
        log!("Winner: {}", winner);
    }
}

/// Results are stored from a spawned task, so they may land shortly after the game finishes.
async fn wait_for_results(results: &impl Repository<String, GameResult>) -> Result<(), String> {
    let wait = async {
        while results.list()?.is_empty() {
            tokio::time::sleep(RESULT_POLL_INTERVAL).await;
        }
        Ok::<(), String>(())
    };

    match tokio::time::timeout(RESULT_WAIT_TIMEOUT, wait).await {
        Ok(result) => result,
        Err(_) => {
            log!("No result stored within {:?}", RESULT_WAIT_TIMEOUT);
            Ok(())
        }
    }
}
