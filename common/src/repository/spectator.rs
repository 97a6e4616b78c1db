use tokio_stream::{Stream, StreamExt};

use crate::GameId;
use crate::games::snake::{GameState, GameStatus};
use super::{LiveGame, Repository};

/// Mirrors a game's snapshots into `repository` under `id` while it is being played.
///
/// Waiting games are not listed. Returns once the game finishes or the stream ends, leaving
/// no entry behind.
pub async fn track_live_game<S, TRepo>(id: GameId, mut snapshots: S, repository: TRepo) -> Result<(), String>
where
    S: Stream<Item = GameState> + Unpin,
    TRepo: Repository<GameId, LiveGame>,
{
    while let Some(state) = snapshots.next().await {
        match state.status {
            GameStatus::Playing | GameStatus::Paused => {
                repository.put(id.clone(), LiveGame::from_snapshot(&id, &state))?;
            }
            GameStatus::Waiting => {
                repository.remove(&id)?;
            }
            GameStatus::Finished => {
                repository.remove(&id)?;
                return Ok(());
            }
        }
    }

    repository.remove(&id)?;
    Ok(())
}
