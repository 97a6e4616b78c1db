use chrono::Utc;

use crate::games::snake::{GameReport, ResultReporter};
use crate::id_generator::generate_record_id;
use crate::log;
use super::{GameResult, Repository};

/// Stores every finished game as a [`GameResult`] keyed by a generated id.
pub struct RepositoryResultReporter<TRepo> {
    repository: TRepo,
}

impl<TRepo> RepositoryResultReporter<TRepo>
where
    TRepo: Repository<String, GameResult>,
{
    pub fn new(repository: TRepo) -> Self {
        Self { repository }
    }
}

impl<TRepo> ResultReporter for RepositoryResultReporter<TRepo>
where
    TRepo: Repository<String, GameResult> + 'static,
{
    async fn report(&self, report: GameReport) -> Result<(), String> {
        let id = generate_record_id();
        let result = GameResult::from_report(id.clone(), &report, Utc::now().timestamp_millis());
        self.repository.put(id.clone(), result)?;
        log!("Stored game result {}", id);
        Ok(())
    }
}
