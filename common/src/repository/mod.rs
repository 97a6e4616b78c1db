//! Storage seam for results and live-game listings.
//!
//! The engine never talks to storage directly; collaborators depend on [`Repository`] and an
//! in-memory implementation backs the headless runner and the tests.

mod memory;
mod records;
mod result_reporter;
mod spectator;

use std::sync::Arc;

pub use memory::InMemoryRepository;
pub use records::{GameResult, LiveGame};
pub use result_reporter::RepositoryResultReporter;
pub use spectator::track_live_game;

pub trait Repository<K, V>: Send + Sync {
    fn get(&self, key: &K) -> Result<Option<V>, String>;
    fn put(&self, key: K, value: V) -> Result<(), String>;
    fn list(&self) -> Result<Vec<V>, String>;
    fn remove(&self, key: &K) -> Result<Option<V>, String>;
}

impl<K, V, T> Repository<K, V> for Arc<T>
where
    T: Repository<K, V> + ?Sized,
{
    fn get(&self, key: &K) -> Result<Option<V>, String> {
        (**self).get(key)
    }

    fn put(&self, key: K, value: V) -> Result<(), String> {
        (**self).put(key, value)
    }

    fn list(&self) -> Result<Vec<V>, String> {
        (**self).list()
    }

    fn remove(&self, key: &K) -> Result<Option<V>, String> {
        (**self).remove(key)
    }
}
