use std::collections::BTreeMap;
use std::sync::Mutex;

use super::Repository;

/// Process-local store; `list` returns values in key order.
pub struct InMemoryRepository<K, V> {
    items: Mutex<BTreeMap<K, V>>,
}

impl<K: Ord, V> Default for InMemoryRepository<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> InMemoryRepository<K, V> {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(BTreeMap::new()),
        }
    }
}

impl<K, V> Repository<K, V> for InMemoryRepository<K, V>
where
    K: Ord + Send,
    V: Clone + Send,
{
    fn get(&self, key: &K) -> Result<Option<V>, String> {
        let items = self.items.lock().map_err(|e| format!("Repository lock poisoned: {}", e))?;
        Ok(items.get(key).cloned())
    }

    fn put(&self, key: K, value: V) -> Result<(), String> {
        let mut items = self.items.lock().map_err(|e| format!("Repository lock poisoned: {}", e))?;
        items.insert(key, value);
        Ok(())
    }

    fn list(&self) -> Result<Vec<V>, String> {
        let items = self.items.lock().map_err(|e| format!("Repository lock poisoned: {}", e))?;
        Ok(items.values().cloned().collect())
    }

    fn remove(&self, key: &K) -> Result<Option<V>, String> {
        let mut items = self.items.lock().map_err(|e| format!("Repository lock poisoned: {}", e))?;
        Ok(items.remove(key))
    }
}
