use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI32, Ordering};

use crate::error::DomainError;
use crate::models::{Entity, Filter, FilteredList};

/// Generic keyed store the services delegate to. Implementations own
/// uniqueness of the key; everything above them is persistence-agnostic.
pub trait Repository<E: Entity>: Send + Sync {
    fn add(&self, entity: E) -> Result<E, DomainError>;
    fn edit(&self, entity: E) -> Result<E, DomainError>;
    fn remove(&self, key: &E::Key) -> Option<E>;
    fn get_by_id(&self, key: &E::Key) -> Option<E>;
    fn get_all(&self, filter: &Filter) -> FilteredList<E>;
    fn count(&self) -> i32;
}

/// Key-ordered in-memory store. Backs the server and the test suites.
pub struct InMemoryRepository<E: Entity> {
    records: Mutex<BTreeMap<E::Key, E>>,
    sequence: AtomicI32,
}

impl<E: Entity> InMemoryRepository<E> {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(BTreeMap::new()),
            sequence: AtomicI32::new(0),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<E::Key, E>> {
        self.records.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<E: Entity> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Repository<E> for InMemoryRepository<E>
where
    E: Entity + Send,
    E::Key: Send,
{
    fn add(&self, mut entity: E) -> Result<E, DomainError> {
        let next = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        entity.assign_key(next);

        let Some(key) = entity.key() else {
            return Err(DomainError::invalid_argument("the entity is missing its key"));
        };

        let mut records = self.lock();
        if records.contains_key(&key) {
            return Err(DomainError::InvalidState(
                "this key is already in the repository".to_string(),
            ));
        }
        records.insert(key, entity.clone());
        Ok(entity)
    }

    fn edit(&self, entity: E) -> Result<E, DomainError> {
        let Some(key) = entity.key() else {
            return Err(DomainError::invalid_argument("the entity is missing its key"));
        };

        let mut records = self.lock();
        if !records.contains_key(&key) {
            return Err(DomainError::not_found("this key is not in the repository"));
        }
        records.insert(key, entity.clone());
        Ok(entity)
    }

    fn remove(&self, key: &E::Key) -> Option<E> {
        self.lock().remove(key)
    }

    fn get_by_id(&self, key: &E::Key) -> Option<E> {
        self.lock().get(key).cloned()
    }

    fn get_all(&self, filter: &Filter) -> FilteredList<E> {
        let records = self.lock();

        let mut list: Vec<E> = match (filter.search_field.as_deref(), filter.search_text.as_deref())
        {
            (Some(field), Some(text)) if !text.is_empty() => records
                .values()
                .filter(|e| e.matches_search(field, text))
                .cloned()
                .collect(),
            _ => records.values().cloned().collect(),
        };

        let total_count = list.len() as i32;

        if filter.current_page >= 1 && filter.items_per_page >= 1 {
            let skip = (filter.current_page as usize - 1) * filter.items_per_page as usize;
            list = list
                .into_iter()
                .skip(skip)
                .take(filter.items_per_page as usize)
                .collect();
        }

        FilteredList {
            list,
            total_count,
            filter_used: filter.clone(),
        }
    }

    fn count(&self) -> i32 {
        self.lock().len() as i32
    }
}
