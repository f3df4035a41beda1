/// In-memory implementation of the record store
///
/// Holds the whole snapshot behind a mutex and optionally mirrors every
/// mutation back to a JSON file. Read methods hand out fresh copies so a
/// computation pass always sees an immutable snapshot regardless of
/// concurrent mutations.

use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use crate::domain::{EntryId, Goal, MentalEntry, PhysicalEntry, Profile, User, UserId};
use crate::store::{RecordStore, Snapshot, StoreError};

/// Mutex-guarded record store with optional file persistence
pub struct MemoryStore {
    state: Mutex<Snapshot>,
    /// Snapshot file mirrored after each mutation; None keeps data in memory only
    path: Option<PathBuf>,
}

impl MemoryStore {
    /// Create an empty, memory-only store
    pub fn new() -> Self {
        Self {
            state: Mutex::new(Snapshot::default()),
            path: None,
        }
    }

    /// Create a store from an existing snapshot, memory-only
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            state: Mutex::new(snapshot),
            path: None,
        }
    }

    /// Open a file-backed store
    ///
    /// Loads the snapshot if the file exists; otherwise starts empty and
    /// creates the file on the first mutation.
    pub fn open(path: PathBuf) -> Result<Self, StoreError> {
        let snapshot = if path.exists() {
            Snapshot::load(&path)?
        } else {
            tracing::info!("No snapshot at {}, starting empty", path.display());
            Snapshot::default()
        };
        tracing::info!(
            "Record store initialized: {} users, {} physical, {} mental, {} goals",
            snapshot.users.len(),
            snapshot.physical.len(),
            snapshot.mental.len(),
            snapshot.goals.len()
        );
        Ok(Self {
            state: Mutex::new(snapshot),
            path: Some(path),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Snapshot>, StoreError> {
        self.state.lock().map_err(|_| StoreError::LockPoisoned)
    }

    /// Persist the current state if the store is file-backed
    fn persist(&self, state: &Snapshot) -> Result<(), StoreError> {
        if let Some(path) = &self.path {
            state.save(path)?;
        }
        Ok(())
    }

}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore for MemoryStore {
    fn list_users(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.lock()?.users.clone())
    }

    fn get_profile(&self, user_id: &UserId) -> Result<Option<Profile>, StoreError> {
        Ok(self
            .lock()?
            .profiles
            .iter()
            .find(|p| &p.user_id == user_id)
            .cloned())
    }

    fn physical_entries(&self) -> Result<Vec<PhysicalEntry>, StoreError> {
        let mut entries = self.lock()?.physical.clone();
        entries.sort_by_key(|e| e.date);
        Ok(entries)
    }

    fn mental_entries(&self) -> Result<Vec<MentalEntry>, StoreError> {
        let mut entries = self.lock()?.mental.clone();
        entries.sort_by_key(|e| e.date);
        Ok(entries)
    }

    fn goals(&self) -> Result<Vec<Goal>, StoreError> {
        let mut goals = self.lock()?.goals.clone();
        goals.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(goals)
    }

    fn add_physical(&self, entry: PhysicalEntry) -> Result<(), StoreError> {
        let mut state = self.lock()?;
        tracing::debug!("Adding physical entry {} for {}", entry.id, entry.date);
        state.physical.push(entry);
        self.persist(&state)
    }

    fn update_physical(&self, entry: PhysicalEntry) -> Result<(), StoreError> {
        let mut state = self.lock()?;
        let slot = state
            .physical
            .iter_mut()
            .find(|e| e.id == entry.id)
            .ok_or_else(|| StoreError::EntryNotFound {
                entry_id: entry.id.to_string(),
            })?;
        *slot = entry;
        self.persist(&state)
    }

    fn delete_physical(&self, entry_id: &EntryId) -> Result<(), StoreError> {
        let mut state = self.lock()?;
        let before = state.physical.len();
        state.physical.retain(|e| &e.id != entry_id);
        if state.physical.len() == before {
            return Err(StoreError::EntryNotFound {
                entry_id: entry_id.to_string(),
            });
        }
        tracing::debug!("Deleted physical entry {}", entry_id);
        self.persist(&state)
    }

    fn add_mental(&self, entry: MentalEntry) -> Result<(), StoreError> {
        let mut state = self.lock()?;
        tracing::debug!("Adding mental entry {} for {}", entry.id, entry.date);
        state.mental.push(entry);
        self.persist(&state)
    }

    fn update_mental(&self, entry: MentalEntry) -> Result<(), StoreError> {
        let mut state = self.lock()?;
        let slot = state
            .mental
            .iter_mut()
            .find(|e| e.id == entry.id)
            .ok_or_else(|| StoreError::EntryNotFound {
                entry_id: entry.id.to_string(),
            })?;
        *slot = entry;
        self.persist(&state)
    }

    fn delete_mental(&self, entry_id: &EntryId) -> Result<(), StoreError> {
        let mut state = self.lock()?;
        let before = state.mental.len();
        state.mental.retain(|e| &e.id != entry_id);
        if state.mental.len() == before {
            return Err(StoreError::EntryNotFound {
                entry_id: entry_id.to_string(),
            });
        }
        tracing::debug!("Deleted mental entry {}", entry_id);
        self.persist(&state)
    }

    fn add_goal(&self, goal: Goal) -> Result<(), StoreError> {
        let mut state = self.lock()?;
        tracing::debug!("Adding goal {} '{}'", goal.id, goal.title);
        state.goals.push(goal);
        self.persist(&state)
    }

    fn update_goal(&self, goal: Goal) -> Result<(), StoreError> {
        let mut state = self.lock()?;
        let slot = state
            .goals
            .iter_mut()
            .find(|g| g.id == goal.id)
            .ok_or_else(|| StoreError::GoalNotFound {
                goal_id: goal.id.to_string(),
            })?;
        *slot = goal;
        self.persist(&state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_entry(user_id: &UserId, day_offset: i64) -> PhysicalEntry {
        PhysicalEntry::from_existing(
            EntryId::new(),
            user_id.clone(),
            Utc::now().naive_utc().date() - chrono::Duration::days(day_offset),
            Some(60.0),
            None,
            None,
            None,
            None,
            Utc::now(),
        )
    }

    #[test]
    fn test_entries_come_back_sorted_ascending() {
        let store = MemoryStore::new();
        let user = UserId::new();
        store.add_physical(sample_entry(&user, 1)).unwrap();
        store.add_physical(sample_entry(&user, 5)).unwrap();
        store.add_physical(sample_entry(&user, 3)).unwrap();

        let entries = store.physical_entries().unwrap();
        assert_eq!(entries.len(), 3);
        assert!(entries.windows(2).all(|w| w[0].date <= w[1].date));
    }

    #[test]
    fn test_update_and_delete() {
        let store = MemoryStore::new();
        let user = UserId::new();
        let mut entry = sample_entry(&user, 1);
        store.add_physical(entry.clone()).unwrap();

        entry.heart_rate = Some(72.0);
        store.update_physical(entry.clone()).unwrap();
        assert_eq!(store.physical_entries().unwrap()[0].heart_rate, Some(72.0));

        store.delete_physical(&entry.id).unwrap();
        assert!(store.physical_entries().unwrap().is_empty());
        assert!(store.delete_physical(&entry.id).is_err());
    }

    #[test]
    fn test_file_backed_persistence() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("data").join("snapshot.json");

        let user = User::new(Some("ada@example.com".to_string()), None);
        {
            let store = MemoryStore::open(path.clone()).unwrap();
            let mut snapshot = Snapshot::default();
            snapshot.users.push(user.clone());
            *store.state.lock().unwrap() = snapshot;
            store.add_physical(sample_entry(&user.id, 2)).unwrap();
        }

        // A second store on the same path sees the persisted mutation
        let reopened = MemoryStore::open(path).unwrap();
        assert_eq!(reopened.physical_entries().unwrap().len(), 1);
        assert_eq!(reopened.list_users().unwrap().len(), 1);
    }

    #[test]
    fn test_from_snapshot_lists_users() {
        let store = MemoryStore::from_snapshot(Snapshot {
            users: vec![User::new(Some("ada@example.com".to_string()), Some("Ada".to_string()))],
            ..Snapshot::default()
        });
        let users = store.list_users().unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].label(), "ada@example.com");
    }
}
