/// Record store: the data-access seam for the dashboard
///
/// The analytics layer never talks to storage. Whatever orchestrates it (the
/// MCP tools here) receives a RecordStore by explicit injection and hands
/// the analytics functions plain record slices.

pub mod memory;
pub mod snapshot;
pub mod demo;

// Re-export the main storage types
pub use memory::MemoryStore;
pub use snapshot::Snapshot;
pub use demo::demo_snapshot;

use thiserror::Error;
use crate::domain::{EntryId, Goal, MentalEntry, PhysicalEntry, Profile, User, UserId};

/// Errors that can occur during store operations
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("User not found: {user_id}")]
    UserNotFound { user_id: String },

    #[error("Entry not found: {entry_id}")]
    EntryNotFound { entry_id: String },

    #[error("Goal not found: {goal_id}")]
    GoalNotFound { goal_id: String },

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store lock poisoned")]
    LockPoisoned,
}

/// Trait defining the record-store interface for the dashboard
///
/// Read methods return fresh copies in a documented order: entries ascending
/// by date (the order the filter stage and charts expect), goals newest
/// first. Implementations may be swapped without touching the tools or the
/// analytics layer.
pub trait RecordStore {
    /// All known users
    fn list_users(&self) -> Result<Vec<User>, StoreError>;

    /// Profile for a user, if one exists
    fn get_profile(&self, user_id: &UserId) -> Result<Option<Profile>, StoreError>;

    /// All physical entries, ascending by date
    fn physical_entries(&self) -> Result<Vec<PhysicalEntry>, StoreError>;

    /// All mental entries, ascending by date
    fn mental_entries(&self) -> Result<Vec<MentalEntry>, StoreError>;

    /// All goals, descending by creation time
    fn goals(&self) -> Result<Vec<Goal>, StoreError>;

    /// Add a new physical entry
    fn add_physical(&self, entry: PhysicalEntry) -> Result<(), StoreError>;

    /// Replace an existing physical entry
    fn update_physical(&self, entry: PhysicalEntry) -> Result<(), StoreError>;

    /// Delete a physical entry by id
    fn delete_physical(&self, entry_id: &EntryId) -> Result<(), StoreError>;

    /// Add a new mental entry
    fn add_mental(&self, entry: MentalEntry) -> Result<(), StoreError>;

    /// Replace an existing mental entry
    fn update_mental(&self, entry: MentalEntry) -> Result<(), StoreError>;

    /// Delete a mental entry by id
    fn delete_mental(&self, entry_id: &EntryId) -> Result<(), StoreError>;

    /// Add a new goal
    fn add_goal(&self, goal: Goal) -> Result<(), StoreError>;

    /// Replace an existing goal
    fn update_goal(&self, goal: Goal) -> Result<(), StoreError>;
}
