/// JSON snapshot document for the record store
///
/// The store persists its whole state as one serde document. This is the
/// record-store collaborator's own persistence format; it is not a database
/// schema and needs no migrations - the file is rewritten whole after each
/// mutation.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{Goal, MentalEntry, PhysicalEntry, Profile, User};
use crate::store::StoreError;

/// The complete persisted state of a record store
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub profiles: Vec<Profile>,
    #[serde(default)]
    pub physical: Vec<PhysicalEntry>,
    #[serde(default)]
    pub mental: Vec<MentalEntry>,
    #[serde(default)]
    pub goals: Vec<Goal>,
}

impl Snapshot {
    /// Load a snapshot from a JSON file
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let raw = fs::read_to_string(path)?;
        let snapshot = serde_json::from_str(&raw)?;
        tracing::debug!("Loaded snapshot from {}", path.display());
        Ok(snapshot)
    }

    /// Write a snapshot to a JSON file, creating parent directories
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let raw = serde_json::to_string_pretty(self)?;
        fs::write(path, raw)?;
        tracing::debug!("Saved snapshot to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserId;
    use chrono::Utc;

    #[test]
    fn test_snapshot_roundtrip() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("snapshot.json");

        let user = User::new(Some("ada@example.com".to_string()), None);
        let entry = PhysicalEntry::from_existing(
            crate::domain::EntryId::new(),
            user.id.clone(),
            Utc::now().naive_utc().date(),
            Some(62.0),
            Some(9_000.0),
            None,
            None,
            None,
            Utc::now(),
        );

        let snapshot = Snapshot {
            users: vec![user],
            profiles: vec![Profile {
                user_id: UserId::new(),
                age: Some(41),
                gender: Some("female".to_string()),
                height_cm: Some(168.0),
                weight_kg: Some(60.0),
            }],
            physical: vec![entry],
            mental: Vec::new(),
            goals: Vec::new(),
        };

        snapshot.save(&path).expect("Failed to save snapshot");
        let loaded = Snapshot::load(&path).expect("Failed to load snapshot");

        assert_eq!(loaded.users, snapshot.users);
        assert_eq!(loaded.profiles, snapshot.profiles);
        assert_eq!(loaded.physical, snapshot.physical);
        assert!(loaded.mental.is_empty());
    }

    #[test]
    fn test_missing_sections_default_empty() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("partial.json");
        std::fs::write(&path, r#"{"users": []}"#).expect("Failed to write file");

        let loaded = Snapshot::load(&path).expect("Failed to load snapshot");
        assert!(loaded.physical.is_empty());
        assert!(loaded.goals.is_empty());
    }
}
