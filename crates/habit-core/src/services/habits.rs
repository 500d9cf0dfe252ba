//! Shared habit service wrapper used by the API.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::db::{Database, HabitRepository, LibSqlHabitRepository};
use crate::models::{default_habits, Habit, ValidDraft};
use crate::Result;

/// Thread-safe service for habit persistence.
#[derive(Clone)]
pub struct HabitService {
    db: Arc<Mutex<Database>>,
}

impl HabitService {
    /// Open a service backed by a database file, creating parent directories.
    pub async fn open_path(db_path: impl Into<PathBuf>) -> Result<Self> {
        let db_path = db_path.into();
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        tracing::info!("Opening habit database at {}", db_path.display());
        let db = Database::open(&db_path).await?;
        Ok(Self::from_database(db))
    }

    /// Open an in-memory service.
    pub async fn open_in_memory() -> Result<Self> {
        let db = Database::open_in_memory().await?;
        Ok(Self::from_database(db))
    }

    fn from_database(db: Database) -> Self {
        Self {
            db: Arc::new(Mutex::new(db)),
        }
    }

    /// List habits newest-first.
    pub async fn list_habits(&self) -> Result<Vec<Habit>> {
        let db = self.db.lock().await;
        let repo = LibSqlHabitRepository::new(db.connection());
        repo.list().await
    }

    /// Create a habit from a validated draft.
    pub async fn create_habit(&self, draft: &ValidDraft) -> Result<Habit> {
        let db = self.db.lock().await;
        let repo = LibSqlHabitRepository::new(db.connection());
        let habit = repo.create(draft).await?;
        tracing::debug!("Created habit {}", habit.id);
        Ok(habit)
    }

    /// Flip the daily completion flag of a habit.
    pub async fn toggle_habit(&self, id: &str) -> Result<Habit> {
        let db = self.db.lock().await;
        let repo = LibSqlHabitRepository::new(db.connection());
        repo.toggle(id).await
    }

    /// Delete a habit.
    pub async fn delete_habit(&self, id: &str) -> Result<()> {
        let db = self.db.lock().await;
        let repo = LibSqlHabitRepository::new(db.connection());
        repo.delete(id).await
    }

    /// Insert the default collection when the database holds no habits.
    ///
    /// Returns the number of habits inserted.
    pub async fn seed_defaults_if_empty(&self) -> Result<usize> {
        let db = self.db.lock().await;
        let repo = LibSqlHabitRepository::new(db.connection());
        if repo.count().await? > 0 {
            return Ok(0);
        }

        // Inserted oldest-first so listing returns them in their natural order.
        let defaults = default_habits();
        for habit in defaults.iter().rev() {
            repo.insert(habit).await?;
        }
        tracing::info!("Seeded {} default habits", defaults.len());
        Ok(defaults.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn draft(name: &str) -> ValidDraft {
        ValidDraft {
            name: name.to_string(),
            category: "Mind".to_string(),
            points: 1.0,
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn seeds_defaults_only_once() {
        let service = HabitService::open_in_memory().await.unwrap();

        assert_eq!(service.seed_defaults_if_empty().await.unwrap(), 3);
        assert_eq!(service.seed_defaults_if_empty().await.unwrap(), 0);

        let ids = service
            .list_habits()
            .await
            .unwrap()
            .into_iter()
            .map(|habit| habit.id.to_string())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["h1", "h2", "h3"]);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn create_toggle_delete_round() {
        let service = HabitService::open_in_memory().await.unwrap();

        let habit = service.create_habit(&draft("Stretch")).await.unwrap();
        let id = habit.id.to_string();
        assert!(service.toggle_habit(&id).await.unwrap().is_done_today);

        service.delete_habit(&id).await.unwrap();
        assert!(service.list_habits().await.unwrap().is_empty());
        assert!(matches!(
            service.delete_habit(&id).await,
            Err(Error::NotFound(_))
        ));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn open_path_creates_parent_directories() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("nested").join("habits.db");

        let service = HabitService::open_path(&path).await.unwrap();
        service.create_habit(&draft("Journal")).await.unwrap();
        drop(service);

        let reopened = HabitService::open_path(&path).await.unwrap();
        assert_eq!(reopened.list_habits().await.unwrap().len(), 1);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn clones_share_one_database() {
        let service = HabitService::open_in_memory().await.unwrap();
        let clone = service.clone();

        clone.create_habit(&draft("Meditate")).await.unwrap();
        assert_eq!(service.list_habits().await.unwrap().len(), 1);
    }
}
