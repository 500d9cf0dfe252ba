//! Synchronization controller
//!
//! Owns the canonical habit collection for a client session. Every command
//! applies to local state first, mirrors it to the snapshot store, and only
//! then (when online) replays it against the gateway. Remote failures switch
//! the session to offline mode until an explicit resync succeeds; local
//! changes are never rolled back.

use super::SyncMode;
use crate::error::{Error, Result};
use crate::gateway::{GatewayError, HabitGateway};
use crate::models::{default_habits, Habit, HabitDraft, HabitId};
use crate::snapshot::{SnapshotBackend, SnapshotStore};
use crate::views::{collect_categories, daily_score, filter_habits, CategoryFilter, HabitSummary};

pub const INITIAL_LOAD_FAILED_MESSAGE: &str =
    "Could not reach the server. Working offline with local data.";
pub const RESYNC_FAILED_MESSAGE: &str = "Sync failed. Still working offline.";

pub struct SyncController<G, B> {
    gateway: G,
    snapshot: SnapshotStore<B>,
    habits: Vec<Habit>,
    mode: SyncMode,
    last_error: Option<String>,
    /// Set once the initial load finished; nothing is mirrored before that.
    has_loaded: bool,
    selected_category: CategoryFilter,
}

impl<G: HabitGateway, B: SnapshotBackend> SyncController<G, B> {
    /// New session holding the stored collection until loaded.
    ///
    /// Falls back to the built-in defaults when the snapshot is missing or
    /// empty. Nothing is written back until `initial_load` finishes.
    pub fn new(gateway: G, snapshot: SnapshotStore<B>) -> Self {
        let habits = snapshot
            .read()
            .filter(|stored| !stored.is_empty())
            .unwrap_or_else(default_habits);
        Self {
            gateway,
            snapshot,
            habits,
            mode: SyncMode::Loading,
            last_error: None,
            has_loaded: false,
            selected_category: CategoryFilter::All,
        }
    }

    /// Replace the pre-load collection.
    #[must_use]
    pub fn with_habits(mut self, habits: Vec<Habit>) -> Self {
        self.habits = habits;
        self
    }

    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub const fn mode(&self) -> SyncMode {
        self.mode
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub const fn has_loaded(&self) -> bool {
        self.has_loaded
    }

    pub const fn gateway(&self) -> &G {
        &self.gateway
    }

    pub const fn snapshot(&self) -> &SnapshotStore<B> {
        &self.snapshot
    }

    pub const fn selected_category(&self) -> &CategoryFilter {
        &self.selected_category
    }

    pub fn find(&self, id: &HabitId) -> Option<&Habit> {
        self.habits.iter().find(|habit| habit.id == *id)
    }

    /// Habits matching the selected category.
    pub fn visible_habits(&self) -> Vec<&Habit> {
        filter_habits(&self.habits, &self.selected_category)
    }

    pub fn categories(&self) -> Vec<String> {
        collect_categories(&self.habits)
    }

    pub fn daily_score(&self) -> f64 {
        daily_score(&self.habits)
    }

    pub fn summary(&self) -> HabitSummary {
        HabitSummary {
            visible: self.visible_habits().len(),
            total: self.habits.len(),
            score: self.daily_score(),
        }
    }

    pub fn select_category(&mut self, filter: CategoryFilter) {
        self.selected_category = filter;
    }

    /// First load of the session.
    ///
    /// The remote list wins when it has data. An empty remote list never
    /// replaces local data. When the server is unreachable the snapshot is
    /// used, or the built-in defaults if there is no snapshot.
    pub async fn initial_load(&mut self) {
        self.last_error = None;
        self.set_mode(SyncMode::Loading);

        match self.gateway.list().await {
            Ok(remote) => self.adopt_remote(remote),
            Err(error) => {
                tracing::warn!("Initial habit load failed: {}", error);
                self.set_mode(SyncMode::Offline);
                self.last_error = Some(INITIAL_LOAD_FAILED_MESSAGE.to_string());
                self.habits = match self.snapshot.read() {
                    Some(stored) if !stored.is_empty() => stored,
                    _ => default_habits(),
                };
            }
        }

        self.has_loaded = true;
        self.persist();
    }

    /// Fetch the remote list again, whatever the current mode.
    ///
    /// This is the only way back to online mode after a failure. On failure
    /// the local collection is left as it is.
    pub async fn resync(&mut self) {
        self.last_error = None;

        match self.gateway.list().await {
            Ok(remote) => {
                self.adopt_remote(remote);
                self.persist();
            }
            Err(error) => {
                tracing::warn!("Habit resync failed: {}", error);
                self.set_mode(SyncMode::Offline);
                self.last_error = Some(RESYNC_FAILED_MESSAGE.to_string());
            }
        }
    }

    /// Validate and add a habit at the head of the list.
    ///
    /// Returns the id the record holds afterwards: the server id when the
    /// create was acknowledged, the temporary id otherwise.
    pub async fn create(&mut self, draft: &HabitDraft) -> Result<HabitId> {
        self.last_error = None;
        let draft = match draft.validate() {
            Ok(draft) => draft,
            Err(error) => return self.fail(error.into()),
        };

        let local_id = HabitId::local();
        self.habits
            .insert(0, Habit::from_draft(local_id.clone(), &draft));
        self.persist();

        if self.mode != SyncMode::Online {
            return Ok(local_id);
        }

        match self.gateway.create(&draft).await {
            Ok(created) => {
                let server_id = created.id.clone();
                self.replace(&local_id, created);
                Ok(server_id)
            }
            Err(error) => {
                self.remote_failed("create", &error);
                Ok(local_id)
            }
        }
    }

    /// Flip today's completion flag.
    pub async fn toggle(&mut self, id: &HabitId) -> Result<()> {
        self.last_error = None;
        let Some(slot) = self.position(id) else {
            return self.fail(Error::NotFound(id.to_string()));
        };

        self.habits[slot].toggle();
        self.persist();

        let Some(server_id) = id.server_id() else {
            return Ok(());
        };
        if self.mode != SyncMode::Online {
            return Ok(());
        }

        match self.gateway.toggle(server_id).await {
            Ok(updated) => self.replace(id, updated),
            Err(error) => self.remote_failed("toggle", &error),
        }
        Ok(())
    }

    /// Remove a habit. A requested delete is never undone locally.
    pub async fn delete(&mut self, id: &HabitId) -> Result<()> {
        self.last_error = None;
        let Some(slot) = self.position(id) else {
            return self.fail(Error::NotFound(id.to_string()));
        };

        self.habits.remove(slot);
        self.persist();

        let Some(server_id) = id.server_id() else {
            return Ok(());
        };
        if self.mode != SyncMode::Online {
            return Ok(());
        }

        if let Err(error) = self.gateway.delete(server_id).await {
            self.remote_failed("delete", &error);
        }
        Ok(())
    }

    fn adopt_remote(&mut self, remote: Vec<Habit>) {
        if remote.is_empty() {
            tracing::info!("Server returned no habits; keeping the local collection");
        } else {
            tracing::debug!(count = remote.len(), "Adopted remote habit list");
            self.habits = remote;
        }
        self.set_mode(SyncMode::Online);
    }

    fn replace(&mut self, id: &HabitId, habit: Habit) {
        if let Some(slot) = self.position(id) {
            self.habits[slot] = habit;
            self.persist();
        } else {
            tracing::debug!(id = %id, "Habit disappeared before the server answered");
        }
    }

    fn remote_failed(&mut self, operation: &str, error: &GatewayError) {
        tracing::warn!(operation, "Remote habit call failed: {}", error);
        self.set_mode(SyncMode::Offline);
        self.last_error = Some(error.to_string());
    }

    fn fail<T>(&mut self, error: Error) -> Result<T> {
        self.last_error = Some(error.to_string());
        Err(error)
    }

    fn set_mode(&mut self, mode: SyncMode) {
        if self.mode != mode {
            tracing::info!(from = %self.mode, to = %mode, "Sync mode changed");
        }
        self.mode = mode;
    }

    fn position(&self, id: &HabitId) -> Option<usize> {
        self.habits.iter().position(|habit| habit.id == *id)
    }

    fn persist(&self) {
        if self.has_loaded {
            self.snapshot.write(&self.habits);
        }
    }
}
