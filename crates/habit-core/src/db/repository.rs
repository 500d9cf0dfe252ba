//! Habit repository implementation

use libsql::{params, Connection, Row};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::{Habit, HabitId, ValidDraft};
use crate::util::unix_millis_now;

const SELECT_COLUMNS: &str = "SELECT id, name, category, points, is_done_today FROM habits";

/// Trait for habit storage operations (async)
#[allow(async_fn_in_trait)]
pub trait HabitRepository {
    /// List all habits, newest first
    async fn list(&self) -> Result<Vec<Habit>>;

    /// Get a habit by ID
    async fn get(&self, id: &str) -> Result<Option<Habit>>;

    /// Create a habit from a validated draft with a fresh server id
    async fn create(&self, draft: &ValidDraft) -> Result<Habit>;

    /// Insert a complete record, keeping its id
    async fn insert(&self, habit: &Habit) -> Result<()>;

    /// Flip `is_done_today` and return the updated habit
    async fn toggle(&self, id: &str) -> Result<Habit>;

    /// Delete a habit
    async fn delete(&self, id: &str) -> Result<()>;

    /// Number of stored habits
    async fn count(&self) -> Result<usize>;
}

/// libSQL implementation of `HabitRepository`
pub struct LibSqlHabitRepository<'a> {
    conn: &'a Connection,
}

impl<'a> LibSqlHabitRepository<'a> {
    /// Create a new repository with the given connection
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    fn parse_habit(row: &Row) -> Result<Habit> {
        let id: String = row.get(0)?;
        Ok(Habit {
            id: HabitId::server(id),
            name: row.get(1)?,
            category: row.get(2)?,
            points: row.get(3)?,
            is_done_today: row.get::<i64>(4)? != 0,
        })
    }
}

impl HabitRepository for LibSqlHabitRepository<'_> {
    async fn list(&self) -> Result<Vec<Habit>> {
        let mut rows = self
            .conn
            .query(
                &format!("{SELECT_COLUMNS} ORDER BY created_at DESC, rowid DESC"),
                (),
            )
            .await?;

        let mut habits = Vec::new();
        while let Some(row) = rows.next().await? {
            habits.push(Self::parse_habit(&row)?);
        }
        Ok(habits)
    }

    async fn get(&self, id: &str) -> Result<Option<Habit>> {
        let mut rows = self
            .conn
            .query(&format!("{SELECT_COLUMNS} WHERE id = ?"), [id])
            .await?;

        match rows.next().await? {
            Some(row) => Ok(Some(Self::parse_habit(&row)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, draft: &ValidDraft) -> Result<Habit> {
        let habit = Habit::from_draft(HabitId::server(Uuid::now_v7().to_string()), draft);
        self.insert(&habit).await?;
        Ok(habit)
    }

    async fn insert(&self, habit: &Habit) -> Result<()> {
        if !habit.points.is_finite() {
            return Err(Error::InvalidInput("points must be finite".into()));
        }

        self.conn
            .execute(
                "INSERT INTO habits (id, name, category, points, is_done_today, created_at)
                 VALUES (?, ?, ?, ?, ?, ?)",
                params![
                    habit.id.to_string(),
                    habit.name.as_str(),
                    habit.category.as_str(),
                    habit.points,
                    i64::from(habit.is_done_today),
                    unix_millis_now()
                ],
            )
            .await?;
        Ok(())
    }

    async fn toggle(&self, id: &str) -> Result<Habit> {
        let rows = self
            .conn
            .execute(
                "UPDATE habits SET is_done_today = 1 - is_done_today WHERE id = ?",
                [id],
            )
            .await?;

        if rows == 0 {
            return Err(Error::NotFound(id.to_string()));
        }

        self.get(id)
            .await?
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let rows = self
            .conn
            .execute("DELETE FROM habits WHERE id = ?", [id])
            .await?;

        if rows == 0 {
            return Err(Error::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn count(&self) -> Result<usize> {
        let mut rows = self.conn.query("SELECT COUNT(*) FROM habits", ()).await?;
        let count: i64 = match rows.next().await? {
            Some(row) => row.get(0)?,
            None => 0,
        };
        usize::try_from(count).map_err(|error| Error::Database(error.to_string()))
    }
}
