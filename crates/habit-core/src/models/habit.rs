//! Habit model

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use super::ValidDraft;

const LOCAL_ID_PREFIX: &str = "local-";

/// Identifier of a habit, tagged with where it came from.
///
/// Server ids are opaque strings assigned by the API. Local ids are generated
/// on the client for records the server has not acknowledged yet; they never
/// leave the client through the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HabitId {
    Server(String),
    Local(Uuid),
}

impl HabitId {
    /// Create a new temporary id using UUID v7
    #[must_use]
    pub fn local() -> Self {
        Self::Local(Uuid::now_v7())
    }

    #[must_use]
    pub fn server(id: impl Into<String>) -> Self {
        Self::Server(id.into())
    }

    pub const fn is_local(&self) -> bool {
        matches!(self, Self::Local(_))
    }

    /// The id to use for remote calls, if this record has a remote counterpart.
    pub fn server_id(&self) -> Option<&str> {
        match self {
            Self::Server(id) => Some(id),
            Self::Local(_) => None,
        }
    }
}

impl fmt::Display for HabitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Server(id) => f.write_str(id),
            Self::Local(uuid) => write!(f, "{LOCAL_ID_PREFIX}{uuid}"),
        }
    }
}

impl From<&str> for HabitId {
    fn from(value: &str) -> Self {
        value
            .strip_prefix(LOCAL_ID_PREFIX)
            .and_then(|rest| Uuid::parse_str(rest).ok())
            .map_or_else(|| Self::Server(value.to_string()), Self::Local)
    }
}

impl Serialize for HabitId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for HabitId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from(raw.as_str()))
    }
}

/// A habit with its daily completion flag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: HabitId,
    pub name: String,
    pub category: String,
    /// Signed, always finite
    pub points: f64,
    pub is_done_today: bool,
}

impl Habit {
    /// Build a not-yet-done habit from a validated draft
    #[must_use]
    pub fn from_draft(id: HabitId, draft: &ValidDraft) -> Self {
        Self {
            id,
            name: draft.name.clone(),
            category: draft.category.clone(),
            points: draft.points,
            is_done_today: false,
        }
    }

    pub fn toggle(&mut self) {
        self.is_done_today = !self.is_done_today;
    }

    /// Points this habit adds to today's score
    #[must_use]
    pub fn score_contribution(&self) -> f64 {
        if self.is_done_today {
            self.points
        } else {
            0.0
        }
    }
}

/// The built-in collection shown when neither the server nor a snapshot has data.
#[must_use]
pub fn default_habits() -> Vec<Habit> {
    vec![
        Habit {
            id: HabitId::server("h1"),
            name: "Walk 20 minutes".to_string(),
            category: "Health".to_string(),
            points: 2.0,
            is_done_today: false,
        },
        Habit {
            id: HabitId::server("h2"),
            name: "Read 10 pages".to_string(),
            category: "Mind".to_string(),
            points: 1.0,
            is_done_today: true,
        },
        Habit {
            id: HabitId::server("h3"),
            name: "Late-night sugar".to_string(),
            category: "Food".to_string(),
            points: -2.0,
            is_done_today: false,
        },
    ]
}
