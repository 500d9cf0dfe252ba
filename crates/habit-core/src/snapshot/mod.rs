//! Local snapshot store: a best-effort durable mirror of the habit list.
//!
//! Reads never fail: anything unreadable comes back as `None` and individual
//! entries are sanitized. Writes never fail either; errors are logged and the
//! caller carries on.

mod backend;

use serde_json::{Map, Value};

pub use backend::{FileSnapshotBackend, MemorySnapshotBackend, SnapshotBackend, DEFAULT_SNAPSHOT_FILE};

use crate::models::{Habit, HabitId};

const FALLBACK_NAME: &str = "Unnamed";
const FALLBACK_CATEGORY: &str = "General";

/// Snapshot store over a single storage slot.
#[derive(Debug, Clone)]
pub struct SnapshotStore<B> {
    backend: B,
}

impl<B: SnapshotBackend> SnapshotStore<B> {
    pub const fn new(backend: B) -> Self {
        Self { backend }
    }

    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Read the stored collection, or `None` if there is nothing usable.
    pub fn read(&self) -> Option<Vec<Habit>> {
        let raw = match self.backend.load_raw() {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(error) => {
                tracing::warn!("Failed to read habit snapshot: {}", error);
                return None;
            }
        };

        parse_snapshot(&raw)
    }

    /// Mirror the full collection into the slot.
    pub fn write(&self, habits: &[Habit]) {
        let raw = match serde_json::to_string(habits) {
            Ok(raw) => raw,
            Err(error) => {
                tracing::warn!("Failed to serialize habit snapshot: {}", error);
                return;
            }
        };

        if let Err(error) = self.backend.save_raw(&raw) {
            tracing::warn!("Failed to write habit snapshot: {}", error);
        }
    }
}

/// Parse and sanitize a raw snapshot payload.
pub fn parse_snapshot(raw: &str) -> Option<Vec<Habit>> {
    if raw.trim().is_empty() {
        return None;
    }

    let parsed: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(error) => {
            tracing::warn!("Habit snapshot is not valid JSON: {}", error);
            return None;
        }
    };

    let Value::Array(entries) = parsed else {
        tracing::warn!("Habit snapshot is not a JSON array; ignoring it");
        return None;
    };

    Some(
        entries
            .iter()
            .filter_map(Value::as_object)
            .map(sanitize_entry)
            .collect(),
    )
}

fn sanitize_entry(entry: &Map<String, Value>) -> Habit {
    let id = entry
        .get("id")
        .and_then(Value::as_str)
        .map_or_else(HabitId::local, HabitId::from);

    Habit {
        id,
        name: text_or(entry.get("name"), FALLBACK_NAME),
        category: text_or(entry.get("category"), FALLBACK_CATEGORY),
        points: entry.get("points").map_or(0.0, coerce_number),
        is_done_today: entry.get("isDoneToday").is_some_and(is_truthy),
    }
}

fn text_or(value: Option<&Value>, fallback: &str) -> String {
    value
        .and_then(Value::as_str)
        .unwrap_or(fallback)
        .to_string()
}

/// Lenient numeric coercion; anything that is not a finite number becomes 0.
fn coerce_number(value: &Value) -> f64 {
    let number = match value {
        Value::Number(number) => number.as_f64().unwrap_or(0.0),
        Value::String(raw) => {
            let raw = raw.trim();
            if raw.is_empty() {
                0.0
            } else {
                raw.parse::<f64>().unwrap_or(0.0)
            }
        }
        Value::Bool(flag) => f64::from(u8::from(*flag)),
        Value::Null | Value::Array(_) | Value::Object(_) => 0.0,
    };

    if number.is_finite() {
        number
    } else {
        0.0
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(raw) => !raw.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::default_habits;
    use pretty_assertions::assert_eq;

    fn memory_store() -> SnapshotStore<MemorySnapshotBackend> {
        SnapshotStore::new(MemorySnapshotBackend::default())
    }

    #[test]
    fn empty_slot_reads_as_none() {
        assert_eq!(memory_store().read(), None);
    }

    #[test]
    fn write_then_read_returns_collection() {
        let store = memory_store();
        let mut habits = default_habits();
        habits.insert(
            0,
            Habit {
                id: HabitId::local(),
                name: "Drink water".to_string(),
                category: "Health".to_string(),
                points: 1.0,
                is_done_today: false,
            },
        );

        store.write(&habits);
        assert_eq!(store.read(), Some(habits));
    }

    #[test]
    fn malformed_payloads_read_as_none() {
        assert_eq!(parse_snapshot("{not json"), None);
        assert_eq!(parse_snapshot(r#"{"habits": []}"#), None);
        assert_eq!(parse_snapshot("   "), None);
        assert_eq!(parse_snapshot("[]"), Some(Vec::new()));
    }

    #[test]
    fn entries_are_sanitized_individually() {
        let raw = r#"[
            {"id": "h1", "name": "Walk", "category": "Health", "points": "2", "isDoneToday": 1},
            {"id": 7, "name": null, "points": "lots", "isDoneToday": "yes"},
            42,
            null,
            {"id": "h3", "name": "Sugar", "category": "Food", "points": -2, "isDoneToday": 0}
        ]"#;

        let habits = parse_snapshot(raw).unwrap();
        assert_eq!(habits.len(), 3);

        assert_eq!(habits[0].id, HabitId::server("h1"));
        assert!((habits[0].points - 2.0).abs() < f64::EPSILON);
        assert!(habits[0].is_done_today);

        assert!(habits[1].id.is_local());
        assert_eq!(habits[1].name, "Unnamed");
        assert_eq!(habits[1].category, "General");
        assert!(habits[1].points.abs() < f64::EPSILON);
        assert!(habits[1].is_done_today);

        assert!((habits[2].points + 2.0).abs() < f64::EPSILON);
        assert!(!habits[2].is_done_today);
    }

    #[test]
    fn generated_ids_are_unique() {
        let habits = parse_snapshot(r#"[{"name": "a"}, {"name": "b"}]"#).unwrap();
        assert_ne!(habits[0].id, habits[1].id);
    }

    #[test]
    fn failing_backend_is_soft() {
        let store = SnapshotStore::new(FileSnapshotBackend::new("/dev/null/habits.json"));
        store.write(&default_habits());
        assert_eq!(store.read(), None);
    }
}
