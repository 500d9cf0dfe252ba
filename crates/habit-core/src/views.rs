//! Derived, read-only views over a habit collection (score, categories, filter).

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::models::Habit;

/// Category filter selected by the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    pub fn matches(&self, habit: &Habit) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => habit.category == *category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            Ok(Self::Only(value.to_string()))
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("All"),
            Self::Only(category) => f.write_str(category),
        }
    }
}

/// Whether today's score is on the good side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScoreTone {
    Positive,
    Negative,
}

impl ScoreTone {
    pub fn of(score: f64) -> Self {
        if score >= 0.0 {
            Self::Positive
        } else {
            Self::Negative
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Negative => "Negative",
        }
    }
}

/// Counts and score shown alongside the list
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HabitSummary {
    pub visible: usize,
    pub total: usize,
    pub score: f64,
}

/// Sum of points over the habits marked done today.
#[must_use]
pub fn daily_score(habits: &[Habit]) -> f64 {
    habits.iter().map(Habit::score_contribution).sum()
}

/// Return a deduplicated list of non-empty categories in dictionary order.
///
/// Letter case is ignored when ordering; on a tie the lowercase spelling
/// comes first.
#[must_use]
pub fn collect_categories(habits: &[Habit]) -> Vec<String> {
    let mut categories: Vec<String> = habits
        .iter()
        .map(|habit| habit.category.as_str())
        .filter(|category| !category.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    categories.sort_by(|a, b| {
        a.to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| b.cmp(a))
    });
    categories
}

#[must_use]
pub fn filter_habits<'a>(habits: &'a [Habit], filter: &CategoryFilter) -> Vec<&'a Habit> {
    habits.iter().filter(|habit| filter.matches(habit)).collect()
}
