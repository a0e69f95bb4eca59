//! Reminder milestone selection

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Reminder milestones, minutes before tournament start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "reminder_milestone", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Milestone {
    M30,
    M20,
    M5,
}

impl Milestone {
    /// All milestones in descending lead-time order
    pub const ALL: [Milestone; 3] = [Milestone::M30, Milestone::M20, Milestone::M5];

    /// Lead time before start at which this milestone becomes due
    pub fn minutes(self) -> i64 {
        match self {
            Self::M30 => 30,
            Self::M20 => 20,
            Self::M5 => 5,
        }
    }

    /// Milestones due at `now` for a tournament starting at `start_time`.
    ///
    /// A milestone is due once `now` has reached its lead-time boundary and
    /// the tournament has not yet started. A tick that was delayed past
    /// several boundaries returns all of them; deduplication happens at the
    /// database, not here.
    pub fn due(start_time: DateTime<Utc>, now: DateTime<Utc>) -> Vec<Milestone> {
        if now >= start_time {
            return Vec::new();
        }
        Self::ALL
            .into_iter()
            .filter(|m| now >= start_time - Duration::minutes(m.minutes()))
            .collect()
    }
}

impl std::fmt::Display for Milestone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::M30 => write!(f, "m30"),
            Self::M20 => write!(f, "m20"),
            Self::M5 => write!(f, "m5"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 18, 0, 0).unwrap()
    }

    #[test]
    fn test_nothing_due_before_m30_window() {
        let now = start() - Duration::minutes(31);
        assert!(Milestone::due(start(), now).is_empty());
    }

    #[test]
    fn test_m30_due_exactly_at_boundary() {
        let now = start() - Duration::minutes(30);
        assert_eq!(Milestone::due(start(), now), vec![Milestone::M30]);
    }

    #[test]
    fn test_delayed_tick_returns_all_missed_milestones() {
        let now = start() - Duration::minutes(4);
        assert_eq!(
            Milestone::due(start(), now),
            vec![Milestone::M30, Milestone::M20, Milestone::M5]
        );
    }

    #[test]
    fn test_mid_window_returns_elapsed_boundaries_only() {
        let now = start() - Duration::minutes(15);
        assert_eq!(
            Milestone::due(start(), now),
            vec![Milestone::M30, Milestone::M20]
        );
    }

    #[test]
    fn test_nothing_due_at_or_after_start() {
        assert!(Milestone::due(start(), start()).is_empty());
        assert!(Milestone::due(start(), start() + Duration::minutes(1)).is_empty());
    }
}
