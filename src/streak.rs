//! Completion streak tracking.
//!
//! The streak record is derived state: a fold over task-completion events.
//! `Streak::on_completion` is the pure recalculation; `StreakStore` owns
//! loading the single record (`streak.json`) and persisting each result.
//! The record is only ever overwritten, never deleted.

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::storage::{Storage, STREAK_KEY};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Streak {
    /// Consecutive calendar days with at least one completion, ending at
    /// `last_completion_date`.
    pub current_streak: u32,
    /// Highest value `current_streak` has ever reached.
    pub longest_streak: u32,
    /// Timestamp of the most recent streak-affecting completion; the date
    /// component is what the day arithmetic runs on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_completion_date: Option<DateTime<Utc>>,
    /// Count of completion events. Monotone: un-completing a task does not
    /// decrement it.
    pub total_completions: u64,
}

impl Streak {
    /// Fold one completion event into the streak.
    ///
    /// Repeats within one calendar day only bump the total and leave the
    /// day anchor untouched. The count grows when the previous completion
    /// was exactly one day earlier and resets to 1 when a full day was
    /// missed (the completion itself starts the new streak).
    pub fn on_completion(&self, completed_at: DateTime<Utc>) -> Streak {
        let total_completions = self.total_completions + 1;

        let last = match self.last_completion_date {
            Some(last) => last,
            None => {
                return Streak {
                    current_streak: 1,
                    longest_streak: self.longest_streak.max(1),
                    last_completion_date: Some(completed_at),
                    total_completions,
                };
            }
        };

        let elapsed_days = (local_day(completed_at) - local_day(last)).num_days();
        if elapsed_days == 0 {
            return Streak {
                total_completions,
                ..self.clone()
            };
        }

        let current_streak = match elapsed_days {
            1 => self.current_streak + 1,
            days if days > 1 => 1,
            _ => self.current_streak,
        };

        Streak {
            current_streak,
            longest_streak: self.longest_streak.max(current_streak),
            last_completion_date: Some(completed_at),
            total_completions,
        }
    }
}

/// The calendar day a timestamp falls on, in the user's timezone.
fn local_day(at: DateTime<Utc>) -> NaiveDate {
    at.with_timezone(&Local).date_naive()
}

/// Streak record synchronized to storage.
#[derive(Debug, Clone)]
pub struct StreakStore {
    storage: Storage,
    streak: Streak,
}

impl StreakStore {
    /// Load the persisted record; a missing or unreadable blob starts from
    /// all zeroes (read failures are logged inside the storage layer).
    pub fn load(storage: Storage) -> Self {
        let streak = storage.get_item(STREAK_KEY).unwrap_or_default();
        Self { storage, streak }
    }

    pub fn streak(&self) -> &Streak {
        &self.streak
    }

    /// Record one completion event and persist the updated record.
    pub fn record_completion(&mut self, completed_at: DateTime<Utc>) -> &Streak {
        self.streak = self.streak.on_completion(completed_at);
        self.storage.set_item(STREAK_KEY, &self.streak);
        &self.streak
    }
}
