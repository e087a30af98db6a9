use crate::date::{parse_timestamp, MINUTE_MILLIS};
use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How long after its scheduled time a `Reminder` counts as `Due`.
/// Past this it is `Missed`.
pub const MISSED_AFTER_MILLIS: i64 = 30 * MINUTE_MILLIS;

/// A `Reminder` is a single scheduled dose of a `Medicine`.
///
/// `Reminder`s are never deleted. They are hidden together with their
/// `Medicine` when it is deactivated, or on their own when they are
/// superseded by a new schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub id: ID,
    /// The `Medicine` this dose belongs to
    pub medicine_id: ID,
    /// The `User` owning the `Medicine`
    pub user_id: ID,
    /// Timestamp in millis at which the dose should be taken
    pub scheduled_ts: i64,
    pub taken: bool,
    pub skipped: bool,
    pub taken_at: Option<i64>,
    pub notes: Option<String>,
    pub priority: Priority,
    /// Set when the schedule of the `Medicine` changed before the dose was
    /// acted upon. Superseded reminders are left out of every read.
    pub superseded: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Default for Priority {
    fn default() -> Self {
        Self::Medium
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReminderStatus {
    Taken,
    Skipped,
    Missed,
    Due,
    Upcoming,
}

#[derive(Error, Debug, PartialEq)]
pub enum ReminderError {
    #[error("A reminder can not be both taken and skipped")]
    TakenAndSkipped,
    #[error("The reminder has no scheduled time")]
    MissingScheduledTime,
    #[error("The scheduled time: `{0}` is not a valid ISO-8601 timestamp")]
    InvalidScheduledTime(String),
}

impl ReminderStatus {
    /// Derives the status of a dose at the instant `now`.
    ///
    /// Rules are checked in order: taken, skipped, missed (scheduled more than
    /// `MISSED_AFTER_MILLIS` before `now`), due (scheduled before `now`) and
    /// otherwise upcoming. Exactly `MISSED_AFTER_MILLIS` ago is still due.
    pub fn evaluate(
        scheduled_ts: i64,
        taken: bool,
        skipped: bool,
        now: i64,
    ) -> Result<Self, ReminderError> {
        if taken && skipped {
            return Err(ReminderError::TakenAndSkipped);
        }

        let status = if taken {
            Self::Taken
        } else if skipped {
            Self::Skipped
        } else if scheduled_ts < now - MISSED_AFTER_MILLIS {
            Self::Missed
        } else if scheduled_ts < now {
            Self::Due
        } else {
            Self::Upcoming
        };
        Ok(status)
    }
}

impl Reminder {
    pub fn new(medicine_id: ID, user_id: ID, scheduled_ts: i64, priority: Priority) -> Self {
        Self {
            id: Default::default(),
            medicine_id,
            user_id,
            scheduled_ts,
            taken: false,
            skipped: false,
            taken_at: None,
            notes: None,
            priority,
            superseded: false,
        }
    }

    pub fn status(&self, now: i64) -> Result<ReminderStatus, ReminderError> {
        ReminderStatus::evaluate(self.scheduled_ts, self.taken, self.skipped, now)
    }

    /// Logs that the dose was either taken or skipped. The two flags are
    /// always set as a pair so they can never both be true.
    pub fn log_action(&mut self, taken: bool, notes: Option<String>, now: i64) {
        self.taken = taken;
        self.skipped = !taken;
        self.taken_at = if taken { Some(now) } else { None };
        if notes.is_some() {
            self.notes = notes;
        }
    }

    /// Whole minutes until the dose is scheduled, rounded up.
    /// `None` when the scheduled time has already passed.
    pub fn minutes_until(&self, now: i64) -> Option<i64> {
        let diff = self.scheduled_ts - now;
        if diff > 0 {
            Some(ceil_minutes(diff))
        } else {
            None
        }
    }

    /// Whole minutes the dose is overdue by, rounded up.
    /// `None` unless the reminder is missed.
    pub fn minutes_overdue(&self, now: i64) -> Option<i64> {
        match self.status(now) {
            Ok(ReminderStatus::Missed) => Some(ceil_minutes(now - self.scheduled_ts)),
            _ => None,
        }
    }
}

fn ceil_minutes(millis: i64) -> i64 {
    (millis + MINUTE_MILLIS - 1).div_euclid(MINUTE_MILLIS)
}

impl Entity for Reminder {
    fn id(&self) -> &ID {
        &self.id
    }
}

/// A plain reminder record as sent by clients which have not
/// stored the reminder on the server.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderRecord {
    #[serde(default)]
    pub scheduled_time: Option<String>,
    #[serde(default)]
    pub taken: bool,
    #[serde(default)]
    pub skipped: bool,
}

impl ReminderRecord {
    pub fn scheduled_ts(&self) -> Result<i64, ReminderError> {
        let scheduled_time = match &self.scheduled_time {
            Some(scheduled_time) => scheduled_time,
            None => return Err(ReminderError::MissingScheduledTime),
        };
        parse_timestamp(scheduled_time)
            .ok_or_else(|| ReminderError::InvalidScheduledTime(scheduled_time.clone()))
    }

    pub fn status(&self, now: i64) -> Result<ReminderStatus, ReminderError> {
        let scheduled_ts = self.scheduled_ts()?;
        ReminderStatus::evaluate(scheduled_ts, self.taken, self.skipped, now)
    }
}

/// Which of the days reminders to list
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReminderFilter {
    All,
    /// Not acted upon and still in the future
    Pending,
    Completed,
    Missed,
}

impl Default for ReminderFilter {
    fn default() -> Self {
        Self::All
    }
}

impl ReminderFilter {
    pub fn matches(&self, reminder: &Reminder, now: i64) -> bool {
        match self {
            Self::All => true,
            Self::Pending => !reminder.taken && !reminder.skipped && reminder.scheduled_ts > now,
            Self::Completed => reminder.taken,
            Self::Missed => matches!(reminder.status(now), Ok(ReminderStatus::Missed)),
        }
    }

    /// Keeps the matching reminders ordered by scheduled time
    pub fn apply(&self, reminders: Vec<Reminder>, now: i64) -> Vec<Reminder> {
        let mut reminders = reminders
            .into_iter()
            .filter(|r| self.matches(r, now))
            .collect::<Vec<_>>();
        reminders.sort_by_key(|r| r.scheduled_ts);
        reminders
    }
}
