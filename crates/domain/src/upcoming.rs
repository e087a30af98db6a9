use crate::date::{local_date, DAY_MILLIS, HOUR_MILLIS, MINUTE_MILLIS};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Time window of upcoming doses
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UpcomingView {
    /// Rest of today
    Today,
    /// The whole next calendar day
    Tomorrow,
    /// The next seven days
    Week,
}

impl Default for UpcomingView {
    fn default() -> Self {
        Self::Today
    }
}

impl UpcomingView {
    /// The largest span after `now` this view can include, used
    /// to bound repository queries.
    pub fn horizon(&self) -> i64 {
        match self {
            Self::Today => DAY_MILLIS,
            Self::Tomorrow => 2 * DAY_MILLIS + HOUR_MILLIS,
            Self::Week => 7 * DAY_MILLIS,
        }
    }

    pub fn includes(&self, scheduled_ts: i64, now: i64, tz: &Tz) -> bool {
        let (scheduled_date, today) = match (local_date(scheduled_ts, tz), local_date(now, tz)) {
            (Some(scheduled_date), Some(today)) => (scheduled_date, today),
            _ => return false,
        };
        match self {
            Self::Today => scheduled_date == today && scheduled_ts > now,
            Self::Tomorrow => today.succ_opt() == Some(scheduled_date),
            Self::Week => scheduled_ts > now && scheduled_ts <= now + 7 * DAY_MILLIS,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Overdue,
    Urgent,
    Soon,
    Upcoming,
}

impl Urgency {
    pub fn new(scheduled_ts: i64, now: i64) -> Self {
        let minutes = (scheduled_ts - now) / MINUTE_MILLIS;
        if minutes < 0 {
            Self::Overdue
        } else if minutes <= 30 {
            Self::Urgent
        } else if minutes <= 120 {
            Self::Soon
        } else {
            Self::Upcoming
        }
    }
}

/// Short human readable label of how long until the dose, e.g. `2h 5m`
pub fn time_until_label(scheduled_ts: i64, now: i64) -> String {
    if scheduled_ts < now {
        return "Overdue".into();
    }

    let diff = scheduled_ts - now;
    let minutes = diff / MINUTE_MILLIS;
    let hours = diff / HOUR_MILLIS;
    if minutes < 60 {
        format!("{}m", minutes)
    } else if hours < 24 {
        format!("{}h {}m", hours, minutes % 60)
    } else {
        format!("{}d {}h", hours / 24, hours % 24)
    }
}
