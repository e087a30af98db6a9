use crate::date::{format_date, local_date};
use crate::reminder::Reminder;
use chrono::{Duration, NaiveDate};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use thiserror::Error;

/// Scheduled and taken doses of a single day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DayStat {
    #[serde(default)]
    pub day: String,
    pub scheduled: i64,
    pub taken: i64,
}

impl DayStat {
    pub fn new(day: String, scheduled: i64, taken: i64) -> Self {
        Self {
            day,
            scheduled,
            taken,
        }
    }

    fn validate(&self) -> Result<(), AdherenceError> {
        if self.scheduled < 0 || self.taken < 0 {
            return Err(AdherenceError::NegativeCount(self.day.clone()));
        }
        if self.taken > self.scheduled {
            return Err(AdherenceError::TakenExceedsScheduled(self.day.clone()));
        }
        Ok(())
    }

    pub fn is_fully_adherent(&self) -> bool {
        self.scheduled > 0 && self.taken == self.scheduled
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum AdherenceError {
    #[error("Day `{0}` has a negative dose count")]
    NegativeCount(String),
    #[error("Day `{0}` has more taken than scheduled doses")]
    TakenExceedsScheduled(String),
}

/// Percentage of the scheduled doses that were taken, rounded to the
/// nearest integer (halves round up). Zero when nothing was scheduled.
pub fn adherence_percent(stats: &[DayStat]) -> Result<u8, AdherenceError> {
    // Counts are summed in i128 so any number of i64 days fits
    let mut total_scheduled: i128 = 0;
    let mut total_taken: i128 = 0;
    for stat in stats {
        stat.validate()?;
        total_scheduled += i128::from(stat.scheduled);
        total_taken += i128::from(stat.taken);
    }

    if total_scheduled == 0 {
        return Ok(0);
    }
    let percent = (200 * total_taken + total_scheduled) / (2 * total_scheduled);
    Ok(percent as u8)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdherenceGrade {
    #[serde(rename = "A+")]
    APlus,
    A,
    #[serde(rename = "B+")]
    BPlus,
    B,
    #[serde(rename = "C+")]
    CPlus,
    C,
    D,
}

impl AdherenceGrade {
    pub fn from_percent(percent: u8) -> Self {
        match percent {
            p if p >= 95 => Self::APlus,
            p if p >= 90 => Self::A,
            p if p >= 85 => Self::BPlus,
            p if p >= 80 => Self::B,
            p if p >= 75 => Self::CPlus,
            p if p >= 70 => Self::C,
            _ => Self::D,
        }
    }
}

impl Display for AdherenceGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let grade = match self {
            Self::APlus => "A+",
            Self::A => "A",
            Self::BPlus => "B+",
            Self::B => "B",
            Self::CPlus => "C+",
            Self::C => "C",
            Self::D => "D",
        };
        write!(f, "{}", grade)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streaks {
    /// Fully adherent days in a row ending with the most recent day
    pub current: u32,
    /// Longest run of fully adherent days
    pub best: u32,
}

impl Streaks {
    /// `stats` are expected to be ordered from oldest to most recent day
    pub fn new(stats: &[DayStat]) -> Self {
        let mut run = 0;
        let mut best = 0;
        for stat in stats {
            if stat.is_fully_adherent() {
                run += 1;
                best = best.max(run);
            } else {
                run = 0;
            }
        }
        Self { current: run, best }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Achievement {
    /// Seven day streak
    WeekWarrior,
    /// 90% adherence or more
    ConsistencyChampion,
    /// Thirty day streak
    MonthlyMaster,
}

impl Achievement {
    pub fn unlocked(percent: u8, streaks: &Streaks) -> Vec<Self> {
        let mut achievements = Vec::new();
        if streaks.current >= 7 {
            achievements.push(Self::WeekWarrior);
        }
        if percent >= 90 {
            achievements.push(Self::ConsistencyChampion);
        }
        if streaks.current >= 30 {
            achievements.push(Self::MonthlyMaster);
        }
        achievements
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdherencePeriod {
    Week,
    Month,
}

impl Default for AdherencePeriod {
    fn default() -> Self {
        Self::Week
    }
}

impl AdherencePeriod {
    pub fn days(&self) -> u32 {
        match self {
            Self::Week => 7,
            Self::Month => 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdherenceSummary {
    pub percent: u8,
    pub grade: AdherenceGrade,
    pub streaks: Streaks,
    pub achievements: Vec<Achievement>,
    pub days: Vec<DayStat>,
}

impl AdherenceSummary {
    pub fn new(days: Vec<DayStat>) -> Result<Self, AdherenceError> {
        let percent = adherence_percent(&days)?;
        let streaks = Streaks::new(&days);
        Ok(Self {
            percent,
            grade: AdherenceGrade::from_percent(percent),
            achievements: Achievement::unlocked(percent, &streaks),
            streaks,
            days,
        })
    }
}

/// Buckets reminders into one `DayStat` per calendar day of the `days`
/// days ending with `today`, oldest first. Days without reminders are
/// included with zero counts.
pub fn day_stats(reminders: &[Reminder], tz: &Tz, today: NaiveDate, days: u32) -> Vec<DayStat> {
    let first_day = today - Duration::days(i64::from(days.max(1)) - 1);
    let mut stats = (0..days.max(1))
        .map(|offset| {
            let day = first_day + Duration::days(i64::from(offset));
            DayStat::new(format_date(&day), 0, 0)
        })
        .collect::<Vec<_>>();

    for reminder in reminders {
        let date = match local_date(reminder.scheduled_ts, tz) {
            Some(date) => date,
            None => continue,
        };
        if date < first_day || date > today {
            continue;
        }
        let stat = &mut stats[(date - first_day).num_days() as usize];
        stat.scheduled += 1;
        if reminder.taken {
            stat.taken += 1;
        }
    }

    stats
}
