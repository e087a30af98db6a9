use pillbox_domain::{Achievement, AdherenceGrade, AdherenceSummary, DayStat};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdherenceDTO {
    pub percent: u8,
    pub grade: AdherenceGrade,
    pub current_streak: u32,
    pub best_streak: u32,
    pub achievements: Vec<Achievement>,
    pub total_scheduled: i64,
    pub total_taken: i64,
    pub days: Vec<DayStat>,
}

impl AdherenceDTO {
    pub fn new(summary: AdherenceSummary) -> Self {
        Self {
            percent: summary.percent,
            grade: summary.grade,
            current_streak: summary.streaks.current,
            best_streak: summary.streaks.best,
            achievements: summary.achievements,
            total_scheduled: summary.days.iter().map(|d| d.scheduled).sum(),
            total_taken: summary.days.iter().map(|d| d.taken).sum(),
            days: summary.days,
        }
    }
}
