mod adherence;
pub mod date;
mod medicine;
mod reminder;
mod shared;
mod upcoming;
mod user;

pub use adherence::{
    adherence_percent, day_stats, Achievement, AdherenceError, AdherenceGrade, AdherencePeriod,
    AdherenceSummary, DayStat, Streaks,
};
pub use medicine::{
    Dosage, DosageUnit, Frequency, InvalidReminderTimeError, Medicine, MedicineType,
    MedicineValidationError, ReminderTime,
};
pub use reminder::{
    Priority, Reminder, ReminderError, ReminderFilter, ReminderRecord, ReminderStatus,
    MISSED_AFTER_MILLIS,
};
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use upcoming::{time_until_label, UpcomingView, Urgency};
pub use user::User;

pub use chrono_tz::Tz;
