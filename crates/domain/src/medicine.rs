use crate::adherence::{adherence_percent, DayStat};
use crate::date::to_timestamp;
use crate::reminder::{Priority, Reminder};
use crate::shared::entity::{Entity, ID};
use crate::User;
use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{de::Visitor, Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

const MAX_REMINDER_TIMES: usize = 6;
const MAX_INSTRUCTIONS_LEN: usize = 500;
const MAX_STOCK_QUANTITY: u32 = 1000;
const LOW_STOCK_THRESHOLD: u32 = 7;

#[derive(Debug, Clone)]
pub struct Medicine {
    pub id: ID,
    pub user_id: ID,
    pub name: String,
    pub dosage: Dosage,
    pub medicine_type: MedicineType,
    pub frequency: Frequency,
    pub instructions: Option<String>,
    /// Times of day at which a dose should be taken, in the
    /// timezone of the owning `User`
    pub reminder_times: Vec<ReminderTime>,
    pub priority: Priority,
    pub stock_quantity: Option<u32>,
    /// Percentage of past doses that were taken. Cached for display and
    /// refreshed every time a dose is logged.
    pub adherence_rate: u8,
    /// Deleted `Medicine`s are only deactivated
    pub active: bool,
    pub created: i64,
    pub updated: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Dosage {
    pub amount: String,
    pub unit: DosageUnit,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DosageUnit {
    #[serde(rename = "mg")]
    Milligram,
    #[serde(rename = "g")]
    Gram,
    #[serde(rename = "ml")]
    Milliliter,
    #[serde(rename = "IU")]
    InternationalUnit,
    #[serde(rename = "mcg")]
    Microgram,
    #[serde(rename = "units", alias = "unit")]
    Units,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MedicineType {
    Tablet,
    Capsule,
    Liquid,
    Injection,
    Inhaler,
    Drops,
    Cream,
    Patch,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Frequency {
    OnceDaily,
    TwiceDaily,
    ThreeTimesDaily,
    FourTimesDaily,
    AsNeeded,
    Weekly,
    Monthly,
}

impl Default for Frequency {
    fn default() -> Self {
        Self::OnceDaily
    }
}

impl Frequency {
    /// Reminder times used when none are given explicitly
    pub fn default_reminder_times(&self) -> Vec<ReminderTime> {
        let times: &[(u32, u32)] = match self {
            Self::TwiceDaily => &[(9, 0), (21, 0)],
            Self::ThreeTimesDaily => &[(8, 0), (14, 0), (20, 0)],
            Self::FourTimesDaily => &[(8, 0), (12, 0), (16, 0), (20, 0)],
            Self::OnceDaily | Self::AsNeeded | Self::Weekly | Self::Monthly => &[(9, 0)],
        };
        times
            .iter()
            .filter_map(|(hour, minute)| ReminderTime::new(*hour, *minute))
            .collect()
    }
}

/// A time of day in the `HH:MM` 24 hour format
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ReminderTime(NaiveTime);

impl ReminderTime {
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    pub fn time(&self) -> NaiveTime {
        self.0
    }
}

impl Display for ReminderTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.0.hour(), self.0.minute())
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Reminder time: `{0}` is not in the HH:MM format")]
pub struct InvalidReminderTimeError(String);

impl FromStr for ReminderTime {
    type Err = InvalidReminderTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || InvalidReminderTimeError(s.to_string());
        let parts = s.trim().split(':').collect::<Vec<_>>();
        if parts.len() != 2 || parts[0].is_empty() || parts[1].len() != 2 {
            return Err(err());
        }
        let hour = parts[0].parse::<u32>().map_err(|_| err())?;
        let minute = parts[1].parse::<u32>().map_err(|_| err())?;
        Self::new(hour, minute).ok_or_else(err)
    }
}

impl Serialize for ReminderTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ReminderTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct ReminderTimeVisitor;

        impl<'de> Visitor<'de> for ReminderTimeVisitor {
            type Value = ReminderTime;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("A time of day in the HH:MM format")
            }

            fn visit_str<E>(self, value: &str) -> Result<ReminderTime, E>
            where
                E: serde::de::Error,
            {
                value.parse::<ReminderTime>().map_err(E::custom)
            }
        }

        deserializer.deserialize_str(ReminderTimeVisitor)
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum MedicineValidationError {
    #[error("Medicine name must be between 2 and 100 characters")]
    InvalidName,
    #[error("Dosage amount: `{0}` must be a positive number")]
    InvalidDosageAmount(String),
    #[error("Between 1 and 6 reminder times are required")]
    InvalidReminderTimeCount,
    #[error("Instructions must be at most 500 characters")]
    InstructionsTooLong,
    #[error("Stock quantity must be at most 1000")]
    InvalidStockQuantity,
}

impl Dosage {
    pub fn validate(&self) -> Result<(), MedicineValidationError> {
        match self.amount.trim().parse::<f64>() {
            Ok(amount) if amount.is_finite() && amount > 0.0 => Ok(()),
            _ => Err(MedicineValidationError::InvalidDosageAmount(
                self.amount.clone(),
            )),
        }
    }
}

impl Medicine {
    pub fn new(
        user_id: ID,
        name: String,
        dosage: Dosage,
        medicine_type: MedicineType,
        frequency: Frequency,
        created: i64,
    ) -> Self {
        Self {
            id: Default::default(),
            user_id,
            name,
            dosage,
            medicine_type,
            frequency,
            instructions: None,
            reminder_times: frequency.default_reminder_times(),
            priority: Priority::default(),
            stock_quantity: None,
            adherence_rate: 0,
            active: true,
            created,
            updated: created,
        }
    }

    pub fn validate(&self) -> Result<(), MedicineValidationError> {
        let name_len = self.name.trim().chars().count();
        if !(2..=100).contains(&name_len) {
            return Err(MedicineValidationError::InvalidName);
        }
        self.dosage.validate()?;
        if self.reminder_times.is_empty() || self.reminder_times.len() > MAX_REMINDER_TIMES {
            return Err(MedicineValidationError::InvalidReminderTimeCount);
        }
        if let Some(instructions) = &self.instructions {
            if instructions.chars().count() > MAX_INSTRUCTIONS_LEN {
                return Err(MedicineValidationError::InstructionsTooLong);
            }
        }
        if let Some(stock) = self.stock_quantity {
            if stock > MAX_STOCK_QUANTITY {
                return Err(MedicineValidationError::InvalidStockQuantity);
            }
        }
        Ok(())
    }

    /// Replaces the reminder times. An empty list falls back
    /// to the defaults of the `Frequency`.
    pub fn set_reminder_times(&mut self, mut times: Vec<ReminderTime>) {
        if times.is_empty() {
            times = self.frequency.default_reminder_times();
        }
        times.sort();
        times.dedup();
        self.reminder_times = times;
    }

    pub fn is_low_stock(&self) -> bool {
        matches!(self.stock_quantity, Some(stock) if stock < LOW_STOCK_THRESHOLD)
    }

    /// The `Reminder`s of this `Medicine` on the given day in the
    /// timezone of the owner
    pub fn reminders_on(&self, date: NaiveDate, owner: &User) -> Vec<Reminder> {
        self.reminder_times
            .iter()
            .map(|time| {
                let scheduled_ts = to_timestamp(date, time.time(), &owner.timezone);
                Reminder::new(self.id, self.user_id, scheduled_ts, self.priority)
            })
            .collect()
    }

    /// Recomputes the cached `adherence_rate` from the `Reminder`s of
    /// this `Medicine` that were scheduled before `now`
    pub fn refresh_adherence_rate(&mut self, reminders: &[Reminder], now: i64) {
        let past = reminders
            .iter()
            .filter(|r| r.medicine_id == self.id && r.scheduled_ts <= now);
        let mut stat = DayStat::new("all".into(), 0, 0);
        for reminder in past {
            stat.scheduled += 1;
            if reminder.taken {
                stat.taken += 1;
            }
        }
        // Counts built from stored reminders can not be malformed
        self.adherence_rate = adherence_percent(&[stat]).unwrap_or(self.adherence_rate);
    }
}

impl Entity for Medicine {
    fn id(&self) -> &ID {
        &self.id
    }
}
