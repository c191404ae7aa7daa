use std::fmt;
use std::str::FromStr;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One half-hour slot of the clinic's day, always a member of [`SLOT_CATALOG`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeSlot {
    hour: u8,
    minute: u8,
}

/// Mornings 08:00-11:30 and afternoons 14:00-17:30, no lunch-hour slots.
pub const SLOT_CATALOG: [TimeSlot; 16] = [
    TimeSlot::at(8, 0),
    TimeSlot::at(8, 30),
    TimeSlot::at(9, 0),
    TimeSlot::at(9, 30),
    TimeSlot::at(10, 0),
    TimeSlot::at(10, 30),
    TimeSlot::at(11, 0),
    TimeSlot::at(11, 30),
    TimeSlot::at(14, 0),
    TimeSlot::at(14, 30),
    TimeSlot::at(15, 0),
    TimeSlot::at(15, 30),
    TimeSlot::at(16, 0),
    TimeSlot::at(16, 30),
    TimeSlot::at(17, 0),
    TimeSlot::at(17, 30),
];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlotError {
    #[error("Malformed slot label: {0}")]
    Malformed(String),

    #[error("{0} is not a bookable slot")]
    NotInCatalog(String),
}

impl TimeSlot {
    const fn at(hour: u8, minute: u8) -> Self {
        Self { hour, minute }
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn is_morning(&self) -> bool {
        self.hour < 12
    }

    pub fn to_naive_time(&self) -> NaiveTime {
        // catalog members are valid wall-clock times
        NaiveTime::from_hms_opt(self.hour.into(), self.minute.into(), 0).unwrap_or_default()
    }

    /// Catalog lookup for an arbitrary time of day.
    pub fn from_time(time: NaiveTime) -> Option<Self> {
        SLOT_CATALOG
            .iter()
            .copied()
            .find(|slot| slot.to_naive_time() == time)
    }

    pub fn all() -> impl Iterator<Item = TimeSlot> {
        SLOT_CATALOG.iter().copied()
    }
}

impl FromStr for TimeSlot {
    type Err = SlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();
        let time = NaiveTime::parse_from_str(label, "%H:%M")
            .map_err(|_| SlotError::Malformed(label.to_string()))?;

        TimeSlot::from_time(time).ok_or_else(|| SlotError::NotInCatalog(label.to_string()))
    }
}

impl TryFrom<String> for TimeSlot {
    type Error = SlotError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeSlot> for String {
    fn from(slot: TimeSlot) -> Self {
        slot.to_string()
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_sixteen_ordered_slots() {
        assert_eq!(SLOT_CATALOG.len(), 16);
        assert!(SLOT_CATALOG.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(SLOT_CATALOG[0].to_string(), "08:00");
        assert_eq!(SLOT_CATALOG[15].to_string(), "17:30");
    }

    #[test]
    fn no_lunch_hour_slots() {
        assert!(TimeSlot::all().all(|slot| !(12..14).contains(&slot.hour())));
        assert_eq!(TimeSlot::all().filter(TimeSlot::is_morning).count(), 8);
    }

    #[test]
    fn parses_catalog_labels_only() {
        assert_eq!("10:30".parse::<TimeSlot>().unwrap().to_string(), "10:30");
        assert_eq!(
            "12:00".parse::<TimeSlot>(),
            Err(SlotError::NotInCatalog("12:00".to_string()))
        );
        assert_eq!(
            "10:15".parse::<TimeSlot>(),
            Err(SlotError::NotInCatalog("10:15".to_string()))
        );
        assert!(matches!("ten".parse::<TimeSlot>(), Err(SlotError::Malformed(_))));
    }

    #[test]
    fn serde_uses_label() {
        let slot: TimeSlot = serde_json::from_str("\"14:00\"").unwrap();
        assert_eq!(serde_json::to_string(&slot).unwrap(), "\"14:00\"");
        assert!(serde_json::from_str::<TimeSlot>("\"13:00\"").is_err());
    }
}
