//! Timestamps in the six-word GDSII date layout

use chrono::{Datelike, Local, NaiveDateTime, Timelike};

/// `[year, month, day, hour, minute, second]`, year as the literal calendar year
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GdsDate(pub [u16; 6]);

impl GdsDate {
    /// Sample the local wall clock
    pub fn now() -> Self {
        Self::from_datetime(&Local::now().naive_local())
    }

    pub fn from_datetime(dt: &NaiveDateTime) -> Self {
        GdsDate([
            dt.year().clamp(0, u16::MAX as i32) as u16,
            dt.month() as u16,
            dt.day() as u16,
            dt.hour() as u16,
            dt.minute() as u16,
            dt.second() as u16,
        ])
    }

    pub fn from_words(words: &[u16]) -> Option<Self> {
        let fields: [u16; 6] = words.get(..6)?.try_into().ok()?;
        Some(GdsDate(fields))
    }

    pub fn to_words(self) -> [u16; 6] {
        self.0
    }
}

/// Two independent snapshots: creation then modification
pub fn date_pair() -> (GdsDate, GdsDate) {
    let creation = GdsDate::now();
    let modification = GdsDate::now();
    (creation, modification)
}
