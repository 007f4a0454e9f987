// File: ./src/model/duration.rs
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{Display, EnumIter, EnumString};

/// Day codes as they appear in the schedule feed. Declaration order is
/// calendar order, so `BTreeSet<Day>` iterates Monday first.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
pub enum Day {
    #[strum(serialize = "M")]
    Monday,
    #[strum(serialize = "T")]
    Tuesday,
    #[strum(serialize = "W")]
    Wednesday,
    #[strum(serialize = "Th")]
    Thursday,
    #[strum(serialize = "F")]
    Friday,
    #[strum(serialize = "Sa")]
    Saturday,
    #[strum(serialize = "Su")]
    Sunday,
}

impl Day {
    pub fn code(&self) -> &'static str {
        match self {
            Day::Monday => "M",
            Day::Tuesday => "T",
            Day::Wednesday => "W",
            Day::Thursday => "Th",
            Day::Friday => "F",
            Day::Saturday => "Sa",
            Day::Sunday => "Su",
        }
    }
}

/// One meeting of a section: a day, an optional room and a time-of-day range.
///
/// Only the time of day matters; there is no calendar date attached, so two
/// Monday meetings in different weeks compare as the same slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClassDuration {
    day: Day,
    room: Option<String>,
    start: NaiveTime,
    end: NaiveTime,
}

impl ClassDuration {
    pub fn new(day: Day, room: Option<String>, start: NaiveTime, end: NaiveTime) -> Self {
        Self {
            day,
            room,
            start,
            end,
        }
    }

    pub fn day(&self) -> Day {
        self.day
    }

    /// `None` when the meeting has no assigned room.
    pub fn room(&self) -> Option<&str> {
        self.room.as_deref()
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// Same day and overlapping half-open `[start, end)` intervals.
    /// Touching meetings (one ends when the other starts) do not intersect.
    pub fn intersects(&self, other: &ClassDuration) -> bool {
        self.day == other.day && self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for ClassDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}-{}",
            self.day,
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )?;
        if let Some(room) = &self.room {
            write!(f, " @ {}", room)?;
        }
        Ok(())
    }
}

/// Inclusive calendar span, e.g. the first and last day of instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateSpan {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateSpan {
    /// Smallest span covering both.
    pub fn union(self, other: DateSpan) -> DateSpan {
        DateSpan {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}
