// File: ./src/model/section.rs
// View over the raw records of one section (one CRN).
//
// A section may have several raw records: the crawler emits one row per
// meeting pattern (lecture + lab, or a scheduled part plus an online part).
// Every derived field is computed on first access and cached in a `OnceLock`,
// which also makes concurrent first access compute it exactly once.
use crate::config::ModelConfig;
use crate::model::duration::{ClassDuration, DateSpan, Day};
use crate::model::parser::{
    CourseKey, course_key_from_name, parse_count, parse_date, parse_instructors,
    parse_time_range, parse_units, split_days,
};
use crate::storage::{RawRecord, RawSection};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::{Arc, OnceLock};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Open,
    /// Seats are gone; only the waitlist accepts registrations.
    Waitlist,
    Closed,
    Unknown,
}

impl Status {
    fn from_raw(raw: &str, config: &ModelConfig) -> Self {
        let raw = raw.trim();
        let matches = |vocab: &[String]| vocab.iter().any(|v| v.eq_ignore_ascii_case(raw));
        if matches(&config.status_open) {
            Status::Open
        } else if matches(&config.status_waitlist) {
            Status::Waitlist
        } else if matches(&config.status_closed) {
            Status::Closed
        } else {
            Status::Unknown
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Open => write!(f, "Open"),
            Status::Waitlist => write!(f, "Waitlist"),
            Status::Closed => write!(f, "Closed"),
            Status::Unknown => write!(f, "Unknown"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectionType {
    /// Every record has concrete days and times.
    Standard,
    /// No record has concrete days and times.
    Online,
    /// Some records are scheduled, some are not.
    Hybrid,
}

/// What one raw record says about when/where the section meets.
#[derive(Debug, Clone)]
struct Meeting {
    days: Vec<Day>,
    times: Option<(NaiveTime, NaiveTime)>,
    room: Option<String>,
}

impl Meeting {
    fn is_concrete(&self) -> bool {
        !self.days.is_empty() && self.times.is_some()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct SeatCounts {
    open: i32,
    waitlist: i32,
    waitlist_capacity: i32,
}

#[derive(Debug)]
pub struct SectionQuarterView {
    crn: String,
    quarter: String,
    department: String,
    course: String,
    records: RawSection,
    config: Arc<ModelConfig>,

    course_key: OnceLock<Option<CourseKey>>,
    meetings: OnceLock<Vec<Meeting>>,
    durations: OnceLock<Vec<ClassDuration>>,
    days: OnceLock<BTreeSet<Day>>,
    rooms: OnceLock<BTreeSet<String>>,
    section_type: OnceLock<SectionType>,
    status: OnceLock<Status>,
    seats: OnceLock<SeatCounts>,
    instructors: OnceLock<Vec<String>>,
    dates: OnceLock<Option<DateSpan>>,
}

impl SectionQuarterView {
    pub fn new(
        quarter: &str,
        department: &str,
        course: &str,
        crn: &str,
        records: RawSection,
        config: Arc<ModelConfig>,
    ) -> Self {
        Self {
            crn: crn.to_string(),
            quarter: quarter.to_string(),
            department: department.to_string(),
            course: course.to_string(),
            records,
            config,
            course_key: OnceLock::new(),
            meetings: OnceLock::new(),
            durations: OnceLock::new(),
            days: OnceLock::new(),
            rooms: OnceLock::new(),
            section_type: OnceLock::new(),
            status: OnceLock::new(),
            seats: OnceLock::new(),
            instructors: OnceLock::new(),
            dates: OnceLock::new(),
        }
    }

    pub fn crn(&self) -> &str {
        &self.crn
    }

    pub fn department(&self) -> &str {
        &self.department
    }

    pub fn quarter(&self) -> &str {
        &self.quarter
    }

    pub fn records(&self) -> &[RawRecord] {
        &self.records
    }

    /// First non-blank value of a field across the records.
    fn first_field(&self, field: impl Fn(&RawRecord) -> &str) -> &str {
        self.records
            .iter()
            .map(|r| field(r).trim())
            .find(|v| !v.is_empty())
            .unwrap_or("")
    }

    // --- IDENTITY ---

    /// Raw course name as scraped, e.g. `ACTG F001A02Y`.
    pub fn course_name(&self) -> &str {
        self.first_field(|r| &r.course)
    }

    pub fn course_key(&self) -> Option<&CourseKey> {
        self.course_key
            .get_or_init(|| {
                self.records
                    .iter()
                    .find_map(|r| course_key_from_name(&r.course, &self.config.course_key))
            })
            .as_ref()
    }

    /// Normalized catalog key (`F001A02Y` -> `1A`). Falls back to the key the
    /// section is filed under when no record parses.
    pub fn course_id(&self) -> String {
        self.course_key()
            .map(CourseKey::catalog_key)
            .unwrap_or_else(|| self.course.clone())
    }

    pub fn description(&self) -> &str {
        self.first_field(|r| &r.desc)
    }

    pub fn campus(&self) -> &str {
        self.first_field(|r| &r.campus)
    }

    pub fn units(&self) -> f32 {
        self.records
            .iter()
            .find_map(|r| parse_units(&r.units))
            .unwrap_or_else(|| {
                log::debug!("{}: no parseable units, using 0", self.crn);
                0.0
            })
    }

    /// Resource URL of this section, built from the configured template.
    pub fn url(&self) -> String {
        self.config
            .resource_url(&self.quarter, &self.department, &self.course, &self.crn)
    }

    // --- MEETINGS ---

    fn meetings(&self) -> &[Meeting] {
        self.meetings.get_or_init(|| {
            self.records
                .iter()
                .map(|r| self.parse_meeting(r))
                .collect()
        })
    }

    fn parse_meeting(&self, record: &RawRecord) -> Meeting {
        let config = &self.config;

        let days = if config.is_unscheduled(&record.days) {
            Vec::new()
        } else {
            split_days(&record.days).unwrap_or_else(|| {
                log::debug!("{}: unrecognized day token '{}'", self.crn, record.days);
                Vec::new()
            })
        };

        let times = if config.is_unscheduled(&record.time) {
            None
        } else {
            let parsed = parse_time_range(&record.time, &config.time_formats);
            if parsed.is_none() {
                log::debug!("{}: unrecognized time range '{}'", self.crn, record.time);
            }
            parsed
        };

        let room = if config.is_unscheduled(&record.room) {
            None
        } else {
            Some(record.room.trim().to_string())
        };

        Meeting { days, times, room }
    }

    /// One entry per distinct (day, time range, room) across all records.
    pub fn durations(&self) -> &[ClassDuration] {
        self.durations.get_or_init(|| {
            let mut out: Vec<ClassDuration> = Vec::new();
            for meeting in self.meetings().iter().filter(|m| m.is_concrete()) {
                let Some((start, end)) = meeting.times else {
                    continue;
                };
                for day in &meeting.days {
                    let d = ClassDuration::new(*day, meeting.room.clone(), start, end);
                    if !out.contains(&d) {
                        out.push(d);
                    }
                }
            }
            out
        })
    }

    pub fn days(&self) -> &BTreeSet<Day> {
        self.days
            .get_or_init(|| self.durations().iter().map(|d| d.day()).collect())
    }

    pub fn rooms(&self) -> &BTreeSet<String> {
        self.rooms.get_or_init(|| {
            self.durations()
                .iter()
                .filter_map(|d| d.room().map(str::to_string))
                .collect()
        })
    }

    pub fn section_type(&self) -> SectionType {
        *self.section_type.get_or_init(|| {
            let meetings = self.meetings();
            let concrete = meetings.iter().filter(|m| m.is_concrete()).count();
            if concrete == 0 {
                SectionType::Online
            } else if concrete == meetings.len() {
                SectionType::Standard
            } else {
                SectionType::Hybrid
            }
        })
    }

    /// True if any meeting of `self` overlaps any meeting of `other`.
    pub fn conflicts_with(&self, other: &SectionQuarterView) -> bool {
        self.durations()
            .iter()
            .any(|a| other.durations().iter().any(|b| a.intersects(b)))
    }

    // --- ENROLLMENT ---

    pub fn status(&self) -> Status {
        *self.status.get_or_init(|| {
            let raw = self.first_field(|r| &r.status);
            let status = Status::from_raw(raw, &self.config);
            if status == Status::Unknown {
                log::debug!("{}: unrecognized status '{}'", self.crn, raw);
            }
            status
        })
    }

    fn first_count(&self, field: impl Fn(&RawRecord) -> &str, name: &str) -> i32 {
        self.records
            .iter()
            .find_map(|r| parse_count(field(r)))
            .unwrap_or_else(|| {
                log::debug!("{}: no parseable {}, using 0", self.crn, name);
                0
            })
    }

    fn seats(&self) -> SeatCounts {
        *self.seats.get_or_init(|| {
            let mut counts = SeatCounts {
                open: self.first_count(|r| &r.seats, "seats"),
                waitlist: self.first_count(|r| &r.wait_seats, "wait_seats"),
                waitlist_capacity: self.first_count(|r| &r.wait_cap, "wait_cap"),
            };
            // The feed keeps reporting stale seat numbers once a section
            // flips to waitlist.
            if self.status() == Status::Waitlist {
                counts.open = 0;
            }
            counts
        })
    }

    pub fn open_seats_available(&self) -> i32 {
        self.seats().open
    }

    /// Raw waitlist seats; may be negative when the waitlist is over-filled.
    pub fn waitlist_seats_available(&self) -> i32 {
        self.seats().waitlist
    }

    pub fn waitlist_capacity(&self) -> i32 {
        self.seats().waitlist_capacity
    }

    pub fn instructor_names(&self) -> &[String] {
        self.instructors.get_or_init(|| {
            let mut names: Vec<String> = Vec::new();
            for record in self.records.iter() {
                for name in parse_instructors(&record.instructor) {
                    if !names.contains(&name) {
                        names.push(name);
                    }
                }
            }
            names
        })
    }

    // --- DATES ---

    fn dates(&self) -> Option<DateSpan> {
        *self.dates.get_or_init(|| {
            let formats = &self.config.date_formats;
            let starts = self.records.iter().filter_map(|r| parse_date(&r.start, formats));
            let ends = self.records.iter().filter_map(|r| parse_date(&r.end, formats));
            match (starts.min(), ends.max()) {
                (Some(start), Some(end)) if start <= end => Some(DateSpan { start, end }),
                (None, None) => None,
                (start, end) => {
                    log::debug!(
                        "{}: incomplete date range {:?}..{:?}, ignoring",
                        self.crn,
                        start,
                        end
                    );
                    None
                }
            }
        })
    }

    /// Earliest start date across the records, if the feed gave one.
    pub fn start_date(&self) -> Option<NaiveDate> {
        self.dates().map(|d| d.start)
    }

    /// Latest end date across the records, if the feed gave one.
    pub fn end_date(&self) -> Option<NaiveDate> {
        self.dates().map(|d| d.end)
    }

    pub fn date_span(&self) -> Option<DateSpan> {
        self.dates()
    }
}

impl PartialEq for SectionQuarterView {
    fn eq(&self, other: &Self) -> bool {
        self.crn == other.crn
            && self.quarter == other.quarter
            && self.department == other.department
            && self.course == other.course
            && self.records == other.records
    }
}
