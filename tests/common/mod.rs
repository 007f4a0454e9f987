// Shared fixture stores for the integration tests.
//
// Mirrors what the crawler writes: one `{term}_database.json` per term, one
// table per department, one document per table.
#![allow(dead_code)]

use serde_json::{Value, json};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub struct Row<'a> {
    pub course: &'a str,
    pub crn: &'a str,
    pub desc: &'a str,
    pub status: &'a str,
    pub days: &'a str,
    pub time: &'a str,
    pub start: &'a str,
    pub end: &'a str,
    pub room: &'a str,
    pub instructor: &'a str,
    pub seats: &'a str,
    pub wait_seats: &'a str,
    pub wait_cap: &'a str,
}

impl<'a> Row<'a> {
    pub fn new(course: &'a str, crn: &'a str) -> Self {
        Self {
            course,
            crn,
            desc: "FINANCIAL ACCOUNTING I",
            status: "Open",
            days: "MW",
            time: "10:00 AM-11:50 AM",
            start: "04/09/2018",
            end: "06/29/2018",
            room: "3201",
            instructor: "Drake (P)",
            seats: "10",
            wait_seats: "15",
            wait_cap: "15",
        }
    }

    pub fn meets(mut self, days: &'a str, time: &'a str, room: &'a str) -> Self {
        self.days = days;
        self.time = time;
        self.room = room;
        self
    }

    pub fn online(self) -> Self {
        self.meets("TBA", "TBA", "ONLINE")
    }

    pub fn dated(mut self, start: &'a str, end: &'a str) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    pub fn to_json(&self) -> Value {
        json!({
            "course": self.course, "CRN": self.crn, "desc": self.desc,
            "status": self.status, "days": self.days, "time": self.time,
            "start": self.start, "end": self.end, "room": self.room,
            "campus": "FH", "units": "5", "instructor": self.instructor,
            "seats": self.seats, "wait_seats": self.wait_seats, "wait_cap": self.wait_cap
        })
    }
}

/// Build a `{dept: {"1": {course: {crn: [rows]}}}}` store from flat rows.
pub fn store(tables: &[(&str, &str, Vec<Row>)]) -> Value {
    let mut root = serde_json::Map::new();
    root.insert("_default".to_string(), json!({}));
    for (dept, course, rows) in tables {
        let table = root
            .entry(dept.to_string())
            .or_insert_with(|| json!({ "1": {} }));
        let doc = &mut table["1"];
        for row in rows {
            let records = doc[*course][row.crn].as_array().cloned().unwrap_or_default();
            let mut records = records;
            records.push(row.to_json());
            doc[*course][row.crn] = Value::Array(records);
        }
    }
    Value::Object(root)
}

pub fn write_store(dir: &Path, term: &str, store: &Value) {
    let path = dir.join(format!("{}_database.json", term));
    fs::write(path, serde_json::to_string_pretty(store).unwrap()).unwrap();
}

/// Main fixture quarter `000011` (Foothill).
pub fn quarter_a() -> Value {
    store(&[
        (
            "ACTG",
            "1A",
            vec![
                // hybrid: Tue/Thu in a room plus an online component
                Row::new("ACTG F001A02Y", "40065").meets("TTh", "10:00 AM-11:50 AM", "3201"),
                Row::new("ACTG F001A02Y", "40065").online(),
                // fully online, dated wider than the quarter
                Row::new("ACTG F001A01W", "40018")
                    .online()
                    .dated("04/02/2018", "07/15/2018"),
            ],
        ),
        (
            "ACTG",
            "1B",
            vec![
                Row {
                    status: "Waitlist",
                    seats: "5",
                    wait_seats: "7",
                    wait_cap: "15",
                    ..Row::new("ACTG F001B01", "40067")
                },
                Row::new("ACTG F001B02", "41130").meets("TTh", "01:30 PM-03:20 PM", "3201"),
            ],
        ),
        (
            "ACTG",
            "1C",
            vec![Row::new("ACTG F001C01W", "40022").online()],
        ),
        (
            "ACTG",
            "1D",
            vec![
                Row::new("ACTG F001D01H", "40099").meets("MW", "08:30 AM-10:20 AM", "3201"),
                Row::new("ACTG F001D01H", "40099").online(),
            ],
        ),
        (
            "ACTG",
            "76",
            vec![Row::new("ACTG F076.01", "41440")
                .meets("W", "06:00 PM-09:50 PM", "3202")
                .dated("04/16/2018", "06/22/2018")],
        ),
        (
            "ENGL",
            "1A",
            vec![Row {
                desc: "COMPOSITION",
                ..Row::new("ENGL F001A01", "40140").meets("MW", "09:00 AM-10:50 AM", "5015")
            }],
        ),
        (
            "PHYS",
            "4D",
            vec![
                Row::new("PHYS F004D01", "40208").meets("TTh", "10:00 AM-11:50 AM", "4501"),
                Row::new("PHYS F004D01", "40208").meets("F", "11:00 AM-11:50 AM", "4501"),
                Row::new("PHYS F004D01", "40208").meets("T", "12:00 PM-02:50 PM", "4718"),
                // unparseable course token, dropped by the reader
                Row::new("PHYS ???", "40208").meets("Sa", "08:00 AM-09:00 AM", "9999"),
            ],
        ),
        (
            "PHYS",
            "2B",
            vec![
                Row::new("PHYS F002B01", "40582").meets("TTh", "09:00 AM-10:50 AM", "4501"),
                // same row scraped twice
                Row::new("PHYS F002B01", "40582").meets("TTh", "09:00 AM-10:50 AM", "4501"),
            ],
        ),
    ])
}

pub fn quarter_b() -> Value {
    store(&[(
        "MATH",
        "1A",
        vec![Row::new("MATH D001A01", "30001").meets("MTWThF", "08:30 AM-09:20 AM", "S33")],
    )])
}

pub fn quarter_c() -> Value {
    store(&[(
        "CHEM",
        "1A",
        vec![Row::new("CHEM F001A01", "50001").meets("TTh", "10:00 AM-12:15 PM", "8401")],
    )])
}

/// Three quarters across two schools, plus files that are not stores.
pub fn model_dir_a() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_store(dir.path(), "000011", &quarter_a());
    write_store(dir.path(), "000012", &quarter_b());
    write_store(dir.path(), "000021", &quarter_c());
    fs::write(dir.path().join("temp.json"), "{}").unwrap();
    fs::write(dir.path().join("README.txt"), "not a store").unwrap();
    dir
}

/// One large quarter, so a full scan takes measurably longer than a cache hit.
pub fn large_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let mut root = serde_json::Map::new();
    for d in 0..40 {
        let mut doc = serde_json::Map::new();
        for c in 1..=25 {
            let mut sections = serde_json::Map::new();
            for s in 0..6 {
                let crn = format!("{}{:02}{}", d + 10, c, s);
                let course = format!("D{:02} F{:03}A{:02}", d, c, s);
                let row = Row::new(&course, &crn).meets("MW", "10:00 AM-11:50 AM", "3201");
                sections.insert(crn.clone(), json!([row.to_json()]));
            }
            doc.insert(format!("{}A", c), Value::Object(sections));
        }
        root.insert(format!("D{:02}", d), json!({ "1": Value::Object(doc) }));
    }
    write_store(dir.path(), "000011", &Value::Object(root));
    dir
}
