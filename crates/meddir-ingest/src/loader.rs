//! Facility and schedule file loading.
//!
//! Maps header-resolved rows into `FacilityRecord`s, merges schedule rows
//! into their facilities by identifier, and reports progress at a fixed
//! cadence so callers can yield control during very large imports.

use std::collections::HashMap;

use meddir_model::{
    BedCounts, DAY_LABELS, FacilityClass, FacilityRecord, PERIODIC_WEEKS, ScheduleEntry,
};
use meddir_normalize::normalize_for_comparison;
use serde::{Deserialize, Serialize};

use crate::aliases;
use crate::csv::{RawRecord, canonical_header, parse_csv_line};
use crate::error::{IngestError, Result};

/// Records processed between progress notifications.
pub const PROGRESS_INTERVAL: usize = 1000;

/// Progress notification payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    /// Records mapped so far in this load.
    pub records: usize,
    /// True only for the final notification of a load.
    pub done: bool,
}

/// Counters surfaced to the caller after a load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadSummary {
    /// Rows mapped into a facility or schedule record.
    pub records: usize,
    /// Lines skipped for unbalanced quoting.
    pub skipped_lines: usize,
    /// Rows dropped for lacking a resolvable identifier.
    pub dropped_rows: usize,
    /// Stub facilities synthesized for identifiers seen only in the
    /// schedule file.
    pub synthesized: usize,
}

/// Builds a reference pool from facility and schedule files.
///
/// Load the facility file first, then any schedule files; schedule rows
/// merge into their facilities by case-insensitive identifier.
#[derive(Debug, Default)]
pub struct FacilityLoader {
    records: Vec<FacilityRecord>,
    index: HashMap<String, usize>,
}

impl FacilityLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a facility file from an iterator of text lines.
    pub fn load_facilities<I>(&mut self, lines: I) -> Result<LoadSummary>
    where
        I: IntoIterator<Item = Result<String>>,
    {
        self.load_facilities_with_progress(lines, &mut |_| {})
    }

    /// Like [`load_facilities`](Self::load_facilities), notifying `progress`
    /// every [`PROGRESS_INTERVAL`] records and once at completion.
    ///
    /// The mapped output is identical whether or not progress is observed.
    pub fn load_facilities_with_progress<I>(
        &mut self,
        lines: I,
        progress: &mut dyn FnMut(Progress),
    ) -> Result<LoadSummary>
    where
        I: IntoIterator<Item = Result<String>>,
    {
        let mut summary = LoadSummary::default();
        self.for_each_row(lines, progress, &mut summary, |loader, raw, _summary| {
            let Some(id) = raw.first(aliases::FACILITY_ID).map(canonical_id) else {
                return false;
            };
            if id.is_empty() {
                return false;
            }
            let record = facility_from_raw(&raw, id.clone());
            match loader.index.get(&id) {
                Some(&slot) => {
                    // Duplicate identifier within a load: last row wins,
                    // but schedule data already merged is kept.
                    let schedule = std::mem::take(&mut loader.records[slot].schedule);
                    let departments = std::mem::take(&mut loader.records[slot].departments);
                    loader.records[slot] = FacilityRecord {
                        schedule,
                        departments,
                        ..record
                    };
                }
                None => {
                    loader.index.insert(id, loader.records.len());
                    loader.records.push(record);
                }
            }
            true
        })?;
        tracing::info!(
            records = summary.records,
            skipped = summary.skipped_lines,
            dropped = summary.dropped_rows,
            "facility file loaded"
        );
        Ok(summary)
    }

    /// Loads a schedule file, merging rows into their facilities.
    ///
    /// Identifiers never seen in the facility file synthesize a minimal
    /// stub so schedule data is not silently dropped.
    pub fn load_schedule<I>(&mut self, lines: I) -> Result<LoadSummary>
    where
        I: IntoIterator<Item = Result<String>>,
    {
        self.load_schedule_with_progress(lines, &mut |_| {})
    }

    /// Like [`load_schedule`](Self::load_schedule), with progress
    /// notifications.
    pub fn load_schedule_with_progress<I>(
        &mut self,
        lines: I,
        progress: &mut dyn FnMut(Progress),
    ) -> Result<LoadSummary>
    where
        I: IntoIterator<Item = Result<String>>,
    {
        let mut summary = LoadSummary::default();
        self.for_each_row(lines, progress, &mut summary, |loader, raw, summary| {
            let Some(id) = raw.first(aliases::SCHEDULE_ID).map(canonical_id) else {
                return false;
            };
            if id.is_empty() {
                return false;
            }
            let slot = match loader.index.get(&id) {
                Some(&slot) => slot,
                None => {
                    let slot = loader.records.len();
                    loader.records.push(FacilityRecord {
                        id: id.clone(),
                        ..FacilityRecord::default()
                    });
                    loader.index.insert(id, slot);
                    summary.synthesized += 1;
                    slot
                }
            };
            merge_schedule_row(&mut loader.records[slot], &raw);
            true
        })?;
        tracing::info!(
            rows = summary.records,
            skipped = summary.skipped_lines,
            synthesized = summary.synthesized,
            "schedule file merged"
        );
        Ok(summary)
    }

    /// The records loaded so far, in facility-file order with schedule-only
    /// stubs appended.
    pub fn records(&self) -> &[FacilityRecord] {
        &self.records
    }

    /// Consumes the loader, yielding the assembled reference pool.
    pub fn into_records(self) -> Vec<FacilityRecord> {
        self.records
    }

    /// Shared header-then-rows drive loop.
    ///
    /// `map_row` returns whether the row produced/updated a record; rows
    /// with no resolvable identifier are counted as dropped.
    fn for_each_row<I>(
        &mut self,
        lines: I,
        progress: &mut dyn FnMut(Progress),
        summary: &mut LoadSummary,
        mut map_row: impl FnMut(&mut Self, RawRecord, &mut LoadSummary) -> bool,
    ) -> Result<()>
    where
        I: IntoIterator<Item = Result<String>>,
    {
        let mut lines = lines.into_iter();
        let header = loop {
            match lines.next() {
                Some(line) => {
                    let line = line?;
                    if !line.trim().is_empty() {
                        break line;
                    }
                }
                None => return Err(IngestError::MissingHeader),
            }
        };
        let headers: Vec<String> = parse_csv_line(&header)
            .ok_or(IngestError::MissingHeader)?
            .iter()
            .map(|h| canonical_header(h))
            .collect();

        for line in lines {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let Some(fields) = parse_csv_line(&line) else {
                summary.skipped_lines += 1;
                tracing::debug!("skipping line with unbalanced quoting");
                continue;
            };
            let raw = RawRecord::new(&headers, fields);
            if map_row(self, raw, summary) {
                summary.records += 1;
                if summary.records % PROGRESS_INTERVAL == 0 {
                    progress(Progress {
                        records: summary.records,
                        done: false,
                    });
                }
            } else {
                summary.dropped_rows += 1;
            }
        }
        progress(Progress {
            records: summary.records,
            done: true,
        });
        Ok(())
    }
}

/// Uppercased, alphanumeric-only canonical form of an identifier.
fn canonical_id(raw: &str) -> String {
    normalize_for_comparison(raw)
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

fn owned(value: Option<&str>) -> String {
    value.unwrap_or("").to_string()
}

fn is_flag_set(value: Option<&str>) -> bool {
    matches!(
        value.map(str::trim),
        Some("1" | "○" | "◯" | "true" | "TRUE" | "あり" | "休診")
    )
}

fn parse_count(value: Option<&str>) -> u32 {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(0)
}

/// Normalizes a time cell to `HH:MM`.
///
/// Accepts 3-4 digit forms (900, 0900, 1730) and colon-delimited forms
/// (9:00, 09:30); full-width digits fold first. Returns `None` for
/// anything else, including out-of-range minutes.
pub fn normalize_time(value: &str) -> Option<String> {
    // The comparison normalizer strips the colon and folds digit widths,
    // leaving a bare 3-4 digit string for every accepted input shape.
    let digits = normalize_for_comparison(value);
    if !(3..=4).contains(&digits.len()) || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let (hours, minutes) = digits.split_at(digits.len() - 2);
    let hours: u32 = hours.parse().ok()?;
    let minutes: u32 = minutes.parse().ok()?;
    // Closing times past midnight are written as 24+ in the source.
    if hours > 29 || minutes > 59 {
        return None;
    }
    Some(format!("{hours:02}:{minutes:02}"))
}

fn facility_from_raw(raw: &RawRecord, id: String) -> FacilityRecord {
    let mut record = FacilityRecord {
        id,
        class: FacilityClass::from_code(raw.first(aliases::FACILITY_CLASS_CODE).unwrap_or("")),
        official_name: owned(raw.first(aliases::FACILITY_OFFICIAL_NAME)),
        official_name_kana: owned(raw.first(aliases::FACILITY_OFFICIAL_NAME_KANA)),
        short_name: owned(raw.first(aliases::FACILITY_SHORT_NAME)),
        short_name_kana: owned(raw.first(aliases::FACILITY_SHORT_NAME_KANA)),
        foreign_name: owned(raw.first(aliases::FACILITY_FOREIGN_NAME)),
        prefecture_code: owned(raw.first(aliases::FACILITY_PREFECTURE_CODE)),
        prefecture: owned(raw.first(aliases::FACILITY_PREFECTURE)),
        city_code: owned(raw.first(aliases::FACILITY_CITY_CODE)),
        city: owned(raw.first(aliases::FACILITY_CITY)),
        address: owned(raw.first(aliases::FACILITY_ADDRESS)),
        postal_code: owned(raw.first(aliases::FACILITY_POSTAL_CODE)),
        latitude: raw
            .first(aliases::FACILITY_LATITUDE)
            .and_then(|v| v.trim().parse().ok()),
        longitude: raw
            .first(aliases::FACILITY_LONGITUDE)
            .and_then(|v| v.trim().parse().ok()),
        homepage: raw.first(aliases::FACILITY_HOMEPAGE).map(str::to_string),
        beds: BedCounts {
            total: parse_count(raw.first(aliases::BED_TOTAL)),
            general: parse_count(raw.first(aliases::BED_GENERAL)),
            long_term: parse_count(raw.first(aliases::BED_LONG_TERM)),
            psychiatric: parse_count(raw.first(aliases::BED_PSYCHIATRIC)),
            infectious: parse_count(raw.first(aliases::BED_INFECTIOUS)),
            tuberculosis: parse_count(raw.first(aliases::BED_TUBERCULOSIS)),
            care: parse_count(raw.first(aliases::BED_CARE)),
            other: parse_count(raw.first(aliases::BED_OTHER)),
        },
        ..FacilityRecord::default()
    };

    for (i, day) in DAY_LABELS[..7].iter().enumerate() {
        record.closed.weekly[i] = is_flag_set(raw.first(aliases::weekly_closed_aliases(day)));
    }
    for week in 0..PERIODIC_WEEKS {
        for (i, day) in DAY_LABELS[..7].iter().enumerate() {
            record.closed.periodic[week][i] =
                is_flag_set(raw.first(aliases::periodic_closed_aliases(week + 1, day)));
        }
    }
    record.closed.holiday = is_flag_set(raw.first(aliases::FACILITY_HOLIDAY_CLOSED));
    record.closed.note = raw.first(aliases::FACILITY_CLOSED_NOTE).map(str::to_string);

    record
}

/// Merges one schedule row into its facility.
///
/// Each day label with at least one time present yields one
/// `ScheduleEntry`; the department name joins the facility's derived
/// department list regardless of times.
fn merge_schedule_row(record: &mut FacilityRecord, raw: &RawRecord) {
    let department_code = raw
        .first(aliases::SCHEDULE_DEPARTMENT_CODE)
        .map(str::to_string);
    let department = raw.first(aliases::SCHEDULE_DEPARTMENT).map(str::to_string);
    let slot_type = raw.first(aliases::SCHEDULE_SLOT_TYPE).map(str::to_string);

    if let Some(name) = &department {
        record.push_department(name);
    }

    for day in DAY_LABELS {
        let start = raw
            .first(aliases::schedule_start_aliases(day))
            .and_then(normalize_time);
        let end = raw
            .first(aliases::schedule_end_aliases(day))
            .and_then(normalize_time);
        let reception_start = raw
            .first(aliases::reception_start_aliases(day))
            .and_then(normalize_time);
        let reception_end = raw
            .first(aliases::reception_end_aliases(day))
            .and_then(normalize_time);

        if start.is_none() && end.is_none() && reception_start.is_none() && reception_end.is_none()
        {
            continue;
        }
        record.schedule.push(ScheduleEntry {
            day: day.to_string(),
            department_code: department_code.clone(),
            department: department.clone(),
            slot_type: slot_type.clone(),
            start,
            end,
            reception_start,
            reception_end,
        });
    }
}
