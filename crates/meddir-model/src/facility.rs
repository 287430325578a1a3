use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Day labels used by the schedule file, in column order.
///
/// Seven weekdays plus the holiday pseudo-day (祝), which the source data
/// treats as an eighth day of the week.
pub const DAY_LABELS: [&str; 8] = ["月", "火", "水", "木", "金", "土", "日", "祝"];

/// Number of periodic-closure weeks tracked per facility (第1..第5).
pub const PERIODIC_WEEKS: usize = 5;

/// Facility class per the government facility-category code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacilityClass {
    /// Hospital (20 beds or more).
    Hospital,
    /// Clinic, including dental clinics.
    Clinic,
    /// Any other facility category (pharmacies, midwiferies, unknown codes).
    #[default]
    Other,
}

impl FacilityClass {
    /// Maps a raw facility-category code from the source file.
    ///
    /// The dataset uses `1` for hospitals and `2` for clinics; zero-padded
    /// forms appear in older exports.
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "1" | "01" => FacilityClass::Hospital,
            "2" | "02" => FacilityClass::Clinic,
            _ => FacilityClass::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FacilityClass::Hospital => "hospital",
            FacilityClass::Clinic => "clinic",
            FacilityClass::Other => "other",
        }
    }
}

impl fmt::Display for FacilityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FacilityClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hospital" | "病院" => Ok(FacilityClass::Hospital),
            "clinic" | "診療所" | "クリニック" => Ok(FacilityClass::Clinic),
            "other" => Ok(FacilityClass::Other),
            _ => Err(format!("unknown facility class: {}", s)),
        }
    }
}

/// Closed-day flags for a facility.
///
/// `weekly` is indexed by [`DAY_LABELS`] position 0..=6 (祝 is tracked by
/// `holiday` instead). `periodic[w][d]` means the facility closes on the
/// `d`-th weekday of the `w + 1`-th week of each month.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosedDays {
    pub weekly: [bool; 7],
    pub periodic: [[bool; 7]; PERIODIC_WEEKS],
    /// Closed on public holidays.
    pub holiday: bool,
    /// Free-text closure note from the source file.
    pub note: Option<String>,
}

impl ClosedDays {
    /// True if no closure information was present at all.
    pub fn is_empty(&self) -> bool {
        !self.holiday
            && self.note.is_none()
            && !self.weekly.iter().any(|&b| b)
            && !self.periodic.iter().flatten().any(|&b| b)
    }
}

/// Bed-count breakdown, one field per source column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BedCounts {
    pub total: u32,
    pub general: u32,
    /// 療養病床 (long-term care).
    pub long_term: u32,
    pub psychiatric: u32,
    pub infectious: u32,
    pub tuberculosis: u32,
    /// 介護療養病床.
    pub care: u32,
    pub other: u32,
}

/// One schedule slot parsed from the schedule file.
///
/// All time fields are normalized `HH:MM` strings; each is independently
/// optional in the source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Day label, one of [`DAY_LABELS`].
    pub day: String,
    pub department_code: Option<String>,
    pub department: Option<String>,
    /// Slot type (e.g. 外来, 面会) when the source distinguishes them.
    pub slot_type: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub reception_start: Option<String>,
    pub reception_end: Option<String>,
}

/// The canonical reference entity from the government facility dataset.
///
/// The identifier is required and unique within a load; every other field
/// defaults to empty/absent. Records are created once per ingestion run,
/// enriched by schedule rows merged on identifier, and immutable afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FacilityRecord {
    /// Opaque identifier, uppercased, alphanumeric only.
    pub id: String,
    pub class: FacilityClass,

    pub official_name: String,
    pub official_name_kana: String,
    pub short_name: String,
    pub short_name_kana: String,
    /// Foreign-script (usually English) name.
    pub foreign_name: String,

    pub prefecture_code: String,
    pub prefecture: String,
    pub city_code: String,
    pub city: String,
    pub address: String,
    pub postal_code: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub homepage: Option<String>,

    pub closed: ClosedDays,
    pub beds: BedCounts,

    /// Department names in first-seen order across schedule rows.
    pub departments: Vec<String>,
    pub schedule: Vec<ScheduleEntry>,
}

impl FacilityRecord {
    /// Name fields in preference order, skipping empties.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        [
            self.short_name.as_str(),
            self.official_name.as_str(),
            self.short_name_kana.as_str(),
            self.official_name_kana.as_str(),
            self.foreign_name.as_str(),
        ]
        .into_iter()
        .filter(|s| !s.is_empty())
    }

    /// Adds a department name, preserving first-seen order.
    pub fn push_department(&mut self, name: &str) {
        if !name.is_empty() && !self.departments.iter().any(|d| d == name) {
            self.departments.push(name.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_from_code() {
        assert_eq!(FacilityClass::from_code("1"), FacilityClass::Hospital);
        assert_eq!(FacilityClass::from_code("02"), FacilityClass::Clinic);
        assert_eq!(FacilityClass::from_code("9"), FacilityClass::Other);
        assert_eq!(FacilityClass::from_code(""), FacilityClass::Other);
    }

    #[test]
    fn class_parses_japanese_labels() {
        assert_eq!("病院".parse::<FacilityClass>(), Ok(FacilityClass::Hospital));
        assert_eq!("診療所".parse::<FacilityClass>(), Ok(FacilityClass::Clinic));
        assert!("薬局?".parse::<FacilityClass>().is_err());
    }

    #[test]
    fn departments_deduplicate_in_first_seen_order() {
        let mut rec = FacilityRecord::default();
        rec.push_department("内科");
        rec.push_department("小児科");
        rec.push_department("内科");
        rec.push_department("");
        assert_eq!(rec.departments, vec!["内科", "小児科"]);
    }

    #[test]
    fn closed_days_emptiness() {
        let mut closed = ClosedDays::default();
        assert!(closed.is_empty());
        closed.periodic[2][4] = true;
        assert!(!closed.is_empty());
    }
}
