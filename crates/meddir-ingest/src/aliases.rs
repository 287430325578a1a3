//! Header-alias tables for the facility and schedule files.
//!
//! Canonical field names map to the header spellings observed across
//! dataset vintages; resolution takes the first alias carrying a non-empty
//! value for the row. Day- and week-indexed columns are derived from the
//! label constants in `meddir-model` instead of being written out per cell.

pub const FACILITY_ID: &[&str] = &["ID", "医療機関コード", "医療機関ID", "施設コード"];
pub const FACILITY_OFFICIAL_NAME: &[&str] = &["正式名称", "医療機関名称", "施設名称", "名称"];
pub const FACILITY_OFFICIAL_NAME_KANA: &[&str] =
    &["正式名称（フリガナ）", "医療機関名称（カナ）", "フリガナ"];
pub const FACILITY_SHORT_NAME: &[&str] = &["略称", "通称名", "短縮名称"];
pub const FACILITY_SHORT_NAME_KANA: &[&str] = &["略称（フリガナ）", "通称名（カナ）"];
pub const FACILITY_FOREIGN_NAME: &[&str] = &["外国語表記", "英語名称", "ローマ字名称"];
pub const FACILITY_CLASS_CODE: &[&str] = &["施設区分コード", "医療機関区分", "区分コード"];
pub const FACILITY_PREFECTURE_CODE: &[&str] = &["都道府県コード"];
pub const FACILITY_PREFECTURE: &[&str] = &["都道府県", "都道府県名"];
pub const FACILITY_CITY_CODE: &[&str] = &["市区町村コード"];
pub const FACILITY_CITY: &[&str] = &["市区町村", "市区町村名"];
pub const FACILITY_ADDRESS: &[&str] = &["所在地", "住所", "所在地住所"];
pub const FACILITY_POSTAL_CODE: &[&str] = &["郵便番号", "〒"];
pub const FACILITY_LATITUDE: &[&str] = &["緯度"];
pub const FACILITY_LONGITUDE: &[&str] = &["経度"];
pub const FACILITY_HOMEPAGE: &[&str] = &["ホームページ", "ホームページアドレス", "URL"];
pub const FACILITY_HOLIDAY_CLOSED: &[&str] = &["休診日（祝日）", "祝日休診"];
pub const FACILITY_CLOSED_NOTE: &[&str] = &["休診日備考", "休診日（備考）", "診療日時備考"];

pub const BED_TOTAL: &[&str] = &["許可病床数", "総病床数", "病床数（合計）"];
pub const BED_GENERAL: &[&str] = &["一般病床数", "病床数（一般）"];
pub const BED_LONG_TERM: &[&str] = &["療養病床数", "病床数（療養）"];
pub const BED_PSYCHIATRIC: &[&str] = &["精神病床数", "病床数（精神）"];
pub const BED_INFECTIOUS: &[&str] = &["感染症病床数", "病床数（感染症）"];
pub const BED_TUBERCULOSIS: &[&str] = &["結核病床数", "病床数（結核）"];
pub const BED_CARE: &[&str] = &["介護療養病床数", "病床数（介護療養）"];
pub const BED_OTHER: &[&str] = &["その他病床数", "病床数（その他）"];

pub const SCHEDULE_ID: &[&str] = &["ID", "医療機関コード", "施設コード"];
pub const SCHEDULE_DEPARTMENT_CODE: &[&str] = &["診療科目コード", "科目コード"];
pub const SCHEDULE_DEPARTMENT: &[&str] = &["診療科目", "診療科目名", "科目名"];
pub const SCHEDULE_SLOT_TYPE: &[&str] = &["診療区分", "外来区分"];

/// Header spellings for the weekly closed-day flag of one day label.
pub fn weekly_closed_aliases(day: &str) -> [String; 3] {
    [
        format!("休診日（{day}）"),
        format!("{day}曜休診"),
        format!("定休日（{day}）"),
    ]
}

/// Header spellings for the periodic closed-day flag of week `week`
/// (1-based) and one day label.
pub fn periodic_closed_aliases(week: usize, day: &str) -> [String; 2] {
    [
        format!("休診日（第{week}{day}曜）"),
        format!("第{week}{day}曜休診"),
    ]
}

/// Header spellings for a schedule-time column of one day label.
pub fn schedule_start_aliases(day: &str) -> [String; 2] {
    [
        format!("診療開始時間（{day}）"),
        format!("{day}曜診療開始時間"),
    ]
}

pub fn schedule_end_aliases(day: &str) -> [String; 2] {
    [
        format!("診療終了時間（{day}）"),
        format!("{day}曜診療終了時間"),
    ]
}

pub fn reception_start_aliases(day: &str) -> [String; 2] {
    [
        format!("受付開始時間（{day}）"),
        format!("{day}曜受付開始時間"),
    ]
}

pub fn reception_end_aliases(day: &str) -> [String; 2] {
    [
        format!("受付終了時間（{day}）"),
        format!("{day}曜受付終了時間"),
    ]
}
