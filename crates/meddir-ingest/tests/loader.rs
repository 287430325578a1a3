//! Facility and schedule loading over in-memory inputs.

use std::io::Cursor;

use meddir_ingest::{FacilityLoader, LineStream, Progress, TextEncoding};
use meddir_model::FacilityClass;

fn lines(text: &str) -> LineStream {
    LineStream::from_reader(
        Box::new(Cursor::new(text.as_bytes().to_vec())),
        TextEncoding::Utf8,
    )
}

const FACILITY_FILE: &str = "\
ID,正式名称,略称,施設区分コード,都道府県,市区町村,所在地,郵便番号,休診日（日）,許可病床数
1322136100011,医療法人社団あんず会いしい内科クリニック,いしい内科クリニック,2,東京都,中野区,東京都中野区沼袋３－２８－９,165-0025,1,0
1399999900099,東京中央病院,,1,東京都,新宿区,東京都新宿区西新宿１－１－１,160-0023,,350
";

const SCHEDULE_FILE: &str = "\
ID,診療科目,診療開始時間（月）,診療終了時間（月）,受付開始時間（月）,受付終了時間（月）
1322136100011,内科,900,1230,845,1215
1322136100011,消化器内科,1430,1800,,
1400000000001,小児科,9:00,17:00,,
";

#[test]
fn facility_rows_map_to_typed_records() {
    let mut loader = FacilityLoader::new();
    let summary = loader.load_facilities(lines(FACILITY_FILE)).expect("load");

    assert_eq!(summary.records, 2);
    assert_eq!(summary.skipped_lines, 0);
    assert_eq!(summary.dropped_rows, 0);

    let records = loader.records();
    let clinic = &records[0];
    assert_eq!(clinic.id, "1322136100011");
    assert_eq!(clinic.class, FacilityClass::Clinic);
    assert_eq!(clinic.short_name, "いしい内科クリニック");
    assert_eq!(clinic.prefecture, "東京都");
    assert_eq!(clinic.postal_code, "165-0025");
    assert!(clinic.closed.weekly[6], "closed on Sunday");

    let hospital = &records[1];
    assert_eq!(hospital.class, FacilityClass::Hospital);
    assert_eq!(hospital.beds.total, 350);
}

#[test]
fn schedule_rows_merge_by_identifier() {
    let mut loader = FacilityLoader::new();
    loader.load_facilities(lines(FACILITY_FILE)).expect("load");
    let summary = loader.load_schedule(lines(SCHEDULE_FILE)).expect("merge");

    assert_eq!(summary.records, 3);
    assert_eq!(summary.synthesized, 1);

    let records = loader.records();
    let clinic = &records[0];
    // Two schedule rows with distinct department names, first-seen order.
    assert_eq!(clinic.departments, vec!["内科", "消化器内科"]);
    assert_eq!(clinic.schedule.len(), 2);
    assert_eq!(clinic.schedule[0].day, "月");
    assert_eq!(clinic.schedule[0].start.as_deref(), Some("09:00"));
    assert_eq!(clinic.schedule[0].reception_end.as_deref(), Some("12:15"));
    assert_eq!(clinic.schedule[1].start.as_deref(), Some("14:30"));
    assert!(clinic.schedule[1].reception_start.is_none());

    // Identifier seen only in the schedule file becomes a stub.
    let stub = records
        .iter()
        .find(|r| r.id == "1400000000001")
        .expect("synthesized stub");
    assert!(stub.official_name.is_empty());
    assert_eq!(stub.departments, vec!["小児科"]);
    assert_eq!(stub.schedule[0].start.as_deref(), Some("09:00"));
}

#[test]
fn rows_without_identifier_are_dropped_not_fatal() {
    let input = "\
ID,正式名称
,名無し診療所
1322136100011,いしい内科クリニック

";
    let mut loader = FacilityLoader::new();
    let summary = loader.load_facilities(lines(input)).expect("load");
    assert_eq!(summary.records, 1);
    assert_eq!(summary.dropped_rows, 1);
    assert_eq!(loader.records().len(), 1);
}

#[test]
fn unbalanced_quote_lines_are_skipped_and_counted() {
    let input = "\
ID,正式名称
1322136100011,\"unterminated name
1399999900099,東京中央病院
";
    let mut loader = FacilityLoader::new();
    let summary = loader.load_facilities(lines(input)).expect("load");
    assert_eq!(summary.records, 1);
    assert_eq!(summary.skipped_lines, 1);
    assert_eq!(loader.records()[0].id, "1399999900099");
}

#[test]
fn empty_input_is_a_missing_header() {
    let mut loader = FacilityLoader::new();
    assert!(loader.load_facilities(lines("")).is_err());
}

#[test]
fn duplicate_facility_rows_keep_merged_schedule() {
    let facilities = "\
ID,正式名称
1322136100011,旧名称
";
    let update = "\
ID,正式名称
1322136100011,新名称
";
    let mut loader = FacilityLoader::new();
    loader.load_facilities(lines(facilities)).expect("load");
    loader.load_schedule(lines(SCHEDULE_FILE)).expect("merge");
    loader.load_facilities(lines(update)).expect("reload");

    let clinic = &loader.records()[0];
    assert_eq!(clinic.official_name, "新名称");
    assert!(!clinic.schedule.is_empty(), "schedule survives the reload");
    assert_eq!(clinic.departments, vec!["内科", "消化器内科"]);
}

#[test]
fn progress_fires_at_cadence_and_completion() {
    let mut input = String::from("ID,正式名称\n");
    for i in 0..2500 {
        input.push_str(&format!("{:013},診療所{}\n", i + 1, i));
    }
    let mut seen: Vec<Progress> = Vec::new();
    let mut loader = FacilityLoader::new();
    loader
        .load_facilities_with_progress(lines(&input), &mut |p| seen.push(p))
        .expect("load");

    assert_eq!(
        seen.iter().filter(|p| !p.done).map(|p| p.records).collect::<Vec<_>>(),
        vec![1000, 2000]
    );
    let last = seen.last().expect("final notification");
    assert!(last.done);
    assert_eq!(last.records, 2500);
}
