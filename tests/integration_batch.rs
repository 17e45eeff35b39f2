//! Integration tests for whole-bulletin processing
//!
//! These tests write small Nordic bulletins to temporary files and drive them
//! through the public API, from the line reader to the batch result.

use chrono::NaiveDate;
use nordic_ingest::{
    BatchProcessor, DetachedResolver, InMemoryRootResolver, NordicConfig, SolutionType,
    format_main_header,
};
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

const MAIN_0502: &str =
    " 2019 0502 1305 12.3L   60.170  24.940 10.0  HEL 12 0.5 3.4LHEL                1";
const MAIN_0503: &str =
    " 2019 0503 2350 01.0L   61.500  23.100 15.0F HEL  8 0.9 2.1LHEL                1";
const ERROR_0503: &str =
    " GAP=123        1.10       5.3     4.2  3.0                                    5";
const COMMENT: &str =
    " Felt in Helsinki                                                              3";
const CAPTION: &str =
    " STAT SP IPHASW D HRMM SECON CODA AMPLIT PERI AZIMU VELO AIN AR TRES W  DIS CAZ7";
const PHASE_HEL: &str =
    " HEL  SZ IP       1305 18.45                                                    ";
const PHASE_KEV: &str =
    " KEV  SZ IP       1305 40.10                                                    ";
const PHASE_SOD: &str =
    " SOD  SZ ES      +0001 02.50                                                    ";

fn write_bulletin(groups: &[&[&str]]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for group in groups {
        for line in *group {
            writeln!(file, "{}", line).unwrap();
        }
        writeln!(file).unwrap();
    }
    file.flush().unwrap();
    file
}

fn processor(config: &NordicConfig) -> BatchProcessor {
    BatchProcessor::new(config, Arc::new(DetachedResolver)).unwrap()
}

/// Three groups, the middle one without a main header
fn three_group_bulletin() -> NamedTempFile {
    write_bulletin(&[
        &[MAIN_0502, COMMENT, CAPTION, PHASE_HEL, PHASE_KEV],
        &[COMMENT, PHASE_KEV],
        &[MAIN_0503, ERROR_0503, PHASE_SOD],
    ])
}

#[test]
fn test_line_lengths() {
    for line in [
        MAIN_0502, MAIN_0503, ERROR_0503, COMMENT, CAPTION, PHASE_HEL, PHASE_KEV, PHASE_SOD,
    ] {
        assert_eq!(line.len(), 80, "{:?}", line);
    }
}

#[test]
fn test_batch_with_failing_group() {
    let file = three_group_bulletin();
    let result = processor(&NordicConfig::default())
        .process_file(file.path())
        .unwrap();

    assert_eq!(result.events.len(), 2);
    assert_eq!(result.failures.len(), 1);
    assert!(result.failures[0].starts_with("Event 2:"));
    assert!(result.failures[0].contains("No headers"));

    // Relative order of the successful events is preserved
    let first = &result.events[0];
    let second = &result.events[1];
    assert_eq!(
        first.main_headers[0].origin_date,
        NaiveDate::from_ymd_opt(2019, 5, 2)
    );
    assert_eq!(
        second.main_headers[0].origin_date,
        NaiveDate::from_ymd_opt(2019, 5, 3)
    );

    assert_eq!(first.comment_headers.len(), 1);
    assert_eq!(first.phase_data.len(), 2);
    assert_eq!(
        first.phase_data[1].observation_time.unwrap().to_string(),
        "2019-05-02 13:05:40.100"
    );

    assert_eq!(result.stats.groups, 3);
    assert_eq!(result.stats.phase_lines, 3);
    assert!((result.stats.success_rate() - 66.666).abs() < 0.01);
}

#[test]
fn test_day_offset_and_fixed_depth() {
    let file = three_group_bulletin();
    let result = processor(&NordicConfig::default())
        .process_file(file.path())
        .unwrap();

    let event = &result.events[1];
    let main = &event.main_headers[0];
    assert!(main.has_fixed_depth());
    let error = main.error_header.as_ref().unwrap();
    assert_eq!(error.gap, Some(123));
    assert_eq!(error.second_error, Some(1.1));
    assert_eq!(error.depth_error, None);

    let phase = &event.phase_data[0];
    assert_eq!(phase.phase_type.as_deref(), Some("S"));
    assert_eq!(
        phase.observation_time.unwrap().to_string(),
        "2019-05-04 00:01:02.500"
    );

    let raw = processor(&NordicConfig::default().without_fixes())
        .process_file(file.path())
        .unwrap();
    let error = raw.events[1].main_headers[0].error_header.as_ref().unwrap();
    assert_eq!(error.depth_error, Some(3.0));
}

#[tokio::test]
async fn test_parallel_file_matches_sequential() {
    let file = three_group_bulletin();
    let config = NordicConfig::default()
        .with_workers(2)
        .with_solution_type(SolutionType::Reviewed);
    let processor = processor(&config);

    let sequential = processor.process_file(file.path()).unwrap();
    let parallel = processor.process_file_parallel(file.path()).await.unwrap();

    assert_eq!(parallel.events, sequential.events);
    assert_eq!(parallel.failures, sequential.failures);
    assert!(
        parallel
            .events
            .iter()
            .all(|event| event.solution_type == SolutionType::Reviewed)
    );
}

#[test]
fn test_root_resolution_failure_is_reported() {
    let instruction = format!("{:<79}I", "    ACTION:UPD");
    let bulletin = write_bulletin(&[&[MAIN_0502, &instruction, PHASE_HEL]]);

    // "ACTION:UPD" is not a native event id
    let result = processor(&NordicConfig::default())
        .process_file(bulletin.path())
        .unwrap();
    assert_eq!(result.failures.len(), 1);
    assert!(result.failures[0].contains("root_event_id"));

    let instruction = format!("{:<79}I", "    20190502");
    let bulletin = write_bulletin(&[&[MAIN_0502, &instruction, PHASE_HEL]]);
    let resolver = InMemoryRootResolver::new().with_root(20190502, 5);
    let result = BatchProcessor::new(&NordicConfig::default(), Arc::new(resolver))
        .unwrap()
        .process_file(bulletin.path())
        .unwrap();
    assert_eq!(result.events[0].root_id, 5);
}

#[test]
fn test_regenerated_main_header_reads_back() {
    let file = write_bulletin(&[&[MAIN_0502]]);
    let result = processor(&NordicConfig::default())
        .process_file(file.path())
        .unwrap();
    let main = &result.events[0].main_headers[0];
    assert_eq!(main.raw_line, MAIN_0502);

    let regenerated = format_main_header(main);
    assert_eq!(regenerated, MAIN_0502);
}

#[test]
fn test_short_lines_need_padding() {
    let file = write_bulletin(&[&[MAIN_0502, PHASE_HEL.trim_end()]]);

    let strict = processor(&NordicConfig::default())
        .process_file(file.path())
        .unwrap();
    assert_eq!(strict.failures.len(), 1);
    assert!(strict.failures[0].contains("Malformed line"));

    let padded = processor(&NordicConfig::default().with_padding())
        .process_file(file.path())
        .unwrap();
    assert_eq!(padded.events.len(), 1);
    assert_eq!(padded.events[0].phase_data.len(), 1);
}
