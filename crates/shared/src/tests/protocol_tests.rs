use super::*;

#[test]
fn decodes_success_body_with_integer_timings() {
    let body = r#"{
        "total_presses": 3,
        "avg_press_time": 0,
        "min_press_time": 12,
        "max_press_time": 40.5,
        "plot": "iVBORw0KGgo="
    }"#;

    let response: AnalyzeResponse = serde_json::from_str(body).expect("decode");
    let AnalyzeResponse::Success(stats) = response else {
        panic!("expected success, got {response:?}");
    };
    assert_eq!(stats.total_presses, 3);
    assert_eq!(stats.avg_press_time, 0.0);
    assert_eq!(stats.max_press_time, 40.5);
    assert!(stats.judgements.is_empty());
}

#[test]
fn decodes_judgement_counters_next_to_timings() {
    let body = r#"{
        "total_presses": 42,
        "avg_press_time": 123.456,
        "min_press_time": 10.0,
        "max_press_time": 200.789,
        "plot": "AAAA",
        "count_300": 812,
        "count_geki": 455,
        "count_100": 31,
        "count_katu": 12,
        "count_50": 2,
        "count_miss": 4,
        "score": 912345
    }"#;

    let response: AnalyzeResponse = serde_json::from_str(body).expect("decode");
    let AnalyzeResponse::Success(stats) = response else {
        panic!("expected success, got {response:?}");
    };
    assert_eq!(stats.judgements.count_300, Some(812));
    assert_eq!(stats.judgements.count_miss, Some(4));
    assert_eq!(stats.judgements.score, Some(912345));
}

#[test]
fn error_field_wins_over_statistics() {
    let response: AnalyzeResponse =
        serde_json::from_str(r#"{"error":"Invalid beatmap file"}"#).expect("decode");
    assert_eq!(
        response,
        AnalyzeResponse::Failure(ErrorBody::new("Invalid beatmap file"))
    );

    let mixed: AnalyzeResponse = serde_json::from_str(
        r#"{"error":"No valid note hits found in replay","total_presses":0,
            "avg_press_time":0,"min_press_time":0,"max_press_time":0,"plot":""}"#,
    )
    .expect("decode");
    assert!(matches!(mixed, AnalyzeResponse::Failure(_)));
}

#[test]
fn rejects_body_missing_statistics() {
    let result = serde_json::from_str::<AnalyzeResponse>(r#"{"total_presses": 5}"#);
    assert!(result.is_err());
}

#[test]
fn request_parts_use_documented_field_names() {
    let request = AnalysisRequest::new(
        SelectedFile::new("play.osr", b"replay".to_vec()),
        SelectedFile::new("map.osu", b"beatmap".to_vec()),
    );
    assert_eq!(request.file(SlotKind::Beatmap).name, "map.osu");

    let [(first, replay), (second, beatmap)] = request.into_parts();
    assert_eq!(first, "replay_file");
    assert_eq!(replay.bytes, b"replay");
    assert_eq!(second, "beatmap_file");
    assert_eq!(beatmap.bytes, b"beatmap");
    assert_eq!(SlotKind::Replay.field_name(), first);
}

#[test]
fn empty_error_message_still_counts_as_failure() {
    let response: AnalyzeResponse = serde_json::from_str(
        r#"{"error":"","total_presses":1,
            "avg_press_time":1.0,"min_press_time":1.0,"max_press_time":1.0,"plot":""}"#,
    )
    .expect("decode");
    assert!(matches!(response, AnalyzeResponse::Failure(body) if body.error.is_empty()));
}
