//! End-to-end batch extraction over realistic nested items.

use chrono::{Local, NaiveDate, TimeZone};
use postnorm::{ContentKind, Extractor, FieldValue, MemoryRecorder, UserParams, DEFAULT_FIELD_KEYS};
use serde_json::{json, Value};

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Noon UTC, 2023-06-15. Tests derive the matching local date themselves
/// so the assertions hold in any timezone.
const BASE_TS: i64 = 1686830400;

fn local_date(ts: i64) -> NaiveDate {
    Local.timestamp_opt(ts, 0).single().unwrap().date_naive()
}

fn video_item(id: &str, ts: i64) -> Value {
    json!({
        "aweme_id": id,
        "desc": "a day at the lake",
        "create_time": ts,
        "video": {
            "play_addr": {"url_list": ["a", "b"]},
            "dynamic_cover": {"url_list": ["dyn"]},
            "origin_cover": {"url_list": ["orig"]},
            "height": 1080,
            "width": 1920,
            "ratio": "1080p"
        },
        "statistics": {"digg_count": 10, "comment_count": 2, "collect_count": 0, "share_count": 1},
        "video_tag": [{"tag_name": "travel"}, {"tag_name": "lake"}],
        "author": {"uid": "42", "sec_uid": "s42", "nickname": "casey"}
    })
}

fn params(earliest: NaiveDate, latest: NaiveDate) -> UserParams {
    UserParams {
        nickname: "casey".into(),
        mark: String::new(),
        earliest,
        latest,
        post: true,
    }
}

#[test]
fn timeline_batch_produces_schema_stable_records() {
    let extractor = Extractor::new(DATE_FORMAT);
    let mut recorder = MemoryRecorder::default();
    let items = vec![video_item("1", BASE_TS), video_item("2", BASE_TS + 60)];
    let date = local_date(BASE_TS);

    let records = extractor
        .run(ContentKind::UserTimeline, &items, &mut recorder, &params(date, date))
        .unwrap();

    assert_eq!(records.len(), 2);
    for record in &records {
        assert_eq!(record.get_str("type"), Some("video"));
        assert_eq!(record.get_str("downloads"), Some("b"));
        assert_eq!(record.get_str("tag_1"), Some("travel"));
        assert_eq!(record.get_str("tag_2"), Some("lake"));
        assert_eq!(record.get_str("tag_3"), Some(""));
        assert_eq!(record.get_str("collect_count"), Some("0"));
        assert_eq!(record.get_str("nickname"), Some("casey"));
    }

    // Each saved row projects the full schema in field-key order.
    assert_eq!(recorder.rows().len(), 2);
    for row in recorder.rows() {
        assert_eq!(row.len(), DEFAULT_FIELD_KEYS.len());
    }
    assert_eq!(recorder.rows()[0][1], FieldValue::from("1"));
    assert_eq!(recorder.rows()[1][1], FieldValue::from("2"));
}

#[test]
fn date_window_keeps_only_matching_records_in_order() {
    let extractor = Extractor::new(DATE_FORMAT);
    let mut recorder = MemoryRecorder::default();

    let day = 24 * 60 * 60;
    let inside = [BASE_TS, BASE_TS + 120, BASE_TS + 240];
    let outside = [BASE_TS - 40 * day, BASE_TS + 40 * day];
    let mut items: Vec<Value> = Vec::new();
    items.push(video_item("out-1", outside[0]));
    for (i, ts) in inside.iter().enumerate() {
        items.push(video_item(&format!("in-{i}"), *ts));
    }
    items.push(video_item("out-2", outside[1]));

    let date = local_date(BASE_TS);
    let records = extractor
        .run(
            ContentKind::UserTimeline,
            &items,
            &mut recorder,
            &params(date.pred_opt().unwrap(), date.succ_opt().unwrap()),
        )
        .unwrap();

    let ids: Vec<_> = records.iter().map(|r| r.get_str("id").unwrap()).collect();
    assert_eq!(ids, ["in-0", "in-1", "in-2"]);
}

#[test]
fn mixed_shapes_classify_independently() {
    let extractor = Extractor::new(DATE_FORMAT);
    let mut recorder = MemoryRecorder::default();
    let items = vec![
        video_item("vid", BASE_TS),
        json!({
            "aweme_id": "album",
            "create_time": BASE_TS,
            "images": [{"url_list": ["a1", "a2"]}, {"url_list": ["b1"]}]
        }),
        json!({
            "aweme_id": "post",
            "create_time": BASE_TS,
            "image_post_info": {
                "images": [{"display_image": {"url_list": ["x1", "x2"]}}]
            }
        }),
    ];
    let date = local_date(BASE_TS);

    let records = extractor
        .run(ContentKind::UserTimeline, &items, &mut recorder, &params(date, date))
        .unwrap();

    assert_eq!(records[0].get_str("type"), Some("video"));
    assert_eq!(records[1].get_str("type"), Some("image-set"));
    assert_eq!(records[1].get_str("downloads"), Some("a2 b1"));
    assert_eq!(records[1].get_str("origin_cover"), Some(""));
    assert_eq!(records[2].get_str("type"), Some("image-set"));
    assert_eq!(records[2].get_str("downloads"), Some("x2"));
}

#[test]
fn malformed_items_degrade_instead_of_failing() {
    let extractor = Extractor::new(DATE_FORMAT);
    let mut recorder = MemoryRecorder::default();
    let items = vec![
        json!({"create_time": BASE_TS, "video": "not-an-object", "statistics": [1, 2]}),
        json!({"create_time": BASE_TS, "author": null, "video_tag": {"tag_name": "x"}}),
    ];
    let date = local_date(BASE_TS);

    let records = extractor
        .run(ContentKind::UserTimeline, &items, &mut recorder, &params(date, date))
        .unwrap();

    assert_eq!(records.len(), 2);
    for record in &records {
        assert_eq!(record.get_str("downloads"), Some(""));
        assert_eq!(record.get_str("digg_count"), Some(""));
        assert_eq!(record.get_str("tag_1"), Some(""));
        assert_eq!(record.get_str("uid"), Some(""));
    }
}

#[test]
fn repeated_runs_are_bit_identical_apart_from_collection_time() {
    let extractor = Extractor::new(DATE_FORMAT);
    let items = vec![video_item("1", BASE_TS)];
    let date = local_date(BASE_TS);

    let run = |recorder: &mut MemoryRecorder| {
        extractor
            .run(ContentKind::UserTimeline, &items, recorder, &params(date, date))
            .unwrap()
    };
    let mut first = run(&mut MemoryRecorder::default());
    let mut second = run(&mut MemoryRecorder::default());

    for record in first.iter_mut().chain(second.iter_mut()) {
        record.set("collection_time", "");
    }
    assert_eq!(first, second);
}

#[test]
fn declared_but_unimplemented_kinds_stay_visible() {
    let extractor = Extractor::new(DATE_FORMAT);
    let items = vec![video_item("1", BASE_TS)];
    let date = local_date(BASE_TS);

    for tag in ["comment", "live", "general-search", "user-search", "trending"] {
        let kind: ContentKind = tag.parse().unwrap();
        let mut recorder = MemoryRecorder::default();
        let records = extractor
            .run(kind, &items, &mut recorder, &params(date, date))
            .unwrap();
        assert!(records.is_empty(), "{tag} should return empty output");
        assert!(recorder.rows().is_empty());
    }
}

#[test]
fn inspect_mode_batch_names_records_from_authors() {
    let extractor = Extractor::new(DATE_FORMAT);
    let mut recorder = MemoryRecorder::default();
    let items = vec![
        json!({"aweme_id": "1", "author": {"nickname": "first author"}}),
        json!({"aweme_id": "2"}),
    ];

    let records = extractor
        .run(ContentKind::SingleWork, &items, &mut recorder, &params(local_date(BASE_TS), local_date(BASE_TS)))
        .unwrap();

    assert_eq!(records[0].get_str("nickname"), Some("first author"));
    assert_eq!(records[0].get_str("mark"), Some("first author"));
    assert_eq!(records[1].get_str("nickname"), Some("deactivated account"));
}
