#![allow(clippy::unwrap_used, clippy::expect_used)]

use sortmerge_core::errors::MergeError;
use sortmerge_core::logging_facility::test_capture::init_test_capture;
use sortmerge_core::{
    check_sorted, group_by_key, log_op_end, log_op_error, log_op_start, merge_join, order,
    with_length, JoinedPair, Side, Strictness,
};
use sortmerge_core_types::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_BOTH, FIELD_DURATION_MS, FIELD_ERR_CODE,
    FIELD_ERR_KIND, FIELD_ERR_MESSAGE, FIELD_LEFT_ONLY, FIELD_LEN, FIELD_PASS_ID, FIELD_POSITION,
    FIELD_RIGHT_ONLY, FIELD_SIDE, OP_CHECK_SORTED, OP_FULL_JOIN, OP_GROUP, OP_LENGTH, OP_ORDER,
};
use sortmerge_core_types::PassId;

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name);

    capture.assert_event_exists(op_name, EVENT_START);
}

#[test]
fn test_log_op_end_records_duration() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let events = capture.events();
    let end_event = events
        .iter()
        .find(|e| e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_END))
        .expect("Should have end event");
    assert_eq!(end_event.field(FIELD_DURATION_MS), Some("42"));
}

#[test]
fn test_log_op_error_includes_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = MergeError::DuplicateKey {
        side: Side::Left,
        position: 4,
        key: "7".to_string(),
    };
    log_op_error!(op_name, err, duration_ms = 10);

    let events = capture.events();
    let error_event = events
        .iter()
        .find(|e| e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_END_ERROR))
        .expect("Should have error event");
    assert_eq!(error_event.field(FIELD_ERR_CODE), Some("ERR_DUPLICATE_KEY"));
    assert_eq!(error_event.field(FIELD_ERR_KIND), Some("DuplicateKey"));
}

#[test]
#[should_panic(expected = "Expected event")]
fn test_assert_event_exists_fails_for_unknown_op() {
    let capture = init_test_capture();
    capture.assert_event_exists("nonexistent_op_truly_unique_999", EVENT_START);
}

#[test]
fn test_trusted_join_emits_no_lifecycle_events() {
    let capture = init_test_capture();

    let pairs = merge_join(vec![1, 2], |x| *x, vec![2, 3], |x| *x).count();
    assert_eq!(pairs, 3);

    // lifecycle events of a join always carry a pass id, trusted passes have none
    let stray = capture.count_events(|e| {
        e.op.as_deref() == Some(OP_FULL_JOIN)
            && e.event.is_some()
            && e.field(FIELD_PASS_ID).is_none()
    });
    assert_eq!(stray, 0);
}

#[test]
fn test_checked_join_logs_start_and_end_with_pass_id() {
    let capture = init_test_capture();

    let mut joined = merge_join(vec![1, 2], |x| *x, vec![2, 3], |x| *x).checked();
    let pass_id = joined.pass_id().to_string();
    let pairs: Vec<_> = joined.by_ref().collect::<Result<_, _>>().unwrap();
    assert_eq!(pairs.len(), 3);

    let events = capture.events_for_pass(&pass_id);
    let kinds: Vec<_> = events.iter().filter_map(|e| e.event.as_deref()).collect();
    assert_eq!(kinds, vec![EVENT_START, EVENT_END]);
    assert!(events.iter().all(|e| e.op.as_deref() == Some(OP_FULL_JOIN)));
    assert_eq!(events[1].field(FIELD_LEN), Some("3"));
}

#[test]
fn test_checked_join_failure_logs_side_and_position() {
    let capture = init_test_capture();

    let mut joined = merge_join(vec![1, 1], |x| *x, vec![4], |x| *x).checked();
    let pass_id = joined.pass_id().to_string();
    assert_eq!(joined.next(), Some(Ok(JoinedPair::Left(1))));
    assert!(joined.next().unwrap().is_err());

    let events = capture.events_for_pass(&pass_id);
    let error_event = events
        .iter()
        .find(|e| e.event.as_deref() == Some(EVENT_END_ERROR))
        .expect("Should have error event");
    assert_eq!(error_event.field(FIELD_ERR_CODE), Some("ERR_DUPLICATE_KEY"));
    assert_eq!(error_event.field(FIELD_SIDE), Some("Some(Left)"));
    assert_eq!(error_event.field(FIELD_POSITION), Some("Some(1)"));
    assert!(!events.iter().any(|e| e.event.as_deref() == Some(EVENT_END)));
}

#[test]
fn test_log_op_error_with_pass_id_renders_op_and_pass() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_4";
    let pass_id = PassId::new();

    let err = MergeError::TooFewItems {
        declared: 3,
        actual: 1,
    };
    log_op_error!(op_name, err, pass_id = &pass_id, duration_ms = 5);

    let events = capture.events_for_pass(pass_id.as_str());
    let error_event = events
        .iter()
        .find(|e| e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_END_ERROR))
        .expect("Should have error event");
    let message = error_event.field(FIELD_ERR_MESSAGE).expect("Should render error");
    assert!(message.contains("in operation 'test_log_op_error_unique_4'"));
    assert!(message.contains(&format!("(pass_id: {})", pass_id)));
    assert_eq!(error_event.field(FIELD_DURATION_MS), Some("5"));
}

#[test]
fn test_checked_join_error_message_carries_pass_id() {
    let capture = init_test_capture();

    let mut joined = merge_join(vec![3, 1], |x| *x, vec![2], |x| *x).checked();
    let pass_id = joined.pass_id().to_string();
    let results: Vec<_> = joined.by_ref().collect();
    assert_eq!(results[0], Ok(JoinedPair::Right(2)));
    assert!(results.last().unwrap().is_err());

    let events = capture.events_for_pass(&pass_id);
    let error_event = events
        .iter()
        .find(|e| e.event.as_deref() == Some(EVENT_END_ERROR))
        .expect("Should have error event");
    let message = error_event.field(FIELD_ERR_MESSAGE).expect("Should render error");
    assert!(message.contains("in operation 'full_join'"));
    assert!(message.contains(&format!("(pass_id: {})", pass_id)));
}

#[test]
fn test_checked_groups_error_message_carries_pass_id() {
    let capture = init_test_capture();

    let items = [2, 2, 1];
    let mut groups = group_by_key(&items, |x| *x).checked();
    let pass_id = groups.pass_id().to_string();
    assert_eq!(groups.next().unwrap().map(|g| g.len()), Ok(2));
    assert!(groups.next().unwrap().is_err());

    let events = capture.events_for_pass(&pass_id);
    let error_event = events
        .iter()
        .find(|e| e.op.as_deref() == Some(OP_GROUP) && e.event.as_deref() == Some(EVENT_END_ERROR))
        .expect("Should have error event");
    let message = error_event.field(FIELD_ERR_MESSAGE).expect("Should render error");
    assert!(message.contains("in operation 'group_by_key'"));
    assert!(message.contains(&format!("(pass_id: {})", pass_id)));
}

#[test]
fn test_checked_groups_log_group_count() {
    let capture = init_test_capture();

    let items = [1, 1, 2, 3];
    let mut groups = group_by_key(&items, |x| *x).checked();
    let pass_id = groups.pass_id().to_string();
    assert_eq!(groups.by_ref().count(), 3);

    let events = capture.events_for_pass(&pass_id);
    let end = events
        .iter()
        .find(|e| e.op.as_deref() == Some(OP_GROUP) && e.event.as_deref() == Some(EVENT_END))
        .expect("Should have end event");
    assert_eq!(end.field(FIELD_LEN), Some("3"));
}

#[test]
fn test_check_sorted_failure_is_logged() {
    let capture = init_test_capture();

    // an unusual length identifies this call among parallel tests
    let mut items: Vec<i32> = (0..1031).collect();
    items.swap(10, 11);
    assert!(check_sorted(&items, |x| *x, Strictness::NonDescending).is_err());

    let matched = capture.count_events(|e| {
        e.op.as_deref() == Some(OP_CHECK_SORTED)
            && e.event.as_deref() == Some(EVENT_START)
            && e.field(FIELD_LEN) == Some("1031")
    });
    assert_eq!(matched, 1);
    let errors = capture.count_events(|e| {
        e.op.as_deref() == Some(OP_CHECK_SORTED)
            && e.event.as_deref() == Some(EVENT_END_ERROR)
            && e.field(FIELD_ERR_CODE) == Some("ERR_OUT_OF_ORDER")
    });
    assert!(errors >= 1);
}

#[test]
fn test_order_logs_start_and_end() {
    let capture = init_test_capture();

    let sorted = order((0..1033).rev().collect::<Vec<i32>>(), |x: &i32| *x);
    assert_eq!(sorted.get_ref()[0], 0);

    let ends = capture.count_events(|e| {
        e.op.as_deref() == Some(OP_ORDER)
            && e.event.as_deref() == Some(EVENT_END)
            && e.field(FIELD_LEN) == Some("1033")
            && e.field(FIELD_DURATION_MS).is_some()
    });
    assert_eq!(ends, 1);
}

#[test]
fn test_checked_length_mismatch_is_logged() {
    let capture = init_test_capture();

    let mut it = with_length(0..1, 2).checked();
    let pass_id = it.pass_id().to_string();
    assert_eq!(it.next(), Some(Ok(0)));
    assert!(it.next().unwrap().is_err());

    let events = capture.events_for_pass(&pass_id);
    let error_event = events
        .iter()
        .find(|e| e.op.as_deref() == Some(OP_LENGTH) && e.event.as_deref() == Some(EVENT_END_ERROR))
        .expect("Should have error event");
    assert_eq!(error_event.field(FIELD_ERR_CODE), Some("ERR_LENGTH_MISMATCH"));
    let message = error_event.field(FIELD_ERR_MESSAGE).expect("Should render error");
    assert!(message.contains(&format!("(pass_id: {})", pass_id)));
}

#[test]
fn test_exhausted_join_logs_pair_counts() {
    let capture = init_test_capture();

    let pairs = merge_join(0..1021, |x| *x, 1020..1022, |x| *x).count();
    assert_eq!(pairs, 1022);

    let summaries = capture.count_events(|e| {
        e.op.as_deref() == Some(OP_FULL_JOIN)
            && e.field(FIELD_LEFT_ONLY) == Some("1020")
            && e.field(FIELD_RIGHT_ONLY) == Some("1")
            && e.field(FIELD_BOTH) == Some("1")
    });
    assert_eq!(summaries, 1);
}
