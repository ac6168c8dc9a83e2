// Dated shifts: creation, windows, updates

mod common;

use std::sync::Arc;

use chrono::{NaiveDate, TimeDelta};
use common::{
    MAX_SHIFT_MINUTES, at, create_employee, create_org, setup, setup_file_backed, ts,
};
use shared::ErrorCode;
use shift_server::services::ShiftChanges;
use tokio::sync::Barrier;

#[tokio::test]
async fn test_create_and_read_shift() {
    let state = setup().await;
    let org = create_org(&state, "cafe").await;
    let ada = create_employee(&state, org.id, "ada@example.com").await;

    let created = state
        .shifts
        .create_shift(org.id, &[ada], at(8, 0), at(12, 0), None)
        .await
        .unwrap();
    assert_eq!(created.start, at(8, 0));
    assert_eq!(created.end, at(12, 0));
    assert_eq!(created.employee_ids, vec![ada]);
    assert!(created.check_ins.is_empty());

    let read = state.shifts.read(created.id, org.id).await.unwrap();
    assert_eq!(read, created);
}

#[tokio::test]
async fn test_offset_timestamps_are_stored_in_utc() {
    let state = setup().await;
    let org = create_org(&state, "cafe").await;

    let start = ts("2024-01-10T09:00:00+01:00");
    let end = ts("2024-01-10T13:30:00+01:00");
    let created = state
        .shifts
        .create_shift(org.id, &[], start, end, None)
        .await
        .unwrap();
    assert_eq!(created.start, at(8, 0));
    assert_eq!(created.end, at(12, 30));
}

#[tokio::test]
async fn test_invalid_range_is_rejected() {
    let state = setup().await;
    let org = create_org(&state, "cafe").await;

    let err = state
        .shifts
        .create_shift(org.id, &[], at(12, 0), at(12, 0), None)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ShiftInvalidRange);

    let err = state
        .shifts
        .create_shift(org.id, &[], at(12, 0), at(8, 0), None)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ShiftInvalidRange);
}

#[tokio::test]
async fn test_bounds_keep_millisecond_precision() {
    let state = setup().await;
    let org = create_org(&state, "cafe").await;

    let created = state
        .shifts
        .create_shift(
            org.id,
            &[],
            ts("2024-01-10T09:00:00.123456+01:00"),
            ts("2024-01-10T13:00:00.000999+01:00"),
            None,
        )
        .await
        .unwrap();
    assert_eq!(created.start, ts("2024-01-10T08:00:00.123Z"));
    assert_eq!(created.end, at(12, 0));

    let read = state.shifts.read(created.id, org.id).await.unwrap();
    assert_eq!(read.start, created.start);
    assert_eq!(read.end, created.end);

    let updated = state
        .shifts
        .update(
            created.id,
            org.id,
            ShiftChanges {
                employee_ids: &[],
                check_in_ids: &[],
                start: "2024-01-10T09:00:00.987654Z",
                end: "2024-01-10T10:00:00Z",
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.start, ts("2024-01-10T09:00:00.987Z"));

    // Both bounds collapse onto the same millisecond
    let err = state
        .shifts
        .create_shift(
            org.id,
            &[],
            ts("2024-01-10T09:00:00.000100Z"),
            ts("2024-01-10T09:00:00.000900Z"),
            None,
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ShiftInvalidRange);
}

#[tokio::test]
async fn test_foreign_employees_are_dropped_from_roster() {
    let state = setup().await;
    let org = create_org(&state, "cafe").await;
    let other = create_org(&state, "bar").await;
    let ada = create_employee(&state, org.id, "ada@example.com").await;
    let eve = create_employee(&state, other.id, "eve@example.com").await;

    let created = state
        .shifts
        .create_shift(org.id, &[eve, ada, 9999], at(8, 0), at(12, 0), None)
        .await
        .unwrap();
    assert_eq!(created.employee_ids, vec![ada]);
}

#[tokio::test]
async fn test_schedule_reference_must_belong_to_organization() {
    let state = setup().await;
    let org = create_org(&state, "cafe").await;
    let other = create_org(&state, "bar").await;
    let schedule = state
        .schedules
        .create_schedule(other.id, "Theirs", 1)
        .await
        .unwrap();

    let err = state
        .shifts
        .create_shift(org.id, &[], at(8, 0), at(12, 0), Some(schedule.id))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ScheduleNotFound);
}

#[tokio::test]
async fn test_outside_schedule_starts_on_next_quarter_hour() {
    let state = setup().await;
    let org = create_org(&state, "cafe").await;

    let shift = state
        .shifts
        .create_outside_schedule(org.id, &[], 60, ts("2024-01-10T09:07:30Z"))
        .await
        .unwrap();
    assert_eq!(shift.start, at(9, 15));
    assert_eq!(shift.end, at(10, 15));

    // Exactly on a boundary: kept
    let shift = state
        .shifts
        .create_outside_schedule(org.id, &[], 30, at(9, 30))
        .await
        .unwrap();
    assert_eq!(shift.start, at(9, 30));
    assert_eq!(shift.end, at(10, 0));

    let err = state
        .shifts
        .create_outside_schedule(org.id, &[], 0, at(9, 30))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationFailed);
}

#[tokio::test]
async fn test_limited_shift_duration_cap() {
    let state = setup().await;
    let org = create_org(&state, "cafe").await;
    let start = at(6, 0);

    let at_cap = start + TimeDelta::minutes(MAX_SHIFT_MINUTES);
    state
        .shifts
        .create_limited_shift(org.id, &[], start, at_cap, MAX_SHIFT_MINUTES)
        .await
        .unwrap();

    let err = state
        .shifts
        .create_limited_shift(
            org.id,
            &[],
            start,
            at_cap + TimeDelta::minutes(1),
            MAX_SHIFT_MINUTES,
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ShiftDurationExceeded);
}

#[tokio::test]
async fn test_window_queries_are_boundary_inclusive() {
    let state = setup().await;
    let org = create_org(&state, "cafe").await;

    let morning = state
        .shifts
        .create_shift(org.id, &[], at(8, 0), at(12, 0), None)
        .await
        .unwrap();
    let evening = state
        .shifts
        .create_shift(org.id, &[], at(17, 0), at(23, 0), None)
        .await
        .unwrap();
    let overnight = state
        .shifts
        .create_shift(
            org.id,
            &[],
            at(22, 0),
            ts("2024-01-11T06:00:00Z"),
            None,
        )
        .await
        .unwrap();

    let ids = |shifts: Vec<shared::models::Shift>| shifts.iter().map(|s| s.id).collect::<Vec<_>>();

    let touching = state
        .shifts
        .list_by_organization(org.id, Some((at(12, 0), at(17, 0))))
        .await
        .unwrap();
    assert_eq!(ids(touching), vec![morning.id, evening.id]);

    let all = state.shifts.list_by_organization(org.id, None).await.unwrap();
    assert_eq!(ids(all), vec![morning.id, evening.id, overnight.id]);

    let next_day = state
        .shifts
        .list_for_day(org.id, NaiveDate::from_ymd_opt(2024, 1, 11).unwrap())
        .await
        .unwrap();
    assert_eq!(ids(next_day), vec![overnight.id]);

    let ongoing = state.shifts.list_ongoing(org.id, at(22, 30)).await.unwrap();
    assert_eq!(ids(ongoing), vec![evening.id, overnight.id]);

    let ongoing = state.shifts.list_ongoing(org.id, at(12, 0)).await.unwrap();
    assert_eq!(ids(ongoing), vec![morning.id]);
}

#[tokio::test]
async fn test_is_open_by_short_key() {
    let state = setup().await;
    let org = create_org(&state, "cafe").await;
    state
        .shifts
        .create_shift(org.id, &[], at(8, 0), at(12, 0), None)
        .await
        .unwrap();

    assert!(state.shifts.is_open("cafe", at(10, 0)).await.unwrap());
    assert!(!state.shifts.is_open("cafe", at(13, 0)).await.unwrap());

    let err = state.shifts.is_open("nowhere", at(10, 0)).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::OrganizationNotFound);
}

#[tokio::test]
async fn test_update_replaces_roster_and_prunes_check_ins() {
    let state = setup().await;
    let org = create_org(&state, "cafe").await;
    let ada = create_employee(&state, org.id, "ada@example.com").await;
    let bob = create_employee(&state, org.id, "bob@example.com").await;
    let cy = create_employee(&state, org.id, "cy@example.com").await;

    let shift = state
        .shifts
        .create_shift(org.id, &[ada, bob], at(8, 0), at(12, 0), None)
        .await
        .unwrap();
    let kept = state
        .check_ins
        .check_in(shift.id, ada, org.id, at(8, 1))
        .await
        .unwrap()
        .unwrap();
    state
        .check_ins
        .check_in(shift.id, bob, org.id, at(8, 2))
        .await
        .unwrap()
        .unwrap();

    let updated = state
        .shifts
        .update(
            shift.id,
            org.id,
            ShiftChanges {
                employee_ids: &[cy, ada],
                check_in_ids: &[kept.id],
                start: "2024-01-10T09:00:00Z",
                end: "2024-01-10T13:00:00+00:00",
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.start, at(9, 0));
    assert_eq!(updated.end, at(13, 0));
    assert_eq!(updated.employee_ids, vec![ada, cy]);
    assert_eq!(updated.check_ins, vec![kept]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_updates_serialize() {
    const TASKS: usize = 16;

    let (_dir, state) = setup_file_backed().await;
    let org = create_org(&state, "cafe").await;
    let ada = create_employee(&state, org.id, "ada@example.com").await;
    let bob = create_employee(&state, org.id, "bob@example.com").await;
    let shift = state
        .shifts
        .create_shift(org.id, &[ada], at(8, 0), at(12, 0), None)
        .await
        .unwrap();

    let (shift_id, org_id) = (shift.id, org.id);
    let barrier = Arc::new(Barrier::new(TASKS));
    let tasks = (0..TASKS).map(|i| {
        let state = state.clone();
        let barrier = barrier.clone();
        tokio::spawn(async move {
            let roster = if i % 2 == 0 { [ada] } else { [bob] };
            let end = format!("2024-01-10T{:02}:00:00Z", 12 + i % 4);
            barrier.wait().await;
            state
                .shifts
                .update(
                    shift_id,
                    org_id,
                    ShiftChanges {
                        employee_ids: &roster,
                        check_in_ids: &[],
                        start: "2024-01-10T08:00:00Z",
                        end: &end,
                    },
                )
                .await
        })
    });
    for result in futures::future::join_all(tasks).await {
        let updated = result.unwrap().unwrap();
        assert_eq!(updated.employee_ids.len(), 1);
    }

    let read = state.shifts.read(shift_id, org_id).await.unwrap();
    assert_eq!(read.employee_ids.len(), 1);
    assert!(read.employee_ids[0] == ada || read.employee_ids[0] == bob);
}

#[tokio::test]
async fn test_update_rejects_bad_input() {
    let state = setup().await;
    let org = create_org(&state, "cafe").await;
    let shift = state
        .shifts
        .create_shift(org.id, &[], at(8, 0), at(12, 0), None)
        .await
        .unwrap();

    let changes = |start: &'static str, end: &'static str| ShiftChanges {
        employee_ids: &[],
        check_in_ids: &[],
        start,
        end,
    };

    let err = state
        .shifts
        .update(shift.id, org.id, changes("yesterday", "2024-01-10T13:00:00Z"))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidTimestamp);

    let err = state
        .shifts
        .update(
            shift.id,
            org.id,
            changes("2024-01-10T13:00:00Z", "2024-01-10T09:00:00Z"),
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ShiftInvalidRange);

    let err = state
        .shifts
        .update(
            shift.id + 1,
            org.id,
            changes("2024-01-10T09:00:00Z", "2024-01-10T13:00:00Z"),
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ShiftNotFound);

    // Unchanged
    let read = state.shifts.read(shift.id, org.id).await.unwrap();
    assert_eq!(read, shift);
}

#[tokio::test]
async fn test_delete_shift_removes_check_ins() {
    let state = setup().await;
    let org = create_org(&state, "cafe").await;
    let ada = create_employee(&state, org.id, "ada@example.com").await;
    let shift = state
        .shifts
        .create_shift(org.id, &[ada], at(8, 0), at(12, 0), None)
        .await
        .unwrap();
    state
        .check_ins
        .check_in(shift.id, ada, org.id, at(8, 0))
        .await
        .unwrap();

    state.shifts.delete(shift.id, org.id).await.unwrap();

    let err = state.shifts.read(shift.id, org.id).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ShiftNotFound);
    let err = state.shifts.delete(shift.id, org.id).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ShiftNotFound);
}
