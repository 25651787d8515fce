//! Weekly upsert tests: composite-key idempotence, overwrite semantics, and
//! note preservation.

use crate::in_memory::helpers::{World, create_resource, runtime, week, world};
use capstan::capacity::{
    domain::{RagStatus, ResourceId, WeeklyAssignment},
    services::CapacityError,
};
use rstest::rstest;
use std::io;
use tokio::runtime::Runtime;

/// Tests that repeating an identical upsert leaves exactly one row.
#[rstest]
fn identical_upserts_leave_one_row(runtime: io::Result<Runtime>, world: World) {
    let rt = runtime.expect("runtime creation");
    let resource = create_resource(&rt, &world, "Ann", 40.0, 0.0);

    for _ in 0..2 {
        rt.block_on(world.service.upsert_week(
            resource.id(),
            week(6),
            WeeklyAssignment::new(40.0, 32.0),
        ))
        .expect("upsert should succeed");
    }

    let weeks = rt
        .block_on(world.service.list_weeks(resource.id()))
        .expect("listing should succeed");
    assert_eq!(weeks.len(), 1);
    let Some(row) = weeks.first() else {
        return;
    };
    assert_eq!(row.availability(), 40.0);
    assert_eq!(row.workload(), 32.0);
    assert_eq!(row.load_percentage(), 80.0);
    assert_eq!(row.rag_status(), RagStatus::Amber);
}

/// Tests that a later upsert overwrites hours but preserves omitted notes.
#[rstest]
fn later_upsert_overwrites_hours_and_keeps_omitted_notes(
    runtime: io::Result<Runtime>,
    world: World,
) {
    let rt = runtime.expect("runtime creation");
    let resource = create_resource(&rt, &world, "Ann", 40.0, 0.0);

    let first = rt
        .block_on(world.service.upsert_week(
            resource.id(),
            week(6),
            WeeklyAssignment::new(40.0, 32.0).with_notes("a"),
        ))
        .expect("first upsert should succeed");
    let second = rt
        .block_on(world.service.upsert_week(
            resource.id(),
            week(6),
            WeeklyAssignment::new(40.0, 20.0),
        ))
        .expect("second upsert should succeed");

    assert_eq!(second.id(), first.id(), "same row, revised in place");
    assert_eq!(second.workload(), 20.0);
    assert_eq!(second.load_percentage(), 50.0);
    assert_eq!(second.rag_status(), RagStatus::Green);
    assert_eq!(second.notes(), Some("a"), "omitted notes preserved");

    let third = rt
        .block_on(world.service.upsert_week(
            resource.id(),
            week(6),
            WeeklyAssignment::new(40.0, 20.0).with_notes("b"),
        ))
        .expect("third upsert should succeed");
    assert_eq!(third.notes(), Some("b"), "supplied notes replace stored ones");
}

/// Tests that the stored window always spans seven days.
#[rstest]
fn stored_window_spans_seven_days(runtime: io::Result<Runtime>, world: World) {
    let rt = runtime.expect("runtime creation");
    let resource = create_resource(&rt, &world, "Ann", 40.0, 0.0);

    let row = rt
        .block_on(world.service.upsert_week(
            resource.id(),
            week(6),
            WeeklyAssignment::new(40.0, 8.0),
        ))
        .expect("upsert should succeed");
    assert_eq!(row.window().start(), week(6));
    assert_eq!(row.window().end(), week(12));
}

/// Tests that different weeks create independent rows, listed in order.
#[rstest]
fn weeks_accumulate_in_ascending_order(runtime: io::Result<Runtime>, world: World) {
    let rt = runtime.expect("runtime creation");
    let resource = create_resource(&rt, &world, "Ann", 40.0, 0.0);

    for day in [20, 6, 13] {
        rt.block_on(world.service.upsert_week(
            resource.id(),
            week(day),
            WeeklyAssignment::new(40.0, 8.0),
        ))
        .expect("upsert should succeed");
    }

    let weeks = rt
        .block_on(world.service.list_weeks(resource.id()))
        .expect("listing should succeed");
    let starts: Vec<_> = weeks.iter().map(|row| row.window().start()).collect();
    assert_eq!(starts, vec![week(6), week(13), week(20)]);
}

/// Tests that an unknown resource cannot receive weekly assignments.
#[rstest]
fn upsert_for_unknown_resource_is_not_found(runtime: io::Result<Runtime>, world: World) {
    let rt = runtime.expect("runtime creation");
    let result = rt.block_on(world.service.upsert_week(
        ResourceId::new(),
        week(6),
        WeeklyAssignment::new(40.0, 8.0),
    ));
    assert!(matches!(result, Err(CapacityError::ResourceNotFound(_))));
}

/// Tests the degenerate zero-availability week.
#[rstest]
fn zero_availability_week_is_green(runtime: io::Result<Runtime>, world: World) {
    let rt = runtime.expect("runtime creation");
    let resource = create_resource(&rt, &world, "Ann", 40.0, 0.0);

    let row = rt
        .block_on(world.service.upsert_week(
            resource.id(),
            week(6),
            WeeklyAssignment::new(0.0, 25.0),
        ))
        .expect("upsert should succeed");
    assert_eq!(row.load_percentage(), 0.0);
    assert_eq!(row.rag_status(), RagStatus::Green);
}
