//! Heatmap tests: row set, ordering, and range scoping through the service.

use crate::in_memory::helpers::{World, create_resource, runtime, week, world};
use capstan::capacity::domain::{DateRange, RagStatus, WeeklyAssignment};
use rstest::rstest;
use std::io;
use tokio::runtime::Runtime;

fn january() -> DateRange {
    DateRange::new(week(1), week(31))
}

/// Tests that every active resource gets a row, even without weekly data.
#[rstest]
fn every_active_resource_appears_once(runtime: io::Result<Runtime>, world: World) {
    let rt = runtime.expect("runtime creation");
    let busy = create_resource(&rt, &world, "Bea", 40.0, 8.0);
    create_resource(&rt, &world, "Abe", 40.0, 8.0);
    rt.block_on(world.service.upsert_week(
        busy.id(),
        week(6),
        WeeklyAssignment::new(40.0, 44.0),
    ))
    .expect("upsert should succeed");

    let rows = rt
        .block_on(world.service.heatmap(world.project_id, january()))
        .expect("heatmap should succeed");

    let names: Vec<&str> = rows.iter().map(|row| row.resource_name.as_str()).collect();
    assert_eq!(names, vec!["Abe", "Bea"], "rows follow name order");

    let Some(abe) = rows.first() else {
        return;
    };
    assert!(abe.weekly_data.is_empty(), "no data is an empty row, not an omission");

    let Some(bea) = rows.get(1) else {
        return;
    };
    assert_eq!(bea.weekly_data.len(), 1);
    let Some(cell) = bea.weekly_data.first() else {
        return;
    };
    assert_eq!(cell.week_start, week(6));
    assert_eq!(cell.week_end, week(12));
    assert_eq!(cell.load_percentage, 110.0);
    assert_eq!(cell.rag_status, RagStatus::Red);
}

/// Tests that range bounds are inclusive on the week start.
#[rstest]
fn range_bounds_are_inclusive_on_week_start(runtime: io::Result<Runtime>, world: World) {
    let rt = runtime.expect("runtime creation");
    let resource = create_resource(&rt, &world, "Ann", 40.0, 8.0);
    for day in [6, 13, 20, 27] {
        rt.block_on(world.service.upsert_week(
            resource.id(),
            week(day),
            WeeklyAssignment::new(40.0, 8.0),
        ))
        .expect("upsert should succeed");
    }

    let rows = rt
        .block_on(
            world
                .service
                .heatmap(world.project_id, DateRange::new(week(13), week(20))),
        )
        .expect("heatmap should succeed");
    let Some(row) = rows.first() else {
        return;
    };
    let starts: Vec<_> = row.weekly_data.iter().map(|cell| cell.week_start).collect();
    assert_eq!(starts, vec![week(13), week(20)], "boundary weeks are kept");
}

/// Tests that cells within a row are ordered by week start.
#[rstest]
fn cells_are_ordered_by_week_start(runtime: io::Result<Runtime>, world: World) {
    let rt = runtime.expect("runtime creation");
    let resource = create_resource(&rt, &world, "Ann", 40.0, 8.0);
    for day in [27, 6, 20, 13] {
        rt.block_on(world.service.upsert_week(
            resource.id(),
            week(day),
            WeeklyAssignment::new(40.0, 8.0),
        ))
        .expect("upsert should succeed");
    }

    let rows = rt
        .block_on(world.service.heatmap(world.project_id, january()))
        .expect("heatmap should succeed");
    let Some(row) = rows.first() else {
        return;
    };
    let starts: Vec<_> = row.weekly_data.iter().map(|cell| cell.week_start).collect();
    assert_eq!(starts, vec![week(6), week(13), week(20), week(27)]);
}

/// Tests that archived resources are left out of the heatmap entirely.
#[rstest]
fn archived_resources_are_excluded(runtime: io::Result<Runtime>, world: World) {
    let rt = runtime.expect("runtime creation");
    let ann = create_resource(&rt, &world, "Ann", 40.0, 8.0);
    create_resource(&rt, &world, "Bob", 40.0, 8.0);
    rt.block_on(world.service.upsert_week(
        ann.id(),
        week(6),
        WeeklyAssignment::new(40.0, 8.0),
    ))
    .expect("upsert should succeed");
    rt.block_on(world.service.archive_resource(ann.id()))
        .expect("archival should succeed");

    let rows = rt
        .block_on(world.service.heatmap(world.project_id, january()))
        .expect("heatmap should succeed");
    let names: Vec<&str> = rows.iter().map(|row| row.resource_name.as_str()).collect();
    assert_eq!(names, vec!["Bob"], "archived rows and their data are omitted");
}

/// Tests that an empty project yields an empty heatmap, not an error.
#[rstest]
fn empty_project_yields_empty_heatmap(runtime: io::Result<Runtime>, world: World) {
    let rt = runtime.expect("runtime creation");
    let rows = rt
        .block_on(world.service.heatmap(world.project_id, january()))
        .expect("heatmap should succeed");
    assert!(rows.is_empty());
}
