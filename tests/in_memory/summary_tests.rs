//! Portfolio summary tests: bucket counts and RAG distribution agreement.

use crate::in_memory::helpers::{World, create_resource, runtime, week, world};
use capstan::capacity::domain::WeeklyAssignment;
use rstest::rstest;
use std::io;
use tokio::runtime::Runtime;

/// Tests that bucket counts and the RAG distribution agree at the thresholds.
#[rstest]
fn buckets_and_rag_distribution_agree(runtime: io::Result<Runtime>, world: World) {
    let rt = runtime.expect("runtime creation");
    // Loads: 25% green, 80% amber, 100% amber, 110% red.
    create_resource(&rt, &world, "Ann", 40.0, 10.0);
    create_resource(&rt, &world, "Bob", 40.0, 32.0);
    create_resource(&rt, &world, "Cid", 40.0, 40.0);
    create_resource(&rt, &world, "Dee", 40.0, 44.0);

    let summary = rt
        .block_on(world.service.capacity_summary(world.project_id))
        .expect("summary should succeed");

    assert_eq!(summary.total_resources, 4);
    assert_eq!(summary.underutilized, 1);
    assert_eq!(summary.ideal, 2, "both 80% and 100% are in the ideal band");
    assert_eq!(summary.overloaded, 1);
    assert_eq!(summary.rag_distribution.green, summary.underutilized);
    assert_eq!(summary.rag_distribution.amber, summary.ideal);
    assert_eq!(summary.rag_distribution.red, summary.overloaded);
}

/// Tests that the summary reads current snapshots, not weekly history.
#[rstest]
fn summary_reads_snapshots_not_weekly_history(runtime: io::Result<Runtime>, world: World) {
    let rt = runtime.expect("runtime creation");
    // Snapshot is green at 20%; the recorded week is red at 110%.
    let resource = create_resource(&rt, &world, "Ann", 40.0, 8.0);
    rt.block_on(world.service.upsert_week(
        resource.id(),
        week(6),
        WeeklyAssignment::new(40.0, 44.0),
    ))
    .expect("upsert should succeed");

    let summary = rt
        .block_on(world.service.capacity_summary(world.project_id))
        .expect("summary should succeed");
    assert_eq!(summary.underutilized, 1);
    assert_eq!(summary.overloaded, 0, "weekly rows do not feed the summary");
}

/// Tests that archived resources are left out of every count.
#[rstest]
fn archived_resources_are_excluded(runtime: io::Result<Runtime>, world: World) {
    let rt = runtime.expect("runtime creation");
    let ann = create_resource(&rt, &world, "Ann", 40.0, 44.0);
    create_resource(&rt, &world, "Bob", 40.0, 8.0);
    rt.block_on(world.service.archive_resource(ann.id()))
        .expect("archival should succeed");

    let summary = rt
        .block_on(world.service.capacity_summary(world.project_id))
        .expect("summary should succeed");
    assert_eq!(summary.total_resources, 1);
    assert_eq!(summary.overloaded, 0);
    assert_eq!(summary.rag_distribution.red, 0);
}

/// Tests that an empty project yields the zero summary.
#[rstest]
fn empty_project_yields_zero_summary(runtime: io::Result<Runtime>, world: World) {
    let rt = runtime.expect("runtime creation");
    let summary = rt
        .block_on(world.service.capacity_summary(world.project_id))
        .expect("summary should succeed");
    assert_eq!(summary.total_resources, 0);
    assert_eq!(summary.underutilized, 0);
    assert_eq!(summary.ideal, 0);
    assert_eq!(summary.overloaded, 0);
}
