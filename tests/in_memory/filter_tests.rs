//! Listing and filter tests: ordering and AND-predicate semantics.

use crate::in_memory::helpers::{World, create_resource, runtime, world};
use capstan::capacity::{
    domain::{NewResource, ResourceRole},
    ports::ResourceFilter,
};
use rstest::rstest;
use std::io;
use tokio::runtime::Runtime;

/// Tests name-ascending order and the archived-resource toggle.
#[rstest]
fn listing_orders_by_name_and_honours_archive_toggle(runtime: io::Result<Runtime>, world: World) {
    let rt = runtime.expect("runtime creation");
    let carla = create_resource(&rt, &world, "Carla", 40.0, 8.0);
    create_resource(&rt, &world, "Abe", 40.0, 8.0);
    create_resource(&rt, &world, "Bea", 40.0, 8.0);
    rt.block_on(world.service.archive_resource(carla.id()))
        .expect("archival should succeed");

    let active = rt
        .block_on(world.service.list_resources(world.project_id, false))
        .expect("listing should succeed");
    let names: Vec<&str> = active.iter().map(|resource| resource.name()).collect();
    assert_eq!(names, vec!["Abe", "Bea"]);

    let all = rt
        .block_on(world.service.list_resources(world.project_id, true))
        .expect("listing should succeed");
    let names: Vec<&str> = all.iter().map(|resource| resource.name()).collect();
    assert_eq!(names, vec!["Abe", "Bea", "Carla"]);
}

/// Tests case-insensitive substring matching on names.
#[rstest]
fn filter_matches_name_substring_case_insensitively(runtime: io::Result<Runtime>, world: World) {
    let rt = runtime.expect("runtime creation");
    create_resource(&rt, &world, "Annabel", 40.0, 8.0);
    create_resource(&rt, &world, "Joanna", 40.0, 8.0);
    create_resource(&rt, &world, "Bob", 40.0, 8.0);

    let filter = ResourceFilter {
        name_contains: Some("ANNA".to_owned()),
        ..ResourceFilter::default()
    };
    let matched = rt
        .block_on(world.service.filter_resources(world.project_id, &filter))
        .expect("filtering should succeed");
    let names: Vec<&str> = matched.iter().map(|resource| resource.name()).collect();
    assert_eq!(names, vec!["Annabel", "Joanna"]);
}

/// Tests that all supplied predicates must hold together.
#[rstest]
fn filter_predicates_combine_with_and_semantics(runtime: io::Result<Runtime>, world: World) {
    let rt = runtime.expect("runtime creation");
    // Loads: Ann 50%, Bob 90%, Cid 110%.
    create_resource(&rt, &world, "Ann", 40.0, 20.0);
    create_resource(&rt, &world, "Bob", 40.0, 36.0);
    create_resource(&rt, &world, "Cid", 40.0, 44.0);
    rt.block_on(world.service.create_resource(
        world.project_id,
        NewResource::new("Des", ResourceRole::Designer)
            .with_availability(40.0)
            .with_workload(36.0),
    ))
    .expect("creation should succeed");

    let filter = ResourceFilter {
        role: Some(ResourceRole::Developer),
        min_load: Some(80.0),
        max_load: Some(100.0),
        ..ResourceFilter::default()
    };
    let matched = rt
        .block_on(world.service.filter_resources(world.project_id, &filter))
        .expect("filtering should succeed");
    let names: Vec<&str> = matched.iter().map(|resource| resource.name()).collect();
    assert_eq!(names, vec!["Bob"], "designer and out-of-band loads excluded");
}

/// Tests filtering on the archived flag alone.
#[rstest]
fn filter_on_archived_flag(runtime: io::Result<Runtime>, world: World) {
    let rt = runtime.expect("runtime creation");
    let ann = create_resource(&rt, &world, "Ann", 40.0, 8.0);
    create_resource(&rt, &world, "Bob", 40.0, 8.0);
    rt.block_on(world.service.archive_resource(ann.id()))
        .expect("archival should succeed");

    let filter = ResourceFilter {
        is_archived: Some(true),
        ..ResourceFilter::default()
    };
    let matched = rt
        .block_on(world.service.filter_resources(world.project_id, &filter))
        .expect("filtering should succeed");
    assert_eq!(matched.len(), 1);
    assert_eq!(matched.first().map(capstan::capacity::domain::Resource::name), Some("Ann"));
}
