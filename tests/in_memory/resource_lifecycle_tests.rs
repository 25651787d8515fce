//! Resource lifecycle tests: creation rules, partial updates, archival, and
//! cascade delete.

use crate::in_memory::helpers::{World, create_resource, runtime, week, world};
use capstan::capacity::{
    domain::{NewResource, ProjectId, RagStatus, ResourceRole, ResourceUpdate, WeeklyAssignment},
    services::{CapacityError, ErrorKind},
};
use rstest::rstest;
use std::io;
use tokio::runtime::Runtime;

/// Tests that creation computes derived fields from supplied hours.
#[rstest]
fn creation_classifies_current_snapshot(runtime: io::Result<Runtime>, world: World) {
    let rt = runtime.expect("runtime creation");
    let resource = create_resource(&rt, &world, "Ann", 40.0, 32.0);

    assert_eq!(resource.load_percentage(), 80.0);
    assert_eq!(resource.rag_status(), RagStatus::Amber);
    assert!(!resource.is_archived());
}

/// Tests project-scoped name uniqueness across archive states and projects.
#[rstest]
fn name_uniqueness_is_project_scoped(runtime: io::Result<Runtime>, world: World) {
    let rt = runtime.expect("runtime creation");
    create_resource(&rt, &world, "Ann", 40.0, 0.0);

    let duplicate = rt.block_on(
        world
            .service
            .create_resource(world.project_id, NewResource::new("Ann", ResourceRole::Tester)),
    );
    assert!(
        matches!(duplicate, Err(CapacityError::DuplicateResourceName { ref name, .. }) if name == "Ann"),
        "same-project duplicate must be rejected"
    );

    let other_project = ProjectId::new();
    world
        .directory
        .register(other_project)
        .expect("register project");
    rt.block_on(
        world
            .service
            .create_resource(other_project, NewResource::new("Ann", ResourceRole::Developer)),
    )
    .expect("same name in another project should succeed");
}

/// Tests the custom role rule on creation and across role changes.
#[rstest]
fn custom_role_label_follows_the_other_role(runtime: io::Result<Runtime>, world: World) {
    let rt = runtime.expect("runtime creation");

    let missing = rt.block_on(
        world
            .service
            .create_resource(world.project_id, NewResource::new("Ola", ResourceRole::Other)),
    );
    assert!(matches!(missing, Err(CapacityError::MissingCustomRole)));

    let created = rt
        .block_on(world.service.create_resource(
            world.project_id,
            NewResource::new("Ola", ResourceRole::Other).with_custom_role_name("Scrum Master"),
        ))
        .expect("labelled creation should succeed");
    assert_eq!(created.custom_role_name(), Some("Scrum Master"));

    let updated = rt
        .block_on(world.service.update_resource(
            created.id(),
            ResourceUpdate::new().with_role(ResourceRole::Developer),
        ))
        .expect("role change should succeed");
    assert_eq!(updated.custom_role_name(), None, "label cleared on leaving Other");
}

/// Tests that partial hour updates resolve against the stored counterpart.
#[rstest]
fn partial_update_resolves_both_hour_fields(runtime: io::Result<Runtime>, world: World) {
    let rt = runtime.expect("runtime creation");
    let resource = create_resource(&rt, &world, "Ann", 40.0, 20.0);

    let updated = rt
        .block_on(
            world
                .service
                .update_resource(resource.id(), ResourceUpdate::new().with_availability(16.0)),
        )
        .expect("update should succeed");

    assert_eq!(updated.weekly_workload(), 20.0, "workload untouched");
    assert_eq!(updated.load_percentage(), 125.0);
    assert_eq!(updated.rag_status(), RagStatus::Red);
}

/// Tests that updating an unknown resource reports not-found.
#[rstest]
fn update_of_unknown_resource_is_not_found(runtime: io::Result<Runtime>, world: World) {
    let rt = runtime.expect("runtime creation");
    let result = rt.block_on(world.service.update_resource(
        capstan::capacity::domain::ResourceId::new(),
        ResourceUpdate::new().with_workload(8.0),
    ));
    assert!(matches!(result, Err(CapacityError::ResourceNotFound(_))));
    let Err(err) = result else {
        return;
    };
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

/// Tests that archival keeps history readable while blocking new weeks.
#[rstest]
fn archival_retains_history_but_blocks_new_weeks(runtime: io::Result<Runtime>, world: World) {
    let rt = runtime.expect("runtime creation");
    let resource = create_resource(&rt, &world, "Ann", 40.0, 8.0);
    rt.block_on(world.service.upsert_week(
        resource.id(),
        week(6),
        WeeklyAssignment::new(40.0, 8.0),
    ))
    .expect("upsert should succeed");

    let archived = rt
        .block_on(world.service.archive_resource(resource.id()))
        .expect("archival should succeed");
    assert!(archived.is_archived());

    let rejected = rt.block_on(world.service.upsert_week(
        resource.id(),
        week(13),
        WeeklyAssignment::new(40.0, 8.0),
    ));
    assert!(matches!(rejected, Err(CapacityError::ResourceArchived(_))));

    let weeks = rt
        .block_on(world.service.list_weeks(resource.id()))
        .expect("listing should succeed");
    assert_eq!(weeks.len(), 1, "existing history is retained");
}

/// Tests that deleting a resource removes its weekly rows with it.
#[rstest]
fn delete_cascades_to_weekly_rows(runtime: io::Result<Runtime>, world: World) {
    let rt = runtime.expect("runtime creation");
    let resource = create_resource(&rt, &world, "Ann", 40.0, 8.0);
    for day in [6, 13, 20] {
        rt.block_on(world.service.upsert_week(
            resource.id(),
            week(day),
            WeeklyAssignment::new(40.0, 8.0),
        ))
        .expect("upsert should succeed");
    }

    rt.block_on(world.service.delete_resource(resource.id()))
        .expect("deletion should succeed");

    let weeks = rt
        .block_on(world.service.list_weeks(resource.id()))
        .expect("listing should succeed");
    assert!(weeks.is_empty(), "no orphaned workload records");
}
