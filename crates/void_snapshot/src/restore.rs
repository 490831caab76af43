//! Restore engine: two-phase reconstruction of saved actors
//!
//! Phase 1 ([`spawn_actor`]) creates the live actor with deferred activation
//! and applies its opaque state. Phase 2 ([`finish_actor`]) runs once every
//! actor of the snapshot exists: components are re-matched by name,
//! structural state is applied and activation is finalized. The split exists
//! because activation logic may read component state, and because records may
//! reference actors that only exist after every Phase 1 has run.

use crate::archive;
use crate::error::{Result, SnapshotError};
use crate::host::{CollisionPolicy, Component, ContainerId, SpawnOptions, Teleport, World};
use crate::record::{ActorRecord, ComponentRecord, RestorePhase};
use log::{debug, info, warn};

/// Phase 1: spawn a live actor for `record` with deferred activation
///
/// On success the record holds the live handle in `spawned` and moves to
/// [`RestorePhase::AwaitingFinish`]. A missing home container is not an
/// error; the actor falls back to the host's default container.
pub fn spawn_actor(world: &mut dyn World, record: &mut ActorRecord) -> Result<()> {
    info!("loading actor '{}'", record.name);
    record.phase = RestorePhase::Spawning;

    let container = resolve_container(&*world, &record.container);
    if container.is_none() {
        warn!(
            "container '{}' is not loaded, spawning '{}' into the default container",
            record.container, record.name
        );
    }

    let options = SpawnOptions {
        name: record.name.clone(),
        defer_activation: true,
        container,
        collision: CollisionPolicy::AlwaysSpawn,
    };
    let actor_id = world.spawn(record.class, record.transform, options)?;

    let actor = world
        .actor_mut(actor_id)
        .ok_or(SnapshotError::InvalidActor(actor_id))?;
    actor.set_lifespan(record.lifespan);
    archive::decode(&record.data, actor)?;

    record.spawned = Some(actor_id);
    record.phase = RestorePhase::AwaitingFinish;
    Ok(())
}

/// Phase 2: apply component records and finalize activation
///
/// Component records without a live match are skipped; a component present
/// at capture time but gone after a class change is not an error.
pub fn finish_actor(world: &mut dyn World, record: &mut ActorRecord) -> Result<()> {
    let actor_id = match (record.phase, record.spawned) {
        (RestorePhase::AwaitingFinish, Some(id)) => id,
        _ => return Err(SnapshotError::NotAwaitingFinish(record.name.clone())),
    };

    {
        let actor = world
            .actor_mut(actor_id)
            .ok_or(SnapshotError::InvalidActor(actor_id))?;
        let mut components = actor.components_mut();
        for component_record in &record.components {
            // First name match wins.
            match components
                .iter_mut()
                .find(|c| c.name() == component_record.name)
            {
                Some(component) => apply_component(component_record, &mut **component)?,
                None => debug!(
                    "component record '{}' has no live match on '{}', skipped",
                    component_record.name, record.name
                ),
            }
        }
    }

    world.finish_spawning(actor_id, record.transform);
    record.phase = RestorePhase::Finished;
    Ok(())
}

fn resolve_container(world: &dyn World, path: &str) -> Option<ContainerId> {
    let mut found = None;
    for (container_path, id) in world.containers() {
        debug!("loaded container: {}", container_path);
        if container_path == path {
            found = Some(id);
        }
    }
    found
}

fn apply_component(record: &ComponentRecord, component: &mut dyn Component) -> Result<()> {
    archive::decode(&record.data, component)?;

    if let Some(transform) = record.transform {
        if let Some(spatial) = component.spatial_mut() {
            spatial.set_relative_transform(transform, Teleport::Physics);
        }
    }

    if let Some(velocity) = record.velocity {
        // Physics wins over movement, mirroring capture. A body that is not
        // simulating keeps whatever velocity it has. Mass depends on the
        // spawned scale, so it must be recomputed once velocities land.
        if let Some(body) = component.physics_mut() {
            if body.is_simulating() {
                body.set_linear_velocity(velocity.linear);
                body.set_angular_velocity(velocity.angular);
                body.recompute_mass_properties();
            }
        } else if let Some(movement) = component.movement_mut() {
            movement.set_velocity(velocity.linear);
            movement.velocity_changed();
        }
    }

    Ok(())
}
