//! Capture engine: walks a live actor into an [`ActorRecord`]

use crate::archive;
use crate::host::{Actor, Component};
use crate::record::{ActorRecord, ComponentRecord, VelocityRecord};
use glam::Vec3;
use log::info;

/// Capture one live actor and all of its attached components
///
/// Read-only; the actor is not mutated. Structural state (class, name,
/// transform, container, lifespan) is recorded explicitly, everything else
/// goes through the tagged codec as opaque field data.
pub fn capture_actor(actor: &dyn Actor) -> ActorRecord {
    info!("saving actor '{}'", actor.name());

    let mut record = ActorRecord {
        class: actor.class(),
        name: actor.name().to_owned(),
        container: actor.container_path().to_owned(),
        transform: actor.transform(),
        lifespan: actor.lifespan(),
        data: archive::encode(actor),
        ..ActorRecord::default()
    };

    for component in actor.components() {
        record.components.push(capture_component(component));
    }

    record
}

fn capture_component(component: &dyn Component) -> ComponentRecord {
    let transform = component.spatial().map(|s| s.relative_transform());

    // Physics wins when a component could expose both velocity sources.
    let velocity = if let Some(body) = component.physics() {
        Some(VelocityRecord {
            linear: body.linear_velocity(),
            angular: body.angular_velocity(),
        })
    } else {
        component.movement().map(|movement| VelocityRecord {
            linear: movement.velocity(),
            angular: Vec3::ZERO,
        })
    };

    ComponentRecord {
        class: component.class(),
        name: component.name().to_owned(),
        data: archive::encode(component),
        transform,
        velocity,
    }
}
