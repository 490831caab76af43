//! Void Snapshot - Actor Snapshot and Restore
//!
//! This crate captures the live state of a player actor and a set of tracked
//! world actors into a serializable [`Snapshot`], and reconstructs equivalent
//! actors and components from it later.
//!
//! # Features
//!
//! - Name-keyed, version-tolerant binary codec for opaque actor state
//! - Two-phase restore (spawn with deferred activation, then finish) so that
//!   records can reference actors that exist only after Phase 1
//! - Capability-aware component handling: relative transforms for spatial
//!   components, velocities for physics and movement components
//! - Container-aware respawn with default-container fallback
//! - Controller rebinding and orientation restore for the player
//!
//! The hosting engine stays in charge of actor lifetime, reflection, physics
//! and persistence to disk; it plugs in through the traits in [`host`].
//!
//! # Example
//!
//! ```ignore
//! use void_snapshot::prelude::*;
//!
//! // Capture the player and every tracked actor.
//! let mut snapshot = Snapshot::new();
//! snapshot.capture(&world, player, &tracked)?;
//! let bytes = snapshot.to_bytes()?;
//!
//! // Later: bring the scene back.
//! let mut snapshot = Snapshot::from_bytes(&bytes)?;
//! snapshot.restore(&mut world)?;
//! ```

pub mod archive;
pub mod capture;
pub mod error;
pub mod host;
pub mod record;
pub mod restore;
pub mod snapshot;
pub mod transform;

pub mod prelude {
    pub use crate::archive::{FieldValue, FieldWriter, Persist};
    pub use crate::capture::capture_actor;
    pub use crate::error::{CodecError, SnapshotError};
    pub use crate::host::{
        Actor, ActorId, ClassId, CollisionPolicy, Component, ContainerId, Controller, Movement,
        PhysicsBody, SpawnOptions, Spatial, Teleport, World,
    };
    pub use crate::record::{ActorRecord, ComponentRecord, RestorePhase, VelocityRecord};
    pub use crate::restore::{finish_actor, spawn_actor};
    pub use crate::snapshot::Snapshot;
    pub use crate::transform::{Rotator, Transform};
}

pub use prelude::*;
