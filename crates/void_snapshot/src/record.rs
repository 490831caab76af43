//! Serialized records of captured actors and components

use crate::host::{ActorId, ClassId};
use crate::transform::Transform;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Restore progress of one actor record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RestorePhase {
    /// No live actor exists for this record
    #[default]
    Unloaded,
    /// Phase 1 in progress
    Spawning,
    /// Live actor exists with deferred activation; Phase 2 pending
    AwaitingFinish,
    /// Fully restored and activated
    Finished,
}

/// Captured velocity of a physics or movement component
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VelocityRecord {
    /// Linear velocity in units per second
    pub linear: Vec3,
    /// Angular velocity in degrees per second (zero for movement components)
    pub angular: Vec3,
}

/// Captured state of one attached component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentRecord {
    /// Component class in the host's type registry
    pub class: ClassId,
    /// Name used to re-match the live component at restore
    pub name: String,
    /// Opaque field state, encoded by the tagged codec
    pub data: Vec<u8>,
    /// Relative placement; present only for spatial components
    pub transform: Option<Transform>,
    /// Present only for physics or movement components
    pub velocity: Option<VelocityRecord>,
}

/// Captured state of one actor and its components
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorRecord {
    /// Actor class in the host's type registry
    pub class: ClassId,
    /// Unique actor name, preserved across save and load
    pub name: String,
    /// Path of the container the actor was captured in
    pub container: String,
    /// World transform at capture time
    pub transform: Transform,
    /// Remaining lifespan in seconds; `None` means no expiry
    pub lifespan: Option<f32>,
    /// Opaque field state, encoded by the tagged codec
    pub data: Vec<u8>,
    /// Component records in the host's enumeration order
    pub components: Vec<ComponentRecord>,
    /// Live actor spawned for this record; valid only during a load
    #[serde(skip)]
    pub spawned: Option<ActorId>,
    /// Restore progress; meaningful only during a load
    #[serde(skip)]
    pub phase: RestorePhase,
}

impl Default for ActorRecord {
    fn default() -> Self {
        Self {
            class: ClassId::INVALID,
            name: String::new(),
            container: String::new(),
            transform: Transform::IDENTITY,
            lifespan: None,
            data: Vec::new(),
            components: Vec::new(),
            spawned: None,
            phase: RestorePhase::Unloaded,
        }
    }
}
