//! Boundary traits implemented by the hosting engine
//!
//! The snapshot engine owns no actors and assumes no reflection mechanism.
//! It sees the world through these capabilities: reflection
//! ([`Persist`](crate::archive::Persist)), a spawn factory ([`World`]),
//! optional per-component spatial/physics/movement capabilities, and the
//! player controller.

use crate::archive::Persist;
use crate::error::Result;
use crate::transform::{Rotator, Transform};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Opaque reference to a spawnable actor or component class
///
/// Resolved through the host's type registry; the engine only ever asks
/// "given this id, instantiate" and "given this instance, what is its id".
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClassId(u64);

impl ClassId {
    /// Invalid class ID
    pub const INVALID: Self = Self(u64::MAX);

    /// Create from a raw registry value
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw registry value
    #[inline]
    pub const fn raw(&self) -> u64 {
        self.0
    }

    /// Check if this is a valid ID
    #[inline]
    pub const fn is_valid(&self) -> bool {
        self.0 != u64::MAX
    }

    /// Derive a stable ID from a registered class name
    pub fn from_name(name: &str) -> Self {
        // FNV-1a
        let mut hash = 0xcbf29ce484222325u64;
        for byte in name.bytes() {
            hash ^= byte as u64;
            hash = hash.wrapping_mul(0x100000001b3);
        }
        Self(hash)
    }
}

/// Non-owning handle to a live actor in the host's world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActorId(pub u64);

/// Handle to a loaded container (sub-level / world partition)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContainerId(pub u64);

/// How the factory resolves collisions at the spawn transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionPolicy {
    /// Spawn at the requested transform even if it overlaps
    #[default]
    AlwaysSpawn,
    /// Let the host nudge the transform to a nearby free spot
    AdjustIfPossible,
    /// Refuse to spawn on overlap
    FailOnCollision,
}

/// Options forwarded to the host factory on spawn
#[derive(Debug, Clone)]
pub struct SpawnOptions {
    /// Name to give the spawned actor, preserving saved identity
    pub name: String,
    /// Allocate the actor without running its activation logic yet
    pub defer_activation: bool,
    /// Container to spawn into; `None` means the host's default container
    pub container: Option<ContainerId>,
    /// Collision handling at the spawn transform
    pub collision: CollisionPolicy,
}

/// Whether a transform update may sweep or must teleport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Teleport {
    /// Sweep and interpolate as in normal movement
    None,
    /// Place immediately, bypassing collision and interpolation
    Physics,
}

/// Relative placement capability of a scene-attached component
pub trait Spatial {
    /// Placement relative to the owning actor
    fn relative_transform(&self) -> Transform;

    /// Apply a relative placement
    fn set_relative_transform(&mut self, transform: Transform, teleport: Teleport);
}

/// Rigid-body physics capability of a component
pub trait PhysicsBody {
    /// Linear velocity in units per second
    fn linear_velocity(&self) -> Vec3;

    /// Angular velocity in degrees per second
    fn angular_velocity(&self) -> Vec3;

    fn set_linear_velocity(&mut self, velocity: Vec3);

    fn set_angular_velocity(&mut self, velocity: Vec3);

    /// Whether any body of this component is currently simulating
    fn is_simulating(&self) -> bool;

    /// Recompute mass from the current shape and scale
    fn recompute_mass_properties(&mut self);
}

/// Kinematic movement capability (character movement, projectiles)
///
/// Mutually exclusive with [`PhysicsBody`] in practice; when a component
/// exposes both, the physics capability wins.
pub trait Movement {
    /// Current velocity in units per second
    fn velocity(&self) -> Vec3;

    fn set_velocity(&mut self, velocity: Vec3);

    /// Notify the component that its velocity was changed externally
    fn velocity_changed(&mut self);
}

/// A named sub-component attached to an actor
pub trait Component: Persist {
    /// Class of this component in the host's type registry
    fn class(&self) -> ClassId;

    /// Name, unique within the owning actor's component set
    fn name(&self) -> &str;

    fn spatial(&self) -> Option<&dyn Spatial> {
        None
    }

    fn spatial_mut(&mut self) -> Option<&mut dyn Spatial> {
        None
    }

    fn physics(&self) -> Option<&dyn PhysicsBody> {
        None
    }

    fn physics_mut(&mut self) -> Option<&mut dyn PhysicsBody> {
        None
    }

    fn movement(&self) -> Option<&dyn Movement> {
        None
    }

    fn movement_mut(&mut self) -> Option<&mut dyn Movement> {
        None
    }
}

/// A live actor: identity, transform and attached components
pub trait Actor: Persist {
    /// Class of this actor in the host's type registry
    fn class(&self) -> ClassId;

    /// Unique name, preserved across save and load
    fn name(&self) -> &str;

    /// World transform
    fn transform(&self) -> Transform;

    /// Path of the container the actor currently resides in
    fn container_path(&self) -> &str;

    /// Remaining lifespan in seconds; `None` means no expiry
    fn lifespan(&self) -> Option<f32>;

    fn set_lifespan(&mut self, lifespan: Option<f32>);

    /// Attached components in the host's native order
    fn components(&self) -> Vec<&dyn Component>;

    fn components_mut(&mut self) -> Vec<&mut dyn Component>;
}

/// The player's controlling agent
pub trait Controller {
    /// Current control orientation
    fn orientation(&self) -> Rotator;

    fn set_orientation(&mut self, orientation: Rotator);

    /// Take control of an actor
    fn possess(&mut self, actor: ActorId);

    /// Push the new orientation through the host's rotation pipeline
    ///
    /// `delta_hint` only needs to be positive; no frame time is measured.
    fn rotation_updated(&mut self, delta_hint: f32);
}

/// The hosting world: actor lifetime, containers and the controller
pub trait World {
    /// Instantiate an actor of `class` at `transform`
    ///
    /// Fails with [`SpawnFailed`](crate::error::SnapshotError::SpawnFailed)
    /// if the class cannot be instantiated.
    fn spawn(&mut self, class: ClassId, transform: Transform, options: SpawnOptions)
        -> Result<ActorId>;

    /// Run the deferred activation logic of an actor spawned with
    /// `defer_activation`
    fn finish_spawning(&mut self, actor: ActorId, transform: Transform);

    fn actor(&self, actor: ActorId) -> Option<&dyn Actor>;

    fn actor_mut(&mut self, actor: ActorId) -> Option<&mut dyn Actor>;

    /// Destroy every live actor the host tracks for snapshotting
    fn destroy_tracked(&mut self);

    /// Currently loaded containers as `(path, handle)` pairs
    fn containers(&self) -> Vec<(String, ContainerId)>;

    fn controller(&self) -> &dyn Controller;

    fn controller_mut(&mut self) -> &mut dyn Controller;
}
