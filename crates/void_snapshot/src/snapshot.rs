//! Snapshot container: one player record plus every tracked world actor

use crate::capture::capture_actor;
use crate::error::{Result, SnapshotError};
use crate::host::{ActorId, World};
use crate::record::ActorRecord;
use crate::restore::{finish_actor, spawn_actor};
use crate::transform::Rotator;
use serde::{Deserialize, Serialize};

/// Delta passed to the controller's rotation update after possession. The
/// host only requires a positive value; no frame time is measured here.
const ROTATION_DELTA_HINT: f32 = 1.0 / 60.0;

/// A full scene snapshot
///
/// Exactly one record for the player actor, an ordered list of records for
/// all other tracked actors, and the orientation of the player's controller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Orientation of the player's controller at capture time
    pub controller_rotation: Rotator,
    /// Record of the player actor; spawned first, finished last
    pub player: ActorRecord,
    /// Records of all other tracked actors, in capture order
    pub actors: Vec<ActorRecord>,
}

impl Snapshot {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture `player` and `others` into this snapshot
    ///
    /// Prior content is discarded, never merged. Fails with
    /// [`SnapshotError::InvalidActor`] if a handle does not resolve; an
    /// invalid player handle aborts the whole save.
    pub fn capture(&mut self, world: &dyn World, player: ActorId, others: &[ActorId]) -> Result<()> {
        self.actors.clear();

        let player_actor = world
            .actor(player)
            .ok_or(SnapshotError::InvalidActor(player))?;
        self.player = capture_actor(player_actor);
        self.controller_rotation = world.controller().orientation();

        for &id in others {
            let actor = world.actor(id).ok_or(SnapshotError::InvalidActor(id))?;
            self.actors.push(capture_actor(actor));
        }

        Ok(())
    }

    /// Restore the whole snapshot into `world`
    ///
    /// Ordering: tracked actors are destroyed, the player record runs
    /// Phase 1, every secondary record runs Phase 1 and Phase 2 inline, the
    /// player record runs Phase 2 last, and the controller is rebound to the
    /// new player actor.
    ///
    /// Not transactional: if a spawn fails the load aborts and actors spawned
    /// so far stay live. The host can destroy its tracked actors and retry.
    pub fn restore(&mut self, world: &mut dyn World) -> Result<()> {
        // The old scene must be gone before saved identities are re-used.
        world.destroy_tracked();

        spawn_actor(world, &mut self.player)?;

        // Secondary actors are fully finished one at a time; only the
        // player's Phase 2 waits until every actor exists.
        for record in &mut self.actors {
            spawn_actor(world, record)?;
            finish_actor(world, record)?;
        }

        finish_actor(world, &mut self.player)?;

        let player = self
            .player
            .spawned
            .ok_or_else(|| SnapshotError::NotAwaitingFinish(self.player.name.clone()))?;
        let controller = world.controller_mut();
        controller.possess(player);
        controller.set_orientation(self.controller_rotation);
        controller.rotation_updated(ROTATION_DELTA_HINT);

        Ok(())
    }

    /// Encode to the persisted byte layout
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(|e| SnapshotError::Serialization(e.to_string()))
    }

    /// Decode from the persisted byte layout
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        bincode::deserialize(bytes).map_err(|e| SnapshotError::Deserialization(e.to_string()))
    }
}
