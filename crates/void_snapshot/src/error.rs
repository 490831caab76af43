//! Error types for the snapshot engine

use crate::host::ActorId;
use thiserror::Error;

/// Snapshot engine errors
///
/// Only fatal conditions surface here. Recoverable conditions (a missing
/// container, an unmatched component record, a field the target no longer
/// declares) are logged and skipped per the restore contract.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// An actor handle passed to capture does not resolve to a live actor
    #[error("invalid actor handle: {0:?}")]
    InvalidActor(ActorId),

    /// The host factory could not instantiate a recorded class
    #[error("failed to spawn actor '{name}': {reason}")]
    SpawnFailed { name: String, reason: String },

    /// Phase 2 was driven for a record that has not completed Phase 1
    #[error("actor record '{0}' is not awaiting finish")]
    NotAwaitingFinish(String),

    /// Malformed opaque field data
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// Snapshot container serialization error
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Snapshot container deserialization error
    #[error("deserialization error: {0}")]
    Deserialization(String),
}

/// Result type for snapshot operations
pub type Result<T> = std::result::Result<T, SnapshotError>;

/// Errors produced by the tagged field codec
///
/// Unknown field names and unknown tags are not errors; they are skipped via
/// the per-field length prefix. Only a stream too short or too corrupt to
/// keep its framing fails.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Field stream ended in the middle of a field
    #[error("unexpected end of field stream")]
    UnexpectedEof,

    /// Field name bytes are not valid UTF-8
    #[error("field name is not valid UTF-8")]
    InvalidName,

    /// Payload does not match its tag
    #[error("malformed payload for field '{0}'")]
    MalformedPayload(String),
}
