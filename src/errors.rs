//! Error Types
//!
//! Failure modes for the scene core. Structural editor operations
//! (re-parenting into a cycle, touching a stale handle, removing a node
//! twice) are deliberately *not* errors — they are logged no-ops, because a
//! failed UI action must never take the session down. [`VireoError`] exists
//! for the seams where a collaborator needs a real failure: snapshot
//! reconstruction and asset resolution.

use thiserror::Error;

/// The main error type for the Vireo scene core.
#[derive(Error, Debug)]
pub enum VireoError {
    // ========================================================================
    // Asset Resolution Errors
    // ========================================================================
    /// A snapshot or scene operation referenced an asset that is not
    /// registered in the [`AssetServer`](crate::assets::AssetServer).
    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    // ========================================================================
    // Snapshot Errors
    // ========================================================================
    /// A node record referenced a parent index that does not exist.
    #[error("Snapshot parent index out of bounds: {index} (record {record})")]
    SnapshotParentOutOfBounds {
        /// The offending parent index
        index: usize,
        /// The record holding the reference
        record: usize,
    },

    /// The snapshot does not contain a root record.
    #[error("Snapshot has no root node record")]
    SnapshotMissingRoot,
}

/// Alias for `Result<T, VireoError>`.
pub type Result<T> = std::result::Result<T, VireoError>;
