//! Persistence adapters. Implement ArtifactPort on the local filesystem.

pub mod artifact_store;

pub use artifact_store::FsArtifactStore;
