//! Domain layer: entities and ports shared across the crate.

/// Domain entities.
pub mod entities;
/// Port definitions for external collaborators.
pub mod ports;
