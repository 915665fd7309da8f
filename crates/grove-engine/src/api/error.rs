use thiserror::Error;

use crate::api::types::EntityId;

/// Failures surfaced by scene storage and map or config loading.
///
/// Geometry and collision queries never fail; malformed rectangles are
/// caller bugs caught by debug assertions.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("entity {0} already exists")]
    DuplicateId(EntityId),
    #[error("an entity tagged `{0}` already exists")]
    DuplicateTag(String),
    #[error("entity {0} not found")]
    NotFound(EntityId),
    #[error("invalid map data: {0}")]
    InvalidMap(#[source] serde_json::Error),
    #[error("invalid engine config: {0}")]
    InvalidConfig(#[source] serde_json::Error),
    #[error("unsupported map version `{0}`")]
    UnsupportedVersion(String),
}
