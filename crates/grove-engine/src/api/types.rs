use std::fmt;

/// Runtime handle for an entity in the scene.
/// Assigned by the scene; map files identify objects by their string tag instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Per-call render settings, passed explicitly instead of a global debug flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Mark collision boxes and interaction areas in the draw list.
    pub debug: bool,
}

impl RenderOptions {
    pub fn debug() -> Self {
        Self { debug: true }
    }
}
