/// Named z-index bands for the top-down world.
///
/// Layers are drawn back-to-front: Ground first, UI last. Entities may use any
/// z-index; these are the values the map editor assigns by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum DrawLayer {
    Ground,
    GroundDecoration,
    Water,
    /// Low objects the player walks in front of (rocks).
    ObjectsBack,
    #[default]
    Player,
    /// Mid-height objects (trees).
    ObjectsMid,
    /// Tall objects (houses).
    ObjectsFront,
    Effects,
    UI,
}

impl DrawLayer {
    /// Total number of named layers.
    pub const COUNT: usize = 9;

    pub const ALL: [DrawLayer; Self::COUNT] = [
        DrawLayer::Ground,
        DrawLayer::GroundDecoration,
        DrawLayer::Water,
        DrawLayer::ObjectsBack,
        DrawLayer::Player,
        DrawLayer::ObjectsMid,
        DrawLayer::ObjectsFront,
        DrawLayer::Effects,
        DrawLayer::UI,
    ];

    /// The z-index of this band.
    pub fn z(self) -> i32 {
        match self {
            DrawLayer::Ground => -100,
            DrawLayer::GroundDecoration => 0,
            DrawLayer::Water => 30,
            DrawLayer::ObjectsBack => 40,
            DrawLayer::Player => 50,
            DrawLayer::ObjectsMid => 55,
            DrawLayer::ObjectsFront => 60,
            DrawLayer::Effects => 100,
            DrawLayer::UI => 1000,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DrawLayer::Ground => "GROUND",
            DrawLayer::GroundDecoration => "GROUND_DECORATION",
            DrawLayer::Water => "WATER",
            DrawLayer::ObjectsBack => "OBJECTS_BACK",
            DrawLayer::Player => "PLAYER",
            DrawLayer::ObjectsMid => "OBJECTS_MID",
            DrawLayer::ObjectsFront => "OBJECTS_FRONT",
            DrawLayer::Effects => "EFFECTS",
            DrawLayer::UI => "UI",
        }
    }

    /// Exact match for a z-index, if it is one of the named bands.
    pub fn from_z(z: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|layer| layer.z() == z)
    }

    /// The band closest to `z`. Ties resolve to the lower band.
    pub fn nearest(z: i32) -> Self {
        let mut best = DrawLayer::Ground;
        let mut best_diff = i64::MAX;
        for layer in Self::ALL {
            let diff = (layer.z() as i64 - z as i64).abs();
            if diff < best_diff {
                best = layer;
                best_diff = diff;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_player() {
        assert_eq!(DrawLayer::default(), DrawLayer::Player);
        assert_eq!(DrawLayer::default().z(), 50);
    }

    #[test]
    fn bands_are_back_to_front() {
        for pair in DrawLayer::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
            assert!(pair[0].z() < pair[1].z());
        }
    }

    #[test]
    fn from_z_matches_named_bands_only() {
        assert_eq!(DrawLayer::from_z(55), Some(DrawLayer::ObjectsMid));
        assert_eq!(DrawLayer::from_z(56), None);
    }

    #[test]
    fn nearest_band() {
        assert_eq!(DrawLayer::nearest(57), DrawLayer::ObjectsMid);
        assert_eq!(DrawLayer::nearest(-500), DrawLayer::Ground);
        assert_eq!(DrawLayer::nearest(700), DrawLayer::UI);
        // 45 is equidistant from 40 and 50
        assert_eq!(DrawLayer::nearest(45), DrawLayer::ObjectsBack);
    }
}
