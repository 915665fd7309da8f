//! Per-variant entity state.
//!
//! Entities are one struct with a tagged `EntityKind`; behaviour that differs
//! per variant is dispatched with a `match` instead of a class hierarchy.

/// Interaction distance for trees and gates, in world units.
pub const LARGE_INTERACTION_RANGE: f32 = 150.0;

/// What an entity is, with any state specific to that variant.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EntityKind {
    /// Static scenery: houses, rocks, decorations.
    #[default]
    Prop,
    /// Non-player character with an idle animation.
    Npc(NpcState),
    /// A tree the player can chop down.
    Tree(TreeState),
    /// The portal gate.
    Gate(GateState),
    /// The player character.
    Player,
}

impl EntityKind {
    /// Numeric code written into draw commands for the JS renderer.
    pub fn code(&self) -> u32 {
        match self {
            EntityKind::Prop => 0,
            EntityKind::Npc(_) => 1,
            EntityKind::Tree(_) => 2,
            EntityKind::Gate(_) => 3,
            EntityKind::Player => 4,
        }
    }

    /// Sprite frame the renderer should show.
    pub fn frame(&self) -> u32 {
        match self {
            EntityKind::Npc(npc) => npc.current_frame,
            EntityKind::Tree(tree) if tree.chopped => 1,
            EntityKind::Gate(gate) => gate.current_frame,
            _ => 0,
        }
    }
}

/// Idle animation state for an NPC. Times are in milliseconds.
#[derive(Debug, Clone, PartialEq)]
pub struct NpcState {
    pub frame_count: u32,
    pub frame_time: f32,
    pub current_frame: u32,
    timer: f32,
}

impl NpcState {
    pub fn new(frame_count: u32, frame_time: f32) -> Self {
        Self {
            frame_count: frame_count.max(1),
            frame_time,
            current_frame: 0,
            timer: 0.0,
        }
    }

    /// Advance the idle loop by `dt_ms`.
    pub fn update(&mut self, dt_ms: f32) {
        step_frame(
            &mut self.timer,
            &mut self.current_frame,
            self.frame_count,
            self.frame_time,
            dt_ms,
        );
    }
}

// Advances at most one frame per call and restarts the timer, so a long
// stall (or an infinite delta) costs one step.
fn step_frame(timer: &mut f32, frame: &mut u32, frame_count: u32, frame_time: f32, dt_ms: f32) {
    if frame_time <= 0.0 || dt_ms.is_nan() {
        return;
    }
    *timer += dt_ms;
    if *timer >= frame_time {
        *frame = (*frame + 1) % frame_count.max(1);
        *timer = 0.0;
    }
}

impl Default for NpcState {
    fn default() -> Self {
        Self::new(8, 100.0)
    }
}

/// Hold-to-chop progress for a tree.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeState {
    pub chopped: bool,
    pub chopping: bool,
    /// Chop progress in [0, 1].
    pub progress: f32,
    /// Milliseconds of continuous chopping needed.
    pub chop_duration: f32,
    /// Sprite shown once the tree is chopped.
    pub stump_path: String,
}

impl TreeState {
    pub fn new(stump_path: impl Into<String>) -> Self {
        Self {
            chopped: false,
            chopping: false,
            progress: 0.0,
            chop_duration: 3000.0,
            stump_path: stump_path.into(),
        }
    }

    pub fn start_chopping(&mut self) {
        if !self.chopped {
            self.chopping = true;
        }
    }

    /// Release the chop button. Unfinished progress takes a small penalty.
    pub fn stop_chopping(&mut self) {
        if self.chopped {
            return;
        }
        self.chopping = false;
        if self.progress < 1.0 {
            self.progress = (self.progress - 0.01).max(0.0);
        }
    }

    /// Advance chopping by `dt_ms`. Returns true on the frame the tree falls.
    pub fn update(&mut self, dt_ms: f32) -> bool {
        if self.chopped || dt_ms.is_nan() {
            return false;
        }
        if self.chopping {
            self.progress += dt_ms / self.chop_duration;
            if self.progress >= 1.0 {
                self.progress = 1.0;
                self.chopped = true;
                self.chopping = false;
                return true;
            }
        } else if self.progress > 0.0 {
            // idle decay
            self.progress = (self.progress - dt_ms / 1000.0).max(0.0);
        }
        false
    }
}

/// Portal gate: a looping six-frame animation and a wood requirement.
#[derive(Debug, Clone, PartialEq)]
pub struct GateState {
    /// Wood needed before the gate lets the player through.
    pub required_wood: u32,
    pub frame_count: u32,
    pub frame_time: f32,
    pub current_frame: u32,
    timer: f32,
}

impl GateState {
    pub fn new(required_wood: u32) -> Self {
        Self {
            required_wood,
            frame_count: 6,
            frame_time: 150.0,
            current_frame: 0,
            timer: 0.0,
        }
    }

    pub fn update(&mut self, dt_ms: f32) {
        step_frame(
            &mut self.timer,
            &mut self.current_frame,
            self.frame_count,
            self.frame_time,
            dt_ms,
        );
    }

    pub fn can_pass(&self, wood: u32) -> bool {
        wood >= self.required_wood
    }
}

impl Default for GateState {
    fn default() -> Self {
        Self::new(0)
    }
}
