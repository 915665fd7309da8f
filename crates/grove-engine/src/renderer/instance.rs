use bytemuck::{Pod, Zeroable};

/// Bit set on `DrawCommand::flags` when the debug overlay should outline the
/// entity as a collider.
pub const FLAG_COLLIDER: u32 = 1;
/// Bit set when the debug overlay should mark the entity as interactable.
pub const FLAG_INTERACT: u32 = 2;
/// Bit set on the player's command.
pub const FLAG_PLAYER: u32 = 4;

/// One sprite draw, read by the canvas host in buffer order.
/// Layout is 9 x 4 bytes = 36 bytes stride; the host must match it.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct DrawCommand {
    /// Screen-space top-left X.
    pub x: f32,
    /// Screen-space top-left Y.
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub z_index: i32,
    /// Entity handle, so the host can look up the sprite path.
    pub id: u32,
    /// `EntityKind::code()`.
    pub kind: u32,
    /// Animation frame (NPC frame, or 1 for a tree stump).
    pub frame: u32,
    pub flags: u32,
}

impl DrawCommand {
    pub const WORDS: usize = 9;
    pub const STRIDE_BYTES: usize = Self::WORDS * 4;

    pub fn has_flag(&self, flag: u32) -> bool {
        self.flags & flag != 0
    }
}

/// Draw commands for one frame, back to front.
#[derive(Debug)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(512),
        }
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Raw pointer for the host to read the buffer out of wasm memory.
    /// Valid until the next mutation.
    pub fn commands_ptr(&self) -> *const u32 {
        self.commands.as_ptr() as *const u32
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.commands)
    }
}

impl Default for DrawList {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draw_command_is_9_words() {
        assert_eq!(std::mem::size_of::<DrawCommand>(), 36);
        assert_eq!(DrawCommand::STRIDE_BYTES, 36);
    }

    #[test]
    fn list_bytes_follow_push_order() {
        let mut list = DrawList::new();
        list.push(DrawCommand {
            id: 7,
            ..Default::default()
        });
        list.push(DrawCommand {
            id: 9,
            flags: FLAG_COLLIDER | FLAG_INTERACT,
            ..Default::default()
        });
        assert_eq!(list.len(), 2);

        let bytes = list.as_bytes();
        assert_eq!(bytes.len(), 2 * DrawCommand::STRIDE_BYTES);
        let words: &[u32] = bytemuck::cast_slice(bytes);
        assert_eq!(words[5], 7);
        assert_eq!(words[DrawCommand::WORDS + 5], 9);
        assert!(list.commands()[1].has_flag(FLAG_INTERACT));
        assert!(!list.commands()[1].has_flag(FLAG_PLAYER));

        list.clear();
        assert!(list.is_empty());
    }
}
