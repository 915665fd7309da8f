use crate::api::types::RenderOptions;
use crate::components::entity::Entity;
use crate::components::kind::EntityKind;
use crate::renderer::camera::Camera;
use crate::renderer::instance::{DrawCommand, DrawList, FLAG_COLLIDER, FLAG_INTERACT, FLAG_PLAYER};

/// Fill `list` from entities already in draw order.
///
/// Entities outside the camera are skipped; the rest keep their order and are
/// written in screen space. Debug outline flags are only set when
/// `options.debug` is on.
pub fn build_draw_list<'a>(
    order: impl IntoIterator<Item = &'a Entity>,
    camera: &Camera,
    options: RenderOptions,
    list: &mut DrawList,
) {
    list.clear();

    for entity in order {
        if !camera.is_visible(&entity.bounds) {
            continue;
        }

        let screen = camera.world_to_screen(entity.pos());
        let mut flags = 0;
        if matches!(entity.kind, EntityKind::Player) {
            flags |= FLAG_PLAYER;
        }
        if options.debug {
            if entity.collidable {
                flags |= FLAG_COLLIDER;
            }
            if entity.interactable {
                flags |= FLAG_INTERACT;
            }
        }

        list.push(DrawCommand {
            x: screen.x,
            y: screen.y,
            width: entity.bounds.width,
            height: entity.bounds.height,
            z_index: entity.z_index,
            id: entity.id.0,
            kind: entity.kind.code(),
            frame: entity.kind.frame(),
            flags,
        });
    }

    log::debug!("draw list: {} commands", list.len());
}
