use crate::components::entity::Entity;
use crate::renderer::instance::{RenderBuffer, RenderInstance};

/// Build the render buffer from a set of entities.
/// Entities without a shape, and inactive ones, are skipped.
pub fn build_render_buffer<'a>(entities: impl Iterator<Item = &'a Entity>, buffer: &mut RenderBuffer) {
    buffer.clear();

    for entity in entities {
        if !entity.active {
            continue;
        }
        let Some(shape) = &entity.shape else {
            continue;
        };

        let pushed = buffer.push(RenderInstance {
            x: entity.pos.x,
            y: entity.pos.y,
            width: entity.size.x,
            height: entity.size.y,
            rotation: entity.rotation,
            shape: shape.kind.as_f32(),
            color: shape.color as f32,
            alpha: shape.alpha,
        });
        if !pushed {
            log::warn!("render buffer full; dropping remaining entities");
            break;
        }
    }
}
