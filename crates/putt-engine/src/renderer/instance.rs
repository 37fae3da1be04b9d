use bytemuck::{Pod, Zeroable};

use crate::components::shape::ShapeKind;

/// Per-instance render data read by the browser renderer.
/// Wire format: 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct RenderInstance {
    /// Center X in world space.
    pub x: f32,
    /// Center Y in world space.
    pub y: f32,
    /// World-space width.
    pub width: f32,
    /// World-space height.
    pub height: f32,
    /// Rotation in radians.
    pub rotation: f32,
    /// `ShapeKind` as a float.
    pub shape: f32,
    /// Packed 0xRRGGBB color as a float (exact up to 2^24).
    pub color: f32,
    /// Opacity (0.0 = invisible, 1.0 = opaque).
    pub alpha: f32,
}

impl RenderInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    /// Overlay marker centered at (x, y).
    pub fn dot(x: f32, y: f32, radius: f32, color: u32) -> Self {
        Self {
            x,
            y,
            width: radius * 2.0,
            height: radius * 2.0,
            rotation: 0.0,
            shape: ShapeKind::Dot.as_f32(),
            color: color as f32,
            alpha: 1.0,
        }
    }
}

/// Render buffer: scene instances first, then overlay instances pushed
/// by the game's render pass.
pub struct RenderBuffer {
    pub instances: Vec<RenderInstance>,
    capacity: usize,
}

impl RenderBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    /// Append an instance. Returns `false` once the buffer is full;
    /// the renderer only ever reads `capacity` instances.
    pub fn push(&mut self, instance: RenderInstance) -> bool {
        if self.instances.len() >= self.capacity {
            return false;
        }
        self.instances.push(instance);
        true
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Raw pointer to instance data for direct memory reads from JS.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::with_capacity(512)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_instance_is_8_floats() {
        assert_eq!(std::mem::size_of::<RenderInstance>(), RenderInstance::STRIDE_BYTES);
        assert_eq!(RenderInstance::FLOATS, 8);
    }

    #[test]
    fn push_stops_at_capacity() {
        let mut buf = RenderBuffer::with_capacity(2);
        assert!(buf.push(RenderInstance::default()));
        assert!(buf.push(RenderInstance::default()));
        assert!(!buf.push(RenderInstance::default()));
        assert_eq!(buf.instance_count(), 2);
    }

    #[test]
    fn dot_color_survives_float_packing() {
        let dot = RenderInstance::dot(1.0, 2.0, 2.0, 0xff4500);
        assert_eq!(dot.color as u32, 0xff4500);
        assert_eq!(dot.width, 4.0);
        assert_eq!(dot.shape, 2.0);
    }
}
