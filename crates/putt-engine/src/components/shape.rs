/// Primitive drawn by the browser renderer for an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum ShapeKind {
    /// Axis-aligned (or rotated) rectangle sized by the entity's `size`.
    #[default]
    Rect = 0,
    /// Circle whose diameter is `size.x`.
    Circle = 1,
    /// Small overlay marker (aim preview dots).
    Dot = 2,
}

impl ShapeKind {
    pub fn as_f32(self) -> f32 {
        self as u8 as f32
    }
}

/// Shape component: how an entity appears to the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeComponent {
    pub kind: ShapeKind,
    /// Packed 0xRRGGBB color.
    pub color: u32,
    /// Opacity (0.0 = invisible, 1.0 = opaque).
    pub alpha: f32,
}

impl ShapeComponent {
    pub fn rect(color: u32) -> Self {
        Self { kind: ShapeKind::Rect, color, alpha: 1.0 }
    }

    pub fn circle(color: u32) -> Self {
        Self { kind: ShapeKind::Circle, color, alpha: 1.0 }
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_map_to_wire_values() {
        assert_eq!(ShapeKind::Rect.as_f32(), 0.0);
        assert_eq!(ShapeKind::Circle.as_f32(), 1.0);
        assert_eq!(ShapeKind::Dot.as_f32(), 2.0);
    }

    #[test]
    fn builders_default_to_opaque() {
        let s = ShapeComponent::circle(0xff4500);
        assert_eq!(s.kind, ShapeKind::Circle);
        assert_eq!(s.alpha, 1.0);
        assert_eq!(s.with_alpha(0.3).alpha, 0.3);
    }
}
