use egui::{Painter, Pos2, Rect, Stroke, Vec2, vec2};

use crate::diagram::Diagram;

use super::render::CanvasColors;
use super::viewport::Viewport;

const MINIMAP_SIZE: Vec2 = vec2(200.0, 150.0);
const MINIMAP_MARGIN: f32 = 10.0;

/// Screen rect of the minimap inside `canvas`.
pub fn minimap_rect(canvas: Rect) -> Rect {
    Rect::from_min_size(
        canvas.max - MINIMAP_SIZE - Vec2::splat(MINIMAP_MARGIN),
        MINIMAP_SIZE,
    )
}

/// Maps world coordinates into a minimap of size `target`, fitting `world`.
#[derive(Debug, Clone, Copy)]
struct MinimapTransform {
    world: Rect,
    target: Rect,
    scale: f32,
}

impl MinimapTransform {
    fn new(world: Rect, target: Rect) -> Self {
        let size = world.size().max(Vec2::splat(1.0));
        let scale = (target.width() / size.x).min(target.height() / size.y);
        Self {
            world,
            target,
            scale,
        }
    }

    fn map(&self, p: Pos2) -> Pos2 {
        let used = self.world.size() * self.scale;
        let inset = (self.target.size() - used) * 0.5;
        self.target.min + inset + (p - self.world.min) * self.scale
    }

    fn map_rect(&self, r: Rect) -> Rect {
        Rect::from_min_max(self.map(r.min), self.map(r.max))
    }
}

/// Overview of every node plus the visible region.
pub fn paint_minimap(painter: &Painter, diagram: &Diagram, viewport: &Viewport, canvas: Rect, colors: &CanvasColors) {
    let area = minimap_rect(canvas);
    painter.rect_filled(area, 4.0, colors.minimap_background);

    let visible = Rect::from_min_max(
        viewport.to_world(canvas, canvas.min),
        viewport.to_world(canvas, canvas.max),
    );
    let world = diagram
        .bounds()
        .map_or(visible, |bounds| bounds.union(visible));
    let transform = MinimapTransform::new(world.expand(20.0), area.shrink(4.0));

    let clipped = painter.with_clip_rect(area);
    for node in diagram.nodes() {
        clipped.rect_filled(transform.map_rect(node.rect()), 2.0, node.style.color.fill());
    }
    clipped.rect_stroke(
        transform.map_rect(visible),
        0.0,
        Stroke::new(1.0, colors.minimap_viewport),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_transform_fits_world_inside_target() {
        let world = Rect::from_min_max(pos2(-100.0, 0.0), pos2(300.0, 100.0));
        let target = Rect::from_min_size(pos2(500.0, 400.0), vec2(200.0, 150.0));
        let t = MinimapTransform::new(world, target);

        let mapped = t.map_rect(world);
        assert!(target.expand(0.01).contains_rect(mapped));
        assert!((mapped.width() - 200.0).abs() < 0.01);
        assert!((mapped.center().y - target.center().y).abs() < 0.01);
    }

    #[test]
    fn test_minimap_sits_in_bottom_right() {
        let canvas = Rect::from_min_size(pos2(0.0, 0.0), vec2(800.0, 600.0));
        let rect = minimap_rect(canvas);
        assert_eq!(rect.max, pos2(790.0, 590.0));
    }
}
