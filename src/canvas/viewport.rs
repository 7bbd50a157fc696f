use egui::{Pos2, Rect, Vec2};

pub const MIN_ZOOM: f32 = 0.25;
pub const MAX_ZOOM: f32 = 4.0;
/// Screen-space margin kept around the diagram by fit view.
const FIT_PADDING: f32 = 40.0;

/// Pan and zoom of the canvas. World coordinates are diagram positions;
/// screen coordinates are egui points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Screen offset of the world origin relative to the canvas' top-left.
    pub offset: Vec2,
    pub zoom: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

impl Viewport {
    pub fn to_screen(&self, canvas: Rect, world: Pos2) -> Pos2 {
        canvas.min + self.offset + world.to_vec2() * self.zoom
    }

    pub fn to_world(&self, canvas: Rect, screen: Pos2) -> Pos2 {
        ((screen - canvas.min - self.offset) / self.zoom).to_pos2()
    }

    pub fn rect_to_screen(&self, canvas: Rect, world: Rect) -> Rect {
        Rect::from_min_max(self.to_screen(canvas, world.min), self.to_screen(canvas, world.max))
    }

    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Zooms by `factor`, keeping the world point under `anchor` fixed.
    pub fn zoom_around(&mut self, canvas: Rect, anchor: Pos2, factor: f32) {
        let world = self.to_world(canvas, anchor);
        self.zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        self.offset = anchor - canvas.min - world.to_vec2() * self.zoom;
    }

    /// Centers `bounds` in the canvas at the largest zoom that fits, never
    /// above 1.
    pub fn fit(&mut self, canvas: Rect, bounds: Rect) {
        let avail = (canvas.size() - Vec2::splat(2.0 * FIT_PADDING)).max(Vec2::splat(1.0));
        let size = bounds.size().max(Vec2::splat(1.0));
        self.zoom = (avail.x / size.x)
            .min(avail.y / size.y)
            .clamp(MIN_ZOOM, 1.0);
        self.offset = canvas.size() * 0.5 - bounds.center().to_vec2() * self.zoom;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    fn canvas() -> Rect {
        Rect::from_min_size(pos2(0.0, 40.0), vec2(800.0, 600.0))
    }

    #[test]
    fn test_screen_world_inverse() {
        let vp = Viewport {
            offset: vec2(12.0, -30.0),
            zoom: 1.5,
        };
        let world = pos2(100.0, 250.0);
        let back = vp.to_world(canvas(), vp.to_screen(canvas(), world));
        assert!(back.distance(world) < 0.001);
    }

    #[test]
    fn test_zoom_keeps_anchor_fixed() {
        let mut vp = Viewport::default();
        let anchor = pos2(300.0, 200.0);
        let before = vp.to_world(canvas(), anchor);
        vp.zoom_around(canvas(), anchor, 2.0);
        assert_eq!(vp.zoom, 2.0);
        assert!(vp.to_world(canvas(), anchor).distance(before) < 0.001);

        vp.zoom_around(canvas(), anchor, 100.0);
        assert_eq!(vp.zoom, MAX_ZOOM);
    }

    #[test]
    fn test_fit_centers_bounds() {
        let mut vp = Viewport::default();
        let bounds = Rect::from_min_max(pos2(100.0, 100.0), pos2(450.0, 140.0));
        vp.fit(canvas(), bounds);
        assert!(vp.zoom <= 1.0);
        let center = vp.to_screen(canvas(), bounds.center());
        assert!(center.distance(canvas().center()) < 0.001);
    }
}
