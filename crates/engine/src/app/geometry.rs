#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Vec2) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.w / 2.0
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x <= self.right()
            && point.y >= self.y
            && point.y <= self.bottom()
    }

    pub fn clamp_with_margin(&self, point: Vec2, margin: f32) -> Vec2 {
        Vec2 {
            x: point
                .x
                .min(self.right() - margin)
                .max(self.x + margin),
            y: point
                .y
                .min(self.bottom() - margin)
                .max(self.y + margin),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_inclusive_on_all_edges() {
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(rect.contains(Vec2::new(0.0, 0.0)));
        assert!(rect.contains(Vec2::new(100.0, 100.0)));
        assert!(rect.contains(Vec2::new(50.0, 50.0)));
        assert!(!rect.contains(Vec2::new(100.5, 50.0)));
        assert!(!rect.contains(Vec2::new(50.0, -0.5)));
    }

    #[test]
    fn clamp_with_margin_keeps_points_off_the_edges() {
        let bounds = Rect::new(0.0, 0.0, 2000.0, 1000.0);
        let clamped = bounds.clamp_with_margin(Vec2::new(-40.0, 1200.0), 30.0);
        assert_eq!(clamped, Vec2::new(30.0, 970.0));

        let inside = bounds.clamp_with_margin(Vec2::new(400.0, 500.0), 30.0);
        assert_eq!(inside, Vec2::new(400.0, 500.0));
    }

    #[test]
    fn distance_is_euclidean() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(3.0, 4.0);
        assert!((a.distance(b) - 5.0).abs() < 0.0001);
    }
}
