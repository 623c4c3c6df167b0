use crate::app::{Camera2D, Vec2};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn size_f32(self) -> (f32, f32) {
        (self.width as f32, self.height as f32)
    }
}

pub fn screen_to_world(screen: Vec2, camera: &Camera2D) -> Vec2 {
    Vec2 {
        x: screen.x + camera.position.x,
        y: screen.y + camera.position.y,
    }
}

pub fn world_to_screen(world: Vec2, camera: &Camera2D) -> Vec2 {
    Vec2 {
        x: world.x - camera.position.x,
        y: world.y - camera.position.y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_camera_is_identity() {
        let camera = Camera2D::default();
        let point = Vec2::new(123.0, 45.0);
        assert_eq!(screen_to_world(point, &camera), point);
        assert_eq!(world_to_screen(point, &camera), point);
    }

    #[test]
    fn camera_offset_shifts_screen_position() {
        let camera = Camera2D {
            position: Vec2::new(300.0, 120.0),
        };
        assert_eq!(
            screen_to_world(Vec2::new(200.0, 80.0), &camera),
            Vec2::new(500.0, 200.0)
        );
        assert_eq!(
            world_to_screen(Vec2::new(500.0, 200.0), &camera),
            Vec2::new(200.0, 80.0)
        );
    }
}
