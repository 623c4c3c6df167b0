use super::{Vec2, Viewport};

pub const CAMERA_SMOOTH_FACTOR_DEFAULT: f32 = 0.1;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Camera2D {
    pub position: Vec2,
}

impl Camera2D {
    pub fn reset(&mut self) {
        self.position = Vec2::ZERO;
    }

    pub fn follow(&mut self, focus: Vec2, viewport: Viewport, world_size: Vec2, smooth_factor: f32) {
        let (view_w, view_h) = viewport.size_f32();
        let target_x = focus.x - view_w / 2.0;
        let target_y = focus.y - view_h / 2.0;

        let next_x = self.position.x + (target_x - self.position.x) * smooth_factor;
        let next_y = self.position.y + (target_y - self.position.y) * smooth_factor;

        self.position = Vec2 {
            x: clamp_camera_axis(next_x, world_size.x, view_w),
            y: clamp_camera_axis(next_y, world_size.y, view_h),
        };
    }
}

/// Clamps one axis of the camera offset to `[0, max(0, world_extent - view_extent)]`.
/// A world narrower than the view pins the offset to 0.
pub fn clamp_camera_axis(value: f32, world_extent: f32, view_extent: f32) -> f32 {
    let upper = (world_extent - view_extent).max(0.0);
    if !value.is_finite() {
        return 0.0;
    }
    value.clamp(0.0, upper)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORLD: Vec2 = Vec2 {
        x: 2000.0,
        y: 1000.0,
    };

    fn viewport(width: u32, height: u32) -> Viewport {
        Viewport { width, height }
    }

    #[test]
    fn follow_moves_one_tenth_of_the_way_to_the_centered_offset() {
        let mut camera = Camera2D::default();
        camera.follow(
            Vec2::new(1000.0, 700.0),
            viewport(800, 600),
            WORLD,
            CAMERA_SMOOTH_FACTOR_DEFAULT,
        );

        // target = (600, 400), ten percent of the way from (0, 0)
        assert!((camera.position.x - 60.0).abs() < 0.0001);
        assert!((camera.position.y - 40.0).abs() < 0.0001);
    }

    #[test]
    fn follow_converges_on_the_centered_offset() {
        let mut camera = Camera2D::default();
        for _ in 0..400 {
            camera.follow(
                Vec2::new(1000.0, 500.0),
                viewport(800, 600),
                WORLD,
                CAMERA_SMOOTH_FACTOR_DEFAULT,
            );
        }
        assert!((camera.position.x - 600.0).abs() < 0.01);
        assert!((camera.position.y - 200.0).abs() < 0.01);
    }

    #[test]
    fn follow_never_leaves_world_bounds() {
        let players = [
            Vec2::new(-500.0, -500.0),
            Vec2::new(0.0, 0.0),
            Vec2::new(1999.0, 999.0),
            Vec2::new(5000.0, 5000.0),
            Vec2::new(1000.0, 500.0),
        ];
        for player in players {
            let mut camera = Camera2D {
                position: Vec2::new(900.0, 300.0),
            };
            camera.follow(player, viewport(800, 600), WORLD, 1.0);
            assert!(camera.position.x >= 0.0 && camera.position.x <= 1200.0);
            assert!(camera.position.y >= 0.0 && camera.position.y <= 400.0);
        }
    }

    #[test]
    fn world_smaller_than_viewport_pins_offset_to_zero() {
        let mut camera = Camera2D {
            position: Vec2::new(50.0, 50.0),
        };
        camera.follow(Vec2::new(1000.0, 500.0), viewport(2560, 1440), WORLD, 1.0);
        assert_eq!(camera.position, Vec2::ZERO);
    }

    #[test]
    fn clamp_axis_handles_inverted_range() {
        assert_eq!(clamp_camera_axis(-20.0, 1000.0, 1440.0), 0.0);
        assert_eq!(clamp_camera_axis(300.0, 1000.0, 1440.0), 0.0);
        assert_eq!(clamp_camera_axis(300.0, 1000.0, 600.0), 300.0);
        assert_eq!(clamp_camera_axis(900.0, 1000.0, 600.0), 400.0);
        assert_eq!(clamp_camera_axis(f32::NAN, 1000.0, 600.0), 0.0);
    }

    #[test]
    fn reset_zeroes_the_offset() {
        let mut camera = Camera2D {
            position: Vec2::new(12.0, 34.0),
        };
        camera.reset();
        assert_eq!(camera.position, Vec2::ZERO);
    }
}
