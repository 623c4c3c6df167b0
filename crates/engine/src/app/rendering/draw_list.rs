use crate::app::{Rect, Vec2};

pub type Rgba = [u8; 4];

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Clear(Rgba),
    FillRect {
        rect: Rect,
        color: Rgba,
    },
    StrokeRect {
        rect: Rect,
        thickness: f32,
        color: Rgba,
    },
    FillEllipse {
        center: Vec2,
        radii: Vec2,
        color: Rgba,
    },
    Cross {
        center: Vec2,
        half_size: f32,
        color: Rgba,
    },
}

#[derive(Debug, Clone, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn clear(&mut self, color: Rgba) {
        self.commands.push(DrawCommand::Clear(color));
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    pub fn stroke_rect(&mut self, rect: Rect, thickness: f32, color: Rgba) {
        self.commands.push(DrawCommand::StrokeRect {
            rect,
            thickness,
            color,
        });
    }

    pub fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, color: Rgba) {
        self.commands.push(DrawCommand::FillEllipse {
            center,
            radii,
            color,
        });
    }

    pub fn cross(&mut self, center: Vec2, half_size: f32, color: Rgba) {
        self.commands.push(DrawCommand::Cross {
            center,
            half_size,
            color,
        });
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn reset(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
