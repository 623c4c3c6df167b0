use std::sync::Arc;

use pixels::{Error, Pixels, SurfaceTexture};
use winit::window::Window;

use super::{DrawCommand, DrawList, Rgba, Viewport};
use crate::app::{Rect, Vec2};

pub struct Renderer {
    pixels: Pixels<'static>,
    viewport: Viewport,
}

impl Renderer {
    pub fn new(window: Arc<Window>, viewport: Viewport) -> Result<Self, Error> {
        let size = window.inner_size();
        let surface = SurfaceTexture::new(size.width.max(1), size.height.max(1), window);
        let pixels = Pixels::new(viewport.width.max(1), viewport.height.max(1), surface)?;
        Ok(Self { pixels, viewport })
    }

    pub fn resize_surface(&mut self, width: u32, height: u32) -> Result<(), Error> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.pixels.resize_surface(width, height)?;
        Ok(())
    }

    pub fn window_to_viewport(&self, physical_x: f32, physical_y: f32) -> Vec2 {
        match self.pixels.window_pos_to_pixel((physical_x, physical_y)) {
            Ok((x, y)) => Vec2::new(x as f32, y as f32),
            Err((x, y)) => Vec2::new(x as f32, y as f32),
        }
    }

    pub(crate) fn render(&mut self, draw_list: &DrawList) -> Result<(), Error> {
        if self.viewport.width == 0 || self.viewport.height == 0 {
            return Ok(());
        }
        let frame = self.pixels.frame_mut();
        rasterize(frame, self.viewport.width, self.viewport.height, draw_list);
        self.pixels.render()
    }
}

pub(crate) fn rasterize(frame: &mut [u8], width: u32, height: u32, draw_list: &DrawList) {
    for command in draw_list.commands() {
        match *command {
            DrawCommand::Clear(color) => {
                for chunk in frame.chunks_exact_mut(4) {
                    chunk.copy_from_slice(&color);
                }
            }
            DrawCommand::FillRect { rect, color } => {
                fill_rect(frame, width, height, rect, color);
            }
            DrawCommand::StrokeRect {
                rect,
                thickness,
                color,
            } => stroke_rect(frame, width, height, rect, thickness, color),
            DrawCommand::FillEllipse {
                center,
                radii,
                color,
            } => fill_ellipse(frame, width, height, center, radii, color),
            DrawCommand::Cross {
                center,
                half_size,
                color,
            } => draw_cross(frame, width, center, half_size, color),
        }
    }
}

fn pixel_span(start: f32, end: f32, limit: u32) -> Option<(i32, i32)> {
    if !start.is_finite() || !end.is_finite() {
        return None;
    }
    let first = start.round().max(0.0) as i32;
    let last = (end.round() as i32).min(limit as i32);
    (first < last).then_some((first, last))
}

fn fill_rect(frame: &mut [u8], width: u32, height: u32, rect: Rect, color: Rgba) {
    let Some((x0, x1)) = pixel_span(rect.x, rect.right(), width) else {
        return;
    };
    let Some((y0, y1)) = pixel_span(rect.y, rect.bottom(), height) else {
        return;
    };
    for y in y0..y1 {
        for x in x0..x1 {
            blend_pixel_clipped(frame, width as usize, x, y, color);
        }
    }
}

fn stroke_rect(frame: &mut [u8], width: u32, height: u32, rect: Rect, thickness: f32, color: Rgba) {
    let t = thickness.max(1.0);
    fill_rect(frame, width, height, Rect::new(rect.x, rect.y, rect.w, t), color);
    fill_rect(
        frame,
        width,
        height,
        Rect::new(rect.x, rect.bottom() - t, rect.w, t),
        color,
    );
    fill_rect(frame, width, height, Rect::new(rect.x, rect.y, t, rect.h), color);
    fill_rect(
        frame,
        width,
        height,
        Rect::new(rect.right() - t, rect.y, t, rect.h),
        color,
    );
}

fn fill_ellipse(frame: &mut [u8], width: u32, height: u32, center: Vec2, radii: Vec2, color: Rgba) {
    if radii.x <= 0.0 || radii.y <= 0.0 {
        return;
    }
    let Some((x0, x1)) = pixel_span(center.x - radii.x, center.x + radii.x + 1.0, width) else {
        return;
    };
    let Some((y0, y1)) = pixel_span(center.y - radii.y, center.y + radii.y + 1.0, height) else {
        return;
    };
    let inv_rx_sq = (radii.x * radii.x).recip();
    let inv_ry_sq = (radii.y * radii.y).recip();
    for y in y0..y1 {
        let dy = y as f32 + 0.5 - center.y;
        for x in x0..x1 {
            let dx = x as f32 + 0.5 - center.x;
            if dx * dx * inv_rx_sq + dy * dy * inv_ry_sq <= 1.0 {
                blend_pixel_clipped(frame, width as usize, x, y, color);
            }
        }
    }
}

fn draw_cross(frame: &mut [u8], width: u32, center: Vec2, half_size: f32, color: Rgba) {
    let cx = center.x.round() as i32;
    let cy = center.y.round() as i32;
    let half = half_size.round() as i32;
    for x in (cx - half)..=(cx + half) {
        blend_pixel_clipped(frame, width as usize, x, cy, color);
    }
    for y in (cy - half)..=(cy + half) {
        blend_pixel_clipped(frame, width as usize, cx, y, color);
    }
}

fn blend_pixel_clipped(frame: &mut [u8], width: usize, x: i32, y: i32, color: Rgba) {
    if x < 0 || y < 0 || x as usize >= width {
        return;
    }
    let x = x as usize;
    let y = y as usize;
    let Some(pixel_offset) = y.checked_mul(width).and_then(|row| row.checked_add(x)) else {
        return;
    };
    let Some(byte_offset) = pixel_offset.checked_mul(4) else {
        return;
    };
    let Some(end) = byte_offset.checked_add(4) else {
        return;
    };
    if end > frame.len() {
        return;
    }
    let dst = &mut frame[byte_offset..end];
    match color[3] {
        255 => dst.copy_from_slice(&color),
        0 => {}
        alpha => {
            let a = alpha as u16;
            for channel in 0..3 {
                let src = color[channel] as u16;
                let old = dst[channel] as u16;
                dst[channel] = ((src * a + old * (255 - a)) / 255) as u8;
            }
            dst[3] = 255;
        }
    }
}
