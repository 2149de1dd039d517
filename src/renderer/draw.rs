//! Software rasterization onto a `Frame`

use glam::Vec2;

use super::font;
use crate::frame::Frame;
use crate::sim::Rect;

/// Integer pixel bounds of a rectangle, clipped to the frame: (x0, y0, x1, y1) exclusive
fn clip(frame: &Frame, rect: &Rect) -> (i32, i32, i32, i32) {
    let x0 = rect.x.round().max(0.0) as i32;
    let y0 = rect.y.round().max(0.0) as i32;
    let x1 = (rect.right().round() as i32).min(frame.width as i32);
    let y1 = (rect.bottom().round() as i32).min(frame.height as i32);
    (x0, y0, x1, y1)
}

/// Solid rectangle
pub fn fill_rect(frame: &mut Frame, rect: &Rect, color: u32) {
    let (x0, y0, x1, y1) = clip(frame, rect);
    if x0 >= x1 || y0 >= y1 {
        return;
    }
    for y in y0..y1 {
        let row = y as usize * frame.width;
        frame.pixels[row + x0 as usize..row + x1 as usize].fill(color);
    }
}

/// Rectangle outline drawn inward, `thickness` pixels wide
pub fn stroke_rect(frame: &mut Frame, rect: &Rect, thickness: f32, color: u32) {
    let t = thickness.min(rect.w / 2.0).min(rect.h / 2.0);
    fill_rect(frame, &Rect::new(rect.x, rect.y, rect.w, t), color);
    fill_rect(frame, &Rect::new(rect.x, rect.bottom() - t, rect.w, t), color);
    fill_rect(frame, &Rect::new(rect.x, rect.y, t, rect.h), color);
    fill_rect(frame, &Rect::new(rect.right() - t, rect.y, t, rect.h), color);
}

/// Rectangle with rounded corners
pub fn fill_rounded_rect(frame: &mut Frame, rect: &Rect, radius: f32, color: u32) {
    let r = radius.min(rect.w / 2.0).min(rect.h / 2.0).max(0.0);
    let (x0, y0, x1, y1) = clip(frame, rect);
    for y in y0..y1 {
        for x in x0..x1 {
            let px = x as f32 + 0.5;
            let py = y as f32 + 0.5;
            // Distance outside the inner (shrunk) rectangle
            let dx = (rect.x + r - px).max(px - (rect.right() - r)).max(0.0);
            let dy = (rect.y + r - py).max(py - (rect.bottom() - r)).max(0.0);
            if dx * dx + dy * dy <= r * r {
                frame.put(x, y, color);
            }
        }
    }
}

/// Filled circle
pub fn fill_circle(frame: &mut Frame, center: Vec2, radius: f32, color: u32) {
    let r2 = radius * radius;
    let x0 = (center.x - radius).floor() as i32;
    let x1 = (center.x + radius).ceil() as i32;
    let y0 = (center.y - radius).floor() as i32;
    let y1 = (center.y + radius).ceil() as i32;
    for y in y0..=y1 {
        for x in x0..=x1 {
            let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5) - center;
            if d.length_squared() <= r2 {
                frame.put(x, y, color);
            }
        }
    }
}

/// Straight line (Bresenham)
pub fn draw_line(frame: &mut Frame, from: Vec2, to: Vec2, color: u32) {
    let (mut x0, mut y0) = (from.x.round() as i32, from.y.round() as i32);
    let (x1, y1) = (to.x.round() as i32, to.y.round() as i32);
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        frame.put(x0, y0, color);
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

/// Bitmap text with its top-left corner at (x, y)
pub fn draw_text(frame: &mut Frame, text: &str, x: i32, y: i32, scale: i32, color: u32) {
    let scale = scale.max(1);
    let mut pen_x = x;
    for c in text.chars() {
        let rows = font::glyph(c);
        for (row, bits) in rows.iter().enumerate() {
            for col in 0..font::GLYPH_WIDTH {
                if bits & (0x10 >> col) == 0 {
                    continue;
                }
                let px = pen_x + col * scale;
                let py = y + row as i32 * scale;
                for sy in 0..scale {
                    for sx in 0..scale {
                        frame.put(px + sx, py + sy, color);
                    }
                }
            }
        }
        pen_x += font::ADVANCE * scale;
    }
}

/// Text centred inside `rect`
pub fn draw_text_centered(frame: &mut Frame, text: &str, rect: &Rect, scale: i32, color: u32) {
    let w = font::text_width(text, scale);
    let h = font::text_height(scale);
    let x = (rect.x + (rect.w - w as f32) / 2.0).round() as i32;
    let y = (rect.y + (rect.h - h as f32) / 2.0).round() as i32;
    draw_text(frame, text, x, y, scale, color);
}
