//! CPU vector-graphics backend
//!
//! Fills polygons without anti-aliasing: a pixel is covered when its center
//! lies inside the shape, with left/top edges inclusive and right/bottom
//! edges exclusive. Polygons go through the same triangle fan as the GPU
//! path, so shared diagonals are neither skipped nor double-covered.

use glam::Vec2;

use super::shapes::triangle_fan;
use super::{Color, Renderer};
use crate::consts::CHANNELS;

/// Software RGB framebuffer
pub struct Rasterizer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Rasterizer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![255; width as usize * height as usize * CHANNELS],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// RGB of a single pixel
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let i = (y as usize * self.width as usize + x as usize) * CHANNELS;
        [self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]]
    }

    fn fill_span(&mut self, row: usize, start: usize, end: usize, rgb: [u8; 3]) {
        let row_base = row * self.width as usize;
        for px in start..end {
            let i = (row_base + px) * CHANNELS;
            self.pixels[i..i + CHANNELS].copy_from_slice(&rgb);
        }
    }

    fn fill_triangle(&mut self, tri: [Vec2; 3], rgb: [u8; 3]) {
        let min_y = tri[0].y.min(tri[1].y).min(tri[2].y);
        let max_y = tri[0].y.max(tri[1].y).max(tri[2].y);
        let row_start = (min_y - 0.5).ceil().max(0.0) as usize;
        let row_end = (max_y - 0.5).ceil().clamp(0.0, self.height as f32) as usize;

        for row in row_start..row_end {
            let yc = row as f32 + 0.5;
            let mut left = f32::INFINITY;
            let mut right = f32::NEG_INFINITY;

            for i in 0..3 {
                let (mut a, mut b) = (tri[i], tri[(i + 1) % 3]);
                // same orientation for shared edges so both sides agree
                if a.y > b.y {
                    std::mem::swap(&mut a, &mut b);
                }
                if a.y <= yc && yc < b.y {
                    let t = (yc - a.y) / (b.y - a.y);
                    let x = a.x + (b.x - a.x) * t;
                    left = left.min(x);
                    right = right.max(x);
                }
            }
            if left > right {
                continue;
            }

            let start = (left - 0.5).ceil().clamp(0.0, self.width as f32) as usize;
            let end = (right - 0.5).ceil().clamp(0.0, self.width as f32) as usize;
            self.fill_span(row, start, end, rgb);
        }
    }
}

impl Renderer for Rasterizer {
    fn reset(&mut self, color: Color) {
        let rgb = color.to_rgb8();
        for px in self.pixels.chunks_exact_mut(CHANNELS) {
            px.copy_from_slice(&rgb);
        }
    }

    fn draw_polygon(&mut self, vertices: &[Vec2], color: Color) {
        let rgb = color.to_rgb8();
        let triangles = triangle_fan(vertices, color.to_array());
        for tri in triangles.chunks_exact(3) {
            self.fill_triangle([tri[0].point(), tri[1].point(), tri[2].point()], rgb);
        }
    }

    fn get_image(&mut self) -> Vec<u8> {
        self.pixels.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rect_vertices;
    use crate::sim::Rect;

    const BG: Color = Color::rgb8(0, 0, 0);
    const FG: Color = Color::rgb8(200, 100, 50);

    fn count_filled(r: &Rasterizer) -> usize {
        r.pixels
            .chunks_exact(3)
            .filter(|px| *px == [200, 100, 50])
            .count()
    }

    #[test]
    fn test_reset_fills_frame() {
        let mut r = Rasterizer::new(160, 210);
        r.reset(Color::rgb8(144, 72, 17));
        assert_eq!(r.pixel(0, 0), [144, 72, 17]);
        assert_eq!(r.pixel(159, 209), [144, 72, 17]);
        assert_eq!(r.get_image().len(), 160 * 210 * 3);
    }

    #[test]
    fn test_integer_rect_covers_exact_pixels() {
        let mut r = Rasterizer::new(160, 210);
        r.reset(BG);
        let rect = Rect::new(10.0, 20.0, 4.0, 16.0);
        r.draw_polygon(&rect_vertices(&rect, Vec2::ZERO), FG);
        assert_eq!(count_filled(&r), 4 * 16);
        assert_eq!(r.pixel(10, 20), [200, 100, 50]);
        assert_eq!(r.pixel(13, 35), [200, 100, 50]);
        assert_eq!(r.pixel(14, 35), [0, 0, 0]);
        assert_eq!(r.pixel(13, 36), [0, 0, 0]);
        assert_eq!(r.pixel(9, 20), [0, 0, 0]);
    }

    #[test]
    fn test_fractional_rect_samples_centers() {
        let mut r = Rasterizer::new(160, 210);
        r.reset(BG);
        // covers centers 10.5 and 11.5 horizontally, 20.5..23.5 vertically
        let rect = Rect::new(10.3, 20.2, 2.0, 4.0);
        r.draw_polygon(&rect_vertices(&rect, Vec2::ZERO), FG);
        assert_eq!(count_filled(&r), 2 * 4);
        assert_eq!(r.pixel(10, 20), [200, 100, 50]);
        assert_eq!(r.pixel(12, 20), [0, 0, 0]);
    }

    #[test]
    fn test_offscreen_parts_are_clipped() {
        let mut r = Rasterizer::new(160, 210);
        r.reset(BG);
        let rect = Rect::new(-1.0, 206.0, 4.0, 16.0);
        r.draw_polygon(&rect_vertices(&rect, Vec2::ZERO), FG);
        assert_eq!(count_filled(&r), 3 * 4);

        r.reset(BG);
        let gone = Rect::new(170.0, 220.0, 4.0, 4.0);
        r.draw_polygon(&rect_vertices(&gone, Vec2::ZERO), FG);
        assert_eq!(count_filled(&r), 0);
    }

    #[test]
    fn test_triangle_fill() {
        let mut r = Rasterizer::new(16, 16);
        r.reset(BG);
        let tri = [Vec2::new(0.0, 0.0), Vec2::new(8.0, 0.0), Vec2::new(0.0, 8.0)];
        r.draw_polygon(&tri, FG);
        assert_eq!(r.pixel(0, 0), [200, 100, 50]);
        assert_eq!(r.pixel(7, 7), [0, 0, 0]);
        // pixel (x, y) is inside when x + y < 7: 7+6+...+1 = 28
        assert_eq!(count_filled(&r), 28);
    }
}
