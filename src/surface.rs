// Drawing surfaces particles are rendered onto. The browser canvas lives in
// `web`; `PixelSurface` keeps an RGBA buffer in memory for headless use.

use crate::color::Paint;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Bounds {
        Bounds { width, height }
    }

    // Whole-pixel size, as canvas dimensions are stored
    pub fn pixels(&self) -> (u32, u32) {
        (to_pixels(self.width), to_pixels(self.height))
    }
}

fn to_pixels(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.min(u32::MAX as f64) as u32
    } else {
        0
    }
}

pub trait Surface {
    fn size(&self) -> Bounds;

    fn resize(&mut self, bounds: Bounds);

    /// Wipes the whole surface back to transparent.
    fn clear(&mut self);

    fn fill_circle(&mut self, center: [f64; 2], radius: f64, paint: Paint);
}

// Largest side a canvas accepts in current browsers
pub const MAX_PIXEL_SIDE: u32 = 16_384;

// Keeps the RGBA buffer length representable and the allocation bounded
fn clamp_dimensions(width: u32, height: u32) -> (u32, u32) {
    (width.min(MAX_PIXEL_SIDE), height.min(MAX_PIXEL_SIDE))
}

pub struct PixelSurface {
    width: u32,
    height: u32,
    pixel_data: Vec<u8>,
}

impl PixelSurface {
    /// Sides beyond [`MAX_PIXEL_SIDE`] are clamped.
    pub fn new(width: u32, height: u32) -> PixelSurface {
        let (width, height) = clamp_dimensions(width, height);
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|area| area.checked_mul(4))
            .unwrap_or(0);
        PixelSurface {
            width,
            height,
            pixel_data: vec![0x00; len],
        }
    }

    pub fn pixel_data(&self) -> &[u8] {
        &self.pixel_data
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<[u8; 4]> {
        self.get_pixel_index(x, y).map(|idx| {
            [
                self.pixel_data[idx],
                self.pixel_data[idx + 1],
                self.pixel_data[idx + 2],
                self.pixel_data[idx + 3],
            ]
        })
    }

    fn get_pixel_index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && (x as u32) < self.width && y >= 0 && (y as u32) < self.height {
            Some((y as usize * self.width as usize + x as usize) * 4)
        } else {
            None
        }
    }

    fn blend_pixel(&mut self, x: i32, y: i32, paint: Paint) {
        if let Some(idx) = self.get_pixel_index(x, y) {
            let dst = [
                self.pixel_data[idx],
                self.pixel_data[idx + 1],
                self.pixel_data[idx + 2],
                self.pixel_data[idx + 3],
            ];
            self.pixel_data[idx..idx + 4].copy_from_slice(&paint.blend_over(dst));
        }
    }
}

impl Surface for PixelSurface {
    fn size(&self) -> Bounds {
        Bounds::new(self.width as f64, self.height as f64)
    }

    fn resize(&mut self, bounds: Bounds) {
        let (width, height) = bounds.pixels();
        let (width, height) = clamp_dimensions(width, height);
        if width == self.width && height == self.height {
            return;
        }
        // Resizing a canvas drops its contents, and so does this
        *self = PixelSurface::new(width, height);
    }

    fn clear(&mut self) {
        for byte in self.pixel_data.iter_mut() {
            *byte = 0x00;
        }
    }

    // Covers every pixel whose center lies inside the circle
    fn fill_circle(&mut self, center: [f64; 2], radius: f64, paint: Paint) {
        if radius <= 0.0 {
            return;
        }
        let [cx, cy] = center;
        let min_x = (cx - radius).floor() as i32;
        let max_x = (cx + radius).ceil() as i32;
        let min_y = (cy - radius).floor() as i32;
        let max_y = (cy + radius).ceil() as i32;
        let radius_sq = radius * radius;
        for pixel_y in min_y..=max_y {
            for pixel_x in min_x..=max_x {
                let dx = pixel_x as f64 + 0.5 - cx;
                let dy = pixel_y as f64 + 0.5 - cy;
                if dx * dx + dy * dy <= radius_sq {
                    self.blend_pixel(pixel_x, pixel_y, paint);
                }
            }
        }
    }
}
