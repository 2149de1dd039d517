//! Owned image buffer shared by camera capture and frame composition
//!
//! Pixels are row-major `0xAARRGGBB`, which is BGRA8 in memory on little-endian
//! targets and can be uploaded to the GPU without conversion.

/// Pack an opaque colour
#[inline]
pub const fn rgb(r: u8, g: u8, b: u8) -> u32 {
    0xFF00_0000 | (r as u32) << 16 | (g as u32) << 8 | b as u32
}

/// Split a packed colour into (r, g, b)
#[inline]
pub const fn channels(color: u32) -> (u8, u8, u8) {
    ((color >> 16) as u8, (color >> 8) as u8, color as u8)
}

/// A width x height image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u32>,
}

impl Frame {
    /// Solid-colour frame
    pub fn new(width: usize, height: usize, fill: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width * height],
        }
    }

    /// Build from tightly packed RGBA8 bytes (canvas `ImageData` layout)
    ///
    /// Returns None when the byte count doesn't match the dimensions.
    pub fn from_rgba(width: usize, height: usize, bytes: &[u8]) -> Option<Self> {
        if bytes.len() != width * height * 4 {
            return None;
        }
        let pixels = bytes
            .chunks_exact(4)
            .map(|px| rgb(px[0], px[1], px[2]))
            .collect();
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<u32> {
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    /// Write a pixel; signed coordinates outside the frame are ignored
    #[inline]
    pub fn put(&mut self, x: i32, y: i32, color: u32) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.pixels[y as usize * self.width + x as usize] = color;
        }
    }

    pub fn fill(&mut self, color: u32) {
        self.pixels.fill(color);
    }

    /// Mirror left-to-right in place (selfie view)
    pub fn mirror_horizontal(&mut self) {
        if self.width == 0 {
            return;
        }
        for row in self.pixels.chunks_exact_mut(self.width) {
            row.reverse();
        }
    }

    /// Nearest-neighbour resize
    pub fn resized(&self, width: usize, height: usize) -> Frame {
        if self.is_empty() || width == 0 || height == 0 {
            return Frame::new(width, height, rgb(0, 0, 0));
        }
        let mut out = Vec::with_capacity(width * height);
        for y in 0..height {
            let sy = y * self.height / height;
            let row = &self.pixels[sy * self.width..(sy + 1) * self.width];
            out.extend((0..width).map(|x| row[x * self.width / width]));
        }
        Frame {
            width,
            height,
            pixels: out,
        }
    }

    /// Copy `src` with its top-left corner at (x, y), clipped to this frame
    pub fn blit(&mut self, src: &Frame, x: usize, y: usize) {
        if x >= self.width || y >= self.height {
            return;
        }
        let w = src.width.min(self.width - x);
        let h = src.height.min(self.height - y);
        for row in 0..h {
            let dst_start = (y + row) * self.width + x;
            let src_start = row * src.width;
            self.pixels[dst_start..dst_start + w]
                .copy_from_slice(&src.pixels[src_start..src_start + w]);
        }
    }

    /// Tightly packed RGBA8 bytes, alpha opaque
    pub fn to_rgba(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|&px| {
                let (r, g, b) = channels(px);
                [r, g, b, 0xFF]
            })
            .collect()
    }

    /// Raw bytes for texture upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }
}
