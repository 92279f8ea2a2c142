//! CPU drawing surface backing a signature widget

use inspecta_config::BACKGROUND;

/// Fixed-resolution RGBA raster owned by one signature widget.
///
/// Stores pixels as [f32; 4] in row-major order. The backing resolution is
/// the logical resolution; display scaling is handled by the mapper.
pub struct CpuSurface {
    /// Surface dimensions
    pub width: u32,
    pub height: u32,
    pixels: Vec<[f32; 4]>,
    /// True until ink or a restored image lands on the surface
    blank: bool,
}

impl CpuSurface {
    /// Create a new surface cleared to the opaque white background
    pub fn new(width: u32, height: u32) -> Self {
        let pixel_count = (width as usize) * (height as usize);
        Self {
            width,
            height,
            pixels: vec![BACKGROUND; pixel_count],
            blank: true,
        }
    }

    /// Clear to the background color and mark the surface blank
    pub fn clear(&mut self) {
        self.pixels.fill(BACKGROUND);
        self.blank = true;
    }

    /// Whether nothing has been drawn or restored since the last clear
    #[inline]
    pub fn is_blank(&self) -> bool {
        self.blank
    }

    #[inline]
    pub fn mark_drawn(&mut self) {
        self.blank = false;
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    /// Get a pixel at the given coordinates
    /// Returns None if coordinates are out of bounds
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[f32; 4]> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Blend a color onto an existing pixel using alpha compositing
    /// Formula: out = src * alpha + dst * (1 - alpha)
    #[inline]
    pub fn blend_pixel(&mut self, x: u32, y: u32, color: [f32; 4], coverage: f32) {
        let Some(i) = self.index(x, y) else {
            return;
        };
        let dst = self.pixels[i];
        let src_alpha = color[3] * coverage.clamp(0.0, 1.0);
        let inv_src_alpha = 1.0 - src_alpha;

        self.pixels[i] = [
            color[0] * src_alpha + dst[0] * inv_src_alpha,
            color[1] * src_alpha + dst[1] * inv_src_alpha,
            color[2] * src_alpha + dst[2] * inv_src_alpha,
            src_alpha + dst[3] * inv_src_alpha,
        ];
    }

    /// Composite an RGBA8 image of identical dimensions over the surface
    pub fn composite_rgba8(&mut self, image: &image::RgbaImage) {
        for (x, y, px) in image.enumerate_pixels() {
            let [r, g, b, a] = px.0;
            let color = [
                r as f32 / 255.0,
                g as f32 / 255.0,
                b as f32 / 255.0,
                1.0,
            ];
            self.blend_pixel(x, y, color, a as f32 / 255.0);
        }
    }

    /// Quantize to 8-bit RGBA, row-major, 4 bytes per pixel
    pub fn to_rgba8(&self) -> Vec<u8> {
        let quantized: Vec<[u8; 4]> = self
            .pixels
            .iter()
            .map(|px| px.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8))
            .collect();
        bytemuck::cast_slice(&quantized).to_vec()
    }

    /// Coordinates of every pixel that differs from the background once
    /// quantized to 8 bits
    pub fn inked_pixels(&self) -> Vec<(u32, u32)> {
        let background = BACKGROUND.map(|c| (c * 255.0).round() as u8);
        self.to_rgba8()
            .chunks_exact(4)
            .enumerate()
            .filter(|(_, px)| *px != background.as_slice())
            .map(|(i, _)| ((i as u32) % self.width, (i as u32) / self.width))
            .collect()
    }
}
