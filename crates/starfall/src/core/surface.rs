/// Current geometry of the drawing surface.
///
/// Width and height are logical units (CSS pixels on the web). The pixel
/// buffer is the logical size scaled by the device pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceState {
    width: f32,
    height: f32,
    device_pixel_ratio: f32,
    pixel_width: u32,
    pixel_height: u32,
}

impl SurfaceState {
    pub fn new(width: f32, height: f32, device_pixel_ratio: f32) -> Self {
        let mut surface = Self::default();
        surface.resize(width, height, device_pixel_ratio);
        surface
    }

    /// Update the logical size and pixel ratio, recomputing the pixel buffer size.
    /// Negative or non-finite sizes collapse to zero; the ratio never drops below 1.
    pub fn resize(&mut self, width: f32, height: f32, device_pixel_ratio: f32) {
        self.width = sanitize_extent(width);
        self.height = sanitize_extent(height);
        self.device_pixel_ratio = if device_pixel_ratio.is_finite() {
            device_pixel_ratio.max(1.0)
        } else {
            1.0
        };
        self.pixel_width = (self.width * self.device_pixel_ratio).floor() as u32;
        self.pixel_height = (self.height * self.device_pixel_ratio).floor() as u32;
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn device_pixel_ratio(&self) -> f32 {
        self.device_pixel_ratio
    }

    pub fn pixel_width(&self) -> u32 {
        self.pixel_width
    }

    pub fn pixel_height(&self) -> u32 {
        self.pixel_height
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

impl Default for SurfaceState {
    fn default() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            device_pixel_ratio: 1.0,
            pixel_width: 0,
            pixel_height: 0,
        }
    }
}

fn sanitize_extent(v: f32) -> f32 {
    if v.is_finite() {
        v.max(0.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_buffer_scales_with_ratio() {
        let s = SurfaceState::new(801.0, 600.0, 1.5);
        assert_eq!(s.pixel_width(), 1201);
        assert_eq!(s.pixel_height(), 900);
    }

    #[test]
    fn ratio_has_floor_of_one() {
        let s = SurfaceState::new(100.0, 100.0, 0.5);
        assert_eq!(s.device_pixel_ratio(), 1.0);
        let s = SurfaceState::new(100.0, 100.0, f32::NAN);
        assert_eq!(s.device_pixel_ratio(), 1.0);
    }

    #[test]
    fn negative_size_collapses_to_empty() {
        let s = SurfaceState::new(-20.0, 50.0, 2.0);
        assert_eq!(s.width(), 0.0);
        assert!(s.is_empty());
        assert_eq!(s.pixel_width(), 0);
    }
}
