/// RGBA color with 0.0 - 1.0 components.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    /// Create a color from RGBA components (0.0 - 1.0).
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a fully opaque color from RGB components.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a color with the given alpha value.
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// CSS `rgba()` string, as accepted by Canvas 2D fill/stroke styles and gradient stops.
    /// Alpha is saturated to [0, 1].
    pub fn to_css(self) -> String {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "rgba({},{},{},{})",
            channel(self.r),
            channel(self.g),
            channel(self.b),
            self.a.clamp(0.0, 1.0)
        )
    }

    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
}

impl Default for Rgba {
    fn default() -> Self {
        Self::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn white_with_alpha_to_css() {
        assert_eq!(Rgba::WHITE.with_alpha(0.95).to_css(), "rgba(255,255,255,0.95)");
        assert_eq!(Rgba::WHITE.with_alpha(0.0).to_css(), "rgba(255,255,255,0)");
    }

    #[test]
    fn css_alpha_is_saturated() {
        assert_eq!(Rgba::WHITE.with_alpha(1.2).to_css(), "rgba(255,255,255,1)");
    }
}
