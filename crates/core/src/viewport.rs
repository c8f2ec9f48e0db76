//! Viewport dimensions shared between setup and the per-frame uniforms.

use serde::{Deserialize, Serialize};

/// Surface dimensions in pixels.
///
/// Stored once per setup call and read every frame to populate the
/// resolution uniform. Zero-sized viewports are legal: the program still
/// links and frames still render, the output is just degenerate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Viewport {
    /// Creates a viewport with the given dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// The dimensions as floats, in the form the resolution uniform expects.
    pub fn resolution(&self) -> (f32, f32) {
        (self.width as f32, self.height as f32)
    }

    /// Whether either dimension is zero.
    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn new_stores_dimensions() {
        let vp = Viewport::new(800, 600);
        assert_eq!(vp.width, 800);
        assert_eq!(vp.height, 600);
    }

    #[test]
    fn resolution_converts_to_f32_pair() {
        let vp = Viewport::new(800, 600);
        assert_eq!(vp.resolution(), (800.0, 600.0));
    }

    #[test]
    fn zero_sized_viewport_is_degenerate_but_constructible() {
        let vp = Viewport::new(0, 0);
        assert!(vp.is_degenerate());
        assert_eq!(vp.resolution(), (0.0, 0.0));
    }

    #[test]
    fn nonzero_viewport_is_not_degenerate() {
        assert!(!Viewport::new(1, 1).is_degenerate());
        assert!(Viewport::new(0, 1).is_degenerate());
        assert!(Viewport::new(1, 0).is_degenerate());
    }

    #[test]
    fn default_viewport_is_zero_sized() {
        assert_eq!(Viewport::default(), Viewport::new(0, 0));
    }

    #[test]
    fn serde_round_trip() {
        let vp = Viewport::new(1920, 1080);
        let json = serde_json::to_string(&vp).expect("serialize");
        let back: Viewport = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(vp, back);
    }

    proptest! {
        #[test]
        fn equal_dimensions_compare_equal(w in 0u32..10_000, h in 0u32..10_000) {
            prop_assert_eq!(Viewport::new(w, h), Viewport::new(w, h));
        }

        #[test]
        fn resolution_matches_dimensions(w in 0u32..10_000, h in 0u32..10_000) {
            let (rw, rh) = Viewport::new(w, h).resolution();
            prop_assert_eq!(rw, w as f32);
            prop_assert_eq!(rh, h as f32);
        }
    }
}
