//! Container size and the presentation constants derived from it

/// Container widths below this are treated as mobile
pub const MOBILE_BREAKPOINT: f64 = 768.0;

/// Padding between the wheel and the container edge on mobile
pub const MOBILE_PADDING: f64 = 40.0;

/// Padding between the wheel and the container edge on desktop
pub const DESKTOP_PADDING: f64 = 120.0;

/// Label font size in pixels on mobile
pub const MOBILE_FONT_SIZE: u32 = 9;

/// Label font size in pixels on desktop
pub const DESKTOP_FONT_SIZE: u32 = 11;

/// Distance between a leaf and the start of its label
pub const LABEL_OFFSET: f64 = 20.0;

/// Measured pixel size of the chart container
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns true if the container has a usable, finite size
    pub fn is_measurable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Returns true if the width is below the mobile breakpoint
    pub fn is_mobile(&self) -> bool {
        self.width < MOBILE_BREAKPOINT
    }

    /// Padding margin for this width
    pub fn padding(&self) -> f64 {
        if self.is_mobile() {
            MOBILE_PADDING
        } else {
            DESKTOP_PADDING
        }
    }

    /// Available drawing radius: half the smaller side minus the padding
    ///
    /// Clamped at zero so a tiny container collapses the wheel to its
    /// centre instead of mirroring it.
    pub fn radius(&self) -> f64 {
        (self.width.min(self.height) / 2.0 - self.padding()).max(0.0)
    }

    /// Label font size for this width
    pub fn font_size(&self) -> u32 {
        if self.is_mobile() {
            MOBILE_FONT_SIZE
        } else {
            DESKTOP_FONT_SIZE
        }
    }

    /// Centre of the container in pixel coordinates
    pub fn center(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_desktop_radius() {
        let viewport = Viewport::new(1200.0, 900.0);
        assert!(!viewport.is_mobile());
        assert_eq!(viewport.padding(), 120.0);
        assert_eq!(viewport.radius(), 330.0);
        assert_eq!(viewport.font_size(), 11);
    }

    #[test]
    fn test_mobile_radius() {
        let viewport = Viewport::new(400.0, 600.0);
        assert!(viewport.is_mobile());
        assert_eq!(viewport.padding(), 40.0);
        assert_eq!(viewport.radius(), 160.0);
        assert_eq!(viewport.font_size(), 9);
    }

    #[test]
    fn test_breakpoint_is_exclusive() {
        assert!(!Viewport::new(768.0, 800.0).is_mobile());
        assert!(Viewport::new(767.0, 800.0).is_mobile());
    }

    #[test]
    fn test_radius_never_negative() {
        assert_eq!(Viewport::new(50.0, 50.0).radius(), 0.0);
    }

    #[test]
    fn test_measurable() {
        assert!(Viewport::new(1.0, 1.0).is_measurable());
        assert!(!Viewport::new(0.0, 600.0).is_measurable());
        assert!(!Viewport::new(600.0, f64::NAN).is_measurable());
        assert!(!Viewport::default().is_measurable());
    }
}
