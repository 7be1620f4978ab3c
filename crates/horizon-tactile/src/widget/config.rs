//! Touch configuration shared by the controls.

use horizon_tactile_core::{ConfigError, Size};

/// Default display density in pixels per millimetre (96 dpi).
pub const DEFAULT_PIXELS_PER_MM: f32 = 96.0 / 25.4;

/// Default minimum edge length of a finger-friendly hit target, in millimetres.
pub const DEFAULT_MIN_HIT_TARGET_MM: f32 = 20.0;

/// Physical parameters used when sizing touch targets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchConfig {
    /// Display density.
    pub pixels_per_mm: f32,
    /// Minimum edge length of an enlarged hit target.
    pub min_hit_target_mm: f32,
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self {
            pixels_per_mm: DEFAULT_PIXELS_PER_MM,
            min_hit_target_mm: DEFAULT_MIN_HIT_TARGET_MM,
        }
    }
}

impl TouchConfig {
    /// Create a configuration for a display of the given density.
    pub fn with_pixels_per_mm(pixels_per_mm: f32) -> Self {
        Self {
            pixels_per_mm,
            ..Default::default()
        }
    }

    /// Minimum hit target edge in pixels.
    pub fn min_hit_target_px(&self) -> f32 {
        self.min_hit_target_mm * self.pixels_per_mm
    }

    /// Grow `size` so both edges reach the minimum hit target.
    pub fn enlarge(&self, size: Size) -> Size {
        let min = self.min_hit_target_px();
        size.max(Size::new(min, min))
    }

    /// Reject densities and target sizes that cannot be used.
    pub fn validate(&self, control: &'static str) -> Result<(), ConfigError> {
        if !(self.pixels_per_mm.is_finite() && self.pixels_per_mm > 0.0) {
            return Err(ConfigError::invalid(
                control,
                format!("pixels_per_mm must be positive, got {}", self.pixels_per_mm),
            ));
        }
        if !(self.min_hit_target_mm.is_finite() && self.min_hit_target_mm >= 0.0) {
            return Err(ConfigError::invalid(
                control,
                format!(
                    "min_hit_target_mm must not be negative, got {}",
                    self.min_hit_target_mm
                ),
            ));
        }
        Ok(())
    }
}
