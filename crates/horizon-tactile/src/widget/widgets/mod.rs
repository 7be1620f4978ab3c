//! Standard touch controls for Horizon Tactile.
//!
//! This module provides the controls:
//!
//! - [`Button`]: Push button with up, down and disabled states
//! - [`ToggleButton`]: Button that flips a checked flag on every tap
//! - [`Slider`]: Maps drags along one axis to a value in a range
//! - [`ScrollBar`]: Slider whose thumb represents a visible extent

mod button;
mod scroll_bar;
mod slider;
mod toggle_button;

pub use button::{Button, ButtonBuilder, ButtonCommand, ButtonState};
pub use scroll_bar::{DEFAULT_THUMB_EXTENT, ScrollBar, ScrollBarBuilder};
pub use slider::{DEFAULT_RANGE, Slider, SliderBuilder, SliderCommand, ThumbState, TrackState};
pub use toggle_button::{ToggleButton, ToggleButtonBuilder, ToggleCommand, ToggleState};
