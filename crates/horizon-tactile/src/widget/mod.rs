//! Control system for Horizon Tactile.
//!
//! This module provides the pieces every touch control is assembled from:
//!
//! - [`gesture`]: The contract with the host's gesture recognizers
//! - [`visual`]: Host visuals and the [`SwitchNode`] that selects between them
//! - [`control`]: Deferred command handles for use inside callbacks
//! - [`config`]: Touch target sizing
//! - [`widgets`]: The controls themselves
//!
//! # Overview
//!
//! A control owns a [`StateMachine`](horizon_tactile_core::StateMachine) (or,
//! for sliders, a plain drag session), a set of visuals and a recognizer
//! switch. The host feeds it gesture callbacks; the control moves between
//! states, activates the matching visual and reports what happened through
//! its public [`Signal`](horizon_tactile_core::Signal) fields.
//!
//! ```ignore
//! use horizon_tactile::prelude::*;
//!
//! let mut button = Button::builder(up, down).fat_finger_enlarge(true).build()?;
//! button.clicked.connect(|event| println!("clicked at {:?}", event.position));
//!
//! button.handle_tap(&TapGesture::Possible(event))?;
//! button.handle_tap(&TapGesture::Detected(event))?;
//! ```

pub mod config;
pub mod control;
pub mod gesture;
mod press;
pub mod visual;
pub mod widgets;

pub use config::{DEFAULT_MIN_HIT_TARGET_MM, DEFAULT_PIXELS_PER_MM, TouchConfig};
pub use control::{ControlHandle, ControlLink};
pub use gesture::{
    DragGesture, DragTarget, Recognizer, RecognizerGate, TapEvent, TapGesture, TapTarget,
};
pub use visual::{SharedVisual, SwitchNode, Visual, VisualNode};

/// Target names for log filtering in the control layer.
pub mod targets {
    /// Push button target.
    pub const BUTTON: &str = "horizon_tactile::button";
    /// Toggle button target.
    pub const TOGGLE: &str = "horizon_tactile::toggle_button";
    /// Slider target.
    pub const SLIDER: &str = "horizon_tactile::slider";
    /// Scroll bar target.
    pub const SCROLL_BAR: &str = "horizon_tactile::scroll_bar";
    /// Shared control plumbing target.
    pub const CONTROL: &str = "horizon_tactile::control";
}
