//! Prelude module for Horizon Tactile.
//!
//! This module re-exports the most commonly used types for convenient importing:
//!
//! ```ignore
//! use horizon_tactile::prelude::*;
//! ```
//!
//! This provides access to:
//! - Signal/slot system (`Signal`, `Property`, `Handler`)
//! - Gesture contract (`TapTarget`, `DragTarget`, `TapGesture`, `DragGesture`)
//! - Visuals (`Visual`, `VisualNode`, `SwitchNode`)
//! - Controls (`Button`, `ToggleButton`, `Slider`, `ScrollBar`)
//! - Geometry types (`Point`, `Size`, `Orientation`)

// ============================================================================
// Signal/Slot and Property System
// ============================================================================

pub use crate::handler::{Handler, WeakHandler};
pub use crate::property::Property;
pub use crate::signal::{ConnectionGuard, ConnectionId, Signal};

// ============================================================================
// State Machine
// ============================================================================

pub use crate::state_machine::{StateMachine, StateSpec, Transition};

// ============================================================================
// Errors
// ============================================================================

pub use crate::{ConfigError, StateError, TactileError};

// ============================================================================
// Control Foundation
// ============================================================================

pub use crate::widget::{
    ControlHandle, DragGesture, DragTarget, Recognizer, RecognizerGate, SharedVisual,
    SwitchNode, TapEvent, TapGesture, TapTarget, TouchConfig, Visual, VisualNode,
};

// ============================================================================
// Controls
// ============================================================================

pub use crate::widget::widgets::{
    Button, ButtonCommand, ButtonState, ScrollBar, Slider, SliderCommand, ThumbState,
    ToggleButton, ToggleCommand, ToggleState, TrackState,
};

// ============================================================================
// Geometry
// ============================================================================

pub use crate::geometry::{Orientation, Point, Size};
