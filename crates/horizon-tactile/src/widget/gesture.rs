//! Contract between controls and the host's gesture recognizers.
//!
//! Recognition itself (turning raw pointer events into taps and drags) belongs
//! to the host. Controls only consume the lifecycle callbacks a recognizer
//! produces and tell it when to stop delivering them.
//!
//! # Tap lifecycle
//!
//! Per gesture a tap recognizer delivers zero or one [`TapGesture::Possible`]
//! followed by exactly one terminal [`TapGesture::Detected`] or
//! [`TapGesture::Failed`].
//!
//! # Drag lifecycle
//!
//! A drag recognizer delivers [`DragGesture::Start`], any number of
//! [`DragGesture::Move`] and one terminal [`DragGesture::Up`]. Offsets are
//! displacements from the position where the drag started.
//!
//! # Usage
//!
//! ```ignore
//! use horizon_tactile::widget::gesture::{TapGesture, TapTarget};
//!
//! for gesture in host_recognizer.poll() {
//!     button.handle_tap(&gesture)?;
//! }
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use horizon_tactile_core::{Point, Result};

/// Data carried by a tap lifecycle event.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TapEvent {
    /// Position of the pointer in scene coordinates.
    pub position: Point,
    /// Identifier of the touch point or mouse pointer.
    pub pointer_id: u64,
}

impl TapEvent {
    /// Create a tap event.
    pub fn new(position: Point, pointer_id: u64) -> Self {
        Self {
            position,
            pointer_id,
        }
    }
}

/// One step of a tap gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TapGesture {
    /// Pointer went down inside the target; the tap is not confirmed yet.
    Possible(TapEvent),
    /// The tap completed.
    Detected(TapEvent),
    /// The tap was aborted, e.g. released outside or moved too far.
    Failed(TapEvent),
}

impl TapGesture {
    /// The event carried by this step.
    pub fn event(&self) -> &TapEvent {
        match self {
            Self::Possible(e) | Self::Detected(e) | Self::Failed(e) => e,
        }
    }
}

/// One step of a drag gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragGesture {
    /// The drag was recognized.
    Start,
    /// The pointer moved; offset from the drag start.
    Move(Point),
    /// The pointer was released; final offset from the drag start.
    Up(Point),
}

/// A control that consumes tap gestures.
pub trait TapTarget {
    /// Pointer down inside the active area.
    fn on_possible(&mut self, event: &TapEvent) -> Result<()>;

    /// Tap confirmed.
    fn on_detected(&mut self, event: &TapEvent) -> Result<()>;

    /// Tap aborted.
    fn on_failed(&mut self, event: &TapEvent) -> Result<()>;

    /// Dispatch one lifecycle step to the matching callback.
    fn handle_tap(&mut self, gesture: &TapGesture) -> Result<()> {
        match gesture {
            TapGesture::Possible(e) => self.on_possible(e),
            TapGesture::Detected(e) => self.on_detected(e),
            TapGesture::Failed(e) => self.on_failed(e),
        }
    }
}

/// A control that consumes drag gestures.
pub trait DragTarget {
    /// The drag was recognized.
    fn on_drag_start(&mut self);

    /// The pointer moved by `offset` since the drag started.
    fn on_drag_move(&mut self, offset: Point);

    /// The pointer was released at `offset` from the drag start.
    fn on_drag_end(&mut self, offset: Point);

    /// Dispatch one lifecycle step to the matching callback.
    fn handle_drag(&mut self, gesture: &DragGesture) {
        match *gesture {
            DragGesture::Start => self.on_drag_start(),
            DragGesture::Move(offset) => self.on_drag_move(offset),
            DragGesture::Up(offset) => self.on_drag_end(offset),
        }
    }
}

/// Arm/disarm switch of a host gesture recognizer.
///
/// Disabling must not destroy the recognizer; re-enabling resumes delivery
/// with the next gesture.
pub trait Recognizer: Send {
    /// Arm or disarm event delivery.
    fn enable(&mut self, enabled: bool);

    /// Whether events are currently delivered.
    fn is_enabled(&self) -> bool;
}

/// A shareable armed flag implementing [`Recognizer`].
///
/// Controls use one by default. Hosts keep a clone and consult
/// [`is_enabled`](Recognizer::is_enabled) before forwarding pointer input.
#[derive(Debug, Clone)]
pub struct RecognizerGate {
    armed: Arc<AtomicBool>,
}

impl RecognizerGate {
    /// Create an armed gate.
    pub fn new() -> Self {
        Self {
            armed: Arc::new(AtomicBool::new(true)),
        }
    }
}

impl Default for RecognizerGate {
    fn default() -> Self {
        Self::new()
    }
}

impl Recognizer for RecognizerGate {
    fn enable(&mut self, enabled: bool) {
        self.armed.store(enabled, Ordering::SeqCst);
    }

    fn is_enabled(&self) -> bool {
        self.armed.load(Ordering::SeqCst)
    }
}
