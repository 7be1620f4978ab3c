//! Slider mapping drags to a value.
//!
//! A [`Slider`] holds a continuous value inside a range and moves a thumb
//! along a track. Dragging the thumb by a fraction of the track's pixel length
//! changes the value by the same fraction of the range width.
//!
//! The range may be reversed (`range.1 < range.0`): the value then decreases
//! as the thumb moves towards the end of the track.
//!
//! # Example
//!
//! ```
//! use horizon_tactile::prelude::*;
//!
//! # fn main() -> horizon_tactile::Result<()> {
//! let mut slider = Slider::builder()
//!     .range((0.0, 10.0))
//!     .size(Size::new(50.0, 10.0))
//!     .build()?;
//!
//! slider.thumb_pos_changed.connect(|value| println!("value: {value}"));
//!
//! slider.handle_drag(&DragGesture::Start);
//! slider.handle_drag(&DragGesture::Move(Point::new(25.0, 3.0)));
//! slider.handle_drag(&DragGesture::Up(Point::new(25.0, 3.0)));
//! assert_eq!(slider.value(), 5.0);
//! # Ok(())
//! # }
//! ```

use std::fmt;

use horizon_tactile_core::logging::span_names;
use horizon_tactile_core::{ConfigError, Orientation, PerfSpan, Point, Result, Signal, Size};

use crate::widget::control::{ControlHandle, ControlLink};
use crate::widget::gesture::{DragTarget, Recognizer, RecognizerGate};
use crate::widget::targets;
use crate::widget::visual::{SharedVisual, SwitchNode, Visual};

const CONTROL_NAME: &str = "Slider";

/// Default slider range.
pub const DEFAULT_RANGE: (f64, f64) = (0.0, 1.0);

/// States of the track visual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackState {
    Enabled,
    Disabled,
}

/// States of the thumb visual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThumbState {
    Up,
    Down,
    Disabled,
}

/// Commands a [`ControlHandle`] can queue for a [`Slider`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SliderCommand {
    /// Enable or disable the slider.
    SetEnabled(bool),
    /// Move to a value, clamped into the legal interval.
    SetValue(f64),
    /// Make the slider inert.
    Close,
}

/// Builder for [`Slider`].
pub struct SliderBuilder {
    orientation: Orientation,
    range: (f64, f64),
    value: f64,
    size: Size,
    thumb_size: Option<Size>,
    extent: Option<f64>,
    track: Option<(SharedVisual, Option<SharedVisual>)>,
    thumb: Option<(SharedVisual, SharedVisual, Option<SharedVisual>)>,
    enabled: bool,
    recognizer: Option<Box<dyn Recognizer>>,
}

impl SliderBuilder {
    fn new() -> Self {
        Self {
            orientation: Orientation::default(),
            range: DEFAULT_RANGE,
            value: DEFAULT_RANGE.0,
            size: Size::ZERO,
            thumb_size: None,
            extent: None,
            track: None,
            thumb: None,
            enabled: true,
            recognizer: None,
        }
    }

    /// Set the axis the slider moves along.
    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Set the range. The second bound may be below the first.
    pub fn range(mut self, range: (f64, f64)) -> Self {
        self.range = range;
        self
    }

    /// Set the initial value. It is clamped into the range.
    pub fn value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    /// Set the size of the whole control.
    pub fn size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    /// Set the thumb size. Defaults to the size of the thumb's up visual.
    pub fn thumb_size(mut self, size: Size) -> Self {
        self.thumb_size = Some(size);
        self
    }

    /// Set the track visuals. The disabled visual defaults to the enabled one.
    pub fn track(mut self, enabled: SharedVisual, disabled: Option<SharedVisual>) -> Self {
        self.track = Some((enabled, disabled));
        self
    }

    /// Set the thumb visuals. The disabled visual defaults to the up one.
    pub fn thumb(
        mut self,
        up: SharedVisual,
        down: SharedVisual,
        disabled: Option<SharedVisual>,
    ) -> Self {
        self.thumb = Some((up, down, disabled));
        self
    }

    /// Set whether the slider starts enabled.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Use the host's recognizer switch instead of a private gate.
    pub fn recognizer(mut self, recognizer: impl Recognizer + 'static) -> Self {
        self.recognizer = Some(Box::new(recognizer));
        self
    }

    pub(super) fn extent(mut self, extent: f64) -> Self {
        self.extent = Some(extent);
        self
    }

    /// Build the slider.
    ///
    /// Fails if a bound or the initial value is not finite.
    pub fn build(self) -> Result<Slider> {
        check_range(CONTROL_NAME, self.range)?;
        if !self.value.is_finite() {
            return Err(ConfigError::invalid(
                CONTROL_NAME,
                format!("initial value must be finite, got {}", self.value),
            )
            .into());
        }

        let track = self.track.map(|(enabled, disabled)| {
            let disabled = disabled.unwrap_or_else(|| enabled.clone());
            SwitchNode::new("track")
                .with(TrackState::Enabled, enabled)
                .with(TrackState::Disabled, disabled)
        });
        let thumb = self.thumb.map(|(up, down, disabled)| {
            let disabled = disabled.unwrap_or_else(|| up.clone());
            SwitchNode::new("thumb")
                .with(ThumbState::Up, up)
                .with(ThumbState::Down, down)
                .with(ThumbState::Disabled, disabled)
        });
        let thumb_size = self
            .thumb_size
            .or_else(|| thumb.as_ref().map(|node| node.size()))
            .unwrap_or_default();

        let mut recognizer = self
            .recognizer
            .unwrap_or_else(|| Box::new(RecognizerGate::new()));
        recognizer.enable(self.enabled);

        let mut slider = Slider {
            orientation: self.orientation,
            range: self.range,
            value: self.value,
            size: self.size,
            thumb_size,
            extent: self.extent,
            enabled: self.enabled,
            drag_start: None,
            thumb_pixel_pos: 0.0,
            track,
            thumb,
            recognizer,
            link: ControlLink::new(),
            closed: false,
            pressed: Signal::new(),
            released: Signal::new(),
            thumb_pos_changed: Signal::new(),
            range_changed: Signal::new(),
        };
        slider.value = slider.clamp(slider.value);
        slider.show_enabled();
        slider.position_nodes();
        Ok(slider)
    }
}

fn check_range(control: &'static str, range: (f64, f64)) -> Result<()> {
    if range.0.is_finite() && range.1.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::invalid(control, format!("range bounds must be finite, got {range:?}")).into())
    }
}

/// A slider mapping horizontal or vertical drags to a value.
///
/// # Signals
///
/// - `pressed(())`: Emitted when a drag starts
/// - `released(())`: Emitted when a drag ends, including when disabling the
///   slider cuts a drag short
/// - `thumb_pos_changed(f64)`: Emitted with the new value whenever it changes
/// - `range_changed((f64, f64))`: Emitted when the range changes
pub struct Slider {
    orientation: Orientation,
    range: (f64, f64),
    value: f64,
    size: Size,
    thumb_size: Size,
    /// Thumb extent reserved from the range; only scroll bars set it.
    extent: Option<f64>,
    enabled: bool,
    /// Value at drag start; `Some` while dragging.
    drag_start: Option<f64>,
    thumb_pixel_pos: f32,
    track: Option<SwitchNode<TrackState>>,
    thumb: Option<SwitchNode<ThumbState>>,
    recognizer: Box<dyn Recognizer>,
    link: ControlLink<SliderCommand>,
    closed: bool,

    /// Signal emitted when a drag starts.
    pub pressed: Signal<()>,

    /// Signal emitted when a drag ends.
    pub released: Signal<()>,

    /// Signal emitted when the value changes.
    pub thumb_pos_changed: Signal<f64>,

    /// Signal emitted when the range changes.
    pub range_changed: Signal<(f64, f64)>,
}

impl Slider {
    /// Start building a slider.
    pub fn builder() -> SliderBuilder {
        SliderBuilder::new()
    }

    // =========================================================================
    // Value and Range
    // =========================================================================

    /// The current value.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Move to `value`, clamped into the legal interval.
    ///
    /// Emits `thumb_pos_changed` only if the clamped value differs from the
    /// current one. NaN clamps to the lower bound.
    pub fn set_value(&mut self, value: f64) {
        self.apply_value(value);
        self.process_deferred();
    }

    /// The range as given; the second bound may be below the first.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Change the range and re-clamp the value.
    ///
    /// Fails if a bound is not finite; the slider is unchanged then.
    pub fn set_range(&mut self, range: (f64, f64)) -> Result<()> {
        check_range(CONTROL_NAME, range)?;
        if self.closed || self.range == range {
            return Ok(());
        }
        self.range = range;
        let old = self.value;
        self.value = self.clamp(self.value);
        self.position_nodes();
        tracing::debug!(target: targets::SLIDER, ?range, value = self.value, "range changed");
        self.range_changed.emit(range);
        if self.value != old {
            self.thumb_pos_changed.emit(self.value);
        }
        self.process_deferred();
        Ok(())
    }

    /// The legal value interval as `(low, high)`.
    ///
    /// With a thumb extent the upper end shrinks by the extent, never below
    /// the lower end.
    pub fn bounds(&self) -> (f64, f64) {
        let (r0, r1) = self.range;
        let low = r0.min(r1);
        let high = r0.max(r1);
        match self.extent {
            Some(extent) => (low, (high - extent).max(low)),
            None => (low, high),
        }
    }

    fn clamp(&self, value: f64) -> f64 {
        let (low, high) = self.bounds();
        value.max(low).min(high)
    }

    fn apply_value(&mut self, value: f64) {
        if self.closed {
            return;
        }
        self.update_value(value);
    }

    fn update_value(&mut self, value: f64) {
        let old = self.value;
        self.value = self.clamp(value);
        self.position_nodes();
        if self.value != old {
            tracing::trace!(target: targets::SLIDER, old, new = self.value, "value changed");
            self.thumb_pos_changed.emit(self.value);
        }
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// The axis the slider moves along.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Change the axis and reposition the thumb.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        if self.orientation != orientation {
            self.orientation = orientation;
            self.position_nodes();
        }
    }

    /// The size of the whole control.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Resize the control and reposition the thumb.
    pub fn set_size(&mut self, size: Size) {
        if self.size != size {
            self.size = size;
            self.position_nodes();
        }
    }

    /// The thumb size.
    pub fn thumb_size(&self) -> Size {
        self.thumb_size
    }

    /// Resize the thumb and reposition it.
    pub fn set_thumb_size(&mut self, size: Size) {
        if self.thumb_size != size {
            self.thumb_size = size;
            self.position_nodes();
        }
    }

    /// Offset of the thumb along the axis, in pixels.
    pub fn thumb_pixel_pos(&self) -> f32 {
        self.thumb_pixel_pos
    }

    /// Length of the thumb along the axis, in pixels.
    ///
    /// With a thumb extent this is the extent's share of the track, or the
    /// whole track for an empty range.
    pub fn thumb_pixel_extent(&self) -> f32 {
        let track = self.size.along(self.orientation);
        let Some(extent) = self.extent else {
            return self.thumb_size.along(self.orientation);
        };
        let width = (self.range.1 - self.range.0).abs();
        if width == 0.0 {
            track
        } else {
            ((extent / width) as f32 * track).min(track)
        }
    }

    /// Pixels the thumb can travel: track length minus thumb length.
    pub fn pixel_range(&self) -> f32 {
        self.size.along(self.orientation) - self.thumb_pixel_extent()
    }

    /// Signed value width covered by a full-length drag.
    fn slider_range(&self) -> f64 {
        let (r0, r1) = self.range;
        match self.extent {
            None => r1 - r0,
            Some(extent) if r1 >= r0 => r1 - r0 - extent,
            Some(extent) => r1 - r0 + extent,
        }
    }

    fn position_nodes(&mut self) {
        let thumb_extent = self.thumb_pixel_extent();
        let pixel_range = f64::from(self.pixel_range());
        let slider_range = self.slider_range();

        let mut pos = if slider_range == 0.0 {
            0.0
        } else {
            ((self.value - self.range.0) / slider_range * pixel_range) as f32
        };
        let reversed = self.range.1 < self.range.0;
        if self.extent.is_some() && reversed {
            pos -= thumb_extent;
        }
        self.thumb_pixel_pos = pos;

        if let Some(track) = &self.track {
            track.set_size(self.size);
        }
        if let Some(thumb) = &self.thumb {
            if self.extent.is_some() {
                thumb.set_size(self.thumb_size.with_along(self.orientation, thumb_extent));
            }
            thumb.set_position(thumb.position().with_along(self.orientation, pos));
        }
    }

    // =========================================================================
    // Enabled State
    // =========================================================================

    /// Whether the slider accepts input.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable the slider.
    ///
    /// Disabling in the middle of a drag ends the drag and emits `released`.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.apply_enabled(enabled);
        self.process_deferred();
    }

    fn apply_enabled(&mut self, enabled: bool) {
        if self.closed || self.enabled == enabled {
            return;
        }
        self.enabled = enabled;
        self.recognizer.enable(enabled);
        let cut_drag = !enabled && self.drag_start.take().is_some();
        self.show_enabled();
        tracing::debug!(target: targets::SLIDER, enabled, cut_drag, "enabled changed");
        if cut_drag {
            self.released.emit(());
        }
    }

    fn show_enabled(&self) {
        let (track, thumb) = if self.enabled {
            (TrackState::Enabled, ThumbState::Up)
        } else {
            (TrackState::Disabled, ThumbState::Disabled)
        };
        if let Some(node) = &self.track {
            show(node, track);
        }
        self.show_thumb(thumb);
    }

    fn show_thumb(&self, state: ThumbState) {
        if let Some(node) = &self.thumb {
            show(node, state);
        }
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.drag_start.is_some()
    }

    // =========================================================================
    // Parts
    // =========================================================================

    /// The track visuals, if any were given.
    pub fn track(&self) -> Option<&SwitchNode<TrackState>> {
        self.track.as_ref()
    }

    /// The thumb visuals, if any were given.
    pub fn thumb(&self) -> Option<&SwitchNode<ThumbState>> {
        self.thumb.as_ref()
    }

    /// The recognizer switch.
    pub fn recognizer(&self) -> &dyn Recognizer {
        self.recognizer.as_ref()
    }

    pub(super) fn thumb_extent(&self) -> Option<f64> {
        self.extent
    }

    pub(super) fn set_thumb_extent(&mut self, extent: f64) {
        let old = self.value;
        self.extent = Some(extent);
        self.value = self.clamp(self.value);
        self.position_nodes();
        if self.value != old {
            self.thumb_pos_changed.emit(self.value);
        }
        self.process_deferred();
    }

    // =========================================================================
    // Deferred Commands
    // =========================================================================

    /// Create a handle callbacks can use to reach this slider.
    pub fn handle(&self) -> ControlHandle<SliderCommand> {
        self.link.handle()
    }

    /// Apply commands queued through [`handle`](Self::handle).
    pub fn process_deferred(&mut self) {
        if self.link.pending() == 0 {
            return;
        }
        let _span = PerfSpan::new(span_names::DEFERRED);
        while let Some(command) = self.link.next_command() {
            tracing::debug!(target: targets::SLIDER, ?command, "applying deferred command");
            match command {
                SliderCommand::SetEnabled(enabled) => self.apply_enabled(enabled),
                SliderCommand::SetValue(value) => self.apply_value(value),
                SliderCommand::Close => self.close(),
            }
        }
    }

    /// Make the slider inert.
    ///
    /// A drag in progress is dropped without emitting `released`, since all
    /// signals are disconnected.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.drag_start = None;
        self.recognizer.enable(false);
        self.pressed.disconnect_all();
        self.released.disconnect_all();
        self.thumb_pos_changed.disconnect_all();
        self.range_changed.disconnect_all();
        self.link.close();
        tracing::debug!(target: targets::SLIDER, "slider closed");
    }

    /// Whether [`close`](Self::close) has run.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn accepts(&self, gesture: &'static str) -> bool {
        if self.closed || !self.enabled {
            tracing::trace!(target: targets::SLIDER, gesture, "ignoring drag on inactive slider");
            return false;
        }
        if !self.recognizer.is_enabled() {
            tracing::trace!(target: targets::SLIDER, gesture, "recognizer disarmed, dropping drag");
            return false;
        }
        true
    }

    fn drag_to(&mut self, start: f64, offset: Point) {
        let pixel_range = f64::from(self.pixel_range());
        let normalized = if pixel_range > 0.0 {
            f64::from(offset.along(self.orientation)) / pixel_range
        } else {
            0.0
        };
        self.update_value(start + normalized * self.slider_range());
    }
}

fn show<K: horizon_tactile_core::StateId>(node: &SwitchNode<K>, state: K) {
    if let Err(err) = node.set_active_id(state) {
        tracing::warn!(target: targets::SLIDER, %err, "no visual for state");
    }
}

impl DragTarget for Slider {
    fn on_drag_start(&mut self) {
        if !self.accepts("start") {
            return;
        }
        self.drag_start = Some(self.value);
        self.show_thumb(ThumbState::Down);
        tracing::trace!(target: targets::SLIDER, value = self.value, "drag started");
        self.pressed.emit(());
        self.process_deferred();
    }

    fn on_drag_move(&mut self, offset: Point) {
        if !self.accepts("move") {
            return;
        }
        let Some(start) = self.drag_start else {
            tracing::trace!(target: targets::SLIDER, "move without drag start");
            return;
        };
        self.drag_to(start, offset);
        self.process_deferred();
    }

    fn on_drag_end(&mut self, offset: Point) {
        if !self.accepts("up") {
            return;
        }
        let Some(start) = self.drag_start else {
            tracing::trace!(target: targets::SLIDER, "up without drag start");
            return;
        };
        self.drag_to(start, offset);
        self.drag_start = None;
        self.show_thumb(ThumbState::Up);
        self.released.emit(());
        self.process_deferred();
    }
}

impl fmt::Debug for Slider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slider")
            .field("orientation", &self.orientation)
            .field("range", &self.range)
            .field("value", &self.value)
            .field("extent", &self.extent)
            .field("enabled", &self.enabled)
            .field("dragging", &self.is_dragging())
            .field("closed", &self.closed)
            .finish()
    }
}

static_assertions::assert_impl_all!(Slider: Send);
