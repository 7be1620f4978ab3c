//! Scroll bar with a thumb sized to the visible extent.
//!
//! A [`ScrollBar`] is a [`Slider`] that reserves a thumb extent from its range:
//! the range is the content, the extent is the part of it in view, and the
//! value is the start of the view. The value therefore never exceeds the upper
//! bound minus the extent, and the thumb is drawn as long as the extent's share
//! of the track.
//!
//! # Example
//!
//! ```
//! use horizon_tactile::prelude::*;
//!
//! # fn main() -> horizon_tactile::Result<()> {
//! let mut bar = ScrollBar::builder()
//!     .range((0.0, 1.0))
//!     .thumb_extent(0.2)
//!     .size(Size::new(100.0, 8.0))
//!     .build()?;
//!
//! bar.set_value(1.0);
//! assert_eq!(bar.value(), 0.8);
//! assert_eq!(bar.thumb_pixel_extent(), 20.0);
//! # Ok(())
//! # }
//! ```

use std::fmt;

use horizon_tactile_core::{ConfigError, Orientation, Point, Result, Signal, Size};

use super::slider::{Slider, SliderBuilder, SliderCommand, ThumbState, TrackState};
use crate::widget::control::ControlHandle;
use crate::widget::gesture::{DragTarget, Recognizer};
use crate::widget::targets;
use crate::widget::visual::{SharedVisual, SwitchNode};

const CONTROL_NAME: &str = "ScrollBar";

/// Default thumb extent.
pub const DEFAULT_THUMB_EXTENT: f64 = 0.1;

fn check_extent(extent: f64) -> std::result::Result<(), ConfigError> {
    if extent.is_finite() && extent >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            CONTROL_NAME,
            format!("thumb extent must be finite and not negative, got {extent}"),
        ))
    }
}

/// Builder for [`ScrollBar`].
pub struct ScrollBarBuilder {
    slider: SliderBuilder,
    extent: f64,
}

impl ScrollBarBuilder {
    /// Set the axis the bar scrolls along.
    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.slider = self.slider.orientation(orientation);
        self
    }

    /// Set the content range. The second bound may be below the first.
    pub fn range(mut self, range: (f64, f64)) -> Self {
        self.slider = self.slider.range(range);
        self
    }

    /// Set the initial value.
    pub fn value(mut self, value: f64) -> Self {
        self.slider = self.slider.value(value);
        self
    }

    /// Set the visible extent. Defaults to [`DEFAULT_THUMB_EXTENT`].
    pub fn thumb_extent(mut self, extent: f64) -> Self {
        self.extent = extent;
        self
    }

    /// Set the size of the whole bar.
    pub fn size(mut self, size: Size) -> Self {
        self.slider = self.slider.size(size);
        self
    }

    /// Set the track visuals.
    pub fn track(mut self, enabled: SharedVisual, disabled: Option<SharedVisual>) -> Self {
        self.slider = self.slider.track(enabled, disabled);
        self
    }

    /// Set the thumb visuals. Their length along the axis is managed by the bar.
    pub fn thumb(
        mut self,
        up: SharedVisual,
        down: SharedVisual,
        disabled: Option<SharedVisual>,
    ) -> Self {
        self.slider = self.slider.thumb(up, down, disabled);
        self
    }

    /// Set whether the bar starts enabled.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.slider = self.slider.enabled(enabled);
        self
    }

    /// Use the host's recognizer switch instead of a private gate.
    pub fn recognizer(mut self, recognizer: impl Recognizer + 'static) -> Self {
        self.slider = self.slider.recognizer(recognizer);
        self
    }

    /// Build the bar.
    ///
    /// Fails on a negative or non-finite extent, or on the conditions
    /// [`SliderBuilder::build`] rejects.
    pub fn build(self) -> Result<ScrollBar> {
        check_extent(self.extent)?;
        let slider = self.slider.extent(self.extent).build()?;
        tracing::trace!(
            target: targets::SCROLL_BAR,
            extent = self.extent,
            thumb_px = slider.thumb_pixel_extent(),
            "scroll bar built"
        );
        Ok(ScrollBar { slider })
    }
}

/// A scroll bar.
///
/// Emits the same signals as [`Slider`], reachable through
/// [`pressed`](Self::pressed), [`released`](Self::released),
/// [`thumb_pos_changed`](Self::thumb_pos_changed) and
/// [`range_changed`](Self::range_changed).
pub struct ScrollBar {
    slider: Slider,
}

impl ScrollBar {
    /// Start building a scroll bar.
    pub fn builder() -> ScrollBarBuilder {
        ScrollBarBuilder {
            slider: Slider::builder(),
            extent: DEFAULT_THUMB_EXTENT,
        }
    }

    /// The visible extent.
    pub fn thumb_extent(&self) -> f64 {
        self.slider.thumb_extent().unwrap_or(DEFAULT_THUMB_EXTENT)
    }

    /// Change the visible extent, re-clamp the value and resize the thumb.
    ///
    /// An extent wider than the range pins the value to the lower bound.
    pub fn set_thumb_extent(&mut self, extent: f64) -> Result<()> {
        check_extent(extent)?;
        if self.slider.is_closed() || self.thumb_extent() == extent {
            return Ok(());
        }
        self.slider.set_thumb_extent(extent);
        tracing::debug!(
            target: targets::SCROLL_BAR,
            extent,
            thumb_px = self.slider.thumb_pixel_extent(),
            "thumb extent changed"
        );
        Ok(())
    }

    /// Length of the thumb along the axis, in pixels.
    pub fn thumb_pixel_extent(&self) -> f32 {
        self.slider.thumb_pixel_extent()
    }

    /// Offset of the thumb along the axis, in pixels.
    pub fn thumb_pixel_pos(&self) -> f32 {
        self.slider.thumb_pixel_pos()
    }

    /// The current value: the start of the visible extent.
    pub fn value(&self) -> f64 {
        self.slider.value()
    }

    /// Move to `value`, clamped to at most the upper bound minus the extent.
    pub fn set_value(&mut self, value: f64) {
        self.slider.set_value(value);
    }

    /// The content range.
    pub fn range(&self) -> (f64, f64) {
        self.slider.range()
    }

    /// Change the content range.
    pub fn set_range(&mut self, range: (f64, f64)) -> Result<()> {
        self.slider.set_range(range)
    }

    /// The legal value interval.
    pub fn bounds(&self) -> (f64, f64) {
        self.slider.bounds()
    }

    /// The axis the bar scrolls along.
    pub fn orientation(&self) -> Orientation {
        self.slider.orientation()
    }

    /// Change the axis.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.slider.set_orientation(orientation);
    }

    /// The size of the whole bar.
    pub fn size(&self) -> Size {
        self.slider.size()
    }

    /// Resize the bar.
    pub fn set_size(&mut self, size: Size) {
        self.slider.set_size(size);
    }

    /// Whether the bar accepts input.
    pub fn is_enabled(&self) -> bool {
        self.slider.is_enabled()
    }

    /// Enable or disable the bar.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.slider.set_enabled(enabled);
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.slider.is_dragging()
    }

    /// The track visuals.
    pub fn track(&self) -> Option<&SwitchNode<TrackState>> {
        self.slider.track()
    }

    /// The thumb visuals.
    pub fn thumb(&self) -> Option<&SwitchNode<ThumbState>> {
        self.slider.thumb()
    }

    /// Signal emitted when a drag starts.
    pub fn pressed(&self) -> &Signal<()> {
        &self.slider.pressed
    }

    /// Signal emitted when a drag ends.
    pub fn released(&self) -> &Signal<()> {
        &self.slider.released
    }

    /// Signal emitted when the value changes.
    pub fn thumb_pos_changed(&self) -> &Signal<f64> {
        &self.slider.thumb_pos_changed
    }

    /// Signal emitted when the range changes.
    pub fn range_changed(&self) -> &Signal<(f64, f64)> {
        &self.slider.range_changed
    }

    /// Create a handle callbacks can use to reach this bar.
    pub fn handle(&self) -> ControlHandle<SliderCommand> {
        self.slider.handle()
    }

    /// Apply commands queued through [`handle`](Self::handle).
    pub fn process_deferred(&mut self) {
        self.slider.process_deferred();
    }

    /// Make the bar inert.
    pub fn close(&mut self) {
        self.slider.close();
    }

    /// Whether [`close`](Self::close) has run.
    pub fn is_closed(&self) -> bool {
        self.slider.is_closed()
    }

    /// The underlying slider.
    pub fn slider(&self) -> &Slider {
        &self.slider
    }
}

impl DragTarget for ScrollBar {
    fn on_drag_start(&mut self) {
        self.slider.on_drag_start();
    }

    fn on_drag_move(&mut self, offset: Point) {
        self.slider.on_drag_move(offset);
    }

    fn on_drag_end(&mut self, offset: Point) {
        self.slider.on_drag_end(offset);
    }
}

impl fmt::Debug for ScrollBar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollBar")
            .field("range", &self.range())
            .field("value", &self.value())
            .field("thumb_extent", &self.thumb_extent())
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

static_assertions::assert_impl_all!(ScrollBar: Send);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::gesture::DragGesture;
    use crate::widget::visual::{Visual, VisualNode};
    use horizon_tactile_core::{ConfigError, TactileError};
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn bar(range: (f64, f64), extent: f64, track: f32) -> ScrollBar {
        ScrollBar::builder()
            .range(range)
            .thumb_extent(extent)
            .size(Size::new(track, 8.0))
            .build()
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let bar = ScrollBar::builder().build().unwrap();
        assert_eq!(bar.thumb_extent(), DEFAULT_THUMB_EXTENT);
        assert_eq!(bar.range(), (0.0, 1.0));
        assert_eq!(bar.bounds(), (0.0, 0.9));
    }

    #[test]
    fn test_value_never_exceeds_extent_bound() {
        let mut bar = bar((0.0, 1.0), 0.2, 100.0);
        for requested in [0.5, 0.8, 0.81, 1.0, 25.0, f64::INFINITY] {
            bar.set_value(requested);
            assert!(bar.value() <= 0.8, "value {} for {requested}", bar.value());
        }

        bar.set_value(0.0);
        bar.handle_drag(&DragGesture::Start);
        bar.handle_drag(&DragGesture::Move(Point::new(500.0, 0.0)));
        assert_eq!(bar.value(), 0.8);
    }

    #[test]
    fn test_thumb_geometry() {
        let mut bar = bar((0.0, 1.0), 0.2, 100.0);
        assert_eq!(bar.thumb_pixel_extent(), 20.0);
        assert_eq!(bar.slider().pixel_range(), 80.0);

        bar.set_value(0.4);
        assert!((bar.thumb_pixel_pos() - 40.0).abs() < 1e-4);

        bar.set_value(0.8);
        assert!((bar.thumb_pixel_pos() - 80.0).abs() < 1e-4);
    }

    #[test]
    fn test_drag_covers_scrollable_range() {
        let mut bar = bar((0.0, 100.0), 20.0, 100.0);
        bar.handle_drag(&DragGesture::Start);
        bar.handle_drag(&DragGesture::Move(Point::new(40.0, 0.0)));
        assert!((bar.value() - 40.0).abs() < 1e-9);
        bar.handle_drag(&DragGesture::Up(Point::new(80.0, 0.0)));
        assert!((bar.value() - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_reversed_range_renders_flush() {
        let mut bar = bar((1.0, 0.0), 0.2, 100.0);
        assert_eq!(bar.bounds(), (0.0, 0.8));

        bar.set_value(0.8);
        assert!(bar.thumb_pixel_pos().abs() < 1e-4);

        bar.set_value(0.0);
        assert!((bar.thumb_pixel_pos() - 80.0).abs() < 1e-4);

        bar.set_value(0.8);
        bar.handle_drag(&DragGesture::Start);
        bar.handle_drag(&DragGesture::Move(Point::new(40.0, 0.0)));
        assert!((bar.value() - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_empty_range_fills_track() {
        let bar = bar((3.0, 3.0), 0.5, 60.0);
        assert_eq!(bar.thumb_pixel_extent(), 60.0);
        assert_eq!(bar.value(), 3.0);
        assert_eq!(bar.thumb_pixel_pos(), 0.0);
    }

    #[test]
    fn test_set_thumb_extent() {
        let mut bar = bar((0.0, 1.0), 0.1, 100.0);
        bar.set_value(0.9);
        let values = Arc::new(Mutex::new(Vec::new()));
        let values_clone = values.clone();
        bar.thumb_pos_changed().connect(move |&value| {
            values_clone.lock().push(value);
        });

        bar.set_thumb_extent(0.5).unwrap();
        assert_eq!(bar.value(), 0.5);
        assert_eq!(bar.thumb_pixel_extent(), 50.0);
        assert_eq!(*values.lock(), vec![0.5]);

        bar.set_thumb_extent(2.0).unwrap();
        assert_eq!(bar.bounds(), (0.0, 0.0));
        assert_eq!(bar.value(), 0.0);
        assert_eq!(bar.thumb_pixel_extent(), 100.0);
    }

    #[test]
    fn test_invalid_extent_rejected() {
        let err = ScrollBar::builder().thumb_extent(-0.1).build().unwrap_err();
        assert!(matches!(
            err,
            TactileError::Config(ConfigError::InvalidConfiguration {
                control: "ScrollBar",
                ..
            })
        ));

        let mut bar = bar((0.0, 1.0), 0.1, 100.0);
        assert!(bar.set_thumb_extent(f64::NAN).is_err());
        assert_eq!(bar.thumb_extent(), 0.1);
    }

    #[test]
    fn test_thumb_visual_resized() {
        let up = VisualNode::shared("thumb up", Size::new(10.0, 8.0));
        let down = VisualNode::shared("thumb down", Size::new(10.0, 8.0));
        let mut bar = ScrollBar::builder()
            .range((0.0, 10.0))
            .thumb_extent(2.5)
            .size(Size::new(200.0, 8.0))
            .thumb(up.clone(), down.clone(), None)
            .build()
            .unwrap();

        assert_eq!(up.size(), Size::new(50.0, 8.0));
        assert_eq!(down.size(), Size::new(50.0, 8.0));

        bar.set_value(7.5);
        assert_eq!(up.position(), Point::new(150.0, 0.0));
    }

    #[test]
    fn test_signals_reachable() {
        let mut bar = bar((0.0, 1.0), 0.2, 100.0);
        let events = Arc::new(Mutex::new(Vec::new()));
        let events_clone = events.clone();
        bar.pressed().connect(move |_| events_clone.lock().push("pressed"));
        let events_clone = events.clone();
        bar.released().connect(move |_| events_clone.lock().push("released"));
        let events_clone = events.clone();
        bar.range_changed()
            .connect(move |_| events_clone.lock().push("range"));

        bar.handle_drag(&DragGesture::Start);
        bar.handle_drag(&DragGesture::Up(Point::new(10.0, 0.0)));
        bar.set_range((0.0, 2.0)).unwrap();

        assert_eq!(*events.lock(), vec!["pressed", "released", "range"]);
    }
}
