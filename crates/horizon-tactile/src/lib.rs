//! Horizon Tactile - State-machine driven touch controls.
//!
//! This is the main umbrella crate. It re-exports the core systems from
//! `horizon-tactile-core` and adds the controls built on them.
//!
//! Rendering and gesture recognition belong to the host: controls receive
//! tap and drag lifecycle callbacks, switch between host-supplied visuals and
//! report what happened through signals.
//!
//! # Example
//!
//! ```
//! use horizon_tactile::prelude::*;
//!
//! fn main() -> horizon_tactile::Result<()> {
//!     let up = VisualNode::shared("up", Size::new(80.0, 40.0));
//!     let down = VisualNode::shared("down", Size::new(80.0, 40.0));
//!     let mut button = Button::builder(up, down).fat_finger_enlarge(true).build()?;
//!
//!     button.clicked.connect(|event| println!("clicked at {:?}", event.position));
//!
//!     let tap = TapEvent::new(Point::new(4.0, 4.0), 0);
//!     button.handle_tap(&TapGesture::Possible(tap))?;
//!     button.handle_tap(&TapGesture::Detected(tap))?;
//!     Ok(())
//! }
//! ```

pub use horizon_tactile_core::*;

pub mod prelude;
pub mod widget;
