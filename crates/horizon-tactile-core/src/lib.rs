//! Core systems for Horizon Tactile.
//!
//! This crate provides the foundational pieces the touch controls are built on:
//!
//! - **State Machine**: Named states with guarded transitions and enter/leave hooks
//! - **Signal/Slot System**: Type-safe notifications with cancelable subscriptions
//! - **Weak Handlers**: Callbacks that do not keep their owner alive
//! - **Property System**: Shared values with change detection
//! - **Geometry**: Points, sizes and slider orientation
//!
//! # State Machine Example
//!
//! ```
//! use horizon_tactile_core::{StateMachine, StateSpec, TactileError};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Press { Up, Down }
//!
//! fn main() -> Result<(), TactileError> {
//!     let mut machine = StateMachine::<Press, ()>::new("Press", Press::Up);
//!     machine.add_state(StateSpec::new(Press::Up).successors([Press::Down]))?;
//!     machine.add_state(StateSpec::new(Press::Down).successors([Press::Up]))?;
//!
//!     machine.change_state(&mut (), Press::Down)?;
//!     assert_eq!(machine.state(), Press::Down);
//!     Ok(())
//! }
//! ```
//!
//! # Signal/Slot Example
//!
//! ```
//! use horizon_tactile_core::Signal;
//!
//! let thumb_pos_changed = Signal::<f64>::new();
//! let conn_id = thumb_pos_changed.connect(|value| {
//!     println!("value is now {value}");
//! });
//!
//! thumb_pos_changed.emit(0.25);
//! thumb_pos_changed.disconnect(conn_id);
//! ```

mod error;
pub mod geometry;
pub mod handler;
pub mod logging;
pub mod property;
pub mod signal;
pub mod state_machine;

pub use error::{ConfigError, Result, StateError, TactileError};
pub use geometry::{Orientation, Point, Size};
pub use handler::{Handler, WeakHandler};
pub use logging::{PerfSpan, StateGraphDebug, TreeStyle};
pub use property::Property;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
pub use state_machine::{Hook, StateId, StateMachine, StateSpec, Transition};
