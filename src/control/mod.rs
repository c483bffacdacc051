//! Control module for actuator-core.
//!
//! Provides the control request vocabulary, the dispatch trait shared by
//! devices and actuators, follower binding, and hardware-limited axes.

mod actuator;
mod dispatch;
mod follower;
mod limit;
mod request;

pub use actuator::Actuator;
pub use dispatch::ControlModes;
pub use follower::FollowerLink;
pub use limit::{LimitState, LimitedAxis};
pub use request::{ControlRequest, Orientation};
