//! Device module for actuator-core.
//!
//! Provides the motor controller handle, the transport seam it talks through,
//! and the one-time configuration step that makes it ready.

mod configure;
mod driver;
pub mod state;
mod transport;

pub use configure::{configure, Applied};
pub use driver::Device;
pub use state::{Readiness, Role};
pub use transport::{DeviceId, DeviceStatus, Transport};
