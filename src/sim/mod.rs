//! Simulation module for actuator-core.
//!
//! An in-memory [`Transport`](crate::device::Transport) with a kinematic
//! plant per device, for tests and off-robot development.

mod bus;
mod device;
mod profile;

pub use bus::{SimBus, MAX_SIM_DEVICES};
pub use device::{SimDevice, FACTORY_CONFIG, FREE_SPEED};
pub use profile::{MotionPhase, TrapezoidProfile};
