//! Mechanism module for actuator-core.
//!
//! Each mechanism composes actuators from the control module and exposes the
//! single operations a command scheduler invokes.

mod climber;
mod feeder;
mod intake;
mod operating_point;
mod robot;
mod shooter;

pub use climber::Climber;
pub use feeder::Feeder;
pub use intake::Intake;
pub use operating_point::{OperatingPointPolicy, OperatingPoints, PointSetting, Setpoint, ShotPoint};
pub use robot::Robot;
pub use shooter::Shooter;
