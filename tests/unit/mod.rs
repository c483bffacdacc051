//! Unit test harness for actuator-core.
//!
//! This module organizes configuration tests that run against the public API.

mod config_parsing;
mod config_validation;
