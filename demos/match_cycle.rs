//! Example: one simulated match cycle.
//!
//! This example demonstrates how to:
//! - Load the robot configuration from TOML
//! - Configure every device over a (simulated) bus
//! - Drive mechanisms through single operations and watch the plant respond
//!
//! Run with: `cargo run --example match_cycle --features std`

use actuator_core::{
    load_config,
    sim::SimBus,
    DeviceId, Result, Robot, Rotations, ShotPoint, Transport, Volts,
};

/// Control loop period.
const DT: f32 = 0.02;

/// Limit switch input that is never asserted (normally-open, reads high).
struct OpenSwitch;

impl embedded_hal::digital::ErrorType for OpenSwitch {
    type Error = core::convert::Infallible;
}

impl embedded_hal::digital::InputPin for OpenSwitch {
    fn is_high(&mut self) -> core::result::Result<bool, Self::Error> {
        Ok(true)
    }

    fn is_low(&mut self) -> core::result::Result<bool, Self::Error> {
        Ok(false)
    }
}

fn run(bus: &mut SimBus, seconds: f32) {
    let ticks = (seconds / DT) as usize;
    for _ in 0..ticks {
        bus.step(DT);
    }
}

fn main() -> Result<()> {
    println!("=== Match Cycle Example ===\n");

    let config = load_config(concat!(env!("CARGO_MANIFEST_DIR"), "/robot.toml"))?;
    println!("Loaded {} devices:", config.devices.len());
    for (name, entry) in config.devices.iter() {
        println!("  {:<14} id {}", name.as_str(), entry.id);
    }

    let ids: Vec<u8> = config.devices.values().map(|e| e.id).collect();
    let mut bus = SimBus::with_devices(&ids);
    let deploy = DeviceId(config.device("intake_deploy").map_or(21, |e| e.id));
    if let Some(arm) = bus.device_mut(deploy) {
        arm.set_travel(Rotations(0.0), Rotations(0.35));
    }

    let mut robot = Robot::initialize(&mut bus, &config, OpenSwitch, OpenSwitch)?;
    println!("\nAll devices configured ({} frames)\n", bus.frames_sent());

    // Intake: deploy past the end of travel, run the roller
    robot.intake.extend_arm(&mut bus, Rotations(1.0))?;
    robot.intake.run_roller(&mut bus, Volts(8.0))?;
    run(&mut bus, 1.0);
    let arm = robot.intake.arm_position(&bus).unwrap_or_default();
    let limits = robot.intake.deploy().reported_limit_state(&bus)?;
    println!("Intake arm at {:.3} rot, limits {:?}", arm.0, limits);

    // Shooter: spin up and feed
    for point in ShotPoint::ALL {
        let setpoint = robot.shooter.select_operating_point(&mut bus, point)?;
        run(&mut bus, 0.2);
        let status = robot.shooter.flywheel().status(&bus).unwrap_or_default();
        println!(
            "Shooter {:?}: target {:.0} rps, measured {:.0} rps",
            point, setpoint.velocity.0, status.velocity.0
        );
    }
    robot.feeder.run(&mut bus, Volts(6.0))?;
    run(&mut bus, 0.5);

    // Climb
    robot.climber.set_position(&mut bus, Rotations(40.0))?;
    run(&mut bus, 1.0);
    let climber = bus.status(DeviceId(19)).unwrap_or_default();
    println!("Climber at {:.1} rot", climber.position.0);

    robot.intake.retract_arm(&mut bus)?;
    robot.stop_all(&mut bus)?;
    run(&mut bus, 0.5);
    println!(
        "\nStopped. Arm back at {:.3} rot",
        robot.intake.arm_position(&bus).unwrap_or_default().0
    );

    Ok(())
}
