//! Robot facade: every mechanism built from one configuration.

use embedded_hal::digital::InputPin;

use crate::config::{validate_config, RobotConfig};
use crate::control::{Actuator, LimitedAxis};
use crate::device::{configure, Device, DeviceId, Transport};
use crate::error::{ConfigError, Error, Result};

use super::climber::Climber;
use super::feeder::Feeder;
use super::intake::Intake;
use super::shooter::Shooter;

/// All mechanisms of the robot, configured and ready.
///
/// # Example
///
/// ```rust,ignore
/// use actuator_core::{load_config, Robot};
///
/// let config = load_config("robot.toml")?;
/// let mut robot = Robot::initialize(&mut bus, &config, forward_pin, reverse_pin)?;
///
/// robot.shooter.select_operating_point(&mut bus, ShotPoint::Mid)?;
/// robot.intake.extend_arm(&mut bus, Rotations(0.25))?;
/// ```
pub struct Robot<FWD, REV>
where
    FWD: InputPin,
    REV: InputPin,
{
    /// Shooter.
    pub shooter: Shooter,
    /// Intake.
    pub intake: Intake<FWD, REV>,
    /// Feeder.
    pub feeder: Feeder,
    /// Climber.
    pub climber: Climber,
}

impl<FWD, REV> Robot<FWD, REV>
where
    FWD: InputPin,
    REV: InputPin,
{
    /// Configure every device and build the mechanisms.
    ///
    /// Initialization stops at the first device that fails configuration; a
    /// robot with a half-configured mechanism is never returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, any device fails to
    /// configure, or a follower or limited axis cannot be built.
    pub fn initialize<B: Transport>(
        bus: &mut B,
        config: &RobotConfig,
        forward: FWD,
        reverse: REV,
    ) -> Result<Self> {
        validate_config(config)?;

        let shooter_cfg = &config.shooter;
        let primary = bring_up(bus, config, &shooter_cfg.primary)?;
        let flywheel = match shooter_cfg.follower {
            Some(ref name) => {
                let follower = bring_up(bus, config, name)?;
                Actuator::with_follower(primary, follower, shooter_cfg.orientation)?
            }
            None => Actuator::new(primary),
        };
        let hood = Actuator::new(bring_up(bus, config, &shooter_cfg.hood)?);
        let shooter = Shooter::new(flywheel, hood, shooter_cfg.points.clone());

        let intake_cfg = &config.intake;
        let roller = Actuator::new(bring_up(bus, config, &intake_cfg.roller)?);
        let deploy = Actuator::new(bring_up(bus, config, &intake_cfg.deploy)?);
        let sensor = config
            .sensor(intake_cfg.deploy_sensor.as_str())
            .ok_or_else(|| Error::Config(ConfigError::SensorNotFound(intake_cfg.deploy_sensor.clone())))?;
        let deploy = LimitedAxis::new(deploy, DeviceId(sensor), forward, reverse)?;
        let intake = Intake::new(roller, deploy);

        let feeder = Feeder::new(Actuator::new(bring_up(bus, config, &config.feeder.motor)?));
        let climber = Climber::new(Actuator::new(bring_up(bus, config, &config.climber.motor)?));

        info!("robot initialized: {=usize} devices", config.devices.len());

        Ok(Self {
            shooter,
            intake,
            feeder,
            climber,
        })
    }

    /// Bring every mechanism to a safe output.
    ///
    /// Every mechanism is attempted; the first failure is returned.
    pub fn stop_all<B: Transport>(&mut self, bus: &mut B) -> Result<()> {
        let results = [
            self.shooter.stop(bus),
            self.intake.stop_roller(bus),
            self.feeder.stop(bus),
            self.climber.stop(bus),
        ];
        results.into_iter().collect()
    }
}

fn bring_up<B: Transport>(bus: &mut B, config: &RobotConfig, name: &str) -> Result<Device> {
    let entry = config.device(name).ok_or_else(|| {
        Error::Config(ConfigError::DeviceNotFound(
            heapless::String::try_from(name).unwrap_or_default(),
        ))
    })?;

    let mut device = Device::new(DeviceId(entry.id), name);
    configure(bus, &mut device, entry.config)?;
    Ok(device)
}
