//! Hardware-limited axis.
//!
//! The limit switches are wired into the device, which refuses motion past an
//! asserted switch on its own. [`LimitedAxis`] makes sure every position
//! request on the axis is routed through those limits and exposes the switch
//! inputs so callers can see which end has been reached. Reaching a limit is
//! not an error: the request stays active and the axis simply stops there.

use embedded_hal::digital::InputPin;

use crate::config::{HardwareLimitConfig, Rotations, Volts};
use crate::device::{DeviceId, Transport};
use crate::error::{ConfigError, DeviceError, Error, Result};

use super::actuator::Actuator;
use super::dispatch::ControlModes;
use super::request::ControlRequest;

/// Where an axis is relative to its limit switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LimitState {
    /// Neither switch asserted.
    MidRange,
    /// Forward switch asserted; positive motion is refused.
    AtForwardLimit,
    /// Reverse switch asserted; negative motion is refused.
    AtReverseLimit,
}

impl LimitState {
    /// Decode asserted switch states. `None` if both are asserted.
    pub fn from_asserted(forward: bool, reverse: bool) -> Option<Self> {
        match (forward, reverse) {
            (false, false) => Some(LimitState::MidRange),
            (true, false) => Some(LimitState::AtForwardLimit),
            (false, true) => Some(LimitState::AtReverseLimit),
            (true, true) => None,
        }
    }

    /// Check if motion at `velocity` (signed) is allowed in this state.
    pub fn permits(self, velocity: f32) -> bool {
        match self {
            LimitState::MidRange => true,
            LimitState::AtForwardLimit => velocity <= 0.0,
            LimitState::AtReverseLimit => velocity >= 0.0,
        }
    }
}

/// An actuator whose travel is bounded by hardware limit switches and whose
/// position comes from a remote absolute sensor.
///
/// Generic over the forward and reverse switch input pins.
pub struct LimitedAxis<FWD, REV>
where
    FWD: InputPin,
    REV: InputPin,
{
    actuator: Actuator,
    remote_sensor: DeviceId,
    limits: HardwareLimitConfig,
    forward: FWD,
    reverse: REV,
}

impl<FWD, REV> LimitedAxis<FWD, REV>
where
    FWD: InputPin,
    REV: InputPin,
{
    /// Wrap a configured actuator as a limited axis.
    ///
    /// # Errors
    ///
    /// - [`DeviceError::Unready`] if the primary is not configured
    /// - [`ConfigError::LimitWiringRequired`] unless both limits are enforced
    /// - [`ConfigError::FeedbackMismatch`] unless feedback comes from `remote_sensor`
    pub fn new(actuator: Actuator, remote_sensor: DeviceId, forward: FWD, reverse: REV) -> Result<Self> {
        let primary = actuator.primary();
        let config = primary
            .applied_config()
            .ok_or(Error::Device(DeviceError::Unready(primary.id())))?;

        let limits = config
            .hardware_limits
            .filter(|l| l.is_fully_enabled())
            .ok_or_else(|| Error::Config(ConfigError::LimitWiringRequired(name_of(primary.name()))))?;

        if config.feedback.remote_sensor() != Some(remote_sensor.0) {
            return Err(Error::Config(ConfigError::FeedbackMismatch {
                device: name_of(primary.name()),
                expected: remote_sensor.0,
            }));
        }

        Ok(Self {
            actuator,
            remote_sensor,
            limits,
            forward,
            reverse,
        })
    }

    /// The wrapped actuator.
    #[inline]
    pub fn actuator(&self) -> &Actuator {
        &self.actuator
    }

    /// Remote sensor the closed loop runs on.
    #[inline]
    pub fn remote_sensor(&self) -> DeviceId {
        self.remote_sensor
    }

    /// Limit wiring in force.
    #[inline]
    pub fn limits(&self) -> &HardwareLimitConfig {
        &self.limits
    }

    /// Closed-loop position, bounded by the hardware limits.
    pub fn set_position<B: Transport>(&mut self, bus: &mut B, target: Rotations) -> Result<()> {
        self.actuator.set_position(bus, target, true)
    }

    /// Motion-profiled position, bounded by the hardware limits.
    pub fn set_motion_profiled_position<B: Transport>(
        &mut self,
        bus: &mut B,
        target: Rotations,
    ) -> Result<()> {
        self.actuator.submit(
            bus,
            ControlRequest::MotionProfiledPosition {
                target,
                bounded: true,
            },
        )
    }

    /// Open-loop voltage. The device still stops at an asserted limit.
    pub fn set_voltage<B: Transport>(&mut self, bus: &mut B, volts: Volts) -> Result<()> {
        self.actuator.set_voltage(bus, volts)
    }

    /// Zero output.
    pub fn neutral<B: Transport>(&mut self, bus: &mut B) -> Result<()> {
        self.actuator.neutral(bus)
    }

    /// Read the limit switch inputs.
    ///
    /// # Errors
    ///
    /// - [`DeviceError::LimitInput`] if a pin cannot be read
    /// - [`DeviceError::LimitConflict`] if both switches are asserted
    pub fn limit_state(&mut self) -> Result<LimitState> {
        let id = self.actuator.id();
        let forward_high = self
            .forward
            .is_high()
            .map_err(|_| Error::Device(DeviceError::LimitInput(id)))?;
        let reverse_high = self
            .reverse
            .is_high()
            .map_err(|_| Error::Device(DeviceError::LimitInput(id)))?;

        let forward = self.limits.forward.polarity.is_asserted(forward_high);
        let reverse = self.limits.reverse.polarity.is_asserted(reverse_high);
        self.decode(forward, reverse)
    }

    /// Limit state as last reported by the device itself.
    ///
    /// `Ok(None)` until a status frame has been received.
    pub fn reported_limit_state<B: Transport>(&self, bus: &B) -> Result<Option<LimitState>> {
        match self.actuator.status(bus) {
            Some(status) => self
                .decode(status.forward_limit, status.reverse_limit)
                .map(Some),
            None => Ok(None),
        }
    }

    /// Latest reported position from the remote sensor.
    pub fn position<B: Transport>(&self, bus: &B) -> Option<Rotations> {
        self.actuator.status(bus).map(|s| s.position)
    }

    /// Release the actuator and switch pins.
    pub fn release(self) -> (Actuator, FWD, REV) {
        (self.actuator, self.forward, self.reverse)
    }

    fn decode(&self, forward: bool, reverse: bool) -> Result<LimitState> {
        LimitState::from_asserted(forward, reverse).ok_or_else(|| {
            error!("device {} reports both limits asserted", self.actuator.id().0);
            Error::Device(DeviceError::LimitConflict(self.actuator.id()))
        })
    }
}

fn name_of(name: &str) -> heapless::String<32> {
    heapless::String::try_from(name).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        DeviceConfig, FeedbackConfig, HardwareLimitConfig, Inversion, MotionProfileConfig,
        NeutralMode, SlotGains,
    };
    use crate::device::{configure, Device};
    use crate::sim::SimBus;
    use embedded_hal_mock::eh1::digital::{Mock as PinMock, State, Transaction as PinTransaction};

    fn deploy_config() -> DeviceConfig {
        DeviceConfig {
            inverted: Inversion::CounterClockwisePositive,
            neutral_mode: NeutralMode::Brake,
            feedback: FeedbackConfig::fused(22, 1.0),
            slot0: SlotGains::proportional(0.001),
            motion_profile: Some(MotionProfileConfig::new(2.0, 8.0, 80.0)),
            hardware_limits: Some(HardwareLimitConfig::new(0, 1)),
        }
    }

    fn actuator(bus: &mut SimBus, config: DeviceConfig) -> Actuator {
        let mut device = Device::new(DeviceId(21), "intake_deploy");
        configure(bus, &mut device, config).unwrap();
        Actuator::new(device)
    }

    // Normally-open switches read low when asserted.
    fn pins(forward: State, reverse: State) -> (PinMock, PinMock) {
        (
            PinMock::new(&[PinTransaction::get(forward)]),
            PinMock::new(&[PinTransaction::get(reverse)]),
        )
    }

    #[test]
    fn test_position_requests_are_bounded() {
        let mut bus = SimBus::with_devices(&[21]);
        let (fwd, rev) = pins(State::High, State::High);
        let mut axis =
            LimitedAxis::new(actuator(&mut bus, deploy_config()), DeviceId(22), fwd, rev).unwrap();

        axis.set_position(&mut bus, Rotations(0.3)).unwrap();
        assert!(bus.device(DeviceId(21)).unwrap().request().unwrap().is_bounded());

        axis.set_motion_profiled_position(&mut bus, Rotations(0.5)).unwrap();
        assert_eq!(
            axis.actuator().active_request(),
            Some(ControlRequest::MotionProfiledPosition {
                target: Rotations(0.5),
                bounded: true,
            })
        );

        assert_eq!(axis.limit_state(), Ok(LimitState::MidRange));
        let (_, mut fwd, mut rev) = axis.release();
        fwd.done();
        rev.done();
    }

    #[test]
    fn test_forward_limit_reported() {
        let mut bus = SimBus::with_devices(&[21]);
        let (fwd, rev) = pins(State::Low, State::High);
        let mut axis =
            LimitedAxis::new(actuator(&mut bus, deploy_config()), DeviceId(22), fwd, rev).unwrap();

        assert_eq!(axis.limit_state(), Ok(LimitState::AtForwardLimit));
        let (_, mut fwd, mut rev) = axis.release();
        fwd.done();
        rev.done();
    }

    #[test]
    fn test_both_limits_conflict() {
        let mut bus = SimBus::with_devices(&[21]);
        let (fwd, rev) = pins(State::Low, State::Low);
        let mut axis =
            LimitedAxis::new(actuator(&mut bus, deploy_config()), DeviceId(22), fwd, rev).unwrap();

        assert_eq!(
            axis.limit_state(),
            Err(Error::Device(DeviceError::LimitConflict(DeviceId(21))))
        );
        let (_, mut fwd, mut rev) = axis.release();
        fwd.done();
        rev.done();
    }

    #[test]
    fn test_unwired_axis_refused() {
        let mut bus = SimBus::with_devices(&[21]);
        let mut config = deploy_config();
        config.hardware_limits.as_mut().unwrap().reverse.enabled = false;

        let mut fwd = PinMock::new(&[]);
        let mut rev = PinMock::new(&[]);
        let result = LimitedAxis::new(
            actuator(&mut bus, config),
            DeviceId(22),
            fwd.clone(),
            rev.clone(),
        );

        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::LimitWiringRequired(_)))
        ));
        fwd.done();
        rev.done();
    }

    #[test]
    fn test_wrong_sensor_refused() {
        let mut bus = SimBus::with_devices(&[21]);
        let mut fwd = PinMock::new(&[]);
        let mut rev = PinMock::new(&[]);

        let result = LimitedAxis::new(
            actuator(&mut bus, deploy_config()),
            DeviceId(23),
            fwd.clone(),
            rev.clone(),
        );

        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::FeedbackMismatch { expected: 23, .. }))
        ));
        fwd.done();
        rev.done();
    }

    #[test]
    fn test_permits_direction() {
        assert!(LimitState::AtForwardLimit.permits(-1.0));
        assert!(!LimitState::AtForwardLimit.permits(1.0));
        assert!(!LimitState::AtReverseLimit.permits(-1.0));
        assert!(LimitState::MidRange.permits(1.0));
    }
}
