//! Property tests for dispatch, followers, limits and operating points.

use actuator_core::config::{
    DeviceConfig, FeedbackConfig, HardwareLimitConfig, Inversion, MotionProfileConfig,
    NeutralMode, SlotGains,
};
use actuator_core::error::{DeviceError, Error};
use actuator_core::sim::SimBus;
use actuator_core::{
    configure, Actuator, ControlModes, ControlRequest, Device, DeviceId, OperatingPoints,
    Orientation, Rotations, RotationsPerSec, Shooter, ShotPoint, Transport, Volts,
};
use proptest::prelude::*;

fn base_config() -> DeviceConfig {
    DeviceConfig {
        inverted: Inversion::ClockwisePositive,
        neutral_mode: NeutralMode::Coast,
        feedback: FeedbackConfig::rotor(1.0),
        slot0: SlotGains::proportional(0.1),
        motion_profile: None,
        hardware_limits: None,
    }
}

fn ready(bus: &mut SimBus, id: u8, config: DeviceConfig) -> Device {
    let mut device = Device::new(DeviceId(id), "device");
    configure(bus, &mut device, config).expect("configure failed");
    device
}

fn flywheel(bus: &mut SimBus, orientation: Orientation) -> Actuator {
    let a = ready(bus, 0, base_config());
    let b = ready(bus, 1, base_config());
    Actuator::with_follower(a, b, orientation).expect("bind failed")
}

fn arb_config() -> impl Strategy<Value = DeviceConfig> {
    (
        any::<bool>(),
        any::<bool>(),
        0.01f32..100.0,
        0.01f32..100.0,
        prop::array::uniform5(0.0f32..10.0),
        prop::option::of((0.1f32..100.0, 0.1f32..400.0, 0.1f32..4000.0)),
        prop::option::of((0u8..8, 8u8..16)),
    )
        .prop_map(|(cw, brake, rotor, mech, gains, profile, limits)| DeviceConfig {
            inverted: if cw {
                Inversion::ClockwisePositive
            } else {
                Inversion::CounterClockwisePositive
            },
            neutral_mode: if brake { NeutralMode::Brake } else { NeutralMode::Coast },
            feedback: FeedbackConfig {
                sensor_to_mechanism_ratio: mech,
                ..FeedbackConfig::rotor(rotor)
            },
            slot0: SlotGains {
                kp: gains[0],
                ki: gains[1],
                kd: gains[2],
                ks: gains[3],
                kv: gains[4],
            },
            motion_profile: profile.map(|(c, a, j)| MotionProfileConfig::new(c, a, j)),
            hardware_limits: limits.map(|(f, r)| HardwareLimitConfig::new(f, r)),
        })
}

fn arb_request() -> impl Strategy<Value = ControlRequest> {
    prop_oneof![
        (-12.0f32..12.0).prop_map(|v| ControlRequest::Voltage(Volts(v))),
        (-100.0f32..100.0).prop_map(|v| ControlRequest::Velocity(RotationsPerSec(v))),
        (-50.0f32..50.0).prop_map(|p| ControlRequest::Position {
            target: Rotations(p),
            bounded: false,
        }),
    ]
}

fn arb_point() -> impl Strategy<Value = ShotPoint> {
    prop_oneof![
        Just(ShotPoint::Low),
        Just(ShotPoint::Mid),
        Just(ShotPoint::High),
    ]
}

proptest! {
    #[test]
    fn prop_configure_round_trips(config in arb_config()) {
        let mut bus = SimBus::with_devices(&[7]);
        let mut device = Device::new(DeviceId(7), "device");

        configure(&mut bus, &mut device, config).unwrap();

        prop_assert!(device.is_ready());
        prop_assert_eq!(bus.read_config(DeviceId(7)).unwrap(), config);
    }

    #[test]
    fn prop_last_request_wins(requests in prop::collection::vec(arb_request(), 1..20)) {
        let mut bus = SimBus::with_devices(&[7]);
        let mut device = ready(&mut bus, 7, base_config());

        for request in &requests {
            device.submit(&mut bus, *request).unwrap();
        }

        let last = requests.last().copied();
        prop_assert_eq!(device.active_request(), last);
        prop_assert_eq!(bus.device(DeviceId(7)).unwrap().request(), last);
    }

    #[test]
    fn prop_opposed_follower_negates(request in arb_request()) {
        let mut bus = SimBus::with_devices(&[0, 1]);
        let mut actuator = flywheel(&mut bus, Orientation::Opposed);

        actuator.submit(&mut bus, request).unwrap();

        prop_assert_eq!(bus.device(DeviceId(1)).unwrap().request(), Some(request.negated()));
    }

    #[test]
    fn prop_aligned_follower_copies(request in arb_request()) {
        let mut bus = SimBus::with_devices(&[0, 1]);
        let mut actuator = flywheel(&mut bus, Orientation::Aligned);

        actuator.submit(&mut bus, request).unwrap();

        prop_assert_eq!(bus.device(DeviceId(1)).unwrap().request(), Some(request));
    }

    #[test]
    fn prop_follower_misuse_changes_nothing(
        first in arb_request(),
        stray in arb_request(),
    ) {
        let mut bus = SimBus::with_devices(&[0, 1]);
        let mut actuator = flywheel(&mut bus, Orientation::Opposed);
        actuator.submit(&mut bus, first).unwrap();

        let link = actuator.follower_mut().unwrap();
        let result = link.follower_mut().submit(&mut bus, stray);

        prop_assert_eq!(
            result,
            Err(Error::Device(DeviceError::FollowerMisuse {
                follower: DeviceId(1),
                primary: DeviceId(0),
            }))
        );
        prop_assert_eq!(link.follower().active_request(), Some(first.negated()));
        prop_assert_eq!(bus.device(DeviceId(1)).unwrap().request(), Some(first.negated()));
    }

    #[test]
    fn prop_no_motion_past_asserted_forward_limit(
        start in -1.0f32..1.0,
        beyond in 0.01f32..10.0,
        back in 0.05f32..5.0,
    ) {
        let mut bus = SimBus::with_devices(&[21]);
        let config = DeviceConfig {
            hardware_limits: Some(HardwareLimitConfig::new(0, 1)),
            ..base_config()
        };
        let mut device = ready(&mut bus, 21, config);
        let sim = bus.device_mut(DeviceId(21)).unwrap();
        sim.set_position(Rotations(start));
        sim.set_limits(true, false);

        device.set_position(&mut bus, Rotations(start + beyond), true).unwrap();
        for _ in 0..20 {
            bus.step(0.01);
        }
        prop_assert_eq!(bus.device(DeviceId(21)).unwrap().position(), Rotations(start));

        device.set_position(&mut bus, Rotations(start - back), true).unwrap();
        bus.step(0.01);
        prop_assert!(bus.device(DeviceId(21)).unwrap().position().0 < start);
    }

    #[test]
    fn prop_no_profiled_motion_past_asserted_forward_limit(
        start in -1.0f32..1.0,
        beyond in 0.01f32..10.0,
        back in 0.05f32..5.0,
    ) {
        let mut bus = SimBus::with_devices(&[21]);
        let config = DeviceConfig {
            motion_profile: Some(MotionProfileConfig::new(2.0, 8.0, 80.0)),
            hardware_limits: Some(HardwareLimitConfig::new(0, 1)),
            ..base_config()
        };
        let mut device = ready(&mut bus, 21, config);
        let sim = bus.device_mut(DeviceId(21)).unwrap();
        sim.set_position(Rotations(start));
        sim.set_limits(true, false);

        device.set_motion_profiled_position(&mut bus, Rotations(start + beyond)).unwrap();
        prop_assert_eq!(
            device.active_request(),
            Some(ControlRequest::MotionProfiledPosition {
                target: Rotations(start + beyond),
                bounded: true,
            })
        );
        for _ in 0..50 {
            bus.step(0.01);
        }
        prop_assert_eq!(bus.device(DeviceId(21)).unwrap().position(), Rotations(start));

        device.set_motion_profiled_position(&mut bus, Rotations(start - back)).unwrap();
        for _ in 0..5 {
            bus.step(0.01);
        }
        prop_assert!(bus.device(DeviceId(21)).unwrap().position().0 < start);
    }

    #[test]
    fn prop_operating_points_and_stop(points in prop::collection::vec(arb_point(), 0..8)) {
        let mut bus = SimBus::with_devices(&[0, 1, 2]);
        let hood = ready(&mut bus, 2, base_config());
        let mut shooter = Shooter::new(
            flywheel(&mut bus, Orientation::Opposed),
            Actuator::new(hood),
            OperatingPoints::default(),
        );

        for point in &points {
            let setpoint = shooter.select_operating_point(&mut bus, *point).unwrap();
            let expected = match point {
                ShotPoint::Low => 50.0,
                ShotPoint::Mid => 75.0,
                ShotPoint::High => 100.0,
            };
            prop_assert_eq!(setpoint.velocity, RotationsPerSec(expected));
            prop_assert_eq!(
                shooter.flywheel().active_request(),
                Some(ControlRequest::Velocity(RotationsPerSec(expected)))
            );
        }

        shooter.stop(&mut bus).unwrap();
        prop_assert_eq!(
            shooter.flywheel().active_request(),
            Some(ControlRequest::Velocity(RotationsPerSec::ZERO))
        );
        prop_assert_eq!(shooter.active_point(), None);
    }
}
