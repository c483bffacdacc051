//! One-time device configuration with readback verification.

use crate::config::{validate_device, ConfigFields, DeviceConfig};
use crate::error::{BusError, ConfigError, Error, Result};

use super::driver::Device;
use super::transport::{DeviceId, Transport};

/// Outcome of a successful [`configure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Applied {
    /// Device that was configured.
    pub device: DeviceId,
    /// Field groups written and verified.
    pub fields: ConfigFields,
}

/// Apply `config` to `device` and verify it by reading it back.
///
/// The configuration is validated locally, written as a whole, then read back
/// and compared group by group. On success the device becomes ready. On any
/// failure the device is marked faulted with the implicated fields and stays
/// unready until a later call succeeds. Applying the same configuration again
/// is harmless.
///
/// # Errors
///
/// - Validation errors from [`validate_device`]
/// - [`ConfigError::Rejected`] when the device refuses fields
/// - [`ConfigError::ReadbackMismatch`] when readback differs from `config`
/// - [`ConfigError::Bus`] on any other transport failure
pub fn configure<B: Transport>(
    bus: &mut B,
    device: &mut Device,
    config: DeviceConfig,
) -> Result<Applied> {
    let id = device.id();

    if let Err(Error::Config(err)) = validate_device(device.name(), &config) {
        return Err(fault(device, err));
    }

    if let Err(cause) = bus.apply_config(id, &config) {
        let err = match cause {
            BusError::Rejected(fields) => ConfigError::Rejected { device: id, fields },
            cause => ConfigError::Bus { device: id, cause },
        };
        return Err(fault(device, err));
    }

    let readback = match bus.read_config(id) {
        Ok(readback) => readback,
        Err(cause) => return Err(fault(device, ConfigError::Bus { device: id, cause })),
    };

    let mismatched = config.mismatched_fields(&readback);
    if !mismatched.is_empty() {
        return Err(fault(
            device,
            ConfigError::ReadbackMismatch {
                device: id,
                fields: mismatched,
            },
        ));
    }

    device.mark_ready(config);
    info!("device {} configured", id.0);

    Ok(Applied {
        device: id,
        fields: ConfigFields::all(),
    })
}

fn fault(device: &mut Device, err: ConfigError) -> Error {
    let fields = err.fields();
    device.mark_faulted(fields);
    error!("device {} configuration failed: {=u8:#x}", device.id().0, fields.bits());
    Error::Config(err)
}
