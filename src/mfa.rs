//! MFA device discovery and the MFA parameters of an assume-role call.

use crate::error::Error;
use crate::invoker::{AwsCli, Invoker, with_profile};

/// One-time code plus the device it belongs to.
///
/// The device is only looked up once a code is known, so a context without
/// a code never costs an IAM call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MfaContext {
    pub device: Option<String>,
    pub code: Option<String>,
}

impl MfaContext {
    /// Serial number and code, only when both are present.
    pub fn pair(&self) -> Option<(&str, &str)> {
        match (self.device.as_deref(), self.code.as_deref()) {
            (Some(device), Some(code)) => Some((device, code)),
            _ => None,
        }
    }
}

/// Returns the serial number of the first MFA device registered for `profile`,
/// or `None` when the identity has no device.
pub fn first_device<I: Invoker>(
    cli: &AwsCli<I>,
    profile: Option<&str>,
) -> Result<Option<String>, Error> {
    let args = with_profile(
        profile,
        &[
            "iam",
            "list-mfa-devices",
            "--query",
            "MFADevices[0].SerialNumber",
            "--output",
            "text",
        ],
    );
    let serial = cli.run("get MFA device", &args)?;

    // `--output text` renders a missing element as the literal "None"
    match serial.trim() {
        "" | "None" => Ok(None),
        serial => Ok(Some(serial.to_string())),
    }
}

/// Builds the MFA context for `code`, discovering the device only when a code is given.
pub fn resolve<I: Invoker>(
    cli: &AwsCli<I>,
    profile: Option<&str>,
    code: Option<&str>,
) -> Result<MfaContext, Error> {
    let Some(code) = code else {
        return Ok(MfaContext::default());
    };

    let device = first_device(cli, profile)
        .map_err(|e| Error::MfaDiscovery(Box::new(e)))?
        .ok_or(Error::NoMfaDevice)?;

    Ok(MfaContext {
        device: Some(device),
        code: Some(code.to_string()),
    })
}
