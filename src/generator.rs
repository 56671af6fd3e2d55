//! Temporary Credential Generator
//!
//! Exchanges the credentials of a source profile (or the ambient default
//! identity) for short-lived role credentials. Every step goes through the
//! AWS CLI and waits for the previous one:
//!
//! 1. Look up the MFA device of the source identity, only when a token code
//!    was supplied
//! 2. `sts assume-role`, with `--serial-number`/`--token-code` when MFA is used
//! 3. Validate the returned credential object
//! 4. Either persist the credentials into a named profile, or print them as
//!    shell exports / JSON
//!
//! Nothing is retried. Progress goes to the log (stderr), so stdout only ever
//! carries the rendered credentials.

use std::io::Write;

use chrono::{Local, Utc};
use log::{info, warn};

use crate::assume::{self, AssumeRoleRequest};
use crate::credentials::Credentials;
use crate::error::Error;
use crate::invoker::{AwsCli, Invoker};
use crate::mfa;
use crate::output::{self, OutputFormat};
use crate::profile;
use crate::region::{self, Region, RegionLookup};

/// Session duration used when none is given, in seconds.
pub const DEFAULT_DURATION: u32 = 3600;

/// Which identity assumes which role, and where the region comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityRef {
    /// `None` uses the AWS CLI's default credential chain.
    pub source_profile: Option<String>,
    pub role_arn: String,
    /// Explicit region; when absent the source profile's region is inherited.
    pub region: Option<String>,
}

/// Everything needed for one role assumption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    pub identity: IdentityRef,
    pub mfa_code: Option<String>,
    pub duration: u32,
}

/// Runs the credential workflow against an AWS CLI.
///
/// The stored-region lookup is a separate capability so it can be swapped
/// independently of the process seam.
pub struct CredentialGenerator<I, R> {
    cli: AwsCli<I>,
    regions: R,
}

impl<I: Invoker, R: RegionLookup> CredentialGenerator<I, R> {
    pub fn new(cli: AwsCli<I>, regions: R) -> Self {
        Self { cli, regions }
    }

    /// Assumes the role and returns validated credentials.
    ///
    /// # Errors
    ///
    /// * [`Error::MfaDiscovery`] / [`Error::NoMfaDevice`] when a token code was
    ///   given but no device could be found; the role is not assumed then
    /// * [`Error::AssumeRole`] when STS refuses, with remediation hints
    /// * [`Error::MalformedCredentials`] / [`Error::IncompleteCredentials`]
    ///   when the response is unusable
    pub fn acquire(&self, options: &GenerateOptions) -> Result<Credentials, Error> {
        let source_profile = options.identity.source_profile.as_deref();
        match source_profile {
            Some(profile) => info!("Using source profile: {profile}"),
            None => info!("No source profile specified, using default AWS profile"),
        }

        if options.mfa_code.is_some() {
            info!("Getting MFA device ARN...");
        } else {
            info!("No MFA token provided, assuming role without MFA");
        }
        let mfa = mfa::resolve(&self.cli, source_profile, options.mfa_code.as_deref())?;
        if let Some(device) = &mfa.device {
            info!("Found MFA device: {device}");
        }

        info!("{}", describe_duration(options.duration));
        info!("Assuming role {}...", options.identity.role_arn);

        let raw = assume::assume_role(
            &self.cli,
            &AssumeRoleRequest {
                profile: source_profile,
                role_arn: &options.identity.role_arn,
                mfa: &mfa,
                duration: options.duration,
            },
        )
        .map_err(|e| Error::AssumeRole(Box::new(e)))?;

        let credentials = Credentials::parse(&raw)?;
        if credentials.expiration <= Utc::now() {
            warn!(
                "Credentials already expired at {}; check your system clock",
                credentials.expiration_rfc3339()
            );
        }
        Ok(credentials)
    }

    /// Assumes the role and stores the result as profile `new_profile`.
    pub fn generate_profile(
        &self,
        options: &GenerateOptions,
        new_profile: &str,
    ) -> Result<Credentials, Error> {
        let credentials = self.acquire(options)?;

        info!("Setting up profile {new_profile}...");
        let region = self.region(options);
        profile::configure(&self.cli, new_profile, &credentials, &region)?;

        info!(
            "Temporary credentials for profile '{new_profile}' have been successfully configured"
        );
        log_expiration(&credentials);
        info!("You can now use these credentials with: aws --profile {new_profile} <command>");

        Ok(credentials)
    }

    /// Assumes the role and writes the credentials to `out` in `format`.
    ///
    /// The source profile's region is only consulted for shell output, JSON
    /// does not carry a region.
    pub fn generate_output(
        &self,
        options: &GenerateOptions,
        format: OutputFormat,
        out: &mut impl Write,
    ) -> Result<Credentials, Error> {
        let credentials = self.acquire(options)?;

        let region = match format {
            OutputFormat::Shell => self.region(options),
            OutputFormat::Json => Region::Unset,
        };
        output::render(out, format, &credentials, &region)?;
        out.flush()?;

        log_expiration(&credentials);
        Ok(credentials)
    }

    fn region(&self, options: &GenerateOptions) -> Region {
        region::resolve(
            options.identity.region.as_deref(),
            options.identity.source_profile.as_deref(),
            &self.regions,
        )
    }
}

fn log_expiration(credentials: &Credentials) {
    info!(
        "Credentials will expire at: {} (valid for approximately {})",
        credentials
            .expiration
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S %Z"),
        credentials.remaining(Utc::now())
    );
}

fn describe_duration(seconds: u32) -> String {
    if seconds == DEFAULT_DURATION {
        return format!("Using default session duration of 1 hour ({seconds} seconds)");
    }
    let (hours, minutes) = (seconds / 3600, seconds % 3600 / 60);
    format!("Using specified session duration of {hours}h {minutes}m ({seconds} seconds)")
}
