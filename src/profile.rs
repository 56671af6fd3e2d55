//! Writes temporary credentials into a named profile with `aws configure set`.
//!
//! Each key is written by its own call. A failure stops immediately and
//! leaves already written keys in place; rerunning overwrites them.

use log::info;

use crate::credentials::Credentials;
use crate::error::Error;
use crate::invoker::{AwsCli, Invoker};
use crate::region::Region;

fn set<I: Invoker>(
    cli: &AwsCli<I>,
    profile: &str,
    key: &'static str,
    value: &str,
) -> Result<(), Error> {
    let args: Vec<String> = ["configure", "set", key, value, "--profile", profile]
        .into_iter()
        .map(String::from)
        .collect();
    cli.run("write profile setting", &args)
        .map(|_| ())
        .map_err(|cause| Error::ConfigureSet {
            key,
            profile: profile.to_string(),
            cause: Box::new(cause),
        })
}

/// Stores key, secret, token and (when resolved) region under `profile`.
pub fn configure<I: Invoker>(
    cli: &AwsCli<I>,
    profile: &str,
    credentials: &Credentials,
    region: &Region,
) -> Result<(), Error> {
    set(cli, profile, "aws_access_key_id", &credentials.access_key_id)?;
    set(
        cli,
        profile,
        "aws_secret_access_key",
        &credentials.secret_access_key,
    )?;
    set(cli, profile, "aws_session_token", &credentials.session_token)?;

    if let Some(name) = region.name() {
        info!("Setting region to {region}...");
        set(cli, profile, "region", name)?;
    }
    Ok(())
}
