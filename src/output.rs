//! Renders credentials for ephemeral use on stdout.

use std::io::Write;
use std::str::FromStr;

use crate::credentials::Credentials;
use crate::error::Error;
use crate::region::Region;

/// How `generate` prints credentials.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// `export NAME=value` lines for `eval`.
    #[default]
    Shell,
    /// The credential object as pretty JSON.
    Json,
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shell" => Ok(Self::Shell),
            "json" => Ok(Self::Json),
            other => Err(Error::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Writes `credentials` to `out`. The region only appears in shell output.
pub fn render(
    out: &mut impl Write,
    format: OutputFormat,
    credentials: &Credentials,
    region: &Region,
) -> Result<(), Error> {
    match format {
        OutputFormat::Shell => {
            let expiration = credentials.expiration_rfc3339();
            let mut vars = vec![
                ("AWS_ACCESS_KEY_ID", credentials.access_key_id.as_str()),
                ("AWS_SECRET_ACCESS_KEY", credentials.secret_access_key.as_str()),
                ("AWS_SESSION_TOKEN", credentials.session_token.as_str()),
            ];
            if let Some(region) = region.name() {
                vars.push(("AWS_REGION", region));
                vars.push(("AWS_DEFAULT_REGION", region));
            }
            vars.push(("AWS_CREDENTIAL_EXPIRATION", &expiration));

            for (name, value) in vars {
                writeln!(out, "export {name}={value}")?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, credentials).map_err(std::io::Error::from)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
