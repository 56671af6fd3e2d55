//! Command-line interface definitions.

use clap::{Parser, Subcommand};

use crate::generator::{DEFAULT_DURATION, GenerateOptions, IdentityRef};
use crate::output::OutputFormat;

/// Assume AWS IAM roles and generate temporary credentials.
///
/// Every AWS call goes through the AWS CLI, so the source identity is
/// resolved exactly as `aws` itself would resolve it.
#[derive(Parser)]
#[command(author, version, about, arg_required_else_help = true)]
pub struct Args {
    /// AWS CLI executable to run
    #[arg(long, global = true, env = "AWS_TEMPCREDS_CLI", default_value = "aws")]
    pub aws_cli: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Assume a role and save the temporary credentials as a named profile
    ///
    /// Example:
    ///   aws-tempcreds generate-profile -r arn:aws:iam::123456789012:role/my-role -m 123456 -n tmp
    GenerateProfile(GenerateProfileArgs),

    /// Assume a role and print the temporary credentials
    ///
    /// Example:
    ///   eval $(aws-tempcreds generate -r arn:aws:iam::123456789012:role/my-role)
    Generate(GenerateArgs),
}

#[derive(clap::Args)]
pub struct AssumeArgs {
    /// Profile to authenticate with [default: the AWS CLI default credentials]
    #[arg(short, long, env = "AWS_TEMPCREDS_SOURCE_PROFILE")]
    pub source_profile: Option<String>,

    /// ARN of the role to assume
    #[arg(short, long)]
    pub role_arn: String,

    /// MFA token code; only needed when the role requires MFA
    #[arg(short, long)]
    pub mfa_token: Option<String>,

    /// Region for the credentials [default: region of the source profile]
    #[arg(long)]
    pub region: Option<String>,

    /// Session duration in seconds (900-43200, limited by the role's maximum)
    #[arg(short, long, env = "AWS_SESSION_DURATION", default_value_t = DEFAULT_DURATION)]
    pub duration: u32,
}

impl AssumeArgs {
    /// Empty strings count as not given.
    pub fn options(&self) -> GenerateOptions {
        GenerateOptions {
            identity: IdentityRef {
                source_profile: non_empty(&self.source_profile),
                role_arn: self.role_arn.clone(),
                region: non_empty(&self.region),
            },
            mfa_code: non_empty(&self.mfa_token),
            duration: self.duration,
        }
    }
}

#[derive(clap::Args)]
pub struct GenerateProfileArgs {
    #[command(flatten)]
    pub assume: AssumeArgs,

    /// Name of the profile to create or overwrite
    #[arg(short, long)]
    pub new_profile: String,
}

#[derive(clap::Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub assume: AssumeArgs,

    /// Output format: 'shell' for export lines, 'json' for a credential object
    #[arg(short, long, default_value = "shell")]
    pub output: OutputFormat,
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty()).map(String::from)
}
