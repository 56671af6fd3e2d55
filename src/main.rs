//! AWS Temporary Credentials
//!
//! Assumes an IAM role through the AWS CLI, optionally with an MFA token, and
//! either saves the temporary credentials as a named profile or prints them
//! for a calling shell:
//!
//! ```text
//! aws-tempcreds generate-profile -r <role-arn> -n <new-profile> [-s <source>] [-m <code>]
//! eval $(aws-tempcreds generate -r <role-arn> [-o shell|json])
//! ```
//!
//! Progress is logged to stderr; stdout only carries generated credentials.

use anyhow::Result;
use clap::Parser;

mod assume;
mod cli;
mod credentials;
mod error;
mod generator;
mod invoker;
mod mfa;
mod output;
mod profile;
mod region;
#[cfg(test)]
mod testing;

use cli::{Args, Command};
use generator::CredentialGenerator;
use invoker::{AwsCli, SystemInvoker};

fn main() -> Result<()> {
    // Info by default so the progress narration shows; RUST_LOG overrides.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let Args { aws_cli, command } = Args::parse();

    let cli = AwsCli::new(aws_cli, SystemInvoker);
    let generator = CredentialGenerator::new(cli.clone(), cli);

    match command {
        Command::GenerateProfile(args) => {
            generator.generate_profile(&args.assume.options(), &args.new_profile)?;
        }
        Command::Generate(args) => {
            let mut stdout = std::io::stdout().lock();
            generator.generate_output(&args.assume.options(), args.output, &mut stdout)?;
        }
    }
    Ok(())
}
