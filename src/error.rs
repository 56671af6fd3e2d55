//! Failures of the credential workflow.

const ASSUME_ROLE_HINTS: &str = "This could be due to:
1. The MFA token has expired or is incorrect
2. Your device's time might be out of sync with AWS servers
3. You might not have permission to assume this role
4. The requested duration exceeds the role's maximum session duration
5. MFA might be required for this role

Try again with a shorter duration (e.g., 1 hour = 3600 seconds) or provide an MFA token if required";

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed to run {program}: {cause}")]
    Spawn {
        program: String,
        cause: std::io::Error,
    },

    #[error("failed to {operation} ({status})\nOutput: {output}")]
    CommandFailed {
        operation: &'static str,
        status: String,
        output: String,
    },

    #[error("error getting MFA device: {0}")]
    MfaDiscovery(Box<Error>),

    #[error("no MFA device found, but MFA token was provided")]
    NoMfaDevice,

    #[error("error assuming role: {0}\n\n{hints}", hints = ASSUME_ROLE_HINTS)]
    AssumeRole(Box<Error>),

    #[error("failed to parse credentials: {0}")]
    MalformedCredentials(serde_json::Error),

    #[error("failed to get valid credentials from AWS response: {0} is empty")]
    IncompleteCredentials(&'static str),

    #[error("error configuring AWS profile: failed to set {key} for profile {profile}: {cause}")]
    ConfigureSet {
        key: &'static str,
        profile: String,
        cause: Box<Error>,
    },

    #[error("unsupported output format '{0}'; use 'shell' or 'json'")]
    UnsupportedFormat(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
