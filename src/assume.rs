//! `sts assume-role` through the AWS CLI.

use chrono::{DateTime, Utc};

use crate::error::Error;
use crate::invoker::{AwsCli, Invoker, with_profile};
use crate::mfa::MfaContext;

const SESSION_NAME_PREFIX: &str = "TempSession";

/// Parameters of one assume-role call.
#[derive(Debug, Clone)]
pub struct AssumeRoleRequest<'a> {
    pub profile: Option<&'a str>,
    pub role_arn: &'a str,
    pub mfa: &'a MfaContext,
    /// Passed through unchecked; STS rejects values outside the role's limits.
    pub duration: u32,
}

impl AssumeRoleRequest<'_> {
    pub fn args(&self, session_name: &str) -> Vec<String> {
        let duration = self.duration.to_string();
        let mut args = with_profile(
            self.profile,
            &[
                "sts",
                "assume-role",
                "--role-arn",
                self.role_arn,
                "--role-session-name",
                session_name,
                "--duration-seconds",
                &duration,
                "--query",
                "Credentials",
                "--output",
                "json",
            ],
        );

        if let Some((serial, code)) = self.mfa.pair() {
            args.extend(
                ["--serial-number", serial, "--token-code", code]
                    .into_iter()
                    .map(String::from),
            );
        }
        args
    }
}

/// Session names only need to be readable in CloudTrail, second resolution is enough.
pub fn session_name(now: DateTime<Utc>) -> String {
    format!("{SESSION_NAME_PREFIX}-{}", now.timestamp())
}

/// Runs the assume-role call and returns the raw JSON credentials object.
pub fn assume_role<I: Invoker>(
    cli: &AwsCli<I>,
    request: &AssumeRoleRequest<'_>,
) -> Result<String, Error> {
    let args = request.args(&session_name(Utc::now()));
    cli.run("assume role", &args)
}

#[cfg(test)]
mod test {
    use chrono::TimeZone;

    use super::*;
    use crate::testing::{MFA_SERIAL, ROLE_ARN, ScriptedInvoker, failed, in_one_hour};

    fn mfa() -> MfaContext {
        MfaContext {
            device: Some(MFA_SERIAL.to_string()),
            code: Some("123456".to_string()),
        }
    }

    #[test]
    fn test_session_name() {
        let now = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(session_name(now), "TempSession-1893456000");
    }

    #[test]
    fn test_args_with_mfa() {
        let mfa = mfa();
        let request = AssumeRoleRequest {
            profile: Some("test-profile"),
            role_arn: ROLE_ARN,
            mfa: &mfa,
            duration: 3600,
        };
        assert_eq!(
            request.args("TempSession-1"),
            vec![
                "--profile",
                "test-profile",
                "sts",
                "assume-role",
                "--role-arn",
                ROLE_ARN,
                "--role-session-name",
                "TempSession-1",
                "--duration-seconds",
                "3600",
                "--query",
                "Credentials",
                "--output",
                "json",
                "--serial-number",
                MFA_SERIAL,
                "--token-code",
                "123456",
            ]
        );
    }

    #[test]
    fn test_args_without_mfa() {
        let mfa = MfaContext::default();
        let request = AssumeRoleRequest {
            profile: None,
            role_arn: ROLE_ARN,
            mfa: &mfa,
            duration: 7200,
        };
        let args = request.args("TempSession-1");
        assert_eq!(args[0], "sts");
        assert!(args.ends_with(&["--output".to_string(), "json".to_string()]));
        assert!(!args.contains(&"--serial-number".to_string()));
    }

    #[test]
    fn test_args_partial_mfa_is_not_sent() {
        let mfa = MfaContext {
            device: None,
            code: Some("123456".to_string()),
        };
        let request = AssumeRoleRequest {
            profile: None,
            role_arn: ROLE_ARN,
            mfa: &mfa,
            duration: 3600,
        };
        let args = request.args("TempSession-1");
        assert!(!args.contains(&"--token-code".to_string()));
    }

    #[test]
    fn test_assume_role() {
        let invoker = ScriptedInvoker::aws(in_one_hour());
        let cli = AwsCli::new("aws", &invoker);
        let mfa = mfa();
        let raw = assume_role(
            &cli,
            &AssumeRoleRequest {
                profile: Some("test-profile"),
                role_arn: ROLE_ARN,
                mfa: &mfa,
                duration: 3600,
            },
        )
        .unwrap();
        assert!(raw.contains("\"AccessKeyId\""));

        let calls = invoker.calls();
        let name = &calls[0][7];
        assert!(name.starts_with("TempSession-"), "{name}");
    }

    #[test]
    fn test_assume_role_failure_keeps_output() {
        let invoker = ScriptedInvoker::new(|_| {
            failed("An error occurred (AccessDenied) when calling the AssumeRole operation")
        });
        let cli = AwsCli::new("aws", &invoker);
        let mfa = MfaContext::default();
        let err = assume_role(
            &cli,
            &AssumeRoleRequest {
                profile: None,
                role_arn: ROLE_ARN,
                mfa: &mfa,
                duration: 3600,
            },
        )
        .unwrap_err();
        assert!(err.to_string().contains("AccessDenied"));
    }
}
