//! Test doubles for the process seam and the stored-region lookup.

use std::cell::RefCell;

use chrono::{DateTime, Duration, SecondsFormat, Utc};

use crate::error::Error;
use crate::invoker::{Invoker, Output};
use crate::region::RegionLookup;

pub const MFA_SERIAL: &str = "arn:aws:iam::123456789012:mfa/user";
pub const ROLE_ARN: &str = "arn:aws:iam::123456789012:role/TestRole";
pub const ACCESS_KEY_ID: &str = "ASIAMOCK123456789012";
pub const SECRET_ACCESS_KEY: &str = "mockSecretKey123456789012345678901234";
pub const SESSION_TOKEN: &str =
    "mockSessionToken123456789012345678901234567890123456789012345678901234567890";

/// Answers every invocation through a closure and records the argument vectors.
pub struct ScriptedInvoker {
    respond: Box<dyn Fn(&[String]) -> Output>,
    calls: RefCell<Vec<Vec<String>>>,
}

impl ScriptedInvoker {
    pub fn new(respond: impl Fn(&[String]) -> Output + 'static) -> Self {
        Self {
            respond: Box::new(respond),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Mimics an AWS CLI that has one MFA device and a working role.
    pub fn aws(expiration: DateTime<Utc>) -> Self {
        Self::with_mfa_device(MFA_SERIAL, expiration)
    }

    pub fn with_mfa_device(serial: &'static str, expiration: DateTime<Utc>) -> Self {
        let response = assume_role_response(expiration);
        Self::new(move |args| {
            if has(args, "list-mfa-devices") {
                ok(&format!("{serial}\n"))
            } else if has(args, "assume-role") {
                ok(&response)
            } else if has(args, "configure") {
                ok("")
            } else {
                failed(&format!("Unrecognized command: {args:?}"))
            }
        })
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.borrow().clone()
    }

    /// Number of recorded calls that contain `word` as an argument.
    pub fn count(&self, word: &str) -> usize {
        self.calls.borrow().iter().filter(|c| has(c, word)).count()
    }
}

impl Invoker for ScriptedInvoker {
    fn invoke(&self, _program: &str, args: &[String]) -> std::io::Result<Output> {
        self.calls.borrow_mut().push(args.to_vec());
        Ok((self.respond)(args))
    }
}

/// Stored-region lookup answering from a fixed value.
pub struct FixedRegion {
    region: Option<&'static str>,
    lookups: RefCell<Vec<Option<String>>>,
}

impl FixedRegion {
    /// `None` simulates a failing lookup.
    pub fn new(region: Option<&'static str>) -> Self {
        Self {
            region,
            lookups: RefCell::new(Vec::new()),
        }
    }

    /// Profiles the lookup was asked about, in order.
    pub fn lookups(&self) -> Vec<Option<String>> {
        self.lookups.borrow().clone()
    }
}

impl RegionLookup for FixedRegion {
    fn stored_region(&self, profile: Option<&str>) -> Result<String, Error> {
        self.lookups.borrow_mut().push(profile.map(String::from));
        self.region.map(String::from).ok_or(Error::CommandFailed {
            operation: "get region",
            status: "exit status: 1".to_string(),
            output: String::new(),
        })
    }
}

pub fn has(args: &[String], word: &str) -> bool {
    args.iter().any(|a| a == word)
}

pub fn ok(stdout: &str) -> Output {
    Output {
        code: Some(0),
        stdout: stdout.to_string(),
        stderr: String::new(),
    }
}

pub fn failed(stderr: &str) -> Output {
    Output {
        code: Some(255),
        stdout: String::new(),
        stderr: stderr.to_string(),
    }
}

pub fn in_one_hour() -> DateTime<Utc> {
    Utc::now() + Duration::hours(1)
}

/// Body of `sts assume-role --query Credentials --output json`.
pub fn assume_role_response(expiration: DateTime<Utc>) -> String {
    format!(
        r#"{{
    "AccessKeyId": "{ACCESS_KEY_ID}",
    "SecretAccessKey": "{SECRET_ACCESS_KEY}",
    "SessionToken": "{SESSION_TOKEN}",
    "Expiration": "{}"
}}
"#,
        expiration.to_rfc3339_opts(SecondsFormat::Secs, true)
    )
}
