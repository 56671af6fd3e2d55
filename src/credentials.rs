use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Temporary credentials issued by `sts assume-role`.
///
/// Only ever produced by [`Credentials::parse`], so every instance has
/// non-empty key, secret and token.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: String,
    pub expiration: DateTime<Utc>,
}

impl Credentials {
    /// Parses the `Credentials` object printed by `--query Credentials --output json`.
    pub fn parse(raw: &str) -> Result<Self, Error> {
        let credentials: Self =
            serde_json::from_str(raw).map_err(Error::MalformedCredentials)?;

        for (field, value) in [
            ("AccessKeyId", &credentials.access_key_id),
            ("SecretAccessKey", &credentials.secret_access_key),
            ("SessionToken", &credentials.session_token),
        ] {
            if value.is_empty() {
                return Err(Error::IncompleteCredentials(field));
            }
        }
        Ok(credentials)
    }

    /// Expiration in the sortable `YYYY-MM-DDTHH:MM:SSZ` form.
    pub fn expiration_rfc3339(&self) -> String {
        self.expiration.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    /// Time left until expiration as `Xh Ym`, measured from `now`.
    pub fn remaining(&self, now: DateTime<Utc>) -> String {
        let left = self.expiration.signed_duration_since(now);
        format!("{}h {}m", left.num_hours(), left.num_minutes() % 60)
    }
}

// Keeps the secret and token out of debug logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .field("session_token", &"** redacted **")
            .field("expiration", &self.expiration)
            .finish()
    }
}
