// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Temporary AWS credentials and the sources they come from.

use crate::Result;
use crate::errors::Error;

const ACCESS_KEY_ID_VAR: &str = "AWS_ACCESS_KEY_ID";
const SECRET_ACCESS_KEY_VAR: &str = "AWS_SECRET_ACCESS_KEY";
const SESSION_TOKEN_VAR: &str = "AWS_SESSION_TOKEN";

/// A temporary AWS credential triple, typically obtained from STS
/// `AssumeRole`.
///
/// All three components are required: the identity token format used by the
/// federation exchange always carries a session token, so long-lived IAM user
/// credentials without one cannot be used.
#[derive(Clone, PartialEq)]
pub struct TemporaryAwsCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: String,
}

/// Prevent accidental leaks of the secret components, e.g. in logs.
impl std::fmt::Debug for TemporaryAwsCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemporaryAwsCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"[censored]")
            .field("session_token", &"[censored]")
            .finish()
    }
}

/// A source of temporary AWS credentials.
///
/// The federation pipeline calls [credentials][Self::credentials] once per
/// token request, so implementations holding short-lived credentials can
/// refresh them as needed. Implementations should report failures with
/// [Error::credential] so callers can distinguish credential acquisition
/// problems from the exchange stages that follow.
#[async_trait::async_trait]
pub trait AwsCredentialsProvider: std::fmt::Debug + Send + Sync {
    async fn credentials(&self) -> Result<TemporaryAwsCredentials>;
}

/// A provider returning a fixed set of credentials.
///
/// Useful when the host application already manages AssumeRole on its own and
/// simply hands the resulting triple over.
#[derive(Clone, Debug)]
pub struct StaticAwsCredentials {
    credentials: TemporaryAwsCredentials,
}

impl StaticAwsCredentials {
    pub fn new<S: Into<String>>(access_key_id: S, secret_access_key: S, session_token: S) -> Self {
        Self {
            credentials: TemporaryAwsCredentials {
                access_key_id: access_key_id.into(),
                secret_access_key: secret_access_key.into(),
                session_token: session_token.into(),
            },
        }
    }
}

#[async_trait::async_trait]
impl AwsCredentialsProvider for StaticAwsCredentials {
    async fn credentials(&self) -> Result<TemporaryAwsCredentials> {
        Ok(self.credentials.clone())
    }
}

/// A provider reading `AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY` and
/// `AWS_SESSION_TOKEN` from the process environment.
///
/// This matches the environment populated inside ECS tasks, Lambda functions,
/// and shells after `aws sts assume-role`.
#[derive(Clone, Debug, Default)]
pub struct EnvironmentAwsCredentials;

#[async_trait::async_trait]
impl AwsCredentialsProvider for EnvironmentAwsCredentials {
    async fn credentials(&self) -> Result<TemporaryAwsCredentials> {
        Ok(TemporaryAwsCredentials {
            access_key_id: require_var(ACCESS_KEY_ID_VAR)?,
            secret_access_key: require_var(SECRET_ACCESS_KEY_VAR)?,
            session_token: require_var(SESSION_TOKEN_VAR)?,
        })
    }
}

fn require_var(name: &'static str) -> Result<String> {
    std::env::var(name).map_err(|_| Error::credential(format!("{name} is not set")))
}

#[cfg(test)]
pub(crate) mod test {
    use super::*;

    mockall::mock! {
        #[derive(Debug)]
        pub AwsCredentialsProvider {}

        #[async_trait::async_trait]
        impl AwsCredentialsProvider for AwsCredentialsProvider {
            async fn credentials(&self) -> Result<TemporaryAwsCredentials>;
        }
    }

    pub(crate) fn test_credentials() -> TemporaryAwsCredentials {
        TemporaryAwsCredentials {
            access_key_id: "AKIDEXAMPLE".to_string(),
            secret_access_key: "wJalrXUtnFEMI/K7MDENG/bPxRfiCYEXAMPLEKEY".to_string(),
            session_token: "session-token-test-only".to_string(),
        }
    }

    #[test]
    fn debug_is_censored() {
        let credentials = test_credentials();
        let fmt = format!("{credentials:?}");
        assert!(fmt.contains("AKIDEXAMPLE"), "{fmt}");
        assert!(!fmt.contains("wJalrXUtnFEMI"), "{fmt}");
        assert!(!fmt.contains("session-token-test-only"), "{fmt}");
    }

    #[tokio::test]
    async fn static_provider_returns_its_credentials() {
        let provider = StaticAwsCredentials::new(
            "AKIDEXAMPLE",
            "wJalrXUtnFEMI/K7MDENG/bPxRfiCYEXAMPLEKEY",
            "session-token-test-only",
        );
        let got = provider.credentials().await.unwrap();
        assert_eq!(got, test_credentials());
    }

    #[tokio::test]
    async fn mock_provider_propagates_errors() {
        let mut provider = MockAwsCredentialsProvider::new();
        provider
            .expect_credentials()
            .returning(|| Err(Error::credential("simulated AssumeRole failure")));
        let err = provider.credentials().await.unwrap_err();
        assert!(err.is_credential(), "{err:?}");
    }
}
