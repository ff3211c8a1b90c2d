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

//! Runtime errors for the federation pipeline.
//!
//! Every failure in [get_token][crate::token_service::TokenService::get_token]
//! maps to one of five categories, one per stage of the pipeline plus a
//! transport category for I/O failures. Callers can distinguish them with the
//! `is_*` predicates without matching on error strings.
//!
//! Error messages never contain AWS secret keys, session tokens, or computed
//! signature values.

use http::StatusCode;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The stage of the pipeline a transport failure was observed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Obtaining temporary AWS credentials.
    AssumeRole,
    /// Signing the `GetCallerIdentity` request.
    Signing,
    /// Exchanging the identity token with the GCP Secure Token Service.
    FederationExchange,
    /// Exchanging the federated token for a service account token.
    ServiceAccountExchange,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::AssumeRole => "assume-role",
            Stage::Signing => "signing",
            Stage::FederationExchange => "federation-exchange",
            Stage::ServiceAccountExchange => "service-account-exchange",
        };
        write!(f, "{name}")
    }
}

/// The error type for token acquisition.
#[derive(thiserror::Error, Debug)]
#[error(transparent)]
pub struct Error(ErrorKind);

impl Error {
    /// Temporary AWS credentials could not be obtained.
    ///
    /// Public so that custom
    /// [AwsCredentialsProvider][crate::aws_credentials::AwsCredentialsProvider]
    /// implementations can report failures in the expected category.
    pub fn credential<T: Into<BoxError>>(source: T) -> Self {
        Self(ErrorKind::Credential(source.into()))
    }

    /// The SigV4 signer could not produce a signature.
    ///
    /// The message must describe the failed step only; never include key
    /// material or signature values in it.
    pub fn signature<T: Into<String>>(message: T) -> Self {
        Self(ErrorKind::Signature(message.into()))
    }

    /// The GCP Secure Token Service rejected the exchange.
    pub(crate) fn federation_exchange(status: StatusCode, body: String) -> Self {
        Self(ErrorKind::FederationExchange { status, body })
    }

    /// The IAM Credentials service rejected the exchange.
    pub(crate) fn service_account_exchange(status: StatusCode, body: String) -> Self {
        Self(ErrorKind::ServiceAccountExchange { status, body })
    }

    /// An I/O failure before any HTTP status was received.
    pub(crate) fn transport(stage: Stage, source: reqwest::Error) -> Self {
        Self(ErrorKind::Transport { stage, source })
    }

    /// Returns `true` if AWS credentials could not be obtained.
    pub fn is_credential(&self) -> bool {
        matches!(self.0, ErrorKind::Credential(_))
    }

    /// Returns `true` if signing failed.
    pub fn is_signature(&self) -> bool {
        matches!(self.0, ErrorKind::Signature(_))
    }

    /// Returns `true` if the Secure Token Service rejected the exchange.
    pub fn is_federation_exchange(&self) -> bool {
        matches!(self.0, ErrorKind::FederationExchange { .. })
    }

    /// Returns `true` if the IAM Credentials service rejected the exchange.
    pub fn is_service_account_exchange(&self) -> bool {
        matches!(self.0, ErrorKind::ServiceAccountExchange { .. })
    }

    /// Returns `true` if the request never completed.
    ///
    /// Transport failures are the only errors worth retrying without changing
    /// the configuration first.
    pub fn is_transport(&self) -> bool {
        matches!(self.0, ErrorKind::Transport { .. })
    }

    /// The HTTP status returned by the rejecting service, if any.
    pub fn http_status(&self) -> Option<StatusCode> {
        match &self.0 {
            ErrorKind::FederationExchange { status, .. }
            | ErrorKind::ServiceAccountExchange { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(thiserror::Error, Debug)]
enum ErrorKind {
    #[error("cannot obtain temporary AWS credentials")]
    Credential(#[source] BoxError),
    #[error("cannot sign the GetCallerIdentity request: {0}")]
    Signature(String),
    #[error("the Secure Token Service rejected the identity token, HTTP {status}: {body}")]
    FederationExchange { status: StatusCode, body: String },
    #[error("the IAM Credentials service rejected the federated token, HTTP {status}: {body}")]
    ServiceAccountExchange { status: StatusCode, body: String },
    #[error("transport failure during {stage}")]
    Transport {
        stage: Stage,
        #[source]
        source: reqwest::Error,
    },
}

#[cfg(test)]
mod test {
    use super::*;
    use test_case::test_case;

    #[test]
    fn credential() {
        let err = Error::credential("no ambient credentials found");
        assert!(err.is_credential(), "{err:?}");
        assert!(!err.is_transport(), "{err:?}");
        assert_eq!(err.http_status(), None);
    }

    #[test]
    fn signature() {
        let err = Error::signature("cannot format the request timestamp");
        assert!(err.is_signature(), "{err:?}");
        assert!(err.to_string().contains("timestamp"), "{err}");
    }

    #[test]
    fn federation_exchange_preserves_status_and_body() {
        let err = Error::federation_exchange(
            StatusCode::BAD_REQUEST,
            r#"{"error":"invalid_request"}"#.to_string(),
        );
        assert!(err.is_federation_exchange(), "{err:?}");
        assert_eq!(err.http_status(), Some(StatusCode::BAD_REQUEST));
        assert!(err.to_string().contains("invalid_request"), "{err}");
    }

    #[test]
    fn service_account_exchange_preserves_status_and_body() {
        let err = Error::service_account_exchange(
            StatusCode::FORBIDDEN,
            r#"{"error":{"status":"PERMISSION_DENIED"}}"#.to_string(),
        );
        assert!(err.is_service_account_exchange(), "{err:?}");
        assert_eq!(err.http_status(), Some(StatusCode::FORBIDDEN));
        assert!(err.to_string().contains("PERMISSION_DENIED"), "{err}");
    }

    #[test_case(Stage::AssumeRole, "assume-role")]
    #[test_case(Stage::Signing, "signing")]
    #[test_case(Stage::FederationExchange, "federation-exchange")]
    #[test_case(Stage::ServiceAccountExchange, "service-account-exchange")]
    fn stage_display(stage: Stage, want: &str) {
        assert_eq!(stage.to_string(), want);
    }
}
