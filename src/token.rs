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

use time::OffsetDateTime;

/// The short-lived token returned by the Secure Token Service exchange.
///
/// It only grants the permissions of the workload identity pool principal and
/// is consumed internally as the bearer credential for the service account
/// exchange.
#[derive(Clone, PartialEq)]
pub struct FederatedToken {
    value: String,
}

impl FederatedToken {
    pub(crate) fn new<S: Into<String>>(value: S) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub(crate) fn value(&self) -> &str {
        &self.value
    }
}

/// Prevent accidental leaks of the token value, e.g. in logs.
impl std::fmt::Debug for FederatedToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FederatedToken")
            .field("value", &"[censored]")
            .finish()
    }
}

/// An OAuth 2.0 access token for the target service account.
///
/// This is the final product of the federation pipeline. The token carries the
/// service account's own permissions, limited to the requested scope.
#[derive(Clone, PartialEq)]
pub struct ServiceAccountToken {
    /// The bearer token value, to be sent as `Authorization: Bearer <value>`.
    pub access_token: String,
    /// The instant the token expires at, as reported by the service.
    pub expire_time: OffsetDateTime,
}

/// Prevent accidental leaks of the token value, e.g. in logs.
impl std::fmt::Debug for ServiceAccountToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountToken")
            .field("access_token", &"[censored]")
            .field("expire_time", &self.expire_time)
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn federated_token_debug_is_censored() {
        let token = FederatedToken::new("ya29.federated-token-value");
        let fmt = format!("{token:?}");
        assert!(!fmt.contains("federated-token-value"), "{fmt}");
        assert!(fmt.contains("[censored]"), "{fmt}");
        assert_eq!(token.value(), "ya29.federated-token-value");
    }

    #[test]
    fn service_account_token_debug_is_censored() {
        let token = ServiceAccountToken {
            access_token: "ya29.service-account-token-value".to_string(),
            expire_time: datetime!(2026-01-01 00:00:00 UTC),
        };
        let fmt = format!("{token:?}");
        assert!(!fmt.contains("service-account-token-value"), "{fmt}");
        assert!(fmt.contains("[censored]"), "{fmt}");
        assert!(fmt.contains("2026"), "{fmt}");
    }
}
