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

//! The OAuth 2.0 token exchange with the GCP Secure Token Service.

use serde::Serialize;

use crate::Result;
use crate::constants::{
    ACCESS_TOKEN_TYPE, AWS4_REQUEST_TOKEN_TYPE, CLOUD_PLATFORM_SCOPE, TOKEN_EXCHANGE_GRANT_TYPE,
};
use crate::errors::{Error, Stage};
use crate::subject_token::CallerIdentityToken;
use crate::token::FederatedToken;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExchangeTokenRequest<'a> {
    audience: &'a str,
    grant_type: &'a str,
    requested_token_type: &'a str,
    scope: &'a str,
    subject_token_type: &'a str,
    subject_token: String,
}

/// Exchanges the signed identity token for a federated access token.
///
/// `audience` is the full resource name of the workload identity provider and
/// must match the `x-goog-cloud-target-resource` header inside
/// `identity_token`.
pub(crate) async fn exchange_federated_token(
    client: &reqwest::Client,
    endpoint: &str,
    identity_token: &CallerIdentityToken,
    audience: &str,
) -> Result<FederatedToken> {
    let body = ExchangeTokenRequest {
        audience,
        grant_type: TOKEN_EXCHANGE_GRANT_TYPE,
        requested_token_type: ACCESS_TOKEN_TYPE,
        scope: CLOUD_PLATFORM_SCOPE,
        subject_token_type: AWS4_REQUEST_TOKEN_TYPE,
        subject_token: identity_token.encode()?,
    };

    tracing::debug!(endpoint, audience, "exchanging the identity token for a federated token");
    let response = client
        .post(endpoint)
        .header(http::header::CONTENT_TYPE, "application/json; charset=utf-8")
        .json(&body)
        .send()
        .await
        .map_err(|e| Error::transport(Stage::FederationExchange, e))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| Error::transport(Stage::FederationExchange, e))?;
    if !status.is_success() {
        return Err(Error::federation_exchange(status, body));
    }
    let value = serde_json::from_str::<serde_json::Value>(&body)
        .map_err(|_| Error::federation_exchange(status, body.clone()))?;
    // A 200 without an access token is still a failed exchange.
    match value.get("access_token") {
        Some(serde_json::Value::String(token)) => Ok(FederatedToken::new(token)),
        _ => Err(Error::federation_exchange(status, body)),
    }
}
