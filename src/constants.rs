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

use std::time::Duration;

/// The scope requested for both the federated and the service account token.
pub(crate) const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";
/// Token Exchange OAuth Grant Type.
pub(crate) const TOKEN_EXCHANGE_GRANT_TYPE: &str =
    "urn:ietf:params:oauth:grant-type:token-exchange";
/// Access Token OAuth Token Type.
pub(crate) const ACCESS_TOKEN_TYPE: &str = "urn:ietf:params:oauth:token-type:access_token";
/// AWS SigV4 Subject Token Type.
pub(crate) const AWS4_REQUEST_TOKEN_TYPE: &str = "urn:ietf:params:aws:token-type:aws4_request";

/// The GCP Secure Token Service exchange endpoint.
pub(crate) const DEFAULT_STS_ENDPOINT: &str = "https://sts.googleapis.com/v1beta/token";
/// The IAM Credentials API, without the `generateAccessToken` path.
pub(crate) const DEFAULT_IAM_CREDENTIALS_ENDPOINT: &str = "https://iamcredentials.googleapis.com";

/// The `GetCallerIdentity` request that is signed and embedded in the subject
/// token. It is never sent by this crate; sts.googleapis.com replays it
/// against AWS to verify the caller's identity. The query string is already in
/// canonical (sorted, RFC 3986 encoded) form.
pub(crate) const GET_CALLER_IDENTITY_URL: &str =
    "https://sts.amazonaws.com?Action=GetCallerIdentity&Version=2011-06-15";

pub(crate) const DEFAULT_TOKEN_LIFETIME: Duration = Duration::from_secs(3600);
pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
