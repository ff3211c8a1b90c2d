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

//! The identity token sent to the Secure Token Service as the subject token.
//!
//! The token is a JSON description of the signed `GetCallerIdentity` request.
//! sts.googleapis.com reconstructs the request from it and replays it against
//! AWS, so every header must be carried exactly as signed.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::constants::GET_CALLER_IDENTITY_URL;
use crate::errors::Error;
use crate::signer::SignedRequestHeaders;

/// Escapes everything except unreserved characters (`A-Z a-z 0-9 - _ . ~`)
/// and `/`.
const SUBJECT_TOKEN_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'/');

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub(crate) struct HeaderPair {
    pub key: String,
    pub value: String,
}

impl HeaderPair {
    fn new<K: Into<String>, V: Into<String>>(key: K, value: V) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// The serialized form of the signed `GetCallerIdentity` request.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub(crate) struct CallerIdentityToken {
    pub url: String,
    pub method: String,
    pub headers: Vec<HeaderPair>,
}

impl CallerIdentityToken {
    /// Assembles the token from the signed headers and the target workload
    /// identity provider.
    ///
    /// The header order is part of the format: `Authorization`, `host`,
    /// `x-amz-date`, `x-goog-cloud-target-resource`, `x-amz-security-token`.
    /// The `x-goog-cloud-target-resource` value must be byte-identical to the
    /// `audience` of the exchange request it is carried in.
    pub(crate) fn new(signed: &SignedRequestHeaders, target_resource: &str) -> Self {
        Self {
            url: GET_CALLER_IDENTITY_URL.to_string(),
            method: "POST".to_string(),
            headers: vec![
                HeaderPair::new("Authorization", &signed.authorization),
                HeaderPair::new("host", &signed.host),
                HeaderPair::new("x-amz-date", &signed.amz_date),
                HeaderPair::new("x-goog-cloud-target-resource", target_resource),
                HeaderPair::new("x-amz-security-token", &signed.security_token),
            ],
        }
    }

    /// The percent-encoded JSON form placed in the `subjectToken` field of
    /// the exchange request.
    pub(crate) fn encode(&self) -> Result<String> {
        let json = serde_json::to_string(self)
            .map_err(|e| Error::signature(format!("cannot serialize the identity token: {e}")))?;
        Ok(utf8_percent_encode(&json, SUBJECT_TOKEN_SET).to_string())
    }
}
