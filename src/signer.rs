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

//! AWS Signature Version 4 for the `GetCallerIdentity` request.
//!
//! The request is never sent by this crate. Its signed headers are embedded in
//! the subject token, and sts.googleapis.com replays the request against AWS
//! to prove the caller holds valid credentials. Signing is deterministic:
//! given the same credentials, region, and timestamp it always produces the
//! same headers.

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use url::Url;

use crate::Result;
use crate::aws_credentials::TemporaryAwsCredentials;
use crate::constants::GET_CALLER_IDENTITY_URL;
use crate::errors::Error;

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "AWS4-HMAC-SHA256";
const SERVICE: &str = "sts";
const TERMINATOR: &str = "aws4_request";
/// The headers covered by the signature, sorted and `;`-joined. The
/// `x-goog-cloud-target-resource` header travels with the request but is not
/// signed.
const SIGNED_HEADERS: &str = "host;x-amz-date;x-amz-security-token";

/// `YYYYMMDD'T'HHMMSS'Z'`, the `x-amz-date` format.
const X_AMZ_DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year][month][day]T[hour][minute][second]Z");
/// The date-only prefix used in the credential scope.
const SCOPE_DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year][month][day]");

/// The headers of a signed `GetCallerIdentity` request.
pub(crate) struct SignedRequestHeaders {
    pub authorization: String,
    pub host: String,
    pub amz_date: String,
    pub security_token: String,
}

/// Signs a `POST GetCallerIdentity` request with the given credentials.
pub(crate) fn sign_get_caller_identity(
    credentials: &TemporaryAwsCredentials,
    region: &str,
    request_time: OffsetDateTime,
) -> Result<SignedRequestHeaders> {
    let url = Url::parse(GET_CALLER_IDENTITY_URL)
        .map_err(|e| Error::signature(format!("cannot parse the STS request URL: {e}")))?;
    let host = url
        .host_str()
        .ok_or_else(|| Error::signature("the STS request URL has no host"))?
        .to_string();
    let query = url
        .query()
        .ok_or_else(|| Error::signature("the STS request URL has no query string"))?;

    let amz_date = request_time
        .format(&X_AMZ_DATE_FORMAT)
        .map_err(|e| Error::signature(format!("cannot format the request timestamp: {e}")))?;
    let scope_date = request_time
        .format(&SCOPE_DATE_FORMAT)
        .map_err(|e| Error::signature(format!("cannot format the request date: {e}")))?;

    // The canonical headers must be lowercase and sorted by name; host,
    // x-amz-date and x-amz-security-token already are.
    let canonical_request = format!(
        "POST\n{path}\n{query}\nhost:{host}\nx-amz-date:{amz_date}\nx-amz-security-token:{token}\n\n{SIGNED_HEADERS}\n{payload}",
        path = url.path(),
        token = credentials.session_token,
        payload = hash_payload(b""),
    );

    let scope = format!("{scope_date}/{region}/{SERVICE}/{TERMINATOR}");
    let string_to_sign = build_string_to_sign(
        &amz_date,
        &scope,
        &hex::encode(Sha256::digest(canonical_request.as_bytes())),
    );

    let signing_key = derive_signing_key(
        &credentials.secret_access_key,
        &scope_date,
        region,
        SERVICE,
    );
    let signature = compute_signature(&signing_key, &string_to_sign);

    let authorization = format!(
        "{ALGORITHM} Credential={access_key}/{scope}, SignedHeaders={SIGNED_HEADERS}, Signature={signature}",
        access_key = credentials.access_key_id,
    );

    Ok(SignedRequestHeaders {
        authorization,
        host,
        amz_date,
        security_token: credentials.session_token.clone(),
    })
}

fn build_string_to_sign(amz_date: &str, scope: &str, canonical_request_hash: &str) -> String {
    format!("{ALGORITHM}\n{amz_date}\n{scope}\n{canonical_request_hash}")
}

/// Derives the signing key from the secret key via the four-step HMAC chain.
fn derive_signing_key(secret_key: &str, date: &str, region: &str, service: &str) -> Vec<u8> {
    let k_date = hmac_sha256(format!("AWS4{secret_key}").as_bytes(), date.as_bytes());
    let k_region = hmac_sha256(&k_date, region.as_bytes());
    let k_service = hmac_sha256(&k_region, service.as_bytes());
    hmac_sha256(&k_service, TERMINATOR.as_bytes())
}

fn compute_signature(signing_key: &[u8], string_to_sign: &str) -> String {
    hex::encode(hmac_sha256(signing_key, string_to_sign.as_bytes()))
}

fn hash_payload(payload: &[u8]) -> String {
    hex::encode(Sha256::digest(payload))
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts keys of any length");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::aws_credentials::test::test_credentials;
    use time::macros::datetime;

    // Signing key and signature from the AWS SigV4 reference example.
    #[test]
    fn derive_signing_key_matches_published_example() {
        let key = derive_signing_key(
            "wJalrXUtnFEMI/K7MDENG/bPxRfiCYEXAMPLEKEY",
            "20130524",
            "us-east-1",
            "s3",
        );
        let string_to_sign = "AWS4-HMAC-SHA256\n20130524T000000Z\n20130524/us-east-1/s3/aws4_request\n7344ae5b7ee6c3e7e6b0fe0640412a37625d1fbfff95c48bbb2dc43964946972";
        assert_eq!(
            compute_signature(&key, string_to_sign),
            "f0e8bdb87c964420e857bd35b5d6ed310bd44f0170aba48dd91039c6036bdb41"
        );
    }

    #[test]
    fn empty_payload_hash() {
        assert_eq!(
            hash_payload(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn sign_get_caller_identity_known_answer() {
        let signed = sign_get_caller_identity(
            &test_credentials(),
            "us-east-1",
            datetime!(2021-01-01 01:01:01 UTC),
        )
        .unwrap();
        assert_eq!(signed.host, "sts.amazonaws.com");
        assert_eq!(signed.amz_date, "20210101T010101Z");
        assert_eq!(signed.security_token, "session-token-test-only");
        assert_eq!(
            signed.authorization,
            "AWS4-HMAC-SHA256 \
             Credential=AKIDEXAMPLE/20210101/us-east-1/sts/aws4_request, \
             SignedHeaders=host;x-amz-date;x-amz-security-token, \
             Signature=1f42e95f16ac92c233bca379d58e16a957004baa3f8f6e2bd572184e00511b98"
        );
    }

    #[test]
    fn sign_get_caller_identity_other_region_and_date() {
        let credentials = TemporaryAwsCredentials {
            access_key_id: "fake-key".to_string(),
            secret_access_key: "fake-secret".to_string(),
            session_token: "fake-token".to_string(),
        };
        let signed = sign_get_caller_identity(
            &credentials,
            "eu-west-2",
            datetime!(2024-02-29 23:59:59 UTC),
        )
        .unwrap();
        assert_eq!(signed.amz_date, "20240229T235959Z");
        assert_eq!(
            signed.authorization,
            "AWS4-HMAC-SHA256 \
             Credential=fake-key/20240229/eu-west-2/sts/aws4_request, \
             SignedHeaders=host;x-amz-date;x-amz-security-token, \
             Signature=0074575cc595fd7ea525beb6ac0089448921fd60cfe82037d65afdce09517048"
        );
    }

    #[test]
    fn signing_is_deterministic() {
        let when = datetime!(2021-01-01 01:01:01 UTC);
        let first = sign_get_caller_identity(&test_credentials(), "us-east-1", when).unwrap();
        let second = sign_get_caller_identity(&test_credentials(), "us-east-1", when).unwrap();
        assert_eq!(first.authorization, second.authorization);
        assert_eq!(first.amz_date, second.amz_date);
    }

    #[test]
    fn authorization_never_contains_secrets() {
        let signed = sign_get_caller_identity(
            &test_credentials(),
            "us-east-1",
            datetime!(2021-01-01 01:01:01 UTC),
        )
        .unwrap();
        assert!(!signed.authorization.contains("wJalrXUtnFEMI"));
        assert!(!signed.authorization.contains("session-token-test-only"));
    }
}
