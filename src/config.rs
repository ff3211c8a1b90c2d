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

/// The immutable parameters of a federation pipeline.
///
/// Built by [Builder][crate::token_service::Builder] and available through
/// [TokenService::config][crate::token_service::TokenService::config].
#[derive(Clone, Debug, PartialEq)]
pub struct FederationConfig {
    /// The numeric GCP project the workload identity pool lives in.
    pub project_number: String,
    /// The workload identity pool id.
    pub workload_pool_id: String,
    /// The provider id within the pool.
    pub workload_provider_id: String,
    /// The service account to impersonate.
    pub service_account_email: String,
    /// The AWS account the role lives in.
    pub aws_account_id: String,
    /// The name of the assumed AWS role.
    pub aws_role_name: String,
    /// The AWS region used in the credential scope of the signature.
    pub aws_region: String,
    /// The requested service account token lifetime.
    pub token_lifetime: Duration,
}

impl FederationConfig {
    /// The full resource name of the workload identity provider.
    ///
    /// This single value is used both as the `x-goog-cloud-target-resource`
    /// header of the identity token and as the `audience` of the federation
    /// exchange; the two must be byte-identical or the exchange is rejected.
    pub fn target_resource(&self) -> String {
        format!(
            "//iam.googleapis.com/projects/{}/locations/global/workloadIdentityPools/{}/providers/{}",
            self.project_number, self.workload_pool_id, self.workload_provider_id
        )
    }

    /// The ARN of the AWS role the workload is expected to assume.
    pub fn aws_role_arn(&self) -> String {
        format!(
            "arn:aws:iam::{}:role/{}",
            self.aws_account_id, self.aws_role_name
        )
    }
}
