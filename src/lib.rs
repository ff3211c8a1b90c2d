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

//! Workload identity federation from AWS to Google Cloud.
//!
//! This crate lets a workload running on AWS obtain a Google Cloud service
//! account access token without any long-lived GCP keys. It relies on
//! [workload identity federation]: the workload proves its AWS identity by
//! signing an STS `GetCallerIdentity` request with its temporary AWS
//! credentials, exchanges the signed request with the GCP Secure Token
//! Service for a federated token, and then impersonates the target service
//! account through the IAM Credentials API.
//!
//! The signed request is never sent to AWS by this crate;
//! `sts.googleapis.com` replays it against AWS to verify the caller.
//!
//! # Example
//!
//! Inside an environment with AWS credentials (an ECS task, a Lambda
//! function, or a shell after `aws sts assume-role`):
//!
//! ```no_run
//! use gcp_workload_identity::TokenService;
//! use gcp_workload_identity::aws_credentials::EnvironmentAwsCredentials;
//! use std::sync::Arc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let service = TokenService::builder(Arc::new(EnvironmentAwsCredentials))
//!     .with_project_number("123456789")
//!     .with_workload_pool_id("my-pool")
//!     .with_workload_provider_id("my-provider")
//!     .with_service_account_email("my-sa@my-project.iam.gserviceaccount.com")
//!     .with_aws_account_id("999999999999")
//!     .with_aws_role_name("my-role")
//!     .with_aws_region("us-east-1")
//!     .build()?;
//! let token = service.get_token().await?;
//! println!("token expires at {}", token.expire_time);
//! # Ok(()) }
//! ```
//!
//! [workload identity federation]: https://cloud.google.com/iam/docs/workload-identity-federation

pub mod aws_credentials;
pub mod build_errors;
pub mod config;
pub mod errors;
pub mod token;
pub mod token_service;

mod constants;
mod iam_credentials;
mod signer;
mod sts_exchange;
mod subject_token;

pub use config::FederationConfig;
pub use token_service::{Builder, TokenService};

/// The result type for token acquisition.
pub type Result<T> = std::result::Result<T, errors::Error>;
/// The result type for builders in this crate.
pub type BuildResult<T> = std::result::Result<T, build_errors::Error>;
