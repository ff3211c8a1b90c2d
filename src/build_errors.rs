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

//! Errors for builders in this crate.
//!
//! These errors surface configuration problems before any network call is
//! made, typically a required field that was never set on a
//! [Builder][crate::token_service::Builder].

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The error type for builders in this crate.
#[derive(thiserror::Error, Debug)]
#[error(transparent)]
pub struct Error(ErrorKind);

impl Error {
    /// A required field was not set.
    pub(crate) fn missing_field(name: &'static str) -> Self {
        Self(ErrorKind::MissingField(name))
    }

    /// The HTTP client could not be initialized.
    pub(crate) fn client<T: Into<BoxError>>(source: T) -> Self {
        Self(ErrorKind::Client(source.into()))
    }

    /// Returns `true` if the error is due to a missing required field.
    pub fn is_missing_field(&self) -> bool {
        matches!(self.0, ErrorKind::MissingField(_))
    }
}

#[derive(thiserror::Error, Debug)]
enum ErrorKind {
    #[error("the \"{0}\" field is required but was not set")]
    MissingField(&'static str),
    #[error("cannot initialize the HTTP client")]
    Client(#[source] BoxError),
}

#[cfg(test)]
mod test {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn missing_field() {
        let err = Error::missing_field("aws_region");
        assert!(err.is_missing_field(), "{err:?}");
        let msg = err.to_string();
        assert!(msg.contains("aws_region"), "{msg}");
    }

    #[test]
    fn client() {
        let err = Error::client("simulated failure");
        assert!(!err.is_missing_field(), "{err:?}");
        assert!(err.source().is_some(), "{err:?}");
    }
}
