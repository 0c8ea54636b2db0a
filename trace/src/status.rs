// Wire
// Copyright (C) 2022 Wire Swiss GmbH

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with this program. If not, see http://www.gnu.org/licenses/.

use crate::{Error, Result};

/// Machine-readable classification carried by a [TraceError][crate::TraceError].
///
/// The tracer only carries the code and resolves it along the chain; mapping it onto a transport
/// status is left to the caller.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
    strum::EnumIter,
    serde::Serialize,
    serde::Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum StatusCode {
    /// The request was malformed
    BadRequest,
    /// Something failed on our side
    InternalError,
    /// The request payload could not be bound to the expected shape
    BindFailed,
    /// The caller is not authenticated
    Unauthorized,
    /// The caller is authenticated but not allowed
    Forbidden,
    /// The requested resource does not exist
    NotFound,
}

impl StatusCode {
    /// The snake_case name of this code
    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    /// Parse a code from its snake_case name
    pub fn parse(name: &str) -> Result<Self> {
        name.parse::<Self>().map_err(|_| Error::UnknownStatusCode(name.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use strum::IntoEnumIterator as _;

    use super::*;

    #[rstest]
    #[case(StatusCode::BadRequest, "bad_request")]
    #[case(StatusCode::InternalError, "internal_error")]
    #[case(StatusCode::BindFailed, "bind_failed")]
    #[case(StatusCode::Unauthorized, "unauthorized")]
    #[case(StatusCode::Forbidden, "forbidden")]
    #[case(StatusCode::NotFound, "not_found")]
    fn names_are_snake_case(#[case] code: StatusCode, #[case] name: &str) {
        assert_eq!(code.as_str(), name);
        assert_eq!(code.to_string(), name);
        assert_eq!(serde_json::to_string(&code).unwrap(), format!("\"{name}\""));
    }

    #[test]
    fn parse_accepts_every_known_name() {
        for code in StatusCode::iter() {
            assert_eq!(StatusCode::parse(code.as_str()).unwrap(), code);
        }
    }

    #[test]
    fn parse_rejects_unknown_names() {
        let err = StatusCode::parse("teapot").unwrap_err();
        assert!(matches!(err, Error::UnknownStatusCode(name) if name == "teapot"));
    }
}
