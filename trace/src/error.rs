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

/// A module-specific [Result][core::result::Result] type with a default error variant.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors produced while configuring the renderer or parsing its inputs.
///
/// Wrapping, aggregating and rendering never fail; only the configuration surface does.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The render configuration is not valid JSON or has unexpected fields
    #[error("Malformed render configuration: {0}")]
    MalformedConfig(#[from] serde_json::Error),
    /// The separator placed between locations was empty
    #[error("The location separator must not be empty")]
    EmptySeparator,
    /// The given string does not name a known status code
    #[error("Unknown status code: {0}")]
    UnknownStatusCode(String),
}
