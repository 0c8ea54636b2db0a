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

use crate::{capture::Frame, Error, Renderer, Result};

/// Placed between two locations of the trail
pub const DEFAULT_SEPARATOR: &str = " => ";

/// How a single location of the trail is written
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationStyle {
    /// `function:line`, falling back to `file:line` when the function was not captured
    #[default]
    Function,
    /// `file:line`
    File,
    /// `file:line:column`
    Full,
}

impl LocationStyle {
    /// Write one frame in this style
    pub fn format(self, frame: &Frame) -> String {
        match self {
            Self::Function => frame.to_string(),
            Self::File => format!("{}:{}", frame.file(), frame.line()),
            Self::Full => format!("{}:{}:{}", frame.file(), frame.line(), frame.column()),
        }
    }
}

/// Configuration parameters for [Renderer]
///
/// These can be set directly, deserialized, or parsed with [RenderConfig::from_json]. Missing
/// fields take their default value.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Separator between the locations of the trail. Defaults to [DEFAULT_SEPARATOR].
    pub separator: String,
    /// How each location is written
    pub location_style: LocationStyle,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_owned(),
            location_style: LocationStyle::default(),
        }
    }
}

impl RenderConfig {
    /// Parse a configuration from its JSON form
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate this configuration to produce a [Renderer]
    pub fn validate(self) -> Result<Renderer> {
        let Self {
            separator,
            location_style,
        } = self;

        if separator.is_empty() {
            return Err(Error::EmptySeparator);
        }

        Ok(Renderer {
            separator,
            location_style,
        })
    }
}

impl TryFrom<RenderConfig> for Renderer {
    type Error = Error;

    fn try_from(value: RenderConfig) -> std::result::Result<Self, Self::Error> {
        value.validate()
    }
}
