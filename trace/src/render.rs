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

use itertools::Itertools as _;

use crate::{LocationStyle, Trace, DEFAULT_SEPARATOR};

/// Serializes a [Trace] into its one-line form.
///
/// Segments are written in a fixed order: location trail, status code, title, presentation
/// message, terminal error text, then metadata sorted by key. Unset fields and empty strings are
/// left out, as is metadata named after a built-in field (see [RESERVED_KEYS][crate::RESERVED_KEYS]).
/// String values are quoted, scalars are not.
///
/// Built from a validated [RenderConfig][crate::RenderConfig]; [Renderer::default] uses the default configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Renderer {
    pub(crate) separator: String,
    pub(crate) location_style: LocationStyle,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_owned(),
            location_style: LocationStyle::default(),
        }
    }
}

impl Renderer {
    /// Join the locations of a trace, most recent first
    pub fn location_trail(&self, trace: &Trace) -> String {
        trace
            .locations()
            .iter()
            .map(|frame| self.location_style.format(frame))
            .join(&self.separator)
    }

    /// Render a trace; an empty trace renders as an empty string
    pub fn render(&self, trace: &Trace) -> String {
        if trace.is_empty() {
            return String::new();
        }

        let mut segments = Vec::new();
        segments.extend(quoted("where", &self.location_trail(trace)));
        segments.extend(trace.status_code().and_then(|code| quoted("status_code", code.as_str())));
        segments.extend(trace.title().and_then(|title| quoted("title", title)));
        segments.extend(trace.presentation_msg().and_then(|msg| quoted("presentation_msg", msg)));
        segments.extend(trace.error().and_then(|error| quoted("error", error)));
        segments.extend(
            trace
                .visible_metadata()
                .map(|(key, value)| format!("[{key}={value}]")),
        );
        segments.join(" ")
    }
}

fn quoted(key: &str, value: &str) -> Option<String> {
    (!value.is_empty()).then(|| format!("[{key}={value:?}]"))
}

impl std::fmt::Display for Trace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&Renderer::default().render(self))
    }
}
