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

use std::collections::BTreeMap;

use crate::{capture::Frame, Cause, MetadataValue, StatusCode, TraceError};

/// Field names written by the renderer and the logger ahead of the metadata.
///
/// Metadata under one of these keys is shadowed by the field, whether or not the field is set.
pub const RESERVED_KEYS: [&str; 5] = ["where", "status_code", "title", "presentation_msg", "error"];

/// Iterator over the links of a chain, from the most recent wrap to the earliest one
#[derive(Debug, Clone)]
pub struct Chain<'a> {
    next: Option<&'a TraceError>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a TraceError;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = match node.cause() {
            Cause::Traced(inner) => Some(&**inner),
            Cause::Terminal(_) => None,
        };
        Some(node)
    }
}

impl std::iter::FusedIterator for Chain<'_> {}

/// The flattened view of a chain.
///
/// - locations are listed head to tail
/// - status code, title and presentation message come from the first link that sets them, walking
///   head to tail, so outer wraps override inner ones
/// - metadata is the union of every link, with outer links winning on key collisions
/// - error is the text of the terminal failure
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct Trace {
    locations: Vec<Frame>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status_code: Option<StatusCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    presentation_msg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    metadata: BTreeMap<String, MetadataValue>,
}

impl Trace {
    /// Every wrap location, most recent first
    pub fn locations(&self) -> &[Frame] {
        &self.locations
    }

    /// The resolved status code
    pub fn status_code(&self) -> Option<StatusCode> {
        self.status_code
    }

    /// The resolved title
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// The resolved presentation message
    pub fn presentation_msg(&self) -> Option<&str> {
        self.presentation_msg.as_deref()
    }

    /// Text of the terminal failure
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Merged metadata, sorted by key
    pub fn metadata(&self) -> &BTreeMap<String, MetadataValue> {
        &self.metadata
    }

    /// Metadata as written next to the resolved fields: reserved keys and empty strings are left out
    pub fn visible_metadata(&self) -> impl Iterator<Item = (&str, &MetadataValue)> {
        self.metadata
            .iter()
            .filter(|(key, value)| !RESERVED_KEYS.contains(&key.as_str()) && !value.is_empty())
            .map(|(key, value)| (key.as_str(), value))
    }

    /// True for the view of an absent chain
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

impl TraceError {
    /// Walk the chain starting at this link
    pub fn chain(&self) -> Chain<'_> {
        Chain { next: Some(self) }
    }

    /// Flatten the chain starting at this link into a [Trace]
    pub fn aggregate(&self) -> Trace {
        let nodes = self.chain().collect::<Vec<_>>();

        let mut metadata = BTreeMap::new();
        for node in nodes.iter().rev() {
            metadata.extend(node.metadata().map(|(key, value)| (key.to_owned(), value.clone())));
        }

        let error = self.root_cause().to_string();

        Trace {
            locations: nodes.iter().map(|node| *node.frame()).collect(),
            status_code: nodes.iter().find_map(|node| node.status_code()),
            title: nodes.iter().find_map(|node| node.title()).map(str::to_owned),
            presentation_msg: nodes.iter().find_map(|node| node.presentation_msg()).map(str::to_owned),
            error: (!error.is_empty()).then_some(error),
            metadata,
        }
    }
}
