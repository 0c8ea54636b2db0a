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

use log::{
    kv::{self, Key, Source, ToValue, Value, VisitSource},
    Level,
};

use crate::{capture::Frame, MetadataValue, Renderer, Trace, TraceError};

/// Default target of the records emitted by [Trace::log]
pub const LOG_TARGET: &str = "error_trace";

/// Key/value pairs of the record emitted for one trace
struct TraceFields<'a> {
    trace: &'a Trace,
    location_trail: String,
}

impl<'a> TraceFields<'a> {
    fn new(trace: &'a Trace, renderer: &Renderer) -> Self {
        Self {
            trace,
            location_trail: renderer.location_trail(trace),
        }
    }
}

impl Source for TraceFields<'_> {
    fn visit<'kvs>(&'kvs self, visitor: &mut dyn VisitSource<'kvs>) -> Result<(), kv::Error> {
        visitor.visit_pair(Key::from("where"), Value::from(self.location_trail.as_str()))?;
        if let Some(code) = self.trace.status_code() {
            visitor.visit_pair(Key::from("status_code"), Value::from(code.as_str()))?;
        }
        if let Some(title) = self.trace.title().filter(|title| !title.is_empty()) {
            visitor.visit_pair(Key::from("title"), Value::from(title))?;
        }
        if let Some(msg) = self.trace.presentation_msg().filter(|msg| !msg.is_empty()) {
            visitor.visit_pair(Key::from("presentation_msg"), Value::from(msg))?;
        }
        for (key, value) in self.trace.visible_metadata() {
            visitor.visit_pair(Key::from(key), value.to_value())?;
        }
        Ok(())
    }
}

impl ToValue for MetadataValue {
    fn to_value(&self) -> Value<'_> {
        match self {
            Self::Str(s) => Value::from(s.as_str()),
            Self::Int(i) => Value::from(*i),
            Self::UInt(u) => Value::from(*u),
            Self::Float(x) => Value::from(*x),
            Self::Bool(b) => Value::from(*b),
        }
    }
}

impl Trace {
    /// Emit this trace as one structured record through the `log` facade.
    ///
    /// The message is the terminal error text; the location trail, resolved fields and metadata
    /// travel as key/values, with the same omissions as the rendering. The record's file and line
    /// point at the most recent wrap. Its target is [LOG_TARGET] and it carries no module path,
    /// use [Trace::log_with] to log under the caller's own target.
    pub fn log(&self, level: Level) {
        self.log_with(&Renderer::default(), LOG_TARGET, level);
    }

    /// Like [Trace::log], writing the location trail with `renderer` under `target`
    pub fn log_with(&self, renderer: &Renderer, target: &str, level: Level) {
        let metadata = log::Metadata::builder().level(level).target(target).build();
        if self.is_empty() || level > log::max_level() || !log::logger().enabled(&metadata) {
            return;
        }

        let fields = TraceFields::new(self, renderer);
        let head = self.locations().first();
        log::logger().log(
            &log::Record::builder()
                .args(format_args!("{}", self.error().unwrap_or_default()))
                .metadata(metadata)
                .file_static(head.map(Frame::file))
                .line(head.map(Frame::line))
                .key_values(&fields)
                .build(),
        );
    }
}

impl TraceError {
    /// Flatten the chain and emit it, see [Trace::log]
    pub fn log(&self, level: Level) {
        self.aggregate().log(level);
    }
}
