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

use std::{
    collections::BTreeMap,
    sync::{LazyLock, Mutex},
};

use error_trace::{capture::Frame, Renderer, StatusCode, TraceError, LOG_TARGET};
use log::{
    kv::{self, Key, Value, VisitSource},
    Level, LevelFilter, Log, Metadata, Record,
};

#[derive(Debug)]
struct Captured {
    level: Level,
    target: String,
    module_path: Option<String>,
    message: String,
    line: Option<u32>,
    file: Option<String>,
    fields: BTreeMap<String, String>,
}

struct KeyValueVisitor(BTreeMap<String, String>);

impl<'kvs> VisitSource<'kvs> for KeyValueVisitor {
    fn visit_pair(&mut self, key: Key<'kvs>, value: Value<'kvs>) -> Result<(), kv::Error> {
        self.0.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

struct CaptureLogger(Mutex<Vec<Captured>>);

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        let mut visitor = KeyValueVisitor(BTreeMap::new());
        let _ = record.key_values().visit(&mut visitor);
        self.0.lock().unwrap().push(Captured {
            level: record.level(),
            target: record.target().to_owned(),
            module_path: record.module_path().map(str::to_owned),
            message: record.args().to_string(),
            line: record.line(),
            file: record.file().map(str::to_owned),
            fields: visitor.0,
        });
    }

    fn flush(&self) {}
}

static LOGGER: LazyLock<CaptureLogger> = LazyLock::new(|| CaptureLogger(Mutex::new(Vec::new())));

// Single test so that the global logger and max level are not shared between tests.
#[test]
fn emits_one_structured_record_per_trace() {
    log::set_logger(&*LOGGER).unwrap();
    log::set_max_level(LevelFilter::Info);

    let inner = TraceError::new_at("connection refused", Frame::new("src/db.rs", 4, 1))
        .with_status(StatusCode::InternalError)
        .with_metadata("table", "users");
    let outer = TraceError::new_at(inner, Frame::new("src/api.rs", 9, 1))
        .with_presentation_msg("try again later")
        .with_metadata("attempt", 2);

    outer.log(Level::Warn);
    // filtered out by the max level
    outer.log(Level::Debug);
    outer.aggregate().log_with(&Renderer::default(), "my_app::users", Level::Error);

    let records = LOGGER.0.lock().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].level, Level::Error);
    assert_eq!(records[1].target, "my_app::users");
    assert_eq!(records[1].fields, records[0].fields);

    let record = &records[0];
    assert_eq!(record.level, Level::Warn);
    assert_eq!(record.target, LOG_TARGET);
    assert!(record.module_path.is_none());
    assert_eq!(record.message, "connection refused");
    assert_eq!(record.file.as_deref(), Some("src/api.rs"));
    assert_eq!(record.line, Some(9));
    assert_eq!(record.fields.get("where").map(String::as_str), Some("src/api.rs:9 => src/db.rs:4"));
    assert_eq!(record.fields.get("status_code").map(String::as_str), Some("internal_error"));
    assert_eq!(record.fields.get("presentation_msg").map(String::as_str), Some("try again later"));
    assert_eq!(record.fields.get("table").map(String::as_str), Some("users"));
    assert_eq!(record.fields.get("attempt").map(String::as_str), Some("2"));
    assert!(!record.fields.contains_key("title"));
}
