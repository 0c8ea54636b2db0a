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

//! Call-site capture.
//!
//! Every wrapping entry point of this crate is `#[track_caller]`, so [Frame::caller] resolves to
//! the line of user code that asked for the wrap rather than to anything inside this crate.

use std::panic::Location;

/// The point where a wrap happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub struct Frame {
    file: &'static str,
    line: u32,
    column: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    function: Option<&'static str>,
}

impl Frame {
    /// Build a frame from an already known position
    pub const fn new(file: &'static str, line: u32, column: u32) -> Self {
        Self {
            file,
            line,
            column,
            function: None,
        }
    }

    /// Capture the location of the (tracked) caller
    #[track_caller]
    pub fn caller() -> Self {
        Self::from_location(Location::caller())
    }

    /// Convert a [Location] as handed out by `#[track_caller]` functions
    pub fn from_location(location: &'static Location<'static>) -> Self {
        Self::new(location.file(), location.line(), location.column())
    }

    /// Attach the short name of the function this frame belongs to
    pub fn with_function(mut self, function: &'static str) -> Self {
        self.function = Some(function);
        self
    }

    /// Source file, as given by the compiler
    pub fn file(&self) -> &'static str {
        self.file
    }

    /// 1-based line number
    pub fn line(&self) -> u32 {
        self.line
    }

    /// 1-based column number
    pub fn column(&self) -> u32 {
        self.column
    }

    /// Short function name, when captured through [frame!]
    pub fn function(&self) -> Option<&'static str> {
        self.function
    }
}

/// `function:line` when the function is known, `file:line` otherwise
impl std::fmt::Display for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.function {
            Some(function) => write!(f, "{function}:{}", self.line),
            None => write!(f, "{}:{}", self.file, self.line),
        }
    }
}

/// Strip the module path and any closure segments off a fully qualified function path.
///
/// `my_app::db::insert_user::{{closure}}` becomes `insert_user`.
#[doc(hidden)]
pub fn short_function_name(path: &'static str) -> &'static str {
    let mut path = path.strip_suffix("::__frame_marker").unwrap_or(path);
    while let Some(stripped) = path.strip_suffix("::{{closure}}") {
        path = stripped;
    }
    path.rsplit("::").next().unwrap_or(path)
}

/// Capture a [Frame] for the current call site, including the enclosing function's short name.
#[macro_export]
macro_rules! frame {
    () => {{
        fn __frame_marker() {}
        fn __type_name_of<T>(_: T) -> &'static str {
            ::core::any::type_name::<T>()
        }
        $crate::capture::Frame::caller()
            .with_function($crate::capture::short_function_name(__type_name_of(__frame_marker)))
    }};
}
