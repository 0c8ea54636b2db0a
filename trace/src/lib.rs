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

//! Error Trace wraps failures with the context collected on their way up the stack: the call
//! site of every wrap, a status code, a message meant for end users and free-form metadata.
//!
//! The collected chain is flattened on demand into a [Trace] and rendered as one deterministic
//! line, while the original failure stays reachable through [std::error::Error::source].
#![doc = include_str!("../../README.md")]
#![deny(missing_docs)]

mod aggregate;
pub mod capture;
mod config;
mod error;
mod identity;
mod logging;
mod metadata;
mod render;
mod status;
mod wrapper;

pub use self::{
    aggregate::{Chain, Trace, RESERVED_KEYS},
    capture::Frame,
    config::{LocationStyle, RenderConfig, DEFAULT_SEPARATOR},
    error::{Error, Result},
    identity::{is, is_in_chain},
    logging::LOG_TARGET,
    metadata::MetadataValue,
    render::Renderer,
    status::StatusCode,
    wrapper::{wrap, BoxError, Cause, OptionExt, ResultExt, TraceError},
};

/// Wrap a failure, recording the call site together with the name of the enclosing function.
///
/// This is [TraceError::new_at] fed with [frame!].
#[macro_export]
macro_rules! traced {
    ($cause:expr $(,)?) => {
        $crate::TraceError::new_at($cause, $crate::frame!())
    };
}
