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

use indexmap::IndexMap;

use crate::{capture::Frame, MetadataValue, StatusCode, Trace};

/// Any failure that can sit at the end of a chain
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// What a [TraceError] wraps
#[derive(Debug)]
pub enum Cause {
    /// The original failure, opaque to the tracer
    Terminal(BoxError),
    /// An earlier wrap
    Traced(Box<TraceError>),
}

impl Cause {
    fn from_boxed(error: BoxError) -> Self {
        let error = match error.downcast::<TraceError>() {
            Ok(traced) => return Self::Traced(traced),
            Err(error) => error,
        };
        // a `Box<TraceError>` is boxed once more on its way into `BoxError`
        match error.downcast::<Box<TraceError>>() {
            Ok(traced) => Self::Traced(*traced),
            Err(terminal) => Self::Terminal(terminal),
        }
    }

    fn take_traced(&mut self) -> Option<Box<TraceError>> {
        match self {
            Self::Traced(_) => match std::mem::replace(self, Self::Terminal(Box::new(std::fmt::Error))) {
                Self::Traced(traced) => Some(traced),
                Self::Terminal(_) => None,
            },
            Self::Terminal(_) => None,
        }
    }

    /// View this cause through the standard error protocol
    pub fn as_error(&self) -> &(dyn std::error::Error + 'static) {
        match self {
            Self::Terminal(error) => &**error,
            Self::Traced(traced) => &**traced,
        }
    }
}

/// A failure wrapped with the context of one call site.
///
/// Wrapping a [TraceError] again pushes a new link in front of it; the chain is only flattened
/// when it is read through [TraceError::aggregate] or rendered through [Display][std::fmt::Display].
#[derive(Debug)]
pub struct TraceError {
    cause: Cause,
    frame: Frame,
    status_code: Option<StatusCode>,
    title: Option<String>,
    presentation_msg: Option<String>,
    metadata: Option<IndexMap<String, MetadataValue>>,
}

impl TraceError {
    /// Wrap `cause`, recording the caller's location
    #[track_caller]
    pub fn new<E>(cause: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self::new_at(cause, Frame::caller())
    }

    /// Wrap `cause` at an explicitly captured frame
    pub fn new_at<E>(cause: E, frame: Frame) -> Self
    where
        E: Into<BoxError>,
    {
        Self {
            cause: Cause::from_boxed(cause.into()),
            frame,
            status_code: None,
            title: None,
            presentation_msg: None,
            metadata: None,
        }
    }

    /// The immediate cause of this link
    pub fn cause(&self) -> &Cause {
        &self.cause
    }

    /// Where this link was created
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// The status code set on this link only
    pub fn status_code(&self) -> Option<StatusCode> {
        self.status_code
    }

    /// The title set on this link only
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// The presentation message set on this link only
    pub fn presentation_msg(&self) -> Option<&str> {
        self.presentation_msg.as_deref()
    }

    /// The metadata set on this link only, in insertion order
    pub fn metadata(&self) -> impl Iterator<Item = (&str, &MetadataValue)> {
        self.metadata.iter().flatten().map(|(key, value)| (key.as_str(), value))
    }

    /// Classify this link; outer links override the classification of inner ones
    pub fn set_status(&mut self, status_code: StatusCode) -> &mut Self {
        self.status_code = Some(status_code);
        self
    }

    /// Short label shown alongside the presentation message
    pub fn set_title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = Some(title.into());
        self
    }

    /// Message meant for the end user rather than for logs
    pub fn set_presentation_msg(&mut self, msg: impl Into<String>) -> &mut Self {
        self.presentation_msg = Some(msg.into());
        self
    }

    /// Attach a key/value pair, replacing any previous value under the same key on this link
    pub fn add_metadata(&mut self, key: impl Into<String>, value: impl Into<MetadataValue>) -> &mut Self {
        self.metadata
            .get_or_insert_with(IndexMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// By-value [TraceError::set_status]
    pub fn with_status(mut self, status_code: StatusCode) -> Self {
        self.set_status(status_code);
        self
    }

    /// By-value [TraceError::set_title]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.set_title(title);
        self
    }

    /// By-value [TraceError::set_presentation_msg]
    pub fn with_presentation_msg(mut self, msg: impl Into<String>) -> Self {
        self.set_presentation_msg(msg);
        self
    }

    /// By-value [TraceError::add_metadata]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        self.add_metadata(key, value);
        self
    }

    /// The original failure at the end of the chain
    pub fn root_cause(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        let mut node = self;
        loop {
            match &node.cause {
                Cause::Traced(inner) => node = &**inner,
                Cause::Terminal(error) => return &**error,
            }
        }
    }

    /// Downcast the original failure at the end of the chain
    pub fn downcast_root<E>(&self) -> Option<&E>
    where
        E: std::error::Error + 'static,
    {
        self.root_cause().downcast_ref::<E>()
    }
}

/// Unlinks the chain one node at a time so that dropping a deep chain does not recurse.
impl Drop for TraceError {
    fn drop(&mut self) {
        let mut next = self.cause.take_traced();
        while let Some(mut node) = next {
            next = node.cause.take_traced();
        }
    }
}

impl std::fmt::Display for TraceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.aggregate(), f)
    }
}

impl std::error::Error for TraceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.cause.as_error())
    }
}

/// Wrap a possibly absent failure. Wrapping nothing yields nothing.
#[track_caller]
pub fn wrap<E>(cause: Option<E>) -> Option<TraceError>
where
    E: Into<BoxError>,
{
    match cause {
        Some(cause) => Some(TraceError::new(cause)),
        None => None,
    }
}

/// Wrap the error of a [Result] at the call site
pub trait ResultExt<T> {
    /// Wrap the error, if any, recording the caller's location
    fn trace(self) -> Result<T, TraceError>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<BoxError>,
{
    #[track_caller]
    fn trace(self) -> Result<T, TraceError> {
        match self {
            Ok(value) => Ok(value),
            Err(error) => Err(TraceError::new(error)),
        }
    }
}

/// Builder calls on the result of [wrap], which are no-ops when nothing was wrapped
pub trait OptionExt {
    /// Wrap again, recording the caller's location
    fn trace(self) -> Self;
    /// See [TraceError::with_status]
    fn with_status(self, status_code: StatusCode) -> Self;
    /// See [TraceError::with_title]
    fn with_title(self, title: impl Into<String>) -> Self;
    /// See [TraceError::with_presentation_msg]
    fn with_presentation_msg(self, msg: impl Into<String>) -> Self;
    /// See [TraceError::with_metadata]
    fn with_metadata(self, key: impl Into<String>, value: impl Into<MetadataValue>) -> Self;
    /// Flatten the chain, or produce an empty [Trace] when nothing was wrapped
    fn aggregate(&self) -> Trace;
}

impl OptionExt for Option<TraceError> {
    #[track_caller]
    fn trace(self) -> Self {
        match self {
            Some(traced) => Some(TraceError::new(traced)),
            None => None,
        }
    }

    fn with_status(self, status_code: StatusCode) -> Self {
        self.map(|traced| traced.with_status(status_code))
    }

    fn with_title(self, title: impl Into<String>) -> Self {
        self.map(|traced| traced.with_title(title))
    }

    fn with_presentation_msg(self, msg: impl Into<String>) -> Self {
        self.map(|traced| traced.with_presentation_msg(msg))
    }

    fn with_metadata(self, key: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        self.map(|traced| traced.with_metadata(key, value))
    }

    fn aggregate(&self) -> Trace {
        self.as_ref().map(TraceError::aggregate).unwrap_or_default()
    }
}
